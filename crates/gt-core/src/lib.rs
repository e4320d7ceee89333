pub mod element;
pub mod error;
pub mod frame;
pub mod selector;
pub mod snapshot;
pub mod types;

pub use element::{Ancestor, ElementRef};
pub use error::TourError;
pub use frame::*;
pub use selector::Selector;
pub use snapshot::*;
pub use types::*;
