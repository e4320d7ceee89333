use gt_core::{ElementRef, PersonaIdentity, Selector, TourError, View};

/// Capabilities the tour borrows from the host application.
pub trait TourHost {
    /// Looks up the element a selector refers to. `None` when it is not rendered yet.
    fn resolve(&self, selector: &Selector) -> Option<ElementRef>;

    fn current_view(&self) -> Option<View>;

    fn show_view(&mut self, view: &View) -> Result<(), TourError>;

    fn has_persona_asset(&self, _identity: PersonaIdentity) -> bool {
        true
    }
}
