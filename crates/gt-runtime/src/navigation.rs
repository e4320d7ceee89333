use gt_core::{TourError, View};
use tracing::{debug, warn};

use crate::host::TourHost;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    Loaded(View),
    AlreadyVisible(View),
    FellBack { requested: String, fault: TourError },
}

/// Routes tour side effects to the host's view switcher.
#[derive(Debug, Clone, Default)]
pub struct NavigationBridge {
    loads: u64,
}

impl NavigationBridge {
    /// Loads `view` unless it is already current. A failed load falls back to the menu.
    /// `Err` only when the fallback itself fails.
    pub fn go_to<H: TourHost + ?Sized>(
        &mut self,
        host: &mut H,
        view: &View,
    ) -> Result<NavigationOutcome, TourError> {
        if host.current_view().as_ref() == Some(view) {
            debug!(view = %view, "view already visible");
            return Ok(NavigationOutcome::AlreadyVisible(view.clone()));
        }
        match host.show_view(view) {
            Ok(()) => {
                self.loads += 1;
                debug!(view = %view, "view loaded");
                Ok(NavigationOutcome::Loaded(view.clone()))
            }
            Err(fault) => self.fall_back(host, view.to_string(), fault),
        }
    }

    pub fn fall_back<H: TourHost + ?Sized>(
        &mut self,
        host: &mut H,
        requested: String,
        fault: TourError,
    ) -> Result<NavigationOutcome, TourError> {
        warn!(requested = %requested, code = %fault.code, "navigation failed, returning to menu");
        if host.current_view() != Some(View::Menu) {
            host.show_view(&View::Menu).map_err(|menu_fault| {
                TourError::new(
                    "NAV_FALLBACK_FAILED",
                    format!(
                        "Could not open {} ({}) nor fall back to menu ({}).",
                        requested, fault.message, menu_fault.message
                    ),
                )
            })?;
            self.loads += 1;
        }
        Ok(NavigationOutcome::FellBack { requested, fault })
    }

    pub fn loads(&self) -> u64 {
        self.loads
    }
}
