use gt_core::{ElementRef, Layer, OverlayFrame};
use tracing::debug;

pub const OVERLAY_Z_INDEX: i32 = 10_000;
pub const ELEVATED_ROOT_Z_INDEX: i32 = 10_001;
pub const HIGHLIGHT_Z_INDEX: i32 = 10_005;
pub const NARRATOR_Z_INDEX: i32 = 10_010;

/// Dimming layer with a single interactive hole.
#[derive(Debug, Clone, Default)]
pub struct OverlayController {
    visible: bool,
    highlighted: Option<ElementRef>,
}

impl OverlayController {
    pub fn show_overlay(&mut self) {
        self.visible = true;
    }

    pub fn hide_overlay(&mut self) {
        self.visible = false;
        self.highlighted = None;
    }

    /// Moves the hole to `element`, returning the previously highlighted element.
    pub fn set_highlight(&mut self, element: Option<ElementRef>) -> Option<ElementRef> {
        let previous = self.highlighted.take();
        if !self.visible {
            if element.is_some() {
                debug!("highlight requested while overlay is hidden");
            }
            return previous;
        }
        self.highlighted = element;
        previous
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn highlighted(&self) -> Option<&ElementRef> {
        self.highlighted.as_ref()
    }

    pub fn layer_for(&self, element: &ElementRef) -> Layer {
        if !self.visible {
            return Layer::NATURAL;
        }
        let Some(highlighted) = &self.highlighted else {
            return Layer {
                z_index: None,
                pointer_events: false,
            };
        };

        if element.id == highlighted.id {
            return Layer {
                z_index: Some(HIGHLIGHT_Z_INDEX),
                pointer_events: true,
            };
        }
        if element.is_within(&highlighted.id) {
            return Layer::NATURAL;
        }
        if highlighted.stacking_root.as_deref() == Some(element.id.as_str()) {
            return Layer {
                z_index: Some(ELEVATED_ROOT_Z_INDEX),
                pointer_events: false,
            };
        }
        Layer {
            z_index: None,
            pointer_events: false,
        }
    }

    pub fn accepts_pointer(&self, element: &ElementRef) -> bool {
        self.layer_for(element).pointer_events
    }

    pub fn frame(&self) -> Option<OverlayFrame> {
        if !self.visible {
            return None;
        }
        Some(OverlayFrame {
            z_index: OVERLAY_Z_INDEX,
            highlighted: self.highlighted.as_ref().map(|element| element.id.clone()),
            elevated_root: self
                .highlighted
                .as_ref()
                .and_then(|element| element.stacking_root.clone()),
        })
    }
}
