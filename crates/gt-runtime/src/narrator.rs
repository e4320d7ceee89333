use gt_core::{AdvanceMode, BubbleFrame, NarratorAction, NarratorFrame, PersonaVariant};

/// Persona change that replaced (or first introduced) the visible character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonaTransition {
    pub from: Option<PersonaVariant>,
    pub to: PersonaVariant,
}

/// Character avatar plus its speech bubble.
#[derive(Debug, Clone, Default)]
pub struct NarratorController {
    displayed: Option<PersonaVariant>,
    entering: bool,
    bubble: Option<BubbleFrame>,
}

impl NarratorController {
    /// Shows `persona`. Only an identity change (or the first appearance) is a transition;
    /// a pose change on the same character swaps in place.
    pub fn switch_persona(&mut self, persona: PersonaVariant) -> Option<PersonaTransition> {
        let previous = self.displayed;
        self.displayed = Some(persona);
        match previous {
            Some(current) if current.identity == persona.identity => {
                self.entering = false;
                None
            }
            _ => {
                self.entering = true;
                Some(PersonaTransition {
                    from: previous,
                    to: persona,
                })
            }
        }
    }

    /// Fills the bubble for a step. Returns `true` when the narration had to degrade
    /// to a blank bubble with only the skip control.
    pub fn present(
        &mut self,
        text: &str,
        advance: AdvanceMode,
        is_last: bool,
        asset_available: bool,
    ) -> bool {
        let text = text.trim();
        if text.is_empty() || !asset_available {
            self.bubble = Some(BubbleFrame {
                text: String::new(),
                actions: vec![NarratorAction::Skip],
                degraded: true,
            });
            return true;
        }

        let actions = match advance {
            AdvanceMode::Manual if is_last => vec![NarratorAction::Finish, NarratorAction::Skip],
            AdvanceMode::Manual => vec![NarratorAction::Next, NarratorAction::Skip],
            AdvanceMode::Timed { .. } | AdvanceMode::Interaction => vec![NarratorAction::Skip],
        };
        self.bubble = Some(BubbleFrame {
            text: text.to_string(),
            actions,
            degraded: false,
        });
        false
    }

    pub fn hide(&mut self) {
        self.displayed = None;
        self.entering = false;
        self.bubble = None;
    }

    pub fn offers(&self, action: NarratorAction) -> bool {
        self.bubble
            .as_ref()
            .map(|bubble| bubble.actions.contains(&action))
            .unwrap_or(false)
    }

    pub fn displayed(&self) -> Option<PersonaVariant> {
        self.displayed
    }

    pub fn is_visible(&self) -> bool {
        self.displayed.is_some()
    }

    pub fn frame(&self) -> Option<NarratorFrame> {
        let persona = self.displayed?;
        let bubble = self.bubble.clone()?;
        Some(NarratorFrame {
            persona,
            entering: self.entering,
            bubble,
        })
    }

    pub(crate) fn restore(&mut self, displayed: Option<PersonaVariant>) {
        self.displayed = displayed;
        self.entering = false;
        self.bubble = None;
    }
}

#[cfg(test)]
mod narrator_tests {
    use super::*;
    use gt_core::{PersonaIdentity, Pose};

    #[test]
    fn pose_change_keeps_the_character_in_place() {
        let mut narrator = NarratorController::default();
        let first = narrator
            .switch_persona(PersonaVariant::new(PersonaIdentity::Guide, Pose::Wave))
            .expect("first appearance");
        assert_eq!(first.from, None);

        assert!(narrator
            .switch_persona(PersonaVariant::new(PersonaIdentity::Guide, Pose::Point))
            .is_none());
        assert_eq!(narrator.displayed().map(|p| p.pose), Some(Pose::Point));

        let swap = narrator
            .switch_persona(PersonaVariant::new(PersonaIdentity::Mentor, Pose::Wave))
            .expect("identity change");
        assert_eq!(swap.from.map(|p| p.identity), Some(PersonaIdentity::Guide));
    }

    #[test]
    fn actions_follow_advance_mode() {
        let mut narrator = NarratorController::default();
        narrator.switch_persona(PersonaVariant::default());

        assert!(!narrator.present("Hi", AdvanceMode::Manual, false, true));
        assert!(narrator.offers(NarratorAction::Next));
        assert!(narrator.offers(NarratorAction::Skip));

        narrator.present("Done", AdvanceMode::Manual, true, true);
        assert!(narrator.offers(NarratorAction::Finish));
        assert!(!narrator.offers(NarratorAction::Next));

        narrator.present("Click", AdvanceMode::Interaction, false, true);
        assert!(!narrator.offers(NarratorAction::Next));
        assert!(narrator.offers(NarratorAction::Skip));
    }

    #[test]
    fn empty_text_or_missing_asset_degrades_to_blank_bubble() {
        let mut narrator = NarratorController::default();
        narrator.switch_persona(PersonaVariant::default());

        assert!(narrator.present("   ", AdvanceMode::Manual, false, true));
        let bubble = narrator.frame().expect("frame").bubble;
        assert!(bubble.degraded);
        assert_eq!(bubble.text, "");
        assert_eq!(bubble.actions, vec![NarratorAction::Skip]);

        assert!(narrator.present("Hello", AdvanceMode::Manual, false, false));

        narrator.hide();
        assert!(!narrator.is_visible());
        assert!(narrator.frame().is_none());
        assert!(!narrator.offers(NarratorAction::Skip));
    }
}
