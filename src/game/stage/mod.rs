// Character stage
//
// Keeps track of which characters are on screen in a visual-novel scene and
// animates them on and off:
// - `controller`: enter/exit/highlight bookkeeping and the per-frame fade step
// - `fade`: fade state, advanced once per frame
// - `slot`: one character's sprite on stage
// - `sequencer`: the hook used to advance the narrative script
// - `script`: a linear scene script driven by those advances
//
// ## Usage Example
//
// ```rust
// let mut stage = StageController::new(host, sequencer, StageConfig::default());
// stage.enter_character_with(ALICE, sprite, -200.0, EnterOptions::new().wait_for_finish(true));
//
// // Once per frame, after the host has measured the frame delta
// stage.tick();
// ```

pub mod config;
pub mod controller;
pub mod fade;
pub mod identity;
pub mod script;
pub mod sequencer;
pub mod slot;

pub use config::{OverlapPolicy, StageConfig, ZeroDurationPolicy};
pub use controller::{EnterOptions, ExitOptions, StageController};
pub use fade::{Fade, FadeDirection, FadeStep};
pub use identity::CharacterIdentity;
pub use script::{DialogueLine, Director, SceneScript, ScriptSequencer, StageCommand};
pub use sequencer::{AdvanceCounter, Sequencer};
pub use slot::{SlotKey, StageSlot};

/// Stage operation errors
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("{0} is not on stage")]
    NotOnStage(CharacterIdentity),

    #[error("No stage slot with key {0:?}")]
    UnknownSlot(SlotKey),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_error_display() {
        let err = StageError::NotOnStage(CharacterIdentity::new("Alice"));
        assert_eq!(err.to_string(), "Alice is not on stage");

        let err = StageError::UnknownSlot(SlotKey(3));
        assert_eq!(err.to_string(), "No stage slot with key SlotKey(3)");
    }
}
