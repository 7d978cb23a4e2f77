// Linear scene scripts driven by stage advances
//
// The controller never calls back into the script directly. It tells a
// `ScriptSequencer` that the script may advance, and the `Director` drains
// those advances once per frame, running one command per advance.

use super::controller::{EnterOptions, ExitOptions, StageController};
use super::identity::CharacterIdentity;
use super::sequencer::Sequencer;
use super::StageError;
use crate::engine::assets::SpriteHandle;
use crate::engine::host::StageHost;
use log::info;

/// One step of a scene script
#[derive(Debug, Clone, PartialEq)]
pub enum StageCommand {
    Enter {
        character: CharacterIdentity,
        sprite: SpriteHandle,
        x_position: f32,
        options: EnterOptions,
    },
    Exit {
        character: CharacterIdentity,
        sprite: SpriteHandle,
        options: ExitOptions,
    },
    /// Light up a speaker without showing a line
    Highlight(CharacterIdentity),
    /// Show a line and wait for the reader; `None` is the narrator
    Say {
        speaker: Option<CharacterIdentity>,
        line: String,
    },
}

/// Ordered list of stage commands
#[derive(Debug, Clone, Default)]
pub struct SceneScript {
    commands: Vec<StageCommand>,
}

impl SceneScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: StageCommand) {
        self.commands.push(command);
    }

    pub fn enter(
        mut self,
        character: CharacterIdentity,
        sprite: SpriteHandle,
        x_position: f32,
        options: EnterOptions,
    ) -> Self {
        self.push(StageCommand::Enter {
            character,
            sprite,
            x_position,
            options,
        });
        self
    }

    pub fn exit(mut self, character: CharacterIdentity, sprite: SpriteHandle, options: ExitOptions) -> Self {
        self.push(StageCommand::Exit {
            character,
            sprite,
            options,
        });
        self
    }

    pub fn highlight(mut self, character: CharacterIdentity) -> Self {
        self.push(StageCommand::Highlight(character));
        self
    }

    pub fn say(mut self, speaker: CharacterIdentity, line: &str) -> Self {
        self.push(StageCommand::Say {
            speaker: Some(speaker),
            line: line.to_string(),
        });
        self
    }

    pub fn narrate(mut self, line: &str) -> Self {
        self.push(StageCommand::Say {
            speaker: None,
            line: line.to_string(),
        });
        self
    }

    pub fn commands(&self) -> &[StageCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Sequencer that queues advances for a `Director`
#[derive(Debug, Default)]
pub struct ScriptSequencer {
    pending: usize,
    total: usize,
}

impl ScriptSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances not yet consumed
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Advances requested since creation
    pub fn total(&self) -> usize {
        self.total
    }

    /// Consume one pending advance
    fn take_one(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        true
    }
}

impl Sequencer for ScriptSequencer {
    fn next_node(&mut self) {
        self.pending += 1;
        self.total += 1;
    }
}

/// A line currently on screen
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueLine {
    pub speaker: Option<CharacterIdentity>,
    pub text: String,
}

/// Runs a `SceneScript` against a stage, one command per advance
#[derive(Debug)]
pub struct Director {
    script: SceneScript,
    cursor: usize,
    awaiting_reader: bool,
    current_line: Option<DialogueLine>,
}

impl Director {
    pub fn new(script: SceneScript) -> Self {
        Self {
            script,
            cursor: 0,
            awaiting_reader: false,
            current_line: None,
        }
    }

    /// Queue the first command and run it
    pub fn start<H: StageHost>(
        &mut self,
        stage: &mut StageController<H, ScriptSequencer>,
    ) -> Result<(), StageError> {
        info!("Starting scene ({} commands)", self.script.len());
        stage.sequencer_mut().next_node();
        self.update(stage)
    }

    /// Run one command for every advance the stage has signalled.
    ///
    /// Call once per frame after `StageController::tick`. On error the
    /// offending command has been consumed and any remaining advances stay
    /// queued for the next call.
    pub fn update<H: StageHost>(
        &mut self,
        stage: &mut StageController<H, ScriptSequencer>,
    ) -> Result<(), StageError> {
        while stage.sequencer_mut().take_one() {
            self.run_next(stage)?;
        }
        Ok(())
    }

    /// The reader dismissed the current line; returns false if no line was waiting
    pub fn continue_reading<H: StageHost>(
        &mut self,
        stage: &mut StageController<H, ScriptSequencer>,
    ) -> bool {
        if !self.awaiting_reader {
            return false;
        }
        self.awaiting_reader = false;
        stage.sequencer_mut().next_node();
        true
    }

    /// All commands have run and no line is waiting
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.script.len() && !self.awaiting_reader
    }

    pub fn is_awaiting_reader(&self) -> bool {
        self.awaiting_reader
    }

    pub fn current_line(&self) -> Option<&DialogueLine> {
        self.current_line.as_ref()
    }

    /// Index of the next command to run
    pub fn position(&self) -> usize {
        self.cursor
    }

    fn run_next<H: StageHost>(
        &mut self,
        stage: &mut StageController<H, ScriptSequencer>,
    ) -> Result<(), StageError> {
        let Some(command) = self.script.commands().get(self.cursor).cloned() else {
            return Ok(());
        };
        self.cursor += 1;

        match command {
            StageCommand::Enter {
                character,
                sprite,
                x_position,
                options,
            } => {
                stage.enter_character_with(character, sprite, x_position, options);
                Ok(())
            }
            StageCommand::Exit {
                character,
                sprite,
                options,
            } => {
                stage.exit_character_with(character, sprite, options);
                Ok(())
            }
            StageCommand::Highlight(character) => {
                // Highlighting never advances on its own
                let result = stage.highlight_speaker(character);
                stage.sequencer_mut().next_node();
                result
            }
            StageCommand::Say { speaker, line } => {
                let result = match speaker {
                    Some(character) => stage.highlight_speaker(character),
                    None => Ok(()),
                };
                let name = speaker.map_or("Narrator", |character| character.name());
                info!("{}: {}", name, line);

                self.current_line = Some(DialogueLine { speaker, text: line });
                self.awaiting_reader = true;
                result
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::headless::HeadlessHost;
    use crate::game::stage::StageConfig;

    const ALICE: CharacterIdentity = CharacterIdentity::new("Alice");
    const BOB: CharacterIdentity = CharacterIdentity::new("Bob");
    const CAROL: CharacterIdentity = CharacterIdentity::new("Carol");

    type ScriptStage = StageController<HeadlessHost, ScriptSequencer>;

    fn stage() -> ScriptStage {
        StageController::new(HeadlessHost::new(), ScriptSequencer::new(), StageConfig::default())
    }

    fn sprite(name: &str) -> SpriteHandle {
        SpriteHandle::from_path(name)
    }

    fn frame(stage: &mut ScriptStage, director: &mut Director, dt: f32) {
        stage.host_mut().advance(dt);
        stage.tick();
        director.update(stage).unwrap();
    }

    #[test]
    fn test_script_builder() {
        let script = SceneScript::new()
            .enter(ALICE, sprite("alice/neutral"), 0.0, EnterOptions::new())
            .say(ALICE, "Hello.")
            .narrate("A door creaks.")
            .highlight(ALICE)
            .exit(ALICE, sprite("alice/neutral"), ExitOptions::new());

        assert_eq!(script.len(), 5);
        assert!(matches!(script.commands()[2], StageCommand::Say { speaker: None, .. }));
    }

    #[test]
    fn test_fire_and_forget_commands_chain_in_one_update() {
        let script = SceneScript::new()
            .enter(ALICE, sprite("alice/neutral"), -200.0, EnterOptions::new())
            .enter(BOB, sprite("bob/neutral"), 200.0, EnterOptions::new().mirrored(true))
            .highlight(BOB);
        let mut stage = stage();
        let mut director = Director::new(script);

        director.start(&mut stage).unwrap();

        assert!(director.is_finished());
        assert_eq!(stage.len(), 2);
        assert_eq!(stage.speaker(), Some(BOB));
        assert!(stage.find_slot(BOB).unwrap().is_mirrored());
        // The highlight's advance ran off the end of the script
        assert_eq!(stage.sequencer().pending(), 0);
        assert_eq!(stage.sequencer().total(), 4);
    }

    #[test]
    fn test_waiting_enter_blocks_script() {
        let script = SceneScript::new()
            .enter(
                ALICE,
                sprite("alice/neutral"),
                0.0,
                EnterOptions::new().fade_time(0.5).wait_for_finish(true),
            )
            .say(ALICE, "Good morning.");
        let mut stage = stage();
        let mut director = Director::new(script);

        director.start(&mut stage).unwrap();
        assert_eq!(director.position(), 1);
        assert!(director.current_line().is_none());

        frame(&mut stage, &mut director, 0.25);
        assert!(director.current_line().is_none());

        frame(&mut stage, &mut director, 0.25);
        let line = director.current_line().unwrap();
        assert_eq!(line.speaker, Some(ALICE));
        assert_eq!(line.text, "Good morning.");
        assert!(director.is_awaiting_reader());
        assert_eq!(stage.speaker(), Some(ALICE));
    }

    #[test]
    fn test_reader_advances_dialogue() {
        let script = SceneScript::new()
            .narrate("It was raining.")
            .enter(CAROL, sprite("carol/neutral"), 0.0, EnterOptions::new());
        let mut stage = stage();
        let mut director = Director::new(script);

        director.start(&mut stage).unwrap();
        assert!(director.is_awaiting_reader());
        assert!(stage.is_empty());

        assert!(director.continue_reading(&mut stage));
        assert!(!director.continue_reading(&mut stage));
        director.update(&mut stage).unwrap();

        assert!(stage.contains(CAROL));
        assert!(director.is_finished());
    }

    #[test]
    fn test_highlight_error_does_not_stall() {
        let script = SceneScript::new()
            .highlight(CAROL)
            .enter(ALICE, sprite("alice/neutral"), 0.0, EnterOptions::new());
        let mut stage = stage();
        let mut director = Director::new(script);

        let err = director.start(&mut stage).unwrap_err();
        assert!(matches!(err, StageError::NotOnStage(id) if id == CAROL));

        director.update(&mut stage).unwrap();
        assert!(stage.contains(ALICE));
    }

    #[test]
    fn test_ignored_commands_still_advance() {
        let script = SceneScript::new()
            .exit(BOB, sprite("bob/neutral"), ExitOptions::new().wait_for_finish(true))
            .enter(ALICE, sprite("alice/neutral"), 0.0, EnterOptions::new())
            .enter(ALICE, sprite("alice/neutral"), 100.0, EnterOptions::new())
            .exit(ALICE, sprite("alice/bye"), ExitOptions::new().fade_time(0.5).wait_for_finish(true))
            .narrate("The end.");
        let mut stage = stage();
        let mut director = Director::new(script);

        director.start(&mut stage).unwrap();
        assert_eq!(stage.len(), 1);
        assert_eq!(stage.find_slot(ALICE).unwrap().position().x, 0.0);
        assert!(director.current_line().is_none());

        frame(&mut stage, &mut director, 0.25);
        frame(&mut stage, &mut director, 0.25);
        assert!(stage.is_empty());
        assert_eq!(director.current_line().unwrap().text, "The end.");
    }
}
