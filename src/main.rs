use anyhow::Result;
use log::{error, info};
use vn_stage::engine::assets::SpriteLibrary;
use vn_stage::engine::HeadlessHost;
use vn_stage::game::stage::{
    CharacterIdentity, Director, EnterOptions, ExitOptions, SceneScript, ScriptSequencer,
    StageConfig, StageController,
};
use winit::{
    event::{ElementState, Event, MouseButton, WindowEvent},
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

const ALICE: CharacterIdentity = CharacterIdentity::new("Alice");
const BOB: CharacterIdentity = CharacterIdentity::new("Bob");
const CAROL: CharacterIdentity = CharacterIdentity::new("Carol");

type DemoStage = StageController<HeadlessHost, ScriptSequencer>;

/// A short scene exercising every stage command
fn build_scene(library: &mut SpriteLibrary) -> Result<SceneScript> {
    for (character, expressions) in [
        ("alice", &["neutral", "smile", "wave"][..]),
        ("bob", &["neutral", "grin"][..]),
        ("carol", &["neutral", "bow"][..]),
    ] {
        for expression in expressions {
            library.register_expression(character, expression)?;
        }
    }

    let script = SceneScript::new()
        .narrate("The classroom is empty after the bell.")
        .enter(
            ALICE,
            library.expression("alice", "neutral")?,
            -300.0,
            EnterOptions::new().fade_time(1.0).wait_for_finish(true),
        )
        .say(ALICE, "Nobody's here yet?")
        .enter(
            BOB,
            library.expression("bob", "grin")?,
            300.0,
            EnterOptions::new().mirrored(true),
        )
        .say(BOB, "Just us, it seems.")
        .enter(CAROL, library.expression("carol", "neutral")?, 0.0, EnterOptions::new())
        .highlight(CAROL)
        .say(CAROL, "Sorry I'm late!")
        .say(ALICE, "You're right on time.")
        .exit(
            BOB,
            library.expression("bob", "neutral")?,
            ExitOptions::new().fade_time(0.75).wait_for_finish(true),
        )
        .exit(CAROL, library.expression("carol", "bow")?, ExitOptions::new())
        .say(ALICE, "...and then there was one.")
        .exit(
            ALICE,
            library.expression("alice", "wave")?,
            ExitOptions::new().fade_time(1.0).wait_for_finish(true),
        )
        .narrate("Fin.");

    Ok(script)
}

fn window_title(stage: &DemoStage, director: &Director, library: &SpriteLibrary) -> String {
    let cast: Vec<&str> = stage.slots().iter().map(|slot| slot.identity().name()).collect();
    let speaker = stage
        .speaker()
        .and_then(|identity| stage.find_slot(identity))
        .map(|slot| {
            let sprite = library.name_of(slot.sprite()).unwrap_or("?");
            format!("{} ({})", slot.identity(), sprite)
        })
        .unwrap_or_else(|| "-".to_string());
    let status = if director.is_finished() {
        "fin"
    } else if director.is_awaiting_reader() {
        "click to continue"
    } else {
        "..."
    };

    format!(
        "vn-stage | speaker: {} | on stage: [{}] | {} | {:.0} fps",
        speaker,
        cast.join(", "),
        status,
        stage.host().clock().fps()
    )
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting vn-stage demo...");

    let mut library = SpriteLibrary::new();
    let script = build_scene(&mut library)?;
    info!("Registered {} sprites", library.len());

    let mut stage = StageController::new(
        HeadlessHost::new(),
        ScriptSequencer::new(),
        StageConfig::default(),
    );
    info!("Background surface: {:?}", stage.background_surface());

    let mut director = Director::new(script);
    if let Err(e) = director.start(&mut stage) {
        error!("Scene command failed: {}", e);
    }

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("vn-stage")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    let mut title = String::new();
    let mut finish_logged = false;

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } if event.state == ElementState::Pressed => match event.logical_key {
                Key::Named(NamedKey::Space | NamedKey::Enter) => {
                    director.continue_reading(&mut stage);
                }
                Key::Named(NamedKey::Escape) => elwt.exit(),
                Key::Character(ref c) if c.as_str() == "p" => {
                    stage.host_mut().clock_mut().toggle_pause();
                }
                _ => {}
            },
            Event::WindowEvent {
                event:
                    WindowEvent::MouseInput {
                        state: ElementState::Pressed,
                        button: MouseButton::Left,
                        ..
                    },
                ..
            } => {
                director.continue_reading(&mut stage);
            }
            Event::AboutToWait => {
                stage.host_mut().begin_frame();
                stage.tick();
                if let Err(e) = director.update(&mut stage) {
                    error!("Scene command failed: {}", e);
                }

                if director.is_finished() && stage.active_fades() == 0 && !finish_logged {
                    finish_logged = true;
                    info!(
                        "Scene finished after {:.1}s ({} advances)",
                        stage.host().clock().scene_time(),
                        stage.sequencer().total()
                    );
                }

                let next_title = window_title(&stage, &director, &library);
                if next_title != title {
                    window.set_title(&next_title);
                    title = next_title;
                }

                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
