use anyhow::Result;
use glam::Vec2;
use log::info;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::game_loop::GameLoop;
use engine::input::{Action, InputManager};
use engine::physics::{PhysicsWorld, RigidBodyHandle};
use game::{
    CoverTiming, GameSession, Interactable, Level, PlayerCamera, PlayerConfig, PlayerHud,
};

const WINDOW_WIDTH: f32 = 1280.0;
const WINDOW_HEIGHT: f32 = 720.0;

/// A readable prop scattered around the test level
struct Signpost {
    message: &'static str,
}

impl Interactable for Signpost {
    fn interact(&mut self, _initiator: RigidBodyHandle) {
        info!("Signpost: {}", self.message);
    }
}

/// The hand-built test level: a floor, some platforms, a spike pit and
/// three checkpoints
fn build_test_level(physics: &mut PhysicsWorld) -> Level {
    let mut level = Level::new();

    // Floor with a gap over the spike pit
    level.add_platform(physics, Vec2::new(-10.0, -0.5), 30.0, 1.0);
    level.add_platform(physics, Vec2::new(18.0, -0.5), 16.0, 1.0);
    level.add_platform(physics, Vec2::new(7.0, 2.0), 4.0, 0.5);

    // Spikes at the bottom of the gap
    level.add_damage_volume(physics, Vec2::new(7.0, -4.0), 6.0, 1.0, 1);

    level.add_checkpoint(Vec2::new(-20.0, 1.5));
    level.add_checkpoint(Vec2::new(-5.0, 1.5));
    level.add_checkpoint(Vec2::new(14.0, 1.5));

    level.add_interactable(
        physics,
        Vec2::new(-18.0, 1.0),
        0.6,
        1.4,
        Box::new(Signpost {
            message: "Mind the gap. The lantern only shows so much.",
        }),
    );

    level
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Dusklight...");

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Dusklight")
        .with_inner_size(winit::dpi::LogicalSize::new(
            WINDOW_WIDTH as u32,
            WINDOW_HEIGHT as u32,
        ))
        .with_resizable(true)
        .build(&event_loop)?;

    // Wire up the session
    let mut physics = PhysicsWorld::new();
    let level = build_test_level(&mut physics);
    let camera = PlayerCamera::new(Vec2::new(-20.0, 1.5), WINDOW_WIDTH, WINDOW_HEIGHT, 0.25);
    let hud = PlayerHud::new(CoverTiming::default());

    let mut session = GameSession::new(PlayerConfig::default(), level, 0, physics, camera, hud)?;
    let mut input = InputManager::new();
    let mut game_loop = GameLoop::new();

    info!("Session wired, entering main loop");

    event_loop
        .run(move |event, elwt| {
            match event {
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
                } => {
                    input.process_keyboard_event(&event);
                }
                Event::WindowEvent {
                    event: WindowEvent::MouseInput { state, button, .. },
                    ..
                } => {
                    input.process_mouse_button(button, state);
                }
                Event::WindowEvent {
                    event: WindowEvent::CursorMoved { position, .. },
                    ..
                } => {
                    input.process_cursor_moved(position.x as f32, position.y as f32);
                }
                Event::WindowEvent {
                    event: WindowEvent::RedrawRequested,
                    ..
                } => {
                    window.request_redraw();
                }
                Event::AboutToWait => {
                    if input.player().just_pressed(Action::Menu) {
                        info!("Menu requested, shutting down...");
                        elwt.exit();
                        return;
                    }
                    if input.player().just_pressed(Action::Pause) {
                        game_loop.toggle_pause();
                        // Consume the edge so it cannot re-trigger
                        input.update();
                    }

                    let updates = game_loop.begin_frame();
                    for _ in 0..updates {
                        session.fixed_update(
                            game_loop.fixed_timestep(),
                            input.player(),
                            input.aim_input(),
                        );
                        // Edges are cleared per consumed tick, so presses
                        // landing between ticks are never dropped
                        input.update();
                    }

                    window.request_redraw();
                }
                _ => {}
            }
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
