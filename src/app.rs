use crate::color::Rgba;
use crate::config::Options;
use crate::error::ConfigError;
use crate::scene::draw::{draw_scene, to_surface};
use crate::scene::{svg, ShapeStore};
use crate::simulation::{Simulation, Surface};
use crate::ticker::FrameClock;
use nannou::prelude::*;
use std::sync::OnceLock;
use tracing::{debug, error, info, warn};

// nannou's model function takes no arguments beyond the app, so the options
// are handed over through here.
static OPTIONS: OnceLock<Options> = OnceLock::new();

/// Validates `options` and opens the particle window.
///
/// Returns early with the validation error; otherwise runs the event loop.
pub fn run(options: Options) -> Result<(), ConfigError> {
    options.validate()?;
    if OPTIONS.set(options).is_err() {
        warn!("app already launched, ignoring new options");
    }
    nannou::app(model).update(update).exit(exit).run();
    Ok(())
}

struct Model {
    sim: Simulation<ShapeStore>,
    clock: FrameClock,
    background: Rgba,
    fit_to_window: bool,
}

fn model(app: &App) -> Model {
    let options = OPTIONS.get().cloned().unwrap_or_default();
    let surface = &options.surface;

    app.set_loop_mode(LoopMode::RefreshSync);
    app.new_window()
        .size(surface.width as u32, surface.height as u32)
        .title("tsubu")
        .resizable(surface.fit_to_window)
        .view(view)
        .mouse_entered(mouse_entered)
        .mouse_moved(mouse_moved)
        .mouse_exited(mouse_exited)
        .resized(resized)
        .key_pressed(key_pressed)
        .build()
        .unwrap();

    let mut sim = Simulation::new(&options, ShapeStore::new(), &mut rand::thread_rng())
        .expect("options are validated before launch");
    if surface.fit_to_window {
        let rect = app.window_rect();
        if let Ok(fitted) = Surface::new(rect.w(), rect.h()) {
            sim.resize(fitted);
        }
    }

    Model {
        sim,
        clock: FrameClock::new(surface.target_fps),
        background: surface.background,
        fit_to_window: surface.fit_to_window,
    }
}

fn update(_app: &App, model: &mut Model, update: Update) {
    for _ in 0..model.clock.advance(update.since_last) {
        model.sim.tick();
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(model.background.to_srgba());
    draw_scene(&draw, model.sim.scene(), model.sim.surface());
    draw.to_frame(app, &frame).unwrap();
}

fn mouse_entered(_app: &App, model: &mut Model) {
    model.sim.pointer_entered();
}

fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    let position = to_surface(pos, model.sim.surface());
    model.sim.pointer_moved(position);
}

fn mouse_exited(_app: &App, model: &mut Model) {
    model.sim.pointer_left();
}

fn resized(_app: &App, model: &mut Model, size: Vec2) {
    if !model.fit_to_window {
        return;
    }
    match Surface::new(size.x, size.y) {
        Ok(surface) => model.sim.resize(surface),
        Err(err) => warn!(%err, "ignoring resize"),
    }
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    if key != Key::S {
        return;
    }
    let path = format!("tsubu-{}.svg", model.sim.ticks());
    let document = match svg::render(model.sim.scene(), model.sim.surface(), model.background) {
        Ok(document) => document,
        Err(err) => {
            error!(%path, %err, "snapshot failed");
            return;
        }
    };
    match std::fs::write(&path, document) {
        Ok(()) => info!(%path, "snapshot saved"),
        Err(err) => error!(%path, %err, "snapshot failed"),
    }
}

fn exit(_app: &App, model: Model) {
    let scene = model.sim.stop();
    debug!(remaining = scene.len(), "scene released");
}
