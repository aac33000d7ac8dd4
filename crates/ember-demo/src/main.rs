//! Solar-system orbit demo: nested collections spinning against a terminal
//! framebuffer. Renders a fixed number of frames, then prints timing stats.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;

use ember_engine::display::{FrameBuffer, PixelSink};
use ember_engine::logging::{self, LoggingConfig};
use ember_engine::paint::Color;
use ember_engine::profile::{ProfileStats, time_scope};
use ember_engine::render::Renderer;
use ember_engine::scene::{Circle, Collection, Scene, ShapeCore, ShapeId};
use ember_engine::time::FrameClock;

const WIDTH: i32 = 64;
const HEIGHT: i32 = 64;
const FRAMES: u64 = 120;

struct SolarSystem {
    scene: Scene,
    roots: Vec<ShapeId>,
    earth_orbit: ShapeId,
    moon_orbit: ShapeId,
}

fn build_scene() -> Result<SolarSystem> {
    let mut scene = Scene::new();

    // Sun at the center; the root collection pivots everything around it.
    let sun_system = scene.spawn(ShapeCore::new(32.0, 32.0, Color::BLACK), Collection::new());
    scene.core_mut(sun_system).unwrap().set_pivot(32.0, 32.0);
    scene.spawn_child(
        sun_system,
        ShapeCore::new(32.0, 32.0, Color::new(255, 204, 0)),
        Circle::new(8.0, true),
    )?;

    // Earth 20 pixels out, orbiting the sun.
    let earth_orbit = scene.spawn_child(
        sun_system,
        ShapeCore::new(32.0, 32.0, Color::BLACK).with_z(1.0),
        Collection::new(),
    )?;
    scene.core_mut(earth_orbit).unwrap().set_pivot(32.0, 32.0);
    scene.spawn_child(
        earth_orbit,
        ShapeCore::new(52.0, 32.0, Color::new(0, 100, 255)),
        Circle::new(4.0, true),
    )?;

    // Moon 8 pixels from the earth, orbiting it in turn.
    let moon_orbit = scene.spawn_child(
        earth_orbit,
        ShapeCore::new(52.0, 32.0, Color::BLACK).with_z(1.0),
        Collection::new(),
    )?;
    scene.core_mut(moon_orbit).unwrap().set_pivot(52.0, 32.0);
    scene.spawn_child(
        moon_orbit,
        ShapeCore::new(60.0, 32.0, Color::new(200, 200, 200)),
        Circle::new(2.0, true),
    )?;

    // Faint orbit guides.
    scene.spawn_child(
        sun_system,
        ShapeCore::new(32.0, 32.0, Color::with_alpha(100, 100, 100, 0.3)),
        Circle::new(20.0, false),
    )?;
    scene.spawn_child(
        earth_orbit,
        ShapeCore::new(52.0, 32.0, Color::with_alpha(100, 100, 100, 0.3)),
        Circle::new(8.0, false),
    )?;

    Ok(SolarSystem { scene, roots: vec![sun_system], earth_orbit, moon_orbit })
}

/// Prints the framebuffer as half-height ANSI blocks (two rows per line).
fn present(fb: &FrameBuffer) {
    let mut out = String::with_capacity((WIDTH * HEIGHT * 8) as usize);
    out.push_str("\x1b[H");
    for y in (0..HEIGHT).step_by(2) {
        for x in 0..WIDTH {
            let [tr, tg, tb] = fb.rgb_at(x, y).unwrap_or([0, 0, 0]);
            let [br, bg, bb] = fb.rgb_at(x, y + 1).unwrap_or([0, 0, 0]);
            out.push_str(&format!(
                "\x1b[38;2;{tr};{tg};{tb}m\x1b[48;2;{br};{bg};{bb}m\u{2580}"
            ));
        }
        out.push_str("\x1b[0m\n");
    }
    print!("{out}");
    let _ = std::io::stdout().flush();
}

fn main() -> Result<()> {
    logging::init_logging(LoggingConfig::default());

    let solar = build_scene()?;
    let SolarSystem { mut scene, roots, earth_orbit, moon_orbit } = solar;

    let renderer = Renderer::new(WIDTH, HEIGHT);
    let options = renderer.options(true);
    let mut framebuffer = FrameBuffer::new(WIDTH, HEIGHT);
    let mut clock = FrameClock::new();
    let mut stats = ProfileStats::new();

    log::info!("rendering {FRAMES} frames at {WIDTH}x{HEIGHT}");
    print!("\x1b[2J");

    for _ in 0..FRAMES {
        let tick = clock.tick();

        // Orbital motion: rotating a collection rotates its whole subtree.
        scene.core_mut(earth_orbit).unwrap().rotate(90.0 * tick.dt.max(1.0 / 60.0));
        scene.core_mut(moon_orbit).unwrap().rotate(180.0 * tick.dt.max(1.0 / 60.0));

        let frame = time_scope(&mut stats, "render", || {
            renderer.render(&scene, &roots, &options)
        });
        time_scope(&mut stats, "present", || {
            framebuffer.set_buffer(&frame);
            present(&framebuffer);
        });

        std::thread::sleep(Duration::from_millis(16));
    }

    println!();
    print!("{}", stats.report());
    Ok(())
}
