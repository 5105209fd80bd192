//! Headless demo: an animated noise volume retriangulated every tick.
//!
//! Usage: `cargo run --example noise_volume [options.json] [ticks]`
//!
//! Run with `RUST_LOG=debug` to see per-rebuild statistics.

use std::time::{Duration, Instant};

use cubemarch::*;

/// Rebuilds happen at most this often, like a throttled frame loop.
const TARGET_FPS: f32 = 30.0;

fn main() -> Result<()> {
    init_logging();

    let mut args = std::env::args().skip(1);
    let options = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path).unwrap_or_else(|err| {
                eprintln!("could not read {path}: {err}");
                std::process::exit(1);
            });
            EngineOptions::from_json(&json)?
        }
        None => EngineOptions::default(),
    };
    let ticks: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(90);

    let mut engine = IsoSurfaceEngine::configure(options.clone())?;
    let mut noise = NoiseField::new(NoiseConfig::default(), options.grid_dims)?;

    let (min, max) = engine.bounds();
    println!("volume bounds: {min} .. {max}");

    let frame = Duration::from_secs_f32(1.0 / TARGET_FPS);
    let started = Instant::now();
    let mut total_triangles = 0usize;
    for tick in 0..ticks {
        let tick_start = Instant::now();
        let mesh = engine.update(&mut noise, frame.as_secs_f32())?;
        total_triangles += mesh.triangle_count();
        if tick % 15 == 0 {
            println!(
                "t={:6.2}s  triangles={:6}  vertex bytes={}",
                noise.time(),
                mesh.triangle_count(),
                mesh.position_bytes().len()
            );
        }
        if let Some(rest) = frame.checked_sub(tick_start.elapsed()) {
            std::thread::sleep(rest);
        }
    }

    let elapsed = started.elapsed();
    println!(
        "{ticks} ticks in {:.2?}, {:.1} triangles per tick on average",
        elapsed,
        total_triangles as f64 / f64::from(ticks.max(1))
    );
    Ok(())
}
