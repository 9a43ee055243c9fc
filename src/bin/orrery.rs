use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use kiss3d::light::Light;
use kiss3d::window::Window;
use nalgebra::Point3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use rust_orrery::file::read_file;
use rust_orrery::gui::Simulation;
use rust_orrery::model::orrery::registry::default_bodies;
use rust_orrery::model::orrery::Orrery;
use rust_orrery::model::starfield::{Starfield, STAR_COUNT, STAR_EXTENT};
use rust_orrery::model::AppState;

#[derive(Debug, Parser)]
#[command(about = "An interactive model of the solar system")]
struct Args {
    /// Body table to load instead of the built-in planets
    #[arg(long)]
    bodies: Option<PathBuf>,
    /// Seed for the starting angles and the starfield
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 1280)]
    width: u32,
    #[arg(long, default_value_t = 800)]
    height: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    tracing::info!(?args, "starting up");

    let infos = match &args.bodies {
        Some(path) => read_file(path)
            .with_context(|| format!("failed to load body table {}", path.display()))?,
        None => default_bodies(),
    };
    tracing::info!(num_bodies = infos.len(), "loaded bodies");

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let orrery = Orrery::new(infos, &mut rng);
    let starfield = Starfield::generate(STAR_COUNT, STAR_EXTENT, &mut rng);

    let mut window = Window::new_with_size("Solar System", args.width, args.height);
    // The planets are lit from the sun. kiss3d has no unlit material, so the
    // sun, with the light at its centre, only gets ambient shading.
    window.set_light(Light::Absolute(Point3::origin()));
    window.set_framerate_limit(Some(60));

    let simulation = Simulation::new(AppState::new(orrery), starfield, &mut window);
    window.render_loop(simulation);
    Ok(())
}
