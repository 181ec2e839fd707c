use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use particle_field::{
    BoundedTicks, Extent, FieldConfig, FrameDriver, ParticleFieldApp, RecordingSurface,
    run_bounded,
};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON file with field settings; command line flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    count: Option<usize>,

    #[arg(long)]
    connection_distance: Option<f32>,

    #[arg(long)]
    pointer_radius: Option<f32>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    show_fps: bool,

    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    #[arg(long, default_value_t = 800.0)]
    height: f32,

    /// Run this many frames without a window and print timing.
    #[arg(long)]
    headless: Option<usize>,
}

impl Args {
    fn field_config(&self) -> Result<FieldConfig> {
        let mut config = match &self.config {
            Some(path) => FieldConfig::from_json_file(path)
                .with_context(|| format!("failed to load field config from {}", path.display()))?,
            None => FieldConfig::default(),
        };

        if let Some(count) = self.count {
            config.particle_count = count;
        }
        if let Some(distance) = self.connection_distance {
            config.connection_distance = distance;
        }
        if let Some(radius) = self.pointer_radius {
            config.pointer_radius = radius;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.show_fps |= self.show_fps;

        config
            .validate()
            .context("command line overrides produced an invalid config")?;
        Ok(config)
    }
}

fn run_headless(config: &FieldConfig, extent: Extent, frames: usize) {
    let mut driver = FrameDriver::new(config, extent);
    let mut surface = RecordingSurface::new();
    let mut ticks = BoundedTicks::new(frames);

    driver.start(&mut ticks);
    let started = Instant::now();
    let ran = run_bounded(&mut driver, &mut surface, &mut ticks);
    let elapsed = started.elapsed();
    driver.stop();

    let per_frame_ms = if ran > 0 {
        elapsed.as_secs_f64() * 1000.0 / ran as f64
    } else {
        0.0
    };
    log::info!(
        "headless: {ran} frames, {} particles, {} lines last frame, {per_frame_ms:.3} ms/frame",
        driver.field().particles().len(),
        driver.stats().connections,
    );
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.field_config()?;
    let extent = Extent::checked(args.width, args.height)
        .context("--width and --height must be finite and non-negative")?;

    if let Some(frames) = args.headless {
        run_headless(&config, extent, frames);
        return Ok(());
    }

    log::info!(
        "opening particle field window at {:.0}x{:.0}",
        extent.width,
        extent.height
    );
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([extent.width, extent.height]),
        ..Default::default()
    };

    eframe::run_native(
        "particle-field",
        options,
        Box::new(move |cc| Ok(Box::new(ParticleFieldApp::new(cc, &config, extent)?))),
    )
    .map_err(|error| anyhow!("particle field window failed: {error}"))
}
