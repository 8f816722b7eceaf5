//! heightfield: sample and preview seeded noise height fields from the command line.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use heightfield_core::{
    BasisType, CellularMode, GridSpec, HeightMap2D, HeightSampler, NoiseConfig, normalize2,
};
use image::{GrayImage, Luma, Rgb, RgbImage};
use palette::{Gradient, LinSrgb};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "heightfield")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the elevation at one coordinate.
    Sample {
        #[command(flatten)]
        noise: NoiseArgs,

        #[arg(short, long, allow_hyphen_values = true)]
        x: f64,

        #[arg(short, long, allow_hyphen_values = true)]
        z: f64,

        /// Sample the 3D field at this height instead of the planar one.
        #[arg(short, long, allow_hyphen_values = true)]
        y: Option<f64>,
    },

    /// Rasterize a grid and save it as a PNG preview.
    Raster {
        #[command(flatten)]
        noise: NoiseArgs,

        #[arg(long, default_value = "256")]
        width: usize,

        #[arg(long, default_value = "256")]
        depth: usize,

        /// World-space distance between neighbouring samples.
        #[arg(long, default_value = "1.0")]
        step: f64,

        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        origin_x: f64,

        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        origin_z: f64,

        #[arg(short, long, default_value = "heightfield.png")]
        output: PathBuf,

        /// Color by elevation band instead of grayscale.
        #[arg(long)]
        colorize: bool,
    },

    /// Load a configuration file and print it with every guard applied.
    Check {
        config: PathBuf,
    },
}

#[derive(Args)]
struct NoiseArgs {
    /// JSON or TOML configuration; flags below override its fields.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    basis: Option<BasisArg>,

    #[arg(short, long, allow_hyphen_values = true)]
    seed: Option<i64>,

    #[arg(long)]
    scale: Option<f64>,

    #[arg(long)]
    octaves: Option<i64>,

    #[arg(long)]
    persistence: Option<f64>,

    #[arg(long)]
    amplitude: Option<f64>,

    #[arg(long)]
    mode: Option<ModeArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum BasisArg {
    Gradient,
    Simplex,
    Cellular,
    DomainWarp,
    Ridged,
    Billow,
}

impl From<BasisArg> for BasisType {
    fn from(b: BasisArg) -> Self {
        match b {
            BasisArg::Gradient => BasisType::Gradient,
            BasisArg::Simplex => BasisType::Simplex,
            BasisArg::Cellular => BasisType::Cellular,
            BasisArg::DomainWarp => BasisType::DomainWarp,
            BasisArg::Ridged => BasisType::Ridged,
            BasisArg::Billow => BasisType::Billow,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    F1,
    F2,
    F2MinusF1,
}

impl From<ModeArg> for CellularMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::F1 => CellularMode::F1,
            ModeArg::F2 => CellularMode::F2,
            ModeArg::F2MinusF1 => CellularMode::F2MinusF1,
        }
    }
}

impl NoiseArgs {
    fn into_config(self) -> Result<NoiseConfig> {
        let mut cfg = match &self.config {
            Some(path) => NoiseConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => NoiseConfig::default(),
        };
        if let Some(b) = self.basis {
            cfg.basis_type = b.into();
        }
        if let Some(s) = self.seed {
            cfg.seed = s;
        }
        if let Some(s) = self.scale {
            cfg.scale = s;
        }
        if let Some(o) = self.octaves {
            cfg.octaves = o;
        }
        if let Some(p) = self.persistence {
            cfg.persistence = p;
        }
        if let Some(a) = self.amplitude {
            cfg.amplitude = a;
        }
        if let Some(m) = self.mode {
            cfg.mode = m.into();
        }
        Ok(cfg)
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let sampler = HeightSampler::new();

    match cli.command {
        Commands::Sample { noise, x, z, y } => {
            let cfg = noise.into_config()?;
            let h = match y {
                Some(y) => sampler.sample3(x, y, z, &cfg),
                None => sampler.sample(x, z, &cfg),
            };
            println!("{h}");
        }
        Commands::Raster {
            noise,
            width,
            depth,
            step,
            origin_x,
            origin_z,
            output,
            colorize,
        } => {
            if width == 0 || depth == 0 {
                bail!("raster needs a non-empty grid, got {width}x{depth}");
            }
            let cfg = noise.into_config()?;
            let grid = GridSpec::new(width, depth, step).with_origin(origin_x, origin_z);

            let start = Instant::now();
            let mut map = sampler.rasterize(&grid, &cfg);
            info!(
                basis = ?cfg.basis_type,
                width,
                depth,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "rasterized"
            );

            normalize2(&mut map);
            save_preview(&map, colorize, &output)?;
            info!(path = %output.display(), "saved preview");
        }
        Commands::Check { config } => {
            let cfg = NoiseConfig::load(&config)
                .with_context(|| format!("failed to load config {}", config.display()))?;
            debug!(?cfg, "loaded");
            println!("{:#?}", cfg.resolve());
        }
    }

    Ok(())
}

// Expects a map already normalized to [0, 1]
fn save_preview(map: &HeightMap2D, colorize: bool, path: &Path) -> Result<()> {
    let depth = map.len() as u32;
    let width = map.first().map_or(0, |row| row.len()) as u32;

    if colorize {
        // Deep water, sand, grass, rock, snow
        let bands = Gradient::with_domain(vec![
            (0.00, LinSrgb::new(0.0, 0.0, 0.5)),
            (0.30, LinSrgb::new(0.8, 0.8, 0.5)),
            (0.50, LinSrgb::new(0.1, 0.6, 0.2)),
            (0.75, LinSrgb::new(0.5, 0.4, 0.3)),
            (1.00, LinSrgb::new(1.0, 1.0, 1.0)),
        ]);
        let img = RgbImage::from_fn(width, depth, |x, y| {
            let col: LinSrgb = bands.get(map[y as usize][x as usize]);
            let rgb = col.into_format::<u8>();
            Rgb([rgb.red, rgb.green, rgb.blue])
        });
        img.save(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
    } else {
        let img = GrayImage::from_fn(width, depth, |x, y| {
            let h = map[y as usize][x as usize].clamp(0.0, 1.0);
            Luma([(h * 255.0).round() as u8])
        });
        img.save(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}
