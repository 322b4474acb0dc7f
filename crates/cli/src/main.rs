use anyhow::{anyhow, Context};
use config::{Config, File};
use hexmap::{
    timed, Camera, ChunkDims, HexPoint, NoiseConfig, NoiseGenerator,
    Projection, ScaledNoise, ScreenPoint, Viewport,
};
use log::{info, LevelFilter};
use serde::{Deserialize, Serialize};
use simple_logger::SimpleLogger;
use std::{
    path::{Path, PathBuf},
    process,
};
use structopt::{clap::AppSettings, StructOpt};
use strum::{Display, EnumString};
use validator::Validate;

/// CLI for sampling hexmap terrain and exercising its grid math.
#[derive(Debug, StructOpt)]
#[structopt(
    name = "hexmap",
    global_settings = &[AppSettings::AllowNegativeNumbers]
)]
struct Opt {
    /// Path to a config file that defines the noise, chunk size and view.
    /// Supported formats: JSON, TOML. Defaults are used if omitted
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// The logging level to use. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Sample the normalized terrain height at a map point
    Sample { x: f64, y: f64 },

    /// Sample the height of every cell in a rectangle of the map
    Heightmap {
        /// Column of the top-left cell
        #[structopt(long, default_value = "0")]
        col: i32,
        /// Row of the top-left cell
        #[structopt(long, default_value = "0")]
        row: i32,
        #[structopt(long, default_value = "32")]
        width: u32,
        #[structopt(long, default_value = "16")]
        height: u32,
        /// Output format. Supported formats:
        ///
        /// text - one character per cell, darker is higher
        ///
        /// json - the raw height values, row by row
        #[structopt(short = "f", long, default_value = "text")]
        format: OutputFormat,
    },

    /// List every cell at a fixed distance from a center cell
    Ring { col: i32, row: i32, radius: u32 },

    /// Split a cell into its chunk and chunk-local coordinates
    Chunk { col: i32, row: i32 },

    /// Find the map cell drawn at a screen position, using the configured
    /// camera, viewport and terrain
    Pick { x: f64, y: f64 },
}

/// Output formats for the heightmap command
#[derive(Copy, Clone, Debug, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum OutputFormat {
    Text,
    Json,
}

/// Everything a config file can set
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
struct CliConfig {
    noise: NoiseConfig,
    chunk: ChunkDims,
    camera: Camera,
    viewport: Viewport,
    /// Elevation of a cell at the maximum noise value, used when picking
    vertical_scale: f64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            noise: NoiseConfig::default(),
            chunk: ChunkDims::default(),
            camera: Camera::default(),
            viewport: Viewport::default(),
            vertical_scale: 4.0,
        }
    }
}

#[derive(Debug, Serialize)]
struct Heightmap {
    origin: HexPoint,
    /// Heights indexed by row then column
    heights: Vec<Vec<f64>>,
}

/// Characters used to draw a heightmap, lowest to highest
const SHADES: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

fn load_config(config_path: &Path) -> anyhow::Result<CliConfig> {
    let mut settings = Config::new();
    let config_path = config_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", config_path)
    })?;
    settings
        .merge(File::with_name(config_path))
        .context("error reading config file")?;
    settings.try_into().context("error reading config")
}

fn render_heightmap(heightmap: &Heightmap) -> String {
    let mut output = String::new();
    for row in &heightmap.heights {
        for height in row {
            let index = (height * SHADES.len() as f64) as usize;
            output.push(SHADES[index.min(SHADES.len() - 1)]);
        }
        output.push('\n');
    }
    output
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let config = match &opt.config {
        Some(config_path) => {
            let config = load_config(config_path)?;
            info!("Loaded config from {:?}", config_path);
            config
        }
        None => CliConfig::default(),
    };
    config.chunk.validate().context("invalid chunk config")?;
    config.camera.validate().context("invalid camera config")?;

    match opt.command {
        Command::Sample { x, y } => {
            let noise = NoiseGenerator::from_config(&config.noise)?;
            println!("{}", noise.sample(x, y));
        }
        Command::Heightmap {
            col,
            row,
            width,
            height,
            format,
        } => {
            let noise = NoiseGenerator::from_config(&config.noise)?;
            let heights: Vec<Vec<f64>> = timed!(
                format!("Sampling {}x{} heightmap", width, height),
                log::Level::Info,
                (0..height as i32)
                    .map(|dy| {
                        (0..width as i32)
                            .map(|dx| {
                                noise.sample(
                                    f64::from(col + dx),
                                    f64::from(row + dy),
                                )
                            })
                            .collect()
                    })
                    .collect()
            );
            let heightmap = Heightmap {
                origin: HexPoint::new(col, row),
                heights,
            };
            match format {
                OutputFormat::Text => {
                    print!("{}", render_heightmap(&heightmap))
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&heightmap)?)
                }
            }
        }
        Command::Ring { col, row, radius } => {
            for point in HexPoint::new(col, row).hex_ring(radius) {
                println!("{}", point);
            }
        }
        Command::Chunk { col, row } => {
            let (chunk, local) = config.chunk.split(HexPoint::new(col, row));
            println!(
                "{} {} (vertex {})",
                chunk,
                local,
                config.chunk.linear_local(local)
            );
        }
        Command::Pick { x, y } => {
            let noise = NoiseGenerator::from_config(&config.noise)?;
            let heights = ScaledNoise {
                noise: &noise,
                vertical_scale: config.vertical_scale,
            };
            let projection = Projection::new(config.camera, config.viewport);
            let picked =
                projection.pick_map_point(ScreenPoint::new(x, y), &heights);
            println!("{}", picked);
        }
    }

    Ok(())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_heightmap() {
        let heightmap = Heightmap {
            origin: HexPoint::ORIGIN,
            heights: vec![vec![0.0, 0.55, 0.999], vec![0.12, 1.0, 0.3]],
        };
        assert_eq!(render_heightmap(&heightmap), " +@\n.@-\n");
    }

    #[test]
    fn test_parse_negative_args() {
        let opt = Opt::from_iter(vec!["hexmap", "ring", "-3", "-7", "2"]);
        match opt.command {
            Command::Ring { col, row, radius } => {
                assert_eq!((col, row, radius), (-3, -7, 2));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_config_from_json() {
        let config: CliConfig = serde_json::from_str(
            r#"{
                "chunk": {"width": 16, "height": 32},
                "camera": {"zoom": 2.0, "pos": [10.0, -5.0]}
            }"#,
        )
        .unwrap();
        assert_eq!(config.chunk, ChunkDims::new(16, 32));
        assert_eq!(config.camera.zoom, 2.0);
        assert_eq!(config.camera.pos.y, -5.0);
        assert_eq!(config.viewport, Viewport::default());
        assert_eq!(config.vertical_scale, 4.0);
    }
}
