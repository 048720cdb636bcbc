//! Commandline configuration of a render

use std::path::PathBuf;

use clap::Parser;

pub use clap_verbosity_flag::Verbosity;

use crate::{integrator::SamplingStrategy, scenes::SceneType};

/// Parses the commandline arguments into an [Arguments] struct
pub fn parse_args() -> Arguments {
    Arguments::parse()
}

/// Render settings read from the commandline
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Arguments {
    /// Image file to write; its extension selects the format
    #[arg(
        short,
        long,
        value_parser = parse_output_path,
        default_value = "output.png",
        value_name = "FILE"
    )]
    pub output: PathBuf,

    /// Image width in pixels, the height follows from the scene's aspect ratio
    #[arg(
        short = 'w',
        long = "width",
        value_parser = parse_positive::<u32>,
        default_value_t = 600,
        value_name = "PIXELS"
    )]
    pub image_width: u32,

    /// Paths traced per pixel
    ///
    /// Noise falls with the square root of the sample count
    #[arg(
        short = 'n',
        long = "samples",
        value_parser = parse_positive::<u32>,
        default_value_t = 100,
        value_name = "NUM"
    )]
    pub samples_per_pixel: u32,

    /// Maximum number of bounces along a path before it is cut off as black
    #[arg(
        short,
        long = "bounces",
        value_parser = parse_positive::<u16>,
        default_value_t = 50,
        value_name = "NUM"
    )]
    pub bounce_depth: u16,

    /// Built-in scene to render
    #[arg(short, long, value_enum, default_value_t = SceneType::RandomSpheres)]
    pub scene: SceneType,

    /// How diffuse bounces pick their next direction
    ///
    /// `mixture` aims half of the bounces at the scene's lights
    #[arg(long, value_enum, default_value_t = SamplingStrategy::Cosine)]
    pub sampling: SamplingStrategy,

    /// Seed for scene generation and sampling; random if omitted
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub verbosity: Verbosity,
}

/// Parses an integer that must be at least 1
fn parse_positive<T>(s: &str) -> Result<T, String>
where
    T: num_traits::PrimInt + std::str::FromStr,
    <T as std::str::FromStr>::Err: std::fmt::Display,
{
    let value = s.parse::<T>().map_err(|e| e.to_string())?;
    if value < T::one() {
        return Err(format!("expected at least 1, got {s}"));
    }
    Ok(value)
}

/// Accepts a path whose extension names an image format this build can encode
fn parse_output_path(s: &str) -> Result<PathBuf, String> {
    use image::{ImageFormat, ImageOutputFormat};

    let path = PathBuf::from(s);
    let format = ImageFormat::from_path(&path).map_err(|e| e.to_string())?;
    // `ImageOutputFormat` only carries the encoders enabled at compile time
    match ImageOutputFormat::from(format) {
        ImageOutputFormat::Unsupported(name) => Err(format!("cannot encode {name} images")),
        _ => Ok(path),
    }
}
