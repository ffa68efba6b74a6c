// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use vnect_utils::config::{DEFAULT_BOX_SIZE, DEFAULT_PAD_VALUE, DEFAULT_SIGMA};

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = r"Examples:
    vnect-utils squareify --source person.jpg --output box.png
    vnect-utils squareify -s person.jpg -o box.png --box-size 256
    vnect-utils pad --source box.png --output small.png --scale 0.7 --pad-value 128
    vnect-utils heatmap --output hm.png --height 46 --width 46 --center-x 20 --center-y 12
    vnect-utils skeleton --joints joints.csv --source box.png --output limbs.png")]
pub struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    pub command: Commands,

    /// Show verbose output
    #[arg(long, global = true, default_value_t = true, action = clap::ArgAction::Set)]
    pub verbose: bool,
}

/// Commands for the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scale an image to the box height and center-crop or pad it to a square
    Squareify(SquareifyArgs),
    /// Shrink a square image and pad it back to its original size
    Pad(PadArgs),
    /// Render a single Gaussian heatmap as a grayscale image
    Heatmap(HeatmapArgs),
    /// Draw 2D limbs from a CSV of row,col joints
    Skeleton(SkeletonArgs),
}

/// Arguments for the squareify command.
#[derive(Args, Debug)]
pub struct SquareifyArgs {
    /// Input image
    #[arg(short, long)]
    pub source: PathBuf,

    /// Output image
    #[arg(short, long)]
    pub output: PathBuf,

    /// Side length of the square box
    #[arg(long, default_value_t = DEFAULT_BOX_SIZE)]
    pub box_size: u32,
}

/// Arguments for the pad command.
#[derive(Args, Debug)]
pub struct PadArgs {
    /// Input image (must be square)
    #[arg(short, long)]
    pub source: PathBuf,

    /// Output image
    #[arg(short, long)]
    pub output: PathBuf,

    /// Scale factor, at most 1.0
    #[arg(long)]
    pub scale: f64,

    /// Fill value for the border
    #[arg(long, default_value_t = DEFAULT_PAD_VALUE)]
    pub pad_value: u8,
}

/// Arguments for the heatmap command.
#[derive(Args, Debug)]
pub struct HeatmapArgs {
    /// Output image
    #[arg(short, long)]
    pub output: PathBuf,

    /// Heatmap height in pixels
    #[arg(long)]
    pub height: usize,

    /// Heatmap width in pixels
    #[arg(long)]
    pub width: usize,

    /// Gaussian center column
    #[arg(long)]
    pub center_x: f64,

    /// Gaussian center row
    #[arg(long)]
    pub center_y: f64,

    /// Gaussian standard deviation
    #[arg(long, default_value_t = DEFAULT_SIGMA)]
    pub sigma: f64,
}

/// Arguments for the skeleton command.
#[derive(Args, Debug)]
pub struct SkeletonArgs {
    /// CSV file with one `row,col` line per joint (VNect order)
    #[arg(short, long)]
    pub joints: PathBuf,

    /// Image to draw on
    #[arg(short, long)]
    pub source: PathBuf,

    /// Output image
    #[arg(short, long)]
    pub output: PathBuf,
}
