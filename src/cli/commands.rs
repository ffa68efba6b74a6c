// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::fs;
use std::path::Path;

use image::RgbImage;
use ndarray::Array2;

use vnect_utils::{
    PoseConfig, PoseError, Result, draw_limbs_2d_mut, generate_heatmap, heatmap_to_image,
    scale_and_pad, scale_and_squareify,
};

use crate::cli::args::{Cli, Commands, HeatmapArgs, PadArgs, SkeletonArgs, SquareifyArgs};
use crate::{section, success, verbose, warn};

/// Dispatch the parsed command line.
///
/// # Errors
///
/// Returns the first error raised while reading, transforming or writing.
pub fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Squareify(args) => run_squareify(args),
        Commands::Pad(args) => run_pad(args),
        Commands::Heatmap(args) => run_heatmap(args),
        Commands::Skeleton(args) => run_skeleton(args),
    }
}

fn load_rgb(path: &Path) -> Result<RgbImage> {
    verbose!("Source: {}", path.display());
    let image = image::open(path)?.to_rgb8();
    verbose!("Loaded {}x{} image", image.width(), image.height());
    Ok(image)
}

fn save<P, C>(image: &image::ImageBuffer<P, C>, path: &Path) -> Result<()>
where
    P: image::PixelWithColorType,
    C: std::ops::Deref<Target = [P::Subpixel]>,
    [P::Subpixel]: image::EncodableLayout,
{
    image.save(path)?;
    success!("Saved {}x{} image to {}", image.width(), image.height(), path.display());
    Ok(())
}

/// Scale an image to the box height and make it square.
fn run_squareify(args: &SquareifyArgs) -> Result<()> {
    section!("Squareify to {0}x{0}", args.box_size);
    if args.box_size == 0 {
        return Err(PoseError::ConfigError("box size must be positive".to_string()));
    }
    let config = PoseConfig::new().with_box_size(args.box_size);

    let image = load_rgb(&args.source)?;
    let squared = scale_and_squareify(&image, config.box_size)?;
    save(&squared, &args.output)
}

/// Shrink a square image and pad it back.
fn run_pad(args: &PadArgs) -> Result<()> {
    section!("Scale and pad by {}", args.scale);
    if !(args.scale > 0.0 && args.scale <= 1.0) {
        return Err(PoseError::ConfigError(format!(
            "scale must be in (0, 1], got {}",
            args.scale
        )));
    }
    let config = PoseConfig::new().with_pad_value(args.pad_value);

    let image = load_rgb(&args.source)?;
    if image.width() != image.height() {
        return Err(PoseError::ImageError(format!(
            "image must be square, got {}x{}",
            image.width(),
            image.height()
        )));
    }

    verbose!("Pad value: {}", config.pad_value);
    let padded = scale_and_pad(&image, args.scale, config.pad_value)?;
    save(&padded, &args.output)
}

/// Render one Gaussian heatmap to a grayscale image.
fn run_heatmap(args: &HeatmapArgs) -> Result<()> {
    section!("Heatmap {}x{}", args.height, args.width);
    if args.height == 0 || args.width == 0 {
        return Err(PoseError::ConfigError("heatmap must not be empty".to_string()));
    }
    if args.sigma.is_nan() || args.sigma <= 0.0 {
        return Err(PoseError::ConfigError(format!(
            "sigma must be positive, got {}",
            args.sigma
        )));
    }
    let config = PoseConfig::new().with_sigma(args.sigma);

    verbose!(
        "Center: ({}, {}), sigma: {}",
        args.center_x,
        args.center_y,
        config.sigma
    );
    let heatmap = generate_heatmap(
        (args.height, args.width),
        (args.center_x, args.center_y),
        config.sigma,
    );
    save(&heatmap_to_image(heatmap.view()), &args.output)
}

/// Draw the default skeleton's limbs from a joints CSV.
fn run_skeleton(args: &SkeletonArgs) -> Result<()> {
    section!("Skeleton");
    let config = PoseConfig::default();
    let expected = config.skeleton.len();

    verbose!("Joints: {}", args.joints.display());
    let joints = parse_joints(&fs::read_to_string(&args.joints)?)?;
    if joints.nrows() < expected {
        return Err(PoseError::ParseError(format!(
            "expected {expected} joints, got {}",
            joints.nrows()
        )));
    }
    if joints.nrows() > expected {
        warn!(
            "{} joints given, only the first {expected} are drawn",
            joints.nrows()
        );
    }

    let mut image = load_rgb(&args.source)?;
    draw_limbs_2d_mut(&mut image, &joints, &config.skeleton, &config.style);
    save(&image, &args.output)
}

/// Parse `row,col` lines into a (J, 2) joint array.
///
/// Blank lines and lines starting with `#` are skipped.
///
/// # Errors
///
/// Returns [`PoseError::ParseError`] naming the offending line.
pub fn parse_joints(text: &str) -> Result<Array2<usize>> {
    let mut flat = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let [row, col] = fields.as_slice() else {
            return Err(PoseError::ParseError(format!(
                "line {}: expected `row,col`, got `{line}`",
                number + 1
            )));
        };
        for field in [row, col] {
            let value = field.parse::<usize>().map_err(|e| {
                PoseError::ParseError(format!("line {}: invalid coordinate `{field}`: {e}", number + 1))
            })?;
            flat.push(value);
        }
    }

    Ok(Array2::from_shape_vec((flat.len() / 2, 2), flat)?)
}
