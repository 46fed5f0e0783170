use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};

use crate::errors::{Result, SplitError};

/// Name of the directory created next to the first input image.
pub const OUTPUT_DIR_NAME: &str = "half";

/// Which physical half of the image becomes the `_a` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SplitDirection {
    /// Right half first, the reading order of right-to-left spreads.
    #[default]
    RightToLeft,
    LeftToRight,
}

/// A full-height column band of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Paths written for one input image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOutputs {
    pub part_a: PathBuf,
    pub part_b: PathBuf,
}

/// Computes the `_a` and `_b` regions. With an odd width the extra column
/// belongs to the right half.
pub const fn split_regions(width: u32, height: u32, direction: SplitDirection) -> (Region, Region) {
    let half_width = width / 2;
    let left = Region {
        x: 0,
        y: 0,
        width: half_width,
        height,
    };
    let right = Region {
        x: half_width,
        y: 0,
        width: width - half_width,
        height,
    };

    match direction {
        SplitDirection::LeftToRight => (left, right),
        SplitDirection::RightToLeft => (right, left),
    }
}

pub fn split_image(image: &DynamicImage, direction: SplitDirection) -> (DynamicImage, DynamicImage) {
    let (width, height) = image.dimensions();
    let (a, b) = split_regions(width, height, direction);
    (
        image.crop_imm(a.x, a.y, a.width, a.height),
        image.crop_imm(b.x, b.y, b.width, b.height),
    )
}

/// Builds `<stem>_a<ext>` and `<stem>_b<ext>` from the file name of `path`.
pub fn output_file_names(path: &Path) -> Result<(OsString, OsString)> {
    let stem = path.file_stem().ok_or_else(|| SplitError::InvalidPath {
        path: path.to_path_buf(),
        reason: "path has no file name".to_string(),
    })?;

    let name_with = |suffix: &str| {
        let mut name = stem.to_os_string();
        name.push(suffix);
        if let Some(ext) = path.extension() {
            name.push(".");
            name.push(ext);
        }
        name
    };

    Ok((name_with("_a"), name_with("_b")))
}

/// `<parent>/half`, using the current directory when the path has no parent.
pub fn output_directory_for(first_file: &Path) -> PathBuf {
    let base = match first_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    base.join(OUTPUT_DIR_NAME)
}

/// Opens one image, splits it at the vertical midline and writes both halves
/// into `output_dir`. Existing outputs are overwritten.
pub fn split_one_image(
    path: &Path,
    direction: SplitDirection,
    output_dir: &Path,
) -> Result<SplitOutputs> {
    let reader = ImageReader::open(path)
        .map_err(|e| SplitError::FileSystem {
            path: path.to_path_buf(),
            operation: "open image".to_string(),
            source: e,
        })?
        .with_guessed_format()
        .map_err(|e| SplitError::FileSystem {
            path: path.to_path_buf(),
            operation: "read image header".to_string(),
            source: e,
        })?;
    let decoded_format = reader.format();

    let image = reader.decode().map_err(|e| SplitError::ImageProcessing {
        path: path.to_path_buf(),
        operation: "decode".to_string(),
        source: e,
    })?;

    let (part_a, part_b) = split_image(&image, direction);
    let (name_a, name_b) = output_file_names(path)?;
    let outputs = SplitOutputs {
        part_a: output_dir.join(name_a),
        part_b: output_dir.join(name_b),
    };

    save_part(&part_a, &outputs.part_a, decoded_format)?;
    save_part(&part_b, &outputs.part_b, decoded_format)?;

    Ok(outputs)
}

fn save_part(part: &DynamicImage, output: &Path, fallback: Option<ImageFormat>) -> Result<()> {
    let format = match (ImageFormat::from_path(output), fallback) {
        (Ok(format), _) => format,
        (Err(_), Some(format)) => format,
        (Err(e), None) => {
            return Err(SplitError::ImageProcessing {
                path: output.to_path_buf(),
                operation: "determine output format".to_string(),
                source: e,
            })
        }
    };

    part.save_with_format(output, format)
        .map_err(|e| SplitError::ImageProcessing {
            path: output.to_path_buf(),
            operation: "save".to_string(),
            source: e,
        })
}
