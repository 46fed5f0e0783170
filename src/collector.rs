use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

/// Extensions accepted as input, compared case-insensitively against the file name.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "tiff", "webp"];

/// Directory traversal settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollectOptions {
    /// Maximum depth below each input directory; `None` walks the whole subtree.
    pub max_depth: Option<usize>,
    /// Descend into symlinked directories. Loops are detected and skipped.
    pub follow_links: bool,
}

pub fn is_supported_image_format(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy().to_lowercase();
    SUPPORTED_EXTENSIONS
        .iter()
        .any(|ext| name.strip_suffix(ext).is_some_and(|rest| rest.ends_with('.')))
}

/// Resolves a mixed list of files and directories into a flat list of image paths.
///
/// Empty entries and paths that are neither a file nor a directory are skipped
/// silently. Nothing is de-duplicated: an image reachable through two inputs is
/// listed twice.
pub fn collect_image_files<S: AsRef<str>>(inputs: &[S], options: CollectOptions) -> Vec<PathBuf> {
    let mut image_files = Vec::new();

    for input in inputs {
        let input = input.as_ref();
        if input.is_empty() {
            continue;
        }

        let path = Path::new(input);
        if path.is_dir() {
            collect_from_directory(path, options, &mut image_files);
        } else if path.is_file() && is_supported_image_format(path) {
            image_files.push(absolutize(path));
        } else {
            debug!(input, "ignoring input that is not a supported image or directory");
        }
    }

    image_files
}

fn collect_from_directory(dir: &Path, options: CollectOptions, image_files: &mut Vec<PathBuf>) {
    let mut walker = WalkDir::new(dir)
        .follow_links(options.follow_links)
        // a directory's own files come before anything from its subdirectories
        .sort_by(|a, b| a.file_type().is_dir().cmp(&b.file_type().is_dir()));
    if let Some(depth) = options.max_depth {
        walker = walker.max_depth(depth.saturating_add(1));
    }

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(directory = %dir.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let path = entry.path();
        if path.is_file() && is_supported_image_format(path) {
            image_files.push(absolutize(path));
        }
    }
}

fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
