use std::fs;
use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::collector::{collect_image_files, CollectOptions};
use crate::errors::SplitError;
use crate::events::EventSink;
use crate::split::{output_directory_for, split_one_image, SplitDirection};

pub const STATUS_COLLECTING: &str = "Collecting image files...";
pub const STATUS_NO_IMAGES: &str = "No image files found";
pub const STATUS_CANCELLED: &str = "Cancelled";

/// Summary of one run. The `Done` event remains the contract with the frontend;
/// this is for callers that want counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub output_dir: Option<PathBuf>,
    pub cancelled: bool,
    /// Value sent with the `Done` event.
    pub success: bool,
}

/// Collects images from the inputs and writes each one's halves into a single
/// shared `half` directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitEngine {
    direction: SplitDirection,
    options: CollectOptions,
}

impl SplitEngine {
    pub const fn new(direction: SplitDirection) -> Self {
        Self {
            direction,
            options: CollectOptions {
                max_depth: None,
                follow_links: false,
            },
        }
    }

    pub const fn with_collect_options(mut self, options: CollectOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs the pipeline to completion on the calling thread.
    ///
    /// Emits status and progress events while working and exactly one `Done`.
    /// Per-file failures are reported as status text and do not stop the run.
    pub fn run<S: AsRef<str>>(
        &self,
        inputs: &[S],
        sink: &mut dyn EventSink,
        cancel: &CancellationToken,
    ) -> RunOutcome {
        sink.on_status(STATUS_COLLECTING);

        let image_files = collect_image_files(inputs, self.options);
        if image_files.is_empty() {
            info!("no image files found in {} inputs", inputs.len());
            sink.on_status(STATUS_NO_IMAGES);
            sink.on_done(false);
            return RunOutcome::default();
        }

        let total = image_files.len();
        let output_dir = output_directory_for(&image_files[0]);
        let mut outcome = RunOutcome {
            total,
            output_dir: Some(output_dir.clone()),
            ..RunOutcome::default()
        };

        if let Err(e) = fs::create_dir_all(&output_dir) {
            let err = SplitError::FileSystem {
                path: output_dir.clone(),
                operation: "create output directory".to_string(),
                source: e,
            };
            warn!("{}", err.detail());
            sink.on_status(&format!("Error: {}", err.detail()));
            sink.on_done(false);
            return outcome;
        }

        info!(
            total,
            output_dir = %output_dir.display(),
            direction = ?self.direction,
            "splitting images"
        );

        for (index, image_path) in image_files.iter().enumerate() {
            if cancel.is_cancelled() {
                info!(processed = index, total, "run cancelled");
                outcome.cancelled = true;
                sink.on_status(STATUS_CANCELLED);
                sink.on_done(false);
                return outcome;
            }

            let position = index + 1;
            let name = display_name(image_path);
            sink.on_status(&format!("Processing ({position}/{total}): {name}"));

            match split_one_image(image_path, self.direction, &output_dir) {
                Ok(outputs) => {
                    debug!(
                        source = %image_path.display(),
                        part_a = %outputs.part_a.display(),
                        part_b = %outputs.part_b.display(),
                        "split complete"
                    );
                    outcome.succeeded += 1;
                }
                Err(e) => {
                    warn!(source = %image_path.display(), "{}", e.detail());
                    sink.on_status(&format!("Error: {name} - {}", e.detail()));
                    outcome.failed += 1;
                }
            }

            sink.on_progress(position as f64 / total as f64);
        }

        info!(
            succeeded = outcome.succeeded,
            failed = outcome.failed,
            "split run finished"
        );
        outcome.success = true;
        sink.on_done(true);
        outcome
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
