pub mod collector;
pub mod config;
pub mod engine;
pub mod errors;
pub mod events;
pub mod progress_tracker;
pub mod run_slot;
pub mod runner;
pub mod split;

pub mod mocks;

pub use collector::{collect_image_files, is_supported_image_format, CollectOptions, SUPPORTED_EXTENSIONS};
pub use config::Config;
pub use engine::{RunOutcome, SplitEngine};
pub use errors::{Result, SplitError};
pub use events::{Callbacks, EventSink, SplitEvent};
pub use progress_tracker::ProgressTracker;
pub use runner::{RunHandle, SplitRunner};
pub use split::{split_image, split_one_image, split_regions, Region, SplitDirection, SplitOutputs};
