use clap::Parser;

use crate::collector::CollectOptions;
use crate::split::SplitDirection;

/// Split images vertically into two halves.
///
/// Halves are written to a `half` directory next to the first image found.
#[derive(Parser, Clone, Debug)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Image files and/or directories to process
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Which half becomes the `_a` output
    #[arg(short, long, value_enum, default_value_t = SplitDirection::RightToLeft)]
    pub direction: SplitDirection,

    /// Maximum recursion depth below each input directory
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Descend into symlinked directories
    #[arg(long, default_value_t = false)]
    pub follow_links: bool,

    /// Hide the progress bar
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}

impl Config {
    pub const fn collect_options(&self) -> CollectOptions {
        CollectOptions {
            max_depth: self.max_depth,
            follow_links: self.follow_links,
        }
    }
}
