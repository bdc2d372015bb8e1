//! Where the input directory and the chart path come from.
//!
//! The aggregation pipeline only ever sees a `Path`; whether it was typed on
//! the command line, answered at a prompt or injected by a test is decided by
//! the [`PathChooser`] the binary picks.

use std::path::{Path, PathBuf};

/// Source of the input directory and the chart save path.
pub trait PathChooser {
    /// The directory holding the CSV logs, or `None` when nothing was chosen.
    fn choose_directory(&mut self) -> Option<PathBuf>;

    /// Where to save the chart, or `None` to skip saving.
    fn choose_save_path(&mut self, default: &Path) -> Option<PathBuf>;
}

/// Answers with preset values.
#[derive(Debug, Clone, Default)]
pub struct FixedChooser {
    pub directory: Option<PathBuf>,
    pub save_path: Option<PathBuf>,
}

impl FixedChooser {
    pub fn new(directory: Option<PathBuf>, save_path: Option<PathBuf>) -> Self {
        Self {
            directory,
            save_path,
        }
    }
}

impl PathChooser for FixedChooser {
    fn choose_directory(&mut self) -> Option<PathBuf> {
        self.directory.clone()
    }

    fn choose_save_path(&mut self, _default: &Path) -> Option<PathBuf> {
        self.save_path.clone()
    }
}
