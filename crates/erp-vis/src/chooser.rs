//! Interactive and argument-driven [`PathChooser`]s.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use erp_core::chooser::PathChooser;
use erp_core::settings::Settings;

// ── ArgChooser ─────────────────────────────────────────────────────────────────

/// Takes both paths from the command line.
#[derive(Debug, Clone)]
pub struct ArgChooser {
    directory: Option<PathBuf>,
}

impl ArgChooser {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            directory: settings.directory.clone(),
        }
    }
}

impl PathChooser for ArgChooser {
    fn choose_directory(&mut self) -> Option<PathBuf> {
        self.directory.clone()
    }

    /// The default already reflects `--output`.
    fn choose_save_path(&mut self, default: &Path) -> Option<PathBuf> {
        Some(default.to_path_buf())
    }
}

// ── PromptChooser ──────────────────────────────────────────────────────────────

/// Asks on a terminal (or any reader/writer pair).
///
/// A blank directory answer cancels the run; a blank save-path answer accepts
/// the default shown in brackets.
pub struct PromptChooser<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptChooser<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, prompt: &str) -> Option<String> {
        write!(self.output, "{}", prompt).ok()?;
        self.output.flush().ok()?;
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

impl<R: BufRead, W: Write> PathChooser for PromptChooser<R, W> {
    fn choose_directory(&mut self) -> Option<PathBuf> {
        let answer = self.ask("Directory with CSV files: ")?;
        if answer.is_empty() {
            None
        } else {
            Some(PathBuf::from(answer))
        }
    }

    fn choose_save_path(&mut self, default: &Path) -> Option<PathBuf> {
        let answer = self.ask(&format!("Save chart as [{}]: ", default.display()))?;
        if answer.is_empty() {
            Some(default.to_path_buf())
        } else {
            Some(PathBuf::from(answer))
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
