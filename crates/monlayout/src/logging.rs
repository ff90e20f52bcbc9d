// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;

use eventline::info;
use eventline::runtime::{self, LogLevel};

use crate::paths;

/// Where one invocation logs and how much.
#[derive(Debug, Clone, PartialEq)]
pub struct LogSetup {
    pub path: PathBuf,
    pub verbose: bool,
}

impl LogSetup {
    pub fn new(log_file: Option<PathBuf>, verbose: bool) -> Self {
        Self {
            path: log_file.unwrap_or_else(|| paths::default_log_path("monlayout.log")),
            verbose,
        }
    }

    /// `-v` shows the per-call bus traffic.
    pub fn level(&self) -> LogLevel {
        if self.verbose { LogLevel::Debug } else { LogLevel::Info }
    }

    pub fn init(&self) -> Result<(), String> {
        paths::ensure_parent_dir(&self.path)
            .map_err(|e| format!("create log dir {}: {e}", self.path.display()))?;

        async_io::block_on(runtime::init());

        runtime::enable_file_output(&self.path)
            .map_err(|e| format!("log to {}: {e}", self.path.display()))?;

        // stdout carries command output, so the console sink only follows -v.
        runtime::enable_console_output(self.verbose);
        runtime::enable_console_color(self.verbose);
        runtime::set_log_level(self.level());

        info!("monlayout {} logging to {}", env!("CARGO_PKG_VERSION"), self.path.display());
        Ok(())
    }
}
