//! # Output Configuration
//!
//! Decides whether CLI output uses color and emoji markers, based on the
//! `--color` flag and the terminal environment.
//!
//! The following are respected:
//! - `--color=never|always|auto`
//! - `NO_COLOR` - disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - disables colors
//! - `CLICOLOR_FORCE=1` - forces colors even in non-TTY
//! - `TERM=dumb` - disables colors for dumb terminals

use std::env;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

/// Kinds of status lines the commands print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Sync,
    Local,
    Remote,
    Write,
    Publish,
    Skip,
    Success,
    Failure,
    Warning,
}

impl Marker {
    fn symbols(self) -> (&'static str, &'static str) {
        match self {
            Marker::Sync => ("🔄", "[SYNC]"),
            Marker::Local => ("📂", "[LOCAL]"),
            Marker::Remote => ("📦", "[REMOTE]"),
            Marker::Write => ("📝", "[WRITE]"),
            Marker::Publish => ("🚀", "[PUBLISH]"),
            Marker::Skip => ("⏭️ ", "[SKIP]"),
            Marker::Success => ("✅", "[OK]"),
            Marker::Failure => ("❌", "[FAIL]"),
            Marker::Warning => ("⚠️ ", "[WARN]"),
        }
    }
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `color_flag` is the value of `--color`: "always", "never", or "auto".
    /// In auto mode, colors are disabled if `NO_COLOR` is set, `CLICOLOR=0`,
    /// `TERM=dumb`, or stdout is not a TTY (unless `CLICOLOR_FORCE=1`).
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// The emoji or plain marker for `marker`.
    pub fn marker(&self, marker: Marker) -> &'static str {
        let (emoji, plain) = marker.symbols();
        if self.use_color {
            emoji
        } else {
            plain
        }
    }

    /// Styles a project name for status lines.
    pub fn project(&self, name: &str) -> String {
        if self.use_color {
            console::style(name).bold().to_string()
        } else {
            name.to_string()
        }
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}
