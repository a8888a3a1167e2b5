//! # Output Configuration
//!
//! Controls how reports and status lines look on the terminal: whether
//! colors and emoji are used, based on the `--color` flag and the usual
//! environment conventions.
//!
//! In `auto` mode colors are turned off by:
//! - `NO_COLOR` (any value, per https://no-color.org/)
//! - `CLICOLOR=0`
//! - `TERM=dumb`
//! - stdout not being a terminal, unless `CLICOLOR_FORCE=1`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pbxsync::output::{ColorWhen, OutputConfig, emoji};
//!
//! let config = OutputConfig::new(ColorWhen::Auto);
//! println!("{} Synchronizing...", emoji(&config, "🔄", "[SYNC]"));
//! ```

use std::env;

use clap::ValueEnum;
use console::{Style, StyledObject};

/// Value of the `--color` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorWhen {
    /// Force colors on (overrides NO_COLOR)
    Always,
    /// Force colors off
    Never,
    /// Detect from the environment and terminal
    #[default]
    Auto,
}

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Resolve the configuration for a `--color` choice.
    pub fn new(when: ColorWhen) -> Self {
        let use_color = match when {
            ColorWhen::Always => true,
            ColorWhen::Never => false,
            ColorWhen::Auto => Self::detect_color_support(),
        };
        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of NO_COLOR, even empty, disables colors
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

    /// Colors always enabled.
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Colors always disabled.
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new(ColorWhen::Auto)
    }
}

/// Pick the emoji when colors are enabled, the plain marker otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// Style `text`, applying the style only when colors are enabled.
pub fn paint<D>(config: &OutputConfig, style: &Style, text: D) -> StyledObject<D> {
    style.apply_to(text).force_styling(config.use_color)
}
