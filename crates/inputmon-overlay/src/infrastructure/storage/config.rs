//! TOML-based configuration for the overlay.
//!
//! Reads `AppConfig` from the platform-appropriate config file:
//! - Windows:  `%APPDATA%\InputMonitor\config.toml`
//! - Linux:    `$XDG_CONFIG_HOME/input-monitor/config.toml` (or `~/.config/...`)
//! - macOS:    `~/Library/Application Support/InputMonitor/config.toml`
//!
//! `INPUT_MONITOR_CONFIG` overrides the path.
//!
//! ```toml
//! [general]
//! log_level = "debug"
//!
//! [timing]
//! reset_delay_ms = 3000
//!
//! [appearance]
//! input = "#ffcc00"
//! ```
//!
//! Every field has a serde default, so a missing file, a missing section or
//! a missing key all fall back to the built-in values.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use inputmon_core::domain::click::{DEFAULT_DOUBLE_CLICK_TOLERANCE, DEFAULT_DOUBLE_CLICK_WINDOW};
use inputmon_core::domain::display::DEFAULT_RESET_DELAY;
use inputmon_core::domain::pointer::DEFAULT_POINTER_UPDATE_EVERY;
use inputmon_core::domain::selection::DEFAULT_SELECTION_MIN_SIZE;
use inputmon_core::{ClickPolicy, Rgb};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "INPUT_MONITOR_CONFIG";

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level overlay configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub mouse: MouseConfig,
    #[serde(default)]
    pub appearance: AppearanceConfig,
    #[serde(default)]
    pub icons: IconConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Overlay window geometry in logical pixels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowConfig {
    #[serde(default = "default_window_width")]
    pub width: f32,
    #[serde(default = "default_window_height")]
    pub height: f32,
    #[serde(default = "default_window_origin")]
    pub x: f32,
    #[serde(default = "default_window_origin")]
    pub y: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimingConfig {
    /// Idle time before the input line clears.
    #[serde(default = "default_reset_delay_ms")]
    pub reset_delay_ms: u64,
    /// Maximum gap between presses of a double click.
    #[serde(default = "default_double_click_ms")]
    pub double_click_ms: u64,
    /// Per-axis distance a double click may drift, exclusive.
    #[serde(default = "default_double_click_tolerance_px")]
    pub double_click_tolerance_px: i32,
    /// Lock-key LED polling interval.
    #[serde(default = "default_led_poll_ms")]
    pub led_poll_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MouseConfig {
    /// Refresh the pointer line every N moves.
    #[serde(default = "default_update_every")]
    pub update_every: u32,
    /// A drag must exceed this many pixels on one axis to be reported.
    #[serde(default = "default_selection_min_size")]
    pub selection_min_size: u32,
    /// Show wheel scrolling on the input line.
    #[serde(default = "default_true")]
    pub show_scroll: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppearanceConfig {
    #[serde(default = "default_background")]
    pub background: Rgb,
    #[serde(default = "default_border")]
    pub border: Rgb,
    #[serde(default = "default_text")]
    pub text: Rgb,
    #[serde(default = "default_input")]
    pub input: Rgb,
    #[serde(default = "default_mouse")]
    pub mouse: Rgb,
    #[serde(default = "default_selection")]
    pub selection: Rgb,
    #[serde(default = "default_led_on")]
    pub led_on: Rgb,
    #[serde(default = "default_led_off")]
    pub led_off: Rgb,
    #[serde(default = "default_input_font_size")]
    pub input_font_size: f32,
    #[serde(default = "default_selection_font_size")]
    pub selection_font_size: f32,
    #[serde(default = "default_small_font_size")]
    pub small_font_size: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IconConfig {
    /// Directory holding the PNG icons; defaults to `images/` beside the executable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    #[serde(default = "default_win_icon_size")]
    pub win_size: u32,
    #[serde(default = "default_mouse_icon_size")]
    pub mouse_size: u32,
}

impl TimingConfig {
    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }

    pub fn led_poll_interval(&self) -> Duration {
        Duration::from_millis(self.led_poll_ms.max(1))
    }

    pub fn click_policy(&self) -> ClickPolicy {
        ClickPolicy {
            window: Duration::from_millis(self.double_click_ms),
            tolerance_px: self.double_click_tolerance_px,
        }
    }
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_window_width() -> f32 {
    360.0
}
fn default_window_height() -> f32 {
    200.0
}
fn default_window_origin() -> f32 {
    100.0
}
fn default_reset_delay_ms() -> u64 {
    DEFAULT_RESET_DELAY.as_millis() as u64
}
fn default_double_click_ms() -> u64 {
    DEFAULT_DOUBLE_CLICK_WINDOW.as_millis() as u64
}
fn default_double_click_tolerance_px() -> i32 {
    DEFAULT_DOUBLE_CLICK_TOLERANCE
}
fn default_led_poll_ms() -> u64 {
    100
}
fn default_update_every() -> u32 {
    DEFAULT_POINTER_UPDATE_EVERY
}
fn default_selection_min_size() -> u32 {
    DEFAULT_SELECTION_MIN_SIZE
}
fn default_true() -> bool {
    true
}
fn default_background() -> Rgb {
    Rgb::new(0x2b, 0x2b, 0x2b)
}
fn default_border() -> Rgb {
    Rgb::new(0x55, 0x55, 0x55)
}
fn default_text() -> Rgb {
    Rgb::new(0xff, 0xff, 0xff)
}
fn default_input() -> Rgb {
    Rgb::new(0x00, 0xff, 0x00)
}
fn default_mouse() -> Rgb {
    Rgb::new(0x00, 0xcc, 0xff)
}
fn default_selection() -> Rgb {
    Rgb::new(0xff, 0x99, 0x00)
}
fn default_led_on() -> Rgb {
    Rgb::new(0x00, 0xff, 0x00)
}
fn default_led_off() -> Rgb {
    Rgb::new(0x1a, 0x1a, 0x1a)
}
fn default_input_font_size() -> f32 {
    20.0
}
fn default_selection_font_size() -> f32 {
    14.0
}
fn default_small_font_size() -> f32 {
    10.0
}
fn default_win_icon_size() -> u32 {
    26
}
fn default_mouse_icon_size() -> u32 {
    48
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
            x: default_window_origin(),
            y: default_window_origin(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            reset_delay_ms: default_reset_delay_ms(),
            double_click_ms: default_double_click_ms(),
            double_click_tolerance_px: default_double_click_tolerance_px(),
            led_poll_ms: default_led_poll_ms(),
        }
    }
}

impl Default for MouseConfig {
    fn default() -> Self {
        Self {
            update_every: default_update_every(),
            selection_min_size: default_selection_min_size(),
            show_scroll: default_true(),
        }
    }
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            border: default_border(),
            text: default_text(),
            input: default_input(),
            mouse: default_mouse(),
            selection: default_selection(),
            led_on: default_led_on(),
            led_off: default_led_off(),
            input_font_size: default_input_font_size(),
            selection_font_size: default_selection_font_size(),
            small_font_size: default_small_font_size(),
        }
    }
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            directory: None,
            win_size: default_win_icon_size(),
            mouse_size: default_mouse_icon_size(),
        }
    }
}

// ── Config loading ────────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the config file path, honouring [`CONFIG_PATH_ENV`].
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if no override is set and the
/// base directory cannot be determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    resolve_config_path(std::env::var_os(CONFIG_PATH_ENV))
}

/// Picks `override_path` when set, else `config.toml` in [`config_dir`].
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if there is no override and the
/// base directory cannot be determined.
pub fn resolve_config_path(override_path: Option<OsString>) -> Result<PathBuf, ConfigError> {
    match override_path {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => Ok(config_dir()?.join("config.toml")),
    }
}

/// Loads `AppConfig` from the default location.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads `AppConfig` from `path`, returning defaults if the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Resolves the platform config base directory including the app subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("InputMonitor"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("input-monitor"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("InputMonitor")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
