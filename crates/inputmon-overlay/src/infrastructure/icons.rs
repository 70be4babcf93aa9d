//! PNG icon loading for the input line.
//!
//! Icons are decoded with the `image` crate, scaled with whole-number
//! subsample/zoom factors (see [`inputmon_core::domain::icon::scaled_size`])
//! and handed to the UI as straight RGBA buffers.  A missing or unreadable
//! file only costs that one icon; the text is still shown.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use inputmon_core::domain::icon::scaled_size;
use inputmon_core::IconKind;
use thiserror::Error;
use tracing::{debug, warn};

use super::storage::config::IconConfig;

/// Directory name searched next to the executable when no override is set.
pub const DEFAULT_ICON_DIR: &str = "images";

/// Error type for loading a single icon.
#[derive(Debug, Error)]
pub enum IconError {
    #[error("cannot locate the executable directory: {0}")]
    ExeDir(#[source] std::io::Error),

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// A decoded, scaled icon in unpremultiplied RGBA8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Every icon the overlay may draw; slots that failed to load are `None`.
#[derive(Debug, Clone, Default)]
pub struct IconSet {
    pub win: Option<IconImage>,
    pub mouse_left: Option<IconImage>,
    pub mouse_right: Option<IconImage>,
    pub mouse_middle: Option<IconImage>,
}

impl IconSet {
    pub fn get(&self, kind: IconKind) -> Option<&IconImage> {
        match kind {
            IconKind::Win => self.win.as_ref(),
            IconKind::MouseLeft => self.mouse_left.as_ref(),
            IconKind::MouseRight => self.mouse_right.as_ref(),
            IconKind::MouseMiddle => self.mouse_middle.as_ref(),
        }
    }
}

/// File name of each icon inside the icon directory.
pub fn icon_file_name(kind: IconKind) -> &'static str {
    match kind {
        IconKind::Win => "windows-10-logo.png",
        IconKind::MouseLeft => "mouse-left-click.png",
        IconKind::MouseRight => "mouse-right-click.png",
        IconKind::MouseMiddle => "mouse-middle-click.png",
    }
}

/// Resolves the icon directory: the configured one, else `images/` beside the executable.
///
/// # Errors
///
/// Returns [`IconError::ExeDir`] when no override is set and the executable
/// path cannot be determined.
pub fn icon_dir(config: &IconConfig) -> Result<PathBuf, IconError> {
    if let Some(dir) = &config.directory {
        return Ok(dir.clone());
    }
    let exe = std::env::current_exe().map_err(IconError::ExeDir)?;
    let base = exe.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok(base.join(DEFAULT_ICON_DIR))
}

/// Loads one PNG and scales it so its larger side approaches `target`.
///
/// # Errors
///
/// Returns [`IconError::Decode`] if the file is missing or not a valid image.
pub fn load_icon(path: &Path, target: u32) -> Result<IconImage, IconError> {
    let img = image::open(path).map_err(|source| IconError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = img.to_rgba8();
    let (width, height) = scaled_size(rgba.width(), rgba.height(), target);

    let rgba = if (width, height) == rgba.dimensions() {
        rgba
    } else {
        // Nearest keeps the hard pixel edges of an integer subsample/zoom.
        image::imageops::resize(&rgba, width, height, FilterType::Nearest)
    };

    Ok(IconImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

/// Loads all four icons; each failure is logged and leaves its slot empty.
pub fn load_icon_set(config: &IconConfig) -> IconSet {
    let dir = match icon_dir(config) {
        Ok(dir) => dir,
        Err(e) => {
            warn!("icons disabled: {e}");
            return IconSet::default();
        }
    };
    debug!(dir = %dir.display(), "loading icons");

    let load = |kind: IconKind| {
        let target = match kind {
            IconKind::Win => config.win_size,
            _ => config.mouse_size,
        };
        match load_icon(&dir.join(icon_file_name(kind)), target) {
            Ok(icon) => Some(icon),
            Err(e) => {
                warn!("{e}");
                None
            }
        }
    };

    IconSet {
        win: load(IconKind::Win),
        mouse_left: load(IconKind::MouseLeft),
        mouse_right: load(IconKind::MouseRight),
        mouse_middle: load(IconKind::MouseMiddle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("input_monitor_icons_{tag}_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_png(path: &Path, size: u32) {
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(size, size, Rgba([255, 0, 0, 255]));
        img.save(path).unwrap();
    }

    #[test]
    fn test_load_icon_subsamples_large_image() {
        // Arrange
        let dir = temp_dir("large");
        let path = dir.join("big.png");
        write_png(&path, 96);

        // Act
        let icon = load_icon(&path, 48).expect("load");

        // Assert
        assert_eq!((icon.width, icon.height), (48, 48));
        assert_eq!(icon.rgba.len(), 48 * 48 * 4);
        assert_eq!(&icon.rgba[..4], &[255, 0, 0, 255]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_icon_missing_file_is_decode_error() {
        let result = load_icon(Path::new("/nonexistent/icon.png"), 26);
        assert!(matches!(result, Err(IconError::Decode { .. })));
    }

    #[test]
    fn test_load_icon_set_tolerates_missing_files() {
        // Arrange
        let dir = temp_dir("partial");
        write_png(&dir.join(icon_file_name(IconKind::MouseLeft)), 48);
        let config = IconConfig {
            directory: Some(dir.clone()),
            ..Default::default()
        };

        // Act
        let set = load_icon_set(&config);

        // Assert
        assert!(set.get(IconKind::MouseLeft).is_some());
        assert!(set.get(IconKind::Win).is_none());
        assert!(set.get(IconKind::MouseRight).is_none());
        assert!(set.get(IconKind::MouseMiddle).is_none());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_icon_dir_prefers_configured_directory() {
        let config = IconConfig {
            directory: Some(PathBuf::from("/opt/icons")),
            ..Default::default()
        };
        assert_eq!(icon_dir(&config).unwrap(), PathBuf::from("/opt/icons"));
    }

    #[test]
    fn test_icon_dir_defaults_to_images_beside_executable() {
        let dir = icon_dir(&IconConfig::default()).unwrap();
        assert!(dir.ends_with(DEFAULT_ICON_DIR));
    }
}
