//! File output: raster export (PNG/JPG/BMP selected by extension), the
//! PostScript save dialog plumbing, and the snapshot path in the user's
//! Pictures directory.

use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageError, RgbaImage};
use rfd::FileDialog;

use crate::APP_TITLE;

/// JPEG quality for exports. There is no quality UI; this matches what the
/// save dialog of a typical editor defaults to.
const JPEG_QUALITY: u8 = 90;

// ============================================================================
// SAVE FORMAT — derived from a validated file extension
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveFormat {
    Png,
    Jpeg,
    Bmp,
}

impl SaveFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            SaveFormat::Png => "png",
            SaveFormat::Jpeg => "jpg",
            SaveFormat::Bmp => "bmp",
        }
    }

    /// Derive the codec from the path's extension. Missing or unrecognized
    /// extensions are rejected — there is no silent default format.
    pub fn from_path(path: &Path) -> Result<Self, FormatError> {
        let ext = path
            .extension()
            .ok_or(FormatError::MissingExtension)?
            .to_string_lossy()
            .to_lowercase();
        match ext.as_str() {
            "png" => Ok(SaveFormat::Png),
            "jpg" | "jpeg" => Ok(SaveFormat::Jpeg),
            "bmp" => Ok(SaveFormat::Bmp),
            _ => Err(FormatError::Unsupported(ext)),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum FormatError {
    MissingExtension,
    Unsupported(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::MissingExtension => {
                write!(f, "file name has no extension; use .png, .jpg or .bmp")
            }
            FormatError::Unsupported(ext) => {
                write!(f, "'.{}' is not a supported image format (png, jpg, bmp)", ext)
            }
        }
    }
}

#[derive(Debug)]
pub enum SaveError {
    Format(FormatError),
    Encode(ImageError),
    Io(std::io::Error),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Format(e) => write!(f, "{}", e),
            SaveError::Encode(e) => write!(f, "could not encode image: {}", e),
            SaveError::Io(e) => write!(f, "could not write file: {}", e),
        }
    }
}

impl From<FormatError> for SaveError {
    fn from(e: FormatError) -> Self {
        SaveError::Format(e)
    }
}

impl From<ImageError> for SaveError {
    fn from(e: ImageError) -> Self {
        SaveError::Encode(e)
    }
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

/// Encode and write an image to a file with the given format.
pub fn encode_and_write(
    image: &RgbaImage,
    path: &Path,
    format: SaveFormat,
) -> Result<(), SaveError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    match format {
        SaveFormat::Png => {
            let encoder = PngEncoder::new(&mut writer);
            #[allow(deprecated)]
            encoder.encode(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ColorType::Rgba8,
            )?;
        }
        SaveFormat::Jpeg => {
            // JPEG has no alpha channel; convert to RGB first.
            let rgb_image = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            let mut encoder = JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
            encoder.encode(
                rgb_image.as_raw(),
                rgb_image.width(),
                rgb_image.height(),
                image::ColorType::Rgb8,
            )?;
        }
        SaveFormat::Bmp => {
            let mut encoder = BmpEncoder::new(&mut writer);
            encoder.encode(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ColorType::Rgba8,
            )?;
        }
    }

    Ok(())
}

/// Save the raster mirror to `path`, deriving the codec from the extension.
pub fn save_image(image: &RgbaImage, path: &Path) -> Result<SaveFormat, SaveError> {
    let format = SaveFormat::from_path(path)?;
    encode_and_write(image, path, format)?;
    Ok(format)
}

// ============================================================================
// FILE HANDLER — native save dialogs
// ============================================================================

#[derive(Default)]
pub struct FileHandler;

impl FileHandler {
    /// Native save dialog for the PostScript export. `None` means the user
    /// cancelled, which is a normal outcome and aborts the save silently.
    pub fn pick_postscript_path(&self) -> Option<PathBuf> {
        FileDialog::new()
            .set_title("Save WhiteFLAT Canvas to a PostScript File")
            .set_directory(pictures_dir())
            .set_file_name(&format!("Untitled_{}.ps", APP_TITLE))
            .add_filter("PostScript File", &["ps"])
            .add_filter("All Files", &["*"])
            .save_file()
    }

    /// Native save dialog for the raster export.
    pub fn pick_image_path(&self) -> Option<PathBuf> {
        FileDialog::new()
            .set_title("Save WhiteFLAT Canvas as an Image File")
            .set_directory(pictures_dir())
            .set_file_name(&format!("Untitled_{}.png", APP_TITLE))
            .add_filter("Portable Network Graphic", &["png"])
            .add_filter("JPG", &["jpg", "jpeg"])
            .add_filter("Bit Map Picture", &["bmp"])
            .save_file()
    }
}

// ============================================================================
// SNAPSHOT PATH — Pictures directory + timestamped filename
// ============================================================================

/// `<Pictures>/<Title>_shot@<YYYYMMDDHHMMSS>.png`
pub fn snapshot_path(title: &str) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d%H%M%S");
    pictures_dir().join(format!("{}_shot@{}.png", title, stamp))
}

/// The user's Pictures directory, resolved from the platform environment.
/// Falls back to the current directory when no profile is available.
pub fn pictures_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Ok(profile) = std::env::var("USERPROFILE") {
            return PathBuf::from(profile).join("Pictures");
        }
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join("Pictures");
    }
    PathBuf::from(".")
}
