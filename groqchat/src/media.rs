//! Image and audio inputs for the multimodal pipeline.
//!
//! [`ImageInput`] knows how to become a `data:` URL for a vision model and how
//! to describe itself locally when the vision model is unavailable.
//! [`AudioInput`] carries the bytes and file name a transcription upload needs.
//!
//! # Example
//!
//! ```rust,ignore
//! use groqchat::media::ImageInput;
//!
//! let image = ImageInput::load("cat.jpg").await?;
//! assert!(image.to_data_url().starts_with("data:image/jpeg;base64,"));
//! ```

use std::io::Cursor;
use std::path::Path;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use image::ImageDecoder as _;
use serde::{Deserialize, Serialize};

use crate::audio::AudioFormat;
use crate::error::{Error, Result};

/// Image formats accepted by the vision model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG format.
    Png,
    /// JPEG format.
    Jpeg,
    /// GIF format.
    Gif,
    /// WebP format.
    Webp,
}

impl ImageFormat {
    /// Get the MIME type for this format.
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
        }
    }

    /// Detect format from file extension. `jpg` maps to [`ImageFormat::Jpeg`].
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }

    /// Detect format from a MIME type such as `image/jpeg`.
    #[must_use]
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.to_ascii_lowercase().as_str() {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(Self::Jpeg),
            "image/gif" => Some(Self::Gif),
            "image/webp" => Some(Self::Webp),
            _ => None,
        }
    }

    /// Detect format from magic bytes (file signature).
    #[must_use]
    pub fn from_magic_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [0x89, 0x50, 0x4E, 0x47, ..] => Some(Self::Png),
            [0xFF, 0xD8, 0xFF, ..] => Some(Self::Jpeg),
            [0x47, 0x49, 0x46, 0x38, ..] => Some(Self::Gif),
            [0x52, 0x49, 0x46, 0x46, _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(Self::Webp),
            _ => None,
        }
    }

    /// Detect the format of an upload: content first, then the file name.
    #[must_use]
    pub fn detect(bytes: &[u8], file_name: &str) -> Option<Self> {
        Self::from_magic_bytes(bytes)
            .or_else(|| extension(file_name).and_then(Self::from_extension))
            .or_else(|| {
                mime_guess::from_path(file_name)
                    .first()
                    .and_then(|mime| Self::from_mime(mime.essence_str()))
            })
    }
}

/// An uploaded image.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageInput {
    bytes: Vec<u8>,
    file_name: String,
    format: ImageFormat,
}

impl ImageInput {
    /// Wrap uploaded bytes.
    ///
    /// Fails when the bytes are empty or the format is not one the vision
    /// model accepts.
    pub fn new(bytes: Vec<u8>, file_name: impl Into<String>) -> Result<Self> {
        let file_name = file_name.into();
        if bytes.is_empty() {
            return Err(Error::input(format!("image '{file_name}' is empty")));
        }
        let format = ImageFormat::detect(&bytes, &file_name).ok_or_else(|| {
            Error::input(format!("unsupported image format for '{file_name}'"))
        })?;
        Ok(Self {
            bytes,
            file_name,
            format,
        })
    }

    /// Read an image from disk.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        Self::new(bytes, file_name_of(path))
    }

    /// The detected format.
    #[must_use]
    pub const fn format(&self) -> ImageFormat {
        self.format
    }

    /// The original file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Base64 encoding of the image bytes.
    #[must_use]
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.bytes)
    }

    /// `data:` URL suitable for a vision model's `image_url` part.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.format.mime_type(), self.to_base64())
    }

    /// Short description from the image header, without calling any model.
    ///
    /// Returns `"<name> (Size: WxH, Mode: M)"`, or just the name when the
    /// header cannot be read.
    #[must_use]
    pub fn describe_locally(&self) -> String {
        match self.header_info() {
            Some((width, height, mode)) => {
                format!(
                    "{} (Size: {width}x{height}, Mode: {mode})",
                    self.file_name
                )
            }
            None => self.file_name.clone(),
        }
    }

    fn header_info(&self) -> Option<(u32, u32, &'static str)> {
        let decoder = image::ImageReader::new(Cursor::new(&self.bytes))
            .with_guessed_format()
            .ok()?
            .into_decoder()
            .ok()?;
        let (width, height) = decoder.dimensions();
        Some((width, height, color_mode(decoder.color_type())))
    }
}

impl std::fmt::Debug for ImageInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageInput")
            .field("file_name", &self.file_name)
            .field("format", &self.format)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// An uploaded audio clip.
#[derive(Clone, PartialEq, Eq)]
pub struct AudioInput {
    bytes: Vec<u8>,
    file_name: String,
}

impl AudioInput {
    /// Wrap uploaded bytes. Fails when the bytes are empty.
    pub fn new(bytes: Vec<u8>, file_name: impl Into<String>) -> Result<Self> {
        let file_name = file_name.into();
        if bytes.is_empty() {
            return Err(Error::input(format!("audio '{file_name}' is empty")));
        }
        Ok(Self { bytes, file_name })
    }

    /// Read an audio file from disk.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        Self::new(bytes, file_name_of(path))
    }

    /// The original file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// MIME type for the upload.
    #[must_use]
    pub fn mime_type(&self) -> String {
        audio_mime_type(&self.file_name)
    }
}

impl std::fmt::Debug for AudioInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioInput")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// MIME type for an audio file name.
///
/// Known formats use [`AudioFormat::mime_type`]; any other extension becomes
/// `audio/<ext>`; a name without extension is sent as octet-stream.
#[must_use]
pub fn audio_mime_type(file_name: &str) -> String {
    match extension(file_name) {
        Some(ext) => AudioFormat::from_extension(ext).map_or_else(
            || format!("audio/{}", ext.to_ascii_lowercase()),
            |format| format.mime_type().to_owned(),
        ),
        None => mime_guess::mime::APPLICATION_OCTET_STREAM.to_string(),
    }
}

fn extension(file_name: &str) -> Option<&str> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
}

fn file_name_of(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

const fn color_mode(color: image::ColorType) -> &'static str {
    use image::ColorType;
    match color {
        ColorType::L8 | ColorType::L16 => "L",
        ColorType::La8 | ColorType::La16 => "LA",
        ColorType::Rgb8 | ColorType::Rgb16 | ColorType::Rgb32F => "RGB",
        ColorType::Rgba8 | ColorType::Rgba16 | ColorType::Rgba32F => "RGBA",
        _ => "unknown",
    }
}
