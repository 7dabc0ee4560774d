use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, Utc};
use image::ImageOutputFormat;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::core::{DataUri, ImagenError};

/// Prefix of downloaded image file names
pub const FILE_PREFIX: &str = "imajinasi-ai";

/// File name for an image downloaded at `at`
pub fn download_file_name(at: DateTime<Utc>) -> String {
    format!("{}-{}.png", FILE_PREFIX, at.timestamp_millis())
}

/// PNG bytes for a generated image, transcoding other formats
fn png_bytes(uri: &DataUri, bytes: Vec<u8>) -> Result<Vec<u8>, ImagenError> {
    if uri.is_png() {
        return Ok(bytes);
    }

    let image = image::load_from_memory(&bytes).map_err(|e| ImagenError::Image(e.to_string()))?;
    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageOutputFormat::Png)
        .map_err(|e| ImagenError::Image(e.to_string()))?;
    tracing::debug!("Converted {} image to PNG", uri.mime_type);
    Ok(png)
}

/// Write a generated image into `output_dir` as PNG, returning the new file's path
pub async fn save_image(uri: &DataUri, output_dir: &Path) -> Result<PathBuf, ImagenError> {
    let bytes = uri.decode()?;
    let source = uri.clone();
    let bytes = tokio::task::spawn_blocking(move || png_bytes(&source, bytes))
        .await
        .map_err(|e| ImagenError::Image(e.to_string()))??;
    fs::create_dir_all(output_dir).await?;

    let path = output_dir.join(download_file_name(Utc::now()));
    fs::write(&path, &bytes).await?;

    tracing::info!("Saved image to: {}", path.display());
    Ok(path)
}

/// Destination for "copy to clipboard"
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> std::io::Result<()>;
}

/// Copies through the terminal with the OSC 52 escape sequence.
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl Osc52Clipboard<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

/// The escape sequence that places `text` on the system clipboard
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", BASE64.encode(text.as_bytes()))
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn copy(&mut self, text: &str) -> std::io::Result<()> {
        self.out.write_all(osc52_sequence(text).as_bytes())?;
        self.out.flush()
    }
}
