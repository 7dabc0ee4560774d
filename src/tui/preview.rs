//! Half-block rendering of the generated image.
//!
//! Each terminal cell shows two vertically stacked pixels: the upper one as
//! the foreground of `▀` and the lower one as the background.

use image::imageops::FilterType;
use image::{Rgb, RgbImage};
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::StatefulWidget};

use crate::core::{DataUri, ImagenError};

/// Decode a data URI into pixels for the preview
pub fn decode(uri: &DataUri) -> Result<RgbImage, ImagenError> {
    let bytes = uri.decode()?;
    let image = image::load_from_memory(&bytes).map_err(|e| ImagenError::Image(e.to_string()))?;
    Ok(image.to_rgb8())
}

/// Decoded image plus its most recent downscale
pub struct Preview {
    image: RgbImage,
    scaled: Option<RgbImage>,
}

impl Preview {
    pub fn new(image: RgbImage) -> Self {
        Self {
            image,
            scaled: None,
        }
    }

    /// Pixel size that fits `area` while keeping the aspect ratio
    fn fit(&self, area: Rect) -> (u32, u32) {
        let (iw, ih) = self.image.dimensions();
        let max_w = area.width as u32;
        let max_h = area.height as u32 * 2;
        if iw == 0 || ih == 0 {
            return (0, 0);
        }
        let scale = f64::min(max_w as f64 / iw as f64, max_h as f64 / ih as f64);
        let w = ((iw as f64 * scale) as u32).clamp(1, max_w);
        let h = ((ih as f64 * scale) as u32).clamp(1, max_h);
        (w, h)
    }

    /// The image at `w`x`h`, resized only when the size changed
    fn scaled(&mut self, w: u32, h: u32) -> &RgbImage {
        let scaled = match self.scaled.take() {
            Some(scaled) if scaled.dimensions() == (w, h) => scaled,
            _ => {
                tracing::debug!("Resizing preview to {}x{}", w, h);
                image::imageops::resize(&self.image, w, h, FilterType::Triangle)
            }
        };
        self.scaled.insert(scaled)
    }
}

fn to_color(pixel: &Rgb<u8>) -> Color {
    let [r, g, b] = pixel.0;
    Color::Rgb(r, g, b)
}

/// Renders a [`Preview`] centered in its area
pub struct ImagePreview;

impl StatefulWidget for ImagePreview {
    type State = Preview;

    fn render(self, area: Rect, buf: &mut Buffer, preview: &mut Preview) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let (w, h) = preview.fit(area);
        if w == 0 || h == 0 {
            return;
        }

        let resized = preview.scaled(w, h);
        let rows = h.div_ceil(2);
        let x0 = area.x + ((area.width as u32 - w) / 2) as u16;
        let y0 = area.y + ((area.height as u32 - rows) / 2) as u16;

        for row in 0..rows {
            for col in 0..w {
                let top = resized.get_pixel(col, row * 2);
                let bottom = if row * 2 + 1 < h {
                    resized.get_pixel(col, row * 2 + 1)
                } else {
                    top
                };
                if let Some(cell) = buf.cell_mut((x0 + col as u16, y0 + row as u16)) {
                    cell.set_char('▀')
                        .set_fg(to_color(top))
                        .set_bg(to_color(bottom));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
    use std::io::Cursor;

    fn png_data_uri(image: &RgbImage) -> DataUri {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
            .unwrap();
        DataUri::png(BASE64.encode(bytes))
    }

    #[test]
    fn test_decode_png() {
        let image = RgbImage::from_pixel(4, 2, Rgb([255, 0, 0]));
        let decoded = decode(&png_data_uri(&image)).unwrap();
        assert_eq!(decoded.dimensions(), (4, 2));
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(decode(&DataUri::png("aGVsbG8=")), Err(ImagenError::Image(_))));
    }

    #[test]
    fn test_render_fills_cells_with_pixels() {
        let mut preview = Preview::new(RgbImage::from_pixel(8, 8, Rgb([10, 20, 30])));
        let area = Rect::new(0, 0, 8, 4);
        let mut buf = Buffer::empty(area);

        ImagePreview.render(area, &mut buf, &mut preview);

        let cell = buf.cell((0, 0)).unwrap();
        assert_eq!(cell.symbol(), "▀");
        assert_eq!(cell.fg, Color::Rgb(10, 20, 30));
        assert_eq!(cell.bg, Color::Rgb(10, 20, 30));
    }

    #[test]
    fn test_fit_keeps_aspect_ratio() {
        let preview = Preview::new(RgbImage::new(200, 100));
        assert_eq!(preview.fit(Rect::new(0, 0, 40, 40)), (40, 20));
    }

    #[test]
    fn test_same_area_reuses_scaled_image() {
        let mut preview = Preview::new(RgbImage::from_pixel(64, 64, Rgb([10, 20, 30])));
        let area = Rect::new(0, 0, 8, 4);
        ImagePreview.render(area, &mut Buffer::empty(area), &mut preview);

        // a cached frame is drawn as-is, so tinting it shows up on screen
        if let Some(scaled) = preview.scaled.as_mut() {
            for pixel in scaled.pixels_mut() {
                *pixel = Rgb([1, 2, 3]);
            }
        }
        let mut buf = Buffer::empty(area);
        ImagePreview.render(area, &mut buf, &mut preview);
        assert_eq!(buf.cell((0, 0)).unwrap().fg, Color::Rgb(1, 2, 3));
    }

    #[test]
    fn test_new_area_rescales() {
        let mut preview = Preview::new(RgbImage::from_pixel(64, 64, Rgb([10, 20, 30])));
        let small = Rect::new(0, 0, 8, 4);
        ImagePreview.render(small, &mut Buffer::empty(small), &mut preview);
        assert_eq!(preview.scaled.as_ref().unwrap().dimensions(), (8, 8));

        let large = Rect::new(0, 0, 16, 8);
        ImagePreview.render(large, &mut Buffer::empty(large), &mut preview);
        assert_eq!(preview.scaled.as_ref().unwrap().dimensions(), (16, 16));
    }
}
