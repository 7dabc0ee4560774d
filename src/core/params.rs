use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ImagenError;

/// Requested width:height proportion of the generated image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "4:3")]
    ClassicLandscape,
    #[serde(rename = "3:4")]
    ClassicPortrait,
}

impl AspectRatio {
    pub fn all() -> &'static [AspectRatio] {
        &[
            AspectRatio::Square,
            AspectRatio::Landscape,
            AspectRatio::Portrait,
            AspectRatio::ClassicLandscape,
            AspectRatio::ClassicPortrait,
        ]
    }

    /// The label sent to the API and shown in the selector
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
            AspectRatio::ClassicLandscape => "4:3",
            AspectRatio::ClassicPortrait => "3:4",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AspectRatio::Square => "Square",
            AspectRatio::Landscape => "Landscape",
            AspectRatio::Portrait => "Portrait",
            AspectRatio::ClassicLandscape => "Classic Landscape",
            AspectRatio::ClassicPortrait => "Classic Portrait",
        }
    }

    fn position(&self) -> usize {
        Self::all().iter().position(|r| r == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        all[(self.position() + 1) % all.len()]
    }

    pub fn previous(&self) -> Self {
        let all = Self::all();
        all[(self.position() + all.len() - 1) % all.len()]
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = ImagenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|r| r.as_str() == s.trim())
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::all().iter().map(|r| r.as_str()).collect();
                ImagenError::Validation(format!(
                    "Invalid aspect ratio '{}'. Valid values: {}",
                    s,
                    valid.join(", ")
                ))
            })
    }
}

/// One of the free-text members of [`ImageParameters`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Subject,
    Style,
    Lighting,
    Colors,
    Details,
}

impl Field {
    /// Fields in prompt order
    pub fn all() -> &'static [Field] {
        &[
            Field::Subject,
            Field::Style,
            Field::Lighting,
            Field::Colors,
            Field::Details,
        ]
    }

    /// Position in prompt order
    pub fn index(self) -> usize {
        self as usize
    }

    /// Label used in the compact (copyable) prompt
    pub fn compact_label(&self) -> &'static str {
        match self {
            Field::Subject => "Main Subject",
            Field::Style => "Visual Style",
            Field::Lighting => "Lighting",
            Field::Colors => "Colors",
            Field::Details => "Details",
        }
    }

    /// Label used in the prompt sent to the API
    pub fn verbose_label(&self) -> &'static str {
        match self {
            Field::Subject => "Main Subject",
            Field::Style => "Visual Style",
            Field::Lighting => "Lighting Atmosphere",
            Field::Colors => "Dominant Colors",
            Field::Details => "Additional Details",
        }
    }

    pub fn suggestions(&self) -> &'static [&'static str] {
        match self {
            Field::Style => &[
                "Photorealistic",
                "Anime",
                "Cyberpunk",
                "Oil Painting",
                "3D Render",
                "Pixel Art",
            ],
            Field::Lighting => &["Cinematic", "Golden Hour", "Neon", "Soft Studio", "Dark & Moody"],
            _ => &[],
        }
    }

    /// Multi-line fields get a taller input box
    pub fn is_multiline(&self) -> bool {
        matches!(self, Field::Subject | Field::Details)
    }
}

/// Structured parameters the prompt is built from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageParameters {
    pub subject: String,
    pub style: String,
    pub lighting: String,
    pub colors: String,
    pub details: String,
    pub aspect_ratio: AspectRatio,
}

#[cfg(test)]
impl ImageParameters {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            ..Default::default()
        }
    }

    pub fn with_field(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn with_aspect_ratio(mut self, ar: AspectRatio) -> Self {
        self.aspect_ratio = ar;
        self
    }
}

impl ImageParameters {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Subject => &self.subject,
            Field::Style => &self.style,
            Field::Lighting => &self.lighting,
            Field::Colors => &self.colors,
            Field::Details => &self.details,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Subject => &mut self.subject,
            Field::Style => &mut self.style,
            Field::Lighting => &mut self.lighting,
            Field::Colors => &mut self.colors,
            Field::Details => &mut self.details,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.get_mut(field) = value.into();
    }

    /// The trimmed value, or `None` when the field is blank
    pub fn value(&self, field: Field) -> Option<&str> {
        let value = self.get(field).trim();
        (!value.is_empty()).then_some(value)
    }

    pub fn has_subject(&self) -> bool {
        self.value(Field::Subject).is_some()
    }
}

pub const PNG_MIME_TYPE: &str = "image/png";

/// A generated image as a self-contained `data:` URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime_type: String,
    /// Base64 encoded payload
    pub data: String,
}

impl DataUri {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn png(data: impl Into<String>) -> Self {
        Self::new(PNG_MIME_TYPE, data)
    }

    pub fn is_png(&self) -> bool {
        self.mime_type.eq_ignore_ascii_case(PNG_MIME_TYPE)
    }

    /// Decode the base64 payload into raw image bytes
    pub fn decode(&self) -> Result<Vec<u8>, ImagenError> {
        Ok(BASE64.decode(self.data.trim())?)
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_cycles() {
        assert_eq!(AspectRatio::Square.next(), AspectRatio::Landscape);
        assert_eq!(AspectRatio::ClassicPortrait.next(), AspectRatio::Square);
        assert_eq!(AspectRatio::Square.previous(), AspectRatio::ClassicPortrait);
    }

    #[test]
    fn test_aspect_ratio_from_str() {
        assert_eq!("16:9".parse::<AspectRatio>().unwrap(), AspectRatio::Landscape);
        assert!("21:9".parse::<AspectRatio>().is_err());
    }

    #[test]
    fn test_aspect_ratio_serializes_as_label() {
        let json = serde_json::to_string(&AspectRatio::Portrait).unwrap();
        assert_eq!(json, "\"9:16\"");
    }

    #[test]
    fn test_blank_fields_have_no_value() {
        let params = ImageParameters::new("   ").with_field(Field::Style, " Anime ");
        assert!(!params.has_subject());
        assert_eq!(params.value(Field::Style), Some("Anime"));
    }

    #[test]
    fn test_data_uri_display_and_decode() {
        let uri = DataUri::png("aGVsbG8=");
        assert_eq!(uri.to_string(), "data:image/png;base64,aGVsbG8=");
        assert_eq!(uri.decode().unwrap(), b"hello");
        assert!(uri.is_png());
        assert!(!DataUri::new("image/jpeg", "").is_png());
    }

    #[test]
    fn test_data_uri_rejects_bad_base64() {
        let uri = DataUri::png("not base64!!");
        assert!(matches!(uri.decode(), Err(ImagenError::Image(_))));
    }
}
