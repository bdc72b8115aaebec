//! Transform provider adapters

use std::io::Cursor;

use base64::Engine;
use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::application::ports::ProviderError;
use crate::domain::transform::ClipboardImage;

pub mod factory;
pub mod gemini;
pub mod groq;
pub mod ollama;

pub use factory::{create_provider, ProviderKind, ProviderSetupError};
pub use gemini::GeminiProvider;
pub use groq::GroqProvider;
pub use ollama::OllamaProvider;

/// Encode a raw RGBA clipboard image as base64 PNG for provider payloads.
pub(crate) fn png_base64(image: &ClipboardImage) -> Result<String, ProviderError> {
    let rgba = RgbaImage::from_raw(
        image.width as u32,
        image.height as u32,
        image.rgba.clone(),
    )
    .ok_or_else(|| {
        ProviderError::InvalidSource(
            "clipboard image dimensions do not match its pixel data".to_string(),
        )
    })?;

    let mut png = Vec::new();
    DynamicImage::ImageRgba8(rgba)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| ProviderError::InvalidSource(e.to_string()))?;

    Ok(base64::engine::general_purpose::STANDARD.encode(&png))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_base64_round_trips_through_decode() {
        let image = ClipboardImage::new(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 255]);
        let encoded = png_base64(&image).unwrap();

        let png = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();
        // PNG signature
        assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn png_base64_rejects_mismatched_dimensions() {
        let image = ClipboardImage::new(10, 10, vec![0; 4]);
        assert!(matches!(
            png_base64(&image),
            Err(ProviderError::InvalidSource(_))
        ));
    }
}
