//! File naming, PNG export and the inline download URI.

use std::path::{Path, PathBuf};

use base64::Engine;

use crate::client::GeneratedImage;
use crate::error::AppError;

/// Build the export filename for an image.
///
/// `mandala_<word>_<YYYYmmdd_HHMMSS>.png`, with `_high_res` before the
/// extension for the high-resolution copy.
#[must_use]
pub fn image_filename(image: &GeneratedImage, high_res: bool) -> String {
    let word = sanitize_for_filename(image.word.as_str(), 50);
    let timestamp = image.created_at.format("%Y%m%d_%H%M%S");
    let suffix = if high_res { "_high_res" } else { "" };
    format!("mandala_{word}_{timestamp}{suffix}.png")
}

/// Sanitize a string for use in a filename.
///
/// Converts to lowercase, replaces non-alphanumeric chars with hyphens,
/// collapses consecutive hyphens, and trims to max length.
#[must_use]
pub fn sanitize_for_filename(input: &str, max_len: usize) -> String {
    let mut result = String::with_capacity(max_len);
    let mut last_was_hyphen = true; // Prevents leading hyphen

    for ch in input.chars() {
        if result.len() >= max_len {
            break;
        }
        if ch.is_ascii_alphanumeric() {
            result.push(ch.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            result.push('-');
            last_was_hyphen = true;
        }
    }

    while result.ends_with('-') {
        result.pop();
    }

    if result.is_empty() {
        "word".to_string()
    } else {
        result
    }
}

/// Resolve where to write an image: explicit path, or an auto name in `dir`.
#[must_use]
pub fn resolve_output_path(
    explicit: Option<&str>,
    dir: &Path,
    image: &GeneratedImage,
    high_res: bool,
) -> PathBuf {
    match explicit {
        Some(p) => PathBuf::from(p),
        None => dir.join(image_filename(image, high_res)),
    }
}

/// Encode the bitmap as PNG bytes.
///
/// # Errors
///
/// Returns an error if the encoder rejects the bitmap.
pub fn encode_png(image: &GeneratedImage) -> Result<Vec<u8>, AppError> {
    let mut buf = std::io::Cursor::new(Vec::new());
    image
        .bitmap
        .write_to(&mut buf, image::ImageFormat::Png)
        .map_err(|e| AppError::ImageEncoding(format!("Failed to encode PNG: {e}")))?;
    Ok(buf.into_inner())
}

/// A `data:` URI that downloads the image as PNG when opened.
///
/// # Errors
///
/// Returns an error if PNG encoding fails.
pub fn data_uri(image: &GeneratedImage) -> Result<String, AppError> {
    let encoded = base64::engine::general_purpose::STANDARD.encode(encode_png(image)?);
    Ok(format!("data:image/png;base64,{encoded}"))
}

/// Write the bitmap as a PNG file, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_png(image: &GeneratedImage, path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, encode_png(image)?)?;
    tracing::debug!(path = %path.display(), "image written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::InspirationWord;
    use chrono::{Local, TimeZone};
    use image::DynamicImage;

    fn sample(word: &str) -> GeneratedImage {
        GeneratedImage {
            bitmap: DynamicImage::new_luma8(4, 3),
            word: InspirationWord::parse(word).unwrap(),
            created_at: Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap(),
        }
    }

    #[test]
    fn sanitize_basic() {
        assert_eq!(sanitize_for_filename("Ocean Calm", 50), "ocean-calm");
    }

    #[test]
    fn sanitize_path_separators() {
        assert_eq!(sanitize_for_filename("../etc/passwd", 50), "etc-passwd");
    }

    #[test]
    fn sanitize_truncates() {
        let long = "a".repeat(100);
        assert!(sanitize_for_filename(&long, 10).len() <= 10);
    }

    #[test]
    fn sanitize_non_ascii_falls_back() {
        assert_eq!(sanitize_for_filename("雪", 50), "word");
        assert_eq!(sanitize_for_filename("!!!", 50), "word");
    }

    #[test]
    fn filename_combines_word_and_timestamp() {
        let image = sample("ocean");
        assert_eq!(image_filename(&image, false), "mandala_ocean_20240309_140507.png");
        assert_eq!(image_filename(&image, true), "mandala_ocean_20240309_140507_high_res.png");
    }

    #[test]
    fn resolve_explicit_wins() {
        let path = resolve_output_path(Some("out.png"), Path::new("ignored"), &sample("x"), true);
        assert_eq!(path, PathBuf::from("out.png"));
    }

    #[test]
    fn resolve_auto_in_dir() {
        let path = resolve_output_path(None, Path::new("art"), &sample("ocean"), false);
        assert_eq!(path, Path::new("art").join("mandala_ocean_20240309_140507.png"));
    }

    #[test]
    fn data_uri_is_base64_png() {
        let uri = data_uri(&sample("ocean")).unwrap();
        let payload = uri.strip_prefix("data:image/png;base64,").unwrap();
        let bytes = base64::engine::general_purpose::STANDARD.decode(payload).unwrap();
        assert_eq!(&bytes[..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn save_png_round_trips_dimensions() {
        let dir = std::env::temp_dir().join("mandala_output_save_test");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("m.png");

        save_png(&sample("ocean"), &path).unwrap();

        let reloaded = image::open(&path).unwrap();
        assert_eq!((reloaded.width(), reloaded.height()), (4, 3));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
