//! Image download and output naming.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::RowError;

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

static UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]+").unwrap());
static URL_EXTENSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(jpg|jpeg|png|gif|webp)(?:$|\?)").unwrap());

/// Turn a SKU into a filesystem-safe filename stem: runs of characters
/// outside `[A-Za-z0-9._-]` collapse to `_`, then leading/trailing
/// underscores are trimmed. An empty result becomes `"image"`.
pub fn safe_filename(name: &str) -> String {
    let replaced = UNSAFE_CHARS.replace_all(name.trim(), "_");
    let trimmed = replaced.trim_matches('_');
    if trimmed.is_empty() {
        "image".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Pick the output extension: a known image MIME substring in the
/// Content-Type header wins, then a recognizable trailing extension in the
/// URL (jpeg normalized to .jpg), then `.jpg`.
pub fn guess_extension(url: &str, content_type: Option<&str>) -> &'static str {
    if let Some(content_type) = content_type {
        if content_type.contains("jpeg") {
            return ".jpg";
        }
        if content_type.contains("png") {
            return ".png";
        }
        if content_type.contains("webp") {
            return ".webp";
        }
        if content_type.contains("gif") {
            return ".gif";
        }
    }
    if let Some(captures) = URL_EXTENSION.captures(url) {
        return match captures[1].to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => ".jpg",
            "png" => ".png",
            "gif" => ".gif",
            _ => ".webp",
        };
    }
    ".jpg"
}

/// Fetch `url` on the shared session and write it as
/// `<output_dir>/<stem><ext>`, overwriting any existing file. Bytes are
/// written only after the whole body has been received, so a failed
/// download never leaves a partial file. Returns the written path.
pub fn download_image(
    http: &reqwest::blocking::Client,
    url: &str,
    output_dir: &Path,
    stem: &str,
) -> Result<PathBuf, RowError> {
    let response = http
        .get(url)
        .timeout(DOWNLOAD_TIMEOUT)
        .send()?
        .error_for_status()?;
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string());
    let bytes = response.bytes()?;

    let extension = guess_extension(url, content_type.as_deref());
    let output_path = output_dir.join(format!("{}{}", stem, extension));
    log::debug!("writing {} bytes to {}", bytes.len(), output_path.display());
    fs::write(&output_path, &bytes)?;
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_filename_strips_disallowed_chars() {
        assert_eq!(safe_filename("A/B C*D"), "A_B_C_D");
        assert_eq!(safe_filename("  SKU-001  "), "SKU-001");
        assert_eq!(safe_filename("v1.2_final"), "v1.2_final");
    }

    #[test]
    fn test_safe_filename_trims_underscores_and_defaults() {
        assert_eq!(safe_filename("///abc///"), "abc");
        assert_eq!(safe_filename(""), "image");
        assert_eq!(safe_filename("***"), "image");
    }

    #[test]
    fn test_safe_filename_idempotent() {
        for input in ["A/B C*D", "  x  ", "***", "normal-sku_1.png"] {
            let once = safe_filename(input);
            assert_eq!(safe_filename(&once), once);
        }
    }

    #[test]
    fn test_extension_content_type_wins() {
        assert_eq!(guess_extension("http://x/img?id=1", Some("image/png")), ".png");
        assert_eq!(guess_extension("http://x/img.webp", Some("image/jpeg")), ".jpg");
        assert_eq!(
            guess_extension("http://x/a.png", Some("image/gif;charset=binary")),
            ".gif"
        );
    }

    #[test]
    fn test_extension_url_suffix_fallback() {
        assert_eq!(guess_extension("http://x/img.webp", None), ".webp");
        assert_eq!(guess_extension("http://x/IMG.JPEG?w=640", None), ".jpg");
        assert_eq!(guess_extension("http://x/pic.PNG", None), ".png");
        // Unknown content types fall through to the URL.
        assert_eq!(
            guess_extension("http://x/pic.gif", Some("application/octet-stream")),
            ".gif"
        );
    }

    #[test]
    fn test_extension_default_jpg() {
        assert_eq!(guess_extension("http://x/img", None), ".jpg");
        assert_eq!(guess_extension("http://x/img.svg", None), ".jpg");
        // Extension not at the end of the path segment does not count.
        assert_eq!(guess_extension("http://x/img.png.html", None), ".jpg");
    }
}
