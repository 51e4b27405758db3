//! QR image rendering for short URLs.

use base64::Engine as _;
use qrcode::QrCode;
use qrcode::render::svg;

/// Rendered size lower bound in pixels.
const MIN_DIMENSIONS: u32 = 256;

/// Renders `url` as a QR code and packages it as an embeddable
/// `data:image/svg+xml;base64,` URL.
///
/// # Errors
///
/// Fails only when the input exceeds QR capacity, which no canonical short
/// URL does; callers treat a failure as non-fatal where the image is
/// decorative (resolution backfill).
pub fn qr_data_url(url: &str) -> Result<String, qrcode::types::QrError> {
    let code = QrCode::new(url.as_bytes())?;

    let image = code
        .render::<svg::Color>()
        .min_dimensions(MIN_DIMENSIONS, MIN_DIMENSIONS)
        .build();

    Ok(format!(
        "data:image/svg+xml;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(image)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_data_url_prefix() {
        let data_url = qr_data_url("https://atomzr.link/my-post").unwrap();
        assert!(data_url.starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn test_qr_payload_is_valid_base64_svg() {
        let data_url = qr_data_url("https://atomzr.link/abc123").unwrap();
        let payload = data_url
            .strip_prefix("data:image/svg+xml;base64,")
            .unwrap();

        let decoded = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .unwrap();
        let svg = String::from_utf8(decoded).unwrap();

        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_qr_deterministic_for_same_input() {
        let a = qr_data_url("https://atomzr.link/x1").unwrap();
        let b = qr_data_url("https://atomzr.link/x1").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_qr_differs_per_url() {
        let a = qr_data_url("https://atomzr.link/x1").unwrap();
        let b = qr_data_url("https://atomzr.link/x2").unwrap();
        assert_ne!(a, b);
    }
}
