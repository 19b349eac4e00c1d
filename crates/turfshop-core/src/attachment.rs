//! Inline attachment encoding.
//!
//! Demo-mode attachment storage keeps images inline as base64 data URLs
//! appended to a ticket's image list. The services never interpret the
//! content; they only carry the returned reference.

use std::fmt::Write;

use crate::error::Error;

const CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Encode raw image bytes as a `data:<mime>;base64,...` URL.
pub fn encode_data_url(mime: &str, data: &[u8]) -> String {
    format!("data:{mime};base64,{}", base64_encode(data))
}

/// Split a data URL back into its mime type and raw bytes.
pub fn decode_data_url(url: &str) -> Result<(String, Vec<u8>), Error> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| Error::InvalidArgument("Not a data URL".to_owned()))?;
    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| Error::InvalidArgument("Data URL is not base64-encoded".to_owned()))?;
    Ok((mime.to_owned(), base64_decode(payload)?))
}

/// Simple base64 encoding (no external dependency needed).
fn base64_encode(data: &[u8]) -> String {
    let mut result = String::with_capacity(data.len().div_ceil(3) * 4);

    for chunk in data.chunks(3) {
        let b0 = u32::from(chunk[0]);
        let b1 = u32::from(chunk.get(1).copied().unwrap_or(0));
        let b2 = u32::from(chunk.get(2).copied().unwrap_or(0));
        let n = (b0 << 16) | (b1 << 8) | b2;

        let _ = result.write_char(CHARS[(n >> 18 & 0x3F) as usize] as char);
        let _ = result.write_char(CHARS[(n >> 12 & 0x3F) as usize] as char);

        if chunk.len() > 1 {
            let _ = result.write_char(CHARS[(n >> 6 & 0x3F) as usize] as char);
        } else {
            result.push('=');
        }
        if chunk.len() > 2 {
            let _ = result.write_char(CHARS[(n & 0x3F) as usize] as char);
        } else {
            result.push('=');
        }
    }

    result
}

fn base64_decode(input: &str) -> Result<Vec<u8>, Error> {
    #[allow(clippy::cast_possible_truncation)]
    const DECODE: [u8; 128] = {
        let mut table = [255u8; 128];
        let chars = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
        let mut i = 0;
        while i < 64 {
            table[chars[i] as usize] = i as u8;
            i += 1;
        }
        table
    };

    let input = input.trim_end_matches('=');
    if input.len() % 4 == 1 {
        return Err(Error::InvalidArgument("Invalid base64 length".to_owned()));
    }
    let mut result = Vec::with_capacity(input.len() * 3 / 4);

    for chunk in input.as_bytes().chunks(4) {
        let mut n: u32 = 0;
        for (i, &b) in chunk.iter().enumerate() {
            if b as usize >= 128 || DECODE[b as usize] == 255 {
                return Err(Error::InvalidArgument(format!(
                    "Invalid base64 character: {}",
                    b as char
                )));
            }
            n |= u32::from(DECODE[b as usize]) << (18 - i * 6);
        }

        result.push((n >> 16 & 0xFF) as u8);
        if chunk.len() > 2 {
            result.push((n >> 8 & 0xFF) as u8);
        }
        if chunk.len() > 3 {
            result.push((n & 0xFF) as u8);
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_round_trip() {
        let bytes = b"\x89PNG\r\n\x1a\nfake image payload";
        let url = encode_data_url("image/png", bytes);
        assert!(url.starts_with("data:image/png;base64,"));

        let (mime, decoded) = decode_data_url(&url).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn rejects_non_data_urls() {
        assert!(decode_data_url("https://example.com/a.png").is_err());
        assert!(decode_data_url("data:image/png,rawtext").is_err());
    }

    #[test]
    fn padding_variants_decode() {
        // 1 byte -> "==" padding, 2 bytes -> "=" padding.
        let one = encode_data_url("image/jpeg", b"A");
        assert!(one.ends_with("=="));
        assert_eq!(decode_data_url(&one).unwrap().1, b"A");

        let two = encode_data_url("image/jpeg", b"AB");
        assert!(two.ends_with('='));
        assert_eq!(decode_data_url(&two).unwrap().1, b"AB");
    }

    #[test]
    fn empty_payload() {
        let url = encode_data_url("image/gif", b"");
        assert_eq!(decode_data_url(&url).unwrap().1, Vec::<u8>::new());
    }
}
