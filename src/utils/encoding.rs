//! Text decoding for configuration files.
//!
//! A BOM (UTF-8, UTF-16 LE/BE) selects the encoding and is stripped. Without a
//! BOM the content must be valid UTF-8. There is no charset guessing here: a
//! config file decoded with the wrong charset would silently change values.

use encoding_rs::{Encoding, UTF_8};

/// Decode raw file bytes. Returns `None` if the bytes are not valid text.
pub fn decode_text(bytes: &[u8]) -> Option<String> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return if had_errors { None } else { Some(text.into_owned()) };
    }

    UTF_8.decode_without_bom_handling_and_without_replacement(bytes).map(|text| text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::decode_text;

    #[test]
    fn plain_utf8_passes_through() {
        let text = "{\"name\": \"café\"}";
        assert_eq!(decode_text(text.as_bytes()).as_deref(), Some(text));
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let mut bytes = vec![0xef, 0xbb, 0xbf];
        bytes.extend_from_slice(b"{}");
        assert_eq!(decode_text(&bytes).as_deref(), Some("{}"));
    }

    #[test]
    fn utf16_le_is_decoded() {
        let mut bytes = vec![0xff, 0xfe];
        for unit in "{}".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_text(&bytes).as_deref(), Some("{}"));
    }

    #[test]
    fn invalid_utf8_without_bom_is_rejected() {
        assert_eq!(decode_text(&[0x7b, 0xc3, 0x28, 0x7d]), None);
    }
}
