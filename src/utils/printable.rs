//! Rendering raw bytes for diagnostics.

use std::fmt::Write;

/// Render bytes as text, replacing control bytes with `.`
pub fn printable(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&c| if (32..127).contains(&c) { c as char } else { '.' })
        .collect()
}

/// Render bytes as space separated lowercase hex pairs
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{:02x}", b);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_replaces_control_bytes() {
        assert_eq!(printable(b"AB\x00\nC"), "AB..C");
        assert_eq!(printable(b""), "");
    }

    #[test]
    fn test_printable_replaces_high_bytes() {
        assert_eq!(printable(&[0x41, 0xff, 0x7f]), "A..");
    }

    #[test]
    fn test_hex_dump() {
        assert_eq!(hex_dump(&[0x00, 0xab, 0x10]), "00 ab 10");
        assert_eq!(hex_dump(&[]), "");
    }
}
