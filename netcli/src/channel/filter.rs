//! Telnet control byte filter.
//!
//! Devices interleave option negotiation and keep-alive echoes with their
//! CLI output. The filter drops single bytes from a fixed set before they
//! reach the prompt matcher. It does not parse negotiation sequences: an
//! `IAC WILL <option>` triple only loses the bytes that are in the set.

/// Telnet "are you there" command, sent as the keep-alive.
pub const ARE_YOU_THERE: u8 = 0xF6;

/// Bytes discarded unconditionally by the prompt matcher.
pub const CONTROL_BYTES: [u8; 9] = [
    0x00,
    0xFF,
    0x02,
    0x01,
    0x03,
    0x04,
    0x07,
    0x08,
    ARE_YOU_THERE,
];

/// Whether `byte` is dropped by the prompt matcher.
#[inline]
pub fn is_control_byte(byte: u8) -> bool {
    matches!(
        byte,
        0x00 | 0xFF | 0x02 | 0x01 | 0x03 | 0x04 | 0x07 | 0x08 | ARE_YOU_THERE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_byte_is_filtered() {
        for byte in CONTROL_BYTES {
            assert!(is_control_byte(byte), "0x{:02X} should be filtered", byte);
        }
    }

    #[test]
    fn test_printable_and_line_bytes_pass() {
        for byte in b"router# show\r\n\tLogin:" {
            assert!(!is_control_byte(*byte));
        }
        // IAC WILL / DO are not in the set
        assert!(!is_control_byte(0xFB));
        assert!(!is_control_byte(0xFD));
    }

    #[test]
    fn test_filter_matches_listed_set_exactly() {
        let count = (0u8..=255).filter(|b| is_control_byte(*b)).count();
        assert_eq!(count, CONTROL_BYTES.len());
    }
}
