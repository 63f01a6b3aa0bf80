//! UTF-8 Safe String Utilities
//!
//! Buffer offsets arrive from the UI layer as arbitrary numbers (egui reports
//! cursor positions in character indices, the buffer stores byte offsets).
//! Multi-byte characters like `ø`, `中`, `🎉` mean a raw byte index can fall
//! inside a character, and slicing there panics. These helpers clamp indices
//! to valid boundaries and convert between the two index spaces.

// ─────────────────────────────────────────────────────────────────────────────
// Character Boundary Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Returns the largest index that is less than or equal to `index`
/// and is on a UTF-8 character boundary.
///
/// If `index` is greater than the string length, returns the string length.
#[inline]
pub fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    if index == 0 {
        return 0;
    }

    // Walk backwards to find the start of the character
    let bytes = s.as_bytes();
    let mut i = index;
    while i > 0 && !is_utf8_char_start(bytes[i]) {
        i -= 1;
    }
    i
}

/// Returns the smallest index that is greater than or equal to `index`
/// and is on a UTF-8 character boundary.
///
/// If `index` is greater than or equal to the string length, returns the string length.
#[inline]
pub fn ceil_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    if index == 0 {
        return 0;
    }

    // Walk forwards to find the start of the next character
    let bytes = s.as_bytes();
    let mut i = index;
    while i < bytes.len() && !is_utf8_char_start(bytes[i]) {
        i += 1;
    }
    i
}

/// Check if a byte is the start of a UTF-8 character.
///
/// A byte is a char start if it's NOT a continuation byte (10xxxxxx).
#[inline]
fn is_utf8_char_start(byte: u8) -> bool {
    (byte & 0b1100_0000) != 0b1000_0000
}

// ─────────────────────────────────────────────────────────────────────────────
// Index Space Conversion
// ─────────────────────────────────────────────────────────────────────────────

/// Convert a character index (as reported by egui's text cursor) to a byte
/// offset into `s`. Out-of-range indices clamp to the string length.
#[inline]
pub fn char_to_byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Convert a byte offset into `s` to a character index. The offset is floored
/// to the nearest character boundary first, so mid-character bytes are safe.
#[inline]
pub fn byte_to_char_index(s: &str, byte_index: usize) -> usize {
    let byte_index = floor_char_boundary(s, byte_index);
    s[..byte_index].chars().count()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_char_boundary_ascii() {
        let s = "hello";
        assert_eq!(floor_char_boundary(s, 0), 0);
        assert_eq!(floor_char_boundary(s, 3), 3);
        assert_eq!(floor_char_boundary(s, 5), 5);
        assert_eq!(floor_char_boundary(s, 99), 5);
    }

    #[test]
    fn test_floor_char_boundary_multibyte() {
        let s = "på"; // 'å' is bytes 1..3
        assert_eq!(floor_char_boundary(s, 2), 1);
        assert_eq!(floor_char_boundary(s, 1), 1);
        assert_eq!(floor_char_boundary(s, 3), 3);
    }

    #[test]
    fn test_ceil_char_boundary_multibyte() {
        let s = "på";
        assert_eq!(ceil_char_boundary(s, 2), 3);
        assert_eq!(ceil_char_boundary(s, 1), 1);
        assert_eq!(ceil_char_boundary(s, 0), 0);
    }

    #[test]
    fn test_boundary_emoji() {
        let s = "a🎉b"; // emoji occupies bytes 1..5
        for i in 2..5 {
            assert_eq!(floor_char_boundary(s, i), 1);
            assert_eq!(ceil_char_boundary(s, i), 5);
        }
    }

    #[test]
    fn test_char_byte_round_trip() {
        let s = "Hei 你好 🎉";
        for (char_idx, (byte_idx, _)) in s.char_indices().enumerate() {
            assert_eq!(char_to_byte_index(s, char_idx), byte_idx);
            assert_eq!(byte_to_char_index(s, byte_idx), char_idx);
        }
        assert_eq!(char_to_byte_index(s, s.chars().count()), s.len());
        assert_eq!(byte_to_char_index(s, s.len()), s.chars().count());
    }

    #[test]
    fn test_char_to_byte_clamps() {
        assert_eq!(char_to_byte_index("ab", 10), 2);
        assert_eq!(byte_to_char_index("ab", 10), 2);
    }

    #[test]
    fn test_byte_to_char_mid_character() {
        let s = "你好"; // each char is 3 bytes
        assert_eq!(byte_to_char_index(s, 1), 0);
        assert_eq!(byte_to_char_index(s, 4), 1);
    }
}
