// Copyright (c) 2024-2025 The Solar Network Developers

//! Shared helpers

const ASCII_CHAR_MIN: u8 = 0x20;
const ASCII_CHAR_MAX: u8 = 0x7e;

const CR_CHAR: u8 = 0x0d;
const LF_CHAR: u8 = 0x0a;

/// Check that the input contains only printable ASCII.
///
/// With `allow_new_lines` set, LF and CRLF sequences are additionally
/// permitted but a bare CR is rejected; without it every control
/// character (including all line breaks) is rejected.
pub fn check_ascii(text: &[u8], allow_new_lines: bool) -> bool {
    for (idx, &c) in text.iter().enumerate() {
        let is_cr = c == CR_CHAR;
        let is_lf = c == LF_CHAR;
        let is_crlf = is_cr && text.get(idx + 1) == Some(&LF_CHAR);

        // Reject a standalone carriage return even when newlines are allowed
        if allow_new_lines && is_cr && !is_crlf {
            return false;
        }

        if !((allow_new_lines && (is_lf || is_cr)) || (ASCII_CHAR_MIN..=ASCII_CHAR_MAX).contains(&c))
        {
            return false;
        }
    }

    true
}
