use umber_shared::byte_stream::{CHAR_LF, CHAR_SPACE, CHAR_TAB};

/// Named code points the tokenizer refers to by role rather than by value
pub struct UnicodeChar;

impl UnicodeChar {
    pub const NULL: char = '\u{0000}';
    pub const BACKSPACE: char = '\u{0008}';
    pub const LINE_TABULATION: char = '\u{000B}';
    pub const SHIFT_OUT: char = '\u{000E}';
    pub const INFORMATION_SEPARATOR_ONE: char = '\u{001F}';
    pub const LOW_LINE: char = '\u{005F}';
    pub const DELETE: char = '\u{007F}';
    pub const CONTROL: char = '\u{0080}';
    pub const REPLACEMENT_CHARACTER: char = '\u{FFFD}';
    pub const MAX_ALLOWED: char = '\u{10FFFF}';
}

/// [newline](https://www.w3.org/TR/css-syntax-3/#newline)
///
/// CR and FF have already been folded into LF during preprocessing.
pub fn is_newline(c: char) -> bool {
    c == CHAR_LF
}

/// [whitespace](https://www.w3.org/TR/css-syntax-3/#whitespace)
pub fn is_whitespace(c: char) -> bool {
    is_newline(c) || c == CHAR_TAB || c == CHAR_SPACE
}

/// [digit](https://www.w3.org/TR/css-syntax-3/#digit)
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// [hex digit](https://www.w3.org/TR/css-syntax-3/#hex-digit)
pub fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

/// [uppercase letter](https://www.w3.org/TR/css-syntax-3/#uppercase-letter)
pub fn is_uppercase_letter(c: char) -> bool {
    c.is_ascii_uppercase()
}

/// [lowercase letter](https://www.w3.org/TR/css-syntax-3/#lowercase-letter)
pub fn is_lowercase_letter(c: char) -> bool {
    c.is_ascii_lowercase()
}

/// [letter](https://www.w3.org/TR/css-syntax-3/#letter)
pub fn is_letter(c: char) -> bool {
    is_uppercase_letter(c) || is_lowercase_letter(c)
}

/// [non-ASCII code point](https://www.w3.org/TR/css-syntax-3/#non-ascii-code-point)
pub fn is_non_ascii(c: char) -> bool {
    c >= UnicodeChar::CONTROL
}

/// [ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
pub fn is_ident_start(c: char) -> bool {
    is_letter(c) || is_non_ascii(c) || c == UnicodeChar::LOW_LINE
}

/// [ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
pub fn is_ident(c: char) -> bool {
    is_ident_start(c) || is_digit(c) || c == '-'
}

/// [non-printable code point](https://www.w3.org/TR/css-syntax-3/#non-printable-code-point)
pub fn is_non_printable(c: char) -> bool {
    (c >= UnicodeChar::NULL && c <= UnicodeChar::BACKSPACE)
        || c == UnicodeChar::LINE_TABULATION
        || (c >= UnicodeChar::SHIFT_OUT && c <= UnicodeChar::INFORMATION_SEPARATOR_ONE)
        || c == UnicodeChar::DELETE
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn whitespace_excludes_folded_code_points() {
        assert!(is_whitespace('\n'));
        assert!(is_whitespace('\t'));
        assert!(is_whitespace(' '));
        // CR and FF never survive preprocessing and are not whitespace here
        assert!(!is_whitespace('\r'));
        assert!(!is_whitespace('\u{000C}'));
    }

    #[test]
    fn hex_digits() {
        for c in ['0', '9', 'a', 'f', 'A', 'F'] {
            assert!(is_hex_digit(c));
        }
        for c in ['g', 'G', ' ', '-'] {
            assert!(!is_hex_digit(c));
        }
    }

    #[test]
    fn ident_code_points() {
        assert!(is_ident_start('a'));
        assert!(is_ident_start('Z'));
        assert!(is_ident_start('_'));
        assert!(is_ident_start('é'));
        assert!(is_ident_start('\u{0080}'));
        assert!(!is_ident_start('\u{007F}'));
        assert!(!is_ident_start('-'));
        assert!(!is_ident_start('0'));

        assert!(is_ident('-'));
        assert!(is_ident('0'));
        assert!(is_ident('a'));
        assert!(!is_ident(' '));
        assert!(!is_ident('('));
    }

    #[test]
    fn non_printable_ranges() {
        assert!(is_non_printable('\u{0000}'));
        assert!(is_non_printable('\u{0008}'));
        assert!(is_non_printable('\u{000B}'));
        assert!(is_non_printable('\u{000E}'));
        assert!(is_non_printable('\u{001F}'));
        assert!(is_non_printable('\u{007F}'));

        assert!(!is_non_printable('\t'));
        assert!(!is_non_printable('\n'));
        assert!(!is_non_printable(' '));
        assert!(!is_non_printable('\u{0080}'));
    }
}
