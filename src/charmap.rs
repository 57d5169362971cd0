//! Character classification for the two scanning alphabets
//!
//! Raw playlist bytes are mapped into a small "word" alphabet before hashing.
//! The keyword alphabet drives the `#EXTINF` attribute-list parser; the name
//! alphabet drives tokenization of human-readable channel and group names.
//! Both are pure functions with no failure mode: anything unrecognized passes
//! through as an ordinary character.

/// One classified byte in the keyword-syntax alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordWord {
    /// `=` between an attribute key and its value
    Assign,
    /// `"` opening or closing a quoted value
    Quote,
    /// `,` separating the attribute list from the trailing display text
    Comma,
    /// CR or LF
    Eol,
    /// Space or tab between attributes
    Separator,
    /// Anything else, case-folded to lower for hashing
    Ordinary(u8),
}

/// Classify a raw byte for attribute-list scanning.
#[inline]
pub fn keyword_word(byte: u8) -> KeywordWord {
    match byte {
        b'=' => KeywordWord::Assign,
        b'"' => KeywordWord::Quote,
        b',' => KeywordWord::Comma,
        b'\n' | b'\r' => KeywordWord::Eol,
        b' ' | b'\t' => KeywordWord::Separator,
        b'A'..=b'Z' => KeywordWord::Ordinary(byte + 32),
        other => KeywordWord::Ordinary(other),
    }
}

/// Paired punctuation recognized by the name alphabet.
///
/// Parentheses carry the country decoration and square brackets the
/// resolution decoration, so the extractor needs to see them as distinct
/// open/close events rather than plain separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    Paren,
    Square,
}

/// One classified byte in the name-syntax alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameWord {
    /// Word boundary; consecutive separators collapse into one
    Separator,
    Open(Bracket),
    Close(Bracket),
    /// Run character. The hash value is case-folded to upper; the raw byte
    /// is preserved separately for display.
    Ordinary(u8),
}

/// Classify a raw byte for name tokenization.
///
/// `+`, `/` and `&` are deliberately ordinary so tokens like `+1` and `24/7`
/// survive as single runs. Bytes outside ASCII pass through untouched.
#[inline]
pub fn name_word(byte: u8) -> NameWord {
    match byte {
        b'(' => NameWord::Open(Bracket::Paren),
        b')' => NameWord::Close(Bracket::Paren),
        b'[' => NameWord::Open(Bracket::Square),
        b']' => NameWord::Close(Bracket::Square),
        b' ' | b'\t' | b'|' | b'-' | b':' | b';' | b'_' | b',' | b'.' | b'"' | b'!' | b'?'
        | b'*' | b'#' | b'~' | b'=' | b'{' | b'}' | b'<' | b'>' => NameWord::Separator,
        b'a'..=b'z' => NameWord::Ordinary(byte - 32),
        other => NameWord::Ordinary(other),
    }
}

/// The folded hash character for a byte, or `None` at a word boundary.
#[inline]
pub fn name_fold(byte: u8) -> Option<u8> {
    match name_word(byte) {
        NameWord::Ordinary(folded) => Some(folded),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_specials() {
        assert_eq!(keyword_word(b'='), KeywordWord::Assign);
        assert_eq!(keyword_word(b'"'), KeywordWord::Quote);
        assert_eq!(keyword_word(b','), KeywordWord::Comma);
        assert_eq!(keyword_word(b'\n'), KeywordWord::Eol);
        assert_eq!(keyword_word(b' '), KeywordWord::Separator);
    }

    #[test]
    fn test_keyword_case_fold() {
        assert_eq!(keyword_word(b'T'), KeywordWord::Ordinary(b't'));
        assert_eq!(keyword_word(b't'), KeywordWord::Ordinary(b't'));
        assert_eq!(keyword_word(b'-'), KeywordWord::Ordinary(b'-'));
    }

    #[test]
    fn test_name_separators() {
        for b in [b' ', b'|', b'-', b':', b'.', b','] {
            assert_eq!(name_word(b), NameWord::Separator);
        }
    }

    #[test]
    fn test_name_brackets() {
        assert_eq!(name_word(b'('), NameWord::Open(Bracket::Paren));
        assert_eq!(name_word(b')'), NameWord::Close(Bracket::Paren));
        assert_eq!(name_word(b'['), NameWord::Open(Bracket::Square));
        assert_eq!(name_word(b']'), NameWord::Close(Bracket::Square));
    }

    #[test]
    fn test_name_ordinary_tokens_survive() {
        // "+1" and "24/7" must tokenize as single runs
        assert_eq!(name_word(b'+'), NameWord::Ordinary(b'+'));
        assert_eq!(name_word(b'/'), NameWord::Ordinary(b'/'));
        assert_eq!(name_word(b'&'), NameWord::Ordinary(b'&'));
        assert_eq!(name_word(b'7'), NameWord::Ordinary(b'7'));
    }

    #[test]
    fn test_name_case_fold() {
        assert_eq!(name_word(b'b'), NameWord::Ordinary(b'B'));
        assert_eq!(name_word(b'B'), NameWord::Ordinary(b'B'));
    }

    #[test]
    fn test_high_bytes_pass_through() {
        assert_eq!(name_word(0xC3), NameWord::Ordinary(0xC3));
        assert_eq!(keyword_word(0xC3), KeywordWord::Ordinary(0xC3));
    }
}
