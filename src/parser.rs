//! M3U playlist parsing
//!
//! A small state machine over the raw mapped bytes. Only lines that open with
//! the literal `#EXTINF:-1 ` tag start an entry; the attribute list is walked
//! with the keyword alphabet, the text after the comma is the trailing
//! display string, and the next line is the stream URL. Malformed entries are
//! logged and skipped; a bad line never aborts the file.

use bstr::ByteSlice;
use memchr::memchr;
use once_cell::sync::Lazy;

use crate::charmap::{keyword_word, KeywordWord};
use crate::hash::{fold, keyword_hash, TokenHash, EMPTY};
use crate::model::Entry;

const EXTINF_TAG: &[u8] = b"#EXTINF:-1 ";

static KEY_TVG_ID: Lazy<TokenHash> = Lazy::new(|| keyword_hash("tvg-id"));
static KEY_TVG_NAME: Lazy<TokenHash> = Lazy::new(|| keyword_hash("tvg-name"));
static KEY_TVG_LOGO: Lazy<TokenHash> = Lazy::new(|| keyword_hash("tvg-logo"));
static KEY_GROUP_TITLE: Lazy<TokenHash> = Lazy::new(|| keyword_hash("group-title"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeySlot {
    TvgId,
    TvgName,
    TvgLogo,
    GroupTitle,
}

fn key_slot(hash: TokenHash) -> Option<KeySlot> {
    if hash == *KEY_TVG_ID {
        Some(KeySlot::TvgId)
    } else if hash == *KEY_TVG_NAME {
        Some(KeySlot::TvgName)
    } else if hash == *KEY_TVG_LOGO {
        Some(KeySlot::TvgLogo)
    } else if hash == *KEY_GROUP_TITLE {
        Some(KeySlot::GroupTitle)
    } else {
        None
    }
}

/// Attribute-list scanning states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ScanningKey,
    AwaitingValue,
    QuotedValue,
    BareValue,
}

/// One-shot parser over a mapped playlist buffer.
pub struct PlaylistParser<'a> {
    buf: &'a [u8],
    pos: usize,
    /// Parse anomalies tolerated so far (unknown keys, malformed quotes,
    /// missing URL lines)
    pub warnings: u64,
}

impl<'a> PlaylistParser<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            warnings: 0,
        }
    }

    /// Parse the whole buffer into raw entries.
    pub fn parse(&mut self) -> Vec<Entry> {
        let mut entries = Vec::new();

        while let Some(line) = self.next_line() {
            if let Some(rest) = line.strip_prefix(EXTINF_TAG) {
                if let Some(mut entry) = self.parse_attributes(rest) {
                    match self.take_url_line() {
                        Some(url) => {
                            entry.url = url;
                            entries.push(entry);
                        }
                        None => {
                            log::warn!("missing URL line after #EXTINF entry, skipped");
                            self.warnings += 1;
                        }
                    }
                }
            } else if !line.is_empty() && !line.starts_with(b"#") {
                log::debug!("stray line skipped: {:?}", line.as_bstr());
            }
        }

        entries
    }

    /// Next line without its EOL bytes, or None at end of buffer.
    fn next_line(&mut self) -> Option<&'a [u8]> {
        if self.pos >= self.buf.len() {
            return None;
        }
        let remaining = &self.buf[self.pos..];
        let (line, advance) = match memchr(b'\n', remaining) {
            Some(nl) => (&remaining[..nl], nl + 1),
            None => (remaining, remaining.len()),
        };
        self.pos += advance;
        Some(line.strip_suffix(b"\r").unwrap_or(line))
    }

    /// Consume the immediately following line as a stream URL.
    ///
    /// A comment or EXTINF line in that position means the previous entry
    /// never got its URL; it is left unconsumed so parsing picks it up.
    fn take_url_line(&mut self) -> Option<String> {
        let mark = self.pos;
        let line = self.next_line()?;
        if line.is_empty() {
            return None;
        }
        if line.starts_with(b"#") {
            self.pos = mark;
            return None;
        }
        Some(line.to_str_lossy().into_owned())
    }

    /// Walk the attribute list of one `#EXTINF` line.
    fn parse_attributes(&mut self, line: &[u8]) -> Option<Entry> {
        let mut entry = Entry::default();
        let mut state = State::ScanningKey;
        let mut key_hash = EMPTY;
        let mut key_raw: Vec<u8> = Vec::new();
        let mut slot: Option<KeySlot> = None;
        let mut value: Vec<u8> = Vec::new();

        let mut i = 0;
        while i < line.len() {
            let byte = line[i];
            let word = keyword_word(byte);

            match state {
                State::ScanningKey => match word {
                    KeywordWord::Assign => {
                        slot = key_slot(key_hash);
                        if slot.is_none() && key_hash != EMPTY {
                            log::warn!(
                                "unknown attribute key {:?}, value ignored",
                                key_raw.as_bstr()
                            );
                            self.warnings += 1;
                        }
                        key_hash = EMPTY;
                        key_raw.clear();
                        state = State::AwaitingValue;
                    }
                    KeywordWord::Comma => {
                        entry.trailing = line[i + 1..].to_str_lossy().into_owned();
                        if !entry.trailing.is_empty() {
                            log::debug!("trailing display text: {:?}", entry.trailing);
                        }
                        return Some(entry);
                    }
                    KeywordWord::Separator => {
                        key_hash = EMPTY;
                        key_raw.clear();
                    }
                    KeywordWord::Ordinary(folded) => {
                        key_hash = fold(key_hash, folded);
                        key_raw.push(byte);
                    }
                    KeywordWord::Quote | KeywordWord::Eol => {
                        log::warn!("malformed attribute list, entry skipped");
                        self.warnings += 1;
                        return None;
                    }
                },
                State::AwaitingValue => match word {
                    KeywordWord::Quote => {
                        value.clear();
                        state = State::QuotedValue;
                    }
                    KeywordWord::Separator => {
                        assign(&mut entry, slot.take(), Vec::new());
                        state = State::ScanningKey;
                    }
                    KeywordWord::Comma => {
                        entry.trailing = line[i + 1..].to_str_lossy().into_owned();
                        return Some(entry);
                    }
                    _ => {
                        value.clear();
                        value.push(byte);
                        state = State::BareValue;
                    }
                },
                State::QuotedValue => match word {
                    KeywordWord::Quote => {
                        assign(&mut entry, slot.take(), std::mem::take(&mut value));
                        state = State::ScanningKey;
                    }
                    _ => {
                        // backslash-escaped quote inside the value
                        if byte == b'\\' && line.get(i + 1) == Some(&b'"') {
                            value.push(b'"');
                            i += 1;
                        } else {
                            value.push(byte);
                        }
                    }
                },
                State::BareValue => match word {
                    KeywordWord::Separator => {
                        assign(&mut entry, slot.take(), std::mem::take(&mut value));
                        state = State::ScanningKey;
                    }
                    KeywordWord::Comma => {
                        assign(&mut entry, slot.take(), std::mem::take(&mut value));
                        entry.trailing = line[i + 1..].to_str_lossy().into_owned();
                        return Some(entry);
                    }
                    _ => value.push(byte),
                },
            }
            i += 1;
        }

        match state {
            State::QuotedValue => {
                log::warn!("unterminated quoted value, entry skipped");
                self.warnings += 1;
                None
            }
            State::BareValue => {
                assign(&mut entry, slot.take(), value);
                Some(entry)
            }
            _ => Some(entry),
        }
    }
}

fn assign(entry: &mut Entry, slot: Option<KeySlot>, raw: Vec<u8>) {
    let Some(slot) = slot else { return };
    let text = raw.to_str_lossy().into_owned();
    match slot {
        KeySlot::TvgId => entry.tvg_id = Some(text),
        KeySlot::TvgName => entry.tvg_name = Some(normalize_plus1(text)),
        KeySlot::TvgLogo => entry.tvg_logo = Some(text),
        KeySlot::GroupTitle => entry.group_title = Some(text),
    }
}

/// Some source feeds run the timeshift suffix straight against the channel
/// name ("Channel+1"); give it the space the extractor expects.
fn normalize_plus1(name: String) -> String {
    if let Some(stem) = name.strip_suffix("+1") {
        if !stem.is_empty() && !stem.ends_with(' ') && !stem.ends_with('+') {
            return format!("{} +1", stem);
        }
    }
    name
}
