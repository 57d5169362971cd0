//! Name attribute extraction
//!
//! Walks a raw channel or group name, hashes each run of ordinary characters,
//! classifies the runs against the lookup tables in priority order, and
//! produces both a cleaned display name and a populated attribute record.
//! Recognized country, VIP/timeshift/type and resolution tokens are swallowed
//! out of the visible name; everything else is kept and
//! capitalization-normalized.
//!
//! Parenthesized and bracketed phrases get classified whole before falling
//! back to ordinary tokenization: the exporter appends `(Country)` and
//! `[Resolution]` decorations, and a re-imported playlist must fold them back
//! into the same attributes instead of growing a second set.

use crate::charmap::{name_word, Bracket, NameWord};
use crate::hash::{fold, name_hash, name_hash_bytes, TokenHash, EMPTY};
use crate::model::{AttributeRecord, Country, Genre, Language, Resolution};
use crate::tables::{self, Flag};

/// Display name used when a raw name contains nothing but separators.
pub const PLACEHOLDER_NAME: &str = "(unnamed)";

/// Result of extracting one raw name.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Cleaned, decorated display name
    pub name: String,
    pub record: AttributeRecord,
}

/// Extract semantic attributes from a raw name.
pub fn extract(raw: &str) -> Extraction {
    let mut record = AttributeRecord::default();
    let mut builder = NameBuilder::default();

    scan(raw.as_bytes(), &mut record, &mut builder);

    // an affiliate is a stronger language signal than country
    if record.affiliate.is_set() {
        record.language = record.affiliate.language();
    }

    let mut cleaned = builder.finish();
    if cleaned.is_empty() {
        cleaned = PLACEHOLDER_NAME.to_string();
    }

    record.identity_hash = identity_hash(&cleaned, record.is_plus1);

    let mut name = cleaned;
    if record.country.is_set() {
        name.push_str(" (");
        name.push_str(record.country.display_name());
        name.push(')');
    }
    if record.resolution.is_set() {
        name.push_str(" [");
        name.push_str(record.resolution.badge());
        name.push(']');
    }
    record.display_name = name.clone();

    Extraction { name, record }
}

/// Deduplication fingerprint for a cleaned, undecorated name.
///
/// A timeshift channel swallows its `+1` token from the display name but
/// folds it back in here, so "BBC One +1" never merges with "BBC One".
pub fn identity_hash(cleaned: &str, is_plus1: bool) -> TokenHash {
    let mut hash = name_hash(cleaned);
    if is_plus1 {
        hash = fold(hash, b'+');
        hash = fold(hash, b'1');
    }
    hash
}

/// Tokenize a byte range into runs and classify each one.
fn scan(bytes: &[u8], record: &mut AttributeRecord, builder: &mut NameBuilder) {
    let mut run_hash = EMPTY;
    let mut run_raw: Vec<u8> = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        match name_word(bytes[i]) {
            NameWord::Ordinary(folded) => {
                run_hash = fold(run_hash, folded);
                run_raw.push(bytes[i]);
                i += 1;
            }
            NameWord::Separator | NameWord::Close(_) => {
                close_run(&mut run_hash, &mut run_raw, record, builder);
                i += 1;
            }
            NameWord::Open(kind) => {
                close_run(&mut run_hash, &mut run_raw, record, builder);
                match find_close(bytes, i + 1, kind) {
                    Some(end) => {
                        let inner = &bytes[i + 1..end];
                        if !classify_phrase(inner, kind, record) {
                            scan(inner, record, builder);
                        }
                        i = end + 1;
                    }
                    None => {
                        // unbalanced; treat the opener as a separator
                        i += 1;
                    }
                }
            }
        }
    }
    close_run(&mut run_hash, &mut run_raw, record, builder);
}

fn find_close(bytes: &[u8], from: usize, kind: Bracket) -> Option<usize> {
    (from..bytes.len()).find(|&i| name_word(bytes[i]) == NameWord::Close(kind))
}

/// Classify a whole bracketed phrase against its decoration table.
/// Returns true when the phrase was consumed (swallowed).
fn classify_phrase(inner: &[u8], kind: Bracket, record: &mut AttributeRecord) -> bool {
    let hash = name_hash_bytes(inner);
    if hash == EMPTY {
        return true;
    }
    match kind {
        Bracket::Paren => {
            if let Some(country) = tables::country(hash) {
                apply_country(record, country);
                return true;
            }
        }
        Bracket::Square => {
            if let Some(resolution) = tables::resolution(hash) {
                apply_resolution(record, resolution);
                return true;
            }
        }
    }
    false
}

fn close_run(
    run_hash: &mut TokenHash,
    run_raw: &mut Vec<u8>,
    record: &mut AttributeRecord,
    builder: &mut NameBuilder,
) {
    if !run_raw.is_empty() {
        classify_run(*run_hash, run_raw, record, builder);
    }
    *run_hash = EMPTY;
    run_raw.clear();
}

/// Table cascade for one run, in priority order. A run that matches the
/// country table, the VIP/timeshift/type flags or the resolution table is
/// swallowed; every other run is kept in the display name.
fn classify_run(
    hash: TokenHash,
    raw: &[u8],
    record: &mut AttributeRecord,
    builder: &mut NameBuilder,
) {
    if let Some(country) = tables::country(hash) {
        apply_country(record, country);
        return;
    }

    if let Some(flag) = tables::flag(hash) {
        match flag {
            Flag::Vip => {
                record.is_vip = true;
                return;
            }
            Flag::Plus1 => {
                record.is_plus1 = true;
                return;
            }
            Flag::Live => {
                record.is_live = true;
                return;
            }
            Flag::PayPerView => {
                record.genre = Genre::PayPerView;
                return;
            }
            Flag::VideoOnDemand => {
                record.genre = Genre::VideoOnDemand;
                return;
            }
            Flag::AllDay => {
                record.genre = Genre::AllDay;
                return;
            }
            Flag::FrenchCanadian => {
                record.language = Language::French;
                if !record.country.is_set() {
                    record.country = Country::Canada;
                }
            }
            Flag::Latino => {
                record.language = Language::Spanish;
            }
        }
        // French-Canadian and Latino markers stay visible
        builder.push(raw, hash);
        return;
    }

    if let Some(resolution) = tables::resolution(hash) {
        apply_resolution(record, resolution);
        return;
    }

    // callsigns only mean anything for North American feeds
    if matches!(record.country, Country::UnitedStates | Country::Canada) {
        if let Some(station) = tables::station(hash) {
            record.country = Country::UnitedStates;
            record.genre = Genre::Local;
            record.affiliate = station.affiliate;
            record.station = Some(*station);
            builder.push_canonical(station.callsign);
            return;
        }
    }

    if tables::is_city(hash) {
        if !record.genre.is_set() {
            record.genre = Genre::Local;
        }
        builder.push(raw, hash);
        return;
    }

    if let Some(genre) = tables::genre(hash) {
        if !record.genre.is_set() {
            record.genre = genre;
        } else if record.genre == Genre::Sports && genre != Genre::Sports {
            // "Sports & Entertainment" style names: the later, more
            // specific token wins over a bare Sports classification
            log::debug!(
                "genre {:?} replaces Sports for run {:?}",
                genre,
                String::from_utf8_lossy(raw)
            );
            record.genre = genre;
        }
        builder.push(raw, hash);
        return;
    }

    builder.push(raw, hash);
}

fn apply_country(record: &mut AttributeRecord, country: Country) {
    if !record.country.is_set() {
        record.country = country;
        if !record.language.is_set() {
            record.language = country.language();
        }
    } else if record.country == Country::France && country == Country::Canada {
        // French-Canadian content convention
        record.country = Country::Canada;
        record.language = Language::French;
    } else if record.country == Country::Canada && country == Country::France {
        record.language = Language::French;
    } else if record.country != country {
        log::debug!(
            "ignoring second country token {:?} (already {:?})",
            country,
            record.country
        );
    }
}

fn apply_resolution(record: &mut AttributeRecord, resolution: Resolution) {
    if !record.resolution.is_set() {
        record.resolution = resolution;
    }
}

/// Accumulates kept runs and applies capitalization normalization.
#[derive(Default)]
struct NameBuilder {
    parts: Vec<String>,
    long_seen: bool,
}

impl NameBuilder {
    /// Keep a run, consulting the capitalization-exception table first.
    /// Title-casing stops once a word with more than three letters has been
    /// kept, so connective words after the first significant word stay as
    /// they arrived.
    fn push(&mut self, raw: &[u8], hash: TokenHash) {
        let text = String::from_utf8_lossy(raw);
        let normalized = if let Some(canonical) = tables::canonical_caps(hash) {
            canonical.to_string()
        } else if !self.long_seen {
            title_case(&text)
        } else {
            text.into_owned()
        };
        self.note_length(&normalized);
        self.parts.push(normalized);
    }

    /// Keep a run whose canonical spelling is already known (callsigns).
    fn push_canonical(&mut self, text: &str) {
        self.note_length(text);
        self.parts.push(text.to_string());
    }

    fn note_length(&mut self, text: &str) {
        let alpha = text.bytes().filter(|b| b.is_ascii_alphabetic()).count();
        if alpha > 3 {
            self.long_seen = true;
        }
    }

    fn finish(self) -> String {
        self.parts.join(" ")
    }
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, ch) in text.chars().enumerate() {
        if i == 0 {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch.to_ascii_lowercase());
        }
    }
    out
}
