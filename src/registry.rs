//! Group/channel registry: deduplication, stream ordering, inheritance
//!
//! The registry owns every group and channel produced from a playlist and is
//! passed explicitly into the driver; there is no global state. Entities
//! are stored in insertion order (export order) with a hash-keyed index per
//! kind; the dedup key is the identity hash of the cleaned, undecorated name
//! plus the resolved country as a separate field.

use hashbrown::HashMap;

use crate::extract::extract;
use crate::hash::TokenHash;
use crate::model::{AttributeRecord, Channel, Country, Entry, Group, Stream};
use crate::tables::{url_kind, UrlKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct EntityKey {
    hash: TokenHash,
    country: Country,
}

impl EntityKey {
    fn of(record: &AttributeRecord) -> Self {
        Self {
            hash: record.identity_hash,
            country: record.country,
        }
    }
}

type Index = HashMap<EntityKey, usize, ahash::RandomState>;

/// Process-scoped owner of all groups and channels for one playlist run.
#[derive(Default)]
pub struct Registry {
    pub groups: Vec<Group>,
    pub channels: Vec<Channel>,
    group_index: Index,
    channel_index: Index,
    /// Entries that merged into an existing channel instead of creating one
    pub merged: u64,
    /// Entries dropped for having no usable name
    pub skipped: u64,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total streams across all channels.
    pub fn stream_count(&self) -> u64 {
        self.channels.iter().map(|c| c.streams.len() as u64).sum()
    }

    /// Fold one parsed entry into the registry.
    pub fn ingest(&mut self, entry: Entry) {
        let group_idx = entry
            .group_title
            .as_deref()
            .map(|title| self.intern_group(title));

        let Some(name) = entry.tvg_name.as_deref() else {
            log::warn!("entry without tvg-name skipped (url: {})", entry.url);
            self.skipped += 1;
            return;
        };

        let candidate = extract(name).record;
        let key = EntityKey::of(&candidate);

        let idx = match self.channel_index.get(&key) {
            Some(&idx) => {
                self.merged += 1;
                idx
            }
            None => {
                let idx = self.channels.len();
                self.channels.push(Channel {
                    attrs: candidate.clone(),
                    tvg_id: entry.tvg_id.unwrap_or_default(),
                    tvg_logo: entry.tvg_logo.unwrap_or_default(),
                    group: group_idx,
                    streams: Vec::new(),
                });
                self.channel_index.insert(key, idx);
                idx
            }
        };

        let kind = url_kind(&entry.url);
        if kind == UrlKind::Unknown {
            log::debug!("unrecognized stream extension: {}", entry.url);
        }
        let stream = Stream {
            url: entry.url,
            resolution: candidate.resolution,
            is_vip: candidate.is_vip,
            is_file: kind == UrlKind::File,
        };

        let group_attrs = group_idx.map(|g| self.groups[g].attrs.clone());
        let channel = &mut self.channels[idx];

        // keep the stream list in descending resolution order; equal
        // resolutions keep arrival order
        let at = channel
            .streams
            .iter()
            .position(|s| s.resolution < stream.resolution)
            .unwrap_or(channel.streams.len());
        if stream.resolution > channel.attrs.resolution {
            channel.attrs.resolution = stream.resolution;
        }
        channel.streams.insert(at, stream);

        if channel.group.is_none() {
            channel.group = group_idx;
        }

        if let Some(group_attrs) = group_attrs {
            inherit(&mut channel.attrs, &group_attrs);
        }
    }

    /// Extract and deduplicate a group title, returning the surviving
    /// group's index.
    fn intern_group(&mut self, title: &str) -> usize {
        let record = extract(title).record;
        let key = EntityKey::of(&record);
        match self.group_index.get(&key) {
            Some(&idx) => idx,
            None => {
                let idx = self.groups.len();
                self.groups.push(Group { attrs: record });
                self.group_index.insert(key, idx);
                idx
            }
        }
    }
}

/// Copy unset channel attributes down from the owning group. VIP is a
/// logical OR and is never downgraded.
fn inherit(channel: &mut AttributeRecord, group: &AttributeRecord) {
    if !channel.country.is_set() && group.country.is_set() {
        channel.country = group.country;
    }
    if !channel.language.is_set() && group.language.is_set() {
        channel.language = group.language;
    }
    if !channel.genre.is_set() && group.genre.is_set() {
        channel.genre = group.genre;
    }
    if !channel.affiliate.is_set() && group.affiliate.is_set() {
        channel.affiliate = group.affiliate;
    }
    if !channel.resolution.is_set() && group.resolution.is_set() {
        channel.resolution = group.resolution;
    }
    channel.is_vip = channel.is_vip || group.is_vip;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Genre, Language, Resolution};

    fn entry(name: &str, group: Option<&str>, url: &str) -> Entry {
        Entry {
            tvg_id: Some("id".into()),
            tvg_name: Some(name.into()),
            tvg_logo: None,
            group_title: group.map(Into::into),
            trailing: String::new(),
            url: url.into(),
        }
    }

    #[test]
    fn test_same_name_same_country_merges() {
        let mut registry = Registry::new();
        registry.ingest(entry("UK: BBC One", None, "http://h/1.ts"));
        registry.ingest(entry("UK: BBC One", None, "http://h/2.ts"));
        assert_eq!(registry.channels.len(), 1);
        assert_eq!(registry.channels[0].streams.len(), 2);
        assert_eq!(registry.merged, 1);
    }

    #[test]
    fn test_same_name_different_country_stays_separate() {
        let mut registry = Registry::new();
        registry.ingest(entry("UK: BBC One", None, "http://h/1.ts"));
        registry.ingest(entry("CA: BBC One", None, "http://h/2.ts"));
        assert_eq!(registry.channels.len(), 2);
    }

    #[test]
    fn test_plus1_does_not_merge_with_base() {
        let mut registry = Registry::new();
        registry.ingest(entry("UK: Channel 4", None, "http://h/1.ts"));
        registry.ingest(entry("UK: Channel 4 +1", None, "http://h/2.ts"));
        assert_eq!(registry.channels.len(), 2);
    }

    #[test]
    fn test_stream_ordering_descending() {
        let mut registry = Registry::new();
        registry.ingest(entry("BBC One SD", None, "http://h/sd.ts"));
        registry.ingest(entry("BBC One FHD", None, "http://h/fhd.ts"));
        registry.ingest(entry("BBC One HD", None, "http://h/hd.ts"));
        assert_eq!(registry.channels.len(), 1);
        let resolutions: Vec<_> = registry.channels[0]
            .streams
            .iter()
            .map(|s| s.resolution)
            .collect();
        assert_eq!(
            resolutions,
            vec![Resolution::Fhd, Resolution::Hd, Resolution::Sd]
        );
        // channel resolution raised to the best stream
        assert_eq!(registry.channels[0].attrs.resolution, Resolution::Fhd);
        // display name comes from the first entry seen
        assert_eq!(registry.channels[0].attrs.display_name, "BBC One [SD]");
    }

    #[test]
    fn test_group_shared_across_channels() {
        let mut registry = Registry::new();
        registry.ingest(entry("A", Some("UK | News"), "http://h/1.ts"));
        registry.ingest(entry("B", Some("UK | News"), "http://h/2.ts"));
        assert_eq!(registry.groups.len(), 1);
        assert_eq!(registry.channels[0].group, Some(0));
        assert_eq!(registry.channels[1].group, Some(0));
    }

    #[test]
    fn test_inheritance_fills_unset_fields() {
        let mut registry = Registry::new();
        registry.ingest(entry("Morning Show", Some("UK | News"), "http://h/1.ts"));
        let channel = &registry.channels[0];
        assert_eq!(channel.attrs.country, Country::UnitedKingdom);
        assert_eq!(channel.attrs.language, Language::English);
        assert_eq!(channel.attrs.genre, Genre::News);
    }

    #[test]
    fn test_inheritance_never_overwrites() {
        let mut registry = Registry::new();
        registry.ingest(entry("FR: Le Matin", Some("UK | News"), "http://h/1.ts"));
        let channel = &registry.channels[0];
        assert_eq!(channel.attrs.country, Country::France);
        assert_eq!(channel.attrs.language, Language::French);
        // genre was unset on the channel, so it still copies down
        assert_eq!(channel.attrs.genre, Genre::News);
    }

    #[test]
    fn test_vip_inherited_as_or() {
        let mut registry = Registry::new();
        registry.ingest(entry("Film Channel", Some("VIP Movies"), "http://h/1.ts"));
        assert!(registry.channels[0].attrs.is_vip);
    }

    #[test]
    fn test_file_url_flagged() {
        let mut registry = Registry::new();
        registry.ingest(entry("Some Film", None, "http://h/film.mp4"));
        assert!(registry.channels[0].streams[0].is_file);
    }

    #[test]
    fn test_entry_without_name_skipped() {
        let mut registry = Registry::new();
        let mut e = entry("x", None, "http://h/1.ts");
        e.tvg_name = None;
        registry.ingest(e);
        assert!(registry.channels.is_empty());
        assert_eq!(registry.skipped, 1);
    }
}
