//! Channel export policy
//!
//! Evaluated once per unique channel after the whole playlist has been
//! folded into the registry. The policy is fixed: English-language channels
//! from the allowed countries, minus timeshift/live/event feeds and the
//! permanently excluded genres, with a market gate on local stations and a
//! floor on the best available resolution.

use crate::model::{Channel, Country, Genre, Language, Market, Resolution};

/// Inclusion policy applied at export time.
#[derive(Debug, Clone)]
pub struct ExportPolicy {
    pub allowed_countries: Vec<Country>,
    pub excluded_genres: Vec<Genre>,
    pub language: Language,
    pub target_market: Market,
    pub resolution_floor: Resolution,
}

impl Default for ExportPolicy {
    fn default() -> Self {
        Self {
            allowed_countries: vec![
                Country::Canada,
                Country::UnitedKingdom,
                Country::UnitedStates,
            ],
            excluded_genres: vec![
                Genre::Adult,
                Genre::Civic,
                Genre::Religious,
                Genre::Shopping,
                Genre::Sports,
                Genre::PayPerView,
                Genre::AllDay,
                Genre::VideoOnDemand,
            ],
            language: Language::English,
            target_market: Market::SfBayArea,
            resolution_floor: Resolution::Sd,
        }
    }
}

impl ExportPolicy {
    /// Decide whether a channel survives into the output playlist.
    pub fn is_enabled(&self, channel: &Channel) -> bool {
        let attrs = &channel.attrs;
        let name = attrs.display_name.as_str();

        if attrs.language != self.language {
            log::debug!("excluded (language {:?}): {}", attrs.language, name);
            return false;
        }
        if attrs.is_plus1 {
            log::debug!("excluded (timeshift): {}", name);
            return false;
        }
        if !self.allowed_countries.contains(&attrs.country) {
            log::debug!("excluded (country {:?}): {}", attrs.country, name);
            return false;
        }
        if attrs.is_live {
            log::debug!("excluded (live event feed): {}", name);
            return false;
        }
        if self.excluded_genres.contains(&attrs.genre) {
            log::debug!("excluded (genre {:?}): {}", attrs.genre, name);
            return false;
        }
        if attrs.genre == Genre::Local {
            if let Some(station) = attrs.station {
                if station.market != self.target_market {
                    log::debug!("excluded (market {:?}): {}", station.market, name);
                    return false;
                }
            } else if attrs.country == Country::UnitedKingdom {
                log::debug!("excluded (regional UK): {}", name);
                return false;
            }
        }

        let best = channel
            .best_stream()
            .map(|s| s.resolution)
            .unwrap_or(attrs.resolution);
        if best.is_set() && best < self.resolution_floor {
            log::debug!("excluded (resolution {:?}): {}", best, name);
            return false;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttributeRecord, Stream};
    use crate::registry::Registry;

    fn channel(attrs: AttributeRecord) -> Channel {
        Channel {
            attrs,
            tvg_id: String::new(),
            tvg_logo: String::new(),
            group: None,
            streams: vec![Stream {
                url: "http://h/1.ts".into(),
                resolution: Resolution::Hd,
                is_vip: false,
                is_file: false,
            }],
        }
    }

    fn english_uk() -> AttributeRecord {
        AttributeRecord {
            country: Country::UnitedKingdom,
            language: Language::English,
            genre: Genre::News,
            ..Default::default()
        }
    }

    #[test]
    fn test_english_uk_news_enabled() {
        let policy = ExportPolicy::default();
        assert!(policy.is_enabled(&channel(english_uk())));
    }

    #[test]
    fn test_non_english_excluded() {
        let policy = ExportPolicy::default();
        let mut attrs = english_uk();
        attrs.language = Language::French;
        assert!(!policy.is_enabled(&channel(attrs)));

        // unset language is not English either
        let mut unset = english_uk();
        unset.language = Language::Unset;
        assert!(!policy.is_enabled(&channel(unset)));
    }

    #[test]
    fn test_plus1_excluded() {
        let policy = ExportPolicy::default();
        let mut attrs = english_uk();
        attrs.is_plus1 = true;
        assert!(!policy.is_enabled(&channel(attrs)));
    }

    #[test]
    fn test_disallowed_country_excluded() {
        let policy = ExportPolicy::default();
        let mut attrs = english_uk();
        attrs.country = Country::Australia;
        assert!(!policy.is_enabled(&channel(attrs)));
    }

    #[test]
    fn test_live_excluded() {
        let policy = ExportPolicy::default();
        let mut attrs = english_uk();
        attrs.is_live = true;
        assert!(!policy.is_enabled(&channel(attrs)));
    }

    #[test]
    fn test_excluded_genres() {
        let policy = ExportPolicy::default();
        for genre in [Genre::Sports, Genre::Adult, Genre::PayPerView, Genre::AllDay] {
            let mut attrs = english_uk();
            attrs.genre = genre;
            assert!(!policy.is_enabled(&channel(attrs)), "{:?}", genre);
        }
    }

    #[test]
    fn test_local_uk_excluded() {
        let policy = ExportPolicy::default();
        let mut attrs = english_uk();
        attrs.genre = Genre::Local;
        assert!(!policy.is_enabled(&channel(attrs)));
    }

    #[test]
    fn test_local_station_market_gate() {
        let policy = ExportPolicy::default();

        // in-market station passes
        let mut registry = Registry::new();
        registry.ingest(crate::model::Entry {
            tvg_name: Some("US: KPIX CBS".into()),
            url: "http://h/1.ts".into(),
            ..Default::default()
        });
        assert!(policy.is_enabled(&registry.channels[0]));

        // out-of-market station is dropped
        let mut other = Registry::new();
        other.ingest(crate::model::Entry {
            tvg_name: Some("US: WNBC NBC".into()),
            url: "http://h/2.ts".into(),
            ..Default::default()
        });
        assert!(!policy.is_enabled(&other.channels[0]));
    }

    #[test]
    fn test_resolution_floor() {
        let policy = ExportPolicy::default();

        // a known resolution below SD is dropped
        let mut attrs = english_uk();
        attrs.resolution = Resolution::Mixed;
        let mut ch = channel(attrs);
        ch.streams[0].resolution = Resolution::Mixed;
        assert!(!policy.is_enabled(&ch));

        // an unknown resolution passes the floor
        let mut unknown = channel(english_uk());
        unknown.streams[0].resolution = Resolution::Unset;
        assert!(policy.is_enabled(&unknown));
    }
}
