//! Token classification tables
//!
//! Each table maps a token fingerprint to a category value. The tables are
//! built once on first use by hashing a static spelling list with the name
//! hasher, so a spelling matches whether it arrives as a bare run or as a
//! parenthesized phrase. Country display names are listed alongside their
//! short codes: the exporter appends them as decorations, and a re-imported
//! playlist has to classify them back to the same country.
//!
//! Curation note: spellings that collide with the resolution tokens or with
//! very common English words are left out ("SD" the country, "IN", "IT").
//! Residual collisions between rare spellings are accepted.

use hashbrown::HashMap;
use once_cell::sync::Lazy;

use crate::hash::{name_hash, TokenHash};
use crate::model::{Affiliate, Country, Genre, Market, Resolution, Station};

type Table<T> = HashMap<TokenHash, T, ahash::RandomState>;

fn build<T: Copy>(spellings: &[(&str, T)]) -> Table<T> {
    spellings
        .iter()
        .map(|&(spelling, value)| (name_hash(spelling), value))
        .collect()
}

/// Boolean/type markers recognized inside names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Vip,
    Plus1,
    Live,
    PayPerView,
    VideoOnDemand,
    AllDay,
    FrenchCanadian,
    Latino,
}

static COUNTRY_SPELLINGS: &[(&str, Country)] = &[
    ("US", Country::UnitedStates),
    ("USA", Country::UnitedStates),
    ("United States", Country::UnitedStates),
    ("UK", Country::UnitedKingdom),
    ("GB", Country::UnitedKingdom),
    ("United Kingdom", Country::UnitedKingdom),
    ("CA", Country::Canada),
    ("CAN", Country::Canada),
    ("Canada", Country::Canada),
    ("IE", Country::Ireland),
    ("Ireland", Country::Ireland),
    ("AU", Country::Australia),
    ("AUS", Country::Australia),
    ("Australia", Country::Australia),
    ("NZ", Country::NewZealand),
    ("New Zealand", Country::NewZealand),
    ("FR", Country::France),
    ("France", Country::France),
    ("DE", Country::Germany),
    ("GER", Country::Germany),
    ("Germany", Country::Germany),
    ("ES", Country::Spain),
    ("Spain", Country::Spain),
    ("Italy", Country::Italy),
    ("PT", Country::Portugal),
    ("Portugal", Country::Portugal),
    ("NL", Country::Netherlands),
    ("Netherlands", Country::Netherlands),
    ("PL", Country::Poland),
    ("Poland", Country::Poland),
    ("TR", Country::Turkey),
    ("Turkey", Country::Turkey),
    ("MX", Country::Mexico),
    ("Mexico", Country::Mexico),
    ("BR", Country::Brazil),
    ("Brazil", Country::Brazil),
    ("India", Country::India),
    ("PK", Country::Pakistan),
    ("Pakistan", Country::Pakistan),
];

static RESOLUTION_SPELLINGS: &[(&str, Resolution)] = &[
    ("SD", Resolution::Sd),
    ("LQ", Resolution::Sd),
    ("480p", Resolution::Sd),
    ("HD", Resolution::Hd),
    ("720p", Resolution::Hd),
    ("FHD", Resolution::Fhd),
    ("FullHD", Resolution::Fhd),
    ("1080p", Resolution::Fhd),
    ("1080", Resolution::Fhd),
    ("UHD", Resolution::Uhd),
    ("4K", Resolution::Uhd),
    ("2160p", Resolution::Uhd),
    ("Mix", Resolution::Mixed),
    ("Mixed", Resolution::Mixed),
];

static GENRE_SPELLINGS: &[(&str, Genre)] = &[
    ("News", Genre::News),
    ("Sport", Genre::Sports),
    ("Sports", Genre::Sports),
    ("Movie", Genre::Movies),
    ("Movies", Genre::Movies),
    ("Cinema", Genre::Movies),
    ("Kids", Genre::Kids),
    ("Children", Genre::Kids),
    ("Music", Genre::Music),
    ("Documentary", Genre::Documentary),
    ("Documentaries", Genre::Documentary),
    ("Docs", Genre::Documentary),
    ("Entertainment", Genre::Entertainment),
    ("General", Genre::Entertainment),
    ("Local", Genre::Local),
    ("Regional", Genre::Local),
    ("Adult", Genre::Adult),
    ("XXX", Genre::Adult),
    ("Civic", Genre::Civic),
    ("Government", Genre::Civic),
    ("Religious", Genre::Religious),
    ("Faith", Genre::Religious),
    ("Shopping", Genre::Shopping),
];

static FLAG_SPELLINGS: &[(&str, Flag)] = &[
    ("VIP", Flag::Vip),
    ("+1", Flag::Plus1),
    ("Live", Flag::Live),
    ("PPV", Flag::PayPerView),
    ("VOD", Flag::VideoOnDemand),
    ("24/7", Flag::AllDay),
    ("QC", Flag::FrenchCanadian),
    ("Quebec", Flag::FrenchCanadian),
    ("Latino", Flag::Latino),
];

/// Over-the-air station registry, keyed by callsign.
static STATION_LIST: &[Station] = &[
    // SF Bay Area
    Station { callsign: "KGO", affiliate: Affiliate::Abc, market: Market::SfBayArea },
    Station { callsign: "KPIX", affiliate: Affiliate::Cbs, market: Market::SfBayArea },
    Station { callsign: "KNTV", affiliate: Affiliate::Nbc, market: Market::SfBayArea },
    Station { callsign: "KTVU", affiliate: Affiliate::Fox, market: Market::SfBayArea },
    Station { callsign: "KBCW", affiliate: Affiliate::Cw, market: Market::SfBayArea },
    Station { callsign: "KRON", affiliate: Affiliate::MyNetwork, market: Market::SfBayArea },
    Station { callsign: "KQED", affiliate: Affiliate::Pbs, market: Market::SfBayArea },
    Station { callsign: "KKPX", affiliate: Affiliate::Ion, market: Market::SfBayArea },
    Station { callsign: "KDTV", affiliate: Affiliate::Univision, market: Market::SfBayArea },
    Station { callsign: "KSTS", affiliate: Affiliate::Telemundo, market: Market::SfBayArea },
    // New York
    Station { callsign: "WABC", affiliate: Affiliate::Abc, market: Market::NewYork },
    Station { callsign: "WCBS", affiliate: Affiliate::Cbs, market: Market::NewYork },
    Station { callsign: "WNBC", affiliate: Affiliate::Nbc, market: Market::NewYork },
    Station { callsign: "WNYW", affiliate: Affiliate::Fox, market: Market::NewYork },
    Station { callsign: "WPIX", affiliate: Affiliate::Cw, market: Market::NewYork },
    Station { callsign: "WNET", affiliate: Affiliate::Pbs, market: Market::NewYork },
    Station { callsign: "WXTV", affiliate: Affiliate::Univision, market: Market::NewYork },
    Station { callsign: "WNJU", affiliate: Affiliate::Telemundo, market: Market::NewYork },
    // Los Angeles
    Station { callsign: "KABC", affiliate: Affiliate::Abc, market: Market::LosAngeles },
    Station { callsign: "KCBS", affiliate: Affiliate::Cbs, market: Market::LosAngeles },
    Station { callsign: "KNBC", affiliate: Affiliate::Nbc, market: Market::LosAngeles },
    Station { callsign: "KTTV", affiliate: Affiliate::Fox, market: Market::LosAngeles },
    Station { callsign: "KTLA", affiliate: Affiliate::Cw, market: Market::LosAngeles },
    Station { callsign: "KMEX", affiliate: Affiliate::Univision, market: Market::LosAngeles },
    Station { callsign: "KVEA", affiliate: Affiliate::Telemundo, market: Market::LosAngeles },
    // Chicago
    Station { callsign: "WLS", affiliate: Affiliate::Abc, market: Market::Chicago },
    Station { callsign: "WBBM", affiliate: Affiliate::Cbs, market: Market::Chicago },
    Station { callsign: "WMAQ", affiliate: Affiliate::Nbc, market: Market::Chicago },
    Station { callsign: "WFLD", affiliate: Affiliate::Fox, market: Market::Chicago },
    Station { callsign: "WGN", affiliate: Affiliate::Cw, market: Market::Chicago },
    // Philadelphia
    Station { callsign: "WPVI", affiliate: Affiliate::Abc, market: Market::Philadelphia },
    Station { callsign: "KYW", affiliate: Affiliate::Cbs, market: Market::Philadelphia },
    Station { callsign: "WCAU", affiliate: Affiliate::Nbc, market: Market::Philadelphia },
    Station { callsign: "WTXF", affiliate: Affiliate::Fox, market: Market::Philadelphia },
    // Boston
    Station { callsign: "WCVB", affiliate: Affiliate::Abc, market: Market::Boston },
    Station { callsign: "WBZ", affiliate: Affiliate::Cbs, market: Market::Boston },
    Station { callsign: "WBTS", affiliate: Affiliate::Nbc, market: Market::Boston },
    Station { callsign: "WFXT", affiliate: Affiliate::Fox, market: Market::Boston },
    // Seattle
    Station { callsign: "KOMO", affiliate: Affiliate::Abc, market: Market::Seattle },
    Station { callsign: "KIRO", affiliate: Affiliate::Cbs, market: Market::Seattle },
    Station { callsign: "KING", affiliate: Affiliate::Nbc, market: Market::Seattle },
    Station { callsign: "KCPQ", affiliate: Affiliate::Fox, market: Market::Seattle },
    // Sacramento
    Station { callsign: "KXTV", affiliate: Affiliate::Abc, market: Market::Sacramento },
    Station { callsign: "KOVR", affiliate: Affiliate::Cbs, market: Market::Sacramento },
    Station { callsign: "KCRA", affiliate: Affiliate::Nbc, market: Market::Sacramento },
    Station { callsign: "KTXL", affiliate: Affiliate::Fox, market: Market::Sacramento },
];

/// City and region names that mark a feed as local/regional programming.
static CITY_SPELLINGS: &[&str] = &[
    "Sacramento",
    "Fresno",
    "Oakland",
    "Bakersfield",
    "Stockton",
    "Modesto",
    "Chicago",
    "Houston",
    "Dallas",
    "Denver",
    "Seattle",
    "Portland",
    "Atlanta",
    "Boston",
    "Miami",
    "Orlando",
    "Phoenix",
    "Detroit",
    "Cleveland",
    "Pittsburgh",
    "Baltimore",
    "London",
    "Yorkshire",
    "Midlands",
    "Granada",
    "Wales",
    "Scotland",
];

/// Tokens whose canonical casing is not title-case.
static CAPS_SPELLINGS: &[&str] = &[
    "BBC", "ITV", "ITV2", "ITV3", "ITV4", "CNN", "ESPN", "ESPN2", "HBO", "AMC", "TNT", "TBS",
    "MTV", "VH1", "CNBC", "MSNBC", "NFL", "NBA", "NHL", "MLB", "UFC", "WWE", "PGA", "TLC",
    "HGTV", "QVC", "PBS", "ABC", "CBS", "NBC", "Fox", "CW", "BT", "TSN", "CBC", "CTV", "RDS",
    "TVA", "CityTV", "DAZN", "Syfy", "CBeebies", "CBBC", "UKTV", "RTE", "Sky", "Starz", "IFC",
    "FX", "FXX", "E4", "5USA", "TG4", "S4C",
];

static COUNTRIES: Lazy<Table<Country>> = Lazy::new(|| build(COUNTRY_SPELLINGS));
static RESOLUTIONS: Lazy<Table<Resolution>> = Lazy::new(|| build(RESOLUTION_SPELLINGS));
static GENRES: Lazy<Table<Genre>> = Lazy::new(|| build(GENRE_SPELLINGS));
static FLAGS: Lazy<Table<Flag>> = Lazy::new(|| build(FLAG_SPELLINGS));
static STATIONS: Lazy<Table<&'static Station>> = Lazy::new(|| {
    STATION_LIST
        .iter()
        .map(|station| (name_hash(station.callsign), station))
        .collect()
});
static CITIES: Lazy<Table<()>> = Lazy::new(|| {
    CITY_SPELLINGS.iter().map(|&city| (name_hash(city), ())).collect()
});
static CAPS: Lazy<Table<&'static str>> = Lazy::new(|| {
    CAPS_SPELLINGS
        .iter()
        .map(|&spelling| (name_hash(spelling), spelling))
        .collect()
});

pub fn country(hash: TokenHash) -> Option<Country> {
    COUNTRIES.get(&hash).copied()
}

pub fn resolution(hash: TokenHash) -> Option<Resolution> {
    RESOLUTIONS.get(&hash).copied()
}

pub fn genre(hash: TokenHash) -> Option<Genre> {
    GENRES.get(&hash).copied()
}

pub fn flag(hash: TokenHash) -> Option<Flag> {
    FLAGS.get(&hash).copied()
}

pub fn station(hash: TokenHash) -> Option<&'static Station> {
    STATIONS.get(&hash).copied()
}

pub fn is_city(hash: TokenHash) -> bool {
    CITIES.contains_key(&hash)
}

pub fn canonical_caps(hash: TokenHash) -> Option<&'static str> {
    CAPS.get(&hash).copied()
}

/// How a stream URL's file extension classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
    /// Recognized live-stream extension (`.ts`, `.m3u8`, or a bare dot)
    Stream,
    /// Container file served over HTTP rather than a live feed
    File,
    /// Extension not in the table; tolerated, but worth a log line
    Unknown,
}

/// Classify the extension of a stream URL.
pub fn url_kind(url: &str) -> UrlKind {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let last_segment = path.rsplit('/').next().unwrap_or(path);
    match last_segment.rsplit_once('.') {
        Some((_, ext)) => match ext.to_ascii_lowercase().as_str() {
            "" | "ts" | "m3u8" => UrlKind::Stream,
            "mp4" | "mkv" | "avi" | "flv" | "mov" | "wmv" => UrlKind::File,
            _ => UrlKind::Unknown,
        },
        None => UrlKind::Stream,
    }
}
