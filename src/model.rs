//! Entity model: classification categories, attribute records, groups,
//! channels and streams.
//!
//! Every category enum carries an `Unset` sentinel and a display-string
//! mapping. Fields in an [`AttributeRecord`] are first-match-wins: once set,
//! only the documented override rules may change them.

use crate::hash::TokenHash;

/// Stream rendition quality, ordered worst to best.
///
/// `Mixed` marks a feed or group that mingles renditions ("HD Mix" style
/// names); it ranks below `Sd` so the export floor drops it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Resolution {
    #[default]
    Unset,
    Mixed,
    Sd,
    Hd,
    Fhd,
    Uhd,
}

impl Resolution {
    pub fn badge(&self) -> &'static str {
        match self {
            Resolution::Unset => "",
            Resolution::Mixed => "Mixed",
            Resolution::Sd => "SD",
            Resolution::Hd => "HD",
            Resolution::Fhd => "FHD",
            Resolution::Uhd => "UHD",
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Resolution::Unset)
    }
}

/// Country of origin resolved from a name token or decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Country {
    #[default]
    Unset,
    UnitedStates,
    UnitedKingdom,
    Canada,
    Ireland,
    Australia,
    NewZealand,
    France,
    Germany,
    Spain,
    Italy,
    Portugal,
    Netherlands,
    Poland,
    Turkey,
    Mexico,
    Brazil,
    India,
    Pakistan,
}

impl Country {
    pub fn display_name(&self) -> &'static str {
        match self {
            Country::Unset => "",
            Country::UnitedStates => "United States",
            Country::UnitedKingdom => "United Kingdom",
            Country::Canada => "Canada",
            Country::Ireland => "Ireland",
            Country::Australia => "Australia",
            Country::NewZealand => "New Zealand",
            Country::France => "France",
            Country::Germany => "Germany",
            Country::Spain => "Spain",
            Country::Italy => "Italy",
            Country::Portugal => "Portugal",
            Country::Netherlands => "Netherlands",
            Country::Poland => "Poland",
            Country::Turkey => "Turkey",
            Country::Mexico => "Mexico",
            Country::Brazil => "Brazil",
            Country::India => "India",
            Country::Pakistan => "Pakistan",
        }
    }

    /// Default broadcast language for the country, used to seed the
    /// language field when a country token is the first signal seen.
    pub fn language(&self) -> Language {
        match self {
            Country::Unset => Language::Unset,
            Country::UnitedStates
            | Country::UnitedKingdom
            | Country::Canada
            | Country::Ireland
            | Country::Australia
            | Country::NewZealand => Language::English,
            Country::France => Language::French,
            Country::Germany => Language::German,
            Country::Spain | Country::Mexico => Language::Spanish,
            Country::Italy => Language::Italian,
            Country::Portugal | Country::Brazil => Language::Portuguese,
            Country::Netherlands => Language::Dutch,
            Country::Poland => Language::Polish,
            Country::Turkey => Language::Turkish,
            Country::India => Language::Hindi,
            Country::Pakistan => Language::Urdu,
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Country::Unset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Unset,
    English,
    French,
    Spanish,
    German,
    Italian,
    Portuguese,
    Dutch,
    Polish,
    Turkish,
    Hindi,
    Urdu,
}

impl Language {
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Unset => "",
            Language::English => "English",
            Language::French => "French",
            Language::Spanish => "Spanish",
            Language::German => "German",
            Language::Italian => "Italian",
            Language::Portuguese => "Portuguese",
            Language::Dutch => "Dutch",
            Language::Polish => "Polish",
            Language::Turkish => "Turkish",
            Language::Hindi => "Hindi",
            Language::Urdu => "Urdu",
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Language::Unset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Genre {
    #[default]
    Unset,
    News,
    Sports,
    Movies,
    Kids,
    Music,
    Documentary,
    Entertainment,
    /// Local or regional broadcast, typically carrying a US callsign
    Local,
    Adult,
    Civic,
    Religious,
    Shopping,
    PayPerView,
    /// Looping single-program feeds ("24/7" channels)
    AllDay,
    VideoOnDemand,
}

impl Genre {
    pub fn display_name(&self) -> &'static str {
        match self {
            Genre::Unset => "",
            Genre::News => "News",
            Genre::Sports => "Sports",
            Genre::Movies => "Movies",
            Genre::Kids => "Kids",
            Genre::Music => "Music",
            Genre::Documentary => "Documentary",
            Genre::Entertainment => "Entertainment",
            Genre::Local => "Local",
            Genre::Adult => "Adult",
            Genre::Civic => "Civic",
            Genre::Religious => "Religious",
            Genre::Shopping => "Shopping",
            Genre::PayPerView => "Pay-Per-View",
            Genre::AllDay => "24/7",
            Genre::VideoOnDemand => "VOD",
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Genre::Unset)
    }
}

/// US broadcast network an over-the-air station is affiliated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Affiliate {
    #[default]
    Unset,
    Abc,
    Cbs,
    Nbc,
    Fox,
    Cw,
    Pbs,
    MyNetwork,
    Ion,
    Telemundo,
    Univision,
    UniMas,
}

impl Affiliate {
    pub fn display_name(&self) -> &'static str {
        match self {
            Affiliate::Unset => "",
            Affiliate::Abc => "ABC",
            Affiliate::Cbs => "CBS",
            Affiliate::Nbc => "NBC",
            Affiliate::Fox => "Fox",
            Affiliate::Cw => "The CW",
            Affiliate::Pbs => "PBS",
            Affiliate::MyNetwork => "MyNetworkTV",
            Affiliate::Ion => "Ion",
            Affiliate::Telemundo => "Telemundo",
            Affiliate::Univision => "Univision",
            Affiliate::UniMas => "UniMas",
        }
    }

    /// Broadcast language of the network. An affiliate is a stronger
    /// language signal than country and overrides it unconditionally.
    pub fn language(&self) -> Language {
        match self {
            Affiliate::Unset => Language::Unset,
            Affiliate::Telemundo | Affiliate::Univision | Affiliate::UniMas => Language::Spanish,
            _ => Language::English,
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Affiliate::Unset)
    }
}

/// Nielsen-style television market a callsign is licensed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Market {
    SfBayArea,
    NewYork,
    LosAngeles,
    Chicago,
    Philadelphia,
    Boston,
    Seattle,
    Sacramento,
    Dallas,
    Houston,
    Atlanta,
    Denver,
    Miami,
    Detroit,
    Phoenix,
}

impl Market {
    pub fn display_name(&self) -> &'static str {
        match self {
            Market::SfBayArea => "SF Bay Area",
            Market::NewYork => "New York",
            Market::LosAngeles => "Los Angeles",
            Market::Chicago => "Chicago",
            Market::Philadelphia => "Philadelphia",
            Market::Boston => "Boston",
            Market::Seattle => "Seattle",
            Market::Sacramento => "Sacramento",
            Market::Dallas => "Dallas-Ft. Worth",
            Market::Houston => "Houston",
            Market::Atlanta => "Atlanta",
            Market::Denver => "Denver",
            Market::Miami => "Miami",
            Market::Detroit => "Detroit",
            Market::Phoenix => "Phoenix",
        }
    }
}

/// One registered over-the-air station: callsign, network and home market.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Station {
    pub callsign: &'static str,
    pub affiliate: Affiliate,
    pub market: Market,
}

/// Structured classification output shared by groups and channels.
#[derive(Debug, Clone, Default)]
pub struct AttributeRecord {
    /// Cleaned, decorated display name
    pub display_name: String,
    /// Fingerprint of the cleaned name, computed before decoration
    pub identity_hash: TokenHash,
    pub country: Country,
    pub language: Language,
    pub genre: Genre,
    pub affiliate: Affiliate,
    pub station: Option<Station>,
    pub resolution: Resolution,
    pub is_vip: bool,
    pub is_plus1: bool,
    pub is_live: bool,
}

/// A playlist group (`group-title`), shared by reference across its channels.
#[derive(Debug, Clone)]
pub struct Group {
    pub attrs: AttributeRecord,
}

/// One physical feed URL belonging to a channel.
#[derive(Debug, Clone)]
pub struct Stream {
    pub url: String,
    pub resolution: Resolution,
    pub is_vip: bool,
    /// URL points at a container file (`.mp4`, `.mkv`, ...) rather than a
    /// live stream
    pub is_file: bool,
}

/// A logical channel: one attribute record, its owning group, and every
/// feed that resolved to the same identity.
#[derive(Debug, Clone)]
pub struct Channel {
    pub attrs: AttributeRecord,
    pub tvg_id: String,
    pub tvg_logo: String,
    /// Index into the registry's group list
    pub group: Option<usize>,
    /// Maintained in descending resolution order; ties keep insertion order
    pub streams: Vec<Stream>,
}

impl Channel {
    /// The stream preferred for export: the first VIP stream if any
    /// (the list ordering makes that the best VIP rendition), otherwise the
    /// best rendition overall.
    pub fn best_stream(&self) -> Option<&Stream> {
        self.streams
            .iter()
            .find(|s| s.is_vip)
            .or_else(|| self.streams.first())
    }
}

/// Raw fields lifted from one `#EXTINF` line and its URL line, before any
/// semantic interpretation. Consumed once by the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub tvg_id: Option<String>,
    pub tvg_name: Option<String>,
    pub tvg_logo: Option<String>,
    pub group_title: Option<String>,
    /// Display text between the comma and end-of-line; logged, never used
    pub trailing: String,
    pub url: String,
}
