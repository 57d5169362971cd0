//! # m3u-munge
//!
//! IPTV M3U playlist cleaner.
//!
//! ## Features
//!
//! - **Name attribute extraction**: country, language, genre, resolution,
//!   VIP status, broadcast affiliate and US callsign markers are lifted out
//!   of free-text channel and group names
//! - **Deduplication**: feeds that refer to the same logical channel merge
//!   into one channel with an ordered stream list
//! - **Inheritance**: channels inherit unset attributes from their group
//! - **Filtering**: a fixed export policy trims the playlist to the
//!   channels worth keeping
//! - **Round-trip stable**: a cleaned playlist re-imports to the same
//!   classification
//!
//! ## Usage
//!
//! ```bash
//! # Clean a playlist; writes provider.m3u8 next to it
//! m3u-munge provider.m3u
//!
//! # Several playlists with a custom output extension
//! m3u-munge -x clean.m3u morning.m3u evening.m3u
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use m3u_munge::processor::{MungeConfig, Processor};
//! use std::path::Path;
//!
//! let config = MungeConfig {
//!     extension: "m3u8".to_string(),
//!     quiet: true,
//!     verbose: false,
//! };
//!
//! let mut processor = Processor::new(config);
//! processor.process(Path::new("provider.m3u")).unwrap();
//! ```

pub mod charmap;
pub mod cli;
pub mod extract;
pub mod filter;
pub mod hash;
pub mod model;
pub mod output;
pub mod parser;
pub mod processor;
pub mod progress;
pub mod registry;
pub mod tables;

pub use cli::Args;
pub use processor::{MungeConfig, Processor};
