//! Command-line interface definition for m3u-munge
//!
//! Provides argument parsing for the playlist munging tool.

use clap::Parser;
use std::path::PathBuf;

/// IPTV M3U playlist cleaner
///
/// Extracts country, language, genre, resolution and VIP markers out of
/// free-text channel and group names, deduplicates feeds that refer to the
/// same channel, filters by a fixed inclusion policy and re-emits a trimmed
/// playlist.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "m3u-munge",
    version,
    about = "IPTV M3U playlist cleaner",
    long_about = r#"
m3u-munge - IPTV M3U playlist cleaner

Reads one or more extended-M3U playlists, lifts the semantic markers buried
in channel and group names (country tags, "VIP", "HD"/"FHD", "+1" timeshift
suffixes, US callsigns, genres), merges duplicate feeds of the same channel,
applies the export policy and writes a cleaned playlist alongside each input.

EXAMPLES:
    # Clean a single playlist; writes provider.m3u8 next to it
    m3u-munge provider.m3u

    # Several playlists in one run
    m3u-munge morning.m3u evening.m3u

    # Pick the output extension
    m3u-munge -x clean.m3u provider.m3u
"#,
    after_help = "Exit code is 0 on success, or the OS error code of the first file that failed."
)]
pub struct Args {
    /// Input playlist file(s)
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Extension used for each derived output filename
    #[arg(short = 'x', long, value_name = "EXT", default_value = "m3u8")]
    pub extension: String,

    /// Quiet mode - minimal output
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_file() {
        let args = Args::parse_from(["m3u-munge", "list.m3u"]);
        assert_eq!(args.files, vec![PathBuf::from("list.m3u")]);
        assert_eq!(args.extension, "m3u8");
        assert!(!args.quiet);
        assert!(!args.verbose);
    }

    #[test]
    fn test_parse_multiple_files() {
        let args = Args::parse_from(["m3u-munge", "a.m3u", "b.m3u"]);
        assert_eq!(args.files.len(), 2);
    }

    #[test]
    fn test_parse_extension() {
        let args = Args::parse_from(["m3u-munge", "-x", "clean.m3u", "list.m3u"]);
        assert_eq!(args.extension, "clean.m3u");

        let long = Args::parse_from(["m3u-munge", "--extension", "out", "list.m3u"]);
        assert_eq!(long.extension, "out");
    }

    #[test]
    fn test_files_required() {
        assert!(Args::try_parse_from(["m3u-munge"]).is_err());
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from(["m3u-munge", "-q", "-v", "list.m3u"]);
        assert!(args.quiet);
        assert!(args.verbose);
    }
}
