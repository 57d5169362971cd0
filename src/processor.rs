//! Per-file processing driver
//!
//! Maps one playlist into memory, parses it into raw entries, folds them
//! through the registry, applies the export policy and writes the trimmed
//! playlist next to the input. I/O failures are fatal for the file they hit
//! and carry the OS error code; playlist content never aborts a run.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use thiserror::Error;

use crate::cli::Args;
use crate::filter::ExportPolicy;
use crate::output::{derive_output_path, PlaylistWriter};
use crate::parser::PlaylistParser;
use crate::progress::{create_progress_bar, MungeStats};
use crate::registry::Registry;

/// Fatal per-file failures. Parse anomalies are not errors; they are logged
/// and the entry is skipped.
#[derive(Debug, Error)]
pub enum MungeError {
    #[error("unable to open '{}'", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unable to map '{}'", path.display())]
    Map {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("output '{}' would overwrite the input playlist", path.display())]
    Clobber { path: PathBuf },
    #[error("unable to write '{}'", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl MungeError {
    /// Process exit code: the underlying OS errno where there is one.
    pub fn exit_code(&self) -> i32 {
        match self {
            MungeError::Open { source, .. }
            | MungeError::Map { source, .. }
            | MungeError::Write { source, .. } => source.raw_os_error().unwrap_or(1),
            MungeError::Clobber { .. } => 1,
        }
    }
}

/// Processor configuration
#[derive(Debug, Clone)]
pub struct MungeConfig {
    pub extension: String,
    pub quiet: bool,
    pub verbose: bool,
}

impl MungeConfig {
    pub fn from_args(args: &Args) -> Self {
        Self {
            extension: args.extension.clone(),
            quiet: args.quiet,
            verbose: args.verbose,
        }
    }
}

/// Report for one successfully processed playlist.
#[derive(Debug)]
pub struct MungeReport {
    pub output_path: PathBuf,
    pub exported: u64,
}

/// Main processor: one instance per run, fed one input file at a time.
pub struct Processor {
    config: MungeConfig,
    policy: ExportPolicy,
    pub stats: MungeStats,
}

impl Processor {
    pub fn new(config: MungeConfig) -> Self {
        Self {
            config,
            policy: ExportPolicy::default(),
            stats: MungeStats::new(),
        }
    }

    /// Process a single playlist file.
    pub fn process(&mut self, input: &Path) -> Result<MungeReport, MungeError> {
        let output_path = derive_output_path(input, &self.config.extension);
        if output_path == input {
            return Err(MungeError::Clobber { path: output_path });
        }

        let file = File::open(input).map_err(|source| MungeError::Open {
            path: input.to_path_buf(),
            source,
        })?;
        let mmap = unsafe { Mmap::map(&file) }.map_err(|source| MungeError::Map {
            path: input.to_path_buf(),
            source,
        })?;

        self.stats.files += 1;
        self.stats.bytes_in += mmap.len() as u64;

        let mut parser = PlaylistParser::new(&mmap);
        let entries = parser.parse();
        self.stats.entries += entries.len() as u64;
        self.stats.warnings += parser.warnings;

        let pb = if self.config.quiet {
            indicatif::ProgressBar::hidden()
        } else {
            create_progress_bar(entries.len() as u64, "Classifying...")
        };

        let mut registry = Registry::new();
        for entry in entries {
            registry.ingest(entry);
            pb.inc(1);
        }
        pb.finish_and_clear();

        self.stats.groups += registry.groups.len() as u64;
        self.stats.channels += registry.channels.len() as u64;
        self.stats.streams += registry.stream_count();
        self.stats.merged += registry.merged;
        self.stats.warnings += registry.skipped;

        let exported = self.export(&registry, &output_path)?;
        self.stats.exported += exported;

        Ok(MungeReport {
            output_path,
            exported,
        })
    }

    fn export(&mut self, registry: &Registry, output_path: &Path) -> Result<u64, MungeError> {
        let wrap = |source: io::Error| MungeError::Write {
            path: output_path.to_path_buf(),
            source,
        };

        let mut writer = PlaylistWriter::new(output_path).map_err(wrap)?;
        writer.write_header().map_err(wrap)?;

        for channel in &registry.channels {
            if self.policy.is_enabled(channel) {
                let group_name = channel
                    .group
                    .map(|idx| registry.groups[idx].attrs.display_name.as_str())
                    .unwrap_or("");
                writer.write_channel(channel, group_name).map_err(wrap)?;
            }
        }

        writer.flush().map_err(wrap)?;
        self.stats.bytes_out += writer.bytes_written();
        Ok(writer.channels_written())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::TempDir;

    fn config() -> MungeConfig {
        MungeConfig {
            extension: "m3u8".into(),
            quiet: true,
            verbose: false,
        }
    }

    fn write_playlist(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_end_to_end_munge() {
        let dir = TempDir::new().unwrap();
        let input = write_playlist(
            &dir,
            "list.m3u",
            "#EXTM3U\n\
             #EXTINF:-1 tvg-id=\"bbc1\" tvg-name=\"UK: BBC One HD\" tvg-logo=\"http://logo/1.png\" group-title=\"UK | News\",BBC One\n\
             http://host/live/1.ts\n\
             #EXTINF:-1 tvg-id=\"bbc1\" tvg-name=\"UK: BBC One FHD\" tvg-logo=\"http://logo/1.png\" group-title=\"UK | News\",BBC One\n\
             http://host/live/2.ts\n\
             #EXTINF:-1 tvg-name=\"FR: TF1 HD\" group-title=\"France\",TF1\n\
             http://host/live/3.ts\n",
        );

        let mut processor = Processor::new(config());
        let report = processor.process(&input).unwrap();

        assert_eq!(report.output_path, dir.path().join("list.m3u8"));
        assert_eq!(report.exported, 1);
        assert_eq!(processor.stats.entries, 3);
        assert_eq!(processor.stats.channels, 2);
        assert_eq!(processor.stats.merged, 1);

        let content = std::fs::read_to_string(&report.output_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "#EXTM3U");
        assert!(lines[1].contains("tvg-name=\"BBC One (United Kingdom) [HD]\""));
        assert!(lines[1].contains("group-title=\"News (United Kingdom)\""));
        // best stream is the FHD rendition from the second entry
        assert_eq!(lines[2], "http://host/live/2.ts");
        // the French channel is filtered out
        assert!(!content.contains("TF1"));
    }

    #[test]
    fn test_plus1_feed_filtered_out() {
        let dir = TempDir::new().unwrap();
        let input = write_playlist(
            &dir,
            "list.m3u",
            "#EXTM3U\n\
             #EXTINF:-1 tvg-name=\"UK: Channel 4 HD\" group-title=\"UK | Entertainment\",a\n\
             http://host/live/1.ts\n\
             #EXTINF:-1 tvg-name=\"UK: Channel 4+1\" group-title=\"UK | Entertainment\",b\n\
             http://host/live/2.ts\n",
        );

        let mut processor = Processor::new(config());
        let report = processor.process(&input).unwrap();

        assert_eq!(report.exported, 1);
        assert_eq!(processor.stats.channels, 2);
        let content = std::fs::read_to_string(&report.output_path).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert_eq!(content.lines().last(), Some("http://host/live/1.ts"));
    }

    #[test]
    fn test_round_trip_stable() {
        let dir = TempDir::new().unwrap();
        let input = write_playlist(
            &dir,
            "list.m3u",
            "#EXTM3U\n\
             #EXTINF:-1 tvg-id=\"x\" tvg-name=\"UK: Good Films HD\" tvg-logo=\"l\" group-title=\"UK | Movies\",x\n\
             http://host/live/1.ts\n",
        );

        let mut processor = Processor::new(config());
        let report = processor.process(&input).unwrap();
        assert_eq!(report.exported, 1);
        let first = std::fs::read_to_string(&report.output_path).unwrap();

        // feed the exported playlist back through with a different extension
        let reinput = write_playlist(&dir, "again.m3u", &first);
        let mut second_pass = Processor::new(config());
        let report2 = second_pass.process(&reinput).unwrap();
        assert_eq!(report2.exported, 1);
        let second = std::fs::read_to_string(&report2.output_path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_input_is_open_error() {
        let mut processor = Processor::new(config());
        let err = processor.process(Path::new("/no/such/list.m3u")).unwrap_err();
        assert!(matches!(err, MungeError::Open { .. }));
        assert_ne!(err.exit_code(), 0);
    }

    #[test]
    fn test_refuses_to_clobber_input() {
        let dir = TempDir::new().unwrap();
        let input = write_playlist(&dir, "list.m3u8", "#EXTM3U\n");
        let mut processor = Processor::new(config());
        let err = processor.process(&input).unwrap_err();
        assert!(matches!(err, MungeError::Clobber { .. }));
    }
}
