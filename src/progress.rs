//! Console reporting
//!
//! Styled status messages, an ingestion progress bar and the end-of-run
//! statistics summary. Processing is single-threaded, so the counters are
//! plain integers owned by the driver.

use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// Print the application banner
pub fn print_banner() {
    println!(
        "{}",
        format!("m3u-munge v{} - IPTV playlist cleaner", env!("CARGO_PKG_VERSION")).green()
    );
}

/// Print a section header
pub fn print_header(text: &str) {
    println!("\n{} {}", "▶".green(), text.green().bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    println!("  {} {}", "ℹ".cyan(), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    println!("  {} {}", "✔".green(), text.green());
}

/// Print a warning message
pub fn print_warning(text: &str) {
    println!("  {} {}", "⚠".yellow(), text.yellow());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Create a styled progress bar over a known item count
pub fn create_progress_bar(total: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);

    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.green/dim}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("█▓░"),
    );

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Counters for one run, across all input files.
#[derive(Debug)]
pub struct MungeStats {
    pub files: u64,
    pub bytes_in: u64,
    pub entries: u64,
    pub groups: u64,
    pub channels: u64,
    pub streams: u64,
    pub merged: u64,
    pub exported: u64,
    pub warnings: u64,
    pub bytes_out: u64,
    pub start_time: Instant,
}

impl MungeStats {
    pub fn new() -> Self {
        Self {
            files: 0,
            bytes_in: 0,
            entries: 0,
            groups: 0,
            channels: 0,
            streams: 0,
            merged: 0,
            exported: 0,
            warnings: 0,
            bytes_out: 0,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Print final statistics
    pub fn print_summary(&self) {
        println!();
        println!("{}", "═".repeat(60).green());
        println!("{}", "                    MUNGE COMPLETE".green().bold());
        println!("{}", "═".repeat(60).green());
        println!();

        println!(
            "  {} {} ({})",
            "Files processed:".green(),
            self.files,
            ByteSize(self.bytes_in)
        );
        println!("  {} {}", "Entries parsed: ".green(), self.entries);
        println!("  {} {}", "Groups:         ".green(), self.groups);
        println!("  {} {}", "Channels:       ".green(), self.channels);
        println!(
            "  {} {} ({} merged duplicates)",
            "Streams:        ".green(),
            self.streams,
            self.merged
        );
        println!(
            "  {} {}",
            "Exported:       ".green().bold(),
            self.exported.to_string().green().bold()
        );

        if self.warnings > 0 {
            println!(
                "  {} {}",
                "Warnings:       ".yellow(),
                self.warnings.to_string().yellow()
            );
        }

        println!();
        println!(
            "  {} {} written in {:?}",
            "Output:         ".green(),
            ByteSize(self.bytes_out),
            self.elapsed()
        );
        println!("{}", "═".repeat(60).green());
    }
}

impl Default for MungeStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_accumulate() {
        let mut stats = MungeStats::new();
        stats.files += 1;
        stats.entries += 100;
        stats.merged += 10;

        assert_eq!(stats.files, 1);
        assert_eq!(stats.entries, 100);
        assert_eq!(stats.merged, 10);
    }
}
