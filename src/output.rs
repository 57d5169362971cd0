//! Playlist output
//!
//! Serializes surviving channels back to extended-M3U syntax through a
//! buffered writer. One `#EXTINF` line is reconstructed from the channel's
//! id/name/logo/group fields, followed by the URL of its best stream.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::model::Channel;

/// Buffered M3U playlist writer with write counters.
pub struct PlaylistWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    channels_written: u64,
    bytes_written: u64,
}

impl PlaylistWriter {
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
            channels_written: 0,
            bytes_written: 0,
        })
    }

    /// Write the `#EXTM3U` header line.
    pub fn write_header(&mut self) -> io::Result<()> {
        self.write_line("#EXTM3U")
    }

    /// Write one channel's `#EXTINF` line and its best stream URL.
    pub fn write_channel(&mut self, channel: &Channel, group_name: &str) -> io::Result<()> {
        let Some(stream) = channel.best_stream() else {
            return Ok(());
        };
        let name = &channel.attrs.display_name;
        let info = format!(
            "#EXTINF:-1 tvg-id=\"{}\" tvg-name=\"{}\" tvg-logo=\"{}\" group-title=\"{}\",{}",
            escape(&channel.tvg_id),
            escape(name),
            escape(&channel.tvg_logo),
            escape(group_name),
            name,
        );
        self.write_line(&info)?;
        self.write_line(&stream.url)?;
        self.channels_written += 1;
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", line)?;
        self.bytes_written += line.len() as u64 + 1;
        Ok(())
    }

    /// Flush the buffer to disk.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn channels_written(&self) -> u64 {
        self.channels_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

impl Drop for PlaylistWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Quoted attribute values may not contain a bare `"`.
fn escape(value: &str) -> String {
    if value.contains('"') {
        value.replace('"', "\\\"")
    } else {
        value.to_string()
    }
}

/// Derive the output path from an input path by swapping the extension.
pub fn derive_output_path(input: &Path, extension: &str) -> PathBuf {
    input.with_extension(extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttributeRecord, Resolution, Stream};
    use tempfile::TempDir;

    fn channel(name: &str, url: &str) -> Channel {
        Channel {
            attrs: AttributeRecord {
                display_name: name.to_string(),
                ..Default::default()
            },
            tvg_id: "id1".into(),
            tvg_logo: "http://logo/1.png".into(),
            group: None,
            streams: vec![Stream {
                url: url.into(),
                resolution: Resolution::Hd,
                is_vip: false,
                is_file: false,
            }],
        }
    }

    #[test]
    fn test_write_playlist() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.m3u8");

        let mut writer = PlaylistWriter::new(&path).unwrap();
        writer.write_header().unwrap();
        writer
            .write_channel(&channel("BBC One (United Kingdom)", "http://h/1.ts"), "News")
            .unwrap();
        writer.flush().unwrap();

        assert_eq!(writer.channels_written(), 1);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "#EXTM3U\n\
             #EXTINF:-1 tvg-id=\"id1\" tvg-name=\"BBC One (United Kingdom)\" \
             tvg-logo=\"http://logo/1.png\" group-title=\"News\",BBC One (United Kingdom)\n\
             http://h/1.ts\n"
        );
    }

    #[test]
    fn test_quotes_escaped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.m3u8");

        let mut writer = PlaylistWriter::new(&path).unwrap();
        writer
            .write_channel(&channel("The \"Best\" Channel", "http://h/1.ts"), "")
            .unwrap();
        writer.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("tvg-name=\"The \\\"Best\\\" Channel\""));
        // the display text after the comma stays unescaped
        assert!(content.contains(",The \"Best\" Channel\n"));
    }

    #[test]
    fn test_channel_without_streams_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.m3u8");

        let mut writer = PlaylistWriter::new(&path).unwrap();
        let mut ch = channel("Empty", "http://h/1.ts");
        ch.streams.clear();
        writer.write_channel(&ch, "").unwrap();
        assert_eq!(writer.channels_written(), 0);
    }

    #[test]
    fn test_derive_output_path() {
        assert_eq!(
            derive_output_path(Path::new("/tv/list.m3u"), "m3u8"),
            PathBuf::from("/tv/list.m3u8")
        );
        assert_eq!(
            derive_output_path(Path::new("list"), "m3u8"),
            PathBuf::from("list.m3u8")
        );
        assert_eq!(
            derive_output_path(Path::new("a.b.m3u"), "m3u8"),
            PathBuf::from("a.b.m3u8")
        );
    }
}
