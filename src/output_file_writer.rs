use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    conversation::Conversation,
    error::{ExtractError, Result},
};

/// Writes every packet of a conversation to its own file.
pub(crate) struct OutputFileWriter {
    out_dir: PathBuf,
    capture_name: String,
}

impl OutputFileWriter {
    pub fn create(capture: &Path, out_dir: impl Into<PathBuf>) -> Result<Self> {
        let capture_name = capture
            .file_name()
            .ok_or_else(|| ExtractError::NoCaptureName(capture.to_path_buf()))?
            .to_string_lossy()
            .into_owned();
        Ok(Self {
            out_dir: out_dir.into(),
            capture_name,
        })
    }

    pub fn packet_path(&self, conversation: usize, packet: usize) -> PathBuf {
        self.out_dir
            .join(packet_file_name(&self.capture_name, conversation, packet))
    }

    /// Returns the number of bytes written.
    pub fn write(&self, conversation: &Conversation) -> Result<usize> {
        let mut written = 0;
        for (number, packet) in conversation.packets.iter().enumerate() {
            let path = self.packet_path(conversation.index, number);
            write_file(&path, packet.as_bytes())
                .map_err(|source| ExtractError::Write { path, source })?;
            written += packet.len();
        }
        Ok(written)
    }
}

pub(crate) fn packet_file_name(capture_name: &str, conversation: usize, packet: usize) -> String {
    format!("{capture_name}-conv-{conversation}-packet-{packet}.dat")
}

fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Packet;
    use tempfile::TempDir;

    fn conversation(index: usize, packets: &[&[u8]]) -> Conversation {
        Conversation {
            index,
            packets: packets.iter().map(|p| Packet::new(p.to_vec())).collect(),
        }
    }

    #[test]
    fn file_name_uses_capture_base_name() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let writer = OutputFileWriter::create(Path::new("/data/traces/shapes.pcapng"), tmp.path())
            .unwrap();
        assert_eq!(
            writer.packet_path(2, 7),
            tmp.path().join("shapes.pcapng-conv-2-packet-7.dat")
        );
    }

    #[test]
    fn writes_one_file_per_packet() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let writer = OutputFileWriter::create(Path::new("a.pcap"), tmp.path()).unwrap();

        let written = writer
            .write(&conversation(1, &[b"RTPS", b"", b"\x01\x02"]))
            .unwrap();

        assert_eq!(written, 6);
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 3);
        assert_eq!(
            std::fs::read(tmp.path().join("a.pcap-conv-1-packet-0.dat")).unwrap(),
            b"RTPS"
        );
        assert!(std::fs::read(tmp.path().join("a.pcap-conv-1-packet-1.dat"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn overwrites_existing_files() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let path = tmp.path().join("a.pcap-conv-0-packet-0.dat");
        std::fs::write(&path, b"much longer stale content").unwrap();

        let writer = OutputFileWriter::create(Path::new("a.pcap"), tmp.path()).unwrap();
        writer.write(&conversation(0, &[b"new"])).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn missing_output_directory_is_an_error() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let writer =
            OutputFileWriter::create(Path::new("a.pcap"), tmp.path().join("missing")).unwrap();
        let err = writer.write(&conversation(0, &[b"x"])).unwrap_err();
        assert!(matches!(err, ExtractError::Write { .. }));
    }

    #[test]
    fn capture_without_file_name_is_rejected() {
        assert!(matches!(
            OutputFileWriter::create(Path::new("/"), "out"),
            Err(ExtractError::NoCaptureName(_))
        ));
    }
}
