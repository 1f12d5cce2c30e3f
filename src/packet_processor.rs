use crate::{
    analyzer::Analyzer,
    conversation::Conversation,
    decode::decode_packets,
    error::Result,
    fields::group_conversations,
    output_file_writer::OutputFileWriter,
    report::{conversation_count, follow_payload_lines, ReportLayout},
    ui,
};
use clap::ValueEnum;
use std::path::Path;
use tracing::{debug, info};

/// How conversations are obtained from the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum AcquisitionMode {
    /// Fixed line offsets into the `conv,udp` and `follow,udp,raw` reports
    Report,
    /// One dissector pass reading the `udp.stream` and `udp.payload` fields
    Fields,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ExtractionStatistics {
    pub conversations: usize,
    pub packets: usize,
    pub bytes_written: usize,
}

pub(crate) struct PacketProcessor<'a, A: Analyzer> {
    pub statistics: ExtractionStatistics,
    analyzer: &'a A,
    mode: AcquisitionMode,
}

impl<'a, A: Analyzer> PacketProcessor<'a, A> {
    pub(crate) fn new(analyzer: &'a A, mode: AcquisitionMode) -> Self {
        Self {
            statistics: ExtractionStatistics::default(),
            analyzer,
            mode,
        }
    }

    pub(crate) fn process_capture(&mut self, capture: &Path, out_dir: &Path) -> Result<()> {
        let writer = OutputFileWriter::create(capture, out_dir)?;
        info!(
            capture = %capture.display(),
            out_dir = %out_dir.display(),
            mode = ?self.mode,
            "extracting conversations"
        );

        match self.mode {
            AcquisitionMode::Report => self.process_reports(capture, &writer),
            AcquisitionMode::Fields => self.process_fields(capture, &writer),
        }
    }

    fn process_reports(&mut self, capture: &Path, writer: &OutputFileWriter) -> Result<()> {
        let report = self.analyzer.conversation_report(capture)?;
        let count = conversation_count(&report, ReportLayout::CONVERSATIONS);
        info!(count, "conversations reported");

        for index in 0..count {
            let report = self.analyzer.follow_report(capture, index)?;
            let packets = decode_packets(follow_payload_lines(&report, ReportLayout::FOLLOW))?;
            self.save(writer, &Conversation { index, packets })?;
        }
        Ok(())
    }

    fn process_fields(&mut self, capture: &Path, writer: &OutputFileWriter) -> Result<()> {
        let payloads = self.analyzer.udp_payloads(capture)?;
        let conversations = group_conversations(payloads)?;
        info!(count = conversations.len(), "conversations found");

        for conversation in &conversations {
            self.save(writer, conversation)?;
        }
        Ok(())
    }

    fn save(&mut self, writer: &OutputFileWriter, conversation: &Conversation) -> Result<()> {
        let bytes = writer.write(conversation)?;
        debug!(
            conversation = conversation.index,
            packets = conversation.packets.len(),
            bytes,
            "conversation written"
        );

        self.statistics.conversations += 1;
        self.statistics.packets += conversation.packets.len();
        self.statistics.bytes_written += bytes;
        ui::indicate_progress();
        Ok(())
    }
}
