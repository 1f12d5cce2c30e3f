//! Parsing of the analyzer's human readable reports.
//!
//! The reports carry no machine readable framing, so the data rows are
//! located purely by counting header and footer lines. The default counts
//! were taken from a single tshark report layout and are not checked against
//! the running analyzer.

/// Non-data lines surrounding the rows of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReportLayout {
    pub header_lines: usize,
    pub footer_lines: usize,
}

impl ReportLayout {
    /// `-z conv,udp`: separator, title, filter and two column header lines.
    pub const CONVERSATIONS: Self = Self {
        header_lines: 5,
        footer_lines: 2,
    };

    /// `-z follow,udp,raw,N`: blank, separator, title, filter and two node lines.
    pub const FOLLOW: Self = Self {
        header_lines: 6,
        footer_lines: 2,
    };
}

/// Number of rows in a conversation statistics report.
pub(crate) fn conversation_count(report: &str, layout: ReportLayout) -> usize {
    report
        .split('\n')
        .count()
        .saturating_sub(layout.header_lines + layout.footer_lines)
}

/// Hex payload lines of a follow report, one per packet.
pub(crate) fn follow_payload_lines(report: &str, layout: ReportLayout) -> Vec<&str> {
    let lines: Vec<&str> = report.split('\n').collect();
    let end = lines.len().saturating_sub(layout.footer_lines);
    if end <= layout.header_lines {
        return Vec::new();
    }
    lines[layout.header_lines..end].to_vec()
}
