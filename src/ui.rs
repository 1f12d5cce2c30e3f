use crate::packet_processor::ExtractionStatistics;
use std::{io::Write, path::Path};

pub(crate) fn print_usage(program: &str) {
    eprintln!("Usage: {program} <pcap file> <output dir>");
}

pub(crate) fn indicate_progress() {
    print!(".");
    let _ = std::io::stdout().flush();
}

pub(crate) fn print_summary(stats: &ExtractionStatistics, out_dir: &Path) {
    println!();
    println!();
    println!("conversations:\t\t{}", stats.conversations);
    println!("packets written:\t{}", stats.packets);
    println!("bytes written:\t\t{}", stats.bytes_written);
    println!();
    println!("Processing complete. Packets written to {}", out_dir.display());
}
