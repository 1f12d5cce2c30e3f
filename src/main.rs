mod analyzer;
mod conversation;
mod decode;
mod error;
mod fields;
mod log;
mod output_file_writer;
mod packet_processor;
mod report;
mod ui;

use analyzer::Tshark;
use anyhow::{Context, Result};
use clap::{error::ErrorKind, Parser};
use packet_processor::{AcquisitionMode, PacketProcessor};
use std::{env, ffi::OsString, path::PathBuf};
use tracing::debug;

/// Splits the UDP conversations of a capture into one file per packet
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Capture file to read
    #[arg(value_name = "PCAP_FILE")]
    capture: PathBuf,
    /// Existing directory receiving the packet files
    #[arg(value_name = "OUTPUT_DIR")]
    out_dir: PathBuf,
    /// Packet analyzer executable
    #[arg(long, env = "TSHARK", default_value = "tshark")]
    tshark: String,
    /// Display filter selecting the packets to extract
    #[arg(long, env = "CONV_EXTRACT_FILTER", default_value = "rtps")]
    filter: String,
    /// How conversations are read from the analyzer
    #[arg(long, env = "CONV_EXTRACT_MODE", value_enum, default_value_t = AcquisitionMode::Fields)]
    mode: AcquisitionMode,
    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = get_args();
    log::set(&args.log_level);
    debug!(?args, "parsed arguments");

    let tshark = Tshark::new(&args.tshark, &args.filter);
    let mut processor = PacketProcessor::new(&tshark, args.mode);
    processor
        .process_capture(&args.capture, &args.out_dir)
        .with_context(|| format!("failed to extract {}", args.capture.display()))?;

    ui::print_summary(&processor.statistics, &args.out_dir);
    Ok(())
}

fn get_args() -> Args {
    match parse_args(env::args_os()) {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            let program = env::args().next().unwrap_or_else(|| "rtps-conv-extract".into());
            eprint!("{}", err.render());
            ui::print_usage(&program);
            std::process::exit(1);
        }
    }
}

fn parse_args<I, T>(args: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Args::try_parse_from(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_capture_and_output_dir() {
        let args = parse_args(["extract", "shapes.pcap", "out"]).unwrap();
        assert_eq!(args.capture, PathBuf::from("shapes.pcap"));
        assert_eq!(args.out_dir, PathBuf::from("out"));
    }

    #[test]
    fn missing_output_dir_is_rejected() {
        let err = parse_args(["extract", "shapes.pcap"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn no_arguments_are_rejected() {
        let err = parse_args(["extract"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn third_positional_is_rejected() {
        let err = parse_args(["extract", "a.pcap", "out", "extra"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn unknown_mode_names_the_value() {
        let err = parse_args(["extract", "--mode", "bogus", "a.pcap", "out"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert!(err.render().to_string().contains("bogus"));
    }
}
