use crate::error::{ExtractError, Result};
use rtshark::RTSharkBuilder;
use std::{path::Path, process::Command};
use tracing::debug;

/// `udp.stream` and `udp.payload` of one dissected packet, as shown by the analyzer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct UdpPayload {
    pub stream: Option<String>,
    pub payload: Option<String>,
}

/// Reports and dissected fields produced by the packet analyzer for a capture.
pub(crate) trait Analyzer {
    /// UDP conversation statistics table (`-z conv,udp`).
    fn conversation_report(&self, capture: &Path) -> Result<String>;

    /// Raw hex dump of one conversation (`-z follow,udp,raw,<index>`).
    fn follow_report(&self, capture: &Path, index: usize) -> Result<String>;

    /// UDP fields of every packet matching the display filter, in capture order.
    fn udp_payloads(&self, capture: &Path) -> Result<Vec<UdpPayload>>;
}

pub(crate) struct Tshark {
    program: String,
    filter: String,
}

impl Tshark {
    pub fn new(program: impl Into<String>, filter: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            filter: filter.into(),
        }
    }

    fn base_command(&self, capture: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(["-2", "-R", self.filter.as_str(), "-r"])
            .arg(capture);
        command
    }

    fn statistics_command(&self, capture: &Path, statistic: &str) -> Command {
        let mut command = self.base_command(capture);
        command.arg("-q").args(["-z", statistic]);
        command
    }

    fn run(&self, mut command: Command) -> Result<String> {
        debug!(?command, "running analyzer");
        let output = command.output().map_err(|source| ExtractError::AnalyzerSpawn {
            program: self.program.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(ExtractError::AnalyzerFailed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        Ok(String::from_utf8(output.stdout)?)
    }
}

impl Analyzer for Tshark {
    fn conversation_report(&self, capture: &Path) -> Result<String> {
        self.run(self.statistics_command(capture, "conv,udp"))
    }

    fn follow_report(&self, capture: &Path, index: usize) -> Result<String> {
        self.run(self.statistics_command(capture, &format!("follow,udp,raw,{index}")))
    }

    fn udp_payloads(&self, capture: &Path) -> Result<Vec<UdpPayload>> {
        let input = capture
            .to_str()
            .ok_or_else(|| ExtractError::NonUtf8Path(capture.to_path_buf()))?;
        let dissector_error = |source: std::io::Error| ExtractError::Dissector {
            program: self.program.clone(),
            source,
        };

        debug!(program = %self.program, filter = %self.filter, input, "starting dissector");
        let mut rtshark = RTSharkBuilder::builder()
            .input_path(input)
            .display_filter(&self.filter)
            .env_path(&self.program)
            .spawn()
            .map_err(|source| ExtractError::AnalyzerSpawn {
                program: self.program.clone(),
                source,
            })?;

        let mut payloads = Vec::new();
        while let Some(packet) = rtshark.read().map_err(dissector_error)? {
            let Some(udp) = packet.layer_name("udp") else {
                payloads.push(UdpPayload::default());
                continue;
            };
            payloads.push(UdpPayload {
                stream: udp.metadata("udp.stream").map(|m| m.value().to_owned()),
                payload: udp.metadata("udp.payload").map(|m| m.value().to_owned()),
            });
        }
        Ok(payloads)
    }
}
