use crate::{
    analyzer::UdpPayload,
    conversation::{Conversation, ConversationBuffers},
    decode::decode_colon_pairs,
    error::{ExtractError, Result},
};
use tracing::debug;

/// Groups dissected UDP payloads into conversations keyed by stream index.
pub(crate) fn group_conversations(payloads: Vec<UdpPayload>) -> Result<Vec<Conversation>> {
    let mut buffers = ConversationBuffers::new();

    for (number, fields) in payloads.into_iter().enumerate() {
        let (Some(stream), Some(payload)) = (fields.stream, fields.payload) else {
            debug!(packet = number, "skipping packet without udp stream or payload");
            continue;
        };

        let index = stream
            .trim()
            .parse::<usize>()
            .map_err(|_| ExtractError::InvalidStreamIndex(stream.clone()))?;
        buffers.add_packet(index, decode_colon_pairs(&payload)?);
    }

    debug!(conversations = buffers.len(), "grouped udp payloads");
    Ok(buffers.into_conversations())
}
