use crate::{conversation::Packet, error::ExtractError};

/// Decodes one follow report line into a packet.
///
/// Whitespace may only separate whole byte pairs; anything else that is not
/// a hex digit is malformed.
pub(crate) fn decode_packet(line: &str) -> Result<Packet, ExtractError> {
    let mut bytes = Vec::with_capacity(line.len() / 2);
    for group in line.split_ascii_whitespace() {
        let decoded = hex::decode(group).map_err(|source| malformed(line, source))?;
        bytes.extend_from_slice(&decoded);
    }
    Ok(Packet::new(bytes))
}

pub(crate) fn decode_packets<'a>(
    lines: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<Packet>, ExtractError> {
    lines.into_iter().map(decode_packet).collect()
}

/// Decodes a dissector byte field, shown either as `de:ad:be:ef` or as
/// contiguous digits.
pub(crate) fn decode_colon_pairs(field: &str) -> Result<Packet, ExtractError> {
    let field = field.trim();
    if !field.contains(':') {
        let bytes = hex::decode(field).map_err(|source| malformed(field, source))?;
        return Ok(Packet::new(bytes));
    }

    let mut bytes = Vec::with_capacity(field.len() / 3 + 1);
    for pair in field.split(':') {
        if pair.len() != 2 {
            return Err(malformed(field, hex::FromHexError::InvalidStringLength));
        }
        let decoded = hex::decode(pair).map_err(|source| malformed(field, source))?;
        bytes.extend_from_slice(&decoded);
    }
    Ok(Packet::new(bytes))
}

fn malformed(line: &str, source: hex::FromHexError) -> ExtractError {
    ExtractError::MalformedHex {
        line: line.to_owned(),
        source,
    }
}
