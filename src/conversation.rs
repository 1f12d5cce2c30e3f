use std::collections::BTreeMap;

/// Raw payload of one UDP datagram.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Packet(Vec<u8>);

impl Packet {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Conversation {
    pub index: usize,
    pub packets: Vec<Packet>,
}

/// Collects packets per analyzer stream index
pub(crate) struct ConversationBuffers {
    conversations: BTreeMap<usize, Vec<Packet>>,
}

impl ConversationBuffers {
    pub fn new() -> Self {
        Self {
            conversations: BTreeMap::new(),
        }
    }

    pub fn add_packet(&mut self, index: usize, packet: Packet) {
        self.conversations.entry(index).or_default().push(packet);
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    /// Conversations in ascending index order, packets in capture order.
    pub fn into_conversations(self) -> Vec<Conversation> {
        self.conversations
            .into_iter()
            .map(|(index, packets)| Conversation { index, packets })
            .collect()
    }
}
