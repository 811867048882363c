//! Order Assistant
//!
//! A scripted chat: each utterance is trimmed, lowercased and matched exactly
//! against a [`BotResponseTable`]. There is no memory across turns; the only
//! input besides the utterance is the cart as it stands at dispatch time.

use tracing::debug;

use crate::cart::CartStore;

pub mod table;

pub use table::{BotResponseTable, DEFAULT_KEY, FALLBACK_REPLY, Reply, ReplyFn, normalize};

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    /// The customer.
    User,

    /// The order assistant.
    Bot,
}

/// One exchange in the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    /// What the customer typed, before normalisation.
    pub utterance: String,

    /// What the assistant answered.
    pub reply: String,
}

/// Chat dispatcher
#[derive(Debug)]
pub struct ChatDispatcher {
    table: BotResponseTable,
    transcript: Vec<ChatTurn>,
}

impl Default for ChatDispatcher {
    fn default() -> Self {
        Self::new(BotResponseTable::standard())
    }
}

impl ChatDispatcher {
    /// Create a dispatcher answering from `table`.
    pub fn new(table: BotResponseTable) -> Self {
        Self {
            table,
            transcript: Vec::new(),
        }
    }

    /// Answer an utterance and append the exchange to the transcript.
    ///
    /// Returns `None`, recording nothing, when the input is empty after trimming.
    pub fn handle(&mut self, raw_input: &str, cart: &CartStore) -> Option<String> {
        let key = normalize(raw_input);

        if key.is_empty() {
            return None;
        }

        let reply = self
            .table
            .lookup(&key)
            .map_or_else(|| FALLBACK_REPLY.to_string(), |reply| reply.resolve(cart));

        debug!(utterance = %key, matched = self.table.get(&key).is_some(), "chat dispatched");

        self.transcript.push(ChatTurn {
            utterance: raw_input.to_string(),
            reply: reply.clone(),
        });

        Some(reply)
    }

    /// Every exchange so far, oldest first.
    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    /// The table replies are drawn from.
    pub fn table(&self) -> &BotResponseTable {
        &self.table
    }
}
