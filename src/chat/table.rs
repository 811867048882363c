//! Bot Response Table

use std::fmt;

use rustc_hash::FxHashMap;

use crate::{cart::CartStore, money::format_total};

/// Key of the fallback entry.
pub const DEFAULT_KEY: &str = "default";

/// Reply used when a table has no `default` entry of its own.
pub const FALLBACK_REPLY: &str =
    "I'm sorry, I didn't understand that. Please try asking a different question or contact support.";

/// Produces a reply from the cart as it is when the utterance is dispatched.
pub type ReplyFn = dyn Fn(&CartStore) -> String + Send + Sync;

/// A canned reply.
pub enum Reply {
    /// Used verbatim.
    Literal(String),

    /// Evaluated at dispatch time.
    Computed(Box<ReplyFn>),
}

impl Reply {
    /// Build a computed reply.
    pub fn computed(f: impl Fn(&CartStore) -> String + Send + Sync + 'static) -> Self {
        Reply::Computed(Box::new(f))
    }

    /// Resolve this reply against the current cart.
    pub fn resolve(&self, cart: &CartStore) -> String {
        match self {
            Reply::Literal(text) => text.clone(),
            Reply::Computed(produce) => produce(cart),
        }
    }
}

impl fmt::Debug for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Reply::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&str> for Reply {
    fn from(text: &str) -> Self {
        Reply::Literal(text.to_string())
    }
}

impl From<String> for Reply {
    fn from(text: String) -> Self {
        Reply::Literal(text)
    }
}

/// Trim and lowercase an utterance for exact-match lookup.
pub fn normalize(utterance: &str) -> String {
    utterance.trim().to_lowercase()
}

/// Exact-match mapping from normalised utterance to reply.
#[derive(Debug, Default)]
pub struct BotResponseTable {
    entries: FxHashMap<String, Reply>,
}

impl BotResponseTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The order assistant's stock replies.
    pub fn standard() -> Self {
        let mut table = Self::new();

        table
            .insert("hello", "Hi there! How can I assist you today?")
            .insert(
                "how can I place an order?",
                "You can add items to your order by clicking the 'Add to Cart' button for each product.",
            )
            .insert(
                "what is my order total?",
                Reply::computed(|cart| {
                    format!("Your current total is {}.", format_total(&cart.total()))
                }),
            )
            .insert(
                "cancel order",
                "Your order has been canceled. Let me know if you need anything else.",
            )
            .insert(
                "thank you",
                "You're welcome! Let me know if there's anything else I can help with.",
            )
            .insert(DEFAULT_KEY, FALLBACK_REPLY);

        table
    }

    /// Insert or replace an entry. The key is normalised the same way utterances are.
    pub fn insert(&mut self, key: &str, reply: impl Into<Reply>) -> &mut Self {
        self.entries.insert(normalize(key), reply.into());
        self
    }

    /// Exact-match lookup of an already normalised key.
    pub fn get(&self, key: &str) -> Option<&Reply> {
        self.entries.get(key)
    }

    /// Reply for a normalised utterance, falling back to the `default` entry.
    pub fn lookup(&self, key: &str) -> Option<&Reply> {
        self.entries.get(key).or_else(|| self.entries.get(DEFAULT_KEY))
    }

    /// Number of entries, `default` included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
