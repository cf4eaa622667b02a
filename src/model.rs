//! Record model and wire-facing types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Source label attached to every synced record.
///
/// The chain does not store a source; records carry this fixed label so the
/// search filter can match on it like any other field.
pub const DEFAULT_SOURCE: &str = "Encrypted Newswire";

/// News category, an 8-slot fixed enumeration.
///
/// Stored on-chain as a raw index; the label is always derived as
/// `index % 8` and never stored independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Technology,
    Politics,
    Economy,
    Entertainment,
    Sports,
    Health,
    Education,
    World,
}

impl Category {
    /// All categories in on-chain index order
    pub const ALL: [Category; 8] = [
        Category::Technology,
        Category::Politics,
        Category::Economy,
        Category::Entertainment,
        Category::Sports,
        Category::Health,
        Category::Education,
        Category::World,
    ];

    /// Derive a category from a raw on-chain index (wraps modulo 8)
    pub fn from_index(index: u64) -> Self {
        Self::ALL[(index % Self::ALL.len() as u64) as usize]
    }

    /// The on-chain index of this category
    pub fn index(&self) -> u64 {
        Self::ALL.iter().position(|c| c == self).unwrap_or(0) as u64
    }

    /// Human-readable label, used for display and search matching
    pub fn label(&self) -> &'static str {
        match self {
            Category::Technology => "Technology",
            Category::Politics => "Politics",
            Category::Economy => "Economy",
            Category::Entertainment => "Entertainment",
            Category::Sports => "Sports",
            Category::Health => "Health",
            Category::Education => "Education",
            Category::World => "World",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Opaque reference to a ciphertext stored on-chain
///
/// Used to request decryption without exposing the ciphertext itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CiphertextHandle(pub String);

impl CiphertextHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CiphertextHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw record fields as returned by the chain read view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordFields {
    /// Record title
    pub title: String,
    /// Free-text description
    pub description: String,
    /// Creating address
    pub creator: String,
    /// Creation time (unix seconds)
    pub timestamp: u64,
    /// Plaintext engagement proxy (public by design, for trending stats)
    pub public_score: u64,
    /// Raw category index; the label is derived client-side
    pub category_index: u64,
    /// Whether a decryption proof has been accepted on-chain
    pub is_verified: bool,
    /// Chain-confirmed clear value; zero until verified
    pub decrypted_value: u64,
}

/// A published news item, as held in the local record set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsRecord {
    /// Globally unique id, assigned at creation time
    pub id: String,
    pub title: String,
    pub description: String,
    /// Derived from `category_index`, never stored independently
    pub category: Category,
    /// Source label (fixed, see [`DEFAULT_SOURCE`])
    pub source: String,
    pub creator: String,
    /// Creation time (unix seconds)
    pub created_at: u64,
    /// Plaintext engagement proxy, 1-10 by form validation only
    pub public_score: u64,
    /// Raw index mirrored from chain
    pub category_index: u64,
    /// Monotonic false→true; never reverts once a proof lands
    pub is_verified: bool,
    /// Authoritative only once `is_verified` is true
    pub decrypted_value: u64,
    /// Fetched lazily, only needed to start decryption
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypted_value_handle: Option<CiphertextHandle>,
}

impl NewsRecord {
    /// Map raw chain fields into the local record model
    pub fn from_chain(id: impl Into<String>, fields: RecordFields) -> Self {
        Self {
            id: id.into(),
            title: fields.title,
            description: fields.description,
            category: Category::from_index(fields.category_index),
            source: DEFAULT_SOURCE.to_string(),
            creator: fields.creator,
            created_at: fields.timestamp,
            public_score: fields.public_score,
            category_index: fields.category_index,
            is_verified: fields.is_verified,
            decrypted_value: fields.decrypted_value,
            encrypted_value_handle: None,
        }
    }
}

/// Ciphertext plus validity proof, as produced by the encryption service
#[derive(Debug, Clone)]
pub struct EncryptedInput {
    pub ciphertext: Vec<u8>,
    pub proof: Vec<u8>,
}

/// Clear values recovered by the decryption oracle, keyed by handle
#[derive(Debug, Clone, Default)]
pub struct ClearValues(pub HashMap<CiphertextHandle, u64>);

impl ClearValues {
    pub fn get(&self, handle: &CiphertextHandle) -> Option<u64> {
        self.0.get(handle).copied()
    }
}

/// Receipt for a confirmed transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxReceipt {
    /// Transaction hash
    pub tx_hash: String,
}

/// Input for the create-record write
///
/// Carries the plaintext score as a public field alongside the ciphertext;
/// the contract exposes it for public trending statistics.
#[derive(Debug, Clone)]
pub struct CreateRecordInput {
    pub id: String,
    pub title: String,
    pub ciphertext: Vec<u8>,
    pub proof: Vec<u8>,
    pub public_score: u64,
    pub category_index: u64,
    pub description: String,
}

/// User-entered draft for a new record
#[derive(Debug, Clone)]
pub struct NewsDraft {
    pub title: String,
    pub category: Category,
    /// Engagement score, 1-10 by form validation; encrypted before submission
    pub engagement: u64,
    pub description: String,
}

/// Wallet session snapshot from the session provider
#[derive(Debug, Clone, Default)]
pub struct WalletSession {
    pub connected: bool,
    pub address: Option<String>,
}

impl WalletSession {
    /// The active address, if a session is connected
    pub fn active_address(&self) -> Option<&str> {
        if self.connected {
            self.address.as_deref()
        } else {
            None
        }
    }
}
