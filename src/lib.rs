//! Cipherfeed SDK - FHE-protected news publishing
//!
//! SDK for client applications that publish and read news records whose
//! engagement score is FHE-encrypted before it touches the chain, and later
//! cooperatively decrypted with an on-chain verification step.
//!
//! # Architecture
//!
//! The SDK owns the encrypted-record lifecycle and keeps the presentation
//! layer consistent with chain state:
//! - **Publish**: encrypt score → submit create transaction with proof →
//!   await confirmation → resynchronize
//! - **Reveal**: short-circuit if already verified on-chain, otherwise
//!   off-chain decryption followed by an on-chain verification transaction
//! - **Sync**: full-replace snapshot of the on-chain record set
//! - **View**: search filter, fixed-size pagination, aggregate statistics
//!
//! Cryptography, the contract, and the wallet are external collaborators
//! behind traits; the SDK never implements them.
//!
//! # Example
//!
//! ```rust,ignore
//! use cipherfeed_sdk::{Collaborators, NewsClient, NewsDraft, Category, FeedQuery};
//!
//! let client = NewsClient::new(contract_address, Collaborators {
//!     read, write, encryptor, oracle, session,
//! });
//!
//! // Publish a record with an encrypted engagement score
//! client.publish(NewsDraft {
//!     title: "Quiet launch".into(),
//!     category: Category::Technology,
//!     engagement: 7,
//!     description: String::new(),
//! }).await?;
//!
//! // Reveal a record's score (two-phase decrypt-then-verify)
//! let value = client.reveal("news-1700000000000").await?;
//!
//! // Derive the visible page
//! let page = client.feed(&FeedQuery::new().with_search("launch")).await;
//! ```

// Collaborator seams (chain views, crypto services, wallet session)
pub mod traits;

// Record model and wire-facing types
pub mod model;

// Chain data synchronization and the canonical record store
pub mod sync;

// Filter, pagination and statistics derivation
pub mod view;

// Transaction status slot and user history log
pub mod status;

// Publish / reveal pipelines
pub mod client;

// HTTP read adapter for indexer gateways
#[cfg(feature = "gateway")]
pub mod gateway;

// Error types
pub mod error;

// Shared fakes for pipeline tests
#[cfg(test)]
pub(crate) mod testutil;

// Re-export collaborator traits
pub use traits::{
    DecryptionOracle, EncryptionService, NewsReadView, NewsWriteView, PendingTx, ProofSubmitter,
    SessionProvider,
};

// Re-export model types
pub use model::{
    Category, CiphertextHandle, ClearValues, CreateRecordInput, EncryptedInput, NewsDraft,
    NewsRecord, RecordFields, TxReceipt, WalletSession,
};

// Re-export pipeline types
pub use client::{Collaborators, NewsClient, RevealState};

// Re-export sync and view types
pub use sync::{ChainDataSync, FetchFailure, NewsStore, SyncReport};
pub use view::{FeedPage, FeedQuery, FeedStats, PAGE_SIZE};

// Re-export status types
pub use status::{HistoryLog, StatusKind, StatusSlot, StatusTracker};

// Re-export gateway types
#[cfg(feature = "gateway")]
pub use gateway::{GatewayClient, GatewayConfig};

// Re-export error types
pub use error::{ChainError, ChainResult, EncryptError, NewsError, OracleError, Result};
