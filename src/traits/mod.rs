//! Collaborator seams for the SDK
//!
//! The chain contract, the FHE services and the wallet are external
//! collaborators; these traits define the only surface the SDK depends on.

mod chain;
mod crypto;
mod session;

pub use chain::{NewsReadView, NewsWriteView, PendingTx};
pub use crypto::{DecryptionOracle, EncryptionService, ProofSubmitter};
pub use session::SessionProvider;
