//! Error types for the Cipherfeed SDK

use thiserror::Error;

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, NewsError>;

/// SDK error types
///
/// Every pipeline converts failures into one of these at its own boundary;
/// nothing propagates past a public entry point uncaught.
#[derive(Error, Debug)]
pub enum NewsError {
    /// No wallet session is active
    #[error("wallet connection required")]
    ConnectionRequired,

    /// The encryption service rejected the plaintext
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// The signer declined the transaction
    #[error("transaction rejected by user")]
    UserRejected,

    /// The create-record transaction failed for any other reason
    #[error("submission failed: {0}")]
    Submit(String),

    /// The record-id listing call failed
    #[error("sync failed: {0}")]
    Sync(String),

    /// Decryption or on-chain verification failed
    #[error("reveal failed: {0}")]
    Reveal(String),

    /// Record not found on-chain
    #[error("record not found: {0}")]
    NotFound(String),
}

/// Result type for chain view implementations
pub type ChainResult<T> = std::result::Result<T, ChainError>;

/// Errors surfaced by chain read/write view implementations
///
/// `UserRejected` and `AlreadyVerified` are carried as typed variants so the
/// pipelines classify them by matching, never by inspecting error text.
#[derive(Error, Debug)]
pub enum ChainError {
    /// Record not found on-chain
    #[error("record not found: {0}")]
    NotFound(String),

    /// The contract rejected the proof because the record is already verified
    #[error("decryption already verified on-chain")]
    AlreadyVerified,

    /// The signer declined to sign
    #[error("signature rejected by user")]
    UserRejected,

    /// Any other failed chain call
    #[error("chain call failed: {0}")]
    Call(String),
}

#[cfg(feature = "gateway")]
impl From<reqwest::Error> for ChainError {
    fn from(err: reqwest::Error) -> Self {
        ChainError::Call(err.to_string())
    }
}

/// Errors surfaced by the encryption service
#[derive(Error, Debug)]
pub enum EncryptError {
    /// The service rejected the plaintext (e.g. not an integer in range)
    #[error("plaintext rejected: {0}")]
    Rejected(String),

    /// The service itself failed
    #[error("encryption service error: {0}")]
    Service(String),
}

/// Errors surfaced by the decryption/verification oracle
#[derive(Error, Debug)]
pub enum OracleError {
    /// The proof callback was rejected because another actor verified first.
    /// The reveal pipeline treats this as a success-equivalent outcome.
    #[error("record was verified concurrently")]
    AlreadyVerified,

    /// The oracle failed to produce clear values or a proof
    #[error("decryption oracle error: {0}")]
    Service(String),
}
