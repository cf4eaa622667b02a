//! Chain view traits

use crate::error::ChainResult;
use crate::model::{CiphertextHandle, CreateRecordInput, RecordFields, TxReceipt};
use async_trait::async_trait;

/// Read-only view of the news contract.
///
/// Implemented by an RPC provider or an indexer gateway (see the `gateway`
/// module for the HTTP adapter shipped with this crate).
#[async_trait]
pub trait NewsReadView: Send + Sync {
    /// Enumerate all record ids known to the contract
    async fn list_record_ids(&self) -> ChainResult<Vec<String>>;

    /// Fetch the fields of a single record
    async fn get_record(&self, id: &str) -> ChainResult<RecordFields>;

    /// Fetch the opaque handle of a record's on-chain ciphertext
    async fn get_ciphertext_handle(&self, id: &str) -> ChainResult<CiphertextHandle>;

    /// Probe whether the contract is reachable and serving
    async fn check_availability(&self) -> ChainResult<bool>;
}

/// A submitted transaction that has not reached finality yet.
///
/// Splitting submission from finality lets the pipelines report the
/// "submitting" and "confirming" phases distinctly.
#[async_trait]
pub trait PendingTx: Send + Sync {
    /// Hash assigned at submission time
    fn tx_hash(&self) -> &str;

    /// Await finality for this transaction
    async fn confirmed(self: Box<Self>) -> ChainResult<TxReceipt>;
}

/// Signing view of the news contract.
///
/// Requires an active wallet signer; the session provider decides whether
/// one is available.
#[async_trait]
pub trait NewsWriteView: Send + Sync {
    /// Submit a create-record transaction carrying ciphertext, proof and
    /// the public metadata
    async fn create_record(&self, input: &CreateRecordInput) -> ChainResult<Box<dyn PendingTx>>;

    /// Submit a decryption proof for on-chain acceptance.
    ///
    /// `clear_values` is the ABI-encoded clear value set produced by the
    /// decryption oracle. Returns [`crate::error::ChainError::AlreadyVerified`]
    /// when another actor's proof landed first.
    async fn verify_decryption(
        &self,
        id: &str,
        clear_values: &str,
        proof: &str,
    ) -> ChainResult<TxReceipt>;
}
