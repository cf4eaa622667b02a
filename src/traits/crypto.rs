//! FHE service seams
//!
//! The SDK never implements cryptography; these traits wrap the encryption
//! SDK and the threshold decryption oracle it orchestrates.

use crate::error::{ChainResult, EncryptError, OracleError};
use crate::model::{CiphertextHandle, ClearValues, EncryptedInput, TxReceipt};
use async_trait::async_trait;

/// Produces ciphertext plus validity proof for a plaintext integer.
#[async_trait]
pub trait EncryptionService: Send + Sync {
    /// Encrypt `value` bound to the target contract and the signing address
    async fn encrypt(
        &self,
        target_address: &str,
        signer_address: &str,
        value: u64,
    ) -> Result<EncryptedInput, EncryptError>;
}

/// Submits a clear-value/proof pair on-chain on behalf of the oracle.
///
/// The reveal pipeline hands the oracle an implementation backed by the
/// signing write view; the oracle invokes it exactly once, when the proof
/// is ready.
#[async_trait]
pub trait ProofSubmitter: Send + Sync {
    /// Submit the ABI-encoded clear values and decryption proof
    async fn submit(&self, clear_values: &str, proof: &str) -> ChainResult<TxReceipt>;
}

/// Off-chain decryption plus on-chain verification hand-off.
#[async_trait]
pub trait DecryptionOracle: Send + Sync {
    /// Recover the clear values for `handles`.
    ///
    /// The oracle performs the off-chain decryption, then calls
    /// `submitter.submit` with the proof needed for on-chain acceptance
    /// before returning the recovered values. A submitter rejection with
    /// [`crate::error::ChainError::AlreadyVerified`] must surface as
    /// [`OracleError::AlreadyVerified`].
    async fn request_decryption(
        &self,
        handles: &[CiphertextHandle],
        target_address: &str,
        submitter: &dyn ProofSubmitter,
    ) -> Result<ClearValues, OracleError>;
}
