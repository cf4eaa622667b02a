//! Reveal state tracking and on-chain proof submission
//!
//! Support types for the decryption-verification pipeline: the per-record
//! state machine and the submitter handed to the decryption oracle.

use crate::error::ChainResult;
use crate::model::TxReceipt;
use crate::traits::{NewsWriteView, ProofSubmitter};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Per-record reveal state.
///
/// `Verified` is terminal; a concurrent verification by another actor also
/// lands here. There is no stored distinction between the two paths - once
/// the chain has accepted a proof, only the chain value matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Unverified,
    Verifying,
    Verified,
}

/// Tracks reveal state per record id for the session
#[derive(Clone)]
pub(crate) struct RevealLedger {
    states: Arc<RwLock<HashMap<String, RevealState>>>,
}

impl RevealLedger {
    pub(crate) fn new() -> Self {
        Self {
            states: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub(crate) async fn get(&self, id: &str) -> RevealState {
        self.states
            .read()
            .await
            .get(id)
            .copied()
            .unwrap_or(RevealState::Unverified)
    }

    pub(crate) async fn set(&self, id: &str, state: RevealState) {
        self.states.write().await.insert(id.to_string(), state);
    }
}

/// Proof submitter backed by the signing write view.
///
/// The oracle calls this exactly once, when the clear values and proof for
/// a record are ready for on-chain acceptance.
pub(crate) struct OnChainSubmitter {
    write: Arc<dyn NewsWriteView>,
    record_id: String,
}

impl OnChainSubmitter {
    pub(crate) fn new(write: Arc<dyn NewsWriteView>, record_id: impl Into<String>) -> Self {
        Self {
            write,
            record_id: record_id.into(),
        }
    }
}

#[async_trait]
impl ProofSubmitter for OnChainSubmitter {
    async fn submit(&self, clear_values: &str, proof: &str) -> ChainResult<TxReceipt> {
        self.write
            .verify_decryption(&self.record_id, clear_values, proof)
            .await
    }
}
