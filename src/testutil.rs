//! Shared fakes for pipeline tests

use crate::error::{ChainError, ChainResult, EncryptError, OracleError};
use crate::model::{
    CiphertextHandle, ClearValues, CreateRecordInput, EncryptedInput, RecordFields, TxReceipt,
    WalletSession,
};
use crate::traits::{
    DecryptionOracle, EncryptionService, NewsReadView, NewsWriteView, PendingTx, ProofSubmitter,
    SessionProvider,
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub fn fields(title: &str, score: u64) -> RecordFields {
    RecordFields {
        title: title.into(),
        description: String::new(),
        creator: "0xcafe".into(),
        timestamp: 1_700_000_000,
        public_score: score,
        category_index: 0,
        is_verified: false,
        decrypted_value: 0,
    }
}

/// In-memory chain implementing both views, with switches for the failure
/// modes the pipelines must classify.
pub struct FakeChain {
    records: Mutex<Vec<(String, RecordFields)>>,
    fail_ids: Mutex<HashSet<String>>,
    list_fails: AtomicBool,
    reject_user: AtomicBool,
    // When set, the next verify write loses the race: the record flips
    // verified with this value and the write is rejected.
    race_value: AtomicU64,
    race_on_verify: AtomicBool,
    available: AtomicBool,
    reads: AtomicUsize,
    writes: AtomicUsize,
    // When held, pending transactions park in confirmed() until released,
    // so tests can observe the confirming phase.
    hold_confirmations: AtomicBool,
    confirm_gate: Arc<Notify>,
}

impl FakeChain {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail_ids: Mutex::new(HashSet::new()),
            list_fails: AtomicBool::new(false),
            reject_user: AtomicBool::new(false),
            race_value: AtomicU64::new(0),
            race_on_verify: AtomicBool::new(false),
            available: AtomicBool::new(true),
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
            hold_confirmations: AtomicBool::new(false),
            confirm_gate: Arc::new(Notify::new()),
        }
    }

    pub fn insert(&self, id: &str, fields: RecordFields) {
        self.records.lock().unwrap().push((id.to_string(), fields));
    }

    pub fn remove(&self, id: &str) {
        self.records.lock().unwrap().retain(|(rid, _)| rid != id);
    }

    pub fn mark_verified(&self, id: &str, value: u64) {
        let mut records = self.records.lock().unwrap();
        if let Some((_, fields)) = records.iter_mut().find(|(rid, _)| rid == id) {
            fields.is_verified = true;
            fields.decrypted_value = value;
        }
    }

    pub fn fail_record(&self, id: &str) {
        self.fail_ids.lock().unwrap().insert(id.to_string());
    }

    pub fn fail_listing(&self) {
        self.list_fails.store(true, Ordering::SeqCst);
    }

    pub fn reject_as_user(&self) {
        self.reject_user.store(true, Ordering::SeqCst);
    }

    pub fn set_unavailable(&self) {
        self.available.store(false, Ordering::SeqCst);
    }

    pub fn lose_verify_race(&self, winner_value: u64) {
        self.race_value.store(winner_value, Ordering::SeqCst);
        self.race_on_verify.store(true, Ordering::SeqCst);
    }

    pub fn hold_confirmations(&self) {
        self.hold_confirmations.store(true, Ordering::SeqCst);
    }

    pub fn release_confirmations(&self) {
        self.confirm_gate.notify_one();
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn record(&self, id: &str) -> Option<RecordFields> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|(rid, _)| rid == id)
            .map(|(_, f)| f.clone())
    }
}

#[async_trait]
impl NewsReadView for FakeChain {
    async fn list_record_ids(&self) -> ChainResult<Vec<String>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.list_fails.load(Ordering::SeqCst) {
            return Err(ChainError::Call("listing unavailable".into()));
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .map(|(id, _)| id.clone())
            .collect())
    }

    async fn get_record(&self, id: &str) -> ChainResult<RecordFields> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_ids.lock().unwrap().contains(id) {
            return Err(ChainError::Call(format!("fetch failed for {}", id)));
        }
        self.record(id)
            .ok_or_else(|| ChainError::NotFound(id.to_string()))
    }

    async fn get_ciphertext_handle(&self, id: &str) -> ChainResult<CiphertextHandle> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.record(id).is_none() {
            return Err(ChainError::NotFound(id.to_string()));
        }
        Ok(CiphertextHandle::new(format!("handle-{}", id)))
    }

    async fn check_availability(&self) -> ChainResult<bool> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.available.load(Ordering::SeqCst) {
            Ok(true)
        } else {
            Err(ChainError::Call("contract unreachable".into()))
        }
    }
}

struct FakePendingTx {
    hash: String,
    gate: Option<Arc<Notify>>,
}

#[async_trait]
impl PendingTx for FakePendingTx {
    fn tx_hash(&self) -> &str {
        &self.hash
    }

    async fn confirmed(self: Box<Self>) -> ChainResult<TxReceipt> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        Ok(TxReceipt { tx_hash: self.hash })
    }
}

#[async_trait]
impl NewsWriteView for FakeChain {
    async fn create_record(&self, input: &CreateRecordInput) -> ChainResult<Box<dyn PendingTx>> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.reject_user.load(Ordering::SeqCst) {
            return Err(ChainError::UserRejected);
        }
        self.insert(
            &input.id,
            RecordFields {
                title: input.title.clone(),
                description: input.description.clone(),
                creator: "0xcafe".into(),
                timestamp: 1_700_000_123,
                public_score: input.public_score,
                category_index: input.category_index,
                is_verified: false,
                decrypted_value: 0,
            },
        );
        let gate = self
            .hold_confirmations
            .load(Ordering::SeqCst)
            .then(|| self.confirm_gate.clone());
        Ok(Box::new(FakePendingTx {
            hash: format!("0xtx-{}", input.id),
            gate,
        }))
    }

    async fn verify_decryption(
        &self,
        id: &str,
        clear_values: &str,
        _proof: &str,
    ) -> ChainResult<TxReceipt> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.race_on_verify.swap(false, Ordering::SeqCst) {
            self.mark_verified(id, self.race_value.load(Ordering::SeqCst));
            return Err(ChainError::AlreadyVerified);
        }
        let bytes = hex::decode(clear_values.trim_start_matches("0x"))
            .map_err(|e| ChainError::Call(e.to_string()))?;
        let mut word = [0u8; 8];
        word.copy_from_slice(&bytes[bytes.len() - 8..]);
        let value = u64::from_be_bytes(word);
        self.mark_verified(id, value);
        Ok(TxReceipt {
            tx_hash: format!("0xverify-{}", id),
        })
    }
}

pub struct FakeEncryptor {
    reject: bool,
}

impl FakeEncryptor {
    pub fn new() -> Self {
        Self { reject: false }
    }

    pub fn rejecting() -> Self {
        Self { reject: true }
    }
}

#[async_trait]
impl EncryptionService for FakeEncryptor {
    async fn encrypt(
        &self,
        _target_address: &str,
        _signer_address: &str,
        value: u64,
    ) -> Result<EncryptedInput, EncryptError> {
        if self.reject {
            return Err(EncryptError::Rejected("plaintext is not an integer".into()));
        }
        Ok(EncryptedInput {
            ciphertext: value.to_be_bytes().to_vec(),
            proof: vec![0xaa; 4],
        })
    }
}

pub struct FakeOracle {
    value: u64,
    fail: bool,
}

impl FakeOracle {
    pub fn new(value: u64) -> Self {
        Self { value, fail: false }
    }

    pub fn failing() -> Self {
        Self { value: 0, fail: true }
    }
}

#[async_trait]
impl DecryptionOracle for FakeOracle {
    async fn request_decryption(
        &self,
        handles: &[CiphertextHandle],
        _target_address: &str,
        submitter: &dyn ProofSubmitter,
    ) -> Result<ClearValues, OracleError> {
        if self.fail {
            return Err(OracleError::Service("oracle offline".into()));
        }

        // ABI-style 32-byte big-endian word
        let mut word = [0u8; 32];
        word[24..].copy_from_slice(&self.value.to_be_bytes());
        let encoded = format!("0x{}", hex::encode(word));
        match submitter.submit(&encoded, "proof-ok").await {
            Ok(_) => {}
            Err(ChainError::AlreadyVerified) => return Err(OracleError::AlreadyVerified),
            Err(e) => return Err(OracleError::Service(e.to_string())),
        }

        let mut values = HashMap::new();
        for handle in handles {
            values.insert(handle.clone(), self.value);
        }
        Ok(ClearValues(values))
    }
}

pub struct FakeSession {
    connected: bool,
}

impl FakeSession {
    pub fn new(connected: bool) -> Self {
        Self { connected }
    }
}

impl SessionProvider for FakeSession {
    fn session(&self) -> WalletSession {
        WalletSession {
            connected: self.connected,
            address: self.connected.then(|| "0xuser".to_string()),
        }
    }
}
