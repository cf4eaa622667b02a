//! News client orchestrating the encrypted-record lifecycle

use crate::client::reveal::{OnChainSubmitter, RevealLedger};
use crate::client::RevealState;
use crate::error::{ChainError, NewsError, Result};
use crate::model::{CreateRecordInput, NewsDraft, TxReceipt};
use crate::status::{HistoryLog, StatusTracker};
use crate::sync::{ChainDataSync, NewsStore, SyncReport};
use crate::traits::{
    DecryptionOracle, EncryptionService, NewsReadView, NewsWriteView, SessionProvider,
};
use crate::view::{derive_feed, FeedPage, FeedQuery};
use std::sync::Arc;

/// External collaborators the client orchestrates.
///
/// All cryptography, contract access and wallet state live behind these
/// seams; the client only sequences them.
pub struct Collaborators {
    pub read: Arc<dyn NewsReadView>,
    pub write: Arc<dyn NewsWriteView>,
    pub encryptor: Arc<dyn EncryptionService>,
    pub oracle: Arc<dyn DecryptionOracle>,
    pub session: Arc<dyn SessionProvider>,
}

/// Client for publishing and revealing FHE-protected news records.
///
/// Owns the session-scoped state the presentation layer renders: the
/// canonical record set (via [`ChainDataSync`]), the transaction status
/// slot, the user history log and the per-record reveal states. Every
/// failure is converted into a status notification plus a typed `Result`
/// at the pipeline boundary; nothing propagates past these entry points.
///
/// # Example
///
/// ```rust,ignore
/// use cipherfeed_sdk::{Collaborators, NewsClient, NewsDraft, Category};
///
/// let client = NewsClient::new("0xcontract", Collaborators {
///     read, write, encryptor, oracle, session,
/// });
///
/// client.refresh().await?;
/// client.publish(NewsDraft {
///     title: "Quiet launch".into(),
///     category: Category::Technology,
///     engagement: 7,
///     description: String::new(),
/// }).await?;
/// ```
pub struct NewsClient {
    contract_address: String,
    read: Arc<dyn NewsReadView>,
    write: Arc<dyn NewsWriteView>,
    encryptor: Arc<dyn EncryptionService>,
    oracle: Arc<dyn DecryptionOracle>,
    session: Arc<dyn SessionProvider>,
    sync: ChainDataSync,
    status: StatusTracker,
    history: HistoryLog,
    reveals: RevealLedger,
}

impl NewsClient {
    /// Create a client for the contract at `contract_address`
    pub fn new(contract_address: impl Into<String>, collaborators: Collaborators) -> Self {
        let Collaborators {
            read,
            write,
            encryptor,
            oracle,
            session,
        } = collaborators;

        Self {
            contract_address: contract_address.into(),
            sync: ChainDataSync::new(read.clone(), session.clone()),
            read,
            write,
            encryptor,
            oracle,
            session,
            status: StatusTracker::new(),
            history: HistoryLog::new(),
            reveals: RevealLedger::new(),
        }
    }

    /// The contract this client targets
    pub fn contract_address(&self) -> &str {
        &self.contract_address
    }

    /// The transaction status slot, for rendering
    pub fn status(&self) -> &StatusTracker {
        &self.status
    }

    /// The user history log, for rendering
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// The canonical record store
    pub fn store(&self) -> &NewsStore {
        self.sync.store()
    }

    /// Current reveal state for a record
    pub async fn reveal_state(&self, id: &str) -> RevealState {
        self.reveals.get(id).await
    }

    /// Resynchronize the record set from chain state
    pub async fn refresh(&self) -> Result<SyncReport> {
        match self.sync.sync().await {
            Ok(report) => Ok(report),
            Err(e) => {
                self.status.error("Failed to load records").await;
                Err(e)
            }
        }
    }

    /// Derive the visible page and statistics from the current snapshot
    pub async fn feed(&self, query: &FeedQuery) -> FeedPage {
        derive_feed(&self.sync.store().snapshot().await, query)
    }

    /// Probe contract availability, reporting the outcome through the
    /// status slot
    pub async fn check_availability(&self) -> Result<bool> {
        match self.read.check_availability().await {
            Ok(available) => {
                self.status.success("Contract availability confirmed").await;
                Ok(available)
            }
            Err(e) => {
                self.status.error("Availability check failed").await;
                Err(NewsError::Sync(e.to_string()))
            }
        }
    }

    /// Publish a draft with an encrypted engagement score.
    ///
    /// Phases, each reported through the status slot: encrypt the score,
    /// submit the create transaction (the plaintext score also rides along
    /// as a public field for trending statistics), await confirmation,
    /// then append history and resynchronize. A signer rejection maps to
    /// [`NewsError::UserRejected`]; there is no automatic retry.
    pub async fn publish(&self, draft: NewsDraft) -> Result<TxReceipt> {
        let session = self.session.session();
        let Some(address) = session.active_address().map(str::to_string) else {
            self.status.error("Connect a wallet first").await;
            return Err(NewsError::ConnectionRequired);
        };

        self.status.pending("Encrypting engagement score...").await;
        let encrypted = match self
            .encryptor
            .encrypt(&self.contract_address, &address, draft.engagement)
            .await
        {
            Ok(encrypted) => encrypted,
            Err(e) => {
                self.status.error(format!("Encryption failed: {}", e)).await;
                return Err(NewsError::Encryption(e.to_string()));
            }
        };

        let input = CreateRecordInput {
            id: new_record_id(),
            title: draft.title.clone(),
            ciphertext: encrypted.ciphertext,
            proof: encrypted.proof,
            public_score: draft.engagement,
            category_index: draft.category.index(),
            description: draft.description,
        };

        self.status.pending("Submitting encrypted record...").await;
        let pending = match self.write.create_record(&input).await {
            Ok(pending) => pending,
            Err(e) => return Err(self.submit_failure(e).await),
        };

        self.status
            .pending(format!("Waiting for confirmation of {}...", pending.tx_hash()))
            .await;
        let receipt = match pending.confirmed().await {
            Ok(receipt) => receipt,
            Err(e) => return Err(self.submit_failure(e).await),
        };

        self.history.append(format!("Published: {}", draft.title)).await;
        self.status.success("Record published").await;
        self.resync_after_mutation().await;

        Ok(receipt)
    }

    /// Reveal a record's encrypted score.
    ///
    /// Short-circuits with the chain-stored value when the record is
    /// already verified (terminal, no transaction). Otherwise fetches the
    /// ciphertext handle and hands the oracle a submitter that lands the
    /// verification transaction; a concurrent verification by another
    /// actor is success-equivalent and returns `Ok(None)` - the caller
    /// re-reads the resynced record for the authoritative value.
    pub async fn reveal(&self, id: &str) -> Result<Option<u64>> {
        if self.session.session().active_address().is_none() {
            self.status.error("Connect a wallet first").await;
            return Err(NewsError::ConnectionRequired);
        }

        let fields = match self.read.get_record(id).await {
            Ok(fields) => fields,
            Err(ChainError::NotFound(_)) => {
                self.status.error("Record not found").await;
                return Err(NewsError::NotFound(id.to_string()));
            }
            Err(e) => {
                self.status.error(format!("Reveal failed: {}", e)).await;
                return Err(NewsError::Reveal(e.to_string()));
            }
        };

        if fields.is_verified {
            // Terminal: the chain value is authoritative, no write needed
            self.reveals.set(id, RevealState::Verified).await;
            self.status.success("Already verified on-chain").await;
            return Ok(Some(fields.decrypted_value));
        }

        self.reveals.set(id, RevealState::Verifying).await;

        let handle = match self.read.get_ciphertext_handle(id).await {
            Ok(handle) => handle,
            Err(e) => {
                self.reveals.set(id, RevealState::Unverified).await;
                self.status.error(format!("Reveal failed: {}", e)).await;
                return Err(NewsError::Reveal(e.to_string()));
            }
        };

        self.status.pending("Requesting threshold decryption...").await;
        let submitter = OnChainSubmitter::new(self.write.clone(), id);
        let outcome = self
            .oracle
            .request_decryption(
                std::slice::from_ref(&handle),
                &self.contract_address,
                &submitter,
            )
            .await;

        match outcome {
            Ok(clear_values) => {
                self.resync_after_mutation().await;
                self.history.append(format!("Revealed: {}", fields.title)).await;
                self.status.success("Decryption verified on-chain").await;
                self.reveals.set(id, RevealState::Verified).await;
                Ok(clear_values.get(&handle))
            }
            Err(crate::error::OracleError::AlreadyVerified) => {
                // Another actor's proof landed first; same terminal state
                self.reveals.set(id, RevealState::Verified).await;
                self.status.success("Already verified on-chain").await;
                self.resync_after_mutation().await;
                Ok(None)
            }
            Err(crate::error::OracleError::Service(message)) => {
                self.reveals.set(id, RevealState::Unverified).await;
                self.status.error(format!("Reveal failed: {}", message)).await;
                Err(NewsError::Reveal(message))
            }
        }
    }

    async fn submit_failure(&self, err: ChainError) -> NewsError {
        match err {
            ChainError::UserRejected => {
                self.status.error("Transaction cancelled").await;
                NewsError::UserRejected
            }
            other => {
                self.status
                    .error(format!("Submission failed: {}", other))
                    .await;
                NewsError::Submit(other.to_string())
            }
        }
    }

    // The mutation already confirmed; a failed resync only delays the next
    // snapshot, so it is logged rather than surfaced.
    async fn resync_after_mutation(&self) {
        if let Err(e) = self.sync.sync().await {
            tracing::warn!("resync after confirmed mutation failed: {}", e);
        }
    }
}

/// Record ids are derived from the creation timestamp, matching the
/// contract's expectation of client-assigned unique ids.
fn new_record_id() -> String {
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    format!("news-{}", millis)
}
