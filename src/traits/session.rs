//! Wallet session seam

use crate::model::WalletSession;

/// Supplies the current wallet connection status and active address.
///
/// Queried at every pipeline entry point; the SDK never caches a session
/// across operations.
pub trait SessionProvider: Send + Sync {
    /// Snapshot of the current session
    fn session(&self) -> WalletSession;
}
