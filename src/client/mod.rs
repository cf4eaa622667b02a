//! Publish / reveal pipelines
//!
//! [`NewsClient`] orchestrates the encrypted-record lifecycle: encrypting a
//! draft's score and submitting it with its proof, and driving the two-phase
//! decrypt-then-verify exchange for existing records.

mod news_client;
mod reveal;

pub use news_client::{Collaborators, NewsClient};
pub use reveal::RevealState;
