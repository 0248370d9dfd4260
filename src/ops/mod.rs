pub mod fetch;
pub mod sync;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use fetch::{load_session, party_chat, reload};
pub use sync::{Phase, StagedItem, SyncError, SyncFailure, SyncReport, flush, queue};
