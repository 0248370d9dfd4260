use crate::model::{ChatMessage, Session};
use crate::remote::{RemoteClient, RemoteError};

/// Fetch the account and build a fresh session
pub fn load_session(remote: &dyn RemoteClient) -> Result<Session, RemoteError> {
    tracing::info!("fetching user and tasks");
    let snapshot = remote.fetch_user_and_tasks()?;
    tracing::info!(tasks = snapshot.tasks.len(), "account fetched");
    Ok(Session::from_snapshot(snapshot))
}

/// Refetch and rebuild every menu. Returns how many staged actions were
/// discarded; on error the session is left as it was.
pub fn reload(session: &mut Session, remote: &dyn RemoteClient) -> Result<usize, RemoteError> {
    let snapshot = remote.fetch_user_and_tasks()?;
    let discarded = session.staged_count();
    if discarded > 0 {
        tracing::warn!(discarded, "reload discarded staged actions");
    }
    session.apply_snapshot(snapshot);
    Ok(discarded)
}

/// The `limit` most recent party chat messages, newest first
pub fn party_chat(remote: &dyn RemoteClient, limit: usize) -> Result<Vec<ChatMessage>, RemoteError> {
    let mut messages = remote.fetch_party_chat()?;
    tracing::info!(messages = messages.len(), "party chat fetched");
    messages.truncate(limit);
    Ok(messages)
}
