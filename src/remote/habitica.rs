use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::model::{AccountConfig, AccountSnapshot, AttributeStats, ChatMessage, ServerConfig};

use super::wire::{Envelope, ScoreData, UserData, WireChatMessage, WireTask};
use super::{Operation, Outcome, RemoteClient, RemoteError};

const CLIENT_NAME: &str = "habitui";

/// [`RemoteClient`] backed by the Habitica REST API
#[derive(Clone)]
pub struct HabiticaClient {
    agent: ureq::Agent,
    base_url: String,
    user_id: String,
    api_key: String,
}

impl HabiticaClient {
    pub fn new(account: &AccountConfig, server: &ServerConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(server.timeout_secs))
            .build();
        HabiticaClient {
            agent,
            base_url: server.base_url.trim_end_matches('/').to_string(),
            user_id: account.user_id.clone(),
            api_key: account.api_key.clone(),
        }
    }

    fn request(&self, method: &str, path: &str) -> ureq::Request {
        let url = format!("{}/{}", self.base_url, path);
        self.agent
            .request(method, &url)
            .set("x-api-user", &self.user_id)
            .set("x-api-key", &self.api_key)
            .set("x-client", &format!("{}-{}", self.user_id, CLIENT_NAME))
    }

    /// Send a request and decode the envelope. Anything but a 2xx status
    /// is an error.
    fn send<T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
    ) -> Result<Envelope<T>, RemoteError> {
        let request = self.request(method, path);
        tracing::debug!(method, path, "remote request");
        let result = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        };
        match result {
            Ok(response) => {
                let status = response.status();
                if !(200..300).contains(&status) {
                    let body = response.into_string().unwrap_or_default();
                    return Err(RemoteError::Status { code: status, body });
                }
                response
                    .into_json::<Envelope<T>>()
                    .map_err(|e| RemoteError::Decode(e.to_string()))
            }
            Err(ureq::Error::Status(code, response)) => {
                let body = response.into_string().unwrap_or_default();
                tracing::warn!(method, path, code, "remote request failed");
                Err(RemoteError::Status { code, body })
            }
            Err(ureq::Error::Transport(transport)) => {
                tracing::warn!(method, path, error = %transport, "transport error");
                Err(RemoteError::Transport(transport.to_string()))
            }
        }
    }

    fn fetch_user(&self) -> Result<UserData, RemoteError> {
        self.send::<UserData>("GET", "user", None)?.into_data()
    }

    /// Character attributes for the stats bar
    pub fn fetch_attributes(&self) -> Result<AttributeStats, RemoteError> {
        Ok(self.fetch_user()?.stats.attributes())
    }

    fn score(&self, task_id: &str, direction: &str) -> Result<Outcome, RemoteError> {
        let path = format!("tasks/{}/score/{}", task_id, direction);
        let data = self.send::<ScoreData>("POST", &path, None)?.into_data()?;
        Ok(Outcome {
            stats: Some(data.stats.user_stats()),
            drop: data.drop_event(),
        })
    }

    /// Delete and update responses carry the task, not the user, so the
    /// statistics are re-read. The mutation is already applied at this
    /// point; a failed re-read only loses its delta.
    fn outcome_from_user(&self, op: &Operation) -> Outcome {
        let stats = match self.fetch_user() {
            Ok(user) => Some(user.stats.user_stats()),
            Err(e) => {
                tracing::warn!(%op, error = %e, "could not re-read statistics");
                None
            }
        };
        Outcome { stats, drop: None }
    }
}

impl RemoteClient for HabiticaClient {
    fn fetch_user_and_tasks(&self) -> Result<AccountSnapshot, RemoteError> {
        let user = self.fetch_user()?;
        let wire_tasks = self.send::<Vec<WireTask>>("GET", "tasks/user", None)?.into_data()?;
        let tasks = wire_tasks
            .into_iter()
            .filter_map(WireTask::into_task)
            .collect();
        Ok(AccountSnapshot {
            stats: user.stats.user_stats(),
            tasks,
        })
    }

    fn execute(&self, op: &Operation) -> Result<Outcome, RemoteError> {
        match op {
            Operation::ScoreUp { task_id } => self.score(task_id, "up"),
            Operation::ScoreDown { task_id } => self.score(task_id, "down"),
            Operation::Delete { task_id } => {
                let path = format!("tasks/{}", task_id);
                self.send::<Value>("DELETE", &path, None)?.ensure_success()?;
                Ok(self.outcome_from_user(op))
            }
            Operation::Update { task_id, title } => {
                let path = format!("tasks/{}", task_id);
                self.send::<Value>("PUT", &path, Some(json!({ "text": title })))?
                    .ensure_success()?;
                Ok(self.outcome_from_user(op))
            }
        }
    }

    fn fetch_party_chat(&self) -> Result<Vec<ChatMessage>, RemoteError> {
        let messages = self
            .send::<Vec<WireChatMessage>>("GET", "groups/party/chat", None)?
            .into_data()?;
        Ok(messages
            .into_iter()
            .map(WireChatMessage::into_message)
            .collect())
    }
}
