//! In-memory store for tests and local dry runs.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use hamqrg_acl::Role;
use hamqrg_core::{Error, Result};
use tokio::sync::Mutex;

use super::traits::{DashboardStore, RepeaterUpdate, ReportStatus};

/// A [`DashboardStore`] that keeps everything in memory.
///
/// Clones share state. Every call is counted, so tests can assert that a
/// denied action never reached the store.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    user_roles: BTreeSet<(String, String)>,
    reports: HashMap<String, ReportStatus>,
    repeaters: HashMap<String, Vec<RepeaterUpdate>>,
    invocations: Vec<(String, serde_json::Value)>,
    sync_response: serde_json::Value,
    failure: Option<String>,
    upsert_failure: Option<String>,
    calls: usize,
}

impl InMemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                failure: Some(message.into()),
                ..State::default()
            })),
        }
    }

    /// A store where only role upserts fail with `message`.
    pub fn failing_upserts(message: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                upsert_failure: Some(message.into()),
                ..State::default()
            })),
        }
    }

    /// Seed a role grant without going through the call counter.
    pub async fn insert_role(&self, user_id: impl Into<String>, role: &Role) {
        self.state
            .lock()
            .await
            .user_roles
            .insert((user_id.into(), role.as_str().to_string()));
    }

    /// Set the value remote procedures return.
    pub async fn set_invoke_response(&self, response: serde_json::Value) {
        self.state.lock().await.sync_response = response;
    }

    /// Seed a report.
    pub async fn insert_report(&self, report_id: impl Into<String>, status: ReportStatus) {
        self.state
            .lock()
            .await
            .reports
            .insert(report_id.into(), status);
    }

    /// Roles currently granted to `user_id`.
    pub async fn roles_of(&self, user_id: &str) -> Vec<Role> {
        self.state
            .lock()
            .await
            .user_roles
            .iter()
            .filter(|(user, _)| user == user_id)
            .map(|(_, role)| Role::parse(role))
            .collect()
    }

    /// Current status of a report.
    pub async fn report_status(&self, report_id: &str) -> Option<ReportStatus> {
        self.state.lock().await.reports.get(report_id).copied()
    }

    /// Updates applied to a repeater, oldest first.
    pub async fn repeater_updates(&self, repeater_id: &str) -> Vec<RepeaterUpdate> {
        self.state
            .lock()
            .await
            .repeaters
            .get(repeater_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Remote procedure calls made so far.
    pub async fn invocations(&self) -> Vec<(String, serde_json::Value)> {
        self.state.lock().await.invocations.clone()
    }

    /// Number of store calls made so far, failed ones included.
    pub async fn call_count(&self) -> usize {
        self.state.lock().await.calls
    }
}

impl State {
    fn begin(&mut self) -> Result<()> {
        self.calls += 1;
        match &self.failure {
            Some(message) => Err(Error::store(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DashboardStore for InMemoryStore {
    async fn upsert_user_role(&self, user_id: &str, role: &Role) -> Result<()> {
        let mut state = self.state.lock().await;
        state.begin()?;
        if let Some(message) = &state.upsert_failure {
            return Err(Error::store(message.clone()));
        }
        state
            .user_roles
            .insert((user_id.to_string(), role.as_str().to_string()));
        Ok(())
    }

    async fn delete_user_role(&self, user_id: &str, role: &Role) -> Result<()> {
        let mut state = self.state.lock().await;
        state.begin()?;
        state
            .user_roles
            .remove(&(user_id.to_string(), role.as_str().to_string()));
        Ok(())
    }

    async fn update_report_status(&self, report_id: &str, status: ReportStatus) -> Result<()> {
        let mut state = self.state.lock().await;
        state.begin()?;
        if let Some(current) = state.reports.get_mut(report_id) {
            *current = status;
        }
        Ok(())
    }

    async fn update_repeater(&self, repeater_id: &str, fields: &RepeaterUpdate) -> Result<()> {
        let mut state = self.state.lock().await;
        state.begin()?;
        state
            .repeaters
            .entry(repeater_id.to_string())
            .or_default()
            .push(fields.clone());
        Ok(())
    }

    async fn invoke(&self, function: &str, body: serde_json::Value) -> Result<serde_json::Value> {
        let mut state = self.state.lock().await;
        state.begin()?;
        state.invocations.push((function.to_string(), body));
        Ok(state.sync_response.clone())
    }
}
