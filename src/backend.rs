//! Mock "server actions" over the in-memory store.
//!
//! Every call sleeps for a simulated network latency, may fail on purpose, and
//! only then touches the store. A failed call leaves the store exactly as it
//! was. There is no retry, timeout or cancellation.
//!
//! Bulk operations issue one independent call per id, run them concurrently
//! and report which ids succeeded and which failed. Nothing is rolled back.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rand_distr::{Bernoulli, Distribution, Uniform};
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::error::ConsoleError;
use crate::store::{Entity, MockStore};
use crate::types::SimulationConfig;

/// Ids whose calls must fail, regardless of the failure rate.
#[derive(Debug, Clone, Default)]
pub struct FailurePlan {
    ids: HashSet<String>,
    everything: bool,
}

impl FailurePlan {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn fail_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            everything: false,
        }
    }

    pub fn fail_everything() -> Self {
        Self {
            ids: HashSet::new(),
            everything: true,
        }
    }

    fn forces(&self, id: Option<&str>) -> bool {
        self.everything || id.is_some_and(|id| self.ids.contains(id))
    }
}

/// Latency and failure behavior of the mock backend.
#[derive(Debug, Clone)]
pub struct Simulation {
    min_latency: Duration,
    max_latency: Duration,
    failure_rate: f64,
    plan: FailurePlan,
}

impl Simulation {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            min_latency: Duration::from_millis(config.min_latency_ms),
            max_latency: Duration::from_millis(config.max_latency_ms),
            failure_rate: config.failure_rate.clamp(0.0, 1.0),
            plan: FailurePlan::none(),
        }
    }

    /// No latency, no random failures. For tests and the dev harness.
    pub fn instant() -> Self {
        Self {
            min_latency: Duration::ZERO,
            max_latency: Duration::ZERO,
            failure_rate: 0.0,
            plan: FailurePlan::none(),
        }
    }

    pub fn with_plan(mut self, plan: FailurePlan) -> Self {
        self.plan = plan;
        self
    }

    fn draw_latency(&self) -> Duration {
        let min = self.min_latency.as_millis() as u64;
        let max = self.max_latency.as_millis() as u64;
        if max <= min {
            return self.min_latency;
        }
        match Uniform::new_inclusive(min, max) {
            Ok(dist) => {
                let mut rng = rand::rng();
                Duration::from_millis(dist.sample(&mut rng))
            }
            Err(_) => self.min_latency,
        }
    }

    fn should_fail(&self, id: Option<&str>) -> bool {
        if self.plan.forces(id) {
            return true;
        }
        if self.failure_rate <= 0.0 {
            return false;
        }
        match Bernoulli::new(self.failure_rate) {
            Ok(dist) => {
                let mut rng = rand::rng();
                dist.sample(&mut rng)
            }
            Err(_) => false,
        }
    }
}

/// A collection as returned by a list call, with the revision it was read at.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing<T> {
    pub rows: Vec<T>,
    pub revision: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkFailure {
    pub id: String,
    pub message: String,
}

/// Aggregate result of a bulk operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkOutcome {
    pub succeeded: Vec<String>,
    pub failed: Vec<BulkFailure>,
}

impl BulkOutcome {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_ids(&self) -> impl Iterator<Item = &str> {
        self.failed.iter().map(|f| f.id.as_str())
    }

    /// One-line toast text, e.g. "3 deleted, 1 failed".
    pub fn summary(&self, verb: &str) -> String {
        if self.failed.is_empty() {
            format!("{} {verb}", self.succeeded.len())
        } else {
            format!("{} {verb}, {} failed", self.succeeded.len(), self.failed.len())
        }
    }
}

/// Handle to the store plus the simulation. Cheap to clone; clones share the store.
#[derive(Debug, Clone)]
pub struct MockBackend {
    store: Arc<Mutex<MockStore>>,
    sim: Arc<Simulation>,
}

impl MockBackend {
    pub fn new(store: MockStore, sim: Simulation) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            sim: Arc::new(sim),
        }
    }

    /// Copy of the whole store as it is right now.
    pub fn snapshot(&self) -> MockStore {
        self.store.lock().clone()
    }

    /// Read the store without simulated latency (dashboards, reports).
    pub fn read<R>(&self, f: impl FnOnce(&MockStore) -> R) -> R {
        f(&self.store.lock())
    }

    async fn simulate(&self, op: &str, kind: &str, id: Option<&str>) -> Result<(), ConsoleError> {
        let delay = self.sim.draw_latency();
        log::debug!(
            "{} {} {} ({}ms)",
            op,
            kind,
            id.unwrap_or("*"),
            delay.as_millis()
        );
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.sim.should_fail(id) {
            let what = match id {
                Some(id) => format!("{} {}", kind.to_lowercase(), id),
                None => kind.to_lowercase(),
            };
            log::warn!("Simulated failure: {} {}", op, what);
            return Err(ConsoleError::OperationFailed(format!("Failed to {op} {what}")));
        }
        Ok(())
    }

    pub async fn list<T: Entity>(&self) -> Result<Listing<T>, ConsoleError> {
        self.simulate("load", T::KIND, None).await?;
        let store = self.store.lock();
        let col = store.of::<T>();
        Ok(Listing {
            rows: col.rows().to_vec(),
            revision: col.revision(),
        })
    }

    pub async fn get<T: Entity>(&self, id: &str) -> Result<T, ConsoleError> {
        self.simulate("load", T::KIND, Some(id)).await?;
        self.store
            .lock()
            .of::<T>()
            .get(id)
            .cloned()
            .ok_or_else(|| ConsoleError::NotFound {
                entity: T::KIND,
                id: id.to_string(),
            })
    }

    pub async fn create<T: Entity>(&self, record: T) -> Result<T, ConsoleError> {
        self.simulate("create", T::KIND, Some(record.record_id())).await?;
        self.store.lock().of_mut::<T>().insert(record.clone())?;
        log::debug!("Created {} {}", T::KIND, record.record_id());
        Ok(record)
    }

    pub async fn update<T: Entity>(&self, record: T) -> Result<T, ConsoleError> {
        self.simulate("update", T::KIND, Some(record.record_id())).await?;
        self.store.lock().of_mut::<T>().replace(record.clone())?;
        Ok(record)
    }

    /// Returns the id of the deleted record.
    pub async fn delete<T: Entity>(&self, id: &str) -> Result<String, ConsoleError> {
        self.simulate("delete", T::KIND, Some(id)).await?;
        self.store.lock().of_mut::<T>().remove(id)?;
        Ok(id.to_string())
    }

    pub async fn bulk_delete<T: Entity>(&self, ids: &[String]) -> BulkOutcome {
        let handles = ids
            .iter()
            .map(|id| {
                let backend = self.clone();
                let task_id = id.clone();
                let handle = tokio::spawn(async move {
                    backend.delete::<T>(&task_id).await.map(|_| ())
                });
                (id.clone(), handle)
            })
            .collect();
        let outcome = gather(handles).await;
        log::info!(
            "Bulk delete {}: {} succeeded, {} failed",
            T::KIND,
            outcome.succeeded.len(),
            outcome.failed.len()
        );
        outcome
    }

    /// Apply `change` to each record and save it, one call per id.
    pub async fn bulk_update<T, F>(&self, ids: &[String], change: F) -> BulkOutcome
    where
        T: Entity,
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        let change = Arc::new(change);
        let handles = ids
            .iter()
            .map(|id| {
                let backend = self.clone();
                let change = Arc::clone(&change);
                let task_id = id.clone();
                let handle = tokio::spawn(async move {
                    let current = {
                        let store = backend.store.lock();
                        store.of::<T>().get(&task_id).cloned()
                    };
                    let mut next = current.ok_or_else(|| ConsoleError::NotFound {
                        entity: T::KIND,
                        id: task_id.clone(),
                    })?;
                    (*change)(&mut next);
                    backend.update(next).await.map(|_| ())
                });
                (id.clone(), handle)
            })
            .collect();
        let outcome = gather(handles).await;
        log::info!(
            "Bulk update {}: {} succeeded, {} failed",
            T::KIND,
            outcome.succeeded.len(),
            outcome.failed.len()
        );
        outcome
    }
}

async fn gather(handles: Vec<(String, JoinHandle<Result<(), ConsoleError>>)>) -> BulkOutcome {
    let mut outcome = BulkOutcome::default();
    for (id, handle) in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(join_err) => Err(ConsoleError::from(join_err)),
        };
        match result {
            Ok(()) => outcome.succeeded.push(id),
            Err(e) => outcome.failed.push(BulkFailure {
                id,
                message: e.to_string(),
            }),
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Lead, LeadStatus, Ticket, TicketStatus};
    use crate::error::ActionResponse;

    fn backend(plan: FailurePlan) -> MockBackend {
        MockBackend::new(MockStore::seeded(), Simulation::instant().with_plan(plan))
    }

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_list_returns_rows_and_revision() {
        let backend = backend(FailurePlan::none());
        let listing = backend.list::<Ticket>().await.unwrap();
        assert_eq!(listing.rows.len(), 8);
        assert_eq!(listing.revision, 0);
    }

    #[tokio::test]
    async fn test_failed_call_leaves_store_untouched() {
        let backend = backend(FailurePlan::fail_ids(["ld-001"]));
        let before = backend.snapshot();
        let err = backend.delete::<Lead>("ld-001").await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(err.to_string(), "Failed to delete lead ld-001");
        let after = backend.snapshot();
        assert_eq!(after.leads.rows(), before.leads.rows());
        assert_eq!(after.leads.revision(), before.leads.revision());
    }

    #[tokio::test]
    async fn test_action_response_is_data_or_error_never_both() {
        let backend = backend(FailurePlan::fail_ids(["TCK-002"]));
        let ok: ActionResponse<String> = backend.delete::<Ticket>("TCK-001").await.into();
        assert_eq!(serde_json::to_value(&ok).unwrap(), serde_json::json!("TCK-001"));
        let failed: ActionResponse<String> = backend.delete::<Ticket>("TCK-002").await.into();
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            serde_json::json!({ "error": "Failed to delete ticket TCK-002" })
        );
    }

    #[tokio::test]
    async fn test_bulk_delete_accounting() {
        let backend = backend(FailurePlan::fail_ids(["ld-002", "ld-005"]));
        let selected = ids(&["ld-001", "ld-002", "ld-003", "ld-005", "ld-008"]);
        let outcome = backend.bulk_delete::<Lead>(&selected).await;
        assert_eq!(outcome.total(), 5);
        assert_eq!(outcome.succeeded, ids(&["ld-001", "ld-003", "ld-008"]));
        let failed: Vec<&str> = outcome.failed_ids().collect();
        assert_eq!(failed, vec!["ld-002", "ld-005"]);
        assert_eq!(outcome.summary("deleted"), "3 deleted, 2 failed");

        let store = backend.snapshot();
        assert_eq!(store.leads.len(), 5);
        assert!(store.leads.contains("ld-002"));
        assert!(store.leads.contains("ld-005"));
        assert!(!store.leads.contains("ld-001"));
    }

    #[tokio::test]
    async fn test_bulk_update_applies_change_to_successes_only() {
        let backend = backend(FailurePlan::fail_ids(["TCK-004"]));
        let selected = ids(&["TCK-001", "TCK-004", "TCK-007"]);
        let outcome = backend
            .bulk_update::<Ticket, _>(&selected, |t| t.status = TicketStatus::Resolved)
            .await;
        assert_eq!(outcome.failed.len(), 1);
        let store = backend.snapshot();
        assert_eq!(store.tickets.get("TCK-001").unwrap().status, TicketStatus::Resolved);
        assert_eq!(store.tickets.get("TCK-004").unwrap().status, TicketStatus::Open);
        assert_eq!(store.tickets.get("TCK-007").unwrap().status, TicketStatus::Resolved);
    }

    #[tokio::test]
    async fn test_bulk_with_missing_id_reports_not_found() {
        let backend = backend(FailurePlan::none());
        let outcome = backend.bulk_delete::<Lead>(&ids(&["ld-001", "ghost"])).await;
        assert_eq!(outcome.succeeded, ids(&["ld-001"]));
        assert_eq!(outcome.failed[0].message, "Lead not found: ghost");
    }

    #[tokio::test]
    async fn test_create_prepends_and_rejects_duplicates() {
        let backend = backend(FailurePlan::none());
        let mut lead = backend.get::<Lead>("ld-001").await.unwrap();
        assert!(backend.create(lead.clone()).await.is_err());
        lead.id = "ld-100".into();
        lead.status = LeadStatus::Qualified;
        backend.create(lead).await.unwrap();
        let listing = backend.list::<Lead>().await.unwrap();
        assert_eq!(listing.rows[0].id, "ld-100");
        assert_eq!(listing.revision, 1);
    }

    #[test]
    fn test_latency_draw_stays_in_range() {
        let sim = Simulation::from_config(&SimulationConfig {
            min_latency_ms: 150,
            max_latency_ms: 600,
            failure_rate: 0.0,
        });
        for _ in 0..50 {
            let d = sim.draw_latency();
            assert!(d >= Duration::from_millis(150) && d <= Duration::from_millis(600));
        }
        assert!(!sim.should_fail(Some("x")));
    }

    #[test]
    fn test_failure_rate_one_always_fails() {
        let sim = Simulation::from_config(&SimulationConfig {
            min_latency_ms: 0,
            max_latency_ms: 0,
            failure_rate: 1.0,
        });
        assert!(sim.should_fail(None));
        assert!(Simulation::instant()
            .with_plan(FailurePlan::fail_everything())
            .should_fail(None));
    }
}
