//! Shared test doubles for the unified store tests

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use scout_store::{
    IdentityError, IdentityProvider, RemoteStore, RestError, RestTransport, RetryPolicy,
    SelectQuery, TtlCache,
};

/// Identity provider with a scripted sequence of outcomes; the last entry
/// repeats once the script is exhausted.
pub struct ScriptedIdentity {
    outcomes: Mutex<Vec<Result<Option<String>, String>>>,
}

impl ScriptedIdentity {
    pub fn always(user_id: &str) -> Self {
        Self::script(vec![Ok(Some(user_id.to_string()))])
    }

    #[allow(dead_code)]
    pub fn never() -> Self {
        Self::script(vec![Ok(None)])
    }

    pub fn failing(message: &str) -> Self {
        Self::script(vec![Err(message.to_string())])
    }

    pub fn script(outcomes: Vec<Result<Option<String>, String>>) -> Self {
        let mut outcomes = outcomes;
        outcomes.reverse();
        Self {
            outcomes: Mutex::new(outcomes),
        }
    }
}

#[async_trait]
impl IdentityProvider for ScriptedIdentity {
    async fn current_user_id(&self) -> Result<Option<String>, IdentityError> {
        let mut outcomes = self.outcomes.lock().unwrap();
        let outcome = if outcomes.len() > 1 {
            outcomes.pop().unwrap()
        } else {
            outcomes.last().cloned().unwrap_or(Ok(None))
        };
        outcome.map_err(IdentityError::Provider)
    }
}

/// In-memory backend tables with server-assigned ids, plus call counters
/// and an optional scripted failure.
#[derive(Default)]
pub struct FakeBackend {
    rows: Mutex<Vec<(String, Value)>>,
    pub inserts: AtomicU32,
    #[allow(dead_code)]
    pub selects: AtomicU32,
    next_id: AtomicU32,
    failure: Mutex<Option<FailureMode>>,
}

pub enum FailureMode {
    Transient,
    Permanent,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_with(&self, mode: FailureMode) {
        *self.failure.lock().unwrap() = Some(mode);
    }

    pub fn rows_in(&self, table: &str) -> Vec<Value> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, _)| t == table)
            .map(|(_, row)| row.clone())
            .collect()
    }

    fn check_failure(&self) -> Result<(), RestError> {
        match &*self.failure.lock().unwrap() {
            Some(FailureMode::Transient) => Err(RestError::RequestFailed {
                message: "connection reset by peer".to_string(),
            }),
            Some(FailureMode::Permanent) => Err(RestError::Http {
                status: 403,
                message: "row-level security violation".to_string(),
            }),
            None => Ok(()),
        }
    }

    fn matches(row: &Value, query: &SelectQuery) -> bool {
        query.filters.iter().all(|(column, value)| {
            row.get(column)
                .map(|v| match v {
                    Value::String(s) => s == value,
                    other => other.to_string() == *value,
                })
                .unwrap_or(false)
        })
    }
}

#[async_trait]
impl RestTransport for FakeBackend {
    async fn insert(&self, table: &str, mut row: Value) -> Result<Value, RestError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        row["id"] = json!(format!("srv-{n}"));
        let now = chrono::Utc::now().to_rfc3339();
        row["created_at"] = json!(now);
        if table == "research_papers" {
            row["updated_at"] = json!(now);
        }
        self.rows
            .lock()
            .unwrap()
            .push((table.to_string(), row.clone()));
        Ok(row)
    }

    async fn select(&self, table: &str, query: &SelectQuery) -> Result<Vec<Value>, RestError> {
        self.selects.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        let mut rows: Vec<Value> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, row)| t == table && Self::matches(row, query))
            .map(|(_, row)| row.clone())
            .collect();
        rows.reverse(); // newest first, as the backend orders by created_at desc
        if let Some(limit) = query.limit {
            rows.truncate(limit as usize);
        }
        Ok(rows)
    }

    async fn update(&self, table: &str, patch: Value, query: &SelectQuery) -> Result<(), RestError> {
        self.check_failure()?;
        let mut rows = self.rows.lock().unwrap();
        for (t, row) in rows.iter_mut() {
            if t == table && Self::matches(row, query) {
                if let (Value::Object(target), Value::Object(changes)) = (&mut *row, &patch) {
                    for (k, v) in changes {
                        target.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        Ok(())
    }
}

/// Remote store over the fake backend with test-friendly retry delays.
pub fn remote_store(backend: Arc<FakeBackend>) -> RemoteStore {
    RemoteStore::new(
        backend,
        TtlCache::new(Duration::from_secs(60)),
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
        },
    )
}
