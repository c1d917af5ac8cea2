//! In-process backend: tables held in memory, seeded from a JSON file.
//!
//! Seed layout:
//!
//! ```json
//! {
//!   "accounts": [{ "id": "u1", "email": "owner@example.co", "password_hash": "$argon2id$..." }],
//!   "tables": { "companies": [{ "id": "c1", "user_id": "u1", ... }] }
//! }
//! ```

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{AuthProvider, AuthUser, BackendError, Direction, Query, TableStore};

#[derive(Debug, Clone, Deserialize)]
pub struct SeedAccount {
    pub id: String,
    pub email: String,
    /// Argon2 PHC string, see [`hash_password`].
    pub password_hash: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub accounts: Vec<SeedAccount>,
    #[serde(default)]
    pub tables: HashMap<String, Vec<Value>>,
}

/// Hash a password for a seed account.
pub fn hash_password(password: &str) -> Result<String, BackendError> {
    let salt = SaltString::encode_b64(uuid::Uuid::new_v4().as_bytes())
        .map_err(|e| BackendError::PasswordHash(e.to_string()))?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| BackendError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[derive(Default)]
struct State {
    tables: HashMap<String, Vec<Value>>,
    accounts: Vec<SeedAccount>,
    current: Option<AuthUser>,
    requests: usize,
    failing: HashSet<String>,
}

impl State {
    /// Count the call and fail it when the table is marked failing.
    fn begin(&mut self, table: &str) -> Result<(), BackendError> {
        self.requests += 1;
        if self.failing.contains(table) {
            return Err(BackendError::Status {
                status: StatusCode::SERVICE_UNAVAILABLE,
                message: format!("table `{table}` unavailable"),
            });
        }
        Ok(())
    }
}

/// Tables and accounts kept in memory. Implements [`AuthProvider`] and
/// [`TableStore`]; pair it with an object store from [`super::objects`].
#[derive(Default)]
pub struct LocalBackend {
    state: Mutex<State>,
}

impl LocalBackend {
    pub fn from_seed(seed: Seed) -> Self {
        Self {
            state: Mutex::new(State {
                tables: seed.tables,
                accounts: seed.accounts,
                ..State::default()
            }),
        }
    }

    pub async fn from_seed_file(path: &Path) -> Result<Self, BackendError> {
        let text = tokio::fs::read_to_string(path).await?;
        let seed: Seed = serde_json::from_str(&text)
            .map_err(|e| BackendError::Seed(format!("{}: {e}", path.display())))?;
        info!(
            path = %path.display(),
            tables = seed.tables.len(),
            accounts = seed.accounts.len(),
            "Loaded local backend seed"
        );
        Ok(Self::from_seed(seed))
    }

    /// Number of table calls served so far.
    pub async fn request_count(&self) -> usize {
        self.state.lock().await.requests
    }

    /// Rows currently stored in `table`.
    pub async fn rows(&self, table: &str) -> Vec<Value> {
        self.state
            .lock()
            .await
            .tables
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// Make every call against `table` fail until cleared.
    #[cfg(test)]
    pub(crate) async fn fail_table(&self, table: &str, failing: bool) {
        let mut state = self.state.lock().await;
        if failing {
            state.failing.insert(table.to_string());
        } else {
            state.failing.remove(table);
        }
    }

    #[cfg(test)]
    pub(crate) async fn sign_in_as(&self, user: AuthUser) {
        self.state.lock().await.current = Some(user);
    }
}

fn matches(row: &Value, column: &str, expected: &str) -> bool {
    match row.get(column) {
        Some(Value::String(s)) => s == expected,
        Some(Value::Null) | None => expected == "null",
        Some(other) => other.to_string() == expected,
    }
}

/// Nulls sort after everything, as in an ascending Postgres order.
fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => {
            match (
                DateTime::parse_from_rfc3339(x),
                DateTime::parse_from_rfc3339(y),
            ) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                _ => x.cmp(y),
            }
        }
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

fn object(table: &str, value: Value) -> Result<Map<String, Value>, BackendError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(BackendError::Status {
            status: StatusCode::BAD_REQUEST,
            message: format!("`{table}` rows must be JSON objects"),
        }),
    }
}

fn now() -> Value {
    Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true))
}

#[async_trait]
impl TableStore for LocalBackend {
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>, BackendError> {
        let mut state = self.state.lock().await;
        state.begin(table)?;
        let mut rows: Vec<Value> = state
            .tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| {
                        query
                            .filters
                            .iter()
                            .all(|(column, value)| matches(row, column, value))
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        if let Some((column, direction)) = &query.order {
            rows.sort_by(|a, b| {
                let ordering = compare(a.get(column), b.get(column));
                match direction {
                    Direction::Asc => ordering,
                    Direction::Desc => ordering.reverse(),
                }
            });
        }
        debug!(table, count = rows.len(), "select");
        Ok(rows)
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Value, BackendError> {
        let mut state = self.state.lock().await;
        state.begin(table)?;
        let mut row = object(table, row)?;
        row.entry("id")
            .or_insert_with(|| Value::String(uuid::Uuid::now_v7().to_string()));
        row.entry("created_at").or_insert_with(now);
        row.entry("updated_at").or_insert_with(now);
        let row = Value::Object(row);
        state
            .tables
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        debug!(table, id = %row["id"], "insert");
        Ok(row)
    }

    async fn update(&self, table: &str, id: &str, patch: Value) -> Result<(), BackendError> {
        let mut state = self.state.lock().await;
        state.begin(table)?;
        let patch = object(table, patch)?;
        let target = state
            .tables
            .get_mut(table)
            .and_then(|rows| rows.iter_mut().find(|row| matches(row, "id", id)));
        if let Some(Value::Object(row)) = target {
            row.extend(patch);
            debug!(table, id, "update");
        }
        Ok(())
    }

    async fn delete(&self, table: &str, id: &str) -> Result<(), BackendError> {
        let mut state = self.state.lock().await;
        state.begin(table)?;
        if let Some(rows) = state.tables.get_mut(table) {
            rows.retain(|row| !matches(row, "id", id));
        }
        debug!(table, id, "delete");
        Ok(())
    }
}

#[async_trait]
impl AuthProvider for LocalBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, BackendError> {
        let mut state = self.state.lock().await;
        let account = state
            .accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email.trim()))
            .filter(|a| verify_password(password, &a.password_hash))
            .ok_or(BackendError::InvalidCredentials)?;
        let user = AuthUser {
            id: account.id.clone(),
            email: Some(account.email.clone()),
        };
        state.current = Some(user.clone());
        Ok(user)
    }

    async fn current_user(&self) -> Result<Option<AuthUser>, BackendError> {
        Ok(self.state.lock().await.current.clone())
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        self.state.lock().await.current = None;
        Ok(())
    }
}
