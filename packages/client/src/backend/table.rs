//! Typed access to [`TableStore`] rows.

use common::sync::Record;
use serde::Serialize;
use serde_json::Value;

use super::{BackendError, Query, TableStore};

fn decode<T: Record>(row: Value) -> Result<T, BackendError> {
    serde_json::from_value(row).map_err(|source| BackendError::Decode {
        table: T::TABLE,
        source,
    })
}

fn encode(value: &impl Serialize) -> Result<Value, BackendError> {
    serde_json::to_value(value).map_err(BackendError::Encode)
}

pub async fn select<T: Record>(
    store: &dyn TableStore,
    query: &Query,
) -> Result<Vec<T>, BackendError> {
    store
        .select(T::TABLE, query)
        .await?
        .into_iter()
        .map(decode)
        .collect()
}

/// First matching row, if any.
pub async fn select_one<T: Record>(
    store: &dyn TableStore,
    query: &Query,
) -> Result<Option<T>, BackendError> {
    match store.select(T::TABLE, query).await?.into_iter().next() {
        Some(row) => decode(row).map(Some),
        None => Ok(None),
    }
}

pub async fn insert<T: Record>(
    store: &dyn TableStore,
    fields: &impl Serialize,
) -> Result<T, BackendError> {
    let row = store.insert(T::TABLE, encode(fields)?).await?;
    decode(row)
}

pub async fn update<T: Record>(
    store: &dyn TableStore,
    id: &str,
    patch: &impl Serialize,
) -> Result<(), BackendError> {
    store.update(T::TABLE, id, encode(patch)?).await
}

pub async fn delete<T: Record>(store: &dyn TableStore, id: &str) -> Result<(), BackendError> {
    store.delete(T::TABLE, id).await
}
