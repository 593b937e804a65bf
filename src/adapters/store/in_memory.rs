//! In-Memory Content Store Adapter
//!
//! Keeps rows in memory, keyed by table name. Used by tests and for local
//! development from a JSON fixture file. Supports failure injection so
//! callers can exercise the store-unavailable and timeout paths.

use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{ContentStore, OrderBy, SortDirection, StoreError, StoreRow};

/// In-memory content store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentStore {
    tables: Arc<RwLock<HashMap<String, Vec<StoreRow>>>>,
    failure: Arc<RwLock<Option<StoreError>>>,
}

impl InMemoryContentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `rows` in `table`.
    pub fn with_rows(table: impl Into<String>, rows: Vec<StoreRow>) -> Self {
        let mut tables = HashMap::new();
        tables.insert(table.into(), rows);
        Self {
            tables: Arc::new(RwLock::new(tables)),
            failure: Arc::default(),
        }
    }

    /// Load `table` from a JSON file containing an array of row objects.
    pub fn from_json_file(table: impl Into<String>, path: &Path) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            StoreError::unavailable(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let rows = parse_rows(&raw)?;
        Ok(Self::with_rows(table, rows))
    }

    /// Append a row to a table.
    pub async fn insert(&self, table: &str, row: StoreRow) {
        self.tables
            .write()
            .await
            .entry(table.to_string())
            .or_default()
            .push(row);
    }

    /// Remove every row of `table` whose `column` equals `value`.
    pub async fn remove(&self, table: &str, column: &str, value: &str) {
        if let Some(rows) = self.tables.write().await.get_mut(table) {
            rows.retain(|row| !column_matches(row, column, value));
        }
    }

    /// Make every subsequent call fail with `error` until cleared.
    pub async fn fail_with(&self, error: StoreError) {
        *self.failure.write().await = Some(error);
    }

    /// Clear an injected failure.
    pub async fn clear_failure(&self) {
        *self.failure.write().await = None;
    }

    async fn check_failure(&self) -> Result<(), StoreError> {
        match self.failure.read().await.as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn get_by_key(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> Result<Option<StoreRow>, StoreError> {
        self.check_failure().await?;
        let tables = self.tables.read().await;
        Ok(tables
            .get(table)
            .and_then(|rows| rows.iter().find(|row| column_matches(row, column, value)))
            .cloned())
    }

    async fn list_ordered(
        &self,
        table: &str,
        order: &OrderBy,
    ) -> Result<Vec<StoreRow>, StoreError> {
        self.check_failure().await?;
        let tables = self.tables.read().await;
        let mut rows = tables.get(table).cloned().unwrap_or_default();
        rows.sort_by(|a, b| {
            let ordering = compare_values(a.get(&order.column), b.get(&order.column));
            match order.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        Ok(rows)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

fn parse_rows(raw: &str) -> Result<Vec<StoreRow>, StoreError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| StoreError::malformed(format!("Fixture is not JSON: {}", e)))?;
    let Value::Array(items) = value else {
        return Err(StoreError::malformed("Fixture must be a JSON array"));
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(row) => Ok(row),
            other => Err(StoreError::malformed(format!(
                "Fixture row is not an object: {}",
                other
            ))),
        })
        .collect()
}

fn column_matches(row: &StoreRow, column: &str, value: &str) -> bool {
    matches!(row.get(column), Some(Value::String(s)) if s == value)
}

/// Orders JSON scalars: nulls first, then numbers, then strings.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(v: Option<&Value>) -> u8 {
        match v {
            None | Some(Value::Null) => 0,
            Some(Value::Number(_)) => 1,
            Some(Value::String(_)) => 2,
            Some(_) => 3,
        }
    }
    match (a, b) {
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        _ => rank(a).cmp(&rank(b)),
    }
}
