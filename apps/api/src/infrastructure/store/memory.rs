use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::query::{Filter, Operation, Query, COURSES_TABLE, STUDENTS_TABLE};
use crate::domain::store::{RecordStore, StoreError, StoreResult, SINGLE_ROW_MISMATCH};

type Row = Map<String, Value>;

/// Record store kept in process memory
///
/// Behaves like the hosted store for everything the API relies on: ids are
/// generated on insert, filters combine with AND, single-row queries fail
/// unless exactly one row matches, updates overwrite only the columns they
/// carry and deleting nothing succeeds. State lives as long as the value.
pub struct InMemoryRecordStore {
    tables: RwLock<HashMap<String, Vec<Row>>>,
}

impl InMemoryRecordStore {
    /// Creates a store with empty `students` and `courses` tables
    pub fn new() -> Self {
        let tables = [STUDENTS_TABLE, COURSES_TABLE]
            .into_iter()
            .map(|name| (name.to_string(), Vec::new()))
            .collect();

        Self {
            tables: RwLock::new(tables),
        }
    }

    /// Seeds a table with rows, as if inserted directly in the store
    pub fn with_rows(mut self, table: &str, rows: Vec<Value>) -> Self {
        let stored = self.tables.get_mut().entry(table.to_string()).or_default();
        stored.extend(rows.into_iter().filter_map(|row| match row {
            Value::Object(row) => Some(row),
            _ => None,
        }));
        self
    }

    /// Snapshot of a table's rows
    pub async fn rows(&self, table: &str) -> Vec<Value> {
        self.tables
            .read()
            .await
            .get(table)
            .map(|rows| rows.iter().cloned().map(Value::Object).collect())
            .unwrap_or_default()
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Text form used for equality comparisons, as the store compares URL values
fn text_form(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn matches(row: &Row, filter: &Filter) -> bool {
    let cell = row.get(filter.column());
    match filter {
        Filter::Eq { value, .. } => cell.and_then(text_form).as_deref() == Some(value.as_str()),
        Filter::Contains { values, .. } => match cell {
            Some(Value::Array(items)) => values.iter().all(|wanted| {
                items
                    .iter()
                    .any(|item| text_form(item).as_deref() == Some(wanted.as_str()))
            }),
            _ => false,
        },
    }
}

fn matches_all(row: &Row, filters: &[Filter]) -> bool {
    filters.iter().all(|filter| matches(row, filter))
}

fn into_object(value: Value) -> StoreResult<Row> {
    match value {
        Value::Object(row) => Ok(row),
        other => Err(StoreError::rejected(
            400,
            format!("expected a JSON object, got {}", other),
        )),
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn execute(&self, query: Query) -> StoreResult<Vec<Value>> {
        let mut tables = self.tables.write().await;
        let table = tables.get_mut(&query.table).ok_or_else(|| {
            StoreError::rejected(
                404,
                format!("relation \"public.{}\" does not exist", query.table),
            )
        })?;
        let is_write = query.operation.is_write();
        // Caps how many rows a select returns or a write touches
        let limit = query.limit.unwrap_or(usize::MAX);

        let affected: Vec<Row> = match query.operation {
            Operation::Select => table
                .iter()
                .filter(|row| matches_all(row, &query.filters))
                .take(limit)
                .cloned()
                .collect(),
            Operation::Insert(rows) => {
                let mut inserted = Vec::with_capacity(rows.len());
                for row in rows {
                    let mut row = into_object(row)?;
                    row.entry("id")
                        .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
                    inserted.push(row);
                }
                table.extend(inserted.iter().cloned());
                inserted
            }
            Operation::Update(changes) => {
                let changes = into_object(changes)?;
                let mut updated = Vec::new();
                for row in table
                    .iter_mut()
                    .filter(|row| matches_all(row, &query.filters))
                    .take(limit)
                {
                    for (column, value) in &changes {
                        row.insert(column.clone(), value.clone());
                    }
                    updated.push(row.clone());
                }
                updated
            }
            Operation::Delete => {
                let mut removed = Vec::new();
                let mut kept = Vec::with_capacity(table.len());
                for row in table.drain(..) {
                    if removed.len() < limit && matches_all(&row, &query.filters) {
                        removed.push(row);
                    } else {
                        kept.push(row);
                    }
                }
                *table = kept;
                removed
            }
        };

        if query.single && affected.len() != 1 {
            return Err(StoreError::rejected(406, SINGLE_ROW_MISMATCH));
        }
        if is_write && !query.returning {
            return Ok(Vec::new());
        }

        Ok(affected.into_iter().map(Value::Object).collect())
    }
}
