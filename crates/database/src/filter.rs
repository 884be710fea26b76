//! Filter and pagination primitives shared by the generic repository and
//! the per-entity services.
//!
//! Flag columns (`join_status`, `is_new`, `loss`, `status`) are filtered
//! through [`TriState`] instead of the legacy integer convention where a
//! sentinel value of 2 meant "match both".

use serde::{Deserialize, Serialize};
use sqlx::query::{Query, QueryAs};
use sqlx::sqlite::{Sqlite, SqliteArguments};

/// Filter state for a 0/1 flag column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriState {
    /// Only rows where the column is 0.
    MatchFalse,
    /// Only rows where the column is 1.
    MatchTrue,
    /// Do not filter on this column.
    Any,
}

impl TriState {
    /// Convert from the wire encoding: 0 and 1 are concrete values, any
    /// other value means the filter is not applied.
    pub fn from_flag(value: i64) -> Self {
        match value {
            0 => TriState::MatchFalse,
            1 => TriState::MatchTrue,
            _ => TriState::Any,
        }
    }

    pub fn as_flag(&self) -> i64 {
        match self {
            TriState::MatchFalse => 0,
            TriState::MatchTrue => 1,
            TriState::Any => 2,
        }
    }

    /// The concrete column value to match, or `None` for [`TriState::Any`].
    pub fn value(&self) -> Option<i64> {
        match self {
            TriState::MatchFalse => Some(0),
            TriState::MatchTrue => Some(1),
            TriState::Any => None,
        }
    }
}

/// A bindable primitive value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i64),
    Text(String),
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

pub(crate) fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &'q SqlValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        SqlValue::Int(v) => query.bind(*v),
        SqlValue::Text(v) => query.bind(v.as_str()),
    }
}

pub(crate) fn bind_value_as<'q, O>(
    query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    value: &'q SqlValue,
) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
    match value {
        SqlValue::Int(v) => query.bind(*v),
        SqlValue::Text(v) => query.bind(v.as_str()),
    }
}

/// An ordered chain of optional equality/range predicates.
///
/// Replaces the conditional `when`-style query chains: predicates that do
/// not apply (a `None` value, a [`TriState::Any`] flag) are simply never
/// added, so the resulting query is identical to one where the filter was
/// omitted.
#[derive(Debug, Clone, Default)]
pub struct Conditions {
    clauses: Vec<String>,
    binds: Vec<SqlValue>,
}

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact match on a column.
    pub fn eq(mut self, column: &str, value: impl Into<SqlValue>) -> Self {
        self.clauses.push(format!("{column} = ?"));
        self.binds.push(value.into());
        self
    }

    /// Exact match when a value is present; no-op on `None`.
    pub fn eq_opt(self, column: &str, value: Option<impl Into<SqlValue>>) -> Self {
        match value {
            Some(value) => self.eq(column, value),
            None => self,
        }
    }

    /// Membership in an id list. An empty list matches no rows.
    pub fn eq_any(mut self, column: &str, ids: &[i64]) -> Self {
        if ids.is_empty() {
            self.clauses.push("1 = 0".to_string());
            return self;
        }
        let placeholders = vec!["?"; ids.len()].join(", ");
        self.clauses.push(format!("{column} IN ({placeholders})"));
        self.binds.extend(ids.iter().map(|id| SqlValue::Int(*id)));
        self
    }

    /// Flag-column filter; no-op on [`TriState::Any`].
    pub fn tri(self, column: &str, state: TriState) -> Self {
        match state.value() {
            Some(value) => self.eq(column, value),
            None => self,
        }
    }

    /// Strict greater-than comparison.
    pub fn gt(mut self, column: &str, value: impl Into<SqlValue>) -> Self {
        self.clauses.push(format!("{column} > ?"));
        self.binds.push(value.into());
        self
    }

    /// Lower bound on a timestamp column when present; no-op on `None`.
    pub fn after(self, column: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.gt(column, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// The ` WHERE ...` fragment, or an empty string with no predicates.
    pub(crate) fn where_sql(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    pub(crate) fn binds(&self) -> &[SqlValue] {
        &self.binds
    }
}

/// Options for paginated listing.
#[derive(Debug, Clone)]
pub struct PageOptions {
    /// Ordering column; ascending id order when absent.
    pub order_by: Option<String>,
    pub descending: bool,
    pub per_page: i64,
    pub page: i64,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            order_by: None,
            descending: false,
            per_page: 15,
            page: 1,
        }
    }
}

/// One page of results plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub per_page: i64,
    pub current_page: i64,
    pub last_page: i64,
}

impl<T> Page<T> {
    pub(crate) fn new(data: Vec<T>, total: i64, per_page: i64, current_page: i64) -> Self {
        let last_page = if per_page > 0 {
            ((total + per_page - 1) / per_page).max(1)
        } else {
            1
        };
        Self {
            data,
            total,
            per_page,
            current_page,
            last_page,
        }
    }
}
