//! Generic repository over a SQLite pool.
//!
//! The per-entity repositories in this crate all share the same template
//! operations (lookup by id, paginated listing, single/bulk create,
//! update by id, single/bulk delete). Instead of duplicating those
//! bodies per entity, [`Repository`] implements them once against an
//! [`EntitySchema`] describing the table, and each entity contributes
//! only its schema.

use std::marker::PhantomData;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, SqlitePool};
use tracing::info;

use crate::filter::{bind_value, bind_value_as, Conditions, Page, PageOptions, SqlValue};
use crate::types::{DatabaseError, DatabaseResult};

/// Table description an entity provides to the generic repository.
///
/// `insert_values` must produce one value per entry in `INSERT_COLUMNS`,
/// in the same order, stamping `created_at`/`updated_at` itself.
/// `update_values` returns only the assignments to apply; an empty set
/// means nothing to update. Implementations stamp `updated_at` whenever
/// the set is non-empty.
pub trait EntitySchema:
    for<'r> FromRow<'r, SqliteRow> + Send + Sync + Unpin
{
    type Create: Send + Sync;
    type Update: Send + Sync;

    const TABLE: &'static str;
    const ID_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str];
    const INSERT_COLUMNS: &'static [&'static str];

    fn insert_values(data: &Self::Create) -> Vec<SqlValue>;
    fn update_values(data: &Self::Update) -> Vec<(&'static str, SqlValue)>;
}

/// Generic data-access operations for one entity table.
///
/// Stateless apart from the pool handle; each method is a single
/// auto-committed round trip (two for pagination: count + page).
pub struct Repository<E: EntitySchema> {
    pool: SqlitePool,
    _entity: PhantomData<E>,
}

impl<E: EntitySchema> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: EntitySchema> Repository<E> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn select_sql(suffix: &str) -> String {
        format!(
            "SELECT {} FROM {}{}",
            E::COLUMNS.join(", "),
            E::TABLE,
            suffix
        )
    }

    /// Find one row by id. `None` when the id does not exist.
    pub async fn get_one_by_id(&self, id: i64) -> DatabaseResult<Option<E>> {
        let sql = Self::select_sql(&format!(" WHERE {} = ?", E::ID_COLUMN));
        let row = sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Find all rows matching an id list. An empty list yields an empty
    /// result without a round trip.
    pub async fn get_all_by_id(&self, ids: &[i64]) -> DatabaseResult<Vec<E>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = Self::select_sql(&format!(" WHERE {} IN ({})", E::ID_COLUMN, placeholders));
        let mut query = sqlx::query_as::<_, E>(&sql);
        for id in ids {
            query = query.bind(*id);
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Paginated listing with exact-match filters.
    ///
    /// Filter and ordering columns must be declared in `COLUMNS`;
    /// anything else is rejected before touching the database.
    pub async fn get_page_list(
        &self,
        filters: &[(&str, SqlValue)],
        options: &PageOptions,
    ) -> DatabaseResult<Page<E>> {
        let mut conditions = Conditions::new();
        for (column, value) in filters {
            if !E::COLUMNS.contains(column) {
                return Err(DatabaseError::UnknownColumn((*column).to_string()));
            }
            conditions = conditions.eq(column, value.clone());
        }

        let order_column = match &options.order_by {
            Some(column) => {
                if !E::COLUMNS.contains(&column.as_str()) {
                    return Err(DatabaseError::UnknownOrdering(column.clone()));
                }
                column.as_str()
            }
            None => E::ID_COLUMN,
        };
        let direction = if options.descending { "DESC" } else { "ASC" };

        let total = self.count(&conditions).await?;

        let per_page = options.per_page.max(1);
        let page = options.page.max(1);
        let sql = Self::select_sql(&format!(
            "{} ORDER BY {} {} LIMIT ? OFFSET ?",
            conditions.where_sql(),
            order_column,
            direction
        ));
        let mut query = sqlx::query_as::<_, E>(&sql);
        for value in conditions.binds() {
            query = bind_value_as(query, value);
        }
        let data = query
            .bind(per_page)
            .bind((page - 1) * per_page)
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(data, total, per_page, page))
    }

    /// Insert one row and return its new id.
    pub async fn create_one(&self, data: &E::Create) -> DatabaseResult<i64> {
        let values = E::insert_values(data);
        let placeholders = vec!["?"; values.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            E::TABLE,
            E::INSERT_COLUMNS.join(", "),
            placeholders
        );
        let mut query = sqlx::query(&sql);
        for value in &values {
            query = bind_value(query, value);
        }
        let result = query.execute(&self.pool).await?;

        let id = result.last_insert_rowid();
        info!(table = E::TABLE, id, "created row");
        Ok(id)
    }

    /// Insert many rows in one statement.
    ///
    /// All-or-nothing: `Ok(true)` means every row landed; a failure
    /// aborts the whole statement and surfaces as the driver error.
    /// Per-row ids are not reported.
    pub async fn create_all(&self, data: &[E::Create]) -> DatabaseResult<bool> {
        if data.is_empty() {
            return Ok(true);
        }
        let group = format!("({})", vec!["?"; E::INSERT_COLUMNS.len()].join(", "));
        let groups = vec![group.as_str(); data.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES {}",
            E::TABLE,
            E::INSERT_COLUMNS.join(", "),
            groups
        );
        let values: Vec<SqlValue> = data.iter().flat_map(|row| E::insert_values(row)).collect();
        let mut query = sqlx::query(&sql);
        for value in &values {
            query = bind_value(query, value);
        }
        let result = query.execute(&self.pool).await?;

        info!(
            table = E::TABLE,
            rows = result.rows_affected(),
            "bulk created rows"
        );
        Ok(true)
    }

    /// Apply a change set to one row by id; returns the matched-row
    /// count (0 when the id does not exist or the change set is empty).
    pub async fn update_one_by_id(&self, id: i64, changes: &E::Update) -> DatabaseResult<u64> {
        let assignments = E::update_values(changes);
        if assignments.is_empty() {
            return Ok(0);
        }
        let set_clause = assignments
            .iter()
            .map(|(column, _)| format!("{column} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?",
            E::TABLE,
            set_clause,
            E::ID_COLUMN
        );
        let mut query = sqlx::query(&sql);
        for (_, value) in &assignments {
            query = bind_value(query, value);
        }
        let result = query.bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Delete one row by id; returns the deleted-row count.
    pub async fn delete_one(&self, id: i64) -> DatabaseResult<u64> {
        let sql = format!("DELETE FROM {} WHERE {} = ?", E::TABLE, E::ID_COLUMN);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        let deleted = result.rows_affected();
        info!(table = E::TABLE, id, deleted, "deleted row");
        Ok(deleted)
    }

    /// Delete all rows matching an id list; returns the deleted-row count.
    pub async fn delete_all(&self, ids: &[i64]) -> DatabaseResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "DELETE FROM {} WHERE {} IN ({})",
            E::TABLE,
            E::ID_COLUMN,
            placeholders
        );
        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(*id);
        }
        let result = query.execute(&self.pool).await?;

        let deleted = result.rows_affected();
        info!(table = E::TABLE, deleted, "bulk deleted rows");
        Ok(deleted)
    }

    /// Fetch all rows matching a condition chain.
    pub async fn select(&self, conditions: &Conditions) -> DatabaseResult<Vec<E>> {
        let sql = Self::select_sql(&conditions.where_sql());
        let mut query = sqlx::query_as::<_, E>(&sql);
        for value in conditions.binds() {
            query = bind_value_as(query, value);
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Fetch the first row matching a condition chain, if any.
    pub async fn select_first(&self, conditions: &Conditions) -> DatabaseResult<Option<E>> {
        let sql = Self::select_sql(&format!("{} LIMIT 1", conditions.where_sql()));
        let mut query = sqlx::query_as::<_, E>(&sql);
        for value in conditions.binds() {
            query = bind_value_as(query, value);
        }
        Ok(query.fetch_optional(&self.pool).await?)
    }

    /// Count rows matching a condition chain.
    pub async fn count(&self, conditions: &Conditions) -> DatabaseResult<i64> {
        let sql = format!(
            "SELECT COUNT({}) FROM {}{}",
            E::ID_COLUMN,
            E::TABLE,
            conditions.where_sql()
        );
        let mut query = sqlx::query_as::<_, (i64,)>(&sql);
        for value in conditions.binds() {
            query = bind_value_as(query, value);
        }
        let (count,) = query.fetch_one(&self.pool).await?;
        Ok(count)
    }
}
