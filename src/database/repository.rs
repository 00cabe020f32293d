use sqlx::{postgres::PgRow, FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::database::manager::{quote_identifier, DatabaseError};

/// Column/value pairs ANDed together in a WHERE clause.
///
/// Column names come from code, never from the request.
pub type Filter<'a> = &'a [(&'static str, &'a str)];

/// Column assignments for an insert or update; `None` writes NULL
pub type Changes = Vec<(&'static str, Option<String>)>;

/// Shared CRUD over one content table
pub struct Repository<T> {
    table_name: &'static str,
    pool: PgPool,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Repository<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub fn new(table_name: &'static str, pool: PgPool) -> Self {
        Self {
            table_name,
            pool,
            _phantom: std::marker::PhantomData,
        }
    }

    pub fn table(&self) -> String {
        quote_identifier(self.table_name)
    }

    /// All matching rows, oldest first
    pub async fn select_any(&self, filter: Filter<'_>) -> Result<Vec<T>, DatabaseError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT * FROM {}", self.table()));
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY \"createdAt\" ASC");

        let rows = qb.build_query_as::<T>().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    pub async fn select_one(&self, filter: Filter<'_>) -> Result<Option<T>, DatabaseError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT * FROM {}", self.table()));
        push_filter(&mut qb, filter);
        qb.push(" LIMIT 1");

        let row = qb.build_query_as::<T>().fetch_optional(&self.pool).await?;
        Ok(row)
    }

    pub async fn select_404(
        &self,
        filter: Filter<'_>,
        missing: impl FnOnce() -> String,
    ) -> Result<T, DatabaseError> {
        self.select_one(filter)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(missing()))
    }

    /// Insert a row with a fresh id and timestamps
    pub async fn insert(
        &self,
        changes: Changes,
        conflict: impl FnOnce() -> String,
    ) -> Result<T, DatabaseError> {
        let mut qb = build_insert(self.table_name, Uuid::new_v4().to_string(), changes);
        qb.build_query_as::<T>()
            .fetch_one(&self.pool)
            .await
            .map_err(|err| DatabaseError::from_write(err, conflict))
    }

    /// Apply `changes` to the row matching `filter`, bumping `updatedAt`
    pub async fn update_404(
        &self,
        changes: Changes,
        filter: Filter<'_>,
        missing: impl FnOnce() -> String,
    ) -> Result<T, DatabaseError> {
        let mut qb = build_update(self.table_name, changes, filter);
        qb.build_query_as::<T>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(missing()))
    }

    pub async fn delete_404(
        &self,
        filter: Filter<'_>,
        missing: impl FnOnce() -> String,
    ) -> Result<(), DatabaseError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("DELETE FROM {}", self.table()));
        push_filter(&mut qb, filter);

        let result = qb.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(missing()));
        }
        Ok(())
    }
}

pub fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: Filter<'_>) {
    for (i, (column, value)) in filter.iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        qb.push(quote_identifier(column));
        qb.push(" = ");
        qb.push_bind(value.to_string());
    }
}

fn build_insert(table: &str, id: String, changes: Changes) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new(format!(
        "INSERT INTO {} (\"id\", \"createdAt\", \"updatedAt\"",
        quote_identifier(table)
    ));
    for (column, _) in &changes {
        qb.push(", ");
        qb.push(quote_identifier(column));
    }
    qb.push(") VALUES (");
    qb.push_bind(id);
    qb.push(", NOW(), NOW()");
    for (_, value) in changes {
        qb.push(", ");
        qb.push_bind(value);
    }
    qb.push(") RETURNING *");
    qb
}

fn build_update<'a>(table: &str, changes: Changes, filter: Filter<'_>) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new(format!(
        "UPDATE {} SET \"updatedAt\" = NOW()",
        quote_identifier(table)
    ));
    for (column, value) in changes {
        qb.push(", ");
        qb.push(quote_identifier(column));
        qb.push(" = ");
        qb.push_bind(value);
    }
    push_filter(&mut qb, filter);
    qb.push(" RETURNING *");
    qb
}
