use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::auth::thread_access::{ProjectRecord, ThreadRecord};
use crate::auth::{AccessStore, Identity};
use crate::database::DatabaseError;

#[derive(Debug, FromRow)]
struct ThreadRow {
    thread_id: String,
    account_id: Option<String>,
    project_id: Option<String>,
}

#[derive(Debug, FromRow)]
struct ProjectRow {
    project_id: String,
    is_public: bool,
}

/// Thread, project and membership lookups against Postgres.
///
/// Id columns are `uuid`; ids are bound natively so the primary key indexes
/// apply. An id that is not a UUID cannot match any row.
#[derive(Clone)]
pub struct PgAccessStore {
    pool: PgPool,
}

impl PgAccessStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}

#[async_trait]
impl AccessStore for PgAccessStore {
    async fn find_thread(&self, thread_id: &str) -> Result<Option<ThreadRecord>, DatabaseError> {
        let Some(thread_id) = parse_id(thread_id) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, ThreadRow>(
            "SELECT thread_id::text AS thread_id, account_id::text AS account_id,
                    project_id::text AS project_id
             FROM threads
             WHERE thread_id = $1",
        )
        .bind(thread_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| ThreadRecord {
            thread_id: r.thread_id,
            account_id: r.account_id,
            project_id: r.project_id,
        }))
    }

    async fn find_project(&self, project_id: &str) -> Result<Option<ProjectRecord>, DatabaseError> {
        let Some(project_id) = parse_id(project_id) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, ProjectRow>(
            "SELECT project_id::text AS project_id, COALESCE(is_public, false) AS is_public
             FROM projects
             WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| ProjectRecord {
            project_id: r.project_id,
            is_public: r.is_public,
        }))
    }

    async fn find_membership_role(
        &self,
        identity: &Identity,
        account_id: &str,
    ) -> Result<Option<String>, DatabaseError> {
        let (Some(user_id), Some(account_id)) = (parse_id(identity.as_str()), parse_id(account_id))
        else {
            return Ok(None);
        };

        // A member with no role still counts; the empty string stands in
        let role: Option<(String,)> = sqlx::query_as(
            "SELECT COALESCE(account_role::text, '')
             FROM basejump.account_user
             WHERE user_id = $1 AND account_id = $2",
        )
        .bind(user_id)
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(role.map(|(role,)| role))
    }
}
