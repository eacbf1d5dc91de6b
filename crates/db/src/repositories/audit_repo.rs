//! Repository for the append-only `audit_logs` table.

use kpi_core::audit::TOP_ACTORS_LIMIT;
use kpi_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::audit::{ActorCount, AuditLog, AuditStats, CreateAuditLog, KeyCount};

/// Column list for audit rows aliased `a` joined (left) with users `u`.
const COLUMNS: &str = "a.id, a.user_id, u.name AS user_name, a.action, a.entity_type, \
    a.entity_id, a.old_values, a.new_values, a.ip_address, a.user_agent, a.created_at";

/// Provides insert and query operations for audit logs. There is no update
/// or delete.
pub struct AuditLogRepo;

impl AuditLogRepo {
    /// Append one entry, returning its ID.
    ///
    /// Takes a connection so the entry commits or rolls back together with the
    /// mutation it describes.
    pub async fn insert(
        conn: &mut PgConnection,
        entry: &CreateAuditLog,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO audit_logs
                (user_id, action, entity_type, entity_id, old_values, new_values,
                 ip_address, user_agent)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id",
        )
        .bind(entry.user_id)
        .bind(&entry.action)
        .bind(&entry.entity_type)
        .bind(entry.entity_id)
        .bind(&entry.old_values)
        .bind(&entry.new_values)
        .bind(&entry.ip_address)
        .bind(&entry.user_agent)
        .fetch_one(conn)
        .await
    }

    /// One page of entries, newest first, optionally restricted to one actor.
    pub async fn list(
        pool: &PgPool,
        user_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AuditLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM audit_logs a
             LEFT JOIN users u ON u.id = a.user_id
             WHERE ($1::BIGINT IS NULL OR a.user_id = $1)
             ORDER BY a.created_at DESC, a.id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count entries matching the same filter as [`Self::list`].
    pub async fn count(pool: &PgPool, user_id: Option<DbId>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::BIGINT FROM audit_logs WHERE ($1::BIGINT IS NULL OR user_id = $1)",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Entries about one entity, oldest first.
    pub async fn list_for_entity(
        pool: &PgPool,
        entity_type: &str,
        entity_id: DbId,
    ) -> Result<Vec<AuditLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM audit_logs a
             LEFT JOIN users u ON u.id = a.user_id
             WHERE a.entity_type = $1 AND a.entity_id = $2
             ORDER BY a.created_at ASC, a.id ASC"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(entity_type)
            .bind(entity_id)
            .fetch_all(pool)
            .await
    }

    /// Totals grouped by action, by entity type, and the most active actors.
    pub async fn stats(pool: &PgPool) -> Result<AuditStats, sqlx::Error> {
        let total = Self::count(pool, None).await?;

        let by_action = sqlx::query_as::<_, KeyCount>(
            "SELECT action AS key, COUNT(*)::BIGINT AS count
             FROM audit_logs GROUP BY action ORDER BY count DESC, key",
        )
        .fetch_all(pool)
        .await?;

        let by_entity_type = sqlx::query_as::<_, KeyCount>(
            "SELECT entity_type AS key, COUNT(*)::BIGINT AS count
             FROM audit_logs GROUP BY entity_type ORDER BY count DESC, key",
        )
        .fetch_all(pool)
        .await?;

        let top_actors = sqlx::query_as::<_, ActorCount>(
            "SELECT a.user_id, u.name AS user_name, COUNT(*)::BIGINT AS count
             FROM audit_logs a
             LEFT JOIN users u ON u.id = a.user_id
             WHERE a.user_id IS NOT NULL
             GROUP BY a.user_id, u.name
             ORDER BY count DESC, a.user_id
             LIMIT $1",
        )
        .bind(TOP_ACTORS_LIMIT)
        .fetch_all(pool)
        .await?;

        Ok(AuditStats {
            total,
            by_action,
            by_entity_type,
            top_actors,
        })
    }
}
