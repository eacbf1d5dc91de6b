//! Audit log models and DTOs.
//!
//! Audit rows are append-only: there is no update DTO, and the table rejects
//! UPDATE and DELETE at the database level.

use kpi_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Audit log entity
// ---------------------------------------------------------------------------

/// A single audit log entry, joined with the actor's current name (if the
/// actor still exists).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub user_name: Option<String>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: DbId,
    pub old_values: Option<serde_json::Value>,
    pub new_values: Option<serde_json::Value>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Request metadata
// ---------------------------------------------------------------------------

/// Who performed a mutation and from where.
#[derive(Debug, Clone, Default)]
pub struct AuditContext {
    pub actor_id: Option<DbId>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl AuditContext {
    /// Same request metadata, attributed to a different actor.
    pub fn with_actor(&self, actor_id: DbId) -> Self {
        Self {
            actor_id: Some(actor_id),
            ..self.clone()
        }
    }

    /// Build the row to insert for one mutation.
    pub fn entry(
        &self,
        action: &str,
        entity_type: &str,
        entity_id: DbId,
        old_values: Option<serde_json::Value>,
        new_values: Option<serde_json::Value>,
    ) -> CreateAuditLog {
        CreateAuditLog {
            user_id: self.actor_id,
            action: action.to_string(),
            entity_type: entity_type.to_string(),
            entity_id,
            old_values,
            new_values,
            ip_address: self.ip_address.clone(),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// DTO for inserting a new audit log entry.
#[derive(Debug, Clone)]
pub struct CreateAuditLog {
    pub user_id: Option<DbId>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: DbId,
    pub old_values: Option<serde_json::Value>,
    pub new_values: Option<serde_json::Value>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

// ---------------------------------------------------------------------------
// Query results
// ---------------------------------------------------------------------------

/// Paginated response for audit log queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogPage {
    pub items: Vec<AuditLog>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Row count for one value of a grouped column.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct KeyCount {
    pub key: String,
    pub count: i64,
}

/// Number of audit rows attributed to one actor.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ActorCount {
    pub user_id: DbId,
    pub user_name: Option<String>,
    pub count: i64,
}

/// Summary statistics over the whole audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditStats {
    pub total: i64,
    pub by_action: Vec<KeyCount>,
    pub by_entity_type: Vec<KeyCount>,
    pub top_actors: Vec<ActorCount>,
}
