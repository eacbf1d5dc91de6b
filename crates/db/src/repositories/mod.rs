//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods.
//! Read-only methods accept `&PgPool`; methods that take part in a mutation
//! accept `&mut PgConnection` so the caller can run them inside one
//! transaction together with the total recomputation and the audit insert.

pub mod audit_repo;
pub mod comment_repo;
pub mod export_repo;
pub mod project_repo;
pub mod stats_repo;
pub mod task_repo;
pub mod user_repo;

pub use audit_repo::AuditLogRepo;
pub use comment_repo::CommentRepo;
pub use export_repo::ExportRepo;
pub use project_repo::ProjectRepo;
pub use stats_repo::StatsRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
