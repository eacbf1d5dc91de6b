//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the SELECT column list
//! - A `Deserialize` + `Validate` create DTO
//! - A `Deserialize` + `Validate` update DTO (all `Option` fields) where the
//!   entity is mutable
//!
//! Monetary-style `NUMERIC` columns are cast to `float8` in every column list,
//! so the structs here only ever carry plain `f64` hour values.

pub mod audit;
pub mod comment;
pub mod export;
pub mod project;
pub mod stats;
pub mod task;
pub mod user;
