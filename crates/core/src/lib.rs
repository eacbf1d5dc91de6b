//! Domain types and pure logic for the KPI time tracker.
//!
//! This crate has no database or HTTP dependencies so it can be shared by the
//! repository layer, the API server, and their tests.

pub mod audit;
pub mod error;
pub mod stats;
pub mod types;
pub mod visibility;
