pub mod audit;
pub mod comment;
pub mod export;
pub mod project;
pub mod stats;
pub mod task;
pub mod user;
