//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: pool bootstrap and the `QuestionRepository` implementation

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::DbQuestion;
pub use schema::SQLITE_INIT;
pub use sqlite::{SqlitePool, SqliteQuestionStore, connect};
