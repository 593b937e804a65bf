//! Content store adapters.
//!
//! - `PostgrestContentStore` - PostgREST over HTTP (Supabase-style projects)
//! - `PostgresContentStore` - Direct PostgreSQL via sqlx
//! - `InMemoryContentStore` - In-process rows for tests and local fixtures

mod in_memory;
mod postgres;
mod postgrest;

pub use in_memory::InMemoryContentStore;
pub use postgres::PostgresContentStore;
pub use postgrest::{PostgrestConfig, PostgrestContentStore};
