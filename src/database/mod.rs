pub mod handle;
pub mod schema;
