pub mod index_backend;
pub mod schema;
