pub mod embedding_port;
pub mod index_backend;
pub mod memory_store;
