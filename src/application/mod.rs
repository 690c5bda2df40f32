pub mod add_memory;
pub mod clear;
pub mod index_adapter;
pub mod search;
pub mod stats;
