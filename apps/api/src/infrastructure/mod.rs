// Infrastructure layer module
// Contains the record store adapters and the repositories built on them
// Follows Hexagonal Architecture

pub mod repositories;
pub mod store;
