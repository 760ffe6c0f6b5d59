//! Records API Library
//!
//! HTTP gateway for student and course records kept in a hosted relational
//! store: domain types, the store query port and its adapters, and the
//! axum router.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod startup;
