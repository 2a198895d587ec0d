//! Repository layer.
//!
//! Handlers depend on the [`PrintRequestStore`] capability trait; the
//! PostgreSQL implementation is [`PrintRequestRepo`].

pub mod print_request_repo;

pub use print_request_repo::{PrintRequestRepo, PrintRequestStore};
