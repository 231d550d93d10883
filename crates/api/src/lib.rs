//! HTTP surface of the fight management system.
//!
//! Exposed as a library so integration tests build the same router as the
//! binary.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod services;
pub mod state;
