//! Infisical gateway.
//!
//! Plain HTTP routes over the Infisical API. Each route makes one call
//! through [`infisical_client`] and returns the result, with the project
//! context filled in from configuration.

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod service;
pub mod state;
