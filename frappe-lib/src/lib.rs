//! Frappe API client library
//!
//! A Rust async client for the REST API exposed by Frappe-based backends
//! (`/api/resource/*` document endpoints and `/api/method/*` RPC calls).

pub mod api;
pub mod auth;
pub mod error;
pub mod model;

mod client;

pub use client::*;
