//! REST API operations
//!
//! Frappe exposes documents under `/api/resource/{doctype}` and whitelisted
//! server functions under `/api/method/{dotted.path}`.

mod method;
mod query;
mod request;
mod resource;

pub use query::*;
