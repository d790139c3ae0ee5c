//! Work orders ("projects"): backend calls, forms and the table.

pub mod constants;
mod form;
mod model;
mod service;
mod table;

pub use form::*;
pub use model::*;
pub use service::*;
pub use table::*;
