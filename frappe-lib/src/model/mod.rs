//! Typed models

mod doctype;
mod document;
mod user;

pub use doctype::*;
pub use document::*;
pub use user::*;
