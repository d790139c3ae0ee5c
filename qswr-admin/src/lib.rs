//! Work order administration for the QSWR Frappe backend.
//!
//! The `qswr-admin` binary is a thin shell over these modules: [`cli`]
//! parses arguments, [`commands`] runs them against a [`commands::Context`]
//! holding the session cache, the settings store and the toast queue.

pub mod cli;
pub mod commands;
pub mod error;
pub mod paths;
pub mod projects;
pub mod render;
pub mod session;
pub mod settings;
pub mod toast;
