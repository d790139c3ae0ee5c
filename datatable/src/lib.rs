//! Generic data table engine
//!
//! A framework-independent table over an in-memory row slice: search,
//! column filters, sorting, pagination, selection, bulk actions, a virtual
//! scroll window and CSV/JSON export. Rendering is left to the caller; this
//! crate only decides which rows appear, in which order, and how each cell
//! reads as text.
//!
//! # Example
//!
//! ```
//! use datatable::{CellValue, Column, DataTable, RowKey, TableConfig};
//!
//! struct Order {
//!     id: i64,
//!     customer: String,
//! }
//!
//! let columns = vec![
//!     Column::new("id", "#").accessor(|o: &Order| o.id.into()).sortable(true),
//!     Column::new("customer", "Customer").accessor(|o: &Order| o.customer.as_str().into()),
//! ];
//!
//! let rows = vec![
//!     Order { id: 1, customer: "Mohammed".into() },
//!     Order { id: 2, customer: "Sara".into() },
//! ];
//!
//! let mut table = DataTable::new(columns, RowKey::column("id"), TableConfig::default());
//! table.set_data(rows);
//! table.set_search("moh");
//!
//! assert_eq!(table.view().total(), 1);
//! assert_eq!(table.render_cell("customer", table.page_rows()[0], 0), "Mohammed");
//! ```

mod actions;
mod boundary;
mod column;
mod config;
mod error;
mod export;
mod key;
pub mod pipeline;
mod state;
mod table;
mod value;

pub use actions::*;
pub use boundary::*;
pub use column::*;
pub use config::*;
pub use error::*;
pub use export::*;
pub use key::*;
pub use pipeline::PageInfo;
pub use pipeline::View;
pub use pipeline::VisibleRange;
pub use state::*;
pub use table::*;
pub use value::*;
