pub mod table;

pub use table::{Record, RowAction, StoreError, Table};
