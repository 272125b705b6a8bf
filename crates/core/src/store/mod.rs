//! Columnar snapshot store.
//!
//! The full history of wealth records lives here in column-oriented form:
//! one [`ColumnBatch`] per snapshot date, with categorical fields translated
//! through the dictionary encoder and nested asset lists decomposed into
//! parallel arrays. The in-memory [`ColumnarStore`] owns the batches and the
//! dictionaries; [`FileStore`] maps the same state onto the persisted layout
//! (versioned manifest, one segment file per date, one dictionary file per
//! field).
//!
//! - [`column_batch`] - struct-of-arrays layout for one date
//! - [`snapshot_store`] - append/supersede/read/aggregate over all dates
//! - [`persist`] - on-disk layout and atomic commits
//! - [`store_errors`] - store error taxonomy

pub mod column_batch;
pub mod persist;
pub mod snapshot_store;
pub mod store_errors;


pub use column_batch::ColumnBatch;
pub use persist::{FileStore, StoreManifest, STORE_FORMAT_VERSION};
pub use snapshot_store::{AppendResult, ColumnarStore};
pub use store_errors::StoreError;
