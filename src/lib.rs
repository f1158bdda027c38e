//! Sales record ingest and export
//!
//! CSV uploads are validated row by row, grouped into fixed-size batches and
//! written with one insert per batch. Stored rows are read back by purchase
//! date as a lazily pulled stream of NDJSON lines.

pub mod app;
pub mod domain;
pub mod engine;
pub mod io;
pub mod prelude;
pub mod storage;
pub mod streaming;
