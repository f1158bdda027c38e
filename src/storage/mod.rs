pub mod error;
pub mod memory;
pub mod postgres;
pub mod traits;

// Re-export commonly used types
pub use error::StorageError;
pub use memory::ConcurrentSalesStore;
pub use postgres::{PostgresConfig, PostgresSalesStore};
pub use traits::{RowStream, SalesStore, StoredRow};
