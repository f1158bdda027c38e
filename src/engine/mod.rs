pub mod persister;
pub mod streamer;

// Re-export commonly used types
pub use persister::BulkPersister;
pub use streamer::QueryStreamer;
