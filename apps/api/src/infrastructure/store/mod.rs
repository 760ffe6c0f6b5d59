// Record store adapters
// Implementations of the domain RecordStore port

pub mod memory;
pub mod postgrest;

pub use memory::InMemoryRecordStore;
pub use postgrest::PostgrestStore;
