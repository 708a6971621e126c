//! Vector Record Store Implementations
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | InMemoryVectorRecordStore | In-Process | Concurrent map of immutable records |

#[cfg(feature = "vectorstore-memory")]
pub mod in_memory;

#[cfg(feature = "vectorstore-memory")]
pub use in_memory::InMemoryVectorRecordStore;
