//! Product Repository Implementations
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | InMemoryProductRepository | In-Process | Versioned product rows with tombstones |

pub mod in_memory;

pub use in_memory::InMemoryProductRepository;
