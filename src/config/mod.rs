//! Configuration model for latch.
//!
//! [`GuardConfig`] is read from YAML. Unknown fields are ignored for forward
//! compatibility, omitted fields take defaults, and values are validated on
//! load.

mod model;
mod operations;


// Re-export public API
pub use model::{GuardConfig, StoreKind};
