//! nf-core: shared foundation for nodeflow.
//!
//! Contains:
//! - ids (stable compact IDs for nodes, controls, connections)
//! - numeric (Real + float helpers)
//! - error (shared error types)
//! - testing (float comparison, behind the `testing` feature)

pub mod error;
pub mod ids;
pub mod numeric;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{NfError, NfResult};
pub use ids::*;
pub use numeric::*;
