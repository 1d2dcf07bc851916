//! GenAI technique detection
//!
//! Maps scanned libraries and source patterns onto the fixed technique taxonomy.

mod detector;
mod taxonomy;
mod types;

pub use detector::{finalize, techniques_for_library, TechniqueDetector};
pub use taxonomy::{TechniqueKind, LIBRARY_TABLE};
pub use types::{TechniqueDetection, MAX_LOCATIONS};
