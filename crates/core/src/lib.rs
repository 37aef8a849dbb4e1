//! derm-core: Guidance text cleanup and section extraction
//!
//! Turns a free-text completion describing a skin condition into a
//! fixed-shape `GuidanceRecord`. Everything here is pure and synchronous;
//! fetching completions lives in `derm-guidance`.

pub mod clean;
pub mod labels;
pub mod parser;
pub mod record;

pub use clean::clean;
pub use labels::{DISEASE_LABELS, is_known_label};
pub use parser::parse;
pub use record::{GuidanceRecord, SectionKind};
