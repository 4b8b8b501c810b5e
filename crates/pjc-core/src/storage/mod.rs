//! Tournament persistence and input sheets.
//!
//! - `TournamentDocument` - JSON document of a whole tournament
//! - `import` - roster and planning CSV sheets

mod document;
pub mod import;

pub use document::*;
