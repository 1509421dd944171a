//! Configuration types
//!
//! Bridge behaviour presets plus the radio addresses kept in persistent
//! storage.

pub mod persisted;
pub mod types;

pub use persisted::*;
pub use types::*;
