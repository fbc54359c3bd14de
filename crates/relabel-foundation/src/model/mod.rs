//! Data model for a single analysis snapshot of one buffer.

pub mod buffer;
pub mod position;
pub mod reference;
pub mod symbol;

pub use buffer::*;
pub use position::*;
pub use reference::*;
pub use symbol::*;
