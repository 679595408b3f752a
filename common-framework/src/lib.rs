//! Common Framework
//!
//! Pieces shared by `machine-framework` and `lexer-framework`: the pull-based
//! input source, source positions and the streaming signal protocol.

pub mod position;
pub mod source;
pub mod streaming;

pub use position::Position;
pub use source::{IterSource, Source};
pub use streaming::{Inbound, Outbound, StreamingSignal};
