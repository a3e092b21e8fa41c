mod common;
mod document;
mod source;

pub use common::*;
pub use document::*;
pub use source::*;
