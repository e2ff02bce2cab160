//! Pipeline module - vendor file parsing, validation and record encoding
//!
//! Nothing here touches the terminal; the interactive flow lives in `cli`.

pub mod encoder;
pub mod error;
pub mod model;
pub mod parser;
pub mod validator;
pub mod writer;

pub use encoder::*;
pub use error::*;
pub use model::*;
pub use parser::*;
pub use validator::*;
pub use writer::*;
