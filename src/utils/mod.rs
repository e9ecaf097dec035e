//! Utility functions

pub mod encoding;
pub mod paths;

pub use encoding::decode_text;
pub use paths::{clean_path, resolve_config_path};
