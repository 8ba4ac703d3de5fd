//! Pure helper utilities shared across layers.

pub mod code_generator;
pub mod url_validator;
