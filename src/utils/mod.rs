//! Utility functions for code generation and alias validation.
//!
//! - [`code_generator`] - Random short code generation
//! - [`alias_validator`] - Custom alias grammar and interactive edit buffer

pub mod alias_validator;
pub mod code_generator;

pub use alias_validator::{
    AliasInput, InvalidAlias, RESERVED_CODES, ensure_not_reserved, is_reserved, validate_alias,
};
pub use code_generator::{CODE_LENGTH, CodeGenerator, RandomCodeGenerator, generate_code};
