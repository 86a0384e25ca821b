#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # gbdi-validate
//!
//! Validation engine for converted project documents.
//!
//! Runs required-field, range, and consistency rules over a
//! [`gbdi_lcax::Project`] before it is written out. Errors reject the
//! project; warnings are reported. The strictness level decides whether
//! warnings also reject.

pub mod engine;
pub mod rules;

pub use engine::{
    Severity, StrictnessLevel, ValidationConfig, ValidationEngine, ValidationError,
    ValidationResult,
};
