//! tnm-core
//!
//! Pure domain types for the TNM report form: the histologic taxonomy, the
//! form control model, conditional-field declarations and the versioned form
//! configuration. No engine logic lives here.

pub mod conditional;
pub mod config;
pub mod error;
pub mod form;
pub mod taxonomy;
