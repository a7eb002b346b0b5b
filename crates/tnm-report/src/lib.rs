//! tnm-report
//!
//! TNM stage derivation and the bilingual (Japanese/English) diagnostic
//! paragraph rendered from submitted form values.

pub mod error;
pub mod paragraph;
pub mod staging;
