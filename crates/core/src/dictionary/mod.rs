//! Categorical dictionary encoding.
//!
//! Repeated string fields (exchange, currency, industry, company) are mapped
//! to dense integer codes for columnar storage. Codes are allocated in
//! encounter order and are never reused or reassigned, so rows encoded
//! against an older vocabulary always decode after the dictionary grows.
//!
//! - [`dictionary_model`] - `CategoricalDictionary`, `DictionarySet`, `Field`

pub mod dictionary_model;

#[cfg(test)]
mod dictionary_tests;

pub use dictionary_model::{CategoricalDictionary, DictionaryError, DictionarySet, Field};
