//! Storage abstraction and implementations for Wordwise.
//!
//! This crate provides a trait-based interface for persisting the progress and
//! settings documents, a JSON file implementation, and the file-picker seam
//! used by export and import.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod picker;

pub use trait_::{Document, Storage, StorageError, Result};
pub use json_storage::JsonStorage;
pub use picker::{FilePicker, PathPicker};
