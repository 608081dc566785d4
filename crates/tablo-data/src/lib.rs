//! Tabular data model for table-aligned optimization model building.
//!
//! This crate provides the index, series, and frame types that the bridge
//! core aligns entity-creation batches against, plus the opaque handle
//! types returned by a model sink.
//!
//! # Module Organization
//!
//! - [`key`]: Scalar and composite index keys
//! - [`index`]: Ordered row indices
//! - [`series`]: Dynamic cell values and index-aligned columns
//! - [`frame`]: Named columns sharing one index
//! - [`handles`]: Opaque entity handle types
//! - [`error`]: Data error types

pub mod error;
pub mod frame;
pub mod handles;
pub mod index;
pub mod key;
pub mod series;

pub use error::DataError;
pub use frame::Frame;
pub use handles::{ConstrHandle, VarHandle};
pub use index::Index;
pub use key::Key;
pub use series::{Series, Value};
