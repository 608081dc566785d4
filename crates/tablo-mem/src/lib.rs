//! In-memory reference implementation of the model sink contract.
//!
//! [`MemModel`] stores variables and constraints in ordered maps with a
//! staged/committed lifecycle: entities created through the batch calls are
//! pending until [`MemModel::commit`] runs, and their attributes are
//! unreadable before that. A naive [`MemModel::optimize`] materializes
//! solution values so post-solve attribute reads can be exercised without a
//! real solver backend.
//!
//! # Module Organization
//!
//! - [`model`]: Storage, batch creation, attribute access, metadata
//! - [`inspect`]: Serializable model snapshots

pub mod inspect;
pub mod model;

pub use inspect::{ConstraintView, ModelSnapshot, SnapshotMetadata, VariableView};
pub use model::MemModel;
