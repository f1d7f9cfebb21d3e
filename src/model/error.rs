//! Errors raised by the graph model.

use thiserror::Error;

/// Rejected "Add Relationship" input. The store is left untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
	/// Empty name.
	#[error("relationship name is required")]
	MissingName,

	/// Empty description.
	#[error("relationship description is required")]
	MissingDescription,
}

/// Invalid color palette.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteError {
	/// No non-blank colors were given.
	#[error("color palette must contain at least one color")]
	Empty,
}
