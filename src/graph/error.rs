//! Error types for dataset loading and state transitions.

use std::fmt;

use thiserror::Error;

/// The collection a key belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyKind {
	Node,
	Edge,
	Cluster,
	Tag,
}

impl fmt::Display for KeyKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			KeyKind::Node => "node",
			KeyKind::Edge => "edge",
			KeyKind::Cluster => "cluster",
			KeyKind::Tag => "tag",
		})
	}
}

/// Failure to build a [`Dataset`](super::Dataset). Fatal: no graph is shown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
	/// An element refers to a key that is not declared.
	#[error("Dangling reference: {owner_kind} '{owner}' refers to missing {target_kind} '{target}'")]
	DanglingReference {
		/// Kind of the element holding the reference.
		owner_kind: KeyKind,
		/// Key of the element holding the reference.
		owner: String,
		/// Kind of the missing element.
		target_kind: KeyKind,
		/// The key that does not resolve.
		target: String,
	},

	/// The same key appears twice in one collection.
	#[error("Duplicate {kind} key '{key}'")]
	DuplicateKey {
		/// Collection with the duplicate.
		kind: KeyKind,
		/// The repeated key.
		key: String,
	},

	/// The document could not be parsed.
	#[error("Invalid graph document: {0}")]
	Parse(String),
}

impl LoadError {
	/// Stable error code, suitable for display and matching in the shell.
	pub fn code(&self) -> &'static str {
		match self {
			Self::DanglingReference { .. } => "DANGLING_REFERENCE",
			Self::DuplicateKey { .. } => "DUPLICATE_KEY",
			Self::Parse(_) => "PARSE",
		}
	}
}

impl From<serde_json::Error> for LoadError {
	fn from(err: serde_json::Error) -> Self {
		Self::Parse(err.to_string())
	}
}

/// A mutator was called with a key that is absent from the dataset.
///
/// This is a wiring error between the UI and the core, not something a user
/// can recover from, so it is returned to the caller rather than ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind} key '{key}'")]
pub struct UnknownKeyError {
	pub kind: KeyKind,
	pub key: String,
}

impl UnknownKeyError {
	pub fn new(kind: KeyKind, key: impl Into<String>) -> Self {
		Self {
			kind,
			key: key.into(),
		}
	}

	pub fn code(&self) -> &'static str {
		"UNKNOWN_KEY"
	}
}
