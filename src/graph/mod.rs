//! Graph filtering and selection core.
//!
//! Pure state logic with no DOM dependency: given an immutable [`Dataset`]
//! and the current [`FiltersState`] / [`SelectionState`], derive which nodes
//! and edges are visible, searchable, and highlighted, and project that into
//! a [`RenderModel`] for a drawing surface.
//!
//! ```text
//! Event -> Session::dispatch
//!            FiltersState  -> compute_visible -> Visibility
//!                                              -> SearchIndex
//!                                              -> SelectionState::clear_selection_if_hidden
//!          Session::render_model -> project -> RenderModel
//! ```

mod dataset;
mod error;
mod filters;
#[cfg(test)]
mod fixtures;
mod projection;
mod search;
mod selection;
mod session;
mod types;
mod visibility;

pub use dataset::Dataset;
pub use error::{KeyKind, LoadError, UnknownKeyError};
pub use filters::{Category, FiltersState};
pub use projection::{EdgeDraw, GraphStats, NodeDraw, ProjectionConfig, RenderModel, project};
pub use search::{Matches, SearchIndex, search};
pub use selection::SelectionState;
pub use session::{Event, FacetRow, Outcome, Phase, Session, SessionConfig};
pub use types::{Cluster, Edge, Node, RawDataset, Tag};
pub use visibility::{FacetCounts, Visibility, compute_visible};
