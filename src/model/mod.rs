//! Renderer-independent knowledge graph model.
//!
//! [`GraphStore`] owns the tree of nodes and links, [`EditorState`] drives the
//! relationship dialog against it, and [`GraphView`] is the filtered projection
//! handed to the canvas.

mod editor;
mod error;
mod palette;
mod store;
mod types;

pub use editor::{EditorAction, EditorState, Submission};
pub use error::{PaletteError, ValidationError};
pub use palette::{ColorSource, Palette, RandomColors, SequenceColors};
pub use store::GraphStore;
pub use types::{GraphView, Link, Node, NodeId, ResolvedLink};
