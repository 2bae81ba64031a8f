//! Block formatting and float placement core.
//!
//! Given an already-styled box tree (block containers, inline wrappers,
//! runs, forced breaks, floated block containers), this crate computes the
//! position and size of every block-level box: it resolves vertical margin
//! collapsing across arbitrary depths ([`box_tree::margin_strut`]), places
//! floated boxes onto a two-sided shelf structure
//! ([`box_tree::exclusion_space`]), and drives the two-pass positioning of
//! deferred block containers whose offsets cannot be fixed until their
//! subtree's contributing margins are known ([`box_tree::bfc`]).
//!
//! Cascade, selector matching, DOM-to-box-tree construction, text shaping
//! and line breaking, font management, and painting are external
//! collaborators; this crate only defines the seams they are invoked
//! through ([`text::InlineFormattingContext`]).

pub mod box_tree;
pub mod driver;
pub mod error;
pub mod intrinsic;
pub mod text;

pub use box_tree::{
    BfcPositions, BlockFormattingContext, BoxAttributes, BoxNode, BoxTree, FloatContext,
    FloatPlacementInput, FloatSideKind, MarginCollapseCollection, NodeKey, PlaceFloatOutcome,
    PlacedFloat, Vacancy,
};
pub use driver::{LayoutContext, layout_block_box, layout_float_box};
pub use error::{contract_violation, require_used, unsupported};
pub use intrinsic::{IntrinsicMode, layout_contribution};
pub use text::{FixedHeightIfc, InlineFormattingContext, LineBox, Paragraph, TextLayoutContext};
