//! The box tree this core lays out: block containers, inline wrappers, runs,
//! forced breaks, and floated block containers, keyed by an arena index.
//!
//! Spec: CSS 2.2 §9 Visual Formatting Model.
//!
//! Building this tree — cascade, selector matching, DOM traversal, `display`
//! computation — is an external collaborator's job. This module only defines
//! the shape a builder populates and the predicates the layout driver reads
//! off it.

pub mod bfc;
pub mod exclusion_space;
pub mod margin_strut;

pub use bfc::{BfcPositions, BlockFormattingContext};
pub use css_box::LayoutUnit;
pub use exclusion_space::{FloatContext, FloatPlacementInput, FloatSideKind, PlaceFloatOutcome, PlacedFloat, Vacancy};
pub use margin_strut::MarginCollapseCollection;

use css_box::{AreaId, BlockContainerAreas};
use css_style::ComputedStyle;
use std::collections::HashMap;

/// Identifies one node in a `BoxTree`. Opaque and stable for the lifetime of
/// the tree; does not encode any ordering beyond insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey(pub u64);

/// `isAnonymous`, `isBfcRoot`, `isFloat`, `isInline`, `enableLogging` from
/// `spec.md` §3, plus `contains_inlines` (whether this block container is of
/// inlines rather than of block containers — a fact the box-generation stage
/// already knows and the core should not have to rediscover).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoxAttributes {
    pub is_anonymous: bool,
    pub is_bfc_root: bool,
    pub is_float: bool,
    pub is_inline: bool,
    pub contains_inlines: bool,
    pub enable_logging: bool,
}

/// One node of the box tree.
#[derive(Debug, Clone)]
pub struct BoxNode {
    pub node_key: NodeKey,
    pub style: ComputedStyle,
    pub attributes: BoxAttributes,
    pub children: Vec<NodeKey>,

    /// Set once during the downward pre-order walk, never mutated after.
    pub containing_block_content_area: Option<AreaId>,

    /// Populated once this node's three areas have been placed.
    pub areas: Option<BlockContainerAreas>,
}

impl BoxNode {
    pub fn new(node_key: NodeKey, style: ComputedStyle, attributes: BoxAttributes) -> Self {
        Self {
            node_key,
            style,
            attributes,
            children: Vec::new(),
            containing_block_content_area: None,
            areas: None,
        }
    }

    /// CSS 2.2 §9.5.1: this node's own top/bottom margins may merge with a
    /// neighbor's. Necessary but not sufficient — the BFC driver also checks
    /// for clearance (`margin.clearanceAtLevel`) before treating the end
    /// event as adjoining.
    pub fn can_collapse_through(&self) -> bool {
        self.style.can_collapse_through_by_style() && self.children.is_empty()
    }
}

/// Arena owning every `BoxNode` in one layout's box tree.
#[derive(Debug, Clone, Default)]
pub struct BoxTree {
    nodes: HashMap<NodeKey, BoxNode>,
    next_key: u64,
}

impl BoxTree {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            next_key: 0,
        }
    }

    /// Insert a node, generating a fresh `NodeKey` for it.
    pub fn insert(&mut self, style: ComputedStyle, attributes: BoxAttributes) -> NodeKey {
        let key = NodeKey(self.next_key);
        self.next_key += 1;
        self.nodes.insert(key, BoxNode::new(key, style, attributes));
        key
    }

    /// Record `child` as a child of `parent`, in document order.
    pub fn append_child(&mut self, parent: NodeKey, child: NodeKey) {
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
    }

    pub fn get(&self, key: NodeKey) -> Option<&BoxNode> {
        self.nodes.get(&key)
    }

    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut BoxNode> {
        self.nodes.get_mut(&key)
    }

    /// *Block-level* = not `isInline` (`spec.md` §3).
    pub fn is_block_level(&self, key: NodeKey) -> bool {
        self.get(key).is_some_and(|node| !node.attributes.is_inline)
    }

    pub fn is_float(&self, key: NodeKey) -> bool {
        self.get(key).is_some_and(|node| node.attributes.is_float)
    }

    /// "A float is always a BFC root" (`spec.md` §3).
    pub fn is_bfc_root(&self, key: NodeKey) -> bool {
        self.get(key)
            .is_some_and(|node| node.attributes.is_bfc_root || node.attributes.is_float)
    }

    pub fn is_block_container_of_inlines(&self, key: NodeKey) -> bool {
        self.get(key)
            .is_some_and(|node| !node.attributes.is_inline && node.attributes.contains_inlines)
    }

    pub fn is_block_container_of_block_containers(&self, key: NodeKey) -> bool {
        self.get(key).is_some_and(|node| {
            !node.attributes.is_inline
                && !node.attributes.contains_inlines
                && !node.attributes.is_float
        })
    }

    pub fn can_collapse_through(&self, key: NodeKey) -> bool {
        self.get(key).is_some_and(BoxNode::can_collapse_through)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// # Panics
    /// Panics if a float is not reported as its own BFC root.
    #[test]
    fn a_float_is_always_a_bfc_root() {
        let mut tree = BoxTree::new();
        let float_key = tree.insert(
            ComputedStyle::default(),
            BoxAttributes {
                is_float: true,
                ..BoxAttributes::default()
            },
        );
        assert!(tree.is_bfc_root(float_key));
        assert!(tree.is_float(float_key));
    }

    /// # Panics
    /// Panics if block-level/inline classification disagrees with the
    /// `isInline` attribute.
    #[test]
    fn block_level_is_the_negation_of_inline() {
        let mut tree = BoxTree::new();
        let block_key = tree.insert(ComputedStyle::default(), BoxAttributes::default());
        let inline_key = tree.insert(
            ComputedStyle::default(),
            BoxAttributes {
                is_inline: true,
                ..BoxAttributes::default()
            },
        );
        assert!(tree.is_block_level(block_key));
        assert!(!tree.is_block_level(inline_key));
    }

    /// # Panics
    /// Panics if an empty, unstyled box does not report as collapse-through.
    #[test]
    fn empty_default_box_can_collapse_through() {
        let mut tree = BoxTree::new();
        let key = tree.insert(ComputedStyle::default(), BoxAttributes::default());
        assert!(tree.can_collapse_through(key));
    }
}
