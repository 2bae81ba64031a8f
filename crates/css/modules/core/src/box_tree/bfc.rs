//! The block formatting context driver: walks a box tree in document order
//! via `box_start`/`box_end` calls and resolves every block container's
//! block-axis position once enough adjoining margins are known to collapse
//! them (CSS 2.2 §8.3.1, §9.4.1).
//!
//! Positions cannot be assigned the moment a box is seen: a box's own
//! margin-block-start may still be adjoining its first child's, or the box
//! itself may turn out to be empty and collapse straight through. So this
//! driver defers: it accumulates adjoining margins into a
//! [`MarginCollapseCollection`] and only commits offsets to
//! `resolved_block_start`/`resolved_block_end` when a "flush" — a genuine
//! break in the adjoining chain — occurs.

use super::margin_strut::MarginCollapseCollection;
use super::{FloatContext, NodeKey};
use css_box::LayoutUnit;
use std::collections::HashMap;

/// One open, not-yet-flushed chain of adjoining margins.
///
/// A chain stays open across a box's own `box_start` when that box's
/// margin-block-start itself adjoins its first child's (CSS 2.2 §8.3.1 rule
/// 4: no border, no padding, no clearance, no BFC root) — in that case the
/// parent box and the child ride the same `Level` rather than getting one
/// each. A fresh `Level` is pushed only when a box's content genuinely
/// starts a new position that cannot merge with what came before.
struct Level {
    collection: MarginCollapseCollection,
    /// Boxes whose block-start edge resolves to this chain's collapsed
    /// value once it flushes.
    pending_starts: Vec<NodeKey>,
    /// The content-area-relative offset this chain begins from — i.e. the
    /// position already committed before this chain opened. Advances past
    /// `content_start` as boxes riding this chain report a real size
    /// through `box_end`.
    base: LayoutUnit,
    /// `base` at the moment this level was pushed, fixed for the level's
    /// whole lifetime. Read back by the box that pushed this level (as its
    /// own nested children-chain) to anchor that box's own content-end
    /// against its `border_block_size` rather than against whatever `base`
    /// has drifted to from its children's own advances.
    content_start: LayoutUnit,
    clearance_at_level: bool,
}

impl Level {
    const fn new(base: LayoutUnit) -> Self {
        Self {
            collection: MarginCollapseCollection::new(),
            pending_starts: Vec::new(),
            base,
            content_start: base,
            clearance_at_level: false,
        }
    }
}

/// Drives one block formatting context's layout: margin collapsing, float
/// placement, and the deferred block-position assignment the two interact
/// through.
pub struct BlockFormattingContext {
    /// The chain open at the BFC's own root. Never popped — `nested_levels`
    /// holds every chain opened beneath it, so `top_mut` always has
    /// somewhere to land without a fallible lookup.
    root_level: Level,
    nested_levels: Vec<Level>,
    resolved_block_start: HashMap<NodeKey, LayoutUnit>,
    resolved_block_end: HashMap<NodeKey, LayoutUnit>,
    /// Boxes that collapsed straight through: both margin edges resolve to
    /// the same offset (CSS 2.2 §8.3.1, `spec.md`'s `hypotheticals`).
    hypotheticals: HashMap<NodeKey, LayoutUnit>,
    pub float_context: FloatContext,
}

impl BlockFormattingContext {
    pub fn new(bfc_inline_size: LayoutUnit) -> Self {
        Self {
            root_level: Level::new(LayoutUnit::zero()),
            nested_levels: Vec::new(),
            resolved_block_start: HashMap::new(),
            resolved_block_end: HashMap::new(),
            hypotheticals: HashMap::new(),
            float_context: FloatContext::new(bfc_inline_size),
        }
    }

    fn top_mut(&mut self) -> &mut Level {
        self.nested_levels.last_mut().unwrap_or(&mut self.root_level)
    }

    /// Resolve every box still pending in the top chain to its collapsed
    /// offset, then start a fresh, empty chain from that point.
    fn flush_top(&mut self) -> LayoutUnit {
        let resolved_offset = {
            let top = self.top_mut();
            top.base + top.collection.get()
        };
        let pending = std::mem::take(&mut self.top_mut().pending_starts);
        for node_key in pending {
            self.resolved_block_start.insert(node_key, resolved_offset);
        }
        let top = self.top_mut();
        *top = Level::new(resolved_offset);
        resolved_offset
    }

    /// A box enters the tree. `adjoins_first_child` is CSS 2.2 §8.3.1 rule
    /// 4: true when nothing (border, padding, clearance, BFC-root-ness)
    /// separates this box's own margin-block-start from its first in-flow
    /// child's. When true, the box rides the current chain instead of
    /// opening a new one, so its margin-block-start can still merge with a
    /// descendant's.
    pub fn box_start(
        &mut self,
        node_key: NodeKey,
        margin_block_start: LayoutUnit,
        clearance: Option<LayoutUnit>,
        adjoins_first_child: bool,
    ) {
        if let Some(clearance_offset) = clearance {
            self.flush_top();
            let top = self.top_mut();
            top.base = top.base.max(clearance_offset);
            top.clearance_at_level = true;
            top.collection.add(margin_block_start);
        } else {
            self.top_mut().collection.add(margin_block_start);
        }
        self.top_mut().pending_starts.push(node_key);

        if !adjoins_first_child {
            let fresh_base = self.flush_top();
            self.nested_levels.push(Level::new(fresh_base));
        }
    }

    /// A box with no in-flow content and nothing separating its own two
    /// margins collapses straight through: both edges land at the same
    /// offset. CSS 2.2 §8.3.1's "own margins of a box" clause.
    pub fn collapse_through(
        &mut self,
        node_key: NodeKey,
        margin_block_start: LayoutUnit,
        margin_block_end: LayoutUnit,
    ) {
        let top = self.top_mut();
        top.collection.add(margin_block_start);
        top.collection.add(margin_block_end);
        self.hypotheticals.insert(node_key, LayoutUnit::zero());
        top.pending_starts.push(node_key);
    }

    /// A box's content area is finished and its own margin-block-end edge
    /// and resolved `border_block_size` are known. `opened_own_level` must
    /// match the `adjoins_first_child` passed to the matching `box_start`
    /// — it tells the driver whether to pop a level here.
    ///
    /// Either way this is a chain-reach boundary (CSS 2.2 §8.3.1: a box's
    /// own margin-block-end always starts a fresh adjoining opportunity for
    /// whatever follows), so the current chain is always flushed here
    /// before `margin_block_end` joins the next one — this is what keeps
    /// every box in a sibling run pinned to the offset it had when it was
    /// reached, instead of letting a later sibling's margin retroactively
    /// move it.
    pub fn box_end(
        &mut self,
        node_key: NodeKey,
        margin_block_end: LayoutUnit,
        opened_own_level: bool,
        border_block_size: LayoutUnit,
    ) {
        if opened_own_level {
            let content_start = self.top_mut().content_start;
            let natural_end = self.flush_top();
            self.nested_levels.pop();
            let content_end = natural_end.max(content_start + border_block_size);
            self.resolved_block_end.insert(node_key, content_end);
            let top = self.top_mut();
            top.base = content_end;
            top.collection.add(margin_block_end);
        } else {
            let start_offset = self.flush_top();
            let end_offset = start_offset + border_block_size;
            if border_block_size > LayoutUnit::zero() {
                self.resolved_block_end.insert(node_key, end_offset);
            }
            let top = self.top_mut();
            top.base = end_offset;
            top.collection.add(margin_block_end);
        }
    }

    /// `positionBlockContainers()`: force a flush of the currently open
    /// chain without closing any level, used before text layout or float
    /// placement needs every pending offset committed.
    pub fn position_block_containers(&mut self) -> LayoutUnit {
        self.flush_top()
    }

    /// The final resolved offset for a box's margin-block-start edge, once
    /// a flush covering it has occurred.
    pub fn resolved_block_start(&self, node_key: NodeKey) -> Option<LayoutUnit> {
        self.resolved_block_start.get(&node_key).copied()
    }

    pub fn resolved_block_end(&self, node_key: NodeKey) -> Option<LayoutUnit> {
        self.resolved_block_end.get(&node_key).copied()
    }

    pub fn is_hypothetical(&self, node_key: NodeKey) -> bool {
        self.hypotheticals.contains_key(&node_key)
    }

    pub const fn content_inline_size(&self) -> LayoutUnit {
        self.float_context.bfc_inline_size()
    }

    /// A read-only view over every position this BFC has resolved so far,
    /// for a caller to copy into its own tree-wide table.
    pub const fn positions(&self) -> BfcPositions<'_> {
        BfcPositions {
            block_start: &self.resolved_block_start,
            block_end: &self.resolved_block_end,
        }
    }

    /// Close out the BFC: flush whatever chain is still open (there is
    /// always exactly one, the root's, left when the tree walk completes)
    /// and report the final content block-size.
    pub fn finalize(mut self) -> LayoutUnit {
        self.flush_top()
    }
}

/// Borrowed view over a `BlockFormattingContext`'s resolved positions.
pub struct BfcPositions<'bfc> {
    block_start: &'bfc HashMap<NodeKey, LayoutUnit>,
    block_end: &'bfc HashMap<NodeKey, LayoutUnit>,
}

impl BfcPositions<'_> {
    pub fn block_starts(&self) -> impl Iterator<Item = (&NodeKey, &LayoutUnit)> {
        self.block_start.iter()
    }

    pub fn block_ends(&self) -> impl Iterator<Item = (&NodeKey, &LayoutUnit)> {
        self.block_end.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(value: f32) -> LayoutUnit {
        LayoutUnit::from_px(value)
    }

    /// Scenario 1 from `spec.md` §8: two sibling block containers with
    /// margins `20px` and `30px` between them collapse to `30px`, not
    /// `50px`.
    ///
    /// # Panics
    /// Panics if the collapsed gap is not the larger margin.
    #[test]
    fn adjoining_sibling_margins_collapse_to_the_larger() {
        let mut bfc = BlockFormattingContext::new(px(300.0));
        let first = NodeKey(1);
        let second = NodeKey(2);

        bfc.box_start(first, px(20.0), None, false);
        bfc.box_end(first, px(20.0), true, px(0.0));
        bfc.box_start(second, px(30.0), None, false);

        let second_offset = bfc.resolved_block_start(second).expect("second box start must resolve");
        let first_end = bfc.resolved_block_end(first).expect("first box end must resolve");
        assert_eq!(first_end, px(20.0));
        assert_eq!(second_offset, px(30.0));
    }

    /// Two zero-height siblings riding the same chain (neither opens its
    /// own level — no border, no padding, not a BFC root) must still
    /// resolve to distinct offsets: the first is pinned to the offset it
    /// had when its own `box_end` was reached, not dragged forward by a
    /// later sibling's larger margin.
    ///
    /// # Panics
    /// Panics if both siblings resolve to the same offset.
    #[test]
    fn siblings_riding_the_same_chain_resolve_to_distinct_offsets() {
        let mut bfc = BlockFormattingContext::new(px(300.0));
        let first = NodeKey(1);
        let second = NodeKey(2);

        bfc.box_start(first, px(0.0), None, true);
        bfc.box_end(first, px(20.0), false, px(0.0));
        bfc.box_start(second, px(30.0), None, true);
        bfc.box_end(second, px(0.0), false, px(0.0));

        let first_offset = bfc.resolved_block_start(first).expect("first box start must resolve");
        let second_offset = bfc.resolved_block_start(second).expect("second box start must resolve");
        assert_eq!(first_offset, px(0.0));
        assert_eq!(second_offset, px(30.0));
    }

    /// A sibling with real block size must push the next sibling's margin
    /// collapse past its own bottom edge rather than stacking both at the
    /// same offset.
    ///
    /// # Panics
    /// Panics if the second sibling overlaps the first.
    #[test]
    fn a_sized_sibling_pushes_the_next_ones_offset_past_its_own_bottom() {
        let mut bfc = BlockFormattingContext::new(px(300.0));
        let first = NodeKey(1);
        let second = NodeKey(2);

        bfc.box_start(first, px(0.0), None, true);
        bfc.box_end(first, px(10.0), false, px(50.0));
        bfc.box_start(second, px(10.0), None, true);
        bfc.position_block_containers();

        let first_offset = bfc.resolved_block_start(first).expect("first box start must resolve");
        let second_offset = bfc.resolved_block_start(second).expect("second box start must resolve");
        assert_eq!(first_offset, px(0.0));
        // First's margin-end (10) and second's margin-start (10) collapse
        // to 10, not 20 — the gap sits after first's 50px content box.
        assert_eq!(second_offset, px(60.0));
    }

    /// Scenario 2 from `spec.md` §8: an empty `div` with `margin-top: 10px;
    /// margin-bottom: 15px` between two others collapses through, merging
    /// all three margins to `15px`.
    ///
    /// # Panics
    /// Panics if the collapse-through box does not merge into the
    /// surrounding chain.
    #[test]
    fn collapse_through_box_merges_into_the_chain() {
        let mut bfc = BlockFormattingContext::new(px(300.0));
        let empty = NodeKey(1);
        let after = NodeKey(2);

        bfc.collapse_through(empty, px(10.0), px(15.0));
        bfc.box_start(after, px(0.0), None, false);

        let after_offset = bfc.resolved_block_start(after).expect("after box must resolve");
        assert_eq!(after_offset, px(15.0));
        assert!(bfc.is_hypothetical(empty));
    }

    /// Scenario 3 from `spec.md` §8: margins `-10px` and `20px` collapse to
    /// `10px` (largest positive minus largest negative magnitude).
    ///
    /// # Panics
    /// Panics if the signed collapse result is wrong.
    #[test]
    fn negative_and_positive_margins_collapse_by_sign() {
        let mut bfc = BlockFormattingContext::new(px(300.0));
        let first = NodeKey(1);
        let second = NodeKey(2);

        bfc.box_start(first, px(-10.0), None, false);
        bfc.box_end(first, px(0.0), true, px(0.0));
        bfc.box_start(second, px(20.0), None, false);

        let second_offset = bfc.resolved_block_start(second).expect("second box must resolve");
        assert_eq!(second_offset, px(10.0));
    }

    /// Scenario 4 from `spec.md` §8: a box with `clear: left` after a
    /// `100px`-tall left float does not collapse its margin past the
    /// float's bottom edge.
    ///
    /// # Panics
    /// Panics if clearance does not override the collapsed margin.
    #[test]
    fn clearance_overrides_margin_collapse() {
        use super::super::exclusion_space::{FloatPlacementInput, FloatSideKind};
        use css_style::Clear;

        let mut bfc = BlockFormattingContext::new(px(300.0));
        bfc.float_context
            .place_float(
                FloatSideKind::Left,
                LayoutUnit::zero(),
                true,
                FloatPlacementInput {
                    node_key: NodeKey(1),
                    border_inline_size: px(50.0),
                    border_block_size: px(100.0),
                    margin_block_start: LayoutUnit::zero(),
                    margin_block_end: LayoutUnit::zero(),
                    margin_near: LayoutUnit::zero(),
                    margin_far: LayoutUnit::zero(),
                    clear: Clear::None,
                },
                LayoutUnit::zero(),
            )
            .expect("float placement must not error");

        let cleared = NodeKey(2);
        let clearance = bfc.float_context.clearance_offset(Clear::Left);
        bfc.box_start(cleared, px(5.0), Some(clearance), false);

        let offset = bfc.resolved_block_start(cleared).expect("cleared box must resolve");
        assert_eq!(offset, px(100.0));
    }
}
