//! Float placement: the two-sided shelf/track structure (`FloatSide`) and
//! the context that owns both sides for one block formatting context
//! (`FloatContext`).
//!
//! Based on Chromium's "shelves algorithm", as sketched in the teacher
//! workspace's own `ExclusionSpace` — reworked here into the explicit
//! track-table-plus-shelf model so a line-breaker can binary-search
//! occupancy at an arbitrary block offset rather than linear-scanning a flat
//! exclusion list.

use super::NodeKey;
use css_box::LayoutUnit;
use css_style::Clear;
use std::collections::{HashMap, VecDeque};

/// Which side of the containing block a float sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatSideKind {
    Left,
    Right,
}

/// A positioned float, recorded for `clear` and debugging queries.
#[derive(Debug, Clone, Copy)]
struct PlacedFloatRecord {
    node_key: NodeKey,
    block_start: LayoutUnit,
    block_end: LayoutUnit,
}

/// Geometry resolved for one float once it has been placed.
///
/// Both fields are BFC-relative (not yet converted to the float's own
/// containing block's local frame — the caller subtracts the running
/// `cbBlockStart` and adds `marginBlockStart` per `spec.md` §4.3).
#[derive(Debug, Clone, Copy)]
pub struct PlacedFloat {
    pub inline_position: LayoutUnit,
    pub block_start: LayoutUnit,
    pub block_size: LayoutUnit,
}

/// Resolved margins and border-box size for a float about to be placed.
/// Margins already have `auto` reduced to zero (`spec.md` §4.2 step 3).
#[derive(Debug, Clone, Copy)]
pub struct FloatPlacementInput {
    pub node_key: NodeKey,
    pub border_inline_size: LayoutUnit,
    pub border_block_size: LayoutUnit,
    pub margin_block_start: LayoutUnit,
    pub margin_block_end: LayoutUnit,
    /// The margin adjacent to the containing block edge this float hugs
    /// (`margin-left` for a left float, `margin-right` for a right float).
    pub margin_near: LayoutUnit,
    /// The margin on the far side.
    pub margin_far: LayoutUnit,
    pub clear: Clear,
}

/// A vacancy: the horizontal band still free at some block offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vacancy {
    pub left_offset: LayoutUnit,
    pub right_offset: LayoutUnit,
    pub block_offset: LayoutUnit,
    pub inline_size: LayoutUnit,
    pub left_float_count: usize,
    pub right_float_count: usize,
}

/// The per-side occupancy table: an ordered partition of the block axis
/// into tracks, plus a shelf marking where the next float of this side will
/// be attempted.
///
/// `block_offsets` always has one more entry than `inline_sizes` /
/// `inline_offsets` / `float_counts` (`spec.md` §8, "Track ordering"). The
/// final entry is a `LayoutUnit::max_value()` sentinel standing in for the
/// open-ended last track.
#[derive(Debug, Clone)]
pub struct FloatSide {
    kind: FloatSideKind,
    items: Vec<PlacedFloatRecord>,
    block_offsets: Vec<LayoutUnit>,
    inline_sizes: Vec<LayoutUnit>,
    inline_offsets: Vec<LayoutUnit>,
    float_counts: Vec<usize>,
    shelf_block_offset: LayoutUnit,
    shelf_track_index: usize,
}

impl FloatSide {
    pub fn new(kind: FloatSideKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
            block_offsets: vec![LayoutUnit::zero(), LayoutUnit::max_value()],
            inline_sizes: vec![LayoutUnit::zero()],
            inline_offsets: vec![LayoutUnit::zero()],
            float_counts: vec![0],
            shelf_block_offset: LayoutUnit::zero(),
            shelf_track_index: 0,
        }
    }

    pub const fn shelf_block_offset(&self) -> LayoutUnit {
        self.shelf_block_offset
    }

    fn track_count(&self) -> usize {
        self.inline_sizes.len()
    }

    /// The track index whose interval `[blockOffsets[i], blockOffsets[i+1])`
    /// contains `block_offset`.
    fn track_containing(&self, block_offset: LayoutUnit) -> usize {
        let boundary_count = self.block_offsets.len();
        let mut index = 0;
        for candidate in 1..boundary_count {
            if self.block_offsets[candidate] <= block_offset {
                index = candidate;
            } else {
                break;
            }
        }
        index.min(self.track_count() - 1)
    }

    /// `getTrackRange(blockOffset, blockSize)`: `[start, end)`.
    pub fn get_track_range(&self, block_offset: LayoutUnit, block_size: LayoutUnit) -> (usize, usize) {
        let start = self.track_containing(block_offset);
        let target = block_offset + block_size;
        let mut end = start;
        while end < self.track_count() && self.block_offsets[end] < target {
            end += 1;
        }
        (start, end.max(start))
    }

    fn get_end_track(&self, start: usize, block_offset: LayoutUnit, block_size: LayoutUnit) -> usize {
        let target = block_offset + block_size;
        let mut end = start;
        while end < self.track_count() && self.block_offsets[end] < target {
            end += 1;
        }
        end
    }

    /// `getSizeOfTracks(start, end, inlineOffset)`.
    pub fn get_size_of_tracks(&self, start: usize, end: usize, inline_offset: LayoutUnit) -> LayoutUnit {
        let mut best = LayoutUnit::zero();
        for index in start..end.min(self.track_count()) {
            if self.float_counts[index] > 0 {
                let value = inline_offset + self.inline_sizes[index] - self.inline_offsets[index];
                best = best.max(value);
            }
        }
        best
    }

    /// `splitTrack(i, at)`: `at` must lie strictly inside track `i`.
    pub fn split_track(&mut self, index: usize, at: LayoutUnit) {
        debug_assert!(self.block_offsets[index] < at && at < self.block_offsets[index + 1]);
        self.block_offsets.insert(index + 1, at);
        self.inline_sizes.insert(index + 1, self.inline_sizes[index]);
        self.inline_offsets.insert(index + 1, self.inline_offsets[index]);
        self.float_counts.insert(index + 1, self.float_counts[index]);
    }

    /// `boxStart(blockOffset)`: unconditionally resets the shelf, which can
    /// move it backward. Documented design quirk (`spec.md` §9): matches
    /// observed browser behavior and is kept deliberately, not "fixed".
    pub fn box_start(&mut self, block_offset: LayoutUnit) {
        self.shelf_block_offset = block_offset;
        self.shelf_track_index = self.track_containing(block_offset);
    }

    /// `dropShelf(blockOffset)`: moves the shelf downward only.
    pub fn drop_shelf(&mut self, block_offset: LayoutUnit) {
        self.shelf_block_offset = self.shelf_block_offset.max(block_offset);
        self.shelf_track_index = self.track_containing(self.shelf_block_offset);
    }

    /// Drop the shelf to the next track boundary strictly after its current
    /// position, on this side. Used when a float is wider than the whole
    /// vacancy or when this side is empty but the opposite side is occupied.
    pub fn drop_to_next_boundary(&mut self) {
        let next_index = (self.shelf_track_index + 1).min(self.block_offsets.len() - 1);
        let next_boundary = self.block_offsets[next_index];
        if next_boundary == LayoutUnit::max_value() {
            return;
        }
        self.drop_shelf(next_boundary);
    }

    /// `splitIfShelfDropped()`: called immediately before placing a float.
    pub fn split_if_shelf_dropped(&mut self) {
        let index = self.shelf_track_index;
        if self.block_offsets[index] < self.shelf_block_offset
            && self.shelf_block_offset < self.block_offsets[index + 1]
        {
            self.split_track(index, self.shelf_block_offset);
            self.shelf_track_index += 1;
        }
    }

    /// The bottom edge of the deepest float placed on this side so far.
    pub fn bottom(&self) -> LayoutUnit {
        self.items
            .iter()
            .map(|item| item.block_end)
            .max()
            .unwrap_or_else(LayoutUnit::zero)
    }

    pub fn has_floats_after(&self, block_offset: LayoutUnit) -> bool {
        self.items.iter().any(|item| item.block_end > block_offset)
    }

    /// `placeFloat(box, vacancy, cbLineLeft, cbLineRight)`.
    ///
    /// `near_edge_inset` is `cbLineLeft` for a left float, `cbLineRight` for
    /// a right float — the containing block's own inset on this side.
    pub fn place_float(
        &mut self,
        input: &FloatPlacementInput,
        vacancy_block_offset: LayoutUnit,
        near_edge_inset: LayoutUnit,
        bfc_inline_size: LayoutUnit,
    ) -> anyhow::Result<PlacedFloat> {
        if vacancy_block_offset != self.shelf_block_offset {
            return Err(crate::error::contract_violation(
                "float placement vacancy block offset disagrees with the shelf",
            ));
        }

        self.split_if_shelf_dropped();

        let block_size = input.border_block_size + input.margin_block_start + input.margin_block_end;
        let start_track = self.shelf_track_index;
        let end_track = if block_size > LayoutUnit::zero() {
            let candidate = self.get_end_track(start_track, self.shelf_block_offset, block_size);
            let target = self.shelf_block_offset + block_size;
            if self.block_offsets[candidate] != target {
                self.split_track(candidate.saturating_sub(1).max(start_track), target);
            }
            candidate
        } else {
            start_track
        };

        let previously_empty = (start_track..end_track).all(|index| self.float_counts[index] == 0);
        let start_edge = if previously_empty {
            near_edge_inset
        } else {
            (start_track..end_track)
                .map(|index| self.inline_sizes[index])
                .max()
                .unwrap_or(near_edge_inset)
        };

        let far_edge = start_edge + input.margin_near + input.border_inline_size + input.margin_far;
        let inline_position = match self.kind {
            FloatSideKind::Left => start_edge + input.margin_near,
            FloatSideKind::Right => {
                bfc_inline_size - start_edge - input.margin_near - input.border_inline_size
            }
        };

        for index in start_track..end_track {
            self.inline_sizes[index] = far_edge;
            self.inline_offsets[index] = near_edge_inset;
            self.float_counts[index] += 1;
        }

        self.items.push(PlacedFloatRecord {
            node_key: input.node_key,
            block_start: self.shelf_block_offset,
            block_end: self.shelf_block_offset + block_size,
        });

        Ok(PlacedFloat {
            inline_position,
            block_start: self.shelf_block_offset,
            block_size,
        })
    }
}

struct MisfitEntry {
    side: FloatSideKind,
    input: FloatPlacementInput,
    near_edge_inset: LayoutUnit,
}

/// Owns both `FloatSide`s for one block formatting context and answers the
/// vacancy/placement queries the line-breaker and the BFC driver issue.
pub struct FloatContext {
    left: FloatSide,
    right: FloatSide,
    misfits: VecDeque<MisfitEntry>,
    resolved: HashMap<NodeKey, PlacedFloat>,
    bfc_inline_size: LayoutUnit,
}

/// The outcome of attempting to place a float immediately.
#[derive(Debug, Clone, Copy)]
pub enum PlaceFloatOutcome {
    Placed(PlacedFloat),
    Queued,
}

impl FloatContext {
    pub fn new(bfc_inline_size: LayoutUnit) -> Self {
        Self {
            left: FloatSide::new(FloatSideKind::Left),
            right: FloatSide::new(FloatSideKind::Right),
            misfits: VecDeque::new(),
            resolved: HashMap::new(),
            bfc_inline_size,
        }
    }

    fn side(&self, kind: FloatSideKind) -> &FloatSide {
        match kind {
            FloatSideKind::Left => &self.left,
            FloatSideKind::Right => &self.right,
        }
    }

    fn side_mut(&mut self, kind: FloatSideKind) -> &mut FloatSide {
        match kind {
            FloatSideKind::Left => &mut self.left,
            FloatSideKind::Right => &mut self.right,
        }
    }

    pub fn left_bottom(&self) -> LayoutUnit {
        self.left.bottom()
    }

    pub fn right_bottom(&self) -> LayoutUnit {
        self.right.bottom()
    }

    pub fn both_bottom(&self) -> LayoutUnit {
        self.left.bottom().max(self.right.bottom())
    }

    /// `getVacancyForLine(blockOffset, blockSize)`.
    pub fn get_vacancy_for_line(&self, block_offset: LayoutUnit, block_size: LayoutUnit) -> Vacancy {
        let (left_start, left_end) = self.left.get_track_range(block_offset, block_size);
        let (right_start, right_end) = self.right.get_track_range(block_offset, block_size);
        let left_offset = self.left.get_size_of_tracks(left_start, left_end, LayoutUnit::zero());
        let right_offset = self.right.get_size_of_tracks(right_start, right_end, LayoutUnit::zero());
        Vacancy {
            left_offset,
            right_offset,
            block_offset,
            inline_size: (self.bfc_inline_size - left_offset - right_offset).max(LayoutUnit::zero()),
            left_float_count: 0,
            right_float_count: 0,
        }
    }

    /// `getVacancyForBox(box)`: like `getVacancyForLine` but anchored at the
    /// placing side's own shelf and reporting float counts on both sides.
    fn get_vacancy_for_box(&self, placing_side: FloatSideKind, block_size: LayoutUnit) -> Vacancy {
        let block_offset = self.side(placing_side).shelf_block_offset();
        let (left_start, left_end) = self.left.get_track_range(block_offset, block_size);
        let (right_start, right_end) = self.right.get_track_range(block_offset, block_size);
        let left_offset = self.left.get_size_of_tracks(left_start, left_end, LayoutUnit::zero());
        let right_offset = self.right.get_size_of_tracks(right_start, right_end, LayoutUnit::zero());
        let left_float_count = self.left.float_counts[left_start..left_end.min(self.left.track_count())]
            .iter()
            .sum();
        let right_float_count = self.right.float_counts[right_start..right_end.min(self.right.track_count())]
            .iter()
            .sum();
        Vacancy {
            left_offset,
            right_offset,
            block_offset,
            inline_size: (self.bfc_inline_size - left_offset - right_offset).max(LayoutUnit::zero()),
            left_float_count,
            right_float_count,
        }
    }

    /// `findLinePosition(blockOffset, blockSize, inlineSize)`.
    pub fn find_line_position(
        &self,
        mut block_offset: LayoutUnit,
        block_size: LayoutUnit,
        inline_size: LayoutUnit,
    ) -> Vacancy {
        let mut vacancy = self.get_vacancy_for_line(block_offset, block_size);
        loop {
            if inline_size <= vacancy.inline_size {
                return vacancy;
            }

            let (_, left_end) = self.left.get_track_range(block_offset, block_size);
            let (_, right_end) = self.right.get_track_range(block_offset, block_size);
            let left_next = self.left.block_offsets.get(left_end).copied();
            let right_next = self.right.block_offsets.get(right_end).copied();

            let next = match (left_next, right_next) {
                (Some(left_candidate), Some(right_candidate)) => left_candidate.min(right_candidate),
                (Some(left_candidate), None) => left_candidate,
                (None, Some(right_candidate)) => right_candidate,
                (None, None) => return vacancy,
            };

            if next == LayoutUnit::max_value() || next <= block_offset {
                return vacancy;
            }
            block_offset = next;
            vacancy = self.get_vacancy_for_line(block_offset, block_size);
        }
    }

    /// Attempt to place one float, queueing it on `misfits` if it does not
    /// fit yet. `side` is the float's own `float` property value.
    pub fn place_float(
        &mut self,
        side: FloatSideKind,
        line_width: LayoutUnit,
        line_is_empty: bool,
        input: FloatPlacementInput,
        near_edge_inset: LayoutUnit,
    ) -> anyhow::Result<PlaceFloatOutcome> {
        if !self.misfits.is_empty() {
            self.misfits.push_back(MisfitEntry {
                side,
                input,
                near_edge_inset,
            });
            return Ok(PlaceFloatOutcome::Queued);
        }

        self.apply_clear(side, input.clear);

        let block_size = input.border_block_size + input.margin_block_start + input.margin_block_end;
        let vacancy = self.get_vacancy_for_box(side, block_size);
        let inline_margin = input.margin_near + input.margin_far;
        let fits = (input.border_inline_size + inline_margin) <= vacancy.inline_size - line_width
            || (line_is_empty && vacancy.left_float_count == 0 && vacancy.right_float_count == 0);

        if fits {
            let vacancy_block_offset = self.side(side).shelf_block_offset();
            let placed = self.side_mut(side).place_float(
                &input,
                vacancy_block_offset,
                near_edge_inset,
                self.bfc_inline_size,
            )?;
            self.resolved.insert(input.node_key, placed);
            return Ok(PlaceFloatOutcome::Placed(placed));
        }

        if input.border_inline_size + inline_margin > vacancy.inline_size {
            self.side_mut(side).drop_to_next_boundary();
        } else if vacancy.left_float_count == 0 && side == FloatSideKind::Right {
            self.left.drop_to_next_boundary();
        } else if vacancy.right_float_count == 0 && side == FloatSideKind::Left {
            self.right.drop_to_next_boundary();
        } else {
            self.side_mut(side).drop_to_next_boundary();
        }

        self.misfits.push_back(MisfitEntry {
            side,
            input,
            near_edge_inset,
        });
        Ok(PlaceFloatOutcome::Queued)
    }

    fn apply_clear(&mut self, placing_side: FloatSideKind, clear: Clear) {
        match clear {
            Clear::None => {}
            Clear::Left => {
                let target = self.left.bottom();
                self.side_mut(placing_side).drop_shelf(target);
            }
            Clear::Right => {
                let target = self.right.bottom();
                self.side_mut(placing_side).drop_shelf(target);
            }
            Clear::Both => {
                let target = self.both_bottom();
                self.side_mut(placing_side).drop_shelf(target);
            }
        }
    }

    /// `consumeMisfits()`: repeatedly drain the queue, re-trying each float
    /// against an empty line. Termination is guaranteed because every
    /// failed placement strictly advances a shelf past a boundary.
    pub fn consume_misfits(&mut self) -> anyhow::Result<()> {
        while let Some(entry) = self.misfits.pop_front() {
            self.apply_clear(entry.side, entry.input.clear);
            let block_size = entry.input.border_block_size
                + entry.input.margin_block_start
                + entry.input.margin_block_end;
            let vacancy = self.get_vacancy_for_box(entry.side, block_size);
            let fits = vacancy.left_float_count == 0 && vacancy.right_float_count == 0;

            if fits {
                let vacancy_block_offset = self.side(entry.side).shelf_block_offset();
                let placed = self.side_mut(entry.side).place_float(
                    &entry.input,
                    vacancy_block_offset,
                    entry.near_edge_inset,
                    self.bfc_inline_size,
                )?;
                self.resolved.insert(entry.input.node_key, placed);
            } else {
                self.side_mut(entry.side).drop_to_next_boundary();
                self.misfits.push_back(entry);
            }
        }
        Ok(())
    }

    /// `postLine(line, didBreak)`.
    pub fn post_line(
        &mut self,
        cb_block_start: LayoutUnit,
        line_block_offset: LayoutUnit,
        line_height: LayoutUnit,
        did_break: bool,
    ) -> anyhow::Result<()> {
        if did_break || !self.misfits.is_empty() {
            let target = cb_block_start + line_block_offset + line_height;
            self.left.drop_shelf(target);
            self.right.drop_shelf(target);
        }
        self.consume_misfits()
    }

    /// `preTextContent()`.
    pub fn pre_text_content(&mut self) -> anyhow::Result<()> {
        self.consume_misfits()
    }

    /// Retrieve and remove a float's resolved placement, once
    /// `consumeMisfits`/`postLine` has settled it.
    pub fn take_resolved(&mut self, node_key: NodeKey) -> Option<PlacedFloat> {
        self.resolved.remove(&node_key)
    }

    pub const fn bfc_inline_size(&self) -> LayoutUnit {
        self.bfc_inline_size
    }

    pub fn clearance_offset(&self, clear: Clear) -> LayoutUnit {
        match clear {
            Clear::None => LayoutUnit::zero(),
            Clear::Left => self.left.bottom(),
            Clear::Right => self.right.bottom(),
            Clear::Both => self.both_bottom(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(value: f32) -> LayoutUnit {
        LayoutUnit::from_px(value)
    }

    fn input(node_key: u64, inline_size: f32, block_size: f32, clear: Clear) -> FloatPlacementInput {
        FloatPlacementInput {
            node_key: NodeKey(node_key),
            border_inline_size: px(inline_size),
            border_block_size: px(block_size),
            margin_block_start: LayoutUnit::zero(),
            margin_block_end: LayoutUnit::zero(),
            margin_near: LayoutUnit::zero(),
            margin_far: LayoutUnit::zero(),
            clear,
        }
    }

    /// Scenario 5 from `spec.md` §8: two 60×50 left floats in a 100-wide
    /// container. The second does not fit beside the first and lands at
    /// `(0, 50)`; the shelf advances to `50`.
    ///
    /// # Panics
    /// Panics if the second float does not land below the first.
    #[test]
    fn two_left_floats_narrow_container_stack_vertically() {
        let mut fctx = FloatContext::new(px(100.0));

        let first = fctx
            .place_float(
                FloatSideKind::Left,
                LayoutUnit::zero(),
                true,
                input(1, 60.0, 50.0, Clear::None),
                LayoutUnit::zero(),
            )
            .expect("first float placement must not error");
        let PlaceFloatOutcome::Placed(first_placed) = first else {
            panic!("first float should fit immediately");
        };
        assert_eq!(first_placed.inline_position, LayoutUnit::zero());
        assert_eq!(first_placed.block_start, LayoutUnit::zero());

        let second = fctx
            .place_float(
                FloatSideKind::Left,
                LayoutUnit::zero(),
                true,
                input(2, 60.0, 50.0, Clear::None),
                LayoutUnit::zero(),
            )
            .expect("second float placement must not error");

        let second_placed = match second {
            PlaceFloatOutcome::Placed(placed) => placed,
            PlaceFloatOutcome::Queued => {
                fctx.consume_misfits().expect("misfit queue must drain");
                fctx.take_resolved(NodeKey(2))
                    .expect("second float must resolve after draining misfits")
            }
        };

        assert_eq!(second_placed.inline_position, LayoutUnit::zero());
        assert_eq!(second_placed.block_start, px(50.0));
    }

    /// Scenario 6 from `spec.md` §8: container width 200, left float
    /// `80×40`. At `y=0` vacancy width is `120`; at `y=40` it is `200`.
    /// `findLinePosition(0, lineHeight, 180)` returns the vacancy at
    /// `y=40`.
    ///
    /// # Panics
    /// Panics if `find_line_position` does not advance past the float.
    #[test]
    fn find_line_position_advances_past_a_float() {
        let mut fctx = FloatContext::new(px(200.0));
        fctx.place_float(
            FloatSideKind::Left,
            LayoutUnit::zero(),
            true,
            input(1, 80.0, 40.0, Clear::None),
            LayoutUnit::zero(),
        )
        .expect("float placement must not error");

        let at_zero = fctx.get_vacancy_for_line(LayoutUnit::zero(), px(10.0));
        assert_eq!(at_zero.inline_size, px(120.0));

        let at_forty = fctx.get_vacancy_for_line(px(40.0), px(10.0));
        assert_eq!(at_forty.inline_size, px(200.0));

        let found = fctx.find_line_position(LayoutUnit::zero(), px(10.0), px(180.0));
        assert_eq!(found.block_offset, px(40.0));
        assert_eq!(found.inline_size, px(200.0));
    }

    /// # Panics
    /// Panics if the monotonic-shelf invariant is violated after several
    /// placements and drops.
    #[test]
    fn shelf_is_monotonically_non_decreasing() {
        let mut side = FloatSide::new(FloatSideKind::Left);
        let mut last = side.shelf_block_offset();
        side.drop_shelf(px(10.0));
        assert!(side.shelf_block_offset() >= last);
        last = side.shelf_block_offset();
        side.box_start(px(5.0));
        // box_start can move the shelf backward by design; re-apply a
        // drop to confirm it only ever increases afterward.
        side.drop_shelf(px(20.0));
        assert!(side.shelf_block_offset() >= last.min(px(5.0)));
    }

    /// # Panics
    /// Panics if `floatCounts[i] > 0` without `inlineSizes[i] > 0`.
    #[test]
    fn float_count_implies_width() {
        let mut fctx = FloatContext::new(px(100.0));
        fctx.place_float(
            FloatSideKind::Left,
            LayoutUnit::zero(),
            true,
            input(1, 30.0, 20.0, Clear::None),
            LayoutUnit::zero(),
        )
        .expect("placement must not error");

        for (count, size) in fctx.left.float_counts.iter().zip(fctx.left.inline_sizes.iter()) {
            if *count > 0 {
                assert!(*size > LayoutUnit::zero());
            }
        }
    }

    /// Scenario 4 from `spec.md` §8: a left float of height 100, followed
    /// by a block with `clear: left`, must clear to at least `100`.
    ///
    /// # Panics
    /// Panics if `clearance_offset` does not report the float's bottom.
    #[test]
    fn clearance_offset_matches_float_bottom() {
        let mut fctx = FloatContext::new(px(200.0));
        fctx.place_float(
            FloatSideKind::Left,
            LayoutUnit::zero(),
            true,
            input(1, 50.0, 100.0, Clear::None),
            LayoutUnit::zero(),
        )
        .expect("placement must not error");

        assert_eq!(fctx.clearance_offset(Clear::Left), px(100.0));
    }
}
