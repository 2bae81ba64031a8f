//! CSS Box Model Module Level 3 — box dimensions, margins, borders, padding,
//! and the nested-area geometry the block layout core positions.
//! Spec: <https://www.w3.org/TR/css-box-3/>

pub mod layout_unit;
pub use layout_unit::LayoutUnit;

use css_style::{BoxSizing, ComputedStyle, WritingMode};

/// Box edges used by layout in sub-pixel precision, on the logical axes
/// (`block_start`/`block_end` down the block axis, `line_left`/`line_right`
/// across the inline axis).
///
/// Chromium and other browsers use sub-pixel layout coordinates to avoid
/// cumulative rounding errors. We use `LayoutUnit` (1/64px precision) to
/// match this behavior while using integer arithmetic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoxSides {
    pub margin_block_start: LayoutUnit,
    pub margin_block_end: LayoutUnit,
    pub margin_line_left: LayoutUnit,
    pub margin_line_right: LayoutUnit,

    pub padding_block_start: LayoutUnit,
    pub padding_block_end: LayoutUnit,
    pub padding_line_left: LayoutUnit,
    pub padding_line_right: LayoutUnit,

    pub border_block_start: LayoutUnit,
    pub border_block_end: LayoutUnit,
    pub border_line_left: LayoutUnit,
    pub border_line_right: LayoutUnit,
}

impl BoxSides {
    pub const fn block_start_insets(&self) -> LayoutUnit {
        LayoutUnit::from_raw(self.padding_block_start.raw() + self.border_block_start.raw())
    }

    pub const fn block_end_insets(&self) -> LayoutUnit {
        LayoutUnit::from_raw(self.padding_block_end.raw() + self.border_block_end.raw())
    }

    pub const fn line_left_insets(&self) -> LayoutUnit {
        LayoutUnit::from_raw(self.padding_line_left.raw() + self.border_line_left.raw())
    }

    pub const fn line_right_insets(&self) -> LayoutUnit {
        LayoutUnit::from_raw(self.padding_line_right.raw() + self.border_line_right.raw())
    }
}

/// Resolve margin/padding/border widths from `ComputedStyle` into `LayoutUnit`.
///
/// Padding and border widths are clamped to be non-negative. Margins may
/// still be `auto` at this point per CSS 2.2 §10.3.3 / §10.6.3 — the box
/// model resolution step (`resolve_box_sizing` plus the over-constraint
/// redistribution rule in the core crate) must run first and replace any
/// `auto` margin with a used pixel value before this is called. Accessing
/// an unresolved `auto` margin here is a contract violation, surfaced as an
/// error rather than silently substituted with zero.
///
/// Spec: CSS 2.2 §8.1 (box model) and CSS Box Sizing L3.
pub fn compute_box_sides(style: &ComputedStyle) -> anyhow::Result<BoxSides> {
    Ok(BoxSides {
        margin_block_start: LayoutUnit::from_px(style.margin.block_start.px()?),
        margin_block_end: LayoutUnit::from_px(style.margin.block_end.px()?),
        margin_line_left: LayoutUnit::from_px(style.margin.line_left.px()?),
        margin_line_right: LayoutUnit::from_px(style.margin.line_right.px()?),

        padding_block_start: LayoutUnit::from_px(style.padding.block_start.max(0.0)),
        padding_block_end: LayoutUnit::from_px(style.padding.block_end.max(0.0)),
        padding_line_left: LayoutUnit::from_px(style.padding.line_left.max(0.0)),
        padding_line_right: LayoutUnit::from_px(style.padding.line_right.max(0.0)),

        border_block_start: LayoutUnit::from_px(style.border_width.block_start.max(0.0)),
        border_block_end: LayoutUnit::from_px(style.border_width.block_end.max(0.0)),
        border_line_left: LayoutUnit::from_px(style.border_width.line_left.max(0.0)),
        border_line_right: LayoutUnit::from_px(style.border_width.line_right.max(0.0)),
    })
}

/// Apply the `box-sizing` transform to a definite size, producing a
/// border-box dimension. `content` is the content-box extent along one
/// axis; `padding_border` is the sum of padding and border on that axis.
pub const fn resolve_box_sizing(
    box_sizing: BoxSizing,
    specified: LayoutUnit,
    padding_border: LayoutUnit,
) -> LayoutUnit {
    match box_sizing {
        BoxSizing::ContentBox => {
            LayoutUnit::from_raw(specified.raw() + padding_border.raw())
        }
        BoxSizing::BorderBox => specified,
    }
}

/// Clamp a border-box dimension between `min`/`max`, both already expressed
/// as border-box extents. `max` of `None` means `max-*: none`.
pub fn clamp_border_box(value: LayoutUnit, min: LayoutUnit, max: Option<LayoutUnit>) -> LayoutUnit {
    let clamped_to_max = max.map_or(value, |max_value| value.min(max_value));
    clamped_to_max.max(min)
}

/// A logical `(lineLeft, blockStart, inlineSize, blockSize)` quadruple,
/// expressed relative to the writing mode recorded on the owning `Area`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub line_left: LayoutUnit,
    pub block_start: LayoutUnit,
    pub inline_size: LayoutUnit,
    pub block_size: LayoutUnit,
}

/// A physical (post-`absolutify`) rectangle: `x` grows rightward, `y` grows
/// downward, both relative to the BFC root's own physical origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhysicalRect {
    pub x: LayoutUnit,
    pub y: LayoutUnit,
    pub width: LayoutUnit,
    pub height: LayoutUnit,
}

/// Opaque index into an `AreaArena`. Areas never own each other — the
/// `parent` back-reference is the only link, and it always points upward
/// toward the BFC root, so no cycle can arise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AreaId(u32);

/// One of a block container's three nested rectangular areas.
///
/// `rect` is relative to `parent`'s content area and expressed in
/// `writing_mode`'s axes. `container_physical_width` is the already-known
/// physical width of that containing block, needed only to mirror
/// `vertical-rl` boxes during `absolutify`.
#[derive(Clone, Copy, Debug)]
pub struct Area {
    pub rect: Rect,
    pub writing_mode: WritingMode,
    pub container_physical_width: LayoutUnit,
    pub parent: Option<AreaId>,
}

/// Arena owning every `Area` created during a layout pass.
///
/// Mirrors the workspace's general preference for arena-indexed trees over
/// `Rc`/`RefCell` back-pointers: `AreaId` plays the same role a node key
/// plays for a DOM tree, scoped to one layout's areas.
#[derive(Clone, Debug, Default)]
pub struct AreaArena {
    areas: Vec<Area>,
}

impl AreaArena {
    pub fn new() -> Self {
        Self { areas: Vec::new() }
    }

    pub fn insert(&mut self, area: Area) -> AreaId {
        let index = self.areas.len();
        self.areas.push(area);
        AreaId(u32::try_from(index).unwrap_or(u32::MAX))
    }

    pub fn get(&self, id: AreaId) -> &Area {
        &self.areas[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: AreaId) -> &mut Area {
        &mut self.areas[id.0 as usize]
    }

    /// Convert `id`'s logical rect to physical coordinates, recursing
    /// through `parent` back-references.
    ///
    /// Four cases:
    /// - `horizontal-tb`: identity.
    /// - `vertical-lr`: the inline and block axes swap (rotate).
    /// - `vertical-rl`: swap and mirror across the containing block's
    ///   physical width.
    /// - no parent (the BFC root): the local physical rect *is* the result,
    ///   already relative to the root's own origin.
    pub fn absolutify(&self, id: AreaId) -> PhysicalRect {
        let area = self.get(id);
        let (x, y, width, height) = match area.writing_mode {
            WritingMode::HorizontalTb => (
                area.rect.line_left,
                area.rect.block_start,
                area.rect.inline_size,
                area.rect.block_size,
            ),
            WritingMode::VerticalLr => (
                area.rect.block_start,
                area.rect.line_left,
                area.rect.block_size,
                area.rect.inline_size,
            ),
            WritingMode::VerticalRl => (
                area.container_physical_width - area.rect.block_start - area.rect.block_size,
                area.rect.line_left,
                area.rect.block_size,
                area.rect.inline_size,
            ),
        };

        area.parent.map_or(
            PhysicalRect {
                x,
                y,
                width,
                height,
            },
            |parent_id| {
                let parent_physical = self.absolutify(parent_id);
                PhysicalRect {
                    x: parent_physical.x + x,
                    y: parent_physical.y + y,
                    width,
                    height,
                }
            },
        )
    }
}

/// A block container's three nested areas: `content ⊆ padding ⊆ border`.
///
/// When an edge has zero width, the inner area and the outer area it sits
/// inside share the *same* `AreaId` — mutating one rect mutates both, which
/// satisfies the "areas are identical by reference when an edge is absent"
/// invariant without a separate equality check at every call site.
#[derive(Clone, Copy, Debug)]
pub struct BlockContainerAreas {
    pub border: AreaId,
    pub padding: AreaId,
    pub content: AreaId,
}

/// Everything needed to place a new block container's three areas inside
/// an already-placed containing block.
pub struct AreaPlacement {
    pub border_rect: Rect,
    pub sides: BoxSides,
    pub writing_mode: WritingMode,
    pub container_physical_width: LayoutUnit,
    pub parent_content_area: AreaId,
}

impl BlockContainerAreas {
    /// Insert the border/padding/content areas for one box into `arena`,
    /// given its border-box rect (already positioned relative to its
    /// containing block's content area) and resolved box sides.
    pub fn insert(arena: &mut AreaArena, placement: &AreaPlacement) -> Self {
        let border_rect = placement.border_rect;
        let sides = &placement.sides;

        let border = arena.insert(Area {
            rect: border_rect,
            writing_mode: placement.writing_mode,
            container_physical_width: placement.container_physical_width,
            parent: Some(placement.parent_content_area),
        });

        let has_border_edge = sides.border_block_start != LayoutUnit::zero()
            || sides.border_block_end != LayoutUnit::zero()
            || sides.border_line_left != LayoutUnit::zero()
            || sides.border_line_right != LayoutUnit::zero();

        let padding = if has_border_edge {
            let padding_rect = Rect {
                line_left: border_rect.line_left + sides.border_line_left,
                block_start: border_rect.block_start + sides.border_block_start,
                inline_size: border_rect.inline_size
                    - sides.border_line_left
                    - sides.border_line_right,
                block_size: border_rect.block_size
                    - sides.border_block_start
                    - sides.border_block_end,
            };
            arena.insert(Area {
                rect: padding_rect,
                writing_mode: placement.writing_mode,
                container_physical_width: placement.container_physical_width,
                parent: Some(placement.parent_content_area),
            })
        } else {
            border
        };

        let has_padding_edge = sides.padding_block_start != LayoutUnit::zero()
            || sides.padding_block_end != LayoutUnit::zero()
            || sides.padding_line_left != LayoutUnit::zero()
            || sides.padding_line_right != LayoutUnit::zero();

        let content = if has_padding_edge {
            let padding_area_rect = arena.get(padding).rect;
            let content_rect = Rect {
                line_left: padding_area_rect.line_left + sides.padding_line_left,
                block_start: padding_area_rect.block_start + sides.padding_block_start,
                inline_size: padding_area_rect.inline_size
                    - sides.padding_line_left
                    - sides.padding_line_right,
                block_size: padding_area_rect.block_size
                    - sides.padding_block_start
                    - sides.padding_block_end,
            };
            arena.insert(Area {
                rect: content_rect,
                writing_mode: placement.writing_mode,
                container_physical_width: placement.container_physical_width,
                parent: Some(placement.parent_content_area),
            })
        } else {
            padding
        };

        Self {
            border,
            padding,
            content,
        }
    }

    /// `absolutify` for all three of this box's areas at once.
    pub fn absolutify(&self, arena: &AreaArena) -> AbsolutifiedBox {
        AbsolutifiedBox {
            border: arena.absolutify(self.border),
            padding: arena.absolutify(self.padding),
            content: arena.absolutify(self.content),
        }
    }
}

/// The physical result of `BlockContainerAreas::absolutify`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AbsolutifiedBox {
    pub border: PhysicalRect,
    pub padding: PhysicalRect,
    pub content: PhysicalRect,
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_style::LogicalEdges;

    fn style_with_margins(
        block_start: f32,
        block_end: f32,
        line_left: f32,
        line_right: f32,
    ) -> ComputedStyle {
        ComputedStyle {
            margin: LogicalEdges {
                block_start: css_style::Used::Px(block_start),
                block_end: css_style::Used::Px(block_end),
                line_left: css_style::Used::Px(line_left),
                line_right: css_style::Used::Px(line_right),
            },
            ..ComputedStyle::default()
        }
    }

    /// # Panics
    /// Panics if an auto margin is unexpectedly resolved to a concrete value.
    #[test]
    fn auto_margin_is_a_contract_violation() {
        let style = ComputedStyle::default();
        assert!(matches!(compute_box_sides(&style), Err(_)));
    }

    /// # Panics
    /// Panics if padding/border clamping or margin conversion misbehaves.
    #[test]
    fn negative_padding_and_border_clamp_to_zero() {
        let mut style = style_with_margins(0.0, 0.0, 0.0, 0.0);
        style.padding.block_start = -5.0;
        style.border_width.line_left = -3.0;
        let sides = compute_box_sides(&style).expect("resolved margins must not error");
        assert_eq!(sides.padding_block_start, LayoutUnit::zero());
        assert_eq!(sides.border_line_left, LayoutUnit::zero());
    }

    /// # Panics
    /// Panics if `absolutify` does not behave as the identity transform for
    /// `horizontal-tb` at the BFC root.
    #[test]
    fn absolutify_horizontal_tb_root_is_identity() {
        let mut arena = AreaArena::new();
        let root = arena.insert(Area {
            rect: Rect {
                line_left: LayoutUnit::from_px(10.0),
                block_start: LayoutUnit::from_px(20.0),
                inline_size: LayoutUnit::from_px(100.0),
                block_size: LayoutUnit::from_px(50.0),
            },
            writing_mode: WritingMode::HorizontalTb,
            container_physical_width: LayoutUnit::from_px(100.0),
            parent: None,
        });

        let physical = arena.absolutify(root);
        assert_eq!(physical.x, LayoutUnit::from_px(10.0));
        assert_eq!(physical.y, LayoutUnit::from_px(20.0));
        assert_eq!(physical.width, LayoutUnit::from_px(100.0));
        assert_eq!(physical.height, LayoutUnit::from_px(50.0));
    }

    /// # Panics
    /// Panics if a nested `vertical-rl` area does not mirror across the
    /// containing block's physical width.
    #[test]
    fn absolutify_vertical_rl_mirrors_and_offsets_from_parent() {
        let mut arena = AreaArena::new();
        let root = arena.insert(Area {
            rect: Rect {
                line_left: LayoutUnit::zero(),
                block_start: LayoutUnit::zero(),
                inline_size: LayoutUnit::from_px(200.0),
                block_size: LayoutUnit::from_px(300.0),
            },
            writing_mode: WritingMode::HorizontalTb,
            container_physical_width: LayoutUnit::from_px(200.0),
            parent: None,
        });
        let child = arena.insert(Area {
            rect: Rect {
                line_left: LayoutUnit::from_px(5.0),
                block_start: LayoutUnit::from_px(10.0),
                inline_size: LayoutUnit::from_px(40.0),
                block_size: LayoutUnit::from_px(30.0),
            },
            writing_mode: WritingMode::VerticalRl,
            container_physical_width: LayoutUnit::from_px(200.0),
            parent: Some(root),
        });

        let physical = arena.absolutify(child);
        // vertical-rl: physical x = container_width - block_start - block_size
        assert_eq!(physical.x, LayoutUnit::from_px(200.0 - 10.0 - 30.0));
        assert_eq!(physical.y, LayoutUnit::from_px(5.0));
        assert_eq!(physical.width, LayoutUnit::from_px(30.0));
        assert_eq!(physical.height, LayoutUnit::from_px(40.0));
    }

    /// # Panics
    /// Panics if running `absolutify` twice on the same area produces
    /// different results (it must be a pure read of stored state).
    #[test]
    fn absolutify_is_idempotent() {
        let mut arena = AreaArena::new();
        let root = arena.insert(Area {
            rect: Rect {
                line_left: LayoutUnit::from_px(3.0),
                block_start: LayoutUnit::from_px(4.0),
                inline_size: LayoutUnit::from_px(10.0),
                block_size: LayoutUnit::from_px(10.0),
            },
            writing_mode: WritingMode::VerticalLr,
            container_physical_width: LayoutUnit::from_px(10.0),
            parent: None,
        });

        assert_eq!(arena.absolutify(root), arena.absolutify(root));
    }

    /// # Panics
    /// Panics if areas sharing an `AreaId` (zero-width edges) do not read
    /// back the same rect.
    #[test]
    fn zero_width_edges_share_area_id() {
        let mut arena = AreaArena::new();
        let parent_content = arena.insert(Area {
            rect: Rect {
                line_left: LayoutUnit::zero(),
                block_start: LayoutUnit::zero(),
                inline_size: LayoutUnit::from_px(100.0),
                block_size: LayoutUnit::from_px(100.0),
            },
            writing_mode: WritingMode::HorizontalTb,
            container_physical_width: LayoutUnit::from_px(100.0),
            parent: None,
        });

        let sides = BoxSides::default();
        let areas = BlockContainerAreas::insert(
            &mut arena,
            &AreaPlacement {
                border_rect: Rect {
                    line_left: LayoutUnit::zero(),
                    block_start: LayoutUnit::zero(),
                    inline_size: LayoutUnit::from_px(50.0),
                    block_size: LayoutUnit::from_px(50.0),
                },
                sides,
                writing_mode: WritingMode::HorizontalTb,
                container_physical_width: LayoutUnit::from_px(100.0),
                parent_content_area: parent_content,
            },
        );

        assert_eq!(areas.border, areas.padding);
        assert_eq!(areas.padding, areas.content);
    }
}
