//! Public entry points: `layout_block_box` / `layout_float_box`
//! (`spec.md` §4.5), plus the box-model resolution steps that sit in front
//! of the BFC driver.
//!
//! Position resolution (this module, `box_tree::bfc`,
//! `box_tree::exclusion_space`) and `Area` materialization
//! ([`assign_areas`]) are two separate passes: a box's block-axis offset
//! cannot be known until its whole containing BFC has been walked (later
//! siblings can still collapse into an still-open margin chain), so no
//! `Area` is created until every position in a BFC root's subtree has
//! settled. Until then, a box's containing-block inline size is threaded
//! through as a plain `LayoutUnit`, not an `AreaId`.

use crate::box_tree::{
    BlockFormattingContext, BoxTree, FloatPlacementInput, FloatSideKind, NodeKey, PlaceFloatOutcome,
};
use crate::error::{contract_violation, require_used};
use crate::intrinsic::{IntrinsicMode, layout_contribution};
use crate::text::{InlineFormattingContext, TextLayoutContext};
use css_box::{
    AreaArena, AreaId, AreaPlacement, BlockContainerAreas, BoxSides, LayoutUnit, Rect, clamp_border_box,
    compute_box_sides, resolve_box_sizing,
};
use css_style::{Clear, ComputedStyle, Direction, Float};
use std::collections::HashMap;

/// The one caller-supplied knob this core takes (`spec.md` §6: "no
/// configuration"). Parameterizes the viewport and supplies the
/// inline-formatting-context callback `doTextLayout` is invoked through.
pub struct LayoutContext {
    pub viewport_inline_size: LayoutUnit,
    pub ifcs: HashMap<NodeKey, Box<dyn InlineFormattingContext>>,

    resolved_models: HashMap<NodeKey, ResolvedBoxModel>,
    block_starts: HashMap<NodeKey, LayoutUnit>,
    block_ends: HashMap<NodeKey, LayoutUnit>,
}

impl LayoutContext {
    pub fn new(viewport_inline_size: LayoutUnit) -> Self {
        Self {
            viewport_inline_size,
            ifcs: HashMap::new(),
            resolved_models: HashMap::new(),
            block_starts: HashMap::new(),
            block_ends: HashMap::new(),
        }
    }

    fn record_positions(&mut self, positions: &crate::box_tree::BfcPositions) {
        for (node_key, offset) in positions.block_starts() {
            self.block_starts.insert(*node_key, *offset);
        }
        for (node_key, offset) in positions.block_ends() {
            self.block_ends.insert(*node_key, *offset);
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ResolvedBoxModel {
    sides: BoxSides,
    margin_line_left: LayoutUnit,
    margin_line_right: LayoutUnit,
    margin_block_start: LayoutUnit,
    margin_block_end: LayoutUnit,
    border_inline_size: LayoutUnit,
    border_block_size: LayoutUnit,
}

/// CSS 2.2 §10.3.3: resolve `margin-left`/`width`/`margin-right` for a
/// normal-flow, non-replaced block-level box, including the over-constraint
/// redistribution rule.
fn resolve_inline_box_model(
    style: &ComputedStyle,
    sides: &BoxSides,
    containing_inline_size: LayoutUnit,
) -> anyhow::Result<(LayoutUnit, LayoutUnit, LayoutUnit)> {
    let border_padding_inline = sides.line_left_insets() + sides.line_right_insets();

    let specified_border_box_width = if style.inline_size.is_auto() {
        None
    } else {
        let content_width = require_used(style.inline_size, "inline-size")?;
        Some(resolve_box_sizing(
            style.box_sizing,
            LayoutUnit::from_px(content_width),
            border_padding_inline,
        ))
    };

    let margin_left_auto = style.margin.line_left.is_auto();
    let margin_right_auto = style.margin.line_right.is_auto();

    let (margin_line_left, margin_line_right, border_box_width) = if let Some(width) =
        specified_border_box_width
    {
        let remaining = containing_inline_size - width;
        match (margin_left_auto, margin_right_auto) {
            (false, false) => {
                let margin_left = LayoutUnit::from_px(require_used(style.margin.line_left, "margin-line-left")?);
                let margin_right =
                    LayoutUnit::from_px(require_used(style.margin.line_right, "margin-line-right")?);
                if margin_left + margin_right == remaining {
                    (margin_left, margin_right, width)
                } else {
                    // Over-constrained: CSS 2.2 §10.3.3 discards the specified
                    // trailing margin in the box's writing direction.
                    match style.direction {
                        Direction::Ltr => (margin_left, remaining - margin_left, width),
                        Direction::Rtl => (remaining - margin_right, margin_right, width),
                    }
                }
            }
            (true, false) => {
                let margin_right =
                    LayoutUnit::from_px(require_used(style.margin.line_right, "margin-line-right")?);
                (remaining - margin_right, margin_right, width)
            }
            (false, true) => {
                let margin_left = LayoutUnit::from_px(require_used(style.margin.line_left, "margin-line-left")?);
                (margin_left, remaining - margin_left, width)
            }
            (true, true) => {
                let half = remaining / 2;
                (half, remaining - half, width)
            }
        }
    } else {
        // `width: auto` — any auto margin resolves to zero, width fills the
        // remainder (CSS 2.2 §10.3.3 cases 2 and 7).
        let margin_left = if margin_left_auto {
            LayoutUnit::zero()
        } else {
            LayoutUnit::from_px(require_used(style.margin.line_left, "margin-line-left")?)
        };
        let margin_right = if margin_right_auto {
            LayoutUnit::zero()
        } else {
            LayoutUnit::from_px(require_used(style.margin.line_right, "margin-line-right")?)
        };
        let width = (containing_inline_size - margin_left - margin_right).max(LayoutUnit::zero());
        (margin_left, margin_right, width)
    };

    let min_border_box =
        resolve_box_sizing(style.box_sizing, LayoutUnit::from_px(style.min_inline_size), border_padding_inline);
    let max_border_box = if style.max_inline_size.is_auto() {
        None
    } else {
        let max_content = require_used(style.max_inline_size, "max-inline-size")?;
        Some(resolve_box_sizing(
            style.box_sizing,
            LayoutUnit::from_px(max_content),
            border_padding_inline,
        ))
    };
    let clamped_width = clamp_border_box(border_box_width, min_border_box, max_border_box);

    Ok((margin_line_left, margin_line_right, clamped_width))
}

/// The block-axis counterpart: `height` has no over-constraint rule, and
/// `auto` is deferred to the BFC flush rather than resolved here.
fn resolve_block_box_model(style: &ComputedStyle, sides: &BoxSides) -> anyhow::Result<Option<LayoutUnit>> {
    if style.block_size.is_auto() {
        return Ok(None);
    }
    let border_padding_block = sides.block_start_insets() + sides.block_end_insets();
    let content_height = require_used(style.block_size, "block-size")?;
    let border_box_height = resolve_box_sizing(style.box_sizing, LayoutUnit::from_px(content_height), border_padding_block);

    let min_border_box =
        resolve_box_sizing(style.box_sizing, LayoutUnit::from_px(style.min_block_size), border_padding_block);
    let max_border_box = if style.max_block_size.is_auto() {
        None
    } else {
        let max_content = require_used(style.max_block_size, "max-block-size")?;
        Some(resolve_box_sizing(
            style.box_sizing,
            LayoutUnit::from_px(max_content),
            border_padding_block,
        ))
    };
    Ok(Some(clamp_border_box(border_box_height, min_border_box, max_border_box)))
}

/// `layoutBlockBox(root, ctx)` — lay out a block formatting context root,
/// populating every descendant's area geometry.
pub fn layout_block_box(
    tree: &mut BoxTree,
    key: NodeKey,
    areas: &mut AreaArena,
    containing_block_content_area: AreaId,
    ctx: &mut LayoutContext,
) -> anyhow::Result<()> {
    if !tree.is_bfc_root(key) {
        return Err(contract_violation("layout_block_box called on a node that is not a BFC root"));
    }
    let containing_inline_size = areas.get(containing_block_content_area).rect.inline_size;
    layout_bfc_root(tree, key, containing_inline_size, ctx)?;
    assign_areas(tree, key, containing_block_content_area, areas, ctx)
}

/// `layoutFloatBox(float, ctx)` — identical, restricted to float roots.
pub fn layout_float_box(
    tree: &mut BoxTree,
    key: NodeKey,
    areas: &mut AreaArena,
    containing_block_content_area: AreaId,
    ctx: &mut LayoutContext,
) -> anyhow::Result<()> {
    if !tree.is_float(key) {
        return Err(contract_violation("layout_float_box called on a node that is not a float"));
    }
    let containing_inline_size = areas.get(containing_block_content_area).rect.inline_size;
    layout_bfc_root(tree, key, containing_inline_size, ctx)?;
    assign_areas(tree, key, containing_block_content_area, areas, ctx)
}

/// Resolve `key`'s own box model against its containing block's inline
/// size, then run a fresh `BlockFormattingContext` across its descendants.
/// Does not touch an `AreaArena` — that happens only in [`assign_areas`],
/// once every position in this subtree has been resolved.
fn layout_bfc_root(
    tree: &mut BoxTree,
    key: NodeKey,
    containing_inline_size: LayoutUnit,
    ctx: &mut LayoutContext,
) -> anyhow::Result<LayoutUnit> {
    let node = tree
        .get(key)
        .ok_or_else(|| contract_violation("node referenced by layout_bfc_root is missing from the tree"))?;
    let style = node.style.clone();

    let sides = compute_box_sides(&style)?;
    let (margin_line_left, margin_line_right, border_inline_size) =
        resolve_inline_box_model(&style, &sides, containing_inline_size)?;
    let resolved_block_size = resolve_block_box_model(&style, &sides)?;

    let content_inline_size = (border_inline_size - sides.line_left_insets() - sides.line_right_insets()).max(LayoutUnit::zero());

    let mut bfc = BlockFormattingContext::new(content_inline_size);
    let content_result = layout_box_content(tree, key, &mut bfc, ctx)?;
    let content_block_size = match content_result {
        Some(paragraph_height) => paragraph_height,
        None => finalize_children_bfc(bfc, ctx),
    };

    let border_block_size = resolved_block_size.unwrap_or_else(|| {
        content_block_size + sides.block_start_insets() + sides.block_end_insets()
    });

    ctx.resolved_models.insert(
        key,
        ResolvedBoxModel {
            sides,
            margin_line_left,
            margin_line_right,
            margin_block_start: LayoutUnit::from_px(require_used(style.margin.block_start, "margin-block-start")?),
            margin_block_end: LayoutUnit::from_px(require_used(style.margin.block_end, "margin-block-end")?),
            border_inline_size,
            border_block_size,
        },
    );

    Ok(border_block_size)
}

/// Flush whatever margin chain is still open in a BFC root's own
/// `BlockFormattingContext` and report its final content block size,
/// including any float overhang. Only valid for a `bfc` a caller just
/// created fresh (a true BFC root) — never for one still shared with an
/// ancestor's ongoing walk.
fn finalize_children_bfc(mut bfc: BlockFormattingContext, ctx: &mut LayoutContext) -> LayoutUnit {
    let float_bottom = bfc.float_context.both_bottom();
    // Force the last open margin chain to resolve before snapshotting:
    // whatever box started it has not necessarily seen a following sibling
    // to trigger a flush, so without this its position would never make it
    // into `ctx`.
    bfc.position_block_containers();
    ctx.record_positions(bfc.positions());
    bfc.finalize().max(float_bottom)
}

/// Drive one box's own content within `bfc` — the `BlockFormattingContext`
/// this box's children participate in. A true BFC root's caller passes a
/// `bfc` it just created; a nested, non-BFC-root container passes the
/// ambient one straight through, so its text runs and block children still
/// share its parent's margin-collapsing chain and float placements.
///
/// Returns `Some(paragraph height)` for a block-container-of-inlines (its
/// content size is exactly that, no further flush needed); `None` for a
/// block-container-of-block-containers, whose children have been walked
/// into `bfc` and whose content size the caller derives from `bfc` itself.
fn layout_box_content(
    tree: &mut BoxTree,
    key: NodeKey,
    bfc: &mut BlockFormattingContext,
    ctx: &mut LayoutContext,
) -> anyhow::Result<Option<LayoutUnit>> {
    let node = tree
        .get(key)
        .ok_or_else(|| contract_violation("node referenced by layout_box_content is missing from the tree"))?;
    let children = node.children.clone();
    let contains_inlines = node.attributes.contains_inlines;

    if contains_inlines {
        let content_inline_size = bfc.content_inline_size();
        let paragraph_height = if let Some(ifc) = ctx.ifcs.get_mut(&key) {
            let mut text_ctx = TextLayoutContext {
                float_context: &mut bfc.float_context,
                content_inline_size,
                cb_block_start: LayoutUnit::zero(),
            };
            ifc.do_text_layout(&mut text_ctx)?.height
        } else {
            LayoutUnit::zero()
        };
        return Ok(Some(paragraph_height));
    }

    for child in children {
        layout_child_in_bfc(tree, child, bfc, ctx)?;
    }
    Ok(None)
}

/// One child of a block-container-of-block-containers, visited inside the
/// parent's `BlockFormattingContext`.
fn layout_child_in_bfc(
    tree: &mut BoxTree,
    key: NodeKey,
    bfc: &mut BlockFormattingContext,
    ctx: &mut LayoutContext,
) -> anyhow::Result<()> {
    let node = tree
        .get(key)
        .ok_or_else(|| contract_violation("child referenced in bfc walk is missing from the tree"))?;
    let style = node.style.clone();

    if node.attributes.is_float {
        return layout_float_child(tree, key, &style, bfc, ctx);
    }

    let is_bfc_root_child = node.attributes.is_bfc_root;

    let sides = compute_box_sides(&style)?;
    let margin_block_start = LayoutUnit::from_px(require_used(style.margin.block_start, "margin-block-start")?);
    let margin_block_end = LayoutUnit::from_px(require_used(style.margin.block_end, "margin-block-end")?);

    let clearance = if style.clear == Clear::None {
        None
    } else {
        Some(bfc.float_context.clearance_offset(style.clear))
    };

    let adjoins_first_child =
        sides.border_block_start == LayoutUnit::zero() && sides.padding_block_start == LayoutUnit::zero() && !is_bfc_root_child;

    bfc.box_start(key, margin_block_start, clearance, adjoins_first_child);

    let border_block_size = if is_bfc_root_child {
        // A nested BFC root's containing inline size is this BFC's own
        // content inline size — no `Area` needs to exist yet for that.
        layout_bfc_root(tree, key, bfc.content_inline_size(), ctx)?
    } else {
        // Not a BFC root: this child's own children still belong to the
        // ambient `bfc` — its text runs and nested block children ride the
        // same margin-collapsing chain and float placements as everything
        // else in this formatting context.
        let content_result = layout_box_content(tree, key, bfc, ctx)?;

        let resolved_block_size = resolve_block_box_model(&style, &sides)?;
        let border_block_size = match (resolved_block_size, content_result) {
            (Some(size), _) => size,
            (None, Some(paragraph_height)) => {
                paragraph_height + sides.block_start_insets() + sides.block_end_insets()
            }
            (None, None) => {
                // A non-BFC-root block-container-of-block-containers with
                // `height: auto` should take its children's collapsed total
                // height. `BlockFormattingContext` resolves that precisely
                // only at a BFC root (where `finalize` sees the whole
                // subtree); for an intermediate container riding the
                // parent chain, an approximate, non-collapsing sum of the
                // children's own margin-box heights is used instead (see
                // DESIGN.md).
                let children_for_height =
                    tree.get(key).map(|node| node.children.clone()).unwrap_or_default();
                let mut total = sides.block_start_insets() + sides.block_end_insets();
                for grandchild in &children_for_height {
                    if let Some(model) = ctx.resolved_models.get(grandchild) {
                        total += model.margin_block_start + model.border_block_size + model.margin_block_end;
                    }
                }
                total
            }
        };
        let (margin_line_left, margin_line_right, border_inline_size) =
            resolve_inline_box_model(&style, &sides, bfc.content_inline_size())?;
        ctx.resolved_models.insert(
            key,
            ResolvedBoxModel {
                sides,
                margin_line_left,
                margin_line_right,
                margin_block_start,
                margin_block_end,
                border_inline_size,
                border_block_size,
            },
        );
        border_block_size
    };

    // `box_end` must close exactly the level `box_start` opened: both are
    // driven by the same border/padding/BFC-root condition, never by
    // `is_bfc_root_child` alone, or a box with top border/padding but no
    // BFC root of its own would leak a level that is never popped.
    let opened_own_level = !adjoins_first_child;
    bfc.box_end(key, margin_block_end, opened_own_level, border_block_size);
    Ok(())
}

/// Place a floated child into the running BFC's `FloatContext`. Floats are
/// out-of-flow: they never go through `box_start`/`box_end`'s margin chain,
/// only through shelf placement (`spec.md` §4.2, §4.3).
fn layout_float_child(
    tree: &mut BoxTree,
    key: NodeKey,
    style: &ComputedStyle,
    bfc: &mut BlockFormattingContext,
    ctx: &mut LayoutContext,
) -> anyhow::Result<()> {
    let side = match style.float {
        Float::Left => FloatSideKind::Left,
        Float::Right => FloatSideKind::Right,
        Float::None => {
            return Err(contract_violation("a box marked isFloat has float: none"));
        }
    };

    let sides = BoxSides {
        margin_block_start: LayoutUnit::from_px(style.margin.block_start.or_zero()),
        margin_block_end: LayoutUnit::from_px(style.margin.block_end.or_zero()),
        margin_line_left: LayoutUnit::from_px(style.margin.line_left.or_zero()),
        margin_line_right: LayoutUnit::from_px(style.margin.line_right.or_zero()),
        padding_block_start: LayoutUnit::from_px(style.padding.block_start.max(0.0)),
        padding_block_end: LayoutUnit::from_px(style.padding.block_end.max(0.0)),
        padding_line_left: LayoutUnit::from_px(style.padding.line_left.max(0.0)),
        padding_line_right: LayoutUnit::from_px(style.padding.line_right.max(0.0)),
        border_block_start: LayoutUnit::from_px(style.border_width.block_start.max(0.0)),
        border_block_end: LayoutUnit::from_px(style.border_width.block_end.max(0.0)),
        border_line_left: LayoutUnit::from_px(style.border_width.line_left.max(0.0)),
        border_line_right: LayoutUnit::from_px(style.border_width.line_right.max(0.0)),
    };

    let (margin_near, margin_far) = match side {
        FloatSideKind::Left => (sides.margin_line_left, sides.margin_line_right),
        FloatSideKind::Right => (sides.margin_line_right, sides.margin_line_left),
    };

    let content_inline_size_bfc = bfc.content_inline_size();
    let available_border_box = (content_inline_size_bfc - margin_near - margin_far).max(LayoutUnit::zero());
    let border_padding_inline = sides.line_left_insets() + sides.line_right_insets();

    let border_inline_size = if style.inline_size.is_auto() {
        float_preferred_border_box_width(tree, key, style, available_border_box)?
    } else {
        resolve_box_sizing(
            style.box_sizing,
            LayoutUnit::from_px(require_used(style.inline_size, "inline-size")?),
            border_padding_inline,
        )
    };

    let content_inline_size = (border_inline_size - border_padding_inline).max(LayoutUnit::zero());

    // A float is always its own BFC root: its content gets a fresh
    // `BlockFormattingContext`, not the ambient one its containing block is
    // using (that one only tracks where the float itself sits as a shelf
    // occupant, via `place_float` below).
    let mut float_bfc = BlockFormattingContext::new(content_inline_size);
    let content_result = layout_box_content(tree, key, &mut float_bfc, ctx)?;
    let content_block_size = match content_result {
        Some(paragraph_height) => paragraph_height,
        None => finalize_children_bfc(float_bfc, ctx),
    };

    let resolved_block_size = resolve_block_box_model(style, &sides)?;
    let border_block_size = resolved_block_size
        .unwrap_or_else(|| content_block_size + sides.block_start_insets() + sides.block_end_insets());

    let input = FloatPlacementInput {
        node_key: key,
        border_inline_size,
        border_block_size,
        margin_block_start: sides.margin_block_start,
        margin_block_end: sides.margin_block_end,
        margin_near,
        margin_far,
        clear: style.clear,
    };

    // A block-level float is placed at the point it is encountered in the
    // box-tree walk, not interleaved with a line's content — modeled as
    // placement against an empty line (`spec.md` §4.3's fallback case),
    // same as every `FloatContext` unit test in `exclusion_space`.
    let outcome = bfc
        .float_context
        .place_float(side, LayoutUnit::zero(), true, input, LayoutUnit::zero())?;
    let placed = match outcome {
        PlaceFloatOutcome::Placed(placed) => placed,
        PlaceFloatOutcome::Queued => {
            bfc.float_context.consume_misfits()?;
            bfc.float_context
                .take_resolved(key)
                .ok_or_else(|| contract_violation("float remained unresolved after draining the misfit queue"))?
        }
    };

    ctx.block_starts.insert(key, placed.block_start + sides.margin_block_start);
    ctx.resolved_models.insert(
        key,
        ResolvedBoxModel {
            sides,
            margin_line_left: placed.inline_position,
            margin_line_right: LayoutUnit::zero(),
            margin_block_start: sides.margin_block_start,
            margin_block_end: sides.margin_block_end,
            border_inline_size,
            border_block_size,
        },
    );
    Ok(())
}

/// CSS 2.2 §10.3.5 shrink-to-fit, built on [`layout_contribution`]:
/// `max(minContent, min(maxContent, available))`, with `layout_contribution`'s
/// ambient margin backed back out since `available_border_box` already
/// excludes it.
fn float_preferred_border_box_width(
    tree: &BoxTree,
    key: NodeKey,
    style: &ComputedStyle,
    available_border_box: LayoutUnit,
) -> anyhow::Result<LayoutUnit> {
    let ambient_margin =
        LayoutUnit::from_px(style.margin.line_left.or_zero() + style.margin.line_right.or_zero());
    let min_content = (layout_contribution(tree, key, IntrinsicMode::MinContent)? - ambient_margin).max(LayoutUnit::zero());
    let max_content = (layout_contribution(tree, key, IntrinsicMode::MaxContent)? - ambient_margin).max(LayoutUnit::zero());
    Ok(max_content.min(available_border_box).max(min_content))
}

/// Final pass: walk the subtree in document order and materialize every
/// node's three `Area`s from its resolved box model plus the block-start
/// offset the BFC(s) resolved. `containing_block_content_area` is threaded
/// down rather than read off the node, since a parent's content `AreaId`
/// does not exist until this same pass creates it.
fn assign_areas(
    tree: &mut BoxTree,
    key: NodeKey,
    containing_block_content_area: AreaId,
    areas: &mut AreaArena,
    ctx: &mut LayoutContext,
) -> anyhow::Result<()> {
    let model = *ctx
        .resolved_models
        .get(&key)
        .ok_or_else(|| contract_violation("assign_areas reached a node with no resolved box model"))?;

    let block_start = ctx.block_starts.get(&key).copied().unwrap_or_else(LayoutUnit::zero);

    let style = tree
        .get(key)
        .ok_or_else(|| contract_violation("node vanished before area assignment"))?
        .style
        .clone();

    let border_rect = Rect {
        line_left: model.margin_line_left,
        block_start,
        inline_size: model.border_inline_size,
        block_size: model.border_block_size,
    };

    let placement = AreaPlacement {
        border_rect,
        sides: model.sides,
        writing_mode: style.writing_mode,
        container_physical_width: areas.get(containing_block_content_area).rect.inline_size,
        parent_content_area: containing_block_content_area,
    };
    let block_container_areas = BlockContainerAreas::insert(areas, &placement);

    if let Some(node) = tree.get_mut(key) {
        node.areas = Some(block_container_areas);
        node.containing_block_content_area = Some(containing_block_content_area);
    }

    let children = tree.get(key).map(|node| node.children.clone()).unwrap_or_default();
    for child in children {
        assign_areas(tree, child, block_container_areas.content, areas, ctx)?;
    }
    Ok(())
}
