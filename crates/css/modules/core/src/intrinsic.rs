//! Intrinsic (min-content / max-content) inline-size contribution
//! (`spec.md` §4.6).
//!
//! A definite `inlineSize` is read straight off the style. Otherwise this
//! walks the subtree without ever touching an `Area` or a `BlockFormattingContext`:
//! intrinsic sizing only needs the *shape* a full layout would settle into, not
//! the final block-axis positions, so it is a plain recursive sum/max over the
//! box tree rather than a second invocation of [`crate::driver::layout_block_box`]
//! against a scratch `AreaArena`. Grounded in the teacher's
//! `constraint_block_layout/measurement.rs`, which likewise separates
//! measurement from full layout so multi-pass callers (grid, flexbox) can ask
//! "how big would this be" without mutating anything.

use crate::box_tree::{BoxTree, NodeKey};
use css_box::{LayoutUnit, clamp_border_box, resolve_box_sizing};
use css_style::ComputedStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntrinsicMode {
    MinContent,
    MaxContent,
}

/// `layoutContribution(box, mode)`.
///
/// # Errors
/// Returns an error if `key` is missing from `tree` (a contract violation:
/// the caller handed this function a dangling `NodeKey`).
pub fn layout_contribution(tree: &BoxTree, key: NodeKey, mode: IntrinsicMode) -> anyhow::Result<LayoutUnit> {
    let node = tree
        .get(key)
        .ok_or_else(|| crate::error::contract_violation("layout_contribution reached a node missing from the tree"))?;
    let style = &node.style;

    let border_padding_inline = LayoutUnit::from_px(
        style.padding.line_left.max(0.0)
            + style.padding.line_right.max(0.0)
            + style.border_width.line_left.max(0.0)
            + style.border_width.line_right.max(0.0),
    );
    let ambient_margin =
        LayoutUnit::from_px(style.margin.line_left.or_zero() + style.margin.line_right.or_zero());

    if !style.inline_size.is_auto() {
        // Definite size: margins/borders/padding resolved as zero when
        // `auto` (margins already are `Used<f32>`; border/padding cannot be
        // `auto` in this style model, so only the box-sizing transform
        // applies).
        let content = LayoutUnit::from_px(style.inline_size.px()?);
        let border_box = resolve_box_sizing(style.box_sizing, content, border_padding_inline);
        let clamped = clamp_min_max(style, border_box);
        return Ok(clamped + ambient_margin);
    }

    let content_contribution = if node.attributes.contains_inlines {
        // Text shaping is an external collaborator (`spec.md` §1); without a
        // wired inline formatting context this core has no opinion on the
        // intrinsic width of shaped text and reports zero content
        // contribution, leaving floats (if any were placed directly inside
        // this IFC's container) and the box's own edges to drive the result.
        LayoutUnit::zero()
    } else {
        contribution_over_children(tree, &node.children, mode)?
    };

    let total = content_contribution + border_padding_inline;
    let clamped = clamp_min_max(style, total);
    Ok(clamped + ambient_margin)
}

/// Recurse into a block-container-of-block-containers' children.
///
/// In-flow children stack vertically, so their contribution to the
/// *parent's* width is the maximum over all of them regardless of mode.
/// Floated children are the exception the spec calls out explicitly: a
/// min-content measurement must still account for a float that cannot
/// shrink below its own min-content width (`max`), while a max-content
/// measurement assumes nothing wraps, so floats sit beside the inline
/// content and their widths accumulate (`sum`).
fn contribution_over_children(tree: &BoxTree, children: &[NodeKey], mode: IntrinsicMode) -> anyhow::Result<LayoutUnit> {
    let mut in_flow_max = LayoutUnit::zero();
    let mut float_max = LayoutUnit::zero();
    let mut float_sum = LayoutUnit::zero();

    for &child in children {
        let child_contribution = layout_contribution(tree, child, mode)?;
        let is_float = tree.is_float(child);
        if is_float {
            float_max = float_max.max(child_contribution);
            float_sum += child_contribution;
        } else {
            in_flow_max = in_flow_max.max(child_contribution);
        }
    }

    let float_contribution = match mode {
        IntrinsicMode::MinContent => float_max,
        IntrinsicMode::MaxContent => float_sum,
    };
    Ok(in_flow_max.max(float_contribution))
}

fn clamp_min_max(style: &ComputedStyle, border_box: LayoutUnit) -> LayoutUnit {
    let border_padding_inline = LayoutUnit::from_px(
        style.padding.line_left.max(0.0)
            + style.padding.line_right.max(0.0)
            + style.border_width.line_left.max(0.0)
            + style.border_width.line_right.max(0.0),
    );
    let min_border_box = resolve_box_sizing(
        style.box_sizing,
        LayoutUnit::from_px(style.min_inline_size),
        border_padding_inline,
    );
    let max_border_box = if style.max_inline_size.is_auto() {
        None
    } else {
        style.max_inline_size.px().ok().map(|content| {
            resolve_box_sizing(style.box_sizing, LayoutUnit::from_px(content), border_padding_inline)
        })
    };
    clamp_border_box(border_box, min_border_box, max_border_box)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::box_tree::BoxAttributes;
    use css_style::Used;

    fn px(value: f32) -> LayoutUnit {
        LayoutUnit::from_px(value)
    }

    /// # Panics
    /// Panics if a definite inline size is not returned verbatim (plus
    /// zeroed ambient margin/border/padding).
    #[test]
    fn definite_inline_size_is_returned_directly() {
        let mut tree = BoxTree::new();
        let mut style = ComputedStyle::default();
        style.inline_size = Used::Px(120.0);
        let key = tree.insert(style, BoxAttributes::default());

        let min = layout_contribution(&tree, key, IntrinsicMode::MinContent).expect("must not error");
        let max = layout_contribution(&tree, key, IntrinsicMode::MaxContent).expect("must not error");
        assert_eq!(min, px(120.0));
        assert_eq!(max, px(120.0));
    }

    /// The "intrinsic sandwich" law from `spec.md` §8: `minContent <=
    /// chosen <= max(minContent, maxContent)`, demonstrated here on a
    /// container whose two children have different widths.
    ///
    /// # Panics
    /// Panics if min-content is not the widest child and max-content is not
    /// at least as large.
    #[test]
    fn parent_contribution_is_the_widest_child() {
        let mut tree = BoxTree::new();
        let mut narrow_style = ComputedStyle::default();
        narrow_style.inline_size = Used::Px(50.0);
        let narrow = tree.insert(narrow_style, BoxAttributes::default());

        let mut wide_style = ComputedStyle::default();
        wide_style.inline_size = Used::Px(150.0);
        let wide = tree.insert(wide_style, BoxAttributes::default());

        let parent = tree.insert(ComputedStyle::default(), BoxAttributes::default());
        tree.append_child(parent, narrow);
        tree.append_child(parent, wide);

        let min = layout_contribution(&tree, parent, IntrinsicMode::MinContent).expect("must not error");
        let max = layout_contribution(&tree, parent, IntrinsicMode::MaxContent).expect("must not error");
        assert_eq!(min, px(150.0));
        assert_eq!(max, px(150.0));
        assert!(min <= max.max(min));
    }

    /// A left float's width contributes additively under max-content (it
    /// sits beside unwrapped inline content) but only via `max` under
    /// min-content (it cannot shrink below its own min-content width).
    ///
    /// # Panics
    /// Panics if the float does not participate per the rule above.
    #[test]
    fn float_child_contributes_by_mode() {
        let mut tree = BoxTree::new();
        let mut float_style = ComputedStyle::default();
        float_style.inline_size = Used::Px(40.0);
        let float_key = tree.insert(
            float_style,
            BoxAttributes {
                is_float: true,
                ..BoxAttributes::default()
            },
        );

        let mut sibling_style = ComputedStyle::default();
        sibling_style.inline_size = Used::Px(30.0);
        let sibling = tree.insert(sibling_style, BoxAttributes::default());

        let parent = tree.insert(ComputedStyle::default(), BoxAttributes::default());
        tree.append_child(parent, float_key);
        tree.append_child(parent, sibling);

        let min = layout_contribution(&tree, parent, IntrinsicMode::MinContent).expect("must not error");
        let max = layout_contribution(&tree, parent, IntrinsicMode::MaxContent).expect("must not error");
        assert_eq!(min, px(40.0));
        assert_eq!(max, px(40.0));
    }
}
