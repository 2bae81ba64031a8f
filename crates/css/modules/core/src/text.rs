//! The inline formatting context (IFC) seam.
//!
//! Text shaping and line breaking are an external collaborator
//! (`spec.md` §1, §6): this core only defines the shape `doTextLayout`
//! populates and the callback surface it may call back into while running
//! (`fctx.placeFloat`, `fctx.findLinePosition`, `fctx.preTextContent`,
//! `fctx.postLine`).

use super::box_tree::{FloatContext, NodeKey};
use css_box::LayoutUnit;

/// One laid-out line, as produced by `doTextLayout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineBox {
    pub block_offset: LayoutUnit,
    pub height: LayoutUnit,
    pub did_break: bool,
}

/// The output `doTextLayout` writes back onto the IFC it was invoked on.
#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    pub lineboxes: Vec<LineBox>,
    pub height: LayoutUnit,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Everything `doTextLayout` needs from the BFC it is running inside: the
/// float context it may place in-flow floats against, and the geometry of
/// the content area it is laying lines into.
pub struct TextLayoutContext<'float_context> {
    pub float_context: &'float_context mut FloatContext,
    pub content_inline_size: LayoutUnit,
    pub cb_block_start: LayoutUnit,
}

/// An inline formatting context: a block container whose children are
/// inline-level (`isBlockContainerOfInlines`). Implemented by the text
/// subsystem; this core only drives it through `do_text_layout`.
pub trait InlineFormattingContext {
    /// Shape and break this IFC's runs into lines, placing any in-flow
    /// floats it encounters against `ctx.float_context`. Populates
    /// `self.paragraph()` and returns it.
    fn do_text_layout(&mut self, ctx: &mut TextLayoutContext<'_>) -> anyhow::Result<&Paragraph>;

    fn paragraph(&self) -> &Paragraph;

    fn node_key(&self) -> NodeKey;
}

/// A minimal `InlineFormattingContext` used by the core's own tests and by
/// callers that have not wired up real text shaping yet: treats its whole
/// content box as a single line of a fixed, caller-supplied height.
#[derive(Debug, Clone)]
pub struct FixedHeightIfc {
    node_key: NodeKey,
    line_height: LayoutUnit,
    paragraph: Paragraph,
}

impl FixedHeightIfc {
    pub fn new(node_key: NodeKey, line_height: LayoutUnit) -> Self {
        Self {
            node_key,
            line_height,
            paragraph: Paragraph::new(),
        }
    }
}

impl InlineFormattingContext for FixedHeightIfc {
    fn do_text_layout(&mut self, ctx: &mut TextLayoutContext<'_>) -> anyhow::Result<&Paragraph> {
        ctx.float_context.pre_text_content()?;
        let line = LineBox {
            block_offset: LayoutUnit::zero(),
            height: self.line_height,
            did_break: false,
        };
        ctx.float_context
            .post_line(ctx.cb_block_start, line.block_offset, line.height, line.did_break)?;
        self.paragraph.lineboxes.push(line);
        self.paragraph.height = self.line_height;
        Ok(&self.paragraph)
    }

    fn paragraph(&self) -> &Paragraph {
        &self.paragraph
    }

    fn node_key(&self) -> NodeKey {
        self.node_key
    }
}
