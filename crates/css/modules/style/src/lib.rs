//! Computed-style accessor surface consumed by the block layout core.
//!
//! This crate does not compute styles — cascade, inheritance, and selector
//! matching are an external collaborator (see `css_core`'s crate docs). It
//! only fixes the shape of an already-resolved `ComputedStyle`: every field
//! here is a *used* value, i.e. the output of cascade plus used-value
//! resolution, not a specified value that might still be a percentage or a
//! `calc()`.
//!
//! Spec: CSS 2.2 §9 Visual Formatting Model (writing mode / direction) and
//! §8.3 (margin properties), plus CSS Writing Modes 3 for the logical-axis
//! naming used throughout (`lineLeft`/`lineRight` for the inline axis,
//! `blockStart`/`blockEnd` for the block axis).

/// A used value that may still be the `auto` keyword.
///
/// Distinct from `Option<T>`: `auto` is a first-class CSS value with its own
/// resolution rules (see `Used::px`), not merely "absent".
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Used<T> {
    Auto,
    Px(T),
}

impl<T: Copy> Used<T> {
    /// Read the resolved pixel value.
    ///
    /// Calling this where the caller has not already ruled out `auto` (e.g.
    /// on a margin before box-model resolution has run) is a programmer
    /// contract violation per the core's error-handling design: it fails
    /// loudly rather than silently substituting a default.
    pub fn px(self) -> anyhow::Result<T> {
        match self {
            Self::Px(value) => Ok(value),
            Self::Auto => Err(anyhow::anyhow!(
                "accessed a used value that is still `auto`"
            )),
        }
    }

    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl Used<f32> {
    /// Treat `auto` as zero. Valid only where the spec explicitly says so
    /// (float margins treated as zero when `auto`, e.g.).
    pub const fn or_zero(self) -> f32 {
        match self {
            Self::Px(value) => value,
            Self::Auto => 0.0,
        }
    }
}

impl<T> From<T> for Used<T> {
    fn from(value: T) -> Self {
        Self::Px(value)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WritingMode {
    #[default]
    HorizontalTb,
    VerticalLr,
    VerticalRl,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WhiteSpace {
    #[default]
    Normal,
    Nowrap,
    Pre,
    PreWrap,
    PreLine,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Float {
    #[default]
    None,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Clear {
    #[default]
    None,
    Left,
    Right,
    Both,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayOuter {
    #[default]
    Block,
    Inline,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayInner {
    #[default]
    Flow,
    FlowRoot,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Display {
    pub outer: DisplayOuter,
    pub inner: DisplayInner,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoxSizing {
    #[default]
    ContentBox,
    BorderBox,
}

/// Logical-axis edges: block-start/block-end for the block axis,
/// line-left/line-right for the inline axis (CSS Writing Modes 3 §6).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LogicalEdges<T> {
    pub block_start: T,
    pub block_end: T,
    pub line_left: T,
    pub line_right: T,
}

/// A fully resolved (used-value) style, as consumed by the block layout
/// core. Everything here is post-cascade, post-inheritance,
/// post-percentage-resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct ComputedStyle {
    pub writing_mode: WritingMode,
    pub direction: Direction,
    pub white_space: WhiteSpace,
    pub float: Float,
    pub clear: Clear,
    pub display: Display,
    pub box_sizing: BoxSizing,

    pub margin: LogicalEdges<Used<f32>>,
    pub padding: LogicalEdges<f32>,
    pub border_width: LogicalEdges<f32>,

    pub inline_size: Used<f32>,
    pub block_size: Used<f32>,
    pub min_inline_size: f32,
    pub min_block_size: f32,
    pub max_inline_size: Used<f32>,
    pub max_block_size: Used<f32>,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            writing_mode: WritingMode::default(),
            direction: Direction::default(),
            white_space: WhiteSpace::default(),
            float: Float::default(),
            clear: Clear::default(),
            display: Display::default(),
            box_sizing: BoxSizing::default(),
            margin: LogicalEdges {
                block_start: Used::Px(0.0),
                block_end: Used::Px(0.0),
                line_left: Used::Px(0.0),
                line_right: Used::Px(0.0),
            },
            padding: LogicalEdges::default(),
            border_width: LogicalEdges::default(),
            inline_size: Used::Auto,
            block_size: Used::Auto,
            min_inline_size: 0.0,
            min_block_size: 0.0,
            max_inline_size: Used::Auto,
            max_block_size: Used::Auto,
        }
    }
}

impl ComputedStyle {
    /// CSS 2.2 §9.5.1: an element "can collapse through" when its own
    /// top/bottom margins may merge with its neighbors' because nothing
    /// — border, padding, or an explicit height — separates them.
    ///
    /// This is necessary but not sufficient: the caller (the BFC driver)
    /// must also confirm the box has no in-flow content between its start
    /// and end events and no clearance (`spec.md` §4.4 step 1 of `boxEnd`,
    /// and the `clearanceAtLevel` mechanism in §9).
    pub fn can_collapse_through_by_style(&self) -> bool {
        self.padding.block_start == 0.0
            && self.padding.block_end == 0.0
            && self.border_width.block_start == 0.0
            && self.border_width.block_end == 0.0
            && self.block_size.is_auto()
    }
}
