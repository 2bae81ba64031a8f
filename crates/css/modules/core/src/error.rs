//! Error taxonomy for the layout core.
//!
//! `spec.md` §7 distinguishes three kinds of outcome: programmer contract
//! violations, structural cases this core does not support, and normal
//! layout outcomes that are never errors at all (a float not fitting, a
//! line not fitting, a `blockSize` staying `auto`). The third kind never
//! reaches this module — callers encode it in their own return types
//! (`PlaceFloatOutcome`, `Option<LayoutUnit>`, and so on).

use anyhow::{Result, anyhow};

/// A used-value accessor saw `auto`, a float placement's vacancy offset
/// disagreed with the shelf, `layout_float_box` was called on a non-float,
/// or a containing block was never assigned. These are bugs in the caller
/// or in style resolution, not recoverable layout conditions.
pub fn contract_violation(message: impl Into<String>) -> anyhow::Error {
    let message = message.into();
    tracing::error!(%message, "layout contract violation");
    anyhow!("layout contract violation: {message}")
}

/// A structurally unsupported case: an inline-block inside an inline
/// formatting context, or a child of a kind this core does not model.
/// Marks a known gap, not a bug.
pub fn unsupported(message: impl Into<String>) -> anyhow::Error {
    let message = message.into();
    tracing::warn!(%message, "unsupported layout construct");
    anyhow!("unsupported layout construct: {message}")
}

/// Narrow a fallible used-value read into a contract violation with the
/// field name attached, rather than letting `Used::px`'s generic message
/// through unadorned.
pub fn require_used<T>(value: css_style::Used<T>, field_name: &str) -> Result<T>
where
    T: Copy,
{
    value.px().map_err(|_auto| contract_violation(format!("`{field_name}` is still `auto`")))
}
