//! Margin collapse collection.
//!
//! Based on Chromium's `NGMarginStrut`: margins are accumulated rather than
//! collapsed immediately, so the final collapsed value can be computed once
//! the full set of adjoining margins at a boundary is known.

use css_box::LayoutUnit;

/// Accumulates a set of adjoining margins and collapses them into a single
/// net margin using the CSS rule "largest positive minus largest negative
/// magnitude" (CSS 2.2 §8.3.1).
///
/// Both fields are kept non-negative: `negative` stores the *magnitude* of
/// the most negative margin seen, not its signed value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarginCollapseCollection {
    positive: LayoutUnit,
    negative: LayoutUnit,
}

impl MarginCollapseCollection {
    /// An empty collection; `get()` returns zero until `add` is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// A collection seeded with one margin, as used when a flush opens a
    /// fresh collection seeded with `floatBottom - cbBlockStart`.
    pub fn with_seed(seed: LayoutUnit) -> Self {
        let mut collection = Self::new();
        collection.add(seed);
        collection
    }

    /// Add one adjoining margin to the collection.
    pub fn add(&mut self, margin: LayoutUnit) {
        if margin >= LayoutUnit::zero() {
            self.positive = self.positive.max(margin);
        } else {
            self.negative = self.negative.max(-margin);
        }
    }

    /// The net collapsed margin: `positive - negative`.
    pub const fn get(&self) -> LayoutUnit {
        LayoutUnit::from_raw(self.positive.raw() - self.negative.raw())
    }

    /// True if no margin has been added yet.
    pub fn is_empty(&self) -> bool {
        self.positive == LayoutUnit::zero() && self.negative == LayoutUnit::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(value: f32) -> LayoutUnit {
        LayoutUnit::from_px(value)
    }

    /// # Panics
    /// Panics if collapsing a fresh collection does not yield zero.
    #[test]
    fn empty_collection_is_zero() {
        let collection = MarginCollapseCollection::new();
        assert_eq!(collection.get(), LayoutUnit::zero());
        assert!(collection.is_empty());
    }

    /// # Panics
    /// Panics if multiple positive margins do not collapse to their maximum.
    #[test]
    fn multiple_positive_margins_collapse_to_largest() {
        let mut collection = MarginCollapseCollection::new();
        collection.add(px(20.0));
        collection.add(px(30.0));
        assert_eq!(collection.get(), px(30.0));
    }

    /// # Panics
    /// Panics if a mixed positive/negative set does not yield the signed
    /// difference of the two magnitudes.
    #[test]
    fn mixed_margins_yield_signed_difference() {
        let mut collection = MarginCollapseCollection::new();
        collection.add(px(30.0));
        collection.add(px(-10.0));
        assert_eq!(collection.get(), px(20.0));

        let mut collection = MarginCollapseCollection::new();
        collection.add(px(-10.0));
        collection.add(px(-30.0));
        assert_eq!(collection.get(), px(-30.0));
    }

    /// # Panics
    /// Panics if order of insertion changes the collapsed result.
    #[test]
    fn collapse_is_order_independent() {
        let mut forward = MarginCollapseCollection::new();
        forward.add(px(5.0));
        forward.add(px(-15.0));
        forward.add(px(40.0));

        let mut backward = MarginCollapseCollection::new();
        backward.add(px(40.0));
        backward.add(px(-15.0));
        backward.add(px(5.0));

        assert_eq!(forward.get(), backward.get());
    }
}
