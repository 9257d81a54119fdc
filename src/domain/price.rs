//! Catalog price bounds and the uncommitted price-range draft.

use serde::{Deserialize, Serialize};

use crate::domain::filter::PriceRange;

/// Lower bound used until the catalog reports its own.
pub const DEFAULT_MIN_PRICE: f64 = 0.0;
/// Upper bound used until the catalog reports its own.
pub const DEFAULT_MAX_PRICE: f64 = 10_000.0;

/// Price interval discovered from the catalog.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct PriceBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for PriceBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_PRICE,
            max: DEFAULT_MAX_PRICE,
        }
    }
}

impl PriceBounds {
    /// Bounds to clamp against while the catalog has not reported its own.
    /// Only negative prices are rejected.
    pub const UNBOUNDED: PriceBounds = PriceBounds {
        min: 0.0,
        max: f64::INFINITY,
    };

    /// Builds bounds, replacing non-finite values with the defaults, lifting
    /// negatives to zero and ordering the pair.
    pub fn new(min: f64, max: f64) -> Self {
        let min = if min.is_finite() { min.max(0.0) } else { DEFAULT_MIN_PRICE };
        let max = if max.is_finite() { max.max(0.0) } else { DEFAULT_MAX_PRICE };
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Widens the bounds so that both committed ends of `price` fit.
    pub fn covering(self, price: &PriceRange) -> Self {
        let ends = [price.gte(), price.lte()];
        let (min, max) = ends
            .into_iter()
            .flatten()
            .fold((self.min, self.max), |(min, max), end| {
                (min.min(end.get()), max.max(end.get()))
            });
        Self { min, max }
    }

    /// Clamps `value` into the bounds, substituting `fallback` for NaN and
    /// infinities.
    pub fn clamp_or(&self, value: f64, fallback: f64) -> f64 {
        if value.is_finite() {
            value.clamp(self.min, self.max)
        } else {
            fallback.clamp(self.min, self.max)
        }
    }
}

/// Two-element price range staged in the sidebar before it is applied.
///
/// Always satisfies `min <= low <= high <= max` for the bounds it was last
/// written with.
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct PriceDraft {
    low: f64,
    high: f64,
}

impl PriceDraft {
    /// A draft spanning the whole catalog range.
    pub fn full(bounds: PriceBounds) -> Self {
        Self {
            low: bounds.min,
            high: bounds.max,
        }
    }

    /// Seeds the draft from the committed filter, falling back to the bounds
    /// for missing ends.
    pub fn from_committed(price: &PriceRange, bounds: PriceBounds) -> Self {
        let low = price
            .gte()
            .map_or(bounds.min, |gte| bounds.clamp_or(gte.get(), bounds.min));
        let high = price
            .lte()
            .map_or(bounds.max, |lte| bounds.clamp_or(lte.get(), bounds.max));
        Self {
            low,
            high: high.max(low),
        }
    }

    /// Stages a new range. The low end is clamped into the bounds first and
    /// the high end is then kept at or above it.
    pub fn set(&mut self, low: f64, high: f64, bounds: PriceBounds) {
        let low = bounds.clamp_or(low, bounds.min);
        let high = bounds.clamp_or(high, bounds.max).max(low);
        self.low = low;
        self.high = high;
    }

    /// Stages a minimum typed into the text input. The value is clamped into
    /// the bounds and capped at the current high end, which never moves.
    /// Anything that is not a number snaps to the lower bound.
    pub fn set_low_input(&mut self, text: &str, bounds: PriceBounds) {
        let high = bounds.clamp_or(self.high, bounds.max);
        let low = bounds.clamp_or(parse_input(text), bounds.min).min(high);
        self.low = low;
        self.high = high;
    }

    /// Stages a maximum typed into the text input. The value is clamped into
    /// the bounds and floored at the current low end, which never moves.
    /// Anything that is not a number snaps to the upper bound.
    pub fn set_high_input(&mut self, text: &str, bounds: PriceBounds) {
        let low = bounds.clamp_or(self.low, bounds.min);
        let high = bounds.clamp_or(parse_input(text), bounds.max).max(low);
        self.low = low;
        self.high = high;
    }

    pub fn reset(&mut self, bounds: PriceBounds) {
        *self = Self::full(bounds);
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }
}

fn parse_input(text: &str) -> f64 {
    text.trim().parse().unwrap_or(f64::NAN)
}
