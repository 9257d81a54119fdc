//! Product-list filter state and the pure operations that change it.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::domain::price::PriceBounds;
use crate::domain::types::{ALL, FilterToken, Price};

/// Longest search text a filter state carries. Longer input is cut short.
pub const MAX_SEARCH_LENGTH: usize = 200;

/// Errors raised when a filter change cannot be applied.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("unknown filter `{0}`")]
    UnknownKey(String),

    #[error("invalid value `{value}` for filter `{key}`")]
    InvalidValue { key: FilterKey, value: String },
}

/// Names of the filter fields. These double as URL query parameter names.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum FilterKey {
    Gender,
    Category,
    Color,
    IsOnSale,
    PriceGte,
    PriceLte,
    Sort,
    Search,
}

impl FilterKey {
    pub const ALL: [FilterKey; 8] = [
        FilterKey::Gender,
        FilterKey::Category,
        FilterKey::Color,
        FilterKey::IsOnSale,
        FilterKey::PriceGte,
        FilterKey::PriceLte,
        FilterKey::Sort,
        FilterKey::Search,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            FilterKey::Gender => "gender",
            FilterKey::Category => "category",
            FilterKey::Color => "color",
            FilterKey::IsOnSale => "isOnSale",
            FilterKey::PriceGte => "priceGte",
            FilterKey::PriceLte => "priceLte",
            FilterKey::Sort => "sort",
            FilterKey::Search => "search",
        }
    }
}

impl Display for FilterKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKey {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| FilterError::UnknownKey(s.to_string()))
    }
}

/// Gender catalog selector. The storefront currently carries a single
/// catalog, so `men` is the default.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    All,
    #[default]
    Men,
}

impl Gender {
    pub const fn as_str(self) -> &'static str {
        match self {
            Gender::All => ALL,
            Gender::Men => "men",
        }
    }
}

impl FromStr for Gender {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Gender::All),
            "men" => Ok(Gender::Men),
            _ => Err(()),
        }
    }
}

/// Either "no filter" or a single named category/color.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Selection {
    #[default]
    All,
    Only(FilterToken),
}

impl Selection {
    /// Parses a raw value; empty strings and `all` mean "no filter".
    pub fn parse(raw: &str) -> Self {
        FilterToken::new(raw).map_or(Selection::All, Selection::Only)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Selection::All => ALL,
            Selection::Only(token) => token.as_str(),
        }
    }

    pub fn token(&self) -> Option<&FilterToken> {
        match self {
            Selection::All => None,
            Selection::Only(token) => Some(token),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// True when this selection names exactly `name`.
    pub fn is(&self, name: &str) -> bool {
        self.token().is_some_and(|token| token.as_str() == name)
    }
}

impl Serialize for Selection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Tri-state sale flag.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SaleFilter {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "true")]
    OnSale,
    #[serde(rename = "false")]
    Regular,
}

impl SaleFilter {
    pub const fn as_str(self) -> &'static str {
        match self {
            SaleFilter::All => ALL,
            SaleFilter::OnSale => "true",
            SaleFilter::Regular => "false",
        }
    }

    /// The flag forwarded to the catalog, `None` meaning "no filter".
    pub const fn as_flag(self) -> Option<bool> {
        match self {
            SaleFilter::All => None,
            SaleFilter::OnSale => Some(true),
            SaleFilter::Regular => Some(false),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SaleFilter::All => "All Products",
            SaleFilter::OnSale => "On Sale",
            SaleFilter::Regular => "Regular Price",
        }
    }
}

impl FromStr for SaleFilter {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(SaleFilter::All),
            "true" => Ok(SaleFilter::OnSale),
            "false" => Ok(SaleFilter::Regular),
            _ => Err(()),
        }
    }
}

/// Orderings understood by the catalog. Tie-breaking is up to the backend.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    LowToHigh,
    HighToLow,
    Alphabetical,
    TopRated,
    BestSelling,
}

impl SortOrder {
    pub const ALL: [SortOrder; 7] = [
        SortOrder::Newest,
        SortOrder::Oldest,
        SortOrder::LowToHigh,
        SortOrder::HighToLow,
        SortOrder::Alphabetical,
        SortOrder::TopRated,
        SortOrder::BestSelling,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
            SortOrder::LowToHigh => "lowToHigh",
            SortOrder::HighToLow => "highToLow",
            SortOrder::Alphabetical => "alphabetical",
            SortOrder::TopRated => "topRated",
            SortOrder::BestSelling => "bestSelling",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SortOrder::Newest => "Newest First",
            SortOrder::Oldest => "Oldest First",
            SortOrder::LowToHigh => "Price: Low to High",
            SortOrder::HighToLow => "Price: High to Low",
            SortOrder::Alphabetical => "A to Z",
            SortOrder::TopRated => "Top Rated",
            SortOrder::BestSelling => "Best Selling",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .into_iter()
            .find(|order| order.as_str() == s)
            .ok_or(())
    }
}

/// Optional price interval with `gte <= lte` whenever both ends are set.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    price_gte: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price_lte: Option<Price>,
}

impl PriceRange {
    /// Builds a range, pulling an inverted lower end down to the upper end.
    pub fn new(gte: Option<Price>, lte: Option<Price>) -> Self {
        let gte = match (gte, lte) {
            (Some(low), Some(high)) if low > high => Some(high),
            (low, _) => low,
        };
        Self {
            price_gte: gte,
            price_lte: lte,
        }
    }

    pub fn gte(&self) -> Option<Price> {
        self.price_gte
    }

    pub fn lte(&self) -> Option<Price> {
        self.price_lte
    }

    pub fn is_unbounded(&self) -> bool {
        self.price_gte.is_none() && self.price_lte.is_none()
    }
}

/// A single requested change to the filter state.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FilterChange {
    /// Write one field from its raw (URL) representation.
    Set { key: FilterKey, value: String },
    /// Commit both price ends at once.
    PriceRange { gte: f64, lte: f64 },
    ClearPrice,
    ClearAll,
}

impl FilterChange {
    pub fn set(key: FilterKey, value: impl Into<String>) -> Self {
        FilterChange::Set {
            key,
            value: value.into(),
        }
    }
}

/// A removable description of one active filter.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ActiveFilter {
    pub label: String,
    pub remove: FilterChange,
}

/// Current product-list filter selection.
///
/// The URL query string is the canonical home of this value: see
/// [`FilterState::from_url`] and [`FilterState::to_url`].
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub gender: Gender,
    pub category: Selection,
    pub color: Selection,
    pub is_on_sale: SaleFilter,
    #[serde(flatten)]
    pub price: PriceRange,
    pub sort: SortOrder,
    pub search: String,
}

impl FilterState {
    /// Returns the state with every field reset to its default.
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Applies `value` to the field named `key`.
    pub fn set_filter(
        &self,
        key: &str,
        value: &str,
        bounds: PriceBounds,
    ) -> Result<Self, FilterError> {
        self.set(key.parse()?, value, bounds)
    }

    /// Applies `value` to `key`, returning the new state.
    ///
    /// Price inputs never fail: an empty value clears the bound, anything
    /// else is clamped into `bounds` and against the opposite end.
    pub fn set(&self, key: FilterKey, value: &str, bounds: PriceBounds) -> Result<Self, FilterError> {
        let invalid = || FilterError::InvalidValue {
            key,
            value: value.to_string(),
        };

        let mut next = self.clone();
        match key {
            FilterKey::Gender => next.gender = value.parse().map_err(|_| invalid())?,
            FilterKey::Category => next.category = Selection::parse(value),
            FilterKey::Color => next.color = Selection::parse(value),
            FilterKey::IsOnSale => next.is_on_sale = value.parse().map_err(|_| invalid())?,
            FilterKey::Sort => next.sort = value.parse().map_err(|_| invalid())?,
            FilterKey::Search => next.search = clip_search(value),
            FilterKey::PriceGte => {
                let lte = self.price.lte();
                let gte = clamp_price_input(value, bounds, bounds.min).map(|gte| match lte {
                    Some(lte) if gte > lte => lte,
                    _ => gte,
                });
                next.price = PriceRange::new(gte, lte);
            }
            FilterKey::PriceLte => {
                let gte = self.price.gte();
                let lte = clamp_price_input(value, bounds, bounds.max).map(|lte| match gte {
                    Some(gte) if lte < gte => gte,
                    _ => lte,
                });
                next.price = PriceRange::new(gte, lte);
            }
        }
        Ok(next)
    }

    /// Commits both price ends, clamped into `bounds` with `gte <= lte`.
    pub fn set_price_range(&self, gte: f64, lte: f64, bounds: PriceBounds) -> Self {
        let low = bounds.clamp_or(gte, bounds.min);
        let high = bounds.clamp_or(lte, bounds.max).max(low);
        let mut next = self.clone();
        next.price = PriceRange::new(Price::new(low).ok(), Price::new(high).ok());
        next
    }

    pub fn clear_price(&self) -> Self {
        let mut next = self.clone();
        next.price = PriceRange::default();
        next
    }

    /// Applies a [`FilterChange`].
    pub fn apply(&self, change: &FilterChange, bounds: PriceBounds) -> Result<Self, FilterError> {
        match change {
            FilterChange::Set { key, value } => self.set(*key, value, bounds),
            FilterChange::PriceRange { gte, lte } => Ok(self.set_price_range(*gte, *lte, bounds)),
            FilterChange::ClearPrice => Ok(self.clear_price()),
            FilterChange::ClearAll => Ok(Self::cleared()),
        }
    }

    /// True when any narrowing filter differs from its default. The sort
    /// order is not a filter.
    pub fn has_active_filters(&self) -> bool {
        self.active_filter_count() > 0 || !self.search.trim().is_empty()
    }

    /// Number of narrowing filters in effect. The price range counts once.
    pub fn active_filter_count(&self) -> usize {
        [
            self.gender != Gender::default(),
            !self.category.is_all(),
            !self.color.is_all(),
            self.is_on_sale != SaleFilter::All,
            !self.price.is_unbounded(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Describes every active filter together with the change that removes it.
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let mut chips = Vec::new();
        if self.gender != Gender::default() {
            chips.push(ActiveFilter {
                label: format!("Gender: {}", self.gender.as_str()),
                remove: FilterChange::set(FilterKey::Gender, Gender::default().as_str()),
            });
        }
        if let Some(category) = self.category.token() {
            chips.push(ActiveFilter {
                label: format!("Category: {category}"),
                remove: FilterChange::set(FilterKey::Category, ALL),
            });
        }
        if let Some(color) = self.color.token() {
            chips.push(ActiveFilter {
                label: format!("Color: {color}"),
                remove: FilterChange::set(FilterKey::Color, ALL),
            });
        }
        if self.is_on_sale != SaleFilter::All {
            let label = match self.is_on_sale {
                SaleFilter::OnSale => "On Sale",
                _ => "Regular",
            };
            chips.push(ActiveFilter {
                label: format!("Sale: {label}"),
                remove: FilterChange::set(FilterKey::IsOnSale, ALL),
            });
        }
        if !self.search.trim().is_empty() {
            chips.push(ActiveFilter {
                label: format!("Search: {}", self.search.trim()),
                remove: FilterChange::set(FilterKey::Search, ""),
            });
        }
        if !self.price.is_unbounded() {
            let low = self.price.gte().map_or_else(|| "0".to_string(), |p| p.to_string());
            let high = self.price.lte().map_or_else(|| "∞".to_string(), |p| p.to_string());
            chips.push(ActiveFilter {
                label: format!("Price: ₹{low} - ₹{high}"),
                remove: FilterChange::ClearPrice,
            });
        }
        chips
    }
}

/// Cuts search text down to [`MAX_SEARCH_LENGTH`] characters.
pub fn clip_search(value: &str) -> String {
    value.chars().take(MAX_SEARCH_LENGTH).collect()
}

/// Parses a user-typed price. Empty input clears the bound; non-numeric
/// input falls back to `fallback`; the result is clamped into `bounds`.
fn clamp_price_input(value: &str, bounds: PriceBounds, fallback: f64) -> Option<Price> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = trimmed.parse::<f64>().unwrap_or(f64::NAN);
    Price::new(bounds.clamp_or(parsed, fallback)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(value: f64) -> Option<Price> {
        Some(Price::new(value).unwrap())
    }

    #[test]
    fn defaults_match_single_catalog_storefront() {
        let state = FilterState::default();
        assert_eq!(state.gender, Gender::Men);
        assert_eq!(state.category, Selection::All);
        assert_eq!(state.color, Selection::All);
        assert_eq!(state.is_on_sale, SaleFilter::All);
        assert!(state.price.is_unbounded());
        assert_eq!(state.sort, SortOrder::Newest);
        assert_eq!(state.search, "");
        assert!(!state.has_active_filters());
    }

    #[test]
    fn set_filter_rejects_unknown_key() {
        let result = FilterState::default().set_filter("size", "XL", PriceBounds::default());
        assert_eq!(result, Err(FilterError::UnknownKey("size".to_string())));
    }

    #[test]
    fn set_filter_rejects_invalid_enum_values() {
        let state = FilterState::default();
        let bounds = PriceBounds::default();
        assert!(matches!(
            state.set_filter("sort", "cheapest", bounds),
            Err(FilterError::InvalidValue { key: FilterKey::Sort, .. })
        ));
        assert!(state.set_filter("gender", "women", bounds).is_err());
        assert!(state.set_filter("isOnSale", "yes", bounds).is_err());
    }

    #[test]
    fn set_filter_returns_new_state_and_leaves_input_untouched() {
        let state = FilterState::default();
        let next = state
            .set_filter("category", "Shirts", PriceBounds::default())
            .unwrap();
        assert!(next.category.is("Shirts"));
        assert!(state.category.is_all());

        let back = next.set_filter("category", "all", PriceBounds::default()).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn price_input_is_clamped_into_catalog_bounds() {
        let bounds = PriceBounds::new(100.0, 2_000.0);
        let state = FilterState::default();

        let low = state.set_filter("priceGte", "5", bounds).unwrap();
        assert_eq!(low.price.gte(), price(100.0));

        let high = state.set_filter("priceLte", "99999", bounds).unwrap();
        assert_eq!(high.price.lte(), price(2_000.0));

        let garbage = state.set_filter("priceGte", "cheap", bounds).unwrap();
        assert_eq!(garbage.price.gte(), price(100.0));

        let garbage = state.set_filter("priceLte", "lots", bounds).unwrap();
        assert_eq!(garbage.price.lte(), price(2_000.0));
    }

    #[test]
    fn price_ends_cannot_cross() {
        let bounds = PriceBounds::default();
        let state = FilterState::default()
            .set_filter("priceLte", "500", bounds)
            .unwrap();

        let crossed = state.set_filter("priceGte", "800", bounds).unwrap();
        assert_eq!(crossed.price.gte(), price(500.0));
        assert_eq!(crossed.price.lte(), price(500.0));

        let state = FilterState::default()
            .set_filter("priceGte", "300", bounds)
            .unwrap();
        let crossed = state.set_filter("priceLte", "100", bounds).unwrap();
        assert_eq!(crossed.price.gte(), price(300.0));
        assert_eq!(crossed.price.lte(), price(300.0));
    }

    #[test]
    fn empty_price_clears_bound() {
        let bounds = PriceBounds::default();
        let state = FilterState::default()
            .set_price_range(10.0, 20.0, bounds)
            .set_filter("priceGte", "", bounds)
            .unwrap();
        assert_eq!(state.price.gte(), None);
        assert_eq!(state.price.lte(), price(20.0));
    }

    #[test]
    fn clear_all_is_idempotent() {
        let state = FilterState::default()
            .set_filter("color", "Red", PriceBounds::default())
            .unwrap();
        let once = state.apply(&FilterChange::ClearAll, PriceBounds::default()).unwrap();
        let twice = once.apply(&FilterChange::ClearAll, PriceBounds::default()).unwrap();
        assert_eq!(once, twice);
        assert!(once.is_default());
    }

    #[test]
    fn active_filters_describe_and_remove_each_filter() {
        let bounds = PriceBounds::default();
        let state = FilterState {
            gender: Gender::All,
            category: Selection::parse("Shirts"),
            is_on_sale: SaleFilter::OnSale,
            search: " linen ".to_string(),
            ..FilterState::default()
        }
        .set_price_range(0.0, 1_500.0, bounds);

        assert_eq!(state.active_filter_count(), 4);

        let chips = state.active_filters();
        let labels: Vec<_> = chips.iter().map(|chip| chip.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Gender: all",
                "Category: Shirts",
                "Sale: On Sale",
                "Search: linen",
                "Price: ₹0 - ₹1500",
            ]
        );

        let cleared = chips
            .iter()
            .try_fold(state, |acc, chip| acc.apply(&chip.remove, bounds))
            .unwrap();
        assert!(cleared.is_default());
    }
}
