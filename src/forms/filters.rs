//! URL query codec for [`FilterState`].
//!
//! Parameter names are exactly the filter field names. Only fields that
//! differ from their defaults are written, and parsing is lenient: unknown
//! keys are ignored, unparseable values fall back to defaults and a repeated
//! key resolves to its last occurrence.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::filter::{
    FilterKey, FilterState, Gender, MAX_SEARCH_LENGTH, PriceRange, Selection, SortOrder,
};
use crate::domain::price::PriceBounds;
use crate::domain::types::Price;
use crate::forms::FormError;

/// Raw query parameters of the product list page.
///
/// Every field collects all occurrences of its key.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FilterQueryForm {
    #[serde(default)]
    pub gender: Vec<String>,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub color: Vec<String>,
    #[serde(default)]
    pub is_on_sale: Vec<String>,
    #[serde(default)]
    pub price_gte: Vec<String>,
    #[serde(default)]
    pub price_lte: Vec<String>,
    #[serde(default)]
    pub sort: Vec<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_search"))]
    pub search: Vec<String>,
    #[serde(default)]
    pub page: Vec<String>,
}

fn validate_search(values: &[String]) -> Result<(), ValidationError> {
    if values
        .iter()
        .all(|value| value.chars().count() <= MAX_SEARCH_LENGTH)
    {
        Ok(())
    } else {
        Err(ValidationError::new("search_too_long"))
    }
}

fn last(values: &[String]) -> Option<&str> {
    values.last().map(String::as_str)
}

impl FilterQueryForm {
    /// Parses a query string, with or without its leading `?`.
    pub fn parse(query: &str) -> Result<Self, FormError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        serde_html_form::from_str(query).map_err(|err| FormError::Malformed(err.to_string()))
    }

    /// Requested page, `1` when missing, zero or unparseable.
    pub fn page(&self) -> usize {
        last(&self.page)
            .and_then(|page| page.trim().parse::<usize>().ok())
            .filter(|page| *page > 0)
            .unwrap_or(1)
    }

    /// Converts the raw parameters into a filter state.
    pub fn into_state(mut self) -> FilterState {
        if let Err(err) = self.validate() {
            log::warn!("Dropping invalid search parameter: {err}");
            self.search.clear();
        }

        let gte = last(&self.price_gte).and_then(|value| value.parse::<Price>().ok());
        let lte = last(&self.price_lte).and_then(|value| value.parse::<Price>().ok());

        FilterState {
            gender: last(&self.gender)
                .and_then(|value| value.parse().ok())
                .unwrap_or_default(),
            category: last(&self.category).map(Selection::parse).unwrap_or_default(),
            color: last(&self.color).map(Selection::parse).unwrap_or_default(),
            is_on_sale: last(&self.is_on_sale)
                .and_then(|value| value.parse().ok())
                .unwrap_or_default(),
            price: PriceRange::new(gte, lte),
            sort: last(&self.sort)
                .and_then(|value| value.parse().ok())
                .unwrap_or_default(),
            search: last(&self.search).unwrap_or_default().to_string(),
        }
    }
}

/// Form naming a single filter change, e.g. `?key=category&value=Shirts`.
#[derive(Debug, Deserialize)]
pub struct ChangeFilterForm {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

impl ChangeFilterForm {
    pub fn parse(query: &str) -> Result<Self, FormError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        serde_html_form::from_str(query).map_err(|err| FormError::Malformed(err.to_string()))
    }
}

/// Serialized shape of a [`FilterState`]; `None` fields are omitted.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct FilterQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    gender: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_on_sale: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price_gte: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price_lte: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
}

impl<'a> From<&'a FilterState> for FilterQuery<'a> {
    fn from(state: &'a FilterState) -> Self {
        Self {
            gender: (state.gender != Gender::default()).then(|| state.gender.as_str()),
            category: state.category.token().map(|token| token.as_str()),
            color: state.color.token().map(|token| token.as_str()),
            is_on_sale: state.is_on_sale.as_flag().map(|_| state.is_on_sale.as_str()),
            price_gte: state.price.gte().map(|price| price.to_string()),
            price_lte: state.price.lte().map(|price| price.to_string()),
            sort: (state.sort != SortOrder::default()).then(|| state.sort.as_str()),
            search: (!state.search.is_empty()).then_some(state.search.as_str()),
        }
    }
}

impl FilterState {
    /// Rebuilds a filter state from a URL query string. Absent parameters
    /// take their defaults and unknown parameters are ignored.
    pub fn from_url(query: &str) -> Self {
        match FilterQueryForm::parse(query) {
            Ok(form) => form.into_state(),
            Err(err) => {
                log::warn!("Ignoring malformed filter query `{query}`: {err}");
                Self::default()
            }
        }
    }

    /// Writes the non-default fields as a URL query string (without `?`).
    /// The default state yields an empty string.
    pub fn to_url(&self) -> String {
        serde_html_form::to_string(FilterQuery::from(self)).unwrap_or_else(|err| {
            log::error!("Failed to encode filter query: {err}");
            String::new()
        })
    }

    /// Query string of the state obtained by applying `key=value`, used for
    /// plain links that toggle one filter. Catalog bounds are not known
    /// here, so prices are only kept non-negative and ordered.
    pub fn url_with(&self, key: FilterKey, value: &str) -> Option<String> {
        self.set(key, value, PriceBounds::UNBOUNDED)
            .ok()
            .map(|next| next.to_url())
    }
}
