//! Filter sidebar: turns user gestures into [`FilterChange`]s.
//!
//! The sidebar owns nothing but the uncommitted [`PriceDraft`]; everything
//! else is read from the [`FilterState`] it is handed.

use serde::Serialize;

use crate::domain::filter::{FilterChange, FilterKey, FilterState, Gender, PriceRange, SaleFilter, SortOrder};
use crate::domain::price::{PriceBounds, PriceDraft};
use crate::domain::product::FilterOptions;
use crate::domain::types::ALL;

#[derive(Clone, Debug, PartialEq)]
pub enum SidebarEvent {
    PickGender(Gender),
    /// Selects a category, or clears it when it is already selected.
    ToggleCategory(String),
    /// Selects a color, or clears it when it is already selected.
    ToggleColor(String),
    PickSale(SaleFilter),
    /// Moves the price slider. Only the draft changes.
    EditPrice { low: f64, high: f64 },
    /// Types into the minimum price input. Only the draft changes and the
    /// maximum stays put.
    EditMinPrice(String),
    /// Types into the maximum price input. Only the draft changes and the
    /// minimum stays put.
    EditMaxPrice(String),
    ApplyPrice,
    ResetPrice,
    ClearAll,
}

#[derive(Debug)]
pub struct FilterSidebar {
    draft: PriceDraft,
    observed: (PriceRange, PriceBounds),
}

impl FilterSidebar {
    pub fn new(filters: &FilterState, bounds: PriceBounds) -> Self {
        Self {
            draft: PriceDraft::from_committed(&filters.price, bounds),
            observed: (filters.price, bounds),
        }
    }

    pub fn draft(&self) -> PriceDraft {
        self.draft
    }

    /// Re-seeds the draft when the committed price range or the catalog
    /// bounds changed since the last call. Returns whether it did.
    pub fn observe(&mut self, filters: &FilterState, bounds: PriceBounds) -> bool {
        if self.observed == (filters.price, bounds) {
            return false;
        }
        self.draft = PriceDraft::from_committed(&filters.price, bounds);
        self.observed = (filters.price, bounds);
        true
    }

    /// Handles one gesture, returning the change to commit, if any.
    pub fn handle(
        &mut self,
        event: SidebarEvent,
        filters: &FilterState,
        bounds: PriceBounds,
    ) -> Option<FilterChange> {
        match event {
            SidebarEvent::PickGender(gender) => {
                Some(FilterChange::set(FilterKey::Gender, gender.as_str()))
            }
            SidebarEvent::ToggleCategory(name) => {
                let value = if filters.category.is(name.trim()) { ALL } else { name.as_str() };
                Some(FilterChange::set(FilterKey::Category, value))
            }
            SidebarEvent::ToggleColor(name) => {
                let value = if filters.color.is(name.trim()) { ALL } else { name.as_str() };
                Some(FilterChange::set(FilterKey::Color, value))
            }
            SidebarEvent::PickSale(sale) => {
                Some(FilterChange::set(FilterKey::IsOnSale, sale.as_str()))
            }
            SidebarEvent::EditPrice { low, high } => {
                self.draft.set(low, high, bounds);
                None
            }
            SidebarEvent::EditMinPrice(text) => {
                self.draft.set_low_input(&text, bounds);
                None
            }
            SidebarEvent::EditMaxPrice(text) => {
                self.draft.set_high_input(&text, bounds);
                None
            }
            SidebarEvent::ApplyPrice => Some(FilterChange::PriceRange {
                gte: self.draft.low(),
                lte: self.draft.high(),
            }),
            SidebarEvent::ResetPrice => {
                self.draft.reset(bounds);
                Some(FilterChange::PriceRange {
                    gte: bounds.min,
                    lte: bounds.max,
                })
            }
            SidebarEvent::ClearAll => {
                self.draft.reset(bounds);
                Some(FilterChange::ClearAll)
            }
        }
    }

    /// Builds the view model of the sidebar.
    pub fn model(
        &self,
        filters: &FilterState,
        options: &FilterOptions,
        bounds: PriceBounds,
    ) -> SidebarModel {
        let genders = [Gender::All, Gender::Men]
            .into_iter()
            .map(|gender| {
                let label = match gender {
                    Gender::All => "All",
                    Gender::Men => "Men",
                };
                SidebarOption::new(gender.as_str(), label, filters.gender == gender)
            })
            .collect();

        let categories = std::iter::once(SidebarOption::new(
            ALL,
            "All Categories",
            filters.category.is_all(),
        ))
        .chain(options.categories.iter().map(|category| {
            SidebarOption::new(
                &category.name,
                &category.name,
                filters.category.is(&category.name),
            )
        }))
        .collect();

        let colors = std::iter::once(SidebarOption::new(ALL, "All Colors", filters.color.is_all()))
            .chain(options.colors.iter().map(|color| SidebarOption {
                swatch: Some(color.hex_code.clone()),
                ..SidebarOption::new(&color.name, &color.name, filters.color.is(&color.name))
            }))
            .collect();

        let sale = [SaleFilter::All, SaleFilter::OnSale, SaleFilter::Regular]
            .into_iter()
            .map(|sale| SidebarOption::new(sale.as_str(), sale.label(), filters.is_on_sale == sale))
            .collect();

        let sort = SortOrder::ALL
            .into_iter()
            .map(|order| SidebarOption::new(order.as_str(), order.label(), filters.sort == order))
            .collect();

        SidebarModel {
            active_filter_count: filters.active_filter_count(),
            can_clear: filters.has_active_filters(),
            genders,
            categories,
            colors,
            sale,
            sort,
            price: self.draft,
            bounds,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SidebarOption {
    pub value: String,
    pub label: String,
    pub checked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swatch: Option<String>,
}

impl SidebarOption {
    fn new(value: &str, label: &str, checked: bool) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            checked,
            swatch: None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarModel {
    pub active_filter_count: usize,
    pub can_clear: bool,
    pub genders: Vec<SidebarOption>,
    pub categories: Vec<SidebarOption>,
    pub colors: Vec<SidebarOption>,
    pub sale: Vec<SidebarOption>,
    pub sort: Vec<SidebarOption>,
    pub price: PriceDraft,
    pub bounds: PriceBounds,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::Selection;
    use crate::domain::product::{Category, Color};

    fn options() -> FilterOptions {
        FilterOptions {
            categories: vec![
                Category {
                    id: "c1".to_string(),
                    name: "Shirts".to_string(),
                    gender: Some("men".to_string()),
                },
                Category {
                    id: "c2".to_string(),
                    name: "Jeans".to_string(),
                    gender: None,
                },
            ],
            colors: vec![Color {
                id: "k1".to_string(),
                name: "Navy".to_string(),
                hex_code: "#000080".to_string(),
            }],
        }
    }

    #[test]
    fn toggling_selected_category_clears_it() {
        let bounds = PriceBounds::default();
        let mut sidebar = FilterSidebar::new(&FilterState::default(), bounds);

        let pick = sidebar.handle(
            SidebarEvent::ToggleCategory("Shirts".to_string()),
            &FilterState::default(),
            bounds,
        );
        assert_eq!(pick, Some(FilterChange::set(FilterKey::Category, "Shirts")));

        let selected = FilterState {
            category: Selection::parse("Shirts"),
            ..FilterState::default()
        };
        let unpick = sidebar.handle(
            SidebarEvent::ToggleCategory("Shirts".to_string()),
            &selected,
            bounds,
        );
        assert_eq!(unpick, Some(FilterChange::set(FilterKey::Category, "all")));
    }

    #[test]
    fn price_edits_stay_in_draft_until_applied() {
        let bounds = PriceBounds::new(0.0, 1_000.0);
        let filters = FilterState::default();
        let mut sidebar = FilterSidebar::new(&filters, bounds);

        let change = sidebar.handle(SidebarEvent::EditPrice { low: 800.0, high: 200.0 }, &filters, bounds);
        assert_eq!(change, None);
        assert_eq!((sidebar.draft().low(), sidebar.draft().high()), (800.0, 800.0));

        let change = sidebar.handle(SidebarEvent::EditMinPrice("900".to_string()), &filters, bounds);
        assert_eq!(change, None);
        assert_eq!((sidebar.draft().low(), sidebar.draft().high()), (800.0, 800.0));

        sidebar.handle(SidebarEvent::EditMinPrice("50".to_string()), &filters, bounds);
        sidebar.handle(SidebarEvent::EditMaxPrice("oops".to_string()), &filters, bounds);
        assert_eq!((sidebar.draft().low(), sidebar.draft().high()), (50.0, 1_000.0));

        let change = sidebar.handle(SidebarEvent::ApplyPrice, &filters, bounds);
        assert_eq!(change, Some(FilterChange::PriceRange { gte: 50.0, lte: 1_000.0 }));
    }

    #[test]
    fn reset_price_commits_full_bounds() {
        let bounds = PriceBounds::new(10.0, 90.0);
        let filters = FilterState::default().set_price_range(20.0, 30.0, bounds);
        let mut sidebar = FilterSidebar::new(&filters, bounds);

        let change = sidebar.handle(SidebarEvent::ResetPrice, &filters, bounds);
        assert_eq!(change, Some(FilterChange::PriceRange { gte: 10.0, lte: 90.0 }));
        assert_eq!((sidebar.draft().low(), sidebar.draft().high()), (10.0, 90.0));
    }

    #[test]
    fn draft_resyncs_when_committed_price_changes() {
        let bounds = PriceBounds::default();
        let filters = FilterState::default();
        let mut sidebar = FilterSidebar::new(&filters, bounds);
        sidebar.handle(SidebarEvent::EditPrice { low: 5.0, high: 6.0 }, &filters, bounds);

        assert!(!sidebar.observe(&filters, bounds));
        assert_eq!(sidebar.draft().low(), 5.0);

        let committed = filters.set_price_range(100.0, 200.0, bounds);
        assert!(sidebar.observe(&committed, bounds));
        assert_eq!((sidebar.draft().low(), sidebar.draft().high()), (100.0, 200.0));

        let narrower = PriceBounds::new(150.0, 180.0);
        assert!(sidebar.observe(&committed, narrower));
        assert_eq!((sidebar.draft().low(), sidebar.draft().high()), (150.0, 180.0));
    }

    #[test]
    fn clear_all_resets_draft() {
        let bounds = PriceBounds::default();
        let filters = FilterState::default();
        let mut sidebar = FilterSidebar::new(&filters, bounds);
        sidebar.handle(SidebarEvent::EditPrice { low: 5.0, high: 6.0 }, &filters, bounds);

        let change = sidebar.handle(SidebarEvent::ClearAll, &filters, bounds);
        assert_eq!(change, Some(FilterChange::ClearAll));
        assert_eq!(sidebar.draft(), PriceDraft::full(bounds));
    }

    #[test]
    fn model_marks_checked_options() {
        let bounds = PriceBounds::default();
        let filters = FilterState {
            color: Selection::parse("Navy"),
            is_on_sale: SaleFilter::OnSale,
            ..FilterState::default()
        };
        let sidebar = FilterSidebar::new(&filters, bounds);
        let model = sidebar.model(&filters, &options(), bounds);

        assert_eq!(model.active_filter_count, 2);
        assert!(model.can_clear);
        assert!(model.genders.iter().any(|o| o.value == "men" && o.checked));
        assert_eq!(model.categories.len(), 3);
        assert!(model.categories[0].checked);
        let navy = model.colors.iter().find(|o| o.value == "Navy").unwrap();
        assert!(navy.checked);
        assert_eq!(navy.swatch.as_deref(), Some("#000080"));
        assert!(model.sale.iter().any(|o| o.value == "true" && o.checked));
        assert_eq!(model.sort.len(), 7);
        assert!(model.sort[0].checked);
    }
}
