//! An interactive product-list session driving the store against a catalog.

use std::time::Duration;

use crate::domain::filter::{FilterChange, FilterKey};
use crate::repository::CatalogReader;
use crate::services::ServiceResult;
use crate::services::filter_options::load_filter_options;
use crate::services::products::execute;
use crate::store::debounce::SearchInput;
use crate::store::sidebar::{FilterSidebar, SidebarEvent, SidebarModel};
use crate::store::{CatalogStore, FetchTicket};

/// Owns the store, the sidebar and the search box of one product list.
///
/// Every fetch is awaited before the next gesture is handled, so the
/// session never has more than one request in flight.
pub struct CatalogSession<R> {
    repo: R,
    store: CatalogStore,
    sidebar: FilterSidebar,
    search: SearchInput,
}

impl<R: CatalogReader> CatalogSession<R> {
    /// Mounts the page at `query`, loads the filter options and the first
    /// page of products.
    pub async fn open(repo: R, query: &str, page_size: usize, debounce: Duration) -> Self {
        let (store, ticket) = CatalogStore::mount_with(query, page_size);
        let sidebar = FilterSidebar::new(store.filters(), store.bounds());
        let search = SearchInput::new(&store.filters().search, debounce);
        let mut session = Self {
            repo,
            store,
            sidebar,
            search,
        };

        let options = load_filter_options(&session.repo).await;
        session.store.set_options(options);
        session.run(ticket).await;
        session
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut CatalogStore {
        &mut self.store
    }

    pub fn search_draft(&self) -> &str {
        self.search.draft()
    }

    pub fn sidebar(&self) -> SidebarModel {
        self.sidebar
            .model(self.store.filters(), self.store.options(), self.store.bounds())
    }

    /// Handles a sidebar gesture. Returns whether a fetch was made.
    pub async fn sidebar_event(&mut self, event: SidebarEvent) -> ServiceResult<bool> {
        let Some(change) = self
            .sidebar
            .handle(event, self.store.filters(), self.store.bounds())
        else {
            return Ok(false);
        };

        if change == FilterChange::ClearAll {
            self.search.reset("");
        }
        let ticket = self.store.apply_change(&change)?;
        self.run(ticket).await;
        Ok(true)
    }

    pub async fn set_filter(&mut self, key: &str, value: &str) -> ServiceResult<()> {
        let ticket = self.store.set_filter(key, value)?;
        if key == FilterKey::Search.as_str() {
            self.search.reset(&self.store.filters().search);
        }
        self.run(ticket).await;
        Ok(())
    }

    pub async fn clear_all(&mut self) {
        self.search.reset("");
        self.sidebar
            .handle(SidebarEvent::ClearAll, self.store.filters(), self.store.bounds());
        let ticket = self.store.clear_all();
        self.run(ticket).await;
    }

    /// Records a keystroke in the search box. Nothing is fetched until the
    /// input settles.
    pub fn type_search(&mut self, text: &str) {
        self.search.on_input(text);
    }

    /// Waits for pending search input to settle and commits it. Returns
    /// whether a fetch was made.
    pub async fn settle_search(&mut self) -> ServiceResult<bool> {
        let Some(text) = self.search.settle().await else {
            return Ok(false);
        };
        if text == self.store.filters().search {
            return Ok(false);
        }
        let ticket = self.store.set_filter(FilterKey::Search.as_str(), &text)?;
        self.run(ticket).await;
        Ok(true)
    }

    pub async fn next_page(&mut self) -> bool {
        match self.store.next_page() {
            Some(ticket) => {
                self.run(ticket).await;
                true
            }
            None => false,
        }
    }

    pub async fn previous_page(&mut self) -> bool {
        match self.store.previous_page() {
            Some(ticket) => {
                self.run(ticket).await;
                true
            }
            None => false,
        }
    }

    async fn run(&mut self, ticket: FetchTicket) {
        let outcome = execute(&self.repo, &ticket).await;
        self.store.apply_response(outcome);
        self.sidebar
            .observe(self.store.filters(), self.store.bounds());
    }
}
