//! Page cache behind the infinitely scrolling grid.
//!
//! Fetches are expressed as explicit request/response values: `begin_next`
//! hands out a [`FetchTicket`], the caller performs the request, and
//! `complete` applies the result. A ticket whose generation no longer
//! matches (after `reset` or `detach`) is discarded instead of mutating
//! state.

use marquee_model::Page;
use tracing::{debug, warn};

use crate::catalog::CatalogError;

/// Handle for one outstanding page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    page: u32,
    generation: u64,
}

impl FetchTicket {
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What `complete` did with a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Appended { page: u32, items: usize },
    Failed { page: u32, error: CatalogError },
    /// Result belonged to a stale ticket and was dropped.
    Discarded,
}

#[derive(Debug, Clone)]
pub struct PaginationCache<T> {
    pages: Vec<Page<T>>,
    next_page: Option<u32>,
    in_flight: Option<FetchTicket>,
    generation: u64,
    last_error: Option<String>,
}

impl<T> Default for PaginationCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PaginationCache<T> {
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            next_page: Some(1),
            in_flight: None,
            generation: 0,
            last_error: None,
        }
    }

    /// Claim the next page for fetching.
    ///
    /// Returns `None` when nothing is pending or a fetch is already in
    /// flight. The call is ignored in that case, never queued.
    pub fn begin_next(&mut self) -> Option<FetchTicket> {
        if let Some(ticket) = self.in_flight {
            debug!(page = ticket.page, "fetch already in flight, ignoring");
            return None;
        }
        let page = self.next_page?;
        let ticket = FetchTicket {
            page,
            generation: self.generation,
        };
        self.in_flight = Some(ticket);
        Some(ticket)
    }

    /// Apply the result of the request identified by `ticket`.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Page<T>, CatalogError>,
    ) -> Completion {
        if ticket.generation != self.generation
            || self.in_flight != Some(ticket)
        {
            warn!(
                page = ticket.page,
                ticket_generation = ticket.generation,
                generation = self.generation,
                "discarding stale page result"
            );
            return Completion::Discarded;
        }
        self.in_flight = None;

        let result = result.and_then(|page| {
            page.validate(ticket.page)?;
            Ok(page)
        });

        match result {
            Ok(page) => {
                let items = page.len();
                self.next_page = page.next_page_number();
                self.last_error = None;
                self.pages.push(page);
                debug!(
                    page = ticket.page,
                    items,
                    next = ?self.next_page,
                    "page appended"
                );
                Completion::Appended {
                    page: ticket.page,
                    items,
                }
            }
            Err(error) => {
                self.last_error = Some(error.message());
                Completion::Failed {
                    page: ticket.page,
                    error,
                }
            }
        }
    }

    /// Concatenation of every fetched page, in page order.
    pub fn flattened_items(&self) -> impl Iterator<Item = &T> + '_ {
        self.pages.iter().flat_map(|page| page.items().iter())
    }

    pub fn flattened_len(&self) -> usize {
        self.pages.iter().map(Page::len).sum()
    }

    pub fn has_next_page(&self) -> bool {
        self.next_page.is_some()
    }

    pub fn next_page(&self) -> Option<u32> {
        self.next_page
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Loading with nothing fetched yet.
    pub fn is_initial_load(&self) -> bool {
        self.is_loading() && self.pages.is_empty()
    }

    pub fn pages(&self) -> &[Page<T>] {
        &self.pages
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Drop everything and start over at page 1. Outstanding tickets go stale.
    pub fn reset(&mut self) {
        self.pages.clear();
        self.next_page = Some(1);
        self.in_flight = None;
        self.last_error = None;
        self.generation += 1;
    }

    /// Invalidate outstanding tickets without touching fetched pages.
    pub fn detach(&mut self) {
        self.in_flight = None;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(number: u32, items: usize, total_pages: u32) -> Page<u32> {
        let start = (number - 1) * 100;
        Page::new(
            number,
            (start..start + items as u32).collect(),
            total_pages,
            0,
        )
    }

    fn fetch(cache: &mut PaginationCache<u32>, items: usize, total: u32) {
        let ticket = cache.begin_next().expect("ticket");
        let number = ticket.page();
        cache.complete(ticket, Ok(page(number, items, total)));
    }

    #[test]
    fn sequential_fetches_preserve_order_and_counts() {
        let mut cache = PaginationCache::new();
        let sizes = [20, 0, 7, 20];
        for size in sizes {
            fetch(&mut cache, size, 4);
        }

        assert_eq!(cache.flattened_len(), sizes.iter().sum::<usize>());
        let numbers: Vec<u32> =
            cache.pages().iter().map(Page::page_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);

        let flattened: Vec<u32> = cache.flattened_items().copied().collect();
        let mut sorted = flattened.clone();
        sorted.sort_unstable();
        assert_eq!(flattened, sorted);
        assert!(!cache.has_next_page());
    }

    #[test]
    fn last_page_clears_next() {
        let mut cache = PaginationCache::new();
        fetch(&mut cache, 20, 1);
        assert!(!cache.has_next_page());
        assert!(cache.begin_next().is_none());
    }

    #[test]
    fn second_begin_while_in_flight_is_ignored() {
        let mut cache: PaginationCache<u32> = PaginationCache::new();
        let ticket = cache.begin_next().expect("ticket");
        assert!(cache.is_loading());
        assert!(cache.is_initial_load());
        assert!(cache.begin_next().is_none());

        cache.complete(ticket, Ok(page(1, 20, 3)));
        assert_eq!(cache.pages().len(), 1);
        assert_eq!(cache.next_page(), Some(2));
    }

    #[test]
    fn empty_intermediate_page_advances() {
        let mut cache = PaginationCache::new();
        fetch(&mut cache, 0, 3);
        assert_eq!(cache.next_page(), Some(2));
        assert_eq!(cache.flattened_len(), 0);
    }

    #[test]
    fn failure_keeps_next_page_for_explicit_retry() {
        let mut cache: PaginationCache<u32> = PaginationCache::new();
        let ticket = cache.begin_next().expect("ticket");
        let outcome =
            cache.complete(ticket, Err(CatalogError::transport("offline")));

        assert!(matches!(outcome, Completion::Failed { page: 1, .. }));
        assert!(!cache.is_loading());
        assert_eq!(cache.next_page(), Some(1));
        assert!(cache.last_error().is_some());

        let retry = cache.begin_next().expect("retry");
        cache.complete(retry, Ok(page(1, 5, 2)));
        assert!(cache.last_error().is_none());
    }

    #[test]
    fn mismatched_page_number_is_rejected() {
        let mut cache: PaginationCache<u32> = PaginationCache::new();
        let ticket = cache.begin_next().expect("ticket");
        let outcome = cache.complete(ticket, Ok(page(2, 20, 3)));

        assert!(matches!(outcome, Completion::Failed { page: 1, .. }));
        assert!(cache.pages().is_empty());
        assert_eq!(cache.next_page(), Some(1));
    }

    #[test]
    fn stale_ticket_after_reset_is_discarded() {
        let mut cache: PaginationCache<u32> = PaginationCache::new();
        let stale = cache.begin_next().expect("ticket");
        cache.reset();

        assert_eq!(
            cache.complete(stale, Ok(page(1, 20, 3))),
            Completion::Discarded
        );
        assert!(cache.pages().is_empty());

        let fresh = cache.begin_next().expect("ticket");
        assert_ne!(fresh.generation(), stale.generation());
    }

    #[test]
    fn detach_discards_late_completion_but_keeps_pages() {
        let mut cache = PaginationCache::new();
        fetch(&mut cache, 20, 3);
        let ticket = cache.begin_next().expect("ticket");
        cache.detach();

        assert_eq!(
            cache.complete(ticket, Ok(page(2, 20, 3))),
            Completion::Discarded
        );
        assert_eq!(cache.pages().len(), 1);
    }

    #[test]
    fn three_page_catalog_of_55_items() {
        let mut cache = PaginationCache::new();
        for size in [20, 20, 15] {
            fetch(&mut cache, size, 3);
        }
        assert_eq!(cache.flattened_len(), 55);
        assert_eq!(cache.flattened_items().count(), 55);
        assert!(!cache.has_next_page());
    }
}
