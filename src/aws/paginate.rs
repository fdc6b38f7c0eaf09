//! Lazy pagination over token-based AWS listings.
//!
//! [`Paginated`] turns a page-fetching closure into an iterator of items.
//! It is single-pass: once the last page is drained, a fetch fails, or the
//! item cap is reached, it stays exhausted.

use super::types::{EventQuery, LogsApi, Page};
use crate::utils::error::AwsError;
use log::debug;
use std::collections::VecDeque;

/// Where the paginator stands between pages
#[derive(Debug, Clone, PartialEq)]
pub enum PageState {
    /// No page fetched yet
    Start,
    /// More pages follow, starting at this token
    Next(String),
    /// Terminal; `next()` returns `None` from here on
    Exhausted,
}

/// Iterator over the items of a paginated listing
pub struct Paginated<T, F>
where
    F: FnMut(Option<String>) -> Result<Page<T>, AwsError>,
{
    fetch: F,
    buffer: VecDeque<T>,
    state: PageState,
    max_items: Option<usize>,
    yielded: usize,
    pages: usize,
    truncated: bool,
}

impl<T, F> Paginated<T, F>
where
    F: FnMut(Option<String>) -> Result<Page<T>, AwsError>,
{
    pub fn new(fetch: F) -> Self {
        Self {
            fetch,
            buffer: VecDeque::new(),
            state: PageState::Start,
            max_items: None,
            yielded: 0,
            pages: 0,
            truncated: false,
        }
    }

    /// Stop after `max_items` items, fetching no further pages
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = Some(max_items);
        self
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Number of pages fetched so far
    pub fn pages_fetched(&self) -> usize {
        self.pages
    }

    /// True once the cap cut the listing short, with items or pages left over
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    fn cap_reached(&self) -> bool {
        self.max_items.is_some_and(|max| self.yielded >= max)
    }
}

impl<T, F> Iterator for Paginated<T, F>
where
    F: FnMut(Option<String>) -> Result<Page<T>, AwsError>,
{
    type Item = Result<T, AwsError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.cap_reached() {
                if self.state != PageState::Exhausted || !self.buffer.is_empty() {
                    debug!("Item cap of {} reached after {} page(s)", self.yielded, self.pages);
                    self.truncated = true;
                    self.state = PageState::Exhausted;
                    self.buffer.clear();
                }
                return None;
            }

            if let Some(item) = self.buffer.pop_front() {
                self.yielded += 1;
                return Some(Ok(item));
            }

            let token = match std::mem::replace(&mut self.state, PageState::Exhausted) {
                PageState::Start => None,
                PageState::Next(token) => Some(token),
                PageState::Exhausted => return None,
            };

            // State stays Exhausted if the fetch fails
            let page = match (self.fetch)(token) {
                Ok(page) => page,
                Err(e) => return Some(Err(e)),
            };
            self.pages += 1;

            debug!(
                "Fetched page {} with {} item(s), more: {}",
                self.pages,
                page.items.len(),
                page.next_token.is_some()
            );

            if let Some(token) = page.next_token {
                self.state = PageState::Next(token);
            }
            self.buffer.extend(page.items);
        }
    }
}

/// Lazily list log group names under `prefix`
pub fn log_group_names<'a, L: LogsApi + ?Sized>(
    logs: &'a L,
    prefix: &'a str,
) -> impl Iterator<Item = Result<String, AwsError>> + 'a {
    Paginated::new(move |token| logs.describe_log_groups(prefix, token))
}

/// Lazily list event messages matching `query`, capped at `max_items`
///
/// The concrete [`Paginated`] is returned so callers can ask whether the
/// cap cut the listing short.
pub fn event_messages<'a, L: LogsApi + ?Sized>(
    logs: &'a L,
    query: &'a EventQuery,
    max_items: usize,
) -> Paginated<String, impl FnMut(Option<String>) -> Result<Page<String>, AwsError> + 'a> {
    Paginated::new(move |token| logs.filter_log_events(query, token)).with_max_items(max_items)
}
