//! Producer stage: walks the paginated issue search for one author.

use std::sync::Arc;

use async_channel::Sender;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::github::{PageRequest, SearchGateway, SearchMatch, SearchQuery, StatsError};

/// Pushes every match of `query` onto `output`, page by page.
///
/// Returns the number of matches queued. Production ends when a page has no
/// `next` link, when the consumers have gone away, or when `cancel` fires.
/// A search error is returned as soon as it occurs, without requesting
/// further pages. `output` is dropped on every return path, which closes the
/// queue for the enrichment workers.
pub(super) async fn run_search<G>(
    gateway: Arc<G>,
    query: SearchQuery,
    first_page: PageRequest,
    output: Sender<SearchMatch>,
    cancel: CancellationToken,
) -> Result<usize, StatsError>
where
    G: SearchGateway + ?Sized,
{
    let mut page = first_page;
    let mut matched = 0_usize;

    loop {
        if cancel.is_cancelled() {
            return Ok(matched);
        }

        let search_page = tokio::select! {
            biased;
            () = cancel.cancelled() => return Ok(matched),
            result = gateway.search_issues(&query, page) => result?,
        };

        debug!(
            author = query.author(),
            page = search_page.page_info.current_page(),
            per_page = search_page.page_info.per_page(),
            total_pages = ?search_page.page_info.total_pages(),
            items = search_page.items.len(),
            has_next = search_page.page_info.has_next(),
            "search page received"
        );

        for search_match in search_page.items {
            let sent = tokio::select! {
                biased;
                () = cancel.cancelled() => return Ok(matched),
                sent = output.send(search_match) => sent,
            };
            if sent.is_err() {
                return Ok(matched);
            }
            matched += 1;
        }

        if !search_page.page_info.has_next() {
            return Ok(matched);
        }
        page = page.next();
    }
}
