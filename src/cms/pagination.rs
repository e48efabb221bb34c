//! Follow-next-page aggregation over CMS collection endpoints.

use serde_json::Value;
use tracing::debug;

use super::client::CmsClient;
use super::error::CmsError;

/// Hard cap on pages fetched per listing call.
pub const MAX_PAGES: u32 = 20;

/// Items requested per page.
pub const PAGE_SIZE: u32 = 50;

/// Fetch every page of a collection, concatenating the `data` arrays in
/// order.
///
/// Stops when the upstream reports no `links.next`, when a page comes back
/// empty, or after [`MAX_PAGES`] pages. Any page failing aborts the whole
/// aggregation with that error; partial results are discarded.
pub async fn list_all(
    client: &CmsClient,
    path: &str,
    filters: &[(String, String)],
) -> Result<Vec<Value>, CmsError> {
    let mut items = Vec::new();

    for page_number in 1..=MAX_PAGES {
        let mut query: Vec<(String, String)> = filters.to_vec();
        query.push(("page[number]".to_string(), page_number.to_string()));
        query.push(("page[size]".to_string(), PAGE_SIZE.to_string()));

        let page = client.get(path, &query).await?;

        let page_items = match page.body.get("data").and_then(Value::as_array) {
            Some(data) => data.clone(),
            None => Vec::new(),
        };

        if page_items.is_empty() {
            break;
        }

        items.extend(page_items);

        if page.next.is_none() {
            break;
        }
    }

    debug!("Aggregated {} items from {}", items.len(), path);
    Ok(items)
}
