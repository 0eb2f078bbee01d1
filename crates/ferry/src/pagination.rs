//! Fetch every page of a paginated list call.

use std::future::Future;

use crate::platform;

/// Page size requested from list endpoints (the maximum trackers allow).
pub const PAGE_SIZE: u8 = 100;

/// Call `fetch_page(page, PAGE_SIZE)` for pages 1, 2, 3, ... and concatenate
/// the results in order, stopping at the first empty page.
///
/// There is no page cap: a remote that keeps returning the same non-empty
/// page never terminates.
///
/// # Example
///
/// ```ignore
/// let labels = fetch_all_pages(|page, per_page| tracker.list_labels(&repo, page, per_page)).await?;
/// ```
pub async fn fetch_all_pages<T, F, Fut>(mut fetch_page: F) -> platform::Result<Vec<T>>
where
    F: FnMut(u32, u8) -> Fut,
    Fut: Future<Output = platform::Result<Vec<T>>>,
{
    let mut items = Vec::new();
    let mut page = 1u32;

    loop {
        let batch = fetch_page(page, PAGE_SIZE).await?;
        if batch.is_empty() {
            break;
        }

        tracing::trace!(page, count = batch.len(), total_so_far = items.len() + batch.len(), "Fetched page");
        items.extend(batch);
        page += 1;
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::platform::TrackerError;

    #[tokio::test]
    async fn accumulates_pages_in_order_until_empty() {
        let requested = Mutex::new(Vec::new());
        let items = fetch_all_pages(|page, per_page| {
            requested.lock().unwrap().push((page, per_page));
            async move {
                Ok(match page {
                    1 => (0..100).collect::<Vec<u32>>(),
                    2 => (100..200).collect(),
                    3 => (200..250).collect(),
                    _ => vec![],
                })
            }
        })
        .await
        .unwrap();

        assert_eq!(items.len(), 250);
        assert_eq!(items, (0..250).collect::<Vec<u32>>());
        assert_eq!(
            *requested.lock().unwrap(),
            vec![(1, 100), (2, 100), (3, 100), (4, 100)]
        );
    }

    #[tokio::test]
    async fn empty_first_page_yields_nothing() {
        let mut calls = 0;
        let items: Vec<String> = fetch_all_pages(|_, _| {
            calls += 1;
            async { Ok(vec![]) }
        })
        .await
        .unwrap();

        assert!(items.is_empty());
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn errors_abort_the_walk() {
        let result: platform::Result<Vec<u8>> = fetch_all_pages(|page, _| async move {
            if page == 1 {
                Ok(vec![1])
            } else {
                Err(TrackerError::network("connection reset"))
            }
        })
        .await;

        assert!(matches!(result, Err(TrackerError::Network { .. })));
    }
}
