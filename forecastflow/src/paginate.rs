//! Draining token-paginated list operations.

use std::future::Future;

use crate::api::Page;

/// Drains every page of a token-paginated list operation into one ordered
/// sequence.
///
/// `fetch` is called with `None` first and then with each continuation token
/// the service returns, until a page comes back without one. Relies on the
/// service keeping the listing stable for the duration of a single drain.
///
/// # Errors
///
/// Any error from `fetch` propagates unmodified; pages already collected are
/// discarded and nothing is retried here.
pub async fn drain_pages<T, E, F, Fut>(mut fetch: F) -> Result<Vec<T>, E>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    let mut items = Vec::new();
    let mut token: Option<String> = None;

    loop {
        let page = fetch(token.take()).await?;
        items.extend(page.items);
        match page.next_token {
            Some(next) => token = Some(next),
            None => break,
        }
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_single_page() {
        let items: Vec<u32> = drain_pages(|token| async move {
            assert!(token.is_none());
            Ok::<_, ApiError>(Page::last(vec![1, 2, 3]))
        })
        .await
        .unwrap();

        assert_eq!(items, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_follows_tokens_across_pages() {
        let calls = AtomicUsize::new(0);
        let items: Vec<u32> = drain_pages(|token| {
            let call = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                match call {
                    0 => {
                        assert!(token.is_none());
                        Ok::<_, ApiError>(Page {
                            items: vec![1, 2],
                            next_token: Some("t1".to_string()),
                        })
                    }
                    1 => {
                        assert_eq!(token.as_deref(), Some("t1"));
                        Ok(Page {
                            items: vec![3],
                            next_token: Some("t2".to_string()),
                        })
                    }
                    _ => {
                        assert_eq!(token.as_deref(), Some("t2"));
                        Ok(Page::last(vec![4, 5]))
                    }
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![1, 2, 3, 4, 5]);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_empty_listing() {
        let items: Vec<u32> =
            drain_pages(|_| async { Ok::<_, ApiError>(Page::last(Vec::new())) })
                .await
                .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_error_propagates_unmodified() {
        let err = drain_pages::<u32, _, _, _>(|_| async {
            Err(ApiError::Remote {
                message: "throttled".to_string(),
            })
        })
        .await
        .unwrap_err();

        assert_eq!(
            err,
            ApiError::Remote {
                message: "throttled".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_mid_drain_error_propagates() {
        let calls = AtomicUsize::new(0);
        let result: Result<Vec<u32>, ApiError> = drain_pages(|_| {
            let call = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if call == 0 {
                    Ok(Page {
                        items: vec![1],
                        next_token: Some("t1".to_string()),
                    })
                } else {
                    Err(ApiError::Remote {
                        message: "boom".to_string(),
                    })
                }
            }
        })
        .await;

        assert!(result.is_err());
    }
}
