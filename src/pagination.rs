//! Offset/limit pagination.
//!
//! Kaiten list endpoints take `offset` and `limit` query parameters and return
//! a plain array. A [`Page`] pairs that array with the window it was fetched
//! for; a page holding exactly `limit` items may have a successor.
//!
//! [`paginate`] walks the pages as one stream of items:
//!
//! ```rust
//! use futures::TryStreamExt;
//! use kaiten::pagination::{Page, paginate};
//!
//! # async fn example() -> Result<(), kaiten::Error> {
//! let numbers: Vec<u32> = (0..7).collect();
//! let stream = paginate(3, |offset, limit| {
//!     let items = numbers.iter().copied().skip(offset as usize).take(limit as usize).collect();
//!     async move { Ok(Page::new(items, offset, limit)) }
//! });
//!
//! let all: Vec<u32> = stream.try_collect().await?;
//! assert_eq!(all, (0..7).collect::<Vec<_>>());
//! # Ok(())
//! # }
//! ```
//!
//! Pages are fetched one at a time and only when the consumer asks for more
//! items. The first failing page ends the stream with that error; it is not
//! retried here because the request layer already retried it.

use std::future::Future;

use futures::{Stream, TryStreamExt, stream};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Page size used by the `all()` helpers.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// One window of a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// The offset this page was fetched at.
    pub offset: u32,
    /// The limit this page was fetched with.
    pub limit: u32,
}

impl<T> Page<T> {
    /// Creates a page.
    pub fn new(items: Vec<T>, offset: u32, limit: u32) -> Self {
        Self { items, offset, limit }
    }

    /// Returns `true` if the page is full, so another page may follow.
    pub fn has_more(&self) -> bool {
        self.items.len() == self.limit as usize
    }

    /// Returns `true` if this page is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Streams every item from consecutive pages of `page_size`.
///
/// `fetch(offset, limit)` is called with offsets `0, page_size,
/// 2 × page_size, …` until a page is not full or an error occurs. A
/// `page_size` of 0 is treated as 1.
pub fn paginate<T, F, Fut>(page_size: u32, fetch: F) -> impl Stream<Item = Result<T, Error>>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<Page<T>, Error>>,
{
    let page_size = page_size.max(1);
    stream::try_unfold((fetch, Some(0u32)), move |(mut fetch, offset)| async move {
        let Some(offset) = offset else {
            return Ok(None);
        };
        let page = fetch(offset, page_size).await?;
        tracing::trace!(offset, items = page.len(), "fetched page");
        let next = if page.has_more() { offset.checked_add(page_size) } else { None };
        let items = stream::iter(page.items.into_iter().map(Ok::<T, Error>));
        Ok::<_, Error>(Some((items, (fetch, next))))
    })
    .try_flatten()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use futures::StreamExt;
    use parking_lot::Mutex;

    use super::*;
    use crate::ErrorKind;

    fn source(total: u32) -> impl FnMut(u32, u32) -> futures::future::Ready<Result<Page<u32>, Error>> {
        move |offset, limit| {
            let items = (offset..total.min(offset.saturating_add(limit))).collect();
            futures::future::ready(Ok(Page::new(items, offset, limit)))
        }
    }

    #[test]
    fn test_has_more() {
        assert!(Page::new(vec![1, 2], 0, 2).has_more());
        assert!(!Page::new(vec![1], 0, 2).has_more());
        assert!(!Page::<u8>::new(vec![], 0, 2).has_more());
    }

    #[tokio::test]
    async fn test_collects_across_pages() {
        let all: Vec<u32> = paginate(10, source(25)).try_collect().await.unwrap();
        assert_eq!(all, (0..25).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_exact_multiple_fetches_trailing_empty_page() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let log = calls.clone();
        let mut inner = source(20);
        let all: Vec<u32> = paginate(10, move |offset, limit| {
            log.lock().push(offset);
            inner(offset, limit)
        })
        .try_collect()
        .await
        .unwrap();

        assert_eq!(all.len(), 20);
        assert_eq!(*calls.lock(), vec![0, 10, 20]);
    }

    #[tokio::test]
    async fn test_zero_page_size_is_one() {
        let all: Vec<u32> = paginate(0, source(3)).try_collect().await.unwrap();
        assert_eq!(all, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_stops_at_first_error() {
        let calls = Arc::new(Mutex::new(0));
        let counter = calls.clone();
        let stream = paginate(2, move |offset, limit| {
            *counter.lock() += 1;
            let result = if offset == 0 {
                Ok(Page::new(vec![1, 2], offset, limit))
            } else {
                Err(Error::ServerError { status_code: 503, body: None })
            };
            futures::future::ready(result)
        });

        let results: Vec<Result<i32, Error>> = stream.collect().await;
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap(), &1);
        assert_eq!(results[1].as_ref().unwrap(), &2);
        assert_eq!(results[2].as_ref().unwrap_err().kind(), ErrorKind::ServerError);
        assert_eq!(*calls.lock(), 2);
    }

    #[tokio::test]
    async fn test_lazy_fetching() {
        let calls = Arc::new(Mutex::new(0));
        let counter = calls.clone();
        let mut inner = source(100);
        let stream = paginate(5, move |offset, limit| {
            *counter.lock() += 1;
            inner(offset, limit)
        });

        let first: Vec<_> = stream.take(3).collect().await;
        assert_eq!(first.len(), 3);
        assert_eq!(*calls.lock(), 1);
    }

    #[tokio::test]
    async fn test_offset_overflow_ends_stream() {
        let offsets = Arc::new(Mutex::new(Vec::new()));
        let log = offsets.clone();
        // Every page claims to be full, so only overflow can stop the walk.
        let stream = paginate(u32::MAX, move |offset, _| {
            log.lock().push(offset);
            futures::future::ready(Ok(Page { items: vec![offset], offset, limit: 1 }))
        });
        let all: Vec<u32> = stream.try_collect().await.unwrap();
        assert_eq!(all, vec![0, u32::MAX]);
        assert_eq!(*offsets.lock(), vec![0, u32::MAX]);
    }
}
