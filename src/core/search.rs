//! Streaming delivery of search results.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::stream::{BoxStream, Stream, StreamExt};
use serde_json::Value;

use crate::error::DatabankResult;

/// A stream of documents matching a search.
///
/// Yields each matching document as the underlying cursor produces it, in
/// cursor order (store-defined, not otherwise guaranteed). The stream is
/// finite and forward-only; once exhausted it cannot be restarted. There
/// is no backpressure control beyond the stream's own laziness — every
/// matching document is delivered, however many there are.
pub struct SearchStream {
    inner: BoxStream<'static, DatabankResult<Value>>,
}

impl SearchStream {
    pub(crate) fn new(inner: BoxStream<'static, DatabankResult<Value>>) -> Self {
        Self { inner }
    }

    /// Delivers every matching document to `on_result`, then resolves.
    ///
    /// Each document is delivered exactly once, in cursor order. When the
    /// cursor yields a per-item error instead of a document, the error is
    /// remembered (last one wins, not accumulated) and nothing is
    /// delivered for that item. The future resolves only after the cursor
    /// is fully exhausted: `Ok(())` when no per-item error occurred, the
    /// remembered error otherwise.
    pub async fn drain<F>(mut self, mut on_result: F) -> DatabankResult<()>
    where
        F: FnMut(Value),
    {
        let mut last_err = None;
        while let Some(item) = self.inner.next().await {
            match item {
                Ok(value) => on_result(value),
                Err(err) => last_err = Some(err),
            }
        }
        match last_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Collects every matching document into a vector.
    ///
    /// Same contract as [`drain`](Self::drain): resolves after
    /// exhaustion, failing with the last per-item error if any occurred.
    pub async fn into_vec(self) -> DatabankResult<Vec<Value>> {
        let mut documents = Vec::new();
        self.drain(|value| documents.push(value)).await?;
        Ok(documents)
    }
}

impl Stream for SearchStream {
    type Item = DatabankResult<Value>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

impl std::fmt::Debug for SearchStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchStream").finish_non_exhaustive()
    }
}
