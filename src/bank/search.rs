//! Criteria search over a kind's collection.

use futures_util::StreamExt;
use serde_json::Value;

use crate::core::search::SearchStream;
use crate::core::{StoreClient, StoreCollection, StoreSession};
use crate::error::{DatabankError, DatabankResult};

use super::DocumentBank;

impl<C: StoreClient> DocumentBank<C> {
    /// Issues an exact-match query and wraps the store cursor for
    /// streaming delivery.
    ///
    /// The criteria document is a field→value equality conjunction; range
    /// and regex operators belong to the store's native query surface and
    /// are not interpreted here.
    pub(super) async fn search_stream(
        &self,
        kind: &str,
        criteria: Value,
    ) -> DatabankResult<SearchStream> {
        let state = self.require_session().await?;
        if !criteria.is_object() {
            return Err(DatabankError::NotAnObject {
                what: "search criteria".to_string(),
            });
        }
        let collection = state.session.collection(kind)?;
        let cursor = collection.find(&criteria).await?;
        Ok(SearchStream::new(
            cursor.map(|item| item.map_err(DatabankError::from)).boxed(),
        ))
    }
}
