// Listing and aggregation endpoints
//
// The three paged reads share `Pagination`: get-list rewrites the payload in
// place, while the slim and aggregate reads carry `limit`/`offset` in the
// query string.

use reqwest::Method;
use tracing::debug;

use crate::error::Error;
use crate::model::{AggregationResponse, Argument, ObjectListResponse};
use crate::object::client::{BLOCK_CACHED, FROM_OFS, ObjectClient, QueryFlags};
use crate::payload::Pagination;

impl ObjectClient {
    /// Paged list with filters in the request body.
    ///
    /// `POST /v2/object/get-list/{slug}?from-ofs`
    ///
    /// Rewrites `request.data` so that it carries `offset` and the
    /// effective `limit` before sending.
    pub async fn get_list(&self, arg: &mut Argument) -> Result<ObjectListResponse, Error> {
        let page = Pagination::from_object(&arg.request.data);
        page.apply(&mut arg.request.data);

        let mut url = self.endpoint(&["v2", "object", "get-list", &arg.table_slug])?;
        url.flag(FROM_OFS, arg.disable_faas);
        debug!(table = %arg.table_slug, page.offset, page.limit, "listing objects");
        self.call(Method::POST, url, &arg.request, arg).await
    }

    /// Paged list over the slim read path. Sends no body; the filter map is
    /// URL-escaped JSON in the `data` query parameter.
    ///
    /// `GET /v2/object-slim/get-list/{slug}?from-ofs&block_cached&limit&offset&data`
    pub async fn get_list_slim(&self, arg: &Argument) -> Result<ObjectListResponse, Error> {
        let filter = serde_json::to_string(&arg.request.data).map_err(Error::Serialization)?;
        let page = Pagination::from_object(&arg.request.data);

        let mut url = self.endpoint(&["v2", "object-slim", "get-list", &arg.table_slug])?;
        url.flag(FROM_OFS, arg.disable_faas)
            .flag(BLOCK_CACHED, arg.block_cached);
        for (key, value) in page.query_pairs() {
            url.param(key, &value);
        }
        url.param("data", &filter);
        debug!(table = %arg.table_slug, page.offset, page.limit, "listing slim objects");
        self.call(Method::GET, url, &(), arg).await
    }

    /// Paged list with lookups resolved server side.
    ///
    /// `POST /v1/object/get-list-aggregate/{slug}?from-ofs&block_cached&limit&offset`
    pub async fn get_list_aggregate(&self, arg: &Argument) -> Result<ObjectListResponse, Error> {
        let page = Pagination::from_object(&arg.request.data);

        let mut url = self.endpoint(&["v1", "object", "get-list-aggregate", &arg.table_slug])?;
        url.flag(FROM_OFS, arg.disable_faas)
            .flag(BLOCK_CACHED, arg.block_cached);
        for (key, value) in page.query_pairs() {
            url.param(key, &value);
        }
        debug!(table = %arg.table_slug, page.offset, page.limit, "listing aggregated objects");
        self.call(Method::POST, url, &arg.request, arg).await
    }

    /// Run an aggregation pipeline (carried in `request.data`).
    ///
    /// `POST /v2/items/{slug}/aggregation`
    pub async fn get_list_aggregation(&self, arg: &Argument) -> Result<AggregationResponse, Error> {
        let url = self.endpoint(&["v2", "items", &arg.table_slug, "aggregation"])?;
        debug!(table = %arg.table_slug, "running aggregation");
        self.call(Method::POST, url, &arg.request, arg).await
    }
}
