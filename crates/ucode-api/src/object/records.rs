// Single-record and write endpoints
//
// Create, update, fetch and delete addressed by table slug, plus the
// bulk update/delete variants that share the `/v1/object` prefix.

use reqwest::Method;
use tracing::debug;

use crate::error::Error;
use crate::model::{
    Argument, CreateObjectResponse, MultipleUpdateResponse, Request, SingleObjectResponse,
    UpdateObjectResponse,
};
use crate::object::client::{BLOCK_BUILDER, BLOCKED_LOGIN_TABLE, FROM_OFS, ObjectClient, QueryFlags};
use crate::payload::guid_segment;

impl ObjectClient {
    /// Create one object.
    ///
    /// `POST /v1/object/{slug}?from-ofs&block_builder&blocked_login_table`
    pub async fn create_object(&self, arg: &Argument) -> Result<CreateObjectResponse, Error> {
        let mut url = self.endpoint(&["v1", "object", &arg.table_slug])?;
        url.flag(FROM_OFS, arg.disable_faas)
            .flag(BLOCK_BUILDER, arg.block_builder)
            .flag(BLOCKED_LOGIN_TABLE, arg.blocked_login_table);
        debug!(table = %arg.table_slug, "creating object");
        self.call(Method::POST, url, &arg.request, arg).await
    }

    /// Update one object; the payload carries its `guid`.
    ///
    /// `PUT /v1/object/{slug}?from-ofs&block_builder`
    pub async fn update_object(&self, arg: &Argument) -> Result<UpdateObjectResponse, Error> {
        let mut url = self.endpoint(&["v1", "object", &arg.table_slug])?;
        url.flag(FROM_OFS, arg.disable_faas)
            .flag(BLOCK_BUILDER, arg.block_builder);
        debug!(table = %arg.table_slug, "updating object");
        self.call(Method::PUT, url, &arg.request, arg).await
    }

    /// Update several objects in one request.
    ///
    /// `PUT /v1/object/multiple-update/{slug}?from-ofs&block_builder`
    pub async fn multiple_update(&self, arg: &Argument) -> Result<MultipleUpdateResponse, Error> {
        let mut url = self.endpoint(&["v1", "object", "multiple-update", &arg.table_slug])?;
        url.flag(FROM_OFS, arg.disable_faas)
            .flag(BLOCK_BUILDER, arg.block_builder);
        debug!(table = %arg.table_slug, "updating multiple objects");
        self.call(Method::PUT, url, &arg.request, arg).await
    }

    /// Fetch one object by `request.data["guid"]`.
    ///
    /// `GET /v1/object/{slug}/{guid}?from-ofs`
    pub async fn get_single(&self, arg: &Argument) -> Result<SingleObjectResponse, Error> {
        let guid = guid_segment(&arg.request.data);
        let mut url = self.endpoint(&["v1", "object", &arg.table_slug, &guid])?;
        url.flag(FROM_OFS, arg.disable_faas);
        debug!(table = %arg.table_slug, guid, "fetching object");
        self.call(Method::GET, url, &(), arg).await
    }

    /// Fetch one object through the slim (cache-backed) read path.
    ///
    /// `GET /v1/object-slim/{slug}/{guid}?from-ofs`
    pub async fn get_single_slim(&self, arg: &Argument) -> Result<SingleObjectResponse, Error> {
        let guid = guid_segment(&arg.request.data);
        let mut url = self.endpoint(&["v1", "object-slim", &arg.table_slug, &guid])?;
        url.flag(FROM_OFS, arg.disable_faas);
        debug!(table = %arg.table_slug, guid, "fetching slim object");
        self.call(Method::GET, url, &(), arg).await
    }

    /// Delete one object by `request.data["guid"]`.
    ///
    /// `DELETE /v1/object/{slug}/{guid}?from-ofs` with an empty request body.
    pub async fn delete(&self, arg: &Argument) -> Result<(), Error> {
        let guid = guid_segment(&arg.request.data);
        let mut url = self.endpoint(&["v1", "object", &arg.table_slug, &guid])?;
        url.flag(FROM_OFS, arg.disable_faas);
        debug!(table = %arg.table_slug, guid, "deleting object");
        self.call_discarding(Method::DELETE, url, &Request::default(), arg)
            .await
    }

    /// Delete the objects selected by the payload (typically `ids`).
    ///
    /// `DELETE /v1/object/{slug}/?from-ofs` with `request.data` as the body.
    pub async fn multiple_delete(&self, arg: &Argument) -> Result<(), Error> {
        let mut url = self.endpoint(&["v1", "object", &arg.table_slug, ""])?;
        url.flag(FROM_OFS, arg.disable_faas);
        debug!(table = %arg.table_slug, "deleting multiple objects");
        self.call_discarding(Method::DELETE, url, &arg.request.data, arg)
            .await
    }
}
