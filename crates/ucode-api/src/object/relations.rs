// Item endpoints: many-to-many links and bulk upsert.

use reqwest::Method;
use tracing::debug;

use crate::error::Error;
use crate::model::{Argument, MultipleUpsertResponse};
use crate::object::client::{FROM_OFS, ObjectClient, QueryFlags};

impl ObjectClient {
    /// Link records across a many-to-many relation.
    ///
    /// `PUT /v2/items/many-to-many?from-ofs` with `request.data` as the body
    /// (no `data` wrapper).
    pub async fn append_many_to_many(&self, arg: &Argument) -> Result<(), Error> {
        let mut url = self.endpoint(&["v2", "items", "many-to-many"])?;
        url.flag(FROM_OFS, arg.disable_faas);
        debug!("appending many-to-many link");
        self.call_discarding(Method::PUT, url, &arg.request.data, arg)
            .await
    }

    /// Remove a many-to-many link.
    ///
    /// `DELETE /v2/items/many-to-many?from-ofs` with `request.data` as the body.
    pub async fn delete_many_to_many(&self, arg: &Argument) -> Result<(), Error> {
        let mut url = self.endpoint(&["v2", "items", "many-to-many"])?;
        url.flag(FROM_OFS, arg.disable_faas);
        debug!("deleting many-to-many link");
        self.call_discarding(Method::DELETE, url, &arg.request.data, arg)
            .await
    }

    /// Insert or update `upsert_request.data.objects`, matching existing rows
    /// on `field_slug`.
    ///
    /// `POST /v2/items/{slug}/upsert-many?from-ofs`
    pub async fn multiple_upsert(&self, arg: &Argument) -> Result<MultipleUpsertResponse, Error> {
        let mut url = self.endpoint(&["v2", "items", &arg.table_slug, "upsert-many"])?;
        url.flag(FROM_OFS, arg.disable_faas);
        debug!(
            table = %arg.table_slug,
            objects = arg.upsert_request.data.objects.len(),
            "upserting objects"
        );
        self.call(Method::POST, url, &arg.upsert_request, arg).await
    }
}
