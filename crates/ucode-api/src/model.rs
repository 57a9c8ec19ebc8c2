// ── Request and response shapes for the object service ──
//
// The backend wraps payloads at different depths depending on the endpoint
// (`data`, `data.data`, `data.data.data`). Each family gets its own type
// so the nesting is checked at compile time. Missing keys deserialize to
// empty values; a key with the wrong JSON type is a shape error.

use serde::{Deserialize, Serialize};

use crate::payload::Object;

// ── Request side ────────────────────────────────────────────────────

/// Request body sent to most object endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub data: Object,
    #[serde(default)]
    pub is_cached: bool,
}

impl Request {
    pub fn new(data: Object) -> Self {
        Self {
            data,
            is_cached: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpsertData {
    #[serde(default)]
    pub objects: Vec<Object>,
    #[serde(default)]
    pub field_slug: String,
}

/// Bulk upsert body: the objects plus the field used to match existing rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpsertRequest {
    #[serde(default)]
    pub data: UpsertData,
}

/// Per-call parameters for an object operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    /// Overrides the configured application identity when set and non-empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    pub table_slug: String,
    #[serde(default)]
    pub request: Request,
    #[serde(default)]
    pub upsert_request: UpsertRequest,
    /// Skip downstream business-logic hooks (`from-ofs`).
    #[serde(default)]
    pub disable_faas: bool,
    /// Skip response caching.
    #[serde(default)]
    pub block_cached: bool,
    /// Skip schema-builder enforcement.
    #[serde(default)]
    pub block_builder: bool,
    /// Skip login-table protection.
    #[serde(default)]
    pub blocked_login_table: bool,
}

impl Argument {
    pub fn new(table_slug: impl Into<String>) -> Self {
        Self {
            table_slug: table_slug.into(),
            ..Self::default()
        }
    }

    pub fn with_data(mut self, data: Object) -> Self {
        self.request.data = data;
        self
    }

    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    pub fn with_upsert(mut self, objects: Vec<Object>, field_slug: impl Into<String>) -> Self {
        self.upsert_request.data = UpsertData {
            objects,
            field_slug: field_slug.into(),
        };
        self
    }

    /// The per-call identity override, ignoring empty strings.
    pub fn app_id_override(&self) -> Option<&str> {
        self.app_id.as_deref().filter(|id| !id.is_empty())
    }
}

// ── Create: data.data.data ──────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatedObject {
    #[serde(default)]
    pub data: Object,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateObjectData {
    #[serde(default)]
    pub data: CreatedObject,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateObjectResponse {
    #[serde(default)]
    pub data: CreateObjectData,
}

impl CreateObjectResponse {
    pub fn object(&self) -> &Object {
        &self.data.data.data
    }
}

// ── Single record: data.data.response ──────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SingleObject {
    #[serde(default)]
    pub response: Object,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SingleObjectData {
    #[serde(default)]
    pub data: SingleObject,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SingleObjectResponse {
    #[serde(default)]
    pub data: SingleObjectData,
}

impl SingleObjectResponse {
    pub fn object(&self) -> &Object {
        &self.data.data.response
    }
}

// ── Lists: data.data.{count, response} ─────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectList {
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub response: Vec<Object>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectListData {
    #[serde(default)]
    pub data: ObjectList,
}

/// Shared by get-list, get-list-slim and get-list-aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectListResponse {
    #[serde(default)]
    pub data: ObjectListData,
}

impl ObjectListResponse {
    /// Total matching rows reported by the backend, independent of paging.
    pub fn count(&self) -> i64 {
        self.data.data.count
    }

    pub fn rows(&self) -> &[Object] {
        &self.data.data.response
    }
}

// ── Aggregation pipeline: data.data.data ───────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationRows {
    #[serde(default)]
    pub data: Vec<Object>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationData {
    #[serde(default)]
    pub data: AggregationRows,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationResponse {
    #[serde(default)]
    pub data: AggregationData,
}

impl AggregationResponse {
    pub fn rows(&self) -> &[Object] {
        &self.data.data.data
    }
}

// ── Update: {status, description, data: {table_slug, data}} ────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdatedObject {
    #[serde(default)]
    pub table_slug: String,
    #[serde(default)]
    pub data: Object,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateObjectResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub data: UpdatedObject,
}

// ── Multiple update: {status, description, data.data.objects} ──────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdatedObjects {
    #[serde(default)]
    pub objects: Vec<Object>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultipleUpdateData {
    #[serde(default)]
    pub data: UpdatedObjects,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultipleUpdateResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub data: MultipleUpdateData,
}

impl MultipleUpdateResponse {
    pub fn objects(&self) -> &[Object] {
        &self.data.data.objects
    }
}

// ── Multiple upsert: {status, description, data.data} ───────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultipleUpsertData {
    #[serde(default)]
    pub data: Object,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultipleUpsertResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub data: MultipleUpsertData,
}
