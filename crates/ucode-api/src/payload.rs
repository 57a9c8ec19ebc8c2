// Open request/response maps and the pagination rewrite.
//
// Table schemas are caller-defined, so payloads stay as JSON maps. The
// `ObjectExt` accessors give typed reads without unchecked casts.

use serde_json::{Map, Value};

/// A string-keyed JSON object: filters, field values, response rows.
pub type Object = Map<String, Value>;

pub const PAGE_KEY: &str = "page";
pub const LIMIT_KEY: &str = "limit";
pub const OFFSET_KEY: &str = "offset";
pub const GUID_KEY: &str = "guid";

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// Typed read helpers over an [`Object`].
pub trait ObjectExt {
    fn get_str(&self, key: &str) -> Option<&str>;
    fn get_i64(&self, key: &str) -> Option<i64>;
    fn get_f64(&self, key: &str) -> Option<f64>;
    fn get_bool(&self, key: &str) -> Option<bool>;
    fn get_array(&self, key: &str) -> Option<&Vec<Value>>;
    fn get_object(&self, key: &str) -> Option<&Object>;
}

impl ObjectExt for Object {
    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Integers, or floats with no fractional part.
    #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
    fn get_i64(&self, key: &str) -> Option<i64> {
        let value = self.get(key)?;
        value.as_i64().or_else(|| {
            value
                .as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        })
    }

    fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    fn get_array(&self, key: &str) -> Option<&Vec<Value>> {
        self.get(key).and_then(Value::as_array)
    }

    fn get_object(&self, key: &str) -> Option<&Object> {
        self.get(key).and_then(Value::as_object)
    }
}

/// Effective page window derived from a request payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    /// Read `page`/`limit`, falling back to 1 and 10 when a value is absent,
    /// non-numeric, or not positive.
    pub fn from_object(data: &Object) -> Self {
        let page = data
            .get_i64(PAGE_KEY)
            .filter(|p| *p > 0)
            .unwrap_or(DEFAULT_PAGE);
        let limit = data
            .get_i64(LIMIT_KEY)
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_LIMIT);
        Self {
            page,
            limit,
            offset: (page - 1).saturating_mul(limit),
        }
    }

    /// Write `offset` and the effective `limit` back into the payload.
    pub fn apply(&self, data: &mut Object) {
        data.insert(OFFSET_KEY.into(), Value::from(self.offset));
        data.insert(LIMIT_KEY.into(), Value::from(self.limit));
    }

    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [
            (LIMIT_KEY, self.limit.to_string()),
            (OFFSET_KEY, self.offset.to_string()),
        ]
    }
}

/// Render the `guid` field as a path segment.
///
/// Strings are used verbatim, other values by their JSON text. A missing
/// guid renders as `null` and is left for the backend to reject.
pub fn guid_segment(data: &Object) -> String {
    match data.get(GUID_KEY) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => Value::Null.to_string(),
    }
}
