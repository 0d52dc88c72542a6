//! Content-type independent view of an inbound webhook call.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// The interpreted request body. Exactly one variant per request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Parsed JSON; `{}` when the body was empty or malformed.
    Json(Value),
    /// Form fields from urlencoded or multipart bodies.
    Form(BTreeMap<String, String>),
    /// Unrecognized content type; body decoded as UTF-8.
    Raw(String),
    /// Unrecognized content type with an empty body.
    Absent,
}

impl RequestBody {
    /// Form fields, when the body was a form.
    pub fn form(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            RequestBody::Form(fields) => Some(fields),
            _ => None,
        }
    }
}

/// Normalized request, created per call and dropped after the response.
///
/// Serializes as `{"json"|"form"|"raw": ..., "files"?: {...}, "query_params"?: {...}}`,
/// which is the `data_received` block of the acknowledgment and the `data`
/// block of the persisted record.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRequest {
    pub body: RequestBody,
    /// Multipart field name → sanitized stored filename.
    pub files: BTreeMap<String, String>,
    /// Sanitized filenames in write order.
    pub files_saved: Vec<String>,
    pub query_params: BTreeMap<String, String>,
}

impl NormalizedRequest {
    pub fn new(body: RequestBody) -> Self {
        Self {
            body,
            files: BTreeMap::new(),
            files_saved: Vec::new(),
            query_params: BTreeMap::new(),
        }
    }

    /// Record a stored upload under its form field name.
    pub fn push_file(&mut self, field: String, stored_name: String) {
        self.files_saved.push(stored_name.clone());
        self.files.insert(field, stored_name);
    }
}

impl Serialize for NormalizedRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match &self.body {
            RequestBody::Json(value) => map.serialize_entry("json", value)?,
            RequestBody::Form(fields) => map.serialize_entry("form", fields)?,
            RequestBody::Raw(text) => map.serialize_entry("raw", text)?,
            RequestBody::Absent => {}
        }
        if !self.files.is_empty() {
            map.serialize_entry("files", &self.files)?;
        }
        if !self.query_params.is_empty() {
            map.serialize_entry("query_params", &self.query_params)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_body_serializes_empty() {
        let request = NormalizedRequest::new(RequestBody::Absent);
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({}));
    }

    #[test]
    fn test_form_with_files_and_query() {
        let mut fields = BTreeMap::new();
        fields.insert("to".to_string(), "123".to_string());
        let mut request = NormalizedRequest::new(RequestBody::Form(fields));
        request.push_file("attachment".into(), "report.pdf".into());
        request.query_params.insert("source".into(), "test".into());

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "form": {"to": "123"},
                "files": {"attachment": "report.pdf"},
                "query_params": {"source": "test"}
            })
        );
        assert_eq!(request.files_saved, vec!["report.pdf".to_string()]);
    }

    #[test]
    fn test_raw_body() {
        let request = NormalizedRequest::new(RequestBody::Raw("ping".into()));
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({"raw": "ping"}));
        assert!(request.body.form().is_none());
    }
}
