//! JSON envelope for query results printed by the CLI.

use serde::Serialize;

/// Consistent wrapper around every query result
#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse<T: Serialize> {
    /// Query name, e.g. "backlinks" or "ego"
    pub operation: String,
    /// Note id or title the query ran against
    pub subject: String,
    pub success: bool,
    pub data: T,
    /// Number of items in `data` when it is a list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub took_ms: u64,
    /// Non-fatal findings, e.g. a focal note that does not exist
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl<T: Serialize> QueryResponse<T> {
    pub fn new(operation: impl Into<String>, subject: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            subject: subject.into(),
            success: true,
            data,
            count: None,
            took_ms: 0,
            warnings: vec![],
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_duration(mut self, ms: u64) -> Self {
        self.took_ms = ms;
        self
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Mark the query as failed while still carrying its data
    pub fn failed(mut self) -> Self {
        self.success = false;
        self
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> notegraph_core::Result<String> {
        notegraph_core::to_json_string(self, "query response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_skipped() {
        let json = QueryResponse::new("ego", "a", vec![1, 2]).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["operation"], "ego");
        assert_eq!(value["success"], true);
        assert!(value.get("count").is_none());
        assert!(value.get("warnings").is_none());
    }

    #[test]
    fn test_builder_fields() {
        let response = QueryResponse::new("backlinks", "Beta", Vec::<String>::new())
            .with_count(0)
            .with_duration(3)
            .with_warning("no notes reference Beta")
            .failed();

        assert!(!response.success);
        assert_eq!(response.count, Some(0));
        assert_eq!(response.took_ms, 3);
        assert_eq!(response.warnings.len(), 1);
    }
}
