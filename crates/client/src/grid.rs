//! Server-side grid protocol
//!
//! List endpoints speak the DataTables server-side dialect: the client
//! sends `draw`, `start`, `length`, ordering, and per-column search
//! values as query parameters, and the server answers with the page of
//! rows plus total/filtered counts. The `draw` counter lets the caller
//! discard replies that arrive out of order.

use std::collections::BTreeMap;

use serde::Deserialize;

use opsdeck_core::{ColumnSpec, OrderDir, RecordMap};

// ============================================================================
// Query
// ============================================================================

/// One page request against a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct GridQuery {
    /// Monotonic request counter, echoed back by the server
    pub draw: u64,
    /// Zero-based index of the first row of the page
    pub start: u64,
    /// Page length
    pub length: u64,
    /// Ordering: column index and direction
    pub order: (usize, OrderDir),
    /// Per-column search values, keyed by field name; empty values are
    /// not sent
    pub filters: BTreeMap<String, String>,
}

impl GridQuery {
    /// First page with the given length and ordering
    pub fn new(length: u64, order: (usize, OrderDir)) -> Self {
        Self {
            draw: 0,
            start: 0,
            length,
            order,
            filters: BTreeMap::new(),
        }
    }

    /// Encode as DataTables-style query parameters.
    ///
    /// `columns` fixes the column indices the server resolves ordering
    /// and per-column search against.
    pub fn to_params(&self, columns: &[ColumnSpec]) -> Vec<(String, String)> {
        let mut params = vec![
            ("draw".to_string(), self.draw.to_string()),
            ("start".to_string(), self.start.to_string()),
            ("length".to_string(), self.length.to_string()),
            (
                "order[0][column]".to_string(),
                self.order.0.to_string(),
            ),
            (
                "order[0][dir]".to_string(),
                self.order.1.as_str().to_string(),
            ),
        ];
        for (i, column) in columns.iter().enumerate() {
            params.push((format!("columns[{i}][data]"), column.field.clone()));
            params.push((
                format!("columns[{i}][searchable]"),
                column.searchable.to_string(),
            ));
            params.push((
                format!("columns[{i}][orderable]"),
                column.orderable.to_string(),
            ));
            if let Some(value) = self.filters.get(&column.field) {
                if !value.is_empty() {
                    params.push((format!("columns[{i}][search][value]"), value.clone()));
                }
            }
        }
        params
    }
}

// ============================================================================
// Page
// ============================================================================

/// One page of rows from a list endpoint.
///
/// Everything but `data` is optional; plain endpoints that return only
/// `{data: [...]}` still parse.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GridPage {
    /// Echo of the request's draw counter
    #[serde(default)]
    pub draw: Option<u64>,
    /// Rows of the current page
    pub data: Vec<RecordMap>,
    /// Total rows before filtering
    #[serde(default, rename = "recordsTotal")]
    pub records_total: Option<u64>,
    /// Total rows after filtering
    #[serde(default, rename = "recordsFiltered")]
    pub records_filtered: Option<u64>,
}

impl GridPage {
    /// Rows after filtering, falling back to the page length when the
    /// server omits counts.
    pub fn filtered_count(&self) -> u64 {
        self.records_filtered
            .or(self.records_total)
            .unwrap_or(self.data.len() as u64)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::new("id", "ID"),
            ColumnSpec::new("name", "Name"),
            ColumnSpec::new("active", "Active").not_searchable(),
        ]
    }

    #[test]
    fn test_query_params_basic() {
        let query = GridQuery::new(10, (0, OrderDir::Desc));
        let params = query.to_params(&columns());

        assert!(params.contains(&("draw".to_string(), "0".to_string())));
        assert!(params.contains(&("start".to_string(), "0".to_string())));
        assert!(params.contains(&("length".to_string(), "10".to_string())));
        assert!(params.contains(&("order[0][column]".to_string(), "0".to_string())));
        assert!(params.contains(&("order[0][dir]".to_string(), "desc".to_string())));
        assert!(params.contains(&("columns[1][data]".to_string(), "name".to_string())));
        // no filter values present
        assert!(!params.iter().any(|(k, _)| k.contains("[search][value]")));
    }

    #[test]
    fn test_query_params_with_filters() {
        let mut query = GridQuery::new(25, (1, OrderDir::Asc));
        query.filters.insert("name".to_string(), "ana".to_string());
        query.filters.insert("id".to_string(), String::new());

        let params = query.to_params(&columns());
        assert!(params.contains(&("columns[1][search][value]".to_string(), "ana".to_string())));
        // empty filter values are dropped
        assert!(!params.contains(&("columns[0][search][value]".to_string(), String::new())));
    }

    #[test]
    fn test_page_parses_full_shape() {
        let page: GridPage = serde_json::from_str(
            r#"{
                "draw": 3,
                "recordsTotal": 57,
                "recordsFiltered": 2,
                "data": [{"id": 1, "name": "Ana"}, {"id": 2, "name": "Ben"}]
            }"#,
        )
        .unwrap();
        assert_eq!(page.draw, Some(3));
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.filtered_count(), 2);
    }

    #[test]
    fn test_page_parses_bare_data_shape() {
        let page: GridPage =
            serde_json::from_str(r#"{"data": [{"id": 1}]}"#).unwrap();
        assert_eq!(page.draw, None);
        assert_eq!(page.records_total, None);
        assert_eq!(page.filtered_count(), 1);
    }
}
