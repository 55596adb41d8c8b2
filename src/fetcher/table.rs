use anyhow::{Result, anyhow};
use serde_json::{Map, Value};

/// A provider table in pandas `records` shape: one JSON object per row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Map<String, Value>>,
}

impl RawTable {
    pub fn from_json(json: &Value) -> Result<Self> {
        let records = json
            .as_array()
            .ok_or_else(|| anyhow!("Expected a JSON array of records"))?;

        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            let row = record
                .as_object()
                .ok_or_else(|| anyhow!("Expected every record to be a JSON object"))?;
            rows.push(row.clone());
        }

        // Column order follows the first record
        let columns = rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Map<String, Value>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// First column whose name satisfies `pred`.
    pub fn find_column<F>(&self, pred: F) -> Option<&str>
    where
        F: Fn(&str) -> bool,
    {
        self.columns.iter().map(String::as_str).find(|c| pred(*c))
    }

    pub fn text<'a>(row: &'a Map<String, Value>, column: &str) -> Option<&'a str> {
        row.get(column).and_then(Value::as_str)
    }

    /// Numeric coercion: JSON numbers and numeric strings. Anything else is missing.
    pub fn number(row: &Map<String, Value>, column: &str) -> Option<f64> {
        let value = match row.get(column)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }?;
        if value.is_nan() { None } else { Some(value) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_columns_follow_first_record() {
        let table = RawTable::from_json(&json!([
            { "月份": "2024年03月", "全国-当月": 100.1, "全国-同比增长": 0.1 }
        ]))
        .unwrap();
        assert_eq!(table.columns(), &["月份", "全国-当月", "全国-同比增长"]);
        assert!(table.has_column("全国-同比增长"));
        assert!(!table.has_column("季度"));
    }

    #[test]
    fn test_number_coercion() {
        let table = RawTable::from_json(&json!([
            { "a": 1.5, "b": " 2.25 ", "c": "--", "d": null, "e": "NaN" }
        ]))
        .unwrap();
        let row = &table.rows()[0];
        assert_eq!(RawTable::number(row, "a"), Some(1.5));
        assert_eq!(RawTable::number(row, "b"), Some(2.25));
        assert_eq!(RawTable::number(row, "c"), None);
        assert_eq!(RawTable::number(row, "d"), None);
        assert_eq!(RawTable::number(row, "e"), None);
        assert_eq!(RawTable::number(row, "missing"), None);
    }

    #[test]
    fn test_rejects_non_record_payload() {
        assert!(RawTable::from_json(&json!({ "error": "bad request" })).is_err());
        assert!(RawTable::from_json(&json!([1, 2, 3])).is_err());
        assert!(RawTable::from_json(&json!([])).unwrap().is_empty());
    }
}
