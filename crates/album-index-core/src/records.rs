//! Structured-data files: named pages of flat records, as produced by the
//! spreadsheet converter (one page per sheet).

use serde_json::{Map, Number, Value};
use std::fs;
use std::path::Path;

use crate::error::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Number(f64),
    Bool(bool),
    Null,
}

/// One row of a page. Field order is the order of the source document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Scalar)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Scalar) -> Self {
        self.fields.push((name.into(), value));
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn get(&self, name: &str) -> Option<&Scalar> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordPage {
    pub name: String,
    pub records: Vec<Record>,
}

impl RecordPage {
    pub fn new(name: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }
}

/// Supplies the pages of a structured-data file.
pub trait PageSource: Send + Sync {
    fn load_pages(&self, path: &Path) -> Result<Vec<RecordPage>, Error>;
}

/// Reads `{ "<page>": [ { "<field>": scalar, ... }, ... ], ... }` documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonPageSource;

impl PageSource for JsonPageSource {
    fn load_pages(&self, path: &Path) -> Result<Vec<RecordPage>, Error> {
        let content = fs::read_to_string(path)?;
        parse_pages(path, &content)
    }
}

pub fn parse_pages(path: &Path, content: &str) -> Result<Vec<RecordPage>, Error> {
    let document: Value =
        serde_json::from_str(content).map_err(|e| Error::parse(path, e.to_string()))?;
    let Value::Object(pages) = document else {
        return Err(Error::parse(path, "top-level value is not an object"));
    };

    pages
        .into_iter()
        .map(|(page_name, rows)| {
            let Value::Array(rows) = rows else {
                return Err(Error::parse(
                    path,
                    format!("page '{}' is not an array", page_name),
                ));
            };
            let records = rows
                .into_iter()
                .enumerate()
                .map(|(index, row)| parse_record(path, &page_name, index, row))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(RecordPage::new(page_name, records))
        })
        .collect()
}

fn parse_record(path: &Path, page: &str, index: usize, row: Value) -> Result<Record, Error> {
    let Value::Object(fields) = row else {
        return Err(Error::parse(
            path,
            format!("row {} of page '{}' is not an object", index, page),
        ));
    };

    let mut record = Record::new();
    for (name, value) in fields {
        let scalar = match value {
            Value::String(text) => Scalar::Text(text),
            Value::Number(number) => Scalar::Number(number.as_f64().unwrap_or(f64::NAN)),
            Value::Bool(flag) => Scalar::Bool(flag),
            Value::Null => Scalar::Null,
            Value::Array(_) | Value::Object(_) => {
                return Err(Error::parse(
                    path,
                    format!(
                        "field '{}' in row {} of page '{}' is not a scalar",
                        name, index, page
                    ),
                ))
            }
        };
        record = record.with_field(name, scalar);
    }
    Ok(record)
}

/// Inverse of [`parse_pages`].
pub fn pages_to_json(pages: &[RecordPage]) -> Value {
    let mut document = Map::new();
    for page in pages {
        let rows = page
            .records
            .iter()
            .map(|record| {
                let fields: Map<String, Value> = record
                    .fields()
                    .map(|(name, value)| (name.to_string(), scalar_to_json(value)))
                    .collect();
                Value::Object(fields)
            })
            .collect();
        document.insert(page.name.clone(), Value::Array(rows));
    }
    Value::Object(document)
}

fn scalar_to_json(value: &Scalar) -> Value {
    match value {
        Scalar::Text(text) => Value::String(text.clone()),
        Scalar::Number(number) => Number::from_f64(*number)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Scalar::Bool(flag) => Value::Bool(*flag),
        Scalar::Null => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "Page 2": [ { "N°": 1, "Désignation": "Cérès", "Côte": "4.50" } ],
        "Page 1": [ { "N°": 2, "Neuf": true, "Côte": 12 }, { "N°": 3, "Côte": null } ]
    }"#;

    #[test]
    fn test_parse_pages_keeps_document_order() {
        let pages = parse_pages(Path::new("sample.json"), SAMPLE).unwrap();
        let names: Vec<&str> = pages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Page 2", "Page 1"]);

        let first = &pages[0].records[0];
        let fields: Vec<&str> = first.fields().map(|(name, _)| name).collect();
        assert_eq!(fields, vec!["N°", "Désignation", "Côte"]);
        assert_eq!(first.get("Côte"), Some(&Scalar::Text("4.50".to_string())));
        assert_eq!(pages[1].records[0].get("Neuf"), Some(&Scalar::Bool(true)));
        assert_eq!(pages[1].records[1].get("Côte"), Some(&Scalar::Null));
    }

    #[test]
    fn test_parse_pages_rejects_malformed_documents() {
        let path = Path::new("bad.json");
        assert!(matches!(parse_pages(path, "{ not json"), Err(Error::Parse { .. })));
        assert!(matches!(parse_pages(path, "[]"), Err(Error::Parse { .. })));
        assert!(matches!(
            parse_pages(path, r#"{"Page1": {"a": 1}}"#),
            Err(Error::Parse { .. })
        ));
        assert!(matches!(
            parse_pages(path, r#"{"Page1": [ {"a": [1, 2]} ]}"#),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn test_pages_to_json_reparses_to_same_pages() {
        let path = Path::new("sample.json");
        let pages = parse_pages(path, SAMPLE).unwrap();
        let rendered = serde_json::to_string(&pages_to_json(&pages)).unwrap();
        assert_eq!(parse_pages(path, &rendered).unwrap(), pages);
    }
}
