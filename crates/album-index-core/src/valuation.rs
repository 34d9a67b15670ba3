use crate::records::{Record, Scalar};

/// Declared rules for reading item listings: which field carries the
/// valuation and which pages are summaries rather than listings.
#[derive(Debug, Clone)]
pub struct ValuationPolicy {
    field_aliases: Vec<String>,
    excluded_page_markers: Vec<String>,
}

impl Default for ValuationPolicy {
    fn default() -> Self {
        Self::new(&["côte", "cote"], &["total", "page type"])
    }
}

impl ValuationPolicy {
    pub fn new<S: AsRef<str>>(field_aliases: &[S], excluded_page_markers: &[S]) -> Self {
        Self {
            field_aliases: lowercase_all(field_aliases),
            excluded_page_markers: lowercase_all(excluded_page_markers),
        }
    }

    pub fn field_aliases(&self) -> &[String] {
        &self.field_aliases
    }

    pub fn is_excluded_page(&self, page_name: &str) -> bool {
        let name = page_name.trim().to_lowercase();
        self.excluded_page_markers
            .iter()
            .any(|marker| name.contains(marker.as_str()))
    }

    /// First field whose lower-cased name contains one of the aliases.
    pub fn valuation_field<'r>(&self, record: &'r Record) -> Option<(&'r str, &'r Scalar)> {
        record.fields().find(|(name, _)| {
            let name = name.to_lowercase();
            self.field_aliases
                .iter()
                .any(|alias| name.contains(alias.as_str()))
        })
    }

    /// Valuation carried by a record. Only the first matching field is
    /// considered; a value that does not coerce yields `None`.
    pub fn record_valuation(&self, record: &Record) -> Option<f64> {
        self.valuation_field(record)
            .and_then(|(_, value)| parse_valuation(value))
    }
}

fn lowercase_all<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .map(|value| value.as_ref().trim().to_lowercase())
        .filter(|value| !value.is_empty())
        .collect()
}

/// Lenient numeric coercion of a cell value. Text is trimmed, a lone decimal
/// comma is read as a point, and the longest leading number is used, so
/// `"12.5 €"` is 12.5 while `"n/a"` has no value.
pub fn parse_valuation(value: &Scalar) -> Option<f64> {
    match value {
        Scalar::Number(number) if number.is_finite() => Some(*number),
        Scalar::Text(text) => {
            let text = text.trim();
            if text.contains(',') && !text.contains('.') {
                leading_float(&text.replacen(',', ".", 1))
            } else {
                leading_float(text)
            }
        }
        _ => None,
    }
}

fn leading_float(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
