use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::EquityError;
use crate::EquityResult;

// ---------------------------------------------------------------------------
// Comparison period
// ---------------------------------------------------------------------------

/// One of the two comparison periods shown side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Year {
    Current,
    Previous,
}

impl Year {
    pub const ALL: [Year; 2] = [Year::Current, Year::Previous];

    pub fn token(&self) -> &'static str {
        match self {
            Year::Current => "current",
            Year::Previous => "previous",
        }
    }

    /// `<component>.<year>_year.value`, the leaf an edit of this cell writes to.
    pub fn leaf_path(&self, component_path: &str) -> String {
        format!("{}.{}_year.value", component_path, self.token())
    }

    /// `<component>.<year>`, the dirty-cell key for this cell.
    pub fn edited_key(&self, component_path: &str) -> String {
        format!("{}.{}", component_path, self.token())
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Year {
    type Err = EquityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "current" => Ok(Year::Current),
            "previous" => Ok(Year::Previous),
            other => Err(EquityError::InputValidation {
                field: "year".into(),
                reason: format!("expected 'current' or 'previous', got '{other}'"),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Structural locator
// ---------------------------------------------------------------------------

/// A dot-delimited locator from the document root, e.g.
/// `equity_components.reserves.breakdown.0.current_year`.
///
/// Segments address object keys; on arrays a segment that parses as an
/// unsigned integer addresses an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    pub fn parse(raw: &str) -> EquityResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(EquityError::InvalidPath("path is empty".into()));
        }
        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(EquityError::InvalidPath(format!(
                "'{raw}' contains an empty segment"
            )));
        }
        Ok(FieldPath {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Parent segments and the final key. A parsed path always has one segment.
    fn split_last(&self) -> (&[String], &str) {
        match self.segments.split_last() {
            Some((last, parents)) => (parents, last.as_str()),
            None => (&[], ""),
        }
    }

    fn unresolved(&self, segment: &str) -> EquityError {
        EquityError::PathResolution {
            path: self.raw.clone(),
            segment: segment.to_string(),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for FieldPath {
    type Err = EquityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldPath::parse(s)
    }
}

// ---------------------------------------------------------------------------
// Tree walk
// ---------------------------------------------------------------------------

/// Borrow the node at `path`.
pub fn resolve<'a>(root: &'a Value, path: &FieldPath) -> EquityResult<&'a Value> {
    walk(root, path, path.segments())
}

/// Mutably borrow the node at `path`.
pub fn resolve_mut<'a>(root: &'a mut Value, path: &FieldPath) -> EquityResult<&'a mut Value> {
    walk_mut(root, path, path.segments())
}

/// True when every segment of `path` exists in `root`.
pub fn resolves(root: &Value, path: &FieldPath) -> bool {
    resolve(root, path).is_ok()
}

/// True when [`set`] would succeed: the parent of the last segment exists
/// and can hold it.
pub fn settable(root: &Value, path: &FieldPath) -> bool {
    let (parents, last) = path.split_last();
    match walk(root, path, parents) {
        Ok(Value::Object(_)) => true,
        Ok(Value::Array(items)) => last.parse::<usize>().is_ok_and(|i| i < items.len()),
        _ => false,
    }
}

/// Write `new_value` at `path`, returning what was there (`Null` when the
/// last key was absent).
///
/// Every intermediate segment must exist. The last key is created when its
/// parent is an object; array elements must already exist. On error `root`
/// is untouched.
pub fn set(root: &mut Value, path: &FieldPath, new_value: Value) -> EquityResult<Value> {
    let (parents, last) = path.split_last();
    match walk_mut(root, path, parents)? {
        Value::Object(map) => Ok(map.insert(last.to_string(), new_value).unwrap_or(Value::Null)),
        Value::Array(items) => {
            let slot = last
                .parse::<usize>()
                .ok()
                .and_then(|i| items.get_mut(i))
                .ok_or_else(|| path.unresolved(last))?;
            Ok(std::mem::replace(slot, new_value))
        }
        _ => Err(path.unresolved(last)),
    }
}

fn walk<'a>(root: &'a Value, path: &FieldPath, segments: &[String]) -> EquityResult<&'a Value> {
    let mut node = root;
    for segment in segments {
        node = match node {
            Value::Object(map) => map.get(segment.as_str()),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
        .ok_or_else(|| path.unresolved(segment))?;
    }
    Ok(node)
}

fn walk_mut<'a>(
    root: &'a mut Value,
    path: &FieldPath,
    segments: &[String],
) -> EquityResult<&'a mut Value> {
    let mut node = root;
    for segment in segments {
        node = match node {
            Value::Object(map) => map.get_mut(segment.as_str()),
            Value::Array(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(move |i| items.get_mut(i)),
            _ => None,
        }
        .ok_or_else(|| path.unresolved(segment))?;
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn doc() -> Value {
        json!({
            "a": { "b": { "current_year": { "value": 1 } } },
            "list": [ { "x": 10 }, { "x": 20 } ],
            "leaf": 5
        })
    }

    #[test]
    fn test_year_paths() {
        assert_eq!(
            Year::Current.leaf_path("equity_components.paid_up_capital"),
            "equity_components.paid_up_capital.current_year.value"
        );
        assert_eq!(
            Year::Previous.edited_key("equity_components.reserves.total"),
            "equity_components.reserves.total.previous"
        );
    }

    #[test]
    fn test_year_parse() {
        assert_eq!("Current".parse::<Year>().unwrap(), Year::Current);
        assert_eq!(" previous ".parse::<Year>().unwrap(), Year::Previous);
        assert!("last".parse::<Year>().is_err());
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        assert!(FieldPath::parse("").is_err());
        assert!(FieldPath::parse("a..b").is_err());
        assert!(FieldPath::parse("a.b.").is_err());
        assert_eq!(FieldPath::parse(" a.b ").unwrap().segments(), ["a", "b"]);
    }

    #[test]
    fn test_resolve_object_and_array() {
        let d = doc();
        let p = FieldPath::parse("a.b.current_year.value").unwrap();
        assert_eq!(resolve(&d, &p).unwrap(), &json!(1));
        let p = FieldPath::parse("list.1.x").unwrap();
        assert_eq!(resolve(&d, &p).unwrap(), &json!(20));
    }

    #[test]
    fn test_resolve_reports_failing_segment() {
        let d = doc();
        let p = FieldPath::parse("a.missing.current_year.value").unwrap();
        match resolve(&d, &p).unwrap_err() {
            EquityError::PathResolution { path, segment } => {
                assert_eq!(path, "a.missing.current_year.value");
                assert_eq!(segment, "missing");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_cannot_descend_into_scalar() {
        let d = doc();
        assert!(!resolves(&d, &FieldPath::parse("leaf.value").unwrap()));
        assert!(!resolves(&d, &FieldPath::parse("list.two.x").unwrap()));
        assert!(!resolves(&d, &FieldPath::parse("list.5.x").unwrap()));
    }

    #[test]
    fn test_set_array_element_to_null() {
        let mut d = doc();
        let p = FieldPath::parse("list.0.x").unwrap();
        let old = set(&mut d, &p, json!(null)).unwrap();
        assert_eq!(old, json!(10));
        assert_eq!(d["list"][0]["x"], Value::Null);
    }

    #[test]
    fn test_set_creates_missing_last_key() {
        let mut d = json!({ "total": { "current_year": { "total": 9 } } });
        let p = FieldPath::parse("total.current_year.value").unwrap();
        assert!(settable(&d, &p));
        let old = set(&mut d, &p, json!(1)).unwrap();
        assert_eq!(old, Value::Null);
        assert_eq!(d["total"]["current_year"], json!({ "total": 9, "value": 1 }));
    }

    #[test]
    fn test_set_replaces_existing_leaf() {
        let mut d = doc();
        let p = FieldPath::parse("a.b.current_year.value").unwrap();
        assert_eq!(set(&mut d, &p, json!(2)).unwrap(), json!(1));
        let p = FieldPath::parse("list.1.x").unwrap();
        assert_eq!(set(&mut d, &p, json!(3)).unwrap(), json!(20));
    }

    #[test]
    fn test_set_rejects_missing_intermediate_or_scalar_parent() {
        let mut d = doc();
        let before = d.clone();
        for raw in ["a.nope.current_year.value", "leaf.value", "list.7", "list.x"] {
            let p = FieldPath::parse(raw).unwrap();
            assert!(!settable(&d, &p), "{raw}");
            assert!(set(&mut d, &p, json!(0)).unwrap_err().is_path_resolution(), "{raw}");
        }
        assert_eq!(d, before);
    }

    #[test]
    fn test_set_failure_leaves_document() {
        let mut d = doc();
        let before = d.clone();
        let p = FieldPath::parse("a.nope.value").unwrap();
        assert!(set(&mut d, &p, json!(3)).is_err());
        assert_eq!(d, before);
    }
}
