//! FILENAME: core/engine/src/clean/options.rs
//! PURPOSE: The configuration for one cleaning run.
//! CONTEXT: Mirrors the JSON options payload sent with an upload. Every flag
//! defaults to off and every sub-field is optional, so a missing or partial
//! payload still produces a valid run; accessors supply the per-stage
//! fallbacks (whole-row duplicate keys, all columns for dates, column 0 for
//! sorting, "YYYY-MM-DD" output, "N/A" as the fill value).
//! Field values are read loosely: flags take any truthy value, and a value of
//! the wrong shape leaves its field unset instead of failing the payload.

use std::collections::BTreeMap;

use crate::date::{DateFormat, DEFAULT_DATE_FORMAT};
use crate::error::EngineError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ============================================================================
// CLEANING OPTIONS
// ============================================================================

/// Written into blank cells by the missing-value pass unless overridden.
pub const DEFAULT_FILL_VALUE: &str = "N/A";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CleaningOptions {
    #[serde(deserialize_with = "truthy")]
    pub remove_duplicates: bool,
    /// Header names forming the duplicate key. None or empty = whole row.
    #[serde(deserialize_with = "optional_names")]
    pub duplicate_keys: Option<Vec<String>>,

    #[serde(deserialize_with = "truthy")]
    pub trim_spaces: bool,

    #[serde(deserialize_with = "truthy")]
    pub convert_types: bool,

    #[serde(deserialize_with = "truthy")]
    pub standardize_dates: bool,
    #[serde(deserialize_with = "optional_text")]
    pub date_format: Option<String>,
    /// Header names to restrict date parsing to. None or empty = all columns.
    #[serde(deserialize_with = "optional_names")]
    pub date_columns: Option<Vec<String>>,
    /// Treat numeric cells in the date columns as spreadsheet day serials.
    #[serde(deserialize_with = "truthy")]
    pub date_serials: bool,

    #[serde(deserialize_with = "truthy")]
    pub fix_text_case: bool,
    pub header_case: Option<CaseStyle>,
    pub text_case: Option<CaseStyle>,
    /// Header names to restrict recasing to. None or empty = all columns.
    #[serde(deserialize_with = "optional_names")]
    pub case_columns: Option<Vec<String>>,

    #[serde(deserialize_with = "truthy")]
    pub remove_blank_rows: bool,

    #[serde(deserialize_with = "truthy")]
    pub handle_missing: bool,
    pub missing_strategy: Option<MissingStrategy>,
    #[serde(deserialize_with = "optional_text")]
    pub fill_value: Option<String>,

    #[serde(deserialize_with = "truthy")]
    pub normalize_column_names: bool,

    #[serde(deserialize_with = "truthy")]
    pub find_and_replace: bool,
    #[serde(deserialize_with = "optional_replacements")]
    pub replacements: Option<Vec<Replacement>>,
    /// Header names to restrict replacement to. None or empty = all columns.
    #[serde(deserialize_with = "optional_names")]
    pub replace_columns: Option<Vec<String>>,

    /// Per-column row filters keyed by header name. Rows must satisfy all.
    #[serde(deserialize_with = "optional_filters")]
    pub filter_conditions: Option<BTreeMap<String, FilterCondition>>,

    #[serde(deserialize_with = "truthy")]
    pub sort_data: bool,
    pub sort_column: Option<SortColumn>,
    pub sort_order: Option<SortOrder>,
}

impl CleaningOptions {
    /// The preset the upload form starts with.
    pub fn recommended() -> Self {
        CleaningOptions {
            remove_duplicates: true,
            duplicate_keys: Some(Vec::new()),
            trim_spaces: true,
            convert_types: true,
            date_format: Some(DEFAULT_DATE_FORMAT.to_string()),
            date_columns: Some(Vec::new()),
            header_case: Some(CaseStyle::Lowercase),
            text_case: Some(CaseStyle::Title),
            remove_blank_rows: true,
            replacements: Some(vec![
                Replacement::new("N/A", ""),
                Replacement::new("nil", "0"),
                Replacement::new("null", ""),
            ]),
            sort_column: Some(SortColumn::Index(0)),
            sort_order: Some(SortOrder::Ascending),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn duplicate_keys(&self) -> &[String] {
        self.duplicate_keys.as_deref().unwrap_or_default()
    }

    pub fn date_columns(&self) -> &[String] {
        self.date_columns.as_deref().unwrap_or_default()
    }

    pub fn date_format(&self) -> DateFormat {
        DateFormat::new(self.date_format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT))
    }

    pub fn header_case(&self) -> CaseStyle {
        self.header_case.clone().unwrap_or(CaseStyle::Lowercase)
    }

    pub fn text_case(&self) -> CaseStyle {
        self.text_case.clone().unwrap_or(CaseStyle::Title)
    }

    pub fn case_columns(&self) -> &[String] {
        self.case_columns.as_deref().unwrap_or_default()
    }

    pub fn missing_strategy(&self) -> MissingStrategy {
        self.missing_strategy.unwrap_or_default()
    }

    pub fn fill_value(&self) -> &str {
        self.fill_value.as_deref().unwrap_or(DEFAULT_FILL_VALUE)
    }

    pub fn replacements(&self) -> &[Replacement] {
        self.replacements.as_deref().unwrap_or_default()
    }

    pub fn replace_columns(&self) -> &[String] {
        self.replace_columns.as_deref().unwrap_or_default()
    }

    /// None when no conditions are configured.
    pub fn filter_conditions(&self) -> Option<&BTreeMap<String, FilterCondition>> {
        self.filter_conditions.as_ref().filter(|c| !c.is_empty())
    }

    pub fn sort_column(&self) -> SortColumn {
        self.sort_column.clone().unwrap_or(SortColumn::Index(0))
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order.unwrap_or_default()
    }
}

// ============================================================================
// SUB-FIELD TYPES
// ============================================================================

/// How a piece of text should be recased.
/// Unknown names deserialize to `Preserve`, which leaves text untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "String")]
pub enum CaseStyle {
    Lowercase,
    Uppercase,
    Title,
    Preserve,
}

impl CaseStyle {
    pub fn apply(&self, text: &str) -> String {
        match self {
            CaseStyle::Lowercase => text.to_lowercase(),
            CaseStyle::Uppercase => text.to_uppercase(),
            CaseStyle::Title => to_title_case(text),
            CaseStyle::Preserve => text.to_string(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStyle::Lowercase => "lowercase",
            CaseStyle::Uppercase => "uppercase",
            CaseStyle::Title => "title",
            CaseStyle::Preserve => "preserve",
        }
    }
}

impl From<String> for CaseStyle {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "lowercase" | "lower" => CaseStyle::Lowercase,
            "uppercase" | "upper" => CaseStyle::Uppercase,
            "title" | "proper" => CaseStyle::Title,
            _ => CaseStyle::Preserve,
        }
    }
}

impl From<Value> for CaseStyle {
    fn from(value: Value) -> Self {
        match value {
            Value::String(name) => CaseStyle::from(name),
            _ => CaseStyle::Preserve,
        }
    }
}

impl From<CaseStyle> for String {
    fn from(value: CaseStyle) -> Self {
        value.as_str().to_string()
    }
}

/// Uppercase the first character of every whitespace-delimited token and
/// lowercase the rest. Whitespace itself is kept as-is.
pub fn to_title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_token_start = true;
    for c in text.chars() {
        if c.is_whitespace() {
            out.push(c);
            at_token_start = true;
        } else if at_token_start {
            out.extend(c.to_uppercase());
            at_token_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// One find/replace pair. `find` is a case-insensitive regular expression.
/// A missing or null `replace` means the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub find: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub replace: String,
}

impl Replacement {
    pub fn new(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Replacement {
            find: find.into(),
            replace: replace.into(),
        }
    }
}

/// Column to sort by: a header name or a 0-based position.
/// Numbers that are not valid positions (negative, fractional) read as 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SortColumn {
    Index(usize),
    Name(String),
}

impl From<&Value> for SortColumn {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(name) => SortColumn::Name(name.clone()),
            Value::Number(n) => {
                let index = n.as_u64().and_then(|i| usize::try_from(i).ok()).or_else(|| {
                    n.as_f64()
                        .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= usize::MAX as f64)
                        .map(|f| f as usize)
                });
                SortColumn::Index(index.unwrap_or(0))
            }
            _ => SortColumn::Index(0),
        }
    }
}

impl<'de> Deserialize<'de> for SortColumn {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(SortColumn::from(&Value::deserialize(deserializer)?))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "String")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl From<Value> for SortOrder {
    fn from(value: Value) -> Self {
        match value.as_str().map(str::to_ascii_lowercase).as_deref() {
            Some("desc" | "descending") => SortOrder::Descending,
            _ => SortOrder::Ascending,
        }
    }
}

impl From<SortOrder> for String {
    fn from(value: SortOrder) -> Self {
        match value {
            SortOrder::Ascending => "asc".to_string(),
            SortOrder::Descending => "desc".to_string(),
        }
    }
}

/// What the missing-value pass does with blank data cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "String")]
pub enum MissingStrategy {
    /// Write the fill value into every blank cell.
    #[default]
    Fill,
    /// Write the column's numeric mean into every blank cell.
    Average,
    /// Drop data rows that hold no value at all.
    Remove,
}

impl From<Value> for MissingStrategy {
    fn from(value: Value) -> Self {
        match value.as_str().map(str::to_ascii_lowercase).as_deref() {
            Some("average" | "mean") => MissingStrategy::Average,
            Some("remove") => MissingStrategy::Remove,
            _ => MissingStrategy::Fill,
        }
    }
}

impl From<MissingStrategy> for String {
    fn from(value: MissingStrategy) -> Self {
        match value {
            MissingStrategy::Fill => "fill",
            MissingStrategy::Average => "average",
            MissingStrategy::Remove => "remove",
        }
        .to_string()
    }
}

/// A test on one column. Only the first present test applies, checked in
/// field order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCondition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equals: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_equals: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub greater_than: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub less_than: Option<Value>,
}

// ============================================================================
// LENIENT FIELD READERS
// ============================================================================

/// Truthiness of a loosely typed form value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn loose_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(is_truthy(&Value::deserialize(deserializer)?))
}

fn text_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(loose_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(loose_text(Value::deserialize(deserializer)?))
}

/// A list of names; a lone string counts as a one-element list.
fn optional_names<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(items.into_iter().filter_map(loose_text).collect()),
        Value::String(name) => Some(vec![name]),
        _ => None,
    })
}

/// Entries that are not find/replace objects are dropped.
fn optional_replacements<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<Replacement>>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    })
}

/// Columns whose condition is not an object are dropped.
fn optional_filters<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<BTreeMap<String, FilterCondition>>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(entries) => Some(
            entries
                .into_iter()
                .filter_map(|(column, condition)| {
                    serde_json::from_value(condition).ok().map(|c| (column, c))
                })
                .collect(),
        ),
        _ => None,
    })
}
