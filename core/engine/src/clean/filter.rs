//! FILENAME: core/engine/src/clean/filter.rs
//! PURPOSE: Keep only the data rows that satisfy every column condition.
//! CONTEXT: Conditions are keyed by header name. A name that matches no
//! header reads as a blank cell in every row. Comparisons follow the upload
//! form's loose rules: `equals` is strict (a number never equals the text
//! "5"), `contains` compares text case-insensitively, and the ordering tests
//! compare numerically, failing when either side is not a number.

use std::collections::BTreeMap;

use crate::cell::CellValue;
use crate::clean::options::FilterCondition;
use crate::coerce::parse_number;
use crate::grid::Grid;
use serde_json::Value;

static EMPTY: CellValue = CellValue::Empty;

/// Returns the number of data rows dropped.
pub fn filter_rows(grid: &mut Grid, conditions: &BTreeMap<String, FilterCondition>) -> usize {
    if grid.row_count() <= 1 || conditions.is_empty() {
        return 0;
    }

    let resolved: Vec<(Option<usize>, &FilterCondition)> = conditions
        .iter()
        .map(|(name, condition)| {
            let col = grid.column_index(name);
            if col.is_none() {
                log::debug!(target: "CLEAN", "filter column {:?} not found", name);
            }
            (col, condition)
        })
        .collect();

    let header = grid.rows.remove(0);
    let before = grid.rows.len();
    grid.rows.retain(|row| {
        resolved.iter().all(|(col, condition)| {
            let cell = col.and_then(|c| row.get(c)).unwrap_or(&EMPTY);
            condition.accepts(cell)
        })
    });
    let dropped = before - grid.rows.len();
    grid.rows.insert(0, header);
    dropped
}

impl FilterCondition {
    /// Applies the first test that is set. No test set accepts everything.
    pub fn accepts(&self, cell: &CellValue) -> bool {
        if let Some(expected) = &self.equals {
            return strict_equals(cell, expected);
        }
        if let Some(expected) = &self.not_equals {
            return !strict_equals(cell, expected);
        }
        if let Some(needle) = &self.contains {
            let haystack = cell_text(cell).to_lowercase();
            return haystack.contains(&value_text(needle).to_lowercase());
        }
        if let Some(bound) = &self.greater_than {
            return matches!((cell_number(cell), value_number(bound)), (Some(a), Some(b)) if a > b);
        }
        if let Some(bound) = &self.less_than {
            return matches!((cell_number(cell), value_number(bound)), (Some(a), Some(b)) if a < b);
        }
        true
    }
}

fn strict_equals(cell: &CellValue, expected: &Value) -> bool {
    match (cell, expected) {
        (CellValue::Text(text), Value::String(s)) => text == s,
        (CellValue::Number(n), Value::Number(m)) => m.as_f64() == Some(*n),
        (CellValue::Boolean(b), Value::Bool(c)) => b == c,
        _ => false,
    }
}

fn cell_text(cell: &CellValue) -> String {
    match cell {
        CellValue::Boolean(b) => b.to_string(),
        other => other.display_value(),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Blank-but-present text reads as 0; an empty cell is not a number.
fn text_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Some(0.0)
    } else {
        parse_number(trimmed)
    }
}

fn cell_number(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Empty => None,
        CellValue::Number(n) => Some(*n),
        CellValue::Text(text) => text_number(text),
        CellValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
    }
}

fn value_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => text_number(s),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn people() -> Grid {
        Grid::from_rows(vec![
            vec!["Name".into(), "Age".into(), "City".into()],
            vec!["Ann".into(), CellValue::Number(31.0), "Oslo".into()],
            vec!["Bob".into(), CellValue::Number(19.0), "Bergen".into()],
            vec!["Cy".into(), "42".into(), CellValue::Empty],
        ])
    }

    fn conditions(raw: serde_json::Value) -> BTreeMap<String, FilterCondition> {
        serde_json::from_value(raw).unwrap()
    }

    fn names(grid: &Grid) -> Vec<String> {
        grid.data_rows().iter().map(|row| row[0].display_value()).collect()
    }

    #[test]
    fn test_greater_than_reads_numeric_text() {
        let mut grid = people();
        let dropped = filter_rows(&mut grid, &conditions(json!({"Age": {"greaterThan": 20}})));
        assert_eq!(dropped, 1);
        assert_eq!(names(&grid), ["Ann", "Cy"]);
        assert_eq!(grid.rows[0][0], CellValue::text("Name"));
    }

    #[test]
    fn test_all_conditions_must_hold() {
        let mut grid = people();
        let rules = conditions(json!({
            "Age": {"lessThan": "40"},
            "City": {"contains": "O"}
        }));
        assert_eq!(filter_rows(&mut grid, &rules), 2);
        assert_eq!(names(&grid), ["Ann"]);
    }

    #[test]
    fn test_equals_is_strict() {
        let mut grid = people();
        filter_rows(&mut grid, &conditions(json!({"Age": {"equals": 42}})));
        // "42" is text, so only numeric 42 would match.
        assert!(names(&grid).is_empty());

        let mut grid = people();
        filter_rows(&mut grid, &conditions(json!({"Name": {"notEquals": "Bob"}})));
        assert_eq!(names(&grid), ["Ann", "Cy"]);
    }

    #[test]
    fn test_first_present_test_wins() {
        let condition = FilterCondition {
            equals: Some(json!("Oslo")),
            contains: Some(json!("zzz")),
            ..FilterCondition::default()
        };
        assert!(condition.accepts(&CellValue::text("Oslo")));
        assert!(FilterCondition::default().accepts(&CellValue::Empty));
    }

    #[test]
    fn test_unknown_column_reads_as_blank() {
        let mut grid = people();
        let dropped = filter_rows(&mut grid, &conditions(json!({"Zip": {"notEquals": "x"}})));
        assert_eq!(dropped, 0);

        let dropped = filter_rows(&mut grid, &conditions(json!({"Zip": {"greaterThan": 0}})));
        assert_eq!(dropped, 3);
        assert_eq!(grid.row_count(), 1);
    }
}
