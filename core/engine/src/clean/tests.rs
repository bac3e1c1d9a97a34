//! FILENAME: core/engine/src/clean/tests.rs
//! PURPOSE: Pipeline-level scenarios for `clean` and `clean_sheets`.

use super::*;
use crate::cell::CellValue;

fn text_grid(rows: &[&[&str]]) -> Grid {
    Grid::from_rows(
        rows.iter()
            .map(|row| row.iter().map(|&s| CellValue::from(s)).collect())
            .collect(),
    )
}

fn all_stages() -> CleaningOptions {
    CleaningOptions {
        remove_duplicates: true,
        trim_spaces: true,
        convert_types: true,
        standardize_dates: true,
        fix_text_case: true,
        remove_blank_rows: true,
        normalize_column_names: true,
        find_and_replace: true,
        sort_data: true,
        ..CleaningOptions::recommended()
    }
}

// ============================================================================
// DEGENERATE INPUTS
// ============================================================================

#[test]
fn test_empty_grid_short_circuits() {
    let (grid, stats) = clean(Grid::new(), &all_stages());
    assert!(grid.is_empty());
    assert_eq!(stats, Statistics::default());
}

#[test]
fn test_header_only_grid() {
    let input = text_grid(&[&["Name", "Joined"]]);
    let options = CleaningOptions {
        remove_duplicates: true,
        convert_types: true,
        standardize_dates: true,
        sort_data: true,
        ..CleaningOptions::default()
    };
    let (grid, stats) = clean(input.clone(), &options);
    assert_eq!(grid, input);
    assert_eq!(stats.total_operations, 0);
    assert_eq!(stats.rows_before, 1);
    assert_eq!(stats.rows_after, 1);
}

#[test]
fn test_no_options_is_a_noop() {
    let input = Grid::from_rows(vec![
        vec!["  Name ".into(), "N/A".into()],
        vec!["x  y".into(), "42".into()],
        vec!["x  y".into(), "42".into()],
        vec![CellValue::Empty, CellValue::text("")],
    ]);
    let (grid, stats) = clean(input.clone(), &CleaningOptions::default());
    assert_eq!(grid, input);
    assert_eq!(stats.total_operations, 0);
    assert_eq!(stats.rows_removed(), 0);
    assert_eq!(stats.columns_removed(), 0);
}

#[test]
fn test_enabled_replace_without_rules_does_nothing() {
    let input = text_grid(&[&["h"], &["N/A"]]);
    let options = CleaningOptions {
        find_and_replace: true,
        replacements: None,
        ..CleaningOptions::default()
    };
    assert!(!Stage::FindAndReplace.is_enabled(&options));
    let (grid, stats) = clean(input.clone(), &options);
    assert_eq!(grid, input);
    assert_eq!(stats.replacements_made, 0);
}

// ============================================================================
// STAGE ORDER
// ============================================================================

#[test]
fn test_order_is_fixed() {
    assert_eq!(Stage::ORDER.first(), Some(&Stage::RemoveDuplicates));
    assert_eq!(Stage::ORDER.last(), Some(&Stage::SortData));
    let names: Vec<&str> = Stage::ORDER.iter().map(Stage::name).collect();
    assert_eq!(
        names,
        [
            "removeDuplicates",
            "trimSpaces",
            "convertTypes",
            "standardizeDates",
            "fixTextCase",
            "removeBlankRows",
            "handleMissing",
            "normalizeColumnNames",
            "findAndReplace",
            "filterConditions",
            "sortData",
        ]
    );
}

#[test]
fn test_dedup_runs_before_trim() {
    let options = CleaningOptions {
        remove_duplicates: true,
        trim_spaces: true,
        ..CleaningOptions::default()
    };
    let (grid, stats) = clean(text_grid(&[&["h"], &["a "], &["a"]]), &options);
    assert_eq!(stats.duplicates_removed, 0);
    assert_eq!(stats.spaces_fixed, 1);
    assert_eq!(grid, text_grid(&[&["h"], &["a"], &["a"]]));
}

#[test]
fn test_converted_serials_feed_date_stage() {
    let options = CleaningOptions {
        convert_types: true,
        standardize_dates: true,
        date_serials: true,
        ..CleaningOptions::default()
    };
    let (grid, stats) = clean(text_grid(&[&["Joined"], &["45356"]]), &options);
    assert_eq!(stats.types_converted, 1);
    assert_eq!(stats.dates_standardized, 1);
    assert_eq!(grid.rows[1][0], CellValue::text("2024-03-05"));
}

#[test]
fn test_replace_sees_normalized_headers() {
    let options = CleaningOptions {
        normalize_column_names: true,
        find_and_replace: true,
        replacements: Some(vec![Replacement::new("N/A", "none")]),
        ..CleaningOptions::default()
    };
    let (grid, stats) = clean(text_grid(&[&["N/A Count"], &["N/A"]]), &options);
    assert_eq!(stats.columns_normalized, 1);
    assert_eq!(stats.replacements_made, 1);
    assert_eq!(grid, text_grid(&[&["na_count"], &["none"]]));
}

#[test]
fn test_missing_values_filled_after_blank_rows_go() {
    let options = CleaningOptions::from_json(
        r#"{"removeBlankRows": true, "handleMissing": true, "fillValue": "-"}"#,
    )
    .unwrap();
    let input = text_grid(&[&["Name", "Note"], &["a", ""], &["", ""]]);

    let (grid, stats) = clean(input, &options);

    assert_eq!(grid, text_grid(&[&["Name", "Note"], &["a", "-"]]));
    assert_eq!(stats.blanks_removed, 1);
    assert_eq!(stats.missing_handled, 1);
    assert_eq!(stats.total_operations, 1);
}

#[test]
fn test_filter_sees_converted_values_and_runs_before_sort() {
    let options = CleaningOptions::from_json(
        r#"{"convertTypes": true, "sortData": true, "sortColumn": "Name",
            "filterConditions": {"Age": {"equals": 40}}}"#,
    )
    .unwrap();
    let input = text_grid(&[&["Name", "Age"], &["d", "40"], &["a", "12"], &["b", "40"]]);

    let (grid, stats) = clean(input, &options);

    assert_eq!(
        grid,
        Grid::from_rows(vec![
            vec!["Name".into(), "Age".into()],
            vec!["b".into(), CellValue::Number(40.0)],
            vec!["d".into(), CellValue::Number(40.0)],
        ])
    );
    assert_eq!(stats.rows_filtered, 1);
    assert_eq!(stats.types_converted, 3);
}

#[test]
fn test_scoped_case_and_replace() {
    let options = CleaningOptions::from_json(
        r#"{"fixTextCase": true, "headerCase": "preserve", "textCase": "upper", "caseColumns": ["Code"],
            "findAndReplace": true, "replacements": [{"find": "x", "replace": "$&$&"}],
            "replaceColumns": ["Note"]}"#,
    )
    .unwrap();
    let input = text_grid(&[&["Code", "Note"], &["ax", "ax"]]);

    let (grid, stats) = clean(input, &options);

    assert_eq!(grid, text_grid(&[&["Code", "Note"], &["AX", "axx"]]));
    assert_eq!(stats.case_fixed, 1);
    assert_eq!(stats.replacements_made, 1);
}

// ============================================================================
// FULL RUN
// ============================================================================

#[test]
fn test_all_stages_end_to_end() {
    let input = text_grid(&[
        &["  First   Name ", "Age", "Joined", ""],
        &["john  smith", "42", "03/05/2024", ""],
        &["john  smith", "42", "03/05/2024", ""],
        &["", "", "", ""],
        &["ann lee", "N/A", "2024-01-02", ""],
    ]);
    let options = CleaningOptions {
        sort_column: Some(SortColumn::Name("first_name".into())),
        ..all_stages()
    };

    let (grid, stats) = clean(input, &options);

    assert_eq!(
        grid,
        Grid::from_rows(vec![
            vec!["first_name".into(), "age".into(), "joined".into()],
            vec!["Ann Lee".into(), "".into(), "2024-01-02".into()],
            vec!["John Smith".into(), CellValue::Number(42.0), "2024-03-05".into()],
        ])
    );

    assert_eq!(stats.duplicates_removed, 1);
    assert_eq!(stats.spaces_fixed, 2);
    assert_eq!(stats.types_converted, 1);
    // Both dates parse; the ISO one is rewritten to itself and still counts.
    assert_eq!(stats.dates_standardized, 2);
    // 3 header cells, "john smith", "ann lee" and "N/A" -> "N/a".
    assert_eq!(stats.case_fixed, 6);
    assert_eq!(stats.blanks_removed, 2);
    assert_eq!(stats.columns_normalized, 1);
    assert_eq!(stats.replacements_made, 1);
    assert_eq!(stats.total_operations, 16);

    assert_eq!(stats.rows_before, 5);
    assert_eq!(stats.rows_after, 3);
    assert_eq!(stats.columns_before, 4);
    assert_eq!(stats.columns_after, 3);
}

#[test]
fn test_options_from_partial_json() {
    let options = CleaningOptions::from_json(r#"{"sortData": true, "sortOrder": "desc"}"#).unwrap();
    let (grid, stats) = clean(text_grid(&[&["n"], &["a"], &["c"], &["b"]]), &options);
    assert_eq!(grid, text_grid(&[&["n"], &["c"], &["b"], &["a"]]));
    assert_eq!(stats.total_operations, 0);
}

// ============================================================================
// MULTI-SHEET
// ============================================================================

#[test]
fn test_clean_sheets_merges_statistics() {
    let mut sheets = vec![
        text_grid(&[&["h"], &["x"], &["x"]]),
        text_grid(&[&["h"], &["y"], &["y"], &["y"]]),
        Grid::new(),
    ];
    let options = CleaningOptions {
        remove_duplicates: true,
        ..CleaningOptions::default()
    };

    let stats = clean_sheets(sheets.iter_mut(), &options);

    assert_eq!(stats.duplicates_removed, 3);
    assert_eq!(stats.total_operations, 3);
    assert_eq!(stats.rows_before, 7);
    assert_eq!(stats.rows_after, 4);
    assert_eq!(sheets[0], text_grid(&[&["h"], &["x"]]));
    assert_eq!(sheets[1], text_grid(&[&["h"], &["y"]]));
    assert!(sheets[2].is_empty());
}
