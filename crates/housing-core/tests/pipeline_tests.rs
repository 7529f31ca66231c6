//! End-to-end tests over the King County sample fixture

mod common;

use chrono::NaiveDate;

use common::fixtures::kc_sample;
use housing_core::{
    check_special_variables_at, create_zscore_boxplot_to, describe_outliers, identify_outliers,
    identify_outliers_in, outlier_summary, to_json, AnalysisError, Column, FigureConfig,
    HousePrices, Table, OUTLIER_COLUMNS,
};

// === Detector ===

#[test]
fn test_fixture_loads_with_expected_types() {
    let table = kc_sample();
    assert_eq!(table.num_rows(), 20);
    assert_eq!(table.num_columns(), 21);
    assert!(matches!(table.column("id"), Some(Column::Int(_))));
    assert!(matches!(table.column("date"), Some(Column::Text(_))));
    assert!(matches!(table.column("bathrooms"), Some(Column::Float(_))));
    assert!(table.column("lat").unwrap().is_missing(18));
}

#[test]
fn test_detector_on_fixture() {
    let table = kc_sample();
    let map = identify_outliers(&table, 3.0).unwrap();

    assert_eq!(map.len(), OUTLIER_COLUMNS.len());
    assert_eq!(map.column_names(), OUTLIER_COLUMNS.to_vec());
    assert_eq!(map.positions("price"), Some(&[7][..]));
    assert_eq!(map.positions("sqft_living"), Some(&[7][..]));
    assert_eq!(map.positions("sqft_lot"), Some(&[12][..]));
    assert_eq!(map.positions("sqft_lot15"), Some(&[12][..]));
    assert_eq!(map.positions("sqft_basement"), Some(&[][..]));
    assert_eq!(map.positions("lat"), Some(&[][..]));
    assert_eq!(map.get("lat").unwrap().non_missing, 19);
    assert_eq!(map.total_outliers(), 5);
}

#[test]
fn test_lower_threshold_adds_basement() {
    let table = kc_sample();
    let map = identify_outliers(&table, 2.0).unwrap();
    assert_eq!(map.positions("sqft_basement"), Some(&[7][..]));
    assert_eq!(map.flagged().count(), 6);
}

#[test]
fn test_positions_resolve_to_rows() {
    let table = kc_sample();
    let map = identify_outliers(&table, 3.0).unwrap();
    let price = map.get("price").unwrap();
    assert_eq!(price.rows(&table).unwrap(), vec![7]);
    let view = table.non_missing("price").unwrap();
    assert_eq!(price.values(&view).unwrap(), vec![2_950_000.0]);
}

#[test]
fn test_detector_is_idempotent() {
    let table = kc_sample();
    let first = identify_outliers(&table, 2.5).unwrap();
    let second = identify_outliers(&table, 2.5).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_single_high_price() {
    let mut prices: Vec<f64> = (0..19)
        .map(|i| 100_000.0 + (i as f64 * 10_000.0 / 18.0))
        .collect();
    prices.push(950_000.0);
    let table = Table::new()
        .with_column("price", Column::floats(prices.clone()))
        .unwrap();

    let map = identify_outliers_in(&table, &["price"], 2.0).unwrap();
    let positions = map.positions("price").unwrap();
    assert_eq!(positions, &[19]);
    assert_eq!(prices[positions[0]], 950_000.0);
}

#[test]
fn test_missing_column_fails_whole_run() {
    let table = kc_sample();
    let err = identify_outliers_in(&table, &["price", "no_such_column"], 3.0).unwrap_err();
    assert!(matches!(err, AnalysisError::ColumnNotFound(name) if name == "no_such_column"));
}

#[test]
fn test_invalid_threshold() {
    let table = kc_sample();
    assert!(matches!(
        identify_outliers(&table, 0.0),
        Err(AnalysisError::InvalidThreshold(_))
    ));
    assert!(identify_outliers(&table, f64::NAN).is_err());
}

// === Visual reporter ===

#[test]
fn test_boxplot_figure_and_summary() {
    let table = kc_sample();
    let mut out = Vec::new();
    let (figure, map) = create_zscore_boxplot_to(&table, 3.0, &mut out).unwrap();

    assert_eq!(figure.title, "Boxplots with Z-Score Outliers (Z > 3)");
    assert_eq!(figure.panels.len(), 9);
    assert_eq!((figure.layout.rows, figure.layout.cols), (3, 3));
    assert_eq!(figure.layout.hidden_cells(), 0);

    let price = figure.panel("price").unwrap();
    assert_eq!(price.title, "price\n(Z-score outliers: 1)");
    assert_eq!(price.outliers, vec![2_950_000.0]);
    assert!(price.has_legend());
    assert!(!figure.panel("lat").unwrap().has_legend());

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, outlier_summary(&map));
    assert!(text.contains("price: 1 outliers (5.00% of values)"));
    assert!(text.contains("sqft_lot: 1 outliers (5.00% of values)"));
    assert!(!text.contains("lat:"));
}

#[test]
fn test_boxplot_renders_to_svg() {
    let table = kc_sample();
    let mut sink = Vec::new();
    let (figure, _) = create_zscore_boxplot_to(&table, 3.0, &mut sink).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("boxplots.svg");
    figure.save(&path, &FigureConfig::default()).unwrap();
    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains("Z-score outliers"));
}

// === Textual reporter ===

#[test]
fn test_outlier_details_on_fixture() {
    let table = kc_sample();
    let map = identify_outliers(&table, 3.0).unwrap();
    let report = describe_outliers(&table, &map).unwrap();

    let names: Vec<&str> = report.columns.iter().map(|d| d.column.as_str()).collect();
    assert_eq!(
        names,
        vec!["price", "sqft_living", "sqft_lot", "sqft_above", "sqft_lot15"]
    );

    let price = report.get("price").unwrap();
    assert_eq!(price.count, 1);
    assert!((price.percent - 5.0).abs() < 1e-10);
    assert_eq!(price.mean, 2_950_000.0);
    assert_eq!(price.std_dev, None);

    let text = report.to_string();
    assert!(text.contains("Outlier Count: 1 (5.00% of values)"));
    assert!(text.contains("  • 2,950,000.00"));

    let json = to_json(&report).unwrap();
    assert!(json.contains("\"column\": \"sqft_lot\""));
}

#[test]
fn test_special_variables_on_fixture() {
    let table = kc_sample();
    let before = table.clone();
    let now = NaiveDate::from_ymd_opt(2026, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let report = check_special_variables_at(&table, now).unwrap();

    assert_eq!(table, before);
    assert_eq!(report.renovation_before_build, 1);
    assert_eq!(report.year_renovated.distinct, vec![0, 1950, 2005]);
    assert_eq!(report.zipcode.distinct_count(), 10);
    assert_eq!(report.zipcode.top_counts.len(), 5);
    assert_eq!(report.zipcode.top_counts[0].value, 98003);
    assert_eq!(report.zipcode.top_counts[0].count, 2);

    let first = NaiveDate::from_ymd_opt(2014, 5, 1).unwrap().and_hms_opt(0, 0, 0);
    let last = NaiveDate::from_ymd_opt(2014, 12, 22).unwrap().and_hms_opt(0, 0, 0);
    assert_eq!(report.dates.earliest, first);
    assert_eq!(report.dates.latest, last);
    assert_eq!(report.dates.future_count, 0);
}

#[test]
fn test_renovation_scenario() {
    let table = Table::new()
        .with_column("yr_renovated", Column::ints([0, 0, 1985]))
        .unwrap()
        .with_column("yr_built", Column::ints([1990, 1975, 1995]))
        .unwrap();
    assert_eq!(housing_core::count_renovation_before_build(&table).unwrap(), 1);
}

// === Analysis handle and persistence ===

#[test]
fn test_analysis_handle_round_trip() {
    let table = kc_sample();
    let analysis = HousePrices::new(&table);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kc_copy.csv");
    assert!(analysis.save(&path, false));

    let reloaded = Table::read_csv(&path).unwrap();
    assert_eq!(reloaded, table);
    assert_eq!(
        analysis.identify_outliers(3.0).unwrap(),
        identify_outliers(&reloaded, 3.0).unwrap()
    );
}

#[test]
fn test_save_with_row_labels() {
    let table = kc_sample();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("labelled.csv");
    assert!(housing_core::save(&table, &path, true));

    let text = std::fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert!(lines.next().unwrap().starts_with(",id,date,price"));
    assert!(lines.next().unwrap().starts_with("0,7129300520,"));
}

#[test]
fn test_save_into_missing_directory_fails() {
    let table = kc_sample();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent").join("out.csv");
    assert!(!housing_core::save(&table, &path, false));
    assert!(!path.exists());
}
