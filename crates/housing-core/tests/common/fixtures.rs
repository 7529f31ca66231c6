//! Test fixture loading utilities

use std::path::PathBuf;

use housing_io::Table;

/// Get the path to a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

/// Load a CSV fixture as a table
pub fn load_table_fixture(name: &str) -> Table {
    Table::read_csv(fixture_path(name))
        .unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// The 20-row King County sample
pub fn kc_sample() -> Table {
    load_table_fixture("kc_house_sample.csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_path() {
        let path = fixture_path("kc_house_sample.csv");
        assert!(path.to_string_lossy().contains("test_fixtures"));
    }
}
