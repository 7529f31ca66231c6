//! Column names of the house-sales dataset

/// Row identifier
pub const ID: &str = "id";
/// Sale date, e.g. `20141013T000000`
pub const DATE: &str = "date";
/// Sale price
pub const PRICE: &str = "price";
pub const BEDROOMS: &str = "bedrooms";
pub const BATHROOMS: &str = "bathrooms";
/// Interior living space, square feet
pub const SQFT_LIVING: &str = "sqft_living";
/// Land area, square feet
pub const SQFT_LOT: &str = "sqft_lot";
pub const FLOORS: &str = "floors";
pub const WATERFRONT: &str = "waterfront";
pub const VIEW: &str = "view";
pub const CONDITION: &str = "condition";
pub const GRADE: &str = "grade";
/// Living space above ground level
pub const SQFT_ABOVE: &str = "sqft_above";
/// Living space below ground level
pub const SQFT_BASEMENT: &str = "sqft_basement";
pub const YR_BUILT: &str = "yr_built";
/// Renovation year, `0` when never renovated
pub const YR_RENOVATED: &str = "yr_renovated";
pub const ZIPCODE: &str = "zipcode";
pub const LAT: &str = "lat";
pub const LONG: &str = "long";
/// Living space of the nearest 15 neighbors
pub const SQFT_LIVING15: &str = "sqft_living15";
/// Lot size of the nearest 15 neighbors
pub const SQFT_LOT15: &str = "sqft_lot15";

/// Every expected column, in file order
pub const ALL_COLUMNS: [&str; 21] = [
    ID,
    DATE,
    PRICE,
    BEDROOMS,
    BATHROOMS,
    SQFT_LIVING,
    SQFT_LOT,
    FLOORS,
    WATERFRONT,
    VIEW,
    CONDITION,
    GRADE,
    SQFT_ABOVE,
    SQFT_BASEMENT,
    YR_BUILT,
    YR_RENOVATED,
    ZIPCODE,
    LAT,
    LONG,
    SQFT_LIVING15,
    SQFT_LOT15,
];

/// Column identifying a sale record
pub const IDENTIFIER_COLUMN: &str = ID;

/// Columns describing the transaction itself
pub const TRANSACTION_COLUMNS: [&str; 2] = [DATE, PRICE];

/// Columns describing the house
pub const HOUSE_ATTRIBUTES: [&str; 18] = [
    BEDROOMS,
    BATHROOMS,
    SQFT_LIVING,
    SQFT_LOT,
    FLOORS,
    WATERFRONT,
    VIEW,
    CONDITION,
    GRADE,
    SQFT_ABOVE,
    SQFT_BASEMENT,
    YR_BUILT,
    YR_RENOVATED,
    ZIPCODE,
    LAT,
    LONG,
    SQFT_LIVING15,
    SQFT_LOT15,
];

/// Continuous measurements screened for z-score outliers, in report order
pub const OUTLIER_COLUMNS: [&str; 9] = [
    PRICE,
    SQFT_LIVING,
    SQFT_LOT,
    SQFT_ABOVE,
    SQFT_BASEMENT,
    LAT,
    LONG,
    SQFT_LIVING15,
    SQFT_LOT15,
];

/// Monetary columns get thousands separators on figure axes
pub fn is_monetary(column: &str) -> bool {
    column == PRICE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_partition_all_columns() {
        let mut grouped: Vec<&str> = vec![IDENTIFIER_COLUMN];
        grouped.extend(TRANSACTION_COLUMNS);
        grouped.extend(HOUSE_ATTRIBUTES);
        grouped.sort_unstable();

        let mut all = ALL_COLUMNS.to_vec();
        all.sort_unstable();
        assert_eq!(grouped, all);
    }

    #[test]
    fn test_outlier_columns_are_known() {
        assert!(OUTLIER_COLUMNS.iter().all(|c| ALL_COLUMNS.contains(c)));
        assert!(is_monetary(PRICE));
        assert!(!is_monetary(SQFT_LOT));
    }
}
