//! housing-eda - exploratory analysis of a house-sale CSV
//!
//! Usage: `housing-eda <data.csv> [threshold] [figure.svg|png] [output.csv]`
//!
//! Prints the outlier summary, the detailed outlier report and the
//! special-variable checks, writes the boxplot figure and optionally
//! saves the table again. Defaults come from the TOML file named by
//! `HOUSING_EDA_CONFIG`; positional arguments override them.

use tracing_subscriber::EnvFilter;

use housing_core::{EdaConfig, HousePrices};
use housing_io::Table;

const USAGE: &str = "usage: housing-eda <data.csv> [threshold] [figure.svg|png] [output.csv]";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut config = match std::env::var("HOUSING_EDA_CONFIG") {
        Ok(path) => EdaConfig::load(path)?,
        Err(_) => EdaConfig::default(),
    };

    let mut args = std::env::args().skip(1);
    let Some(input) = args.next() else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };
    if let Some(raw) = args.next() {
        config.threshold = raw.parse::<f64>()?;
    }
    if let Some(path) = args.next() {
        config.figure_path = path;
    }
    let output = args.next();
    config.validate()?;

    let table = Table::read_csv(&input)?;
    tracing::info!(
        path = %input,
        rows = table.num_rows(),
        columns = table.num_columns(),
        "loaded table"
    );

    let analysis = HousePrices::new(&table);
    let (figure, outliers) = analysis.create_zscore_boxplot(config.threshold)?;
    figure.save(&config.figure_path, &config.figure)?;

    analysis.print_outlier_details(&outliers)?;
    analysis.check_special_variables()?;

    if let Some(output) = output {
        if !analysis.save(&output, config.include_row_labels) {
            return Err(format!("could not save table to {}", output).into());
        }
    }

    Ok(())
}
