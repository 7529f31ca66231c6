//! Short outlier summary printed next to the boxplot figure

use std::io::{self, Write};

use crate::detector::OutlierMap;

/// Write the summary block: a header, a rule, and one line per flagged column
pub fn write_outlier_summary<W: Write>(out: &mut W, outliers: &OutlierMap) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Z-Score Outlier Summary:")?;
    writeln!(out, "{}", "-".repeat(40))?;
    for entry in outliers.flagged() {
        writeln!(
            out,
            "{}: {} outliers ({:.2}% of values)",
            entry.column,
            entry.count(),
            entry.percent()
        )?;
    }
    Ok(())
}

/// The summary block as a string
pub fn outlier_summary(outliers: &OutlierMap) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_outlier_summary(&mut buf, outliers);
    String::from_utf8_lossy(&buf).into_owned()
}
