use air_quality::{AirQuality, CsvSource, FilterCriteria, Measure};
use std::env;

/// Usage: `dashboard <csv> [start] [end] [station|All]`
///
/// Dates accept `YYYY-MM-DD`, `YYYY-MM` or `YYYY`. Missing dates fall back to the
/// dataset's own bounds.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    configure_polars_display();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(path) = args.first() else {
        eprintln!("usage: dashboard <csv> [start] [end] [station|All]");
        std::process::exit(2);
    };

    let air_quality = AirQuality::new(CsvSource::with_default_cache(path.as_str())?)?;
    println!("Stations: {}", air_quality.stations()?.join(", "));

    let Some(defaults) = air_quality.default_criteria()? else {
        eprintln!("{path} holds no observations");
        return Ok(());
    };
    let start = args.get(1).cloned().unwrap_or_else(|| defaults.date_start.to_string());
    let end = args.get(2).cloned().unwrap_or_else(|| defaults.date_end.to_string());
    let criteria = FilterCriteria::from_dates(start, end, args.get(3).map(String::as_str))?;

    let report = air_quality.report(&criteria)?;
    println!("{}", report.to_json_pretty()?);

    let subset = air_quality.filter(&criteria);
    for row in subset.station_means(&[Measure::Pm25])?.ranked_by(Measure::Pm25) {
        if let Some(pm25) = row.mean(Measure::Pm25) {
            println!("{}: PM2.5 {:.1}", row.key, pm25);
        }
    }

    let labelled = subset.with_category()?;
    println!("{}", labelled.head(Some(20)));

    let export = env::temp_dir().join("air_quality_filtered.csv");
    subset.export_csv(&export)?;
    println!("Filtered rows written to {}", export.display());

    Ok(())
}

fn configure_polars_display() {
    // show every column
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    // show 20 rows
    env::set_var("POLARS_FMT_MAX_ROWS", "20");
}
