use crate::data_source::error::DataSourceError;
use log::info;
use polars::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes `df` as UTF-8 CSV with a header row. Dates are written as `YYYY-MM-DD` and
/// missing readings as empty cells.
pub fn write_csv<W: Write>(df: &mut DataFrame, writer: W) -> Result<(), DataSourceError> {
    CsvWriter::new(writer)
        .include_header(true)
        .with_separator(b',')
        .finish(df)
        .map_err(DataSourceError::CsvWrite)
}

/// Writes `df` to a CSV file at `path`, replacing any existing file.
pub fn export_csv(df: &mut DataFrame, path: &Path) -> Result<(), DataSourceError> {
    let file = File::create(path).map_err(|e| DataSourceError::ExportIo(path.into(), e))?;
    let mut writer = BufWriter::new(file);
    write_csv(df, &mut writer)?;
    writer
        .flush()
        .map_err(|e| DataSourceError::ExportIo(path.into(), e))?;
    info!("Exported {} rows to {:?}", df.height(), path);
    Ok(())
}
