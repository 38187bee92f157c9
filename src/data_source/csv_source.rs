use crate::data_source::error::DataSourceError;
use crate::data_source::DataSource;
use crate::utils::get_cache_dir;
use bon::Builder;
use log::{info, warn};
use polars::prelude::*;
use std::fs;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const CACHE_FILE_PREFIX: &str = "air-quality-";

fn default_null_values() -> Vec<String> {
    vec!["NA".to_string(), "NaN".to_string()]
}

/// Reads the dataset from a CSV file with a header row.
///
/// Every row is scanned to infer column types, cells listed in `null_values` (and empty
/// cells) become null, and date-like columns are parsed as dates.
///
/// When `cache_dir` is set, the parsed frame is stored there as parquet and reused for as
/// long as it is newer than the CSV file. This keeps repeated sessions from re-parsing a
/// large file.
///
/// # Example
///
/// ```no_run
/// use air_quality::{AirQuality, CsvSource};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let source = CsvSource::builder()
///     .path("all_data.csv")
///     .cache_dir("/tmp/air_quality_cache")
///     .build();
/// let air_quality = AirQuality::new(&source)?;
/// println!("{} stations", air_quality.stations()?.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Builder)]
pub struct CsvSource {
    #[builder(into)]
    path: PathBuf,
    #[builder(into)]
    cache_dir: Option<PathBuf>,
    #[builder(default = default_null_values())]
    null_values: Vec<String>,
    #[builder(default = b',')]
    separator: u8,
}

impl CsvSource {
    /// A source for `path` without caching.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::builder().path(path).build()
    }

    /// A source for `path` caching into the platform cache directory.
    ///
    /// # Errors
    ///
    /// Returns [`DataSourceError::CacheDirResolution`] if the platform has no cache directory.
    pub fn with_default_cache(path: impl Into<PathBuf>) -> Result<Self, DataSourceError> {
        let cache_dir = get_cache_dir().map_err(DataSourceError::CacheDirResolution)?;
        Ok(Self::builder().path(path).cache_dir(cache_dir).build())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where the parquet cache for this file lives, if caching is enabled.
    pub fn cache_path(&self) -> Option<PathBuf> {
        let cache_dir = self.cache_dir.as_ref()?;
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dataset".to_string());
        Some(cache_dir.join(format!("{CACHE_FILE_PREFIX}{stem}.parquet")))
    }

    fn read_csv(&self) -> Result<DataFrame, DataSourceError> {
        let null_values = self
            .null_values
            .iter()
            .map(|v| PlSmallStr::from(v.as_str()))
            .collect::<Vec<_>>();
        let parse_options = CsvParseOptions::default()
            .with_separator(self.separator)
            .with_try_parse_dates(true)
            .with_null_values(Some(NullValues::AllColumns(null_values)));

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .with_parse_options(parse_options)
            .try_into_reader_with_file_path(Some(self.path.clone()))
            .map_err(|e| DataSourceError::CsvRead(self.path.clone(), e))?
            .finish()
            .map_err(|e| DataSourceError::CsvRead(self.path.clone(), e))?;

        info!(
            "Parsed {} rows and {} columns from {:?}",
            df.height(),
            df.width(),
            self.path
        );
        Ok(df)
    }

    /// A cache is fresh when it exists and was written after the CSV was last modified.
    fn is_cache_fresh(&self, parquet_path: &Path) -> Result<bool, DataSourceError> {
        let cache_meta = match fs::metadata(parquet_path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(DataSourceError::CacheMetadataRead(parquet_path.into(), e)),
        };
        let cache_modified = cache_meta
            .modified()
            .map_err(|e| DataSourceError::CacheMetadataRead(parquet_path.into(), e))?;
        let csv_modified = fs::metadata(&self.path)
            .and_then(|meta| meta.modified())
            .map_err(|e| DataSourceError::InputMetadataRead(self.path.clone(), e))?;
        Ok(cache_modified > csv_modified)
    }

    fn read_cache(parquet_path: &Path) -> Result<DataFrame, DataSourceError> {
        let file = File::open(parquet_path)
            .map_err(|e| DataSourceError::CacheRead(parquet_path.into(), e))?;
        ParquetReader::new(file)
            .finish()
            .map_err(|e| DataSourceError::ParquetRead(parquet_path.into(), e))
    }

    /// Writes through a temp file in the cache directory so a crash never leaves a
    /// half-written parquet file behind.
    fn write_cache(
        df: &mut DataFrame,
        cache_dir: &Path,
        parquet_path: &Path,
    ) -> Result<(), DataSourceError> {
        fs::create_dir_all(cache_dir)
            .map_err(|e| DataSourceError::CacheDirCreation(cache_dir.into(), e))?;
        let mut temp_file = NamedTempFile::new_in(cache_dir)
            .map_err(|e| DataSourceError::ParquetWriteIo(parquet_path.into(), e))?;
        ParquetWriter::new(temp_file.as_file_mut())
            .with_compression(ParquetCompression::Snappy)
            .finish(df)
            .map_err(|e| DataSourceError::ParquetWritePolars(parquet_path.into(), e))?;
        temp_file
            .persist(parquet_path)
            .map_err(|e| DataSourceError::ParquetWriteIo(parquet_path.into(), e.error))?;
        Ok(())
    }
}

impl DataSource for CsvSource {
    fn load(&self) -> Result<DataFrame, DataSourceError> {
        let (Some(cache_dir), Some(parquet_path)) = (&self.cache_dir, self.cache_path()) else {
            return self.read_csv();
        };

        if self.is_cache_fresh(&parquet_path)? {
            info!("Cache hit for {:?} at {:?}", self.path, parquet_path);
            return Self::read_cache(&parquet_path);
        }

        warn!(
            "Cache miss for {:?}. Parsing CSV and caching to {:?}.",
            self.path, parquet_path
        );
        let mut df = self.read_csv()?;
        Self::write_cache(&mut df, cache_dir, &parquet_path)?;
        info!("Cached {} rows to {:?}", df.height(), parquet_path);
        Ok(df)
    }

    fn describe(&self) -> String {
        format!("CSV file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    const CSV: &str = "\
No,year,month,day,hour,PM2.5,PM10,SO2,NO2,CO,O3,TEMP,PRES,DEWP,RAIN,wd,WSPM,station,date
1,2013,3,1,0,4,4,4,7,300,77,-0.7,1023,-18.8,0,NNW,4.4,Aotizhongxin,2013-03-01
2,2013,3,1,1,NA,8,4,7,300,77,-1.1,1023.2,-18.2,0,N,4.7,Aotizhongxin,2013-03-01
3,2013,3,2,0,12.5,12,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,Dongsi,2013-03-02
";

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
        let path = dir.path().join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    fn set_modified(path: &Path, time: SystemTime) -> io::Result<()> {
        File::options().write(true).open(path)?.set_modified(time)
    }

    #[test]
    fn test_read_csv_handles_na_cells() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let path = write_file(&dir, "all_data.csv", CSV)?;

        let df = CsvSource::new(&path).load()?;

        assert_eq!(df.height(), 3);
        assert_eq!(df.column("date")?.dtype(), &DataType::Date);
        let pm25 = df.column("PM2.5")?.cast(&DataType::Float64)?;
        let pm25: Vec<Option<f64>> = pm25.f64()?.into_iter().collect();
        assert_eq!(pm25, vec![Some(4.0), None, Some(12.5)]);
        assert_eq!(df.column("CO")?.null_count(), 1);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = CsvSource::new("/definitely/not/here.csv").load();
        assert!(matches!(result, Err(DataSourceError::CsvRead(_, _))));
    }

    #[test]
    fn test_cache_is_written_reused_and_refreshed() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let cache_dir = dir.path().join("cache");
        let path = write_file(&dir, "all_data.csv", CSV)?;
        let source = CsvSource::builder()
            .path(path.clone())
            .cache_dir(cache_dir.clone())
            .build();
        let parquet_path = source.cache_path().ok_or("cache path expected")?;
        assert_eq!(parquet_path, cache_dir.join("air-quality-all_data.parquet"));

        assert_eq!(source.load()?.height(), 3);
        assert!(parquet_path.exists(), "cache file should be written on a miss");

        // The CSV changes but looks older than the cache: the cached frame is served.
        let shorter: String = CSV.lines().take(2).collect::<Vec<_>>().join("\n") + "\n";
        fs::write(&path, &shorter)?;
        set_modified(&path, SystemTime::UNIX_EPOCH + Duration::from_secs(60))?;
        assert_eq!(source.load()?.height(), 3);

        // Once the CSV is newer than the cache, it is parsed again.
        set_modified(&path, SystemTime::now() + Duration::from_secs(3600))?;
        assert_eq!(source.load()?.height(), 1);
        Ok(())
    }

    #[test]
    fn test_custom_separator_and_nulls() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let path = write_file(
            &dir,
            "semicolon.csv",
            "date;hour;station;PM2.5\n2020-01-01;0;A;-\n2020-01-01;1;A;3.5\n",
        )?;
        let source = CsvSource::builder()
            .path(path)
            .separator(b';')
            .null_values(vec!["-".to_string()])
            .build();
        let df = source.load()?;
        assert_eq!(df.height(), 2);
        assert_eq!(df.column("PM2.5")?.null_count(), 1);
        Ok(())
    }
}
