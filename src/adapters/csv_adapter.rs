//! CSV candle file adapter.
//!
//! Expects a header row and columns `timestamp,open,high,low,close,volume`.
//! Timestamps accept `%Y-%m-%d %H:%M:%S`, ISO-T, or a bare date (midnight).

use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::PathBuf;

use crate::domain::candle::Candle;
use crate::domain::error::BandtraderError;
use crate::ports::data_port::DataPort;

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, BandtraderError> {
    if let Ok(ts) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Ok(ts);
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(ts);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(ts) = date.and_hms_opt(0, 0, 0) {
            return Ok(ts);
        }
    }
    Err(BandtraderError::Data {
        reason: format!("invalid timestamp: {}", value),
    })
}

fn parse_field(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<f64, BandtraderError> {
    record
        .get(index)
        .ok_or_else(|| BandtraderError::Data {
            reason: format!("missing {} column", name),
        })?
        .trim()
        .parse()
        .map_err(|e| BandtraderError::Data {
            reason: format!("invalid {} value: {}", name, e),
        })
}

impl DataPort for CsvAdapter {
    fn fetch_candles(&self) -> Result<Vec<Candle>, BandtraderError> {
        let content = fs::read_to_string(&self.path).map_err(|e| BandtraderError::Data {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut candles = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| BandtraderError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let timestamp_str = record.get(0).ok_or_else(|| BandtraderError::Data {
                reason: "missing timestamp column".into(),
            })?;

            candles.push(Candle {
                timestamp: parse_timestamp(timestamp_str.trim())?,
                open: parse_field(&record, 1, "open")?,
                high: parse_field(&record, 2, "high")?,
                low: parse_field(&record, 3, "low")?,
                close: parse_field(&record, 4, "close")?,
                volume: parse_field(&record, 5, "volume")?,
            });
        }

        Ok(candles)
    }

    fn data_range(
        &self,
    ) -> Result<Option<(NaiveDateTime, NaiveDateTime, usize)>, BandtraderError> {
        let candles = self.fetch_candles()?;
        match (candles.first(), candles.last()) {
            (Some(first), Some(last)) => {
                Ok(Some((first.timestamp, last.timestamp, candles.len())))
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_csv(content: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("candles.csv");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn fetch_candles_parses_rows() {
        let (_dir, path) = write_csv(
            "timestamp,open,high,low,close,volume\n\
             2024-01-15 10:00:00,100.0,110.0,90.0,105.0,50000\n\
             2024-01-15 10:03:00,105.0,115.0,100.0,110.0,60000\n",
        );
        let adapter = CsvAdapter::new(path);

        let candles = adapter.fetch_candles().unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(
            candles[0].timestamp,
            NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap()
        );
        assert_eq!(candles[0].open, 100.0);
        assert_eq!(candles[0].high, 110.0);
        assert_eq!(candles[0].low, 90.0);
        assert_eq!(candles[0].close, 105.0);
        assert_eq!(candles[0].volume, 50000.0);
    }

    #[test]
    fn fetch_candles_accepts_iso_t_and_date_only() {
        let (_dir, path) = write_csv(
            "timestamp,open,high,low,close,volume\n\
             2024-01-15T10:00:00,100.0,110.0,90.0,105.0,50000\n\
             2024-01-16,105.0,115.0,100.0,110.0,60000\n",
        );
        let adapter = CsvAdapter::new(path);

        let candles = adapter.fetch_candles().unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(
            candles[1].timestamp,
            NaiveDate::from_ymd_opt(2024, 1, 16)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn fetch_candles_rejects_bad_timestamp() {
        let (_dir, path) = write_csv(
            "timestamp,open,high,low,close,volume\n\
             not-a-time,100.0,110.0,90.0,105.0,50000\n",
        );
        let adapter = CsvAdapter::new(path);
        assert!(matches!(
            adapter.fetch_candles(),
            Err(BandtraderError::Data { .. })
        ));
    }

    #[test]
    fn fetch_candles_rejects_missing_column() {
        let (_dir, path) = write_csv(
            "timestamp,open,high,low,close\n\
             2024-01-15 10:00:00,100.0,110.0,90.0,105.0\n",
        );
        let adapter = CsvAdapter::new(path);
        assert!(matches!(
            adapter.fetch_candles(),
            Err(BandtraderError::Data { .. })
        ));
    }

    #[test]
    fn fetch_candles_rejects_non_numeric_price() {
        let (_dir, path) = write_csv(
            "timestamp,open,high,low,close,volume\n\
             2024-01-15 10:00:00,abc,110.0,90.0,105.0,50000\n",
        );
        let adapter = CsvAdapter::new(path);
        assert!(matches!(
            adapter.fetch_candles(),
            Err(BandtraderError::Data { .. })
        ));
    }

    #[test]
    fn fetch_candles_missing_file() {
        let adapter = CsvAdapter::new(PathBuf::from("/nonexistent/candles.csv"));
        assert!(adapter.fetch_candles().is_err());
    }

    #[test]
    fn data_range_reports_bounds() {
        let (_dir, path) = write_csv(
            "timestamp,open,high,low,close,volume\n\
             2024-01-15 10:00:00,100.0,110.0,90.0,105.0,50000\n\
             2024-01-15 10:03:00,105.0,115.0,100.0,110.0,60000\n\
             2024-01-15 10:06:00,110.0,120.0,105.0,115.0,55000\n",
        );
        let adapter = CsvAdapter::new(path);

        let (first, last, count) = adapter.data_range().unwrap().unwrap();
        assert_eq!(count, 3);
        assert!(first < last);
    }

    #[test]
    fn data_range_empty_file() {
        let (_dir, path) = write_csv("timestamp,open,high,low,close,volume\n");
        let adapter = CsvAdapter::new(path);
        assert!(adapter.data_range().unwrap().is_none());
    }
}
