//! Candle source port trait.

use chrono::NaiveDateTime;

use crate::domain::candle::Candle;
use crate::domain::error::BandtraderError;

pub trait DataPort {
    /// Load the full candle series, in file order. Ordering and value
    /// validation happen in the domain, not here.
    fn fetch_candles(&self) -> Result<Vec<Candle>, BandtraderError>;

    /// (first timestamp, last timestamp, candle count), or None when the
    /// source is empty.
    fn data_range(
        &self,
    ) -> Result<Option<(NaiveDateTime, NaiveDateTime, usize)>, BandtraderError>;
}
