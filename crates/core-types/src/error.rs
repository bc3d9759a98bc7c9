use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    #[error("Duplicate observation date in series '{series_id}': {date}")]
    DuplicateDate { series_id: String, date: NaiveDate },

    #[error("Out-of-order observation date in series '{series_id}': {date} follows {previous}")]
    OutOfOrderDate {
        series_id: String,
        date: NaiveDate,
        previous: NaiveDate,
    },
}
