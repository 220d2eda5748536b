use chrono::{DateTime, NaiveDate, Utc};

// Mocking out time so that it is possible to run tests that depend on time.
pub trait ISys: Send + Sync {
    /// The current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;
    /// The current moment in UTC
    fn get_utc_datetime(&self) -> DateTime<Utc>;
    /// The current UTC calendar date. A pipeline run reads this once and
    /// works entirely off that date, so the run is stable no matter when
    /// during the day it fires.
    fn get_utc_date(&self) -> NaiveDate;
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn get_utc_datetime(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn get_utc_date(&self) -> NaiveDate {
        Utc::now().date().naive_utc()
    }
}
