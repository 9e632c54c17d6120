use crate::error::{AppError, AppResult};
use chrono::{Datelike, NaiveDate, NaiveDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub fn of(date: NaiveDate) -> Self {
        match date.month() {
            1..=3 => Quarter::Q1,
            4..=6 => Quarter::Q2,
            7..=9 => Quarter::Q3,
            _ => Quarter::Q4,
        }
    }

    /// Probability an order candidate dated in this quarter is kept.
    /// Q4 exceeds 1, so no Q4 candidate is ever dropped.
    pub fn order_acceptance(&self) -> f64 {
        match self {
            Quarter::Q1 => 0.8,
            Quarter::Q2 => 1.0,
            Quarter::Q3 => 0.9,
            Quarter::Q4 => 1.4,
        }
    }

    /// Multiplier on campaign clicks, conversions and revenue.
    pub fn campaign_performance(&self) -> f64 {
        match self {
            Quarter::Q1 => 0.8,
            Quarter::Q2 => 1.0,
            Quarter::Q3 => 0.9,
            Quarter::Q4 => 1.3,
        }
    }
}

pub fn year_start(year: i32) -> AppResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| AppError::ValidationError(format!("invalid year {year}")))
}

pub fn year_end(year: i32) -> AppResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 12, 31)
        .ok_or_else(|| AppError::ValidationError(format!("invalid year {year}")))
}

pub fn days_in_year(year: i32) -> AppResult<i64> {
    Ok((year_end(year)? - year_start(year)?).num_days() + 1)
}

pub fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(chrono::NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_boundaries() {
        let d = |m| NaiveDate::from_ymd_opt(2025, m, 15).unwrap();
        assert_eq!(Quarter::of(d(3)), Quarter::Q1);
        assert_eq!(Quarter::of(d(4)), Quarter::Q2);
        assert_eq!(Quarter::of(d(9)), Quarter::Q3);
        assert_eq!(Quarter::of(d(10)), Quarter::Q4);
        assert_eq!(Quarter::of(d(12)), Quarter::Q4);
    }

    #[test]
    fn test_days_in_year_handles_leap_years() {
        assert_eq!(days_in_year(2025).unwrap(), 365);
        assert_eq!(days_in_year(2024).unwrap(), 366);
    }

    #[test]
    fn test_midnight_formats_as_iso_timestamp() {
        let ts = midnight(year_start(2025).unwrap());
        assert_eq!(ts.format("%Y-%m-%dT%H:%M:%S").to_string(), "2025-01-01T00:00:00");
    }
}
