//! D-day calculator.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ToolError;
use crate::params;
use crate::Request;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DdayParams {
    #[serde(deserialize_with = "params::text")]
    pub target_date: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Dday {
    pub dday: i64,
    pub message: String,
}

pub async fn calculate_dday(req: Request) -> Result<Dday, ToolError> {
    let p: DdayParams = req.json()?;
    let target = parse_date(&p.target_date)?;
    Ok(dday_between(target, Local::now().date_naive()))
}

pub fn parse_date(s: &str) -> Result<NaiveDate, ToolError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ToolError::parse("target_date is required (YYYY-MM-DD)"));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| ToolError::parse(format!("invalid date {s:?}, expected YYYY-MM-DD: {e}")))
}

/// Whole calendar days from `today` to `target`: positive in the future.
pub fn dday_between(target: NaiveDate, today: NaiveDate) -> Dday {
    let dday = (target - today).num_days();
    let message = match dday {
        0 => "D-Day".to_owned(),
        n => format!("D{n:+}"),
    };
    Dday { dday, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn same_day_is_d_day() {
        let today = date(2024, 5, 1);
        assert_eq!(dday_between(today, today), Dday { dday: 0, message: "D-Day".into() });
    }

    #[test]
    fn future_and_past_dates() {
        let today = date(2024, 12, 25);
        assert_eq!(dday_between(date(2025, 1, 1), today).message, "D+7");
        assert_eq!(dday_between(date(2024, 12, 24), today), Dday { dday: -1, message: "D-1".into() });
    }

    #[test]
    fn leap_years_count() {
        assert_eq!(dday_between(date(2024, 3, 1), date(2024, 2, 1)).dday, 29);
    }

    #[test]
    fn parses_only_iso_dates() {
        assert_eq!(parse_date(" 2024-02-29 ").unwrap(), date(2024, 2, 29));
        assert!(matches!(parse_date(""), Err(ToolError::Parse(_))));
        assert!(matches!(parse_date("2023-02-29"), Err(ToolError::Parse(_))));
        assert!(matches!(parse_date("01/02/2024"), Err(ToolError::Parse(_))));
        assert!(matches!(parse_date("tomorrow"), Err(ToolError::Parse(_))));
    }
}
