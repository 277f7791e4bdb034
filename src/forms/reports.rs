use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::report::DateRange;
use crate::forms::FormError;

/// Date range picker shared by the sales and usage reports.
#[derive(Debug, Default, Deserialize)]
pub struct DateRangeForm {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

fn parse_date(raw: &str) -> Result<NaiveDate, FormError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| FormError::InvalidDate)
}

impl DateRangeForm {
    /// Resolves the range, falling back to the thirty days up to `today` when
    /// both dates are omitted.
    pub fn resolve(&self, today: NaiveDate) -> Result<DateRange, FormError> {
        let start = self.start_date.as_deref().filter(|s| !s.trim().is_empty());
        let end = self.end_date.as_deref().filter(|s| !s.trim().is_empty());

        match (start, end) {
            (None, None) => Ok(DateRange::last_thirty_days(today)),
            (Some(start), Some(end)) => {
                DateRange::new(parse_date(start)?, parse_date(end)?)
                    .map_err(|_| FormError::InvalidDateRange)
            }
            _ => Err(FormError::InvalidDate),
        }
    }
}

#[derive(Debug, Deserialize)]
/// Explicit confirmation of the once-a-day Z report.
pub struct ZReportForm {
    #[serde(default)]
    pub confirm: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
    }

    #[test]
    fn empty_form_uses_last_thirty_days() {
        let range = DateRangeForm::default().resolve(today()).unwrap();
        assert_eq!(range, DateRange::last_thirty_days(today()));
    }

    #[test]
    fn reversed_dates_are_rejected() {
        let form = DateRangeForm {
            start_date: Some("2025-12-10".to_string()),
            end_date: Some("2025-12-01".to_string()),
        };
        assert_eq!(form.resolve(today()).err(), Some(FormError::InvalidDateRange));
    }

    #[test]
    fn half_filled_range_is_invalid() {
        let form = DateRangeForm {
            start_date: Some("2025-12-10".to_string()),
            end_date: None,
        };
        assert_eq!(form.resolve(today()).err(), Some(FormError::InvalidDate));
    }
}
