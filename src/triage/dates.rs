use anyhow::{Context, Result};
use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};

/// Lower bound of a triage range. `Unbounded` means "search everything" and
/// translates to omitting `modified_since` entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartBound {
    Unbounded,
    Date(NaiveDate),
}

/// A resolved triage range. `end_exclusive` is the user's inclusive end date
/// plus one day, so a `modified_since = end_exclusive` query can be subtracted
/// to honor the inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: StartBound,
    pub end_exclusive: NaiveDate,
}

impl DateRange {
    /// The `modified_since` value for the wide query, if any.
    pub fn modified_since_start(&self) -> Option<NaiveDate> {
        match self.start {
            StartBound::Unbounded => None,
            StartBound::Date(date) => Some(date),
        }
    }
}

/// Resolve user-supplied dates against the current local date.
pub fn resolve_dates(
    start: Option<&str>,
    end: Option<&str>,
    no_date_filter: bool,
) -> Result<DateRange> {
    resolve_dates_on(start, end, no_date_filter, Local::now().date_naive())
}

/// Resolve user-supplied (possibly absent) dates into a concrete range.
///
/// No start date means yesterday, except on Mondays where the range widens to
/// cover the whole weekend (yesterday was a Sunday). Only the Sunday case is
/// special-cased; a public holiday on a Tuesday still gets a one-day default.
pub fn resolve_dates_on(
    start: Option<&str>,
    end: Option<&str>,
    no_date_filter: bool,
    today: NaiveDate,
) -> Result<DateRange> {
    let parsed_start = start.map(parse_date).transpose()?;
    let parsed_end = end.map(parse_date).transpose()?;

    let (start_date, end_date) = match parsed_start {
        Some(start_date) => (start_date, parsed_end.unwrap_or(start_date)),
        None if no_date_filter => {
            tracing::info!("searching all bugs, no date filter");
            return Ok(DateRange {
                start: StartBound::Unbounded,
                end_exclusive: today + Duration::days(1),
            });
        }
        None => {
            tracing::info!("no date given, auto-searching yesterday/weekend for the most common triage");
            tracing::info!("pass --no-date-filter to search without any date restriction");
            let yesterday = today - Duration::days(1);
            if yesterday.weekday() == Weekday::Sun {
                // Monday invocation: include the whole weekend
                (today - Duration::days(2), yesterday)
            } else {
                (yesterday, parsed_end.unwrap_or(yesterday))
            }
        }
    };

    tracing::info!("{} to {} (inclusive)", start_date, end_date);

    Ok(DateRange {
        start: StartBound::Date(start_date),
        end_exclusive: end_date + Duration::days(1),
    })
}

fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", input))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn explicit_range_gets_exclusive_end() {
        let range = resolve_dates_on(Some("2016-07-15"), Some("2016-07-31"), false, date("2016-08-10")).unwrap();
        assert_eq!(range.start, StartBound::Date(date("2016-07-15")));
        assert_eq!(range.end_exclusive, date("2016-08-01"));
    }

    #[test]
    fn missing_end_means_single_day() {
        let range = resolve_dates_on(Some("2016-07-15"), None, false, date("2016-08-10")).unwrap();
        assert_eq!(range.start, StartBound::Date(date("2016-07-15")));
        assert_eq!(range.end_exclusive, date("2016-07-16"));
    }

    #[test]
    fn default_on_a_weekday_is_yesterday() {
        // 2016-08-10 was a Wednesday
        let range = resolve_dates_on(None, None, false, date("2016-08-10")).unwrap();
        assert_eq!(range.start, StartBound::Date(date("2016-08-09")));
        assert_eq!(range.end_exclusive, date("2016-08-10"));
    }

    #[test]
    fn default_on_a_monday_covers_the_weekend() {
        // 2016-08-08 was a Monday, so yesterday was a Sunday
        let range = resolve_dates_on(None, None, false, date("2016-08-08")).unwrap();
        assert_eq!(range.start, StartBound::Date(date("2016-08-06")));
        assert_eq!(range.end_exclusive, date("2016-08-08"));
    }

    #[test]
    fn no_date_filter_is_unbounded_even_on_a_monday() {
        let range = resolve_dates_on(None, None, true, date("2016-08-08")).unwrap();
        assert_eq!(range.start, StartBound::Unbounded);
        assert_eq!(range.modified_since_start(), None);
        assert_eq!(range.end_exclusive, date("2016-08-09"));
    }

    #[test]
    fn malformed_date_is_an_error() {
        let err = resolve_dates_on(Some("07/15/2016"), None, false, date("2016-08-10")).unwrap_err();
        assert!(err.to_string().contains("07/15/2016"));
    }

    #[test]
    fn malformed_end_date_is_an_error() {
        let err = resolve_dates_on(Some("2016-07-15"), Some("tomorrow"), false, date("2016-08-10")).unwrap_err();
        assert!(err.to_string().contains("tomorrow"));
    }
}
