use chrono::{NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

use crate::{FilterError, ResultFilter};

pub const DEFAULT_DATE_INPUT_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

const SUPPORTED_TOKENS: [char; 6] = ['d', 'm', 'Y', 'H', 'M', 'S'];

/// Date format the user types dates in, bound to the timezone those dates
/// are read in.
///
/// Only `%d %m %Y %H %M %S` are accepted. Input may omit the seconds, or the
/// whole time portion; missing parts are zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateInputFormat {
    pattern: String,
    timezone: Tz,
}

impl Default for DateInputFormat {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_DATE_INPUT_FORMAT.to_string(),
            timezone: Tz::UTC,
        }
    }
}

impl DateInputFormat {
    pub fn new(pattern: impl Into<String>, timezone: Tz) -> ResultFilter<Self> {
        let pattern = pattern.into();
        let mut chars = pattern.chars();
        while let Some(c) = chars.next() {
            if c != '%' {
                continue;
            }
            match chars.next() {
                Some(token) if SUPPORTED_TOKENS.contains(&token) => {}
                Some(token) => return Err(FilterError::Date(format!("unsupported token %{token}"))),
                None => return Err(FilterError::Date("dangling %".to_string())),
            }
        }
        if !pattern.contains("%d") || !pattern.contains("%m") || !pattern.contains("%Y") {
            return Err(FilterError::Date(format!(
                "\"{pattern}\" must contain %d, %m and %Y"
            )));
        }
        Ok(Self { pattern, timezone })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Human readable rendering of the pattern, e.g. `DD/MM/YYYY HH:mm:ss`.
    pub fn iso_format(&self) -> String {
        self.pattern
            .replace("%d", "DD")
            .replace("%m", "MM")
            .replace("%Y", "YYYY")
            .replace("%H", "HH")
            .replace("%M", "mm")
            .replace("%S", "ss")
    }

    /// Seconds since epoch for `input`, or `None` if it does not match.
    pub fn to_timestamp(&self, input: &str) -> Option<i64> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        let datetime = self.parse_local(input)?;
        self.timezone
            .from_local_datetime(&datetime)
            .earliest()
            .map(|dt| dt.timestamp())
    }

    pub fn from_timestamp(&self, timestamp: i64) -> Option<String> {
        self.timezone
            .timestamp_opt(timestamp, 0)
            .single()
            .map(|dt| dt.format(&self.pattern).to_string())
    }

    fn parse_local(&self, input: &str) -> Option<NaiveDateTime> {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(input, &self.pattern) {
            return Some(datetime);
        }

        let (date_pattern, time_pattern) = match self.pattern.split_once(' ') {
            Some((date, time)) => (date, Some(time)),
            None => (self.pattern.as_str(), None),
        };

        if let Some(short) = time_pattern.and_then(|time| time.strip_suffix(":%S")) {
            let pattern = format!("{date_pattern} {short}");
            if let Ok(datetime) = NaiveDateTime::parse_from_str(input, &pattern) {
                return Some(datetime);
            }
        }

        NaiveDate::parse_from_str(input, date_pattern)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_format_of_default() {
        assert_eq!(DateInputFormat::default().iso_format(), "DD/MM/YYYY HH:mm:ss");
    }

    #[test]
    fn rejects_unsupported_tokens() {
        assert!(DateInputFormat::new("%d/%m/%Y %p", Tz::UTC).is_err());
        assert!(DateInputFormat::new("%H:%M", Tz::UTC).is_err());
        assert!(DateInputFormat::new("%Y-%m-%d", Tz::UTC).is_ok());
    }

    #[test]
    fn full_date_round_trips() {
        let format = DateInputFormat::default();
        let ts = format.to_timestamp("21/03/2022 10:20:30").unwrap();
        assert_eq!(ts, 1_647_858_030);
        assert_eq!(format.from_timestamp(ts).unwrap(), "21/03/2022 10:20:30");
    }

    #[test]
    fn partial_inputs_default_to_zero() {
        let format = DateInputFormat::default();
        assert_eq!(
            format.to_timestamp("21/03/2022"),
            format.to_timestamp("21/03/2022 00:00:00")
        );
        assert_eq!(
            format.to_timestamp("21/03/2022 10:20"),
            format.to_timestamp("21/03/2022 10:20:00")
        );
    }

    #[test]
    fn invalid_dates_are_rejected() {
        let format = DateInputFormat::default();
        assert_eq!(format.to_timestamp(""), None);
        assert_eq!(format.to_timestamp("not a date"), None);
        assert_eq!(format.to_timestamp("31/02/2022"), None);
        assert_eq!(format.to_timestamp("2022/03/21"), None);
    }

    #[test]
    fn timezone_shifts_timestamp() {
        let format = DateInputFormat::new(DEFAULT_DATE_INPUT_FORMAT, chrono_tz::Europe::Rome).unwrap();
        assert_eq!(format.to_timestamp("01/01/2022"), Some(1_640_991_600));
        assert_eq!(
            format.from_timestamp(1_640_991_600).unwrap(),
            "01/01/2022 00:00:00"
        );
    }
}
