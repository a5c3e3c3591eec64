use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

const GRID_DATE_FORMAT: &str = "%m/%d/%Y %I:%M %p";

/// Grid cell rendering of an optional timestamp in local time.
pub fn to_grid_date(value: Option<DateTime<Utc>>) -> String {
    format_grid_date(value, &Local)
}

pub fn format_grid_date<Tz>(value: Option<DateTime<Utc>>, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match value {
        Some(value) => value.with_timezone(zone).format(GRID_DATE_FORMAT).to_string(),
        None => "-".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_in_given_zone() {
        let value = Utc.with_ymd_and_hms(2024, 5, 1, 14, 30, 0).single();
        assert_eq!(format_grid_date(value, &Utc), "05/01/2024 02:30 PM");
        assert_eq!(format_grid_date(None, &Utc), "-");
    }
}
