use chrono::{DateTime, TimeZone};

/// Day, month, year and time the way Flemish readers expect: `14/11/2023 22:13`.
#[must_use]
pub fn format_saved_date<Tz>(value: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    value.format("%d/%m/%Y %H:%M").to_string()
}
