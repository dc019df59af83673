use chrono::NaiveDateTime;

const ISO_SECONDS: &str = "%Y-%m-%dT%H:%M:%S%.f";
const ISO_MINUTES: &str = "%Y-%m-%dT%H:%M";
const SQL_SECONDS: &str = "%Y-%m-%d %H:%M:%S%.f";
const SQL_MINUTES: &str = "%Y-%m-%d %H:%M";

/// Parses an ISO-8601 local date-time (`T` separator, no zone or offset).
/// Seconds and fractional seconds are optional.
pub fn parse_local_datetime(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, ISO_SECONDS)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, ISO_MINUTES))
        .ok()
}

/// Parses a timestamp column as written by the ingestion pipeline, which may
/// use either `T` or a space between date and time.
pub fn parse_stored_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    parse_local_datetime(raw).or_else(|| {
        NaiveDateTime::parse_from_str(raw, SQL_SECONDS)
            .or_else(|_| NaiveDateTime::parse_from_str(raw, SQL_MINUTES))
            .ok()
    })
}

pub fn format_datetime(at: &NaiveDateTime) -> String {
    at.format(ISO_SECONDS).to_string()
}

/// Calendar month label such as `Mar 2024`.
pub fn month_label(at: &NaiveDateTime) -> String {
    at.format("%b %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(h, m, s))
            .expect("valid fixture datetime")
    }

    #[test]
    fn local_datetime_accepts_minutes_and_seconds() {
        assert_eq!(parse_local_datetime("2024-03-01T10:03"), Some(at(10, 3, 0)));
        assert_eq!(
            parse_local_datetime("2024-03-01T10:03:07"),
            Some(at(10, 3, 7))
        );
        assert!(parse_local_datetime("2024-03-01T10:03:07.250").is_some());
    }

    #[test]
    fn local_datetime_rejects_zones_and_garbage() {
        assert_eq!(parse_local_datetime("2024-03-01T10:03:00Z"), None);
        assert_eq!(parse_local_datetime("2024-03-01T10:03:00+02:00"), None);
        assert_eq!(parse_local_datetime("2024-03-01 10:03:00"), None);
        assert_eq!(parse_local_datetime("yesterday"), None);
        assert_eq!(parse_local_datetime(""), None);
    }

    #[test]
    fn stored_datetime_accepts_space_separator() {
        assert_eq!(
            parse_stored_datetime("2024-03-01 10:03:07"),
            Some(at(10, 3, 7))
        );
        assert_eq!(
            parse_stored_datetime("2024-03-01T10:03:07"),
            Some(at(10, 3, 7))
        );
    }

    #[test]
    fn formatting_drops_zero_fraction() {
        assert_eq!(format_datetime(&at(10, 5, 0)), "2024-03-01T10:05:00");
        assert_eq!(month_label(&at(10, 5, 0)), "Mar 2024");
    }
}
