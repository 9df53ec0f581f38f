use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};

/// `YYYYMMDD`, zero padded.
pub fn format_date<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    format!("{:04}{:02}{:02}", at.year(), at.month(), at.day())
}

/// `HHMMSS`, zero padded, 24-hour clock.
pub fn format_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    format!("{:02}{:02}{:02}", at.hour(), at.minute(), at.second())
}

/// Converts epoch seconds into a local instant. Values `<= 0` mean "unknown".
pub fn instant_from_epoch(seconds: i64) -> Option<DateTime<Local>> {
    if seconds <= 0 {
        return None;
    }
    Local.timestamp_opt(seconds, 0).single()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn date_and_time_are_zero_padded() {
        let at = Local
            .with_ymd_and_hms(2024, 4, 5, 9, 3, 7)
            .single()
            .expect("valid local time");
        assert_eq!(format_date(&at), "20240405");
        assert_eq!(format_time(&at), "090307");
    }

    #[test]
    fn year_is_padded_to_four_digits() {
        let at = Utc
            .with_ymd_and_hms(987, 12, 31, 23, 59, 59)
            .single()
            .expect("valid utc time");
        assert_eq!(format_date(&at), "09871231");
        assert_eq!(format_time(&at), "235959");
    }

    #[test]
    fn formatting_uses_the_instant_offset() {
        let offset = FixedOffset::east_opt(9 * 3600).expect("valid offset");
        let at = offset
            .with_ymd_and_hms(2024, 1, 1, 0, 30, 0)
            .single()
            .expect("valid time");
        assert_eq!(format_date(&at), "20240101");
        assert_eq!(format_time(&at), "003000");
    }

    #[test]
    fn non_positive_epoch_is_unknown() {
        assert!(instant_from_epoch(0).is_none());
        assert!(instant_from_epoch(-5).is_none());
    }

    #[test]
    fn positive_epoch_converts_to_local() {
        let at = instant_from_epoch(1_700_000_000).expect("must convert");
        assert_eq!(at.timestamp(), 1_700_000_000);
    }
}
