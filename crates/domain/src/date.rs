use chrono::NaiveDate;

/// Formats a date the way UK customers read them in a text message,
/// e.g. `12 Jan 2026`. Used for the `{due_date}` template token.
pub fn format_date_uk(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_formats_uk_dates() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
        assert_eq!(format_date_uk(date), "12 Jan 2026");
    }

    #[test]
    fn single_digit_days_are_not_padded() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 3).unwrap();
        assert_eq!(format_date_uk(date), "3 Feb 2026");
    }
}
