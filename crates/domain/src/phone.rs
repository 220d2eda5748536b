/// UK phone number helpers. Outbound sms/whatsapp recipients must be in
/// E.164 form; customers type numbers in local `07...` form.

fn strip_formatting(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect()
}

/// Normalizes a UK number to E.164: `07700 900000` -> `+447700900000`,
/// `447700900000` -> `+447700900000`. Numbers already in E.164 form pass
/// through unchanged.
pub fn format_uk_phone(phone: &str) -> String {
    let mut cleaned = strip_formatting(phone);
    if cleaned.starts_with("07") {
        cleaned = format!("+44{}", &cleaned[1..]);
    }
    if cleaned.starts_with("44") {
        cleaned = format!("+{}", cleaned);
    }
    cleaned
}

/// A UK mobile: `07` or `+447` followed by nine digits.
pub fn is_valid_uk_mobile(phone: &str) -> bool {
    let cleaned = strip_formatting(phone);
    let rest = if let Some(rest) = cleaned.strip_prefix("+44") {
        rest
    } else if let Some(rest) = cleaned.strip_prefix('0') {
        rest
    } else {
        return false;
    };
    rest.len() == 10 && rest.starts_with('7') && rest.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_normalizes_local_format() {
        assert_eq!(format_uk_phone("07700 900000"), "+447700900000");
        assert_eq!(format_uk_phone("07700-900-000"), "+447700900000");
    }

    #[test]
    fn it_normalizes_bare_country_code() {
        assert_eq!(format_uk_phone("447700900000"), "+447700900000");
    }

    #[test]
    fn e164_passes_through_unchanged() {
        assert_eq!(format_uk_phone("+447700900000"), "+447700900000");
    }

    #[test]
    fn it_validates_uk_mobiles() {
        assert!(is_valid_uk_mobile("07700 900000"));
        assert!(is_valid_uk_mobile("+447700900000"));
        assert!(!is_valid_uk_mobile("07700 90000"));
        assert!(!is_valid_uk_mobile("02079460000"));
        assert!(!is_valid_uk_mobile("+337700900000"));
        assert!(!is_valid_uk_mobile("not a number"));
    }
}
