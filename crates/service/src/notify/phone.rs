/// Bring a phone number into international format.
///
/// Numbers already starting with `+` are returned unchanged. Anything else
/// has its leading zeros (trunk prefix) removed and `country_code` prepended.
pub fn normalize_phone(raw: &str, country_code: &str) -> String {
    let raw = raw.trim();
    if raw.starts_with('+') {
        return raw.to_string();
    }
    format!("{}{}", country_code, raw.trim_start_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_local_numbers() {
        assert_eq!(normalize_phone("9876543210", "+91"), "+919876543210");
    }

    #[test]
    fn strips_trunk_zeros() {
        assert_eq!(normalize_phone("09876543210", "+91"), "+919876543210");
        assert_eq!(normalize_phone("009876543210", "+91"), "+919876543210");
    }

    #[test]
    fn keeps_international_numbers() {
        assert_eq!(normalize_phone("+14155550100", "+91"), "+14155550100");
    }

    #[test]
    fn honours_other_country_codes() {
        assert_eq!(normalize_phone("4155550100", "+1"), "+14155550100");
    }
}
