//! Normalisation filters applied to input before it is validated or stored

/// Trim surrounding whitespace
pub fn trim(value: &str) -> String {
    value.trim().to_string()
}

/// Trim and uppercase (promo codes)
pub fn uppercase(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Trim and lowercase (emails, slugs)
pub fn lowercase(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Case-insensitive key for a display name: lowercased, inner whitespace collapsed
pub fn slug(value: &str) -> String {
    value
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Round a number to the given decimal places, halves away from zero
pub fn round_decimals(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Trim an optional string, mapping blank to `None`
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Serde `deserialize_with` helper: trim a string field as it is read, so
/// `length` rules see what will actually be stored
pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = <String as serde::Deserialize>::deserialize(deserializer)?;
    Ok(trim(&value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Deserialize)]
    struct Named {
        #[serde(deserialize_with = "trimmed")]
        name: String,
    }

    #[test]
    fn test_trimmed_deserializer() {
        let named: Named = serde_json::from_str(r#"{"name":"  Ayesha \n"}"#).unwrap();
        assert_eq!(named.name, "Ayesha");

        let blank: Named = serde_json::from_str(r#"{"name":"   "}"#).unwrap();
        assert!(blank.name.is_empty());
    }

    #[test]
    fn test_trim_removes_whitespace() {
        assert_eq!(trim("  hello  "), "hello");
        assert_eq!(trim("   "), "");
    }

    #[test]
    fn test_uppercase_trims_too() {
        assert_eq!(uppercase(" save10 "), "SAVE10");
        assert_eq!(uppercase("Save10"), "SAVE10");
    }

    #[test]
    fn test_lowercase_converts_string() {
        assert_eq!(lowercase("Hello@WORLD.com"), "hello@world.com");
    }

    #[test]
    fn test_slug_collapses_whitespace() {
        assert_eq!(slug("  Summer   Kurta "), "summer-kurta");
        assert_eq!(slug("T-Shirts"), "t-shirts");
    }

    #[test]
    fn test_round_decimals_two_places() {
        assert_eq!(round_decimals(3.14159, 2), 3.14);
        assert_eq!(round_decimals(2.675_000_1, 2), 2.68);
        assert_eq!(round_decimals(-3.456, 1), -3.5);
        assert_eq!(round_decimals(42.0, 2), 42.0);
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  x ".to_string())), Some("x".to_string()));
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(None), None);
    }
}
