use crate::models::rules::SIGNER_ROLE_SUFFIXES;
use crate::models::KycField;
use crate::processing::dates::{format_date, parse_date, parse_date_string};
use crate::processing::numbers::{format_number_str, number_str_to_words, parse_compact_amount};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    static ref ISO_LIKE_DATE: Regex = Regex::new(r"\d{4}[/-]\d{1,2}[/-]\d{1,2}").unwrap();
    static ref DEVICE_ID_PREFIX: Regex =
        Regex::new(r"(?i)^(?:id|device\s*id)\s*[:：]\s*").unwrap();
}

// Exact tokens: a lone upper-case "F" or "M" is left alone.
const FEMALE_TOKENS: [&str; 4] = ["女", "女性", "female", "f"];
const MALE_TOKENS: [&str; 4] = ["男", "男性", "male", "m"];
const NOT_EXPIRED_TOKENS: [&str; 8] = [
    "未过期", "未到期", "有效", "否", "no", "false", "not expired", "valid",
];
const EXPIRED_TOKENS: [&str; 9] = [
    "已过期", "过期", "无效", "失效", "是", "yes", "true", "expired", "invalid",
];

/// FieldCorrection turns raw extracted fragments into canonical values.
pub struct FieldCorrection;

impl FieldCorrection {
    /// Collapse whitespace and drop a trailing role title from a signer name.
    pub fn clean_signer_name(value: &str) -> String {
        let value = value.trim();
        if value.is_empty() {
            return String::new();
        }
        let value = WHITESPACE_RUN.replace_all(value, " ");
        for role in SIGNER_ROLE_SUFFIXES {
            let suffix_len = role.len() + 1;
            if value.len() <= suffix_len {
                continue;
            }
            if let Some(tail) = value.get(value.len() - suffix_len..) {
                if tail.starts_with(' ') && tail[1..].eq_ignore_ascii_case(role) {
                    return value[..value.len() - role.len()].trim().to_string();
                }
            }
        }
        value.to_string()
    }

    /// Canonical amount and spelled amount for the merge.
    ///
    /// A compact amount ("50k") is expanded before grouping, missing words
    /// are generated from the amount, and words are always upper-case.
    pub fn normalize_amount_fields(amount: &str, amount_in_words: &str) -> (String, String) {
        let mut amount = amount.trim().to_string();
        let mut words = amount_in_words.trim().to_string();
        if !amount.is_empty() {
            let compact = parse_compact_amount(&amount);
            if !compact.is_empty() {
                amount = compact;
            }
            amount = format_number_str(&amount);
            if words.is_empty() {
                words = number_str_to_words(&amount);
            }
        }
        (amount, words.to_uppercase())
    }

    /// Per-field normalization of a KYC value.
    pub fn normalize_kyc_value(field: KycField, value: &str) -> String {
        let value = value.trim();
        if value.is_empty() {
            return String::new();
        }
        let lower = value.to_lowercase();
        match field {
            KycField::Gender => {
                if FEMALE_TOKENS.contains(&value) || lower == "female" || value.contains('女') {
                    return "Female".to_string();
                }
                if MALE_TOKENS.contains(&value) || lower == "male" || value.contains('男') {
                    return "Male".to_string();
                }
            }
            KycField::IdExpired => {
                if NOT_EXPIRED_TOKENS.contains(&lower.as_str()) {
                    return "No".to_string();
                }
                if EXPIRED_TOKENS.contains(&lower.as_str()) {
                    return "Yes".to_string();
                }
            }
            KycField::IdType => {
                if let Some(id_type) = Self::normalize_id_type(value, &lower) {
                    return id_type.to_string();
                }
            }
            KycField::IdExpiry | KycField::Dob => return Self::normalize_kyc_date(value),
            KycField::DeviceId => {
                return DEVICE_ID_PREFIX.replace(value, "").to_string();
            }
            _ => {}
        }
        value.to_string()
    }

    fn normalize_id_type(value: &str, lower: &str) -> Option<&'static str> {
        if value.contains("护照") || lower.contains("passport") {
            return Some("Passport");
        }
        if value.contains("身份证")
            || lower.contains("id card")
            || lower.contains("identity card")
        {
            return Some("ID Card");
        }
        if value.contains("居留")
            || lower.contains("resident identity")
            || lower.contains("residence permit")
            || lower.contains("residence card")
        {
            return Some("Resident Identity Card");
        }
        if value.contains("驾照")
            || value.contains("驾驶证")
            || lower.contains("driver license")
            || lower.contains("driver's license")
        {
            return Some("Driver License");
        }
        None
    }

    // Whole-phrase parse first, then the first YYYY-MM-DD looking fragment
    // (timestamps such as "2030-01-01 00:00:00").
    fn normalize_kyc_date(value: &str) -> String {
        if parse_date(value).is_some() {
            return parse_date_string(value);
        }
        ISO_LIKE_DATE
            .find(value)
            .and_then(|m| parse_date(m.as_str()))
            .map(format_date)
            .unwrap_or_else(|| parse_date_string(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signer_role_suffix_removed() {
        assert_eq!(FieldCorrection::clean_signer_name("John  Smith   CEO"), "John Smith");
        assert_eq!(FieldCorrection::clean_signer_name("Jane Doe Managing Director"), "Jane Doe");
        assert_eq!(FieldCorrection::clean_signer_name("Jane Doe, director"), "Jane Doe,");
        assert_eq!(FieldCorrection::clean_signer_name("Director"), "Director");
        assert_eq!(FieldCorrection::clean_signer_name("Ceomar Ltd"), "Ceomar Ltd");
        assert_eq!(FieldCorrection::clean_signer_name("   "), "");
    }

    #[test]
    fn test_signer_name_with_cjk_is_untouched() {
        assert_eq!(FieldCorrection::clean_signer_name("张三"), "张三");
    }

    #[test]
    fn test_normalize_amount_fields() {
        assert_eq!(
            FieldCorrection::normalize_amount_fields("50k", ""),
            ("50,000".to_string(), "FIFTY THOUSAND".to_string())
        );
        assert_eq!(
            FieldCorrection::normalize_amount_fields("30000", "thirty thousand usdt"),
            ("30,000".to_string(), "THIRTY THOUSAND USDT".to_string())
        );
        assert_eq!(
            FieldCorrection::normalize_amount_fields("N/A", "N/A"),
            ("N/A".to_string(), "N/A".to_string())
        );
        assert_eq!(
            FieldCorrection::normalize_amount_fields("", ""),
            (String::new(), String::new())
        );
    }

    #[test]
    fn test_gender_normalization() {
        assert_eq!(FieldCorrection::normalize_kyc_value(KycField::Gender, "女"), "Female");
        assert_eq!(FieldCorrection::normalize_kyc_value(KycField::Gender, "男性"), "Male");
        assert_eq!(FieldCorrection::normalize_kyc_value(KycField::Gender, "FEMALE"), "Female");
        assert_eq!(FieldCorrection::normalize_kyc_value(KycField::Gender, "m"), "Male");
        assert_eq!(FieldCorrection::normalize_kyc_value(KycField::Gender, "Other"), "Other");
    }

    #[test]
    fn test_single_letter_gender_is_case_sensitive() {
        assert_eq!(FieldCorrection::normalize_kyc_value(KycField::Gender, "f"), "Female");
        assert_eq!(FieldCorrection::normalize_kyc_value(KycField::Gender, "F"), "F");
        assert_eq!(FieldCorrection::normalize_kyc_value(KycField::Gender, "M"), "M");
        assert_eq!(FieldCorrection::normalize_kyc_value(KycField::Gender, "Male"), "Male");
    }

    #[test]
    fn test_expiry_flag_normalization() {
        assert_eq!(FieldCorrection::normalize_kyc_value(KycField::IdExpired, "未过期"), "No");
        assert_eq!(FieldCorrection::normalize_kyc_value(KycField::IdExpired, "False"), "No");
        assert_eq!(FieldCorrection::normalize_kyc_value(KycField::IdExpired, "已过期"), "Yes");
        assert_eq!(FieldCorrection::normalize_kyc_value(KycField::IdExpired, "YES"), "Yes");
        assert_eq!(FieldCorrection::normalize_kyc_value(KycField::IdExpired, "unknown"), "unknown");
    }

    #[test]
    fn test_id_type_normalization() {
        let id_type = |v: &str| FieldCorrection::normalize_kyc_value(KycField::IdType, v);
        assert_eq!(id_type("护照"), "Passport");
        assert_eq!(id_type("居民身份证"), "ID Card");
        assert_eq!(id_type("National ID Card"), "ID Card");
        assert_eq!(id_type("居留许可"), "Resident Identity Card");
        assert_eq!(id_type("Residence Permit"), "Resident Identity Card");
        assert_eq!(id_type("Resident Identity"), "Resident Identity Card");
        assert_eq!(id_type("驾驶证"), "Driver License");
        assert_eq!(id_type("Driver's License"), "Driver License");
        assert_eq!(id_type("Other"), "Other");
    }

    #[test]
    fn test_identity_card_wins_over_resident_terms() {
        let id_type = |v: &str| FieldCorrection::normalize_kyc_value(KycField::IdType, v);
        assert_eq!(id_type("外国人永久居留身份证"), "ID Card");
        assert_eq!(id_type("Resident Identity Card"), "ID Card");
    }

    #[test]
    fn test_kyc_dates() {
        assert_eq!(
            FieldCorrection::normalize_kyc_value(KycField::Dob, "1990-01-02"),
            "January 2, 1990"
        );
        assert_eq!(
            FieldCorrection::normalize_kyc_value(KycField::IdExpiry, "2030-01-01 00:00:00"),
            "January 1, 2030"
        );
        assert_eq!(
            FieldCorrection::normalize_kyc_value(KycField::IdExpiry, "March 3, 2031"),
            "March 3, 2031"
        );
        assert_eq!(
            FieldCorrection::normalize_kyc_value(KycField::IdExpiry, "长期 2099"),
            "长期 2099"
        );
    }

    #[test]
    fn test_device_id_prefix_stripped() {
        assert_eq!(
            FieldCorrection::normalize_kyc_value(KycField::DeviceId, "ID: abc-123"),
            "abc-123"
        );
        assert_eq!(
            FieldCorrection::normalize_kyc_value(KycField::DeviceId, "Device ID：xyz"),
            "xyz"
        );
        assert_eq!(FieldCorrection::normalize_kyc_value(KycField::DeviceId, "abc-123"), "abc-123");
    }

    #[test]
    fn test_other_fields_pass_through_trimmed() {
        assert_eq!(
            FieldCorrection::normalize_kyc_value(KycField::SubmitIp, " 1.2.3.4 "),
            "1.2.3.4"
        );
        assert_eq!(FieldCorrection::normalize_kyc_value(KycField::Name, ""), "");
    }
}
