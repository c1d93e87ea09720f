// Pattern registry: ordered candidate patterns per field, label dictionaries
// and keyword tables. Everything is compiled once and shared read-only.

use crate::models::{FieldKey, KycField};
use lazy_static::lazy_static;
use regex::Regex;

/// Listing field patterns, most specific (bilingual label) first and the
/// generic single-word label last. Capture group 1 is the value.
static LISTING_PATTERN_SOURCES: [(FieldKey, &[&str]); 9] = [
    (
        FieldKey::Company,
        &[
            r"company\s*名称\s*[:：]\s*(.+)",
            r"company\s*name\s*[:：]\s*(.+)",
            r"compny\s*name\s*[:：]\s*(.+)",
            r"companyname\s*[:：]\s*(.+)",
            r"company\s*nm\s*[:：]\s*(.+)",
            r"company\s*[:：]\s*(.+)",
            r"公司名称\s*[:：]\s*(.+)",
        ],
    ),
    (
        FieldKey::Jurisdiction,
        &[
            r"Jurisdiction\s*管辖地/国\s*[:：]\s*(.+)",
            r"Jurisdiction\s*[:：]\s*(.+)",
            r"管辖地/国\s*[:：]\s*(.+)",
        ],
    ),
    (
        FieldKey::Address,
        &[
            r"registered\s*address\s*[:：]\s*(.+)",
            r"company\s*address\s*[:：]\s*(.+)",
            r"addr\s*[:：]\s*(.+)",
            r"address\s*公司地址\s*[:：]\s*(.+)",
            r"address\s*[:：]\s*(.+)",
            r"注册地址\s*[:：]\s*(.+)",
            r"公司地址\s*[:：]\s*(.+)",
        ],
    ),
    (
        FieldKey::Date,
        &[
            r"合同签署date\s*[:：]\s*(.+)",
            r"agreement\s*date\s*[:：]\s*(.+)",
            r"signing\s*date\s*[:：]\s*(.+)",
            r"date\s*[:：]\s*(.+)",
        ],
    ),
    (
        FieldKey::Listing,
        &[
            r"上市日\s*[:：]\s*(.+)",
            r"listing\s*date\s*[:：]\s*(.+)",
            r"latest\s*listing\s*date\s*[:：]\s*(.+)",
            r"listing\s*day\s*[:：]\s*(.+)",
            r"listing\s*time\s*[:：]\s*(.+)",
            r"list\s*date\s*[:：]\s*(.+)",
            r"time\s*to\s*market\s*[:：]\s*(.+)",
            r"最晚上线日期\s*[:：]\s*(.+)",
            r"上线日期\s*[:：]\s*(.+)",
            r"listing\s*[:：]\s*(.+)",
        ],
    ),
    (
        FieldKey::Token,
        &[
            r"token\s*代币名称\s*[:：]\s*(.+)",
            r"token\s*ticker\s*[:：]\s*(.+)",
            r"ticker\s*[:：]\s*(.+)",
            r"token\s*symbol\s*[:：]\s*(.+)",
            r"symbol\s*[:：]\s*(.+)",
            r"token\s*name\s*[:：]\s*(.+)",
            r"token\s*[:：]\s*(.+)",
            r"代币名称\s*[:：]\s*(.+)",
        ],
    ),
    (
        FieldKey::Amount,
        &[
            r"number\s*数字\s*[:：]\s*(.+)",
            r"amount\s*[:：]\s*(.+)",
            r"listing\s*fee\s*[:：]\s*(.+)",
            r"金额\s*[:：]\s*(.+)",
        ],
    ),
    (
        FieldKey::AmountInWords,
        &[
            r"money\s*上市费英文大写\s*[:：]\s*(.+)",
            r"amountinwords\s*[:：]\s*(.+)",
            r"英文大写\s*[:：]\s*(.+)",
        ],
    ),
    (
        FieldKey::Name1,
        &[
            r"签署人\s*1\s*[:：]\s*(.+)",
            r"signer\s*name\s*[:：]\s*(.+)",
            r"full\s*legal\s*name\s*[:：]\s*(.+)",
            r"signer\s*[:：]\s*(.+)",
            r"name1\s*[:：]\s*(.+)",
        ],
    ),
];

/// Country and territory phrases, checked in order, mapped to display names.
static COUNTRY_KEYWORD_SOURCES: [(&str, &str); 13] = [
    ("indonesia", "Indonesia"),
    ("singapore", "Singapore"),
    ("hong kong", "Hong Kong"),
    ("cayman", "Cayman Islands"),
    ("british virgin islands", "British Virgin Islands"),
    ("bvi", "British Virgin Islands"),
    ("seychelles", "Seychelles"),
    ("united states", "United States"),
    ("usa", "United States"),
    ("united kingdom", "United Kingdom"),
    ("uk", "United Kingdom"),
    ("st. vincent and the grenadines", "St. Vincent and the Grenadines"),
    ("st vincent and the grenadines", "St. Vincent and the Grenadines"),
];

/// Surface labels per KYC field, Chinese variants first.
static KYC_LABEL_SOURCES: [(KycField, &[&str]); 16] = [
    (KycField::AccountId, &["account id", "account id with bitmart", "cid"]),
    (KycField::Name, &["姓名", "name", "full name"]),
    (KycField::Country, &["国家", "国籍", "country"]),
    (KycField::Gender, &["性别", "gender"]),
    (
        KycField::IdExpired,
        &[
            "证件是否过期",
            "是否过期",
            "证件过期",
            "证件是否有效",
            "id expired",
            "expired",
        ],
    ),
    (
        KycField::IdExpiry,
        &[
            "证件过期时间",
            "过期时间",
            "证件到期时间",
            "到期时间",
            "有效期",
            "证件有效期",
            "id expiry date",
            "expiry date",
            "expiration date",
        ],
    ),
    (
        KycField::IdType,
        &["证件类型", "证件类别", "证件种类", "id type", "document type"],
    ),
    (
        KycField::IdNumber,
        &["证件号", "证件号码", "证件编号", "id number", "document number"],
    ),
    (KycField::Dob, &["生日", "出生日期", "date of birth", "dob"]),
    (KycField::SubmitTime, &["提交时间", "提交日期", "submit time"]),
    (KycField::ReviewTime, &["审核时间", "审核日期", "review time"]),
    (
        KycField::SubmitIp,
        &["提交IP", "提交 IP", "提交ip", "提交IP地址", "submit ip"],
    ),
    (
        KycField::IpLocation,
        &[
            "IP归属地",
            "IP 归属地",
            "IP所在地",
            "IP所属地",
            "ip归属地",
            "ip location",
        ],
    ),
    (
        KycField::DeviceId,
        &[
            "提交设备",
            "设备ID",
            "设备id",
            "设备编号",
            "设备标识",
            "device id",
            "submit device",
            "submit device id",
            "device identifier",
        ],
    ),
    (KycField::DeviceType, &["设备类型", "设备类别", "device type"]),
    (
        KycField::Channel,
        &[
            "认证渠道",
            "认证方式",
            "channel",
            "verification channel",
            "kyc channel",
        ],
    ),
];

/// A compiled KYC surface label.
#[derive(Debug)]
pub struct KycLabel {
    pub field: KycField,
    pub text: &'static str,
    /// Case-insensitive occurrence of the label anywhere in a line.
    pub occurrence: Regex,
    /// The whole line is the label, optionally followed by a colon.
    pub bare: Regex,
}

pub struct ListingPatterns {
    pub key: FieldKey,
    pub patterns: Vec<Regex>,
}

fn case_insensitive(source: &str) -> Regex {
    Regex::new(&format!("(?i){}", source)).unwrap()
}

lazy_static! {
    pub static ref LISTING_PATTERNS: Vec<ListingPatterns> = LISTING_PATTERN_SOURCES
        .iter()
        .map(|(key, sources)| ListingPatterns {
            key: *key,
            patterns: sources.iter().map(|source| case_insensitive(source)).collect(),
        })
        .collect();

    pub static ref COUNTRY_KEYWORDS: Vec<(Regex, &'static str)> = COUNTRY_KEYWORD_SOURCES
        .iter()
        .map(|(keyword, display)| {
            (case_insensitive(&format!(r"\b{}\b", regex::escape(keyword))), *display)
        })
        .collect();

    pub static ref KYC_LABELS: Vec<KycLabel> = KYC_LABEL_SOURCES
        .iter()
        .flat_map(|(field, labels)| {
            labels.iter().map(move |text| {
                let escaped = regex::escape(text);
                KycLabel {
                    field: *field,
                    text: *text,
                    occurrence: case_insensitive(&escaped),
                    bare: case_insensitive(&format!(r"^{}\s*[:：]?\s*$", escaped)),
                }
            })
        })
        .collect();
}

/// Role titles stripped from the end of a signer name, longest first.
pub const SIGNER_ROLE_SUFFIXES: [&str; 8] = [
    "MANAGING DIRECTOR",
    "DIRECTOR",
    "CEO",
    "COO",
    "CFO",
    "CTO",
    "PRESIDENT",
    "MANAGER",
];

pub fn listing_patterns(key: FieldKey) -> &'static [Regex] {
    LISTING_PATTERNS
        .iter()
        .find(|entry| entry.key == key)
        .map(|entry| entry.patterns.as_slice())
        .unwrap_or(&[])
}
