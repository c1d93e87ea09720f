use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fields of a token listing agreement, in form order.
///
/// The serialized name is the placeholder key used by agreement templates
/// (`{{company}}`, `{{Jurisdiction}}`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldKey {
    #[serde(rename = "company")]
    Company,
    #[serde(rename = "Jurisdiction")]
    Jurisdiction,
    #[serde(rename = "address")]
    Address,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "listing")]
    Listing,
    #[serde(rename = "token")]
    Token,
    #[serde(rename = "amount")]
    Amount,
    #[serde(rename = "amountInWords")]
    AmountInWords,
    #[serde(rename = "name1")]
    Name1,
}

impl FieldKey {
    pub const ALL: [FieldKey; 9] = [
        FieldKey::Company,
        FieldKey::Jurisdiction,
        FieldKey::Address,
        FieldKey::Date,
        FieldKey::Listing,
        FieldKey::Token,
        FieldKey::Amount,
        FieldKey::AmountInWords,
        FieldKey::Name1,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Company => "company",
            FieldKey::Jurisdiction => "Jurisdiction",
            FieldKey::Address => "address",
            FieldKey::Date => "date",
            FieldKey::Listing => "listing",
            FieldKey::Token => "token",
            FieldKey::Amount => "amount",
            FieldKey::AmountInWords => "amountInWords",
            FieldKey::Name1 => "name1",
        }
    }

    /// Bilingual label shown next to the field on the review form.
    pub fn form_label(&self) -> &'static str {
        match self {
            FieldKey::Company => "company 名称",
            FieldKey::Jurisdiction => "Jurisdiction 管辖地/国",
            FieldKey::Address => "address 公司地址",
            FieldKey::Date => "合同签署date",
            FieldKey::Listing => "listing 上市日",
            FieldKey::Token => "token 代币名称",
            FieldKey::Amount => "number 数字",
            FieldKey::AmountInWords => "money 上市费英文大写",
            FieldKey::Name1 => "签署人 1",
        }
    }
}

/// Fields of a KYC dossier. Declaration order is the label dictionary order,
/// which decides ties when several labels could claim the same text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KycField {
    AccountId,
    Name,
    Country,
    Gender,
    IdExpired,
    IdExpiry,
    IdType,
    IdNumber,
    Dob,
    SubmitTime,
    ReviewTime,
    SubmitIp,
    IpLocation,
    DeviceId,
    DeviceType,
    Channel,
}

impl KycField {
    pub const ALL: [KycField; 16] = [
        KycField::AccountId,
        KycField::Name,
        KycField::Country,
        KycField::Gender,
        KycField::IdExpired,
        KycField::IdExpiry,
        KycField::IdType,
        KycField::IdNumber,
        KycField::Dob,
        KycField::SubmitTime,
        KycField::ReviewTime,
        KycField::SubmitIp,
        KycField::IpLocation,
        KycField::DeviceId,
        KycField::DeviceType,
        KycField::Channel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KycField::AccountId => "account_id",
            KycField::Name => "name",
            KycField::Country => "country",
            KycField::Gender => "gender",
            KycField::IdExpired => "id_expired",
            KycField::IdExpiry => "id_expiry",
            KycField::IdType => "id_type",
            KycField::IdNumber => "id_number",
            KycField::Dob => "dob",
            KycField::SubmitTime => "submit_time",
            KycField::ReviewTime => "review_time",
            KycField::SubmitIp => "submit_ip",
            KycField::IpLocation => "ip_location",
            KycField::DeviceId => "device_id",
            KycField::DeviceType => "device_type",
            KycField::Channel => "channel",
        }
    }

    /// English label used in the first column of the KYC table.
    /// `account_id` and `channel` never appear as table rows.
    pub fn display_label(&self) -> Option<&'static str> {
        match self {
            KycField::Name => Some("Name"),
            KycField::Country => Some("Country"),
            KycField::Gender => Some("Gender"),
            KycField::IdExpired => Some("ID Expired"),
            KycField::IdExpiry => Some("ID Expiry Date"),
            KycField::IdType => Some("ID Type"),
            KycField::IdNumber => Some("ID Number"),
            KycField::Dob => Some("Date of Birth"),
            KycField::SubmitTime => Some("Submit Time"),
            KycField::ReviewTime => Some("Review Time"),
            KycField::SubmitIp => Some("Submit IP"),
            KycField::IpLocation => Some("IP Location"),
            KycField::DeviceId => Some("Submit Device ID"),
            KycField::DeviceType => Some("Device Type"),
            KycField::AccountId | KycField::Channel => None,
        }
    }

    pub fn from_display_label(label: &str) -> Option<KycField> {
        KycField::ALL
            .iter()
            .copied()
            .find(|field| field.display_label() == Some(label))
    }
}

pub type FieldMapping = BTreeMap<FieldKey, String>;
pub type KycMapping = BTreeMap<KycField, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Erc20,
    Bsc,
    Trc20,
    Solana,
}

impl Chain {
    /// Rendering order of the wallet block, independent of discovery order.
    pub const ALL: [Chain; 4] = [Chain::Erc20, Chain::Bsc, Chain::Trc20, Chain::Solana];

    pub fn label(&self) -> &'static str {
        match self {
            Chain::Erc20 => "USDT-ERC20",
            Chain::Bsc => "USDT-BSC",
            Chain::Trc20 => "USDT-TRC20",
            Chain::Solana => "USDT/USDC-Solana",
        }
    }
}

/// One deposit address per chain; an empty string means "not found".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSet {
    pub erc20: String,
    pub bsc: String,
    pub trc20: String,
    pub solana: String,
}

impl WalletSet {
    pub fn get(&self, chain: Chain) -> &str {
        match chain {
            Chain::Erc20 => &self.erc20,
            Chain::Bsc => &self.bsc,
            Chain::Trc20 => &self.trc20,
            Chain::Solana => &self.solana,
        }
    }

    pub fn slot_mut(&mut self, chain: Chain) -> &mut String {
        match chain {
            Chain::Erc20 => &mut self.erc20,
            Chain::Bsc => &mut self.bsc,
            Chain::Trc20 => &mut self.trc20,
            Chain::Solana => &mut self.solana,
        }
    }

    pub fn is_empty(&self) -> bool {
        Chain::ALL.iter().all(|chain| self.get(*chain).trim().is_empty())
    }

    pub fn is_complete(&self) -> bool {
        Chain::ALL.iter().all(|chain| !self.get(*chain).is_empty())
    }

    /// True when `address` already sits in any slot.
    pub fn holds(&self, address: &str) -> bool {
        Chain::ALL.iter().any(|chain| self.get(*chain) == address)
    }

    /// Fixed four-line block of `"<Label>: <address>"`, skipping empty chains.
    pub fn to_text(&self) -> String {
        Chain::ALL
            .iter()
            .filter_map(|chain| {
                let address = self.get(*chain).trim();
                if address.is_empty() {
                    None
                } else {
                    Some(format!("{}: {}", chain.label(), address))
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Agreement template variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    #[default]
    Company,
    CompanyWaive,
}

impl TemplateKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            TemplateKind::Company => "BitMart - Token Listing Agreement - TEMPLATE - Company.docx",
            TemplateKind::CompanyWaive => {
                "BitMart - Token Listing Agreement - TEMPLATE - Company Waive.docx"
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListingAnalysis {
    pub fields: FieldMapping,
    pub wallets: WalletSet,
    pub wallet_text: String,
    pub include_technical_fee: bool,
    /// False when nothing was recognized and the fields need manual entry.
    pub recognized: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct KycAnalysis {
    pub fields: KycMapping,
    pub account_id: Option<String>,
    pub recognized: bool,
}
