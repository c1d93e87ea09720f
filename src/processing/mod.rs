pub mod dates;
pub mod extractors;
pub mod field_correction;
pub mod kyc;
pub mod lines;
pub mod numbers;
pub mod technical_fee;
pub mod wallets;

pub use extractors::ListingExtractor;
pub use field_correction::FieldCorrection;
pub use kyc::KycExtractor;
pub use technical_fee::detect_technical_fee;
pub use wallets::WalletExtractor;
