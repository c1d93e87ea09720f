pub mod config;
pub mod error;
pub mod naming;

pub use config::GeneratorConfig;
pub use error::{DocfillError, Result};
pub use naming::{agreement_file_name, kyc_file_name, sanitize_filename_component};
