pub mod generator;
pub mod merge;
pub mod models;
pub mod processing;
pub mod utils;

pub use generator::DocumentGenerator;
pub use merge::{MergeTarget, TextDocument};
pub use utils::{DocfillError, GeneratorConfig};
