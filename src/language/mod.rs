pub mod catalog;

pub use catalog::{LanguageCatalog, LanguageEntry};
