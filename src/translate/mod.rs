pub mod interface;
pub mod mymemory;

pub use interface::{TranslateInterface, TranslationOutcome, TranslationRequest};
pub use mymemory::MyMemoryClient;
