pub mod client;
pub mod command;
pub mod factory;
pub mod interface;

pub use factory::SpeechFactory;
pub use interface::SpeechInterface;
