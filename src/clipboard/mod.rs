pub mod command;
pub mod factory;
pub mod interface;
pub mod system;

pub use factory::ClipboardFactory;
pub use interface::ClipboardInterface;
