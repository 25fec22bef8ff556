pub mod config;
pub use config::*;
pub mod layout;
pub use layout::*;
pub mod parser;
pub use parser::*;
pub mod reader;
pub use reader::*;
