mod error;
pub mod line;
mod route;

pub use error::*;
pub use line::{fetch_line, truncate_at_address_boundary, RawLine};
pub use route::*;
