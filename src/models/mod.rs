pub mod common;
pub mod search;
pub mod upstream;

pub use common::*;
pub use search::*;
pub use upstream::*;
