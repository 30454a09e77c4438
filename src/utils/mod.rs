pub mod html;
pub mod images;

pub use html::*;
pub use images::*;
