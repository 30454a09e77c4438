pub mod controller;
pub mod session;
pub mod view;

pub use controller::*;
pub use session::*;
pub use view::*;
