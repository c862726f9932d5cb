pub mod hardware;
pub mod leaf;
pub mod motion;

pub use hardware::*;
pub use leaf::*;
pub use motion::*;
