pub mod believer;
pub mod duplicate;
pub mod rank;

pub use believer::*;
pub use duplicate::*;
pub use rank::*;
