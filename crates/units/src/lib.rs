mod catalog;
mod convert;
mod cost;
mod normalize;

pub use catalog::*;
pub use convert::*;
pub use cost::*;
pub use normalize::*;
