mod command;
mod costing;
mod error;
mod exchange;
mod model;
mod query;

pub use command::*;
pub use costing::*;
pub use error::*;
pub use exchange::*;
pub use model::*;
pub use query::*;
