mod error;
mod formatter;
mod job;
mod parser;
mod queue;
mod worker;

pub use error::*;
pub use formatter::*;
pub use job::*;
pub use parser::*;
pub use queue::*;
pub use worker::*;
