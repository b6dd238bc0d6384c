//! Share infrastructure module

mod command;

pub use command::CommandSharer;
