mod command;
pub use command::CommandDispatcher;

pub(crate) mod query;
pub use query::{CommandQuery, MAX_RESULTS_LIMIT};
