//! Fluent integration-test harness: a command wrapper for the `zk` binary
//! and a disposable corpus builder.

mod command;
mod corpus;

pub use command::ZkCommand;
pub use corpus::CorpusDir;
