//
// Copyright (c) Memfault, Inc.
// See License.txt for details
mod command;
pub use command::GmetricCommand;

mod runner;
#[cfg(test)]
pub use runner::MockCommandRunner;
pub use runner::{CommandExit, CommandRunner, DryRunRunner, ProcessRunner};

mod wire_type;
pub use wire_type::{classify, is_numeric, numeric_wire_type, WireType};

mod writer;
pub use writer::{GmetricWriter, WriteSummary};
