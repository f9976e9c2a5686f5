#![deny(clippy::print_stdout, clippy::print_stderr)]
//
// Copyright (c) Memfault, Inc.
// See License.txt for details

pub mod cli;
pub mod config;
pub mod error;
pub mod gmetric;
pub mod query;
#[cfg(test)]
mod test_utils;
pub mod util;
