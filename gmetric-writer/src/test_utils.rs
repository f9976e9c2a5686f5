//
// Copyright (c) Memfault, Inc.
// See License.txt for details
use log::LevelFilter;
use rstest::fixture;

/// Logs everything to stderr so failing tests show what the writer did.
#[fixture]
pub fn setup_logger() {
    // Several tests share the global logger, only the first init succeeds.
    let _ = stderrlog::new()
        .module("gmetric_writer")
        .verbosity(LevelFilter::Trace)
        .init();
}
