//
// Copyright (c) Memfault, Inc.
// See License.txt for details
use eyre::Result;

fn main() -> Result<()> {
    gmetric_writer::cli::main()
}
