//
// Copyright (c) Memfault, Inc.
// See License.txt for details
use std::fmt::Display;

use itertools::Itertools;

use crate::config::GmetricConfig;

use super::WireType;

/// The full argument vector for one gmetric invocation, executable first.
///
/// gmetric usage, for reference:
///   -c, --conf=STRING     The configuration file to use for finding send channels
///   -n, --name=STRING     Name of the metric
///   -v, --value=STRING    Value of the metric
///   -t, --type=STRING     Either string|int8|uint8|int16|uint16|int32|uint32|float|double
///   -u, --units=STRING    Unit of measure for the value e.g. Kilobytes, Celcius
///   -s, --slope=STRING    Either zero|positive|negative|both
///   -x, --tmax=INT        The maximum time in seconds between gmetric calls
///   -d, --dmax=INT        The lifetime in seconds of this metric
///   -g, --group=STRING    Group of the metric
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GmetricCommand {
    argv: Vec<String>,
}

impl GmetricCommand {
    pub fn build(config: &GmetricConfig, name: &str, value: &str, wire_type: WireType) -> Self {
        let argv = vec![
            config.gmetric_path().to_string(),
            "-c".to_string(),
            config.gmond_config().to_string(),
            "-n".to_string(),
            name.to_string(),
            "-v".to_string(),
            value.to_string(),
            "-t".to_string(),
            wire_type.token().to_string(),
            "-u".to_string(),
            config.units().to_string(),
            "-s".to_string(),
            config.slope().name().to_string(),
            "-x".to_string(),
            config.tmax().to_string(),
            "-d".to_string(),
            config.dmax().to_string(),
            "-g".to_string(),
            config.group_name().unwrap_or_default().to_string(),
        ];

        Self { argv }
    }

    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }
}

impl Display for GmetricCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.argv.iter().join(" "))
    }
}
