//
// Copyright (c) Memfault, Inc.
// See License.txt for details
use log::{debug, error, trace};

use crate::{
    config::{GmetricConfig, Settings},
    error::GmetricError,
    query::{Measurement, Query},
};

use super::{classify, is_numeric, CommandRunner, GmetricCommand, WireType};

/// What happened to the measurements of one `write` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub submitted: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Submits each numeric measurement of a query to Ganglia with its own gmetric call.
///
/// The writer holds no state besides its configuration, every `write` is independent.
pub struct GmetricWriter<R: CommandRunner> {
    config: GmetricConfig,
    runner: R,
}

impl<R: CommandRunner> GmetricWriter<R> {
    pub fn new(config: GmetricConfig, runner: R) -> Self {
        Self { config, runner }
    }

    /// Resolves the writer settings. Fails before anything gets written if one of them
    /// is malformed.
    pub fn validate_setup(settings: &Settings, runner: R) -> Result<Self, GmetricError> {
        Ok(Self::new(GmetricConfig::resolve(settings)?, runner))
    }

    pub fn config(&self) -> &GmetricConfig {
        &self.config
    }

    pub fn write(&self, query: &Query) -> Result<WriteSummary, GmetricError> {
        self.write_measurements(query.measurements(self.config.type_names()))
    }

    /// Runs gmetric once per numeric measurement, in order, waiting for each call to finish.
    ///
    /// A gmetric call exiting unsuccessfully is logged and does not stop the batch. Failing
    /// to launch gmetric at all stops it and is returned.
    pub fn write_measurements<'a>(
        &self,
        measurements: impl IntoIterator<Item = Measurement<'a>>,
    ) -> Result<WriteSummary, GmetricError> {
        let mut summary = WriteSummary::default();

        for measurement in measurements {
            let value = match measurement.value {
                Some(value) if is_numeric(value) => value,
                _ => {
                    trace!("Skipping non-numeric value for {}", measurement.key);
                    summary.skipped += 1;
                    continue;
                }
            };

            let wire_type = classify(value);
            debug_assert!(
                wire_type != WireType::String,
                "numeric value {:?} classified as string",
                value
            );

            let command =
                GmetricCommand::build(&self.config, &measurement.key, &value.to_string(), wire_type);
            debug!("Executing: {}", command);

            let exit = self.runner.run(&command)?;
            if exit.success() {
                summary.submitted += 1;
            } else {
                error!("Failed to execute {}, exited: {}", command, exit);
                summary.failed += 1;
            }
        }

        Ok(summary)
    }
}
