//
// Copyright (c) Memfault, Inc.
// See License.txt for details
use std::io;

use thiserror::Error;

/// Failures that escape the writer.
///
/// A gmetric process that starts but exits non-zero is not represented here:
/// it is logged and counted, and the batch carries on.
#[derive(Debug, Error)]
pub enum GmetricError {
    /// A setting was supplied but could not be turned into a usable value.
    #[error("Invalid value {value} for setting '{key}': {reason}")]
    InvalidSetting {
        key: String,
        value: String,
        reason: String,
    },

    /// The gmetric executable could not be started at all.
    #[error("Unable to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl GmetricError {
    pub(crate) fn invalid_setting(
        key: &str,
        value: &serde_json::Value,
        reason: impl Into<String>,
    ) -> Self {
        GmetricError::InvalidSetting {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
