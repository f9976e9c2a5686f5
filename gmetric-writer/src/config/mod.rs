//
// Copyright (c) Memfault, Inc.
// See License.txt for details
use std::collections::HashMap;

use log::debug;
use serde_json::Value;

use crate::error::GmetricError;

mod slope;
pub use slope::Slope;

/// Raw writer options, as found in the `settings` object of a writer definition.
pub type Settings = HashMap<String, Value>;

pub const GMETRIC_PATH: &str = "gmetricPath";
pub const GMOND_CONFIG: &str = "gmondConfig";
pub const GROUP_NAME: &str = "groupName";
pub const SLOPE: &str = "slope";
pub const UNITS: &str = "units";
pub const DMAX: &str = "dmax";
pub const TMAX: &str = "tmax";
pub const TYPE_NAMES: &str = "typeNames";

const DEFAULT_GMETRIC_PATH: &str = "/usr/bin/gmetric";
const DEFAULT_GMOND_CONFIG: &str = "/etc/ganglia/gmond.conf";
const DEFAULT_UNITS: &str = "";
const DEFAULT_TMAX: i32 = 60;
const DEFAULT_DMAX: i32 = 0;

/// Resolved gmetric options. Built once by [`GmetricConfig::resolve`] and
/// never modified afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GmetricConfig {
    gmetric_path: String,
    gmond_config: String,
    group_name: Option<String>,
    units: String,
    slope: Slope,
    tmax: i32,
    dmax: i32,
    type_names: Vec<String>,
}

impl GmetricConfig {
    pub fn resolve(settings: &Settings) -> Result<Self, GmetricError> {
        let config = Self {
            gmetric_path: string_setting(settings, GMETRIC_PATH)?
                .unwrap_or_else(|| DEFAULT_GMETRIC_PATH.to_string()),
            gmond_config: string_setting(settings, GMOND_CONFIG)?
                .unwrap_or_else(|| DEFAULT_GMOND_CONFIG.to_string()),
            group_name: string_setting(settings, GROUP_NAME)?,
            units: string_setting(settings, UNITS)?.unwrap_or_else(|| DEFAULT_UNITS.to_string()),
            slope: string_setting(settings, SLOPE)?
                .map(|name| Slope::from_name(&name))
                .unwrap_or_default(),
            tmax: integer_setting(settings, TMAX)?.unwrap_or(DEFAULT_TMAX),
            dmax: integer_setting(settings, DMAX)?.unwrap_or(DEFAULT_DMAX),
            type_names: list_setting(settings, TYPE_NAMES)?,
        };

        debug!(
            "Validated ganglia metric -- group: {:?}, units: {:?}, slope: {}, tmax: {}, dmax: {}, config: {}, gmetric path: {}",
            config.group_name,
            config.units,
            config.slope,
            config.tmax,
            config.dmax,
            config.gmond_config,
            config.gmetric_path
        );

        Ok(config)
    }

    pub fn gmetric_path(&self) -> &str {
        &self.gmetric_path
    }

    pub fn gmond_config(&self) -> &str {
        &self.gmond_config
    }

    pub fn group_name(&self) -> Option<&str> {
        self.group_name.as_deref()
    }

    pub fn units(&self) -> &str {
        &self.units
    }

    pub fn slope(&self) -> Slope {
        self.slope
    }

    /// Seconds a consumer should consider the metric fresh.
    pub fn tmax(&self) -> i32 {
        self.tmax
    }

    /// Seconds after which gmond expires the metric. 0 means never.
    pub fn dmax(&self) -> i32 {
        self.dmax
    }

    pub fn type_names(&self) -> &[String] {
        &self.type_names
    }
}

/// Strings are taken as-is. Numbers and booleans are accepted in their textual form since
/// hand-written settings often contain `"units": 1` style values.
fn string_setting(settings: &Settings, key: &str) -> Result<Option<String>, GmetricError> {
    match settings.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(Some(v.to_string())),
        Some(v) => Err(GmetricError::invalid_setting(key, v, "expected a string")),
    }
}

fn integer_setting(settings: &Settings, key: &str) -> Result<Option<i32>, GmetricError> {
    let value = match settings.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };

    let parsed = match value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    };

    parsed
        .map(Some)
        .ok_or_else(|| GmetricError::invalid_setting(key, value, "expected a number of seconds"))
}

fn list_setting(settings: &Settings, key: &str) -> Result<Vec<String>, GmetricError> {
    match settings.get(key) {
        None | Some(Value::Null) => Ok(vec![]),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                _ => Err(GmetricError::invalid_setting(
                    key,
                    item,
                    "expected a list of strings",
                )),
            })
            .collect(),
        // A single type name written without brackets.
        Some(Value::String(s)) => Ok(vec![s.clone()]),
        Some(v) => Err(GmetricError::invalid_setting(
            key,
            v,
            "expected a list of strings",
        )),
    }
}

#[cfg(test)]
impl GmetricConfig {
    pub fn test_fixture() -> Self {
        Self::test_fixture_with_group(Some("jvm"))
    }

    pub fn test_fixture_with_group(group_name: Option<&str>) -> Self {
        Self {
            gmetric_path: "/usr/bin/gmetric".to_string(),
            gmond_config: "/etc/ganglia/gmond.conf".to_string(),
            group_name: group_name.map(String::from),
            units: String::new(),
            slope: Slope::Both,
            tmax: 60,
            dmax: 0,
            type_names: vec![],
        }
    }

    pub fn test_fixture_with_gmetric_path(gmetric_path: &str) -> Self {
        Self {
            gmetric_path: gmetric_path.to_string(),
            ..Self::test_fixture()
        }
    }

    /// Turns gmetric into `/bin/sh -c <script>`, the script taking the `-c` value's slot.
    pub fn test_fixture_with_shell_script(script: &str) -> Self {
        Self {
            gmetric_path: "/bin/sh".to_string(),
            gmond_config: script.to_string(),
            ..Self::test_fixture()
        }
    }
}
