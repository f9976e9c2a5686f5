//
// Copyright (c) Memfault, Inc.
// See License.txt for details
use serde::{Deserialize, Serialize};

use crate::util::serialization::ordered_pairs;

mod key;
pub use key::key_string;

mod measurement_value;
pub use measurement_value::MeasurementValue;

/// One polling cycle's output for a single MBean query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    pub obj: String,
    #[serde(default)]
    pub results: Vec<QueryResult>,
}

/// The values read for one attribute of one matched MBean.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub class_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name_alias: Option<String>,
    /// MBean key properties, e.g. `type=GarbageCollector,name=PS MarkSweep`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    pub attribute_name: String,
    /// Simple attributes have a single entry keyed by the attribute name, composite ones
    /// have one entry per item. `None` marks a value the target did not return.
    #[serde(default, with = "ordered_pairs")]
    pub values: Vec<(String, Option<MeasurementValue>)>,
}

/// A value ready to be named and submitted.
#[derive(Clone, Debug, PartialEq)]
pub struct Measurement<'a> {
    pub key: String,
    pub value: Option<&'a MeasurementValue>,
}

impl Query {
    /// Flattens every result into named measurements, in result then value order.
    pub fn measurements<'a>(
        &'a self,
        type_names: &'a [String],
    ) -> impl Iterator<Item = Measurement<'a>> + 'a {
        self.results.iter().flat_map(move |result| {
            result.values.iter().map(move |(value_key, value)| Measurement {
                key: key_string(result, value_key, type_names),
                value: value.as_ref(),
            })
        })
    }
}

#[cfg(test)]
impl QueryResult {
    pub fn test_fixture(attribute_name: &str, values: Vec<(&str, Option<MeasurementValue>)>) -> Self {
        Self {
            class_name: "sun.management.MemoryImpl".to_string(),
            class_name_alias: None,
            type_name: Some("type=Memory".to_string()),
            attribute_name: attribute_name.to_string(),
            values: values
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        }
    }
}
