//
// Copyright (c) Memfault, Inc.
// See License.txt for details
use itertools::Itertools;

use super::QueryResult;

/// Builds the flat metric name gmetric receives for one value of a result:
/// `<alias or class>.[<type name values>.]<attribute>[.<value key>]`.
///
/// `type_names` selects which MBean key properties (in that order) are folded into the
/// name, so that e.g. every garbage collector gets its own metric.
pub fn key_string(result: &QueryResult, value_key: &str, type_names: &[String]) -> String {
    let mut key = match &result.class_name_alias {
        Some(alias) => alias.clone(),
        None => clean(&result.class_name),
    };
    key.push('.');

    let type_name_values = result
        .type_name
        .as_deref()
        .map(|type_name| concat_type_name_values(type_names, type_name))
        .unwrap_or_default();
    if !type_name_values.is_empty() {
        key.push_str(&clean(&type_name_values));
        key.push('.');
    }

    key.push_str(&clean(&result.attribute_name));
    if value_key != result.attribute_name {
        key.push('.');
        key.push_str(&clean(value_key));
    }

    key
}

fn concat_type_name_values(type_names: &[String], type_name: &str) -> String {
    let properties: Vec<(&str, &str)> = type_name
        .split(',')
        .filter_map(|property| property.split_once('='))
        .map(|(k, v)| (k.trim(), v.trim()))
        .collect();

    type_names
        .iter()
        .filter_map(|wanted| {
            properties
                .iter()
                .find(|(k, _)| k == wanted)
                .map(|(_, v)| *v)
        })
        .join("_")
}

/// Name segments must not contain dots of their own.
fn clean(s: &str) -> String {
    s.chars()
        .filter(|c| *c != ' ' && *c != '"')
        .map(|c| if c == '.' { '_' } else { c })
        .collect()
}
