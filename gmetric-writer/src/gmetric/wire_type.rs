//
// Copyright (c) Memfault, Inc.
// See License.txt for details
use strum_macros::{Display, IntoStaticStr};

use crate::query::MeasurementValue;

/// The `-t` argument of gmetric.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, IntoStaticStr)]
pub enum WireType {
    #[strum(serialize = "int32")]
    Int32,
    #[strum(serialize = "double")]
    Double,
    #[strum(serialize = "string")]
    String,
}

impl WireType {
    pub fn token(&self) -> &'static str {
        self.into()
    }
}

/// The numeric wire type of `value`, or `None` when it has no numeric interpretation.
///
/// This is the only definition of "numeric" in the crate: the writer uses it to decide what
/// gets submitted and [`classify`] derives from it, so the two can't disagree.
pub fn numeric_wire_type(value: &MeasurementValue) -> Option<WireType> {
    match value {
        MeasurementValue::Byte(_) | MeasurementValue::Short(_) | MeasurementValue::Int(_) => {
            Some(WireType::Int32)
        }
        MeasurementValue::Long(_) | MeasurementValue::Float(_) | MeasurementValue::Double(_) => {
            Some(WireType::Double)
        }
        MeasurementValue::Bool(_) => None,
        MeasurementValue::Text(text) => text_wire_type(text),
    }
}

pub fn is_numeric(value: &MeasurementValue) -> bool {
    numeric_wire_type(value).is_some()
}

/// Total: anything that isn't numeric is submitted as a string.
pub fn classify(value: &MeasurementValue) -> WireType {
    numeric_wire_type(value).unwrap_or(WireType::String)
}

fn text_wire_type(text: &str) -> Option<WireType> {
    let text = text.trim();
    if text.parse::<f64>().is_ok() {
        return Some(WireType::Double);
    }
    // Only reached by text the float grammar rejects.
    if text.parse::<i32>().is_ok() {
        return Some(WireType::Int32);
    }
    None
}
