//
// Copyright (c) Memfault, Inc.
// See License.txt for details
use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::fmt::{self, Display};

/// A single polled scalar, tagged with the representation it was produced in.
///
/// The width of integers matters: bounded forms are submitted as `int32`, wider ones as
/// `double`.
#[derive(Clone, Debug, PartialEq)]
pub enum MeasurementValue {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    Text(String),
}

impl Serialize for MeasurementValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            MeasurementValue::Byte(v) => serializer.serialize_i8(*v),
            MeasurementValue::Short(v) => serializer.serialize_i16(*v),
            MeasurementValue::Int(v) => serializer.serialize_i32(*v),
            MeasurementValue::Long(v) => serializer.serialize_i64(*v),
            MeasurementValue::Float(v) => serializer.serialize_f32(*v),
            MeasurementValue::Double(v) => serializer.serialize_f64(*v),
            MeasurementValue::Bool(v) => serializer.serialize_bool(*v),
            MeasurementValue::Text(v) => serializer.serialize_str(v.as_str()),
        }
    }
}

/// Self-describing input carries no width information: integers become `Int` when they
/// fit in 32 bits, `Long` when they fit in 64, and `Double` otherwise.
impl<'de> Deserialize<'de> for MeasurementValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(MeasurementValueVisitor)
    }
}

struct MeasurementValueVisitor;

impl<'de> Visitor<'de> for MeasurementValueVisitor {
    type Value = MeasurementValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number, a boolean or a string")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(MeasurementValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(i32::try_from(v)
            .map(MeasurementValue::Int)
            .unwrap_or(MeasurementValue::Long(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        match i64::try_from(v) {
            Ok(v) => self.visit_i64(v),
            Err(_) => Ok(MeasurementValue::Double(v as f64)),
        }
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(MeasurementValue::Double(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(MeasurementValue::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(MeasurementValue::Text(v))
    }
}

/// The text handed to gmetric with `-v`.
/// The `-v` text. Whole doubles render without a fraction (`1`, `100000000000000000000`).
impl Display for MeasurementValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasurementValue::Byte(v) => write!(f, "{}", v),
            MeasurementValue::Short(v) => write!(f, "{}", v),
            MeasurementValue::Int(v) => write!(f, "{}", v),
            MeasurementValue::Long(v) => write!(f, "{}", v),
            MeasurementValue::Float(v) => write!(f, "{}", v),
            MeasurementValue::Double(v) => write!(f, "{}", v),
            MeasurementValue::Bool(v) => write!(f, "{}", v),
            MeasurementValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<i32> for MeasurementValue {
    fn from(v: i32) -> Self {
        MeasurementValue::Int(v)
    }
}

impl From<i64> for MeasurementValue {
    fn from(v: i64) -> Self {
        MeasurementValue::Long(v)
    }
}

impl From<f64> for MeasurementValue {
    fn from(v: f64) -> Self {
        MeasurementValue::Double(v)
    }
}

impl From<&str> for MeasurementValue {
    fn from(v: &str) -> Self {
        MeasurementValue::Text(v.to_string())
    }
}
