//
// Copyright (c) Memfault, Inc.
// See License.txt for details
//! (De)serializes a `Vec<(String, T)>` as a map, keeping the document order of the keys.
use std::{fmt, marker::PhantomData};

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

#[allow(clippy::ptr_arg)] // serde's `with` passes the field by reference
pub fn serialize<S, T>(pairs: &Vec<(String, T)>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    let mut map = serializer.serialize_map(Some(pairs.len()))?;
    for (key, value) in pairs {
        map.serialize_entry(key, value)?;
    }
    map.end()
}

pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<(String, T)>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    deserializer.deserialize_map(OrderedPairsVisitor(PhantomData))
}

struct OrderedPairsVisitor<T>(PhantomData<T>);

impl<'de, T> Visitor<'de> for OrderedPairsVisitor<T>
where
    T: Deserialize<'de>,
{
    type Value = Vec<(String, T)>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, T>()? {
            pairs.push((key, value));
        }
        Ok(pairs)
    }
}
