use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Count of equipment of one type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCount {
    pub name: String,
    pub count: u64,
}

impl TypeCount {
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Average and range of one measured parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterStats {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

/// Server-computed statistics over a dataset's equipment records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsAggregate {
    pub total_equipment: u64,
    pub avg_flowrate: f64,
    pub avg_pressure: f64,
    pub avg_temperature: f64,
    pub min_flowrate: f64,
    pub max_flowrate: f64,
    pub min_pressure: f64,
    pub max_pressure: f64,
    pub min_temperature: f64,
    pub max_temperature: f64,

    /// Type name to count, in the order the server sent them
    #[serde(
        deserialize_with = "deserialize_type_counts",
        serialize_with = "serialize_type_counts"
    )]
    pub equipment_types: Vec<TypeCount>,
}

impl AnalyticsAggregate {
    pub fn flowrate(&self) -> ParameterStats {
        ParameterStats {
            avg: self.avg_flowrate,
            min: self.min_flowrate,
            max: self.max_flowrate,
        }
    }

    pub fn pressure(&self) -> ParameterStats {
        ParameterStats {
            avg: self.avg_pressure,
            min: self.min_pressure,
            max: self.max_pressure,
        }
    }

    pub fn temperature(&self) -> ParameterStats {
        ParameterStats {
            avg: self.avg_temperature,
            min: self.min_temperature,
            max: self.max_temperature,
        }
    }

    /// Sum of the per-type counts
    pub fn counted_equipment(&self) -> u64 {
        self.equipment_types.iter().map(|t| t.count).sum()
    }
}

/// Read a JSON object `{"Pump": 3, "Valve": 2}` into a list, keeping key order.
pub(crate) fn deserialize_type_counts<'de, D>(deserializer: D) -> Result<Vec<TypeCount>, D::Error>
where
    D: Deserializer<'de>,
{
    struct TypeCountVisitor;

    impl<'de> Visitor<'de> for TypeCountVisitor {
        type Value = Vec<TypeCount>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of equipment type to count")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut counts = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, count)) = map.next_entry::<String, u64>()? {
                counts.push(TypeCount { name, count });
            }
            Ok(counts)
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(TypeCountVisitor)
}

pub(crate) fn serialize_type_counts<S>(counts: &[TypeCount], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(counts.len()))?;
    for entry in counts {
        map.serialize_entry(&entry.name, &entry.count)?;
    }
    map.end()
}
