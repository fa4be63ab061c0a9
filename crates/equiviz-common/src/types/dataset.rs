use crate::error::CommonError;
use crate::types::analytics::{deserialize_type_counts, serialize_type_counts, TypeCount};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-assigned dataset identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetId(pub u64);

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DatasetId {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .ok()
            .filter(|id| *id > 0)
            .map(DatasetId)
            .ok_or_else(|| CommonError::InvalidDatasetId(s.to_string()))
    }
}

/// One entry of the dataset list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub id: DatasetId,
    pub name: String,
    pub uploaded_at: DateTime<Utc>,
    pub uploaded_by: String,
    pub total_equipment: u64,
    pub avg_flowrate: f64,
    pub avg_pressure: f64,
    pub avg_temperature: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_flowrate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_flowrate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_pressure: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pressure: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_temperature: Option<f64>,

    /// URL of the stored CSV
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    #[serde(
        default,
        deserialize_with = "deserialize_type_counts",
        serialize_with = "serialize_type_counts"
    )]
    pub equipment_types: Vec<TypeCount>,
}

/// A single row of an uploaded CSV
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub equipment_name: String,
    #[serde(default)]
    pub equipment_type: String,
    pub flowrate: f64,
    pub pressure: f64,
    #[serde(default)]
    pub temperature: f64,
}

/// Dataset summary plus its equipment records, in server order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetDetail {
    #[serde(flatten)]
    pub summary: DatasetSummary,

    #[serde(default)]
    pub equipment_records: Vec<EquipmentRecord>,
}

impl DatasetDetail {
    pub fn id(&self) -> DatasetId {
        self.summary.id
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary_json() -> serde_json::Value {
        json!({
            "id": 7,
            "name": "Plant A",
            "file": "http://localhost:8000/media/datasets/plant_a.csv",
            "uploaded_by": "admin",
            "uploaded_at": "2026-01-05T10:20:30.123456Z",
            "total_equipment": 5,
            "avg_flowrate": 12.5,
            "avg_pressure": 4.0,
            "avg_temperature": 300.1,
            "equipment_types": {"Pump": 3, "Valve": 2},
            "equipment_count": 5
        })
    }

    #[test]
    fn test_dataset_id_parsing() {
        assert_eq!("42".parse::<DatasetId>().unwrap(), DatasetId(42));
        assert_eq!(" 3 ".parse::<DatasetId>().unwrap(), DatasetId(3));
        assert!("0".parse::<DatasetId>().is_err());
        assert!("abc".parse::<DatasetId>().is_err());
    }

    #[test]
    fn test_summary_from_list_payload() {
        let summary: DatasetSummary = serde_json::from_value(summary_json()).unwrap();
        assert_eq!(summary.id, DatasetId(7));
        assert_eq!(summary.uploaded_by, "admin");
        assert_eq!(summary.min_flowrate, None);
        assert_eq!(summary.equipment_types.len(), 2);
        assert_eq!(summary.equipment_types[0].name, "Pump");
    }

    #[test]
    fn test_detail_flattens_summary() {
        let mut payload = summary_json();
        payload["equipment_records"] = json!([
            {"id": 1, "equipment_name": "P-101", "equipment_type": "Pump",
             "flowrate": 10.0, "pressure": 3.5, "temperature": 298.0}
        ]);

        let detail: DatasetDetail = serde_json::from_value(payload).unwrap();
        assert_eq!(detail.id(), DatasetId(7));
        assert_eq!(detail.equipment_records.len(), 1);
        assert_eq!(detail.equipment_records[0].equipment_name, "P-101");
    }

    #[test]
    fn test_detail_without_records() {
        let detail: DatasetDetail = serde_json::from_value(summary_json()).unwrap();
        assert!(detail.equipment_records.is_empty());
    }
}
