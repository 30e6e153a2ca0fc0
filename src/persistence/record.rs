//! Serialized shape of a universe checkpoint

use crate::error::ConwayError;
use crate::game_of_life::UniverseId;
use serde::{Deserialize, Serialize};

/// A checkpoint: the generation number and the live cells as `(x, y)` pairs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UniverseRecord {
    pub gen_num: u64,
    pub live_cells: Vec<(i64, i64)>,
}

impl UniverseRecord {
    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Decode a record persisted for universe `id`
    pub fn from_json(id: UniverseId, json: &str) -> Result<Self, ConwayError> {
        serde_json::from_str(json).map_err(|source| ConwayError::MalformedPersistedState { id, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names() {
        let record = UniverseRecord {
            gen_num: 3,
            live_cells: vec![(0, -1), (2, 5)],
        };
        let value: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
        assert_eq!(value["gen_num"], 3);
        assert_eq!(value["live_cells"], serde_json::json!([[0, -1], [2, 5]]));
    }

    #[test]
    fn test_malformed_records() {
        let id = UniverseId::new();
        let cases = [
            r#"{"live_cells": []}"#,
            r#"{"gen_num": 1}"#,
            r#"{"gen_num": -1, "live_cells": []}"#,
            r#"{"gen_num": 1, "live_cells": [[0.5, 1]]}"#,
            r#"{"gen_num": 1, "live_cells": [["a", 1]]}"#,
            r#"{"gen_num": 1, "live_cells": [[1]]}"#,
            "not json",
        ];
        for json in cases {
            let err = UniverseRecord::from_json(id, json).unwrap_err();
            assert!(
                matches!(err, ConwayError::MalformedPersistedState { id: got, .. } if got == id),
                "accepted {}",
                json
            );
        }
    }

    #[test]
    fn test_valid_record() {
        let record = UniverseRecord::from_json(UniverseId::new(), r#"{"gen_num": 7, "live_cells": [[1, 2]]}"#).unwrap();
        assert_eq!(record.gen_num, 7);
        assert_eq!(record.live_cells, vec![(1, 2)]);
    }
}
