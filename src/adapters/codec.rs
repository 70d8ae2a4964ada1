//! History wire format: encoding and tolerant decoding.
//!
//! The canonical format is a JSON array of flat records:
//!
//! ```json
//! [{"bmi":"22.49","bmiLevel":1,"color":"#86D73E","description":"理想",
//!   "height":"170","weight":"65","id":"...","date":"2024/1/5 15:04:05"}]
//! ```
//!
//! Decoding also accepts the legacy shape written by the first release,
//! an object keyed by a running index:
//!
//! ```json
//! {"maxIdx":1,"data":{"0":{"bmiLevel":1,"bmi":22.49,"weight":"65",
//!   "height":"170","date":"..."},"1":{...}}}
//! ```
//!
//! Anything else decodes to an empty history.

use serde_json::{Map, Value};

use crate::domain::bmi::format_number;
use crate::domain::{Band, BmiResult, HistoryRecord};

/// Encode records in the canonical array format.
///
/// # Errors
/// Returns error if serialization fails.
pub fn encode(records: &[HistoryRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string(records)
}

/// Decode a stored value in either format.
///
/// Blank input decodes to an empty list.
///
/// # Errors
/// Returns error if `raw` is not valid JSON.
pub fn decode(raw: &str) -> Result<Vec<HistoryRecord>, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(raw)?;
    Ok(normalize(&value))
}

/// Coerce a parsed value into canonical records, newest first.
#[must_use]
pub fn normalize(value: &Value) -> Vec<HistoryRecord> {
    match value {
        Value::Array(items) => items.iter().filter_map(normalize_record).collect(),
        Value::Object(map) => normalize_legacy(map),
        _ => Vec::new(),
    }
}

/// Flat records need string `id` and `date`; color and description are
/// always re-derived from the (clamped) level.
fn normalize_record(item: &Value) -> Option<HistoryRecord> {
    let obj = item.as_object()?;
    let id = obj.get("id")?.as_str()?;
    let date = obj.get("date")?.as_str()?;

    Some(HistoryRecord::with_id(result_from(obj), id, date))
}

fn normalize_legacy(map: &Map<String, Value>) -> Vec<HistoryRecord> {
    let Some(max_idx) = map.get("maxIdx").and_then(as_index) else {
        return Vec::new();
    };

    let mut entries: Vec<(u64, &Map<String, Value>)> = match map.get("data") {
        Some(Value::Object(data)) => data
            .iter()
            .filter_map(|(key, record)| Some((canonical_index(key)?, record.as_object()?)))
            .filter(|(index, _)| *index <= max_idx)
            .collect(),
        Some(Value::Array(data)) => data
            .iter()
            .enumerate()
            .filter_map(|(index, record)| Some((index as u64, record.as_object()?)))
            .filter(|(index, _)| *index <= max_idx)
            .collect(),
        _ => return Vec::new(),
    };

    // Highest index is the most recent save.
    entries.sort_by(|a, b| b.0.cmp(&a.0));

    entries
        .into_iter()
        .map(|(index, record)| {
            let date = text(record.get("date"));
            HistoryRecord::with_id(result_from(record), index.to_string(), date)
        })
        .collect()
}

fn result_from(obj: &Map<String, Value>) -> BmiResult {
    BmiResult::new(
        text(obj.get("bmi")),
        band_from(obj.get("bmiLevel")),
        text(obj.get("height")),
        text(obj.get("weight")),
    )
}

/// Integer levels in range map to their band; anything else is obese.
fn band_from(level: Option<&Value>) -> Band {
    level
        .and_then(|v| {
            v.as_i64().or_else(|| {
                v.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() <= 3.0)
                    .map(|f| f as i64)
            })
        })
        .map_or(Band::Obese, Band::from_level)
}

/// Strings pass through, numbers render in shortest form, anything else is empty.
fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.as_f64().map(format_number).unwrap_or_default(),
        _ => String::new(),
    }
}

/// Only the plain decimal spelling of an index counts as a legacy key, so
/// `"01"` or `"+1"` never alias entry `"1"`.
fn canonical_index(key: &str) -> Option<u64> {
    key.parse::<u64>()
        .ok()
        .filter(|index| index.to_string() == key)
}

fn as_index(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
            .map(|f| f as u64)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::compute;
    use serde_json::json;

    fn record(id: &str, height: &str, weight: &str) -> HistoryRecord {
        let result = compute(height, weight).expect("Should compute");
        HistoryRecord::with_id(result, id, "2024/1/5 15:04:05")
    }

    #[test]
    fn test_canonical_roundtrip() {
        let records = vec![
            record("b", "160", "45"),
            record("a", "170", "65"),
            record("c", "175", "90"),
        ];

        let encoded = encode(&records).expect("Should encode");
        let decoded = decode(&encoded).expect("Should decode");
        assert_eq!(decoded, records);
    }

    #[test]
    fn test_absent_or_falsy_values() {
        assert!(decode("").expect("Should decode").is_empty());
        assert!(decode("   ").expect("Should decode").is_empty());
        assert!(decode("null").expect("Should decode").is_empty());
        assert!(decode("false").expect("Should decode").is_empty());
        assert!(decode("0").expect("Should decode").is_empty());
        assert!(decode("\"history\"").expect("Should decode").is_empty());
        assert!(decode("{}").expect("Should decode").is_empty());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(decode("[{").is_err());
        assert!(decode("not json").is_err());
    }

    #[test]
    fn test_flat_records_require_id_and_date() {
        let value = json!([
            {"id": "1", "date": "d1", "bmi": "22.49", "bmiLevel": 1, "height": "170", "weight": "65"},
            {"id": 2, "date": "d2", "bmi": "20", "bmiLevel": 1},
            {"id": "3", "bmi": "20", "bmiLevel": 1},
            "garbage",
            null,
        ]);

        let records = normalize(&value);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "1");
        assert_eq!(records[0].result.height, "170");
    }

    #[test]
    fn test_color_and_description_follow_level() {
        let value = json!([
            {"id": "1", "date": "d", "bmi": "30", "bmiLevel": 2, "color": "#000000", "description": "stale"},
        ]);

        let records = normalize(&value);
        assert_eq!(records[0].band(), Band::Overweight);
        assert_eq!(records[0].result.color, "#FF982D");
        assert_eq!(records[0].result.description, "過重");
    }

    #[test]
    fn test_out_of_range_level_clamps_to_obese() {
        let value = json!([
            {"id": "1", "date": "d", "bmi": "22", "bmiLevel": 7},
            {"id": "2", "date": "d", "bmi": "22", "bmiLevel": -1},
            {"id": "3", "date": "d", "bmi": "22", "bmiLevel": "1"},
            {"id": "4", "date": "d", "bmi": "22"},
        ]);

        let records = normalize(&value);
        assert_eq!(records.len(), 4);
        for record in &records {
            assert_eq!(record.band(), Band::Obese);
            assert_eq!(record.result.color, "#FF1200");
            assert_eq!(record.result.description, "肥胖");
        }
    }

    #[test]
    fn test_legacy_format_walks_high_to_low() {
        let raw = r#"{
            "maxIdx": 3,
            "data": {
                "0": {"bmiLevel": 1, "bmi": 22.49, "weight": "65", "height": "170", "date": "first"},
                "1": {"bmiLevel": 0, "bmi": 17.58, "weight": "45", "height": "160", "date": "second"},
                "3": {"bmiLevel": 3, "bmi": 30, "weight": "90", "height": "173", "date": "fourth"}
            }
        }"#;

        let records = decode(raw).expect("Should decode");
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "0"]);

        assert_eq!(records[0].result.bmi, "30");
        assert_eq!(records[0].band(), Band::Obese);
        assert_eq!(records[2].result.bmi, "22.49");
        assert_eq!(records[2].date, "first");
        assert_eq!(records[1].result.color, "#31BAF9");
    }

    #[test]
    fn test_legacy_ignores_entries_past_max_idx() {
        let value = json!({
            "maxIdx": 0,
            "data": {
                "0": {"bmiLevel": 1, "bmi": "22", "weight": "65", "height": "170", "date": "a"},
                "5": {"bmiLevel": 1, "bmi": "22", "weight": "65", "height": "170", "date": "b"},
                "x": {"bmiLevel": 1, "bmi": "22", "weight": "65", "height": "170", "date": "c"}
            }
        });

        let records = normalize(&value);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "0");
    }

    #[test]
    fn test_legacy_aliased_keys_yield_unique_ids() {
        let value = json!({
            "maxIdx": 1,
            "data": {
                "1": {"bmiLevel": 1, "bmi": "22", "weight": "65", "height": "170", "date": "a"},
                "01": {"bmiLevel": 2, "bmi": "25", "weight": "72", "height": "170", "date": "b"},
                "+1": {"bmiLevel": 3, "bmi": "30", "weight": "87", "height": "170", "date": "c"},
                " 0": {"bmiLevel": 0, "bmi": "17", "weight": "50", "height": "170", "date": "d"}
            }
        });

        let records = normalize(&value);
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);
        assert_eq!(records[0].date, "a");
        assert_eq!(records[0].band(), Band::Ideal);
    }

    #[test]
    fn test_legacy_requires_counter_and_data() {
        assert!(normalize(&json!({"maxIdx": "2", "data": {}})).is_empty());
        assert!(normalize(&json!({"maxIdx": 2})).is_empty());
        assert!(normalize(&json!({"maxIdx": -1, "data": {"0": {}}})).is_empty());
    }
}
