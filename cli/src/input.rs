//! Record files given on the command line.
//!
//! Indexer dumps are arrays of loosely shaped objects. One bad element must
//! not cost the rest, so each element is decoded on its own and the ones that
//! fail are skipped.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;

use crate::error::InputError;

/// Read a JSON array from `path` and decode every element that fits `T`.
pub fn read_records<T: DeserializeOwned>(path: &Path, kind: &str) -> Result<Vec<T>, InputError> {
    let content = std::fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let items: Vec<Value> =
        serde_json::from_str(&content).map_err(|e| InputError::NotAnArray {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
    Ok(decode_records(items, kind))
}

/// Decode each element independently, dropping the malformed ones.
pub fn decode_records<T: DeserializeOwned>(items: Vec<Value>, kind: &str) -> Vec<T> {
    let received = items.len();
    let records: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::trace!(kind, index, "skipping malformed record: {e}");
                None
            }
        })
        .collect();

    if records.len() < received {
        tracing::debug!(kind, received, decoded = records.len(), "skipped malformed records");
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_boost::Proposal;
    use serde_json::json;

    #[test]
    fn test_decode_skips_bad_elements() {
        let items = vec![
            json!({ "id": "p1", "end": 1000 }),
            json!({ "id": "p2", "end": 1000.5 }),
            json!("not an object"),
            json!({ "id": "p3", "end": 2000 }),
        ];
        let proposals: Vec<Proposal> = decode_records(items, "proposal");
        let ids: Vec<&str> = proposals.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p3"]);
    }
}
