//! Storage-object-created event model.
//!
//! Matches the substrate's wire shape: a `Records` array where each record
//! carries the bucket name and the percent-encoded object key.

use serde::{Deserialize, Serialize};

use crate::keys;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<EventRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Entity {
    pub bucket: BucketRef,
    pub object: ObjectRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectRef {
    pub key: String,
}

/// A decoded reference to a single artifact. Immutable once derived from
/// an event record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageObjectRef {
    pub bucket: String,
    pub key: String,
}

impl StorageEvent {
    /// Synthesize a single-record event for `key` in `bucket`, encoding the
    /// key the way the substrate does on the wire.
    pub fn for_object(bucket: &str, key: &str) -> Self {
        Self {
            records: vec![EventRecord {
                s3: S3Entity {
                    bucket: BucketRef {
                        name: bucket.to_string(),
                    },
                    object: ObjectRef {
                        key: keys::encode_key(key),
                    },
                },
            }],
        }
    }
}

impl EventRecord {
    /// Bucket and decoded key of the object this record refers to.
    pub fn object_ref(&self) -> StorageObjectRef {
        StorageObjectRef {
            bucket: self.s3.bucket.name.clone(),
            key: keys::decode_key(&self.s3.object.key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_parses_wire_shape() {
        let raw = r#"{
            "Records": [
                {
                    "s3": {
                        "bucket": { "name": "minutes" },
                        "object": { "key": "raw-audio/team+mtg%202025.wav" }
                    }
                }
            ]
        }"#;
        let event: StorageEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(event.records.len(), 1);

        let obj = event.records[0].object_ref();
        assert_eq!(obj.bucket, "minutes");
        assert_eq!(obj.key, "raw-audio/team mtg 2025.wav");
    }

    #[test]
    fn test_event_without_records_is_empty() {
        let event: StorageEvent = serde_json::from_str("{}").unwrap();
        assert!(event.records.is_empty());
    }

    #[test]
    fn test_for_object_round_trips_through_decoding() {
        let event = StorageEvent::for_object("minutes", "raw-audio/会議 メモ.wav");
        let obj = event.records[0].object_ref();
        assert_eq!(obj.bucket, "minutes");
        assert_eq!(obj.key, "raw-audio/会議 メモ.wav");
        // the wire key is encoded
        assert_ne!(event.records[0].s3.object.key, obj.key);
    }

    #[test]
    fn test_event_serializes_with_records_field() {
        let event = StorageEvent::for_object("b", "k.wav");
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("Records").is_some());
    }
}
