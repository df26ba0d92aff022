//! Agenda event payload defaults.
//!
//! Dolibarr rejects or misfiles agenda events created without an owner and an
//! attendee list, so creation fills those in along with a few numeric fields.
//! A key the caller sent is never overwritten, whatever its value.

use super::Record;
use serde_json::{json, Value};

/// Fill in agenda event fields missing from `event`.
///
/// - `userownerid`: `fallback_owner`
/// - `userassigned`: a single attendee entry keyed by the owner id string
/// - `percentage: -1`, `priority: 0`, `fulldayevent: 0`, `transparency: 0`
pub fn apply_event_defaults(event: &mut Record, fallback_owner: i64) {
    let owner = event
        .entry("userownerid")
        .or_insert_with(|| json!(fallback_owner))
        .clone();

    if !event.contains_key("userassigned") {
        let owner_key = match owner {
            Value::String(s) => s,
            other => other.to_string(),
        };
        let attendee = json!({
            "id": owner_key.clone(),
            "mandatory": "0",
            "answer_status": "0",
            "transparency": "0",
        });
        let mut assigned = Record::new();
        assigned.insert(owner_key, attendee);
        event.insert("userassigned".to_string(), Value::Object(assigned));
    }

    event.entry("percentage").or_insert(json!(-1));
    event.entry("priority").or_insert(json!(0));
    event.entry("fulldayevent").or_insert(json!(0));
    event.entry("transparency").or_insert(json!(0));
}
