mod client;

use serde_json::{json, Value};

pub(crate) const TOKEN: &str = "test_token";
pub(crate) const ZONE_ID: &str = "zone123";
pub(crate) const RECORD_ID: &str = "record123";

pub(crate) fn record_json(id: &str, content: &str) -> Value {
    json!({
        "id": id,
        "zone_id": ZONE_ID,
        "zone_name": "example.com",
        "name": "example.com",
        "type": "A",
        "content": content,
        "proxiable": true,
        "proxied": false,
        "ttl": 3600,
        "locked": false
    })
}

pub(crate) fn envelope(result: Value) -> Value {
    json!({
        "result": result,
        "success": true,
        "errors": [],
        "messages": []
    })
}
