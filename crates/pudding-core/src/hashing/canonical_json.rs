//! Canonical JSON minimal: claves de objetos ordenadas, sin espacios.
//!
//! Sólo se usa como entrada del fingerprint de un envelope, por lo que dos
//! payloads con las mismas claves en distinto orden producen el mismo texto.

use serde_json::Value;
use std::collections::BTreeMap;

pub fn to_canonical_json(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(to_canonical_json).collect();
            format!("[{}]", items.join(","))
        }
        Value::Object(map) => {
            let tree: BTreeMap<&String, String> = map.iter().map(|(k, v)| (k, to_canonical_json(v))).collect();
            let items: Vec<String> = tree.into_iter()
                                         .map(|(k, v)| format!("{}:{}", quote(k), v))
                                         .collect();
            format!("{{{}}}", items.join(","))
        }
    }
}

// Serializar un `&str` a JSON no puede fallar; el fallback sólo existe para
// no propagar un error imposible.
fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s.escape_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_keys_are_sorted() {
        let v = json!({"b": 1, "a": {"d": true, "c": null}});
        assert_eq!(to_canonical_json(&v), r#"{"a":{"c":null,"d":true},"b":1}"#);
    }

    #[test]
    fn arrays_keep_their_order() {
        assert_eq!(to_canonical_json(&json!([3, "x", 1])), r#"[3,"x",1]"#);
    }
}
