//! Envelope unwrapping for backend responses.
//!
//! The backend is inconsistent about wrapping: a collection may arrive as a
//! bare array or under `data`, `items` or `content`; a single resource may
//! arrive bare or under `data`. Nothing here errors — malformed input
//! degrades to an empty collection or a null object.

use serde_json::Value;

const CLAVES_ENVOLTORIO: [&str; 3] = ["data", "items", "content"];

/// Extracts the collection from a response body.
///
/// A bare array is returned as-is; otherwise the envelope keys are probed
/// in order and the first one holding an array wins.
pub fn unwrap_lista(valor: Value) -> Vec<Value> {
    match valor {
        Value::Array(items) => items,
        Value::Object(mut mapa) => {
            for clave in CLAVES_ENVOLTORIO {
                if matches!(mapa.get(clave), Some(Value::Array(_))) {
                    if let Some(Value::Array(items)) = mapa.remove(clave) {
                        return items;
                    }
                }
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}

/// Extracts the single resource from a response body.
///
/// An object that already looks like an entity (carries `id` or `persona`)
/// is kept; otherwise the `data` wrapper is peeled off if present.
pub fn unwrap_objeto(valor: Value) -> Value {
    match valor {
        Value::Object(mut mapa) => {
            if mapa.contains_key("id") || mapa.contains_key("persona") {
                return Value::Object(mapa);
            }
            if let Some(dato) = mapa.remove("data") {
                return dato;
            }
            Value::Object(mapa)
        }
        otro => otro,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn todas_las_envolturas_dan_la_misma_lista() {
        let esperado = vec![json!({"id": 1}), json!({"id": 2})];
        let formas = [
            json!([{"id": 1}, {"id": 2}]),
            json!({"data": [{"id": 1}, {"id": 2}]}),
            json!({"items": [{"id": 1}, {"id": 2}]}),
            json!({"content": [{"id": 1}, {"id": 2}]}),
        ];
        for forma in formas {
            assert_eq!(unwrap_lista(forma), esperado);
        }
    }

    #[test]
    fn gana_la_primera_clave_que_es_lista() {
        let valor = json!({"data": "no soy lista", "items": [{"id": 1}]});
        assert_eq!(unwrap_lista(valor), vec![json!({"id": 1})]);
    }

    #[test]
    fn entrada_malformada_degrada_a_lista_vacia() {
        assert!(unwrap_lista(json!("texto")).is_empty());
        assert!(unwrap_lista(json!(42)).is_empty());
        assert!(unwrap_lista(Value::Null).is_empty());
        assert!(unwrap_lista(json!({"otra": [1]})).is_empty());
    }

    #[test]
    fn objeto_con_id_se_mantiene() {
        let valor = json!({"id": "7", "data": {"id": "otro"}});
        assert_eq!(unwrap_objeto(valor)["id"], "7");
    }

    #[test]
    fn objeto_envuelto_en_data_se_desenvuelve() {
        let valor = json!({"data": {"id": "7"}});
        assert_eq!(unwrap_objeto(valor)["id"], "7");
    }

    #[test]
    fn objeto_con_persona_se_mantiene() {
        let valor = json!({"persona": {"nombre": "Ana"}});
        assert!(unwrap_objeto(valor).get("persona").is_some());
    }
}
