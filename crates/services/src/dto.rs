//! Ordered-candidate field lookup over loosely-typed backend records.
//!
//! Backend records rename fields between deployments, so every adapted
//! field reads through a candidate chain: the first key that is present
//! and of a usable type wins, later candidates are ignored.

use serde_json::Value;

/// First candidate that is a string or a number, coerced to a string.
pub(crate) fn texto(dto: &Value, claves: &[&str]) -> Option<String> {
    let mapa = dto.as_object()?;
    claves
        .iter()
        .filter_map(|clave| mapa.get(*clave))
        .find_map(|valor| match valor {
            Value::String(texto) => Some(texto.clone()),
            Value::Number(numero) => Some(numero.to_string()),
            _ => None,
        })
}

/// First candidate that is a number or a numeric string.
pub(crate) fn numero(dto: &Value, claves: &[&str]) -> Option<f64> {
    let mapa = dto.as_object()?;
    claves
        .iter()
        .filter_map(|clave| mapa.get(*clave))
        .find_map(|valor| match valor {
            Value::Number(numero) => numero.as_f64(),
            Value::String(texto) => texto.trim().parse().ok(),
            _ => None,
        })
}

/// First candidate that is an integer.
pub(crate) fn entero(dto: &Value, claves: &[&str]) -> Option<i64> {
    let mapa = dto.as_object()?;
    claves
        .iter()
        .filter_map(|clave| mapa.get(*clave))
        .find_map(Value::as_i64)
}

/// First candidate that is a boolean.
pub(crate) fn booleano(dto: &Value, claves: &[&str]) -> Option<bool> {
    let mapa = dto.as_object()?;
    claves
        .iter()
        .filter_map(|clave| mapa.get(*clave))
        .find_map(Value::as_bool)
}

/// The nested `persona` sub-record, when present.
pub(crate) fn persona(dto: &Value) -> Option<&Value> {
    dto.get("persona").filter(|valor| valor.is_object())
}
