use roster_model::prelude::*;

/// Unwraps a `json!` object literal into a field map.
/// # Panics
/// * If the value is not a JSON object.
#[must_use]
pub fn fields(value: Value) -> FieldMap {
    match value {
        Value::Object(fields) => fields,
        other => panic!("fixture is not an object: {other}"),
    }
}

/// Field names of `entity` as it serializes, discriminator included.
/// # Panics
/// * If the entity cannot be encoded.
#[must_use]
pub fn keys<E: Entity>(entity: &E) -> Vec<String> {
    entity.to_fields().expect("entity encodes").keys().cloned().collect()
}
