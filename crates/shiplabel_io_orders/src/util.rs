use polars::prelude::AnyValue;

/// Convert one CSV cell into optional text.
///
/// Nulls and empty cells are missing.
pub(crate) fn derive_text_from_any_value(value: AnyValue<'_>) -> Option<String> {
    let c_text = match value {
        AnyValue::Null => return None,
        AnyValue::String(val) => val.to_string(),
        AnyValue::StringOwned(val) => val.to_string(),
        _ => value.to_string(),
    };
    if c_text.is_empty() {
        None
    } else {
        Some(c_text)
    }
}
