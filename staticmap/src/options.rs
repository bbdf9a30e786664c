//! Reading typed values out of dynamic option mappings.

use serde_json::{Map, Value};

use crate::error::StaticMapError;

pub(crate) type Options = Map<String, Value>;

/// Returns the entries of an options mapping. `null` is treated as no options.
pub(crate) fn as_options<'a>(
    value: &'a Value,
    context: &str,
) -> Result<Option<&'a Options>, StaticMapError> {
    match value {
        Value::Null => Ok(None),
        Value::Object(options) => Ok(Some(options)),
        other => Err(StaticMapError::InvalidArgument(format!(
            "{context} options must be a mapping, got `{other}`"
        ))),
    }
}

/// Fails with [`StaticMapError::UnknownOption`] listing every key not in `allowed`.
pub(crate) fn reject_unknown<'a>(
    keys: impl IntoIterator<Item = &'a String>,
    allowed: &[&str],
) -> Result<(), StaticMapError> {
    let unknown: Vec<String> = keys
        .into_iter()
        .filter(|key| !allowed.contains(&key.as_str()))
        .cloned()
        .collect();

    if unknown.is_empty() {
        Ok(())
    } else {
        log::debug!("Rejecting unknown options: {unknown:?}");
        Err(StaticMapError::UnknownOption(unknown))
    }
}

pub(crate) fn invalid(option: &str, reason: impl Into<String>) -> StaticMapError {
    StaticMapError::InvalidOptionValue {
        option: option.to_string(),
        reason: reason.into(),
    }
}

/// Strings, numbers and booleans are accepted as text values.
pub(crate) fn string_value(option: &str, value: &Value) -> Result<Option<String>, StaticMapError> {
    match value {
        Value::Null => Ok(None),
        Value::String(value) => Ok(Some(value.clone())),
        Value::Number(value) => Ok(Some(value.to_string())),
        Value::Bool(value) => Ok(Some(value.to_string())),
        other => Err(invalid(option, format!("expected text, got `{other}`"))),
    }
}

pub(crate) fn bool_value(option: &str, value: &Value) -> Result<Option<bool>, StaticMapError> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(value) => Ok(Some(*value)),
        other => Err(invalid(option, format!("expected boolean, got `{other}`"))),
    }
}

/// Non-negative integers, given either as numbers or as numeric strings.
pub(crate) fn u32_value(option: &str, value: &Value) -> Result<Option<u32>, StaticMapError> {
    let parsed = match value {
        Value::Null => return Ok(None),
        Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };

    parsed
        .map(Some)
        .ok_or_else(|| invalid(option, format!("expected non-negative integer, got `{value}`")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn unknown_keys_are_listed() {
        let options = json!({"color": "red", "colour": "blue", "sise": "mid"});
        let options = as_options(&options, "marker").unwrap().unwrap();
        assert_eq!(
            reject_unknown(options.keys(), &["color", "size"]),
            Err(StaticMapError::UnknownOption(vec![
                "colour".to_string(),
                "sise".to_string()
            ]))
        );
    }

    #[test]
    fn scalar_values() {
        assert_eq!(string_value("label", &json!(7)).unwrap().as_deref(), Some("7"));
        assert_eq!(string_value("label", &Value::Null).unwrap(), None);
        assert_eq!(bool_value("sensor", &json!(false)).unwrap(), Some(false));
        assert_eq!(u32_value("zoom", &json!("12")).unwrap(), Some(12));
        assert_matches!(
            u32_value("zoom", &json!(-1)),
            Err(StaticMapError::InvalidOptionValue { option, .. }) if option == "zoom"
        );
        assert_matches!(
            bool_value("sensor", &json!("yes")),
            Err(StaticMapError::InvalidOptionValue { .. })
        );
    }

    #[test]
    fn non_mapping_options() {
        assert_eq!(as_options(&Value::Null, "path").unwrap(), None);
        assert_matches!(
            as_options(&json!([1, 2]), "path"),
            Err(StaticMapError::InvalidArgument(_))
        );
    }
}
