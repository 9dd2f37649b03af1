use serde::Deserialize;

/// Accepts the usual spellings of a boolean column; empty means `false`.
pub(super) fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "f" | "n" => Ok(false),
        "1" | "true" | "yes" | "t" | "y" | "-1" => Ok(true),
        other => Err(serde::de::Error::custom(format!(
            "expected a boolean flag, got '{other}'"
        ))),
    }
}
