//! Crate error type.
//!
//! Only page setup can fail outright. Individual features degrade to a no-op
//! (with a logged warning) when the markup or a third-party engine is missing.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("browser global `{0}` is unavailable")]
    MissingGlobal(&'static str),
    #[error("element `{0}` is not of the expected type")]
    UnexpectedElement(&'static str),
    #[error("invalid site configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error("setting `{field}` must be a positive number, got {value}")]
    InvalidSetting { field: &'static str, value: f64 },
    #[error("javascript call failed: {0}")]
    Js(String),
}

pub type Result<T> = std::result::Result<T, SiteError>;

impl From<JsValue> for SiteError {
    fn from(value: JsValue) -> Self {
        match value.as_string() {
            Some(s) => SiteError::Js(s),
            None => SiteError::Js(format!("{value:?}")),
        }
    }
}

impl From<SiteError> for JsValue {
    fn from(err: SiteError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_carry_the_parser_message() {
        let parse = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = SiteError::from(parse);
        assert!(err.to_string().starts_with("invalid site configuration:"));
    }

    #[test]
    fn missing_global_names_the_global() {
        let err = SiteError::MissingGlobal("document");
        assert_eq!(err.to_string(), "browser global `document` is unavailable");
    }
}
