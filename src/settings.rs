//! Functions for loading device settings.

use crate::errors::*;

/// Decides what happens to the errors queued by the driver after each call.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCheck {
    /// Never calls `glGetError`.
    Disabled,
    /// Drains the error queue and logs every entry.
    Log,
    /// Drains and logs the error queue, then returns the first entry as an `Error`.
    Fail,
}

impl Default for ErrorCheck {
    fn default() -> Self {
        ErrorCheck::Log
    }
}

/// A structure containing configuration data for a `Device`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub error_check: ErrorCheck,
    /// Refuses contexts without shader objects or vertex buffer objects.
    pub check_capabilities: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            error_check: ErrorCheck::default(),
            check_capabilities: true,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.error_check, ErrorCheck::Log);
        assert!(settings.check_capabilities);
    }

    #[test]
    fn json() {
        let settings = Settings::from_json(r#"{ "error_check": "Fail" }"#).unwrap();
        assert_eq!(settings.error_check, ErrorCheck::Fail);
        assert!(settings.check_capabilities);

        let settings = Settings::from_json(
            r#"{ "error_check": "Disabled", "check_capabilities": false }"#,
        ).unwrap();
        assert_eq!(settings.error_check, ErrorCheck::Disabled);
        assert!(!settings.check_capabilities);

        assert!(Settings::from_json(r#"{ "error_check": "Loud" }"#).is_err());
    }
}
