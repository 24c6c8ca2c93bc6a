//! Read access to sectioned `key = value` settings.

use crate::domain::error::DipdcaError;

pub trait ConfigPort {
    /// Trimmed value; `None` when the key is absent or blank.
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    /// `default` when absent; `ConfigInvalid` when present but not an integer.
    fn get_int(&self, section: &str, key: &str, default: i64) -> Result<i64, DipdcaError>;
    /// `default` when absent; `ConfigInvalid` when present but not a number.
    fn get_double(&self, section: &str, key: &str, default: f64) -> Result<f64, DipdcaError>;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;

    /// Like `get_string`, but a missing key is a `ConfigMissing` error.
    fn require_string(&self, section: &str, key: &str) -> Result<String, DipdcaError> {
        self.get_string(section, key)
            .ok_or_else(|| DipdcaError::ConfigMissing {
                section: section.to_string(),
                key: key.to_string(),
            })
    }
}
