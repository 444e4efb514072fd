//! Small window-level helpers used by the page markup.

use serde::{Deserialize, Serialize};

/// Next `aria-expanded` value for a disclosure toggle.
///
/// Anything other than `"true"` (including a missing attribute) opens it.
pub fn toggled_aria_expanded(current: Option<&str>) -> &'static str {
    if current == Some("true") { "false" } else { "true" }
}

/// Payload of a delayed script execution request.
///
/// `js` names an attribute of the event target that holds the script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecTimeout {
    #[serde(default)]
    pub timeout: Option<u32>,
    #[serde(default)]
    pub js: Option<String>,
}

impl ExecTimeout {
    /// Delay before running, or `None` when nothing should be scheduled.
    pub fn delay_ms(&self) -> Option<u32> {
        self.timeout.filter(|timeout| *timeout > 0)
    }

    /// Attribute to read the script from once the delay elapsed.
    pub fn attribute(&self) -> Option<&str> {
        self.js.as_deref().filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_aria() {
        assert_eq!(toggled_aria_expanded(Some("true")), "false");
        assert_eq!(toggled_aria_expanded(Some("false")), "true");
        assert_eq!(toggled_aria_expanded(None), "true");
        assert_eq!(toggled_aria_expanded(Some("mixed")), "true");
    }

    #[test]
    fn test_exec_timeout_from_json() {
        let request: ExecTimeout =
            serde_json::from_str(r#"{"timeout": 1500, "js": "data-hide"}"#).unwrap();
        assert_eq!(request.delay_ms(), Some(1500));
        assert_eq!(request.attribute(), Some("data-hide"));
    }

    #[test]
    fn test_zero_or_missing_timeout_is_not_scheduled() {
        let zero = ExecTimeout {
            timeout: Some(0),
            js: Some("data-hide".into()),
        };
        assert_eq!(zero.delay_ms(), None);
        assert_eq!(ExecTimeout::default().delay_ms(), None);
    }
}
