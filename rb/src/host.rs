//! Values crossing the host boundary
//!
//! The host passes loosely-typed arguments. Exports only ever look at
//! string values; everything else is treated as if the argument were
//! absent, so malformed input can never crash the guest.

use std::fmt;

/// A single argument value supplied by the host
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HostValue {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

impl HostValue {
    /// The string payload, or `None` for every non-string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Parse a command-line token the way a JS host would type it
    ///
    /// `undefined`, `null`, `true`/`false` and finite numbers map to their
    /// typed variants; anything else stays a string.
    pub fn parse_arg(raw: &str) -> Self {
        match raw {
            "undefined" => Self::Undefined,
            "null" => Self::Null,
            "true" => Self::Bool(true),
            "false" => Self::Bool(false),
            _ => match raw.parse::<f64>() {
                Ok(n) if n.is_finite() => Self::Number(n),
                _ => Self::String(raw.to_string()),
            },
        }
    }

    /// Host-side type name, used in log lines
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
        }
    }
}

impl From<&str> for HostValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for HostValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<f64> for HostValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for HostValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl fmt::Display for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => write!(f, "undefined"),
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", n),
            Self::String(s) => write!(f, "{}", s),
        }
    }
}

/// String argument at `index`, ignoring absent and non-string values
pub fn string_arg(args: &[HostValue], index: usize) -> Option<&str> {
    args.get(index).and_then(HostValue::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_strings_have_str() {
        assert_eq!(HostValue::from("x").as_str(), Some("x"));
        assert_eq!(HostValue::Number(1.0).as_str(), None);
        assert_eq!(HostValue::Null.as_str(), None);
        assert_eq!(HostValue::Undefined.as_str(), None);
        assert_eq!(HostValue::Bool(true).as_str(), None);
    }

    #[test]
    fn test_parse_arg() {
        assert_eq!(HostValue::parse_arg("undefined"), HostValue::Undefined);
        assert_eq!(HostValue::parse_arg("null"), HostValue::Null);
        assert_eq!(HostValue::parse_arg("false"), HostValue::Bool(false));
        assert_eq!(HostValue::parse_arg("42"), HostValue::Number(42.0));
        assert_eq!(HostValue::parse_arg("-1.5"), HostValue::Number(-1.5));
        assert_eq!(HostValue::parse_arg("NaN"), HostValue::from("NaN"));
        assert_eq!(HostValue::parse_arg("My Page"), HostValue::from("My Page"));
    }

    #[test]
    fn test_string_arg() {
        let args = vec![HostValue::Number(3.0), HostValue::from("second")];
        assert_eq!(string_arg(&args, 0), None);
        assert_eq!(string_arg(&args, 1), Some("second"));
        assert_eq!(string_arg(&args, 2), None);
    }
}
