//! Typed values carried by identifier segments.

use std::fmt;

/// The value of a single identifier segment.
///
/// A segment holds exactly one of a text, a 64-bit or a 32-bit integer
/// value. Text values are never empty.
///
/// # Example
///
/// ```rust
/// use restapi_client::IdentifierValue;
///
/// let value = IdentifierValue::Long(45);
/// assert_eq!(value.as_long(), Some(45));
/// assert_eq!(value.as_int(), None);
/// assert_eq!(value.to_string(), "45");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum IdentifierValue {
    /// A non-empty text identifier.
    Text(String),
    /// A 64-bit integer identifier.
    Long(i64),
    /// A 32-bit integer identifier.
    Int(i32),
}

impl IdentifierValue {
    /// Returns the text value, if this is a text identifier.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the 64-bit value, if this is a long identifier.
    #[must_use]
    pub const fn as_long(&self) -> Option<i64> {
        match self {
            Self::Long(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the 32-bit value, if this is an int identifier.
    #[must_use]
    pub const fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns true for text identifiers.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Returns true for 64-bit identifiers.
    #[must_use]
    pub const fn is_long(&self) -> bool {
        matches!(self, Self::Long(_))
    }

    /// Returns true for 32-bit identifiers.
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }

    fn is_present(&self) -> bool {
        match self {
            Self::Text(text) => !text.is_empty(),
            Self::Long(_) | Self::Int(_) => true,
        }
    }
}

impl fmt::Display for IdentifierValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Long(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
        }
    }
}

/// Conversion into an optional identifier value.
///
/// `None` stands for an absent element. Implementations exist for the three
/// supported value kinds and for `Option` of each, so a sequence such as
/// `[Some(1_i64), None]` can be handed to [`Identifier::new`] and rejected
/// there.
///
/// [`Identifier::new`]: crate::Identifier::new
pub trait IntoIdentifierValue {
    /// Converts into a value, or `None` when the element is absent.
    fn into_identifier_value(self) -> Option<IdentifierValue>;
}

impl IntoIdentifierValue for IdentifierValue {
    fn into_identifier_value(self) -> Option<IdentifierValue> {
        Some(self)
    }
}

impl IntoIdentifierValue for &str {
    fn into_identifier_value(self) -> Option<IdentifierValue> {
        Some(IdentifierValue::Text(self.to_string()))
    }
}

impl IntoIdentifierValue for String {
    fn into_identifier_value(self) -> Option<IdentifierValue> {
        Some(IdentifierValue::Text(self))
    }
}

impl IntoIdentifierValue for i64 {
    fn into_identifier_value(self) -> Option<IdentifierValue> {
        Some(IdentifierValue::Long(self))
    }
}

impl IntoIdentifierValue for i32 {
    fn into_identifier_value(self) -> Option<IdentifierValue> {
        Some(IdentifierValue::Int(self))
    }
}

impl<T: IntoIdentifierValue> IntoIdentifierValue for Option<T> {
    fn into_identifier_value(self) -> Option<IdentifierValue> {
        self.and_then(IntoIdentifierValue::into_identifier_value)
    }
}

/// Converts and validates a single value, failing on absent or empty input.
pub(super) fn validated<V: IntoIdentifierValue>(value: V) -> Option<IdentifierValue> {
    value
        .into_identifier_value()
        .filter(IdentifierValue::is_present)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_match_variant() {
        let text = IdentifierValue::Text("abc".to_string());
        assert_eq!(text.as_str(), Some("abc"));
        assert!(text.is_text());
        assert!(!text.is_long());
        assert!(!text.is_int());

        let long = IdentifierValue::Long(40);
        assert!(long.is_long());
        assert!(!long.is_int());
        assert_eq!(long.as_str(), None);

        let int = IdentifierValue::Int(40);
        assert!(int.is_int());
        assert!(!int.is_long());
        assert_eq!(int.as_int(), Some(40));
    }

    #[test]
    fn test_text_forty_is_not_numeric() {
        let value = IdentifierValue::Text("40".to_string());
        assert!(!value.is_long());
        assert!(!value.is_int());
    }

    #[test]
    fn test_validated_rejects_absent_and_empty() {
        assert_eq!(validated(None::<i64>), None);
        assert_eq!(validated(""), None);
        assert_eq!(validated(Some("")), None);
        assert_eq!(
            validated(Some(" ")),
            Some(IdentifierValue::Text(" ".to_string()))
        );
        assert_eq!(validated(7_i32), Some(IdentifierValue::Int(7)));
    }

    #[test]
    fn test_display_renders_raw_value() {
        assert_eq!(IdentifierValue::Text("last".to_string()).to_string(), "last");
        assert_eq!(IdentifierValue::Long(-45).to_string(), "-45");
        assert_eq!(IdentifierValue::Int(9).to_string(), "9");
    }
}
