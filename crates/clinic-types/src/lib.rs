//! Validated primitives shared by the clinic crates.
//!
//! Record fields that must never be blank (identifiers, names) are carried as
//! [`NonEmptyText`]; doctor ratings are carried as [`Rating`]. Both validate on
//! construction and on deserialisation, so any value that reaches the store is
//! already known to be well formed.

use std::fmt;

/// Errors that can occur when creating validated primitive types.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    /// A rating fell outside the closed range `0.0..=5.0` or was not a number
    #[error("rating must be between {min} and {max}, got {value}")]
    RatingOutOfRange { value: f64, min: f64, max: f64 },
}

/// A string type that guarantees non-empty content.
///
/// The input is trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// # Errors
    ///
    /// Returns `Err(TextError::Empty)` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NonEmptyText {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NonEmptyText {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A doctor's star rating, guaranteed to lie within `0.0..=5.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Rating(f64);

impl Rating {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 5.0;

    /// Creates a rating, rejecting NaN and values outside `0.0..=5.0`.
    pub fn new(value: f64) -> Result<Self, TextError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(TextError::RatingOutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

impl serde::Serialize for Rating {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Rating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Rating::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_input() {
        let text = NonEmptyText::new("  Maria Garcia \n").expect("valid text");
        assert_eq!(text.as_str(), "Maria Garcia");
        assert_eq!(text, "Maria Garcia");
    }

    #[test]
    fn non_empty_text_rejects_whitespace() {
        assert_eq!(NonEmptyText::new("   "), Err(TextError::Empty));
        assert_eq!(NonEmptyText::new(""), Err(TextError::Empty));
    }

    #[test]
    fn non_empty_text_deserialize_rejects_blank() {
        let err = serde_json::from_str::<NonEmptyText>("\"  \"").expect_err("blank must fail");
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn rating_accepts_bounds() {
        assert_eq!(Rating::new(0.0).expect("min").value(), 0.0);
        assert_eq!(Rating::new(5.0).expect("max").value(), 5.0);
        assert_eq!(Rating::new(4.8).expect("mid").to_string(), "4.8");
    }

    #[test]
    fn rating_rejects_out_of_range_and_nan() {
        assert!(matches!(
            Rating::new(5.1),
            Err(TextError::RatingOutOfRange { .. })
        ));
        assert!(Rating::new(-0.5).is_err());
        assert!(Rating::new(f64::NAN).is_err());
    }

    #[test]
    fn rating_deserialize_validates() {
        let rating: Rating = serde_json::from_str("4.5").expect("valid rating");
        assert_eq!(rating.value(), 4.5);
        assert!(serde_json::from_str::<Rating>("7").is_err());
    }
}
