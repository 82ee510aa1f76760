//! Small validated value types shared by the DiaBP crates.
//!
//! - [`NonEmptyText`]: trimmed text that is guaranteed to carry content (chat messages).
//! - [`RiskScore`]: a percentage in `0..=100` produced by clipping a risk accumulator.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("text cannot be empty")]
    Empty,
}

/// Text that is known to contain at least one non-whitespace character.
///
/// Leading and trailing whitespace is removed on construction, so two inputs that differ
/// only in padding compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Trims `input` and wraps it, or returns [`TextError::Empty`] if nothing is left.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for NonEmptyText {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
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

/// A relative risk indicator expressed as a whole percentage.
///
/// The only way to build one is [`RiskScore::clipped`], which caps the accumulated points at
/// [`RiskScore::MAX`]. Scoring rules only ever add non-negative points, so there is no floor
/// to enforce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u32", into = "u8")]
pub struct RiskScore(u8);

impl RiskScore {
    /// Upper bound of every score.
    pub const MAX: u8 = 100;

    /// Caps an unbounded accumulator at [`RiskScore::MAX`].
    pub fn clipped(points: u32) -> Self {
        // Bounded by MAX, so the narrowing cast is lossless.
        Self(points.min(u32::from(Self::MAX)) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// Raised when deserialising a score outside `0..=100`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("risk score {0} is outside 0..=100")]
pub struct RiskScoreOutOfRange(pub u32);

impl TryFrom<u32> for RiskScore {
    type Error = RiskScoreOutOfRange;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value > u32::from(Self::MAX) {
            return Err(RiskScoreOutOfRange(value));
        }
        Ok(Self::clipped(value))
    }
}

impl From<RiskScore> for u8 {
    fn from(score: RiskScore) -> Self {
        score.0
    }
}

impl std::fmt::Display for RiskScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_padding() {
        let text = NonEmptyText::new("  headache since morning \n").unwrap();
        assert_eq!(text.as_str(), "headache since morning");
    }

    #[test]
    fn non_empty_text_rejects_whitespace() {
        assert_eq!(NonEmptyText::new(" \t\n"), Err(TextError::Empty));
        assert_eq!("".parse::<NonEmptyText>(), Err(TextError::Empty));
    }

    #[test]
    fn non_empty_text_deserialize_rejects_blank() {
        let err = serde_json::from_str::<NonEmptyText>("\"   \"").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn risk_score_clips_at_one_hundred() {
        assert_eq!(RiskScore::clipped(0).value(), 0);
        assert_eq!(RiskScore::clipped(70).value(), 70);
        assert_eq!(RiskScore::clipped(100).value(), 100);
        assert_eq!(RiskScore::clipped(130).value(), 100);
        assert_eq!(RiskScore::clipped(u32::MAX).value(), 100);
    }

    #[test]
    fn risk_score_serialises_as_plain_integer() {
        let json = serde_json::to_string(&RiskScore::clipped(25)).unwrap();
        assert_eq!(json, "25");
        let back: RiskScore = serde_json::from_str("60").unwrap();
        assert_eq!(back.value(), 60);
        assert!(serde_json::from_str::<RiskScore>("101").is_err());
    }

    #[test]
    fn risk_score_displays_as_percentage() {
        assert_eq!(RiskScore::clipped(40).to_string(), "40%");
    }
}
