//! Likes-based engagement labels attached to content items.

use serde::{Deserialize, Serialize};

/// Coarse audience reaction inferred from like counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementLabel {
    /// Likes above the threshold.
    Positive,
    /// Likes at or below the threshold.
    Neutral,
}

impl EngagementLabel {
    /// Lowercase label name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            EngagementLabel::Positive => "positive",
            EngagementLabel::Neutral => "neutral",
        }
    }
}

/// Label an item by its like count; `None` when the source reports no likes.
pub fn label_by_likes(likes: Option<f64>, threshold: f64) -> Option<EngagementLabel> {
    likes.map(|count| {
        if count > threshold {
            EngagementLabel::Positive
        } else {
            EngagementLabel::Neutral
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn likes_above_threshold_are_positive() {
        assert_eq!(
            label_by_likes(Some(1001.0), 1000.0),
            Some(EngagementLabel::Positive)
        );
        assert_eq!(
            label_by_likes(Some(1000.0), 1000.0),
            Some(EngagementLabel::Neutral)
        );
        assert_eq!(label_by_likes(None, 1000.0), None);
    }
}
