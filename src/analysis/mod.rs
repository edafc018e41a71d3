//! Pure analysis over already-fetched video metadata.

mod engagement;
mod knowledge_base;

pub use engagement::{EngagementMetrics, EngagementTier};
pub use knowledge_base::{
    evaluate, is_high_volatility, AgeBand, CaptionQuality, ContentType, Evaluation,
    QualityIndicator, Recommendation, VideoSignals,
};

use chrono::{DateTime, Utc};

/// Whole days between publication and `now`.
pub fn age_in_days(published: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<i64> {
    published.map(|p| (now - p).num_days())
}
