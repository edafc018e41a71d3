//! Engagement metrics for a single video.

/// Engagement tier, based on rough industry averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementTier {
    Exceptional,
    Excellent,
    Good,
    Average,
    BelowAverage,
}

impl EngagementTier {
    pub fn from_rate(rate: f64) -> Self {
        if rate >= 8.0 {
            EngagementTier::Exceptional
        } else if rate >= 4.0 {
            EngagementTier::Excellent
        } else if rate >= 2.0 {
            EngagementTier::Good
        } else if rate >= 1.0 {
            EngagementTier::Average
        } else {
            EngagementTier::BelowAverage
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EngagementTier::Exceptional => "🔥 Exceptional (8%+)",
            EngagementTier::Excellent => "⭐ Excellent (4-8%)",
            EngagementTier::Good => "✅ Good (2-4%)",
            EngagementTier::Average => "📊 Average (1-2%)",
            EngagementTier::BelowAverage => "📉 Below Average (<1%)",
        }
    }
}

/// Derived engagement numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct EngagementMetrics {
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    /// Likes per 100 views.
    pub like_rate: f64,
    /// Comments per 100 views.
    pub comment_rate: f64,
    pub engagement_rate: f64,
    pub age_days: Option<i64>,
    pub views_per_day: Option<f64>,
}

impl EngagementMetrics {
    pub fn compute(views: u64, likes: u64, comments: u64, age_days: Option<i64>) -> Self {
        let (like_rate, comment_rate) = if views > 0 {
            (
                likes as f64 / views as f64 * 100.0,
                comments as f64 / views as f64 * 100.0,
            )
        } else {
            (0.0, 0.0)
        };

        let views_per_day = age_days
            .filter(|d| *d > 0)
            .map(|d| views as f64 / d as f64);

        Self {
            views,
            likes,
            comments,
            like_rate,
            comment_rate,
            engagement_rate: like_rate + comment_rate,
            age_days,
            views_per_day,
        }
    }

    pub fn tier(&self) -> EngagementTier {
        EngagementTier::from_rate(self.engagement_rate)
    }

    /// Plain-language observations about the numbers.
    pub fn insights(&self) -> Vec<&'static str> {
        let mut insights = Vec::new();

        insights.push(if self.engagement_rate >= 4.0 {
            "This video has excellent engagement! The audience is highly responsive."
        } else if self.engagement_rate >= 2.0 {
            "Good engagement levels indicate the content resonates with viewers."
        } else {
            "Engagement could be improved. Consider more interactive content or better thumbnails."
        });

        if self.like_rate > self.comment_rate * 5.0 {
            insights.push("High like-to-comment ratio suggests easy-to-consume content.");
        } else if self.comment_rate > self.like_rate {
            insights.push("High comment rate indicates the content sparks discussion.");
        }

        if matches!(self.age_days, Some(d) if d < 7) && self.views > 10_000 {
            insights.push("Strong early performance - video is gaining momentum quickly.");
        }

        insights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates() {
        let m = EngagementMetrics::compute(10_000, 300, 50, Some(10));
        assert!((m.like_rate - 3.0).abs() < 1e-9);
        assert!((m.comment_rate - 0.5).abs() < 1e-9);
        assert!((m.engagement_rate - 3.5).abs() < 1e-9);
        assert_eq!(m.views_per_day, Some(1000.0));
        assert_eq!(m.tier(), EngagementTier::Good);
    }

    #[test]
    fn test_zero_views() {
        let m = EngagementMetrics::compute(0, 5, 5, Some(0));
        assert_eq!(m.engagement_rate, 0.0);
        assert_eq!(m.views_per_day, None);
        assert_eq!(m.tier(), EngagementTier::BelowAverage);
    }

    #[test]
    fn test_tier_edges() {
        assert_eq!(EngagementTier::from_rate(8.0), EngagementTier::Exceptional);
        assert_eq!(EngagementTier::from_rate(7.99), EngagementTier::Excellent);
        assert_eq!(EngagementTier::from_rate(2.0), EngagementTier::Good);
        assert_eq!(EngagementTier::from_rate(1.0), EngagementTier::Average);
        assert_eq!(EngagementTier::from_rate(0.99), EngagementTier::BelowAverage);
    }

    #[test]
    fn test_insights() {
        let fresh_hit = EngagementMetrics::compute(50_000, 3_000, 100, Some(3));
        let insights = fresh_hit.insights();
        assert_eq!(insights.len(), 3);
        assert!(insights[0].starts_with("This video has excellent engagement"));
        assert!(insights[1].contains("like-to-comment"));
        assert!(insights[2].contains("early performance"));

        let discussion = EngagementMetrics::compute(1_000, 5, 20, None);
        assert!(discussion.insights().iter().any(|i| i.contains("sparks discussion")));
    }
}
