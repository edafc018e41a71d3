//! Knowledge-base suitability scoring.
//!
//! A metadata-only heuristic: it never looks at transcript content. The
//! score blends content type (from the title), freshness (age bands, with an
//! extra weight for fast-moving technology topics), popularity, caption
//! quality and length.

/// Topics whose material goes stale quickly.
const HIGH_VOLATILITY_TOPICS: &[&str] = &[
    "react",
    "vue",
    "angular",
    "aws",
    "docker",
    "kubernetes",
    "ai",
    "ml",
    "machine learning",
    "next.js",
    "typescript",
];

/// Views above which a video counts as popular.
const POPULAR_VIEWS: u64 = 100_000;

/// What kind of video the title suggests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Tutorial,
    Analysis,
    Introductory,
    News,
    Unknown,
}

impl ContentType {
    /// Classify a title. The first matching group wins.
    pub fn classify(title: &str) -> Self {
        let title = title.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| title.contains(w));

        if has(&["tutorial", "how to", "guide", "learn"]) {
            ContentType::Tutorial
        } else if has(&["review", "analysis", "deep dive"]) {
            ContentType::Analysis
        } else if has(&["introduction", "overview", "basics"]) {
            ContentType::Introductory
        } else if has(&["news", "update", "announcement"]) {
            ContentType::News
        } else {
            ContentType::Unknown
        }
    }

    pub fn points(&self) -> i32 {
        match self {
            ContentType::Tutorial | ContentType::Analysis => 2,
            ContentType::Introductory | ContentType::News => 1,
            ContentType::Unknown => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Tutorial => "Tutorial/Educational",
            ContentType::Analysis => "Analysis/Review",
            ContentType::Introductory => "Introductory",
            ContentType::News => "News/Updates",
            ContentType::Unknown => "Unknown",
        }
    }
}

/// Age band of a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBand {
    VeryRecent,
    Recent,
    ModerateAge,
    Older,
    Aging,
}

impl AgeBand {
    pub fn from_days(days: i64) -> Self {
        match days {
            d if d <= 183 => AgeBand::VeryRecent,
            d if d <= 365 => AgeBand::Recent,
            d if d <= 730 => AgeBand::ModerateAge,
            d if d <= 1095 => AgeBand::Older,
            _ => AgeBand::Aging,
        }
    }

    pub fn points(&self) -> i32 {
        match self {
            AgeBand::VeryRecent => 3,
            AgeBand::Recent => 2,
            AgeBand::ModerateAge => 1,
            AgeBand::Older => 0,
            AgeBand::Aging => -1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeBand::VeryRecent => "Very Recent",
            AgeBand::Recent => "Recent",
            AgeBand::ModerateAge => "Moderate Age",
            AgeBand::Older => "Older Content",
            AgeBand::Aging => "Aging Content",
        }
    }
}

/// Caption availability for a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionQuality {
    None,
    AutoGenerated,
    Manual,
}

/// Positive signals found in the metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityIndicator {
    HighViewCount,
    ManualCaptions,
    AutoCaptions,
    InDepthLength,
    LongForm,
    ModerateLength,
}

impl QualityIndicator {
    pub fn label(&self) -> &'static str {
        match self {
            QualityIndicator::HighViewCount => "High view count (popular content)",
            QualityIndicator::ManualCaptions => "Manual captions (higher quality)",
            QualityIndicator::AutoCaptions => "Auto-generated captions available",
            QualityIndicator::InDepthLength => "Good length for in-depth content (10-60 min)",
            QualityIndicator::LongForm => "Long-form content (comprehensive)",
            QualityIndicator::ModerateLength => "Moderate length content",
        }
    }
}

/// Recommendation tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    Highly,
    Moderately,
    Limited,
}

impl Recommendation {
    pub fn from_score(score: i32) -> Self {
        if score >= 4 {
            Recommendation::Highly
        } else if score >= 2 {
            Recommendation::Moderately
        } else {
            Recommendation::Limited
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Recommendation::Highly => "🟢 HIGHLY RECOMMENDED - Strong indicators of valuable content",
            Recommendation::Moderately => "🟡 MODERATELY RECOMMENDED - Some positive indicators",
            Recommendation::Limited => "🔴 LIMITED RECOMMENDATION - Few quality indicators",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Recommendation::Highly => {
                "This video shows strong metadata indicators for knowledge base inclusion. \
                 Consider adding it for comprehensive coverage."
            }
            Recommendation::Moderately => {
                "Video shows some positive indicators. Review the content to determine \
                 if it meets your knowledge base standards."
            }
            Recommendation::Limited => {
                "Limited metadata indicators suggest this may not be optimal for knowledge \
                 base inclusion unless it covers a specific niche topic you need."
            }
        }
    }
}

/// Metadata fed into the evaluation.
#[derive(Debug, Clone)]
pub struct VideoSignals<'a> {
    pub title: &'a str,
    pub view_count: u64,
    /// Length in whole minutes. `None` when unknown or when the duration has
    /// no minutes component, neither of which scores length.
    pub duration_minutes: Option<u64>,
    /// Days since publication, when known.
    pub age_days: Option<i64>,
    pub captions: CaptionQuality,
}

/// Result of scoring a video.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub content_type: ContentType,
    pub age_band: Option<AgeBand>,
    pub high_volatility: bool,
    /// Freshness points from the age band alone.
    pub base_freshness: i32,
    /// Extra freshness for recent, fast-moving topics.
    pub tech_bonus: i32,
    pub indicators: Vec<QualityIndicator>,
    pub score: i32,
    pub recommendation: Recommendation,
}

impl Evaluation {
    /// Total freshness contribution (base + tech bonus).
    pub fn freshness(&self) -> i32 {
        self.base_freshness + self.tech_bonus
    }
}

/// Whether the title mentions a fast-moving technology topic.
///
/// Topics match anywhere in the lowercased title, so "ai" also matches
/// "maintain" and "react" matches "reactive".
pub fn is_high_volatility(title: &str) -> bool {
    let title = title.to_lowercase();
    HIGH_VOLATILITY_TOPICS.iter().any(|t| title.contains(t))
}

/// Score a video for knowledge-base inclusion.
pub fn evaluate(signals: &VideoSignals<'_>) -> Evaluation {
    let content_type = ContentType::classify(signals.title);
    let mut score = content_type.points();

    let age_band = signals.age_days.map(AgeBand::from_days);
    let base_freshness = age_band.map(|b| b.points()).unwrap_or(0);

    let high_volatility = is_high_volatility(signals.title);
    let tech_bonus = if high_volatility && base_freshness > 0 { 2 } else { 0 };
    score += base_freshness + tech_bonus;

    let mut indicators = Vec::new();

    if signals.view_count > POPULAR_VIEWS {
        indicators.push(QualityIndicator::HighViewCount);
        score += 1;
    }

    match signals.captions {
        CaptionQuality::Manual => {
            indicators.push(QualityIndicator::ManualCaptions);
            score += 1;
        }
        CaptionQuality::AutoGenerated => indicators.push(QualityIndicator::AutoCaptions),
        CaptionQuality::None => {}
    }

    match signals.duration_minutes {
        Some(m) if (10..=60).contains(&m) => {
            indicators.push(QualityIndicator::InDepthLength);
            score += 1;
        }
        Some(m) if m > 60 => {
            indicators.push(QualityIndicator::LongForm);
            score += 1;
        }
        Some(m) if m >= 5 => indicators.push(QualityIndicator::ModerateLength),
        _ => {}
    }

    Evaluation {
        content_type,
        age_band,
        high_volatility,
        base_freshness,
        tech_bonus,
        indicators,
        score,
        recommendation: Recommendation::from_score(score),
    }
}
