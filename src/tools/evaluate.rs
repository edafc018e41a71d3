//! Knowledge-base suitability report.

use super::{require_video_id, ToolContext, VideoArgs};
use crate::analysis::{age_in_days, evaluate, CaptionQuality, Evaluation, VideoSignals};
use crate::error::{Result, YtDataError};
use crate::youtube::format::{display_duration, thousands, IsoDuration};
use crate::youtube::models::Caption;
use crate::youtube::video_url;
use chrono::Utc;
use tracing::warn;

fn caption_quality(captions: &[Caption]) -> CaptionQuality {
    if captions.is_empty() {
        CaptionQuality::None
    } else if captions.iter().any(Caption::is_manual) {
        CaptionQuality::Manual
    } else {
        CaptionQuality::AutoGenerated
    }
}

/// Minutes used for the length score. Durations without a minutes
/// component (`PT2H`, `PT45S`) are not scored.
fn scored_minutes(raw: Option<&str>) -> Option<u64> {
    raw.and_then(IsoDuration::parse)
        .filter(|d| d.minute_component() > 0)
        .map(|d| d.minutes())
}

pub async fn evaluate_video_for_knowledge_base(ctx: &ToolContext, args: VideoArgs) -> Result<String> {
    let video_id = require_video_id(&args.video_input)?;

    let (video, captions) = futures::join!(
        ctx.client.video(&video_id, "snippet,statistics,contentDetails"),
        ctx.client.captions(&video_id),
    );

    let video = video?.ok_or_else(|| {
        YtDataError::NotFound(format!(
            "Video with ID '{}' not found or is not accessible.",
            video_id
        ))
    })?;
    let captions = match captions {
        Ok(list) => list.items,
        Err(e) if e.is_forbidden() => {
            warn!(error = %e, "Caption listing not permitted; scoring without captions");
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    let snippet = video.snippet.clone().unwrap_or_default();
    let views = video.stats().views();
    let duration = display_duration(video.duration());
    let captions = caption_quality(&captions);
    let age_days = age_in_days(video.published_at(), Utc::now());

    let evaluation = evaluate(&VideoSignals {
        title: video.title(),
        view_count: views,
        duration_minutes: scored_minutes(video.duration()),
        age_days,
        captions,
    });

    let caption_line = match captions {
        CaptionQuality::Manual => "Yes (Manual)",
        CaptionQuality::AutoGenerated => "Yes (Auto-generated)",
        CaptionQuality::None => "No",
    };

    let mut output = format!(
        "Video Knowledge Base Evaluation:\n\n\
         Video: {}\n\
         Channel: {}\n\
         Duration: {}\n\
         Views: {}\n\
         Content Type: {}\n\
         Captions Available: {}\n\n\
         📊 Quality Indicators:\n",
        video.title(),
        snippet.channel_title.as_deref().unwrap_or("Unknown Channel"),
        duration,
        thousands(views),
        evaluation.content_type.label(),
        caption_line,
    );

    if evaluation.indicators.is_empty() {
        output.push_str("• Limited quality indicators detected\n");
    }
    for indicator in &evaluation.indicators {
        output.push_str(&format!("• {}\n", indicator.label()));
    }

    if let (Some(age), Some(band)) = (age_days, evaluation.age_band) {
        output.push_str(&freshness_section(age, band.label(), &evaluation));
    }

    let caption_reason = match captions {
        CaptionQuality::Manual => "Manual captions suggest higher content quality",
        CaptionQuality::AutoGenerated => "Auto-generated captions available",
        CaptionQuality::None => "No captions available",
    };

    output.push_str(&format!(
        "\n\n🎯 Knowledge Base Recommendation:\n{}\n\n\
         Reasoning:\n\
         • Content appears to be {}\n\
         • Video has {} views indicating {} audience interest\n\
         • {}\n\
         • Duration ({}) is {} for learning content\n\n\
         💡 Decision Support:\n{}\n\n\
         Video URL: {}\n\n\
         Note: This evaluation is based on video metadata only. Use get_video_transcript \
         for a look at the actual content.",
        evaluation.recommendation.headline(),
        evaluation.content_type.label().to_lowercase(),
        thousands(views),
        if views > 100_000 { "strong" } else { "moderate" },
        caption_reason,
        duration,
        if evaluation.score > 2 { "appropriate" } else { "variable" },
        evaluation.recommendation.advice(),
        video_url(&video_id),
    ));

    Ok(output)
}

fn freshness_section(age_days: i64, band: &str, evaluation: &Evaluation) -> String {
    let mut section = format!(
        "\n⏰ Content Freshness Analysis:\n• Video Age: {} days ({})\n",
        age_days, band
    );

    if evaluation.high_volatility {
        section.push_str("• High-Volatility Tech Topic: Extra freshness priority applied\n");
    }

    let freshness = evaluation.freshness();
    if freshness > 0 {
        if evaluation.tech_bonus > 0 {
            section.push_str(&format!(
                "• Freshness Bonus: +{} points ({} base + {} tech volatility)\n",
                freshness, evaluation.base_freshness, evaluation.tech_bonus
            ));
        } else {
            section.push_str(&format!(
                "• Freshness Bonus: +{} points for recent content\n",
                freshness
            ));
        }
    } else if freshness < 0 {
        section.push_str(&format!(
            "• Age Penalty: {} point for older content\n",
            freshness
        ));
    }

    section
}
