//! Caption metadata and transcript tools.

use super::{require_video_id, ToolContext, VideoLanguageArgs};
use crate::error::{Result, YtDataError};
use crate::youtube::format::minute_timestamp;
use crate::youtube::video_url;
use tracing::warn;

/// Timestamped segments shown after the full text.
const PREVIEW_SEGMENTS: usize = 10;

/// Title for context lines; lookup failures are not fatal.
async fn video_title(ctx: &ToolContext, video_id: &str) -> String {
    match ctx.client.video(video_id, "snippet").await {
        Ok(Some(video)) => video.title().to_string(),
        Ok(None) => "Unknown Video".to_string(),
        Err(e) => {
            warn!(error = %e, "Could not fetch video title");
            "Unknown Video".to_string()
        }
    }
}

pub async fn get_video_caption_info(ctx: &ToolContext, args: VideoLanguageArgs) -> Result<String> {
    let video_id = require_video_id(&args.video_input)?;
    let language = ctx.language(args.language);

    let captions = match ctx.client.captions(&video_id).await {
        Ok(list) => list.items,
        Err(e) if e.is_forbidden() => {
            return Err(YtDataError::Restricted(format!(
                "Access to captions for video '{}' is restricted.",
                video_id
            )))
        }
        Err(e) => return Err(e),
    };

    if captions.is_empty() {
        return Ok(format!(
            "No captions/transcripts available for video '{}'. The video may not have captions enabled or may not exist.",
            video_id
        ));
    }

    let track_language = |c: &crate::youtube::models::Caption| {
        c.snippet.language.clone().unwrap_or_else(|| "unknown".to_string())
    };
    let available: Vec<String> = captions.iter().map(track_language).collect();
    let chosen = captions
        .iter()
        .find(|c| c.snippet.language.as_deref() == Some(language.as_str()))
        .unwrap_or(&captions[0]);

    let title = video_title(ctx, &video_id).await;
    let auto_generated = chosen.snippet.track_kind.as_deref() == Some("asr");

    Ok(format!(
        "YouTube Video Captions:\n\n\
         Video: {}\n\
         Video ID: {}\n\
         Language: {}\n\
         Caption Type: {}\n\
         Auto-Generated: {}\n\
         Track Name: {}\n\n\
         Available Languages: {}\n\n\
         Note: This lists caption tracks only. Use get_video_transcript to read the \
         transcript content.\n\n\
         Caption ID: {}\n\
         Video URL: {}\n\n\
         Tip: Many videos have auto-generated captions in multiple languages.\n\
         Manually created captions are typically more accurate than auto-generated ones.",
        title,
        video_id,
        track_language(chosen).to_uppercase(),
        chosen.snippet.track_kind.as_deref().unwrap_or("Unknown"),
        if auto_generated { "Yes" } else { "No" },
        chosen
            .snippet
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or("(default)"),
        available.join(", "),
        chosen.id,
        video_url(&video_id),
    ))
}

pub async fn get_video_transcript(ctx: &ToolContext, args: VideoLanguageArgs) -> Result<String> {
    let video_id = require_video_id(&args.video_input)?;
    let language = ctx.language(args.language);
    let title = video_title(ctx, &video_id).await;

    let transcript = match ctx.transcripts.fetch(&video_id, &language).await {
        Ok(t) => t,
        Err(YtDataError::TranscriptsUnavailable(_)) => {
            return Ok(no_transcript_report(&title, &video_id));
        }
        Err(e) => return Err(e),
    };

    if transcript.segments.is_empty() {
        return Ok(format!(
            "No transcript content extracted for video '{}'.",
            video_id
        ));
    }

    let preview: Vec<String> = transcript
        .segments
        .iter()
        .take(PREVIEW_SEGMENTS)
        .map(|s| format!("{} {}", minute_timestamp(s.start), s.text))
        .collect();
    let remaining = transcript.segments.len().saturating_sub(PREVIEW_SEGMENTS);
    let more = if remaining > 0 {
        format!("... and {} more segments", remaining)
    } else {
        String::new()
    };

    Ok(format!(
        "YouTube Video Transcript:\n\n\
         Video: {}\n\
         Video ID: {}\n\
         Language: {}\n\
         Duration: ~{} minutes\n\
         Segments: {}\n\
         Word Count: ~{} words\n\n\
         📝 Full Transcript:\n{}\n\n\
         ⏰ Timestamped Segments (First {}):\n{}\n{}\n\n\
         Video URL: {}\n\n\
         Source: {} captions.\n\
         Note: Quality depends on YouTube's automatic or manual captions.",
        title,
        video_id,
        transcript.language_code.to_uppercase(),
        transcript.approx_minutes(),
        transcript.segments.len(),
        transcript.word_count(),
        transcript.full_text(),
        PREVIEW_SEGMENTS,
        preview.join("\n"),
        more,
        video_url(&video_id),
        if transcript.auto_generated {
            "Auto-generated"
        } else {
            "Manual"
        },
    ))
}

fn no_transcript_report(title: &str, video_id: &str) -> String {
    format!(
        "YouTube Video Transcript - No Transcripts Available:\n\n\
         Video: {}\n\
         Video ID: {}\n\n\
         ❌ No transcripts found for this video.\n\n\
         Possible reasons:\n\
         • Video owner has disabled captions\n\
         • Video is too new (captions not yet generated)\n\
         • Video is restricted in your region\n\
         • Video is private or deleted\n\n\
         Try: Use get_video_caption_info() to check caption availability.\n\n\
         Video URL: {}",
        title,
        video_id,
        video_url(video_id)
    )
}
