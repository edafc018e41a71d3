//! Comment retrieval with optional deep reply fetching.
//!
//! A comment thread carries at most five replies. For threads with more,
//! the full reply list costs one extra request per thread, so deep fetching
//! is capped by `max_deep_replies_count`.

use super::{require_video_id, CommentsArgs, ToolContext};
use crate::error::{Result, YtDataError};
use crate::youtube::format::{capitalize, short_date, thousands};
use crate::youtube::models::{CommentThread, CommentThreadReplies};
use crate::youtube::{CommentOrder, MAX_COMMENT_PAGE_SIZE};
use tracing::{debug, warn};

/// A thread plus whether its full reply list was fetched.
struct FetchedThread {
    thread: CommentThread,
    complete: bool,
}

pub async fn get_video_comments(ctx: &ToolContext, args: CommentsArgs) -> Result<String> {
    if args.max_top_level_comments <= 0 {
        return Err(YtDataError::InvalidInput(format!(
            "`max_top_level_comments` must be a positive integer, but received {}.",
            args.max_top_level_comments
        )));
    }
    if args.max_deep_replies_count < 0 {
        return Err(YtDataError::InvalidInput(format!(
            "`max_deep_replies_count` must be a non-negative integer, but received {}.",
            args.max_deep_replies_count
        )));
    }

    let video_id = require_video_id(&args.video_input)?;
    let order = CommentOrder::parse_lenient(&args.order);

    match fetch_and_render(
        ctx,
        &video_id,
        order,
        args.max_top_level_comments as usize,
        args.max_deep_replies_count as usize,
    )
    .await
    {
        Err(e) if e.is_comments_disabled() => {
            Ok(format!("Comments are disabled for video '{}'.", video_id))
        }
        other => other,
    }
}

async fn fetch_and_render(
    ctx: &ToolContext,
    video_id: &str,
    order: CommentOrder,
    max_top_level: usize,
    max_deep: usize,
) -> Result<String> {
    // Title and comment count are context only.
    let (title, total_comments) = match ctx.client.video(video_id, "snippet,statistics").await {
        Ok(Some(video)) => (
            video.title().to_string(),
            video.statistics.as_ref().and_then(|s| s.comment_count),
        ),
        Ok(None) => ("Unknown Video".to_string(), None),
        Err(e) => {
            warn!(error = %e, "Could not fetch video context for comments");
            ("Unknown Video".to_string(), None)
        }
    };

    let mut threads: Vec<FetchedThread> = Vec::new();
    let mut page_token: Option<String> = None;

    while threads.len() < max_top_level {
        let batch = (max_top_level - threads.len()).min(MAX_COMMENT_PAGE_SIZE as usize) as u32;
        let page = ctx
            .client
            .comment_threads(video_id, order, batch, page_token.as_deref())
            .await?;

        if page.items.is_empty() {
            break;
        }
        threads.extend(page.items.into_iter().map(|thread| FetchedThread {
            thread,
            complete: false,
        }));
        page_token = page.next_page_token;
        if page_token.is_none() {
            break;
        }
    }

    let mut deep_fetches = 0;
    for fetched in threads.iter_mut() {
        if deep_fetches >= max_deep {
            break;
        }
        let thread = &mut fetched.thread;
        if thread.snippet.total_reply_count > thread.reply_list().len() as u64 {
            let parent_id = thread.snippet.top_level_comment.id.clone();
            debug!(parent_id = %parent_id, "Fetching full reply list");
            let replies = ctx.client.all_replies(&parent_id).await?;
            thread.replies = Some(CommentThreadReplies { comments: replies });
            fetched.complete = true;
            deep_fetches += 1;
        }
    }

    if threads.is_empty() {
        return Ok(format!(
            "No comments found for video '{}'. Comments may be disabled.",
            video_id
        ));
    }

    let mut output = format!(
        "YouTube Video Comments:\n\n\
         Video: {}\n\
         Video ID: {}\n\
         Sort Order: {}\n\
         Showing: {} top-level comments (of approx. {} total)\n\
         Deep Replies Fetched: {} comment threads\n\n\
         Comments:\n",
        title,
        video_id,
        capitalize(order.as_str()),
        threads.len(),
        total_comments
            .map(thousands)
            .unwrap_or_else(|| "Unknown".to_string()),
        deep_fetches,
    );

    for (i, fetched) in threads.iter().enumerate() {
        let thread = &fetched.thread;
        let top = &thread.snippet.top_level_comment.snippet;
        let likes = top.like_count.unwrap_or(0);
        let like_display = if likes > 0 {
            format!("{} likes", thousands(likes))
        } else {
            "No likes".to_string()
        };

        output.push_str(&format!(
            "\n{}. {} ({})\n   Likes: {}\n   Comment: {}\n",
            i + 1,
            top.author_display_name.as_deref().unwrap_or("Unknown"),
            short_date(top.published_at),
            like_display,
            top.text_display.as_deref().unwrap_or("No text"),
        ));

        if thread.snippet.total_reply_count > 0 {
            let replies = thread.reply_list();
            let status = if fetched.complete {
                "(all fetched)".to_string()
            } else {
                format!("(showing {})", replies.len())
            };
            output.push_str(&format!(
                "   Replies: {} {}\n",
                thread.snippet.total_reply_count, status
            ));

            for reply in replies {
                output.push_str(&format!(
                    "     - {} | {} likes\n       {}\n",
                    reply.snippet.author_display_name.as_deref().unwrap_or("Unknown"),
                    thousands(reply.snippet.like_count.unwrap_or(0)),
                    reply.snippet.text_display.as_deref().unwrap_or("No text"),
                ));
            }
        }
    }

    if page_token.is_some() && threads.len() == max_top_level {
        output.push_str(
            "\n... and more top-level comments available. Increase `max_top_level_comments` to fetch more.",
        );
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::super::testing::mock_context;
    use super::*;
    use crate::test_support::{MockRequest, MockResponse};
    use serde_json::{json, Value};

    fn thread(id: &str, total_replies: u64, inline: &[&str]) -> Value {
        let replies: Vec<Value> = inline
            .iter()
            .map(|r| json!({"id": r, "snippet": {"authorDisplayName": "Replier", "textDisplay": r, "likeCount": 1}}))
            .collect();
        json!({
            "id": id,
            "snippet": {
                "videoId": "dQw4w9WgXcQ",
                "totalReplyCount": total_replies,
                "topLevelComment": {
                    "id": id,
                    "snippet": {"authorDisplayName": format!("Author {}", id), "textDisplay": format!("Comment {}", id), "likeCount": 3, "publishedAt": "2024-01-02T03:04:05Z"}
                }
            },
            "replies": {"comments": replies}
        })
    }

    fn responder(req: &MockRequest) -> MockResponse {
        match req.endpoint() {
            "videos" => MockResponse::json(json!({"items": [{
                "id": "dQw4w9WgXcQ",
                "snippet": {"title": "Demo"},
                "statistics": {"commentCount": "1234"}
            }]})),
            "commentThreads" => match req.param("pageToken") {
                None => MockResponse::json(json!({
                    "items": [thread("t1", 7, &["r1", "r2"]), thread("t2", 0, &[])],
                    "nextPageToken": "page2"
                })),
                Some(_) => MockResponse::json(json!({
                    "items": [thread("t3", 9, &["x1"])],
                    "nextPageToken": "page3"
                })),
            },
            "comments" => MockResponse::json(json!({"items": (1..=7)
                .map(|n| json!({"id": format!("full{}", n), "snippet": {"authorDisplayName": "Deep", "textDisplay": format!("reply {}", n)}}))
                .collect::<Vec<_>>()})),
            _ => MockResponse::status(404, json!({})),
        }
    }

    fn args(max_top: i64, deep: i64) -> CommentsArgs {
        CommentsArgs {
            video_input: "dQw4w9WgXcQ".to_string(),
            max_top_level_comments: max_top,
            order: "time".to_string(),
            max_deep_replies_count: deep,
        }
    }

    #[tokio::test]
    async fn test_pages_until_limit_and_fetches_deep_replies() {
        let (mock, ctx) = mock_context(responder).await;
        let text = get_video_comments(&ctx, args(3, 1)).await.unwrap();

        let pages = mock.requests_to("commentThreads");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].param("maxResults"), Some("3"));
        assert_eq!(pages[0].param("order"), Some("time"));
        assert_eq!(pages[1].param("maxResults"), Some("1"));
        assert_eq!(pages[1].param("pageToken"), Some("page2"));

        // Only one deep fetch allowed: t1 gets it, t3 does not.
        let deep = mock.requests_to("comments");
        assert_eq!(deep.len(), 1);
        assert_eq!(deep[0].param("parentId"), Some("t1"));

        assert!(text.contains("Sort Order: Time\nShowing: 3 top-level comments (of approx. 1,234 total)"));
        assert!(text.contains("Deep Replies Fetched: 1 comment threads"));
        assert!(text.contains("1. Author t1 (2024-01-02)\n   Likes: 3 likes\n   Comment: Comment t1\n   Replies: 7 (all fetched)"));
        assert!(text.contains("       reply 7\n"));
        assert!(!text.contains("Replies: 0"));
        assert!(text.contains("Replies: 9 (showing 1)"));
        assert!(text.ends_with("Increase `max_top_level_comments` to fetch more."));
    }

    #[tokio::test]
    async fn test_deep_fetch_disabled() {
        let (mock, ctx) = mock_context(responder).await;
        let text = get_video_comments(&ctx, args(2, 0)).await.unwrap();
        assert!(mock.requests_to("comments").is_empty());
        assert!(text.contains("Replies: 7 (showing 2)"));
        assert!(text.contains("     - Replier | 1 likes\n       r1\n"));
    }

    #[tokio::test]
    async fn test_argument_validation() {
        let (mock, ctx) = mock_context(responder).await;
        let err = get_video_comments(&ctx, args(0, 1)).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input: `max_top_level_comments` must be a positive integer, but received 0."
        );
        let err = get_video_comments(&ctx, args(5, -1)).await.unwrap_err();
        assert!(err.to_string().contains("non-negative"));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_comments_disabled() {
        let (_mock, ctx) = mock_context(|req| match req.endpoint() {
            "commentThreads" => MockResponse::status(
                403,
                json!({"error": {"code": 403, "message": "disabled", "errors": [{"reason": "commentsDisabled"}]}}),
            ),
            _ => MockResponse::json(json!({"items": []})),
        })
        .await;

        let text = get_video_comments(&ctx, args(10, 0)).await.unwrap();
        assert_eq!(text, "Comments are disabled for video 'dQw4w9WgXcQ'.");
    }

    #[tokio::test]
    async fn test_no_comments() {
        let (_mock, ctx) = mock_context(|_| MockResponse::json(json!({"items": []}))).await;
        let text = get_video_comments(&ctx, args(10, 0)).await.unwrap();
        assert_eq!(
            text,
            "No comments found for video 'dQw4w9WgXcQ'. Comments may be disabled."
        );
    }
}
