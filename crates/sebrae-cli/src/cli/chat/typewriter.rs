//! Typed-reveal renderer for assistant replies.
//!
//! The full reply text is already known when rendering starts; the
//! typewriter only animates its presentation. Lines are revealed
//! outer-to-inner: completed lines stay verbatim while the current line
//! grows one character per tick. After every tick the *entire* visible
//! prefix is re-rendered through the markdown-lite formatter and handed
//! to the sink wholesale -- a lone `*` in a half-revealed line must stay
//! literal until its closing marker appears, and re-rendering the whole
//! prefix sidesteps partial-token ambiguity entirely.
//!
//! Pacing: one fixed delay per character, doubled at each line boundary.
//! Cancellation skips the rest of the animation and renders the full
//! content immediately; the commit still happens exactly once, so an
//! interrupted reveal never loses the reply.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use sebrae_types::chat::{Role, TranscriptEntry};

use super::markdown;

/// Where revealed content goes.
///
/// Decouples the reveal algorithm from the terminal so it can be tested
/// against a recording sink.
pub trait TranscriptSink {
    /// Replace the whole displayed content of the in-progress message.
    fn replace_visible(&mut self, formatted: &str);

    /// Keep the newest content in view.
    fn scroll_to_end(&mut self);

    /// Commit the finished message to the transcript. Called exactly once
    /// per reveal, with the raw (unformatted) content.
    fn commit(&mut self, entry: TranscriptEntry);
}

/// Character-by-character reveal engine.
pub struct Typewriter {
    char_delay: Duration,
    cancel: CancellationToken,
}

impl Typewriter {
    /// Delay between revealed characters in the chat loop.
    pub const DEFAULT_CHAR_DELAY: Duration = Duration::from_millis(15);

    pub fn new(char_delay: Duration) -> Self {
        Self {
            char_delay,
            cancel: CancellationToken::new(),
        }
    }

    /// Attach a cancellation token; cancelling finishes the reveal
    /// instantly instead of aborting it.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Wait one pacing unit, or return `true` when cancelled.
    async fn pause(&self, delay: Duration) -> bool {
        tokio::select! {
            _ = self.cancel.cancelled() => true,
            _ = tokio::time::sleep(delay) => false,
        }
    }

    /// Reveal `content` through `sink`, then commit it.
    pub async fn reveal<S: TranscriptSink>(&self, role: Role, content: &str, sink: &mut S) {
        let lines: Vec<&str> = content.split('\n').collect();
        let mut completed = String::new();

        if !self.cancel.is_cancelled() {
            'lines: for (i, line) in lines.iter().enumerate() {
                let mut current = String::new();
                for ch in line.chars() {
                    current.push(ch);
                    sink.replace_visible(&markdown::render(&format!("{completed}{current}")));
                    sink.scroll_to_end();
                    if self.pause(self.char_delay).await {
                        break 'lines;
                    }
                }

                completed.push_str(line);
                if i < lines.len() - 1 {
                    completed.push('\n');
                    if self.pause(self.char_delay * 2).await {
                        break 'lines;
                    }
                }
            }
        }

        // Final wholesale render: covers cancellation, empty content, and
        // trailing empty lines that produce no character ticks.
        sink.replace_visible(&markdown::render(content));
        sink.scroll_to_end();
        sink.commit(TranscriptEntry::now(role, content));
    }
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CHAR_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        replaces: Vec<String>,
        scrolls: usize,
        committed: Vec<TranscriptEntry>,
    }

    impl TranscriptSink for RecordingSink {
        fn replace_visible(&mut self, formatted: &str) {
            self.replaces.push(formatted.to_string());
        }

        fn scroll_to_end(&mut self) {
            self.scrolls += 1;
        }

        fn commit(&mut self, entry: TranscriptEntry) {
            self.committed.push(entry);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn commits_exactly_once_with_original_content() {
        let content = "Hello **world**\nSecond line";
        let mut sink = RecordingSink::default();
        Typewriter::new(Duration::from_millis(15))
            .reveal(Role::Assistant, content, &mut sink)
            .await;

        assert_eq!(sink.committed.len(), 1);
        assert_eq!(sink.committed[0].role, Role::Assistant);
        // History keeps the raw form, not the formatted one.
        assert_eq!(sink.committed[0].content, content);
    }

    #[tokio::test(start_paused = true)]
    async fn tick_count_and_pacing_match_content_shape() {
        // 4 characters over 2 lines: 4 char delays plus 1 doubled boundary.
        let content = "ab\ncd";
        let mut sink = RecordingSink::default();
        let start = tokio::time::Instant::now();
        Typewriter::new(Duration::from_millis(15))
            .reveal(Role::Assistant, content, &mut sink)
            .await;

        // One replace per character plus the final wholesale render.
        assert_eq!(sink.replaces.len(), 5);
        assert_eq!(sink.scrolls, 5);
        assert_eq!(
            start.elapsed(),
            Duration::from_millis(4 * 15 + 30),
        );
    }

    #[tokio::test(start_paused = true)]
    async fn partial_bold_markers_stay_literal_until_closed() {
        let content = "Hello **world**";
        let mut sink = RecordingSink::default();
        Typewriter::new(Duration::from_millis(15))
            .reveal(Role::Assistant, content, &mut sink)
            .await;

        // One character before the closing pair completes: no bold yet.
        assert!(!sink.replaces[13].contains("\x1b[1m"));
        // Closing pair visible: formatted.
        assert_eq!(sink.replaces[14], markdown::render(content));
        assert!(sink.replaces[14].contains("\x1b[1m"));
    }

    #[tokio::test(start_paused = true)]
    async fn completed_lines_stay_visible_under_the_current_line() {
        let content = "um\ndois";
        let mut sink = RecordingSink::default();
        Typewriter::new(Duration::from_millis(15))
            .reveal(Role::Assistant, content, &mut sink)
            .await;

        // First character of the second line: first line fully present.
        assert_eq!(sink.replaces[2], "um\nd");
        assert_eq!(sink.replaces.last().unwrap(), "um\ndois");
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_finishes_instantly_and_still_commits_once() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let content = "linha longa o suficiente\npara levar tempo";
        let mut sink = RecordingSink::default();
        let start = tokio::time::Instant::now();
        Typewriter::new(Duration::from_millis(15))
            .with_cancellation(cancel)
            .reveal(Role::Assistant, content, &mut sink)
            .await;

        assert_eq!(start.elapsed(), Duration::ZERO);
        // Only the final wholesale render.
        assert_eq!(sink.replaces.len(), 1);
        assert_eq!(sink.replaces[0], markdown::render(content));
        assert_eq!(sink.committed.len(), 1);
        assert_eq!(sink.committed[0].content, content);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_content_still_renders_and_commits() {
        let mut sink = RecordingSink::default();
        Typewriter::new(Duration::from_millis(15))
            .reveal(Role::Assistant, "", &mut sink)
            .await;

        assert_eq!(sink.replaces, vec![String::new()]);
        assert_eq!(sink.committed.len(), 1);
    }
}
