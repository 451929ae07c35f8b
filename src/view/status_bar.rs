//! Single-line status bar below the comment list.

use super::live_indicator::{InputMode, LiveIndicator};
use super::styles::RowStyles;
use crate::source::SourceState;
use ratatui::text::{Line, Span};

/// Key hints shown at the end of the status bar.
const KEY_HINTS: &str = "  j/k scroll  g/G top/bottom  f follow  q quit";

/// What the status bar shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    /// Streaming state of the input as a whole.
    pub mode: InputMode,
    /// Blink phase of the LIVE indicator.
    pub blink_on: bool,
    /// Stick-to-latest mode of the layout.
    pub following: bool,
    /// Comments received.
    pub comments: usize,
    /// Users known.
    pub users: usize,
    /// Every source feeding the viewer, in poll order.
    pub sources: Vec<SourceState>,
}

/// Render the status bar line.
///
/// With more than one source, each source's name follows the badge, styled
/// by whether that source is still live.
pub fn status_line(info: &StatusInfo, styles: &RowStyles) -> Line<'static> {
    let badge = if info.following {
        Span::styled("FOLLOW", styles.following)
    } else {
        Span::styled("PAUSED", styles.paused)
    };
    let mut spans = vec![LiveIndicator::new(info.mode, info.blink_on).render(), badge];

    if info.sources.len() > 1 {
        for source in &info.sources {
            let style = if source.live {
                styles.source_live
            } else {
                styles.source_ended
            };
            spans.push(Span::raw(" "));
            spans.push(Span::styled(source.name.clone(), style));
        }
    }

    spans.push(Span::raw(format!(
        "  {} comments  {} users",
        info.comments, info.users
    )));
    spans.push(Span::raw(KEY_HINTS));
    Line::from(spans).style(styles.status)
}
