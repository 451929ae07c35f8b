//! Tests for the LIVE indicator.

use super::*;
use crate::source::{DemoPlatform, SourceSet, StdinSource};
use ratatui::style::{Color, Style};

// ===== Static / EOF =====

#[test]
fn static_mode_renders_gray_text() {
    let span = LiveIndicator::new(InputMode::Static, false).render();

    assert_eq!(span.content, "[LIVE] ");
    assert_eq!(span.style, Style::default().fg(Color::Gray));
}

#[test]
fn ended_stream_ignores_blink_state() {
    let span = LiveIndicator::new(InputMode::Eof, true).render();
    assert_eq!(span.style.fg, Some(Color::Gray), "EOF should stay gray");
}

// ===== Streaming =====

#[test]
fn streaming_mode_with_blink_on_renders_green_text() {
    let span = LiveIndicator::new(InputMode::Streaming, true).render();

    assert_eq!(span.content, "[LIVE] ");
    assert_eq!(span.style, Style::default().fg(Color::Green));
}

#[test]
fn streaming_mode_with_blink_off_keeps_its_width() {
    let on = LiveIndicator::new(InputMode::Streaming, true).render();
    let off = LiveIndicator::new(InputMode::Streaming, false).render();

    assert_eq!(off.content.trim(), "");
    assert_eq!(off.content.len(), on.content.len());
}

// ===== Mode transitions =====

#[test]
fn live_sources_start_streaming() {
    let demo = InputSource::Demo(DemoPlatform::new(1));
    let stdin = InputSource::Stdin(StdinSource::from_reader(std::io::empty()));

    assert_eq!(InputMode::for_source(&demo), InputMode::Streaming);
    assert_eq!(InputMode::for_source(&stdin), InputMode::Streaming);
}

#[test]
fn source_set_streams_while_any_member_is_live() {
    let mixed = InputSource::Sources(SourceSet::new(vec![
        InputSource::Sources(SourceSet::new(Vec::new())),
        InputSource::Demo(DemoPlatform::new(1)),
    ]));
    let empty = InputSource::Sources(SourceSet::new(Vec::new()));

    assert_eq!(InputMode::for_source(&mixed), InputMode::Streaming);
    assert_eq!(InputMode::for_source(&empty), InputMode::Static);
}

#[test]
fn streaming_ends_when_source_stops_being_live() {
    assert_eq!(InputMode::Streaming.after_poll(true), InputMode::Streaming);
    assert_eq!(InputMode::Streaming.after_poll(false), InputMode::Eof);
    assert_eq!(InputMode::Static.after_poll(false), InputMode::Static);
    assert_eq!(InputMode::Eof.after_poll(true), InputMode::Eof);
}
