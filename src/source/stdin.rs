//! Stdin-based record source for piped input.
//!
//! A background thread reads lines and sends them over a channel, so the TUI
//! event loop can poll without blocking. Works for both streaming input
//! (`tail -f comments.jsonl | lcv`) and complete input (`cat ... | lcv`).

use crate::model::error::InputError;
use std::io::{BufRead, BufReader, IsTerminal, Read};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use tracing::debug;

enum ReaderEvent {
    Line(String),
    Failed(std::io::Error),
}

/// Live line source backed by a reader thread.
#[derive(Debug)]
pub struct StdinSource {
    receiver: Receiver<ReaderEvent>,
    delivered: usize,
    complete: bool,
    failure: Option<std::io::Error>,
}

impl StdinSource {
    /// Start reading from the process's stdin.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NoInput` if stdin is an interactive terminal,
    /// so the viewer does not sit waiting for input nobody will type.
    pub fn new() -> Result<Self, InputError> {
        if std::io::stdin().is_terminal() {
            return Err(InputError::NoInput);
        }
        Ok(Self::from_reader(std::io::stdin()))
    }

    /// Start reading from any reader.
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        let (sender, receiver) = mpsc::channel();

        thread::spawn(move || {
            for line in BufReader::new(reader).lines() {
                let event = match line {
                    Ok(line) => ReaderEvent::Line(line),
                    Err(err) => ReaderEvent::Failed(err),
                };
                let failed = matches!(event, ReaderEvent::Failed(_));
                if sender.send(event).is_err() || failed {
                    return;
                }
            }
            debug!("input reader reached EOF");
        });

        Self {
            receiver,
            delivered: 0,
            complete: false,
            failure: None,
        }
    }

    /// Take every line read since the last call. Never blocks.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` once if the reader thread hit an I/O error;
    /// the source is complete afterwards. Lines read before the error are
    /// returned first and the error comes from the next call.
    pub fn poll_lines(&mut self) -> Result<Vec<String>, InputError> {
        if let Some(err) = self.failure.take() {
            return Err(InputError::Io(err));
        }

        let mut lines = Vec::new();
        while !self.complete {
            match self.receiver.try_recv() {
                Ok(ReaderEvent::Line(line)) => lines.push(line),
                Ok(ReaderEvent::Failed(err)) => {
                    self.complete = true;
                    if lines.is_empty() {
                        return Err(InputError::Io(err));
                    }
                    self.failure = Some(err);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => self.complete = true,
            }
        }
        self.delivered += lines.len();
        Ok(lines)
    }

    /// Number of lines handed out so far.
    pub fn lines_delivered(&self) -> usize {
        self.delivered
    }

    /// Check if EOF has been reached and every line and error was handed out.
    pub fn is_complete(&self) -> bool {
        self.complete && self.failure.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::time::{Duration, Instant};

    /// Poll until the reader thread finishes, collecting every line.
    fn poll_to_end(source: &mut StdinSource) -> Vec<String> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut lines = Vec::new();
        while !source.is_complete() && Instant::now() < deadline {
            lines.extend(source.poll_lines().unwrap());
            thread::sleep(Duration::from_millis(5));
        }
        lines
    }

    #[test]
    fn delivers_lines_in_order_without_newlines() {
        let mut source = StdinSource::from_reader(Cursor::new(b"line1\nline2\nline3\n".to_vec()));

        assert_eq!(poll_to_end(&mut source), vec!["line1", "line2", "line3"]);
        assert!(source.is_complete());
        assert_eq!(source.lines_delivered(), 3);
    }

    #[test]
    fn final_line_without_newline_is_delivered_at_eof() {
        let mut source = StdinSource::from_reader(Cursor::new(b"{\"a\":1}\n{\"b\":2}".to_vec()));

        assert_eq!(poll_to_end(&mut source), vec!["{\"a\":1}", "{\"b\":2}"]);
    }

    #[test]
    fn empty_input_completes_without_lines() {
        let mut source = StdinSource::from_reader(Cursor::new(Vec::new()));

        assert!(poll_to_end(&mut source).is_empty());
        assert!(source.is_complete());
    }

    #[test]
    fn poll_after_completion_returns_nothing() {
        let mut source = StdinSource::from_reader(Cursor::new(b"x\n".to_vec()));
        poll_to_end(&mut source);

        assert!(source.poll_lines().unwrap().is_empty());
    }

    #[test]
    fn read_error_is_reported_once() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"))
            }
        }

        let mut source = StdinSource::from_reader(Broken);
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut result = source.poll_lines();
        while matches!(result, Ok(ref lines) if lines.is_empty()) && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
            result = source.poll_lines();
        }

        assert!(matches!(result, Err(InputError::Io(_))));
        assert!(source.is_complete());
        assert!(source.poll_lines().unwrap().is_empty());
    }

    #[test]
    fn lines_read_before_an_error_are_delivered_first() {
        /// Yields `data` on the first read and fails on every read after.
        struct FailAfter(Option<Vec<u8>>);
        impl Read for FailAfter {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                match self.0.take() {
                    Some(data) => {
                        buf[..data.len()].copy_from_slice(&data);
                        Ok(data.len())
                    }
                    None => Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone")),
                }
            }
        }

        let mut source = StdinSource::from_reader(FailAfter(Some(b"one\ntwo\n".to_vec())));
        // Both lines and the failure are queued before the first poll.
        thread::sleep(Duration::from_millis(50));

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut lines = Vec::new();
        let mut result = source.poll_lines();
        while let Ok(batch) = result {
            lines.extend(batch);
            if Instant::now() > deadline {
                panic!("reader error never reported");
            }
            thread::sleep(Duration::from_millis(5));
            result = source.poll_lines();
        }

        assert_eq!(lines, vec!["one", "two"]);
        assert!(matches!(result, Err(InputError::Io(_))));
        assert!(source.is_complete());
        assert_eq!(source.lines_delivered(), 2);
    }
}
