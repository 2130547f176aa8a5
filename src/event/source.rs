//! Where the run loop gets its input from.

use std::collections::VecDeque;
use std::time::Duration;

use crossterm::event as ct;
use tokio::sync::mpsc;

use super::input::{from_crossterm, InputEvent};

/// A non-blocking supply of input events, drained once per frame.
pub trait EventSource {
    /// Every event that is ready now. Never blocks.
    fn drain(&mut self) -> std::io::Result<Vec<InputEvent>>;
}

/// Events read from the terminal through crossterm.
#[derive(Debug, Default)]
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn drain(&mut self) -> std::io::Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while ct::poll(Duration::ZERO)? {
            events.extend(from_crossterm(ct::read()?));
        }
        Ok(events)
    }
}

/// Events pushed from elsewhere, e.g. another task, through a channel.
#[derive(Debug)]
pub struct ChannelEvents {
    rx: mpsc::UnboundedReceiver<InputEvent>,
}

impl ChannelEvents {
    /// A source plus the sender that feeds it.
    pub fn new() -> (mpsc::UnboundedSender<InputEvent>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { rx })
    }
}

impl EventSource for ChannelEvents {
    fn drain(&mut self) -> std::io::Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        Ok(events)
    }
}

/// A fixed script: each drain hands out the next batch.
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    frames: VecDeque<Vec<InputEvent>>,
}

impl ScriptedEvents {
    pub fn new(frames: impl IntoIterator<Item = Vec<InputEvent>>) -> Self {
        Self { frames: frames.into_iter().collect() }
    }

    pub fn is_finished(&self) -> bool {
        self.frames.is_empty()
    }
}

impl EventSource for ScriptedEvents {
    fn drain(&mut self) -> std::io::Result<Vec<InputEvent>> {
        Ok(self.frames.pop_front().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::input::{KeyCode, KeyEvent};

    fn key(ch: char) -> InputEvent {
        InputEvent::Key(KeyEvent::plain(KeyCode::Char(ch)))
    }

    #[test]
    fn scripted_events_come_out_one_batch_per_drain() {
        let mut source = ScriptedEvents::new([vec![key('a'), key('b')], vec![], vec![key('c')]]);
        assert_eq!(source.drain().map(|e| e.len()).ok(), Some(2));
        assert_eq!(source.drain().map(|e| e.len()).ok(), Some(0));
        assert_eq!(source.drain().ok(), Some(vec![key('c')]));
        assert!(source.is_finished());
        assert_eq!(source.drain().ok(), Some(vec![]));
    }

    #[test]
    fn channel_drains_everything_sent_so_far() {
        let (tx, mut source) = ChannelEvents::new();
        for ch in ['x', 'y'] {
            assert!(tx.send(key(ch)).is_ok());
        }
        assert_eq!(source.drain().ok(), Some(vec![key('x'), key('y')]));
        assert_eq!(source.drain().ok(), Some(vec![]));
    }
}
