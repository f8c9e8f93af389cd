//! Scripted input for headless runs and tests

use std::collections::BTreeMap;
use std::ops::Range;

use super::{InputEvent, InputSource, Key};

/// Replays a frame-indexed script of events and held-key spans.
///
/// Each `poll_events` call advances one frame; `is_key_held` answers for the
/// frame most recently polled.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    events: BTreeMap<u64, Vec<InputEvent>>,
    holds: Vec<(Key, Range<u64>)>,
    next_frame: u64,
    current_frame: u64,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `event` for delivery on `frame`
    pub fn at(mut self, frame: u64, event: InputEvent) -> Self {
        self.events.entry(frame).or_default().push(event);
        self
    }

    /// Hold `key` down for every frame in `frames`
    pub fn hold(mut self, key: Key, frames: Range<u64>) -> Self {
        self.holds.push((key, frames));
        self
    }

    /// Whether any scripted events remain undelivered
    pub fn is_exhausted(&self) -> bool {
        self.events.range(self.next_frame..).next().is_none()
            && self.holds.iter().all(|(_, r)| r.end <= self.next_frame)
    }
}

impl InputSource for ScriptedInput {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.current_frame = self.next_frame;
        self.next_frame += 1;
        self.events.remove(&self.current_frame).unwrap_or_default()
    }

    fn is_key_held(&self, key: Key) -> bool {
        self.holds
            .iter()
            .any(|(k, frames)| *k == key && frames.contains(&self.current_frame))
    }
}
