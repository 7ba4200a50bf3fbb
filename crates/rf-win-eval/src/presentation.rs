//! Consumer-owned cue sequencing
//!
//! The engine only describes cues. A presentation layer that needs to play
//! them in order owns a [`CueQueue`] per session (or per client) and drains
//! it itself; there is no process-wide "now playing" state.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::spin::SpinResult;
use crate::win_tiers::{AudioCue, WinTierKind};

/// A cue tagged with the spin tier that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedCue {
    pub tier: WinTierKind,
    pub cue: AudioCue,
    /// Suggested animation speed for the same tier
    pub animation_speed: f64,
}

/// FIFO of cues awaiting playback
#[derive(Debug, Clone, Default)]
pub struct CueQueue {
    pending: VecDeque<QueuedCue>,
    /// Upper bound on queued cues; oldest are dropped past it
    capacity: Option<usize>,
}

impl CueQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue that keeps at most `capacity` cues
    pub fn bounded(capacity: usize) -> Self {
        Self {
            pending: VecDeque::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    /// Queue the cue for a spin's tier
    pub fn push_spin(&mut self, result: &SpinResult) {
        let presentation = &result.classification.presentation;
        self.push(QueuedCue {
            tier: result.win_tier,
            cue: presentation.audio_cue.clone(),
            animation_speed: presentation.animation_speed,
        });
    }

    pub fn push(&mut self, cue: QueuedCue) {
        if let Some(capacity) = self.capacity {
            if capacity == 0 {
                return;
            }
            while self.pending.len() >= capacity {
                self.pending.pop_front();
            }
        }
        self.pending.push_back(cue);
    }

    /// Next cue to play
    pub fn pop(&mut self) -> Option<QueuedCue> {
        self.pending.pop_front()
    }

    pub fn peek(&self) -> Option<&QueuedCue> {
        self.pending.front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop everything, e.g. when the player skips presentation
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Total playback time of everything queued
    pub fn queued_duration_ms(&self) -> u64 {
        self.pending.iter().map(|q| q.cue.duration_ms() as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cue(tier: WinTierKind, segment: &str) -> QueuedCue {
        QueuedCue {
            tier,
            cue: AudioCue::new(segment, 0, 1000),
            animation_speed: 1.0,
        }
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = CueQueue::new();
        queue.push(cue(WinTierKind::Small, "a"));
        queue.push(cue(WinTierKind::Mega, "b"));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.queued_duration_ms(), 2000);
        assert_eq!(queue.peek().unwrap().cue.segment_id, "a");
        assert_eq!(queue.pop().unwrap().cue.segment_id, "a");
        assert_eq!(queue.pop().unwrap().cue.segment_id, "b");
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_bounded_drops_oldest() {
        let mut queue = CueQueue::bounded(2);
        queue.push(cue(WinTierKind::Small, "a"));
        queue.push(cue(WinTierKind::Small, "b"));
        queue.push(cue(WinTierKind::Small, "c"));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop().unwrap().cue.segment_id, "b");
    }

    #[test]
    fn test_queues_are_independent() {
        let mut first = CueQueue::new();
        let second = CueQueue::new();
        first.push(cue(WinTierKind::Wild, "wild_expand"));
        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
        first.clear();
        assert!(first.is_empty());
    }
}
