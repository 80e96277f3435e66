// Playback cursor over a finished step log

use crate::snapshot::Step;

/// Read-only position within one operation's steps
///
/// `position` is `None` before `start`, which renders as "not started".
/// Moving backward shows a snapshot that was already captured; nothing is
/// ever re-executed.
#[derive(Debug, Clone, Default)]
pub struct PlaybackCursor {
    steps: Vec<Step>,
    position: Option<usize>,
}

impl PlaybackCursor {
    pub fn new(steps: Vec<Step>) -> Self {
        PlaybackCursor {
            steps,
            position: None,
        }
    }

    /// Jump to the first step. Returns false when there is nothing to show.
    pub fn start(&mut self) -> bool {
        if self.steps.is_empty() {
            return false;
        }
        self.position = Some(0);
        true
    }

    pub fn next_step(&mut self) -> bool {
        match self.position {
            None => self.start(),
            Some(p) if p + 1 < self.steps.len() => {
                self.position = Some(p + 1);
                true
            }
            Some(_) => false,
        }
    }

    pub fn prev_step(&mut self) -> bool {
        match self.position {
            Some(p) if p > 0 => {
                self.position = Some(p - 1);
                true
            }
            _ => false,
        }
    }

    /// Jump to the last step
    pub fn seek_end(&mut self) -> bool {
        match self.steps.len() {
            0 => false,
            n => {
                self.position = Some(n - 1);
                true
            }
        }
    }

    /// Back to "not started"
    pub fn reset(&mut self) {
        self.position = None;
    }

    pub fn has_next(&self) -> bool {
        match self.position {
            None => !self.steps.is_empty(),
            Some(p) => p + 1 < self.steps.len(),
        }
    }

    pub fn has_prev(&self) -> bool {
        self.position.is_some_and(|p| p > 0)
    }

    pub fn current(&self) -> Option<&Step> {
        self.position.and_then(|p| self.steps.get(p))
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn is_at_end(&self) -> bool {
        !self.steps.is_empty() && self.position == Some(self.steps.len() - 1)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
