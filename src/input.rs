/// Touch classification: raw down/move/up events become moves, single taps
/// and double taps.
///
/// A tap cannot be called "single" until the double-tap window after its
/// release has closed, so single taps are confirmed lazily by
/// `confirm_single_click`, which the game calls once per frame.

use tracing::trace;

use crate::entities::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchAction {
    Down,
    Move,
    Up,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchEvent {
    pub action: TouchAction,
    pub x: f32,
    pub y: f32,
    /// Monotonic timestamp in milliseconds.
    pub time_ms: u64,
}

impl TouchEvent {
    pub fn new(action: TouchAction, x: f32, y: f32, time_ms: u64) -> Self {
        TouchEvent { action, x, y, time_ms }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TouchIntent {
    /// Drag the aircraft's centre to this point.
    Move(Point),
    SingleClick(Point),
    DoubleClick(Point),
}

/// A released tap waiting to find out whether a second one follows.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Candidate {
    released_at: u64,
    position: Point,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TouchDisambiguator {
    single_click_ms: u64,
    double_click_ms: u64,
    finger_down: bool,
    touch_down_time: Option<u64>,
    touch_up_time: Option<u64>,
    last_single_click: Option<Candidate>,
}

impl TouchDisambiguator {
    pub fn new(single_click_ms: u64, double_click_ms: u64) -> Self {
        TouchDisambiguator {
            single_click_ms,
            double_click_ms,
            finger_down: false,
            touch_down_time: None,
            touch_up_time: None,
            last_single_click: None,
        }
    }

    pub fn touch_down_time(&self) -> Option<u64> {
        self.touch_down_time
    }

    pub fn touch_up_time(&self) -> Option<u64> {
        self.touch_up_time
    }

    pub fn last_single_click_time(&self) -> Option<u64> {
        self.last_single_click.map(|c| c.released_at)
    }

    /// When the pending tap, if any, will be confirmed as a single click.
    pub fn pending_deadline(&self) -> Option<u64> {
        self.last_single_click
            .map(|c| c.released_at + self.double_click_ms)
    }

    fn reset(&mut self) {
        self.touch_down_time = None;
        self.touch_up_time = None;
        self.last_single_click = None;
    }

    /// Feed one raw event.  Usually yields at most one intent; a release can
    /// additionally confirm an earlier tap whose window had already closed.
    pub fn classify(&mut self, event: &TouchEvent) -> Vec<TouchIntent> {
        let mut intents = Vec::new();
        let position = event.position();

        match event.action {
            TouchAction::Down => {
                self.finger_down = true;
                self.touch_down_time = Some(event.time_ms);
            }
            TouchAction::Move => {
                // A confirmation mid-press clears the down time; the press is
                // then already older than any tap.
                let held_long_enough = self
                    .touch_down_time
                    .map(|down| event.time_ms.saturating_sub(down) > self.single_click_ms)
                    .unwrap_or(true);
                if self.finger_down && held_long_enough {
                    intents.push(TouchIntent::Move(position));
                }
            }
            TouchAction::Up => {
                self.finger_down = false;
                self.touch_up_time = Some(event.time_ms);
                let is_tap = self
                    .touch_down_time
                    .map(|down| event.time_ms.saturating_sub(down) <= self.single_click_ms)
                    .unwrap_or(false);
                if is_tap {
                    match self.last_single_click {
                        Some(prev)
                            if event.time_ms.saturating_sub(prev.released_at)
                                <= self.double_click_ms =>
                        {
                            intents.push(TouchIntent::DoubleClick(position));
                            self.reset();
                        }
                        prev => {
                            if let Some(expired) = prev {
                                intents.push(TouchIntent::SingleClick(expired.position));
                            }
                            self.last_single_click = Some(Candidate {
                                released_at: event.time_ms,
                                position,
                            });
                        }
                    }
                }
            }
        }

        for intent in &intents {
            trace!(?intent, "touch classified");
        }
        intents
    }

    /// Confirm the pending tap as a single click once the double-tap window
    /// has closed at `now`.
    pub fn confirm_single_click(&mut self, now: u64) -> Option<TouchIntent> {
        let candidate = self.last_single_click?;
        if now.saturating_sub(candidate.released_at) < self.double_click_ms {
            return None;
        }
        self.reset();
        trace!(position = ?candidate.position, "single click confirmed");
        Some(TouchIntent::SingleClick(candidate.position))
    }
}
