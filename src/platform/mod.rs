//! Platform abstraction layer
//!
//! The host owns the window and the event loop; these types turn its raw
//! events into what the simulation consumes:
//! - Held-key state latched between key events
//! - Frame deltas from a monotonic timestamp

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
}

impl Key {
    pub const ALL: [Key; 5] = [Key::Left, Key::Right, Key::Up, Key::Down, Key::Space];

    /// Map a DOM `keyCode` to a game key
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            32 => Some(Key::Space),
            37 => Some(Key::Left),
            38 => Some(Key::Up),
            39 => Some(Key::Right),
            40 => Some(Key::Down),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Key::Left => 0,
            Key::Right => 1,
            Key::Up => 2,
            Key::Down => 3,
            Key::Space => 4,
        }
    }
}

/// Latched key state; a key stays down until its release event arrives
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: [bool; 5],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: Key, down: bool) {
        self.held[key.index()] = down;
    }

    /// Feed a raw key event; returns false for keys the game ignores
    pub fn handle_code(&mut self, code: u32, down: bool) -> bool {
        match Key::from_code(code) {
            Some(key) => {
                self.set(key, down);
                true
            }
            None => false,
        }
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    /// Release everything (e.g. on focus loss)
    pub fn release_all(&mut self) {
        self.held = [false; 5];
    }
}

/// Derives frame deltas from a monotonically increasing timestamp
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call; the first call yields 0
    pub fn tick_secs(&mut self, now: f64) -> f64 {
        let dt = match self.last {
            Some(last) => (now - last).max(0.0),
            None => 0.0,
        };
        self.last = Some(now);
        dt
    }

    /// Same as [`tick_secs`](Self::tick_secs) for a millisecond timestamp
    pub fn tick_millis(&mut self, now_ms: f64) -> f64 {
        self.tick_secs(now_ms / 1000.0)
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
