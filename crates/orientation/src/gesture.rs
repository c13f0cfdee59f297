/// Raw level must stay unchanged this long before it is accepted.
pub const DEBOUNCE_MS: u64 = 50;
/// Minimum hold for a long press.
pub const LONG_PRESS_MS: u64 = 1000;

/// Undebounced access to the button pin.
pub trait RawButton {
    /// `true` while the button is physically pressed.
    fn is_pressed(&mut self) -> bool;
}

/// Debounced button state, refreshed by the owner once per loop iteration.
pub trait GestureInput {
    /// Debounced level.
    fn is_pressed(&self) -> bool;
    /// `true` if the last update turned the debounced level from released to
    /// pressed.
    fn fell(&self) -> bool;
}

/// Fixed-interval debouncer over a [`RawButton`].
#[derive(Debug)]
pub struct DebouncedButton<B> {
    button: B,
    stable: bool,
    candidate: bool,
    candidate_since: u64,
    fell: bool,
}

impl<B: RawButton> DebouncedButton<B> {
    pub fn new(button: B) -> Self {
        Self {
            button,
            stable: false,
            candidate: false,
            candidate_since: 0,
            fell: false,
        }
    }

    /// Sample the pin at `now_ms` and return the debounced level.
    pub fn update(&mut self, now_ms: u64) -> bool {
        let raw = self.button.is_pressed();
        self.fell = false;

        if raw != self.candidate {
            self.candidate = raw;
            self.candidate_since = now_ms;
        }

        if self.candidate != self.stable
            && now_ms.saturating_sub(self.candidate_since) >= DEBOUNCE_MS
        {
            self.stable = self.candidate;
            self.fell = self.stable;
        }

        self.stable
    }

    pub fn inner(&mut self) -> &mut B {
        &mut self.button
    }
}

impl<B> GestureInput for DebouncedButton<B> {
    fn is_pressed(&self) -> bool {
        self.stable
    }

    fn fell(&self) -> bool {
        self.fell
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    None,
    ShortPress,
    /// Held for at least [`LONG_PRESS_MS`].
    LongPress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HoldState {
    Released,
    Pressed { since: u64 },
    /// Long press already reported, waiting for release.
    Consumed,
}

/// Non-blocking long/short press classifier.
///
/// A long press fires as soon as the threshold is crossed, while the button is
/// still down. A short press fires on release.
#[derive(Debug, Clone)]
pub struct GestureDetector {
    state: HoldState,
}

impl GestureDetector {
    pub const fn new() -> Self {
        Self { state: HoldState::Released }
    }

    pub fn poll<I: GestureInput>(&mut self, input: &I, now_ms: u64) -> Gesture {
        match (self.state, input.is_pressed()) {
            (HoldState::Released, true) => {
                self.state = HoldState::Pressed { since: now_ms };
                Gesture::None
            }
            (HoldState::Pressed { since }, true) => {
                if now_ms.saturating_sub(since) >= LONG_PRESS_MS {
                    self.state = HoldState::Consumed;
                    Gesture::LongPress
                } else {
                    Gesture::None
                }
            }
            (HoldState::Pressed { .. }, false) => {
                self.state = HoldState::Released;
                Gesture::ShortPress
            }
            (HoldState::Consumed, false) => {
                self.state = HoldState::Released;
                Gesture::None
            }
            (HoldState::Released, false) | (HoldState::Consumed, true) => {
                Gesture::None
            }
        }
    }

    /// `true` while a press is down and not yet classified.
    pub fn is_holding(&self) -> bool {
        matches!(self.state, HoldState::Pressed { .. })
    }
}

impl Default for GestureDetector {
    fn default() -> Self {
        Self::new()
    }
}
