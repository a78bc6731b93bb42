use crankgb_core::JoypadState;

/// Ticks a crank gesture stays locked out after firing.
pub const DEBOUNCE_TICKS: u32 = 30;
/// Crank rotation (degrees per tick) that registers as a gesture.
pub const CRANK_THRESHOLD: f32 = 2.0;

/// Maps host input onto the joypad once per tick.
///
/// Discrete buttons pass straight through. The crank's continuous rotation
/// delta becomes START (forward) or SELECT (backward), gated by a countdown
/// so sustained cranking cannot double-trigger. START wins if a single
/// delta somehow satisfies both thresholds.
#[derive(Default)]
pub struct GestureMapper {
    debounce: u32,
}

impl GestureMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds this tick's joypad state from held buttons and the crank delta.
    ///
    /// The countdown decrements every tick regardless of firing and floors
    /// at zero; a gesture may fire only at zero and resets it to
    /// [`DEBOUNCE_TICKS`].
    pub fn update(&mut self, held: JoypadState, crank_delta: f32) -> JoypadState {
        self.debounce = self.debounce.saturating_sub(1);

        let mut state = held & JoypadState::DISCRETE;
        if self.debounce == 0 {
            if crank_delta > CRANK_THRESHOLD {
                state |= JoypadState::START;
                self.debounce = DEBOUNCE_TICKS;
            } else if crank_delta < -CRANK_THRESHOLD {
                state |= JoypadState::SELECT;
                self.debounce = DEBOUNCE_TICKS;
            }
        }
        state
    }

    #[cfg(test)]
    fn debounce(&self) -> u32 {
        self.debounce
    }
}
