bitflags::bitflags! {
    /// Pressed joypad lines. A set flag means "pressed"; the active-low wire
    /// format the core expects is produced by [`JoypadState::active_low_bits`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct JoypadState: u8 {
        const A = 0x01;
        const B = 0x02;
        const SELECT = 0x04;
        const START = 0x08;
        const RIGHT = 0x10;
        const LEFT = 0x20;
        const UP = 0x40;
        const DOWN = 0x80;
    }
}

impl JoypadState {
    /// The eight discrete button lines (everything the host reports directly,
    /// without debouncing). START/SELECT only ever come from the crank.
    pub const DISCRETE: JoypadState = JoypadState::A
        .union(JoypadState::B)
        .union(JoypadState::UP)
        .union(JoypadState::DOWN)
        .union(JoypadState::LEFT)
        .union(JoypadState::RIGHT);

    /// 8-bit joypad mask in the core's wire format: a cleared bit means the
    /// button is held, 0xFF means nothing is pressed.
    pub fn active_low_bits(self) -> u8 {
        !self.bits()
    }
}

#[cfg(test)]
mod tests {
    use super::JoypadState;

    #[test]
    fn empty_state_reads_all_high() {
        assert_eq!(JoypadState::empty().active_low_bits(), 0xFF);
    }

    #[test]
    fn pressed_buttons_pull_their_lines_low() {
        let state = JoypadState::A | JoypadState::START;
        assert_eq!(state.active_low_bits(), !0x09);
    }

    #[test]
    fn discrete_set_excludes_start_and_select() {
        assert!(!JoypadState::DISCRETE.contains(JoypadState::START));
        assert!(!JoypadState::DISCRETE.contains(JoypadState::SELECT));
        assert!(JoypadState::DISCRETE.contains(JoypadState::UP));
    }
}
