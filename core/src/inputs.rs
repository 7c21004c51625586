/// Actions a key press or a button click can trigger.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InputCommand {
    Start,
    ToggleAudio,
    ReplayBoot,
}

/// Edge-detected key state. OS key-repeat keeps reporting "pressed", which
/// lands in `Held`, so a command fires once per physical press.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyState {
    JustPressed,
    Held,
    JustReleased,
    Released,
}

impl KeyState {
    pub fn new(pressed: bool) -> Self {
        if pressed {
            KeyState::JustPressed
        } else {
            KeyState::Released
        }
    }

    pub fn update_state(self, pressed: bool) -> Self {
        match (self, pressed) {
            (KeyState::Released | KeyState::JustReleased, true) => KeyState::JustPressed,
            (KeyState::JustPressed | KeyState::Held, true) => KeyState::Held,
            (KeyState::JustPressed | KeyState::Held, false) => KeyState::JustReleased,
            (KeyState::Released | KeyState::JustReleased, false) => KeyState::Released,
        }
    }

    pub fn is_just_pressed(self) -> bool {
        self == KeyState::JustPressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_held_key_fires_once() {
        let mut state = KeyState::new(true);
        assert!(state.is_just_pressed());

        // key-repeat: the OS keeps sending "pressed"
        for _ in 0..10 {
            state = state.update_state(true);
            assert!(!state.is_just_pressed());
        }
    }

    #[test]
    fn release_and_press_fires_again() {
        let mut state = KeyState::new(true);
        state = state.update_state(true);
        state = state.update_state(false);
        assert_eq!(state, KeyState::JustReleased);

        state = state.update_state(true);
        assert!(state.is_just_pressed());
    }

    #[test]
    fn release_settles() {
        let mut state = KeyState::new(true);
        state = state.update_state(false);
        state = state.update_state(false);
        assert_eq!(state, KeyState::Released);
    }
}
