use cubeview_camera::Movement;

use crate::keys::{Key, KeyState};

/// What a held key asks the frame loop to do this frame.
///
/// The frame loop consumes actions, never raw key codes, so the window system
/// and the headless simulator share one key mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the camera for this frame's elapsed time.
    Move(Movement),
    /// Leave the frame loop after this frame.
    Close,
    /// Nudge the debug counter by the given step.
    AdjustCounter(i32),
}

const BINDINGS: [(Key, Action); 7] = [
    (Key::Escape, Action::Close),
    (Key::Up, Action::AdjustCounter(1)),
    (Key::Down, Action::AdjustCounter(-1)),
    (Key::W, Action::Move(Movement::Forward)),
    (Key::S, Action::Move(Movement::Backward)),
    (Key::A, Action::Move(Movement::Left)),
    (Key::D, Action::Move(Movement::Right)),
];

/// Actions for every bound key currently held, in binding order.
pub fn poll_actions(keys: &impl KeyState) -> Vec<Action> {
    BINDINGS
        .iter()
        .filter(|(key, _)| keys.is_held(*key))
        .map(|(_, action)| *action)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::HeldKeys;

    #[test]
    fn nothing_held_no_actions() {
        assert!(poll_actions(&HeldKeys::new()).is_empty());
    }

    #[test]
    fn movement_keys_map_to_moves() {
        let keys: HeldKeys = [Key::W, Key::D].into_iter().collect();
        assert_eq!(
            poll_actions(&keys),
            vec![
                Action::Move(Movement::Forward),
                Action::Move(Movement::Right)
            ]
        );
    }

    #[test]
    fn escape_and_arrows() {
        let keys: HeldKeys = [Key::Down, Key::Escape, Key::Up].into_iter().collect();
        assert_eq!(
            poll_actions(&keys),
            vec![
                Action::Close,
                Action::AdjustCounter(1),
                Action::AdjustCounter(-1)
            ]
        );
    }

    #[test]
    fn opposite_keys_both_reported() {
        let keys: HeldKeys = [Key::A, Key::D].into_iter().collect();
        assert_eq!(poll_actions(&keys).len(), 2);
    }
}
