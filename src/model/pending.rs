use std::fmt;

use serde::{Deserialize, Serialize};

use super::task::{Directions, TaskKind};

/// The single action staged on a task until the next sync
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PendingEdit {
    #[default]
    None,
    MarkUp,
    MarkDown,
    Complete,
    Delete,
    Edit,
}

/// A user request to flip one of the staged actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    MarkUp,
    MarkDown,
    Complete,
    Delete,
    Edit,
}

impl Toggle {
    /// The staged state this toggle switches on
    pub fn target(self) -> PendingEdit {
        match self {
            Toggle::MarkUp => PendingEdit::MarkUp,
            Toggle::MarkDown => PendingEdit::MarkDown,
            Toggle::Complete => PendingEdit::Complete,
            Toggle::Delete => PendingEdit::Delete,
            Toggle::Edit => PendingEdit::Edit,
        }
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.target(), f)
    }
}

impl fmt::Display for PendingEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PendingEdit::None => "none",
            PendingEdit::MarkUp => "mark up",
            PendingEdit::MarkDown => "mark down",
            PendingEdit::Complete => "complete",
            PendingEdit::Delete => "delete",
            PendingEdit::Edit => "edit",
        };
        f.write_str(s)
    }
}

/// A toggle that the transition table does not allow
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("cannot {toggle} a {kind} task")]
    NotApplicable { toggle: Toggle, kind: TaskKind },
    #[error("cannot {toggle} while {blocking} is staged")]
    Blocked { toggle: Toggle, blocking: PendingEdit },
}

impl PendingEdit {
    /// Symbol shown in front of a task row for this state
    pub fn marker(self) -> Option<&'static str> {
        match self {
            PendingEdit::None => None,
            PendingEdit::MarkUp => Some("+"),
            PendingEdit::MarkDown => Some("-"),
            PendingEdit::Complete => Some("\u{2713}"),
            PendingEdit::Delete => Some("\u{2717}"),
            PendingEdit::Edit => Some("\u{270E}"),
        }
    }

    pub fn is_staged(self) -> bool {
        self != PendingEdit::None
    }

    /// Transition table for staged actions.
    ///
    /// - Direction toggles only apply to habits created with that direction;
    ///   completion only to dailies and to-dos.
    /// - While `Delete` or `Edit` is staged, direction and completion
    ///   toggles are rejected.
    /// - `Delete` always wins and clears whatever else was staged.
    /// - `Edit` clears other stages but is rejected while `Delete` is staged.
    /// - Invoking the toggle of the active state returns to `None`.
    pub fn apply(
        self,
        toggle: Toggle,
        kind: TaskKind,
        directions: Directions,
    ) -> Result<PendingEdit, StateError> {
        let applicable = match toggle {
            Toggle::MarkUp => kind == TaskKind::Habit && directions.up,
            Toggle::MarkDown => kind == TaskKind::Habit && directions.down,
            Toggle::Complete => kind != TaskKind::Habit,
            Toggle::Delete | Toggle::Edit => true,
        };
        if !applicable {
            return Err(StateError::NotApplicable { toggle, kind });
        }

        let target = toggle.target();
        match (toggle, self) {
            (Toggle::Delete, _) => {}
            (Toggle::Edit, PendingEdit::Delete) => {
                return Err(StateError::Blocked {
                    toggle,
                    blocking: self,
                });
            }
            (Toggle::Edit, _) => {}
            (_, PendingEdit::Delete | PendingEdit::Edit) => {
                return Err(StateError::Blocked {
                    toggle,
                    blocking: self,
                });
            }
            _ => {}
        }

        if self == target {
            Ok(PendingEdit::None)
        } else {
            Ok(target)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TOGGLES: [Toggle; 5] = [
        Toggle::MarkUp,
        Toggle::MarkDown,
        Toggle::Complete,
        Toggle::Delete,
        Toggle::Edit,
    ];

    fn habit(state: PendingEdit, toggle: Toggle) -> Result<PendingEdit, StateError> {
        state.apply(toggle, TaskKind::Habit, Directions::both())
    }

    fn daily(state: PendingEdit, toggle: Toggle) -> Result<PendingEdit, StateError> {
        state.apply(toggle, TaskKind::Daily, Directions::default())
    }

    #[test]
    fn mark_up_and_down_are_exclusive() {
        let s = habit(PendingEdit::None, Toggle::MarkUp).unwrap();
        assert_eq!(s, PendingEdit::MarkUp);
        let s = habit(s, Toggle::MarkDown).unwrap();
        assert_eq!(s, PendingEdit::MarkDown);
        let s = habit(s, Toggle::MarkDown).unwrap();
        assert_eq!(s, PendingEdit::None);
    }

    #[test]
    fn doubled_direction_sequences_return_to_none() {
        // Every sequence of length 4 over {up, down}, each toggle pressed twice
        for bits in 0u8..16 {
            let mut state = PendingEdit::None;
            for i in 0..4 {
                let toggle = if bits & (1 << i) != 0 {
                    Toggle::MarkUp
                } else {
                    Toggle::MarkDown
                };
                for _ in 0..2 {
                    state = habit(state, toggle).unwrap();
                    assert!(matches!(
                        state,
                        PendingEdit::None | PendingEdit::MarkUp | PendingEdit::MarkDown
                    ));
                }
                assert_eq!(state, PendingEdit::None);
            }
        }
    }

    #[test]
    fn same_direction_twice_is_none() {
        for toggle in [Toggle::MarkUp, Toggle::MarkDown] {
            let once = habit(PendingEdit::None, toggle).unwrap();
            let twice = habit(once, toggle).unwrap();
            assert_eq!(twice, PendingEdit::None);
        }
    }

    #[test]
    fn direction_requires_habit_capability() {
        let up_only = Directions { up: true, down: false };
        let err = PendingEdit::None
            .apply(Toggle::MarkDown, TaskKind::Habit, up_only)
            .unwrap_err();
        assert_eq!(
            err,
            StateError::NotApplicable {
                toggle: Toggle::MarkDown,
                kind: TaskKind::Habit
            }
        );
        assert!(daily(PendingEdit::None, Toggle::MarkUp).is_err());
    }

    #[test]
    fn complete_does_not_apply_to_habits() {
        assert!(habit(PendingEdit::None, Toggle::Complete).is_err());
        assert_eq!(
            daily(PendingEdit::None, Toggle::Complete).unwrap(),
            PendingEdit::Complete
        );
        let todo = PendingEdit::None
            .apply(Toggle::Complete, TaskKind::Todo, Directions::default())
            .unwrap();
        assert_eq!(todo, PendingEdit::Complete);
    }

    #[test]
    fn delete_blocks_everything_but_delete() {
        let deleted = habit(PendingEdit::MarkUp, Toggle::Delete).unwrap();
        assert_eq!(deleted, PendingEdit::Delete);
        for toggle in [Toggle::MarkUp, Toggle::MarkDown, Toggle::Edit] {
            let err = habit(deleted, toggle).unwrap_err();
            assert_eq!(
                err,
                StateError::Blocked {
                    toggle,
                    blocking: PendingEdit::Delete
                }
            );
        }
        assert!(daily(PendingEdit::Delete, Toggle::Complete).is_err());
        assert_eq!(habit(deleted, Toggle::Delete).unwrap(), PendingEdit::None);
    }

    #[test]
    fn edit_blocks_value_changes_but_not_delete() {
        let editing = daily(PendingEdit::Complete, Toggle::Edit).unwrap();
        assert_eq!(editing, PendingEdit::Edit);
        assert!(daily(editing, Toggle::Complete).is_err());
        assert!(habit(PendingEdit::Edit, Toggle::MarkUp).is_err());
        assert_eq!(daily(editing, Toggle::Delete).unwrap(), PendingEdit::Delete);
        assert_eq!(daily(editing, Toggle::Edit).unwrap(), PendingEdit::None);
    }

    #[test]
    fn double_toggle_restores_initial_state() {
        for toggle in ALL_TOGGLES {
            let kind = match toggle {
                Toggle::MarkUp | Toggle::MarkDown => TaskKind::Habit,
                _ => TaskKind::Daily,
            };
            let once = PendingEdit::None
                .apply(toggle, kind, Directions::both())
                .unwrap();
            let twice = once.apply(toggle, kind, Directions::both()).unwrap();
            assert_eq!(twice, PendingEdit::default());
        }
    }

    #[test]
    fn rejected_toggle_never_yields_two_states() {
        // The enum holds one state; make sure no accepted transition escapes
        // the table by checking every (state, toggle) pair.
        let states = [
            PendingEdit::None,
            PendingEdit::MarkUp,
            PendingEdit::MarkDown,
            PendingEdit::Complete,
            PendingEdit::Delete,
            PendingEdit::Edit,
        ];
        for state in states {
            for toggle in ALL_TOGGLES {
                if let Ok(next) = habit(state, toggle) {
                    assert!(next == PendingEdit::None || next == toggle.target());
                }
            }
        }
    }
}
