use tracing::debug;

/// Input mode of one view. Exactly one is active at a time; the two
/// historical boolean flags are exposed as `is_move`/`is_select`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Move,
    Select,
}

/// The two interactors a view swaps between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interactor {
    Lasso,
    ZoomPan,
}

/// Declarative description of one mode switch: what to detach, what to
/// attach, and the cursor affordance to set (only when entering Move).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTransition {
    pub entered: ViewMode,
    pub detach: Interactor,
    pub attach: Interactor,
    pub cursor: Option<&'static str>,
}

/// Attach/detach sets per state, in one place.
pub fn transition_into(mode: ViewMode) -> ModeTransition {
    match mode {
        ViewMode::Select => ModeTransition {
            entered: ViewMode::Select,
            detach: Interactor::ZoomPan,
            attach: Interactor::Lasso,
            cursor: None,
        },
        ViewMode::Move => ModeTransition {
            entered: ViewMode::Move,
            detach: Interactor::Lasso,
            attach: Interactor::ZoomPan,
            cursor: Some("all-scroll"),
        },
    }
}

/// Per-view mode state machine. Starts in Move, never terminates, toggles
/// arbitrarily — but never while a pointer gesture is in progress, so
/// interactors are only swapped on deliberate mode-toggle actions.
#[derive(Debug, Default)]
pub struct ModeController {
    mode: ViewMode,
    drag_active: bool,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn is_move(&self) -> bool {
        self.mode == ViewMode::Move
    }

    pub fn is_select(&self) -> bool {
        self.mode == ViewMode::Select
    }

    pub fn begin_drag(&mut self) {
        self.drag_active = true;
    }

    pub fn end_drag(&mut self) {
        self.drag_active = false;
    }

    pub fn drag_active(&self) -> bool {
        self.drag_active
    }

    /// Flip between Move and Select. Returns the transition to carry out,
    /// or `None` when refused because a drag is in progress.
    pub fn toggle(&mut self) -> Option<ModeTransition> {
        if self.drag_active {
            debug!("mode toggle ignored mid-drag");
            return None;
        }
        self.mode = match self.mode {
            ViewMode::Move => ViewMode::Select,
            ViewMode::Select => ViewMode::Move,
        };
        Some(transition_into(self.mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_move_mode() {
        let modes = ModeController::new();
        assert!(modes.is_move());
        assert!(!modes.is_select());
    }

    #[test]
    fn toggle_swaps_interactors_both_ways() {
        let mut modes = ModeController::new();

        let into_select = modes.toggle().unwrap();
        assert_eq!(into_select.entered, ViewMode::Select);
        assert_eq!(into_select.detach, Interactor::ZoomPan);
        assert_eq!(into_select.attach, Interactor::Lasso);
        assert_eq!(into_select.cursor, None);

        let into_move = modes.toggle().unwrap();
        assert_eq!(into_move.entered, ViewMode::Move);
        assert_eq!(into_move.detach, Interactor::Lasso);
        assert_eq!(into_move.attach, Interactor::ZoomPan);
        assert_eq!(into_move.cursor, Some("all-scroll"));
    }

    #[test]
    fn double_toggle_returns_to_original_flags() {
        let mut modes = ModeController::new();
        let before = (modes.is_select(), modes.is_move());
        modes.toggle().unwrap();
        modes.toggle().unwrap();
        assert_eq!((modes.is_select(), modes.is_move()), before);
    }

    #[test]
    fn no_transition_mid_drag() {
        let mut modes = ModeController::new();
        modes.begin_drag();
        assert!(modes.toggle().is_none());
        assert!(modes.is_move());

        modes.end_drag();
        assert!(modes.toggle().is_some());
        assert!(modes.is_select());
    }
}
