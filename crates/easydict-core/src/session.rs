use easydict_types::{ActiveView, BusyKind, SessionSnapshot};

/// Single source of truth for what is running and which panel is visible.
///
/// The machine is owned by exactly one task. Every transition is a check and a
/// write on `&mut self`, so a caller holding the machine can never interleave
/// another trigger between the eligibility check and the state change.
///
/// ```text
/// Idle ──try_begin_translating──▶ Translating ──end_translating──▶ Idle
/// Idle ──try_begin_capturing────▶ Capturing   ──end_capturing────▶ Idle
/// ```
#[derive(Debug, Default)]
pub struct SessionStateMachine {
    busy: BusyKind,
    view: ActiveView,
}

impl SessionStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn busy(&self) -> BusyKind {
        self.busy
    }

    pub fn view(&self) -> ActiveView {
        self.view
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            busy: self.busy,
            view: self.view,
        }
    }

    /// `Idle → Translating`. Returns `false` and leaves the state untouched when busy.
    pub fn try_begin_translating(&mut self) -> bool {
        self.try_begin(BusyKind::Translating)
    }

    /// `Idle → Capturing`. Returns `false` and leaves the state untouched when busy.
    pub fn try_begin_capturing(&mut self) -> bool {
        self.try_begin(BusyKind::Capturing)
    }

    /// `Translating → Idle`. A no-op in any other state.
    pub fn end_translating(&mut self) -> bool {
        self.end(BusyKind::Translating)
    }

    /// `Capturing → Idle`. A no-op in any other state.
    pub fn end_capturing(&mut self) -> bool {
        self.end(BusyKind::Capturing)
    }

    /// Returns whether the visible panel changed
    pub fn show_main(&mut self) -> bool {
        self.show(ActiveView::Main)
    }

    /// Returns whether the visible panel changed
    pub fn show_settings(&mut self) -> bool {
        self.show(ActiveView::Settings)
    }

    fn try_begin(&mut self, kind: BusyKind) -> bool {
        if self.busy != BusyKind::Idle {
            return false;
        }
        self.busy = kind;
        true
    }

    fn end(&mut self, kind: BusyKind) -> bool {
        if self.busy != kind {
            return false;
        }
        self.busy = BusyKind::Idle;
        true
    }

    fn show(&mut self, view: ActiveView) -> bool {
        let changed = self.view != view;
        self.view = view;
        changed
    }
}
