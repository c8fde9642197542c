use egui::Pos2;

/// Pointer gesture state of the drawing session.
///
/// The pre-stroke snapshot lives inside `Active`, so it is dropped together
/// with the gesture and can never be restored from afterwards.
pub enum GestureState<S> {
    Idle,
    Active {
        /// Where the pointer went down
        start: Pos2,
        /// Last sampled position, the origin of the next freehand segment
        last: Pos2,
        /// Buffer as it was at pointer-down
        snapshot: S,
    },
}

impl<S> Default for GestureState<S> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<S> GestureState<S> {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    pub fn start(&self) -> Option<Pos2> {
        match self {
            Self::Active { start, .. } => Some(*start),
            Self::Idle => None,
        }
    }

    pub fn last(&self) -> Option<Pos2> {
        match self {
            Self::Active { last, .. } => Some(*last),
            Self::Idle => None,
        }
    }
}

impl<S> std::fmt::Debug for GestureState<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => f.write_str("Idle"),
            Self::Active { start, last, .. } => f
                .debug_struct("Active")
                .field("start", start)
                .field("last", last)
                .finish_non_exhaustive(),
        }
    }
}
