use crate::{foundation::core::Point, scene::options::Connection};

/// Radius of endpoint markers, in logical units.
pub const MARKER_RADIUS: f64 = 4.0;

/// Which end of a connection a marker belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerKind {
    /// Origin marker.
    Start,
    /// Destination marker.
    End,
}

/// Endpoint marker of connection `index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct MarkerRef {
    /// Connection index.
    pub index: usize,
    /// Endpoint.
    pub kind: MarkerKind,
}

impl MarkerRef {
    /// Origin marker of connection `index`.
    pub fn start(index: usize) -> Self {
        Self {
            index,
            kind: MarkerKind::Start,
        }
    }

    /// Destination marker of connection `index`.
    pub fn end(index: usize) -> Self {
        Self {
            index,
            kind: MarkerKind::End,
        }
    }
}

/// Pointer transition on an endpoint marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    /// Pointer entered a marker.
    Enter(MarkerRef),
    /// Pointer left a marker.
    Leave(MarkerRef),
}

/// Which endpoint, if any, the pointer is over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum HoverState {
    /// Nothing hovered.
    #[default]
    Idle,
    /// Origin marker of connection `i` hovered.
    HoveringStart(usize),
    /// Destination marker of connection `i` hovered.
    HoveringEnd(usize),
}

impl HoverState {
    /// Next state after `event`. Leaving any marker returns to [`HoverState::Idle`].
    pub fn apply(self, event: PointerEvent) -> Self {
        match event {
            PointerEvent::Enter(MarkerRef {
                index,
                kind: MarkerKind::Start,
            }) => Self::HoveringStart(index),
            PointerEvent::Enter(MarkerRef {
                index,
                kind: MarkerKind::End,
            }) => Self::HoveringEnd(index),
            PointerEvent::Leave(_) => Self::Idle,
        }
    }

    /// Hovered marker, if any.
    pub fn marker(self) -> Option<MarkerRef> {
        match self {
            Self::Idle => None,
            Self::HoveringStart(i) => Some(MarkerRef::start(i)),
            Self::HoveringEnd(i) => Some(MarkerRef::end(i)),
        }
    }

    /// Tooltip text for this state.
    ///
    /// Unlabeled (or empty-labeled) endpoints fall back to `Location i` / `Destination i`.
    /// Markers past the end of `dots` have no label.
    pub fn label(self, dots: &[Connection]) -> Option<String> {
        let marker = self.marker()?;
        let dot = dots.get(marker.index)?;
        let explicit = match marker.kind {
            MarkerKind::Start => dot.start.label.as_deref(),
            MarkerKind::End => dot.end.label.as_deref(),
        }
        .filter(|l| !l.is_empty());

        Some(match (explicit, marker.kind) {
            (Some(l), _) => l.to_owned(),
            (None, MarkerKind::Start) => format!("Location {}", marker.index),
            (None, MarkerKind::End) => format!("Destination {}", marker.index),
        })
    }
}

/// Topmost marker under `p`.
///
/// `markers` is in draw order; later entries are drawn on top and win ties.
pub fn hit_test(markers: &[(MarkerRef, Point)], p: Point) -> Option<MarkerRef> {
    markers
        .iter()
        .rev()
        .find(|(_, center)| (*center - p).hypot() <= MARKER_RADIUS)
        .map(|(m, _)| *m)
}

/// Turns raw pointer positions into enter/leave events.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    current: Option<MarkerRef>,
}

impl PointerTracker {
    /// Marker currently under the pointer.
    pub fn current(&self) -> Option<MarkerRef> {
        self.current
    }

    /// Feed the new pointer position (`None` when it left the canvas).
    pub fn move_to(&mut self, markers: &[(MarkerRef, Point)], p: Option<Point>) -> Vec<PointerEvent> {
        let next = p.and_then(|p| hit_test(markers, p));
        if next == self.current {
            return Vec::new();
        }

        let mut events = Vec::with_capacity(2);
        if let Some(prev) = self.current {
            events.push(PointerEvent::Leave(prev));
        }
        if let Some(m) = next {
            events.push(PointerEvent::Enter(m));
        }
        self.current = next;
        events
    }

    /// Forget the tracked marker.
    pub fn reset(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/hover.rs"]
mod tests;
