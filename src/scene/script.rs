//! Timed pointer input for non-interactive rendering.

use crate::{
    foundation::{
        core::Point,
        error::{ArcmapError, ArcmapResult},
    },
    scene::{
        frame::MapFrame,
        hover::{MarkerKind, MarkerRef, PointerEvent},
        map::ConnectionMap,
    },
};

/// Pointer action in a script.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PointerAction {
    /// Enter the marker at connection `index` (`start` or `end`).
    Enter {
        /// Connection index.
        index: usize,
        /// Which endpoint.
        marker: ScriptMarker,
    },
    /// Leave whichever marker is hovered.
    Leave,
    /// Move the pointer to logical coordinates.
    MoveTo {
        /// Logical x.
        x: f64,
        /// Logical y.
        y: f64,
    },
    /// Move the pointer off the canvas.
    Exit,
}

/// Endpoint selector used in scripts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScriptMarker {
    /// Origin marker.
    Start,
    /// Destination marker.
    End,
}

/// Action scheduled at `at` seconds after mount.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScriptedPointer {
    /// Seconds after mount.
    pub at: f64,
    /// What happens.
    #[serde(flatten)]
    pub action: PointerAction,
}

/// Time-ordered pointer input.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PointerScript {
    steps: Vec<ScriptedPointer>,
}

impl PointerScript {
    /// Build a script; steps must be sorted by time.
    pub fn new(steps: Vec<ScriptedPointer>) -> ArcmapResult<Self> {
        let script = Self { steps };
        script.validate()?;
        Ok(script)
    }

    /// Check times are finite, non-negative, and sorted.
    pub fn validate(&self) -> ArcmapResult<()> {
        if self.steps.iter().any(|s| !s.at.is_finite() || s.at < 0.0) {
            return Err(ArcmapError::validation(
                "pointer script times must be finite and >= 0",
            ));
        }
        if !self.steps.windows(2).all(|w| w[0].at <= w[1].at) {
            return Err(ArcmapError::validation(
                "pointer script steps must be sorted by time",
            ));
        }
        Ok(())
    }

    /// Check every `enter` step targets one of `connections` connections.
    pub fn validate_targets(&self, connections: usize) -> ArcmapResult<()> {
        for step in &self.steps {
            if let PointerAction::Enter { index, .. } = step.action
                && index >= connections
            {
                return Err(ArcmapError::validation(format!(
                    "pointer script enters marker of connection {index} at {}s, but there are only {connections} connections",
                    step.at
                )));
            }
        }
        Ok(())
    }

    /// Scripted steps.
    pub fn steps(&self) -> &[ScriptedPointer] {
        &self.steps
    }

    /// Return `true` when there is nothing to replay.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Mount `map`, replay every step up to `t_secs`, and sample the frame at `t_secs`.
    ///
    /// Each call starts from a fresh playback, so frames can be produced in any order.
    pub fn frame_at(&self, map: &ConnectionMap, t_secs: f64) -> MapFrame {
        let mut playback = map.mount();
        for step in self.steps.iter().take_while(|s| s.at <= t_secs) {
            match &step.action {
                PointerAction::Enter { index, marker } => {
                    let kind = match marker {
                        ScriptMarker::Start => MarkerKind::Start,
                        ScriptMarker::End => MarkerKind::End,
                    };
                    let m = MarkerRef {
                        index: *index,
                        kind,
                    };
                    playback.handle(PointerEvent::Enter(m), step.at);
                }
                PointerAction::Leave => playback.leave(step.at),
                PointerAction::MoveTo { x, y } => {
                    playback.pointer_moved(Some(Point::new(*x, *y)), step.at)
                }
                PointerAction::Exit => playback.pointer_moved(None, step.at),
            }
        }
        playback.frame(t_secs)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/script.rs"]
mod tests;
