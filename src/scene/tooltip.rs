use crate::animation::ease::Ease;

/// Duration of the tooltip enter and exit transitions.
pub const TOOLTIP_TRANSITION_SECS: f64 = 0.3;
/// Vertical slide distance of the tooltip transitions, in logical units.
pub const TOOLTIP_SLIDE: f64 = 10.0;

const TOOLTIP_EASE: Ease = Ease::OutQuad;

#[derive(Clone, Debug, PartialEq)]
struct Presence {
    label: String,
    entered_at: f64,
    exited_at: Option<f64>,
}

impl Presence {
    fn enter_progress(&self, now: f64) -> f64 {
        TOOLTIP_EASE.apply((now - self.entered_at) / TOOLTIP_TRANSITION_SECS)
    }

    fn shown(&self, now: f64) -> f64 {
        match self.exited_at {
            None => self.enter_progress(now),
            Some(t) => {
                let q = TOOLTIP_EASE.apply((now - t) / TOOLTIP_TRANSITION_SECS);
                self.enter_progress(t) * (1.0 - q)
            }
        }
    }

    /// Turn an exiting entry back into an entering one, continuing from what is shown at `now`.
    fn revive(&mut self, now: f64) {
        let shown = self.shown(now).clamp(0.0, 1.0);
        // Inverse of the `OutQuad` enter curve.
        let elapsed = 1.0 - (1.0 - shown).sqrt();
        self.entered_at = now - elapsed * TOOLTIP_TRANSITION_SECS;
        self.exited_at = None;
    }
}

/// One visible tooltip box.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TooltipLayer {
    /// Text shown.
    pub label: String,
    /// Box opacity in `[0, 1]`.
    pub opacity: f64,
    /// Downward offset from the resting position.
    pub offset_y: f64,
}

/// Presence-keyed tooltip transitions.
///
/// Each distinct label fades and slides in when it appears. When it is replaced or cleared it
/// keeps rendering while it fades and slides back out, so an exiting and an entering label can
/// be visible at the same time. A label that returns mid-exit turns around instead of appearing
/// twice.
#[derive(Clone, Debug, Default)]
pub struct Tooltip {
    entries: Vec<Presence>,
}

impl Tooltip {
    /// Reconcile with the label that should currently be shown.
    pub fn sync(&mut self, label: Option<&str>, now: f64) {
        self.entries
            .retain(|e| e.exited_at.is_none_or(|t| now < t + TOOLTIP_TRANSITION_SECS));

        if let Some(cur) = self.entries.iter_mut().find(|e| e.exited_at.is_none()) {
            if label == Some(cur.label.as_str()) {
                return;
            }
            cur.exited_at = Some(now);
        }

        let Some(l) = label else {
            return;
        };
        match self
            .entries
            .iter_mut()
            .find(|e| e.label == l && e.exited_at.is_some())
        {
            Some(exiting) => exiting.revive(now),
            None => self.entries.push(Presence {
                label: l.to_owned(),
                entered_at: now,
                exited_at: None,
            }),
        }
    }

    /// Label of the entering (non-exiting) tooltip.
    pub fn current_label(&self) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.exited_at.is_none())
            .map(|e| e.label.as_str())
    }

    /// Visible layers at `now`, oldest first.
    pub fn layers(&self, now: f64) -> Vec<TooltipLayer> {
        self.entries
            .iter()
            .filter_map(|e| {
                let shown = e.shown(now);
                (shown > 0.0).then(|| TooltipLayer {
                    label: e.label.clone(),
                    opacity: shown,
                    offset_y: TOOLTIP_SLIDE * (1.0 - shown),
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/tooltip.rs"]
mod tests;
