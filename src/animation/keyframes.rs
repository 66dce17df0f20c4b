use crate::{
    animation::ease::Ease,
    foundation::error::{ArcmapError, ArcmapResult},
};

/// Interpolation contract for animated values.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

/// Single keyed value at a normalized offset inside an animation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe<T> {
    /// Offset in `[0, 1]` of the owning animation's duration.
    pub at: f64,
    /// Value reached at `at`.
    pub value: T,
}

/// Keyframed track over normalized progress.
///
/// Mirrors the `values` + `times` form of web animation keyframes: a single easing curve is
/// applied to every segment between adjacent keys.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframes<T> {
    keys: Vec<Keyframe<T>>, // sorted by `at`
    ease: Ease,
}

impl<T> Keyframes<T>
where
    T: Lerp + Clone,
{
    /// Build a track from parallel `values` and `times` slices.
    pub fn new(values: &[T], times: &[f64], ease: Ease) -> ArcmapResult<Self> {
        if values.is_empty() {
            return Err(ArcmapError::animation("keyframes need at least one value"));
        }
        if values.len() != times.len() {
            return Err(ArcmapError::animation(format!(
                "keyframes have {} values but {} times",
                values.len(),
                times.len()
            )));
        }
        if times.iter().any(|t| !t.is_finite() || *t < 0.0 || *t > 1.0) {
            return Err(ArcmapError::animation(
                "keyframe times must be finite and within [0, 1]",
            ));
        }
        if !times.windows(2).all(|w| w[0] <= w[1]) {
            return Err(ArcmapError::animation("keyframe times must be sorted"));
        }

        let keys = values
            .iter()
            .zip(times)
            .map(|(value, &at)| Keyframe {
                at,
                value: value.clone(),
            })
            .collect();
        Ok(Self { keys, ease })
    }

    /// Two-key track going from `from` at 0 to `to` at 1.
    pub fn tween(from: T, to: T, ease: Ease) -> Self {
        Self {
            keys: vec![
                Keyframe {
                    at: 0.0,
                    value: from,
                },
                Keyframe { at: 1.0, value: to },
            ],
            ease,
        }
    }

    /// Sample the track at normalized progress `p` (clamped to `[0, 1]`).
    pub fn sample(&self, p: f64) -> T {
        let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        let idx = self.keys.partition_point(|k| k.at <= p);

        if idx == 0 {
            return self.keys[0].value.clone();
        }
        if idx >= self.keys.len() {
            return self.keys[self.keys.len() - 1].value.clone();
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let denom = b.at - a.at;
        if denom <= 0.0 {
            return a.value.clone();
        }

        let t = (p - a.at) / denom;
        T::lerp(&a.value, &b.value, self.ease.apply(t))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframes.rs"]
mod tests;
