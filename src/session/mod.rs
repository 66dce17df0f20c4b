//! Frame-indexed rendering of a scene.

pub mod render_session;
