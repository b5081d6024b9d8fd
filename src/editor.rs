//! Pure transitions behind the interactive placement editor.
//!
//! Pointer plumbing lives in the UI; every drag, pinch or twist becomes one [`Gesture`] applied
//! with [`apply_gesture`], which runs the same geometry the print renderer uses.

pub mod gesture;
pub mod session;
