//! What gets composited: placements, typed layers and the render request they arrive in.

pub mod layer;
pub mod placement;
pub mod request;
