use crate::editor::gesture::{Footprint, clamp_layer};
use crate::foundation::core::{Bounds, Size};
use crate::foundation::error::{PrintcompError, PrintcompResult};
use crate::layout::geometry::VerticalClamp;
use crate::layout::safe_zone::{
    SafeZonePresets, Side, derive_safe_zone, fallback_safe_zone, garment_box_in_container,
};
use crate::scene::layer::Layer;

/// On-screen layout of one editor session: container, mockup and active side.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorLayout {
    container: Bounds,
    mockup: Option<Size>,
    side: Side,
    presets: SafeZonePresets,
}

impl EditorLayout {
    pub fn new(container: Bounds, side: Side, presets: SafeZonePresets) -> Self {
        Self {
            container,
            mockup: None,
            side,
            presets,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn set_side(&mut self, side: Side) {
        self.side = side;
    }

    pub fn container(&self) -> Bounds {
        self.container
    }

    /// The container was resized (window resize, orientation change).
    pub fn set_container(&mut self, container: Bounds) {
        self.container = container;
    }

    pub fn is_mockup_loaded(&self) -> bool {
        self.mockup.is_some()
    }

    /// Record the mockup's natural size once it has loaded.
    pub fn mockup_loaded(&mut self, natural: Size) -> PrintcompResult<()> {
        if natural.is_empty() || !natural.width.is_finite() || !natural.height.is_finite() {
            return Err(PrintcompError::invalid_input(format!(
                "mockup natural size must be > 0, got {}x{}",
                natural.width, natural.height
            )));
        }
        self.mockup = Some(natural);
        Ok(())
    }

    /// Where the garment mockup sits in the container, once known.
    pub fn garment_box(&self) -> Option<Bounds> {
        let natural = self.mockup?;
        garment_box_in_container(self.container, natural).ok()
    }

    /// The zone layers must stay inside right now.
    pub fn safe_zone(&self) -> Bounds {
        match self.garment_box() {
            Some(garment) => derive_safe_zone(garment, self.presets.for_side(self.side)),
            None => fallback_safe_zone(self.container),
        }
    }

    /// Reapply each layer's normalized placement to the current zone and clamp it there.
    ///
    /// Layers keep their normalized coordinates, so a zone change moves them proportionally
    /// instead of teleporting. Returns one `clamped` flag per layer.
    pub fn reclamp(
        &self,
        layers: &mut [Layer],
        footprints: &[Footprint],
        vertical_clamp: VerticalClamp,
    ) -> PrintcompResult<Vec<bool>> {
        if layers.len() != footprints.len() {
            return Err(PrintcompError::invalid_input(format!(
                "got {} footprints for {} layers",
                footprints.len(),
                layers.len()
            )));
        }
        let zone = self.safe_zone();
        let flags = layers
            .iter_mut()
            .zip(footprints)
            .map(|(layer, fp)| {
                let (next, clamped) = clamp_layer(layer, fp, zone, vertical_clamp);
                *layer = next;
                clamped
            })
            .collect();
        Ok(flags)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/session.rs"]
mod tests;
