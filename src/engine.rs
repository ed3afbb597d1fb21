// engine.rs - Host-independent lifecycle
//
// Mount builds the field and draws straight away, each frame is one
// update followed by one redraw, and teardown is final. The browser glue
// in lib.rs only decides *when* these run.

use crate::render::{Surface, render};
use crate::sim::ParticleField;

enum State<S> {
    /// Mount found nothing to draw on
    Inert,
    Live { field: ParticleField, surface: S },
    Torn,
}

pub struct Engine<S: Surface> {
    state: State<S>,
}

impl<S: Surface> Engine<S> {
    /// Start on `surface`, or stay inert when there is none
    pub fn mount(surface: Option<S>, w: f64, h: f64) -> Self {
        Self::mount_with(surface, w, h, ParticleField::new)
    }

    /// Like `mount`, with a reproducible field
    pub fn mount_seeded(surface: Option<S>, w: f64, h: f64, seed: u64) -> Self {
        Self::mount_with(surface, w, h, |w, h| ParticleField::with_seed(w, h, seed))
    }

    fn mount_with(
        surface: Option<S>,
        w: f64,
        h: f64,
        build: impl FnOnce(f64, f64) -> ParticleField,
    ) -> Self {
        let Some(mut surface) = surface else {
            return Self { state: State::Inert };
        };
        surface.resize(w, h);
        let field = build(w, h);
        let mut engine = Self { state: State::Live { field, surface } };
        engine.frame();
        engine
    }

    /// Update then redraw. Returns false once there is nothing to run.
    pub fn frame(&mut self) -> bool {
        let State::Live { field, surface } = &mut self.state else {
            return false;
        };
        field.step();
        render(field, surface);
        true
    }

    /// New viewport: resize the surface and rebuild the field from scratch
    pub fn resize(&mut self, w: f64, h: f64) {
        if let State::Live { field, surface } = &mut self.state {
            surface.resize(w, h);
            field.resize(w, h);
        }
    }

    /// Stop for good. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        // The host owns the surface, so leave it blank
        if let State::Live { field, surface } = &mut self.state {
            surface.clear(field.width(), field.height());
            log::debug!("particle field torn down");
        }
        self.state = State::Torn;
    }

    pub fn is_live(&self) -> bool {
        matches!(self.state, State::Live { .. })
    }

    pub fn field(&self) -> Option<&ParticleField> {
        match &self.state {
            State::Live { field, .. } => Some(field),
            _ => None,
        }
    }

    pub fn surface(&self) -> Option<&S> {
        match &self.state {
            State::Live { surface, .. } => Some(surface),
            _ => None,
        }
    }
}
