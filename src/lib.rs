use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

pub mod canvas;
pub mod engine;
pub mod error;
pub mod render;
pub mod sim;
pub mod tier;

use canvas::CanvasSurface;
use engine::Engine;
use error::MountError;

// ============================================================================
// PARTICLE BACKGROUND - Ambient particle field behind the page
// ============================================================================

/// Handle owned by the page. Dropping it (or `free()` from JS) unmounts.
#[wasm_bindgen]
pub struct ParticleBackground {
    host: Option<Rc<Host>>,
}

#[wasm_bindgen]
impl ParticleBackground {
    /// Mount on `<canvas id=canvas_id>`. When the canvas or its 2D
    /// context is missing the handle is inert and nothing is drawn.
    #[wasm_bindgen(constructor)]
    pub fn mount(canvas_id: &str) -> ParticleBackground {
        console_error_panic_hook::set_once();
        Self { host: Host::mount(canvas_id).ok() }
    }

    /// Cancel the pending frame and stop listening for resizes
    pub fn unmount(&mut self) {
        if let Some(host) = self.host.take() {
            host.teardown();
        }
    }

    pub fn is_live(&self) -> bool {
        self.host.as_ref().is_some_and(|h| h.engine.borrow().is_live())
    }

    pub fn particle_count(&self) -> usize {
        self.with_field(|f| f.len()).unwrap_or(0)
    }

    pub fn width(&self) -> f64 {
        self.with_field(|f| f.width()).unwrap_or(0.0)
    }

    pub fn height(&self) -> f64 {
        self.with_field(|f| f.height()).unwrap_or(0.0)
    }
}

impl ParticleBackground {
    fn with_field<T>(&self, f: impl FnOnce(&sim::ParticleField) -> T) -> Option<T> {
        let host = self.host.as_ref()?;
        let engine = host.engine.borrow();
        engine.field().map(f)
    }
}

impl Drop for ParticleBackground {
    fn drop(&mut self) {
        self.unmount();
    }
}

// ============================================================================
// Browser glue
// ============================================================================

struct Host {
    window: Window,
    engine: RefCell<Engine<CanvasSurface>>,

    // requestAnimationFrame id of the next frame, if one is queued
    pending: Cell<Option<i32>>,

    tick: RefCell<Option<Closure<dyn FnMut()>>>,
    on_resize: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl Host {
    fn mount(canvas_id: &str) -> Result<Rc<Self>, MountError> {
        let window = web_sys::window().ok_or(MountError::NoWindow)?;
        let surface = canvas::acquire(&window, canvas_id)?;

        // Stays inert until the listener is in place, so a failed mount
        // leaves nothing drawn
        let host = Rc::new(Self {
            window,
            engine: RefCell::new(Engine::mount(None, 0.0, 0.0)),
            pending: Cell::new(None),
            tick: RefCell::new(None),
            on_resize: RefCell::new(None),
        });

        // Closures hold weak refs so the handle alone keeps the host alive
        let weak = Rc::downgrade(&host);
        let tick = Closure::<dyn FnMut()>::new(move || {
            if let Some(host) = weak.upgrade() {
                host.run_frame();
            }
        });
        *host.tick.borrow_mut() = Some(tick);

        let weak = Rc::downgrade(&host);
        let on_resize = Closure::<dyn FnMut()>::new(move || {
            if let Some(host) = weak.upgrade() {
                host.resize();
            }
        });
        host.window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        *host.on_resize.borrow_mut() = Some(on_resize);

        // Sizes the canvas and draws the first frame
        let (w, h) = canvas::viewport(&host.window);
        *host.engine.borrow_mut() = Engine::mount(Some(surface), w, h);

        host.schedule();
        Ok(host)
    }

    fn schedule(&self) {
        let tick = self.tick.borrow();
        let Some(cb) = tick.as_ref() else { return };
        if let Ok(id) = self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            self.pending.set(Some(id));
        }
    }

    fn run_frame(&self) {
        self.pending.set(None);
        let ran = self.engine.borrow_mut().frame();
        if ran {
            self.schedule();
        }
    }

    fn resize(&self) {
        let (w, h) = canvas::viewport(&self.window);
        self.engine.borrow_mut().resize(w, h);
    }

    fn teardown(&self) {
        if let Some(id) = self.pending.take() {
            let _ = self.window.cancel_animation_frame(id);
            log::trace!("cancelled animation frame {id}");
        }
        if let Some(cb) = self.on_resize.borrow_mut().take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
        }
        self.tick.borrow_mut().take();
        self.engine.borrow_mut().teardown();
    }
}
