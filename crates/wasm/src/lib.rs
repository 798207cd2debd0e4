#![deny(unsafe_code)]
//! Browser host for the particle field.
//!
//! [`FieldAnimation`] sizes a canvas to the window, feeds `mousemove` into the
//! field's pointer, reseeds on `resize`, and ticks the driver once per
//! animation frame until [`FieldAnimation::stop`] is called.

mod canvas;
mod frames;
mod session;

use std::cell::RefCell;
use std::rc::Rc;

use particle_field_core::{Driver, Field, FieldConfig, Palette};
use wasm_bindgen::closure::WasmClosure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use canvas::CanvasSurface;
use frames::{AnimationFrames, FrameCallback};
use session::Session;

const DEFAULT_SEED: u64 = 42;

type CanvasSession = Session<AnimationFrames, CanvasSurface>;

/// An animated particle field bound to one canvas element.
///
/// Freeing it from JS tears it down the same way [`FieldAnimation::stop`]
/// does.
#[wasm_bindgen]
pub struct FieldAnimation {
    window: Window,
    session: Rc<RefCell<CanvasSession>>,
    frame: FrameCallback,
    on_mouse_move: Option<Closure<dyn FnMut(MouseEvent)>>,
    on_resize: Option<Closure<dyn FnMut()>>,
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn viewport(window: &Window) -> (f64, f64) {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (dim(window.inner_width()), dim(window.inner_height()))
}

/// Unregisters `callback`. If the browser refuses, the closure is leaked
/// rather than dropped, since it can still be invoked.
fn remove_listener<T: ?Sized + WasmClosure>(
    window: &Window,
    event: &str,
    callback: Closure<T>,
) -> Result<(), JsValue> {
    let result =
        window.remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
    if result.is_err() {
        callback.forget();
    }
    result
}

#[wasm_bindgen]
impl FieldAnimation {
    /// Binds to the canvas with id `canvas_id`.
    ///
    /// `palette` names a built-in palette (default `hero`); `seed` fixes the
    /// particle layout.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_id: &str,
        palette: Option<String>,
        seed: Option<u64>,
    ) -> Result<FieldAnimation, JsValue> {
        let window = web_sys::window().ok_or_else(|| to_js("no global window"))?;
        let document = window.document().ok_or_else(|| to_js("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| to_js(format!("no element with id {canvas_id:?}")))?
            .dyn_into()
            .map_err(|_| to_js(format!("element {canvas_id:?} is not a canvas")))?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| to_js("2d context unavailable"))?
            .dyn_into()?;

        let palette = match palette {
            Some(name) => Palette::from_name(&name).map_err(to_js)?,
            None => Palette::default(),
        };

        let (width, height) = viewport(&window);
        let surface = CanvasSurface::new(canvas, ctx);
        surface.set_size(width as u32, height as u32);

        let field = Field::with_seed(
            width,
            height,
            palette,
            FieldConfig::default(),
            seed.unwrap_or(DEFAULT_SEED),
        );
        let frame: FrameCallback = Rc::new(RefCell::new(None));
        let session = Session::new(
            Driver::new(field),
            surface,
            AnimationFrames::new(window.clone(), frame.clone()),
        );

        Ok(FieldAnimation {
            window,
            session: Rc::new(RefCell::new(session)),
            frame,
            on_mouse_move: None,
            on_resize: None,
        })
    }

    /// Installs the listeners and starts requesting frames.
    ///
    /// Fails once the animation has been stopped; build a new one instead.
    pub fn start(&mut self) -> Result<(), JsValue> {
        if !self.session.borrow().is_running() {
            return Err(to_js("animation was stopped; create a new FieldAnimation"));
        }
        if self.frame.borrow().is_some() {
            return Ok(());
        }

        let weak = Rc::downgrade(&self.session);
        *self.frame.borrow_mut() = Some(Closure::new(move || {
            session::run_frame(&weak);
        }));

        let session = self.session.clone();
        let on_mouse_move = Closure::<dyn FnMut(MouseEvent)>::new(move |e: MouseEvent| {
            session
                .borrow_mut()
                .driver_mut()
                .set_pointer(e.client_x() as f64, e.client_y() as f64);
        });
        self.window
            .add_event_listener_with_callback("mousemove", on_mouse_move.as_ref().unchecked_ref())?;
        self.on_mouse_move = Some(on_mouse_move);

        let session = self.session.clone();
        let window = self.window.clone();
        let on_resize = Closure::<dyn FnMut()>::new(move || {
            let (width, height) = viewport(&window);
            let mut s = session.borrow_mut();
            s.surface().set_size(width as u32, height as u32);
            s.driver_mut().resize(width, height);
        });
        self.window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        self.on_resize = Some(on_resize);

        self.session.borrow_mut().start();
        Ok(())
    }

    /// Cancels the pending frame and removes the listeners.
    ///
    /// The field keeps its last state; a stopped animation cannot restart.
    pub fn stop(&mut self) -> Result<(), JsValue> {
        self.teardown()
    }

    /// Switches to the named built-in palette, reseeding the field.
    pub fn set_palette(&mut self, name: &str) -> Result<(), JsValue> {
        let palette = Palette::from_name(name).map_err(to_js)?;
        self.session.borrow_mut().driver_mut().field_mut().set_palette(palette);
        Ok(())
    }

    pub fn particle_count(&self) -> usize {
        self.session.borrow().driver().field().len()
    }

    pub fn frames(&self) -> u64 {
        self.session.borrow().driver().frames()
    }
}

impl FieldAnimation {
    fn teardown(&mut self) -> Result<(), JsValue> {
        self.session.borrow_mut().shutdown();
        // Release the frame closure before anything below can fail.
        self.frame.borrow_mut().take();

        let mut result = Ok(());
        if let Some(cb) = self.on_mouse_move.take() {
            result = result.and(remove_listener(&self.window, "mousemove", cb));
        }
        if let Some(cb) = self.on_resize.take() {
            result = result.and(remove_listener(&self.window, "resize", cb));
        }
        result
    }
}

impl Drop for FieldAnimation {
    fn drop(&mut self) {
        let _ = self.teardown();
    }
}
