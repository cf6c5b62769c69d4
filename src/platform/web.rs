//! Browser front-end (wasm32)

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, Window};

use crate::game::Game;
use crate::input::InputAdapter;
use crate::renderer::Surface;
use crate::scheduler::Scheduler;
use crate::settings::Settings;
use crate::sim::Color;

/// Canvas 2D context sized to the configured surface
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f32,
    height: f32,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement, width: f32, height: f32) -> Result<Self, JsValue> {
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx, width, height })
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width as f64, self.height as f64);
    }

    fn circle(&mut self, x: f32, y: f32, radius: f32, color: Color) {
        self.ctx.begin_path();
        self.ctx.set_fill_style_str(color.as_str());
        // Negative radii (none expected) are rejected by the canvas
        if let Err(e) = self.ctx.arc(x as f64, y as f64, radius.max(0.0) as f64, 0.0, std::f64::consts::TAU) {
            log::warn!("arc failed: {:?}", e);
            return;
        }
        self.ctx.fill();
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.ctx.begin_path();
        self.ctx.set_fill_style_str(color.as_str());
        self.ctx.rect(x as f64, y as f64, w as f64, h as f64);
        self.ctx.fill();
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
    }
}

/// Window keydown/keyup listeners feeding an [`InputAdapter`].
///
/// Dropping the listener removes both DOM listeners.
pub struct KeyboardListener {
    window: Window,
    on_down: Closure<dyn FnMut(KeyboardEvent)>,
    on_up: Closure<dyn FnMut(KeyboardEvent)>,
}

impl KeyboardListener {
    pub fn subscribe(window: &Window, input: InputAdapter) -> Result<Self, JsValue> {
        let down_input = input.clone();
        let on_down = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if down_input.key_down(&event.key()) {
                event.prevent_default();
            }
        });
        let on_up = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            input.key_up(&event.key());
        });

        window.add_event_listener_with_callback("keydown", on_down.as_ref().unchecked_ref())?;
        window.add_event_listener_with_callback("keyup", on_up.as_ref().unchecked_ref())?;

        Ok(Self {
            window: window.clone(),
            on_down,
            on_up,
        })
    }
}

impl Drop for KeyboardListener {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("keydown", self.on_down.as_ref().unchecked_ref());
        let _ = self
            .window
            .remove_event_listener_with_callback("keyup", self.on_up.as_ref().unchecked_ref());
    }
}

/// Scheduler backed by `setInterval` and `setTimeout`
pub struct IntervalScheduler {
    window: Window,
    on_tick: Option<Closure<dyn FnMut()>>,
    on_reset: Option<Closure<dyn FnMut()>>,
    interval: Option<i32>,
    timeout: Option<i32>,
}

impl IntervalScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            on_tick: None,
            on_reset: None,
            interval: None,
            timeout: None,
        }
    }

    /// Attach the callbacks. Done after construction since they point back at the game.
    pub fn bind(&mut self, on_tick: Closure<dyn FnMut()>, on_reset: Closure<dyn FnMut()>) {
        self.on_tick = Some(on_tick);
        self.on_reset = Some(on_reset);
    }
}

impl Scheduler for IntervalScheduler {
    fn start(&mut self, period: Duration) {
        self.stop();
        // A reset that already fired leaves a stale handle behind
        self.timeout = None;
        let Some(on_tick) = &self.on_tick else {
            log::warn!("scheduler started before callbacks were bound");
            return;
        };
        let millis = period.as_millis() as i32;
        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(on_tick.as_ref().unchecked_ref(), millis)
        {
            Ok(handle) => self.interval = Some(handle),
            Err(e) => log::error!("setInterval failed: {:?}", e),
        }
    }

    fn stop(&mut self) {
        if let Some(handle) = self.interval.take() {
            self.window.clear_interval_with_handle(handle);
        }
    }

    fn schedule_reset(&mut self, delay: Duration) {
        self.cancel_reset();
        let Some(on_reset) = &self.on_reset else {
            return;
        };
        let millis = delay.as_millis() as i32;
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(on_reset.as_ref().unchecked_ref(), millis)
        {
            Ok(handle) => self.timeout = Some(handle),
            Err(e) => log::error!("setTimeout failed: {:?}", e),
        }
    }

    fn cancel_reset(&mut self) {
        if let Some(handle) = self.timeout.take() {
            self.window.clear_timeout_with_handle(handle);
        }
    }
}

impl Drop for IntervalScheduler {
    fn drop(&mut self) {
        self.stop();
        self.cancel_reset();
    }
}

type WebGame = Game<IntervalScheduler, CanvasSurface>;

/// Everything that must stay alive while the page runs
struct WebApp {
    game: Rc<RefCell<WebGame>>,
    _keyboard: KeyboardListener,
}

thread_local! {
    static APP: RefCell<Option<WebApp>> = const { RefCell::new(None) };
}

/// Attach to the canvas with id `canvas_id` and start ticking
pub fn start(canvas_id: &str, settings: Settings) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str("canvas not found"))?
        .dyn_into::<HtmlCanvasElement>()?;

    let surface = CanvasSurface::new(&canvas, settings.width, settings.height)?;
    let input = InputAdapter::new();
    let keyboard = KeyboardListener::subscribe(&window, input.clone())?;
    let scheduler = IntervalScheduler::new(window);
    let game = Rc::new(RefCell::new(Game::new(settings, input, scheduler, surface)));

    let on_tick = {
        let game = Rc::downgrade(&game);
        Closure::<dyn FnMut()>::new(move || {
            if let Some(game) = game.upgrade() {
                game.borrow_mut().frame();
            }
        })
    };
    let on_reset = {
        let game = Rc::downgrade(&game);
        Closure::<dyn FnMut()>::new(move || {
            if let Some(game) = game.upgrade() {
                game.borrow_mut().reset();
            }
        })
    };
    game.borrow_mut().scheduler_mut().bind(on_tick, on_reset);
    game.borrow_mut().run();

    APP.with(|app| {
        *app.borrow_mut() = Some(WebApp {
            game,
            _keyboard: keyboard,
        });
    });
    log::info!("gravitron started on #{}", canvas_id);
    Ok(())
}

/// Stop ticking and detach the keyboard listeners
pub fn stop() {
    if let Some(app) = APP.with(|app| app.borrow_mut().take()) {
        app.game.borrow_mut().shutdown();
    }
}
