//! Browser glue: canvas surface, score element, keyboard / touch / click
//! listeners and the `requestAnimationFrame` loop. Holds no game rules.

use std::cell::RefCell;
use std::rc::Rc;

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, window};

use crate::config::{BACKGROUND, GameConfig, PALETTE};
use crate::error::WebError;
use crate::game::{DropOutcome, Game};
use crate::input::Command;
use crate::piece::Cell;
use crate::render::{Surface, render_frame, score_text};

// --- Console logging ----------------------------------------------------------

struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&msg),
            Level::Warn => web_sys::console::warn_1(&msg),
            Level::Info => web_sys::console::info_1(&msg),
            Level::Debug => web_sys::console::log_1(&msg),
            Level::Trace => web_sys::console::debug_1(&msg),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Routes `log` records to the browser console. Safe to call more than once.
pub fn init_logging(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

// --- Canvas surface -----------------------------------------------------------

struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    score_el: Element,
    scale: f64,
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.set_fill_style(&JsValue::from_str(BACKGROUND));
        self.ctx.fill_rect(
            0.0,
            0.0,
            self.canvas.width() as f64 / self.scale,
            self.canvas.height() as f64 / self.scale,
        );
    }

    fn fill_cell(&mut self, x: i32, y: i32, value: Cell) {
        let color = PALETTE.get(value as usize).copied().unwrap_or(PALETTE[0]);
        let (fx, fy) = (x as f64, y as f64);
        let grad = self.ctx.create_linear_gradient(fx, fy, fx + 1.0, fy + 1.0);
        grad.add_color_stop(0.0, color).ok();
        grad.add_color_stop(1.0, "#000000").ok();
        self.ctx.set_fill_style(&grad);
        self.ctx.set_shadow_color("rgba(0,255,255,0.7)");
        self.ctx.set_shadow_blur(10.0);
        self.ctx.fill_rect(fx, fy, 1.0, 1.0);
        self.ctx.set_shadow_blur(0.0);
        self.ctx.set_stroke_style(&JsValue::from_str("#222222cc"));
        self.ctx.set_line_width(0.1);
        self.ctx.stroke_rect(fx, fy, 1.0, 1.0);
    }

    fn show_score(&mut self, score: u32) {
        self.score_el.set_text_content(Some(&score_text(score)));
    }
}

struct WebState {
    game: Game,
    surface: CanvasSurface,
}

impl WebState {
    fn command(&mut self, cmd: Command) {
        if let Some(outcome) = self.game.apply(cmd) {
            self.after_drop(outcome);
        }
    }

    fn after_drop(&mut self, outcome: DropOutcome) {
        if outcome.score_changed() {
            self.surface.show_score(self.game.score());
        }
    }

    fn frame(&mut self, ts: f64) {
        if let Some(outcome) = self.game.update(ts) {
            self.after_drop(outcome);
        }
        render_frame(&self.game, &mut self.surface);
    }
}

thread_local! {
    static GAME_STATE: RefCell<Option<WebState>> = const { RefCell::new(None) };
}

fn with_state(f: impl FnOnce(&mut WebState)) {
    GAME_STATE.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            f(state);
        }
    });
}

// --- Entry ----------------------------------------------------------------------

pub fn start(config: GameConfig) -> Result<(), JsValue> {
    let win = window().ok_or(WebError::NoWindow)?;
    let doc = win.document().ok_or(WebError::NoDocument)?;

    let game = Game::new(config).map_err(WebError::from)?;
    let config = game.config().clone();

    let canvas = mount_canvas(&doc, &config)?;
    let ctx: CanvasRenderingContext2d =
        canvas.get_context("2d")?.ok_or(WebError::NoContext)?.dyn_into()?;
    ctx.scale(config.cell_scale, config.cell_scale)?;

    let score_el = mount_score(&doc, &config)?;
    let mut surface = CanvasSurface { canvas, ctx, score_el, scale: config.cell_scale };
    surface.show_score(game.score());

    GAME_STATE.with(|cell| cell.replace(Some(WebState { game, surface })));

    bind_keyboard(&doc)?;
    bind_buttons(&doc)?;
    start_loop();
    log::info!("game started on a {}x{} arena", config.width, config.height);
    Ok(())
}

fn mount_canvas(doc: &Document, config: &GameConfig) -> Result<HtmlCanvasElement, JsValue> {
    let (w, h) = config.canvas_size();
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(&config.canvas_id) {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id(&config.canvas_id);
        doc.body().ok_or(WebError::NoBody)?.append_child(&c)?;
        c
    };
    canvas.set_width(w);
    canvas.set_height(h);
    Ok(canvas)
}

fn mount_score(doc: &Document, config: &GameConfig) -> Result<Element, JsValue> {
    if let Some(el) = doc.get_element_by_id(&config.score_id) {
        return Ok(el);
    }
    let div = doc.create_element("div")?;
    div.set_id(&config.score_id);
    div.set_attribute("style", "font-family:'Fira Code', monospace; font-size:18px; color:#fff;")
        .ok();
    doc.body().ok_or(WebError::NoBody)?.append_child(&div)?;
    Ok(div)
}

fn bind_keyboard(doc: &Document) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        if let Some(cmd) = Command::from_key(&evt.key()) {
            with_state(|state| state.command(cmd));
        }
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

// Buttons are optional; pages without touch controls simply skip them.
fn bind_buttons(doc: &Document) -> Result<(), JsValue> {
    for (id, cmd) in Command::BUTTONS {
        let Some(el) = doc.get_element_by_id(id) else {
            continue;
        };
        let touch = Closure::wrap(Box::new(move |evt: web_sys::TouchEvent| {
            with_state(|state| state.command(cmd));
            evt.prevent_default();
        }) as Box<dyn FnMut(_)>);
        el.add_event_listener_with_callback("touchstart", touch.as_ref().unchecked_ref())?;
        touch.forget();

        let click = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            with_state(|state| state.command(cmd));
        }) as Box<dyn FnMut(_)>);
        el.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
        click.forget();
    }
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_frame(win: &web_sys::Window, f: &FrameCallback) {
    if let Some(cb) = f.borrow().as_ref() {
        let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

fn start_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        with_state(|state| state.frame(ts));
        if let Some(w) = window() {
            request_frame(&w, &f);
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        request_frame(&w, &g);
    }
}
