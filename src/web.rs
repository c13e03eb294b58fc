//! Browser glue: the DOM rendering surface, the duck-typed engine binding,
//! pointer event wiring and the mount/unmount lifecycle.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::{Promise, Reflect};
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlImageElement, MouseEvent, TouchEvent,
    Window,
};

use crate::controller::BoardController;
use crate::engine::{Engine, Piece, PieceCode};
use crate::geometry::{Orientation, PointerPos, Square, SquareGrid};
use crate::turn::Submission;
use crate::view::{sprite_index, BoardView, SPRITE_KEYS};

/// Milliseconds between the human move rendering and the automated reply.
/// Pure UI pacing, the engine itself answers synchronously.
const REPLY_DELAY_MS: i32 = 250;

const LIGHT: &str = "#eeeeee";
const DARK: &str = "#915355";
const HIGHLIGHT: &str = "#a33c2c";

/* ---------- Engine binding ---------- */

#[wasm_bindgen]
extern "C" {
    /// The engine as the host page hands it over: any JS object carrying the
    /// four wire methods, duck-typed so no particular class is required.
    pub type JsEngine;

    #[wasm_bindgen(method, structural, js_name = try_move)]
    fn js_try_move(this: &JsEngine, from_x: i32, from_y: i32, to_x: i32, to_y: i32) -> bool;

    #[wasm_bindgen(method, structural, js_name = make_ai_move)]
    fn js_make_ai_move(this: &JsEngine);

    #[wasm_bindgen(method, structural, js_name = refresh_player_moves)]
    fn js_refresh_player_moves(this: &JsEngine);

    #[wasm_bindgen(method, structural, js_name = get_piece)]
    fn js_get_piece(this: &JsEngine, x: i32, y: i32) -> i32;
}

impl Engine for JsEngine {
    fn try_move(&mut self, from_x: u8, from_y: u8, to_x: u8, to_y: u8) -> bool {
        self.js_try_move(from_x as i32, from_y as i32, to_x as i32, to_y as i32)
    }

    fn make_ai_move(&mut self) {
        self.js_make_ai_move();
    }

    fn refresh_player_moves(&mut self) {
        self.js_refresh_player_moves();
    }

    fn get_piece(&self, x: u8, y: u8) -> PieceCode {
        self.js_get_piece(x as i32, y as i32)
    }
}

/* ---------- Errors ---------- */

/// Problems establishing the board in the page.
#[derive(Debug, Error)]
pub enum MountError {
    #[error("no window or document available")]
    NoDocument,
    #[error("no element with id `{0}` in the document")]
    MissingContainer(String),
    #[error("element `{0}` is not an html element")]
    NotAnElement(String),
    #[error("sprite url `{0}` missing from the sprite map")]
    MissingSprite(&'static str),
    #[error("browser call failed: {0}")]
    Dom(String),
}

impl From<MountError> for JsValue {
    fn from(e: MountError) -> JsValue {
        js_sys::Error::new(&e.to_string()).into()
    }
}

fn js_err(e: JsValue) -> MountError {
    MountError::Dom(format!("{e:?}"))
}

/* ---------- Sprites ---------- */

/// Urls of the twelve piece sprites, indexed parallel to [`SPRITE_KEYS`].
struct SpriteUrls([String; 12]);

impl SpriteUrls {
    /// Reads `{ pw: url, …, kb: url }` from the host page. Every key must be
    /// present and non-empty.
    fn from_js(map: &JsValue) -> Result<Self, MountError> {
        let mut urls: [String; 12] = std::array::from_fn(|_| String::new());
        for (i, key) in SPRITE_KEYS.iter().enumerate() {
            urls[i] = Reflect::get(map, &JsValue::from_str(key))
                .ok()
                .and_then(|v| v.as_string())
                .filter(|s| !s.is_empty())
                .ok_or(MountError::MissingSprite(key))?;
        }
        Ok(SpriteUrls(urls))
    }

    fn url(&self, piece: Piece) -> &str {
        &self.0[sprite_index(piece)]
    }
}

/* ---------- DOM view ---------- */

fn base_color(sq: Square) -> &'static str {
    if (sq.row + sq.col) % 2 == 0 {
        LIGHT
    } else {
        DARK
    }
}

/// The live rendering surface: eight rank rows of square cells, one sprite
/// image per cell, plus one absolutely positioned image that floats under
/// the pointer during a drag. Everything it creates is removed on drop.
struct DomBoardView {
    container: HtmlElement,
    created: Vec<Element>,
    cells: Vec<HtmlElement>,
    imgs: Vec<HtmlImageElement>,
    float: HtmlImageElement,
    sprites: SpriteUrls,
    square_len: f64,
}

impl DomBoardView {
    fn build(
        document: &Document,
        container: HtmlElement,
        sprites: SpriteUrls,
        square_len: f64,
    ) -> Result<Self, MountError> {
        let len_px = format!("{}px", square_len);
        // The float is positioned in board-local coordinates.
        let _ = container.style().set_property("position", "relative");

        let mut created = Vec::with_capacity(9);
        let mut cells = Vec::with_capacity(64);
        let mut imgs = Vec::with_capacity(64);
        for row in 0..8u8 {
            let row_el = document.create_element("div").map_err(js_err)?;
            let row_style = row_el
                .dyn_ref::<HtmlElement>()
                .map(|el| el.style())
                .ok_or_else(|| MountError::Dom("div is not an html element".into()))?;
            // Keep each rank exactly one square tall.
            let _ = row_style.set_property("height", &len_px);
            let _ = row_style.set_property("line-height", "0");
            for col in 0..8u8 {
                let cell: HtmlElement = document
                    .create_element("span")
                    .map_err(js_err)?
                    .dyn_into()
                    .map_err(|_| MountError::Dom("span is not an html element".into()))?;
                let style = cell.style();
                let _ = style.set_property("display", "inline-block");
                let _ = style.set_property("width", &len_px);
                let _ = style.set_property("height", &len_px);
                let _ = style.set_property("background-color", base_color(Square::new(row, col)));
                let img: HtmlImageElement = document
                    .create_element("img")
                    .map_err(js_err)?
                    .dyn_into()
                    .map_err(|_| MountError::Dom("img is not an image element".into()))?;
                img.set_width(square_len as u32);
                img.set_height(square_len as u32);
                let _ = img.style().set_property("visibility", "hidden");
                cell.append_child(&img).map_err(js_err)?;
                row_el.append_child(&cell).map_err(js_err)?;
                cells.push(cell);
                imgs.push(img);
            }
            container.append_child(&row_el).map_err(js_err)?;
            created.push(row_el);
        }

        let float: HtmlImageElement = document
            .create_element("img")
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| MountError::Dom("img is not an image element".into()))?;
        float.set_width(square_len as u32);
        float.set_height(square_len as u32);
        let float_style = float.style();
        let _ = float_style.set_property("position", "absolute");
        let _ = float_style.set_property("visibility", "hidden");
        container.append_child(&float).map_err(js_err)?;
        created.push(float.clone().into());

        Ok(DomBoardView {
            container,
            created,
            cells,
            imgs,
            float,
            sprites,
            square_len,
        })
    }

    /// Live on-page origin of the board; layout may have shifted since
    /// mount, so this is read per event.
    fn origin(&self) -> (f64, f64) {
        let rect = self.container.get_bounding_client_rect();
        (rect.left(), rect.top())
    }

    fn place_float(&self, at: PointerPos) {
        let style = self.float.style();
        let half = self.square_len / 2.0;
        let _ = style.set_property("left", &format!("{}px", at.x - half));
        let _ = style.set_property("top", &format!("{}px", at.y - half));
    }
}

impl BoardView for DomBoardView {
    fn set_piece(&mut self, sq: Square, piece: Option<Piece>) {
        let img = &self.imgs[sq.index()];
        match piece {
            Some(piece) => {
                img.set_src(self.sprites.url(piece));
                let _ = img.style().set_property("visibility", "visible");
            }
            None => {
                let _ = img.style().set_property("visibility", "hidden");
            }
        }
    }

    fn set_veiled(&mut self, sq: Square, veiled: bool) {
        let value = if veiled { "hidden" } else { "visible" };
        let _ = self.imgs[sq.index()].style().set_property("visibility", value);
    }

    fn set_highlight(&mut self, sq: Square, on: bool) {
        let color = if on { HIGHLIGHT } else { base_color(sq) };
        let _ = self.cells[sq.index()]
            .style()
            .set_property("background-color", color);
    }

    fn begin_float(&mut self, piece: Piece, at: PointerPos) {
        self.float.set_src(self.sprites.url(piece));
        self.place_float(at);
        let _ = self.float.style().set_property("visibility", "visible");
    }

    fn move_float(&mut self, at: PointerPos) {
        self.place_float(at);
    }

    fn end_float(&mut self) {
        let _ = self.float.style().set_property("visibility", "hidden");
    }
}

impl Drop for DomBoardView {
    fn drop(&mut self) {
        for el in &self.created {
            el.remove();
        }
    }
}

/* ---------- Event wiring ---------- */

struct App {
    controller: BoardController<JsEngine, DomBoardView>,
}

impl App {
    /// Board-local position of a client-coordinate event.
    fn local(&self, client_x: i32, client_y: i32) -> PointerPos {
        let (left, top) = self.controller.view().origin();
        PointerPos {
            x: client_x as f64 - left,
            y: client_y as f64 - top,
        }
    }
}

/// One registered DOM listener; unregisters itself on drop.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        f: impl FnMut(Event) + 'static,
    ) -> Result<Self, MountError> {
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .map_err(js_err)?;
        Ok(Listener {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

fn wire_events(
    app: &Rc<RefCell<App>>,
    target: &EventTarget,
) -> Result<Vec<Listener>, MountError> {
    let mut listeners = Vec::with_capacity(7);

    {
        let app = Rc::clone(app);
        listeners.push(Listener::attach(target, "mousedown", move |e| {
            e.prevent_default();
            let Some(ev) = e.dyn_ref::<MouseEvent>() else { return };
            let mut state = app.borrow_mut();
            let at = state.local(ev.client_x(), ev.client_y());
            state.controller.press(at);
        })?);
    }

    {
        let app = Rc::clone(app);
        listeners.push(Listener::attach(target, "mousemove", move |e| {
            e.prevent_default();
            let Some(ev) = e.dyn_ref::<MouseEvent>() else { return };
            let mut state = app.borrow_mut();
            let at = state.local(ev.client_x(), ev.client_y());
            state.controller.motion(at);
        })?);
    }

    {
        let app = Rc::clone(app);
        listeners.push(Listener::attach(target, "mouseup", move |e| {
            e.prevent_default();
            let Some(ev) = e.dyn_ref::<MouseEvent>() else { return };
            let applied = {
                let mut state = app.borrow_mut();
                let at = state.local(ev.client_x(), ev.client_y());
                state.controller.release(Some(at)) == Submission::Applied
            };
            if applied {
                schedule_reply(Rc::downgrade(&app));
            }
        })?);
    }

    {
        let app = Rc::clone(app);
        listeners.push(Listener::attach(target, "touchstart", move |e| {
            let Some(ev) = e.dyn_ref::<TouchEvent>() else { return };
            // Single-finger gestures only; a second finger never starts a drag.
            if ev.touches().length() != 1 {
                return;
            }
            let Some(touch) = ev.touches().item(0) else { return };
            let mut state = app.borrow_mut();
            let at = state.local(touch.client_x(), touch.client_y());
            state.controller.press(at);
        })?);
    }

    {
        let app = Rc::clone(app);
        listeners.push(Listener::attach(target, "touchmove", move |e| {
            let Some(ev) = e.dyn_ref::<TouchEvent>() else { return };
            if ev.touches().length() != 1 {
                return;
            }
            // Keep the page from scrolling under a live drag.
            e.prevent_default();
            let Some(touch) = ev.touches().item(0) else { return };
            let mut state = app.borrow_mut();
            let at = state.local(touch.client_x(), touch.client_y());
            state.controller.motion(at);
        })?);
    }

    {
        let app = Rc::clone(app);
        listeners.push(Listener::attach(target, "touchend", move |e| {
            let Some(ev) = e.dyn_ref::<TouchEvent>() else { return };
            let applied = {
                let mut state = app.borrow_mut();
                // Only the clean ending of a one-finger gesture drops on a
                // square; anything else reverts the drag.
                let at = if ev.touches().length() == 0 && ev.changed_touches().length() == 1 {
                    ev.changed_touches()
                        .item(0)
                        .map(|t| state.local(t.client_x(), t.client_y()))
                } else {
                    None
                };
                state.controller.release(at) == Submission::Applied
            };
            if applied {
                schedule_reply(Rc::downgrade(&app));
            }
        })?);
    }

    {
        let app = Rc::clone(app);
        listeners.push(Listener::attach(target, "touchcancel", move |_e| {
            let _ = app.borrow_mut().controller.release(None);
        })?);
    }

    Ok(listeners)
}

/* ---------- Turn pacing ---------- */

/// `setTimeout` wrapped as a future on the page event loop.
async fn sleep(ms: i32) {
    let promise = Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    let _ = JsFuture::from(promise).await;
}

/// Runs the reply half of the turn after the pacing delay. Holds only a weak
/// handle: a board unmounted while the delay is pending drops the reply
/// instead of mutating a dismissed view.
fn schedule_reply(app: Weak<RefCell<App>>) {
    spawn_local(async move {
        sleep(REPLY_DELAY_MS).await;
        if let Some(app) = app.upgrade() {
            app.borrow_mut().controller.complete_reply();
        }
    });
}

/* ---------- Mount lifecycle ---------- */

fn init_page_logging() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // A second mount on the same page finds the logger already installed.
    #[cfg(target_arch = "wasm32")]
    let _ = console_log::init_with_level(log::Level::Debug);
}

/// The deployed sizing rule: 90% of the smaller viewport edge split eight
/// ways, floored to whole pixels.
fn default_square_len(window: &Window) -> f64 {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(512.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(512.0);
    (0.9 * w.min(h) / 8.0).floor().max(1.0)
}

/// Owner of a mounted board: every DOM node and event listener the mount
/// created lives exactly as long as this handle.
#[wasm_bindgen]
pub struct BoardHandle {
    app: Rc<RefCell<App>>,
    _listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl BoardHandle {
    /// Detaches the listeners and removes the board's DOM. A reply still
    /// pending at this point is dropped when its timer fires.
    pub fn unmount(self) {
        log::info!("board unmounted");
    }

    /// Repaints every square from engine ground truth.
    pub fn sync(&self) {
        self.app.borrow_mut().controller.sync();
    }

    /// Whether an automated reply is pending.
    pub fn locked(&self) -> bool {
        self.app.borrow().controller.locked()
    }
}

/// Mounts a board into the element `container_id`, wired to the supplied
/// engine. `sprites` maps the twelve sprite keys to image urls. `play_white`
/// fixes the human's color; left undefined, a coin flip decides. The
/// returned handle owns the board until [`BoardHandle::unmount`].
#[wasm_bindgen]
pub fn mount_board(
    engine: JsEngine,
    container_id: &str,
    sprites: &JsValue,
    play_white: Option<bool>,
) -> Result<BoardHandle, JsValue> {
    init_page_logging();

    let window = web_sys::window().ok_or(MountError::NoDocument)?;
    let document = window.document().ok_or(MountError::NoDocument)?;
    let container: HtmlElement = document
        .get_element_by_id(container_id)
        .ok_or_else(|| MountError::MissingContainer(container_id.to_string()))?
        .dyn_into()
        .map_err(|_| MountError::NotAnElement(container_id.to_string()))?;

    let sprites = SpriteUrls::from_js(sprites)?;
    let square_len = default_square_len(&window);
    let target: EventTarget = container.clone().into();
    let view = DomBoardView::build(&document, container, sprites, square_len)?;

    let orientation = match play_white {
        Some(true) => Orientation::White,
        Some(false) => Orientation::Black,
        None => {
            if js_sys::Math::random() > 0.5 {
                Orientation::White
            } else {
                Orientation::Black
            }
        }
    };
    log::info!(
        "board mounted in #{container_id}: human plays {:?}, square {square_len}px (build {} {})",
        orientation,
        env!("BUILD_GIT_SHA"),
        env!("BUILD_TS_UNIX"),
    );

    let controller = BoardController::new(engine, view, orientation, SquareGrid::new(square_len));
    let app = Rc::new(RefCell::new(App { controller }));
    let listeners = wire_events(&app, &target)?;

    Ok(BoardHandle {
        app,
        _listeners: listeners,
    })
}
