//! Browser wiring: form submit -> fetch -> board -> clicks -> completion.
//!
//! All page state lives in `APP_STATE` (one per page, single-threaded). Every
//! game decision is delegated to [`GameSession`]; this module only reads the
//! DOM, feeds clicks in and mirrors outcomes back out.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Event, HtmlButtonElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    MouseEvent, window,
};

use crate::config::AppConfig;
use crate::fetch::fetch_pairs;
use crate::game::gate::{SessionGate, Ticket};
use crate::game::timer::{Stopwatch, format_time};
use crate::game::{ClickInput, ClickOutcome, GameSession, completion_message};
use crate::pairs::{PairRequest, WordPair};

mod render;

struct AppState {
    config: AppConfig,
    gate: SessionGate,
    board: Option<BoardState>,
}

/// A rendered session plus the JS callbacks keeping it alive. Dropping the
/// board clears its interval and releases the click closures.
struct BoardState {
    session: GameSession,
    stopwatch: Stopwatch,
    auto_refresh: bool,
    timer_handle: Option<i32>,
    _tick: Option<Closure<dyn FnMut()>>,
    _clicks: Vec<Closure<dyn FnMut(MouseEvent)>>,
}

impl BoardState {
    fn stop_timer(&mut self) {
        if let Some(handle) = self.timer_handle.take() {
            if let Some(w) = window() {
                w.clear_interval_with_handle(handle);
            }
        }
    }
}

impl Drop for BoardState {
    fn drop(&mut self) {
        self.stop_timer();
    }
}

thread_local! {
    static APP_STATE: RefCell<Option<AppState>> = RefCell::new(None);
}

fn document() -> Result<Document, JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    win.document().ok_or_else(|| JsValue::from_str("no document"))
}

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Hook the game up to the configured form. Calling it again is a no-op.
pub fn start_app(config: AppConfig) -> Result<(), JsValue> {
    let already = APP_STATE.with(|cell| cell.borrow().is_some());
    if already {
        log::warn!("word match already started");
        return Ok(());
    }

    let doc = document()?;
    let form: HtmlFormElement = doc
        .get_element_by_id(config.form_id)
        .ok_or_else(|| JsValue::from_str("no language pair form"))?
        .dyn_into()?;

    APP_STATE.with(|cell| {
        cell.replace(Some(AppState { config, gate: SessionGate::new(), board: None }))
    });

    let closure = Closure::wrap(Box::new(move |evt: Event| {
        evt.prevent_default();
        if let Err(e) = on_submit() {
            log::error!("submit failed: {e:?}");
        }
    }) as Box<dyn FnMut(_)>);
    form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
    closure.forget();

    log::info!("word match ready");
    Ok(())
}

fn field_value(doc: &Document, id: &str) -> Result<String, JsValue> {
    let el = doc
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?;
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        return Ok(input.value());
    }
    if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        return Ok(select.value());
    }
    Err(JsValue::from_str(&format!("#{id} is not a form field")))
}

fn on_submit() -> Result<(), JsValue> {
    let begun = APP_STATE.with(|cell| {
        cell.borrow_mut()
            .as_mut()
            .map(|app| (app.config.clone(), app.gate.try_begin()))
    });
    let Some((config, ticket)) = begun else {
        return Err(JsValue::from_str("app not started"));
    };
    let Some(ticket) = ticket else {
        log::warn!("pair request already in flight; ignoring submit");
        return Ok(());
    };

    let doc = document()?;
    let req = match read_request(&doc, &config) {
        Ok(req) => req,
        Err(e) => {
            release(ticket);
            return Err(e);
        }
    };

    let generation = ticket.generation();
    spawn_local(async move {
        let result = fetch_pairs(&config.endpoint, &req).await;
        release(ticket);
        let shown = match result {
            Ok(pairs) => init_game(&config, &req, pairs),
            Err(e) => {
                log::error!("pair request #{generation} failed: {e}");
                show_failure(&config, e.user_message())
            }
        };
        if let Err(e) = shown {
            log::error!("could not update the board: {e:?}");
        }
    });
    Ok(())
}

fn read_request(doc: &Document, config: &AppConfig) -> Result<PairRequest, JsValue> {
    Ok(PairRequest::new(
        field_value(doc, config.l1_input_id)?,
        field_value(doc, config.l2_input_id)?,
        &field_value(doc, config.count_input_id)?,
        field_value(doc, config.level_input_id)?,
    ))
}

fn release(ticket: Ticket) {
    APP_STATE.with(|cell| {
        if let Some(app) = cell.borrow_mut().as_mut() {
            app.gate.finish(ticket);
        }
    });
}

/// Drop the current board, if any.
fn clear_board() {
    let old = APP_STATE.with(|cell| cell.borrow_mut().as_mut().and_then(|app| app.board.take()));
    drop(old);
}

fn show_failure(config: &AppConfig, message: &str) -> Result<(), JsValue> {
    clear_board();
    render::render_failure(&document()?, config, message)
}

fn init_game(config: &AppConfig, req: &PairRequest, pairs: Vec<WordPair>) -> Result<(), JsValue> {
    let doc = document()?;
    clear_board();

    // Read once per session; toggling mid-game affects the next one.
    let auto_refresh = doc
        .get_element_by_id(config.auto_refresh_id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.checked())
        .unwrap_or(false);

    let session = GameSession::new(pairs);
    let buttons = render::render_board(&doc, config, &session, &req.l1_language, &req.l2_language)?;
    let stopwatch = Stopwatch::start(now_ms());
    let (timer_handle, tick) = start_timer(&doc, config)?;
    let clicks = attach_button_handlers(&buttons)?;
    let already_complete = session.is_complete();

    log::info!(
        "session started: {} pairs ({} / {}), auto-refresh {}",
        session.total_pairs(),
        req.l1_language,
        req.l2_language,
        if auto_refresh { "on" } else { "off" }
    );

    APP_STATE.with(|cell| {
        if let Some(app) = cell.borrow_mut().as_mut() {
            app.board = Some(BoardState {
                session,
                stopwatch,
                auto_refresh,
                timer_handle,
                _tick: tick,
                _clicks: clicks,
            });
        }
    });

    // An empty pair list has nothing left to match.
    if already_complete {
        finish_session(&doc, config)?;
    }
    Ok(())
}

type Tick = Option<Closure<dyn FnMut()>>;

fn start_timer(doc: &Document, config: &AppConfig) -> Result<(Option<i32>, Tick), JsValue> {
    let Some(timer_el) = doc.get_element_by_id(config.timer_id) else {
        log::error!("Timer element not found in the DOM.");
        return Ok((None, None));
    };
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;

    let closure = Closure::wrap(Box::new(move || {
        let elapsed = APP_STATE.with(|cell| {
            cell.borrow()
                .as_ref()
                .and_then(|app| app.board.as_ref())
                .map(|board| board.stopwatch.elapsed_secs(now_ms()))
        });
        if let Some(secs) = elapsed {
            timer_el.set_text_content(Some(&format!("Time: {}", format_time(secs))));
        }
    }) as Box<dyn FnMut()>);
    let handle = win.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        config.tick_ms,
    )?;
    Ok((Some(handle), Some(closure)))
}

fn attach_button_handlers(
    buttons: &[HtmlButtonElement],
) -> Result<Vec<Closure<dyn FnMut(MouseEvent)>>, JsValue> {
    let mut closures = Vec::with_capacity(buttons.len());
    for button in buttons {
        let target = button.clone();
        let closure = Closure::wrap(Box::new(move |_evt: MouseEvent| {
            let Some(input) = render::click_input(&target) else {
                log::warn!("button #{} carries no game data", target.id());
                return;
            };
            if let Err(e) = on_click(input) {
                log::error!("click handling failed: {e:?}");
            }
        }) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closures.push(closure);
    }
    Ok(closures)
}

fn on_click(input: ClickInput) -> Result<(), JsValue> {
    let step = APP_STATE.with(|cell| {
        let mut guard = cell.borrow_mut();
        let app = guard.as_mut()?;
        let board = app.board.as_mut()?;
        let outcome = board.session.handle_click(input);
        Some((app.config.clone(), outcome))
    });
    let Some((config, outcome)) = step else {
        return Ok(());
    };
    log::debug!("click -> {outcome:?}");

    let doc = document()?;
    render::apply_outcome(&doc, &config, &outcome)?;
    if let ClickOutcome::Completed { .. } = outcome {
        finish_session(&doc, &config)?;
    }
    Ok(())
}

/// Stop the clock (once), announce the time and queue the auto-refresh.
fn finish_session(doc: &Document, config: &AppConfig) -> Result<(), JsValue> {
    let finished = APP_STATE.with(|cell| {
        let mut guard = cell.borrow_mut();
        let board = guard.as_mut()?.board.as_mut()?;
        let now = now_ms();
        if !board.stopwatch.stop(now) {
            return None;
        }
        board.stop_timer();
        Some((board.stopwatch.elapsed_secs(now), board.session.restarts_on_completion(board.auto_refresh)))
    });
    let Some((secs, restart)) = finished else {
        return Ok(());
    };

    log::info!("all pairs matched in {}", format_time(secs));
    render::display_message(doc, config, &completion_message(secs))?;
    if restart {
        schedule_resubmit(config)?;
    }
    Ok(())
}

/// Re-dispatch `submit` on the form after the refresh delay, starting a new
/// fetch with whatever the form holds at that moment.
fn schedule_resubmit(config: &AppConfig) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let form_id = config.form_id;
    let callback = Closure::once_into_js(move || {
        let form = window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(form_id));
        let Some(form) = form else {
            log::warn!("form #{form_id} vanished before auto-refresh");
            return;
        };
        match Event::new("submit") {
            Ok(evt) => {
                if let Err(e) = form.dispatch_event(&evt) {
                    log::error!("auto-refresh dispatch failed: {e:?}");
                }
            }
            Err(e) => log::error!("could not build submit event: {e:?}"),
        }
    });
    win.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        config.refresh_delay_ms,
    )?;
    Ok(())
}
