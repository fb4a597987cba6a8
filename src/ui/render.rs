// DOM construction and the mapping from click outcomes to classes / status text.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement};

use crate::config::AppConfig;
use crate::game::{ButtonId, ClickInput, ClickOutcome, GameSession, Side, StatusMessage};

const ACTIVE_CLASS: &str = "active";
const MATCHED_CLASS: &str = "matched";

fn by_id(doc: &Document, id: &str) -> Result<Element, JsValue> {
    doc.get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))
}

/// Replace the contents of the results container with two word columns, the
/// status line and the timer. Returns the buttons in render order.
pub(super) fn render_board(
    doc: &Document,
    config: &AppConfig,
    session: &GameSession,
    l1_label: &str,
    l2_label: &str,
) -> Result<Vec<HtmlButtonElement>, JsValue> {
    let results = by_id(doc, config.results_id)?;
    results.set_inner_html("");

    let columns = doc.create_element("div")?;
    columns.set_class_name("columns");
    let mut buttons = Vec::with_capacity(session.total_pairs() * 2);

    for (side, label) in [(Side::L1, l1_label), (Side::L2, l2_label)] {
        let column = doc.create_element("div")?;
        column.set_class_name("column");
        let heading = doc.create_element("h3")?;
        heading.set_text_content(Some(label));
        column.append_child(&heading)?;

        let group = doc.create_element("div")?;
        group.set_class_name("button-group");
        for (index, word) in session.column(side).iter().enumerate() {
            let button: HtmlButtonElement = doc.create_element("button")?.dyn_into()?;
            button.set_type("button");
            button.set_class_name("word-btn");
            button.set_id(&ButtonId::new(side, index).dom_id());
            button.set_attribute("data-side", side.as_str())?;
            button.set_attribute("data-word", word)?;
            // text content, not inner HTML: words come straight from the service
            button.set_text_content(Some(word));
            group.append_child(&button)?;
            buttons.push(button);
        }
        column.append_child(&group)?;
        columns.append_child(&column)?;
    }
    results.append_child(&columns)?;

    let status = doc.create_element("p")?;
    status.set_id(config.status_id);
    results.append_child(&status)?;

    let timer = doc.create_element("p")?;
    timer.set_id(config.timer_id);
    timer.set_text_content(Some("Time: 0:00"));
    results.append_child(&timer)?;

    Ok(buttons)
}

/// Clear the board and show only a status line with `message` in red.
pub(super) fn render_failure(doc: &Document, config: &AppConfig, message: &str) -> Result<(), JsValue> {
    let results = by_id(doc, config.results_id)?;
    results.set_inner_html("");
    let status = doc.create_element("p")?;
    status.set_id(config.status_id);
    results.append_child(&status)?;
    display_message(doc, config, &StatusMessage::error(message))
}

pub(super) fn display_message(doc: &Document, config: &AppConfig, msg: &StatusMessage) -> Result<(), JsValue> {
    let el: HtmlElement = by_id(doc, config.status_id)?.dyn_into()?;
    el.set_text_content(Some(&msg.text));
    el.style().set_property("color", msg.tone.color())
}

/// Recover the game input from a rendered button's id and data attributes.
pub(super) fn click_input(button: &HtmlButtonElement) -> Option<ClickInput> {
    let side = Side::parse(&button.get_attribute("data-side")?)?;
    let word = button.get_attribute("data-word")?;
    let element = ButtonId::parse(&button.id())?;
    if element.side != side {
        return None;
    }
    Some(ClickInput { side, word, element })
}

fn button(doc: &Document, id: ButtonId) -> Result<HtmlButtonElement, JsValue> {
    by_id(doc, &id.dom_id())?.dyn_into().map_err(JsValue::from)
}

fn set_active(doc: &Document, id: ButtonId, active: bool) -> Result<(), JsValue> {
    let classes = button(doc, id)?.class_list();
    if active {
        classes.add_1(ACTIVE_CLASS)
    } else {
        classes.remove_1(ACTIVE_CLASS)
    }
}

fn mark_matched(doc: &Document, id: ButtonId) -> Result<(), JsValue> {
    let btn = button(doc, id)?;
    btn.set_disabled(true);
    btn.class_list().remove_1(ACTIVE_CLASS)?;
    btn.class_list().add_1(MATCHED_CLASS)
}

/// Mirror `outcome` onto the page. `Completed` only marks the buttons; the
/// caller owns the completion message because it needs the stopwatch.
pub(super) fn apply_outcome(doc: &Document, config: &AppConfig, outcome: &ClickOutcome) -> Result<(), JsValue> {
    match *outcome {
        ClickOutcome::Selected { element } => set_active(doc, element, true)?,
        ClickOutcome::Switched { from, to } => {
            set_active(doc, from, false)?;
            set_active(doc, to, true)?;
        }
        ClickOutcome::Matched { first, second, .. } | ClickOutcome::Completed { first, second } => {
            mark_matched(doc, first)?;
            mark_matched(doc, second)?;
        }
        ClickOutcome::Mismatched { first, .. } => set_active(doc, first, false)?,
        ClickOutcome::Ignored => {}
    }
    if let Some(msg) = outcome.status() {
        display_message(doc, config, &msg)?;
    }
    Ok(())
}
