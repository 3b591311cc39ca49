//! DOM front-end.
//!
//! Builds the page (title, count field, clock, Play/Restart button and the
//! play surface), wires listeners into the shared controller and redraws from
//! the `RenderModel` after every change. Clock ticks only touch the time
//! text so markers are not rebuilt under the pointer mid-click.

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, window};

use crate::config::GameConfig;
use crate::controller::Controller;
use crate::error::GameError;
use crate::game::view::{Marker, RenderModel};
use crate::scheduler::Task;

mod timers;

use timers::{Dispatch, WebScheduler};

const ROOT_ID: &str = "sd-root";
const TARGET_ATTR: &str = "data-target-id";

type WebController = Controller<WebScheduler, StdRng>;

struct DomView {
    title: HtmlElement,
    time: HtmlElement,
    button: HtmlElement,
    surface: HtmlElement,
}

struct WebGame {
    controller: WebController,
    view: DomView,
}

impl WebGame {
    fn render(&self) {
        let model = self.controller.render_model();
        self.view.title.set_text_content(Some(model.title.text()));
        self.view
            .title
            .set_attribute("style", &format!("font-size:24px; font-weight:700; margin:20px 0 16px; color:{};", model.title.color()))
            .ok();
        self.view.button.set_text_content(Some(model.button_label));
        self.view.surface.set_inner_html(&markers_html(&model.markers));
        self.render_clock(&model);
    }

    fn render_clock(&self, model: &RenderModel) {
        self.view.time.set_text_content(Some(&model.elapsed));
    }
}

thread_local! {
    static GAME: RefCell<Option<WebGame>> = RefCell::new(None);
}

/// Run `f` against the mounted game. Re-entrant calls are dropped instead of
/// panicking on the `RefCell`.
fn with_game(f: impl FnOnce(&mut WebGame)) {
    GAME.with(|cell| {
        if let Ok(mut slot) = cell.try_borrow_mut() {
            if let Some(game) = slot.as_mut() {
                f(game);
            }
        } else {
            log::warn!("game state busy; event dropped");
        }
    });
}

/// Build the page and install a fresh controller. Mounting again replaces
/// the previous game; its clock is cancelled when it drops.
pub fn mount(config: GameConfig) -> Result<(), GameError> {
    let win = window().ok_or(GameError::NoWindow)?;
    let doc = win.document().ok_or(GameError::NoDocument)?;

    let root: Element = if let Some(el) = doc.get_element_by_id(ROOT_ID) {
        el.set_inner_html("");
        el
    } else {
        let el = doc.create_element("div")?;
        el.set_id(ROOT_ID);
        doc.body().ok_or(GameError::NoBody)?.append_child(&el)?;
        el
    };
    root.set_attribute(
        "style",
        "display:flex; flex-direction:column; align-items:flex-start; margin:8px auto; width:max-content; font-family:Inter, system-ui, sans-serif;",
    )?;

    let title = append(&doc, &root, "h1", "")?;
    let count_row = append(&doc, &root, "div", "display:flex; align-items:center; margin-top:8px;")?;
    append(&doc, &count_row, "p", "margin:0; width:140px;")?.set_text_content(Some("Points:"));
    let input: HtmlInputElement = cast(doc.create_element("input")?)?;
    input.set_type("text");
    input.set_value("0");
    input.set_attribute("style", "background:transparent; border:1px solid #9ca3af; border-radius:4px; padding-left:4px;")?;
    count_row.append_child(&input)?;

    let time_row = append(&doc, &root, "div", "display:flex; align-items:center; margin-top:16px;")?;
    append(&doc, &time_row, "p", "margin:0; width:140px;")?.set_text_content(Some("Time:"));
    let time = append(&doc, &time_row, "p", "margin:0;")?;

    let button = append(
        &doc,
        &root,
        "button",
        "background:#e5e7eb; width:112px; border:1px solid #9ca3af; border-radius:4px; font-weight:500; margin-top:8px; cursor:pointer;",
    )?;
    let surface = append(
        &doc,
        &root,
        "div",
        &format!(
            "position:relative; width:{}px; height:{}px; border:2px solid black; box-sizing:content-box; margin-top:16px; overflow:hidden;",
            config.surface_width, config.surface_height
        ),
    )?;

    let dispatch: Dispatch = Rc::new(|task: Task| {
        with_game(|game| {
            game.controller.run_task(task);
            match task {
                Task::Tick => game.render_clock(&game.controller.render_model()),
                Task::RemoveTarget { .. } => game.render(),
            }
        })
    });
    let controller = Controller::new(config, WebScheduler::new(win.clone(), dispatch), StdRng::from_entropy())?;
    let game = WebGame {
        controller,
        view: DomView { title, time, button: button.clone(), surface: surface.clone() },
    };
    game.render();
    let previous = GAME.with(|cell| cell.replace(Some(game)));
    drop(previous);

    // Count field: parse and echo the parsed value back.
    {
        let input_el = input.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            let raw = input_el.value();
            with_game(|game| {
                let count = game.controller.set_count_input(&raw);
                input_el.set_value(&count.to_string());
            });
        }) as Box<dyn FnMut(_)>);
        input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Play / Restart
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            with_game(|game| {
                if let Err(err) = game.controller.press_play() {
                    log::error!("could not start round: {}", err);
                }
                game.render();
            });
        }) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Marker clicks, delegated from the surface.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let Some(id) = clicked_target_id(&evt) else {
                return;
            };
            with_game(|game| {
                match game.controller.click_target(id) {
                    Ok(outcome) => log::debug!("click {} -> {:?}", id, outcome),
                    Err(err) => log::error!("click {} failed: {}", id, err),
                }
                game.render();
            });
        }) as Box<dyn FnMut(_)>);
        surface.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    log::info!("game mounted");
    Ok(())
}

fn append(doc: &Document, parent: &Element, tag: &str, style: &str) -> Result<HtmlElement, GameError> {
    let el: HtmlElement = cast(doc.create_element(tag)?)?;
    if !style.is_empty() {
        el.set_attribute("style", style)?;
    }
    parent.append_child(&el)?;
    Ok(el)
}

fn cast<T: JsCast>(el: Element) -> Result<T, GameError> {
    el.dyn_into::<T>()
        .map_err(|el| GameError::Js(format!("unexpected element <{}>", el.tag_name())))
}

fn clicked_target_id(evt: &web_sys::MouseEvent) -> Option<u32> {
    let el: Element = evt.target()?.dyn_into().ok()?;
    let marker = el.closest(&format!("[{}]", TARGET_ATTR)).ok()??;
    marker.get_attribute(TARGET_ATTR)?.parse().ok()
}

/// Markers as absolutely positioned circles.
fn markers_html(markers: &[Marker]) -> String {
    let mut html = String::new();
    for m in markers {
        html.push_str(&format!(
            "<div {attr}='{id}' style='position:absolute; left:{x}px; top:{y}px; width:{s}px; height:{s}px; z-index:{z}; \
             box-sizing:border-box; border:2px solid black; border-radius:50%; background:{fill}; color:black; \
             display:flex; align-items:center; justify-content:center; cursor:pointer; user-select:none;'>{id}</div>",
            attr = TARGET_ATTR,
            id = m.id,
            x = m.x,
            y = m.y,
            s = m.size,
            z = m.z_index,
            fill = m.fill(),
        ));
    }
    html
}
