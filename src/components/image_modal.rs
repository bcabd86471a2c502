use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, KeyboardEvent, MouseEvent, Node, TouchEvent, WheelEvent};
use yew::prelude::*;

use crate::config::ViewerConfig;
use crate::state::viewer::Phase;
use crate::state::{
    ClickGuard, DismissReason, MediaReference, Outcome, Point, PointerTarget, TapTracker,
    TouchStartRoute, ViewerAction, ViewerState, contacts, route_touch_start,
};
use crate::util::{clog, format_zoom};

#[derive(Properties, PartialEq, Clone)]
pub struct ImageModalProps {
    pub is_open: bool,
    pub image_src: AttrValue,
    pub alt_text: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub config: ViewerConfig,
}

fn client_point(e: &MouseEvent) -> Point {
    Point::new(e.client_x() as f64, e.client_y() as f64)
}

fn target_of(e: &Event, image: &NodeRef) -> PointerTarget {
    let target = e.target().and_then(|t| t.dyn_into::<Node>().ok());
    match (image.get(), target) {
        (Some(img), Some(t)) if img.is_same_node(Some(&t)) => PointerTarget::Image,
        _ => PointerTarget::Elsewhere,
    }
}

#[function_component]
pub fn ImageModal(props: &ImageModalProps) -> Html {
    let viewer = use_mut_ref(|| ViewerState::new(props.config.clone()));
    let taps = use_mut_ref(TapTracker::default);
    let click_guard = use_mut_ref(ClickGuard::default);
    let on_close = use_mut_ref(|| props.on_close.clone());
    *on_close.borrow_mut() = props.on_close.clone();
    let overlay_ref = use_node_ref();
    let image_ref = use_node_ref();
    let force = use_force_update();

    let dispatch: Rc<dyn Fn(ViewerAction) -> Outcome> = {
        let viewer = viewer.clone();
        let on_close = on_close.clone();
        let force = force.clone();
        Rc::new(move |action| {
            let outcome = viewer.borrow_mut().apply(action);
            if let Outcome::Dismissed(reason) = outcome {
                clog(&format!("image viewer dismissed ({:?})", reason));
                let cb = on_close.borrow().clone();
                cb.emit(());
            }
            if outcome.needs_render() {
                force.force_update();
            }
            outcome
        })
    };

    // Follow the host's open flag and media
    {
        let dispatch = dispatch.clone();
        let media = MediaReference::new(props.image_src.to_string(), props.alt_text.to_string());
        use_effect_with((props.is_open, media), move |(is_open, media)| {
            if *is_open {
                clog(&format!("image viewer open: {}", media.src));
                dispatch(ViewerAction::Open(media.clone()));
            } else {
                dispatch(ViewerAction::Close);
            }
            || ()
        });
    }

    // Config changes apply to an already mounted viewer too
    {
        let viewer = viewer.clone();
        let force = force.clone();
        use_effect_with(props.config.clone(), move |config| {
            if viewer.borrow_mut().reconfigure(config.clone()).needs_render() {
                clog("image viewer reconfigured");
                force.force_update();
            }
            || ()
        });
    }

    let open = viewer.borrow().is_open();

    // Listeners live exactly as long as the overlay is open (and mounted).
    // Wheel and touch are attached by hand so they are not passive.
    {
        let dispatch = dispatch.clone();
        let overlay_ref = overlay_ref.clone();
        let image_ref = image_ref.clone();
        let viewer = viewer.clone();
        let taps = taps.clone();
        use_effect_with(open, move |open| {
            let mut listeners: Vec<EventListener> = Vec::new();
            if *open {
                if let Some(window) = web_sys::window() {
                    let dispatch = dispatch.clone();
                    listeners.push(EventListener::new(&window, "keydown", move |e: &Event| {
                        if e.dyn_ref::<KeyboardEvent>().is_some_and(|e| e.key() == "Escape") {
                            dispatch(ViewerAction::Dismiss(DismissReason::Escape));
                        }
                    }));
                }
                if let Some(overlay) = overlay_ref.cast::<HtmlElement>() {
                    let wheel_dispatch = dispatch.clone();
                    listeners.push(EventListener::new_with_options(
                        &overlay,
                        "wheel",
                        EventListenerOptions::enable_prevent_default(),
                        move |e: &Event| {
                            let Some(e) = e.dyn_ref::<WheelEvent>() else {
                                return;
                            };
                            e.prevent_default();
                            wheel_dispatch(ViewerAction::Wheel { delta_y: e.delta_y() });
                        },
                    ));

                    let start_dispatch = dispatch.clone();
                    let start_viewer = viewer.clone();
                    listeners.push(EventListener::new_with_options(
                        &overlay,
                        "touchstart",
                        EventListenerOptions::enable_prevent_default(),
                        move |e: &Event| {
                            let Some(e) = e.dyn_ref::<TouchEvent>() else {
                                return;
                            };
                            let route = {
                                let v = start_viewer.borrow();
                                route_touch_start(
                                    target_of(e, &image_ref),
                                    contacts(&e.touches()),
                                    &mut *taps.borrow_mut(),
                                    js_sys::Date::now(),
                                    v.config(),
                                )
                            };
                            // A double tap also swallows the emulated dblclick
                            let always_prevent = match &route {
                                TouchStartRoute::DoubleTap => true,
                                TouchStartRoute::Gesture(points) => points.len() >= 2,
                                TouchStartRoute::PassThrough => false,
                            };
                            let Some(action) = route.action() else {
                                return;
                            };
                            start_dispatch(action);
                            if always_prevent || start_viewer.borrow().is_dragging() {
                                e.prevent_default();
                            }
                        },
                    ));

                    let move_dispatch = dispatch.clone();
                    listeners.push(EventListener::new_with_options(
                        &overlay,
                        "touchmove",
                        EventListenerOptions::enable_prevent_default(),
                        move |e: &Event| {
                            let Some(e) = e.dyn_ref::<TouchEvent>() else {
                                return;
                            };
                            if move_dispatch(ViewerAction::TouchMove(contacts(&e.touches()))).needs_render() {
                                e.prevent_default();
                            }
                        },
                    ));

                    for event in ["touchend", "touchcancel"] {
                        let end_dispatch = dispatch.clone();
                        listeners.push(EventListener::new(&overlay, event, move |e: &Event| {
                            if let Some(e) = e.dyn_ref::<TouchEvent>() {
                                end_dispatch(ViewerAction::TouchEnd(contacts(&e.touches())));
                            }
                        }));
                    }
                }
                clog(&format!("image viewer listening ({} listeners)", listeners.len()));
            }
            move || drop(listeners)
        });
    }

    let (media, transform, transition, percent, cursor) = {
        let v = viewer.borrow();
        let Some(media) = v.media().cloned() else {
            return html! {};
        };
        let cursor = match v.phase() {
            Phase::Dragging => "grabbing",
            Phase::Idle if v.is_zoomed() => "grab",
            Phase::Pinching => "default",
            _ => "zoom-in",
        };
        (media, v.transform(), v.transition().to_string(), v.zoom_percent(), cursor)
    };

    let backdrop_click = {
        let dispatch = dispatch.clone();
        let click_guard = click_guard.clone();
        Callback::from(move |_: MouseEvent| {
            if click_guard.borrow_mut().backdrop_click() {
                dispatch(ViewerAction::Dismiss(DismissReason::Backdrop));
            }
        })
    };
    let close_click = {
        let dispatch = dispatch.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            dispatch(ViewerAction::Dismiss(DismissReason::CloseButton));
        })
    };
    let image_click = {
        let click_guard = click_guard.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            click_guard.borrow_mut().image_clicked();
        })
    };
    let image_mousedown = {
        let dispatch = dispatch.clone();
        Callback::from(move |e: MouseEvent| {
            if e.button() != 0 {
                return;
            }
            e.prevent_default();
            dispatch(ViewerAction::PointerDown(client_point(&e)));
        })
    };
    let image_dblclick = {
        let dispatch = dispatch.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            dispatch(ViewerAction::DoubleTap);
        })
    };
    let overlay_mousedown = {
        let click_guard = click_guard.clone();
        Callback::from(move |_: MouseEvent| click_guard.borrow_mut().press())
    };
    let overlay_mousemove = {
        let dispatch = dispatch.clone();
        Callback::from(move |e: MouseEvent| {
            dispatch(ViewerAction::PointerMove(client_point(&e)));
        })
    };
    let overlay_mouseup = {
        let dispatch = dispatch.clone();
        let click_guard = click_guard.clone();
        Callback::from(move |_: MouseEvent| {
            let drag_ended = dispatch(ViewerAction::PointerUp).needs_render();
            click_guard.borrow_mut().release(drag_ended);
        })
    };
    let overlay_mouseleave = {
        let dispatch = dispatch.clone();
        let click_guard = click_guard.clone();
        Callback::from(move |_: MouseEvent| {
            dispatch(ViewerAction::PointerUp);
            click_guard.borrow_mut().leave();
        })
    };

    let image_style = format!(
        "max-width:100%; max-height:100%; width:auto; height:auto; object-fit:contain; border-radius:8px; border:1px solid rgba(255,255,255,0.1); box-shadow:0 25px 50px rgba(0,0,0,0.5); user-select:none; cursor:{}; transform:{}; transition:{}; will-change:transform;",
        cursor, transform, transition
    );

    html! {
        <div ref={overlay_ref} role="dialog" aria-modal="true"
            style="position:fixed; inset:0; z-index:50; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.8); backdrop-filter:blur(4px); padding:32px; overflow:hidden; touch-action:none; animation:guide-fade-in 0.2s ease-out;"
            onclick={backdrop_click}
            onmousedown={overlay_mousedown}
            onmousemove={overlay_mousemove}
            onmouseup={overlay_mouseup}
            onmouseleave={overlay_mouseleave}
        >
            <button onclick={close_click} aria-label="Close image"
                style="position:absolute; top:16px; right:16px; z-index:51; width:48px; height:48px; border-radius:9999px; border:none; background:rgba(0,0,0,0.5); color:#fff; font-size:28px; line-height:1; cursor:pointer;">
                {"×"}
            </button>
            <img ref={image_ref} src={media.src.clone()} alt={media.alt.clone()} draggable="false"
                style={image_style}
                onclick={image_click}
                onmousedown={image_mousedown}
                ondblclick={image_dblclick}
            />
            <div style="position:absolute; bottom:16px; left:50%; transform:translateX(-50%); display:flex; gap:12px; align-items:center; padding:6px 14px; border-radius:9999px; background:rgba(0,0,0,0.6); color:#fff; font-size:13px; pointer-events:none;">
                <span style="font-variant-numeric:tabular-nums; font-weight:600;">{ format_zoom(percent) }</span>
                <span style="opacity:0.6;">{"Scroll, pinch or double-click to zoom"}</span>
            </div>
        </div>
    }
}
