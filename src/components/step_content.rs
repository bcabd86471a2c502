use yew::prelude::*;

use super::rich_text::RichText;
use crate::model::{Block, Figure, List};
use crate::state::MediaReference;

#[derive(Properties, PartialEq, Clone)]
pub struct StepContentProps {
    pub blocks: Vec<Block>,
    pub on_open_image: Callback<MediaReference>,
}

fn render_list(list: &List) -> Html {
    let items = list
        .items
        .iter()
        .map(|item| {
            html! {
                <li>
                    <RichText text={item.text.clone()} />
                    { item.children.as_ref().map(render_list).unwrap_or_default() }
                </li>
            }
        })
        .collect::<Html>();
    let style = "padding-left:24px; margin:8px 0 0 0; display:flex; flex-direction:column; gap:8px;";
    if list.ordered {
        html! { <ol style={format!("{} list-style:decimal;", style)}>{items}</ol> }
    } else {
        html! { <ul style={format!("{} list-style:disc;", style)}>{items}</ul> }
    }
}

fn render_figure(figure: &Figure, on_open_image: &Callback<MediaReference>) -> Html {
    let onclick = {
        let cb = on_open_image.clone();
        let media = MediaReference::from(figure);
        Callback::from(move |_: MouseEvent| cb.emit(media.clone()))
    };
    html! {
        <figure style="margin:0;">
            <button {onclick} title="Click to enlarge"
                style="display:block; padding:0; border:1px solid rgba(255,255,255,0.1); border-radius:8px; overflow:hidden; background:none; cursor:zoom-in;">
                <img src={figure.src.clone()} alt={figure.alt.clone()} loading="lazy"
                    style="display:block; max-width:100%; max-height:240px; object-fit:contain;" />
            </button>
            {
                match &figure.caption {
                    Some(c) => html! { <figcaption style="font-size:12px; opacity:0.6; margin-top:6px;">{c.clone()}</figcaption> },
                    None => html! {},
                }
            }
        </figure>
    }
}

#[function_component(StepContent)]
pub fn step_content(props: &StepContentProps) -> Html {
    let blocks = props
        .blocks
        .iter()
        .map(|block| match block {
            Block::Paragraph { text } => html! { <p style="margin:0;"><RichText text={text.clone()} /></p> },
            Block::Code { code } => html! {
                <pre style="margin:0; background:rgba(255,255,255,0.06); padding:16px; border-radius:6px; overflow-x:auto;">
                    <code style="font-family:ui-monospace, SFMono-Regular, Menlo, monospace; font-size:13px;">{code.clone()}</code>
                </pre>
            },
            Block::List(list) => render_list(list),
            Block::Image(figure) => render_figure(figure, &props.on_open_image),
            Block::Success { text } => html! {
                <p style="margin:16px 0 0 0; color:#4ade80; font-weight:700;"><RichText text={text.clone()} /></p>
            },
        })
        .collect::<Html>();
    html! { <div style="display:flex; flex-direction:column; gap:16px;">{blocks}</div> }
}
