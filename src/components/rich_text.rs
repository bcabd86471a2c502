use yew::prelude::*;

use crate::model::{Inline, parse_inline};

#[derive(Properties, PartialEq, Clone)]
pub struct RichTextProps {
    pub text: AttrValue,
}

#[function_component]
pub fn RichText(props: &RichTextProps) -> Html {
    parse_inline(&props.text)
        .into_iter()
        .map(|span| match span {
            Inline::Text(t) => html! { {t} },
            Inline::Strong(t) => html! { <strong style="color:#f3f4f6;">{t}</strong> },
            Inline::Code(t) => html! {
                <code style="font-family:ui-monospace, SFMono-Regular, Menlo, monospace; font-size:0.9em; background:rgba(255,255,255,0.08); padding:1px 5px; border-radius:4px;">{t}</code>
            },
        })
        .collect::<Html>()
}
