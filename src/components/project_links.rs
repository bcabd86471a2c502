use yew::prelude::*;

use crate::model::{CurrentProject, Project};

#[derive(Properties, PartialEq, Clone)]
pub struct ProjectLinksProps {
    pub projects: Vec<Project>,
    #[prop_or_default]
    pub current: Option<CurrentProject>,
}

#[function_component]
pub fn ProjectLinks(props: &ProjectLinksProps) -> Html {
    let cards = props
        .projects
        .iter()
        .map(|p| {
            html! {
                <div key={p.name.clone()} style="display:flex; flex-direction:column; gap:12px; padding:24px; border:1px solid rgba(59,130,246,0.2); border-radius:12px; background:#111318;">
                    <h3 style="margin:0; font-size:18px;">{ p.name.clone() }</h3>
                    <p style="margin:0; font-size:14px; color:#9ca3af; flex:1;">{ p.description.clone() }</p>
                    <a href={p.url.clone()} target="_blank" rel="noopener noreferrer"
                        style="display:block; text-align:center; padding:8px 12px; border:1px solid rgba(255,255,255,0.15); border-radius:6px; color:inherit; text-decoration:none;">
                        {"Visit Project ↗"}
                    </a>
                </div>
            }
        })
        .collect::<Html>();
    let current = match &props.current {
        Some(c) => html! {
            <div style="grid-column:1 / -1; padding:24px; border:1px solid #3b82f6; border-radius:12px; background:rgba(59,130,246,0.1);">
                <h3 style="margin:0 0 4px 0; font-size:18px; color:#60a5fa;">{ c.name.clone() }</h3>
                <p style="margin:0 0 12px 0; font-size:14px; color:#9ca3af;">{ c.description.clone() }</p>
                <p style="margin:0; color:#9ca3af;">{ c.summary.clone() }</p>
            </div>
        },
        None => html! {},
    };
    html! {
        <div style="display:grid; grid-template-columns:repeat(auto-fit, minmax(240px, 1fr)); gap:24px; max-width:1152px; margin:40px auto 0 auto;">
            { cards }
            { current }
        </div>
    }
}
