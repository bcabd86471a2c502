use yew::prelude::*;

use super::step_content::StepContent;
use crate::model::Step;
use crate::state::MediaReference;

#[derive(Properties, PartialEq, Clone)]
pub struct DeploymentStepsProps {
    pub steps: Vec<Step>,
    pub on_open_image: Callback<MediaReference>,
}

/// Single-open, collapsible accordion: clicking the open step closes it.
pub fn toggle_step(current: Option<&str>, clicked: &str) -> Option<String> {
    if current == Some(clicked) {
        None
    } else {
        Some(clicked.to_string())
    }
}

pub fn entrance_delay(index: usize) -> f64 {
    index as f64 * 0.1
}

#[function_component]
pub fn DeploymentSteps(props: &DeploymentStepsProps) -> Html {
    let open_step = use_state(|| None::<String>);

    let items = props
        .steps
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let is_open = open_step.as_deref() == Some(step.id.as_str());
            let onclick = {
                let open_step = open_step.clone();
                let id = step.id.clone();
                Callback::from(move |_: MouseEvent| {
                    open_step.set(toggle_step(open_step.as_deref(), &id));
                })
            };
            let chevron = if is_open { "rotate(180deg)" } else { "rotate(0deg)" };
            html! {
                <div key={step.id.clone()}
                    style={format!("border-bottom:1px solid rgba(255,255,255,0.1); animation:guide-fade-up 0.5s ease-out {}s both;", entrance_delay(index))}>
                    <button {onclick} aria-expanded={is_open.to_string()}
                        style="width:100%; display:flex; justify-content:space-between; align-items:center; padding:16px 0; background:none; border:none; color:inherit; font-size:20px; font-weight:600; text-align:left; cursor:pointer;">
                        <span>{ step.title.clone() }</span>
                        <span style={format!("transition:transform 0.2s; transform:{};", chevron)}>{"⌄"}</span>
                    </button>
                    if is_open {
                        <div style="padding:0 0 16px 0; font-size:16px; color:#9ca3af; animation:guide-fade-in 0.2s ease-out;">
                            <StepContent blocks={step.blocks.clone()} on_open_image={props.on_open_image.clone()} />
                        </div>
                    }
                </div>
            }
        })
        .collect::<Html>();

    html! {
        <section style="width:100%; max-width:896px; margin:0 auto;">
            <h2 style="font-size:30px; font-weight:700; text-align:center; margin:0 0 8px 0;">{"Deployment Workflow"}</h2>
            <p style="text-align:center; font-size:18px; color:#9ca3af; margin:0 0 24px 0;">
                {"Follow these steps to deploy your containerized application on AWS ECS Fargate."}
            </p>
            <div style="max-height:600px; overflow-y:auto; padding-right:16px;">{ items }</div>
        </section>
    }
}
