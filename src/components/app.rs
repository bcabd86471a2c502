use super::{
    deployment_steps::DeploymentSteps, image_modal::ImageModal, project_links::ProjectLinks,
    rich_text::RichText, workflow_animation::WorkflowAnimation,
};
use crate::model::{Guide, load_guide};
use crate::state::MediaReference;
use crate::util::{clog, cwarn};
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let guide = use_memo((), |_| match load_guide() {
        Ok(guide) => {
            clog(&format!(
                "guide loaded: {} steps, {} screenshots",
                guide.steps.len(),
                guide.images().len()
            ));
            guide
        }
        Err(err) => {
            cwarn(&format!("guide content failed to parse: {}", err));
            Guide::default()
        }
    });
    // Image the viewer shows; None while it is closed
    let selected = use_state(|| None::<MediaReference>);

    let open_image = {
        let selected = selected.clone();
        Callback::from(move |media: MediaReference| selected.set(Some(media)))
    };
    let close_image = {
        let selected = selected.clone();
        Callback::from(move |()| selected.set(None))
    };

    let (image_src, alt_text) = match &*selected {
        Some(m) => (m.src.clone(), m.alt.clone()),
        None => (String::new(), String::new()),
    };

    html! {
        <main style="min-height:100vh; background:#0a0a0a; color:#fff; overflow-x:hidden; position:relative;">
            <div style="position:fixed; inset:0; z-index:0; pointer-events:none;">
                <div style="position:absolute; top:0; left:25%; width:384px; height:384px; background:rgba(37,99,235,0.2); border-radius:9999px; filter:blur(128px);"></div>
                <div style="position:absolute; bottom:0; right:25%; width:384px; height:384px; background:rgba(147,51,234,0.2); border-radius:9999px; filter:blur(128px);"></div>
            </div>

            <div style="position:relative; z-index:10; max-width:1280px; margin:0 auto; padding:64px 16px; display:flex; flex-direction:column; gap:56px;">
                <header style="text-align:center; display:flex; flex-direction:column; gap:24px;">
                    <h1 class="guide-gradient-text" style="margin:0; font-size:clamp(36px, 7vw, 72px); font-weight:700; letter-spacing:-0.02em;">
                        { guide.title.clone() }
                    </h1>
                    <p style="margin:0 auto; max-width:768px; font-size:clamp(18px, 2.4vw, 24px); color:#9ca3af; font-weight:300;">
                        <RichText text={guide.tagline.clone()} />
                    </p>
                    if !guide.repository_url.is_empty() {
                        <div style="display:flex; justify-content:center;">
                            <a href={guide.repository_url.clone()} target="_blank" rel="noopener noreferrer"
                                style="display:flex; align-items:center; gap:12px; padding:12px 28px; background:rgba(255,255,255,0.05); border:1px solid rgba(255,255,255,0.1); border-radius:9999px; color:inherit; text-decoration:none;">
                                <span style="font-weight:500;">{"View Repository"}</span>
                                <span style="opacity:0.5;">{"↗"}</span>
                            </a>
                        </div>
                    }
                </header>

                <section style="background:rgba(255,255,255,0.05); border:1px solid rgba(255,255,255,0.1); border-radius:24px; padding:32px 16px;">
                    <div style="text-align:center;">
                        <h2 style="margin:0; font-size:24px; font-weight:600;">{"Deployment Pipeline"}</h2>
                        <p style="margin:4px 0 0 0; font-size:14px; color:#9ca3af;">{"Automated CI/CD Workflow"}</p>
                    </div>
                    <WorkflowAnimation stages={guide.pipeline.clone()} />
                </section>

                <DeploymentSteps steps={guide.steps.clone()} on_open_image={open_image} />

                <footer style="border-top:1px solid rgba(255,255,255,0.1); padding-top:56px;">
                    <div style="text-align:center;">
                        <h2 style="margin:0 0 8px 0; font-size:30px; font-weight:700;">{"More DevOps Projects"}</h2>
                        <p style="margin:0; color:#9ca3af;">{"Explore other hands-on guides and implementations"}</p>
                    </div>
                    <ProjectLinks projects={guide.projects.clone()} current={guide.current_project.clone()} />
                </footer>
            </div>

            <ImageModal
                is_open={selected.is_some()}
                {image_src}
                {alt_text}
                on_close={close_image}
                config={guide.viewer.clone()}
            />
        </main>
    }
}
