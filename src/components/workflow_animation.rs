use yew::prelude::*;

use crate::model::{PipelineStage, StageIcon};

#[derive(Properties, PartialEq, Clone)]
pub struct WorkflowAnimationProps {
    pub stages: Vec<PipelineStage>,
}

pub fn icon_glyph(icon: StageIcon) -> &'static str {
    match icon {
        StageIcon::Code => "🗄️",
        StageIcon::Container => "📦",
        StageIcon::Cloud => "☁️",
        StageIcon::Server => "🖥️",
    }
}

// Stage i pops in at i seconds, the arrow after it half a second later.
pub fn stage_delay(index: usize) -> f64 {
    index as f64
}

pub fn arrow_delay(index: usize) -> f64 {
    index as f64 + 0.5
}

#[function_component(WorkflowAnimation)]
pub fn workflow_animation(props: &WorkflowAnimationProps) -> Html {
    let last = props.stages.len().saturating_sub(1);
    let nodes = props
        .stages
        .iter()
        .enumerate()
        .map(|(i, stage)| {
            html! {
                <>
                    <div style={format!("display:flex; flex-direction:column; align-items:center; justify-content:center; width:128px; height:128px; padding:16px; background:#111318; border:1px solid rgba(255,255,255,0.1); border-radius:8px; animation:guide-pop-in 0.5s cubic-bezier(0.34,1.56,0.64,1) {}s both;", stage_delay(i))}>
                        <span style="font-size:36px; margin-bottom:8px;">{ icon_glyph(stage.icon) }</span>
                        <span style="font-size:14px; font-weight:500; text-align:center;">{ stage.label.clone() }</span>
                    </div>
                    if i < last {
                        <div class="guide-arrow" style={format!("font-size:24px; color:#9ca3af; animation:guide-slide-in 0.5s ease-out {}s both;", arrow_delay(i))}>{"→"}</div>
                    }
                </>
            }
        })
        .collect::<Html>();
    html! {
        <div style="display:flex; flex-wrap:wrap; align-items:center; justify-content:center; gap:16px; padding:40px 0;">{ nodes }</div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_follow_their_stage() {
        for i in 0..4 {
            assert!(arrow_delay(i) > stage_delay(i));
            assert!(arrow_delay(i) < stage_delay(i + 1));
        }
    }
}
