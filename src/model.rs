//! Content model for the deployment guide.
//! The guide ships as `content/guide.json`, embedded at build time.

use serde::{Deserialize, Serialize};

use crate::config::ViewerConfig;
use crate::state::MediaReference;

const GUIDE_JSON: &str = include_str!("../content/guide.json");

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Guide {
    pub title: String,
    pub tagline: String,
    pub repository_url: String,
    pub pipeline: Vec<PipelineStage>,
    pub steps: Vec<Step>,
    pub projects: Vec<Project>,
    pub current_project: Option<CurrentProject>,
    pub viewer: ViewerConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageIcon {
    Code,
    Container,
    Cloud,
    Server,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipelineStage {
    pub label: String,
    pub icon: StageIcon,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Paragraph { text: String },
    Code { code: String },
    List(List),
    Image(Figure),
    /// Highlighted closing remark.
    Success { text: String },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct List {
    #[serde(default)]
    pub ordered: bool,
    pub items: Vec<ListItem>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<List>,
}

/// Screenshot shown inline and opened in the image viewer on click.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub src: String,
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl From<&Figure> for MediaReference {
    fn from(f: &Figure) -> Self {
        MediaReference::new(f.src.clone(), f.alt.clone())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub url: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurrentProject {
    pub name: String,
    pub description: String,
    pub summary: String,
}

impl Guide {
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        let mut guide: Guide = serde_json::from_str(raw)?;
        guide.viewer = guide.viewer.sanitized();
        Ok(guide)
    }

    /// Every screenshot in the guide, in step order.
    pub fn images(&self) -> Vec<&Figure> {
        self.steps
            .iter()
            .flat_map(|s| s.blocks.iter())
            .filter_map(|b| match b {
                Block::Image(f) => Some(f),
                _ => None,
            })
            .collect()
    }
}

pub fn load_guide() -> Result<Guide, serde_json::Error> {
    Guide::parse(GUIDE_JSON)
}

/// Inline span of step text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(String),
    Code(String),
}

/// Splits `**strong**` and `` `code` `` spans out of plain text.
/// Unterminated or empty markers are kept as literal text.
pub fn parse_inline(text: &str) -> Vec<Inline> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = text;
    while let Some(ch) = rest.chars().next() {
        let marker: Option<(&str, fn(String) -> Inline)> = if rest.starts_with("**") {
            Some(("**", Inline::Strong as fn(String) -> Inline))
        } else if ch == '`' {
            Some(("`", Inline::Code as fn(String) -> Inline))
        } else {
            None
        };
        let Some((marker, span)) = marker else {
            plain.push(ch);
            rest = &rest[ch.len_utf8()..];
            continue;
        };
        let body = &rest[marker.len()..];
        match body.find(marker) {
            Some(end) if end > 0 => {
                if !plain.is_empty() {
                    spans.push(Inline::Text(std::mem::take(&mut plain)));
                }
                spans.push(span(body[..end].to_string()));
                rest = &body[end + marker.len()..];
            }
            _ => {
                plain.push_str(marker);
                rest = body;
            }
        }
    }
    if !plain.is_empty() {
        spans.push(Inline::Text(plain));
    }
    spans
}
