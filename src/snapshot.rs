use crate::dom::{ClassList, Page, SelectControl, SelectOption, TextNode};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// JSON form of a [`Page`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    #[serde(default)]
    pub selects: Vec<SelectSnapshot>,
    #[serde(default)]
    pub nodes: Vec<NodeSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectSnapshot {
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub options: Vec<OptionSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionSnapshot {
    Plain(String),
    Labeled { value: String, label: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    #[serde(default)]
    pub class: String,
    pub text: String,
}

impl From<OptionSnapshot> for SelectOption {
    fn from(value: OptionSnapshot) -> Self {
        match value {
            OptionSnapshot::Plain(value) => SelectOption::plain(value),
            OptionSnapshot::Labeled { value, label } => SelectOption::new(value, label),
        }
    }
}

impl From<&SelectOption> for OptionSnapshot {
    fn from(option: &SelectOption) -> Self {
        if option.value == option.label {
            OptionSnapshot::Plain(option.value.clone())
        } else {
            OptionSnapshot::Labeled {
                value: option.value.clone(),
                label: option.label.clone(),
            }
        }
    }
}

impl PageSnapshot {
    /// Builds the page. A `selected` value matching no option leaves the
    /// control with an empty selection.
    pub fn into_page(self) -> Page {
        let mut page = Page::new();
        for snapshot in self.selects {
            let options = snapshot.options.into_iter().map(SelectOption::from).collect();
            let mut control = SelectControl::new(ClassList::parse(&snapshot.class), options);
            if let Some(selected) = snapshot.selected {
                if !control.select(&selected) {
                    warn!(%selected, "snapshot selection matches no option");
                }
            }
            page.push_select(control);
        }
        for node in self.nodes {
            page.push_text(TextNode::new(ClassList::parse(&node.class), node.text));
        }
        page
    }

    pub fn from_page(page: &Page) -> Self {
        Self {
            selects: page
                .selects()
                .iter()
                .map(|select| SelectSnapshot {
                    class: select.classes().to_string(),
                    options: select.options().iter().map(OptionSnapshot::from).collect(),
                    selected: select.selected_option().map(|option| option.value.clone()),
                })
                .collect(),
            nodes: page
                .text_nodes()
                .iter()
                .map(|node| NodeSnapshot {
                    class: node.classes().to_string(),
                    text: node.text().to_string(),
                })
                .collect(),
        }
    }
}

pub fn parse_page(raw: &str) -> Result<Page> {
    let snapshot: PageSnapshot = serde_json::from_str(raw)?;
    Ok(snapshot.into_page())
}

pub fn load_page(path: impl AsRef<Path>) -> Result<Page> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading page snapshot");
    let raw = fs::read_to_string(path)?;
    parse_page(&raw)
}
