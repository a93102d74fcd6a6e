//! Appearance Step ("How it looks")
//!
//! The template picker chooses a starting template (or none) and hands the
//! choice to the customize screen through a [`HandoffStore`] under
//! [`SELECTED_TEMPLATE_KEY`]. The customize screen reads that key once when
//! it loads and then edits a small component tree.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

/// Handoff key written by the picker and read by the customize screen
pub const SELECTED_TEMPLATE_KEY: &str = "selectedTemplate";

/// Handoff value meaning "start from scratch"
pub const SCRATCH: &str = "scratch";

// ============================================================================
// Templates
// ============================================================================

/// A starting template in the picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl Template {
    fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

/// The built-in template catalogue
pub fn templates() -> Vec<Template> {
    vec![
        Template::new("gifts", "Gifts", "Oct 2, 2024"),
        Template::new("wallet", "Wallet", "Oct 2, 2024"),
        Template::new("simple", "Simple", "Oct 2, 2024"),
    ]
}

/// What the customize screen starts from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateChoice {
    Template(String),
    Scratch,
}

impl TemplateChoice {
    pub fn as_handoff_value(&self) -> &str {
        match self {
            TemplateChoice::Template(id) => id,
            TemplateChoice::Scratch => SCRATCH,
        }
    }

    pub fn from_handoff_value(value: &str) -> Self {
        if value == SCRATCH {
            TemplateChoice::Scratch
        } else {
            TemplateChoice::Template(value.to_string())
        }
    }

    pub fn describe(&self) -> String {
        match self {
            TemplateChoice::Template(id) => templates()
                .into_iter()
                .find(|t| &t.id == id)
                .map(|t| format!("{} template", t.name))
                .unwrap_or_else(|| format!("{id} template")),
            TemplateChoice::Scratch => "Built from scratch".to_string(),
        }
    }
}

// ============================================================================
// Handoff Store
// ============================================================================

/// Error type for handoff operations
#[derive(Debug, thiserror::Error)]
pub enum HandoffError {
    #[error("Handoff storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Handoff data is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type HandoffResult<T> = Result<T, HandoffError>;

/// Small key/value store used to pass data between screens
pub trait HandoffStore: Send + Sync {
    fn write(&self, key: &str, value: &str) -> HandoffResult<()>;

    fn read(&self, key: &str) -> HandoffResult<Option<String>>;
}

/// Process-local handoff
#[derive(Debug, Default)]
pub struct MemoryHandoff {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryHandoff {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HandoffStore for MemoryHandoff {
    fn write(&self, key: &str, value: &str) -> HandoffResult<()> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn read(&self, key: &str) -> HandoffResult<Option<String>> {
        Ok(self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }
}

/// Handoff persisted as a JSON object in a single file, so the choice
/// survives a restart of the front end.
#[derive(Debug, Clone)]
pub struct FileHandoff {
    path: PathBuf,
}

impl FileHandoff {
    pub const FILE_NAME: &'static str = "handoff.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Handoff file inside `data_dir`
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> HandoffResult<HashMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl HandoffStore for FileHandoff {
    fn write(&self, key: &str, value: &str) -> HandoffResult<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }

    fn read(&self, key: &str) -> HandoffResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }
}

// ============================================================================
// Template Picker
// ============================================================================

/// State of the template picker page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppearanceStep {
    selected: Option<Template>,
    preview_open: bool,
    chosen: Option<TemplateChoice>,
}

impl AppearanceStep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&Template> {
        self.selected.as_ref()
    }

    pub fn is_preview_open(&self) -> bool {
        self.preview_open
    }

    /// The choice last handed to the customize screen
    pub fn chosen(&self) -> Option<&TemplateChoice> {
        self.chosen.as_ref()
    }

    /// Select a template and open its preview. Unknown ids are ignored.
    pub fn select(&mut self, template_id: &str) -> bool {
        match templates().into_iter().find(|t| t.id == template_id) {
            Some(template) => {
                self.selected = Some(template);
                self.preview_open = true;
                true
            }
            None => {
                tracing::debug!(template_id, "Unknown template, ignoring");
                false
            }
        }
    }

    pub fn close_preview(&mut self) {
        self.preview_open = false;
    }

    /// Hand the selected template to the customize screen.
    pub fn use_selected(&mut self, handoff: &dyn HandoffStore) -> HandoffResult<bool> {
        let Some(template) = &self.selected else {
            return Ok(false);
        };
        let choice = TemplateChoice::Template(template.id.clone());
        self.hand_off(handoff, choice)?;
        Ok(true)
    }

    /// Skip templates and customize from an empty layout.
    pub fn from_scratch(&mut self, handoff: &dyn HandoffStore) -> HandoffResult<()> {
        self.hand_off(handoff, TemplateChoice::Scratch)
    }

    fn hand_off(&mut self, handoff: &dyn HandoffStore, choice: TemplateChoice) -> HandoffResult<()> {
        handoff.write(SELECTED_TEMPLATE_KEY, choice.as_handoff_value())?;
        tracing::debug!(template = choice.as_handoff_value(), "Template handed off");
        self.preview_open = false;
        self.chosen = Some(choice);
        Ok(())
    }
}

// ============================================================================
// Customize Screen
// ============================================================================

/// Kind of a component node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Nav,
    Text,
    Image,
    Button,
    Container,
}

/// A node of the page component tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentNode {
    pub id: String,
    pub name: String,
    pub kind: ComponentKind,
    pub expanded: bool,
    pub children: Vec<ComponentNode>,
}

impl ComponentNode {
    fn leaf(id: &str, name: &str, kind: ComponentKind) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            expanded: false,
            children: Vec::new(),
        }
    }

    fn group(id: &str, name: &str, kind: ComponentKind, children: Vec<ComponentNode>) -> Self {
        Self {
            children,
            ..Self::leaf(id, name, kind)
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Default page layout
pub fn default_components() -> Vec<ComponentNode> {
    use ComponentKind::*;
    vec![
        ComponentNode::group(
            "nav",
            "Nav Component",
            Nav,
            vec![
                ComponentNode::leaf("header-text-1", "Header Text", Text),
                ComponentNode::leaf("body-text-1", "Body Text", Text),
            ],
        ),
        ComponentNode::group(
            "body",
            "Body Component",
            Container,
            vec![
                ComponentNode::leaf("header-image", "Header Image", Image),
                ComponentNode::leaf("header-text-2", "Header Text", Text),
                ComponentNode::leaf("subheader-text", "Subheader Text", Text),
            ],
        ),
        ComponentNode::leaf("referral-code", "Referral Code Component", Container),
        ComponentNode::group(
            "buttons",
            "Buttons Component",
            Container,
            vec![
                ComponentNode::leaf("share-button", "Share Code Button", Button),
                ComponentNode::leaf("copy-button", "Copy Code Button", Button),
            ],
        ),
    ]
}

/// State of the customize screen
#[derive(Debug, Clone, PartialEq)]
pub struct CustomizeState {
    base: Option<TemplateChoice>,
    components: Vec<ComponentNode>,
    selected: Option<String>,
}

impl CustomizeState {
    /// Read the handed-off template once and build the default tree.
    pub fn load(handoff: &dyn HandoffStore) -> HandoffResult<Self> {
        let base = handoff
            .read(SELECTED_TEMPLATE_KEY)?
            .map(|v| TemplateChoice::from_handoff_value(&v));
        tracing::debug!(?base, "Customize screen loaded");
        Ok(Self {
            base,
            components: default_components(),
            selected: None,
        })
    }

    /// Template the screen started from; `None` when nothing was handed off
    pub fn base(&self) -> Option<&TemplateChoice> {
        self.base.as_ref()
    }

    pub fn components(&self) -> &[ComponentNode] {
        &self.components
    }

    /// Expand or collapse node `id`, searching top-level nodes and their children.
    pub fn toggle(&mut self, id: &str) -> bool {
        for node in &mut self.components {
            if node.id == id {
                node.expanded = !node.expanded;
                return true;
            }
            if let Some(child) = node.children.iter_mut().find(|c| c.id == id) {
                child.expanded = !child.expanded;
                return true;
            }
        }
        false
    }

    pub fn select(&mut self, id: &str) -> bool {
        if self.find(id).is_none() {
            return false;
        }
        self.selected = Some(id.to_string());
        true
    }

    pub fn selected(&self) -> Option<&ComponentNode> {
        self.selected.as_deref().and_then(|id| self.find(id))
    }

    fn find(&self, id: &str) -> Option<&ComponentNode> {
        self.components.iter().find_map(|node| {
            if node.id == id {
                Some(node)
            } else {
                node.children.iter().find(|c| c.id == id)
            }
        })
    }

    /// Rows of the tree as rendered: `(depth, node)` for visible nodes
    pub fn visible_rows(&self) -> Vec<(usize, &ComponentNode)> {
        let mut rows = Vec::new();
        for node in &self.components {
            rows.push((0, node));
            if node.expanded {
                rows.extend(node.children.iter().map(|c| (1, c)));
            }
        }
        rows
    }
}
