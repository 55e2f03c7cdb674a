use std::fmt;

/// Index of a select control within a [`Page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SelectId(pub usize);

/// Index of a text node within a [`Page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextId(pub usize);

/// Ordered, duplicate-free set of class tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    /// Parses a whitespace-separated `class` attribute value.
    pub fn parse(value: &str) -> Self {
        let mut list = Self::default();
        for token in value.split_whitespace() {
            list.add(token);
        }
        list
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|existing| existing == token)
    }

    /// Adds `token`, returning `false` when it was already present.
    pub fn add(&mut self, token: &str) -> bool {
        if token.is_empty() || self.contains(token) {
            return false;
        }
        self.tokens.push(token.to_string());
        true
    }

    pub fn remove(&mut self, token: &str) -> bool {
        let before = self.tokens.len();
        self.tokens.retain(|existing| existing != token);
        self.tokens.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// An option whose label doubles as its value.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Single-choice control. An empty selection reads as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectControl {
    classes: ClassList,
    options: Vec<SelectOption>,
    selected: Option<usize>,
}

impl SelectControl {
    /// Builds a control that selects its first option, as a browser does when
    /// no option is marked selected.
    pub fn new(classes: ClassList, options: Vec<SelectOption>) -> Self {
        let selected = if options.is_empty() { None } else { Some(0) };
        Self {
            classes,
            options,
            selected,
        }
    }

    pub fn classes(&self) -> &ClassList {
        &self.classes
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn selected_option(&self) -> Option<&SelectOption> {
        self.selected.and_then(|index| self.options.get(index))
    }

    pub fn value(&self) -> &str {
        self.selected_option()
            .map(|option| option.value.as_str())
            .unwrap_or("")
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|option| option.value == value)
    }

    /// Selects the first option whose value equals `value`. Without a match
    /// the selection is cleared and `false` is returned.
    pub fn select(&mut self, value: &str) -> bool {
        self.selected = self.options.iter().position(|option| option.value == value);
        self.selected.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextNode {
    text: String,
    classes: ClassList,
}

impl TextNode {
    pub fn new(classes: ClassList, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            classes,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn classes(&self) -> &ClassList {
        &self.classes
    }

    /// Case-sensitive substring containment; every node contains `""`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.text.contains(needle)
    }
}

/// The slice of a document the selection binding reads and writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    selects: Vec<SelectControl>,
    text_nodes: Vec<TextNode>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_select(&mut self, select: SelectControl) -> SelectId {
        self.selects.push(select);
        SelectId(self.selects.len() - 1)
    }

    pub fn push_text(&mut self, node: TextNode) -> TextId {
        self.text_nodes.push(node);
        TextId(self.text_nodes.len() - 1)
    }

    pub fn select(&self, id: SelectId) -> Option<&SelectControl> {
        self.selects.get(id.0)
    }

    pub fn select_mut(&mut self, id: SelectId) -> Option<&mut SelectControl> {
        self.selects.get_mut(id.0)
    }

    pub fn selects(&self) -> &[SelectControl] {
        &self.selects
    }

    pub fn text_nodes(&self) -> &[TextNode] {
        &self.text_nodes
    }

    /// Selects carrying `class`, in document order.
    pub fn selects_with_class<'a>(
        &'a self,
        class: &'a str,
    ) -> impl Iterator<Item = (SelectId, &'a SelectControl)> + 'a {
        self.selects
            .iter()
            .enumerate()
            .filter(move |(_, select)| select.classes.contains(class))
            .map(|(index, select)| (SelectId(index), select))
    }

    pub fn first_select_with_class(&self, class: &str) -> Option<(SelectId, &SelectControl)> {
        self.selects
            .iter()
            .enumerate()
            .find(|(_, select)| select.classes.contains(class))
            .map(|(index, select)| (SelectId(index), select))
    }

    /// Text nodes carrying `class` whose text contains `needle`.
    pub fn texts_containing(&self, class: &str, needle: &str) -> Vec<TextId> {
        self.text_nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.classes.contains(class) && node.contains_text(needle))
            .map(|(index, _)| TextId(index))
            .collect()
    }

    pub fn add_class(&mut self, id: TextId, class: &str) -> bool {
        self.text_nodes
            .get_mut(id.0)
            .map(|node| node.classes.add(class))
            .unwrap_or(false)
    }

    /// Texts of the nodes carrying `class`, in document order.
    pub fn texts_with_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.text_nodes
            .iter()
            .filter(move |node| node.classes.contains(class))
            .map(TextNode::text)
    }
}
