//! Highlights the sidebar entries matching the types dropdown and navigates
//! when the dropdown changes.

use crate::config::BindingConfig;
use crate::dom::{Page, SelectId, TextId};
use crate::navigation::{Navigator, navigation_path};
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Outcome of [`initialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub selection: String,
    pub matched: Vec<TextId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub target: SelectId,
    pub value: String,
}

/// Reads the first dropdown's value and marks every text node containing it.
///
/// Returns `None` without touching the page when no dropdown exists. An empty
/// value matches every text node.
pub fn initialize(page: &mut Page, config: &BindingConfig) -> Option<Highlight> {
    let Some((select_id, select)) = page.first_select_with_class(&config.dropdown_class) else {
        debug!(class = %config.dropdown_class, "no dropdown on page, skipping highlight");
        return None;
    };
    let selection = select.value().to_string();
    let matched = page.texts_containing(&config.text_class, &selection);
    for id in &matched {
        page.add_class(*id, &config.highlight_class);
    }
    debug!(
        select = select_id.0,
        %selection,
        matched = matched.len(),
        "highlighted selected type"
    );
    Some(Highlight { selection, matched })
}

pub fn on_selection_change<N: Navigator>(
    event: &ChangeEvent,
    config: &BindingConfig,
    navigator: &mut N,
) {
    let href = navigation_path(&config.path_prefix, &event.value, config.encoding);
    debug!(select = event.target.0, value = %event.value, %href, "selection changed");
    navigator.assign(&href);
}

/// Change listener attached to every dropdown present at mount time.
pub struct SelectionBinding<N> {
    config: BindingConfig,
    navigator: N,
    bound: Vec<SelectId>,
    initialized: bool,
}

/// Binds `navigator` to every dropdown on `page`. Highlighting waits for
/// [`SelectionBinding::dom_ready`].
pub fn mount<N: Navigator>(page: &Page, config: BindingConfig, navigator: N) -> SelectionBinding<N> {
    let bound: Vec<_> = page
        .selects_with_class(&config.dropdown_class)
        .map(|(id, _)| id)
        .collect();
    debug!(bound = bound.len(), class = %config.dropdown_class, "mounted selection binding");
    SelectionBinding {
        config,
        navigator,
        bound,
        initialized: false,
    }
}

impl<N: Navigator> SelectionBinding<N> {
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn bound(&self) -> &[SelectId] {
        &self.bound
    }

    pub fn is_bound(&self, id: SelectId) -> bool {
        self.bound.contains(&id)
    }

    /// Runs [`initialize`] the first time it is called.
    pub fn dom_ready(&mut self, page: &mut Page) -> Option<Highlight> {
        if self.initialized {
            debug!("dom ready already handled");
            return None;
        }
        self.initialized = true;
        initialize(page, &self.config)
    }

    /// Selects `value` on `target` and fires the listener when `target` is
    /// bound. A value naming no option is not a selection change: the control
    /// keeps its state and nothing navigates. Returns whether a navigation was
    /// issued.
    pub fn change(&mut self, page: &mut Page, target: SelectId, value: &str) -> bool {
        let Some(select) = page.select_mut(target) else {
            warn!(select = target.0, "change targets a missing select");
            return false;
        };
        if !select.has_option(value) {
            warn!(select = target.0, %value, "value matches no option, change ignored");
            return false;
        }
        select.select(value);
        if !self.is_bound(target) {
            return false;
        }
        let event = ChangeEvent {
            target,
            value: select.value().to_string(),
        };
        on_selection_change(&event, &self.config, &mut self.navigator);
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    DomReady,
    Change { target: SelectId, value: String },
}

/// Single-threaded event loop over one page and its binding.
pub struct PageSession<N> {
    page: Page,
    binding: SelectionBinding<N>,
    queue: VecDeque<PageEvent>,
    highlight: Option<Highlight>,
    navigations: usize,
}

impl<N: Navigator> PageSession<N> {
    pub fn new(page: Page, config: BindingConfig, navigator: N) -> Self {
        let binding = mount(&page, config, navigator);
        Self {
            page,
            binding,
            queue: VecDeque::new(),
            highlight: None,
            navigations: 0,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn highlight(&self) -> Option<&Highlight> {
        self.highlight.as_ref()
    }

    /// Navigations issued by this session's listener.
    pub fn navigations(&self) -> usize {
        self.navigations
    }

    pub fn push(&mut self, event: PageEvent) {
        self.queue.push_back(event);
    }

    /// Queues a change on the first bound dropdown. Returns `false` when the
    /// page has none.
    pub fn push_change(&mut self, value: impl Into<String>) -> bool {
        let Some(target) = self.binding.bound().first().copied() else {
            return false;
        };
        self.push(PageEvent::Change {
            target,
            value: value.into(),
        });
        true
    }

    /// Drains the queue in arrival order.
    pub fn run(&mut self) {
        while let Some(event) = self.queue.pop_front() {
            self.dispatch(event);
        }
    }

    fn dispatch(&mut self, event: PageEvent) {
        match event {
            PageEvent::DomReady => {
                if let Some(highlight) = self.binding.dom_ready(&mut self.page) {
                    self.highlight = Some(highlight);
                }
            }
            PageEvent::Change { target, value } => {
                if self.binding.change(&mut self.page, target, &value) {
                    self.navigations += 1;
                }
            }
        }
    }

    pub fn into_parts(self) -> (Page, SelectionBinding<N>) {
        (self.page, self.binding)
    }
}
