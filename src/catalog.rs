use crate::config::BindingConfig;
use crate::dom::{ClassList, Page, SelectControl, SelectOption, TextNode};

/// Dropdown entry that lists every type.
pub const ALL_TYPES_OPTION: &str = "All";

pub const POKEMON_TYPES: [&str; 18] = [
    "Bug", "Dark", "Ground", "Dragon", "Ice", "Electric", "Normal", "Fairy", "Fighting",
    "Psychic", "Rock", "Flying", "Steel", "Ghost", "Fire", "Grass", "Poison", "Water",
];

/// Type names in ascending order, the order the sidebar renders them.
pub fn sorted_types() -> Vec<&'static str> {
    let mut types = POKEMON_TYPES.to_vec();
    types.sort_unstable();
    types
}

/// Home-page layout: a dropdown of "All" plus every type, and one sidebar
/// entry per type. `selected` falls back to an empty selection when it names
/// no option.
pub fn sidebar_page(selected: &str, config: &BindingConfig) -> Page {
    let types = sorted_types();
    let mut options = Vec::with_capacity(types.len() + 1);
    options.push(SelectOption::plain(ALL_TYPES_OPTION));
    options.extend(types.iter().map(|name| SelectOption::plain(*name)));

    let mut page = Page::new();
    let mut dropdown = SelectControl::new(ClassList::parse(&config.dropdown_class), options);
    dropdown.select(selected);
    page.push_select(dropdown);
    for name in types {
        page.push_text(TextNode::new(ClassList::parse(&config.text_class), name));
    }
    page
}
