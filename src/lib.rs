//! Typed rendition of the Pokémon types sidebar behavior: the entry matching
//! the types dropdown is highlighted when the page becomes ready, and changing
//! the dropdown navigates to `/pokemon/<type>`.
//!
//! ```
//! use pokedex_picker::{BindingConfig, Location, PageEvent, PageSession, catalog};
//!
//! let config = BindingConfig::default();
//! let location = Location::new("/pokemon/Fire");
//! let mut session = PageSession::new(
//!     catalog::sidebar_page("Fire", &config),
//!     config,
//!     location.clone(),
//! );
//! session.push(PageEvent::DomReady);
//! session.push_change("Water");
//! session.run();
//!
//! assert_eq!(session.highlight().unwrap().matched.len(), 1);
//! assert_eq!(location.href(), "/pokemon/Water");
//! ```

pub mod binding;
pub mod catalog;
pub mod config;
pub mod dom;
pub mod error;
pub mod navigation;
pub mod snapshot;

pub use binding::{
    ChangeEvent, Highlight, PageEvent, PageSession, SelectionBinding, initialize, mount,
    on_selection_change,
};
pub use config::BindingConfig;
pub use dom::{ClassList, Page, SelectControl, SelectId, SelectOption, TextId, TextNode};
pub use error::{Error, Result};
pub use navigation::{Location, Navigator, PathEncoding, navigation_path};
pub use snapshot::{PageSnapshot, load_page, parse_page};
