//! The application's route configuration.
//!
//! | path pattern | name | loading mode |
//! |---|---|---|
//! | `/` | Home | eager |
//! | `/about` | About | lazy |
//! | `/editor/:id` | MarkdownEditor | eager |
//! | `/view/:id` | ViewDocument | eager |
//!
//! Page components live outside this crate; routes refer to them through
//! opaque [`Component`] handles that the rendering layer mounts.

use std::fmt;
use waymark_core::{BoxError, ConfigError, Loader, Params};
use waymark_std::{
    hooks::LoggingHook,
    navigator::Navigator,
    table::{Resolved, RouteTable},
};

/// Route names, usable with [`RouteTable::route`] and [`RouteTable::href`].
pub mod names {
    /// `/`
    pub const HOME: &str = "Home";
    /// `/about`
    pub const ABOUT: &str = "About";
    /// `/editor/:id`
    pub const MARKDOWN_EDITOR: &str = "MarkdownEditor";
    /// `/view/:id`
    pub const VIEW_DOCUMENT: &str = "ViewDocument";
}

/// An opaque reference to a page component, identified by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Component(&'static str);

impl Component {
    /// The landing page.
    pub const HOME: Component = Component("Home");
    /// The about page.
    pub const ABOUT: Component = Component("About");
    /// The markdown editor.
    pub const MARKDOWN_EDITOR: Component = Component("MarkdownEditor");
    /// The read-only document viewer.
    pub const VIEW_DOCUMENT: Component = Component("ViewDocument");

    /// Refer to a component by name.
    pub const fn new(name: &'static str) -> Self {
        Component(name)
    }

    /// The component's name.
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The application's route table.
pub type AppRoutes = RouteTable<Component>;

/// Default About loader, used when the host doesn't supply one.
async fn load_about() -> Result<Component, BoxError> {
    Ok(Component::ABOUT)
}

/// Build the route table with the bundled About loader.
pub fn routes() -> Result<AppRoutes, ConfigError> {
    routes_with(load_about)
}

/// Build the route table, fetching the About view with `about`.
///
/// `about` runs on the first navigation to `/about` only; its result is
/// cached for the rest of the session.
pub fn routes_with(about: impl Loader<Component>) -> Result<AppRoutes, ConfigError> {
    RouteTable::builder()
        .eager("/", names::HOME, Component::HOME)
        .lazy("/about", names::ABOUT, about)
        .eager("/editor/:id", names::MARKDOWN_EDITOR, Component::MARKDOWN_EDITOR)
        .eager("/view/:id", names::VIEW_DOCUMENT, Component::VIEW_DOCUMENT)
        .build()
}

/// A navigator over [`routes`] that logs every navigation.
pub fn navigator() -> Result<Navigator<Component>, ConfigError> {
    Ok(Navigator::new(routes()?).hook(LoggingHook))
}

/// A resolved page with its typed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// `/`
    Home,
    /// `/about`
    About,
    /// `/editor/:id`, editing document `id`.
    MarkdownEditor {
        /// Identifier of the document to edit.
        id: String,
    },
    /// `/view/:id`, displaying document `id`.
    ViewDocument {
        /// Identifier of the document to display.
        id: String,
    },
}

impl Page {
    /// Interpret a resolved navigation.
    ///
    /// Returns `None` for routes outside the application table.
    pub fn from_resolved(resolved: &Resolved<Component>) -> Option<Self> {
        let id = || resolved.params.get("id").map(str::to_string);
        match resolved.name.as_str() {
            names::HOME => Some(Page::Home),
            names::ABOUT => Some(Page::About),
            names::MARKDOWN_EDITOR => id().map(|id| Page::MarkdownEditor { id }),
            names::VIEW_DOCUMENT => id().map(|id| Page::ViewDocument { id }),
            _ => None,
        }
    }

    /// Route name of this page.
    pub fn route_name(&self) -> &'static str {
        match self {
            Page::Home => names::HOME,
            Page::About => names::ABOUT,
            Page::MarkdownEditor { .. } => names::MARKDOWN_EDITOR,
            Page::ViewDocument { .. } => names::VIEW_DOCUMENT,
        }
    }

    /// Parameters of this page's route.
    pub fn params(&self) -> Params {
        match self {
            Page::Home | Page::About => Params::new(),
            Page::MarkdownEditor { id } | Page::ViewDocument { id } => {
                [("id", id.as_str())].into_iter().collect()
            }
        }
    }
}
