//! The panel's screens and their paths.

use core::str::FromStr;

use content_admin_core::ProductId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`
    Dashboard,
    /// `/contents`
    Contents,
    /// `/contents/create`
    CreateContent,
    /// `/contents/{id}`
    EditContent(ProductId),
    /// `/settings`
    Settings,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no screen at `{0}`")]
pub struct UnknownRoute(pub String);

impl Route {
    /// Entries of the navigation bar, in display order.
    pub const NAV: [Route; 3] = [Route::Dashboard, Route::Contents, Route::Settings];

    /// Match a path. Query strings, fragments, and trailing slashes are ignored.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Some(Route::Dashboard),
            ["contents"] => Some(Route::Contents),
            ["contents", "create"] => Some(Route::CreateContent),
            ["contents", id] => id.parse().ok().map(Route::EditContent),
            ["settings"] => Some(Route::Settings),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/".to_string(),
            Route::Contents => "/contents".to_string(),
            Route::CreateContent => "/contents/create".to_string(),
            Route::EditContent(id) => format!("/contents/{id}"),
            Route::Settings => "/settings".to_string(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Contents => "Contents",
            Route::CreateContent => "Create content",
            Route::EditContent(_) => "Edit content",
            Route::Settings => "Settings",
        }
    }

    /// Whether `self` should highlight the nav entry `nav`.
    pub fn is_within(&self, nav: &Route) -> bool {
        match (self, nav) {
            (Route::CreateContent | Route::EditContent(_), Route::Contents) => true,
            (a, b) => a == b,
        }
    }
}

impl core::fmt::Display for Route {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s).ok_or_else(|| UnknownRoute(s.to_string()))
    }
}
