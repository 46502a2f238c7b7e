//! Route themes
//!
//! Each page declares a theme mode and font. Public pages are pinned to
//! light mode; the dashboard follows the theme store.

use serde::Serialize;

use crate::store::ThemeMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Font {
    Onest,
    Montserrat,
}

/// Mode a route asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteMode {
    Light,
    Dark,
    /// Follow the user's preference
    Dynamic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Public,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Page {
    Landing,
    Login,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Route {
    pub path: &'static str,
    pub page: Page,
    pub mode: RouteMode,
    pub font: Font,
    pub layout: Layout,
}

pub static ROUTES: [Route; 3] = [
    Route {
        path: "/",
        page: Page::Landing,
        mode: RouteMode::Light,
        font: Font::Onest,
        layout: Layout::Public,
    },
    Route {
        path: "/login",
        page: Page::Login,
        mode: RouteMode::Light,
        font: Font::Onest,
        layout: Layout::Public,
    },
    Route {
        path: "/dashboard",
        page: Page::Dashboard,
        mode: RouteMode::Dynamic,
        font: Font::Montserrat,
        layout: Layout::None,
    },
];

/// Route registered for `path`, ignoring a trailing slash
pub fn route_for(path: &str) -> Option<&'static Route> {
    let path = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };
    ROUTES.iter().find(|r| r.path == path)
}

/// Concrete mode for a route given the stored preference
pub fn resolve(route: &Route, store_mode: ThemeMode) -> ThemeMode {
    match route.mode {
        RouteMode::Light => ThemeMode::Light,
        RouteMode::Dark => ThemeMode::Dark,
        RouteMode::Dynamic => store_mode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ThemeStore;

    #[test]
    fn test_route_table() {
        let landing = route_for("/").unwrap();
        assert_eq!(landing.page, Page::Landing);
        assert_eq!(landing.font, Font::Onest);
        assert_eq!(landing.layout, Layout::Public);

        let dashboard = route_for("/dashboard/").unwrap();
        assert_eq!(dashboard.mode, RouteMode::Dynamic);
        assert_eq!(dashboard.font, Font::Montserrat);
        assert_eq!(dashboard.layout, Layout::None);

        assert!(route_for("/settings").is_none());
    }

    #[test]
    fn test_public_pages_stay_light() {
        let login = route_for("/login").unwrap();
        assert_eq!(resolve(login, ThemeMode::Dark), ThemeMode::Light);
    }

    #[test]
    fn test_dashboard_follows_store() {
        let store = ThemeStore::new();
        let dashboard = route_for("/dashboard").unwrap();

        assert_eq!(resolve(dashboard, store.mode()), ThemeMode::Light);
        store.toggle_mode();
        assert_eq!(resolve(dashboard, store.mode()), ThemeMode::Dark);
    }
}
