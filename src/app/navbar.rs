//! Navigation bar: search box, menu and logout.

use crate::app::actions::{Action, Notice, Route};
use crate::app::search;
use crate::app::session::Session;

/// A menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub route: Route,
}

/// Entries of the navigation menu. Bookmarks need a logged-in user.
#[must_use]
pub fn menu_items(session: &Session) -> Vec<MenuItem> {
    let mut items = vec![MenuItem {
        label: "Home",
        route: Route::Home,
    }];
    if session.is_authenticated() {
        items.push(MenuItem {
            label: "Bookmarks",
            route: Route::Bookmarks,
        });
    }
    items
}

/// Submits the search box.
#[must_use]
pub fn submit_search(term: &str) -> Vec<Action> {
    vec![Action::Navigate(search::search_route(term))]
}

/// Logs out and confirms it.
pub fn logout(session: &mut Session) -> Vec<Action> {
    session.logout();
    vec![
        Action::Notify(Notice::success("Logged out successfully!")),
        Action::Navigate(Route::Home),
    ]
}
