//! Navigation menu derived from session state.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use super::session_store::SessionStore;
use crate::domain::entities::{AuthToken, MenuCommand, MenuItem};
use crate::domain::errors::StorageError;

/// Token assigned by [`MenuReconciler::login`].
///
/// There is no credential exchange yet; login only flips the session flag.
pub const PLACEHOLDER_TOKEN: &str = "token";

/// Logical session state as last observed by the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No usable token stored.
    LoggedOut,
    /// A non-empty token is stored.
    LoggedIn,
}

impl SessionState {
    const fn from_flag(is_logged_in: bool) -> Self {
        if is_logged_in {
            Self::LoggedIn
        } else {
            Self::LoggedOut
        }
    }

    /// Whether this is [`SessionState::LoggedIn`].
    #[must_use]
    pub const fn is_logged_in(self) -> bool {
        matches!(self, Self::LoggedIn)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LoggedOut => write!(f, "logged out"),
            Self::LoggedIn => write!(f, "logged in"),
        }
    }
}

struct MenuSnapshot {
    state: SessionState,
    user_items: Arc<[MenuItem]>,
}

/// Rebuilds the navigation menu whenever the session changes.
///
/// Readers get `Arc` snapshots; a refresh builds the complete list first and
/// then replaces the snapshot in one store, so a partially built list is
/// never observable.
pub struct MenuReconciler {
    session: SessionStore,
    main_items: Arc<[MenuItem]>,
    current: RwLock<MenuSnapshot>,
}

impl MenuReconciler {
    /// Creates reconciler with the initial state read from `session`.
    #[must_use]
    pub fn new(session: SessionStore) -> Self {
        let state = SessionState::from_flag(session.is_logged_in());
        debug!(%state, "Initial session state");

        Self {
            session,
            main_items: main_items().into(),
            current: RwLock::new(MenuSnapshot {
                state,
                user_items: user_items(state).into(),
            }),
        }
    }

    /// Session state the current menu was built from.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.current.read().state
    }

    /// Primary navigation entries. These never depend on the session.
    #[must_use]
    pub fn main_items(&self) -> Arc<[MenuItem]> {
        Arc::clone(&self.main_items)
    }

    /// Account menu entries for the current session state.
    #[must_use]
    pub fn user_items(&self) -> Arc<[MenuItem]> {
        Arc::clone(&self.current.read().user_items)
    }

    /// Underlying session store.
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Re-reads the session flag once and swaps in a freshly built menu.
    pub fn refresh(&self) -> SessionState {
        let state = SessionState::from_flag(self.session.is_logged_in());
        let items: Arc<[MenuItem]> = user_items(state).into();

        *self.current.write() = MenuSnapshot {
            state,
            user_items: items,
        };

        debug!(%state, "Menu refreshed");
        state
    }

    /// Stores the placeholder token and refreshes the menu.
    ///
    /// # Errors
    /// Returns the storage error after refreshing; the menu then shows the
    /// logged-out entries.
    pub fn login(&self) -> Result<(), StorageError> {
        let result = self.session.set_token(&AuthToken::new(PLACEHOLDER_TOKEN));
        self.finish("login", result)
    }

    /// Removes the token and refreshes the menu.
    ///
    /// # Errors
    /// Returns the storage error after refreshing.
    pub fn logout(&self) -> Result<(), StorageError> {
        let result = self.session.remove_token();
        self.finish("logout", result)
    }

    /// Runs the command attached to a menu entry.
    ///
    /// # Errors
    /// Returns the storage error from the underlying transition.
    pub fn execute(&self, command: MenuCommand) -> Result<(), StorageError> {
        match command {
            MenuCommand::Login => self.login(),
            MenuCommand::Logout => self.logout(),
        }
    }

    fn finish(
        &self,
        transition: &'static str,
        result: Result<(), StorageError>,
    ) -> Result<(), StorageError> {
        if let Err(e) = &result {
            warn!(transition, error = %e, "Session update failed");
        }

        let state = self.refresh();
        info!(transition, %state, "Session transition complete");
        result
    }
}

fn main_items() -> Vec<MenuItem> {
    vec![
        MenuItem::link("Home", "pi pi-home", "/"),
        MenuItem::link("About", "pi pi-info-circle", "/about"),
        MenuItem::link("Help", "pi pi-question-circle", "/help"),
        MenuItem::link("Contact", "pi pi-address-book", "/contact"),
    ]
}

fn user_items(state: SessionState) -> Vec<MenuItem> {
    let is_logged_in = state.is_logged_in();

    vec![
        MenuItem::link("Profile", "pi pi-user", "/users"),
        MenuItem::link("Settings", "pi pi-cog", "/settings"),
        MenuItem::separator(),
        MenuItem::link("Login", "pi pi-sign-in", "/login")
            .with_action(MenuCommand::Login)
            .with_visible(!is_logged_in),
        MenuItem::link("Logout", "pi pi-sign-out", "/")
            .with_action(MenuCommand::Logout)
            .with_visible(is_logged_in),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::session_store::TOKEN_KEY;
    use crate::domain::ports::KeyValueStore;
    use crate::domain::ports::mocks::{MockKeyValueStore, UnavailableStore};

    fn reconciler() -> (MenuReconciler, Arc<MockKeyValueStore>) {
        let backend = Arc::new(MockKeyValueStore::new());
        let session = SessionStore::new(backend.clone());
        (MenuReconciler::new(session), backend)
    }

    fn visible_session_entries(items: &[MenuItem]) -> Vec<&str> {
        items
            .iter()
            .filter(|item| item.action().is_some() && item.is_visible())
            .map(MenuItem::label)
            .collect()
    }

    #[test]
    fn test_initial_menu_offers_login() {
        let (menu, _) = reconciler();

        assert_eq!(menu.state(), SessionState::LoggedOut);
        assert_eq!(visible_session_entries(&menu.user_items()), vec!["Login"]);
    }

    #[test]
    fn test_initial_state_follows_stored_token() {
        let backend = Arc::new(MockKeyValueStore::with_entry(TOKEN_KEY, "persisted"));
        let menu = MenuReconciler::new(SessionStore::new(backend));

        assert_eq!(menu.state(), SessionState::LoggedIn);
        assert_eq!(visible_session_entries(&menu.user_items()), vec!["Logout"]);
    }

    #[test]
    fn test_refresh_never_writes() {
        let (menu, backend) = reconciler();

        menu.refresh();
        menu.refresh();

        assert_eq!(backend.writes(), 0);
    }

    #[test]
    fn test_login_stores_placeholder_and_shows_logout() {
        let (menu, backend) = reconciler();

        menu.login().unwrap();
        assert_eq!(backend.writes(), 1);

        assert_eq!(
            backend.get(TOKEN_KEY).unwrap().as_deref(),
            Some(PLACEHOLDER_TOKEN)
        );
        assert_eq!(menu.state(), SessionState::LoggedIn);
        assert_eq!(visible_session_entries(&menu.user_items()), vec!["Logout"]);
    }

    #[test]
    fn test_login_then_logout_restores_initial_menu() {
        let (menu, _) = reconciler();
        let initial = menu.user_items();

        menu.login().unwrap();
        menu.logout().unwrap();

        assert_eq!(menu.state(), SessionState::LoggedOut);
        assert_eq!(&*menu.user_items(), &*initial);
    }

    #[test]
    fn test_exactly_one_session_entry_visible_across_transitions() {
        let (menu, _) = reconciler();
        let steps = [
            MenuCommand::Login,
            MenuCommand::Login,
            MenuCommand::Logout,
            MenuCommand::Logout,
            MenuCommand::Login,
        ];

        for command in steps {
            menu.execute(command).unwrap();

            let items = menu.user_items();
            let visible = visible_session_entries(&items);
            assert_eq!(visible.len(), 1);
            let expected = if menu.session().is_logged_in() {
                "Logout"
            } else {
                "Login"
            };
            assert_eq!(visible[0], expected);
        }
    }

    #[test]
    fn test_refresh_picks_up_external_change() {
        let (menu, backend) = reconciler();

        backend.set(TOKEN_KEY, "from elsewhere").unwrap();
        assert_eq!(menu.state(), SessionState::LoggedOut);

        assert_eq!(menu.refresh(), SessionState::LoggedIn);
        assert_eq!(backend.writes(), 1);
        assert_eq!(visible_session_entries(&menu.user_items()), vec!["Logout"]);
    }

    #[test]
    fn test_old_snapshot_survives_refresh() {
        let (menu, _) = reconciler();
        let before = menu.user_items();

        menu.login().unwrap();

        assert_eq!(visible_session_entries(&before), vec!["Login"]);
        assert_eq!(visible_session_entries(&menu.user_items()), vec!["Logout"]);
    }

    #[test]
    fn test_menu_layout() {
        let (menu, _) = reconciler();

        let main_items = menu.main_items();
        let main: Vec<(&str, &str)> = main_items
            .iter()
            .map(|item| (item.label(), item.target()))
            .collect();
        assert_eq!(
            main,
            vec![
                ("Home", "/"),
                ("About", "/about"),
                ("Help", "/help"),
                ("Contact", "/contact")
            ]
        );

        let user = menu.user_items();
        assert_eq!(user.len(), 5);
        assert!(user[2].is_separator());
        assert_eq!(user[3].target(), "/login");
        assert_eq!(user[4].target(), "/");
    }

    #[test]
    fn test_unavailable_storage_reports_error_and_stays_logged_out() {
        let menu = MenuReconciler::new(SessionStore::new(Arc::new(UnavailableStore)));

        let result = menu.login();

        assert!(result.unwrap_err().is_unavailable());
        assert_eq!(menu.state(), SessionState::LoggedOut);
        assert_eq!(visible_session_entries(&menu.user_items()), vec!["Login"]);
    }
}
