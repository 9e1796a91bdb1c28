//! Navigation menu entries.

use std::borrow::Cow;

/// Command bound to a menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuCommand {
    /// Start a session.
    Login,
    /// End the current session.
    Logout,
}

/// Kind of menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItemKind {
    /// Clickable entry pointing at a route or URL.
    Link,
    /// Visual divider with no label or target.
    Separator,
}

/// Single navigation menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    kind: MenuItemKind,
    label: Cow<'static, str>,
    icon: Cow<'static, str>,
    target: Cow<'static, str>,
    visible: bool,
    action: Option<MenuCommand>,
}

impl MenuItem {
    /// Creates a visible link entry.
    #[must_use]
    pub fn link(
        label: impl Into<Cow<'static, str>>,
        icon: impl Into<Cow<'static, str>>,
        target: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            kind: MenuItemKind::Link,
            label: label.into(),
            icon: icon.into(),
            target: target.into(),
            visible: true,
            action: None,
        }
    }

    /// Creates a separator entry.
    #[must_use]
    pub const fn separator() -> Self {
        Self {
            kind: MenuItemKind::Separator,
            label: Cow::Borrowed(""),
            icon: Cow::Borrowed(""),
            target: Cow::Borrowed(""),
            visible: true,
            action: None,
        }
    }

    /// Attaches a command to the entry.
    #[must_use]
    pub const fn with_action(mut self, action: MenuCommand) -> Self {
        self.action = Some(action);
        self
    }

    /// Sets entry visibility.
    #[must_use]
    pub const fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Link or separator.
    #[must_use]
    pub const fn kind(&self) -> MenuItemKind {
        self.kind
    }

    /// Display text.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Icon class string.
    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// Route or URL the entry navigates to.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Whether the entry is shown.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Command run when the entry is activated.
    #[must_use]
    pub const fn action(&self) -> Option<MenuCommand> {
        self.action
    }

    /// Whether this is a divider.
    #[must_use]
    pub const fn is_separator(&self) -> bool {
        matches!(self.kind, MenuItemKind::Separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_defaults() {
        let item = MenuItem::link("Home", "pi pi-home", "/");

        assert_eq!(item.kind(), MenuItemKind::Link);
        assert!(item.is_visible());
        assert_eq!(item.action(), None);
    }

    #[test]
    fn test_builder_sets_action_and_visibility() {
        let item = MenuItem::link("Login", "pi pi-sign-in", "/login")
            .with_action(MenuCommand::Login)
            .with_visible(false);

        assert_eq!(item.action(), Some(MenuCommand::Login));
        assert!(!item.is_visible());
    }

    #[test]
    fn test_separator_is_blank() {
        let item = MenuItem::separator();

        assert!(item.is_separator());
        assert!(item.label().is_empty());
        assert!(item.target().is_empty());
    }
}
