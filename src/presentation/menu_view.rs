//! Plain-text rendering of the navigation menu.

use std::fmt::Write;

use crate::application::services::MenuReconciler;
use crate::domain::entities::{MenuCommand, MenuItem};

const SEPARATOR: &str = "────────────────────";

/// Renders the visible entries of both menus, one per line.
#[must_use]
pub fn render_menu(menu: &MenuReconciler) -> String {
    let mut out = String::new();

    out.push_str("Navigation\n");
    render_items(&mut out, &menu.main_items());
    out.push('\n');
    let _ = writeln!(out, "Account ({})", menu.state());
    render_items(&mut out, &menu.user_items());

    out
}

fn render_items(out: &mut String, items: &[MenuItem]) {
    for item in items.iter().filter(|item| item.is_visible()) {
        if item.is_separator() {
            let _ = writeln!(out, "  {SEPARATOR}");
            continue;
        }

        let _ = write!(out, "  {:<10} {:<10}", item.label(), item.target());
        if let Some(command) = item.action() {
            let _ = write!(out, " [{}]", command_name(command));
        }
        out.push('\n');
    }
}

const fn command_name(command: MenuCommand) -> &'static str {
    match command {
        MenuCommand::Login => "login",
        MenuCommand::Logout => "logout",
    }
}
