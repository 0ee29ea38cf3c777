//! Terminal formatting for messages and picker rows

use colored::Colorize;
use faves_core::host::MessageLevel;
use faves_core::scope::{GLOBAL_ICON, WORKSPACE_ICON};
use faves_core::search::PickerItem;

/// Format a user-facing message for the terminal
pub fn format_message(level: MessageLevel, content: &str) -> String {
    match level {
        MessageLevel::Info => format!("{} {}", "ℹ".blue(), content),
        MessageLevel::Warning => format!("{} {}", "⚠".yellow(), content.yellow()),
        MessageLevel::Error => format!("{} {}", "✗".red(), content.red()),
    }
}

/// Print a message; info goes to stdout, everything else to stderr
pub fn print_message(level: MessageLevel, content: &str) {
    let line = format_message(level, content);
    match level {
        MessageLevel::Info => println!("{}", line),
        MessageLevel::Warning | MessageLevel::Error => eprintln!("{}", line),
    }
}

/// Glyph for a scope icon name
pub fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        WORKSPACE_ICON => "🏠",
        GLOBAL_ICON => "🌐",
        _ => "•",
    }
}

/// One picker row: icon, label and the dimmed description
pub fn format_item(item: &PickerItem) -> String {
    let mut line = format!("{} {}", icon_glyph(item.icon), item.label);
    if !item.description.is_empty() {
        line.push_str("  ");
        line.push_str(&item.description.dimmed().to_string());
    }
    line
}

/// Plain row for non-interactive output
pub fn format_item_plain(item: &PickerItem) -> String {
    if item.description.is_empty() {
        format!("{}\t{}", item.label, item.location)
    } else {
        format!("{}\t{}\t{}", item.label, item.location, item.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faves_core::search::REMOVE_BUTTON;
    use faves_core::{Favorite, FileHandle};

    fn item(description: &str) -> PickerItem {
        PickerItem {
            label: "main.rs".to_string(),
            description: description.to_string(),
            icon: GLOBAL_ICON,
            buttons: vec![REMOVE_BUTTON],
            favorite: Favorite::new("src/main.rs"),
            location: FileHandle::file("/ws/src/main.rs"),
            store: 1,
        }
    }

    #[test]
    fn test_format_item_plain() {
        assert_eq!(
            format_item_plain(&item("src")),
            "main.rs\t/ws/src/main.rs\tsrc"
        );
        assert_eq!(format_item_plain(&item("")), "main.rs\t/ws/src/main.rs");
    }

    #[test]
    fn test_format_item_shows_description() {
        colored::control::set_override(false);
        assert_eq!(format_item(&item("src")), "🌐 main.rs  src");
        assert_eq!(format_item(&item("")), "🌐 main.rs");
    }

    #[test]
    fn test_icon_glyph_fallback() {
        assert_eq!(icon_glyph("home"), "🏠");
        assert_eq!(icon_glyph("rocket"), "•");
    }
}
