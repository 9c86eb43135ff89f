//! Plain-text rendering of a structure listing.

use codepack_scan::{TreeEntry, TreeListing};

use crate::size::format_size;

/// Timestamp layout for modification times.
pub const OUTLINE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

const RULE_WIDTH: usize = 80;

/// Render a listing as a detailed tree, a summary and a copy-friendly outline.
pub fn render_tree(listing: &TreeListing) -> String {
    let mut text = String::new();

    push_banner(&mut text, "Project Structure");
    text.push_str(&format!("Path: {}\n\n", listing.root.display()));
    for entry in &listing.entries {
        text.push_str(&detail_line(entry));
        text.push('\n');
    }

    text.push('\n');
    push_banner(&mut text, "Summary");
    text.push_str(&format!("Total files: {}\n", listing.total_files()));
    text.push_str(&format!("Total folders: {}\n", listing.total_dirs()));
    text.push_str(&format!("Total size: {}\n", format_size(listing.total_size())));

    text.push('\n');
    push_banner(&mut text, "Project Structure (copy-friendly)");
    for entry in &listing.entries {
        text.push_str(&outline_line(entry));
        text.push('\n');
    }

    text
}

fn push_banner(text: &mut String, title: &str) {
    text.push_str(&"=".repeat(RULE_WIDTH));
    text.push('\n');
    text.push_str(title);
    text.push('\n');
    text.push_str(&"=".repeat(RULE_WIDTH));
    text.push('\n');
}

fn detail_line(entry: &TreeEntry) -> String {
    let indent = "  ".repeat(entry.depth);
    if entry.unreadable {
        return format!("{indent}❌ {} [access error]", entry.name);
    }

    let (icon, size) = if entry.is_dir {
        ("📁", String::new())
    } else {
        ("📄", format!(" ({})", format_size(entry.size)))
    };
    let modified = entry
        .modified
        .map(|time| format!(" - {}", time.format(OUTLINE_TIME_FORMAT)))
        .unwrap_or_default();

    format!("{indent}{icon} {}{size}{modified}", entry.name)
}

fn outline_line(entry: &TreeEntry) -> String {
    let indent = "  ".repeat(entry.depth);
    let branch = if entry.depth > 0 { "├── " } else { "" };
    if entry.is_dir {
        format!("{indent}{branch}{}/", entry.name)
    } else {
        format!("{indent}{branch}{} ({})", entry.name, format_size(entry.size))
    }
}
