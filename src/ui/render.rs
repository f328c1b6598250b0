//! ui::render
//!
//! Tree rendering for the `list` command.
//!
//! Each node line shows the session id, the title, and the page column as
//! `p. logical/actual` (groups show `no page`). With `--paths`, a `[#k]`
//! badge shows the node's 1-based index among its siblings, so positional
//! paths can be read off level by level.

use std::path::Path;

use crate::core::node::OutlineNode;
use crate::core::types::PageOffset;
use crate::session::Session;

/// Maximum filename length shown in the tree header and the prompt.
pub const LABEL_WIDTH: usize = 10;

/// A filename shortened to at most `maxlen` characters, ellipsized.
pub fn short_label(path: Option<&Path>, maxlen: usize) -> String {
    let Some(path) = path else {
        return "no-file".to_string();
    };
    let base = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    if base.chars().count() <= maxlen {
        return base;
    }
    let mut label: String = base.chars().take(maxlen - 1).collect();
    label.push('…');
    label
}

/// Render the session's outline as a box-drawing tree.
pub fn render_tree(session: &Session, show_paths: bool) -> String {
    let mut out = String::new();
    out.push_str(&short_label(Some(session.path()), LABEL_WIDTH));
    out.push('\n');
    let mut ordinal = 0u32;
    render_children(
        session.tree().roots(),
        "",
        show_paths,
        session.offset(),
        &mut ordinal,
        &mut out,
    );
    out
}

fn render_children(
    nodes: &[OutlineNode],
    prefix: &str,
    show_paths: bool,
    offset: PageOffset,
    ordinal: &mut u32,
    out: &mut String,
) {
    for (i, node) in nodes.iter().enumerate() {
        let last = i + 1 == nodes.len();
        let branch = if last { "└─ " } else { "├─ " };
        *ordinal += 1;

        let badge = if show_paths {
            format!("[#{}] ", i + 1)
        } else {
            String::new()
        };
        let page = match node.page() {
            Some(logical) => format!("p. {}/{}", logical, offset.actual(logical)),
            None => "no page".to_string(),
        };
        out.push_str(&format!(
            "{prefix}{branch}{badge}[n{ordinal}] {title}  ({page})\n",
            ordinal = ordinal,
            title = node.title().as_str(),
        ));

        let child_prefix = format!("{prefix}{}", if last { "   " } else { "│  " });
        render_children(node.children(), &child_prefix, show_paths, offset, ordinal, out);
    }
}
