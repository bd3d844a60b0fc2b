//! Parsing of the compositor layout tree.

use serde::Deserialize;
use waypoint_common::PlatformError;

use super::WindowInfo;

#[derive(Debug, Deserialize)]
struct Node {
    id: i64,
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type", default)]
    node_type: String,
    #[serde(default)]
    app_id: Option<String>,
    #[serde(default)]
    pid: Option<i64>,
    /// X11 window id; set for XWayland clients and every i3 window.
    #[serde(default)]
    window: Option<i64>,
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    floating_nodes: Vec<Node>,
    /// Child ids, most recently focused first.
    #[serde(default)]
    focus: Vec<i64>,
}

impl Node {
    fn is_window(&self) -> bool {
        matches!(self.node_type.as_str(), "con" | "floating_con")
            && self.nodes.is_empty()
            && self.floating_nodes.is_empty()
            && (self.pid.is_some() || self.window.is_some())
    }

    fn title(&self) -> String {
        match (&self.name, &self.app_id) {
            (Some(name), _) if !name.is_empty() => name.clone(),
            (_, Some(app_id)) if !app_id.is_empty() => app_id.clone(),
            _ => String::from("unnamed window"),
        }
    }

    /// Children in focus order; ids absent from `focus` keep tree order at the end.
    fn children_by_focus(&self) -> Vec<&Node> {
        let mut children: Vec<&Node> = self.nodes.iter().chain(&self.floating_nodes).collect();
        children.sort_by_key(|child| {
            self.focus
                .iter()
                .position(|id| *id == child.id)
                .unwrap_or(usize::MAX)
        });
        children
    }
}

/// Parse `get_tree` output into windows, most recently focused first.
pub fn parse_tree(json: &str) -> Result<Vec<WindowInfo>, PlatformError> {
    let root: Node = serde_json::from_str(json)
        .map_err(|e| PlatformError::Parse(format!("invalid window tree: {e}")))?;

    let mut windows = Vec::new();
    collect(&root, None, &mut windows);
    Ok(windows)
}

fn collect(node: &Node, workspace: Option<&str>, out: &mut Vec<WindowInfo>) {
    if node.is_window() {
        out.push(WindowInfo {
            id: node.id,
            title: node.title(),
            app_id: node.app_id.clone(),
            workspace: workspace.map(str::to_string),
        });
        return;
    }

    let workspace = if node.node_type == "workspace" {
        node.name.as_deref()
    } else {
        workspace
    };
    for child in node.children_by_focus() {
        collect(child, workspace, out);
    }
}
