use super::*;

const TREE: &str = r#"{
  "id": 1, "type": "root", "name": "root", "focus": [3],
  "nodes": [{
    "id": 3, "type": "output", "name": "eDP-1", "focus": [5, 4],
    "nodes": [
      {
        "id": 4, "type": "workspace", "name": "1", "focus": [11, 10],
        "nodes": [
          {"id": 10, "type": "con", "name": "Terminal", "app_id": "foot", "pid": 100, "nodes": []},
          {"id": 11, "type": "con", "name": "", "app_id": "org.gnome.Nautilus", "pid": 101, "nodes": []}
        ]
      },
      {
        "id": 5, "type": "workspace", "name": "2", "focus": [21, 20],
        "nodes": [
          {"id": 20, "type": "con", "name": "Mozilla Firefox", "window": 4194307, "nodes": []}
        ],
        "floating_nodes": [
          {"id": 21, "type": "floating_con", "name": "Picture-in-Picture", "pid": 102}
        ]
      },
      {"id": 6, "type": "workspace", "name": "3", "nodes": []}
    ]
  }]
}"#;

#[test]
fn windows_are_ordered_most_recently_focused_first() {
    let windows = parse_tree(TREE).unwrap();
    let ids: Vec<i64> = windows.iter().map(|w| w.id).collect();
    assert_eq!(ids, vec![21, 20, 11, 10]);
}

#[test]
fn title_falls_back_to_app_id() {
    let windows = parse_tree(TREE).unwrap();
    let nautilus = windows.iter().find(|w| w.id == 11).unwrap();
    assert_eq!(nautilus.title, "org.gnome.Nautilus");
    assert_eq!(nautilus.workspace.as_deref(), Some("1"));
}

#[test]
fn workspaces_and_containers_are_not_windows() {
    let windows = parse_tree(TREE).unwrap();
    assert!(windows.iter().all(|w| w.id >= 10));
    let firefox = windows.iter().find(|w| w.id == 20).unwrap();
    assert_eq!(firefox.title, "Mozilla Firefox");
    assert_eq!(firefox.app_id, None);
    assert_eq!(firefox.workspace.as_deref(), Some("2"));
}

#[test]
fn invalid_json_is_a_parse_error() {
    let err = parse_tree("{ not json").unwrap_err();
    assert!(matches!(err, PlatformError::Parse(_)));
}

#[test]
fn compositor_programs() {
    assert_eq!(Compositor::Sway.program(), "swaymsg");
    assert_eq!(Compositor::I3.program(), "i3-msg");
    assert_eq!(CompositorTree::default().compositor(), Compositor::Sway);
}
