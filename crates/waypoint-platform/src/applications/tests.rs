use super::*;
use std::fs;

const FIREFOX: &str = "[Desktop Entry]
Type=Application
Name=Firefox
Name[de]=Firefox Webbrowser
Icon=firefox
Exec=firefox %u

[Desktop Action new-window]
Name=New Window
Exec=firefox --new-window
";

fn write(dir: &Path, name: &str, content: &str) {
    if let Some(parent) = dir.join(name).parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn parse_reads_only_the_main_group() {
    let entry = DesktopEntry::parse(FIREFOX);
    assert_eq!(entry.get("Name"), Some("Firefox"));
    assert_eq!(entry.get("Exec"), Some("firefox %u"));
    assert_eq!(entry.command(), vec!["firefox"]);
}

#[test]
fn localized_name_prefers_language() {
    let entry = DesktopEntry::parse(FIREFOX);
    assert_eq!(entry.localized("Name", Some("de_DE.UTF-8")), Some("Firefox Webbrowser"));
    assert_eq!(entry.localized("Name", Some("fr_FR.UTF-8")), Some("Firefox"));
    assert_eq!(entry.localized("Name", None), Some("Firefox"));
}

#[test]
fn visibility_rules() {
    let desktops = vec!["sway".to_string()];
    assert!(DesktopEntry::parse(FIREFOX).is_visible(&desktops));

    let hidden = "[Desktop Entry]\nType=Application\nName=X\nExec=x\nNoDisplay=true\n";
    assert!(!DesktopEntry::parse(hidden).is_visible(&desktops));

    let link = "[Desktop Entry]\nType=Link\nName=X\nURL=https://example.com\n";
    assert!(!DesktopEntry::parse(link).is_visible(&desktops));

    let exec_false = "[Desktop Entry]\nType=Application\nName=X\nExec=false\n";
    assert!(!DesktopEntry::parse(exec_false).is_visible(&desktops));

    let gnome_only = "[Desktop Entry]\nType=Application\nName=X\nExec=x\nOnlyShowIn=GNOME;\n";
    assert!(!DesktopEntry::parse(gnome_only).is_visible(&desktops));
    assert!(DesktopEntry::parse(gnome_only).is_visible(&["gnome".to_string()]));

    let not_sway = "[Desktop Entry]\nType=Application\nName=X\nExec=x\nNotShowIn=sway;KDE;\n";
    assert!(!DesktopEntry::parse(not_sway).is_visible(&desktops));
}

#[test]
fn split_exec_handles_quotes_and_field_codes() {
    assert_eq!(
        split_exec(r#"env "MY VAR=1" app --file %F --name %c"#),
        vec!["env", "MY VAR=1", "app", "--file", "--name"]
    );
    assert_eq!(split_exec(r#""/opt/My App/bin" --x"#), vec!["/opt/My App/bin", "--x"]);
    assert_eq!(split_exec("printf 100%%"), vec!["printf", "100%"]);
    assert_eq!(split_exec(r#"sh -c "echo \"hi\"""#), vec!["sh", "-c", "echo \"hi\""]);
}

#[test]
fn fetch_scans_directories_with_precedence() {
    let user = tempfile::tempdir().unwrap();
    let system = tempfile::tempdir().unwrap();

    write(system.path(), "firefox.desktop", FIREFOX);
    write(
        system.path(),
        "foot.desktop",
        "[Desktop Entry]\nType=Application\nName=Foot\nExec=foot\nIcon=foot\n",
    );
    write(
        system.path(),
        "kde/konsole.desktop",
        "[Desktop Entry]\nType=Application\nName=Konsole\nExec=konsole\n",
    );
    write(system.path(), "README", "not a desktop file");
    // The user's copy hides the system entry.
    write(
        user.path(),
        "foot.desktop",
        "[Desktop Entry]\nType=Application\nName=Foot\nExec=foot\nHidden=true\n",
    );

    let source = DesktopEntries::new(vec![
        user.path().to_path_buf(),
        PathBuf::from("/nonexistent/waypoint/applications"),
        system.path().to_path_buf(),
    ])
    .with_desktops(vec!["sway".into()]);

    let mut apps = source.fetch_applications().unwrap();
    apps.sort_by(|a, b| a.id.cmp(&b.id));

    let ids: Vec<&str> = apps.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["firefox.desktop", "kde-konsole.desktop"]);
    assert_eq!(apps[0].icon.as_deref(), Some("firefox"));
    assert_eq!(apps[0].desktop_file, system.path().join("firefox.desktop"));
    assert_eq!(apps[1].command, vec!["konsole"]);
}

#[test]
fn fetch_uses_configured_locale() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "firefox.desktop", FIREFOX);

    let apps = DesktopEntries::new(vec![dir.path().to_path_buf()])
        .with_locale("de_AT.UTF-8")
        .fetch_applications()
        .unwrap();
    assert_eq!(apps[0].name, "Firefox Webbrowser");
}
