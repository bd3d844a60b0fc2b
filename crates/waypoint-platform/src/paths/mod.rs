mod resolve;
mod xdg;

pub use resolve::{config_dir, config_file, expand_home, home_dir};
pub use xdg::application_dirs;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn config_dir_ends_with_waypoint() {
        let path = config_dir().unwrap();
        assert!(
            path.ends_with("waypoint"),
            "config_dir should end with 'waypoint', got: {path:?}"
        );
    }

    #[test]
    fn config_file_has_correct_name() {
        let path = config_file().unwrap();
        assert_eq!(path.file_name().unwrap().to_str().unwrap(), "config.toml");
    }

    #[test]
    fn expand_home_handles_tilde_forms() {
        let home = home_dir().unwrap();
        assert_eq!(expand_home("~").unwrap(), home);
        assert_eq!(expand_home("~/src").unwrap(), home.join("src"));
        assert_eq!(expand_home("/srv/git").unwrap(), PathBuf::from("/srv/git"));
        assert_eq!(expand_home("~other").unwrap(), PathBuf::from("~other"));
    }

    #[test]
    fn application_dirs_follow_xdg_precedence() {
        let dirs = xdg::build_application_dirs(
            &["/opt/apps".to_string()],
            Some(PathBuf::from("/home/me/.local/share")),
            "/usr/local/share:/usr/share::/usr/share",
        )
        .unwrap();
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/opt/apps"),
                PathBuf::from("/home/me/.local/share/applications"),
                PathBuf::from("/usr/local/share/applications"),
                PathBuf::from("/usr/share/applications"),
            ]
        );
    }

    #[test]
    fn application_dirs_without_data_home() {
        let dirs = xdg::build_application_dirs(&[], None, "/usr/share").unwrap();
        assert_eq!(dirs, vec![PathBuf::from("/usr/share/applications")]);
    }
}
