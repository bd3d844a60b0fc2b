//! Minimal freedesktop `.desktop` file parser.
//!
//! Only the `[Desktop Entry]` group is read, and only the keys needed to
//! decide visibility and build a launch command.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9-]+)(?:\[([^\]]+)\])?\s*=\s*(.*)$").unwrap());

static FIELD_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"%[fFuUdDnNickvm]").unwrap());

/// Parsed `[Desktop Entry]` group.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DesktopEntry {
    values: HashMap<String, String>,
    localized: HashMap<(String, String), String>,
}

impl DesktopEntry {
    pub fn parse(content: &str) -> DesktopEntry {
        let mut entry = DesktopEntry::default();
        let mut in_main_group = false;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.starts_with('[') {
                in_main_group = line == "[Desktop Entry]";
                continue;
            }
            if !in_main_group {
                continue;
            }
            let Some(caps) = KEY_RE.captures(line) else {
                continue;
            };
            let key = caps[1].to_string();
            let value = caps[3].trim().to_string();
            match caps.get(2) {
                Some(locale) => {
                    entry.localized.insert((key, locale.as_str().to_string()), value);
                }
                None => {
                    entry.values.entry(key).or_insert(value);
                }
            }
        }

        entry
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Localized value for `key`, trying `lang_COUNTRY` then `lang` before
    /// the unlocalized value. `locale` is a POSIX locale such as `de_DE.UTF-8`.
    pub fn localized(&self, key: &str, locale: Option<&str>) -> Option<&str> {
        if let Some(locale) = locale {
            let full = locale.split(['.', '@']).next().unwrap_or(locale);
            let lang = full.split('_').next().unwrap_or(full);
            for candidate in [full, lang] {
                if let Some(value) = self.localized.get(&(key.to_string(), candidate.to_string())) {
                    return Some(value);
                }
            }
        }
        self.get(key)
    }

    fn flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    fn list(&self, key: &str) -> Vec<String> {
        self.get(key)
            .map(|v| {
                v.split(';')
                    .filter(|s| !s.is_empty())
                    .map(|s| s.to_ascii_lowercase())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether the entry should be listed on a desktop whose
    /// `XDG_CURRENT_DESKTOP` components are `desktops` (lowercase).
    pub fn is_visible(&self, desktops: &[String]) -> bool {
        if self.get("Type") != Some("Application") {
            return false;
        }
        if self.flag("NoDisplay") || self.flag("Hidden") {
            return false;
        }
        match self.get("Exec") {
            None => return false,
            Some(exec) if exec.trim().is_empty() || exec.eq_ignore_ascii_case("false") => {
                return false;
            }
            Some(_) => {}
        }

        let only_show_in = self.list("OnlyShowIn");
        if !only_show_in.is_empty() && !only_show_in.iter().any(|d| desktops.contains(d)) {
            return false;
        }
        let not_show_in = self.list("NotShowIn");
        !not_show_in.iter().any(|d| desktops.contains(d))
    }

    /// `Exec` split into argv with field codes removed.
    pub fn command(&self) -> Vec<String> {
        self.get("Exec").map(split_exec).unwrap_or_default()
    }
}

/// Split an `Exec` value into arguments.
///
/// Double quotes group, backslash escapes inside quotes, `%%` is a literal
/// percent and every other field code is dropped.
pub fn split_exec(exec: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut has_token = false;
    let mut in_quotes = false;
    let mut chars = exec.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            '\\' if in_quotes => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    args.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }
    if has_token {
        args.push(current);
    }

    args.into_iter()
        .filter_map(|arg| {
            let stripped = FIELD_CODE_RE.replace_all(&arg, "").replace("%%", "%");
            if stripped.is_empty() && !arg.is_empty() {
                None
            } else {
                Some(stripped)
            }
        })
        .collect()
}
