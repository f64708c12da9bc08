use std::{fs, path::Path};

use anyhow::{anyhow, bail, Context, Result};
use serde_json::{Map, Value};

/// Monitors in placement order, each with its xrandr settings. Key order
/// matters, so the map keeps insertion order.
pub type Group = Map<String, Value>;

/// A list of groups, e.g.
///
/// ```json
/// [
///   { "eDP-1": { "auto": true }, "HDMI-1": { "mode": "1920x1080", "rate": 60 } }
/// ]
/// ```
pub type Layout = Vec<Group>;

pub fn load(path: &Path) -> Result<Layout> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Where each monitor goes relative to the previous one in its group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Direction {
    #[default]
    RightOf,
    LeftOf,
    Above,
    Below,
}

impl Direction {
    pub fn flag(&self) -> &'static str {
        match self {
            Direction::RightOf => "--right-of",
            Direction::LeftOf => "--left-of",
            Direction::Above => "--above",
            Direction::Below => "--below",
        }
    }
}

/// xrandr arguments enabling the connected monitors of `layout`. Monitors that
/// are not connected are skipped and do not anchor the next one.
pub fn activate_args(
    layout: &Layout,
    connected: &[String],
    direction: Direction,
) -> Result<Vec<String>> {
    let mut args = Vec::new();

    for group in layout {
        let mut previous: Option<&str> = None;
        for (monitor, settings) in group {
            if !connected.contains(monitor) {
                continue;
            }

            args.push("--output".to_string());
            args.push(monitor.clone());
            if let Some(previous) = previous {
                args.push(direction.flag().to_string());
                args.push(previous.to_string());
            }

            let settings = settings
                .as_object()
                .ok_or_else(|| anyhow!("Settings for {} must be an object", monitor))?;
            for (setting, value) in settings {
                match value {
                    Value::Bool(true) => args.push(format!("--{}", setting)),
                    Value::Bool(false) | Value::Null => {}
                    Value::String(value) => {
                        args.push(format!("--{}", setting));
                        args.push(value.clone());
                    }
                    Value::Number(value) => {
                        args.push(format!("--{}", setting));
                        args.push(value.to_string());
                    }
                    Value::Array(_) | Value::Object(_) => {
                        bail!("Setting {} of {} must be a plain value", setting, monitor)
                    }
                }
            }
            previous = Some(monitor.as_str());
        }
    }
    Ok(args)
}

pub fn deactivate_args(external: &[String]) -> Vec<String> {
    external
        .iter()
        .flat_map(|monitor| ["--output".to_string(), monitor.clone(), "--off".to_string()])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::NamedTempFile;

    fn layout(value: Value) -> Layout {
        serde_json::from_value(value).unwrap()
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_activate_args_follow_config_order() {
        let layout = layout(json!([{
            "eDP-1": { "auto": true },
            "HDMI-1": { "mode": "1920x1080", "rate": 60, "primary": false }
        }]));

        let args = activate_args(&layout, &names(&["eDP-1", "HDMI-1"]), Direction::RightOf).unwrap();

        assert_eq!(
            args,
            [
                "--output", "eDP-1", "--auto", "--output", "HDMI-1", "--right-of", "eDP-1",
                "--mode", "1920x1080", "--rate", "60"
            ]
        );
    }

    #[test]
    fn test_disconnected_monitors_are_skipped() {
        let layout = layout(json!([
            { "DP-1": { "auto": true }, "DP-2": { "auto": true }, "eDP-1": { "auto": true } },
            { "HDMI-1": { "off": true } }
        ]));

        let args = activate_args(&layout, &names(&["eDP-1", "DP-2"]), Direction::Above).unwrap();

        assert_eq!(
            args,
            ["--output", "DP-2", "--auto", "--output", "eDP-1", "--above", "DP-2", "--auto"]
        );
    }

    #[test]
    fn test_nested_setting_is_rejected() {
        let layout = layout(json!([{ "eDP-1": { "mode": ["1920x1080"] } }]));
        assert!(activate_args(&layout, &names(&["eDP-1"]), Direction::RightOf).is_err());
    }

    #[test]
    fn test_deactivate_args() {
        assert_eq!(
            deactivate_args(&names(&["DP-1", "HDMI-1"])),
            ["--output", "DP-1", "--off", "--output", "HDMI-1", "--off"]
        );
    }

    #[test]
    fn test_load_layout_file() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(&temp_file, r#"[{"eDP-1": {"auto": true}, "DP-1": {"auto": true}}]"#).unwrap();

        let layout = load(temp_file.path()).unwrap();
        let order: Vec<&String> = layout[0].keys().collect();
        assert_eq!(order, ["eDP-1", "DP-1"]);
    }
}
