use std::process::Command;

use anyhow::{bail, Context, Result};
use log::{debug, info};

/// One output line of `xrandr --query`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub name: String,
    pub connected: bool,
    pub primary: bool,
}

/// Picks the output lines out of `xrandr --query`. Everything else (the
/// `Screen` header and indented mode lines) is skipped.
pub fn parse_query(stdout: &str) -> Vec<Output> {
    stdout
        .lines()
        .filter(|line| !line.starts_with(char::is_whitespace))
        .filter_map(|line| {
            let mut words = line.split_whitespace();
            let name = words.next()?;
            let connected = match words.next()? {
                "connected" => true,
                "disconnected" => false,
                _ => return None,
            };
            let primary = words.next() == Some("primary");
            Some(Output {
                name: name.to_string(),
                connected,
                primary,
            })
        })
        .collect()
}

/// Connected outputs with the primary first.
pub fn connected_monitors(outputs: &[Output], sort: bool) -> Vec<String> {
    let primary = outputs.iter().filter(|o| o.connected && o.primary);
    let mut others: Vec<String> = outputs
        .iter()
        .filter(|o| o.connected && !o.primary)
        .map(|o| o.name.clone())
        .collect();
    if sort {
        others.sort();
    }

    primary.map(|o| o.name.clone()).chain(others).collect()
}

/// Every output but the primary one, connected or not.
pub fn external_outputs(outputs: &[Output], sort: bool) -> Vec<String> {
    let mut external: Vec<String> = outputs
        .iter()
        .filter(|o| !o.primary)
        .map(|o| o.name.clone())
        .collect();
    if sort {
        external.sort();
    }
    external
}

/// The part of monman that talks to the display server.
pub trait Xrandr {
    fn query(&self) -> Result<String>;
    fn apply(&self, args: &[String]) -> Result<()>;
}

pub struct SystemXrandr;

impl Xrandr for SystemXrandr {
    fn query(&self) -> Result<String> {
        let output = Command::new("xrandr")
            .arg("--query")
            .output()
            .context("Failed to run xrandr")?;
        if !output.status.success() {
            bail!("xrandr --query exited with {}", output.status);
        }
        String::from_utf8(output.stdout).context("xrandr printed invalid UTF-8")
    }

    fn apply(&self, args: &[String]) -> Result<()> {
        info!("xrandr {}", args.join(" "));
        let status = Command::new("xrandr")
            .args(args)
            .status()
            .context("Failed to run xrandr")?;
        debug!("xrandr exited with {}", status);
        if !status.success() {
            bail!("Failure to set screen configuration. xrandr exited with {}", status);
        }
        Ok(())
    }
}
