//! monman, the monitor manager. Finds connected monitors with xrandr and
//! switches between a configured layout and the primary screen alone.

pub mod layout;
pub mod xrandr;

use std::{env, path::PathBuf};

use anyhow::{anyhow, Result};
use log::{info, warn};

pub use layout::{Direction, Layout};
pub use xrandr::{SystemXrandr, Xrandr};

/// `~/.config/monitors.json`
pub fn default_config_path() -> Result<PathBuf> {
    let home = env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .ok_or_else(|| anyhow!("HOME is not set"))?;
    Ok(PathBuf::from(home).join(".config").join("monitors.json"))
}

pub struct Monman<X> {
    xrandr: X,
    sort: bool,
    dry_run: bool,
}

impl<X: Xrandr> Monman<X> {
    pub fn new(xrandr: X, sort: bool, dry_run: bool) -> Self {
        Self {
            xrandr,
            sort,
            dry_run,
        }
    }

    fn outputs(&self) -> Result<Vec<xrandr::Output>> {
        Ok(xrandr::parse_query(&self.xrandr.query()?))
    }

    pub fn connected(&self) -> Result<Vec<String>> {
        let connected = xrandr::connected_monitors(&self.outputs()?, self.sort);
        info!("List of connected monitors: {:?}", connected);
        Ok(connected)
    }

    pub fn check(&self, monitor: &str) -> Result<bool> {
        let connected = self.connected()?.iter().any(|m| m == monitor);
        info!(
            "{} is {}",
            monitor,
            if connected { "connected!" } else { "not connected!" }
        );
        Ok(connected)
    }

    pub fn activate(&self, layout: &Layout, direction: Direction) -> Result<()> {
        let connected = self.connected()?;
        let args = layout::activate_args(layout, &connected, direction)?;
        if args.is_empty() {
            warn!("None of the configured monitors is connected, nothing to do");
            return Ok(());
        }

        self.apply(args)?;
        info!("Successfully set new screen configuration!");
        Ok(())
    }

    pub fn deactivate(&self) -> Result<()> {
        let external = xrandr::external_outputs(&self.outputs()?, self.sort);
        info!("List of external outputs: {:?}", external);
        if external.is_empty() {
            info!("No external outputs, nothing to do");
            return Ok(());
        }

        self.apply(layout::deactivate_args(&external))?;
        info!("Successfully disabled all external monitors!");
        Ok(())
    }

    fn apply(&self, mut args: Vec<String>) -> Result<()> {
        if self.dry_run {
            args.insert(0, "--dryrun".to_string());
        }
        self.xrandr.apply(&args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    const QUERY: &str = "\
Screen 0: minimum 320 x 200, current 3840 x 1080, maximum 16384 x 16384
eDP-1 connected primary 1920x1080+0+0 (normal left inverted right x axis y axis) 309mm x 174mm
   1920x1080     60.02*+
HDMI-1 connected 1920x1080+1920+0 (normal left inverted right x axis y axis) 527mm x 296mm
   1920x1080     60.00*+
DP-1 disconnected (normal left inverted right x axis y axis)
";

    #[derive(Default)]
    struct FakeXrandr {
        applied: RefCell<Vec<Vec<String>>>,
    }

    impl Xrandr for &FakeXrandr {
        fn query(&self) -> Result<String> {
            Ok(QUERY.to_string())
        }

        fn apply(&self, args: &[String]) -> Result<()> {
            self.applied.borrow_mut().push(args.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_check() {
        let fake = FakeXrandr::default();
        let monman = Monman::new(&fake, false, false);

        assert!(monman.check("HDMI-1").unwrap());
        assert!(!monman.check("DP-1").unwrap());
        assert!(fake.applied.borrow().is_empty());
    }

    #[test]
    fn test_activate_with_dry_run() {
        let fake = FakeXrandr::default();
        let monman = Monman::new(&fake, false, true);
        let layout: Layout =
            serde_json::from_value(json!([{ "eDP-1": { "auto": true }, "HDMI-1": { "auto": true } }]))
                .unwrap();

        monman.activate(&layout, Direction::LeftOf).unwrap();

        assert_eq!(
            *fake.applied.borrow(),
            vec![vec![
                "--dryrun", "--output", "eDP-1", "--auto", "--output", "HDMI-1", "--left-of",
                "eDP-1", "--auto"
            ]]
        );
    }

    #[test]
    fn test_activate_without_connected_monitors_does_nothing() {
        let fake = FakeXrandr::default();
        let monman = Monman::new(&fake, false, false);
        let layout: Layout = serde_json::from_value(json!([{ "DP-9": { "auto": true } }])).unwrap();

        monman.activate(&layout, Direction::RightOf).unwrap();
        assert!(fake.applied.borrow().is_empty());
    }

    #[test]
    fn test_deactivate_turns_off_every_external_output() {
        let fake = FakeXrandr::default();
        let monman = Monman::new(&fake, true, false);

        monman.deactivate().unwrap();

        assert_eq!(
            *fake.applied.borrow(),
            vec![vec!["--output", "DP-1", "--off", "--output", "HDMI-1", "--off"]]
        );
    }
}
