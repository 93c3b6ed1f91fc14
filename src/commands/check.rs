use anyhow::{bail, Result};
use colored::Colorize;

use crate::toolkit::Toolkit;

pub fn run(toolkit: &Toolkit) -> Result<()> {
    let mut missing = Vec::new();

    for (tool, version) in toolkit.versions() {
        match version {
            Ok(line) => println!("{} {}: {}", "✓".green(), tool, line),
            Err(e) => {
                println!("{} {}: {}", "✗".red(), tool, e);
                missing.push(tool);
            }
        }
    }

    if !missing.is_empty() {
        bail!(
            "The following required tools are not available: {}",
            missing.join(", ")
        );
    }
    Ok(())
}
