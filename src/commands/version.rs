//! Version command implementation

use crate::error::Result;
use crate::manifest::MANIFEST_VERSION;

/// Run version command
pub fn run() -> Result<()> {
    println!("promptkit {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Build info:");
    println!("  Manifest schema: {MANIFEST_VERSION}");
    println!("  Profile: {}", build_profile());

    Ok(())
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_runs() {
        assert!(run().is_ok());
    }
}
