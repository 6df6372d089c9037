// Runs before the build to fetch the commit hash from git,
// the build version is exported as an environment variable for the crate.

use std::{env, process::Command};

fn main() {
    // Read at run time, rerun-if-env-changed reruns this script with the new value
    let commit_hash = match env::var("HASHGRAPH_COMMIT_HASH") {
        Ok(hash) if !hash.is_empty() => hash.chars().take(7).collect(),
        _ => match Command::new("git")
            .args(["rev-parse", "--short", "HEAD"])
            .output()
        {
            Ok(output) if output.status.success() => {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            }
            // No git available (source tarball, sandboxed build)
            _ => "unknown".to_string(),
        },
    };

    let build_version = format!("{}-{}", env!("CARGO_PKG_VERSION"), commit_hash);
    println!("cargo:rerun-if-env-changed=HASHGRAPH_COMMIT_HASH");
    println!("cargo:rustc-env=BUILD_VERSION={build_version}");
}
