use std::process::Command;

fn main() {
    // Prefer DIST_OVERLAY_VERSION if set (e.g., by a release workflow),
    // otherwise fall back to git describe for local builds.
    if let Ok(version) = std::env::var("DIST_OVERLAY_VERSION") {
        println!("cargo:rustc-env=DIST_OVERLAY_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=DIST_OVERLAY_VERSION={version}");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=DIST_OVERLAY_VERSION");
}
