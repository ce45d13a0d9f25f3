//! Basic usage example for the gitcmd crate
//!
//! Classifies a few remote URLs and checks that git is installed.
//!
//! To run this example:
//! ```sh
//! cd crates/gitcmd
//! cargo run --example basic
//! ```

use gitcmd::{host_and_repo_path, is_git_url, ClientParams, Git, Result};

fn main() -> Result<()> {
    println!("gitcmd Example\n");

    println!("=== URL classification ===");
    for raw in [
        "git@github.com:weaveworks/eks-quickstart-app-dev",
        "https://github.com/org/profile.git",
        "profiles/github.com/org/profile",
    ] {
        if is_git_url(raw) {
            let (host, path) = host_and_repo_path(raw)?;
            println!("{:<52} host={} path={}", raw, host, path);
        } else {
            println!("{:<52} not a Git URL", raw);
        }
    }

    let git = Git::new(ClientParams::default());
    match git.version() {
        Ok(version) => println!("\n✓ {}", version),
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("\nMake sure 'git' is installed and in your PATH.");
            return Err(e);
        }
    }

    Ok(())
}
