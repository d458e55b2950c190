//! List-repos command - show what a namespace owns

use std::fmt;

use clap::Args;
use orgshift_core::report::write_grid;
use orgshift_core::{Config, Repository, TransferCoordinator};

/// Arguments for the list-repos command
#[derive(Args, Debug)]
pub struct ListReposArgs {
    /// Organization or user name
    #[arg(long)]
    pub org: String,
}

impl ListReposArgs {
    /// Execute the list-repos command
    pub async fn execute(&self, config: &Config, token: Option<&str>) -> anyhow::Result<()> {
        let client = super::github_client(config, token)?;
        let coordinator = TransferCoordinator::new(client, config.transfer.clone());

        let repos = coordinator.list_source(&self.org).await?;

        println!();
        if repos.is_empty() {
            println!("No repositories found in '{}'.", self.org);
        } else {
            println!("Repositories in '{}':", self.org);
            print!("{}", RepoTable(&repos));
        }

        Ok(())
    }
}

/// Grid of name, visibility, fork flag and size
struct RepoTable<'a>(&'a [Repository]);

impl fmt::Display for RepoTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sizes: Vec<String> = self.0.iter().map(|r| r.size_kb.to_string()).collect();
        let rows: Vec<[&str; 4]> = self
            .0
            .iter()
            .zip(&sizes)
            .map(|(repo, size)| {
                [
                    repo.name.as_str(),
                    if repo.is_private { "private" } else { "public" },
                    if repo.is_fork { "fork" } else { "original" },
                    size.as_str(),
                ]
            })
            .collect();

        write_grid(f, &["Name", "Visibility", "Type", "Size (KB)"], &rows)
    }
}
