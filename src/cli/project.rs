//
//  bitbucket-provision
//  cli/project.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Project lookup command
//!
//! Projects can be found by key, or through any repository they contain:
//!
//! ```bash
//! bbp project --key WEB
//! bbp project --repository "Marketing Site"
//! ```

use anyhow::Result;
use clap::Args;

use crate::resources::{ProjectLookup, ProjectQuery};

use super::{GlobalOptions, NotFound};

/// Look up a project
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct ProjectCommand {
    /// Project key
    #[arg(long, short = 'k')]
    pub key: Option<String>,

    /// Name of a repository inside the project
    #[arg(long, short = 'r')]
    pub repository: Option<String>,
}

impl ProjectCommand {
    fn query(&self) -> ProjectQuery {
        match (&self.key, &self.repository) {
            (_, Some(repository)) => ProjectQuery::ContainsRepository(repository.clone()),
            (Some(key), None) => ProjectQuery::Key(key.clone()),
            (None, None) => ProjectQuery::Key(String::new()),
        }
    }

    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let query = self.query();
        let client = global.connect().await?;

        match ProjectLookup::new(&client).lookup(&query).await? {
            Some(project) => {
                println!("{}", serde_json::to_string_pretty(&project)?);
                Ok(())
            }
            None => {
                let what = match query {
                    ProjectQuery::Key(key) => format!("project '{}'", key),
                    ProjectQuery::ContainsRepository(name) => {
                        format!("project containing repository '{}'", name)
                    }
                };
                Err(NotFound(what).into())
            }
        }
    }
}
