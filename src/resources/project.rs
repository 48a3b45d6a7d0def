//
//  bitbucket-provision
//  resources/project.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use tracing::debug;

use super::{found, ResourceId};
use crate::api::cloud::{project_path, repository_path, Project, Repository};
use crate::api::{BitbucketClient, ClientError};
use crate::util::repository_slug;

/// How to find a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectQuery {
    /// By project key.
    Key(String),

    /// By the name of a repository inside the project.
    ContainsRepository(String),
}

impl ResourceId for Project {
    fn id(&self) -> String {
        self.uuid.clone()
    }
}

/// Read-only project lookups in the session's workspace.
#[derive(Debug, Clone, Copy)]
pub struct ProjectLookup<'a> {
    client: &'a BitbucketClient,
}

impl<'a> ProjectLookup<'a> {
    pub fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    /// Finds a project. `None` when the project, or the repository used to
    /// locate it, does not exist.
    pub async fn lookup(&self, query: &ProjectQuery) -> Result<Option<Project>, ClientError> {
        let workspace = self.client.workspace();

        let key = match query {
            ProjectQuery::Key(key) => key.clone(),
            ProjectQuery::ContainsRepository(name) => {
                let path = repository_path(workspace, &repository_slug(name));
                let Some(repository) = found(self.client.get::<Repository>(&path).await)? else {
                    return Ok(None);
                };
                let Some(project) = repository.project.filter(|p| !p.key.is_empty()) else {
                    return Ok(None);
                };
                debug!(repository = %name, key = %project.key, "Resolved project from repository");
                project.key
            }
        };

        found(self.client.get(&project_path(workspace, &key)).await)
    }
}
