use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::TaskRepository;
use crate::config::ClientConfig;
use crate::sync::{build_batch, encode_batch};
use crate::types::{Label, LabelsResponse, SpecialLabels, Task, TasksResponse};

/// Full snapshot; incremental sync is not supported.
const SEQ_NO_FULL: &str = "0";

/// Todoist sync API backend using reqwest
pub struct TodoistBackend {
    client: Client,
    token: String,
    sync_url: String,
    special_labels: SpecialLabels,
}

impl TodoistBackend {
    /// Create a backend against `base_url` with the given API token
    pub fn new(token: &str, base_url: &str, special_labels: SpecialLabels) -> Result<Self> {
        if token.trim().is_empty() {
            anyhow::bail!("API token must not be empty");
        }

        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            token: token.to_string(),
            sync_url: format!("{}/sync", base_url.trim_end_matches('/')),
            special_labels,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(config.token()?, &config.base_url, config.special_labels())
    }

    pub fn special_labels(&self) -> &SpecialLabels {
        &self.special_labels
    }

    /// POST a full-snapshot read of a single resource type
    async fn read_resource<T: DeserializeOwned>(&self, resource: &str) -> Result<T> {
        let resource_types = serde_json::to_string(&[resource])?;
        debug!(url = %self.sync_url, resource, "sync read");

        let response = self
            .client
            .post(&self.sync_url)
            .form(&[
                ("token", self.token.as_str()),
                ("seq_no", SEQ_NO_FULL),
                ("resource_types", resource_types.as_str()),
            ])
            .send()
            .await
            .with_context(|| format!("Failed to request {}", resource))?
            .error_for_status()
            .with_context(|| format!("Sync endpoint rejected {} request", resource))?;

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse {} response", resource))
    }
}

#[async_trait]
impl TaskRepository for TodoistBackend {
    async fn get_all_labels(&self) -> Result<Vec<Label>> {
        let body: LabelsResponse = self.read_resource("labels").await?;
        info!(count = body.labels.len(), "fetched labels");
        Ok(body.labels)
    }

    async fn get_all_tasks(&self) -> Result<Vec<Task>> {
        let body: TasksResponse = self.read_resource("items").await?;
        info!(count = body.items.len(), "fetched tasks");
        Ok(body.items)
    }

    async fn update_tasks(&self, tasks: &[Task]) -> Result<String> {
        let commands = match build_batch(tasks, &self.special_labels) {
            Ok(commands) => commands,
            Err(rejection) => {
                warn!(%rejection, tasks = tasks.len(), "batch not submitted");
                return Ok(rejection.to_string());
            }
        };

        let encoded = encode_batch(&commands).context("Failed to encode commands")?;
        debug!(url = %self.sync_url, commands = commands.len(), "sync write");

        let response = self
            .client
            .post(&self.sync_url)
            .form(&[("token", self.token.as_str()), ("commands", encoded.as_str())])
            .send()
            .await
            .context("Failed to submit commands")?
            .error_for_status()
            .context("Sync endpoint rejected commands")?;

        let body = response
            .text()
            .await
            .context("Failed to read sync response")?;

        info!(commands = commands.len(), "submitted command batch");
        Ok(body)
    }
}
