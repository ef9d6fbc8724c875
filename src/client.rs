//! HTTP client for the Vergil class search API

use anyhow::{Context, Result};
use std::time::Duration;

use vergil_core::api::{self, CLASS_ID_PARAM, TERM_PARAM};
use vergil_core::{ClassRecord, VergilError, VergilResult};

use crate::config::Config;

/// Fetches classes for a single term
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    term: String,
}

impl Client {
    pub fn new(base_url: impl Into<String>, term: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            term: term.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_url, config.term()?, config.timeout())
    }

    /// Fetch and parse the one class matching `class_id`
    pub async fn fetch_class(&self, class_id: &str) -> VergilResult<ClassRecord> {
        tracing::info!(class_id, term = %self.term, "fetching class");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[(CLASS_ID_PARAM, class_id), (TERM_PARAM, self.term.as_str())])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| VergilError::Transport(e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| VergilError::Transport(e.to_string()))?;

        let class = api::parse_response(class_id, &body)?;
        tracing::debug!(
            class_id,
            course = %class.short_course_id,
            slots = class.slot_count(),
            "parsed class"
        );

        Ok(class)
    }

    /// Fetch every class in order, stopping at the first failure
    pub async fn fetch_classes(&self, class_ids: &[String]) -> VergilResult<Vec<ClassRecord>> {
        let mut classes = Vec::with_capacity(class_ids.len());
        for class_id in class_ids {
            classes.push(self.fetch_class(class_id).await?);
        }
        Ok(classes)
    }
}
