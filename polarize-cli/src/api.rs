use anyhow::{Context, Result, anyhow, bail};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use std::time::Duration;

use polarize_core::PlayerLevel;
use polarize_finance::{SessionPayload, SessionReceipt};

use crate::config::Config;

/// `GET /players/current` response body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    level: String,
    #[serde(default)]
    progress: f64,
    limits: Limits,
}

#[derive(Debug, Deserialize)]
struct Limits {
    normal: f64,
    phase: f64,
}

impl From<PlayerResponse> for PlayerLevel {
    fn from(r: PlayerResponse) -> Self {
        let mut level = PlayerLevel::new(r.level, r.limits.normal, r.limits.phase);
        level.level_progress = r.progress;
        level
    }
}

/// Thin client for the tracker API
pub struct TrackerClient {
    base_url: String,
    token: Option<String>,
    timeout: Duration,
    client: reqwest::Client,
}

impl TrackerClient {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            base_url: cfg.api.base_url.trim_end_matches('/').to_string(),
            token: cfg.token(),
            timeout: Duration::from_secs(cfg.api.timeout_secs.max(1)),
            client: reqwest::Client::new(),
        }
    }

    fn headers(&self) -> Result<HeaderMap> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| anyhow!("missing tracker token; set POLARIZE_TOKEN or [api].token"))?;
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}"))?);
        Ok(headers)
    }

    pub async fn fetch_player_level(&self) -> Result<PlayerLevel> {
        let url = format!("{}/players/current", self.base_url);
        let resp = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .timeout(self.timeout)
            .send()
            .await
            .with_context(|| format!("requesting {url}"))?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("tracker error: {status} {txt}");
        }

        let body: PlayerResponse = resp.json().await.context("parse player response")?;
        let level = PlayerLevel::from(body);
        level.validate()?;
        Ok(level)
    }

    pub async fn submit_session(&self, payload: &SessionPayload) -> Result<String> {
        let url = format!("{}/sessions", self.base_url);
        let resp = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await
            .with_context(|| format!("posting {url}"))?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("tracker rejected session: {status} {txt}");
        }

        let receipt: SessionReceipt = resp.json().await.context("parse session response")?;
        receipt
            .session_id
            .ok_or_else(|| anyhow!("tracker response carried no sessionId"))
    }
}

/// Ask the tracker for the player's caps, falling back to the configured level
pub async fn resolve_player_level(cfg: &Config, offline: bool) -> PlayerLevel {
    let configured = cfg.level.to_player_level();
    if offline {
        return configured;
    }
    if cfg.token().is_none() {
        log::info!("no tracker token; using configured level {}", configured.level);
        return configured;
    }
    match TrackerClient::from_config(cfg).fetch_player_level().await {
        Ok(level) => {
            log::info!("player level {} (normal {}, phase {})", level.level, level.normal_limit, level.phase_limit);
            level
        }
        Err(e) => {
            log::warn!("player level unavailable ({e:#}); using configured level {}", configured.level);
            configured
        }
    }
}
