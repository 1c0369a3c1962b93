use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::AppError;
use crate::fetcher::{Fetch, FetchError};

use super::models::*;

const USER_AGENT: &str = concat!("riftscope/", env!("CARGO_PKG_VERSION"));

/// Typed Riot API client.
///
/// Every outgoing call passes through a local 20 req/s limiter, the
/// development-key budget. Batch pacing on top of that is the fetcher's job.
pub struct RiotApiClient {
    http: reqwest::Client,
    api_key: String,
    platform: String,
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

/// Maps an HTTP rejection into the fetch taxonomy: 429 is retryable,
/// 404 is a definitive no for that key, anything else might clear up later.
fn classify_status(status: StatusCode) -> FetchError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => FetchError::Throttled,
        StatusCode::NOT_FOUND => FetchError::Permanent("not found".to_string()),
        other => FetchError::Transient(format!("unexpected status {}", other)),
    }
}

/// Regional routing value for match and account endpoints.
fn routing_for_platform(platform: &str) -> &'static str {
    match platform {
        "na1" | "br1" | "la1" | "la2" => "americas",
        "euw1" | "eun1" | "tr1" | "ru" => "europe",
        "kr" | "jp1" => "asia",
        "oc1" | "ph2" | "sg2" | "th2" | "vn2" => "sea",
        _ => "europe", // default
    }
}

impl RiotApiClient {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        // 20 requests per second rate limit
        let limiter = RateLimiter::direct(Quota::per_second(NonZeroU32::new(20).unwrap()));

        Ok(RiotApiClient {
            http,
            api_key: config.api_key,
            platform: config.region,
            limiter,
        })
    }

    fn routing(&self) -> &'static str {
        routing_for_platform(&self.platform)
    }

    async fn get_json<D: DeserializeOwned>(&self, url: &str) -> Result<D, FetchError> {
        self.limiter.until_ready().await;

        let response = self
            .http
            .get(url)
            .header("X-Riot-Token", &self.api_key)
            .send()
            .await
            .map_err(|e| FetchError::Transient(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(status));
        }

        response
            .json::<D>()
            .await
            .map_err(|e| FetchError::Permanent(format!("malformed response: {}", e)))
    }

    pub async fn get_account(
        &self,
        game_name: &str,
        tag_line: &str,
    ) -> Result<AccountDto, AppError> {
        let url = format!(
            "https://{}.api.riotgames.com/riot/account/v1/accounts/by-riot-id/{}/{}",
            self.routing(),
            urlencoding::encode(game_name),
            urlencoding::encode(tag_line)
        );

        self.get_json(&url).await.map_err(|e| match e {
            FetchError::Permanent(_) => {
                AppError::PlayerNotFound(format!("{}#{}", game_name, tag_line))
            }
            other => other.into(),
        })
    }

    pub async fn get_summoner(&self, puuid: &str) -> Result<SummonerDto, AppError> {
        let url = format!(
            "https://{}.api.riotgames.com/lol/summoner/v4/summoners/by-puuid/{}",
            self.platform, puuid
        );

        Ok(self.get_json(&url).await?)
    }

    pub async fn get_league_entries(&self, puuid: &str) -> Result<Vec<LeagueEntryDto>, AppError> {
        let url = format!(
            "https://{}.api.riotgames.com/lol/league/v4/entries/by-puuid/{}",
            self.platform, puuid
        );

        Ok(self.get_json(&url).await?)
    }

    pub async fn get_match_ids(&self, puuid: &str, count: usize) -> Result<Vec<String>, AppError> {
        let url = format!(
            "https://{}.api.riotgames.com/lol/match/v5/matches/by-puuid/{}/ids?start=0&count={}",
            self.routing(),
            puuid,
            count
        );

        Ok(self.get_json(&url).await?)
    }

    pub(crate) async fn fetch_match(&self, match_id: &str) -> Result<MatchDto, FetchError> {
        let url = format!(
            "https://{}.api.riotgames.com/lol/match/v5/matches/{}",
            self.routing(),
            match_id
        );

        self.get_json(&url).await
    }

    /// Turns a match-ID list into fetcher requests against this client.
    pub fn match_requests(self: &Arc<Self>, match_ids: Vec<String>) -> Vec<MatchRequest> {
        match_ids
            .into_iter()
            .map(|match_id| MatchRequest {
                client: Arc::clone(self),
                match_id,
            })
            .collect()
    }
}

/// One match-detail lookup, keyed by match ID.
pub struct MatchRequest {
    client: Arc<RiotApiClient>,
    match_id: String,
}

#[async_trait]
impl Fetch for MatchRequest {
    type Output = MatchDto;

    fn key(&self) -> &str {
        &self.match_id
    }

    async fn execute(&self) -> Result<MatchDto, FetchError> {
        self.client.fetch_match(&self.match_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_statuses_onto_fetch_taxonomy() {
        assert!(matches!(
            classify_status(StatusCode::TOO_MANY_REQUESTS),
            FetchError::Throttled
        ));
        assert!(matches!(
            classify_status(StatusCode::NOT_FOUND),
            FetchError::Permanent(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR),
            FetchError::Transient(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::FORBIDDEN),
            FetchError::Transient(_)
        ));
    }

    #[test]
    fn routes_platforms_to_regions() {
        assert_eq!(routing_for_platform("na1"), "americas");
        assert_eq!(routing_for_platform("euw1"), "europe");
        assert_eq!(routing_for_platform("kr"), "asia");
        assert_eq!(routing_for_platform("oc1"), "sea");
        assert_eq!(routing_for_platform("unknown"), "europe");
    }
}
