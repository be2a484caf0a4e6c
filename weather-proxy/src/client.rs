//! Visual Crossing timeline client: one outbound GET per cache miss.

use chrono::{Duration, NaiveDate, Utc};

use crate::error::ProxyError;

const TIMELINE_URL: &str =
    "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastRange {
    Today,
    Tomorrow,
    Week,
}

impl ForecastRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastRange::Today => "today",
            ForecastRange::Tomorrow => "tomorrow",
            ForecastRange::Week => "week",
        }
    }

    /// Cached per range and location; a week forecast must not answer a
    /// today query.
    pub fn cache_key(&self, location: &str) -> String {
        format!("{}:{location}", self.as_str())
    }

    fn span_days(&self) -> i64 {
        match self {
            ForecastRange::Today => 0,
            ForecastRange::Tomorrow => 1,
            ForecastRange::Week => 5,
        }
    }
}

pub struct WeatherClient {
    http: reqwest::Client,
    api_token: String,
}

impl WeatherClient {
    pub fn new(api_token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_token,
        }
    }

    /// Fetch the raw timeline JSON for `location` over `range`, anchored
    /// at today's date.
    pub async fn fetch(&self, location: &str, range: ForecastRange) -> Result<String, ProxyError> {
        let start = Utc::now().date_naive();
        let end = start + Duration::days(range.span_days());

        let url = self.timeline_url(location, start, end);
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ProxyError::UpstreamStatus(response.status()));
        }

        Ok(response.text().await?)
    }

    fn timeline_url(&self, location: &str, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{TIMELINE_URL}/{location}/{start}/{end}?key={}&unitGroup=metric&contentType=json",
            self.api_token
        )
    }
}
