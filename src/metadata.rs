//! External movie metadata lookup. The store only ever consumes the
//! `MovieMetadata` shape; the OMDb client is one implementation behind the
//! `MetadataSource` seam so menu handlers can be driven without a network.

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

const OMDB_BASE_URL: &str = "https://www.omdbapi.com/";

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("could not reach the movie api: {0}")]
    Request(#[from] reqwest::Error),

    #[error("no movie named '{0}' was found")]
    NotFound(String),

    #[error("unexpected api response: {0}")]
    Decode(String),
}

/// What a lookup yields for a title.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieMetadata {
    pub title: String,
    pub year: i64,
    pub rating: f64,
    pub poster_url: Option<String>,
}

pub trait MetadataSource {
    fn lookup(&self, title: &str) -> Result<MovieMetadata, MetadataError>;
}

/// Blocking OMDb client (https://www.omdbapi.com/), keyed per request.
pub struct OmdbClient {
    client: reqwest::blocking::Client,
    api_key: String,
}

impl OmdbClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        OmdbClient {
            client: reqwest::blocking::Client::new(),
            api_key: api_key.into(),
        }
    }

}

impl MetadataSource for OmdbClient {
    fn lookup(&self, title: &str) -> Result<MovieMetadata, MetadataError> {
        debug!(title, "looking up movie metadata");
        let response: OmdbResponse = self
            .client
            .get(OMDB_BASE_URL)
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .send()?
            .error_for_status()?
            .json()?;
        response.into_metadata(title)
    }
}

/// OMDb's wire format. `Response` is the string "True" or "False"; on
/// "False" only `Error` is populated.
#[derive(Debug, Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

impl OmdbResponse {
    fn into_metadata(self, requested: &str) -> Result<MovieMetadata, MetadataError> {
        if self.response != "True" {
            return match self.error.as_deref() {
                Some("Movie not found!") | None => {
                    Err(MetadataError::NotFound(requested.to_owned()))
                }
                Some(other) => Err(MetadataError::Decode(other.to_owned())),
            };
        }
        let year = self
            .year
            .as_deref()
            .and_then(parse_year)
            .ok_or_else(|| MetadataError::Decode(format!("unparseable year {:?}", self.year)))?;
        Ok(MovieMetadata {
            title: self.title.unwrap_or_else(|| requested.to_owned()),
            year,
            rating: self.imdb_rating.as_deref().and_then(parse_rating).unwrap_or(0.0),
            poster_url: self.poster.filter(|poster| poster.as_str() != "N/A"),
        })
    }
}

/// OMDb reports series as ranges like "1999-2003"; the leading year wins.
fn parse_year(raw: &str) -> Option<i64> {
    let digits: String = raw.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

fn parse_rating(raw: &str) -> Option<f64> {
    match raw {
        "N/A" => None,
        other => other.parse().ok(),
    }
}
