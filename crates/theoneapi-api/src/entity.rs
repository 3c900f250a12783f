//! Entity types decoded from the `docs` array of a response envelope.
//!
//! Field names follow Rust conventions; the camelCase keys of the API are
//! mapped by serde (`runtimeInMinutes` -> `runtime_in_minutes`, `_id` -> `id`).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::descriptor::ResourceFamily;

/// A record type that belongs to one resource family.
pub trait Entity: DeserializeOwned {
    /// Family whose operation table serves this entity.
    const FAMILY: ResourceFamily;
}

/// A movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// API-assigned identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Title.
    pub name: String,
    /// Runtime in minutes.
    pub runtime_in_minutes: u32,
    /// Budget in millions of USD.
    pub budget_in_millions: f64,
    /// Box office revenue in millions of USD.
    pub box_office_revenue_in_millions: f64,
    /// Number of Academy Award nominations.
    pub academy_award_nominations: u32,
    /// Number of Academy Awards won.
    pub academy_award_wins: u32,
    /// Rotten Tomatoes score.
    pub rotten_tomatoes_score: f64,
}

impl Entity for Movie {
    const FAMILY: ResourceFamily = ResourceFamily::Movie;
}

/// A quote spoken in a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// API-assigned identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Spoken line.
    pub dialog: String,
    /// Id of the movie the quote belongs to.
    pub movie: String,
    /// Id of the speaking character.
    pub character: String,
}

impl Entity for Quote {
    const FAMILY: ResourceFamily = ResourceFamily::Quote;
}
