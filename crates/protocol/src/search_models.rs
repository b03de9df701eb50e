//! Flight search request parameters.
//!
//! This module defines the shape of a deep-search request as submitted to
//! the flight search backend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Cabin class requested for a flight search.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "snake_case")]
pub enum CabinClass {
    /// Standard economy cabin.
    #[default]
    Economy,

    /// Premium economy cabin.
    PremiumEconomy,

    /// Business cabin.
    Business,

    /// First class cabin.
    First,
}

/// Parameters for a deep flight search request.
///
/// This is the payload submitted to the backend when starting a new
/// search task. The backend treats the search itself as opaque work and
/// reports back through the task status endpoints.
///
/// # Example
///
/// ```json
/// {
///   "origin": "SFO",
///   "destination": "NRT",
///   "depart_date": "2026-10-01",
///   "return_date": null,
///   "cabin_class": "economy",
///   "passengers": 1
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct SearchParams {
    /// IATA code of the departure airport.
    pub origin: String,

    /// IATA code of the arrival airport.
    pub destination: String,

    /// Outbound travel date.
    pub depart_date: NaiveDate,

    /// Return travel date. `None` for one-way searches.
    #[serde(default)]
    pub return_date: Option<NaiveDate>,

    /// Requested cabin class. Defaults to economy.
    #[serde(default)]
    pub cabin_class: CabinClass,

    /// Number of travellers.
    #[serde(default = "default_passengers")]
    pub passengers: u8,
}

fn default_passengers() -> u8 {
    1
}

impl SearchParams {
    /// Create one-way search parameters with defaults for the rest.
    pub fn one_way(origin: impl Into<String>, destination: impl Into<String>, depart_date: NaiveDate) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            depart_date,
            return_date: None,
            cabin_class: CabinClass::default(),
            passengers: default_passengers(),
        }
    }
}
