// src/places/mod.rs
// =============================================================================
// This module talks to the Google Maps APIs.
//
// Currently implements:
// - Geocoding an address into a lat/lng pair
// - Nearby Search for businesses around that location
// - Place Details lookups by place_id (name, phone, address, website)
//
// Future enhancements (stretch goals):
// - Paginate nearby results past the first page (next_page_token)
// - Cache details lookups between runs
//
// Rust concepts:
// - Modules: Organizing related functionality
// - Public API: What other parts of the app can use
// =============================================================================

mod api;

// Re-export the API functions and response types
pub use api::{
    geocode, nearby_search, place_details, LatLng, NearbyPlace, PlaceDetails, PostalAddress,
};

use anyhow::{anyhow, Result};

// Loads the Google Maps API key
//
// Reads the "api_key" file in the working directory first (so the key stays
// out of shell history and the repo), falling back to the GOOGLE_MAPS_API_KEY
// environment variable.
pub fn load_api_key() -> Result<String> {
    if let Ok(contents) = std::fs::read_to_string("api_key") {
        let key = contents.trim().to_string();
        if !key.is_empty() {
            return Ok(key);
        }
    }

    match std::env::var("GOOGLE_MAPS_API_KEY") {
        Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(anyhow!(
            "Missing \"api_key\" file and GOOGLE_MAPS_API_KEY is not set"
        )),
    }
}
