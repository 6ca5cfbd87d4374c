// src/places/api.rs
// =============================================================================
// This module wraps the three Google Maps endpoints the pipeline needs.
//
// Strategy:
// - One typed function per endpoint, all sharing a reqwest::Client
// - Response payloads are deserialized into small serde structs that only
//   name the fields we actually read (serde ignores the rest)
// - URL encoding is handled by reqwest's .query() - no manual escaping
//
// Why only the first geocoding result?
// - Google ranks them; for a street address the first hit is the match
//
// Rust concepts:
// - serde derive: Declarative JSON deserialization
// - Option<T>: Most place fields are optional in the API
// - #[serde(default)]: Missing arrays become empty Vecs
// =============================================================================

use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::Deserialize;

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const NEARBY_URL: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";
const DETAILS_URL: &str = "https://maps.googleapis.com/maps/api/place/details/json";

// A latitude/longitude pair as returned by the Geocoding API
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    // The "lat,lng" form the Places API expects for its location parameter
    pub fn to_query(self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

// Geocodes a street address into coordinates
//
// Returns the first result's location, or an error if Google found nothing
// (a typo'd address, usually).
pub async fn geocode(client: &Client, api_key: &str, address: &str) -> Result<LatLng> {
    let response: GeocodeResponse = client
        .get(GEOCODE_URL)
        .query(&[("key", api_key), ("address", address)])
        .send()
        .await?
        .json()
        .await?;

    response
        .results
        .into_iter()
        .next()
        .map(|r| r.geometry.location)
        .ok_or_else(|| anyhow!("No geocoding result for address '{}'", address))
}

// One business from a Nearby Search - just enough to look up its details
#[derive(Debug, Clone, Deserialize)]
pub struct NearbyPlace {
    pub place_id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NearbyResponse {
    #[serde(default)]
    results: Vec<NearbyPlace>,
}

// Searches for businesses matching a keyword around a location
//
// radius is in meters, matching the API.
pub async fn nearby_search(
    client: &Client,
    api_key: &str,
    location: LatLng,
    keyword: &str,
    radius: u32,
) -> Result<Vec<NearbyPlace>> {
    let location_query = location.to_query();
    let radius_query = radius.to_string();

    let response: NearbyResponse = client
        .get(NEARBY_URL)
        .query(&[
            ("key", api_key),
            ("location", location_query.as_str()),
            ("keyword", keyword),
            ("radius", radius_query.as_str()),
        ])
        .send()
        .await?
        .json()
        .await?;

    Ok(response.results)
}

// One component of a structured address (street number, city, ...)
//
// The `types` array says what the component is; `long_name` is its value.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressComponent {
    #[serde(default)]
    pub long_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

// The full details record for one place
//
// Every field except place_id is optional in practice - small businesses
// frequently have no website or phone number listed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub place_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
}

// The address components flattened into the fields our lead records use
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostalAddress {
    pub street_number: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

impl PlaceDetails {
    // Maps Google's typed address components onto a flat postal address
    //
    // Component types we care about:
    //   street_number -> street_number        route -> street
    //   locality -> city                      administrative_area_level_1 -> state
    //   country -> country                    postal_code -> zip
    pub fn postal_address(&self) -> PostalAddress {
        let mut address = PostalAddress::default();

        for component in &self.address_components {
            let value = component.long_name.clone();
            if component.types.iter().any(|t| t == "street_number") {
                address.street_number = value;
            } else if component.types.iter().any(|t| t == "route") {
                address.street = value;
            } else if component.types.iter().any(|t| t == "locality") {
                address.city = value;
            } else if component
                .types
                .iter()
                .any(|t| t == "administrative_area_level_1")
            {
                address.state = value;
            } else if component.types.iter().any(|t| t == "country") {
                address.country = value;
            } else if component.types.iter().any(|t| t == "postal_code") {
                address.zip = value;
            }
        }

        address
    }
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    result: Option<PlaceDetails>,
}

// Fetches the full details record for one place_id
pub async fn place_details(
    client: &Client,
    api_key: &str,
    place_id: &str,
) -> Result<PlaceDetails> {
    let response: DetailsResponse = client
        .get(DETAILS_URL)
        .query(&[("key", api_key), ("place_id", place_id)])
        .send()
        .await?
        .json()
        .await?;

    response
        .result
        .ok_or_else(|| anyhow!("No details returned for place_id '{}'", place_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(value: &str, kind: &str) -> AddressComponent {
        AddressComponent {
            long_name: value.to_string(),
            types: vec![kind.to_string(), "political".to_string()],
        }
    }

    #[test]
    fn test_latlng_query_form() {
        let loc = LatLng {
            lat: 44.9778,
            lng: -93.265,
        };
        assert_eq!(loc.to_query(), "44.9778,-93.265");
    }

    #[test]
    fn test_postal_address_mapping() {
        let details = PlaceDetails {
            address_components: vec![
                component("123", "street_number"),
                component("Main Street", "route"),
                component("Minneapolis", "locality"),
                component("Minnesota", "administrative_area_level_1"),
                component("United States", "country"),
                component("55401", "postal_code"),
            ],
            ..PlaceDetails::default()
        };

        let address = details.postal_address();
        assert_eq!(address.street_number, "123");
        assert_eq!(address.street, "Main Street");
        assert_eq!(address.city, "Minneapolis");
        assert_eq!(address.state, "Minnesota");
        assert_eq!(address.country, "United States");
        assert_eq!(address.zip, "55401");
    }

    #[test]
    fn test_postal_address_with_no_components_is_empty() {
        let details = PlaceDetails::default();
        assert_eq!(details.postal_address(), PostalAddress::default());
    }

    #[test]
    fn test_geocode_response_shape() {
        // The exact JSON shape Google returns, trimmed to what we read
        let json = r#"{
            "results": [
                { "geometry": { "location": { "lat": 44.9778, "lng": -93.265 } } }
            ]
        }"#;
        let parsed: GeocodeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.results.len(), 1);
        assert!((parsed.results[0].geometry.location.lat - 44.9778).abs() < 1e-9);
    }

    #[test]
    fn test_details_response_tolerates_sparse_records() {
        let json = r#"{ "result": { "place_id": "abc123", "name": "Acme Co" } }"#;
        let parsed: DetailsResponse = serde_json::from_str(json).unwrap();
        let details = parsed.result.unwrap();
        assert_eq!(details.place_id, "abc123");
        assert_eq!(details.name.as_deref(), Some("Acme Co"));
        assert!(details.website.is_none());
        assert!(details.address_components.is_empty());
    }
}
