// src/lead.rs
// =============================================================================
// This module defines the lead record that gets exported.
//
// The field names (via serde rename) are the exact column headers the
// downstream CRM import expects - "External ID", "Company Name", and so on.
// Changing them would silently break the import mapping, so don't.
//
// Contact Name, Job Position and Mobile are intentionally always empty:
// scraping names/positions/phones off websites is out of scope, but the
// CRM template still wants the columns present.
//
// Rust concepts:
// - serde rename: Decouple Rust field names from the wire/CSV names
// - One struct serializes to both JSON and CSV unchanged
// =============================================================================

use serde::Serialize;
use std::collections::HashSet;

use crate::places::PlaceDetails;

// One exported lead: a business plus whatever contact info we could mine
#[derive(Debug, Clone, Serialize)]
pub struct Lead {
    #[serde(rename = "External ID")]
    pub external_id: String,
    #[serde(rename = "Company Name")]
    pub company_name: String,
    #[serde(rename = "Contact Name")]
    pub contact_name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Job Position")]
    pub job_position: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Mobile")]
    pub mobile: String,
    #[serde(rename = "Street")]
    pub street: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Zip")]
    pub zip: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Formatted address")]
    pub formatted_address: String,
    #[serde(rename = "Website")]
    pub website: String,
    #[serde(rename = "Tags")]
    pub tags: String,
}

impl Lead {
    // Builds a lead record from place details plus the harvested emails
    //
    // Multiple harvested addresses are joined with ", " into the single
    // Email column (the CRM splits on comma during import).
    pub fn from_details(details: &PlaceDetails, emails: &HashSet<String>, tag: &str) -> Self {
        let address = details.postal_address();

        // Sort for a stable column value - HashSet iteration order isn't
        let mut email_list: Vec<&str> = emails.iter().map(String::as_str).collect();
        email_list.sort_unstable();

        Self {
            external_id: format!("g_place_id_{}", details.place_id),
            company_name: details.name.clone().unwrap_or_default(),
            contact_name: String::new(),
            email: email_list.join(", "),
            job_position: String::new(),
            phone: details.formatted_phone_number.clone().unwrap_or_default(),
            mobile: String::new(),
            street: format!("{} {}", address.street_number, address.street)
                .trim()
                .to_string(),
            city: address.city,
            state: address.state,
            zip: address.zip,
            country: address.country,
            formatted_address: details.formatted_address.clone().unwrap_or_default(),
            website: details.website.clone().unwrap_or_default(),
            tags: tag.to_string(),
        }
    }
}
