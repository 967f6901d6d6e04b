// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use signup_shared::messages::registration::REGISTRATION_ENDPOINT;

/// Name of the `<meta>` tag the hosting page can use to point the form at a different endpoint
pub const ENDPOINT_META_NAME: &str = "registration-endpoint";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientConfig {
	pub registration_endpoint: String,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			registration_endpoint: String::from(REGISTRATION_ENDPOINT),
		}
	}
}

impl ClientConfig {
	/// Reads the configuration from the hosting page. Anything that can't be read falls back to the defaults.
	pub fn from_document() -> Self {
		let selector = format!("meta[name=\"{}\"]", ENDPOINT_META_NAME);
		let endpoint = web_sys::window()
			.and_then(|window| window.document())
			.and_then(|document| document.query_selector(&selector).ok().flatten())
			.and_then(|meta| meta.get_attribute("content"));
		Self::with_endpoint(endpoint)
	}

	pub fn with_endpoint(endpoint: Option<String>) -> Self {
		match endpoint {
			Some(endpoint) if !endpoint.trim().is_empty() => Self {
				registration_endpoint: endpoint.trim().to_string(),
			},
			_ => Self::default(),
		}
	}
}
