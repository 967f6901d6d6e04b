// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::registration_form::SubmissionOutcome;
use gloo_net::http::Request;
use signup_shared::messages::registration::{RegistrationDetails, RegistrationRejection};
use std::error::Error;
use std::fmt;
use web_sys::RequestCredentials;

/// Errors that prevent a registration request from getting a response
#[derive(Debug)]
pub enum RequestError {
	Encode(gloo_net::Error),
	Transport(gloo_net::Error),
}

impl fmt::Display for RequestError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Encode(error) => write!(f, "Failed to encode registration request: {}", error),
			Self::Transport(error) => write!(f, "Failed to send registration request: {}", error),
		}
	}
}

impl Error for RequestError {}

/// Sends the registration details to the server and waits for the exchange to settle.
pub async fn submit_registration(endpoint: &str, details: &RegistrationDetails) -> SubmissionOutcome {
	log::debug!("Submitting registration for {:?} to {}", details, endpoint);
	let outcome = settle(post_registration(endpoint, details).await);
	match &outcome {
		SubmissionOutcome::Accepted => log::info!("Registration of {} was accepted", details.username),
		SubmissionOutcome::Rejected(rejection) => {
			log::warn!("Registration of {} was rejected: {:?}", details.username, rejection)
		}
		SubmissionOutcome::Unreachable => (),
	}
	outcome
}

/// Collapses a request result into an outcome. Requests that never got a response leave the server unreachable.
fn settle(result: Result<SubmissionOutcome, RequestError>) -> SubmissionOutcome {
	result.unwrap_or_else(|error| {
		log::warn!("{}", error);
		SubmissionOutcome::Unreachable
	})
}

async fn post_registration(endpoint: &str, details: &RegistrationDetails) -> Result<SubmissionOutcome, RequestError> {
	let response = Request::post(endpoint)
		.header("Content-Type", "application/json")
		.credentials(RequestCredentials::Include)
		.json(details)
		.map_err(RequestError::Encode)?
		.send()
		.await
		.map_err(RequestError::Transport)?;

	let status = response.status();
	if is_success_status(status) {
		return Ok(SubmissionOutcome::Accepted);
	}

	// A body that can't be read is handled the same as an empty one
	let body = response.text().await.unwrap_or_default();
	Ok(outcome_for_response(status, &body))
}

fn is_success_status(status: u16) -> bool {
	(200..300).contains(&status)
}

/// Interprets a response that was received from the server.
pub fn outcome_for_response(status: u16, body: &str) -> SubmissionOutcome {
	if is_success_status(status) {
		SubmissionOutcome::Accepted
	} else {
		SubmissionOutcome::Rejected(RegistrationRejection::from_body(body))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use signup_shared::messages::registration::{FieldErrorValue, RegistrationField};

	#[test]
	fn success_statuses_ignore_the_body() {
		assert_eq!(outcome_for_response(201, r#"{"detail": "Created"}"#), SubmissionOutcome::Accepted);
		assert_eq!(outcome_for_response(200, ""), SubmissionOutcome::Accepted);
		assert_eq!(outcome_for_response(204, "not json"), SubmissionOutcome::Accepted);
	}

	#[test]
	fn failure_status_parses_rejection() {
		let outcome = outcome_for_response(400, r#"{"email": ["Email already registered."]}"#);
		let rejection = match outcome {
			SubmissionOutcome::Rejected(rejection) => rejection,
			other => panic!("expected a rejection, got {:?}", other),
		};
		assert_eq!(
			rejection.field_errors.get(&RegistrationField::Email),
			Some(&FieldErrorValue::List(vec![String::from("Email already registered.")]))
		);
		assert_eq!(rejection.summary, None);
	}

	#[test]
	fn request_without_response_is_unreachable() {
		let transport_failure = RequestError::Transport(gloo_net::Error::GlooError(String::from("Failed to fetch")));
		assert_eq!(settle(Err(transport_failure)), SubmissionOutcome::Unreachable);

		let encode_failure = RequestError::Encode(gloo_net::Error::GlooError(String::from("bad body")));
		assert_eq!(settle(Err(encode_failure)), SubmissionOutcome::Unreachable);
	}

	#[test]
	fn received_response_passes_through() {
		assert_eq!(settle(Ok(SubmissionOutcome::Accepted)), SubmissionOutcome::Accepted);
		let rejected = outcome_for_response(400, r#"{"detail": "Too many attempts."}"#);
		assert_eq!(settle(Ok(rejected.clone())), rejected);
	}

	#[test]
	fn failure_status_with_unreadable_body_is_empty_rejection() {
		assert_eq!(
			outcome_for_response(500, "Internal Server Error"),
			SubmissionOutcome::Rejected(RegistrationRejection::default())
		);
		assert_eq!(
			outcome_for_response(302, ""),
			SubmissionOutcome::Rejected(RegistrationRejection::default())
		);
	}
}
