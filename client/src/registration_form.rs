// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use signup_shared::messages::registration::{RegistrationDetails, RegistrationField, RegistrationRejection};
use signup_shared::validation::{validate, FieldErrors};

pub const REGISTRATION_SUCCESS_MESSAGE: &str = "Registration successful. You can now sign in.";
pub const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed. Please try again.";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection and try again.";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SubmissionStatus {
	#[default]
	Idle,
	Submitting,
}

/// Form-wide feedback shown below the fields
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Feedback {
	#[default]
	None,
	ServerError(String),
	Success,
}

/// How a registration request settled
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubmissionOutcome {
	Accepted,
	Rejected(RegistrationRejection),
	/// No response was received from the server
	Unreachable,
}

/// All of the state behind the registration page. Every change goes through one of the transition methods.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegistrationForm {
	details: RegistrationDetails,
	errors: FieldErrors,
	status: SubmissionStatus,
	feedback: Feedback,
}

impl RegistrationForm {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn details(&self) -> &RegistrationDetails {
		&self.details
	}

	pub fn value(&self, field: RegistrationField) -> &str {
		self.details.value(field)
	}

	pub fn error(&self, field: RegistrationField) -> Option<&str> {
		self.errors.get(field)
	}

	pub fn errors(&self) -> &FieldErrors {
		&self.errors
	}

	pub fn status(&self) -> SubmissionStatus {
		self.status
	}

	pub fn is_submitting(&self) -> bool {
		self.status == SubmissionStatus::Submitting
	}

	pub fn feedback(&self) -> &Feedback {
		&self.feedback
	}

	pub fn server_error(&self) -> Option<&str> {
		match &self.feedback {
			Feedback::ServerError(message) => Some(message),
			_ => None,
		}
	}

	pub fn success_message(&self) -> Option<&'static str> {
		match self.feedback {
			Feedback::Success => Some(REGISTRATION_SUCCESS_MESSAGE),
			_ => None,
		}
	}

	/// Stores a new value for a field. The field's error goes away whether or not the new value is valid; errors are
	/// only recalculated on the next submission.
	pub fn change_field(&mut self, field: RegistrationField, value: String) {
		self.details.set_value(field, value);
		self.errors.remove(field);
		self.feedback = Feedback::None;
	}

	/// Starts a submission attempt. Returns the details to send when the form is valid and no other submission is in
	/// flight; otherwise the form is left idle (with any validation errors stored) and nothing should be sent. Feedback
	/// from the previous attempt is only cleared once the details pass validation.
	pub fn begin_submission(&mut self) -> Option<RegistrationDetails> {
		if self.is_submitting() {
			log::debug!("Ignoring registration submission while another is in flight");
			return None;
		}

		self.errors = validate(&self.details);
		if !self.errors.is_empty() {
			log::debug!("Registration form has {} invalid field(s)", self.errors.len());
			return None;
		}

		self.feedback = Feedback::None;
		self.status = SubmissionStatus::Submitting;
		Some(self.details.clone())
	}

	/// Applies the result of a registration request and returns the form to idle.
	pub fn finish_submission(&mut self, outcome: SubmissionOutcome) {
		match outcome {
			SubmissionOutcome::Accepted => {
				self.details.clear();
				self.errors.clear();
				self.feedback = Feedback::Success;
			}
			SubmissionOutcome::Rejected(rejection) => {
				for (field, error) in rejection.field_errors.iter() {
					if let Some(message) = error.message() {
						self.errors.insert(*field, message);
					}
				}
				let summary = rejection
					.summary
					.unwrap_or_else(|| String::from(REGISTRATION_FAILED_MESSAGE));
				self.feedback = Feedback::ServerError(summary);
			}
			SubmissionOutcome::Unreachable => {
				self.feedback = Feedback::ServerError(String::from(NETWORK_ERROR_MESSAGE));
			}
		}
		self.status = SubmissionStatus::Idle;
	}
}
