// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Path registration data is posted to when the hosting page doesn't name another one
pub const REGISTRATION_ENDPOINT: &str = "/api/register/";

/// The fields a user fills in to register an account
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum RegistrationField {
	Username,
	FirstName,
	LastName,
	Email,
	Password,
}

impl RegistrationField {
	/// All fields, in the order they're shown on the form
	pub const ALL: [Self; 5] = [
		Self::Username,
		Self::FirstName,
		Self::LastName,
		Self::Email,
		Self::Password,
	];

	/// The key for this field in request and response bodies
	pub fn name(&self) -> &'static str {
		match self {
			Self::Username => "username",
			Self::FirstName => "first_name",
			Self::LastName => "last_name",
			Self::Email => "email",
			Self::Password => "password",
		}
	}

	pub fn label(&self) -> &'static str {
		match self {
			Self::Username => "Username",
			Self::FirstName => "First Name",
			Self::LastName => "Last Name",
			Self::Email => "Email",
			Self::Password => "Password",
		}
	}
}

impl fmt::Display for RegistrationField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.name())
	}
}

/// Data from the client when trying to register an account
#[derive(Clone, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct RegistrationDetails {
	pub username: String,
	pub first_name: String,
	pub last_name: String,
	pub email: String,
	pub password: String,
}

impl RegistrationDetails {
	pub fn value(&self, field: RegistrationField) -> &str {
		match field {
			RegistrationField::Username => &self.username,
			RegistrationField::FirstName => &self.first_name,
			RegistrationField::LastName => &self.last_name,
			RegistrationField::Email => &self.email,
			RegistrationField::Password => &self.password,
		}
	}

	pub fn set_value(&mut self, field: RegistrationField, value: String) {
		let target = match field {
			RegistrationField::Username => &mut self.username,
			RegistrationField::FirstName => &mut self.first_name,
			RegistrationField::LastName => &mut self.last_name,
			RegistrationField::Email => &mut self.email,
			RegistrationField::Password => &mut self.password,
		};
		*target = value;
	}

	pub fn clear(&mut self) {
		*self = Self::default();
	}
}

// Registration details end up in log output, so the password is never printed.
impl fmt::Debug for RegistrationDetails {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RegistrationDetails")
			.field("username", &self.username)
			.field("first_name", &self.first_name)
			.field("last_name", &self.last_name)
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.finish()
	}
}

/// A field error as reported by the server. Servers send either a single message or a list of messages for a field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldErrorValue {
	Single(String),
	List(Vec<String>),
}

impl FieldErrorValue {
	/// The message to show for the field. Only the first entry of a list is shown; when that entry has no text,
	/// there is no message.
	pub fn message(&self) -> Option<&str> {
		match self {
			Self::Single(message) => Some(message),
			Self::List(messages) => messages
				.first()
				.map(|message| message.as_str())
				.filter(|message| !message.is_empty()),
		}
	}

	fn from_json(value: &Value) -> Option<Self> {
		match value {
			// Entries without text stay in place as empty strings so the first entry is still the first one sent
			Value::Array(entries) => Some(Self::List(
				entries
					.iter()
					.map(|entry| json_text(entry).unwrap_or_default())
					.collect(),
			)),
			other => json_text(other).map(Self::Single),
		}
	}
}

/// The parts of a rejected registration response the form can show: per-field errors and an optional summary
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RegistrationRejection {
	pub field_errors: BTreeMap<RegistrationField, FieldErrorValue>,
	pub summary: Option<String>,
}

impl RegistrationRejection {
	/// Projects a rejection response body. Bodies that aren't a JSON object produce an empty rejection.
	pub fn from_body(body: &str) -> Self {
		match serde_json::from_str::<Value>(body) {
			Ok(Value::Object(data)) => Self::from_object(&data),
			_ => Self::default(),
		}
	}

	fn from_object(data: &Map<String, Value>) -> Self {
		let field_errors = RegistrationField::ALL
			.into_iter()
			.filter_map(|field| {
				let value = data.get(field.name())?;
				FieldErrorValue::from_json(value).map(|error| (field, error))
			})
			.collect();
		let summary = ["detail", "message"]
			.into_iter()
			.find_map(|key| data.get(key).and_then(json_text));

		Self { field_errors, summary }
	}
}

/// Gets the display text of a scalar JSON value. Empty or falsy values and nested structures have no text.
fn json_text(value: &Value) -> Option<String> {
	match value {
		Value::String(text) if !text.is_empty() => Some(text.clone()),
		Value::Number(number) if number.as_f64() != Some(0.0) => Some(number.to_string()),
		Value::Bool(true) => Some(String::from("true")),
		_ => None,
	}
}
