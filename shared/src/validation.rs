// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::messages::registration::{RegistrationDetails, RegistrationField};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

pub const USERNAME_REQUIRED: &str = "Username is required.";
pub const FIRST_NAME_REQUIRED: &str = "First name is required.";
pub const LAST_NAME_REQUIRED: &str = "Last name is required.";
pub const EMAIL_REQUIRED: &str = "Email is required.";
pub const EMAIL_INVALID: &str = "Please enter a valid email address.";
pub const PASSWORD_REQUIRED: &str = "Password is required.";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters.";

pub const PASSWORD_MIN_LENGTH: usize = 6;

// Deliberately loose: something, an @, something, a dot, something.
static EMAIL_PATTERN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern failed to compile"));

/// Error messages for the fields that are currently failing validation
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldErrors(BTreeMap<RegistrationField, String>);

impl FieldErrors {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, field: RegistrationField) -> Option<&str> {
		self.0.get(&field).map(|message| message.as_str())
	}

	pub fn insert(&mut self, field: RegistrationField, message: impl Into<String>) {
		self.0.insert(field, message.into());
	}

	pub fn remove(&mut self, field: RegistrationField) {
		self.0.remove(&field);
	}

	pub fn clear(&mut self) {
		self.0.clear();
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = (RegistrationField, &str)> {
		self.0.iter().map(|(field, message)| (*field, message.as_str()))
	}
}

/// Checks the registration details against the client-side rules. Every field is checked; the result has an entry
/// for each failing field and is empty when the details can be submitted.
pub fn validate(details: &RegistrationDetails) -> FieldErrors {
	let mut errors = FieldErrors::new();

	if details.username.trim().is_empty() {
		errors.insert(RegistrationField::Username, USERNAME_REQUIRED);
	}
	if details.first_name.trim().is_empty() {
		errors.insert(RegistrationField::FirstName, FIRST_NAME_REQUIRED);
	}
	if details.last_name.trim().is_empty() {
		errors.insert(RegistrationField::LastName, LAST_NAME_REQUIRED);
	}

	if details.email.trim().is_empty() {
		errors.insert(RegistrationField::Email, EMAIL_REQUIRED);
	} else if !is_plausible_email(&details.email) {
		errors.insert(RegistrationField::Email, EMAIL_INVALID);
	}

	// Whitespace counts toward passwords, so they're not trimmed. Length is measured in UTF-16 code units, the same
	// way the browser measures the input's value.
	if details.password.is_empty() {
		errors.insert(RegistrationField::Password, PASSWORD_REQUIRED);
	} else if details.password.encode_utf16().count() < PASSWORD_MIN_LENGTH {
		errors.insert(RegistrationField::Password, PASSWORD_TOO_SHORT);
	}

	errors
}

pub fn is_plausible_email(email: &str) -> bool {
	EMAIL_PATTERN.is_match(email)
}
