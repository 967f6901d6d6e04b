// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::api::submit_registration;
use crate::config::ClientConfig;
use crate::registration_form::RegistrationForm;
use signup_shared::messages::registration::RegistrationField;
use sycamore::futures::spawn_local_scoped;
use sycamore::generic_node::GenericNode;
use sycamore::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event as WebEvent, HtmlInputElement};

#[component]
pub fn RegistrationView<G: Html>(ctx: Scope<'_>) -> View<G> {
	let config: &ClientConfig = use_context(ctx);
	let form = create_signal(ctx, RegistrationForm::new());
	let submitting_signal = create_memo(ctx, || form.get().is_submitting());
	let server_error_signal = create_memo(ctx, || form.get().server_error().map(String::from));
	let success_signal = create_memo(ctx, || form.get().success_message());

	let form_submission_handler = move |event: WebEvent| {
		event.prevent_default();

		let Some(details) = form.modify().begin_submission() else {
			return;
		};

		spawn_local_scoped(ctx, async move {
			let outcome = submit_registration(&config.registration_endpoint, &details).await;
			form.modify().finish_submission(outcome);
		});
	};

	view! {
		ctx,
		main(id="register_page") {
			section(id="register_card", aria-labelledby="register_title") {
				h1(id="register_title") { "Sign-up" }
				form(id="register_user", novalidate=true, on:submit=form_submission_handler) {
					RegistrationInput(form=form, field=RegistrationField::Username)
					RegistrationInput(form=form, field=RegistrationField::FirstName)
					RegistrationInput(form=form, field=RegistrationField::LastName)
					RegistrationInput(form=form, field=RegistrationField::Email)
					RegistrationInput(form=form, field=RegistrationField::Password)
					(
						if let Some(message) = (*server_error_signal.get()).clone() {
							view! {
								ctx,
								div(id="register_server_error", class="form_alert", role="alert") { (message) }
							}
						} else {
							view! { ctx, }
						}
					)
					(
						if let Some(message) = *success_signal.get() {
							view! {
								ctx,
								div(id="register_success", class="form_success", role="status") { (message) }
							}
						} else {
							view! { ctx, }
						}
					)
					button(
						type="submit",
						disabled=*submitting_signal.get(),
						aria-busy=if *submitting_signal.get() { "true" } else { "false" }
					) {
						(submit_label(*submitting_signal.get()))
					}
				}
			}
		}
	}
}

#[derive(Prop)]
pub struct RegistrationInputProps<'a> {
	form: &'a Signal<RegistrationForm>,
	field: RegistrationField,
}

#[component]
fn RegistrationInput<'a, G: Html>(ctx: Scope<'a>, props: RegistrationInputProps<'a>) -> View<G> {
	let form = props.form;
	let field = props.field;

	// The input is bound to its own signal so resetting the form also clears what's displayed
	let value_signal = create_signal(ctx, String::new());
	create_effect(ctx, move || {
		let value = form.get().value(field).to_string();
		if *value_signal.get_untracked() != value {
			value_signal.set(value);
		}
	});

	let error_signal = create_memo(ctx, move || form.get().error(field).map(String::from));

	let input_handler = move |event: WebEvent| {
		let Some(input) = event
			.target()
			.and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
		else {
			return;
		};
		form.modify().change_field(field, input.value());
	};

	let input_ref = create_node_ref(ctx);
	let input_view = view! {
		ctx,
		div(class="input_with_message") {
			label(for=input_element_id(field)) { (field.label()) }
			input(
				id=input_element_id(field),
				name=field.name(),
				type=input_type(field),
				placeholder=placeholder(field),
				autocomplete=autocomplete(field),
				class=if error_signal.get().is_some() { "error" } else { "" },
				aria-invalid=if error_signal.get().is_some() { "true" } else { "false" },
				bind:value=value_signal,
				ref=input_ref,
				on:input=input_handler
			)
			(
				if let Some(message) = (*error_signal.get()).clone() {
					view! {
						ctx,
						span(id=error_element_id(field), class="input_error") { (message) }
					}
				} else {
					view! { ctx, }
				}
			)
		}
	};

	// Inputs without an error have no description at all rather than an empty one
	create_effect(ctx, move || {
		let has_error = error_signal.get().is_some();
		let Some(input) = input_ref.try_get::<G>() else {
			return;
		};
		match described_by(field, has_error) {
			Some(error_id) => input.set_attribute("aria-describedby", error_id),
			None => input.remove_attribute("aria-describedby"),
		}
	});

	input_view
}

fn described_by(field: RegistrationField, has_error: bool) -> Option<&'static str> {
	if has_error {
		Some(error_element_id(field))
	} else {
		None
	}
}

fn input_element_id(field: RegistrationField) -> &'static str {
	match field {
		RegistrationField::Username => "register_username",
		RegistrationField::FirstName => "register_first_name",
		RegistrationField::LastName => "register_last_name",
		RegistrationField::Email => "register_email",
		RegistrationField::Password => "register_password",
	}
}

fn error_element_id(field: RegistrationField) -> &'static str {
	match field {
		RegistrationField::Username => "register_username_error",
		RegistrationField::FirstName => "register_first_name_error",
		RegistrationField::LastName => "register_last_name_error",
		RegistrationField::Email => "register_email_error",
		RegistrationField::Password => "register_password_error",
	}
}

fn input_type(field: RegistrationField) -> &'static str {
	match field {
		RegistrationField::Email => "email",
		RegistrationField::Password => "password",
		_ => "text",
	}
}

fn placeholder(field: RegistrationField) -> &'static str {
	match field {
		RegistrationField::Username => "yourusername",
		RegistrationField::FirstName => "Jane",
		RegistrationField::LastName => "Doe",
		RegistrationField::Email => "jane.doe@example.com",
		RegistrationField::Password => "••••••••",
	}
}

/// Autofill hint for the browser and password managers
fn autocomplete(field: RegistrationField) -> &'static str {
	match field {
		RegistrationField::Username => "username",
		RegistrationField::FirstName => "given-name",
		RegistrationField::LastName => "family-name",
		RegistrationField::Email => "email",
		RegistrationField::Password => "new-password",
	}
}

fn submit_label(submitting: bool) -> &'static str {
	if submitting {
		"Registering..."
	} else {
		"Register"
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashSet;

	#[test]
	fn element_ids_are_unique() {
		let mut ids = HashSet::new();
		for field in RegistrationField::ALL {
			assert!(ids.insert(input_element_id(field)));
			assert!(ids.insert(error_element_id(field)));
		}
	}

	#[test]
	fn error_ids_follow_input_ids() {
		for field in RegistrationField::ALL {
			assert_eq!(error_element_id(field), format!("{}_error", input_element_id(field)));
		}
	}

	#[test]
	fn description_only_points_at_shown_errors() {
		for field in RegistrationField::ALL {
			assert_eq!(described_by(field, false), None);
			assert_eq!(described_by(field, true), Some(error_element_id(field)));
		}
	}

	#[test]
	fn sensitive_fields_use_matching_input_types() {
		assert_eq!(input_type(RegistrationField::Email), "email");
		assert_eq!(input_type(RegistrationField::Password), "password");
		assert_eq!(input_type(RegistrationField::Username), "text");
		assert_eq!(autocomplete(RegistrationField::Password), "new-password");
	}

	#[test]
	fn submit_label_shows_progress() {
		assert_eq!(submit_label(false), "Register");
		assert_eq!(submit_label(true), "Registering...");
	}
}
