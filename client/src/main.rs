// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use sycamore::prelude::*;

mod api;
mod config;
mod pages;
mod registration_form;
use config::ClientConfig;
use pages::register::RegistrationView;

fn main() {
	console_error_panic_hook::set_once();
	wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));

	let config = ClientConfig::from_document();
	log::debug!("Using registration endpoint {}", config.registration_endpoint);

	sycamore::render(|ctx| {
		provide_context(ctx, config);
		view! {
			ctx,
			RegistrationView
		}
	});
}
