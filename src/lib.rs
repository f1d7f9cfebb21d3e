//! graph-dashboard: a knowledge graph editor and flow diagram viewer.
//!
//! The knowledge graph lives in [`model::GraphStore`], a tree of nodes whose
//! subtrees can be collapsed; the canvas only ever draws its filtered view.

// `getrandom` is only here to enable its `js` backend for `rand` on wasm32.
use getrandom as _;
use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info, warn};

mod components;
pub mod config;
mod loader;
pub mod model;
mod pages;

pub use config::DashboardConfig;
pub use loader::LoadError;

use crate::pages::dashboard::Dashboard;
use crate::pages::not_found::NotFound;

const CONFIG_ID: &str = "dashboard-config";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Dashboard configuration from `<script id="dashboard-config">`, or defaults.
fn load_config() -> DashboardConfig {
	match loader::load_script_json::<DashboardConfig>(CONFIG_ID) {
		Ok(config) => {
			info!("loaded dashboard config");
			config
		}
		Err(LoadError::MissingElement(_)) => DashboardConfig::default(),
		Err(e) => {
			warn!("ignoring dashboard config: {e}");
			DashboardConfig::default()
		}
	}
}

/// An app router which renders the dashboard and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();
	provide_context(load_config());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Graph Dashboard" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Dashboard />
			</Routes>
		</Router>
	}
}
