//! Trunk entry point: mount the app to the document body.

// The bin target shares the package dependency list with the lib.
#![allow(unused_crate_dependencies)]

use archive_cartography::{App, init_logging};

fn main() {
	init_logging();
	leptos::mount::mount_to_body(App);
}
