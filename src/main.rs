//! Binary entry point mounting the CSR app.

// The bin target shares the manifest with the lib but only touches leptos.
#![allow(unused_crate_dependencies)]

use dijkstra_canvas::{App, init_logging};
use leptos::prelude::*;

fn main() {
	init_logging();
	mount_to_body(App);
}
