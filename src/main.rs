use leptos::prelude::*;
use network_field::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App);
}
