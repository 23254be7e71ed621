use log::info;
use services_steps::{config, enhance, App};
use web_sys::window;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting application");
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };

    enhance::install(&document);

    if let Some(root) = document.get_element_by_id("app") {
        yew::Renderer::<App>::with_root(root).render();
    }
}
