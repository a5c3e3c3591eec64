mod app;
mod components;
mod pages;
mod platform;
mod router;

use app::{App, AppProps};

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    match platform::client_config() {
        Ok(config) => {
            yew::Renderer::<App>::with_props(AppProps { config }).render();
        }
        Err(error) => log::error!("Invalid client configuration, error={error}"),
    }
}
