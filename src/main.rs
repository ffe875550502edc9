//! GraphQL CheckList Entry Point

mod app;
mod components;
mod config;
mod confirm;
mod context;
mod controller;
mod graphql;
mod logging;
mod models;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use app::App;
use config::Config;
use context::Client;
use graphql::{GraphqlClient, HttpTransport, InMemoryCache};
use leptos::prelude::*;

/// Places the GraphQL client in context for every descendant.
#[component]
fn GraphqlProvider(client: Arc<Client>, children: Children) -> impl IntoView {
    provide_context(client);
    children()
}

fn main() {
    console_error_panic_hook::set_once();

    let config = Config::from_build_env();
    logging::init(&config.log_level);

    let transport = match HttpTransport::new(&config) {
        Ok(transport) => transport,
        Err(e) => {
            log::error!("[BOOT] cannot build GraphQL transport: {}", e);
            return;
        }
    };
    log::info!("[BOOT] using GraphQL endpoint {}", transport.endpoint());

    let client = Arc::new(GraphqlClient::new(transport, InMemoryCache::new()));
    let confirm_deletes = config.confirm_deletes;

    mount_to_body(move || {
        view! {
            <GraphqlProvider client=client>
                <App confirm_deletes=confirm_deletes />
            </GraphqlProvider>
        }
    });
}
