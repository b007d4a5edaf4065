use std::sync::Arc;

use anyhow::Result;
use axum::{extract::ws::WebSocketUpgrade, response::Html, routing::get, Router};

use super::app::{app, AppProps};
use super::transport::HttpTransport;
use crate::config::Settings;
use crate::endpoint;
use crate::generate_core::{Generator, OpenAiService};

fn page(settings: &Settings) -> Router {
    let reachable_addr = settings.reachable_addr.clone();
    let endpoint_url = settings.endpoint_url();
    let view = Arc::new(dioxus_liveview::LiveViewPool::new());

    Router::new()
        .route(
            "/",
            get(move || async move {
                Html(format!(
                    r#"
            <!DOCTYPE html>
            <html>
                <head>
                    <title>CodeGen</title>
                    <meta name="viewport" content="width=device-width, initial-scale=1">
                </head>
                <body> <div id="main"></div> </body>
                {glue}
            </html>
            "#,
                    glue = dioxus_liveview::interpreter_glue(&format!("ws://{reachable_addr}/ws"))
                ))
            }),
        )
        .route(
            "/ws",
            get(move |ws: WebSocketUpgrade| async move {
                ws.on_upgrade(move |socket| async move {
                    let props = AppProps {
                        transport: HttpTransport::new(endpoint_url),
                    };
                    _ = view
                        .launch_with_props(dioxus_liveview::axum_socket(socket), app, props)
                        .await;
                })
            }),
        )
}

pub fn router(settings: &Settings) -> Router {
    let service = settings
        .api_key
        .as_deref()
        .map(|api_key| OpenAiService::new(api_key, settings.api_base.as_deref()));
    if service.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set, generation requests will fail");
    }
    let generator = Arc::new(Generator::new(service, settings.model.clone()));

    page(settings).merge(endpoint::router(generator))
}

pub async fn start_server(settings: Settings) -> Result<()> {
    let app = router(&settings);

    tracing::info!("Listening on http://{}", settings.listen_addr);

    axum::Server::bind(&settings.listen_addr)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
