use crate::config::AppConfig;
use crate::figure::Figure;
use anyhow::Result;
use axum::{extract::State, response::Html, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

pub struct AppState {
    /// The fully rendered dashboard page, figure JSON embedded.
    /// Rendered once before the server binds; every request gets the
    /// same bytes.
    pub page: String,
}

pub async fn start_server(config: AppConfig, figure: Figure) -> Result<()> {
    let page = render_page(&config.map.title, &figure)?;
    let state = Arc::new(AppState { page });

    let port = config.server.port;
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    let app = Router::new()
        .route("/", get(page_handler))
        .layer(CorsLayer::permissive())
        .with_state(state);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn page_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.page.clone())
}

/// Render the single dashboard page. The figure is serialized inline
/// and drawn client-side by plotly.js; selection and lasso tools are
/// stripped from the mode bar, scroll zoom stays on.
pub fn render_page(title: &str, figure: &Figure) -> Result<String> {
    let figure_json = serde_json::to_string(figure)?;
    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no">
<title>{title}</title>
<script src="https://cdn.plot.ly/plotly-2.32.0.min.js"></script>
</head>
<body>
<h1>{title}</h1>
<div id="output-map" style="width:100%;height:80vh;"></div>
<script>
const figure = {figure_json};
Plotly.newPlot("output-map", figure.data, figure.layout, {{
    displayModeBar: true,
    modeBarButtonsToRemove: ["select", "lasso2d", "autoScale2d"],
    displaylogo: false,
    scrollZoom: true
}});
</script>
</body>
</html>
"#
    ))
}
