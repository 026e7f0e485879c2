//! HTTP handlers for the web UI

use axum::{
    extract::{Form, State},
    response::Html,
};
use crate::chain::QueryRoute;
use crate::viz::PLOT_PATH;
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

use super::server::{index_template, AppState};

/// Form posted by the index page
#[derive(Deserialize)]
pub struct QueryForm {
    pub query: String,
}

/// What a request produced, rendered into the index page.
enum PageContent {
    Empty,
    Result(String),
    Plot,
    Error(String),
}

/// Handler for the index page
pub async fn index_handler() -> Html<String> {
    render_page(PageContent::Empty)
}

/// Handler for text queries. Dispatches through the routing predicate, so a
/// query asking to "visualize" or "show" something takes the visualization
/// path even when posted here.
pub async fn query_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<QueryForm>,
) -> Html<String> {
    match QueryRoute::classify(&form.query) {
        QueryRoute::Answer => {
            let result = state.qa.answer_text(&form.query).await;
            render_page(PageContent::Result(result))
        }
        QueryRoute::Visualize => run_visualization(&state, &form.query).await,
    }
}

/// Handler for visualization queries; always takes the visualization path.
pub async fn visualize_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<QueryForm>,
) -> Html<String> {
    run_visualization(&state, &form.query).await
}

async fn run_visualization(state: &AppState, query: &str) -> Html<String> {
    let code = match state.viz.generate_code(query).await {
        Ok(Some(code)) => code,
        Ok(None) => {
            return render_page(PageContent::Error(
                "Error generating visualization: model returned no code block".to_string(),
            ));
        }
        Err(e) => {
            warn!(error = %e, "visualization chain failed");
            return render_page(PageContent::Error(format!(
                "Error generating visualization: {}",
                e
            )));
        }
    };

    match state.runner.run(&code).await {
        Ok(()) => render_page(PageContent::Plot),
        Err(e) => {
            warn!(error = %e, "generated code failed to execute");
            render_page(PageContent::Error(format!(
                "Error executing visualization code: {}",
                e
            )))
        }
    }
}

/// Substitute the request outcome into the embedded page. Whatever happened,
/// the user gets a rendered page back, never a bare error response.
fn render_page(content: PageContent) -> Html<String> {
    let block = match content {
        PageContent::Empty => String::new(),
        PageContent::Result(text) => format!(
            "<section class=\"result\"><h2>Answer</h2><p>{}</p></section>",
            escape_html(&text)
        ),
        PageContent::Plot => format!(
            "<section class=\"result\"><h2>Visualization</h2><img src=\"/{}\" alt=\"Graph visualization\"></section>",
            PLOT_PATH
        ),
        PageContent::Error(message) => format!(
            "<section class=\"result error\"><p>{}</p></section>",
            escape_html(&message)
        ),
    };

    Html(index_template().replace("{{output}}", &block))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>\"&\"</script>"),
            "&lt;script&gt;&quot;&amp;&quot;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_render_result_is_escaped() {
        let Html(page) = render_page(PageContent::Result("<b>bold</b>".to_string()));
        assert!(page.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!page.contains("<b>bold</b>"));
    }

    #[test]
    fn test_render_plot_references_fixed_path() {
        let Html(page) = render_page(PageContent::Plot);
        assert!(page.contains("/static/plot.png"));
    }

    #[test]
    fn test_template_placeholder_is_consumed() {
        let Html(page) = render_page(PageContent::Empty);
        assert!(!page.contains("{{output}}"));
    }
}
