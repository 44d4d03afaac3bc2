use crate::query::{is_blank, BLANK_KEYWORD_MESSAGE};
use crate::server::AppState;
use axum::extract::{Query, State};
use axum::response::Html;
use axum::Json;
use pulldown_cmark::{html, Event, Options, Parser};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct KeywordParams {
    pub keyword: Option<String>,

    #[serde(default)]
    pub format: ResultFormat,
}

/// Encoding of `results` in a `/get_courses` response
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultFormat {
    /// The model's markdown, untouched
    #[default]
    Markdown,

    /// Markdown rendered to an HTML fragment
    Html,
}

/// Body of every `/get_courses` response
#[derive(Debug, Serialize, Deserialize)]
pub struct CoursesResponse {
    pub results: String,
}

/// Answers a keyword query
///
/// Always responds 200; failures are reported in `results` as text.
/// With `format=html` the answer is rendered to HTML before it is sent.
pub async fn get_courses(
    State(state): State<AppState>,
    Query(params): Query<KeywordParams>,
) -> Json<CoursesResponse> {
    let keyword = params.keyword.unwrap_or_default();

    let results = if is_blank(&keyword) {
        BLANK_KEYWORD_MESSAGE.to_string()
    } else {
        tracing::info!("Searching courses for {:?}", keyword);
        state.search.answer(&keyword).await
    };

    let results = match params.format {
        ResultFormat::Markdown => results,
        ResultFormat::Html => render_markdown(&results),
    };

    Json(CoursesResponse { results })
}

/// Renders markdown (tables included) to an HTML fragment
///
/// Raw HTML in the input is escaped, not passed through.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

pub async fn ui() -> Html<&'static str> {
    Html(include_str!("ui.html"))
}

pub async fn health() -> &'static str {
    "OK"
}
