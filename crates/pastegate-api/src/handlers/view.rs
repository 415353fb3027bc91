use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::content::find_record;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse},
};
use std::sync::Arc;

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_viewer(id: &str, name: &str) -> String {
    let id = escape_html(id);
    let name = escape_html(name);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{name}</title>
<style>body{{font-family:monospace;margin:2rem}}pre{{white-space:pre-wrap}}</style>
</head>
<body>
<h1>{name}</h1>
<pre id="content">Loading...</pre>
<script>
fetch("/api/content/{id}")
  .then(function (r) {{ return r.text(); }})
  .then(function (t) {{ document.getElementById("content").textContent = t; }});
</script>
</body>
</html>
"#
    )
}

/// Minimal HTML page that loads the content through the ungated endpoint.
#[utoipa::path(
    get,
    path = "/view/{id}",
    tag = "files",
    params(
        ("id" = String, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "Viewer page", content_type = "text/html"),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(file_id = %id))]
pub async fn view_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let record = find_record(&state.files, &id).await?;
    Ok(Html(render_viewer(&record.id, &record.original_name)))
}
