// Similarity check handlers.
//
// POST /check_plagiarism — form body text1=..&text2=..
//   200 "0.875"   (whole numbers keep the decimal point: "1.0", "0.0")
//
// GET /check_plagiarism?text1=..&text2=..
//   200 "Time taken: 0.000012 seconds, Similarity: 0.875"
//   The elapsed time and the score are handed to the result sink on a
//   tracked background task; a failing sink is logged and never fails the
//   request. Shutdown waits for tracked uploads (see web::run_server).
//
// Missing text1/text2 is a 400. An empty vocabulary under the "error" policy
// is a 422.

use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::similarity::{format_score, SimilarityError};
use crate::sink::report_timed_score;
use crate::web::{text_error, AppState};

#[derive(Deserialize, Default)]
pub struct CheckParams {
    pub text1: Option<String>,
    pub text2: Option<String>,
}

impl CheckParams {
    /// Both texts, or a 400 naming the first missing one.
    fn require(self) -> Result<(String, String), Response> {
        match (self.text1, self.text2) {
            (Some(a), Some(b)) => Ok((a, b)),
            (None, _) => Err(missing("text1")),
            (_, None) => Err(missing("text2")),
        }
    }
}

fn missing(field: &str) -> Response {
    text_error(
        StatusCode::BAD_REQUEST,
        format!("Missing required parameter: {field}"),
    )
}

fn undefined(e: SimilarityError) -> Response {
    text_error(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
}

/// POST /check_plagiarism — score two form fields.
pub async fn check_form(
    State(state): State<AppState>,
    Form(params): Form<CheckParams>,
) -> Response {
    let (text1, text2) = match params.require() {
        Ok(texts) => texts,
        Err(resp) => return resp,
    };

    match state.scorer.score(&text1, &text2) {
        Ok(similarity) => {
            debug!(similarity = similarity, "Scored form submission");
            format_score(similarity).into_response()
        }
        Err(e) => undefined(e),
    }
}

/// GET /check_plagiarism — score two query params, time it, and report it.
pub async fn check_query(
    State(state): State<AppState>,
    Query(params): Query<CheckParams>,
) -> Response {
    let (text1, text2) = match params.require() {
        Ok(texts) => texts,
        Err(resp) => return resp,
    };

    let timed = match state.scorer.score_timed(&text1, &text2) {
        Ok(timed) => timed,
        Err(e) => return undefined(e),
    };

    let prefix = Utc::now().format("%Y%m%dT%H%M%S%.6fZ").to_string();
    let sink = state.sink.clone();
    state.uploads.spawn(async move {
        if let Err(e) = report_timed_score(sink.as_ref(), &prefix, &timed).await {
            warn!(error = %e, prefix = %prefix, "Failed to report timed score");
        }
    });

    format!(
        "Time taken: {} seconds, Similarity: {}",
        format_score(timed.elapsed.as_secs_f64()),
        format_score(timed.similarity)
    )
    .into_response()
}
