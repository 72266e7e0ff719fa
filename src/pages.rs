//! HTML pages served by the predictor

use crate::models::inference::PredictionResult;

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");
const RESULT_TEMPLATE: &str = include_str!("../templates/result.html");
const ERROR_TEMPLATE: &str = include_str!("../templates/error.html");

/// Input form
pub fn render_form() -> String {
    INDEX_TEMPLATE.to_string()
}

/// Error page shown after any failed submission
pub fn render_error() -> String {
    ERROR_TEMPLATE.to_string()
}

/// Result page for a successful prediction
pub fn render_result(result: &PredictionResult) -> String {
    RESULT_TEMPLATE
        .replace("{{prediction}}", &escape_html(&format!("{:.2}", result.index)))
        .replace("{{description}}", &escape_html(result.description()))
        .replace("{{advisory}}", &escape_html(result.advisory()))
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
