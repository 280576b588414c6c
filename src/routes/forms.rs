use actix_web::{error, http::header::ContentType, http::StatusCode, web, HttpResponse, Responder};
use std::collections::HashMap;

use crate::core::{AppKind, AppSpec, FieldKind, FieldSpec, Widget};
use crate::routes::AppState;
use crate::services::PredictionError;

/// Configure the browser-facing form pages
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/{app}", web::get().to(show_form))
        .route("/{app}", web::post().to(submit_form));
}

/// Result banner shown under the form after a submission
#[derive(Debug, Clone, PartialEq)]
pub enum Banner {
    Success(String),
    Error(String),
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(body)
}

/// A form submission that could not be decoded, rendered as an HTML page
#[derive(Debug)]
pub struct FormPayloadError(pub String);

impl std::fmt::Display for FormPayloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid form submission: {}", self.0)
    }
}

impl std::error::Error for FormPayloadError {}

impl error::ResponseError for FormPayloadError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type(ContentType::html())
            .body(page(
                "Invalid submission",
                &format!(
                    "<div class=\"error\">{}</div>\n<p><a href=\"/\">Back</a></p>\n",
                    escape(&self.to_string())
                ),
            ))
    }
}

fn not_found(name: &str) -> HttpResponse {
    HttpResponse::NotFound()
        .content_type(ContentType::html())
        .body(page("Not found", &format!("<p>No app named <code>{}</code>.</p>", escape(name))))
}

async fn index() -> impl Responder {
    let mut body = String::from("<h1>Price Predictors</h1>\n<ul>\n");
    for app in AppKind::ALL {
        body.push_str(&format!(
            "<li><a href=\"/{}\">{}</a></li>\n",
            app.as_str(),
            escape(app.spec().title)
        ));
    }
    body.push_str("</ul>\n");
    html(page("Price Predictors", &body))
}

/// GET /{app}: the form with its default values
async fn show_form(path: web::Path<String>) -> impl Responder {
    match path.parse::<AppKind>() {
        Ok(app) => html(render_form(app.spec(), &HashMap::new(), None)),
        Err(_) => not_found(&path),
    }
}

/// POST /{app}: encode, predict and re-render with the outcome
async fn submit_form(
    state: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Form<HashMap<String, String>>,
) -> impl Responder {
    let app = match path.parse::<AppKind>() {
        Ok(app) => app,
        Err(_) => return not_found(&path),
    };

    let raw = form.into_inner();
    let banner = match state.predictors.get(app).run(&raw) {
        Ok(prediction) => {
            tracing::info!("Form prediction for {}: {}", app, prediction.price.display);
            Banner::Success(prediction.price.message)
        }
        Err(err) => {
            if let PredictionError::ModelInvocation(_) = err {
                tracing::error!("Model invocation failed for {} form: {}", app, err);
            } else {
                tracing::info!("Rejected {} form input: {}", app, err);
            }
            Banner::Error(err.user_message(app).to_string())
        }
    };

    html(render_form(app.spec(), &raw, Some(&banner)))
}

/// Render an app's form page
///
/// Submitted values take precedence over field defaults so the user sees
/// what they entered next to the result.
pub fn render_form(spec: &AppSpec, values: &HashMap<String, String>, banner: Option<&Banner>) -> String {
    let mut body = String::new();
    body.push_str(&format!("<h1>{}</h1>\n", escape(spec.title)));
    body.push_str(&format!("<p>{}</p>\n", escape(spec.intro)));
    body.push_str(&format!("<form method=\"post\" action=\"/{}\">\n", spec.kind.as_str()));

    for field in spec.fields {
        let value = values
            .get(field.name)
            .map(String::as_str)
            .unwrap_or_else(|| field.default_value());
        render_field(&mut body, field, value);
    }

    body.push_str(&format!("<button type=\"submit\">{}</button>\n", escape(spec.submit_label)));
    body.push_str("</form>\n");

    match banner {
        Some(Banner::Success(message)) => {
            body.push_str(&format!("<div class=\"success\">{}</div>\n", escape(message)));
        }
        Some(Banner::Error(message)) => {
            body.push_str(&format!("<div class=\"error\">{}</div>\n", escape(message)));
        }
        None => {}
    }

    body.push_str("<hr>\n");
    if let Some(footer) = spec.footer {
        body.push_str(&format!("<p>{}</p>\n", escape(footer)));
    }

    page(spec.title, &body)
}

fn render_field(out: &mut String, field: &FieldSpec, value: &str) {
    out.push_str(&format!("<label for=\"{0}\">{1}</label>\n", field.name, escape(field.label)));

    match field.kind {
        FieldKind::Numeric {
            widget,
            min,
            max,
            step,
            ..
        } => {
            let input_type = match widget {
                Widget::Text => "text",
                Widget::Number => "number",
                Widget::Slider => "range",
            };
            out.push_str(&format!(
                "<input type=\"{}\" id=\"{1}\" name=\"{1}\" value=\"{2}\"",
                input_type,
                field.name,
                escape(value)
            ));
            if let Some(min) = min {
                out.push_str(&format!(" min=\"{}\"", min));
            }
            if let Some(max) = max {
                out.push_str(&format!(" max=\"{}\"", max));
            }
            if let Some(step) = step {
                out.push_str(&format!(" step=\"{}\"", step));
            }
            out.push_str(">\n");
        }
        FieldKind::Choice { options } => {
            out.push_str(&format!("<select id=\"{0}\" name=\"{0}\">\n", field.name));
            for choice in options {
                let selected = if choice.label == value { " selected" } else { "" };
                out.push_str(&format!(
                    "<option value=\"{0}\"{1}>{0}</option>\n",
                    escape(choice.label),
                    selected
                ));
            }
            out.push_str("</select>\n");
        }
    }
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        body
    )
}

/// Escape text for HTML element content and attribute values
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("<b>\"x\" & 'y'</b>"), "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;");
    }

    #[test]
    fn test_house_form_defaults() {
        let page = render_form(AppKind::House.spec(), &HashMap::new(), None);
        assert!(page.contains("name=\"CRIM\" value=\"0.1\""));
        assert!(page.contains("name=\"PTRATIO\" value=\"18.0\""));
        assert!(page.contains("<option value=\"No\" selected>No</option>"));
        assert!(page.contains("Predict House Price"));
        assert!(!page.contains("class=\"error\""));
    }

    #[test]
    fn test_car_form_widgets() {
        let page = render_form(AppKind::Car.spec(), &HashMap::new(), None);
        assert!(page.contains("type=\"range\" id=\"car_age\""));
        assert!(page.contains("max=\"30\""));
        assert!(page.contains("type=\"number\" id=\"present_price\""));
        assert!(page.contains("Thank you..!!"));
    }

    #[test]
    fn test_submitted_values_are_escaped() {
        let mut values = HashMap::new();
        values.insert("CRIM".to_string(), "\"><script>".to_string());
        let page = render_form(AppKind::House.spec(), &values, Some(&Banner::Error("bad".to_string())));
        assert!(page.contains("value=\"&quot;&gt;&lt;script&gt;\""));
        assert!(page.contains("<div class=\"error\">bad</div>"));
    }

    #[test]
    fn test_payload_error_page() {
        use actix_web::ResponseError;

        let err = FormPayloadError("<bad>".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let resp = err.error_response();
        let content_type = resp.headers().get("content-type").and_then(|v| v.to_str().ok());
        assert_eq!(content_type, Some("text/html; charset=utf-8"));
    }
}
