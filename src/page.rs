//! Server-side rendering of the single predictor page.

use std::path::Path;

use crate::category::Category;
use crate::country::Country;
use crate::presenter::{DisplayState, Session};
use crate::types::{AqiValue, CoAqiValue, No2AqiValue, OzoneAqiValue};

pub const TITLE: &str = "Air Quality Index Predictor";
pub const SUBTITLE: &str = "Predict AQI category based on air quality measurements";
pub const FOOTER: &str = "AQI Predictor - Powered by Machine Learning";

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0 1rem; color: #1f2937; }
.main-title { text-align: center; font-size: 2.5rem; font-weight: 600; margin-bottom: 0.5rem; }
.subtitle { text-align: center; color: #6b7280; font-size: 1.1rem; margin-bottom: 1.5rem; }
.layout { display: grid; grid-template-columns: 1fr 3fr 1fr; gap: 1.5rem; }
.prediction-box { padding: 2rem; border-radius: 12px; margin: 1rem 0; text-align: center; color: white; }
.prediction-good { background: linear-gradient(135deg, #22c55e, #16a34a); }
.prediction-moderate { background: linear-gradient(135deg, #eab308, #ca8a04); }
.prediction-unhealthy-sensitive { background: linear-gradient(135deg, #f97316, #ea580c); }
.prediction-unhealthy { background: linear-gradient(135deg, #ef4444, #dc2626); }
.prediction-very-unhealthy { background: linear-gradient(135deg, #a855f7, #9333ea); }
.prediction-hazardous { background: linear-gradient(135deg, #991b1b, #7f1d1d); }
.notice { padding: 0.75rem 1rem; border-radius: 8px; margin: 1rem 0; }
.notice-ok { background: #dcfce7; color: #166534; }
.notice-error { background: #fee2e2; color: #7f1d1d; }
.health-rec { padding: 1rem; border-radius: 8px; margin: 1rem 0; font-weight: 500; }
.info-box { background: #fff; padding: 1.2rem; border-radius: 8px; margin: 1rem 0; border-left: 4px solid #3b82f6; }
.categories { display: grid; grid-template-columns: repeat(3, 1fr); gap: 0.5rem; }
.category-box { padding: 1.2rem; border-radius: 8px; text-align: center; }
.category-good { background: #dcfce7; border-left: 4px solid #22c55e; }
.category-moderate { background: #fef3c7; border-left: 4px solid #eab308; }
.category-unhealthy-sensitive { background: #fed7aa; border-left: 4px solid #f97316; }
.category-unhealthy { background: #fecaca; border-left: 4px solid #ef4444; }
.category-very-unhealthy { background: #e9d5ff; border-left: 4px solid #a855f7; }
.category-hazardous { background: #fee2e2; border-left: 4px solid #991b1b; }
"#;

const ABOUT: [(&str, &str, &str); 4] = [
    ("🌡️", "AQI Value", "Overall air quality index (6-500 range)"),
    ("🚗", "CO AQI", "Carbon Monoxide levels from vehicles"),
    ("☀️", "Ozone AQI", "Ground-level ozone pollution"),
    ("🏭", "NO2 AQI", "Nitrogen Dioxide from industry"),
];

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn document(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>AQI Predictor</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1 class=\"main-title\">🌫️ {TITLE}</h1>\n<p class=\"subtitle\">{SUBTITLE}</p>\n\
         {body}\n<hr>\n<p><strong>{FOOTER}</strong></p>\n</body>\n</html>\n"
    )
}

/// Header plus the load error; no inputs and no predict action.
pub fn render_unavailable(path: &Path, reason: &str) -> String {
    let file = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    document(&format!(
        "<div class=\"notice notice-error\">⚠️ Model file '{}' not found. \
         Please ensure the model file is in the correct directory.<br><small>{}</small></div>",
        escape(&file),
        escape(reason)
    ))
}

fn slider(name: &str, label: &str, min: u16, max: u16, value: u16) -> String {
    format!(
        "<label for=\"{name}\">{label}</label>\n\
         <input type=\"range\" id=\"{name}\" name=\"{name}\" min=\"{min}\" max=\"{max}\" value=\"{value}\" \
         oninput=\"this.nextElementSibling.value=this.value\"> <output>{value}</output><br>\n"
    )
}

fn inputs_panel(session: &Session) -> String {
    let c = &session.inputs;
    let mut html = String::from("<h2>Input Parameters</h2>\n");
    html.push_str(&slider("aqi_value", "AQI Value", AqiValue::MIN, AqiValue::MAX, c.aqi_value().get()));
    html.push_str(&slider(
        "co_aqi_value",
        "CO AQI Value",
        CoAqiValue::MIN,
        CoAqiValue::MAX,
        c.co_aqi_value().get(),
    ));
    html.push_str(&slider(
        "ozone_aqi_value",
        "Ozone AQI Value",
        OzoneAqiValue::MIN,
        OzoneAqiValue::MAX,
        c.ozone_aqi_value().get(),
    ));
    html.push_str(&slider(
        "no2_aqi_value",
        "NO2 AQI Value",
        No2AqiValue::MIN,
        No2AqiValue::MAX,
        c.no2_aqi_value().get(),
    ));

    html.push_str("<label for=\"country\">Select Country</label>\n<select id=\"country\" name=\"country\">\n");
    for country in Country::all() {
        let selected = if country == c.country() { " selected" } else { "" };
        let name = escape(country.name());
        html.push_str(&format!("<option value=\"{name}\"{selected}>{name}</option>\n"));
    }
    html.push_str("</select>\n");
    html.push_str("<button type=\"submit\" name=\"action\" value=\"update\">Apply</button>\n");

    html.push_str(&format!(
        "<hr>\n<p><strong>Current Values</strong></p>\n\
         <p>🌡️ AQI Value: <strong>{}</strong></p>\n\
         <p>🚗 CO AQI: <strong>{}</strong></p>\n\
         <p>☀️ Ozone AQI: <strong>{}</strong></p>\n\
         <p>🏭 NO2 AQI: <strong>{}</strong></p>\n\
         <p>🌍 Country: <strong>{}</strong></p>\n",
        c.aqi_value(),
        c.co_aqi_value(),
        c.ozone_aqi_value(),
        c.no2_aqi_value(),
        escape(c.country().name())
    ));
    html
}

fn result_area(display: &DisplayState, just_predicted: bool) -> String {
    match display {
        DisplayState::Empty => String::new(),
        DisplayState::Failed(msg) => {
            format!("<div class=\"notice notice-error\">❌ Error: {}</div>\n", escape(msg))
        }
        DisplayState::Showing(result) => {
            let info = result.info;
            let mut html = String::new();
            if just_predicted {
                html.push_str("<div class=\"notice notice-ok\">✅ Prediction completed!</div>\n");
            }
            html.push_str(&format!(
                "<div class=\"prediction-box {}\">\n<h2 class=\"prediction-title\">{}</h2>\n\
                 <p class=\"prediction-desc\">{}</p>\n</div>\n",
                info.css_class, info.label, info.description
            ));
            html.push_str(&format!(
                "<h3>Health Recommendations</h3>\n<div class=\"health-rec\" \
                 style=\"background-color: {}; color: {}; border-left: 4px solid {};\">{} {}</div>\n",
                info.advice_background, info.advice_text_color, info.color, info.advice_icon, info.health_advice
            ));
            html
        }
    }
}

/// The static reference panel: every category with its AQI band.
pub fn reference_panel() -> String {
    let mut html = String::from("<h3>AQI Categories Reference</h3>\n<div class=\"categories\">\n");
    for c in Category::ALL {
        let info = c.info();
        html.push_str(&format!(
            "<div class=\"category-box {}\"><h4 class=\"category-title\">{}</h4>\
             <p class=\"category-desc\">{}</p></div>\n",
            info.reference_class,
            info.label,
            c.reference_line()
        ));
    }
    html.push_str("</div>\n");
    html
}

fn about_panel() -> String {
    let mut html = String::from("<h3>About AQI Parameters</h3>\n");
    for (icon, title, text) in ABOUT {
        html.push_str(&format!("<div class=\"info-box\"><h4>{icon} {title}</h4><p>{text}</p></div>\n"));
    }
    html
}

/// Full page for a session whose model is loaded.
pub fn render(session: &Session, just_predicted: bool) -> String {
    let body = format!(
        "<form method=\"post\" action=\"/\" class=\"layout\">\n\
         <aside>\n{}</aside>\n\
         <main>\n<button type=\"submit\" name=\"action\" value=\"predict\">🔮 Predict AQI Category</button>\n\
         {}{}</main>\n\
         <aside>\n{}</aside>\n</form>",
        inputs_panel(session),
        result_area(session.display(), just_predicted),
        reference_panel(),
        about_panel()
    );
    document(&body)
}
