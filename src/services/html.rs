//! HTML pages for the eligibility form.
//!
//! Pages are small enough to be assembled with `format!`; every piece of
//! user- or rule-supplied text goes through [`escape`] first.

use std::fmt::Write;

use crate::models::SchemeListing;

const STYLE: &str = "body{font-family:sans-serif;max-width:40rem;margin:2rem auto;padding:0 1rem}\
label{display:block;margin-top:.75rem}input{width:100%;padding:.4rem}\
.error{background:#fde8e8;border:1px solid #f5a3a3;padding:.75rem}\
button{margin-top:1rem;padding:.5rem 1.25rem}";

/// Escape text for use inside HTML element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
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

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}</body>\n</html>\n",
        title = escape(title),
    )
}

/// The input form, optionally with a message explaining why the last
/// submission was rejected
pub fn index_page(message: Option<&str>) -> String {
    let mut body = String::from("<h1>Find schemes you are eligible for</h1>\n");

    if let Some(message) = message {
        let _ = writeln!(body, "<p class=\"error\" role=\"alert\">{}</p>", escape(message));
    }

    body.push_str(concat!(
        "<form method=\"post\" action=\"/\">\n",
        "<label>Name <input name=\"name\" required></label>\n",
        "<label>Age <input name=\"age\" type=\"number\" min=\"1\" required></label>\n",
        "<label>Income range <input name=\"income\" list=\"income-options\" required></label>\n",
        "<datalist id=\"income-options\"><option value=\"Low\"><option value=\"Middle\"><option value=\"High\"></datalist>\n",
        "<label>Employment status <input name=\"employment\" required></label>\n",
        "<label>Residency <input name=\"residency\" required></label>\n",
        "<fieldset><legend>Show results as</legend>\n",
        "<label><input type=\"radio\" name=\"format\" value=\"html\" checked> Web page</label>\n",
        "<label><input type=\"radio\" name=\"format\" value=\"pdf\"> PDF download</label>\n",
        "</fieldset>\n",
        "<button type=\"submit\">Check eligibility</button>\n",
        "</form>\n",
    ));

    layout("Scheme eligibility", &body)
}

/// List of matched schemes for one applicant
pub fn results_page(listing: &SchemeListing) -> String {
    let mut body = format!("<h1>Eligible schemes for {}</h1>\n", escape(&listing.name));

    if listing.schemes.is_empty() {
        body.push_str("<p>No eligible schemes were found for the details you entered.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for scheme in &listing.schemes {
            let _ = writeln!(body, "<li>{}</li>", escape(scheme));
        }
        body.push_str("</ul>\n");
    }

    body.push_str("<p><a href=\"/\">Check again</a></p>\n");
    layout("Eligible schemes", &body)
}

/// Generic failure page; never includes internal error details
pub fn error_page(message: &str) -> String {
    let body = format!(
        "<h1>Something went wrong</h1>\n<p class=\"error\">{}</p>\n<p><a href=\"/\">Back to the form</a></p>\n",
        escape(message)
    );
    layout("Error", &body)
}
