//! Quote email bodies.
//!
//! Both bodies list the same fields in the same order. Every value that ends
//! up in the HTML body goes through [`escape`]; the text body carries values
//! verbatim. Rendering is pure: the same request always yields the same output.

use std::borrow::Cow;

use crate::model::quote::QuoteRequest;

pub const HEADING: &str = "New Cleaning Quote Request";

/// Escape `&`, `<`, `>`, `"` and `'` for interpolation into HTML.
pub fn escape(value: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(value)
}

/// Subject line of the email sent to the business inbox.
pub fn subject(quote: &QuoteRequest) -> String {
    format!("New Quote Request — {}", quote.name)
}

/// Labeled rows in display order, skipping fields that are absent.
/// The free-text message is not a row; it gets its own section.
pub fn rows(quote: &QuoteRequest) -> Vec<(&'static str, &str)> {
    let mut rows = vec![
        ("Name", quote.name.as_str()),
        ("Email", quote.email.as_str()),
        ("Phone", quote.phone.as_str()),
    ];
    if let Some(address) = &quote.address {
        rows.push(("Address", address.as_str()));
    }
    if let Some(service_type) = &quote.service_type {
        rows.push(("Service Type", service_type.as_str()));
    }
    rows.push(("Frequency", quote.frequency.label()));
    if let Some(date) = &quote.preferred_date {
        rows.push(("Preferred Date", date.as_str()));
    }
    rows
}

pub fn render_text(quote: &QuoteRequest) -> String {
    let mut lines = vec![HEADING.to_string()];
    for (label, value) in rows(quote) {
        lines.push(format!("{}: {}", label, value));
    }
    if let Some(message) = &quote.message {
        lines.push(String::new());
        lines.push(format!("Message:\n{}", message));
    }
    lines.join("\n")
}

fn html_row(label: &str, value: &str) -> String {
    format!(
        r#"          <tr>
            <td style="padding:10px 12px;border-bottom:1px solid #eee;font-weight:600;width:160px;color:#111">{label}</td>
            <td style="padding:10px 12px;border-bottom:1px solid #eee;color:#374151">{value}</td>
          </tr>
"#,
        label = escape(label),
        value = escape(value),
    )
}

pub fn render_html(quote: &QuoteRequest) -> String {
    let table: String = rows(quote).into_iter().map(|(l, v)| html_row(l, v)).collect();

    let message = match &quote.message {
        Some(message) => format!(
            r#"      <div style="padding:16px 24px;border-top:1px solid #f1f5f9">
        <div style="font-weight:600;color:#111;margin-bottom:6px">Message</div>
        <div style="font-size:14px;white-space:pre-wrap;color:#374151">{}</div>
      </div>
"#,
            escape(message)
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>{heading}</title>
</head>
<body style="margin:0;background:#0b1220;padding:24px;font-family:Arial,sans-serif">
  <div style="max-width:640px;margin:auto;background:#ffffff;border-radius:16px;overflow:hidden;border:1px solid #e5e7eb">
    <div style="padding:20px 24px;border-bottom:1px solid #f1f5f9">
      <h1 style="margin:0;font-size:20px;line-height:28px;color:#C30003">{heading}</h1>
      <p style="margin:4px 0 0;font-size:13px;color:#475569">Submitted via the contact form</p>
    </div>
    <table style="width:100%;border-collapse:collapse">
      <tbody>
{table}      </tbody>
    </table>
{message}    <div style="padding:14px 24px;border-top:1px solid #f1f5f9;background:#fafafa;font-size:12px;color:#6b7280">
      Reply directly to reach <strong>{name}</strong>.
    </div>
  </div>
</body>
</html>"#,
        heading = HEADING,
        table = table,
        message = message,
        name = escape(&quote.name),
    )
}
