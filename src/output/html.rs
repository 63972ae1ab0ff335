//! Browsable HTML report generation
//!
//! Renders one row per scanned page. Each matched term gets a collapsible
//! sub-table listing line, column and effective pattern, followed by the
//! matching line with every match highlighted. A "Toggle All" control opens
//! or closes every sub-table at once.

use crate::output::OutputResult;
use crate::report::{CrawlReport, MatchRecord, PageResult};
use chrono::{DateTime, Utc};
use html_escape::{encode_double_quoted_attribute, encode_text};
use regex::{Regex, RegexBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const STYLE: &str = r#"
body { font-family: Roboto, Helvetica, sans-serif; font-size: 12px; }
a { color: #000; text-decoration: none; }
a:hover { text-decoration: underline; }
table { width: 100%; border-collapse: collapse; }
th, td { border: 1px solid #ddd; padding: 6px; text-align: left; }
th { background-color: #f2f2f2; }
table.pages > tbody > tr > td { border-bottom: 4px solid #b1b1b1; }
nav ul { list-style: none; padding: 0; margin: 0; }
nav a { display: inline-block; margin: 5px 0; padding: 5px 10px; background: #efefef; border: 1px solid #cbcbcb; }
nav a:hover { background: #e0e0e0; text-decoration: none; }
.page-url { font-weight: bold; padding: 6px 0; }
.meta { color: #666; }
.sub-table { margin-top: 2px; border-bottom: 2px solid #c9c9c9; }
.sub-table tbody { display: none; }
.sub-table tbody.show { display: table-row-group; }
.sub-table thead th { cursor: pointer; }
.sub-table thead th:hover { background-color: #e0e0e0; }
.sub-table td.label { width: 10%; font-weight: bold; }
p.clean { margin: 0; padding: 6px 0; }
pre { background: #f4f4f4; padding: 10px; border: 1px solid #ddd; max-width: 1200px; }
code { display: block; white-space: pre-wrap; overflow-wrap: break-word; font-family: 'Droid Sans Mono', monospace; }
span.highlight { background-color: #aacae4; }
@media print { .no-print { display: none !important; } }
"#;

const SCRIPT: &str = r#"
document.addEventListener('DOMContentLoaded', function () {
    document.querySelectorAll('table.sub-table > thead th').forEach(function (header) {
        header.addEventListener('click', function (event) {
            var body = event.target.closest('table.sub-table').querySelector('tbody');
            if (body) { body.classList.toggle('show'); }
        });
    });

    document.getElementById('toggle-all').addEventListener('click', function (event) {
        event.preventDefault();
        var bodies = Array.from(document.querySelectorAll('table.sub-table > tbody'));
        var anyOpen = bodies.some(function (body) { return body.classList.contains('show'); });
        bodies.forEach(function (body) { body.classList.toggle('show', !anyOpen); });
    });
});
"#;

/// Writes the HTML report to `output_path`
pub fn write_html_report(
    report: &CrawlReport,
    output_path: &Path,
    generated_at: DateTime<Utc>,
) -> OutputResult<()> {
    let html = format_html_report(report, generated_at);

    let mut file = File::create(output_path)?;
    file.write_all(html.as_bytes())?;

    Ok(())
}

/// Formats a crawl report as a standalone HTML document
pub fn format_html_report(report: &CrawlReport, generated_at: DateTime<Utc>) -> String {
    let start_url = encode_text(report.start_url());
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str(&format!("<title>Scan Results for {}</title>\n", start_url));
    html.push_str(&format!("<style>{}</style>\n", STYLE));
    html.push_str("</head>\n<body>\n");

    html.push_str(&format!("<h1>Scan Results for {}</h1>\n", start_url));
    html.push_str(&format!(
        "<p class=\"meta\">{} pages scanned, {} with matches. Generated {}.</p>\n",
        report.len(),
        report.pages_with_matches(),
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str(
        "<nav class=\"no-print\"><ul><li><a href=\"#\" id=\"toggle-all\">Toggle All</a></li></ul></nav>\n",
    );

    html.push_str("<table class=\"pages\">\n<tbody>\n");
    for result in report.results() {
        push_page_row(&mut html, result);
    }
    html.push_str("</tbody>\n</table>\n");

    html.push_str(&format!("<script>{}</script>\n", SCRIPT));
    html.push_str("</body>\n</html>\n");

    html
}

fn push_page_row(html: &mut String, result: &PageResult) {
    html.push_str("<tr><td>\n");
    html.push_str(&format!(
        "<div class=\"page-url\"><a href=\"{}\" target=\"_blank\">{}</a></div>\n",
        encode_double_quoted_attribute(&result.normalized_url),
        encode_text(&result.normalized_url)
    ));

    if result.is_clean() {
        html.push_str("<p class=\"clean\">No items found</p>\n");
    }

    for (term, matches) in &result.found_items {
        push_term_table(html, term, matches);
    }

    html.push_str("</td></tr>\n");
}

fn push_term_table(html: &mut String, term: &str, matches: &[MatchRecord]) {
    html.push_str("<table class=\"sub-table\">\n");
    html.push_str(&format!(
        "<thead><tr><th colspan=\"2\">{} ({})</th></tr></thead>\n<tbody>\n",
        encode_text(term),
        matches.len()
    ));

    // Every record of a term carries the same effective pattern
    let highlighter = matches.first().and_then(|m| compile_highlighter(&m.pattern));

    for record in matches {
        html.push_str(&format!(
            "<tr><td class=\"label\">Line:</td><td><strong>{}</strong> / Col {} / Regex: {}</td></tr>\n",
            record.line_number,
            record.column_offset,
            encode_text(&record.pattern)
        ));
        html.push_str(&format!(
            "<tr><td class=\"label\">Line Content:</td><td><pre><code>{}</code></pre></td></tr>\n",
            highlight_line(&record.line_content, highlighter.as_ref())
        ));
    }

    html.push_str("</tbody>\n</table>\n");
}

fn compile_highlighter(pattern: &str) -> Option<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .ok()
}

/// HTML-escapes a line and wraps every non-empty match in a highlight span
fn highlight_line(line: &str, highlighter: Option<&Regex>) -> String {
    let Some(regex) = highlighter else {
        return encode_text(line).into_owned();
    };

    let mut out = String::with_capacity(line.len() + 32);
    let mut last = 0;

    for found in regex.find_iter(line) {
        if found.start() == found.end() {
            continue;
        }
        out.push_str(&encode_text(&line[last..found.start()]));
        out.push_str("<span class=\"highlight\">");
        out.push_str(&encode_text(found.as_str()));
        out.push_str("</span>");
        last = found.end();
    }

    out.push_str(&encode_text(&line[last..]));
    out
}
