// Thu Oct 15 2026 - Alex

use chrono::{DateTime, SecondsFormat, Utc};
use itertools::Itertools;

use crate::modules::{ModuleResult, Outcome};
use crate::orchestration::ResultAggregate;
use crate::output::json::JsonSerializer;
use crate::output::formatter::{counters_line, escape_html, escape_markdown, payload_blocks, Block};
use crate::output::{ReportError, ReportFormat, NO_MODULES_NOTICE};
use crate::utils::{format_duration, single_line};

const TITLE: &str = "Reconnaissance Report";

/// Renders Markdown and HTML documents from a sealed aggregate.
pub struct ReportGenerator {
    format: ReportFormat,
    include_summary: bool,
    include_details: bool,
}

impl ReportGenerator {
    pub fn new(format: ReportFormat) -> Self {
        Self {
            format,
            include_summary: true,
            include_details: true,
        }
    }

    pub fn with_summary(mut self, include: bool) -> Self {
        self.include_summary = include;
        self
    }

    pub fn with_details(mut self, include: bool) -> Self {
        self.include_details = include;
        self
    }

    pub fn generate(&self, aggregate: &ResultAggregate, generated_at: DateTime<Utc>) -> Result<String, ReportError> {
        match self.format {
            ReportFormat::Markdown => Ok(self.generate_markdown(aggregate, generated_at)),
            ReportFormat::Html => Ok(self.generate_html(aggregate, generated_at)),
            ReportFormat::Json => JsonSerializer::new().render(aggregate, generated_at),
        }
    }

    fn generate_markdown(&self, aggregate: &ResultAggregate, generated_at: DateTime<Utc>) -> String {
        let mut md = String::new();

        md.push_str(&format!("# {}\n\n", TITLE));
        md.push_str(&format!("- **Target:** {}\n", escape_markdown(aggregate.target())));
        md.push_str(&format!("- **Started:** {}\n", timestamp(aggregate.start_time())));
        md.push_str(&format!("- **Finished:** {}\n", timestamp(aggregate.end_time())));
        md.push_str(&format!("- **Duration:** {}\n", format_duration(aggregate.duration())));
        md.push_str(&format!("- **Generated:** {}\n\n", timestamp(generated_at)));

        if self.include_summary {
            md.push_str("## Summary\n\n");
            md.push_str("| Metric | Value |\n");
            md.push_str("|--------|-------|\n");
            for metric in aggregate.summarize() {
                md.push_str(&format!("| {} | {} |\n", metric.metric, metric.value));
            }
            md.push('\n');
        }

        if self.include_details {
            md.push_str("## Module Results\n\n");

            if aggregate.is_empty() {
                md.push_str(&format!("_{}._\n", NO_MODULES_NOTICE));
            }

            for (name, result) in aggregate.modules() {
                md.push_str(&format!("### {}\n\n", escape_markdown(name)));
                md.push_str(&format!("- **Completed at:** {}\n", timestamp(result.completed_at)));

                match &result.outcome {
                    Outcome::Success { payload } => {
                        md.push_str("- **Status:** Completed\n");
                        if let Some(counters) = counters_line(payload) {
                            md.push_str(&format!("- **Counters:** {}\n", counters));
                        }
                        md.push('\n');

                        for block in payload_blocks(payload) {
                            markdown_block(&mut md, &block);
                        }
                    }
                    Outcome::Failure { error } => {
                        md.push_str(&format!("- **Status:** Failed ({})\n", error.kind));
                        md.push_str(&format!("- **Error:** {}\n\n", escape_markdown(&single_line(&error.message))));
                    }
                }
            }
        }

        md
    }

    fn generate_html(&self, aggregate: &ResultAggregate, generated_at: DateTime<Utc>) -> String {
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"UTF-8\">\n");
        html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
        html.push_str(&format!("<title>{} - {}</title>\n", TITLE, escape_html(aggregate.target())));
        html.push_str("<style>\n");
        html.push_str("body { font-family: 'Courier New', monospace; background: #1a1a2e; color: #eee; padding: 20px; }\n");
        html.push_str("h1, h2, h3 { color: #00d4ff; }\n");
        html.push_str("table { border-collapse: collapse; width: 100%; margin: 12px 0; }\n");
        html.push_str("th, td { border: 1px solid #444; padding: 6px 8px; text-align: left; }\n");
        html.push_str("th { background: #2a2a4e; color: #00d4ff; }\n");
        html.push_str("tr:nth-child(even) { background: #2a2a3e; }\n");
        html.push_str(".module { background: #22223a; padding: 12px 16px; border-radius: 5px; margin: 16px 0; }\n");
        html.push_str(".success { color: #4ecdc4; }\n");
        html.push_str(".failure { color: #ff6b6b; }\n");
        html.push_str(".notice { color: #ffe66d; }\n");
        html.push_str(".summary-box { background: #2a2a4e; padding: 15px; border-radius: 5px; margin: 20px 0; }\n");
        html.push_str("</style>\n</head>\n<body>\n");

        html.push_str(&format!("<h1>{}</h1>\n", TITLE));
        html.push_str(&format!("<p>Target: <strong>{}</strong></p>\n", escape_html(aggregate.target())));
        html.push_str(&format!(
            "<p>Started: {} | Finished: {} | Duration: {}</p>\n",
            timestamp(aggregate.start_time()),
            timestamp(aggregate.end_time()),
            format_duration(aggregate.duration())
        ));
        html.push_str(&format!("<p>Generated: {}</p>\n", timestamp(generated_at)));

        if self.include_summary {
            html.push_str("<div class=\"summary-box\">\n<h2>Summary</h2>\n");
            html.push_str("<table>\n<tr><th>Metric</th><th>Value</th></tr>\n");
            for metric in aggregate.summarize() {
                html.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td></tr>\n",
                    escape_html(&metric.metric),
                    escape_html(&metric.value)
                ));
            }
            html.push_str("</table>\n</div>\n");
        }

        if self.include_details {
            html.push_str("<h2>Module Results</h2>\n");

            if aggregate.is_empty() {
                html.push_str(&format!("<p class=\"notice\">{}.</p>\n", NO_MODULES_NOTICE));
            }

            for (name, result) in aggregate.modules() {
                html_module(&mut html, name, result);
            }
        }

        html.push_str("</body>\n</html>\n");
        html
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn markdown_block(md: &mut String, block: &Block) {
    match block {
        Block::Field { key, value } => {
            md.push_str(&format!("- **{}:** {}\n\n", escape_markdown(key), escape_markdown(value)));
        }
        Block::List { key, items } => {
            md.push_str(&format!("**{}** ({} items)\n\n", escape_markdown(key), items.len()));
            for item in items {
                md.push_str(&format!("- {}\n", escape_markdown(item)));
            }
            md.push('\n');
        }
        Block::Table { key, columns, rows } => {
            md.push_str(&format!("**{}** ({} rows)\n\n", escape_markdown(key), rows.len()));
            md.push_str(&format!("| {} |\n", columns.iter().map(|c| escape_markdown(c)).join(" | ")));
            md.push_str(&format!("|{}|\n", columns.iter().map(|_| "---").join("|")));
            for row in rows {
                md.push_str(&format!("| {} |\n", row.iter().map(|cell| escape_markdown(cell)).join(" | ")));
            }
            md.push('\n');
        }
    }
}

fn html_module(html: &mut String, name: &str, result: &ModuleResult) {
    html.push_str("<div class=\"module\">\n");
    html.push_str(&format!("<h3>{}</h3>\n", escape_html(name)));

    match &result.outcome {
        Outcome::Success { payload } => {
            html.push_str("<p class=\"success\">Status: Completed</p>\n");
            if let Some(counters) = counters_line(payload) {
                html.push_str(&format!("<p>Counters: {}</p>\n", escape_html(&counters)));
            }

            for block in payload_blocks(payload) {
                html_block(html, &block);
            }
        }
        Outcome::Failure { error } => {
            html.push_str(&format!(
                "<p class=\"failure\">Status: Failed ({})</p>\n<p class=\"failure\">Error: {}</p>\n",
                error.kind,
                escape_html(&single_line(&error.message))
            ));
        }
    }

    html.push_str(&format!("<p>Completed at: {}</p>\n", timestamp(result.completed_at)));
    html.push_str("</div>\n");
}

fn html_block(html: &mut String, block: &Block) {
    match block {
        Block::Field { key, value } => {
            html.push_str(&format!("<p><strong>{}:</strong> {}</p>\n", escape_html(key), escape_html(value)));
        }
        Block::List { key, items } => {
            html.push_str(&format!("<h4>{} ({} items)</h4>\n<ul>\n", escape_html(key), items.len()));
            for item in items {
                html.push_str(&format!("<li>{}</li>\n", escape_html(item)));
            }
            html.push_str("</ul>\n");
        }
        Block::Table { key, columns, rows } => {
            html.push_str(&format!("<h4>{} ({} rows)</h4>\n<table>\n<tr>", escape_html(key), rows.len()));
            for column in columns {
                html.push_str(&format!("<th>{}</th>", escape_html(column)));
            }
            html.push_str("</tr>\n");
            for row in rows {
                html.push_str("<tr>");
                for cell in row {
                    html.push_str(&format!("<td>{}</td>", escape_html(cell)));
                }
                html.push_str("</tr>\n");
            }
            html.push_str("</table>\n");
        }
    }
}
