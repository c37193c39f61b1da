//! HTML rendering for the page tree
//!
//! Produces one self-contained document: Bootstrap for the grid, Plotly for
//! the charts, initial figures embedded as JSON, and a short script that
//! posts selector changes to the update endpoint and redraws only the
//! outputs it returns.

use serde_json::{Map, Value};
use std::fmt::Write;

use super::node::{Node, Page, Tab};

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootswatch@5.3.3/dist/united/bootstrap.min.css";
const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Endpoint the page posts selector changes to
pub const UPDATE_ENDPOINT: &str = "/api/v1/update";

/// Bootstrap contextual colours; anything else is used as a CSS colour
const THEME_COLORS: [&str; 8] = [
    "primary",
    "secondary",
    "success",
    "info",
    "warning",
    "danger",
    "light",
    "dark",
];

const PAGE_SCRIPT: &str = r#"
(function () {
  const figures = JSON.parse(document.getElementById('initial-figures').textContent);
  for (const [id, figure] of Object.entries(figures)) {
    Plotly.newPlot(id, figure.data, figure.layout, { responsive: true });
  }

  document.querySelectorAll('[data-tab-target]').forEach(function (button) {
    button.addEventListener('click', function () {
      const group = button.closest('.tab-group');
      group.querySelectorAll('[data-tab-target]').forEach(b => b.classList.remove('active'));
      group.querySelectorAll('.tab-pane').forEach(p => p.classList.add('d-none'));
      button.classList.add('active');
      const pane = document.getElementById(button.dataset.tabTarget);
      pane.classList.remove('d-none');
      pane.querySelectorAll('.js-plotly-plot').forEach(el => Plotly.Plots.resize(el));
    });
  });

  document.querySelectorAll('select[data-input]').forEach(function (select) {
    select.addEventListener('change', async function () {
      const response = await fetch(select.dataset.endpoint, {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ input_id: select.id, value: select.value }),
      });
      if (!response.ok) {
        console.error('update failed', response.status);
        return;
      }
      const body = await response.json();
      for (const output of body.outputs) {
        Plotly.react(output.id, output.figure.data, output.figure.layout);
      }
    });
  });
})();
"#;

impl Page {
    /// Render the complete HTML document
    pub fn render_html(&self) -> String {
        let mut body = String::new();
        let mut tab_counter = 0usize;
        render_node(&self.root, &mut body, &mut tab_counter);

        let figures: Map<String, Value> = self
            .graphs()
            .into_iter()
            .map(|(id, chart)| (id.to_string(), chart.to_figure()))
            .collect();
        let figures = script_safe_json(&Value::Object(figures));

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="{css}">
<script src="{plotly}"></script>
<style>
.graph {{ min-height: 420px; }}
</style>
</head>
<body>
{body}
<script id="initial-figures" type="application/json">{figures}</script>
<script>{script}</script>
</body>
</html>
"#,
            title = escape(&self.title),
            css = BOOTSTRAP_CSS,
            plotly = PLOTLY_JS,
            body = body,
            figures = figures,
            script = PAGE_SCRIPT,
        )
    }
}

fn render_node(node: &Node, out: &mut String, tab_counter: &mut usize) {
    match node {
        Node::Banner { title, lead } => {
            let _ = write!(
                out,
                r#"<div class="p-3 bg-light rounded-3"><div class="container-fluid py-3"><h1 class="display-3">{}</h1><p class="lead">{}</p></div></div>"#,
                escape(title),
                escape(lead)
            );
        }
        Node::Container { children } => {
            out.push_str(r#"<div class="px-4">"#);
            render_children(children, out, tab_counter);
            out.push_str("</div>");
        }
        Node::Row { children } => {
            out.push_str(r#"<div class="row g-3">"#);
            render_children(children, out, tab_counter);
            out.push_str("</div>");
        }
        Node::Col { width, children } => {
            match width {
                Some(width) => {
                    let _ = write!(out, r#"<div class="col-md-{}">"#, (*width).clamp(1, 12));
                }
                None => out.push_str(r#"<div class="col">"#),
            }
            render_children(children, out, tab_counter);
            out.push_str("</div>");
        }
        Node::Card {
            header,
            color,
            children,
        } => {
            out.push_str(&card_open(color.as_deref()));
            if let Some(header) = header {
                let _ = write!(out, r#"<div class="card-header">{}</div>"#, escape(header));
            }
            out.push_str(r#"<div class="card-body">"#);
            render_children(children, out, tab_counter);
            out.push_str("</div></div>");
        }
        Node::Heading { level, text } => {
            let level = (*level).clamp(1, 6);
            let _ = write!(out, "<h{level}>{}</h{level}>", escape(text));
        }
        Node::Paragraph { text } => {
            let _ = write!(out, "<p>{}</p>", escape(text));
        }
        Node::Graph { id, .. } => {
            let _ = write!(out, r#"<div id="{}" class="graph"></div>"#, escape(id));
        }
        Node::Dropdown { id, options, value } => {
            let _ = write!(
                out,
                r#"<select id="{}" class="form-select" data-input="true" data-endpoint="{}">"#,
                escape(id),
                UPDATE_ENDPOINT
            );
            for option in options {
                let selected = if option == value { " selected" } else { "" };
                let _ = write!(
                    out,
                    r#"<option value="{0}"{1}>{0}</option>"#,
                    escape(option),
                    selected
                );
            }
            out.push_str("</select>");
        }
        Node::Tabs { tabs } => render_tabs(tabs, out, tab_counter),
        Node::Rule => out.push_str("<hr>"),
        Node::Break => out.push_str("<br>"),
    }
}

fn render_children(children: &[Node], out: &mut String, tab_counter: &mut usize) {
    for child in children {
        render_node(child, out, tab_counter);
    }
}

fn render_tabs(tabs: &[Tab], out: &mut String, tab_counter: &mut usize) {
    let first = *tab_counter;
    *tab_counter += tabs.len();

    out.push_str(r#"<div class="tab-group"><ul class="nav nav-tabs">"#);
    for (offset, tab) in tabs.iter().enumerate() {
        let active = if offset == 0 { " active" } else { "" };
        let _ = write!(
            out,
            r#"<li class="nav-item"><button type="button" class="nav-link{}" data-tab-target="tab-pane-{}">{}</button></li>"#,
            active,
            first + offset,
            escape(&tab.label)
        );
    }
    out.push_str("</ul>");

    for (offset, tab) in tabs.iter().enumerate() {
        let hidden = if offset == 0 { "" } else { " d-none" };
        let _ = write!(
            out,
            r#"<div id="tab-pane-{}" class="tab-pane{}">"#,
            first + offset,
            hidden
        );
        render_node(&tab.content, out, tab_counter);
        out.push_str("</div>");
    }
    out.push_str("</div>");
}

fn card_open(color: Option<&str>) -> String {
    match color {
        Some(color) if THEME_COLORS.contains(&color) => {
            format!(r#"<div class="card text-bg-{}">"#, color)
        }
        Some(color) => format!(
            r#"<div class="card" style="background-color: {}">"#,
            escape(color)
        ),
        None => r#"<div class="card">"#.to_string(),
    }
}

/// Escape text for HTML element content and quoted attributes
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

/// JSON safe to embed inside a `<script>` element
fn script_safe_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}
