// HTML page holding the summary element and the chart element
use crate::domain::page::{CHART_ELEMENT_ID, PageView, SUMMARY_ELEMENT_ID};

pub fn render_page(title: &str, view: &PageView, svg: Option<&str>) -> String {
    let notice = view
        .notice
        .as_deref()
        .map(|n| format!("<p class=\"notice\">{}</p>", escape(n)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; margin: 2rem; }}
.notice {{ color: #c62828; font-weight: bold; }}
</style>
</head>
<body>
<h1>{title}</h1>
<p id="{summary_id}">{summary}</p>
{notice}
<div id="{chart_id}">{chart}</div>
</body>
</html>
"#,
        title = escape(title),
        summary_id = SUMMARY_ELEMENT_ID,
        summary = escape(&view.summary_text),
        notice = notice,
        chart_id = CHART_ELEMENT_ID,
        chart = svg.unwrap_or_default(),
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
