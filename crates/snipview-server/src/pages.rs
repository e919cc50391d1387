//! HTML pages served by the dev server.

use snipview_compile::escape::html_escape;
use snipview_detect::CompilationType;

/// The snippet editor: a textarea, a type override and a sandboxed preview frame.
///
/// Input is compiled after `debounce_ms` of inactivity. Responses carry the
/// request sequence number so stale results are dropped.
pub fn editor_page(debounce_ms: u64) -> String {
    let options: String = CompilationType::ALL
        .iter()
        .map(|ct| format!(r#"<option value="{ct}">{ct}</option>"#))
        .collect::<Vec<_>>()
        .join("\n          ");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Snipview</title>
  <style>
    * {{ box-sizing: border-box; }}
    body {{ margin: 0; font-family: system-ui, sans-serif; height: 100vh; display: flex; flex-direction: column; }}
    header {{ display: flex; align-items: center; gap: 1rem; padding: 0.5rem 1rem; border-bottom: 1px solid #e2e8f0; }}
    header h1 {{ font-size: 1rem; margin: 0; }}
    #status {{ color: #64748b; font-size: 0.875rem; }}
    main {{ flex: 1; display: grid; grid-template-columns: 1fr 1fr; min-height: 0; }}
    textarea {{ width: 100%; height: 100%; border: 0; border-right: 1px solid #e2e8f0; padding: 1rem; font: 13px/1.5 ui-monospace, monospace; resize: none; outline: none; }}
    iframe {{ width: 100%; height: 100%; border: 0; background: #fff; }}
  </style>
</head>
<body>
  <header>
    <h1>Snipview</h1>
    <label>Type
      <select id="type">
          <option value="">auto-detect</option>
          {options}
      </select>
    </label>
    <span id="status">Paste a snippet to preview it</span>
    <a href="/api/snippets">snippets</a>
  </header>
  <main>
    <textarea id="code" spellcheck="false" placeholder="Paste React, Vue, TypeScript, HTML or CSS here"></textarea>
    <iframe id="preview" sandbox="allow-scripts" title="Preview"></iframe>
  </main>
  <script>
  (function() {{
    'use strict';

    var DEBOUNCE_MS = {debounce_ms};
    var code = document.getElementById('code');
    var type = document.getElementById('type');
    var frame = document.getElementById('preview');
    var status = document.getElementById('status');
    var timer = null;
    var sequence = 0;

    function compile() {{
      var seq = ++sequence;
      if (!code.value.trim()) {{
        frame.srcdoc = '';
        status.textContent = 'Paste a snippet to preview it';
        return;
      }}

      fetch('/api/compile', {{
        method: 'POST',
        headers: {{ 'content-type': 'application/json' }},
        body: JSON.stringify({{ code: code.value, compilationType: type.value || null }})
      }})
        .then(function(res) {{ return res.json(); }})
        .then(function(result) {{
          if (seq !== sequence) {{
            return;
          }}
          frame.srcdoc = result.html;
          var c = result.classification;
          status.textContent = c.framework + ' / ' + c.dialect + ' -> ' + c.compilationType +
            (result.componentName ? ' (' + result.componentName + ')' : '');
        }})
        .catch(function(err) {{
          if (seq === sequence) {{
            status.textContent = 'Error: ' + err.message;
          }}
        }});
    }}

    function schedule() {{
      clearTimeout(timer);
      timer = setTimeout(compile, DEBOUNCE_MS);
    }}

    code.addEventListener('input', schedule);
    type.addEventListener('change', compile);
  }})();
  </script>
</body>
</html>"#
    )
}

/// Host page for one snippet file with live updates.
pub fn snippet_page(path: &str, title: &str, compilation_type: &str, preview_html: &str) -> String {
    // JSON strings are valid JS literals
    let path_literal = serde_json::to_string(path).unwrap_or_else(|_| "\"\"".to_string());

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} - Snipview</title>
  <style>
    body {{ margin: 0; font-family: system-ui, sans-serif; height: 100vh; display: flex; flex-direction: column; }}
    header {{ display: flex; align-items: center; gap: 1rem; padding: 0.5rem 1rem; border-bottom: 1px solid #e2e8f0; font-size: 0.875rem; }}
    header h1 {{ font-size: 1rem; margin: 0; }}
    #live-status {{ color: #64748b; margin-left: auto; }}
    iframe {{ flex: 1; width: 100%; border: 0; }}
  </style>
</head>
<body>
  <header>
    <h1>{title}</h1>
    <code>{path_html}</code>
    <span id="kind">{compilation_type}</span>
    <span id="live-status">connecting</span>
  </header>
  <iframe id="preview" sandbox="allow-scripts" title="{title}" srcdoc="{srcdoc}"></iframe>
  <script>window.__SNIPVIEW_PATH = {path_literal};</script>
  <script src="/__live.js"></script>
</body>
</html>"#,
        title = html_escape(title),
        path_html = html_escape(path),
        compilation_type = html_escape(compilation_type),
        srcdoc = html_escape(preview_html),
        path_literal = path_literal.replace("</", "<\\/"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editor_lists_every_compilation_type() {
        let html = editor_page(300);

        for ct in CompilationType::ALL {
            assert!(html.contains(&format!(r#"<option value="{ct}">"#)));
        }
        assert!(html.contains("var DEBOUNCE_MS = 300;"));
        assert!(html.contains(r#"sandbox="allow-scripts""#));
        assert!(html.contains("seq !== sequence"));
    }

    #[test]
    fn snippet_page_escapes_preview_into_srcdoc() {
        let html = snippet_page(
            "react/Card.jsx",
            "Card <b>",
            "babel-react",
            r#"<!DOCTYPE html><p class="x">Hi</p>"#,
        );

        assert!(html.contains("<title>Card &lt;b&gt; - Snipview</title>"));
        assert!(html.contains(
            r#"srcdoc="&lt;!DOCTYPE html&gt;&lt;p class=&quot;x&quot;&gt;Hi&lt;/p&gt;""#
        ));
        assert!(html.contains(r#"window.__SNIPVIEW_PATH = "react/Card.jsx";"#));
        assert!(html.contains(r#"<script src="/__live.js"></script>"#));
    }
}
