//! Preview document templates.
//!
//! Every generated document extends a shared envelope that loads the baseline
//! stylesheet helper and the runtime scripts for its compilation type. Documents
//! that execute user code also get an error bridge: uncaught errors and the
//! strategy's own `try`/`catch` both render into a labeled error panel.

use std::sync::LazyLock;

use minijinja::{AutoEscape, Environment};
use serde::Serialize;

use snipview_detect::BASELINE_STYLESHEET;

use crate::strategy::{CompileError, GenerateContext};

/// Values available to the document templates.
#[derive(Debug, Default, Clone, Serialize)]
pub struct DocumentContext {
    /// Document title
    pub title: String,

    /// Framework label used in error panels (e.g. "React")
    pub label: String,

    /// Element the preview renders into
    pub mount_id: String,

    /// Styling helper loaded by every envelope
    pub baseline: &'static str,

    /// Runtime scripts, in load order
    pub dependencies: Vec<&'static str>,

    /// Whether the document executes user code
    pub runtime: bool,

    /// Code or markup placed in the body
    pub code: String,

    /// Stylesheet placed in the head
    pub style: Option<String>,

    /// Component names tried at render time, in order
    pub component_names: Vec<String>,

    /// Text shown by stub and error documents
    pub message: Option<String>,
}

impl DocumentContext {
    /// Context for a document that only displays content.
    pub fn new(title: &str, label: &str) -> Self {
        Self {
            title: title.to_string(),
            label: label.to_string(),
            mount_id: "output".to_string(),
            baseline: BASELINE_STYLESHEET,
            ..Default::default()
        }
    }

    /// Context for a document that executes user code inside `mount_id`.
    pub fn runtime(title: &str, label: &str, mount_id: &str, ctx: &GenerateContext<'_>) -> Self {
        Self {
            mount_id: mount_id.to_string(),
            dependencies: ctx.dependencies.to_vec(),
            runtime: true,
            ..Self::new(title, label)
        }
    }

    pub fn with_dependencies(mut self, ctx: &GenerateContext<'_>) -> Self {
        self.dependencies = ctx.dependencies.to_vec();
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

static TEMPLATES: LazyLock<Result<Environment<'static>, String>> =
    LazyLock::new(|| build_environment().map_err(|e| e.to_string()));

fn build_environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();

    // Escaping is done explicitly per value; snippets are embedded verbatim.
    env.set_auto_escape_callback(|_| AutoEscape::None);

    env.add_template("base.html", BASE_TEMPLATE)?;
    env.add_template("react.html", REACT_TEMPLATE)?;
    env.add_template("vue.html", VUE_TEMPLATE)?;
    env.add_template("typescript.html", TYPESCRIPT_TEMPLATE)?;
    env.add_template("javascript.html", JAVASCRIPT_TEMPLATE)?;
    env.add_template("fragment.html", FRAGMENT_TEMPLATE)?;
    env.add_template("stylesheet.html", STYLESHEET_TEMPLATE)?;
    env.add_template("unsupported.html", UNSUPPORTED_TEMPLATE)?;
    env.add_template("error.html", ERROR_TEMPLATE)?;

    Ok(env)
}

/// Render a named document template.
pub fn render(template: &str, context: &DocumentContext) -> Result<String, CompileError> {
    let env = TEMPLATES
        .as_ref()
        .map_err(|e| CompileError::Template(e.clone()))?;

    let tmpl = env.get_template(template)?;
    Ok(tmpl.render(context)?)
}

/// Minimal error document used when even the error template cannot render.
pub const FALLBACK_ERROR_DOCUMENT: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Preview error</title>
</head>
<body>
  <div class="snipview-error" style="background:#fee2e2;border:1px solid #f87171;color:#b91c1c;padding:0.75rem 1rem;border-radius:0.25rem;">
    <strong>Preview error:</strong> the preview document could not be generated.
  </div>
</body>
</html>
"#;

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{{ title }}</title>
  <script src="{{ baseline }}"></script>
  {% for src in dependencies %}<script crossorigin src="{{ src }}"></script>
  {% endfor %}{% if style %}<style>
{{ style }}
  </style>
  {% endif %}{% if runtime %}<script>
    function __snipviewShowError(label, error) {
      var message = error && error.message ? error.message : String(error);
      var panel = document.createElement('div');
      panel.className = 'snipview-error bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded max-w-lg';
      var heading = document.createElement('strong');
      heading.textContent = label + ' error: ';
      panel.appendChild(heading);
      panel.appendChild(document.createTextNode(message));
      var mount = document.getElementById('{{ mount_id }}') || document.body;
      mount.innerHTML = '';
      mount.appendChild(panel);
    }
    window.addEventListener('error', function (event) {
      __snipviewShowError('{{ label }}', event.error || event.message);
    });
  </script>
  {% endif %}
</head>
<body class="bg-gray-50 p-4">
{% block body %}{% endblock %}
</body>
</html>
"##;

const REACT_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block body %}
  <div id="{{ mount_id }}"></div>
  <script type="text/babel" data-presets="react">
    try {
{{ code }}

      const __snipviewCandidates = [
{% for name in component_names %}        ['{{ name }}', typeof {{ name }} !== 'undefined' ? {{ name }} : window['{{ name }}']],
{% endfor %}      ];
      const __snipviewMatch = __snipviewCandidates.find(function (entry) {
        return typeof entry[1] !== 'undefined';
      });

      if (!__snipviewMatch) {
        throw new Error('No React component found. Make sure your component name starts with an uppercase letter.');
      }

      ReactDOM.createRoot(document.getElementById('{{ mount_id }}'))
        .render(React.createElement(__snipviewMatch[1]));
    } catch (error) {
      console.error('React preview error:', error);
      __snipviewShowError('{{ label }}', error);
    }
  </script>
{% endblock %}
"##;

const VUE_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block body %}
  <div id="{{ mount_id }}"></div>
  <script>
    try {
{{ code }}
    } catch (error) {
      console.error('Vue preview error:', error);
      __snipviewShowError('{{ label }}', error);
    }
  </script>
{% endblock %}
"##;

const TYPESCRIPT_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block body %}
  <div id="{{ mount_id }}"></div>
  <script>
    try {
      const __snipviewSource = {{ code }};
      const __snipviewOutput = ts.transpile(__snipviewSource, {
        target: ts.ScriptTarget.ES2015,
        module: ts.ModuleKind.None
      });
      // indirect eval runs the output in global scope
      (0, eval)(__snipviewOutput);
    } catch (error) {
      console.error('TypeScript preview error:', error);
      __snipviewShowError('{{ label }}', error);
    }
  </script>
{% endblock %}
"##;

const JAVASCRIPT_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block body %}
  <div id="{{ mount_id }}"></div>
  <script>
    try {
{{ code }}
    } catch (error) {
      console.error('JavaScript preview error:', error);
      __snipviewShowError('{{ label }}', error);
    }
  </script>
{% endblock %}
"##;

const FRAGMENT_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block body %}
{{ code }}
{% endblock %}
"##;

const STYLESHEET_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block body %}
  <div class="preview-container">
    <h2 class="text-xl font-bold mb-4">CSS Preview</h2>
    <div class="demo-content">
      <div class="my-component">
        <h3>Demo element</h3>
        <p>Your stylesheet is applied to this page.</p>
        <button class="btn">Test button</button>
      </div>
    </div>
  </div>
{% endblock %}
"##;

const UNSUPPORTED_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block body %}
  <div id="{{ mount_id }}"></div>
  <div class="snipview-notice bg-yellow-100 border border-yellow-400 text-yellow-700 px-4 py-3 rounded">
    <strong>Info:</strong> {{ message }}
    <br>Source:
    <pre class="mt-2 text-sm bg-gray-100 p-2 rounded">{{ code }}</pre>
  </div>
{% endblock %}
"##;

const ERROR_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block body %}
  <div class="snipview-error bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded max-w-lg">
    <strong>{{ label }}:</strong> {{ message }}
  </div>
{% endblock %}
"##;
