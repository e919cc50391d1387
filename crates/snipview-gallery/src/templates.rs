//! Gallery index templates.

use minijinja::{context, Environment};
use serde::Serialize;

/// A snippet card on the index page.
#[derive(Debug, Clone, Serialize)]
pub struct SnippetCard {
    pub title: String,

    pub slug: String,

    /// Rendered markdown description
    pub description_html: Option<String>,

    pub tags: Vec<String>,

    /// Compilation type tag shown as a badge
    pub kind: String,

    /// Relative URL of the preview document
    pub preview_url: String,

    /// Source path relative to the snippets directory
    pub source_path: String,
}

/// A category heading with its cards.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryGroup {
    pub name: String,
    pub snippets: Vec<SnippetCard>,
}

/// Context for rendering the index page.
#[derive(Debug, Clone, Serialize)]
pub struct IndexContext {
    /// Site title
    pub title: String,
    /// Base URL
    pub base_url: String,
    /// Cards grouped by category
    pub categories: Vec<CategoryGroup>,
    /// Total number of snippets
    pub total: usize,
}

/// Template engine for the gallery pages.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a template engine with the built-in templates.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();

        env.add_template("base.html", BASE_TEMPLATE)?;
        env.add_template("index.html", INDEX_TEMPLATE)?;
        env.add_template("card.html", CARD_TEMPLATE)?;

        Ok(Self { env })
    }

    /// Render the gallery index.
    pub fn render_index(&self, context: &IndexContext) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("index.html")?;

        tmpl.render(context! {
            title => &context.title,
            base_url => &context.base_url,
            categories => &context.categories,
            total => context.total,
        })
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }}</title>
  <link rel="stylesheet" href="{{ base_url }}assets/gallery.css">
</head>
<body>
  <header class="gallery-header">
    <h1>{{ title }}</h1>
    {% block summary %}{% endblock %}
  </header>
  <main class="gallery">
    {% block content %}{% endblock %}
  </main>
</body>
</html>"##;

const INDEX_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block summary %}<p class="gallery-count">{{ total }} snippet{{ "" if total == 1 else "s" }}</p>{% endblock %}

{% block content %}
{% if categories %}
{% for category in categories %}
<section class="category" id="{{ category.name | lower | replace(" ", "-") }}">
  <h2>{{ category.name }}</h2>
  <div class="grid">
  {% for snippet in category.snippets %}
    {% include "card.html" %}
  {% endfor %}
  </div>
</section>
{% endfor %}
{% else %}
<p class="empty">No snippets found.</p>
{% endif %}
{% endblock %}"##;

const CARD_TEMPLATE: &str = r##"<article class="card" id="{{ snippet.slug }}">
      <div class="card-header">
        <h3>{{ snippet.title }}</h3>
        <span class="badge">{{ snippet.kind }}</span>
      </div>
      {% if snippet.description_html %}<div class="description">{{ snippet.description_html | safe }}</div>{% endif %}
      <iframe class="preview" sandbox="allow-scripts" loading="lazy" title="{{ snippet.title }}" src="{{ base_url }}{{ snippet.preview_url }}"></iframe>
      <footer class="card-footer">
        <code>{{ snippet.source_path }}</code>
        {% for tag in snippet.tags %}<span class="tag">{{ tag }}</span>{% endfor %}
        <a href="{{ base_url }}{{ snippet.preview_url }}" target="_blank" rel="noopener">Open</a>
      </footer>
    </article>"##;
