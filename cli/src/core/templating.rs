//! # hgy HTML Templates
//!
//! File: cli/src/core/templating.rs
//!
//! ## Overview
//!
//! Renders the pages of the static HTML export (`hgy render`) with Tera:
//!
//! - `store.html`: a gallery of all recipes, first image plus name, each
//!   linking to its detail page.
//! - `detail/<name>.html`: durations, ingredients, spices, complementaries,
//!   the steps, and all images of one recipe.
//!
//! Templates are compiled into the binary. Image links are written relative to
//! the page (`root`), so the exported directory can be moved or opened
//! straight from disk. Paths in links go through `urlencode`, which keeps `/`;
//! plain HTML escaping would turn it into `&#x2F;`.
//!
use crate::core::error::{HgyError, Result};
use crate::core::recipe::Recipe;
use anyhow::anyhow;
use serde::Serialize;
use tera::{Context, Tera};
use tracing::debug;

const BASE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<title>{{ title }}</title>
<meta http-equiv="Content-Type" content="text/html; charset=utf-8"/>
<style>
div.img { margin: 5px; border: 1px solid #ccc; float: left; width: 180px; }
div.img:hover { border: 1px solid #777; }
div.img img { width: 100%; height: auto; }
div.desc { padding: 15px; text-align: center; }
a { outline: 0; }
a.seamless:link, a.seamless:visited, a.seamless:active { color: black; text-decoration: none; }
</style>
</head>
<body>
{% block body %}{% endblock body %}
</body>
</html>
"#;

const INDEX_TEMPLATE: &str = r#"{% extends "base.html" %}
{% block body %}
{% for recipe in recipes %}
  <div class="img">
    {% if recipe.data.images | length > 0 %}
    <a target="_blank" href="detail/{{ recipe.name | urlencode | safe }}.html">
      <img src="{{ root | urlencode | safe }}/{{ recipe.data.images | first | urlencode | safe }}" alt="{{ recipe.data.name }}" width="300" height="200">
    </a>
    {% endif %}
    <a class="seamless" href="detail/{{ recipe.name | urlencode | safe }}.html">
      <div class="desc">{{ recipe.data.name }}</div>
    </a>
  </div>
{% endfor %}
{% endblock body %}
"#;

const DETAIL_TEMPLATE: &str = r#"{% extends "base.html" %}
{% block body %}
<h1 class="title">{{ recipe.name }}</h1>
<div class="duration">
  <div class="preparation">preparation: {{ recipe.duration.preparation }}</div>
  <div class="cooking">cooking: {{ recipe.duration.cooking }}</div>
  <div class="total">total: {{ recipe.duration.total }}</div>
</div>
{% for section in sections %}
<div class="{{ section.class }}">
  <h2>{{ section.title }}</h2>
  <ul>
  {% for item in section.items %}<li>{{ item }}</li>
  {% endfor %}
  </ul>
</div>
{% endfor %}
<div class="images">
  <h2>Images</h2>
  {% for image in recipe.images %}
  <div class="img">
    <a target="_blank" href="{{ root | urlencode | safe }}/{{ image | urlencode | safe }}">
      <img src="{{ root | urlencode | safe }}/{{ image | urlencode | safe }}" alt="{{ recipe.name }}" width="300" height="200">
    </a>
  </div>
  {% endfor %}
</div>
{% endblock body %}
"#;

#[derive(Serialize)]
struct IndexEntry<'r> {
    name: &'r str,
    data: &'r Recipe,
}

#[derive(Serialize)]
struct Section<'r> {
    class: &'static str,
    title: &'static str,
    items: &'r [String],
}

/// The compiled page templates.
pub struct HtmlRenderer {
    tera: Tera,
}

impl HtmlRenderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", BASE_TEMPLATE),
            ("store.html", INDEX_TEMPLATE),
            ("detail.html", DETAIL_TEMPLATE),
        ])
        .map_err(|e| anyhow!(HgyError::Template { source: e }))?;
        Ok(Self { tera })
    }

    /// Renders the overview page. `recipes` pairs each archive name with its record.
    pub fn render_index(&self, recipes: &[(String, Recipe)]) -> Result<String> {
        let entries: Vec<IndexEntry<'_>> = recipes
            .iter()
            .map(|(name, data)| IndexEntry { name, data })
            .collect();

        let mut context = Context::new();
        context.insert("title", "Overview");
        context.insert("root", ".");
        context.insert("recipes", &entries);
        self.render("store.html", &context)
    }

    /// Renders the detail page of the recipe stored as `name`.
    pub fn render_detail(&self, name: &str, recipe: &Recipe) -> Result<String> {
        let sections = [
            Section {
                class: "ingredients",
                title: "Ingredients",
                items: &recipe.ingredients,
            },
            Section {
                class: "spices",
                title: "Spices",
                items: &recipe.spices,
            },
            Section {
                class: "complementaries",
                title: "Complementaries",
                items: &recipe.complementaries,
            },
            Section {
                class: "recipe",
                title: "Recipe",
                items: &recipe.recipe,
            },
        ];

        let mut context = Context::new();
        context.insert("title", &recipe.name);
        context.insert("root", &detail_root(name));
        context.insert("recipe", recipe);
        context.insert("sections", &sections);
        self.render("detail.html", &context)
    }

    fn render(&self, template: &str, context: &Context) -> Result<String> {
        debug!("Rendering template {}", template);
        self.tera.render(template, context).map_err(|e| {
            anyhow!(HgyError::Template { source: e })
                .context(format!("Tera rendering failed for template '{}'", template))
        })
    }
}

/// Path from `detail/<name>.html` back to the export root.
///
/// Names may contain `/`, which nests the page deeper.
pub fn detail_root(name: &str) -> String {
    let depth = 1 + name.matches('/').count();
    vec![".."; depth].join("/")
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn pizza() -> Recipe {
        Recipe {
            name: "Pizza <Margherita>".into(),
            persons: 2,
            images: vec![".images/pizza/top.jpg".into()],
            ingredients: vec!["500g flour".into(), "1 ball mozzarella".into()],
            recipe: vec!["Knead.".into(), "Bake.".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_detail_root() {
        assert_eq!(detail_root("pizza"), "..");
        assert_eq!(detail_root("italian/pizza"), "../..");
    }

    #[test]
    fn test_render_index() -> Result<()> {
        let renderer = HtmlRenderer::new()?;
        let html = renderer.render_index(&[
            ("pizza".to_string(), pizza()),
            ("bread".to_string(), Recipe::default()),
        ])?;
        assert!(html.contains("<title>Overview</title>"));
        assert!(html.contains(r#"href="detail/pizza.html""#));
        assert!(html.contains(r#"src="./.images/pizza/top.jpg""#));
        assert!(html.contains(r#"href="detail/bread.html""#));
        // Escaped by Tera's HTML autoescaping.
        assert!(html.contains("Pizza &lt;Margherita&gt;"));
        Ok(())
    }

    #[test]
    fn test_render_detail() -> Result<()> {
        let renderer = HtmlRenderer::new()?;
        let html = renderer.render_detail("italian/pizza", &pizza())?;
        assert!(html.contains("<li>500g flour</li>"));
        assert!(html.contains("<li>Bake.</li>"));
        assert!(html.contains("<h2>Complementaries</h2>"));
        assert!(html.contains(r#"src="../../.images/pizza/top.jpg""#));
        Ok(())
    }
}
