//! # CLI Templates
//!
//! Terminal output is rendered from minijinja templates. Layout math (column
//! widths, truncation, padding) is done in Rust before the data reaches a
//! template; templates pick what to show and which style name applies.
//!
//! The environment runs with `trim_blocks` and `lstrip_blocks` on, so a line
//! holding only a block tag produces no output. A line that *ends* in a block
//! tag loses its newline too, which is why some loops are followed by an
//! empty line.

pub const VIEW_TEMPLATE: &str = r#"[{{ toggle_label | style("button") }}]  [{{ search_toggle_label | style("button") }}]
{% if search_visible %}
{{ "Search:" | style("label") }} {% if query %}{{ query }}{% else %}{{ placeholder | style("faint") }}{% endif %}

{% endif %}
{% if form_open %}

{{ form_title | style("title") }}
{% for field in fields %}
  {{ field.label | style("label") }}{{ field.value }}
{% if field.error %}
  {{ field.error_indent }}{{ field.error | style("error") }}
{% endif %}
{% endfor %}
  [{{ submit_label | style("button") }}]
{% endif %}

{% for cell in header %}{{ cell.text | style("header") }}{{ cell.pad }}{% if not loop.last %}  {% endif %}{% endfor %}

{% for row in rows %}
{% for cell in row %}{{ cell.text | style(cell.style) }}{{ cell.pad }}{% if not loop.last %}  {% endif %}{% endfor %}

{% endfor %}
{% if empty_message %}
{{ empty_message | style("muted") }}
{% endif %}
{{ summary | style("faint") }}
"#;

pub const MESSAGES_TEMPLATE: &str = r#"{% for message in messages %}
{{ message.content | style(message.style) }}
{% endfor %}
"#;

pub const HELP_TEMPLATE: &str = r#"{{ "Intents:" | style("title") }}
{% for item in items %}
  {{ item.usage | style("help-command") }}  {{ item.description | style("help-desc") }}
{% endfor %}
"#;
