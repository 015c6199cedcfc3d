use crate::domain::model::{MenuEntry, TwoDayMenu};
use crate::utils::error::Result;
use minijinja::Environment;
use serde::Serialize;

pub const DEFAULT_TEMPLATE: &str = "templates/template.html";
pub const DEFAULT_OUTPUT: &str = "rendered.html";

/// Values exposed to the page template, index 0 is today and 1 tomorrow.
#[derive(Debug, Serialize)]
pub struct RenderContext<'a> {
    pub menu: [&'a [MenuEntry]; 2],
    pub day: [&'a str; 2],
    pub updated: [String; 2],
}

impl<'a> From<&'a TwoDayMenu> for RenderContext<'a> {
    fn from(menus: &'a TwoDayMenu) -> Self {
        Self {
            menu: [menus.today.entries.as_slice(), menus.tomorrow.entries.as_slice()],
            day: [menus.today.day_name.as_str(), menus.tomorrow.day_name.as_str()],
            updated: [menus.today.updated_label(), menus.tomorrow.updated_label()],
        }
    }
}

/// Renders `template` (Jinja syntax, HTML auto-escaping on).
pub fn render_html(template: &str, menus: &TwoDayMenu) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("template.html", template)?;
    let tmpl = env.get_template("template.html")?;
    let rendered = tmpl.render(RenderContext::from(menus))?;
    Ok(rendered)
}

/// One block per restaurant: upper-cased name, then `- meal` lines with the
/// ingredient list cut off.
pub fn render_plaintext(entries: &[MenuEntry]) -> String {
    let mut out = String::new();
    for entry in entries.iter().filter(|e| !e.meals.is_empty()) {
        out.push_str(&entry.restaurant_name.to_uppercase());
        out.push('\n');
        for meal in &entry.meals {
            let text = match meal.text.find('(') {
                Some(index) => meal.text[..index].trim_end(),
                None => meal.text.as_str(),
            };
            out.push_str("- ");
            out.push_str(text);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}
