//! Static page generation.
//!
//! The page carries every formatted entry with every selectable variant
//! already resolved, so the inline script only toggles `hidden` attributes.
//! The initial selection is applied while rendering; the page is usable
//! before the script runs.

use chrono::{DateTime, Utc};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use std::fs;
use std::path::Path;
use tracing::info;
use versus_core::config::{ENTRIES_FILENAME, PAGE_FILENAME};
use versus_core::highlight::highlight;
use versus_core::variant::{self, Resolution, Side};
use versus_core::{
    formatted_code, Catalog, FormattedEntry, Result, Selection, SiteConfig, TokenClass,
    KNOWN_VARIANTS,
};

/// Everything the server hosts, built once
#[derive(Debug, Clone)]
pub struct Site {
    pub config: SiteConfig,
    pub catalog: Catalog,
    pub entries: Vec<FormattedEntry>,
    pub page: String,
    pub built_at: DateTime<Utc>,
}

impl Site {
    /// Format the catalog and render the page. Any formatting failure aborts.
    pub fn build(config: SiteConfig, catalog: Catalog) -> Result<Self> {
        let entries = formatted_code(&catalog)?;
        let selection = Selection::initial(&catalog);
        let page = render_page(&config, &catalog, &entries, &selection);
        info!("Rendered page with {} entries", entries.len());
        Ok(Self {
            config,
            catalog,
            entries,
            page,
            built_at: Utc::now(),
        })
    }
}

/// Write `index.html` and `entries.json` into `dir`
pub fn write_site(dir: &Path, site: &Site) -> Result<()> {
    fs::create_dir_all(dir)?;
    fs::write(dir.join(PAGE_FILENAME), &site.page)?;
    let json = serde_json::to_string_pretty(&site.entries)?;
    fs::write(dir.join(ENTRIES_FILENAME), json)?;
    info!("Wrote {} entries to {}", site.entries.len(), dir.display());
    Ok(())
}

/// Known variants first, then anything else the catalog uses
pub fn selectable_variants(catalog: &Catalog) -> Vec<&str> {
    let mut names: Vec<&str> = KNOWN_VARIANTS.iter().map(|v| v.name).collect();
    for name in catalog.variants() {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

pub fn render_page(
    config: &SiteConfig,
    catalog: &Catalog,
    entries: &[FormattedEntry],
    selection: &Selection,
) -> String {
    let names = selectable_variants(catalog);
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (config.title) }
                style { (PreEscaped(STYLE)) }
            }
            body
                data-section=(selection.section)
                data-subsection=(selection.subsection)
                data-left=(selection.left)
                data-right=(selection.right)
                data-show-all=(if selection.show_all { "true" } else { "false" })
            {
                h1 { (config.title) }
                (tabs(catalog, selection))
                (controls(&names, selection))
                main {
                    @for entry in entries {
                        (entry_block(entry, &names, selection))
                    }
                }
                script { (PreEscaped(SCRIPT)) }
            }
        }
    };
    markup.into_string()
}

fn tabs(catalog: &Catalog, selection: &Selection) -> Markup {
    html! {
        nav.sections {
            @for section in catalog.outline() {
                button.tab.active[section.name == selection.section]
                    type="button" data-tab-section=(section.name) { (section.name) }
            }
        }
        @for section in catalog.outline() {
            @let current = section.name == selection.section;
            nav.subsections data-section=(section.name) hidden[!current] {
                @for subsection in &section.subsections {
                    button.tab.active[current && subsection.name == selection.subsection]
                        type="button" data-tab-subsection=(subsection.name) { (subsection.name) }
                }
            }
        }
    }
}

fn controls(names: &[&str], selection: &Selection) -> Markup {
    html! {
        div.controls {
            @for side in [Side::Left, Side::Right] {
                label {
                    (side.to_string()) " "
                    select id=(side.to_string()) {
                        @for name in names {
                            option value=(name) selected[*name == selection.variant(side)] {
                                (variant::label(name))
                            }
                        }
                    }
                }
            }
            label {
                input id="show-all" type="checkbox" checked[selection.show_all];
                " show all"
            }
        }
    }
}

fn entry_block(entry: &FormattedEntry, names: &[&str], selection: &Selection) -> Markup {
    let visible = selection.is_visible(&entry.section, &entry.subsection);
    html! {
        article.entry data-section=(entry.section) data-subsection=(entry.subsection) hidden[!visible] {
            h3 { (entry.section) " / " (entry.subsection) }
            div.columns {
                @for side in [Side::Left, Side::Right] {
                    @let wanted = selection.variant(side);
                    div.column data-side=(side.to_string()) {
                        div.label { (variant::label(wanted)) }
                        @for name in names {
                            (code_block(entry, name, *name != wanted))
                        }
                    }
                }
            }
        }
    }
}

fn code_block(entry: &FormattedEntry, name: &str, hidden: bool) -> Markup {
    let (text, resolution) = variant::resolve(&entry.variants, name);
    html! {
        @if resolution == Resolution::Placeholder {
            pre.code.placeholder data-variant=(name) data-label=(variant::label(name)) hidden[hidden] {
                (text)
            }
        } @else {
            pre.code data-variant=(name) data-label=(variant::label(name)) hidden[hidden] {
                code {
                    @for (i, line) in highlight(text).iter().enumerate() {
                        @if i > 0 { "\n" }
                        @for token in line {
                            @if token.class == TokenClass::Plain {
                                (token.text)
                            } @else {
                                span class=(token.class.css_class()) { (token.text) }
                            }
                        }
                    }
                }
            }
        }
    }
}

const STYLE: &str = r#"
:root {
  --bg: #282c34; --fg: #abb2bf; --panel: #21252b; --accent: #61afef; --muted: #5c6370;
  --kw: #c678dd; --lit: #56b6c2; --fn: #61afef; --str: #98c379; --num: #d19a66;
  --com: #5c6370; --punct: #abb2bf;
}
@media (prefers-color-scheme: light) {
  :root {
    --bg: #fafafa; --fg: #383a42; --panel: #f0f0f0; --accent: #4078f2; --muted: #a0a1a7;
    --kw: #a626a4; --lit: #0184bb; --fn: #4078f2; --str: #50a14f; --num: #986801;
    --com: #a0a1a7; --punct: #383a42;
  }
}
body { margin: 0 auto; max-width: 1200px; padding: 1rem; background: var(--bg); color: var(--fg); font-family: system-ui, sans-serif; }
nav { display: flex; flex-wrap: wrap; gap: .25rem; margin: .5rem 0; }
.tab { background: var(--panel); color: var(--fg); border: 1px solid var(--muted); border-radius: 4px; padding: .3rem .7rem; cursor: pointer; }
.tab.active { border-color: var(--accent); color: var(--accent); }
.controls { display: flex; gap: 1rem; margin: 1rem 0; }
.columns { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; }
.label { font-weight: bold; margin-bottom: .25rem; }
pre.code { background: var(--panel); padding: .75rem; border-radius: 4px; overflow-x: auto; font-size: 13px; }
pre.placeholder { color: var(--muted); font-style: italic; }
.tok-kw { color: var(--kw); } .tok-lit { color: var(--lit); } .tok-fn { color: var(--fn); }
.tok-str { color: var(--str); } .tok-num { color: var(--num); } .tok-punct { color: var(--punct); }
.tok-com { color: var(--com); font-style: italic; }
[hidden] { display: none !important; }
"#;

const SCRIPT: &str = r#"
const state = document.body.dataset;
function apply() {
  const all = state.showAll === "true";
  document.querySelectorAll("[data-tab-section]").forEach((tab) => {
    tab.classList.toggle("active", tab.dataset.tabSection === state.section);
  });
  document.querySelectorAll("nav.subsections").forEach((group) => {
    const current = group.dataset.section === state.section;
    group.hidden = !current;
    group.querySelectorAll("[data-tab-subsection]").forEach((tab) => {
      tab.classList.toggle("active", current && tab.dataset.tabSubsection === state.subsection);
    });
  });
  document.querySelectorAll("article.entry").forEach((entry) => {
    entry.hidden = !(all || (entry.dataset.section === state.section && entry.dataset.subsection === state.subsection));
  });
  document.querySelectorAll(".column").forEach((column) => {
    const wanted = state[column.dataset.side];
    column.querySelectorAll("pre[data-variant]").forEach((block) => {
      block.hidden = block.dataset.variant !== wanted;
      if (!block.hidden) column.querySelector(".label").textContent = block.dataset.label;
    });
  });
}
document.querySelectorAll("[data-tab-section]").forEach((tab) => {
  tab.addEventListener("click", () => {
    state.section = tab.dataset.tabSection;
    const first = document.querySelector(
      `nav.subsections[data-section="${CSS.escape(state.section)}"] [data-tab-subsection]`
    );
    state.subsection = first ? first.dataset.tabSubsection : "";
    apply();
  });
});
document.querySelectorAll("[data-tab-subsection]").forEach((tab) => {
  tab.addEventListener("click", () => {
    state.section = tab.closest("nav.subsections").dataset.section;
    state.subsection = tab.dataset.tabSubsection;
    apply();
  });
});
["left", "right"].forEach((side) => {
  document.getElementById(side).addEventListener("change", (e) => {
    state[side] = e.target.value;
    apply();
  });
});
document.getElementById("show-all").addEventListener("change", (e) => {
  state.showAll = String(e.target.checked);
  apply();
});
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use versus_core::catalog::CatalogBuilder;

    fn catalog() -> Catalog {
        let mut builder = CatalogBuilder::new();
        builder
            .add_entry("Reading Data", "Find Records", vec![("prisma", "a()"), ("convex", "b()")])
            .unwrap();
        builder
            .add_entry("Writing data", "Create Records", vec![("prisma", "c()"), ("convex", "d()")])
            .unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn known_variants_come_first() {
        let mut builder = CatalogBuilder::new();
        builder
            .add_entry("S", "T", vec![("prisma", "a"), ("convex", "b"), ("drizzle", "c")])
            .unwrap();
        assert_eq!(
            selectable_variants(&builder.build().unwrap()),
            vec!["prisma", "convex", "convexHelpers", "convexEnts", "drizzle"]
        );
    }

    #[test]
    fn hides_entries_outside_the_selection() {
        let site = Site::build(SiteConfig::default(), catalog()).unwrap();
        assert_eq!(site.page.matches("<article").count(), 2);
        assert!(site
            .page
            .contains(r#"<article class="entry" data-section="Writing data" data-subsection="Create Records" hidden>"#));
        assert!(site
            .page
            .contains(r#"<article class="entry" data-section="Reading Data" data-subsection="Find Records">"#));
    }

    #[test]
    fn escapes_names_in_attributes() {
        let mut builder = CatalogBuilder::new();
        builder
            .add_entry("Reading Data", "Aggregates & Group By", vec![("prisma", "a"), ("convex", "b")])
            .unwrap();
        let site = Site::build(SiteConfig::default(), builder.build().unwrap()).unwrap();
        assert!(site.page.contains("data-subsection=\"Aggregates &amp; Group By\""));
    }
}
