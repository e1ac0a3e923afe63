use versus_core::catalog::CatalogBuilder;
use versus_core::selection::visible;
use versus_core::variant::resolve_text;
use versus_core::{
    builtin_catalog, check_stability, format, formatted_code, project, Catalog, Selection, Side, Variants,
    VersusError, PLACEHOLDER,
};

fn two_entry_catalog() -> Catalog {
    let mut builder = CatalogBuilder::new();
    builder
        .add_entry(
            "Reading Data",
            "Find Records",
            vec![
                ("prisma", "const a = await prisma.user.findMany()"),
                ("convex", "const a = await ctx.db.query('users').collect()"),
            ],
        )
        .unwrap();
    builder
        .add_entry(
            "Writing data",
            "Create Records",
            vec![
                ("prisma", "await prisma.user.create({data: {name: 'Ada'}})"),
                ("convex", "await ctx.db.insert('users', {name: 'Ada'})"),
            ],
        )
        .unwrap();
    builder.build().unwrap()
}

#[test]
fn formatting_is_deterministic() {
    let catalog = builtin_catalog().unwrap();
    for entry in catalog.entries() {
        for (_, raw) in entry.variants.iter() {
            assert_eq!(format(raw).unwrap(), format(raw).unwrap());
        }
    }
}

#[test]
fn builtin_catalog_formats_without_errors() {
    let catalog = builtin_catalog().unwrap();
    let formatted = formatted_code(&catalog).unwrap();
    assert_eq!(formatted.len(), catalog.len());

    for (entry, out) in catalog.entries().iter().zip(&formatted) {
        assert_eq!(
            (&entry.section, &entry.subsection, entry.index),
            (&out.section, &out.subsection, out.index)
        );
        assert_eq!(
            entry.variants.names().collect::<Vec<_>>(),
            out.variants.names().collect::<Vec<_>>()
        );
        for (name, text) in out.variants.iter() {
            assert!(!text.trim().is_empty(), "{} / {} {}", out.section, out.subsection, name);
            assert!(
                text.lines().all(|line| !line.ends_with(' ')),
                "trailing space in {} / {} {}",
                out.section,
                out.subsection,
                name
            );
        }
    }
}

#[test]
fn builtin_catalog_is_stable_under_reformatting() {
    let catalog = builtin_catalog().unwrap();
    let checked = check_stability(&catalog).unwrap();
    // Every entry has at least two variants; only the Prisma schema is verbatim
    assert!(checked > catalog.len());
}

#[test]
fn schema_passes_through_unformatted() {
    let catalog = builtin_catalog().unwrap();
    let formatted = formatted_code(&catalog).unwrap();
    let schema = formatted.iter().find(|e| e.is_in("Schema", "Data Model")).unwrap();
    let raw = catalog
        .entries_in("Schema", "Data Model")
        .next()
        .unwrap()
        .variants
        .get("prisma")
        .unwrap();
    assert_eq!(schema.variants.get("prisma"), Some(raw));
}

#[test]
fn two_entries_end_to_end() {
    let formatted = formatted_code(&two_entry_catalog()).unwrap();
    assert_eq!(formatted.len(), 2);
    assert_eq!(formatted[0].section, "Reading Data");
    assert_eq!(formatted[1].section, "Writing data");

    assert_eq!(
        formatted[0].variants.get("convex"),
        Some("const a = await ctx.db.query(\"users\").collect();")
    );
    assert_eq!(
        formatted[1].variants.get("prisma"),
        Some("await prisma.user.create({ data: { name: \"Ada\" } });")
    );
    assert_eq!(formatted[1].variants.len(), 2);
}

#[test]
fn helpers_resolve_to_convex() {
    let variants: Variants = [("prisma", "A"), ("convex", "B")].into_iter().collect();
    assert_eq!(resolve_text(&variants, "convexHelpers"), "B");
    assert_eq!(resolve_text(&variants, "convexEnts"), PLACEHOLDER);
}

#[test]
fn show_all_reveals_other_sections() {
    let catalog = two_entry_catalog();
    let formatted = formatted_code(&catalog).unwrap();
    let selection = Selection::initial(&catalog);
    assert_eq!(
        (selection.section.as_str(), selection.subsection.as_str()),
        ("Reading Data", "Find Records")
    );

    let pairs = project(&formatted, &selection);
    assert_eq!(pairs.len(), 2);
    assert!(!pairs[1].visible);
    assert_eq!(visible(&formatted, &selection).count(), 1);

    let pairs = project(&formatted, &selection.toggle_show_all());
    assert!(pairs[1].visible);
}

#[test]
fn section_switch_lands_on_first_subsection() {
    let catalog = builtin_catalog().unwrap();
    let selection = Selection::initial(&catalog)
        .select_subsection(&catalog, "Reading Data", "Aggregates & Group By")
        .unwrap()
        .select_section(&catalog, "Advanced Patterns")
        .unwrap();
    assert_eq!(
        (selection.section.as_str(), selection.subsection.as_str()),
        ("Advanced Patterns", "Transactions")
    );
}

#[test]
fn ents_column_falls_back_to_placeholder() {
    let catalog = builtin_catalog().unwrap();
    let formatted = formatted_code(&catalog).unwrap();
    let selection = Selection::initial(&catalog)
        .select_section(&catalog, "Advanced Patterns")
        .unwrap()
        .select_variant(&catalog, Side::Right, "convexEnts")
        .unwrap();
    let shown: Vec<_> = project(&formatted, &selection)
        .into_iter()
        .filter(|pair| pair.visible)
        .collect();
    assert_eq!(shown.len(), 2);
    assert!(shown.iter().all(|pair| pair.right == PLACEHOLDER));
}

#[test]
fn invalid_source_fails_the_build() {
    let mut builder = CatalogBuilder::new();
    builder
        .add_entry("S", "T", vec![("prisma", "ok()"), ("convex", "const x = 'open")])
        .unwrap();
    let err = formatted_code(&builder.build().unwrap()).unwrap_err();
    assert!(matches!(err, VersusError::Format { ref variant, .. } if variant == "convex"));
}
