//! List command implementation
//!
//! Lists every resolvable content item per category, with its description
//! and the targets whose manifest already records it.

use console::Style;

use crate::cli::ListArgs;
use crate::error::Result;
use crate::manifest::Manifest;
use crate::resolver::{self, Category, ContentItem, SourceLayout};
use crate::target::InstallTarget;

/// Run list command
pub fn run(args: ListArgs) -> Result<()> {
    let layout = SourceLayout::from_env()?;
    let global_manifest = Manifest::load(&InstallTarget::Global.root()?);
    let local_manifest = Manifest::load(&InstallTarget::Local.root()?);

    for category in Category::ALL {
        let registry = resolver::resolve(&layout, category);

        println!(
            "{} ({}):",
            Style::new().bold().apply_to(capitalize(category.dir_name())),
            registry.len()
        );
        if registry.is_empty() {
            println!("  {}", Style::new().dim().apply_to("none found"));
        }
        for item in registry.values() {
            display_item(
                item,
                global_manifest.as_ref(),
                local_manifest.as_ref(),
                args.detailed,
            );
        }
        println!();
    }

    Ok(())
}

fn display_item(
    item: &ContentItem,
    global_manifest: Option<&Manifest>,
    local_manifest: Option<&Manifest>,
    detailed: bool,
) {
    let mut line = format!("  {}", Style::new().bold().yellow().apply_to(&item.name));
    if !item.description.is_empty() {
        line.push_str(&format!(" - {}", item.description));
    }

    let mut installed_at = Vec::new();
    if records_item(global_manifest, item) {
        installed_at.push(InstallTarget::Global.label());
    }
    if records_item(local_manifest, item) {
        installed_at.push(InstallTarget::Local.label());
    }
    if !installed_at.is_empty() {
        line.push_str(&format!(
            " {}",
            Style::new()
                .green()
                .apply_to(format!("[installed: {}]", installed_at.join(", ")))
        ));
    }
    println!("{line}");

    if detailed {
        println!(
            "      {}",
            Style::new().dim().apply_to(item.source_path.display())
        );
    }
}

fn records_item(manifest: Option<&Manifest>, item: &ContentItem) -> bool {
    let Some(manifest) = manifest else {
        return false;
    };
    match item.category {
        Category::Commands => manifest.commands.contains(&item.name),
        Category::Agents => manifest.agents.contains(&item.name),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
