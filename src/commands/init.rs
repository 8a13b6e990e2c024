//! Init command implementation
//!
//! The installation flow, strictly sequential:
//! 1. Resolve content for every category (before any prompting, so the
//!    choice lists are fixed snapshots for the run)
//! 2. Run the conditional prompt engine over the init schema
//! 3. Plan install/skip/overwrite per selected item against a fresh index
//!    of the chosen target
//! 4. Write the plan out, or only render it in dry-run mode
//! 5. Merge the outcome into the target's manifest
//! 6. Summarize

use std::collections::BTreeSet;

use chrono::Utc;

use crate::cli::InitArgs;
use crate::defaults::InstallDefaults;
use crate::error::{PromptkitError, Result};
use crate::installer::{self, ExistingIndex};
use crate::manifest::Manifest;
use crate::options::{OptionValue, OptionsState};
use crate::progress::{InteractiveProgressReporter, ProgressReporter, SilentProgressReporter};
use crate::resolver::{self, Category, ContentItem, ContentRegistry, SourceLayout};
use crate::schema::{CascadeTable, PromptEngine, PromptKind, PromptSchema, SchemaProperty};
use crate::target::InstallTarget;
use crate::ui;

/// Run the init command with the stock recommended defaults
pub fn run(args: InitArgs) -> Result<()> {
    run_with_defaults(args, &InstallDefaults::recommended())
}

/// Run the init command with caller-supplied default selections
pub fn run_with_defaults(args: InitArgs, defaults: &InstallDefaults) -> Result<()> {
    let layout = SourceLayout::from_env()?;
    let commands = resolver::resolve(&layout, Category::Commands);
    let agents = resolver::resolve(&layout, Category::Agents);

    // Conflict annotations on the choice labels cover both targets; an item
    // present at the other target never blocks installation at the chosen one.
    let global_index = ExistingIndex::scan(&InstallTarget::Global.root()?);
    let local_index = ExistingIndex::scan(&InstallTarget::Local.root()?);

    let mut options = seed_options(&args);
    let schema = build_schema(&commands, &agents, &global_index, &local_index, defaults)?;
    let cascade = default_cascade();
    let engine = PromptEngine::new(&schema, &cascade, args.non_interactive);
    match engine.run(&mut options) {
        Ok(()) => {}
        Err(PromptkitError::Cancelled) => {
            println!("Installation cancelled.");
            return Ok(());
        }
        Err(e) => return Err(e),
    }

    let target = selected_target(&options);
    let root = target.root()?;

    let selected = collect_selection(&options, &commands, &agents, defaults);
    if selected.is_empty() {
        println!("Nothing to install.");
        return Ok(());
    }

    // The index is re-scanned at plan time, scoped to the chosen target only
    let existing = ExistingIndex::scan(&root);
    let decisions = installer::plan(&selected, &existing, args.force);

    if args.dry_run {
        ui::render_plan(&decisions, target);
        return Ok(());
    }

    let mut reporter = make_reporter(args.non_interactive);
    let report = installer::execute(decisions, &root, reporter.as_mut());

    let manifest = merge_manifest(&root, &report);
    manifest.save(&root)?;

    ui::print_summary(&report, target);
    Ok(())
}

/// Seed the option state from explicitly provided command line values
fn seed_options(args: &InitArgs) -> OptionsState {
    let mut options = OptionsState::new();

    if let Some(mode) = args.install_mode {
        options.set_explicit("install_mode", OptionValue::Str(mode.as_str().to_string()));
    }
    if let Some(target) = args.installation_type {
        options.set_explicit(
            "installation_type",
            OptionValue::Str(target.as_str().to_string()),
        );
    }
    if let Some(enabled) = args.install_commands {
        options.set_explicit("install_commands", OptionValue::Bool(enabled));
    }
    if let Some(enabled) = args.install_agents {
        options.set_explicit("install_agents", OptionValue::Bool(enabled));
    }
    if let Some(mode) = args.command_selection_mode {
        options.set_explicit(
            "command_selection_mode",
            OptionValue::Str(mode.as_str().to_string()),
        );
    }
    if let Some(mode) = args.agent_selection_mode {
        options.set_explicit(
            "agent_selection_mode",
            OptionValue::Str(mode.as_str().to_string()),
        );
    }
    if !args.commands.is_empty() {
        options.set_explicit("commands", OptionValue::List(args.commands.clone()));
        if args.command_selection_mode.is_none() {
            options.set_explicit(
                "command_selection_mode",
                OptionValue::Str("specific".to_string()),
            );
        }
    }
    if !args.agents.is_empty() {
        options.set_explicit("agents", OptionValue::List(args.agents.clone()));
        if args.agent_selection_mode.is_none() {
            options.set_explicit(
                "agent_selection_mode",
                OptionValue::Str("specific".to_string()),
            );
        }
    }
    if args.yes {
        options.set_explicit("confirm_global", OptionValue::Bool(true));
    }

    options
}

/// The init prompt schema, in resolution order
fn build_schema(
    commands: &ContentRegistry,
    agents: &ContentRegistry,
    global_index: &ExistingIndex,
    local_index: &ExistingIndex,
    defaults: &InstallDefaults,
) -> Result<PromptSchema> {
    Ok(PromptSchema::new(vec![
        SchemaProperty::new("install_mode", PromptKind::Select, "How do you want to install?")
            .with_choices(["default", "custom"])
            .with_default(OptionValue::Str("default".to_string()))
            .with_help("default installs the recommended set into the global target"),
        SchemaProperty::new(
            "installation_type",
            PromptKind::Select,
            "Install globally or into this project?",
        )
        .with_choices(["global", "local"])
        .with_default(OptionValue::Str("global".to_string()))
        .visible_when("install_mode == 'custom'")?,
        SchemaProperty::new(
            "confirm_global",
            PromptKind::Confirm,
            "Install into your home directory?",
        )
        .with_default(OptionValue::Bool(true))
        .with_help("Declining aborts the run without writing anything")
        .visible_when("install_mode == 'custom' && installation_type == 'global'")?
        .hard_gate(),
        SchemaProperty::new("install_commands", PromptKind::Confirm, "Install commands?")
            .with_default(OptionValue::Bool(true))
            .visible_when("install_mode == 'custom'")?,
        SchemaProperty::new(
            "command_selection_mode",
            PromptKind::Select,
            "Install all commands or pick specific ones?",
        )
        .with_choices(["all", "specific"])
        .with_default(OptionValue::Str("all".to_string()))
        .visible_when("install_mode == 'custom' && install_commands == true")?,
        SchemaProperty::new("commands", PromptKind::MultiSelect, "Select commands to install")
            .with_candidates(decorated_labels(commands, global_index, local_index))
            .with_default(OptionValue::List(defaults.commands.clone()))
            .with_help("SPACE to select/deselect, ENTER to confirm")
            .visible_when("command_selection_mode == 'specific'")?,
        SchemaProperty::new("install_agents", PromptKind::Confirm, "Install agents?")
            .with_default(OptionValue::Bool(true))
            .visible_when("install_mode == 'custom'")?,
        SchemaProperty::new(
            "agent_selection_mode",
            PromptKind::Select,
            "Install all agents or pick specific ones?",
        )
        .with_choices(["all", "specific"])
        .with_default(OptionValue::Str("all".to_string()))
        .visible_when("install_mode == 'custom' && install_agents == true")?,
        SchemaProperty::new("agents", PromptKind::MultiSelect, "Select agents to install")
            .with_candidates(decorated_labels(agents, global_index, local_index))
            .with_default(OptionValue::List(defaults.agents.clone()))
            .with_help("SPACE to select/deselect, ENTER to confirm")
            .visible_when("agent_selection_mode == 'specific'")?,
    ]))
}

/// Fixed expansion applied when the default (bulk) mode is selected
fn default_cascade() -> CascadeTable {
    CascadeTable::new(
        "install_mode",
        "default",
        vec![
            ("installation_type", OptionValue::Str("global".to_string())),
            ("install_commands", OptionValue::Bool(true)),
            ("command_selection_mode", OptionValue::Str("all".to_string())),
            ("install_agents", OptionValue::Bool(true)),
            ("agent_selection_mode", OptionValue::Str("all".to_string())),
        ],
    )
}

/// Build decorated choice labels: `name - description (annotations)`.
///
/// Decorations are display-only; the engine recovers the canonical name
/// before returning a selection.
fn decorated_labels(
    registry: &ContentRegistry,
    global_index: &ExistingIndex,
    local_index: &ExistingIndex,
) -> Vec<String> {
    registry
        .values()
        .map(|item| {
            let mut label = item.name.clone();
            if !item.description.is_empty() {
                label.push_str(" - ");
                label.push_str(&item.description);
            }
            let mut notes = Vec::new();
            if global_index.contains_item(item.category, &item.name) {
                notes.push("installed globally");
            }
            if local_index.contains_item(item.category, &item.name) {
                notes.push("installed locally");
            }
            if !notes.is_empty() {
                label.push_str(&format!(" ({})", notes.join(", ")));
            }
            label
        })
        .collect()
}

fn selected_target(options: &OptionsState) -> InstallTarget {
    options
        .get_str("installation_type")
        .and_then(InstallTarget::from_option)
        .unwrap_or(InstallTarget::Global)
}

/// Expand the final options into concrete content items.
///
/// Unknown names are item-scoped: each produces a warning and is skipped,
/// the rest of the selection proceeds.
fn collect_selection(
    options: &OptionsState,
    commands: &ContentRegistry,
    agents: &ContentRegistry,
    defaults: &InstallDefaults,
) -> Vec<ContentItem> {
    let mut selected = category_selection(
        options,
        commands,
        "install_commands",
        "command_selection_mode",
        "commands",
        &defaults.commands,
    );
    selected.extend(category_selection(
        options,
        agents,
        "install_agents",
        "agent_selection_mode",
        "agents",
        &defaults.agents,
    ));
    selected
}

fn category_selection(
    options: &OptionsState,
    registry: &ContentRegistry,
    enable_key: &str,
    mode_key: &str,
    names_key: &str,
    default_names: &[String],
) -> Vec<ContentItem> {
    if options.get_bool(enable_key) == Some(false) {
        return Vec::new();
    }

    if options.get_str(mode_key) == Some("specific") {
        let names = options
            .get_list(names_key)
            .map(<[String]>::to_vec)
            .unwrap_or_else(|| default_names.to_vec());
        names
            .iter()
            .filter_map(|name| match registry.get(name) {
                Some(item) => Some(item.clone()),
                None => {
                    let err = PromptkitError::ContentNotFound {
                        name: name.clone(),
                        category: category_label(registry, names_key),
                    };
                    ui::warn(&format!("{err}; skipping"));
                    None
                }
            })
            .collect()
    } else {
        registry.values().cloned().collect()
    }
}

fn category_label(registry: &ContentRegistry, fallback: &str) -> String {
    registry
        .values()
        .next()
        .map(|item| item.category.to_string())
        .unwrap_or_else(|| fallback.to_string())
}

fn make_reporter(non_interactive: bool) -> Box<dyn ProgressReporter> {
    if non_interactive {
        Box::new(SilentProgressReporter)
    } else {
        Box::new(InteractiveProgressReporter::new())
    }
}

/// Fold the written items into the target's manifest
fn merge_manifest(root: &std::path::Path, report: &installer::ExecutionReport) -> Manifest {
    let mut installed_commands = BTreeSet::new();
    let mut installed_agents = BTreeSet::new();
    let mut installed_files = BTreeSet::new();

    for decision in report.written() {
        match decision.item.category {
            Category::Commands => installed_commands.insert(decision.item.name.clone()),
            Category::Agents => installed_agents.insert(decision.item.name.clone()),
        };
        installed_files.insert(decision.dest_display());
    }

    Manifest::merge(
        Manifest::load(root),
        &installed_commands,
        &installed_agents,
        &installed_files,
        Utc::now(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    fn parse_init(args: &[&str]) -> InitArgs {
        let mut argv = vec!["promptkit", "init"];
        argv.extend_from_slice(args);
        let crate::cli::Cli { command } = crate::cli::Cli::try_parse_from(argv).unwrap();
        match command {
            crate::cli::Commands::Init(args) => args,
            _ => panic!("Expected Init command"),
        }
    }

    fn registry_with(names: &[(&str, &str)], category: Category) -> ContentRegistry {
        names
            .iter()
            .map(|(name, description)| {
                (
                    name.to_string(),
                    ContentItem {
                        name: name.to_string(),
                        description: description.to_string(),
                        source_path: PathBuf::from(format!("/src/{name}.md")),
                        category,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_seed_options_marks_explicit() {
        let args = parse_init(&["--install-mode", "custom", "--installation-type", "local"]);
        let options = seed_options(&args);
        assert!(options.is_explicit("install_mode"));
        assert_eq!(options.get_str("install_mode"), Some("custom"));
        assert_eq!(options.get_str("installation_type"), Some("local"));
    }

    #[test]
    fn test_seed_options_names_imply_specific_mode() {
        let args = parse_init(&["--commands", "explore", "plan"]);
        let options = seed_options(&args);
        assert_eq!(options.get_str("command_selection_mode"), Some("specific"));
        assert_eq!(
            options.get_list("commands"),
            Some(&["explore".to_string(), "plan".to_string()][..])
        );
    }

    #[test]
    fn test_seed_options_explicit_selection_mode_not_overridden() {
        let args = parse_init(&["--commands", "explore", "--command-selection-mode", "all"]);
        let options = seed_options(&args);
        assert_eq!(options.get_str("command_selection_mode"), Some("all"));
    }

    #[test]
    fn test_seed_options_yes_confirms_gate() {
        let args = parse_init(&["-y"]);
        let options = seed_options(&args);
        assert_eq!(options.get_bool("confirm_global"), Some(true));
        assert!(options.is_explicit("confirm_global"));
    }

    #[test]
    fn test_schema_scenario_default_mode_never_prompts_installation_type() {
        // installMode provided explicitly as 'default': the cascade assigns
        // installation_type=global and the engine must not prompt for it.
        let commands = registry_with(&[("explore", "Explore the codebase")], Category::Commands);
        let agents = ContentRegistry::new();
        let defaults = InstallDefaults::recommended();
        let schema = build_schema(
            &commands,
            &agents,
            &ExistingIndex::default(),
            &ExistingIndex::default(),
            &defaults,
        )
        .unwrap();
        let cascade = default_cascade();
        // Interactive mode: any prompt would fail without a terminal
        let engine = PromptEngine::new(&schema, &cascade, false);
        let mut options = OptionsState::new();
        options.set_explicit("install_mode", OptionValue::Str("default".to_string()));

        engine.run(&mut options).unwrap();
        assert_eq!(options.get_str("installation_type"), Some("global"));
        assert_eq!(options.get_bool("install_commands"), Some(true));
        assert_eq!(options.get_str("command_selection_mode"), Some("all"));
    }

    #[test]
    fn test_decorated_labels() {
        let registry = registry_with(
            &[("explore", "Explore the codebase"), ("bare", "")],
            Category::Commands,
        );
        let labels = decorated_labels(&registry, &ExistingIndex::default(), &ExistingIndex::default());
        assert_eq!(labels, vec!["bare", "explore - Explore the codebase"]);
    }

    #[test]
    fn test_selected_target_defaults_to_global() {
        assert_eq!(selected_target(&OptionsState::new()), InstallTarget::Global);

        let mut options = OptionsState::new();
        options.set("installation_type", OptionValue::Str("local".to_string()));
        assert_eq!(selected_target(&options), InstallTarget::Local);
    }

    #[test]
    fn test_collect_selection_all_mode_takes_whole_registry() {
        let commands = registry_with(&[("explore", ""), ("plan", "")], Category::Commands);
        let agents = registry_with(&[("reviewer", "")], Category::Agents);
        let defaults = InstallDefaults::recommended();

        let mut options = OptionsState::new();
        options.set("install_commands", OptionValue::Bool(true));
        options.set("command_selection_mode", OptionValue::Str("all".to_string()));
        options.set("install_agents", OptionValue::Bool(true));
        options.set("agent_selection_mode", OptionValue::Str("all".to_string()));

        let selected = collect_selection(&options, &commands, &agents, &defaults);
        assert_eq!(selected.len(), 3);
    }

    #[test]
    fn test_collect_selection_unknown_name_is_skipped() {
        let commands = registry_with(&[("explore", "")], Category::Commands);
        let agents = ContentRegistry::new();
        let defaults = InstallDefaults::recommended();

        let mut options = OptionsState::new();
        options.set("install_commands", OptionValue::Bool(true));
        options.set(
            "command_selection_mode",
            OptionValue::Str("specific".to_string()),
        );
        options.set(
            "commands",
            OptionValue::List(vec!["explore".to_string(), "ghost".to_string()]),
        );

        let selected = collect_selection(&options, &commands, &agents, &defaults);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "explore");
    }

    #[test]
    fn test_collect_selection_disabled_category_is_empty() {
        let commands = registry_with(&[("explore", "")], Category::Commands);
        let agents = registry_with(&[("reviewer", "")], Category::Agents);
        let defaults = InstallDefaults::recommended();

        let mut options = OptionsState::new();
        options.set("install_commands", OptionValue::Bool(false));
        options.set("install_agents", OptionValue::Bool(true));
        options.set("agent_selection_mode", OptionValue::Str("all".to_string()));

        let selected = collect_selection(&options, &commands, &agents, &defaults);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "reviewer");
    }
}
