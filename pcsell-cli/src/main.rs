use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use pcsell_core::differ::{create_destroy_plan, create_import_plan, create_plan};
use pcsell_core::effect::Effect;
use pcsell_core::interpreter::{ApplyResult, EffectOutcome, Interpreter, InterpreterConfig};
use pcsell_core::parser::{self, ParsedFile};
use pcsell_core::plan::Plan;
use pcsell_core::provider::Provider;
use pcsell_core::resource::{Resource, ResourceId, State, Value};
use pcsell_core::schema::ResourceSchema;
use pcsell_provider::resources;
use pcsell_provider::{PcsellProvider, ProviderConfig};
use pcsell_state::{BackendError, LocalBackend, LockInfo, ResourceState, StateBackend, StateFile};

const DEFAULT_CONFIG: &str = "main.hcl";

#[derive(Parser)]
#[command(name = "pcsell")]
#[command(about = "Declarative onboarding for Partner Center Sell", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration file
    Validate {
        /// Path to configuration file
        #[arg(default_value = DEFAULT_CONFIG)]
        file: PathBuf,
    },
    /// Show execution plan without applying changes
    Plan {
        /// Path to configuration file
        #[arg(default_value = DEFAULT_CONFIG)]
        file: PathBuf,
    },
    /// Apply changes to reach the desired state
    Apply {
        /// Path to configuration file
        #[arg(default_value = DEFAULT_CONFIG)]
        file: PathBuf,

        /// Skip confirmation prompt (auto-approve)
        #[arg(long)]
        auto_approve: bool,
    },
    /// Destroy all resources recorded in the state
    Destroy {
        /// Path to configuration file
        #[arg(default_value = DEFAULT_CONFIG)]
        file: PathBuf,

        /// Skip confirmation prompt (auto-approve)
        #[arg(long)]
        auto_approve: bool,
    },
    /// Bring an existing remote object under management
    Import {
        /// Resource address, e.g. ibm_onboarding_catalog_plan.free
        address: String,
        /// Composite remote ID
        id: String,
        /// Path to configuration file
        #[arg(default_value = DEFAULT_CONFIG)]
        file: PathBuf,
    },
    /// Remove a stale state lock
    ForceUnlock {
        /// Lock ID reported by the failed command
        lock_id: String,
        /// Path to configuration file
        #[arg(default_value = DEFAULT_CONFIG)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { file } => run_validate(&file),
        Commands::Plan { file } => run_plan(&file).await,
        Commands::Apply { file, auto_approve } => run_apply(&file, auto_approve).await,
        Commands::Destroy { file, auto_approve } => run_destroy(&file, auto_approve).await,
        Commands::Import { address, id, file } => run_import(&address, &id, &file).await,
        Commands::ForceUnlock { lock_id, file } => run_force_unlock(&lock_id, &file).await,
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

// =============================================================================
// Configuration
// =============================================================================

fn load_config(file: &Path) -> Result<ParsedFile, String> {
    let content = fs::read_to_string(file)
        .map_err(|e| format!("Failed to read {}: {}", file.display(), e))?;
    parser::parse(&content).map_err(|e| format!("Parse error: {}", e))
}

fn get_schemas() -> HashMap<String, ResourceSchema> {
    resources::resource_types()
        .into_iter()
        .map(|t| (t.name().to_string(), t.schema()))
        .collect()
}

fn validate_resources(
    resources: &[Resource],
    schemas: &HashMap<String, ResourceSchema>,
) -> Result<(), String> {
    let mut all_errors = Vec::new();

    for resource in resources {
        match schemas.get(&resource.id.resource_type) {
            Some(schema) => {
                if let Err(errors) = schema.validate(&resource.attributes) {
                    for error in errors {
                        all_errors.push(format!("{}: {}", resource.id, error));
                    }
                }
            }
            None => all_errors.push(format!(
                "{}: unknown resource type '{}'",
                resource.id, resource.id.resource_type
            )),
        }
    }

    if all_errors.is_empty() {
        Ok(())
    } else {
        Err(all_errors.join("\n"))
    }
}

fn build_provider(parsed: &ParsedFile) -> Result<PcsellProvider, String> {
    let mut config = ProviderConfig::from_env();
    if let Some(block) = &parsed.provider {
        if block.name != "pcsell" {
            return Err(format!("Unknown provider: {}", block.name));
        }
        config = config
            .with_overrides(&block.attributes)
            .map_err(|e| e.to_string())?;
    }
    PcsellProvider::from_config(&config).map_err(|e| e.to_string())
}

// =============================================================================
// State
// =============================================================================

async fn load_state(backend: &LocalBackend) -> Result<StateFile, String> {
    backend
        .read_state()
        .await
        .map(Option::unwrap_or_default)
        .map_err(|e| format!("Failed to load state: {}", e))
}

async fn save_state(backend: &LocalBackend, state: &mut StateFile) -> Result<(), String> {
    state.increment_serial();
    backend
        .write_state(state)
        .await
        .map_err(|e| format!("Failed to save state: {}", e))
}

async fn acquire_lock(backend: &LocalBackend, operation: &str) -> Result<LockInfo, String> {
    backend.acquire_lock(operation).await.map_err(|e| {
        if let BackendError::Locked { lock_id, .. } = &e {
            return format!(
                "{}\nIf no other pcsell process is running, run `pcsell force-unlock {}`",
                e, lock_id
            );
        }
        format!("Failed to acquire state lock: {}", e)
    })
}

async fn release_lock(backend: &LocalBackend, lock: &LockInfo) {
    if let Err(e) = backend.release_lock(lock).await {
        eprintln!(
            "{} Failed to release state lock {}: {}",
            "Warning:".yellow().bold(),
            lock.id,
            e
        );
    }
}

/// Read every recorded object from the remote service
async fn refresh<P: Provider>(
    provider: &P,
    state: &StateFile,
) -> Result<HashMap<ResourceId, State>, String> {
    let mut current = HashMap::new();
    for recorded in state.resources.iter().map(ResourceState::to_state) {
        let Some(identifier) = recorded.identifier.as_deref() else {
            continue;
        };
        let refreshed = provider
            .read(&recorded.id, identifier, &recorded.attributes)
            .await
            .map_err(|e| format!("Failed to read state of {}: {}", recorded.id, e))?;
        if !refreshed.exists {
            log::info!("{} ({}) no longer exists", recorded.id, identifier);
        }
        current.insert(recorded.id.clone(), refreshed);
    }
    Ok(current)
}

/// Drop records of objects that were removed outside pcsell
fn forget_vanished(state: &mut StateFile, current: &HashMap<ResourceId, State>) -> bool {
    let vanished: Vec<ResourceId> = current
        .values()
        .filter(|s| !s.exists)
        .map(|s| s.id.clone())
        .collect();
    for id in &vanished {
        state.forget(id);
    }
    !vanished.is_empty()
}

fn plan_changes(
    parsed: &ParsedFile,
    current: &HashMap<ResourceId, State>,
    schemas: &HashMap<String, ResourceSchema>,
) -> Plan {
    let mut orphans: Vec<State> = current
        .values()
        .filter(|s| s.exists && parsed.find(&s.id).is_none())
        .cloned()
        .collect();
    orphans.sort_by_key(|s| s.id.to_string());
    create_plan(&parsed.resources, current, &orphans, schemas)
}

/// Fold successful outcomes into the state and report each Effect
fn record_outcomes(state: &mut StateFile, plan: &Plan, result: &ApplyResult, provider: &str) {
    for (effect, outcome) in plan.effects().iter().zip(&result.outcomes) {
        match outcome {
            Ok(outcome) => {
                match outcome {
                    EffectOutcome::Deleted { id } => {
                        state.forget(id);
                    }
                    other => {
                        if let Some(new_state) = other.state() {
                            state.record(new_state, provider);
                        }
                    }
                }
                println!("  {} {}", "✓".green(), format_effect(effect));
            }
            Err(e) => println!("  {} {} - {}", "✗".red(), format_effect(effect), e),
        }
    }
}

// =============================================================================
// Commands
// =============================================================================

fn run_validate(file: &Path) -> Result<(), String> {
    let parsed = load_config(file)?;

    println!("{}", "Validating...".cyan());

    validate_resources(&parsed.resources, &get_schemas())?;

    println!(
        "{}",
        format!(
            "✓ {} resources validated successfully.",
            parsed.resources.len()
        )
        .green()
        .bold()
    );

    for resource in &parsed.resources {
        println!("  • {}", resource.id);
    }

    Ok(())
}

async fn run_plan(file: &Path) -> Result<(), String> {
    let parsed = load_config(file)?;
    let schemas = get_schemas();
    validate_resources(&parsed.resources, &schemas)?;

    let provider = build_provider(&parsed)?;
    let backend = LocalBackend::beside(file);
    let state = load_state(&backend).await?;

    let current = refresh(&provider, &state).await?;
    let plan = plan_changes(&parsed, &current, &schemas);
    print_plan(&plan);
    Ok(())
}

async fn run_apply(file: &Path, auto_approve: bool) -> Result<(), String> {
    let parsed = load_config(file)?;
    let schemas = get_schemas();
    validate_resources(&parsed.resources, &schemas)?;

    let provider = build_provider(&parsed)?;
    let backend = LocalBackend::beside(file);

    let lock = acquire_lock(&backend, "apply").await?;
    let result = apply_locked(&parsed, &schemas, provider, &backend, auto_approve).await;
    release_lock(&backend, &lock).await;
    result
}

async fn apply_locked(
    parsed: &ParsedFile,
    schemas: &HashMap<String, ResourceSchema>,
    provider: PcsellProvider,
    backend: &LocalBackend,
    auto_approve: bool,
) -> Result<(), String> {
    let mut state = load_state(backend).await?;
    let current = refresh(&provider, &state).await?;
    let drifted = forget_vanished(&mut state, &current);

    let plan = plan_changes(parsed, &current, schemas);
    if plan.is_empty() {
        if drifted {
            save_state(backend, &mut state).await?;
        }
        println!("{}", "No changes needed.".green());
        return Ok(());
    }

    print_plan(&plan);
    println!();

    if !auto_approve && !confirm("Do you want to perform these actions?")? {
        println!("{}", "Apply cancelled.".yellow());
        return Ok(());
    }

    println!("{}", "Applying changes...".cyan().bold());
    println!();

    let provider_name = provider.name();
    let interpreter = Interpreter::new(provider).with_config(InterpreterConfig {
        dry_run: false,
        continue_on_error: true,
    });
    let result = interpreter.apply(&plan).await;

    record_outcomes(&mut state, &plan, &result, provider_name);
    save_state(backend, &mut state).await?;

    println!();
    if result.is_success() {
        println!(
            "{}",
            format!("Apply complete! {} changes applied.", result.success_count)
                .green()
                .bold()
        );
        Ok(())
    } else {
        Err(format!(
            "Apply failed. {} succeeded, {} failed.",
            result.success_count, result.failure_count
        ))
    }
}

async fn run_destroy(file: &Path, auto_approve: bool) -> Result<(), String> {
    let parsed = load_config(file)?;
    let provider = build_provider(&parsed)?;
    let backend = LocalBackend::beside(file);

    let lock = acquire_lock(&backend, "destroy").await?;
    let result = destroy_locked(provider, &backend, auto_approve).await;
    release_lock(&backend, &lock).await;
    result
}

async fn destroy_locked(
    provider: PcsellProvider,
    backend: &LocalBackend,
    auto_approve: bool,
) -> Result<(), String> {
    let mut state = load_state(backend).await?;
    let current = refresh(&provider, &state).await?;
    let drifted = forget_vanished(&mut state, &current);

    let targets: Vec<State> = state.resources.iter().map(ResourceState::to_state).collect();
    if targets.is_empty() {
        if drifted {
            save_state(backend, &mut state).await?;
        }
        println!("{}", "No resources to destroy.".green());
        return Ok(());
    }

    // Dependents were recorded last
    let targets: Vec<State> = targets.into_iter().rev().collect();
    let plan = create_destroy_plan(&targets);

    println!("{}", "Destroy Plan:".red().bold());
    println!();
    for effect in plan.effects() {
        print_effect(effect);
    }
    println!();
    println!(
        "Plan: {} to destroy.",
        plan.effects().len().to_string().red()
    );
    println!();

    if !auto_approve {
        println!(
            "{}",
            "Do you really want to destroy all resources?"
                .yellow()
                .bold()
        );
        if !confirm("This action cannot be undone.")? {
            println!();
            println!("{}", "Destroy cancelled.".yellow());
            return Ok(());
        }
    }

    println!("{}", "Destroying resources...".red().bold());
    println!();

    let provider_name = provider.name();
    let interpreter = Interpreter::new(provider).with_config(InterpreterConfig {
        dry_run: false,
        continue_on_error: true,
    });
    let result = interpreter.apply(&plan).await;

    record_outcomes(&mut state, &plan, &result, provider_name);
    save_state(backend, &mut state).await?;

    println!();
    if result.is_success() {
        println!(
            "{}",
            format!(
                "Destroy complete! {} resources destroyed.",
                result.success_count
            )
            .green()
            .bold()
        );
        Ok(())
    } else {
        Err(format!(
            "Destroy failed. {} succeeded, {} failed.",
            result.success_count, result.failure_count
        ))
    }
}

async fn run_import(address: &str, identifier: &str, file: &Path) -> Result<(), String> {
    let id = ResourceId::parse_address(address).ok_or_else(|| {
        format!(
            "Invalid resource address '{}': expected <type>.<name>",
            address
        )
    })?;

    let parsed = load_config(file)?;
    let declared = parsed.find(&id).ok_or_else(|| {
        format!(
            "Configuration for import target {} does not exist in {}",
            id,
            file.display()
        )
    })?;
    if !get_schemas().contains_key(&id.resource_type) {
        return Err(format!("Unknown resource type: {}", id.resource_type));
    }

    let provider = build_provider(&parsed)?;
    let backend = LocalBackend::beside(file);

    let lock = acquire_lock(&backend, "import").await?;
    let result = import_locked(declared, identifier, provider, &backend).await;
    release_lock(&backend, &lock).await;
    result
}

async fn import_locked(
    declared: &Resource,
    identifier: &str,
    provider: PcsellProvider,
    backend: &LocalBackend,
) -> Result<(), String> {
    let mut state = load_state(backend).await?;
    if let Some(existing) = state.find(&declared.id) {
        return Err(format!(
            "{} is already managed (id: {})",
            declared.id,
            existing.identifier.as_deref().unwrap_or("unknown")
        ));
    }

    println!("{}", format!("Importing {}...", declared.id).cyan());

    let provider_name = provider.name();
    let plan = create_import_plan(declared.id.clone(), identifier);
    let result = Interpreter::new(provider).apply(&plan).await;

    let imported = match result.outcomes.into_iter().next() {
        Some(Ok(outcome)) => outcome
            .state()
            .cloned()
            .ok_or_else(|| format!("Import of {} returned no state", declared.id))?,
        Some(Err(e)) => return Err(e.to_string()),
        None => return Err(format!("Import of {} did not run", declared.id)),
    };

    state.record(&with_config_only(imported, declared), provider_name);
    save_state(backend, &mut state).await?;

    println!(
        "{}",
        format!("Import complete! {} ({})", declared.id, identifier)
            .green()
            .bold()
    );
    Ok(())
}

/// The remote service never echoes `env`; keep the configured one
fn with_config_only(mut imported: State, declared: &Resource) -> State {
    if let Some(env) = declared.attributes.get("env") {
        imported.attributes.insert("env".to_string(), env.clone());
    }
    imported
}

async fn run_force_unlock(lock_id: &str, file: &Path) -> Result<(), String> {
    LocalBackend::beside(file)
        .force_unlock(lock_id)
        .await
        .map_err(|e| format!("Failed to unlock state: {}", e))?;
    println!("{}", format!("State lock {} removed.", lock_id).green());
    Ok(())
}

fn confirm(question: &str) -> Result<bool, String> {
    println!("  {}", format!("{} Type 'yes' to confirm.", question).yellow());
    print!("\n  Enter a value: ");
    std::io::Write::flush(&mut std::io::stdout()).map_err(|e| e.to_string())?;

    let mut input = String::new();
    std::io::stdin()
        .read_line(&mut input)
        .map_err(|e| e.to_string())?;
    println!();

    Ok(input.trim() == "yes")
}

// =============================================================================
// Rendering
// =============================================================================

fn print_plan(plan: &Plan) {
    if plan.is_empty() {
        println!(
            "{}",
            "No changes. Remote objects match the configuration.".green()
        );
        return;
    }

    println!("{}", "Execution Plan:".cyan().bold());
    println!();

    for effect in plan.effects() {
        print_effect(effect);
        for line in effect_details(effect) {
            println!("      {}", line);
        }
    }

    println!();
    println!("{}", plan.summary());
}

fn print_effect(effect: &Effect) {
    let symbol = match effect {
        Effect::Create(_) => effect.symbol().green().bold(),
        Effect::Update { .. } => effect.symbol().yellow().bold(),
        Effect::Delete { .. } => effect.symbol().red().bold(),
        Effect::Import { .. } => effect.symbol().cyan().bold(),
    };
    match effect {
        Effect::Delete { id, identifier, .. } | Effect::Import { id, identifier } => {
            println!("  {} {} (id: {})", symbol, id, identifier)
        }
        _ => println!("  {} {}", symbol, effect.resource_id()),
    }
}

/// Attribute lines shown under an Effect
fn effect_details(effect: &Effect) -> Vec<String> {
    match effect {
        Effect::Create(resource) => {
            let mut keys: Vec<&String> = resource.attributes.keys().collect();
            keys.sort();
            keys.into_iter()
                .map(|k| format!("{} = {}", k, format_value(&resource.attributes[k])))
                .collect()
        }
        Effect::Update { from, to, changed, .. } => changed
            .iter()
            .map(|k| {
                format!(
                    "{}: {} -> {}",
                    k,
                    format_optional(from.attributes.get(k)),
                    format_optional(to.attributes.get(k))
                )
            })
            .collect(),
        Effect::Delete { .. } | Effect::Import { .. } => Vec::new(),
    }
}

fn format_effect(effect: &Effect) -> String {
    match effect {
        Effect::Create(r) => format!("Create {}", r.id),
        Effect::Update { id, .. } => format!("Update {}", id),
        Effect::Delete { id, .. } => format!("Delete {}", id),
        Effect::Import { id, .. } => format!("Import {}", id),
    }
}

fn format_value(value: &Value) -> String {
    value.to_string()
}

fn format_optional(value: Option<&Value>) -> String {
    value.map(format_value).unwrap_or_else(|| "(none)".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_resource(name: &str, attrs: Vec<(&str, Value)>) -> Resource {
        let mut resource = Resource::new("ibm_onboarding_catalog_plan", name);
        for (k, v) in attrs {
            resource.attributes.insert(k.to_string(), v);
        }
        resource
    }

    #[test]
    fn schemas_cover_both_resource_types() {
        let schemas = get_schemas();
        assert!(schemas.contains_key("ibm_onboarding_catalog_plan"));
        assert!(schemas.contains_key("ibm_onboarding_iam_registration"));
    }

    #[test]
    fn unknown_resource_type_fails_validation() {
        let resource = Resource::new("ibm_onboarding_widget", "w");
        let err = validate_resources(&[resource], &get_schemas()).unwrap_err();
        assert_eq!(
            err,
            "ibm_onboarding_widget.w: unknown resource type 'ibm_onboarding_widget'"
        );
    }

    #[test]
    fn foreign_provider_block_is_rejected() {
        let parsed = parser::parse(r#"provider "aws" { region = "us-east-1" }"#).unwrap();
        assert_eq!(build_provider(&parsed).unwrap_err(), "Unknown provider: aws");
    }

    #[test]
    fn orphans_are_planned_for_deletion() {
        let parsed = ParsedFile::default();
        let id = ResourceId::new("ibm_onboarding_catalog_plan", "old");
        let mut current = HashMap::new();
        current.insert(
            id.clone(),
            State::existing(id.clone(), HashMap::new()).with_identifier("p/c/plan"),
        );

        let plan = plan_changes(&parsed, &current, &get_schemas());
        assert_eq!(plan.summary().delete, 1);
        assert_eq!(plan.effects()[0].resource_id(), &id);
    }

    #[test]
    fn vanished_objects_are_forgotten() {
        let id = ResourceId::new("ibm_onboarding_catalog_plan", "gone");
        let mut state = StateFile::new();
        state.record(
            &State::existing(id.clone(), HashMap::new()).with_identifier("p/c/plan"),
            "pcsell",
        );
        let mut current = HashMap::new();
        current.insert(id.clone(), State::not_found(id.clone()));

        assert!(forget_vanished(&mut state, &current));
        assert!(state.find(&id).is_none());
        assert!(!forget_vanished(&mut state, &current));
    }

    #[test]
    fn update_details_show_old_and_new_values() {
        let id = ResourceId::new("ibm_onboarding_catalog_plan", "free");
        let from = State::existing(
            id.clone(),
            [("active".to_string(), Value::Bool(true))].into_iter().collect(),
        );
        let to = plan_resource("free", vec![("pricing_tags", Value::string_list(["free"]))]);
        let effect = Effect::Update {
            id,
            from,
            to,
            changed: vec!["active".to_string(), "pricing_tags".to_string()],
        };

        assert_eq!(
            effect_details(&effect),
            vec![
                "active: true -> (none)".to_string(),
                "pricing_tags: (none) -> [\"free\"]".to_string(),
            ]
        );
    }

    #[test]
    fn create_details_are_sorted() {
        let effect = Effect::Create(plan_resource(
            "free",
            vec![
                ("name", Value::String("free-plan".to_string())),
                ("active", Value::Bool(true)),
            ],
        ));
        assert_eq!(
            effect_details(&effect),
            vec!["active = true".to_string(), "name = \"free-plan\"".to_string()]
        );
    }

    #[test]
    fn imported_state_keeps_configured_env() {
        let declared = plan_resource("free", vec![("env", Value::String("current".to_string()))]);
        let imported = State::existing(declared.id.clone(), HashMap::new());
        let recorded = with_config_only(imported, &declared);
        assert_eq!(
            recorded.attributes.get("env"),
            Some(&Value::String("current".to_string()))
        );
    }

    #[tokio::test]
    async fn force_unlock_without_lock_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_force_unlock("missing", &dir.path().join("main.hcl"))
            .await
            .unwrap_err();
        assert!(err.starts_with("Failed to unlock state: Lock not found"));
    }
}
