//! Acceptance test harness
//!
//! Drives real configurations through parse, plan and apply against the
//! live Partner Center Sell API, then destroys everything it created.
//! Tests opt in with `PCSELL_ACC=1` and the object IDs below.

use std::collections::HashMap;

use pcsell_core::differ::{create_destroy_plan, create_import_plan, create_plan};
use pcsell_core::interpreter::{EffectOutcome, Interpreter};
use pcsell_core::parser;
use pcsell_core::provider::Provider;
use pcsell_core::resource::{ResourceId, State, Value};
use pcsell_core::schema::ResourceSchema;

pub const ACC_ENABLE_VAR: &str = "PCSELL_ACC";
pub const PRODUCT_WITH_CATALOG_PRODUCT_VAR: &str = "PCS_ONBOARDING_PRODUCT_WITH_CATALOG_PRODUCT";
pub const CATALOG_PRODUCT_ID_VAR: &str = "PCS_ONBOARDING_CATALOG_PRODUCT_ID";
pub const IAM_SERVICE_REGISTRATION_ID_VAR: &str = "PCS_IAM_SERVICE_REGISTRATION_ID";

/// IDs of pre-existing onboarding objects the acceptance tests build on
#[derive(Debug, Clone)]
pub struct AccSettings {
    pub product_id: String,
    pub catalog_product_id: String,
    /// Programmatic name of the product's IAM service
    pub iam_service_registration_id: String,
}

/// Returns the settings, or the reason the acceptance tests must be skipped
pub fn pre_check() -> Result<AccSettings, String> {
    if std::env::var(ACC_ENABLE_VAR).as_deref() != Ok("1") {
        return Err(format!("{} is not set to 1", ACC_ENABLE_VAR));
    }
    let var = |name: &str| {
        std::env::var(name)
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| format!("{} must be set for acceptance tests", name))
    };
    Ok(AccSettings {
        product_id: var(PRODUCT_WITH_CATALOG_PRODUCT_VAR)?,
        catalog_product_id: var(CATALOG_PRODUCT_ID_VAR)?,
        iam_service_registration_id: var(IAM_SERVICE_REGISTRATION_ID_VAR)?,
    })
}

// =============================================================================
// Checks
// =============================================================================

pub type StateMap = HashMap<ResourceId, State>;
pub type Check = Box<dyn Fn(&StateMap) -> Result<(), String> + Send + Sync>;

fn state_for<'a>(states: &'a StateMap, address: &str) -> Result<&'a State, String> {
    let id = ResourceId::parse_address(address)
        .ok_or_else(|| format!("Invalid resource address: {}", address))?;
    states
        .get(&id)
        .ok_or_else(|| format!("Not found: {}", address))
}

/// Flat rendering used by attribute checks: strings unquoted, scalars as text
fn flat(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Attribute at a dotted path (`metadata.0.pricing.0.type`) equals `expected`
pub fn check_resource_attr(address: &str, path: &str, expected: impl Into<String>) -> Check {
    let address = address.to_string();
    let path = path.to_string();
    let expected = expected.into();
    Box::new(move |states| {
        let state = state_for(states, &address)?;
        match Value::lookup(&state.attributes, &path) {
            Some(value) if flat(value) == expected => Ok(()),
            Some(value) => Err(format!(
                "{}: Attribute '{}' expected \"{}\", got \"{}\"",
                address,
                path,
                expected,
                flat(value)
            )),
            None => Err(format!(
                "{}: Attribute '{}' expected \"{}\", got nothing",
                address, path, expected
            )),
        }
    })
}

/// Resource was found remotely after apply; `inspect` sees its refreshed state
pub fn check_exists(
    address: &str,
    inspect: impl Fn(&State) -> Result<(), String> + Send + Sync + 'static,
) -> Check {
    let address = address.to_string();
    Box::new(move |states| {
        let state = state_for(states, &address)?;
        if !state.exists || state.identifier.is_none() {
            return Err(format!("No ID is set: {}", address));
        }
        inspect(state)
    })
}

// =============================================================================
// Test cases
// =============================================================================

pub enum TestStep {
    /// Apply a configuration, then run the checks against refreshed state
    Config { config: String, checks: Vec<Check> },
    /// Import the resource by its recorded ID and compare the result
    Import { address: String, ignore: Vec<String> },
}

impl TestStep {
    pub fn config(config: impl Into<String>, checks: Vec<Check>) -> Self {
        TestStep::Config {
            config: config.into(),
            checks,
        }
    }

    pub fn import(address: &str, ignore: &[&str]) -> Self {
        TestStep::Import {
            address: address.to_string(),
            ignore: ignore.iter().map(|s| s.to_string()).collect(),
        }
    }
}

pub struct TestCase {
    pub steps: Vec<TestStep>,
    /// Confirm every destroyed resource is gone remotely
    pub check_destroy: bool,
}

impl TestCase {
    pub fn new(steps: Vec<TestStep>) -> Self {
        Self {
            steps,
            check_destroy: true,
        }
    }

    /// Run every step, then destroy what was created
    ///
    /// The destroy runs even when a step failed; the first failure wins.
    pub async fn run<P: Provider>(self, provider: P) -> Result<(), String> {
        let interpreter = Interpreter::new(provider);
        let mut states = StateMap::new();

        let mut result = Ok(());
        for (index, step) in self.steps.iter().enumerate() {
            if let Err(e) = run_step(&interpreter, &mut states, step).await {
                result = Err(format!("Step {}: {}", index + 1, e));
                break;
            }
        }

        let destroyed = destroy(&interpreter, &mut states).await;
        let destroyed = match (result, destroyed) {
            (Err(e), _) => return Err(e),
            (Ok(()), Err(e)) => return Err(e),
            (Ok(()), Ok(destroyed)) => destroyed,
        };

        if self.check_destroy {
            check_destroyed(interpreter.provider(), &destroyed).await?;
        }
        Ok(())
    }
}

fn schemas<P: Provider>(provider: &P) -> HashMap<String, ResourceSchema> {
    provider
        .resource_types()
        .into_iter()
        .map(|t| (t.name().to_string(), t.schema()))
        .collect()
}

async fn run_step<P: Provider>(
    interpreter: &Interpreter<P>,
    states: &mut StateMap,
    step: &TestStep,
) -> Result<(), String> {
    match step {
        TestStep::Config { config, checks } => {
            apply_config(interpreter, states, config).await?;
            refresh(interpreter.provider(), states).await?;
            expect_empty_plan(interpreter.provider(), states, config)?;
            for check in checks {
                check(states)?;
            }
            Ok(())
        }
        TestStep::Import { address, ignore } => {
            verify_import(interpreter, states, address, ignore).await
        }
    }
}

async fn apply_config<P: Provider>(
    interpreter: &Interpreter<P>,
    states: &mut StateMap,
    config: &str,
) -> Result<(), String> {
    let parsed = parser::parse(config).map_err(|e| e.to_string())?;
    let schemas = schemas(interpreter.provider());

    for resource in &parsed.resources {
        let schema = schemas
            .get(&resource.id.resource_type)
            .ok_or_else(|| format!("Unknown resource type: {}", resource.id.resource_type))?;
        schema.validate(&resource.attributes).map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            format!("{}: {}", resource.id, messages.join("; "))
        })?;
    }

    let orphans: Vec<State> = states
        .values()
        .filter(|s| parsed.find(&s.id).is_none())
        .cloned()
        .collect();
    let plan = create_plan(&parsed.resources, states, &orphans, &schemas);
    log::info!("{}", plan.summary());

    let result = interpreter.apply(&plan).await;
    for outcome in &result.outcomes {
        match outcome {
            Ok(EffectOutcome::Deleted { id }) => {
                states.remove(id);
            }
            Ok(outcome) => {
                if let Some(state) = outcome.state() {
                    states.insert(state.id.clone(), state.clone());
                }
            }
            Err(e) => return Err(e.to_string()),
        }
    }
    Ok(())
}

/// Re-read every tracked resource from the service
async fn refresh<P: Provider>(provider: &P, states: &mut StateMap) -> Result<(), String> {
    for state in states.values_mut() {
        let Some(identifier) = state.identifier.clone() else {
            continue;
        };
        let fresh = provider
            .read(&state.id, &identifier, &state.attributes)
            .await
            .map_err(|e| e.to_string())?;
        if !fresh.exists {
            return Err(format!("{} ({}) not found after apply", state.id, identifier));
        }
        *state = fresh;
    }
    Ok(())
}

fn expect_empty_plan<P: Provider>(
    provider: &P,
    states: &StateMap,
    config: &str,
) -> Result<(), String> {
    let parsed = parser::parse(config).map_err(|e| e.to_string())?;
    let plan = create_plan(&parsed.resources, states, &[], &schemas(provider));
    if plan.is_empty() {
        return Ok(());
    }
    let effects: Vec<String> = plan.effects().iter().map(|e| e.to_string()).collect();
    Err(format!(
        "After applying this step, the plan was not empty:\n{}",
        effects.join("\n")
    ))
}

async fn verify_import<P: Provider>(
    interpreter: &Interpreter<P>,
    states: &StateMap,
    address: &str,
    ignore: &[String],
) -> Result<(), String> {
    let recorded = state_for(states, address)?;
    let identifier = recorded
        .identifier
        .clone()
        .ok_or_else(|| format!("No ID is set: {}", address))?;

    let plan = create_import_plan(recorded.id.clone(), identifier);
    let result = interpreter.apply(&plan).await;
    let imported = match result.outcomes.into_iter().next() {
        Some(Ok(EffectOutcome::Imported { state })) => state,
        Some(Err(e)) => return Err(e.to_string()),
        _ => return Err(format!("Import of {} produced no state", address)),
    };

    let mismatches = attribute_mismatches(&recorded.attributes, &imported.attributes, ignore);
    if mismatches.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "ImportStateVerify attributes not equivalent:\n{}",
            mismatches.join("\n")
        ))
    }
}

/// Keys whose values differ; missing and empty values are equivalent
fn attribute_mismatches(
    expected: &HashMap<String, Value>,
    actual: &HashMap<String, Value>,
    ignore: &[String],
) -> Vec<String> {
    let mut keys: Vec<&String> = expected.keys().chain(actual.keys()).collect();
    keys.sort();
    keys.dedup();

    let present = |map: &HashMap<String, Value>, key: &str| {
        map.get(key).filter(|v| !v.is_empty()).cloned()
    };

    keys.into_iter()
        .filter(|key| !ignore.iter().any(|i| i == *key))
        .filter_map(|key| {
            let want = present(expected, key);
            let got = present(actual, key);
            (want != got).then(|| {
                format!(
                    "  {}: {} != {}",
                    key,
                    want.map(|v| v.to_string()).unwrap_or_default(),
                    got.map(|v| v.to_string()).unwrap_or_default()
                )
            })
        })
        .collect()
}

async fn destroy<P: Provider>(
    interpreter: &Interpreter<P>,
    states: &mut StateMap,
) -> Result<Vec<State>, String> {
    let recorded: Vec<State> = states.drain().map(|(_, s)| s).collect();
    let plan = create_destroy_plan(&recorded);
    let result = interpreter.apply(&plan).await;
    if let Some(e) = result.errors().next() {
        return Err(format!("Error running post-test destroy: {}", e));
    }
    Ok(recorded)
}

/// Short type name used in destroy messages (`onboarding_catalog_plan`)
fn short_type(resource_type: &str) -> &str {
    resource_type.strip_prefix("ibm_").unwrap_or(resource_type)
}

async fn check_destroyed<P: Provider>(provider: &P, destroyed: &[State]) -> Result<(), String> {
    for state in destroyed {
        let Some(identifier) = &state.identifier else {
            continue;
        };
        let kind = short_type(&state.id.resource_type);
        match provider.read(&state.id, identifier, &state.attributes).await {
            Ok(fresh) if fresh.exists => {
                return Err(format!("{} still exists: {}", kind, identifier));
            }
            Ok(_) => {}
            Err(e) => {
                return Err(format!(
                    "Error checking for {} ({}) has been destroyed: {}",
                    kind, identifier, e
                ));
            }
        }
    }
    Ok(())
}

// =============================================================================
// Configuration templates
// =============================================================================

pub const CATALOG_PLAN_ADDRESS: &str = "ibm_onboarding_catalog_plan.onboarding_catalog_plan_instance";
pub const IAM_REGISTRATION_ADDRESS: &str =
    "ibm_onboarding_iam_registration.onboarding_iam_registration_instance";

const LOCALES: [&str; 10] = ["en", "de", "es", "fr", "it", "ja", "ko", "pt_br", "zh_tw", "zh_cn"];

/// Catalog plan with the required arguments only
pub fn catalog_plan_config_basic(
    product_id: &str,
    catalog_product_id: &str,
    name: &str,
    active: bool,
    disabled: bool,
    kind: &str,
) -> String {
    format!(
        r#"
resource "ibm_onboarding_catalog_plan" "onboarding_catalog_plan_instance" {{
  product_id = "{product_id}"
  catalog_product_id = "{catalog_product_id}"
  name = "{name}"
  active = {active}
  disabled = {disabled}
  kind = "{kind}"
  tags = ["tag"]
  object_provider {{
    name = "name"
    email = "email@email.com"
  }}
  metadata {{
    rc_compatible = false
    pricing {{
      type = "paid"
      origin = "pricing_catalog"
    }}
  }}
}}
"#
    )
}

/// Catalog plan with every optional block set
pub fn catalog_plan_config(
    product_id: &str,
    catalog_product_id: &str,
    env: &str,
    name: &str,
    active: bool,
    disabled: bool,
    kind: &str,
) -> String {
    format!(
        r#"
resource "ibm_onboarding_catalog_plan" "onboarding_catalog_plan_instance" {{
  product_id = "{product_id}"
  catalog_product_id = "{catalog_product_id}"
  env = "{env}"
  name = "{name}"
  active = {active}
  disabled = {disabled}
  kind = "{kind}"
  overview_ui {{
    en {{
      display_name = "display_name"
      description = "description"
      long_description = "long_description"
    }}
  }}
  tags = ["tag"]
  object_provider {{
    name = "name"
    email = "email@email.com"
  }}
  metadata {{
    rc_compatible = false
    pricing {{
      type = "paid"
      origin = "global_catalog"
    }}
    service {{
      rc_provisionable = true
      iam_compatible = true
      bindable = true
      plan_updateable = true
      service_key_supported = true
    }}
    plan {{
      allow_internal_users = true
      bindable = true
    }}
  }}
}}
"#
    )
}

/// IAM registration with the required arguments only
pub fn iam_registration_config_basic(product_id: &str, name: &str) -> String {
    format!(
        r#"
resource "ibm_onboarding_iam_registration" "onboarding_iam_registration_instance" {{
  product_id = "{product_id}"
  name = "{name}"
  enabled = true
  display_name {{
    default = "{name}"
  }}
}}
"#
    )
}

/// Pseudo-random role suffix in 10..100
pub fn random_role_name(prefix: &str) -> String {
    let n = chrono::Utc::now().timestamp_subsec_nanos() % 90 + 10;
    format!("{}-{}", prefix, n)
}

/// Service role CRN for a role of the registered service
pub fn service_role_crn(service: &str, role_name: &str) -> String {
    format!("crn:v1:bluemix:public:{}::::serviceRole:{}", service, role_name)
}

/// Values that change between the all-arguments steps
#[derive(Debug, Clone)]
pub struct IamRegistrationArgs {
    pub product_id: String,
    pub env: String,
    pub name: String,
    pub enabled: bool,
    pub service_type: String,
    pub role: String,
    pub role_display_name: String,
    pub action_description: String,
    pub supported_attribute_display_name: String,
    pub input_details_display_name: String,
    pub authorization_subject_service: String,
    pub environment_attribute_value: String,
    pub anonymous_access_property: String,
}

/// Locale block with `default` set and every other locale filled in
fn translated(block: &str, default: &str, fill: Option<&str>, indent: usize) -> String {
    let pad = " ".repeat(indent);
    let mut out = format!("{pad}{block} {{\n{pad}  default = \"{default}\"\n");
    for locale in LOCALES {
        let value = fill.unwrap_or(locale);
        out.push_str(&format!("{pad}  {locale} = \"{value}\"\n"));
    }
    out.push_str(&format!("{pad}}}\n"));
    out
}

fn action_block(id: &str, roles: &[&str], description: &str) -> String {
    let roles = quoted_list(roles);
    format!(
        "  actions {{\n    id = \"{id}\"\n    roles = {roles}\n{}{}    options {{\n      hidden = true\n    }}\n  }}\n",
        translated("description", description, None, 4),
        translated("display_name", "default", None, 4),
    )
}

fn supported_attribute_block(args: &IamRegistrationArgs) -> String {
    format!(
        r#"  supported_attributes {{
    key = "testString"
    options {{
      operators = ["stringEquals"]
      hidden = false
      policy_types = ["access"]
      is_empty_value_supported = true
      is_string_exists_false_value_supported = true
    }}
{display_name}{description}    ui {{
      input_type = "selector"
      input_details {{
        type = "gst"
        values {{
          value = "testString"
{value_display_name}        }}
        gst {{
          query = "query"
          value_property_name = "teststring"
          input_option_label = "{{name}} - {{instance_id}}"
        }}
      }}
    }}
  }}
"#,
        display_name = translated(
            "display_name",
            &args.supported_attribute_display_name,
            None,
            4
        ),
        description = translated("description", "default", None, 4),
        value_display_name = translated(
            "display_name",
            &args.input_details_display_name,
            Some("testString"),
            10
        ),
    )
}

fn supported_role_block(id: &str, description: &str, display_name: &str) -> String {
    format!(
        r#"  supported_roles {{
    id = "{id}"
    description {{
      default = "{description}"
    }}
    display_name {{
      default = "{display_name}"
    }}
    options {{
      access_policy = true
      policy_type = ["access"]
    }}
  }}
"#
    )
}

fn anonymous_access_block(service: &str, property: &str, role: &str) -> String {
    format!(
        r#"  supported_anonymous_accesses {{
    attributes {{
      account_id = "account_id"
      service_name = "{service}"
      additional_properties = {{ "testString" = "{property}" }}
    }}
    roles = ["{role}"]
  }}
"#
    )
}

fn quoted_list(items: &[&str]) -> String {
    let items: Vec<String> = items.iter().map(|i| format!("\"{}\"", i)).collect();
    format!("[{}]", items.join(", "))
}

fn iam_registration_header(args: &IamRegistrationArgs) -> String {
    format!(
        r#"
resource "ibm_onboarding_iam_registration" "onboarding_iam_registration_instance" {{
  product_id = "{}"
  env = "{}"
  name = "{}"
  enabled = {}
  service_type = "{}"
"#,
        args.product_id, args.env, args.name, args.enabled, args.service_type
    )
}

/// IAM registration with one of every nested block
pub fn iam_registration_config(args: &IamRegistrationArgs) -> String {
    let mut config = iam_registration_header(args);
    config.push_str(&action_block("id", &[args.role.as_str()], &args.action_description));
    config.push_str(&format!(
        "  additional_policy_scopes = {}\n",
        quoted_list(&[args.name.as_str()])
    ));
    config.push_str(&translated("display_name", &args.name, None, 2));
    config.push_str("  parent_ids = [\"05ca8653-de25-49fa-a14d-aaa5d373bc21\"]\n");
    config.push_str(&supported_attribute_block(args));
    config.push_str(&format!(
        r#"  supported_authorization_subjects {{
    attributes {{
      service_name = "{}"
      resource_type = "testString"
    }}
    roles = ["{}"]
  }}
"#,
        args.authorization_subject_service, args.role
    ));
    config.push_str(&supported_role_block(
        &args.role,
        "desc",
        &args.role_display_name,
    ));
    config.push_str(&format!(
        r#"  supported_network {{
    environment_attributes {{
      key = "networkType"
      values = ["{}"]
      options {{
        hidden = false
      }}
    }}
  }}
"#,
        args.environment_attribute_value
    ));
    config.push_str(&anonymous_access_block(
        &args.name,
        &args.anonymous_access_property,
        &args.role,
    ));
    config.push_str("}\n");
    config
}

/// IAM registration with repeated nested blocks and a second role
pub fn iam_registration_update_config(args: &IamRegistrationArgs) -> String {
    let second_display_name = random_role_name("random-2");
    let second_role = service_role_crn(&args.name, &second_display_name);

    let mut config = iam_registration_header(args);
    config.push_str(&action_block(
        "id",
        &[args.role.as_str(), second_role.as_str()],
        &args.action_description,
    ));
    config.push_str(&action_block("idtwo", &[args.role.as_str()], "default"));
    config.push_str(&format!(
        "  additional_policy_scopes = {}\n",
        quoted_list(&[args.name.as_str(), &format!("{}.some", args.name)])
    ));
    config.push_str(&translated("display_name", &args.name, None, 2));
    config.push_str("  parent_ids = [\"05ca8653-de25-49fa-a14d-aaa5d373bc22\"]\n");
    config.push_str(&supported_attribute_block(args));
    config.push_str(
        r#"  supported_attributes {
    key = "some-attribute"
    display_name {
      default = "some-attribute"
    }
    description {
      default = "some-attribute"
    }
    ui {
      input_type = "string"
    }
  }
"#,
    );
    config.push_str(&format!(
        r#"  supported_authorization_subjects {{
    attributes {{
      service_name = "{}"
      resource_type = "testString"
    }}
    roles = ["{}"]
  }}
"#,
        args.authorization_subject_service, args.role
    ));
    config.push_str(&supported_role_block(
        &args.role,
        "desc",
        &args.role_display_name,
    ));
    config.push_str(&supported_role_block(
        &second_role,
        "default",
        &second_display_name,
    ));
    config.push_str(&format!(
        r#"  supported_network {{
    environment_attributes {{
      key = "networkType"
      values = ["{}"]
      options {{
        hidden = true
      }}
    }}
  }}
"#,
        args.environment_attribute_value
    ));
    config.push_str(&anonymous_access_block(
        &args.name,
        &args.anonymous_access_property,
        &args.role,
    ));
    config.push_str(&anonymous_access_block(&args.name, "something", &args.role));
    config.push_str("}\n");
    config
}
