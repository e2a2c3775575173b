//! Parser - Parse pcsell configuration files
//!
//! Convert the HCL-style configuration to resources using pest

use pest::Parser;
use pest_derive::Parser;
use std::collections::{HashMap, HashSet};
use std::env;

use crate::resource::{Resource, ResourceId, Value};

#[derive(Parser)]
#[grammar = "parser/pcsell.pest"]
struct PcsellParser;

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Syntax error: {0}")]
    Syntax(#[from] Box<pest::error::Error<Rule>>),

    #[error("Invalid expression at line {line}: {message}")]
    InvalidExpression { line: usize, message: String },

    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    #[error("Duplicate attribute '{name}' at line {line}")]
    DuplicateAttribute { name: String, line: usize },

    #[error("Duplicate resource: {0}")]
    DuplicateResource(String),

    #[error("Duplicate provider block: {0}")]
    DuplicateProvider(String),
}

impl From<pest::error::Error<Rule>> for ParseError {
    fn from(err: pest::error::Error<Rule>) -> Self {
        ParseError::Syntax(Box::new(err))
    }
}

/// Provider configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderBlock {
    pub name: String,
    pub attributes: HashMap<String, Value>,
}

impl ProviderBlock {
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }
}

/// Parse result
#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
    pub provider: Option<ProviderBlock>,
    pub resources: Vec<Resource>,
}

impl ParsedFile {
    pub fn find(&self, id: &ResourceId) -> Option<&Resource> {
        self.resources.iter().find(|r| &r.id == id)
    }
}

type Pair<'i> = pest::iterators::Pair<'i, Rule>;

/// Parse a configuration file
pub fn parse(input: &str) -> Result<ParsedFile, ParseError> {
    let pairs = PcsellParser::parse(Rule::file, input)?;

    let mut parsed = ParsedFile::default();
    let mut seen = HashSet::new();

    for pair in pairs {
        if pair.as_rule() != Rule::file {
            continue;
        }
        for inner in pair.into_inner() {
            if inner.as_rule() != Rule::statement {
                continue;
            }
            for stmt in inner.into_inner() {
                match stmt.as_rule() {
                    Rule::provider_block => {
                        let provider = parse_provider_block(stmt)?;
                        if parsed.provider.is_some() {
                            return Err(ParseError::DuplicateProvider(provider.name));
                        }
                        parsed.provider = Some(provider);
                    }
                    Rule::resource_block => {
                        let resource = parse_resource_block(stmt)?;
                        if !seen.insert(resource.id.clone()) {
                            return Err(ParseError::DuplicateResource(resource.id.to_string()));
                        }
                        parsed.resources.push(resource);
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(parsed)
}

fn parse_provider_block(pair: Pair) -> Result<ProviderBlock, ParseError> {
    let mut inner = pair.into_inner();
    let name = parse_string(inner.next().unwrap());
    let attributes = parse_block_contents(inner)?;

    Ok(ProviderBlock { name, attributes })
}

fn parse_resource_block(pair: Pair) -> Result<Resource, ParseError> {
    let mut inner = pair.into_inner();
    let resource_type = parse_string(inner.next().unwrap());
    let name = parse_string(inner.next().unwrap());
    let attributes = parse_block_contents(inner)?;

    Ok(Resource {
        id: ResourceId::new(resource_type, name),
        attributes,
    })
}

/// Parse block contents (attributes and nested blocks)
/// Nested blocks with the same name are collected into a list
fn parse_block_contents(pairs: pest::iterators::Pairs<Rule>) -> Result<HashMap<String, Value>, ParseError> {
    let mut attributes: HashMap<String, Value> = HashMap::new();
    let mut nested_blocks: Vec<(String, Vec<Value>)> = Vec::new();

    for content_pair in pairs {
        if content_pair.as_rule() != Rule::block_content {
            continue;
        }
        let inner = content_pair.into_inner().next().unwrap();
        let line = line_of(&inner);
        match inner.as_rule() {
            Rule::attribute => {
                let mut attr_inner = inner.into_inner();
                let key = attr_inner.next().unwrap().as_str().to_string();
                let value = parse_expression(attr_inner.next().unwrap())?;
                if attributes.contains_key(&key) || nested_blocks.iter().any(|(n, _)| n == &key) {
                    return Err(ParseError::DuplicateAttribute { name: key, line });
                }
                attributes.insert(key, value);
            }
            Rule::nested_block => {
                let mut block_inner = inner.into_inner();
                let block_name = block_inner.next().unwrap().as_str().to_string();
                if attributes.contains_key(&block_name) {
                    return Err(ParseError::DuplicateAttribute {
                        name: block_name,
                        line,
                    });
                }
                let block_attrs = parse_block_contents(block_inner)?;

                // Add to the list of blocks with this name, keeping declaration order
                match nested_blocks.iter_mut().find(|(n, _)| n == &block_name) {
                    Some((_, blocks)) => blocks.push(Value::Map(block_attrs)),
                    None => nested_blocks.push((block_name, vec![Value::Map(block_attrs)])),
                }
            }
            _ => {}
        }
    }

    for (name, blocks) in nested_blocks {
        attributes.insert(name, Value::List(blocks));
    }

    Ok(attributes)
}

fn parse_expression(pair: Pair) -> Result<Value, ParseError> {
    let inner = if pair.as_rule() == Rule::expression {
        pair.into_inner().next().unwrap()
    } else {
        pair
    };
    let line = line_of(&inner);

    match inner.as_rule() {
        Rule::env_var => {
            let var_name = parse_string(inner.into_inner().next().unwrap());
            match env::var(&var_name) {
                Ok(val) => Ok(Value::String(val)),
                Err(_) => Err(ParseError::EnvVarNotSet(var_name)),
            }
        }
        Rule::list => {
            let items: Result<Vec<Value>, ParseError> =
                inner.into_inner().map(parse_expression).collect();
            Ok(Value::List(items?))
        }
        Rule::map => {
            let mut map = HashMap::new();
            for entry in inner.into_inner() {
                if entry.as_rule() == Rule::map_entry {
                    let mut entry_inner = entry.into_inner();
                    let key_pair = entry_inner.next().unwrap().into_inner().next().unwrap();
                    let key = match key_pair.as_rule() {
                        Rule::string => parse_string(key_pair),
                        _ => key_pair.as_str().to_string(),
                    };
                    let value = parse_expression(entry_inner.next().unwrap())?;
                    if map.insert(key.clone(), value).is_some() {
                        return Err(ParseError::DuplicateAttribute { name: key, line });
                    }
                }
            }
            Ok(Value::Map(map))
        }
        Rule::boolean => Ok(Value::Bool(inner.as_str() == "true")),
        Rule::float => inner
            .as_str()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|e| ParseError::InvalidExpression {
                line,
                message: format!("invalid number '{}': {}", inner.as_str(), e),
            }),
        Rule::number => inner
            .as_str()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|e| ParseError::InvalidExpression {
                line,
                message: format!("invalid number '{}': {}", inner.as_str(), e),
            }),
        Rule::string => Ok(Value::String(parse_string(inner))),
        _ => Err(ParseError::InvalidExpression {
            line,
            message: format!("unexpected '{}'", inner.as_str()),
        }),
    }
}

fn parse_string(pair: Pair) -> String {
    let raw = pair
        .into_inner()
        .next()
        .map(|p| p.as_str())
        .unwrap_or_default();

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn line_of(pair: &Pair) -> usize {
    pair.as_span().start_pos().line_col().0
}
