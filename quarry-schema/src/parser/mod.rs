//! Schema parser for `.quarry` files.

mod grammar;

use std::path::Path;

use pest::Parser;
use pest::iterators::{Pair, Pairs};

use crate::ast::*;
use crate::error::{SchemaError, SchemaResult};

pub use grammar::{QuarryParser, Rule};

/// Parse a schema from a string.
///
/// This only checks syntax and duplicate names; use
/// [`validate_schema`](crate::validate_schema) to also check type references.
pub fn parse_schema(input: &str) -> SchemaResult<Schema> {
    let mut pairs = QuarryParser::parse(Rule::schema, input).map_err(|e| {
        let (offset, len) = match e.location {
            pest::error::InputLocation::Pos(pos) => (pos, 0),
            pest::error::InputLocation::Span((start, end)) => (start, end - start),
        };
        SchemaError::syntax(input, offset, len, e.variant.message().to_string())
    })?;

    let schema_pair = next_pair(&mut pairs, input, "schema")?;
    let mut schema = Schema::new();
    let mut current_doc: Option<Documentation> = None;

    for pair in schema_pair.into_inner() {
        match pair.as_rule() {
            Rule::documentation => current_doc = Some(parse_documentation(pair)),
            Rule::model_def => {
                let mut model = parse_model(pair, input)?;
                if let Some(doc) = current_doc.take() {
                    model = model.with_documentation(doc);
                }
                if schema.model_exists(model.name()) {
                    return Err(SchemaError::duplicate("model", model.name()));
                }
                schema.add_model(model);
            }
            _ => {}
        }
    }

    tracing::debug!(models = schema.models.len(), "parsed schema");
    Ok(schema)
}

/// Parse a schema from a file.
pub fn parse_schema_file(path: impl AsRef<Path>) -> SchemaResult<Schema> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| SchemaError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_schema(&content)
}

fn next_pair<'i>(pairs: &mut Pairs<'i, Rule>, input: &str, what: &str) -> SchemaResult<Pair<'i, Rule>> {
    pairs
        .next()
        .ok_or_else(|| SchemaError::syntax(input, input.len(), 0, format!("expected {}", what)))
}

fn span_of(pair: &Pair<'_, Rule>) -> Span {
    let span = pair.as_span();
    Span::new(span.start(), span.end())
}

fn parse_documentation(pair: Pair<'_, Rule>) -> Documentation {
    let span = span_of(&pair);
    let text = pair
        .into_inner()
        .map(|p| p.as_str().trim_start_matches("///").trim())
        .collect::<Vec<_>>()
        .join("\n");
    Documentation::new(text, span)
}

fn parse_model(pair: Pair<'_, Rule>, input: &str) -> SchemaResult<Model> {
    let span = span_of(&pair);
    let mut inner = pair.into_inner();

    let name_pair = next_pair(&mut inner, input, "model name")?;
    let mut model = Model::new(Ident::new(name_pair.as_str(), span_of(&name_pair)), span);

    for item in inner {
        match item.as_rule() {
            Rule::model_attribute => model.attributes.push(parse_attribute(item, input)?),
            Rule::field_def => {
                let field = parse_field(item, input)?;
                if model.get_field(field.name()).is_some() {
                    return Err(SchemaError::duplicate(
                        "field",
                        format!("{}.{}", model.name(), field.name()),
                    ));
                }
                model.add_field(field);
            }
            _ => {}
        }
    }

    Ok(model)
}

fn parse_field(pair: Pair<'_, Rule>, input: &str) -> SchemaResult<Field> {
    let span = span_of(&pair);
    let mut documentation = None;
    let mut name = None;
    let mut field_type = None;
    let mut modifier = TypeModifier::Required;
    let mut attributes = vec![];

    for item in pair.into_inner() {
        match item.as_rule() {
            Rule::documentation => documentation = Some(parse_documentation(item)),
            Rule::identifier => name = Some(Ident::new(item.as_str(), span_of(&item))),
            Rule::field_type => {
                let mut is_list = false;
                let mut is_optional = false;
                for part in item.into_inner() {
                    match part.as_rule() {
                        Rule::identifier => field_type = Some(FieldType::from_name(part.as_str())),
                        Rule::list_marker => is_list = true,
                        Rule::optional_marker => is_optional = true,
                        _ => {}
                    }
                }
                modifier = match (is_list, is_optional) {
                    (true, true) => TypeModifier::OptionalList,
                    (true, false) => TypeModifier::List,
                    (false, true) => TypeModifier::Optional,
                    (false, false) => TypeModifier::Required,
                };
            }
            Rule::field_attribute => attributes.push(parse_attribute(item, input)?),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| SchemaError::syntax(input, span.start, span.len(), "expected field name"))?;
    let field_type = field_type
        .ok_or_else(|| SchemaError::syntax(input, span.start, span.len(), "expected field type"))?;

    let mut field = Field::new(name, field_type, modifier, attributes, span);
    if let Some(doc) = documentation {
        field = field.with_documentation(doc);
    }
    Ok(field)
}

fn parse_attribute(pair: Pair<'_, Rule>, input: &str) -> SchemaResult<Attribute> {
    let span = span_of(&pair);
    let mut inner = pair.into_inner();
    let name_pair = next_pair(&mut inner, input, "attribute name")?;
    let name = Ident::new(name_pair.as_str(), span_of(&name_pair));

    // attribute_args > string_literal > string_inner
    let value = inner
        .next()
        .and_then(|args| args.into_inner().next())
        .and_then(|literal| literal.into_inner().next())
        .map(|s| s.as_str().to_string());

    Ok(Attribute::new(name, value, span))
}
