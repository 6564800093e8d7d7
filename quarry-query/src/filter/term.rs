//! Term-level and structural filters.

use crate::options::{ScriptLang, TermsExecution};
use crate::path::FieldRef;
use crate::value::FilterValue;

/// Exact term match on one field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermFilter {
    /// Field to match.
    pub field: Option<FieldRef>,
    /// Term to match.
    pub value: Option<FilterValue>,
}

impl TermFilter {
    /// Create a term filter.
    pub fn new(field: impl Into<FieldRef>, value: impl Into<FilterValue>) -> Self {
        Self {
            field: Some(field.into()),
            value: Some(value.into()),
        }
    }

    /// Set the field.
    pub fn on_field(mut self, field: impl Into<FieldRef>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Set the term.
    pub fn value(mut self, value: impl Into<FilterValue>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// Match any of a set of terms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermsFilter {
    /// Field to match.
    pub field: Option<FieldRef>,
    /// Candidate terms, in order.
    pub terms: Vec<FilterValue>,
    /// Execution mode, passed through verbatim.
    pub execution: Option<TermsExecution>,
}

impl TermsFilter {
    /// Create a terms filter.
    pub fn new<I, V>(field: impl Into<FieldRef>, terms: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FilterValue>,
    {
        Self {
            field: Some(field.into()),
            terms: terms.into_iter().map(Into::into).collect(),
            execution: None,
        }
    }

    /// Set the execution mode.
    pub fn execution(mut self, execution: TermsExecution) -> Self {
        self.execution = Some(execution);
        self
    }
}

/// Documents where the field has a value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExistsFilter {
    /// Field to test.
    pub field: Option<FieldRef>,
}

impl ExistsFilter {
    /// Create an exists filter.
    pub fn new(field: impl Into<FieldRef>) -> Self {
        Self {
            field: Some(field.into()),
        }
    }
}

/// Documents where the field has no value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MissingFilter {
    /// Field to test.
    pub field: Option<FieldRef>,
    /// Match documents with no value at all.
    pub existence: Option<bool>,
    /// Match documents whose value is explicitly null.
    pub null_value: Option<bool>,
}

impl MissingFilter {
    /// Create a missing filter.
    pub fn new(field: impl Into<FieldRef>) -> Self {
        Self {
            field: Some(field.into()),
            ..Self::default()
        }
    }

    /// Set `existence`.
    pub fn existence(mut self, existence: bool) -> Self {
        self.existence = Some(existence);
        self
    }

    /// Set `null_value`.
    pub fn null_value(mut self, null_value: bool) -> Self {
        self.null_value = Some(null_value);
        self
    }
}

/// Terms starting with a prefix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrefixFilter {
    /// Field to match.
    pub field: Option<FieldRef>,
    /// Required prefix.
    pub prefix: Option<String>,
}

impl PrefixFilter {
    /// Create a prefix filter.
    pub fn new(field: impl Into<FieldRef>, prefix: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            prefix: Some(prefix.into()),
        }
    }
}

/// Terms matching a regular expression.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegexpFilter {
    /// Field to match.
    pub field: Option<FieldRef>,
    /// The expression.
    pub value: Option<String>,
    /// Engine flags such as `INTERSECTION|COMPLEMENT`.
    pub flags: Option<String>,
}

impl RegexpFilter {
    /// Set the field.
    pub fn on_field(mut self, field: impl Into<FieldRef>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Set the expression.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the flags.
    pub fn flags(mut self, flags: impl Into<String>) -> Self {
        self.flags = Some(flags.into());
        self
    }
}

/// Documents by type and id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdsFilter {
    /// Document types searched, in order.
    pub types: Vec<String>,
    /// Ids matched, in order.
    pub values: Vec<String>,
}

impl IdsFilter {
    /// Create an ids filter.
    pub fn new<T, V>(types: impl IntoIterator<Item = T>, values: impl IntoIterator<Item = V>) -> Self
    where
        T: Into<String>,
        V: Into<String>,
    {
        Self {
            types: types.into_iter().map(Into::into).collect(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Cap on the number of documents examined per shard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LimitFilter {
    /// The cap.
    pub value: u64,
}

impl LimitFilter {
    /// Create a limit filter.
    pub fn new(value: u64) -> Self {
        Self { value }
    }
}

/// Matches every document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchAllFilter;

/// Script predicate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptFilter {
    /// Script source.
    pub script: Option<String>,
    /// Named parameters, in insertion order.
    pub params: Vec<(String, FilterValue)>,
    /// Script language.
    pub lang: Option<ScriptLang>,
}

impl ScriptFilter {
    /// Set the script source.
    pub fn script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }

    /// Add a parameter. Adding an existing name replaces its value in place.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.params.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.params.push((name, value)),
        }
        self
    }

    /// Add several parameters.
    pub fn params<I, K, V>(self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FilterValue>,
    {
        params.into_iter().fold(self, |acc, (k, v)| acc.param(k, v))
    }

    /// Set the script language.
    pub fn lang(mut self, lang: ScriptLang) -> Self {
        self.lang = Some(lang);
        self
    }
}

/// Documents of one type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeFilter {
    /// Document type.
    pub value: Option<String>,
}

impl TypeFilter {
    /// Create a type filter.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }
}
