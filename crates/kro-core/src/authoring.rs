//! Completion catalogs and section-based dispatch.

use serde::Serialize;

use crate::context::{resolve_context, Section, SectionContext};
use crate::diagnostics::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompletionKind {
    Keyword,
    Property,
    Variable,
    Function,
}

/// One static completion entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletionCandidate {
    pub label: &'static str,
    pub kind: CompletionKind,
    pub detail: &'static str,
    pub documentation: &'static str,
    pub insert_text: &'static str,
}

const fn item(
    label: &'static str,
    kind: CompletionKind,
    detail: &'static str,
    documentation: &'static str,
    insert_text: &'static str,
) -> CompletionCandidate {
    CompletionCandidate {
        label,
        kind,
        detail,
        documentation,
        insert_text,
    }
}

use CompletionKind::{Function, Keyword, Property, Variable};

pub static TOP_LEVEL_ITEMS: &[CompletionCandidate] = &[
    item(
        "kind",
        Keyword,
        "Specifies the resource type",
        "Required field that must be set to 'ResourceGraphDefinition'",
        "kind: ResourceGraphDefinition",
    ),
    item(
        "apiVersion",
        Keyword,
        "API version for the resource",
        "Required field that must be set to 'kro.run/v1alpha1'",
        "apiVersion: kro.run/v1alpha1",
    ),
    item(
        "metadata",
        Keyword,
        "Resource metadata",
        "Contains metadata for the resource such as name and namespace",
        "metadata:\n  name: ",
    ),
    item(
        "spec",
        Keyword,
        "Resource specification",
        "Contains the core definition of the resource graph",
        "spec:\n  ",
    ),
];

pub static SPEC_ITEMS: &[CompletionCandidate] = &[
    item(
        "resources",
        Keyword,
        "Resource definitions",
        "Define the resources that make up your infrastructure",
        "resources:\n  ",
    ),
    item(
        "relations",
        Keyword,
        "Relation definitions",
        "Define the relations between resources",
        "relations:\n  ",
    ),
    item(
        "parameters",
        Keyword,
        "Parameter definitions",
        "Define input parameters for the resource graph",
        "parameters:\n  ",
    ),
];

pub static RESOURCE_ITEMS: &[CompletionCandidate] = &[
    item(
        "resource-name",
        Keyword,
        "Unique resource name",
        "Define a new resource with a unique identifier",
        "resource-name:\n  type: \n  template: ",
    ),
    item(
        "type",
        Property,
        "Resource type",
        "The Kubernetes API type of this resource",
        "type: ",
    ),
    item(
        "template",
        Property,
        "Resource template",
        "The YAML template for this resource",
        "template: |\n    ",
    ),
    item(
        "annotations",
        Property,
        "Resource annotations",
        "Metadata annotations for this resource",
        "annotations:\n    ",
    ),
];

pub static RELATION_ITEMS: &[CompletionCandidate] = &[
    item(
        "relation-name",
        Keyword,
        "Unique relation name",
        "Define a new relation with a unique identifier",
        "relation-name:\n  from: \n  to: ",
    ),
    item(
        "from",
        Property,
        "Relation source",
        "The source resource of this relation",
        "from: ",
    ),
    item(
        "to",
        Property,
        "Relation target",
        "The target resource of this relation",
        "to: ",
    ),
    item(
        "condition",
        Property,
        "Relation condition",
        "A CEL condition that must be true for this relation",
        "condition: ",
    ),
];

pub static PARAMETER_ITEMS: &[CompletionCandidate] = &[
    item(
        "parameter-name",
        Keyword,
        "Unique parameter name",
        "Define a new input parameter with a unique identifier",
        "parameter-name:\n  type: \n  default: ",
    ),
    item(
        "type",
        Property,
        "Parameter type",
        "The data type of this parameter (string, number, boolean, object, array)",
        "type: ",
    ),
    item(
        "default",
        Property,
        "Default value",
        "The default value for this parameter if not provided",
        "default: ",
    ),
    item(
        "description",
        Property,
        "Parameter description",
        "A description of this parameter's purpose and usage",
        "description: ",
    ),
];

pub static EXPRESSION_ITEMS: &[CompletionCandidate] = &[
    item("params", Variable, "Parameters object", "Access input parameters", "params."),
    item("resources", Variable, "Resources object", "Access defined resources", "resources."),
    item("relations", Variable, "Relations object", "Access defined relations", "relations."),
    item("has", Function, "CEL has() function", "Check if a field exists", "has("),
    item(
        "size",
        Function,
        "CEL size() function",
        "Get the size/length of a string, list, or map",
        "size(",
    ),
    item("string", Function, "CEL string() function", "Convert a value to string", "string("),
    item("int", Function, "CEL int() function", "Convert a value to integer", "int("),
    item("bool", Function, "CEL bool() function", "Convert a value to boolean", "bool("),
];

/// Catalog for a resolved section.
///
/// A top-level cursor whose line already starts a `spec:` entry gets the
/// spec catalog.
pub fn catalog_for(context: &SectionContext) -> &'static [CompletionCandidate] {
    match context.section {
        Section::TopLevel if context.line_prefix.contains("spec:") => SPEC_ITEMS,
        Section::TopLevel => TOP_LEVEL_ITEMS,
        Section::Spec => SPEC_ITEMS,
        Section::Resources => RESOURCE_ITEMS,
        Section::Relations => RELATION_ITEMS,
        Section::Parameters => PARAMETER_ITEMS,
        Section::Expression => EXPRESSION_ITEMS,
    }
}

/// Resolved context plus the catalog selected for it
#[derive(Debug, Clone)]
pub struct Completions {
    pub context: SectionContext,
    pub items: &'static [CompletionCandidate],
}

/// Resolve the cursor section and pick its completion catalog.
pub fn completion_candidates(content: &str, position: Position) -> Completions {
    let context = resolve_context(content, position);
    let items = catalog_for(&context);
    tracing::debug!(
        section = context.section.as_str(),
        items = items.len(),
        "resolved completion context"
    );
    Completions { context, items }
}
