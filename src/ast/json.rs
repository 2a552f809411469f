//! AST serialization — a straight tree walk into `serde_json::Value`.
//!
//! Two flavours, matching the `export` contract: `ast` keeps the `$type`
//! discriminator on every object, `json` strips it. String tags exist only
//! here; the rest of the pipeline discriminates on the node tag.

use serde_json::{json, Map, Value};

use super::kinds::LiteralValue;
use super::{Arena, NodeId, NodeKind};

/// Serialize the subtree rooted at `id`.
pub fn node_to_json(arena: &Arena, id: NodeId, with_types: bool) -> Value {
    let node = arena.get(id);
    let mut obj = Map::new();
    if with_types {
        obj.insert("$type".into(), json!(node.kind.type_name()));
    }

    let child = |id: &NodeId| node_to_json(arena, *id, with_types);
    let child_opt = |id: &Option<NodeId>| match id {
        Some(id) => node_to_json(arena, *id, with_types),
        None => Value::Null,
    };
    let child_list =
        |ids: &[NodeId]| Value::Array(ids.iter().map(|id| child(id)).collect::<Vec<_>>());

    match &node.kind {
        NodeKind::RootNamespace { elements } => {
            obj.insert("elements".into(), child_list(elements));
        }
        NodeKind::Package {
            name,
            short_name,
            is_library,
            is_standard,
            elements,
        } => {
            obj.insert("name".into(), json!(name));
            if short_name.is_some() {
                obj.insert("shortName".into(), json!(short_name));
            }
            obj.insert("isLibrary".into(), json!(is_library));
            obj.insert("isStandard".into(), json!(is_standard));
            obj.insert("elements".into(), child_list(elements));
        }
        NodeKind::OwningMembership {
            visibility,
            element,
        } => {
            obj.insert("visibility".into(), json!(visibility));
            obj.insert("element".into(), child(element));
        }
        NodeKind::ImportMembership {
            visibility,
            is_all,
            import_ref,
        } => {
            obj.insert("visibility".into(), json!(visibility));
            obj.insert("isAll".into(), json!(is_all));
            obj.insert("importRef".into(), child(import_ref));
        }
        NodeKind::AliasMember {
            visibility,
            name,
            target,
        } => {
            obj.insert("visibility".into(), json!(visibility));
            obj.insert("name".into(), json!(name));
            obj.insert("target".into(), child(target));
        }
        NodeKind::QualifiedName { parts, .. } => {
            obj.insert("parts".into(), json!(parts));
        }
        NodeKind::ImportRef {
            path,
            is_wildcard,
            is_recursive,
        } => {
            obj.insert("path".into(), child(path));
            obj.insert("isWildcard".into(), json!(is_wildcard));
            obj.insert("isRecursive".into(), json!(is_recursive));
        }
        NodeKind::Definition {
            name,
            short_name,
            is_abstract,
            is_parallel,
            specializations,
            disjoint_from,
            conjugates,
            body,
            ..
        } => {
            obj.insert("name".into(), json!(name));
            if short_name.is_some() {
                obj.insert("shortName".into(), json!(short_name));
            }
            obj.insert("isAbstract".into(), json!(is_abstract));
            if *is_parallel {
                obj.insert("isParallel".into(), json!(true));
            }
            obj.insert("specializations".into(), child_list(specializations));
            if !disjoint_from.is_empty() {
                obj.insert("disjointFrom".into(), child_list(disjoint_from));
            }
            if conjugates.is_some() {
                obj.insert("conjugates".into(), child_opt(conjugates));
            }
            if let Some(body) = body {
                obj.insert("body".into(), child_list(body));
            }
        }
        NodeKind::Usage {
            name,
            short_name,
            direction,
            is_abstract,
            is_readonly,
            is_derived,
            is_end,
            is_ref,
            is_composite,
            is_portion,
            is_variant,
            is_parallel,
            is_conjugated,
            feature_types,
            multiplicity,
            specializations,
            subsets,
            redefines,
            references,
            value,
            body,
            ..
        } => {
            obj.insert("name".into(), json!(name));
            if short_name.is_some() {
                obj.insert("shortName".into(), json!(short_name));
            }
            if direction.is_some() {
                obj.insert("direction".into(), json!(direction));
            }
            for (key, set) in [
                ("isAbstract", is_abstract),
                ("isReadonly", is_readonly),
                ("isDerived", is_derived),
                ("isEnd", is_end),
                ("isRef", is_ref),
                ("isComposite", is_composite),
                ("isPortion", is_portion),
                ("isVariant", is_variant),
                ("isParallel", is_parallel),
                ("isConjugated", is_conjugated),
            ] {
                if *set {
                    obj.insert(key.into(), json!(true));
                }
            }
            obj.insert("featureTypes".into(), child_list(feature_types));
            if multiplicity.is_some() {
                obj.insert("multiplicity".into(), child_opt(multiplicity));
            }
            if !specializations.is_empty() {
                obj.insert("specializations".into(), child_list(specializations));
            }
            if !subsets.is_empty() {
                obj.insert("subsets".into(), child_list(subsets));
            }
            if !redefines.is_empty() {
                obj.insert("redefines".into(), child_list(redefines));
            }
            if !references.is_empty() {
                obj.insert("references".into(), child_list(references));
            }
            if let Some(value) = value {
                obj.insert("valueKind".into(), json!(value.kind));
                obj.insert("value".into(), child_opt(&value.expression));
            }
            if let Some(body) = body {
                obj.insert("body".into(), child_list(body));
            }
        }
        NodeKind::MultiplicityBounds { lower, upper } => {
            obj.insert("lowerBound".into(), json!(lower));
            obj.insert("upperBound".into(), json!(upper));
        }
        NodeKind::Dependency {
            name,
            clients,
            suppliers,
        } => {
            obj.insert("name".into(), json!(name));
            obj.insert("clients".into(), child_list(clients));
            obj.insert("suppliers".into(), child_list(suppliers));
        }
        NodeKind::Transition {
            name,
            source,
            accept,
            guard,
            effect,
            target,
        } => {
            obj.insert("name".into(), json!(name));
            obj.insert("source".into(), child_opt(source));
            obj.insert("accept".into(), child_opt(accept));
            obj.insert("guard".into(), child_opt(guard));
            obj.insert("effect".into(), child_opt(effect));
            obj.insert("target".into(), child_opt(target));
        }
        NodeKind::Succession { name, steps } => {
            obj.insert("name".into(), json!(name));
            obj.insert("steps".into(), child_list(steps));
        }
        NodeKind::Connector { name, source, target }
        | NodeKind::Binding { name, source, target } => {
            obj.insert("name".into(), json!(name));
            obj.insert("source".into(), child_opt(source));
            obj.insert("target".into(), child_opt(target));
        }
        NodeKind::Flow {
            name,
            payload,
            source,
            target,
        } => {
            obj.insert("name".into(), json!(name));
            obj.insert("payload".into(), child_opt(payload));
            obj.insert("source".into(), child_opt(source));
            obj.insert("target".into(), child_opt(target));
        }
        NodeKind::EntryAction { action }
        | NodeKind::ExitAction { action }
        | NodeKind::DoAction { action } => {
            obj.insert("action".into(), child_opt(action));
        }
        NodeKind::IfAction {
            condition,
            then_body,
            else_body,
        } => {
            obj.insert("condition".into(), child_opt(condition));
            obj.insert("then".into(), child_list(then_body));
            if let Some(else_body) = else_body {
                obj.insert("else".into(), child_list(else_body));
            }
        }
        NodeKind::WhileAction {
            condition,
            until,
            body,
        } => {
            obj.insert("condition".into(), child_opt(condition));
            if until.is_some() {
                obj.insert("until".into(), child_opt(until));
            }
            obj.insert("body".into(), child_list(body));
        }
        NodeKind::ForAction {
            var,
            sequence,
            body,
        } => {
            obj.insert("var".into(), json!(var));
            obj.insert("sequence".into(), child_opt(sequence));
            obj.insert("body".into(), child_list(body));
        }
        NodeKind::AssignAction { target, value } => {
            obj.insert("target".into(), child_opt(target));
            obj.insert("value".into(), child_opt(value));
        }
        NodeKind::SendAction { payload, via, to } => {
            obj.insert("payload".into(), child_opt(payload));
            obj.insert("via".into(), child_opt(via));
            obj.insert("to".into(), child_opt(to));
        }
        NodeKind::AcceptAction { name, payload, via } => {
            obj.insert("name".into(), json!(name));
            obj.insert("payload".into(), child_opt(payload));
            obj.insert("via".into(), child_opt(via));
        }
        NodeKind::PerformAction { target, body } => {
            obj.insert("target".into(), child_opt(target));
            if let Some(body) = body {
                obj.insert("body".into(), child_list(body));
            }
        }
        NodeKind::AssertAction { constraint } => {
            obj.insert("constraint".into(), child_opt(constraint));
        }
        NodeKind::Literal { value } => {
            let v = match value {
                LiteralValue::Bool(b) => json!(b),
                LiteralValue::Null => Value::Null,
                LiteralValue::Integer(i) => json!(i),
                LiteralValue::Real(r) => json!(r),
                LiteralValue::String(s) => json!(s),
            };
            obj.insert("value".into(), v);
        }
        NodeKind::Unary { op, operand } => {
            obj.insert("operator".into(), json!(op.symbol()));
            obj.insert("operand".into(), child(operand));
        }
        NodeKind::Binary { op, lhs, rhs } => {
            obj.insert("operator".into(), json!(op.symbol()));
            obj.insert("lhs".into(), child(lhs));
            obj.insert("rhs".into(), child(rhs));
        }
        NodeKind::Range { lower, upper } => {
            obj.insert("lower".into(), child(lower));
            obj.insert("upper".into(), child(upper));
        }
        NodeKind::Conditional {
            condition,
            then_branch,
            else_branch,
        } => {
            obj.insert("condition".into(), child(condition));
            obj.insert("then".into(), child(then_branch));
            obj.insert("else".into(), child_opt(else_branch));
        }
        NodeKind::Classification {
            op,
            operand,
            type_ref,
        } => {
            obj.insert("operator".into(), json!(op.symbol()));
            obj.insert("operand".into(), child_opt(operand));
            obj.insert("type".into(), child(type_ref));
        }
        NodeKind::FeatureChain { target, member } => {
            obj.insert("target".into(), child(target));
            obj.insert("member".into(), json!(member));
        }
        NodeKind::Invocation { callee, arguments } => {
            obj.insert("callee".into(), child(callee));
            obj.insert("arguments".into(), child_list(arguments));
        }
        NodeKind::NamedArgument { name, value } => {
            obj.insert("name".into(), json!(name));
            obj.insert("value".into(), child(value));
        }
        NodeKind::Extent { type_ref } => {
            obj.insert("type".into(), child(type_ref));
        }
        NodeKind::Paren { inner } => {
            obj.insert("inner".into(), child(inner));
        }
        NodeKind::Documentation { name, text } => {
            obj.insert("name".into(), json!(name));
            obj.insert("text".into(), json!(text));
        }
        NodeKind::Comment {
            name,
            about,
            language,
            text,
        } => {
            obj.insert("name".into(), json!(name));
            obj.insert("about".into(), child_list(about));
            obj.insert("language".into(), json!(language));
            obj.insert("text".into(), json!(text));
        }
        NodeKind::TextualRepresentation {
            name,
            language,
            text,
        } => {
            obj.insert("name".into(), json!(name));
            obj.insert("language".into(), json!(language));
            obj.insert("text".into(), json!(text));
        }
        NodeKind::MetadataUsage {
            name,
            metadata_type,
            is_prefix,
            body,
        } => {
            obj.insert("name".into(), json!(name));
            obj.insert("metadataType".into(), child_opt(metadata_type));
            obj.insert("isPrefix".into(), json!(is_prefix));
            if let Some(body) = body {
                obj.insert("body".into(), child_list(body));
            }
        }
    }

    Value::Object(obj)
}

/// Serialize a whole document tree from its root.
pub fn tree_to_json(arena: &Arena, root: NodeId, with_types: bool) -> Value {
    node_to_json(arena, root, with_types)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::kinds::DefKind;
    use crate::core::span::{Position, Span};

    #[test]
    fn test_type_tags_only_in_ast_mode() {
        let mut arena = Arena::new();
        let def = arena.alloc(
            NodeKind::Definition {
                def_kind: DefKind::Part,
                name: Some("Engine".into()),
                short_name: None,
                is_abstract: false,
                is_parallel: false,
                specializations: vec![],
                disjoint_from: vec![],
                conjugates: None,
                body: None,
            },
            Span::empty(Position::zero()),
        );

        let tagged = node_to_json(&arena, def, true);
        assert_eq!(tagged["$type"], "PartDefinition");
        assert_eq!(tagged["name"], "Engine");

        let plain = node_to_json(&arena, def, false);
        assert!(plain.get("$type").is_none());
        assert_eq!(plain["name"], "Engine");
    }
}
