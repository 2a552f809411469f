//! Parser tests: declaration shapes, bodies, expressions, recovery.

mod helpers;

use helpers::*;
use sysmlc::ast::{BinaryOp, DefKind, LiteralValue, UsageKind, ValueKind};
use sysmlc::parser::parse_source;
use sysmlc::NodeKind;

// =============================================================================
// BOUNDARY INPUTS
// =============================================================================

#[test]
fn test_empty_input() {
    let outcome = parse_source("");
    assert!(outcome.ok());
    let NodeKind::RootNamespace { elements } = &outcome.arena.get(outcome.root).kind else {
        panic!("root is not a namespace");
    };
    assert!(elements.is_empty());
}

#[test]
fn test_whitespace_only_input() {
    let outcome = parse_source("   \n\t  \r\n ");
    assert!(outcome.ok());
    assert!(outcome.arena.children(outcome.root).is_empty());
}

#[test]
fn test_comment_only_input() {
    let outcome = parse_source("// line\n/* block */\n");
    assert!(outcome.ok());
    assert!(outcome.arena.children(outcome.root).is_empty());
}

// =============================================================================
// PACKAGES
// =============================================================================

#[test]
fn test_simple_package() {
    let doc = analyze_ok("package Test;");
    let pkg = find_package(&doc, "Test");
    let NodeKind::Package {
        is_library,
        is_standard,
        elements,
        ..
    } = &doc.arena.get(pkg).kind
    else {
        unreachable!()
    };
    assert!(!is_library);
    assert!(!is_standard);
    assert!(elements.is_empty());
}

#[test]
fn test_library_package_flags() {
    let doc = analyze_ok("standard library package Scalars { part def Real; }");
    let pkg = find_package(&doc, "Scalars");
    let NodeKind::Package {
        is_library,
        is_standard,
        ..
    } = &doc.arena.get(pkg).kind
    else {
        unreachable!()
    };
    assert!(*is_library);
    assert!(*is_standard);
}

#[test]
fn test_standard_flag_alone() {
    let doc = analyze_ok("standard package X;");
    let pkg = find_package(&doc, "X");
    let NodeKind::Package {
        is_library,
        is_standard,
        ..
    } = &doc.arena.get(pkg).kind
    else {
        unreachable!()
    };
    assert!(*is_standard);
    assert!(!is_library);
}

#[test]
fn test_library_flag_alone() {
    let doc = analyze_ok("library package Y;");
    let pkg = find_package(&doc, "Y");
    let NodeKind::Package {
        is_library,
        is_standard,
        ..
    } = &doc.arena.get(pkg).kind
    else {
        unreachable!()
    };
    assert!(*is_library);
    assert!(!is_standard);
}

#[test]
fn test_anonymous_package() {
    let doc = analyze_ok("package { part def X; }");
    assert!(doc
        .arena
        .ids()
        .any(|id| matches!(&doc.arena.get(id).kind, NodeKind::Package { name: None, .. })));
}

#[test]
fn test_package_with_unrestricted_name() {
    let doc = analyze_ok("package 'Vehicle Model' { part def Car; }");
    find_package(&doc, "Vehicle Model");
}

// =============================================================================
// DEFINITIONS
// =============================================================================

#[test]
fn test_part_definition_with_specializations() {
    let doc = analyze_ok("part def Base; part def Mid; part def Child :> Base, Mid;");
    let child = find_definition(&doc, "Child");
    let NodeKind::Definition {
        def_kind,
        specializations,
        ..
    } = &doc.arena.get(child).kind
    else {
        unreachable!()
    };
    assert_eq!(*def_kind, DefKind::Part);
    assert_eq!(specializations.len(), 2);
}

#[test]
fn test_specializes_keyword_form() {
    let doc = analyze_ok("part def Base; part def Child specializes Base;");
    let child = find_definition(&doc, "Child");
    assert_eq!(resolved_specializations(&doc, child).len(), 1);
}

#[test]
fn test_abstract_definition_flag() {
    let doc = analyze_src("abstract part def Shape { part side; }");
    let shape = find_definition(&doc, "Shape");
    let NodeKind::Definition { is_abstract, .. } = &doc.arena.get(shape).kind else {
        unreachable!()
    };
    assert!(*is_abstract);
}

#[test]
fn test_definition_short_name() {
    let doc = analyze_ok("part def <PV> PhotovoltaicPanel;");
    let def = find_definition(&doc, "PhotovoltaicPanel");
    let NodeKind::Definition { short_name, .. } = &doc.arena.get(def).kind else {
        unreachable!()
    };
    assert_eq!(short_name.as_deref(), Some("PV"));
}

#[test]
fn test_enum_definition_variants() {
    let doc = analyze_ok("enum def Color { red; green; blue; }");
    let def = find_definition(&doc, "Color");
    let NodeKind::Definition { def_kind, body, .. } = &doc.arena.get(def).kind else {
        unreachable!()
    };
    assert_eq!(*def_kind, DefKind::Enumeration);
    let body = body.as_ref().unwrap();
    assert_eq!(body.len(), 3);
    for &member in body {
        let element = doc.arena.membership_element(member).unwrap();
        let NodeKind::Usage { usage_kind, .. } = &doc.arena.get(element).kind else {
            panic!("enum member is not a usage");
        };
        assert_eq!(*usage_kind, UsageKind::Enumeration);
    }
}

#[test]
fn test_state_definition_parallel() {
    let doc = analyze_ok("state def Operating parallel { state idle; state busy; }");
    let def = find_definition(&doc, "Operating");
    let NodeKind::Definition { is_parallel, .. } = &doc.arena.get(def).kind else {
        unreachable!()
    };
    assert!(*is_parallel);
}

#[test]
fn test_multi_keyword_kinds() {
    let doc = analyze_ok(
        "use case def Drive; analysis def Fuel; verification def Check; occurrence def Trip;",
    );
    for (name, kind) in [
        ("Drive", DefKind::UseCase),
        ("Fuel", DefKind::AnalysisCase),
        ("Check", DefKind::VerificationCase),
        ("Trip", DefKind::Occurrence),
    ] {
        let def = find_definition(&doc, name);
        let NodeKind::Definition { def_kind, .. } = &doc.arena.get(def).kind else {
            unreachable!()
        };
        assert_eq!(*def_kind, kind, "kind of {}", name);
    }
}

// =============================================================================
// USAGES
// =============================================================================

#[test]
fn test_part_usage_with_type() {
    let doc = analyze_ok("part def Engine; part engine : Engine;");
    let usage = find_usage(&doc, "engine");
    let NodeKind::Usage {
        usage_kind,
        feature_types,
        ..
    } = &doc.arena.get(usage).kind
    else {
        unreachable!()
    };
    assert_eq!(*usage_kind, UsageKind::Part);
    assert_eq!(feature_types.len(), 1);
}

#[test]
fn test_multiplicity_after_name() {
    let doc = analyze_src("part def Engine; part engines [2..*] : Engine;");
    let usage = find_usage(&doc, "engines");
    let NodeKind::Usage { multiplicity, .. } = &doc.arena.get(usage).kind else {
        unreachable!()
    };
    let NodeKind::MultiplicityBounds { lower, upper } = &doc.arena.get(multiplicity.unwrap()).kind
    else {
        panic!("expected bounds node");
    };
    assert_eq!(lower.as_deref(), Some("2"));
    assert_eq!(upper, "*");
}

#[test]
fn test_multiplicity_after_typing() {
    let doc = analyze_src("part def Wheel; part wheels : Wheel [4];");
    let usage = find_usage(&doc, "wheels");
    let NodeKind::Usage { multiplicity, .. } = &doc.arena.get(usage).kind else {
        unreachable!()
    };
    let NodeKind::MultiplicityBounds { lower, upper } = &doc.arena.get(multiplicity.unwrap()).kind
    else {
        panic!("expected bounds node");
    };
    assert_eq!(lower.as_deref(), None);
    assert_eq!(upper, "4");
}

#[test]
fn test_hex_multiplicity_preserved_as_lexeme() {
    let doc = analyze_src("part def P { part x [0x01..0xFF]; }");
    let usage = find_usage(&doc, "x");
    let NodeKind::Usage { multiplicity, .. } = &doc.arena.get(usage).kind else {
        unreachable!()
    };
    let NodeKind::MultiplicityBounds { lower, upper } = &doc.arena.get(multiplicity.unwrap()).kind
    else {
        panic!("expected bounds node");
    };
    assert_eq!(lower.as_deref(), Some("0x01"));
    assert_eq!(upper, "0xFF");
}

#[test]
fn test_usage_value_kinds() {
    let doc = analyze_src(
        "attribute a = 1; attribute b := 2; attribute c ::= 3;",
    );
    for (name, expected) in [
        ("a", ValueKind::Bound),
        ("b", ValueKind::Initial),
        ("c", ValueKind::Computed),
    ] {
        let usage = find_usage(&doc, name);
        let NodeKind::Usage { value, .. } = &doc.arena.get(usage).kind else {
            unreachable!()
        };
        let value = value.as_ref().unwrap();
        assert_eq!(value.kind, expected, "value kind of {}", name);
        assert!(value.expression.is_some());
    }
}

#[test]
fn test_usage_modifiers_and_direction() {
    let doc = analyze_src("in readonly derived attribute limit : Real;");
    let usage = find_usage(&doc, "limit");
    let NodeKind::Usage {
        direction,
        is_readonly,
        is_derived,
        ..
    } = &doc.arena.get(usage).kind
    else {
        unreachable!()
    };
    assert!(direction.is_some());
    assert!(*is_readonly);
    assert!(*is_derived);
}

#[test]
fn test_redefinition_and_subsetting() {
    let doc = analyze_src(
        "part def Base { part b; } part def Sub :> Base { part c :>> b; part d :> b; }",
    );
    let c = find_usage(&doc, "c");
    let NodeKind::Usage { redefines, .. } = &doc.arena.get(c).kind else {
        unreachable!()
    };
    assert_eq!(redefines.len(), 1);
    let d = find_usage(&doc, "d");
    let NodeKind::Usage { subsets, .. } = &doc.arena.get(d).kind else {
        unreachable!()
    };
    assert_eq!(subsets.len(), 1);
}

#[test]
fn test_conjugated_port() {
    let doc = analyze_src("port def PowerPort; part def Load { port input : ~PowerPort; }");
    let usage = find_usage(&doc, "input");
    let NodeKind::Usage { is_conjugated, .. } = &doc.arena.get(usage).kind else {
        unreachable!()
    };
    assert!(*is_conjugated);
}

#[test]
fn test_nested_redefinition_shorthand_in_body() {
    // Must parse cleanly, and never hang on the nested shorthand.
    let doc = analyze_src("part def Server { part config { :>> port = 3000; } }");
    assert!(errors(&doc).is_empty(), "errors: {:#?}", errors(&doc));
    let config = find_usage(&doc, "config");
    let NodeKind::Usage { body, .. } = &doc.arena.get(config).kind else {
        unreachable!()
    };
    let body = body.as_ref().unwrap();
    assert_eq!(body.len(), 1);
    let shorthand = doc.arena.membership_element(body[0]).unwrap();
    let NodeKind::Usage {
        usage_kind,
        redefines,
        value,
        ..
    } = &doc.arena.get(shorthand).kind
    else {
        panic!("expected shorthand usage");
    };
    assert_eq!(*usage_kind, UsageKind::Reference);
    assert_eq!(redefines.len(), 1);
    assert!(value.is_some());
}

// =============================================================================
// ANNOTATIONS
// =============================================================================

#[test]
fn test_documentation_text() {
    let doc = analyze_ok("part def Engine { doc /** Converts fuel to motion. */ }");
    let text = doc.arena.ids().find_map(|id| match &doc.arena.get(id).kind {
        NodeKind::Documentation { text, .. } => Some(text.clone()),
        _ => None,
    });
    assert_eq!(text.as_deref(), Some("Converts fuel to motion."));
}

#[test]
fn test_comment_with_about() {
    let doc = analyze_ok(
        "package P { part def A; part def B; comment about A, B /** Shared note. */ }",
    );
    let found = doc.arena.ids().find_map(|id| match &doc.arena.get(id).kind {
        NodeKind::Comment { about, text, .. } => Some((about.len(), text.clone())),
        _ => None,
    });
    let (about_count, text) = found.expect("comment node missing");
    assert_eq!(about_count, 2);
    assert_eq!(text, "Shared note.");
}

#[test]
fn test_textual_representation() {
    let doc = analyze_ok(r#"constraint def C { rep inOcl language "ocl" /** self.x > 0 */ }"#);
    let found = doc.arena.ids().any(|id| {
        matches!(
            &doc.arena.get(id).kind,
            NodeKind::TextualRepresentation { language: Some(l), .. } if l == "ocl"
        )
    });
    assert!(found);
}

#[test]
fn test_metadata_forms() {
    let doc = analyze_src("metadata def Safety; #Safety part def Brake; @Safety { }");
    assert!(errors(&doc).is_empty(), "errors: {:#?}", errors(&doc));
    let prefix_count = doc
        .arena
        .ids()
        .filter(|&id| {
            matches!(
                &doc.arena.get(id).kind,
                NodeKind::MetadataUsage { is_prefix: true, .. }
            )
        })
        .count();
    assert_eq!(prefix_count, 1);
}

// =============================================================================
// BEHAVIORAL MEMBERS
// =============================================================================

#[test]
fn test_transition_all_segments() {
    let doc = analyze_src(
        "state def Door { state closed; state open; transition t1 first closed accept openCmd if ready do action unlock then open; }",
    );
    assert!(errors(&doc).is_empty(), "errors: {:#?}", errors(&doc));
    let transition = doc.arena.ids().find_map(|id| match &doc.arena.get(id).kind {
        NodeKind::Transition {
            name,
            source,
            accept,
            guard,
            effect,
            target,
        } => Some((
            name.clone(),
            source.is_some(),
            accept.is_some(),
            guard.is_some(),
            effect.is_some(),
            target.is_some(),
        )),
        _ => None,
    });
    let (name, source, accept, guard, effect, target) = transition.expect("no transition");
    assert_eq!(name.as_deref(), Some("t1"));
    assert!(source && accept && guard && effect && target);
}

#[test]
fn test_transition_segments_commute() {
    let doc = analyze_src(
        "state def Door { state a; state b; transition first a then b accept evt; }",
    );
    assert!(errors(&doc).is_empty(), "errors: {:#?}", errors(&doc));
}

#[test]
fn test_succession() {
    let doc = analyze_src("action def Flow { action s1; action s2; first s1 then s2; }");
    assert!(errors(&doc).is_empty(), "errors: {:#?}", errors(&doc));
    let steps = doc.arena.ids().find_map(|id| match &doc.arena.get(id).kind {
        NodeKind::Succession { steps, .. } => Some(steps.len()),
        _ => None,
    });
    assert_eq!(steps, Some(2));
}

#[test]
fn test_state_entry_exit_do() {
    let doc = analyze_src(
        "state def S { entry action init; do action work; exit action cleanup; }",
    );
    assert!(errors(&doc).is_empty(), "errors: {:#?}", errors(&doc));
    assert!(doc
        .arena
        .ids()
        .any(|id| matches!(&doc.arena.get(id).kind, NodeKind::EntryAction { action: Some(_) })));
    assert!(doc
        .arena
        .ids()
        .any(|id| matches!(&doc.arena.get(id).kind, NodeKind::DoAction { action: Some(_) })));
    assert!(doc
        .arena
        .ids()
        .any(|id| matches!(&doc.arena.get(id).kind, NodeKind::ExitAction { action: Some(_) })));
}

#[test]
fn test_action_statements() {
    let doc = analyze_src(
        "action def Proc {\n\
         accept go : Start via port1;\n\
         send done via port1 to controller;\n\
         assign x := 42;\n\
         assert x > 0;\n\
         perform action helper;\n\
         }",
    );
    assert!(errors(&doc).is_empty(), "errors: {:#?}", errors(&doc));
    assert!(doc
        .arena
        .ids()
        .any(|id| matches!(&doc.arena.get(id).kind, NodeKind::AcceptAction { .. })));
    assert!(doc
        .arena
        .ids()
        .any(|id| matches!(&doc.arena.get(id).kind, NodeKind::SendAction { .. })));
    assert!(doc
        .arena
        .ids()
        .any(|id| matches!(&doc.arena.get(id).kind, NodeKind::AssignAction { .. })));
    assert!(doc
        .arena
        .ids()
        .any(|id| matches!(&doc.arena.get(id).kind, NodeKind::AssertAction { .. })));
    assert!(doc
        .arena
        .ids()
        .any(|id| matches!(&doc.arena.get(id).kind, NodeKind::PerformAction { .. })));
}

#[test]
fn test_control_actions() {
    let doc = analyze_src(
        "action def Ctl {\n\
         if x > 0 { assign y := 1; } else if x < 0 { assign y := 2; } else { assign y := 0; }\n\
         while y < 10 { assign y := y + 1; }\n\
         for i in 1..5 { send i; }\n\
         }",
    );
    assert!(errors(&doc).is_empty(), "errors: {:#?}", errors(&doc));
    assert!(doc
        .arena
        .ids()
        .any(|id| matches!(&doc.arena.get(id).kind, NodeKind::IfAction { .. })));
    assert!(doc
        .arena
        .ids()
        .any(|id| matches!(&doc.arena.get(id).kind, NodeKind::WhileAction { .. })));
    assert!(doc
        .arena
        .ids()
        .any(|id| matches!(&doc.arena.get(id).kind, NodeKind::ForAction { .. })));
}

#[test]
fn test_connectors() {
    let doc = analyze_src(
        "part def Sys { part a; part b; connect a.out1 to b.in1; bind a = b; flow of Fuel from a.tank to b.engine; }",
    );
    assert!(errors(&doc).is_empty(), "errors: {:#?}", errors(&doc));
    assert!(doc
        .arena
        .ids()
        .any(|id| matches!(&doc.arena.get(id).kind, NodeKind::Connector { .. })));
    assert!(doc
        .arena
        .ids()
        .any(|id| matches!(&doc.arena.get(id).kind, NodeKind::Binding { .. })));
    assert!(doc.arena.ids().any(|id| matches!(
        &doc.arena.get(id).kind,
        NodeKind::Flow { payload: Some(_), source: Some(_), target: Some(_), .. }
    )));
}

// =============================================================================
// EXPRESSIONS
// =============================================================================

fn value_expr(doc: &sysmlc::Document, usage_name: &str) -> sysmlc::NodeId {
    let usage = find_usage(doc, usage_name);
    let NodeKind::Usage { value, .. } = &doc.arena.get(usage).kind else {
        unreachable!()
    };
    value.as_ref().unwrap().expression.unwrap()
}

#[test]
fn test_precedence_additive_vs_multiplicative() {
    let doc = analyze_src("attribute x = 1 + 2 * 3;");
    let expr = value_expr(&doc, "x");
    let NodeKind::Binary { op, rhs, .. } = &doc.arena.get(expr).kind else {
        panic!("expected binary expression");
    };
    assert_eq!(*op, BinaryOp::Add);
    assert!(matches!(
        &doc.arena.get(*rhs).kind,
        NodeKind::Binary {
            op: BinaryOp::Multiply,
            ..
        }
    ));
}

#[test]
fn test_power_right_associative() {
    let doc = analyze_src("attribute x = 2 ** 3 ** 2;");
    let expr = value_expr(&doc, "x");
    let NodeKind::Binary { op, lhs, rhs } = &doc.arena.get(expr).kind else {
        panic!("expected binary expression");
    };
    assert_eq!(*op, BinaryOp::Power);
    // Right-assoc: lhs is the literal 2, rhs is 3 ** 2.
    assert!(matches!(
        &doc.arena.get(*lhs).kind,
        NodeKind::Literal {
            value: LiteralValue::Integer(2)
        }
    ));
    assert!(matches!(
        &doc.arena.get(*rhs).kind,
        NodeKind::Binary {
            op: BinaryOp::Power,
            ..
        }
    ));
}

#[test]
fn test_conditional_and_null_coalescing() {
    let doc = analyze_src("attribute x = a > 0 ? b ?? 1 : c;");
    let expr = value_expr(&doc, "x");
    assert!(matches!(
        &doc.arena.get(expr).kind,
        NodeKind::Conditional { .. }
    ));
}

#[test]
fn test_range_and_classification() {
    let doc = analyze_src("attribute r = 1..10; attribute t = v istype Vector;");
    assert!(matches!(
        &doc.arena.get(value_expr(&doc, "r")).kind,
        NodeKind::Range { .. }
    ));
    assert!(matches!(
        &doc.arena.get(value_expr(&doc, "t")).kind,
        NodeKind::Classification { .. }
    ));
}

#[test]
fn test_invocation_and_feature_chain() {
    let doc = analyze_src("attribute x = geometry.area(width = 3, 4);");
    let expr = value_expr(&doc, "x");
    let NodeKind::Invocation { callee, arguments } = &doc.arena.get(expr).kind else {
        panic!("expected invocation");
    };
    assert!(matches!(
        &doc.arena.get(*callee).kind,
        NodeKind::FeatureChain { member, .. } if member == "area"
    ));
    assert_eq!(arguments.len(), 2);
    assert!(matches!(
        &doc.arena.get(arguments[0]).kind,
        NodeKind::NamedArgument { name, .. } if name == "width"
    ));
}

#[test]
fn test_extent_and_unary() {
    let doc = analyze_src("attribute e = all Vehicles; attribute n = -x + not y;");
    assert!(matches!(
        &doc.arena.get(value_expr(&doc, "e")).kind,
        NodeKind::Extent { .. }
    ));
}

#[test]
fn test_literal_radixes_in_expressions() {
    let doc = analyze_src("attribute x = 0xFF + 0b101 + 0o17 + 1.5e2;");
    assert!(errors(&doc).is_empty(), "errors: {:#?}", errors(&doc));
}

// =============================================================================
// ERROR RECOVERY
// =============================================================================

#[test]
fn test_recovery_keeps_later_declarations() {
    let doc = analyze_src("part def = ; part def Good;");
    assert!(!errors(&doc).is_empty());
    // The partial AST still contains the following declaration.
    find_definition(&doc, "Good");
}

#[test]
fn test_mismatched_braces_terminate() {
    let doc = analyze_src("package P { part def A { } ");
    assert!(!errors(&doc).is_empty());
    find_definition(&doc, "A");
}

#[test]
fn test_recovery_leaves_enclosing_brace_alone() {
    // Inner has no body; recovery must not consume Outer's closing brace,
    // and the sibling after Outer must stay at the root.
    let doc = analyze_src("package Outer { package Inner } package After;");
    assert_eq!(errors(&doc).len(), 1, "errors: {:#?}", errors(&doc));

    let outer = find_package(&doc, "Outer");
    find_package(&doc, "Inner");
    let after = find_package(&doc, "After");
    assert!(
        !doc.arena.ancestors(after).any(|a| a == outer),
        "After was swallowed into Outer"
    );
}

#[test]
fn test_stray_closing_brace() {
    let doc = analyze_src("} package P;");
    assert!(!errors(&doc).is_empty());
    find_package(&doc, "P");
}

#[test]
fn test_garbage_between_declarations() {
    let doc = analyze_src("part def A; ### ??? ; part def B;");
    find_definition(&doc, "A");
    find_definition(&doc, "B");
}

// =============================================================================
// CONTAINER BACK-LINKS
// =============================================================================

#[test]
fn test_container_backlinks_consistent() {
    let doc = analyze_ok(
        "package Vehicles {\n\
         part def Vehicle { attribute mass : Real = 1000.0; part engine : Engine; }\n\
         part def Engine;\n\
         }",
    );
    for id in doc.arena.ids() {
        for child in doc.arena.children(id) {
            assert_eq!(
                doc.arena.get(child).parent,
                Some(id),
                "child {:?} of {:?} has wrong parent",
                child,
                id
            );
        }
        if let Some(parent) = doc.arena.get(id).parent {
            assert!(
                doc.arena.children(parent).contains(&id),
                "node {:?} missing from its container's children",
                id
            );
        }
    }
}
