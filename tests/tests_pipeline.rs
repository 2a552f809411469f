//! End-to-end pipeline tests: build states, partial-AST behavior on bad
//! input, serialization, and the seed scenarios.

mod helpers;

use helpers::*;
use sysmlc::ast::json::tree_to_json;
use sysmlc::core::diagnostics::codes;
use sysmlc::{BuildState, Model, NodeKind};

// =============================================================================
// BUILD STATES
// =============================================================================

#[test]
fn test_states_advance_monotonically() {
    let mut model = Model::new();
    model.add_document("a.sysml", "package A;");
    assert_eq!(model.document("a.sysml").unwrap().state, BuildState::Parsed);

    model.build_to("a.sysml", BuildState::IndexedContent);
    assert_eq!(
        model.document("a.sysml").unwrap().state,
        BuildState::IndexedContent
    );

    model.build_to("a.sysml", BuildState::Validated);
    assert_eq!(
        model.document("a.sysml").unwrap().state,
        BuildState::Validated
    );

    // Requesting an earlier state never regresses or reruns.
    model.build_to("a.sysml", BuildState::ComputedScopes);
    assert_eq!(
        model.document("a.sysml").unwrap().state,
        BuildState::Validated
    );
}

#[test]
fn test_stage_never_runs_twice() {
    let mut model = Model::new();
    model.add_document("a.sysml", "package P { part def A; part def A; }");
    model.build_to("a.sysml", BuildState::Validated);
    let first = model.document("a.sysml").unwrap().diagnostics.clone();

    // A second build request must not duplicate validation output.
    model.build_to("a.sysml", BuildState::Validated);
    assert_eq!(model.document("a.sysml").unwrap().diagnostics, first);
}

#[test]
fn test_prefix_of_pipeline_is_awaitable() {
    // A consumer may stop at any prefix of the stage sequence.
    let mut model = Model::new();
    model.add_document("a.sysml", "package A { part def X; }");
    model.build_to("a.sysml", BuildState::ComputedScopes);

    let doc = model.document("a.sysml").unwrap();
    assert!(doc.scopes.exports.contains_key("A::X"));
    assert!(!doc.scopes.local_scopes.is_empty());
    // Linking has not run: references are still unresolved.
    assert_eq!(doc.state, BuildState::ComputedScopes);
}

#[test]
fn test_batch_parse() {
    let mut model = Model::new();
    model.add_documents(vec![
        ("a.sysml".to_string(), "package A { part def X; }".to_string()),
        (
            "b.sysml".to_string(),
            "package B { part def Y :> A::X; }".to_string(),
        ),
        ("c.kerml".to_string(), "package C;".to_string()),
    ]);
    model.build_all();

    assert_eq!(model.len(), 3);
    for doc in model.documents() {
        assert_eq!(doc.state, BuildState::Validated);
        assert!(doc.is_valid(), "{} has errors", doc.uri);
    }

    let b = model.document("b.sysml").unwrap();
    let y = find_definition(b, "Y");
    let NodeKind::Definition { specializations, .. } = &b.arena.get(y).kind else {
        unreachable!()
    };
    assert!(b.arena.reference_target(specializations[0]).is_some());
}

// =============================================================================
// ERROR TOLERANCE
// =============================================================================

#[test]
fn test_document_with_syntax_errors_still_validates() {
    let doc = analyze_src("part def ( ; package P { part def A; part def A; }");
    // The parser error is present...
    assert!(doc
        .diagnostics
        .iter()
        .any(|d| d.code == Some(codes::PARSER_ERROR)));
    // ...and validation still ran on the partial AST.
    assert!(doc
        .diagnostics
        .iter()
        .any(|d| d.message.contains("Duplicate element name 'A'")));
    assert_eq!(doc.state, BuildState::Validated);
}

#[test]
fn test_unterminated_block_comment_single_error() {
    let doc = analyze_src("package P; /* never closed");
    let lexer_errors: Vec<_> = errors(&doc);
    assert_eq!(lexer_errors.len(), 1);
    assert!(lexer_errors[0].message.contains("unterminated block comment"));
}

#[test]
fn test_maximally_ill_formed_input_terminates() {
    // No hang, no panic; every token either parses or is skipped.
    let garbage = ":> :> ] ) } ; , :: def def { [ ( ??? !== package ".repeat(200);
    let doc = analyze_src(&garbage);
    assert!(!errors(&doc).is_empty());
    assert_eq!(doc.state, BuildState::Validated);
}

#[test]
fn test_deeply_nested_expression_terminates() {
    let mut source = String::from("attribute x = ");
    source.push_str(&"(".repeat(500));
    source.push('1');
    source.push_str(&")".repeat(500));
    source.push(';');
    let doc = analyze_src(&source);
    // Either parsed fine or depth-capped with an error; never a hang.
    assert_eq!(doc.state, BuildState::Validated);
}

// =============================================================================
// SERIALIZATION
// =============================================================================

#[test]
fn test_ast_export_with_and_without_types() {
    let doc = analyze_src("package P { part def A :> B; }");
    let tagged = tree_to_json(&doc.arena, doc.root, true);
    assert_eq!(tagged["$type"], "RootNamespace");
    let pkg = &tagged["elements"][0]["element"];
    assert_eq!(pkg["$type"], "Package");
    assert_eq!(pkg["name"], "P");
    assert_eq!(pkg["elements"][0]["element"]["$type"], "PartDefinition");

    let plain = tree_to_json(&doc.arena, doc.root, false);
    assert!(plain.get("$type").is_none());
    assert_eq!(plain["elements"][0]["element"]["name"], "P");
}

// =============================================================================
// SEED SCENARIOS
// =============================================================================

#[test]
fn scenario_keyword_as_identifier_regression() {
    let source = r#"
        package DomainEntities {
            item def SharedTypeRegistry {
                attribute package : String = "@car-dealership/shared-types";
            }
        }
    "#;
    let doc = analyze_src(source);
    assert!(doc.is_valid(), "diagnostics: {:#?}", doc.diagnostics);
}

#[test]
fn scenario_qualified_resolution() {
    let doc = analyze_src(
        "package A { package B { part def X; } } package C { part def Y :> A::B::X; }",
    );
    assert!(errors(&doc).is_empty());
    let y = find_definition(&doc, "Y");
    let x = find_definition(&doc, "X");
    assert_eq!(resolved_specializations(&doc, y), vec![x]);
}

#[test]
fn scenario_wildcard_import() {
    let doc = analyze_src(
        "package Lib { part def A; part def B; } \
         package App { import Lib::*; part def UseA :> A; part def UseB :> B; }",
    );
    assert!(errors(&doc).is_empty());
    assert_eq!(
        resolved_specializations(&doc, find_definition(&doc, "UseA")).len(),
        1
    );
    assert_eq!(
        resolved_specializations(&doc, find_definition(&doc, "UseB")).len(),
        1
    );
}

// =============================================================================
// SCOPE IDEMPOTENCE
// =============================================================================

#[test]
fn test_scope_computation_idempotent() {
    let doc = analyze_src("package A { import B::*; part def X; } package B { part def Y; }");
    let recomputed = sysmlc::compute_scopes(&doc.arena, doc.root);
    assert_eq!(doc.scopes, recomputed);
}
