//! Validator tests: the required checks and their exact messages.

mod helpers;

use helpers::*;
use sysmlc::core::diagnostics::Severity;

// =============================================================================
// DUPLICATE NAMES
// =============================================================================

#[test]
fn test_duplicate_packages_at_root() {
    let doc = analyze_src("package P; package P;");
    let errors = errors(&doc);
    assert_eq!(errors.len(), 2);
    for error in &errors {
        assert_eq!(error.message, "Duplicate element name: 'P'");
    }
    // Anchored at the respective nodes: two distinct ranges.
    assert_ne!(errors[0].range, errors[1].range);
}

#[test]
fn test_duplicate_in_package_reports_first_occurrence_once() {
    let doc = analyze_src("package P { part def A; part def A; }");
    let errors = errors(&doc);
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].message,
        "Duplicate element name 'A' in package 'P'"
    );
    // Anchored at the first occurrence.
    assert_eq!(errors[0].range.start.line, 0);
    let first_offset = "package P { ".len() as u32;
    assert_eq!(errors[0].range.start.offset, first_offset);
}

#[test]
fn test_duplicate_in_anonymous_package() {
    let doc = analyze_src("package { part def A; part def A; }");
    let errors = errors(&doc);
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].message,
        "Duplicate element name 'A' in package '<anonymous>'"
    );
}

#[test]
fn test_anonymous_elements_never_duplicate() {
    let doc = analyze_src("package P { part x : A; part y : A; part def A; }");
    assert!(errors(&doc).is_empty(), "errors: {:#?}", errors(&doc));

    let doc = analyze_src("package; package;");
    assert!(errors(&doc).is_empty(), "errors: {:#?}", errors(&doc));
}

#[test]
fn test_distinct_names_do_not_collide() {
    let doc = analyze_src("package P; package Q;");
    assert!(errors(&doc).is_empty());
}

#[test]
fn test_alias_name_participates_in_duplicates() {
    let doc = analyze_src("package P; alias P for Q;");
    let errors = errors(&doc);
    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .all(|e| e.message == "Duplicate element name: 'P'"));
}

// =============================================================================
// SELF-SPECIALIZATION
// =============================================================================

#[test]
fn test_self_specialization() {
    let doc = analyze_src("part def A :> A;");
    let errors = errors(&doc);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("cannot specialize itself"));
    assert_eq!(
        errors[0].message,
        "Part definition 'A' cannot specialize itself"
    );
}

#[test]
fn test_self_specialization_other_kinds() {
    let doc = analyze_src("action def Run :> Run;");
    let errors = errors(&doc);
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].message,
        "Action definition 'Run' cannot specialize itself"
    );
}

#[test]
fn test_qualified_self_name_is_not_self_specialization() {
    // Only a single-part name equal to the definition's own name counts.
    let doc = analyze_src("package P { part def A :> P::A; }");
    assert!(errors(&doc).is_empty(), "errors: {:#?}", errors(&doc));
}

#[test]
fn test_same_name_in_other_scope_allowed() {
    let doc = analyze_src("package Base { part def A; } package P { part def B :> A; }");
    assert!(errors(&doc).is_empty());
}

// =============================================================================
// HINTS
// =============================================================================

#[test]
fn test_empty_abstract_definition_hint() {
    let doc = analyze_src("abstract part def X { }");
    let hints = hints(&doc);
    assert_eq!(hints.len(), 1);
    assert_eq!(
        hints[0].message,
        "Abstract part definition 'X' has no members"
    );
    assert!(errors(&doc).is_empty());
}

#[test]
fn test_abstract_definition_with_members_no_hint() {
    let doc = analyze_src("abstract part def X { attribute a : Real; }");
    assert!(hints(&doc).is_empty());
}

#[test]
fn test_untyped_part_hint() {
    let doc = analyze_src("part def P { part x; }");
    let hints = hints(&doc);
    assert_eq!(hints.len(), 1);
    assert_eq!(hints[0].message, "Part 'x' has no explicit type");
}

#[test]
fn test_anonymous_part_exempt_from_type_hint() {
    let doc = analyze_src("part def T; part def P { part : T; }");
    assert!(hints(&doc).is_empty(), "hints: {:#?}", hints(&doc));
}

// =============================================================================
// MULTIPLICITY BOUNDS
// =============================================================================

#[test]
fn test_inverted_bounds() {
    let doc = analyze_src("part def P { part x [10..5]; }");
    let errors = errors(&doc);
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].message,
        "Lower bound (10) cannot be greater than upper bound (5)"
    );
}

#[test]
fn test_valid_bounds_pass() {
    for source in [
        "part def P { part x [5]; }",
        "part def P { part x [0..5]; }",
        "part def P { part x [2..*]; }",
        "part def P { part x [*]; }",
        "part def P { part x [3..3]; }",
    ] {
        let doc = analyze_src(source);
        assert!(
            errors(&doc).is_empty(),
            "{} -> {:#?}",
            source,
            errors(&doc)
        );
    }
}

#[test]
fn test_radix_bounds_compared_numerically() {
    let doc = analyze_src("part def P { part x [0x05..0x10]; }");
    assert!(errors(&doc).is_empty(), "errors: {:#?}", errors(&doc));

    let doc = analyze_src("part def P { part x [0x10..0x5]; }");
    let errors = errors(&doc);
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].message,
        "Lower bound (16) cannot be greater than upper bound (5)"
    );
}

#[test]
fn test_binary_and_octal_bounds() {
    let doc = analyze_src("part def P { part x [0b10..0o7]; }");
    assert!(errors(&doc).is_empty(), "errors: {:#?}", errors(&doc));
}

#[test]
fn test_negative_lower_bound() {
    let doc = analyze_src("part def P { part x [-1..5]; }");
    let errors = errors(&doc);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Lower bound (-1) cannot be negative");
}

// =============================================================================
// IDEMPOTENCE
// =============================================================================

#[test]
fn test_validation_is_deterministic() {
    let source = "package P { part def A; part def A; part x [5..2]; }";
    let first = analyze_src(source);
    let second = analyze_src(source);
    assert_eq!(first.diagnostics, second.diagnostics);
}

#[test]
fn test_all_checks_run_despite_failures() {
    // One document tripping several independent checks at once.
    let source = "package P { part def A; part def A; } part def B :> B; \
                  abstract part def C { } part def D { part u [9..1]; }";
    let doc = analyze_src(source);
    let messages: Vec<&str> = doc.diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert!(messages
        .iter()
        .any(|m| m.contains("Duplicate element name 'A'")));
    assert!(messages.iter().any(|m| m.contains("cannot specialize itself")));
    assert!(messages.iter().any(|m| m.contains("has no members")));
    assert!(messages
        .iter()
        .any(|m| m.contains("cannot be greater than upper bound")));
}

// =============================================================================
// SEVERITY MAPPING
// =============================================================================

#[test]
fn test_severity_levels() {
    let doc = analyze_src("part def P { part untyped; } part def Q :> Q;");
    assert!(doc
        .diagnostics
        .iter()
        .any(|d| d.severity == Severity::Error));
    assert!(doc.diagnostics.iter().any(|d| d.severity == Severity::Hint));
    assert!(!doc.is_valid());
}
