//! Grammar productions for SysML v2 / KerML.
//!
//! Split by construct family: namespace members, definitions and usages,
//! behavioral statements (actions, states, connectors), annotations, and
//! the expression precedence chain. Every production takes the parser by
//! mutable reference and allocates typed AST nodes directly.

mod actions;
mod annotations;
mod connectors;
mod definitions;
mod expressions;
mod helpers;
mod namespace;
mod states;
mod usages;

pub use expressions::parse_expression;
pub use namespace::parse_root;

use super::token_kind::TokenKind;

/// Keywords that introduce a definition or usage kind.
pub const KIND_KEYWORDS: &[TokenKind] = &[
    TokenKind::PART_KW,
    TokenKind::ITEM_KW,
    TokenKind::ATTRIBUTE_KW,
    TokenKind::ENUM_KW,
    TokenKind::ENUMERATION_KW,
    TokenKind::ACTION_KW,
    TokenKind::STATE_KW,
    TokenKind::CONSTRAINT_KW,
    TokenKind::REQUIREMENT_KW,
    TokenKind::PORT_KW,
    TokenKind::CONNECTION_KW,
    TokenKind::INTERFACE_KW,
    TokenKind::ALLOCATION_KW,
    TokenKind::CALC_KW,
    TokenKind::CASE_KW,
    TokenKind::ANALYSIS_KW,
    TokenKind::VERIFICATION_KW,
    TokenKind::USE_KW,
    TokenKind::VIEW_KW,
    TokenKind::VIEWPOINT_KW,
    TokenKind::RENDERING_KW,
    TokenKind::METADATA_KW,
    TokenKind::OCCURRENCE_KW,
    TokenKind::CONCERN_KW,
    TokenKind::SUBJECT_KW,
    TokenKind::ACTOR_KW,
    TokenKind::RETURN_KW,
    TokenKind::REQUIRE_KW,
];

/// Prefix modifiers accepted before a kind keyword.
pub const PREFIX_MODIFIERS: &[TokenKind] = &[
    TokenKind::ABSTRACT_KW,
    TokenKind::READONLY_KW,
    TokenKind::DERIVED_KW,
    TokenKind::REF_KW,
    TokenKind::END_KW,
    TokenKind::COMPOSITE_KW,
    TokenKind::PORTION_KW,
    TokenKind::VARIANT_KW,
    TokenKind::IN_KW,
    TokenKind::OUT_KW,
    TokenKind::INOUT_KW,
];

/// Tokens that can start a top-level declaration; recovery synchronises on
/// these in addition to `;` and `}`.
pub const DECL_START: &[TokenKind] = &[
    TokenKind::PACKAGE_KW,
    TokenKind::LIBRARY_KW,
    TokenKind::STANDARD_KW,
    TokenKind::NAMESPACE_KW,
    TokenKind::IMPORT_KW,
    TokenKind::ALIAS_KW,
    TokenKind::DEPENDENCY_KW,
    TokenKind::PUBLIC_KW,
    TokenKind::PRIVATE_KW,
    TokenKind::PROTECTED_KW,
    TokenKind::DOC_KW,
    TokenKind::COMMENT_KW,
    TokenKind::REP_KW,
    TokenKind::PART_KW,
    TokenKind::ITEM_KW,
    TokenKind::ATTRIBUTE_KW,
    TokenKind::ENUM_KW,
    TokenKind::ENUMERATION_KW,
    TokenKind::ACTION_KW,
    TokenKind::STATE_KW,
    TokenKind::CONSTRAINT_KW,
    TokenKind::REQUIREMENT_KW,
    TokenKind::PORT_KW,
    TokenKind::CONNECTION_KW,
    TokenKind::INTERFACE_KW,
    TokenKind::FLOW_KW,
    TokenKind::ALLOCATION_KW,
    TokenKind::CALC_KW,
    TokenKind::CASE_KW,
    TokenKind::ANALYSIS_KW,
    TokenKind::VERIFICATION_KW,
    TokenKind::VIEW_KW,
    TokenKind::VIEWPOINT_KW,
    TokenKind::RENDERING_KW,
    TokenKind::METADATA_KW,
    TokenKind::OCCURRENCE_KW,
    TokenKind::CONCERN_KW,
    TokenKind::TRANSITION_KW,
    TokenKind::SUCCESSION_KW,
    TokenKind::ENTRY_KW,
    TokenKind::EXIT_KW,
    TokenKind::PERFORM_KW,
    TokenKind::ACCEPT_KW,
    TokenKind::SEND_KW,
    TokenKind::ASSIGN_KW,
    TokenKind::ASSERT_KW,
    TokenKind::CONNECT_KW,
    TokenKind::BIND_KW,
    TokenKind::BINDING_KW,
];

/// Relationship clause keywords on a declaration head.
pub const RELATIONSHIP_KEYWORDS: &[TokenKind] = &[
    TokenKind::SPECIALIZES_KW,
    TokenKind::SUBSETS_KW,
    TokenKind::REDEFINES_KW,
    TokenKind::REFERENCES_KW,
    TokenKind::DISJOINT_KW,
    TokenKind::CONJUGATE_KW,
];
