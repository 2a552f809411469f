//! Arena-backed abstract syntax tree.
//!
//! Every document owns one `Arena`; nodes are owned exclusively by their
//! parent through `NodeId` indices, and the `$container` back-link is a
//! non-owning parent id assigned after construction. Discrimination is a
//! tag, never a string: `$type` names exist only in `ast::json`.

pub mod json;
pub mod kinds;

pub use kinds::{
    BinaryOp, ClassificationOp, DefKind, Direction, LiteralValue, UnaryOp, UsageKind, ValueKind,
    Visibility,
};

use crate::core::span::Span;

/// Index of a node in its document's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Resolved target of a reference: a node, possibly in another document.
/// `document` is `None` for same-document targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefTarget {
    pub document: Option<String>,
    pub node: NodeId,
}

impl RefTarget {
    pub fn local(node: NodeId) -> Self {
        Self {
            document: None,
            node,
        }
    }

    pub fn foreign(document: impl Into<String>, node: NodeId) -> Self {
        Self {
            document: Some(document.into()),
            node,
        }
    }
}

/// A usage's value binding (`= e`, `:= e`, `::= e`).
#[derive(Debug, Clone, PartialEq)]
pub struct ValueBinding {
    pub kind: ValueKind,
    pub expression: Option<NodeId>,
}

/// One AST node: a tag with payload, a source span, and a parent back-link.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    pub parent: Option<NodeId>,
}

/// The closed set of node kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    // =========================================================================
    // ROOT & NAMESPACES
    // =========================================================================
    RootNamespace {
        elements: Vec<NodeId>,
    },
    Package {
        name: Option<String>,
        short_name: Option<String>,
        is_library: bool,
        is_standard: bool,
        elements: Vec<NodeId>,
    },
    OwningMembership {
        visibility: Option<Visibility>,
        element: NodeId,
    },
    ImportMembership {
        visibility: Option<Visibility>,
        is_all: bool,
        import_ref: NodeId,
    },
    AliasMember {
        visibility: Option<Visibility>,
        name: String,
        target: NodeId,
    },

    // =========================================================================
    // REFERENCES
    // =========================================================================
    QualifiedName {
        parts: Vec<String>,
        target: Option<RefTarget>,
    },
    ImportRef {
        path: NodeId,
        is_wildcard: bool,
        is_recursive: bool,
    },

    // =========================================================================
    // DEFINITIONS & USAGES
    // =========================================================================
    Definition {
        def_kind: DefKind,
        name: Option<String>,
        short_name: Option<String>,
        is_abstract: bool,
        /// `state def ... parallel`
        is_parallel: bool,
        specializations: Vec<NodeId>,
        disjoint_from: Vec<NodeId>,
        conjugates: Option<NodeId>,
        body: Option<Vec<NodeId>>,
    },
    Usage {
        usage_kind: UsageKind,
        name: Option<String>,
        short_name: Option<String>,
        direction: Option<Direction>,
        is_abstract: bool,
        is_readonly: bool,
        is_derived: bool,
        is_end: bool,
        is_ref: bool,
        is_composite: bool,
        is_portion: bool,
        is_variant: bool,
        is_parallel: bool,
        /// `: ~Port` conjugated typing
        is_conjugated: bool,
        feature_types: Vec<NodeId>,
        multiplicity: Option<NodeId>,
        specializations: Vec<NodeId>,
        subsets: Vec<NodeId>,
        redefines: Vec<NodeId>,
        references: Vec<NodeId>,
        value: Option<ValueBinding>,
        body: Option<Vec<NodeId>>,
    },
    MultiplicityBounds {
        /// Bound lexemes as written (`0x10`, `*`); validated, not parsed here.
        lower: Option<String>,
        upper: String,
    },
    Dependency {
        name: Option<String>,
        clients: Vec<NodeId>,
        suppliers: Vec<NodeId>,
    },

    // =========================================================================
    // BEHAVIORAL
    // =========================================================================
    Transition {
        name: Option<String>,
        source: Option<NodeId>,
        accept: Option<NodeId>,
        guard: Option<NodeId>,
        effect: Option<NodeId>,
        target: Option<NodeId>,
    },
    Succession {
        name: Option<String>,
        steps: Vec<NodeId>,
    },
    Connector {
        name: Option<String>,
        source: Option<NodeId>,
        target: Option<NodeId>,
    },
    Binding {
        name: Option<String>,
        source: Option<NodeId>,
        target: Option<NodeId>,
    },
    Flow {
        name: Option<String>,
        payload: Option<NodeId>,
        source: Option<NodeId>,
        target: Option<NodeId>,
    },
    EntryAction {
        action: Option<NodeId>,
    },
    ExitAction {
        action: Option<NodeId>,
    },
    DoAction {
        action: Option<NodeId>,
    },
    IfAction {
        condition: Option<NodeId>,
        then_body: Vec<NodeId>,
        else_body: Option<Vec<NodeId>>,
    },
    WhileAction {
        condition: Option<NodeId>,
        until: Option<NodeId>,
        body: Vec<NodeId>,
    },
    ForAction {
        var: Option<String>,
        sequence: Option<NodeId>,
        body: Vec<NodeId>,
    },
    AssignAction {
        target: Option<NodeId>,
        value: Option<NodeId>,
    },
    SendAction {
        payload: Option<NodeId>,
        via: Option<NodeId>,
        to: Option<NodeId>,
    },
    AcceptAction {
        name: Option<String>,
        payload: Option<NodeId>,
        via: Option<NodeId>,
    },
    PerformAction {
        target: Option<NodeId>,
        body: Option<Vec<NodeId>>,
    },
    AssertAction {
        constraint: Option<NodeId>,
    },

    // =========================================================================
    // EXPRESSIONS
    // =========================================================================
    Literal {
        value: LiteralValue,
    },
    Unary {
        op: UnaryOp,
        operand: NodeId,
    },
    Binary {
        op: BinaryOp,
        lhs: NodeId,
        rhs: NodeId,
    },
    Range {
        lower: NodeId,
        upper: NodeId,
    },
    Conditional {
        condition: NodeId,
        then_branch: NodeId,
        else_branch: Option<NodeId>,
    },
    Classification {
        op: ClassificationOp,
        /// `None` for the prefix form (`hastype T` with implicit subject).
        operand: Option<NodeId>,
        type_ref: NodeId,
    },
    FeatureChain {
        target: NodeId,
        member: String,
    },
    Invocation {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    NamedArgument {
        name: String,
        value: NodeId,
    },
    Extent {
        type_ref: NodeId,
    },
    Paren {
        inner: NodeId,
    },

    // =========================================================================
    // ANNOTATIONS & METADATA
    // =========================================================================
    Documentation {
        name: Option<String>,
        text: String,
    },
    Comment {
        name: Option<String>,
        about: Vec<NodeId>,
        language: Option<String>,
        text: String,
    },
    TextualRepresentation {
        name: Option<String>,
        language: Option<String>,
        text: String,
    },
    MetadataUsage {
        name: Option<String>,
        metadata_type: Option<NodeId>,
        is_prefix: bool,
        body: Option<Vec<NodeId>>,
    },
}

impl NodeKind {
    /// `$type` tag for serialization (only used at the JSON boundary).
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::RootNamespace { .. } => "RootNamespace",
            NodeKind::Package { .. } => "Package",
            NodeKind::OwningMembership { .. } => "OwningMembership",
            NodeKind::ImportMembership { .. } => "ImportMembership",
            NodeKind::AliasMember { .. } => "AliasMember",
            NodeKind::QualifiedName { .. } => "QualifiedName",
            NodeKind::ImportRef { .. } => "ImportRef",
            NodeKind::Definition { def_kind, .. } => def_kind.type_name(),
            NodeKind::Usage { usage_kind, .. } => usage_kind.type_name(),
            NodeKind::MultiplicityBounds { .. } => "MultiplicityBounds",
            NodeKind::Dependency { .. } => "Dependency",
            NodeKind::Transition { .. } => "Transition",
            NodeKind::Succession { .. } => "Succession",
            NodeKind::Connector { .. } => "Connector",
            NodeKind::Binding { .. } => "Binding",
            NodeKind::Flow { .. } => "Flow",
            NodeKind::EntryAction { .. } => "EntryAction",
            NodeKind::ExitAction { .. } => "ExitAction",
            NodeKind::DoAction { .. } => "DoAction",
            NodeKind::IfAction { .. } => "IfAction",
            NodeKind::WhileAction { .. } => "WhileAction",
            NodeKind::ForAction { .. } => "ForAction",
            NodeKind::AssignAction { .. } => "AssignAction",
            NodeKind::SendAction { .. } => "SendAction",
            NodeKind::AcceptAction { .. } => "AcceptAction",
            NodeKind::PerformAction { .. } => "PerformAction",
            NodeKind::AssertAction { .. } => "AssertAction",
            NodeKind::Literal { .. } => "LiteralExpression",
            NodeKind::Unary { .. } => "UnaryExpression",
            NodeKind::Binary { .. } => "BinaryExpression",
            NodeKind::Range { .. } => "RangeExpression",
            NodeKind::Conditional { .. } => "ConditionalExpression",
            NodeKind::Classification { .. } => "ClassificationExpression",
            NodeKind::FeatureChain { .. } => "FeatureChainExpression",
            NodeKind::Invocation { .. } => "InvocationExpression",
            NodeKind::NamedArgument { .. } => "NamedArgument",
            NodeKind::Extent { .. } => "ExtentExpression",
            NodeKind::Paren { .. } => "ParenthesizedExpression",
            NodeKind::Documentation { .. } => "Documentation",
            NodeKind::Comment { .. } => "Comment",
            NodeKind::TextualRepresentation { .. } => "TextualRepresentation",
            NodeKind::MetadataUsage { .. } => "MetadataUsage",
        }
    }
}

/// The per-document node store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node {
            kind,
            span,
            parent: None,
        });
        id
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all node ids in allocation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId::new)
    }

    pub fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        self.nodes[child.index()].parent = Some(parent);
    }

    /// Assign `parent` as the container of every child reachable from it.
    pub fn adopt(&mut self, parent: NodeId) {
        for child in self.children(parent) {
            self.set_parent(child, parent);
        }
    }

    // =========================================================================
    // STRUCTURAL ACCESSORS
    // =========================================================================

    /// All direct children of a node, in source order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let push = |out: &mut Vec<NodeId>, id: &NodeId| out.push(*id);
        let push_opt = |out: &mut Vec<NodeId>, id: &Option<NodeId>| {
            if let Some(id) = id {
                out.push(*id);
            }
        };
        let push_all = |out: &mut Vec<NodeId>, ids: &[NodeId]| out.extend_from_slice(ids);

        match &self.get(id).kind {
            NodeKind::RootNamespace { elements } | NodeKind::Package { elements, .. } => {
                push_all(&mut out, elements)
            }
            NodeKind::OwningMembership { element, .. } => push(&mut out, element),
            NodeKind::ImportMembership { import_ref, .. } => push(&mut out, import_ref),
            NodeKind::AliasMember { target, .. } => push(&mut out, target),
            NodeKind::QualifiedName { .. } => {}
            NodeKind::ImportRef { path, .. } => push(&mut out, path),
            NodeKind::Definition {
                specializations,
                disjoint_from,
                conjugates,
                body,
                ..
            } => {
                push_all(&mut out, specializations);
                push_all(&mut out, disjoint_from);
                push_opt(&mut out, conjugates);
                if let Some(body) = body {
                    push_all(&mut out, body);
                }
            }
            NodeKind::Usage {
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
                push_all(&mut out, feature_types);
                push_opt(&mut out, multiplicity);
                push_all(&mut out, specializations);
                push_all(&mut out, subsets);
                push_all(&mut out, redefines);
                push_all(&mut out, references);
                if let Some(value) = value {
                    push_opt(&mut out, &value.expression);
                }
                if let Some(body) = body {
                    push_all(&mut out, body);
                }
            }
            NodeKind::MultiplicityBounds { .. } => {}
            NodeKind::Dependency {
                clients, suppliers, ..
            } => {
                push_all(&mut out, clients);
                push_all(&mut out, suppliers);
            }
            NodeKind::Transition {
                source,
                accept,
                guard,
                effect,
                target,
                ..
            } => {
                push_opt(&mut out, source);
                push_opt(&mut out, accept);
                push_opt(&mut out, guard);
                push_opt(&mut out, effect);
                push_opt(&mut out, target);
            }
            NodeKind::Succession { steps, .. } => push_all(&mut out, steps),
            NodeKind::Connector { source, target, .. }
            | NodeKind::Binding { source, target, .. } => {
                push_opt(&mut out, source);
                push_opt(&mut out, target);
            }
            NodeKind::Flow {
                payload,
                source,
                target,
                ..
            } => {
                push_opt(&mut out, payload);
                push_opt(&mut out, source);
                push_opt(&mut out, target);
            }
            NodeKind::EntryAction { action }
            | NodeKind::ExitAction { action }
            | NodeKind::DoAction { action } => push_opt(&mut out, action),
            NodeKind::IfAction {
                condition,
                then_body,
                else_body,
            } => {
                push_opt(&mut out, condition);
                push_all(&mut out, then_body);
                if let Some(else_body) = else_body {
                    push_all(&mut out, else_body);
                }
            }
            NodeKind::WhileAction {
                condition,
                until,
                body,
            } => {
                push_opt(&mut out, condition);
                push_opt(&mut out, until);
                push_all(&mut out, body);
            }
            NodeKind::ForAction {
                sequence, body, ..
            } => {
                push_opt(&mut out, sequence);
                push_all(&mut out, body);
            }
            NodeKind::AssignAction { target, value } => {
                push_opt(&mut out, target);
                push_opt(&mut out, value);
            }
            NodeKind::SendAction { payload, via, to } => {
                push_opt(&mut out, payload);
                push_opt(&mut out, via);
                push_opt(&mut out, to);
            }
            NodeKind::AcceptAction { payload, via, .. } => {
                push_opt(&mut out, payload);
                push_opt(&mut out, via);
            }
            NodeKind::PerformAction { target, body } => {
                push_opt(&mut out, target);
                if let Some(body) = body {
                    push_all(&mut out, body);
                }
            }
            NodeKind::AssertAction { constraint } => push_opt(&mut out, constraint),
            NodeKind::Literal { .. } => {}
            NodeKind::Unary { operand, .. } => push(&mut out, operand),
            NodeKind::Binary { lhs, rhs, .. } => {
                push(&mut out, lhs);
                push(&mut out, rhs);
            }
            NodeKind::Range { lower, upper } => {
                push(&mut out, lower);
                push(&mut out, upper);
            }
            NodeKind::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                push(&mut out, condition);
                push(&mut out, then_branch);
                push_opt(&mut out, else_branch);
            }
            NodeKind::Classification {
                operand, type_ref, ..
            } => {
                push_opt(&mut out, operand);
                push(&mut out, type_ref);
            }
            NodeKind::FeatureChain { target, .. } => push(&mut out, target),
            NodeKind::Invocation { callee, arguments } => {
                push(&mut out, callee);
                push_all(&mut out, arguments);
            }
            NodeKind::NamedArgument { value, .. } => push(&mut out, value),
            NodeKind::Extent { type_ref } => push(&mut out, type_ref),
            NodeKind::Paren { inner } => push(&mut out, inner),
            NodeKind::Documentation { .. } => {}
            NodeKind::Comment { about, .. } => push_all(&mut out, about),
            NodeKind::TextualRepresentation { .. } => {}
            NodeKind::MetadataUsage {
                metadata_type,
                body,
                ..
            } => {
                push_opt(&mut out, metadata_type);
                if let Some(body) = body {
                    push_all(&mut out, body);
                }
            }
        }
        out
    }

    /// The membership list of a container node (root, package, or a
    /// definition/usage body), if the node is a container with a body.
    pub fn body_elements(&self, id: NodeId) -> Option<&[NodeId]> {
        match &self.get(id).kind {
            NodeKind::RootNamespace { elements } | NodeKind::Package { elements, .. } => {
                Some(elements)
            }
            NodeKind::Definition { body, .. }
            | NodeKind::Usage { body, .. }
            | NodeKind::MetadataUsage { body, .. }
            | NodeKind::PerformAction { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    /// Whether the node opens a scope that local-scope computation indexes.
    pub fn is_container(&self, id: NodeId) -> bool {
        matches!(
            self.get(id).kind,
            NodeKind::RootNamespace { .. } | NodeKind::Package { .. }
        ) || self.body_elements(id).is_some()
    }

    /// The element owned by a membership node. Aliases own no element: the
    /// alias itself is the named member.
    pub fn membership_element(&self, id: NodeId) -> Option<NodeId> {
        match &self.get(id).kind {
            NodeKind::OwningMembership { element, .. } => Some(*element),
            _ => None,
        }
    }

    /// The declared visibility of a membership node (default public).
    pub fn membership_visibility(&self, id: NodeId) -> Visibility {
        match &self.get(id).kind {
            NodeKind::OwningMembership { visibility, .. }
            | NodeKind::ImportMembership { visibility, .. }
            | NodeKind::AliasMember { visibility, .. } => {
                visibility.unwrap_or(Visibility::Public)
            }
            _ => Visibility::Public,
        }
    }

    /// The declared name of an element, if it has one.
    pub fn element_name(&self, id: NodeId) -> Option<&str> {
        match &self.get(id).kind {
            NodeKind::Package { name, .. }
            | NodeKind::Definition { name, .. }
            | NodeKind::Usage { name, .. }
            | NodeKind::Dependency { name, .. }
            | NodeKind::Transition { name, .. }
            | NodeKind::Succession { name, .. }
            | NodeKind::Connector { name, .. }
            | NodeKind::Binding { name, .. }
            | NodeKind::Flow { name, .. }
            | NodeKind::Documentation { name, .. }
            | NodeKind::Comment { name, .. }
            | NodeKind::TextualRepresentation { name, .. }
            | NodeKind::MetadataUsage { name, .. }
            | NodeKind::AcceptAction { name, .. } => name.as_deref(),
            NodeKind::AliasMember { name, .. } => Some(name),
            _ => None,
        }
    }

    /// The parts of a `QualifiedName` node.
    pub fn qualified_name_parts(&self, id: NodeId) -> &[String] {
        match &self.get(id).kind {
            NodeKind::QualifiedName { parts, .. } => parts,
            _ => &[],
        }
    }

    /// The resolved target of a `QualifiedName` node, if linking found one.
    pub fn reference_target(&self, id: NodeId) -> Option<&RefTarget> {
        match &self.get(id).kind {
            NodeKind::QualifiedName { target, .. } => target.as_ref(),
            _ => None,
        }
    }

    /// Record a resolved reference target. Only `QualifiedName` nodes are
    /// mutated after construction; everything else is immutable post-parse.
    pub fn set_reference_target(&mut self, id: NodeId, resolved: RefTarget) {
        if let NodeKind::QualifiedName { target, .. } = &mut self.get_mut(id).kind {
            *target = Some(resolved);
        }
    }

    /// Walk the `$container` chain from a node, the node excluded.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = self.get(id).parent;
        std::iter::from_fn(move || {
            let id = current?;
            current = self.get(id).parent;
            Some(id)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::span::{Position, Span};

    fn sp() -> Span {
        Span::empty(Position::zero())
    }

    #[test]
    fn test_alloc_and_parent_links() {
        let mut arena = Arena::new();
        let qn = arena.alloc(
            NodeKind::QualifiedName {
                parts: vec!["Base".into()],
                target: None,
            },
            sp(),
        );
        let def = arena.alloc(
            NodeKind::Definition {
                def_kind: DefKind::Part,
                name: Some("Engine".into()),
                short_name: None,
                is_abstract: false,
                is_parallel: false,
                specializations: vec![qn],
                disjoint_from: vec![],
                conjugates: None,
                body: None,
            },
            sp(),
        );
        arena.adopt(def);

        assert_eq!(arena.get(qn).parent, Some(def));
        assert_eq!(arena.children(def), vec![qn]);
        assert_eq!(arena.element_name(def), Some("Engine"));
    }

    #[test]
    fn test_ancestors_chain() {
        let mut arena = Arena::new();
        let def = arena.alloc(
            NodeKind::Definition {
                def_kind: DefKind::Part,
                name: Some("X".into()),
                short_name: None,
                is_abstract: false,
                is_parallel: false,
                specializations: vec![],
                disjoint_from: vec![],
                conjugates: None,
                body: None,
            },
            sp(),
        );
        let member = arena.alloc(
            NodeKind::OwningMembership {
                visibility: None,
                element: def,
            },
            sp(),
        );
        let pkg = arena.alloc(
            NodeKind::Package {
                name: Some("P".into()),
                short_name: None,
                is_library: false,
                is_standard: false,
                elements: vec![member],
            },
            sp(),
        );
        arena.adopt(pkg);
        arena.adopt(member);

        let chain: Vec<_> = arena.ancestors(def).collect();
        assert_eq!(chain, vec![member, pkg]);
    }

    #[test]
    fn test_membership_visibility_defaults_public() {
        let mut arena = Arena::new();
        let def = arena.alloc(
            NodeKind::Definition {
                def_kind: DefKind::Item,
                name: None,
                short_name: None,
                is_abstract: false,
                is_parallel: false,
                specializations: vec![],
                disjoint_from: vec![],
                conjugates: None,
                body: None,
            },
            sp(),
        );
        let public = arena.alloc(
            NodeKind::OwningMembership {
                visibility: None,
                element: def,
            },
            sp(),
        );
        let private = arena.alloc(
            NodeKind::OwningMembership {
                visibility: Some(Visibility::Private),
                element: def,
            },
            sp(),
        );
        assert_eq!(arena.membership_visibility(public), Visibility::Public);
        assert_eq!(arena.membership_visibility(private), Visibility::Private);
    }
}
