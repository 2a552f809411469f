//! Closed kind sets for definitions, usages, operators and modifiers.
//!
//! Discrimination everywhere in the pipeline is on these single-byte tags;
//! the string names only surface at the JSON boundary.

use serde::Serialize;

/// Visibility of a membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Visibility {
    Public,
    Private,
    Protected,
}

/// Parameter / feature direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    In,
    Out,
    Inout,
}

/// The kind of a definition (`part def`, `action def`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DefKind {
    Part,
    Item,
    Attribute,
    Enumeration,
    Action,
    State,
    Constraint,
    Requirement,
    Port,
    Connection,
    Interface,
    FlowConnection,
    Allocation,
    Calculation,
    Case,
    AnalysisCase,
    VerificationCase,
    UseCase,
    View,
    Viewpoint,
    Rendering,
    Metadata,
    Occurrence,
    Concern,
}

impl DefKind {
    /// `$type` tag for serialization.
    pub fn type_name(self) -> &'static str {
        match self {
            DefKind::Part => "PartDefinition",
            DefKind::Item => "ItemDefinition",
            DefKind::Attribute => "AttributeDefinition",
            DefKind::Enumeration => "EnumerationDefinition",
            DefKind::Action => "ActionDefinition",
            DefKind::State => "StateDefinition",
            DefKind::Constraint => "ConstraintDefinition",
            DefKind::Requirement => "RequirementDefinition",
            DefKind::Port => "PortDefinition",
            DefKind::Connection => "ConnectionDefinition",
            DefKind::Interface => "InterfaceDefinition",
            DefKind::FlowConnection => "FlowConnectionDefinition",
            DefKind::Allocation => "AllocationDefinition",
            DefKind::Calculation => "CalculationDefinition",
            DefKind::Case => "CaseDefinition",
            DefKind::AnalysisCase => "AnalysisCaseDefinition",
            DefKind::VerificationCase => "VerificationCaseDefinition",
            DefKind::UseCase => "UseCaseDefinition",
            DefKind::View => "ViewDefinition",
            DefKind::Viewpoint => "ViewpointDefinition",
            DefKind::Rendering => "RenderingDefinition",
            DefKind::Metadata => "MetadataDefinition",
            DefKind::Occurrence => "OccurrenceDefinition",
            DefKind::Concern => "ConcernDefinition",
        }
    }

    /// Display name for diagnostics ("Part definition 'X' ...").
    pub fn display_name(self) -> &'static str {
        match self {
            DefKind::Part => "Part definition",
            DefKind::Item => "Item definition",
            DefKind::Attribute => "Attribute definition",
            DefKind::Enumeration => "Enumeration definition",
            DefKind::Action => "Action definition",
            DefKind::State => "State definition",
            DefKind::Constraint => "Constraint definition",
            DefKind::Requirement => "Requirement definition",
            DefKind::Port => "Port definition",
            DefKind::Connection => "Connection definition",
            DefKind::Interface => "Interface definition",
            DefKind::FlowConnection => "Flow connection definition",
            DefKind::Allocation => "Allocation definition",
            DefKind::Calculation => "Calculation definition",
            DefKind::Case => "Case definition",
            DefKind::AnalysisCase => "Analysis case definition",
            DefKind::VerificationCase => "Verification case definition",
            DefKind::UseCase => "Use case definition",
            DefKind::View => "View definition",
            DefKind::Viewpoint => "Viewpoint definition",
            DefKind::Rendering => "Rendering definition",
            DefKind::Metadata => "Metadata definition",
            DefKind::Occurrence => "Occurrence definition",
            DefKind::Concern => "Concern definition",
        }
    }
}

/// The kind of a usage (`part x`, `attribute y`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UsageKind {
    Part,
    Item,
    Attribute,
    Enumeration,
    Action,
    State,
    Constraint,
    Requirement,
    Port,
    Connection,
    Interface,
    Allocation,
    Calculation,
    Case,
    AnalysisCase,
    VerificationCase,
    UseCase,
    View,
    Viewpoint,
    Rendering,
    Metadata,
    Occurrence,
    Concern,
    /// Bare `ref x` or a shorthand feature member.
    Reference,
    Subject,
    Actor,
    Return,
}

impl UsageKind {
    pub fn type_name(self) -> &'static str {
        match self {
            UsageKind::Part => "PartUsage",
            UsageKind::Item => "ItemUsage",
            UsageKind::Attribute => "AttributeUsage",
            UsageKind::Enumeration => "EnumerationUsage",
            UsageKind::Action => "ActionUsage",
            UsageKind::State => "StateUsage",
            UsageKind::Constraint => "ConstraintUsage",
            UsageKind::Requirement => "RequirementUsage",
            UsageKind::Port => "PortUsage",
            UsageKind::Connection => "ConnectionUsage",
            UsageKind::Interface => "InterfaceUsage",
            UsageKind::Allocation => "AllocationUsage",
            UsageKind::Calculation => "CalculationUsage",
            UsageKind::Case => "CaseUsage",
            UsageKind::AnalysisCase => "AnalysisCaseUsage",
            UsageKind::VerificationCase => "VerificationCaseUsage",
            UsageKind::UseCase => "UseCaseUsage",
            UsageKind::View => "ViewUsage",
            UsageKind::Viewpoint => "ViewpointUsage",
            UsageKind::Rendering => "RenderingUsage",
            UsageKind::Metadata => "MetadataUsage",
            UsageKind::Occurrence => "OccurrenceUsage",
            UsageKind::Concern => "ConcernUsage",
            UsageKind::Reference => "ReferenceUsage",
            UsageKind::Subject => "SubjectMembership",
            UsageKind::Actor => "ActorMembership",
            UsageKind::Return => "ReturnParameterMembership",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            UsageKind::Part => "Part",
            UsageKind::Item => "Item",
            UsageKind::Attribute => "Attribute",
            UsageKind::Enumeration => "Enumeration",
            UsageKind::Action => "Action",
            UsageKind::State => "State",
            UsageKind::Constraint => "Constraint",
            UsageKind::Requirement => "Requirement",
            UsageKind::Port => "Port",
            UsageKind::Connection => "Connection",
            UsageKind::Interface => "Interface",
            UsageKind::Allocation => "Allocation",
            UsageKind::Calculation => "Calculation",
            UsageKind::Case => "Case",
            UsageKind::AnalysisCase => "Analysis case",
            UsageKind::VerificationCase => "Verification case",
            UsageKind::UseCase => "Use case",
            UsageKind::View => "View",
            UsageKind::Viewpoint => "Viewpoint",
            UsageKind::Rendering => "Rendering",
            UsageKind::Metadata => "Metadata",
            UsageKind::Occurrence => "Occurrence",
            UsageKind::Concern => "Concern",
            UsageKind::Reference => "Reference",
            UsageKind::Subject => "Subject",
            UsageKind::Actor => "Actor",
            UsageKind::Return => "Return parameter",
        }
    }
}

/// How a usage's value expression is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueKind {
    /// `=`
    Bound,
    /// `:=`
    Initial,
    /// `::=`
    Computed,
}

/// Literal expression values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LiteralValue {
    Bool(bool),
    Null,
    Integer(i64),
    Real(f64),
    String(String),
}

/// Unary prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `!` or `not`
    Not,
    /// `~`
    Complement,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::Not => "not",
            UnaryOp::Complement => "~",
        }
    }
}

/// Binary operators (range and classification are separate node kinds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    /// `**`, right-associative
    Power,
    Equal,
    NotEqual,
    Same,
    NotSame,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    And,
    Or,
    Xor,
    Implies,
    NullCoalesce,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Power => "**",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Same => "===",
            BinaryOp::NotSame => "!==",
            BinaryOp::Less => "<",
            BinaryOp::LessEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Xor => "xor",
            BinaryOp::Implies => "implies",
            BinaryOp::NullCoalesce => "??",
        }
    }
}

/// Classification operators relating a value to a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClassificationOp {
    /// `hastype`
    HasType,
    /// `istype`
    IsType,
    /// `as`
    Cast,
    /// `@`
    AtType,
    /// `meta`
    Meta,
}

impl ClassificationOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ClassificationOp::HasType => "hastype",
            ClassificationOp::IsType => "istype",
            ClassificationOp::Cast => "as",
            ClassificationOp::AtType => "@",
            ClassificationOp::Meta => "meta",
        }
    }
}
