//! Token and node kinds.
//!
//! Variant names follow the TypeScript compiler's `SyntaxKind` naming, since
//! the serialized documentation records expose some of them verbatim (for
//! example `TypeOperator.operator = "KeyOfKeyword"`).

/// Kind tag shared by tokens and parsed nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    Unknown = 0,
    EndOfFileToken,

    // Literals
    NumericLiteral,
    StringLiteral,
    NoSubstitutionTemplateLiteral,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    LessThanToken,
    GreaterThanToken,
    EqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    QuestionToken,
    ColonToken,
    AtToken,
    AmpersandToken,
    BarToken,
    ExclamationToken,

    // Identifiers
    Identifier,
    PrivateIdentifier,

    // Keywords (contextual ones included; the parser decides where they may
    // be used as plain identifiers)
    AbstractKeyword,
    AnyKeyword,
    AsKeyword,
    AsyncKeyword,
    BigIntKeyword,
    BooleanKeyword,
    ClassKeyword,
    ConstKeyword,
    DeclareKeyword,
    DefaultKeyword,
    EnumKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FalseKeyword,
    FromKeyword,
    FunctionKeyword,
    GetKeyword,
    ImplementsKeyword,
    ImportKeyword,
    InKeyword,
    InferKeyword,
    InterfaceKeyword,
    IsKeyword,
    KeyOfKeyword,
    LetKeyword,
    ModuleKeyword,
    NamespaceKeyword,
    NeverKeyword,
    NewKeyword,
    NullKeyword,
    NumberKeyword,
    ObjectKeyword,
    OfKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    ReadonlyKeyword,
    RequireKeyword,
    SetKeyword,
    StaticKeyword,
    StringKeyword,
    SymbolKeyword,
    ThisKeyword,
    TrueKeyword,
    TypeKeyword,
    TypeOfKeyword,
    UndefinedKeyword,
    UniqueKeyword,
    UnknownKeyword,
    VarKeyword,
    VoidKeyword,

    // Names
    QualifiedName,
    ComputedPropertyName,

    // Signature elements
    TypeParameter,
    Parameter,

    // Members
    PropertySignature,
    PropertyDeclaration,
    MethodSignature,
    MethodDeclaration,
    Constructor,
    GetAccessor,
    SetAccessor,
    CallSignature,
    ConstructSignature,
    IndexSignature,

    // Types
    TypePredicate,
    TypeReference,
    FunctionType,
    ConstructorType,
    TypeQuery,
    TypeLiteral,
    ArrayType,
    TupleType,
    UnionType,
    IntersectionType,
    ConditionalType,
    InferType,
    ParenthesizedType,
    TypeOperator,
    IndexedAccessType,
    MappedType,
    LiteralType,

    // Expressions (only the subset documentation extraction needs)
    PropertyAccessExpression,
    ExpressionWithTypeArguments,

    // Declarations
    HeritageClause,
    EnumMember,
    VariableStatement,
    VariableDeclaration,
    FunctionDeclaration,
    ClassDeclaration,
    InterfaceDeclaration,
    TypeAliasDeclaration,
    EnumDeclaration,
    ModuleDeclaration,
    ImportDeclaration,
    ImportSpecifier,
    ExportDeclaration,
    ExportSpecifier,
    ExportAssignment,
    SourceFile,
}

impl SyntaxKind {
    /// Map reserved and contextual keyword text to its kind.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        use SyntaxKind::*;
        let kind = match text {
            "abstract" => AbstractKeyword,
            "any" => AnyKeyword,
            "as" => AsKeyword,
            "async" => AsyncKeyword,
            "bigint" => BigIntKeyword,
            "boolean" => BooleanKeyword,
            "class" => ClassKeyword,
            "const" => ConstKeyword,
            "declare" => DeclareKeyword,
            "default" => DefaultKeyword,
            "enum" => EnumKeyword,
            "export" => ExportKeyword,
            "extends" => ExtendsKeyword,
            "false" => FalseKeyword,
            "from" => FromKeyword,
            "function" => FunctionKeyword,
            "get" => GetKeyword,
            "implements" => ImplementsKeyword,
            "import" => ImportKeyword,
            "in" => InKeyword,
            "infer" => InferKeyword,
            "interface" => InterfaceKeyword,
            "is" => IsKeyword,
            "keyof" => KeyOfKeyword,
            "let" => LetKeyword,
            "module" => ModuleKeyword,
            "namespace" => NamespaceKeyword,
            "never" => NeverKeyword,
            "new" => NewKeyword,
            "null" => NullKeyword,
            "number" => NumberKeyword,
            "object" => ObjectKeyword,
            "of" => OfKeyword,
            "private" => PrivateKeyword,
            "protected" => ProtectedKeyword,
            "public" => PublicKeyword,
            "readonly" => ReadonlyKeyword,
            "require" => RequireKeyword,
            "set" => SetKeyword,
            "static" => StaticKeyword,
            "string" => StringKeyword,
            "symbol" => SymbolKeyword,
            "this" => ThisKeyword,
            "true" => TrueKeyword,
            "type" => TypeKeyword,
            "typeof" => TypeOfKeyword,
            "undefined" => UndefinedKeyword,
            "unique" => UniqueKeyword,
            "unknown" => UnknownKeyword,
            "var" => VarKeyword,
            "void" => VoidKeyword,
            _ => return None,
        };
        Some(kind)
    }

    /// Source text of a keyword kind, `None` for non-keywords.
    pub fn keyword_text(self) -> Option<&'static str> {
        use SyntaxKind::*;
        let text = match self {
            AbstractKeyword => "abstract",
            AnyKeyword => "any",
            AsKeyword => "as",
            AsyncKeyword => "async",
            BigIntKeyword => "bigint",
            BooleanKeyword => "boolean",
            ClassKeyword => "class",
            ConstKeyword => "const",
            DeclareKeyword => "declare",
            DefaultKeyword => "default",
            EnumKeyword => "enum",
            ExportKeyword => "export",
            ExtendsKeyword => "extends",
            FalseKeyword => "false",
            FromKeyword => "from",
            FunctionKeyword => "function",
            GetKeyword => "get",
            ImplementsKeyword => "implements",
            ImportKeyword => "import",
            InKeyword => "in",
            InferKeyword => "infer",
            InterfaceKeyword => "interface",
            IsKeyword => "is",
            KeyOfKeyword => "keyof",
            LetKeyword => "let",
            ModuleKeyword => "module",
            NamespaceKeyword => "namespace",
            NeverKeyword => "never",
            NewKeyword => "new",
            NullKeyword => "null",
            NumberKeyword => "number",
            ObjectKeyword => "object",
            OfKeyword => "of",
            PrivateKeyword => "private",
            ProtectedKeyword => "protected",
            PublicKeyword => "public",
            ReadonlyKeyword => "readonly",
            RequireKeyword => "require",
            SetKeyword => "set",
            StaticKeyword => "static",
            StringKeyword => "string",
            SymbolKeyword => "symbol",
            ThisKeyword => "this",
            TrueKeyword => "true",
            TypeKeyword => "type",
            TypeOfKeyword => "typeof",
            UndefinedKeyword => "undefined",
            UniqueKeyword => "unique",
            UnknownKeyword => "unknown",
            VarKeyword => "var",
            VoidKeyword => "void",
            _ => return None,
        };
        Some(text)
    }

    /// True for any keyword kind.
    pub fn is_keyword(self) -> bool {
        self >= SyntaxKind::AbstractKeyword && self <= SyntaxKind::VoidKeyword
    }

    /// Keywords that stand alone as a built-in type in type position.
    /// `true`, `false`, and `null` are literal types, not keyword types,
    /// and `this` has its own node; none of them belong here.
    pub fn is_type_keyword(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            AnyKeyword
                | BigIntKeyword
                | BooleanKeyword
                | NeverKeyword
                | NumberKeyword
                | ObjectKeyword
                | StringKeyword
                | SymbolKeyword
                | UndefinedKeyword
                | UnknownKeyword
                | VoidKeyword
        )
    }

    /// Modifier keywords that may precede a declaration or member.
    pub fn is_modifier_kind(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            AbstractKeyword
                | AsyncKeyword
                | ConstKeyword
                | DeclareKeyword
                | DefaultKeyword
                | ExportKeyword
                | PrivateKeyword
                | ProtectedKeyword
                | PublicKeyword
                | ReadonlyKeyword
                | StaticKeyword
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_round_trip() {
        assert_eq!(
            SyntaxKind::from_keyword("keyof"),
            Some(SyntaxKind::KeyOfKeyword)
        );
        assert_eq!(SyntaxKind::KeyOfKeyword.keyword_text(), Some("keyof"));
        assert_eq!(SyntaxKind::from_keyword("Point"), None);
        assert_eq!(SyntaxKind::TypeReference.keyword_text(), None);
    }

    #[test]
    fn operator_kinds_format_with_typescript_names() {
        // The TypeOperator doc record serializes the operator via Debug.
        assert_eq!(format!("{:?}", SyntaxKind::KeyOfKeyword), "KeyOfKeyword");
        assert_eq!(format!("{:?}", SyntaxKind::UniqueKeyword), "UniqueKeyword");
    }

    #[test]
    fn keyword_range_predicate_matches_variants() {
        assert!(SyntaxKind::AbstractKeyword.is_keyword());
        assert!(SyntaxKind::VoidKeyword.is_keyword());
        assert!(!SyntaxKind::Identifier.is_keyword());
        assert!(!SyntaxKind::QualifiedName.is_keyword());
    }
}
