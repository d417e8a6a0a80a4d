//! Parser state - statement and declaration parsing methods.

use tracing::{debug, trace};
use tydoc_scanner::SyntaxKind;

use super::node::{
    ClassData, ComputedPropertyData, EnumData, EnumMemberData, ExportAssignmentData,
    ExportDeclData, HeritageClauseData, ImportDeclData, InterfaceData, LiteralData, ModuleData,
    ParameterData, PropertyData, QualifiedNameData, SignatureData, SourceFileData, SpecifierData,
    TypeAliasData, VariableData, VariableDeclarationData,
};
use super::state::ParserState;
use super::{NodeIndex, NodeList, modifier_flags, node_flags};

impl ParserState {
    /// Parse a source file.
    pub fn parse_source_file(&mut self) -> NodeIndex {
        let start_pos = 0u32;

        // Skip shebang (#!) if present at start of file.
        self.scanner.scan_shebang_trivia();

        // Prime the token buffer.
        self.next_token();

        let statements = self.parse_statements_until(SyntaxKind::EndOfFileToken);
        let end_pos = self.token_end();
        debug!(
            file = %self.file_name,
            statements = statements.len(),
            diagnostics = self.parse_diagnostics.len(),
            "parsed source file"
        );

        // Cache comment ranges once; documentation lookup never rescans.
        let comments = self.scanner.take_comments();

        // Transfer the scanner's interner so atom-based identifier text
        // resolution works through get_arena(), not just into_arena().
        self.arena.set_interner(self.scanner.interner().clone());

        self.arena.add_source_file(
            start_pos,
            end_pos,
            SourceFileData {
                statements,
                file_name: self.file_name.clone(),
                text: self.scanner.source_text_arc(),
                comments,
            },
        )
    }

    /// Parse statements until the terminator (or end of file), skipping
    /// anything that is not a documented declaration form.
    pub(crate) fn parse_statements_until(&mut self, terminator: SyntaxKind) -> NodeList {
        let mut statements = Vec::new();
        while !self.is_token(terminator) && !self.is_token(SyntaxKind::EndOfFileToken) {
            let guard = self.token_pos();
            let statement = self.parse_statement();
            if statement.is_some() {
                statements.push(statement);
            }
            // Resynchronize if nothing was consumed.
            if self.token_pos() == guard && !self.is_token(terminator) {
                self.next_token();
            }
        }
        statements
    }

    /// Parse one statement. Returns NONE for skipped syntax.
    pub(crate) fn parse_statement(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let pos = self.token_pos();
        match self.current_token {
            SemicolonToken => {
                self.next_token();
                NodeIndex::NONE
            }
            ImportKeyword => self.parse_import_declaration(pos),
            ExportKeyword => {
                // Route between `export`-prefixed statements and `export` as
                // a declaration modifier.
                let is_export_statement = self.look_ahead(|p| {
                    p.next_token();
                    match p.current_token {
                        OpenBraceToken | AsteriskToken | EqualsToken => true,
                        DefaultKeyword => {
                            p.next_token();
                            !matches!(
                                p.current_token,
                                ClassKeyword
                                    | FunctionKeyword
                                    | AbstractKeyword
                                    | AsyncKeyword
                                    | InterfaceKeyword
                                    | EnumKeyword
                            )
                        }
                        _ => false,
                    }
                });
                if is_export_statement {
                    self.parse_export_statement(pos)
                } else {
                    self.parse_declaration_with_modifiers(pos)
                }
            }
            _ => self.parse_declaration_with_modifiers(pos),
        }
    }

    fn parse_declaration_with_modifiers(&mut self, pos: u32) -> NodeIndex {
        use SyntaxKind::*;
        let flags = self.parse_modifiers();
        // Guards below use lookahead; match on a copy of the token.
        let token = self.current_token;
        match token {
            ClassKeyword => self.parse_class_declaration(pos, flags),
            InterfaceKeyword => self.parse_interface_declaration(pos, flags),
            EnumKeyword => self.parse_enum_declaration(pos, flags),
            FunctionKeyword => self.parse_function_declaration(pos, flags),
            TypeKeyword if self.look_ahead(|p| {
                p.next_token();
                p.is_identifier_or_keyword()
            }) =>
            {
                self.parse_type_alias_declaration(pos, flags)
            }
            ConstKeyword
                if self.look_ahead(|p| {
                    p.next_token();
                    p.is_token(EnumKeyword)
                }) =>
            {
                self.next_token();
                self.parse_enum_declaration(pos, flags | modifier_flags::CONST)
            }
            VarKeyword | LetKeyword | ConstKeyword => self.parse_variable_statement(pos, flags),
            NamespaceKeyword | ModuleKeyword
                if self.look_ahead(|p| {
                    p.next_token();
                    p.is_identifier_or_keyword() || p.is_token(StringLiteral)
                }) =>
            {
                self.parse_module_declaration(pos, flags)
            }
            ImportKeyword => self.parse_import_declaration(pos),
            _ => {
                self.skip_statement();
                NodeIndex::NONE
            }
        }
    }

    /// Collect declaration/member modifiers into a flag set.
    ///
    /// A modifier keyword only counts as a modifier when a declaration or
    /// member can still follow it; `static: number` declares a property
    /// named `static`.
    pub(crate) fn parse_modifiers(&mut self) -> u32 {
        use SyntaxKind::*;
        let mut flags = modifier_flags::NONE;
        loop {
            let kind = self.current_token;
            // `const` is routed by the caller: `const enum` vs `const x`.
            if !kind.is_modifier_kind() || kind == ConstKeyword {
                break;
            }
            if !self.next_token_can_follow_modifier() {
                break;
            }
            flags |= match kind {
                PublicKeyword => modifier_flags::PUBLIC,
                PrivateKeyword => modifier_flags::PRIVATE,
                ProtectedKeyword => modifier_flags::PROTECTED,
                StaticKeyword => modifier_flags::STATIC,
                ReadonlyKeyword => modifier_flags::READONLY,
                ExportKeyword => modifier_flags::EXPORT,
                DefaultKeyword => modifier_flags::DEFAULT,
                AbstractKeyword => modifier_flags::ABSTRACT,
                DeclareKeyword => modifier_flags::DECLARE,
                AsyncKeyword => modifier_flags::ASYNC,
                _ => modifier_flags::NONE,
            };
            self.next_token();
        }
        flags
    }

    fn next_token_can_follow_modifier(&mut self) -> bool {
        use SyntaxKind::*;
        self.look_ahead(|p| {
            p.next_token();
            !matches!(
                p.current_token,
                OpenParenToken
                    | CloseParenToken
                    | LessThanToken
                    | ColonToken
                    | EqualsToken
                    | QuestionToken
                    | SemicolonToken
                    | CommaToken
                    | CloseBraceToken
                    | EqualsGreaterThanToken
                    | DotToken
                    | EndOfFileToken
            )
        })
    }

    // =========================================================================
    // Classes
    // =========================================================================

    fn parse_class_declaration(&mut self, pos: u32, flags: u32) -> NodeIndex {
        self.next_token(); // class
        let name = if self.is_token(SyntaxKind::Identifier) {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        let type_parameters = self.parse_type_parameters();
        let heritage_clauses = self.parse_heritage_clauses();
        self.parse_expected(SyntaxKind::OpenBraceToken);

        let mut members = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if self.parse_optional(SyntaxKind::SemicolonToken) {
                continue;
            }
            let guard = self.token_pos();
            let member = self.parse_class_member();
            if member.is_some() {
                members.push(member);
            }
            if self.token_pos() == guard && !self.is_token(SyntaxKind::CloseBraceToken) {
                self.next_token();
            }
        }
        let end = self.token_end();
        self.parse_expected(SyntaxKind::CloseBraceToken);

        self.arena.add_class(
            pos,
            end,
            ClassData {
                name,
                type_parameters,
                heritage_clauses,
                members,
                modifier_flags: flags,
            },
        )
    }

    fn parse_class_member(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let pos = self.token_pos();
        let flags = self.parse_modifiers();

        // Constructor
        if self.is_token(Identifier)
            && self.scanner.token_value_ref() == "constructor"
            && self.look_ahead(|p| {
                p.next_token();
                p.is_token(OpenParenToken)
            })
        {
            self.next_token();
            let parameters = self.parse_parameters();
            let return_type = self.parse_return_type_annotation();
            self.skip_body();
            return self.arena.add_signature(
                Constructor,
                pos,
                self.token_pos(),
                SignatureData {
                    name: NodeIndex::NONE,
                    question: false,
                    type_parameters: Vec::new(),
                    parameters,
                    return_type,
                    modifier_flags: flags,
                },
            );
        }

        // Accessors
        if matches!(self.current_token, GetKeyword | SetKeyword)
            && self.look_ahead(|p| {
                p.next_token();
                p.is_property_name_start()
            })
        {
            let kind = if self.is_token(GetKeyword) {
                GetAccessor
            } else {
                SetAccessor
            };
            self.next_token();
            let name = self.parse_property_name();
            let parameters = if self.is_token(OpenParenToken) {
                self.parse_parameters()
            } else {
                Vec::new()
            };
            let return_type = self.parse_return_type_annotation();
            self.skip_body();
            return self.arena.add_signature(
                kind,
                pos,
                self.token_pos(),
                SignatureData {
                    name,
                    question: false,
                    type_parameters: Vec::new(),
                    parameters,
                    return_type,
                    modifier_flags: flags,
                },
            );
        }

        // Index signature
        if self.is_token(OpenBracketToken) && self.is_index_signature_start() {
            return self.parse_index_signature(pos, flags);
        }

        // Method or property
        let name = self.parse_property_name();
        let question = self.parse_optional(QuestionToken);
        if matches!(self.current_token, OpenParenToken | LessThanToken) {
            let type_parameters = self.parse_type_parameters();
            let parameters = self.parse_parameters();
            let return_type = self.parse_return_type_annotation();
            self.skip_body();
            self.arena.add_signature(
                MethodDeclaration,
                pos,
                self.token_pos(),
                SignatureData {
                    name,
                    question,
                    type_parameters,
                    parameters,
                    return_type,
                    modifier_flags: flags,
                },
            )
        } else {
            self.parse_optional(ExclamationToken);
            let type_node = if self.parse_optional(ColonToken) {
                self.parse_type()
            } else {
                NodeIndex::NONE
            };
            let initializer = if self.parse_optional(EqualsToken) {
                self.parse_initializer_value()
            } else {
                NodeIndex::NONE
            };
            self.parse_optional(SemicolonToken);
            self.arena.add_property(
                PropertyDeclaration,
                pos,
                self.token_pos(),
                PropertyData {
                    name,
                    question,
                    type_node,
                    initializer,
                    modifier_flags: flags,
                },
            )
        }
    }

    /// After a method/function signature: skip a `{}` body or consume the
    /// declaration semicolon.
    fn skip_body(&mut self) {
        if self.is_token(SyntaxKind::OpenBraceToken) {
            self.skip_block();
        } else {
            self.parse_optional(SyntaxKind::SemicolonToken);
        }
    }

    pub(crate) fn is_property_name_start(&self) -> bool {
        self.is_identifier_or_keyword()
            || matches!(
                self.current_token,
                SyntaxKind::StringLiteral
                    | SyntaxKind::NumericLiteral
                    | SyntaxKind::OpenBracketToken
            )
    }

    /// Identifier, string/numeric literal, or `[computed]` name.
    pub(crate) fn parse_property_name(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        match self.current_token {
            StringLiteral | NumericLiteral => {
                let pos = self.token_pos();
                let end = self.token_end();
                let kind = self.current_token;
                let text = self.scanner.token_value_ref().to_string();
                let index = self.arena.add_literal(kind, pos, end, LiteralData { text });
                self.next_token();
                index
            }
            OpenBracketToken => {
                let pos = self.token_pos();
                self.next_token();
                let expression = self.parse_computed_expression();
                let end = self.token_end();
                self.parse_expected(CloseBracketToken);
                self.arena
                    .add_computed_property(pos, end, ComputedPropertyData { expression })
            }
            _ => self.parse_identifier_name(true),
        }
    }

    /// Expression inside a computed property name. Only dotted identifier
    /// chains are representable; anything else is skipped.
    fn parse_computed_expression(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        if !self.is_identifier_or_keyword() {
            let mut depth = 0u32;
            while !self.is_token(EndOfFileToken) {
                match self.current_token {
                    OpenBracketToken => depth += 1,
                    CloseBracketToken => {
                        if depth == 0 {
                            break;
                        }
                        depth -= 1;
                    }
                    _ => {}
                }
                self.next_token();
            }
            return self.error_node();
        }
        let pos = self.token_pos();
        let mut left = self.parse_identifier_name(true);
        while self.parse_optional(DotToken) {
            let right = self.parse_identifier_name(true);
            let end = self
                .arena
                .get(right)
                .map(|n| n.end)
                .unwrap_or_else(|| self.token_pos());
            left = self.arena.add_name_pair(
                PropertyAccessExpression,
                pos,
                end,
                QualifiedNameData { left, right },
            );
        }
        left
    }

    fn is_index_signature_start(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if !p.is_identifier_or_keyword() {
                return false;
            }
            p.next_token();
            p.is_token(SyntaxKind::ColonToken)
        })
    }

    fn parse_index_signature(&mut self, pos: u32, flags: u32) -> NodeIndex {
        use SyntaxKind::*;
        self.parse_expected(OpenBracketToken);
        let param_pos = self.token_pos();
        let name = self.parse_identifier_name(true);
        self.parse_expected(ColonToken);
        let type_node = self.parse_type();
        let param = self.arena.add_parameter(
            param_pos,
            self.token_pos(),
            ParameterData {
                name,
                dot_dot_dot: false,
                question: false,
                type_node,
                initializer: NodeIndex::NONE,
                modifier_flags: modifier_flags::NONE,
            },
        );
        self.parse_expected(CloseBracketToken);
        let return_type = self.parse_return_type_annotation();
        self.arena.add_signature(
            IndexSignature,
            pos,
            self.token_pos(),
            SignatureData {
                name: NodeIndex::NONE,
                question: false,
                type_parameters: Vec::new(),
                parameters: vec![param],
                return_type,
                modifier_flags: flags,
            },
        )
    }

    // =========================================================================
    // Interfaces and type members
    // =========================================================================

    fn parse_interface_declaration(&mut self, pos: u32, flags: u32) -> NodeIndex {
        self.next_token(); // interface
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();
        let heritage_clauses = self.parse_heritage_clauses();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let members = self.parse_type_members_until_close_brace();
        let end = self.token_end();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.arena.add_interface(
            pos,
            end,
            InterfaceData {
                name,
                type_parameters,
                heritage_clauses,
                members,
                modifier_flags: flags,
            },
        )
    }

    /// Member list shared by interface bodies and type literals. The caller
    /// has consumed `{`; this stops at (without consuming) `}`.
    pub(crate) fn parse_type_members_until_close_brace(&mut self) -> NodeList {
        let mut members = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if self.parse_optional(SyntaxKind::SemicolonToken)
                || self.parse_optional(SyntaxKind::CommaToken)
            {
                continue;
            }
            let guard = self.token_pos();
            let member = self.parse_type_member();
            if member.is_some() {
                members.push(member);
            }
            if self.token_pos() == guard && !self.is_token(SyntaxKind::CloseBraceToken) {
                self.next_token();
            }
        }
        members
    }

    fn parse_type_member(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let pos = self.token_pos();
        let flags = self.parse_modifiers();

        if matches!(self.current_token, OpenParenToken | LessThanToken) {
            let type_parameters = self.parse_type_parameters();
            let parameters = self.parse_parameters();
            let return_type = self.parse_return_type_annotation();
            return self.arena.add_signature(
                CallSignature,
                pos,
                self.token_pos(),
                SignatureData {
                    name: NodeIndex::NONE,
                    question: false,
                    type_parameters,
                    parameters,
                    return_type,
                    modifier_flags: flags,
                },
            );
        }

        if self.is_token(NewKeyword)
            && self.look_ahead(|p| {
                p.next_token();
                matches!(p.current_token, OpenParenToken | LessThanToken)
            })
        {
            self.next_token();
            let type_parameters = self.parse_type_parameters();
            let parameters = self.parse_parameters();
            let return_type = self.parse_return_type_annotation();
            return self.arena.add_signature(
                ConstructSignature,
                pos,
                self.token_pos(),
                SignatureData {
                    name: NodeIndex::NONE,
                    question: false,
                    type_parameters,
                    parameters,
                    return_type,
                    modifier_flags: flags,
                },
            );
        }

        if self.is_token(OpenBracketToken) && self.is_index_signature_start() {
            return self.parse_index_signature(pos, flags);
        }

        let name = self.parse_property_name();
        let question = self.parse_optional(QuestionToken);
        if matches!(self.current_token, OpenParenToken | LessThanToken) {
            let type_parameters = self.parse_type_parameters();
            let parameters = self.parse_parameters();
            let return_type = self.parse_return_type_annotation();
            self.arena.add_signature(
                MethodSignature,
                pos,
                self.token_pos(),
                SignatureData {
                    name,
                    question,
                    type_parameters,
                    parameters,
                    return_type,
                    modifier_flags: flags,
                },
            )
        } else {
            let type_node = if self.parse_optional(ColonToken) {
                self.parse_type()
            } else {
                NodeIndex::NONE
            };
            self.arena.add_property(
                PropertySignature,
                pos,
                self.token_pos(),
                PropertyData {
                    name,
                    question,
                    type_node,
                    initializer: NodeIndex::NONE,
                    modifier_flags: flags,
                },
            )
        }
    }

    // =========================================================================
    // Heritage clauses
    // =========================================================================

    pub(crate) fn parse_heritage_clauses(&mut self) -> NodeList {
        use SyntaxKind::*;
        let mut clauses = Vec::new();
        while matches!(self.current_token, ExtendsKeyword | ImplementsKeyword) {
            let token = self.current_token;
            let clause_pos = self.token_pos();
            self.next_token();
            let mut types = Vec::new();
            loop {
                let type_pos = self.token_pos();
                let expression = self.parse_entity_expression();
                let type_arguments = if self.is_token(LessThanToken) {
                    Some(self.parse_type_arguments())
                } else {
                    None
                };
                types.push(self.arena.add_expr_with_type_args(
                    type_pos,
                    self.token_pos(),
                    super::node::ExprWithTypeArgsData {
                        expression,
                        type_arguments,
                    },
                ));
                if !self.parse_optional(CommaToken) {
                    break;
                }
            }
            clauses.push(self.arena.add_heritage_clause(
                clause_pos,
                self.token_pos(),
                HeritageClauseData { token, types },
            ));
        }
        clauses
    }

    /// `a.b.c` in expression position (heritage clause targets).
    pub(crate) fn parse_entity_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut left = self.parse_identifier_name(true);
        while self.parse_optional(SyntaxKind::DotToken) {
            let right = self.parse_identifier_name(true);
            let end = self
                .arena
                .get(right)
                .map(|n| n.end)
                .unwrap_or_else(|| self.token_pos());
            left = self.arena.add_name_pair(
                SyntaxKind::PropertyAccessExpression,
                pos,
                end,
                QualifiedNameData { left, right },
            );
        }
        left
    }

    // =========================================================================
    // Type aliases, enums, functions, variables, modules
    // =========================================================================

    fn parse_type_alias_declaration(&mut self, pos: u32, flags: u32) -> NodeIndex {
        self.next_token(); // type
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();
        self.parse_expected(SyntaxKind::EqualsToken);
        let type_node = self.parse_type();
        let end = self.token_pos();
        self.parse_optional(SyntaxKind::SemicolonToken);
        self.arena.add_type_alias(
            pos,
            end,
            TypeAliasData {
                name,
                type_parameters,
                type_node,
                modifier_flags: flags,
            },
        )
    }

    fn parse_enum_declaration(&mut self, pos: u32, flags: u32) -> NodeIndex {
        self.next_token(); // enum
        let name = self.parse_identifier();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut members = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let member_pos = self.token_pos();
            let member_name = self.parse_property_name();
            let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
                self.parse_initializer_value()
            } else {
                NodeIndex::NONE
            };
            members.push(self.arena.add_enum_member(
                member_pos,
                self.token_pos(),
                EnumMemberData {
                    name: member_name,
                    initializer,
                },
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        let end = self.token_end();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.arena.add_enum(
            pos,
            end,
            EnumData {
                name,
                members,
                modifier_flags: flags,
            },
        )
    }

    fn parse_function_declaration(&mut self, pos: u32, flags: u32) -> NodeIndex {
        self.next_token(); // function
        self.parse_optional(SyntaxKind::AsteriskToken);
        let name = if self.is_token(SyntaxKind::Identifier) {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters();
        let return_type = self.parse_return_type_annotation();
        self.skip_body();
        self.arena.add_signature(
            SyntaxKind::FunctionDeclaration,
            pos,
            self.token_pos(),
            SignatureData {
                name,
                question: false,
                type_parameters,
                parameters,
                return_type,
                modifier_flags: flags,
            },
        )
    }

    fn parse_variable_statement(&mut self, pos: u32, flags: u32) -> NodeIndex {
        use SyntaxKind::*;
        let declaration_flags = match self.current_token {
            LetKeyword => node_flags::LET,
            ConstKeyword => node_flags::CONST,
            _ => node_flags::NONE,
        };
        self.next_token();
        let mut declarations = Vec::new();
        loop {
            let decl_pos = self.token_pos();
            let name = if matches!(self.current_token, OpenBraceToken | OpenBracketToken) {
                // Destructuring patterns carry no single documentable name.
                self.skip_balanced();
                NodeIndex::NONE
            } else {
                self.parse_identifier()
            };
            self.parse_optional(ExclamationToken);
            let type_node = if self.parse_optional(ColonToken) {
                self.parse_type()
            } else {
                NodeIndex::NONE
            };
            let initializer = if self.parse_optional(EqualsToken) {
                self.parse_initializer_value()
            } else {
                NodeIndex::NONE
            };
            declarations.push(self.arena.add_variable_declaration(
                decl_pos,
                self.token_pos(),
                VariableDeclarationData {
                    name,
                    type_node,
                    initializer,
                },
            ));
            if !self.parse_optional(CommaToken) {
                break;
            }
        }
        self.parse_optional(SemicolonToken);
        self.arena.add_variable_statement(
            pos,
            self.token_pos(),
            VariableData {
                declarations,
                flags: declaration_flags,
                modifier_flags: flags,
            },
        )
    }

    fn parse_module_declaration(&mut self, pos: u32, flags: u32) -> NodeIndex {
        self.next_token(); // namespace | module
        if self.is_token(SyntaxKind::StringLiteral) {
            // Ambient module: record the name, skip or collect the body.
            let name_pos = self.token_pos();
            let name_end = self.token_end();
            let text = self.scanner.token_value_ref().to_string();
            let name = self.arena.add_literal(
                SyntaxKind::StringLiteral,
                name_pos,
                name_end,
                LiteralData { text },
            );
            self.next_token();
            let statements = if self.parse_optional(SyntaxKind::OpenBraceToken) {
                let statements = self.parse_statements_until(SyntaxKind::CloseBraceToken);
                self.parse_expected(SyntaxKind::CloseBraceToken);
                statements
            } else {
                self.parse_optional(SyntaxKind::SemicolonToken);
                Vec::new()
            };
            return self.arena.add_module(
                pos,
                self.token_pos(),
                ModuleData {
                    name,
                    statements,
                    modifier_flags: flags,
                },
            );
        }
        self.parse_module_name_and_body(pos, flags)
    }

    /// Parses `A.B.C { ... }` as nested module declarations, one per dotted
    /// segment, the way the checker models them.
    fn parse_module_name_and_body(&mut self, pos: u32, flags: u32) -> NodeIndex {
        let name = self.parse_identifier_name(true);
        let statements = if self.parse_optional(SyntaxKind::DotToken) {
            let inner_pos = self.token_pos();
            vec![self.parse_module_name_and_body(inner_pos, flags)]
        } else {
            self.parse_expected(SyntaxKind::OpenBraceToken);
            let statements = self.parse_statements_until(SyntaxKind::CloseBraceToken);
            self.parse_expected(SyntaxKind::CloseBraceToken);
            statements
        };
        self.arena.add_module(
            pos,
            self.token_pos(),
            ModuleData {
                name,
                statements,
                modifier_flags: flags,
            },
        )
    }

    // =========================================================================
    // Imports and exports
    // =========================================================================

    fn parse_import_declaration(&mut self, pos: u32) -> NodeIndex {
        use SyntaxKind::*;
        self.next_token(); // import

        // `import "side-effect";`
        if self.is_token(StringLiteral) {
            let module_specifier = self.parse_string_literal_node();
            self.parse_optional(SemicolonToken);
            return self.arena.add_import_decl(
                pos,
                self.token_pos(),
                ImportDeclData {
                    default_name: NodeIndex::NONE,
                    namespace_name: NodeIndex::NONE,
                    named: Vec::new(),
                    module_specifier,
                },
            );
        }

        let mut default_name = NodeIndex::NONE;
        let mut namespace_name = NodeIndex::NONE;
        let mut named = Vec::new();

        if self.is_token(Identifier) {
            // `import x = require("mod");`
            if self.look_ahead(|p| {
                p.next_token();
                p.is_token(EqualsToken)
            }) {
                let name = self.parse_identifier();
                self.parse_expected(EqualsToken);
                let module_specifier = if self.parse_optional(RequireKeyword) {
                    self.parse_expected(OpenParenToken);
                    let spec = self.parse_string_literal_node();
                    self.parse_expected(CloseParenToken);
                    spec
                } else {
                    // `import x = A.B;` — no file to resolve against.
                    let _ = self.parse_entity_expression();
                    NodeIndex::NONE
                };
                self.parse_optional(SemicolonToken);
                return self.arena.add_import_decl(
                    pos,
                    self.token_pos(),
                    ImportDeclData {
                        default_name: name,
                        namespace_name: NodeIndex::NONE,
                        named: Vec::new(),
                        module_specifier,
                    },
                );
            }
            default_name = self.parse_identifier();
            self.parse_optional(CommaToken);
        }

        if self.parse_optional(AsteriskToken) {
            self.parse_expected(AsKeyword);
            namespace_name = self.parse_identifier();
        } else if self.parse_optional(OpenBraceToken) {
            while !self.is_token(CloseBraceToken) && !self.is_token(EndOfFileToken) {
                let spec_pos = self.token_pos();
                let first = self.parse_identifier_name(true);
                let (property_name, name) = if self.parse_optional(AsKeyword) {
                    (first, self.parse_identifier_name(true))
                } else {
                    (NodeIndex::NONE, first)
                };
                named.push(self.arena.add_specifier(
                    ImportSpecifier,
                    spec_pos,
                    self.token_pos(),
                    SpecifierData {
                        property_name,
                        name,
                    },
                ));
                if !self.parse_optional(CommaToken) {
                    break;
                }
            }
            self.parse_expected(CloseBraceToken);
        }

        self.parse_expected(FromKeyword);
        let module_specifier = self.parse_string_literal_node();
        self.parse_optional(SemicolonToken);
        self.arena.add_import_decl(
            pos,
            self.token_pos(),
            ImportDeclData {
                default_name,
                namespace_name,
                named,
                module_specifier,
            },
        )
    }

    fn parse_export_statement(&mut self, pos: u32) -> NodeIndex {
        use SyntaxKind::*;
        self.next_token(); // export
        match self.current_token {
            EqualsToken | DefaultKeyword => {
                let flags = if self.is_token(DefaultKeyword) {
                    modifier_flags::DEFAULT
                } else {
                    modifier_flags::NONE
                };
                self.next_token();
                let expression = if self.is_token(Identifier) {
                    self.parse_identifier()
                } else {
                    self.skip_expression();
                    NodeIndex::NONE
                };
                self.parse_optional(SemicolonToken);
                self.arena.add_export_assignment(
                    pos,
                    self.token_pos(),
                    ExportAssignmentData {
                        expression,
                        modifier_flags: flags,
                    },
                )
            }
            AsteriskToken => {
                self.next_token();
                if self.parse_optional(AsKeyword) {
                    let _ = self.parse_identifier_name(true);
                }
                self.parse_expected(FromKeyword);
                let module_specifier = self.parse_string_literal_node();
                self.parse_optional(SemicolonToken);
                self.arena.add_export_decl(
                    pos,
                    self.token_pos(),
                    ExportDeclData {
                        specifiers: Vec::new(),
                        module_specifier,
                    },
                )
            }
            _ => {
                self.parse_expected(OpenBraceToken);
                let mut specifiers = Vec::new();
                while !self.is_token(CloseBraceToken) && !self.is_token(EndOfFileToken) {
                    let spec_pos = self.token_pos();
                    let first = self.parse_identifier_name(true);
                    let (property_name, name) = if self.parse_optional(AsKeyword) {
                        (first, self.parse_identifier_name(true))
                    } else {
                        (NodeIndex::NONE, first)
                    };
                    specifiers.push(self.arena.add_specifier(
                        ExportSpecifier,
                        spec_pos,
                        self.token_pos(),
                        SpecifierData {
                            property_name,
                            name,
                        },
                    ));
                    if !self.parse_optional(CommaToken) {
                        break;
                    }
                }
                self.parse_expected(CloseBraceToken);
                let module_specifier = if self.parse_optional(FromKeyword) {
                    self.parse_string_literal_node()
                } else {
                    NodeIndex::NONE
                };
                self.parse_optional(SemicolonToken);
                self.arena.add_export_decl(
                    pos,
                    self.token_pos(),
                    ExportDeclData {
                        specifiers,
                        module_specifier,
                    },
                )
            }
        }
    }

    pub(crate) fn parse_string_literal_node(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::StringLiteral) {
            let pos = self.token_pos();
            let end = self.token_end();
            let text = self.scanner.token_value_ref().to_string();
            let index = self
                .arena
                .add_literal(SyntaxKind::StringLiteral, pos, end, LiteralData { text });
            self.next_token();
            index
        } else {
            self.error_at_current("String literal expected");
            NodeIndex::NONE
        }
    }

    // =========================================================================
    // Parameters and initializers
    // =========================================================================

    /// `( parameter, ... )`
    pub(crate) fn parse_parameters(&mut self) -> NodeList {
        use SyntaxKind::*;
        let mut parameters = Vec::new();
        if !self.parse_expected(OpenParenToken) {
            return parameters;
        }
        while !self.is_token(CloseParenToken) && !self.is_token(EndOfFileToken) {
            let guard = self.token_pos();
            parameters.push(self.parse_parameter());
            if !self.parse_optional(CommaToken) && self.token_pos() == guard {
                break;
            }
        }
        self.parse_expected(CloseParenToken);
        parameters
    }

    fn parse_parameter(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let pos = self.token_pos();
        let flags = self.parse_modifiers();
        let dot_dot_dot = self.parse_optional(DotDotDotToken);
        let name = if matches!(self.current_token, OpenBraceToken | OpenBracketToken) {
            self.skip_balanced();
            NodeIndex::NONE
        } else {
            self.parse_identifier_name(true)
        };
        let question = self.parse_optional(QuestionToken);
        let type_node = if self.parse_optional(ColonToken) {
            self.parse_type()
        } else {
            NodeIndex::NONE
        };
        let initializer = if self.parse_optional(EqualsToken) {
            self.parse_initializer_value()
        } else {
            NodeIndex::NONE
        };
        self.arena.add_parameter(
            pos,
            self.token_pos(),
            ParameterData {
                name,
                dot_dot_dot,
                question,
                type_node,
                initializer,
                modifier_flags: flags,
            },
        )
    }

    /// An initializer after `=`. Only literal initializers are representable
    /// in documentation; anything else is skipped.
    pub(crate) fn parse_initializer_value(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let token = self.current_token;
        match token {
            StringLiteral | NumericLiteral | NoSubstitutionTemplateLiteral => {
                let pos = self.token_pos();
                let end = self.token_end();
                let kind = self.current_token;
                let text = self.scanner.token_value_ref().to_string();
                let index = self.arena.add_literal(kind, pos, end, LiteralData { text });
                self.next_token();
                index
            }
            MinusToken
                if self.look_ahead(|p| {
                    p.next_token();
                    p.is_token(NumericLiteral)
                }) =>
            {
                let pos = self.token_pos();
                self.next_token();
                let end = self.token_end();
                let text = format!("-{}", self.scanner.token_value_ref());
                let index = self
                    .arena
                    .add_literal(NumericLiteral, pos, end, LiteralData { text });
                self.next_token();
                index
            }
            TrueKeyword | FalseKeyword | NullKeyword | UndefinedKeyword => {
                let pos = self.token_pos();
                let end = self.token_end();
                let kind = self.current_token;
                let index = self.arena.add_token(kind, pos, end);
                self.next_token();
                index
            }
            _ => {
                self.skip_expression();
                NodeIndex::NONE
            }
        }
    }

    // =========================================================================
    // Skipping
    // =========================================================================

    /// Skip a balanced `{ ... }` block, including nested blocks.
    pub(crate) fn skip_block(&mut self) {
        let mut depth = 0u32;
        loop {
            match self.current_token {
                SyntaxKind::OpenBraceToken => {
                    depth += 1;
                    self.next_token();
                }
                SyntaxKind::CloseBraceToken => {
                    self.next_token();
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        break;
                    }
                }
                SyntaxKind::EndOfFileToken => break,
                _ => {
                    self.next_token();
                }
            }
        }
    }

    /// Skip one balanced bracket group of any flavor (destructuring
    /// patterns).
    fn skip_balanced(&mut self) {
        use SyntaxKind::*;
        let mut depth = 0u32;
        loop {
            match self.current_token {
                OpenBraceToken | OpenBracketToken | OpenParenToken => {
                    depth += 1;
                    self.next_token();
                }
                CloseBraceToken | CloseBracketToken | CloseParenToken => {
                    self.next_token();
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        break;
                    }
                }
                EndOfFileToken => break,
                _ => {
                    self.next_token();
                }
            }
        }
    }

    /// Skip an expression up to (not including) a statement or list boundary.
    pub(crate) fn skip_expression(&mut self) {
        use SyntaxKind::*;
        let mut depth = 0u32;
        loop {
            match self.current_token {
                OpenBraceToken | OpenParenToken | OpenBracketToken => {
                    depth += 1;
                    self.next_token();
                }
                CloseBraceToken | CloseParenToken | CloseBracketToken => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                    self.next_token();
                }
                SemicolonToken | CommaToken if depth == 0 => break,
                EndOfFileToken => break,
                _ => {
                    self.next_token();
                }
            }
        }
    }

    /// Skip a whole undocumented statement (expression statements, control
    /// flow, anything outside the declaration grammar).
    pub(crate) fn skip_statement(&mut self) {
        use SyntaxKind::*;
        trace!(pos = self.token_pos(), "skipping undocumented statement");
        let mut depth = 0u32;
        loop {
            match self.current_token {
                OpenBraceToken | OpenParenToken | OpenBracketToken => {
                    depth += 1;
                    self.next_token();
                }
                CloseBraceToken => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                    self.next_token();
                    // A block closing at depth zero ends the statement
                    // (if/for/while bodies, function expressions).
                    if depth == 0 {
                        break;
                    }
                }
                CloseParenToken | CloseBracketToken => {
                    depth = depth.saturating_sub(1);
                    self.next_token();
                }
                SemicolonToken if depth == 0 => {
                    self.next_token();
                    break;
                }
                EndOfFileToken => break,
                _ => {
                    self.next_token();
                }
            }
        }
    }
}
