//! Parser state - type grammar.

use tydoc_scanner::SyntaxKind;

use super::node::{
    CompositeTypeData, ConditionalTypeData, IndexedAccessData, LiteralData, MappedTypeData,
    QualifiedNameData, SignatureData, TypeLiteralData, TypeOperatorData, TypeParameterData,
    TypePredicateData, TypeRefData, WrappedTypeData,
};
use super::state::ParserState;
use super::{NodeIndex, NodeList};

impl ParserState {
    /// `<T, U extends V = W, ...>`; empty when no list is written.
    pub(crate) fn parse_type_parameters(&mut self) -> NodeList {
        use SyntaxKind::*;
        let mut type_parameters = Vec::new();
        if !self.parse_optional(LessThanToken) {
            return type_parameters;
        }
        while !self.is_token(GreaterThanToken) && !self.is_token(EndOfFileToken) {
            let pos = self.token_pos();
            let name = self.parse_identifier_name(true);
            let constraint = if self.parse_optional(ExtendsKeyword) {
                self.parse_type()
            } else {
                NodeIndex::NONE
            };
            let default = if self.parse_optional(EqualsToken) {
                self.parse_type()
            } else {
                NodeIndex::NONE
            };
            type_parameters.push(self.arena.add_type_parameter(
                pos,
                self.token_pos(),
                TypeParameterData {
                    name,
                    constraint,
                    default,
                },
            ));
            if !self.parse_optional(CommaToken) {
                break;
            }
        }
        self.parse_expected(GreaterThanToken);
        type_parameters
    }

    /// `<T, U, ...>` in reference position.
    pub(crate) fn parse_type_arguments(&mut self) -> NodeList {
        use SyntaxKind::*;
        let mut arguments = Vec::new();
        self.parse_expected(LessThanToken);
        while !self.is_token(GreaterThanToken) && !self.is_token(EndOfFileToken) {
            arguments.push(self.parse_type());
            if !self.parse_optional(CommaToken) {
                break;
            }
        }
        self.parse_expected(GreaterThanToken);
        arguments
    }

    /// Full type grammar entry point.
    pub(crate) fn parse_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let check_type = self.parse_non_conditional_type();
        if self.parse_optional(SyntaxKind::ExtendsKeyword) {
            let extends_type = self.parse_non_conditional_type();
            self.parse_expected(SyntaxKind::QuestionToken);
            let true_type = self.parse_type();
            self.parse_expected(SyntaxKind::ColonToken);
            let false_type = self.parse_type();
            return self.arena.add_conditional_type(
                pos,
                self.token_pos(),
                ConditionalTypeData {
                    check_type,
                    extends_type,
                    true_type,
                    false_type,
                },
            );
        }
        check_type
    }

    /// Everything except the trailing `extends ... ? ... : ...` form. Needed
    /// because a conditional's extends-type must not recurse into another
    /// conditional.
    fn parse_non_conditional_type(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        if self.is_token(LessThanToken) {
            return self.parse_function_type(FunctionType);
        }
        if self.is_token(NewKeyword) {
            let pos = self.token_pos();
            self.next_token();
            return self.parse_function_type_rest(ConstructorType, pos);
        }
        if self.is_token(OpenParenToken) && self.is_start_of_function_type() {
            return self.parse_function_type(FunctionType);
        }
        self.parse_union_type()
    }

    fn parse_function_type(&mut self, kind: SyntaxKind) -> NodeIndex {
        let pos = self.token_pos();
        self.parse_function_type_rest(kind, pos)
    }

    fn parse_function_type_rest(&mut self, kind: SyntaxKind, pos: u32) -> NodeIndex {
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters();
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken);
        let return_type = self.parse_type();
        self.arena.add_signature(
            kind,
            pos,
            self.token_pos(),
            SignatureData {
                name: NodeIndex::NONE,
                question: false,
                type_parameters,
                parameters,
                return_type,
                modifier_flags: super::modifier_flags::NONE,
            },
        )
    }

    /// `( ... ) =>` distinguishes a function type from a parenthesized type.
    fn is_start_of_function_type(&mut self) -> bool {
        use SyntaxKind::*;
        self.look_ahead(|p| {
            let mut depth = 0u32;
            loop {
                match p.current_token {
                    OpenParenToken => {
                        depth += 1;
                        p.next_token();
                    }
                    CloseParenToken => {
                        p.next_token();
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    EndOfFileToken => return false,
                    _ => {
                        p.next_token();
                    }
                }
            }
            p.is_token(EqualsGreaterThanToken)
        })
    }

    fn parse_union_type(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let pos = self.token_pos();
        self.parse_optional(BarToken);
        let first = self.parse_intersection_type();
        if !self.is_token(BarToken) {
            return first;
        }
        let mut types = vec![first];
        while self.parse_optional(BarToken) {
            types.push(self.parse_intersection_type());
        }
        self.arena
            .add_composite_type(UnionType, pos, self.token_pos(), CompositeTypeData { types })
    }

    fn parse_intersection_type(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let pos = self.token_pos();
        self.parse_optional(AmpersandToken);
        let first = self.parse_type_operator();
        if !self.is_token(AmpersandToken) {
            return first;
        }
        let mut types = vec![first];
        while self.parse_optional(AmpersandToken) {
            types.push(self.parse_type_operator());
        }
        self.arena.add_composite_type(
            IntersectionType,
            pos,
            self.token_pos(),
            CompositeTypeData { types },
        )
    }

    fn parse_type_operator(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        match self.current_token {
            KeyOfKeyword | UniqueKeyword | ReadonlyKeyword => {
                let pos = self.token_pos();
                let operator = self.current_token;
                self.next_token();
                let type_node = self.parse_type_operator();
                self.arena.add_type_operator(
                    pos,
                    self.token_pos(),
                    TypeOperatorData {
                        operator,
                        type_node,
                    },
                )
            }
            InferKeyword => {
                let pos = self.token_pos();
                self.next_token();
                let param_pos = self.token_pos();
                let name = self.parse_identifier_name(true);
                let type_parameter = self.arena.add_type_parameter(
                    param_pos,
                    self.token_pos(),
                    TypeParameterData {
                        name,
                        constraint: NodeIndex::NONE,
                        default: NodeIndex::NONE,
                    },
                );
                self.arena.add_wrapped_type(
                    InferType,
                    pos,
                    self.token_pos(),
                    WrappedTypeData {
                        inner: type_parameter,
                    },
                )
            }
            _ => self.parse_postfix_type(),
        }
    }

    /// `T[]` array suffixes and `T[K]` indexed access, left-associative.
    fn parse_postfix_type(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let pos = self.token_pos();
        let mut base = self.parse_non_array_type();
        while self.is_token(OpenBracketToken) {
            self.next_token();
            if self.parse_optional(CloseBracketToken) {
                base = self.arena.add_wrapped_type(
                    ArrayType,
                    pos,
                    self.token_pos(),
                    WrappedTypeData { inner: base },
                );
            } else {
                let index_type = self.parse_type();
                self.parse_expected(CloseBracketToken);
                base = self.arena.add_indexed_access_type(
                    pos,
                    self.token_pos(),
                    IndexedAccessData {
                        object_type: base,
                        index_type,
                    },
                );
            }
        }
        base
    }

    fn parse_non_array_type(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let pos = self.token_pos();
        // The minus guard uses lookahead; match on a copy of the token.
        let token = self.current_token;
        match token {
            kind if kind.is_type_keyword() => {
                let end = self.token_end();
                self.next_token();
                self.arena.add_token(kind, pos, end)
            }
            ThisKeyword => {
                let end = self.token_end();
                self.next_token();
                self.arena.add_token(ThisKeyword, pos, end)
            }
            StringLiteral | NumericLiteral | NoSubstitutionTemplateLiteral => {
                let end = self.token_end();
                let kind = self.current_token;
                let text = self.scanner.token_value_ref().to_string();
                let literal = self.arena.add_literal(kind, pos, end, LiteralData { text });
                self.next_token();
                self.arena.add_wrapped_type(
                    LiteralType,
                    pos,
                    end,
                    WrappedTypeData { inner: literal },
                )
            }
            MinusToken
                if self.look_ahead(|p| {
                    p.next_token();
                    p.is_token(NumericLiteral)
                }) =>
            {
                self.next_token();
                let end = self.token_end();
                let text = format!("-{}", self.scanner.token_value_ref());
                let literal =
                    self.arena
                        .add_literal(NumericLiteral, pos, end, LiteralData { text });
                self.next_token();
                self.arena.add_wrapped_type(
                    LiteralType,
                    pos,
                    end,
                    WrappedTypeData { inner: literal },
                )
            }
            TrueKeyword | FalseKeyword | NullKeyword => {
                let end = self.token_end();
                let inner = self.arena.add_token(token, pos, end);
                self.next_token();
                self.arena
                    .add_wrapped_type(LiteralType, pos, end, WrappedTypeData { inner })
            }
            OpenParenToken => {
                self.next_token();
                let inner = self.parse_type();
                let end = self.token_end();
                self.parse_expected(CloseParenToken);
                self.arena
                    .add_wrapped_type(ParenthesizedType, pos, end, WrappedTypeData { inner })
            }
            OpenBracketToken => self.parse_tuple_type(pos),
            OpenBraceToken => {
                if self.is_mapped_type_start() {
                    self.parse_mapped_type(pos)
                } else {
                    self.parse_type_literal(pos)
                }
            }
            TypeOfKeyword => {
                self.next_token();
                let entity = self.parse_entity_name();
                self.arena.add_wrapped_type(
                    TypeQuery,
                    pos,
                    self.token_pos(),
                    WrappedTypeData { inner: entity },
                )
            }
            _ if self.is_identifier_or_keyword() => self.parse_type_reference(pos),
            _ => {
                self.error_at_current("Type expected");
                self.error_node()
            }
        }
    }

    fn parse_tuple_type(&mut self, pos: u32) -> NodeIndex {
        use SyntaxKind::*;
        self.next_token(); // [
        let mut types = Vec::new();
        while !self.is_token(CloseBracketToken) && !self.is_token(EndOfFileToken) {
            // A rest marker precedes any label: `[...rest: boolean[]]`.
            self.parse_optional(DotDotDotToken);
            // Tolerate labeled members: `[x: string, y?: number]`.
            let labeled = self.look_ahead(|p| {
                if !p.is_identifier_or_keyword() {
                    return false;
                }
                p.next_token();
                if p.is_token(QuestionToken) {
                    p.next_token();
                }
                p.is_token(ColonToken)
            });
            if labeled {
                self.parse_identifier_name(true);
                self.parse_optional(QuestionToken);
                self.parse_expected(ColonToken);
            }
            types.push(self.parse_type());
            if !self.parse_optional(CommaToken) {
                break;
            }
        }
        let end = self.token_end();
        self.parse_expected(CloseBracketToken);
        self.arena
            .add_composite_type(TupleType, pos, end, CompositeTypeData { types })
    }

    /// `{ [K in T]: U }` vs an ordinary type literal, decided by lookahead.
    fn is_mapped_type_start(&mut self) -> bool {
        use SyntaxKind::*;
        self.look_ahead(|p| {
            p.next_token(); // past {
            if matches!(p.current_token, PlusToken | MinusToken) {
                p.next_token();
            }
            if p.is_token(ReadonlyKeyword) {
                p.next_token();
            }
            if !p.is_token(OpenBracketToken) {
                return false;
            }
            p.next_token();
            if !p.is_identifier_or_keyword() {
                return false;
            }
            p.next_token();
            p.is_token(InKeyword)
        })
    }

    fn parse_mapped_type(&mut self, pos: u32) -> NodeIndex {
        use SyntaxKind::*;
        self.next_token(); // {
        if matches!(self.current_token, PlusToken | MinusToken) {
            self.next_token();
        }
        self.parse_optional(ReadonlyKeyword);
        self.parse_expected(OpenBracketToken);
        let param_pos = self.token_pos();
        let name = self.parse_identifier_name(true);
        self.parse_expected(InKeyword);
        let constraint = self.parse_type();
        if self.parse_optional(AsKeyword) {
            // Key remapping is not representable in the output; parse and
            // drop the remapped name type.
            let _ = self.parse_type();
        }
        let type_parameter = self.arena.add_type_parameter(
            param_pos,
            self.token_pos(),
            TypeParameterData {
                name,
                constraint,
                default: NodeIndex::NONE,
            },
        );
        self.parse_expected(CloseBracketToken);
        if matches!(self.current_token, PlusToken | MinusToken) {
            self.next_token();
        }
        self.parse_optional(QuestionToken);
        let type_node = if self.parse_optional(ColonToken) {
            self.parse_type()
        } else {
            NodeIndex::NONE
        };
        self.parse_optional(SemicolonToken);
        self.parse_optional(CommaToken);
        let end = self.token_end();
        self.parse_expected(CloseBraceToken);
        self.arena.add_mapped_type(
            pos,
            end,
            MappedTypeData {
                type_parameter,
                type_node,
            },
        )
    }

    fn parse_type_literal(&mut self, pos: u32) -> NodeIndex {
        self.next_token(); // {
        let members = self.parse_type_members_until_close_brace();
        let end = self.token_end();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.arena
            .add_type_literal(pos, end, TypeLiteralData { members })
    }

    fn parse_type_reference(&mut self, pos: u32) -> NodeIndex {
        let type_name = self.parse_entity_name();
        let type_arguments = if self.is_token(SyntaxKind::LessThanToken) {
            Some(self.parse_type_arguments())
        } else {
            None
        };
        self.arena.add_type_ref(
            pos,
            self.token_pos(),
            TypeRefData {
                type_name,
                type_arguments,
            },
        )
    }

    /// `a.b.c` in type position; keywords are valid after a dot
    /// (`BigNumber.number`).
    pub(crate) fn parse_entity_name(&mut self) -> NodeIndex {
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
                SyntaxKind::QualifiedName,
                pos,
                end,
                QualifiedNameData { left, right },
            );
        }
        left
    }

    /// Return type annotation after `:`, allowing `x is T` predicates.
    pub(crate) fn parse_return_type_annotation(&mut self) -> NodeIndex {
        if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type_or_predicate()
        } else {
            NodeIndex::NONE
        }
    }

    fn parse_type_or_predicate(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let is_predicate = (self.is_token(Identifier) || self.is_token(ThisKeyword))
            && self.look_ahead(|p| {
                p.next_token();
                p.is_token(IsKeyword)
            });
        if is_predicate {
            let pos = self.token_pos();
            let parameter_name = self.parse_identifier_name(true);
            self.parse_expected(IsKeyword);
            let type_node = self.parse_type();
            self.arena.add_type_predicate(
                pos,
                self.token_pos(),
                TypePredicateData {
                    parameter_name,
                    type_node,
                },
            )
        } else {
            self.parse_type()
        }
    }
}
