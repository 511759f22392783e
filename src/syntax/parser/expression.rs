use crate::{
    ast::{BinaryOperator, Expr, ExprKind, MatchCase, Pattern, PatternKind, UnaryOperator},
    error::{Message, ParseResult},
    runtime::value::Value,
    syntax::{parser::Parser, token::TokenKind},
};

/// The operator of an assignment token: `Some(None)` for `=`, the combined
/// operator for compound assignments.
const fn assignment_operator(kind: TokenKind) -> Option<Option<BinaryOperator>> {
    match kind {
        TokenKind::Equal => Some(None),
        TokenKind::PlusEqual
        | TokenKind::MinusEqual
        | TokenKind::AsteriskEqual
        | TokenKind::DoubleAsteriskEqual
        | TokenKind::SlashEqual
        | TokenKind::PercentEqual
        | TokenKind::AmpersandEqual
        | TokenKind::VerticalBarEqual
        | TokenKind::CircumflexEqual
        | TokenKind::DoubleLessThanEqual
        | TokenKind::DoubleGreaterThanEqual
        | TokenKind::DoubleQuestionEqual => Some(kind.binary_operator()),
        _ => None,
    }
}

const LOGICAL: [TokenKind; 6] = [TokenKind::Ampersand,
                                 TokenKind::DoubleAmpersand,
                                 TokenKind::VerticalBar,
                                 TokenKind::DoubleVerticalBar,
                                 TokenKind::Circumflex,
                                 TokenKind::DoubleQuestion];

const RELATIONAL: [TokenKind; 12] = [TokenKind::DoubleEqual,
                                     TokenKind::ExclamationEqual,
                                     TokenKind::TripleEqual,
                                     TokenKind::ExclamationDoubleEqual,
                                     TokenKind::LessThan,
                                     TokenKind::LessThanEqual,
                                     TokenKind::GreaterThan,
                                     TokenKind::GreaterThanEqual,
                                     TokenKind::StartsWith,
                                     TokenKind::EndsWith,
                                     TokenKind::Contains,
                                     TokenKind::Matches];

const ADDITIVE: [TokenKind; 2] = [TokenKind::Plus, TokenKind::Minus];

const MULTIPLICATIVE: [TokenKind; 5] = [TokenKind::Asterisk,
                                        TokenKind::Slash,
                                        TokenKind::Percent,
                                        TokenKind::DoubleLessThan,
                                        TokenKind::DoubleGreaterThan];

/// Combines two operands, the span covering both.
pub(super) fn binary(op: BinaryOperator, left: Expr, right: Expr) -> Expr {
    let span = left.span.to(right.span);
    Expr::new(ExprKind::Binary { op,
                                 left: Box::new(left),
                                 right: Box::new(right) },
              span)
}

impl<I> Parser<I> where I: Iterator<Item = char>
{
    /// Parses an assignment, or any expression of a higher precedence.
    ///
    /// Grammar: `assignment := ternary (assign_op assignment)?`
    ///
    /// # Errors
    /// `InvalidLValue` when the left operand of an assignment cannot be
    /// assigned.
    pub(super) fn assignment(&mut self) -> ParseResult<Option<Expr>> {
        let Some(target) = self.ternary()? else {
            return Ok(None);
        };
        let Some(op) = assignment_operator(self.peek().kind) else {
            return Ok(Some(target));
        };
        self.consume();
        if !target.is_reference() {
            return Err(self.semantic_error(target.span, Message::InvalidLValue));
        }
        let value = self.required(Self::assignment, Message::ExpressionRequired)?;
        let span = target.span.to(value.span);
        Ok(Some(Expr::new(ExprKind::Assignment { op,
                                                 target: Box::new(target),
                                                 value: Box::new(value) },
                          span)))
    }

    /// Runs `rule`, unless the current token is `throw`, which then
    /// introduces a throw expression.
    pub(super) fn throw_or(&mut self,
                           rule: impl FnOnce(&mut Self) -> ParseResult<Option<Expr>>)
                           -> ParseResult<Option<Expr>> {
        match self.accept(TokenKind::Throw) {
            Some(token) => {
                let value = self.required_expression()?;
                let span = token.span.to(value.span);
                Ok(Some(Expr::new(ExprKind::Throw(Box::new(value)), span)))
            },
            None => rule(self),
        }
    }

    /// Grammar: `ternary := logical ("?" expression ":" expression)?`
    ///
    /// Both branches are full expressions, assignments included.
    fn ternary(&mut self) -> ParseResult<Option<Expr>> {
        let Some(condition) = self.logical()? else {
            return Ok(None);
        };
        if self.accept(TokenKind::Question).is_none() {
            return Ok(Some(condition));
        }
        let then_branch =
            self.required(|parser| parser.throw_or(Self::expression), Message::ExpressionRequired)?;
        self.match_token(TokenKind::Colon)?;
        let else_branch =
            self.required(|parser| parser.throw_or(Self::expression), Message::ExpressionRequired)?;
        let span = condition.span.to(else_branch.span);
        Ok(Some(Expr::new(ExprKind::Ternary { condition:   Box::new(condition),
                                              then_branch: Box::new(then_branch),
                                              else_branch: Box::new(else_branch), },
                          span)))
    }

    /// Grammar: `logical := relational (logical_op relational)*`
    ///
    /// The right operand of `??` is a whole expression, possibly a throw
    /// expression, so it ends the chain.
    fn logical(&mut self) -> ParseResult<Option<Expr>> {
        let Some(mut left) = self.relational()? else {
            return Ok(None);
        };
        while self.try_match_any(&LOGICAL) {
            let Some(op) = self.consume().kind.binary_operator() else {
                break;
            };
            let right = if op == BinaryOperator::IfEmpty {
                self.required(|parser| parser.throw_or(Self::expression),
                              Message::ExpressionRequired)?
            } else {
                self.required(Self::relational, Message::ExpressionRequired)?
            };
            left = binary(op, left, right);
        }
        Ok(Some(left))
    }

    /// Grammar: `relational := additive ((rel_op additive) | ("not"? "in"
    /// additive) | ("is" pattern))*`
    fn relational(&mut self) -> ParseResult<Option<Expr>> {
        let Some(mut left) = self.additive()? else {
            return Ok(None);
        };
        loop {
            let kind = self.peek().kind;
            left = if RELATIONAL.contains(&kind) {
                let Some(op) = self.consume().kind.binary_operator() else {
                    break;
                };
                let right = self.required(Self::additive, Message::ExpressionRequired)?;
                binary(op, left, right)
            } else if kind == TokenKind::In {
                self.consume();
                let collection = self.required(Self::additive, Message::ExpressionRequired)?;
                binary(BinaryOperator::Contains, collection, left)
            } else if kind == TokenKind::Not && self.look(2) == TokenKind::In {
                self.consume();
                self.consume();
                let collection = self.required(Self::additive, Message::ExpressionRequired)?;
                let contains = binary(BinaryOperator::Contains, collection, left);
                let span = contains.span;
                Expr::new(ExprKind::Unary { op:      UnaryOperator::Not,
                                            operand: Box::new(contains), },
                          span)
            } else if kind == TokenKind::Is {
                self.consume();
                let pattern = self.required(Self::simple_pattern, Message::PatternRequired)?;
                is_check(left, pattern)
            } else {
                break;
            };
        }
        Ok(Some(left))
    }

    /// Grammar: `additive := multiplicative (("+" | "-") multiplicative)*`
    fn additive(&mut self) -> ParseResult<Option<Expr>> {
        self.left_associative(&ADDITIVE, Self::multiplicative)
    }

    /// Grammar: `multiplicative := exponent (("*" | "/" | "%" | "<<" | ">>")
    /// exponent)*`
    fn multiplicative(&mut self) -> ParseResult<Option<Expr>> {
        self.left_associative(&MULTIPLICATIVE, Self::exponent)
    }

    /// Grammar: `exponent := prefix ("**" exponent)?`
    fn exponent(&mut self) -> ParseResult<Option<Expr>> {
        let Some(base) = self.prefix()? else {
            return Ok(None);
        };
        if self.accept(TokenKind::DoubleAsterisk).is_none() {
            return Ok(Some(base));
        }
        let exponent = self.required(Self::exponent, Message::ExpressionRequired)?;
        Ok(Some(binary(BinaryOperator::Power, base, exponent)))
    }

    fn left_associative(&mut self,
                        operators: &[TokenKind],
                        mut operand: impl FnMut(&mut Self) -> ParseResult<Option<Expr>>)
                        -> ParseResult<Option<Expr>> {
        let Some(mut left) = operand(self)? else {
            return Ok(None);
        };
        while self.try_match_any(operators) {
            let Some(op) = self.consume().kind.binary_operator() else {
                break;
            };
            let right = self.required(&mut operand, Message::ExpressionRequired)?;
            left = binary(op, left, right);
        }
        Ok(Some(left))
    }
}

/// `value is pattern`: a type check for a plain type name, a two case match
/// otherwise.
fn is_check(operand: Expr, pattern: Pattern) -> Expr {
    let span = operand.span.to(pattern.span);
    if let PatternKind::Type(type_name) = pattern.kind {
        return Expr::new(ExprKind::TypeCheck { operand: Box::new(operand),
                                               type_name },
                         span);
    }
    let case = |pattern: Pattern, value: bool| {
        MatchCase { span: pattern.span,
                    result: Expr::new(ExprKind::Literal(Value::Boolean(value)), pattern.span),
                    pattern,
                    guard: None }
    };
    let otherwise = Pattern::new(PatternKind::Always, pattern.span);
    Expr::new(ExprKind::Match { subject: Box::new(operand),
                                cases:   vec![case(pattern, true), case(otherwise, false)], },
              span)
}
