use crate::{
    ast::{Expr, ExprKind, UnaryOperator},
    error::{Message, ParseResult},
    syntax::{parser::Parser, span::Span, token::TokenKind},
};

fn unary(op: UnaryOperator, operand: Expr, span: Span) -> Expr {
    Expr::new(ExprKind::Unary { op,
                                operand: Box::new(operand) },
              span)
}

const fn changes_operand(op: UnaryOperator) -> bool {
    matches!(op,
             UnaryOperator::PreIncrement
             | UnaryOperator::PreDecrement
             | UnaryOperator::PostIncrement
             | UnaryOperator::PostDecrement)
}

impl<I> Parser<I> where I: Iterator<Item = char>
{
    /// Grammar: `prefix := ("+" | "-" | "++" | "--" | "!" | "~") prefix |
    /// postfix`
    ///
    /// # Errors
    /// `InvalidLValue` when `++` or `--` is applied to something that cannot
    /// be assigned.
    pub(super) fn prefix(&mut self) -> ParseResult<Option<Expr>> {
        let Some(op) = self.peek().kind.prefix_operator() else {
            return self.postfix();
        };
        let token = self.consume();
        let operand = self.required(Self::prefix, Message::ExpressionRequired)?;
        if changes_operand(op) && !operand.is_reference() {
            return Err(self.semantic_error(operand.span, Message::InvalidLValue));
        }
        let span = token.span.to(operand.span);
        Ok(Some(unary(op, operand, span)))
    }

    /// Grammar: `postfix := composite ("++" | "--" | "!")*`
    fn postfix(&mut self) -> ParseResult<Option<Expr>> {
        let Some(mut operand) = self.composite()? else {
            return Ok(None);
        };
        loop {
            let op = match self.peek().kind {
                TokenKind::DoublePlus => UnaryOperator::PostIncrement,
                TokenKind::DoubleMinus => UnaryOperator::PostDecrement,
                TokenKind::Exclamation => UnaryOperator::NotEmpty,
                _ => return Ok(Some(operand)),
            };
            if changes_operand(op) && !operand.is_reference() {
                return Err(self.semantic_error(operand.span, Message::InvalidLValue));
            }
            let span = operand.span.to(self.consume().span);
            operand = unary(op, operand, span);
        }
    }

    /// An atom followed by any number of indexers, member accesses, calls,
    /// `switch` and `with` suffixes.
    ///
    /// Grammar: `composite := atom suffix*`
    fn composite(&mut self) -> ParseResult<Option<Expr>> {
        let Some(mut target) = self.atom()? else {
            return Ok(None);
        };
        loop {
            target = match self.peek().kind {
                TokenKind::LeftBracket | TokenKind::QuestionBracket => self.index(target)?,
                TokenKind::Dot | TokenKind::QuestionDot => self.member_access(target)?,
                TokenKind::LeftParenthesis => {
                    let (arguments, end) = self.parenthesized_arguments()?;
                    let span = target.span.to(end);
                    Expr::new(ExprKind::Invoke { callee: Box::new(target),
                                                 arguments },
                              span)
                },
                TokenKind::Switch => {
                    self.consume();
                    self.match_token(TokenKind::LeftBrace)?;
                    let cases = self.list(Self::match_case)?;
                    if cases.is_empty() {
                        let span = self.current_span();
                        return Err(self.syntax_error(span, Message::PatternRequired));
                    }
                    let span = target.span.to(self.match_token(TokenKind::RightBrace)?.span);
                    Expr::new(ExprKind::Match { subject: Box::new(target),
                                                cases },
                              span)
                },
                TokenKind::With => {
                    self.consume();
                    let (setters, end) = self.property_inits()?;
                    let span = target.span.to(end);
                    Expr::new(ExprKind::With { original: Box::new(target),
                                               setters },
                              span)
                },
                _ => return Ok(Some(target)),
            };
        }
    }

    /// Grammar: `index := ("[" | "?[") (expression | expression? ".."
    /// expression?) "]"`
    fn index(&mut self, target: Expr) -> ParseResult<Expr> {
        let optional = self.consume().kind == TokenKind::QuestionBracket;
        let lower = self.expression()?;
        let expr = if self.accept(TokenKind::DoubleDot).is_some() {
            let upper = self.expression()?;
            let span = target.span.to(self.match_token(TokenKind::RightBracket)?.span);
            ExprKind::Slice { target: Box::new(target),
                              lower: lower.map(Box::new),
                              upper: upper.map(Box::new),
                              optional }
                .at(span)
        } else {
            let Some(index) = lower else {
                let span = self.current_span();
                return Err(self.syntax_error(span, Message::ExpressionRequired));
            };
            let span = target.span.to(self.match_token(TokenKind::RightBracket)?.span);
            ExprKind::Index { target: Box::new(target),
                              index: Box::new(index),
                              optional }
                .at(span)
        };
        Ok(expr)
    }

    /// Grammar: `member_access := ("." | "?.") name arguments?`
    fn member_access(&mut self, target: Expr) -> ParseResult<Expr> {
        let optional = self.consume().kind == TokenKind::QuestionDot;
        let name = self.member_name()?;
        if self.try_match(TokenKind::LeftParenthesis) {
            let (arguments, end) = self.parenthesized_arguments()?;
            let span = target.span.to(end);
            return Ok(ExprKind::MethodCall { target: Box::new(target),
                                             name: name.text(),
                                             arguments,
                                             optional }.at(span));
        }
        let span = target.span.to(name.span);
        Ok(ExprKind::Property { target: Box::new(target),
                                name: name.text(),
                                optional }.at(span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::lexer::Lexer;

    fn parse(source: &str) -> Expr {
        Parser::new(Lexer::new(source.chars()), "test.add").required_expression()
                                                            .unwrap()
    }

    #[test]
    fn prefix_operators_nest() {
        let expr = parse("- -x");
        let ExprKind::Unary { op: UnaryOperator::Minus, operand } = expr.kind else {
            panic!("not a negation");
        };
        assert!(matches!(operand.kind, ExprKind::Unary { op: UnaryOperator::Minus, .. }));
    }

    #[test]
    fn increments_need_a_reference() {
        assert!(matches!(parse("i++").kind,
                         ExprKind::Unary { op: UnaryOperator::PostIncrement, .. }));
        assert!(matches!(parse("--a[0]").kind,
                         ExprKind::Unary { op: UnaryOperator::PreDecrement, .. }));
        let error = Parser::new(Lexer::new("++1".chars()), "t").required_expression()
                                                               .unwrap_err();
        assert_eq!(error.message, Message::InvalidLValue);
    }

    #[test]
    fn not_empty_is_postfix() {
        assert!(matches!(parse("name!").kind,
                         ExprKind::Unary { op: UnaryOperator::NotEmpty, .. }));
    }

    #[test]
    fn member_chains() {
        let expr = parse("a?.b.c(1)[2]");
        let ExprKind::Index { target, optional: false, .. } = expr.kind else {
            panic!("not an index");
        };
        let ExprKind::MethodCall { target, name, .. } = target.kind else {
            panic!("not a method call");
        };
        assert_eq!(name, "c");
        assert!(matches!(target.kind, ExprKind::Property { optional: true, .. }));
    }

    #[test]
    fn keywords_name_members() {
        let ExprKind::MethodCall { name, .. } = parse("items.contains(3)").kind else {
            panic!("not a method call");
        };
        assert_eq!(name, "contains");
    }

    #[test]
    fn slices() {
        let ExprKind::Slice { lower, upper, .. } = parse("s[..3]").kind else {
            panic!("not a slice");
        };
        assert!(lower.is_none() && upper.is_some());
        assert!(matches!(parse("s[1..]").kind, ExprKind::Slice { upper: None, .. }));
    }

    #[test]
    fn calls_on_values() {
        let ExprKind::Invoke { arguments, .. } = parse("handlers[0](1, 2)").kind else {
            panic!("not an invocation");
        };
        assert_eq!(arguments.len(), 2);
    }

    #[test]
    fn with_copies() {
        let ExprKind::With { setters, .. } = parse("p with { x = 1, y }").kind else {
            panic!("not a with expression");
        };
        assert_eq!(setters[1].value.kind, ExprKind::Variable("y".to_string()));
    }
}
