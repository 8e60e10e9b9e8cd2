use crate::{
    ast::expressions::{CaseBranch, Expr, Operator, Pattern},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser, types::parse_type};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected_token("expected an expression")),
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let token_bp = *parser
            .get_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);

        if token_bp <= bp {
            break;
        }

        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => return Err(parser.unexpected_token("expected an operator")),
        };

        left = led(parser, left, token_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Number => {
            let token = parser.advance();
            match token.value.parse::<i64>() {
                Ok(value) => Ok(Expr::int(value)),
                Err(_) => Err(Error::new(
                    ErrorImpl::NumberParseError { token: token.value },
                    token.span.start,
                )),
            }
        }
        TokenKind::String => Ok(Expr::text(&parser.advance().value)),
        TokenKind::True => {
            parser.advance();
            Ok(Expr::bool(true))
        }
        TokenKind::False => {
            parser.advance();
            Ok(Expr::bool(false))
        }
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_token().value.clone(),
            },
            parser.get_position(),
        )),
    }
}

/// Either a variable or, when followed by `::`, a constructor application.
pub fn parse_symbol_expr(parser: &mut Parser) -> Result<Expr, Error> {
    if parser.peek_kind() != TokenKind::ColonColon {
        return Ok(Expr::Var(parser.advance().value));
    }

    // Pair::MkPair(1, "x")
    let type_name = parser.expect(TokenKind::Identifier)?.value;
    parser.expect(TokenKind::ColonColon)?;
    let constructor = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::OpenParen)?;

    let mut fields = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        fields.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else if parser.current_token_kind() != TokenKind::CloseParen {
            return Err(parser.unexpected_token("expected `,` or `)` in constructor fields"));
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Construction {
        type_name,
        constructor,
        fields,
    })
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance();

    let operator = match operator_token.kind {
        TokenKind::Plus => Operator::Add,
        TokenKind::Dash => Operator::Sub,
        TokenKind::Star => Operator::Mul,
        TokenKind::Slash => Operator::Div,
        TokenKind::Equals => Operator::Eq,
        TokenKind::Or => Operator::Or,
        TokenKind::And => Operator::And,
        TokenKind::PlusPlus => Operator::Concat,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: operator_token.value,
                },
                operator_token.span.start,
            ))
        }
    };

    let right = parse_expr(parser, bp)?;

    Ok(Expr::binary(left, operator, right))
}

/// `-e` is sugar for `0 - e`.
pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let rhs = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::binary(Expr::int(0), Operator::Sub, rhs))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let argument = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::app(left, argument))
}

pub fn parse_lambda_expr(parser: &mut Parser) -> Result<Expr, Error> {
    // \x : Int => x + 1
    parser.advance();
    let param = parser.expect(TokenKind::Identifier)?.value;
    parser.expect(TokenKind::Colon)?;
    let param_type = parse_type(parser, BindingPower::Default)?;
    parser.expect(TokenKind::FatArrow)?;
    let body = parse_expr(parser, BindingPower::Default)?;

    Ok(Expr::Lambda {
        param,
        param_type,
        body: Box::new(body),
    })
}

pub fn parse_if_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Then)?;
    let then_branch = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Else)?;
    let else_branch = parse_expr(parser, BindingPower::Default)?;

    Ok(Expr::if_(condition, then_branch, else_branch))
}

pub fn parse_let_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();

    let error = parser.unexpected_token("expected identifier in let binding");
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    parser.expect(TokenKind::Assignment)?;
    let bound = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::In)?;
    let body = parse_expr(parser, BindingPower::Default)?;

    Ok(Expr::Let {
        name,
        bound: Box::new(bound),
        body: Box::new(body),
    })
}

pub fn parse_case_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let scrutinee = parse_expr(parser, BindingPower::Default)?;

    parser.expect(TokenKind::OpenCurly)?;

    let mut branches = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        let pattern = parse_pattern(parser)?;
        parser.expect(TokenKind::FatArrow)?;
        let body = parse_expr(parser, BindingPower::Default)?;
        branches.push(CaseBranch::new(pattern, body));

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Expr::Case {
        scrutinee: Box::new(scrutinee),
        branches,
    })
}

fn parse_pattern(parser: &mut Parser) -> Result<Pattern, Error> {
    let error = parser.unexpected_token("expected a pattern like `Type::Constructor(a, b)`");
    let type_name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;
    parser.expect(TokenKind::ColonColon)?;
    let constructor = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::OpenParen)?;

    let mut binders = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        binders.push(parser.expect(TokenKind::Identifier)?.value);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else if parser.current_token_kind() != TokenKind::CloseParen {
            return Err(parser.unexpected_token("expected `,` or `)` in pattern"));
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(Pattern {
        type_name,
        constructor,
        binders,
    })
}
