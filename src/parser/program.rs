use crate::{
    ast::ast::{Constructor, FnDef, TypeDef},
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::{parser::Parser, types::parse_type};

pub fn parse_type_def(parser: &mut Parser) -> Result<TypeDef, Error> {
    // type Shape { Circle(Int), Rect(Int, Int) }
    parser.expect(TokenKind::Type)?;

    let error = parser.unexpected_token("expected a type name");
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    parser.expect(TokenKind::OpenCurly)?;

    let mut constructors = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        let constructor_name = parser.expect(TokenKind::Identifier)?.value;
        parser.expect(TokenKind::OpenParen)?;

        let mut fields = Vec::new();
        while parser.current_token_kind() != TokenKind::CloseParen {
            fields.push(parse_type(parser, BindingPower::Default)?);

            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
            } else if parser.current_token_kind() != TokenKind::CloseParen {
                return Err(parser.unexpected_token("expected `,` or `)` in constructor fields"));
            }
        }

        parser.expect(TokenKind::CloseParen)?;
        constructors.push(Constructor {
            name: constructor_name,
            fields,
        });

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(TypeDef { name, constructors })
}

pub fn parse_fn_def(parser: &mut Parser) -> Result<FnDef, Error> {
    // fn name(param: Int): Int = body
    parser.expect(TokenKind::Fn)?;

    let error = parser.unexpected_token("expected a function name");
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    parser.expect(TokenKind::OpenParen)?;
    let param = parser.expect(TokenKind::Identifier)?.value;
    parser.expect(TokenKind::Colon)?;
    let param_type = parse_type(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    parser.expect(TokenKind::Colon)?;
    let result_type = parse_type(parser, BindingPower::Default)?;

    parser.expect(TokenKind::Assignment)?;
    let body = parse_expr(parser, BindingPower::Default)?;

    Ok(FnDef {
        name,
        param,
        param_type,
        result_type,
        body,
    })
}
