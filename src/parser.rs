use crate::error::{LpError, Result};
use crate::expr::{BinaryOp, Expr, Sense, UnaryOp};
use crate::number::{Number, Rational};
use crate::typing::{check_bool, check_objective, check_obvious_types};
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while};
use nom::character::complete::{char, digit0, digit1, multispace0, satisfy};
use nom::combinator::{all_consuming, map, map_res, not, opt, recognize, verify};
use nom::error::{VerboseError, convert_error};
use nom::multi::{fold_many0, many0};
use nom::sequence::{delimited, pair, preceded, terminated, tuple};
use num_bigint::BigInt;
use num_traits::{Num, One};

type PResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

const KEYWORDS: &[&str] = &[
    "min", "max", "and", "or", "xor", "not", "if", "iif", "True", "False", "inf",
];

/// Parse any expression and run the obvious typing check.
pub fn parse_expr(input: &str) -> Result<Expr> {
    let expr = parse_raw(input)?;
    check_obvious_types(&expr)?;
    Ok(expr)
}

/// Parse a Boolean constraint such as `2*x + y <= 4` or `x1, x2 >= 0`.
pub fn parse_constraint(input: &str) -> Result<Expr> {
    let expr = parse_raw(input)?;
    check_bool(&expr)?;
    Ok(expr)
}

/// Parse an objective statement such as `max z = x1 + 2*x2`.
pub fn parse_objective(input: &str) -> Result<Expr> {
    let expr = parse_raw(input)?;
    check_objective(&expr)?;
    Ok(expr)
}

fn parse_raw(input: &str) -> Result<Expr> {
    match all_consuming(ws(parse_top))(input) {
        Ok((_, expr)) => {
            check_division(&expr)?;
            Ok(expr)
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            Err(LpError::Parse(convert_error(input, e)))
        }
        Err(nom::Err::Incomplete(_)) => Err(LpError::Parse("incomplete input".to_string())),
    }
}

fn check_division(expr: &Expr) -> Result<()> {
    match expr {
        Expr::Binary(BinaryOp::Div, _, b) if b.as_number().is_some_and(Number::is_zero) => {
            Err(LpError::DivisionByZero)
        }
        Expr::Binary(_, a, b) | Expr::Objective(_, a, b) => {
            check_division(a)?;
            check_division(b)
        }
        Expr::Unary(_, inner) => check_division(inner),
        Expr::List(items) => items.iter().try_for_each(check_division),
        Expr::Literal(_) | Expr::Variable(_) => Ok(()),
    }
}

fn parse_top(input: &str) -> PResult<'_, Expr> {
    alt((parse_objective_stmt, parse_logic))(input)
}

fn parse_objective_stmt(input: &str) -> PResult<'_, Expr> {
    map(
        tuple((
            ws(alt((
                map(keyword("min"), |_| Sense::Min),
                map(keyword("max"), |_| Sense::Max),
            ))),
            parse_logic,
            ws(terminated(char('='), not(char('=')))),
            parse_logic,
        )),
        |(sense, var, _, value)| Expr::objective(sense, var, value),
    )(input)
}

fn parse_logic(input: &str) -> PResult<'_, Expr> {
    let (rest, init) = parse_comparison(input)?;
    fold_many0(
        pair(
            ws(alt((
                map(keyword("and"), |_| BinaryOp::And),
                map(keyword("or"), |_| BinaryOp::Or),
                map(keyword("xor"), |_| BinaryOp::Xor),
                map(keyword("iif"), |_| BinaryOp::Iif),
                map(keyword("if"), |_| BinaryOp::If),
            ))),
            parse_comparison,
        ),
        move || init.clone(),
        |acc, (op, rhs)| Expr::Binary(op, acc.boxed(), rhs.boxed()),
    )(rest)
}

fn parse_comparison(input: &str) -> PResult<'_, Expr> {
    let (rest, init) = parse_low(input)?;
    fold_many0(
        pair(
            ws(alt((
                map(tag("<="), |_| BinaryOp::Le),
                map(tag(">="), |_| BinaryOp::Ge),
                map(tag("=="), |_| BinaryOp::Eq),
                map(tag("!="), |_| BinaryOp::Ne),
                map(tag("<"), |_| BinaryOp::Lt),
                map(tag(">"), |_| BinaryOp::Gt),
            ))),
            parse_low,
        ),
        move || init.clone(),
        |acc, (op, rhs)| Expr::Binary(op, acc.boxed(), rhs.boxed()),
    )(rest)
}

fn parse_low(input: &str) -> PResult<'_, Expr> {
    let (rest, init) = parse_high(input)?;
    fold_many0(
        pair(ws(alt((char('+'), char('-')))), parse_high),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '+' => Expr::Binary(BinaryOp::Add, acc.boxed(), rhs.boxed()),
            '-' => Expr::Binary(BinaryOp::Sub, acc.boxed(), rhs.boxed()),
            _ => unreachable!(),
        },
    )(rest)
}

fn parse_high(input: &str) -> PResult<'_, Expr> {
    let (rest, init) = parse_atom(input)?;
    fold_many0(
        pair(ws(alt((char('*'), char('/')))), parse_atom),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '*' => Expr::Binary(BinaryOp::Mul, acc.boxed(), rhs.boxed()),
            '/' => Expr::Binary(BinaryOp::Div, acc.boxed(), rhs.boxed()),
            _ => unreachable!(),
        },
    )(rest)
}

fn parse_atom(input: &str) -> PResult<'_, Expr> {
    alt((
        parse_unary,
        parse_constant,
        parse_number,
        parse_variables,
        parse_parens,
    ))(input)
}

fn parse_unary(input: &str) -> PResult<'_, Expr> {
    alt((
        map(preceded(ws(keyword("not")), parse_atom), |e| {
            Expr::unary(UnaryOp::Not, e)
        }),
        map(
            preceded(ws(terminated(char('!'), not(char('=')))), parse_atom),
            |e| Expr::unary(UnaryOp::Not, e),
        ),
        map(preceded(ws(char('-')), parse_atom), |e| {
            Expr::unary(UnaryOp::Neg, e)
        }),
    ))(input)
}

fn parse_constant(input: &str) -> PResult<'_, Expr> {
    ws(alt((
        map(keyword("True"), |_| Expr::boolean(true)),
        map(keyword("False"), |_| Expr::boolean(false)),
        map(keyword("inf"), |_| Expr::number(Number::PosInfinity)),
    )))(input)
}

/// Integers and decimals, read as exact rationals (`1.5` is `3/2`).
fn parse_number(input: &str) -> PResult<'_, Expr> {
    map_res(
        ws(recognize(pair(digit1, opt(pair(char('.'), digit0))))),
        |s: &str| -> std::result::Result<Expr, num_bigint::ParseBigIntError> {
            let (int_part, frac_part) = s.split_once('.').unwrap_or((s, ""));
            let numer = BigInt::from_str_radix(&format!("{int_part}{frac_part}"), 10)?;
            let denom = (0..frac_part.len()).fold(BigInt::one(), |acc, _| acc * 10);
            Ok(Expr::number(Rational::new(numer, denom)))
        },
    )(input)
}

/// A variable, or a comma separated list of variables.
fn parse_variables(input: &str) -> PResult<'_, Expr> {
    let (rest, first) = ws(variable)(input)?;
    let (rest, others) = many0(preceded(ws(char(',')), ws(variable)))(rest)?;
    if others.is_empty() {
        return Ok((rest, Expr::var(first)));
    }
    let mut items = vec![Expr::var(first)];
    items.extend(others.into_iter().map(Expr::var));
    Ok((rest, Expr::List(items)))
}

fn parse_parens(input: &str) -> PResult<'_, Expr> {
    let (rest, (first, others)) = delimited(
        ws(char('(')),
        pair(parse_logic, many0(preceded(ws(char(',')), parse_logic))),
        ws(char(')')),
    )(input)?;
    if others.is_empty() {
        return Ok((rest, first));
    }
    let mut items = vec![first];
    items.extend(others);
    Ok((rest, Expr::List(items)))
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$' | '@')
}

fn identifier(input: &str) -> PResult<'_, &str> {
    recognize(pair(
        satisfy(|c| c.is_alphabetic() || matches!(c, '_' | '$' | '@')),
        take_while(is_identifier_char),
    ))(input)
}

fn variable(input: &str) -> PResult<'_, &str> {
    verify(identifier, |s: &str| !KEYWORDS.contains(&s))(input)
}

fn keyword<'a>(kw: &'static str) -> impl FnMut(&'a str) -> PResult<'a, &'a str> {
    verify(identifier, move |s: &str| s == kw)
}

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> PResult<'a, O>
where
    F: FnMut(&'a str) -> PResult<'a, O>,
{
    delimited(multispace0, inner, multispace0)
}
