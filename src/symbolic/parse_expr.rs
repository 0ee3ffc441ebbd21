use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::{find_char_positions_outside_brackets, find_matching_bracket};
use std::f64::consts::{E, PI};
/// a module turns a String expression into a symbolic expression
///# Example
/// ```
/// use RustedIntegralAPI::symbolic::symbolic_engine::Expr;
/// let input = "x^2 + sin(2*x) - exp(x)/3";
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// ```
//                  search recursion diagram
//                "x^2+exp(x)+ln(x)/3"              |
//                |       left  | right             |
//                |_________________________________|
//                |        split by rightmost +     |
//                |_________________________________|
//                | x^2+exp(x)  |   ln(x)/3         |
//                |       |     |          |        |
//                |_____ \|/    |          |        |
//                |   split by+ |          |        |
//                |_____________|__________|________|
//                | x^2 | exp(x)| split by /        |
//                |____Ok_______|_________\|/_______|
//                  etc...

// function prefixes recognized by the parser; several spellings map to the
// same Expr variant (tan/tg, asin/arcsin, ...)
const FUNCTIONS: &[(&str, fn(Box<Expr>) -> Expr)] = &[
    ("exp", Expr::Exp),
    ("ln", Expr::Ln),
    ("log", Expr::Ln),
    ("sin", Expr::sin),
    ("cos", Expr::cos),
    ("tg", Expr::tg),
    ("tan", Expr::tg),
    ("ctg", Expr::ctg),
    ("cot", Expr::ctg),
    ("arcsin", Expr::arcsin),
    ("asin", Expr::arcsin),
    ("arccos", Expr::arccos),
    ("acos", Expr::arccos),
    ("arctg", Expr::arctg),
    ("arctan", Expr::arctg),
    ("atan", Expr::arctg),
    ("arcctg", Expr::arcctg),
    ("arccot", Expr::arcctg),
    ("acot", Expr::arcctg),
];

/// Normalizes raw user input before parsing: trims whitespace and rewrites the
/// Python-style power operator `**` into `^`.
pub fn normalize_input(input: &str) -> String {
    input
        .replace("**", "^")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

// a '+' or '-' is a sign rather than a binary operator when it opens the string,
// follows another operator, or sits inside a scientific literal like 1e-3
fn is_unary_sign(chars: &[char], i: usize) -> bool {
    if i == 0 {
        return true;
    }
    let prev = chars[i - 1];
    if matches!(prev, '+' | '-' | '*' | '/' | '^' | '(') {
        return true;
    }
    if (prev == 'e' || prev == 'E') && i >= 2 && chars[i - 2].is_ascii_digit() {
        return true;
    }
    false
}

// function to find the rightmost occurrence of operators at the same precedence level
// (rightmost keeps left-associativity: a-b-c parses as (a-b)-c)
fn find_rightmost_operator_outside_brackets(
    input: &str,
    operators: &[char],
) -> Option<(usize, char)> {
    let chars: Vec<char> = input.chars().collect();
    let mut bracket_depth = 0usize;
    let mut last_op = None;

    for (i, c) in chars.iter().enumerate() {
        match c {
            '(' => bracket_depth += 1,
            ')' => bracket_depth = bracket_depth.saturating_sub(1),
            _ if bracket_depth == 0 && operators.contains(c) => {
                if (*c == '+' || *c == '-') && is_unary_sign(&chars, i) {
                    continue;
                }
                last_op = Some((i, *c));
            }
            _ => {}
        }
    }

    last_op
}

pub fn parse_expression_func(input: &str) -> Result<Expr, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("empty expression".to_string());
    }

    // expression entirely wrapped in brackets: strip and recurse
    if input.starts_with('(') {
        if let Some(end) = find_matching_bracket(input, 0) {
            if end == input.len() - 1 {
                return parse_expression_func(&input[1..end]);
            }
        } else {
            return Err(format!("unmatched bracket in '{}'", input));
        }
    }

    // addition and subtraction
    if let Some((pos, op)) = find_rightmost_operator_outside_brackets(input, &['+', '-']) {
        let left = input[..pos].trim();
        let right = input[pos + 1..].trim();
        let lhs = parse_expression_func(left)?;
        let rhs = parse_expression_func(right)?;
        return Ok(match op {
            '+' => Expr::Add(Box::new(lhs), Box::new(rhs)),
            _ => Expr::Sub(Box::new(lhs), Box::new(rhs)),
        });
    }

    // unary minus: -f parses as (-1) * f
    if let Some(rest) = input.strip_prefix('-') {
        let inner = parse_expression_func(rest)?;
        return Ok(Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(inner)));
    }
    if let Some(rest) = input.strip_prefix('+') {
        return parse_expression_func(rest);
    }

    // multiplication and division
    if let Some((pos, op)) = find_rightmost_operator_outside_brackets(input, &['*', '/']) {
        let left = input[..pos].trim();
        let right = input[pos + 1..].trim();
        let lhs = parse_expression_func(left)?;
        let rhs = parse_expression_func(right)?;
        return Ok(match op {
            '*' => Expr::Mul(Box::new(lhs), Box::new(rhs)),
            _ => Expr::Div(Box::new(lhs), Box::new(rhs)),
        });
    }

    // exponentiation; leftmost split keeps ^ right-associative
    if let Some(pos) = find_char_positions_outside_brackets(input, '^') {
        let base = input[..pos].trim();
        let exponent = input[pos + 1..].trim();
        let base_expr = parse_expression_func(base)?;
        let exponent_expr = parse_expression_func(exponent)?;
        return Ok(Expr::Pow(Box::new(base_expr), Box::new(exponent_expr)));
    }

    // known functions: name followed by a bracketed argument spanning the rest
    for (name, constructor) in FUNCTIONS {
        if let Some(after) = input.strip_prefix(name) {
            if after.starts_with('(') {
                match find_matching_bracket(input, name.len()) {
                    Some(end) if end == input.len() - 1 => {
                        let inner = parse_expression_func(&input[name.len() + 1..end])?;
                        return Ok(constructor(Box::new(inner)));
                    }
                    Some(_) => {
                        return Err(format!("unexpected trailing input in '{}'", input));
                    }
                    None => return Err(format!("unmatched bracket in '{}'", input)),
                }
            }
        }
    }

    // constants and variables
    if let Ok(value) = input.parse::<f64>() {
        return Ok(Expr::Const(value));
    }
    if input.chars().all(|c| c.is_alphanumeric() || c == '_')
        && input.chars().next().is_some_and(|c| c.is_alphabetic())
    {
        return Ok(match input {
            "e" => Expr::Const(E),
            "pi" | "Pi" | "PI" => Expr::Const(PI),
            _ => Expr::Var(input.to_string()),
        });
    }

    Err(format!("invalid expression fragment: '{}'", input))
}

impl Expr {
    /// EXPRESSION PARSING FROM STRINGS

    /// Parses a mathematical expression from string representation.
    ///
    /// Converts human-readable mathematical notation into a symbolic expression tree.
    /// Supports standard mathematical operators, functions, and parentheses.
    ///
    /// # Arguments
    /// * `input` - String containing mathematical expression (e.g., "x^2 + sin(2*x)")
    ///
    /// # Returns
    /// Parsed symbolic expression, or a human-readable error for invalid syntax
    ///
    /// # Supported Syntax
    /// - Variables: x, t, var_name
    /// - Constants: 3.14, -2.5, 1e-6, and the named constants e and pi
    /// - Operators: +, -, *, /, ^ (also ** as a synonym for ^)
    /// - Functions: sin, cos, tan/tg, cot/ctg, exp, ln/log, arcsin/asin, arccos/acos,
    ///   arctan/arctg/atan, arccot/arcctg/acot
    /// - Parentheses for grouping
    pub fn parse_expression(input: &str) -> Result<Expr, String> {
        let normalized = normalize_input(input);
        parse_expression_func(&normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exponential() {
        let expr = Expr::parse_expression("exp(x)").unwrap();
        assert_eq!(expr, Expr::Exp(Box::new(Expr::Var("x".to_string()))));
    }

    #[test]
    fn test_parse_constant() {
        let expr = Expr::parse_expression("42").unwrap();
        assert_eq!(expr, Expr::Const(42.0));
    }

    #[test]
    fn test_parse_scientific_constant() {
        let expr = Expr::parse_expression("1e-3").unwrap();
        assert_eq!(expr, Expr::Const(0.001));
    }

    #[test]
    fn test_parse_named_constants() {
        assert_eq!(
            Expr::parse_expression("e").unwrap(),
            Expr::Const(std::f64::consts::E)
        );
        assert_eq!(
            Expr::parse_expression("pi").unwrap(),
            Expr::Const(std::f64::consts::PI)
        );
    }

    #[test]
    fn test_parse_variable() {
        let expr = Expr::parse_expression("x").unwrap();
        assert_eq!(expr, Expr::Var("x".to_string()));
    }

    #[test]
    fn test_parse_addition() {
        let expr = Expr::parse_expression("x + 2").unwrap();
        assert_eq!(
            expr,
            Expr::Add(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Const(2.0))
            )
        );
    }

    #[test]
    fn test_parse_subtraction_left_associative() {
        // x - 1 - 2 must parse as (x - 1) - 2
        let expr = Expr::parse_expression("x - 1 - 2").unwrap();
        let expected = Expr::Sub(
            Box::new(Expr::Sub(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Const(1.0)),
            )),
            Box::new(Expr::Const(2.0)),
        );
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_parse_division_left_associative() {
        // a/b/c must parse as (a/b)/c
        let expr = Expr::parse_expression("x/2/3").unwrap();
        let expected = Expr::Div(
            Box::new(Expr::Div(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Const(2.0)),
            )),
            Box::new(Expr::Const(3.0)),
        );
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_parse_power() {
        let expr = Expr::parse_expression("x^2").unwrap();
        assert_eq!(
            expr,
            Expr::Pow(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Const(2.0))
            )
        );
    }

    #[test]
    fn test_parse_python_style_power() {
        assert_eq!(
            Expr::parse_expression("x**2").unwrap(),
            Expr::parse_expression("x^2").unwrap()
        );
    }

    #[test]
    fn test_parse_unary_minus_binds_looser_than_power() {
        // -x^2 must parse as -(x^2)
        let expr = Expr::parse_expression("-x^2").unwrap();
        let expected = Expr::Mul(
            Box::new(Expr::Const(-1.0)),
            Box::new(Expr::Pow(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Const(2.0)),
            )),
        );
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_parse_logarithm() {
        let expr = Expr::parse_expression("log(x)").unwrap();
        assert_eq!(expr, Expr::Ln(Box::new(Expr::Var("x".to_string()))));
    }

    #[test]
    fn test_parse_expression_with_brackets() {
        let expr = Expr::parse_expression("(x + y) * z").unwrap();
        assert_eq!(
            expr,
            Expr::Mul(
                Box::new(Expr::Add(
                    Box::new(Expr::Var("x".to_string())),
                    Box::new(Expr::Var("y".to_string()))
                )),
                Box::new(Expr::Var("z".to_string()))
            )
        );
    }

    #[test]
    fn test_parse_complex_expression() {
        let expr = Expr::parse_expression("(x + y) * (z - 2) / exp(w)").unwrap();
        let x = Box::new(Expr::Var("x".to_string()));
        let y = Box::new(Expr::Var("y".to_string()));
        let z = Box::new(Expr::Var("z".to_string()));
        let w = Box::new(Expr::Var("w".to_string()));
        let C = Box::new(Expr::Const(2.0));
        let x_plus_y = Box::new(Expr::Add(x, y));
        let z_minus_C = Box::new(Expr::Sub(z, C));
        let e = Box::new(Expr::Exp(w));
        let numerator = Box::new(Expr::Mul(x_plus_y, z_minus_C));
        let Res = Expr::Div(numerator, e);
        assert_eq!(expr, Res);
    }

    #[test]
    fn test_invalid_expression() {
        let result = Expr::parse_expression("(x +");
        assert!(result.is_err());
    }

    #[test]
    fn test_trailing_operator() {
        let result = Expr::parse_expression("sin(x)*");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(Expr::parse_expression("").is_err());
        assert!(Expr::parse_expression("   ").is_err());
    }

    #[test]
    fn test_unmatched_brackets() {
        let result = Expr::parse_expression("(x + y");
        assert!(result.is_err());
    }

    #[test]
    fn test_multiple_addition() {
        let result = Expr::parse_expression("x^2 - x - 1").unwrap();
        let x = Box::new(Expr::Var("x".to_string()));
        let to_check =
            Expr::Pow(x.clone(), Box::new(Expr::Const(2.0))) - *x.clone() - Expr::Const(1.0);
        assert_eq!(result, to_check);
    }

    #[test]
    fn test_parse_sin() {
        let expr = Expr::parse_expression("sin(x)").unwrap();
        assert_eq!(expr, Expr::sin(Box::new(Expr::Var("x".to_string()))));
    }

    #[test]
    fn test_parse_tan_synonyms() {
        let expr_tg = Expr::parse_expression("tg(x)").unwrap();
        let expr_tan = Expr::parse_expression("tan(x)").unwrap();
        assert_eq!(expr_tg, Expr::tg(Box::new(Expr::Var("x".to_string()))));
        assert_eq!(expr_tg, expr_tan);
    }

    #[test]
    fn test_parse_arcsin() {
        let expr = Expr::parse_expression("arcsin(x)").unwrap();
        assert_eq!(expr, Expr::arcsin(Box::new(Expr::Var("x".to_string()))));
    }

    #[test]
    fn test_parse_complex_trig() {
        let expr = Expr::parse_expression("sin(x) + cos(y)").unwrap();
        assert_eq!(
            expr,
            Expr::Add(
                Box::new(Expr::sin(Box::new(Expr::Var("x".to_string())))),
                Box::new(Expr::cos(Box::new(Expr::Var("y".to_string()))))
            )
        );
    }

    #[test]
    fn test_parse_nested_trig() {
        let expr = Expr::parse_expression("sin(cos(x))").unwrap();
        assert_eq!(
            expr,
            Expr::sin(Box::new(Expr::cos(Box::new(Expr::Var("x".to_string())))))
        );
    }
}
