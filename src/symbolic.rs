#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use RustedIntegralAPI::symbolic::symbolic_engine::Expr;
/// let input = "x^2 + sin(2*x)";
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) turns a String expression into a symbolic expression
/// 2) turns a symbolic expression into a Rust function
/// 3) turns a symbolic expression into a string expression for printing and control results
///# Example#
/// ```
/// use RustedIntegralAPI::symbolic::symbolic_engine::Expr;
/// let input = "exp(x) + ln(x)";
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// // return vec of all arguments
/// let all = parsed_expression.all_arguments_are_variables();
/// println!("all arguments are variables {:?}", all);
/// // differentiate with respect to x
/// let df_dx = parsed_expression.diff("x");
/// println!("df_dx = {}", df_dx);
/// // convert symbolic expression to a Rust function and evaluate the function
/// let f = parsed_expression.lambdify1D();
/// println!("f(1.0) = {}", f(1.0));
/// ```
pub mod symbolic_engine;
/// analytical differentiation, numerical evaluation and variable discovery for symbolic expressions
pub mod symbolic_engine_derivatives;
/// symbolic (analytical) integration: indefinite antiderivatives by rule matching and
/// definite integrals via the fundamental theorem of calculus
///# Example#
/// ```
/// use RustedIntegralAPI::symbolic::symbolic_engine::Expr;
/// let f = Expr::parse_expression("x^2").unwrap();
/// let F = f.integrate("x").unwrap();
/// println!("antiderivative: {}", F); // x^3 / 3
/// let area = f.definite_integrate("x", 0.0, 1.0).unwrap();
/// println!("definite integral on [0, 1]: {}", area); // 1/3
/// ```
pub mod symbolic_integration;
/// turns a symbolic expression into a native Rust closure f64 -> f64
pub mod symbolic_lambdify;
/// algebraic simplification: constant folding and elementary identities
pub mod symbolic_simplify;
/// bracket scanning helpers shared by the string parser
pub mod utils;
