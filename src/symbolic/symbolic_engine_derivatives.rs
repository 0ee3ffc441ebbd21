//! # Symbolic Engine Derivatives Module
//!
//! Extends the symbolic engine with analytical differentiation, numerical
//! evaluation and variable discovery. Differentiation is the inverse check for
//! the integrator (d/dx of an antiderivative must reproduce the integrand) and
//! evaluation backs both definite integrals and plot sampling.

use crate::symbolic::symbolic_engine::Expr;
use std::f64::consts::PI;

impl Expr {
    /// ANALYTICAL DIFFERENTIATION

    /// Computes the analytical derivative with respect to a variable.
    ///
    /// Applies the standard differentiation rules recursively: linearity, product
    /// rule, quotient rule, power rule and the chain rule for the supported
    /// elementary functions.
    ///
    /// # Arguments
    /// * `var` - Variable name to differentiate with respect to
    ///
    /// # Returns
    /// New symbolic expression representing the derivative
    ///
    /// # Examples
    /// ```rust, ignore
    /// let x = Expr::Var("x".to_string());
    /// let f = x.clone().pow(Expr::Const(2.0)); // x^2
    /// let df_dx = f.diff("x"); // 2*x
    /// ```
    pub fn diff(&self, var: &str) -> Expr {
        match self {
            Expr::Var(name) => {
                if name == var {
                    Expr::Const(1.0)
                } else {
                    Expr::Const(0.0)
                }
            }
            Expr::Const(_) => Expr::Const(0.0),
            Expr::Add(lhs, rhs) => Expr::Add(Box::new(lhs.diff(var)), Box::new(rhs.diff(var))),
            Expr::Sub(lhs, rhs) => Expr::Sub(Box::new(lhs.diff(var)), Box::new(rhs.diff(var))),
            Expr::Mul(lhs, rhs) => Expr::Add(
                Box::new(Expr::Mul(Box::new(lhs.diff(var)), rhs.clone())),
                Box::new(Expr::Mul(lhs.clone(), Box::new(rhs.diff(var)))),
            ),
            Expr::Div(lhs, rhs) => Expr::Div(
                Box::new(Expr::Sub(
                    Box::new(Expr::Mul(Box::new(lhs.diff(var)), rhs.clone())),
                    Box::new(Expr::Mul(Box::new(rhs.diff(var)), lhs.clone())),
                )),
                Box::new(Expr::Mul(rhs.clone(), rhs.clone())),
            ),
            // valid for constant exponents, which is all the integrator produces
            Expr::Pow(base, exp) => Expr::Mul(
                Box::new(Expr::Mul(
                    exp.clone(),
                    Box::new(Expr::Pow(
                        base.clone(),
                        Box::new(Expr::Sub(exp.clone(), Box::new(Expr::Const(1.0)))),
                    )),
                )),
                Box::new(base.diff(var)),
            ),
            Expr::Exp(expr) => {
                Expr::Mul(Box::new(Expr::Exp(expr.clone())), Box::new(expr.diff(var)))
            }
            Expr::Ln(expr) => Expr::Div(Box::new(expr.diff(var)), expr.clone()),
            Expr::sin(expr) => {
                Expr::Mul(Box::new(Expr::cos(expr.clone())), Box::new(expr.diff(var)))
            }
            Expr::cos(expr) => Expr::Mul(
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(Expr::sin(expr.clone())),
                )),
                Box::new(expr.diff(var)),
            ),
            Expr::tg(expr) => Expr::Mul(
                Box::new(Expr::Div(
                    Box::new(Expr::Const(1.0)),
                    Box::new(Expr::Pow(
                        Box::new(Expr::cos(expr.clone())),
                        Box::new(Expr::Const(2.0)),
                    )),
                )),
                Box::new(expr.diff(var)),
            ),
            Expr::ctg(expr) => Expr::Mul(
                Box::new(Expr::Div(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(Expr::Pow(
                        Box::new(Expr::sin(expr.clone())),
                        Box::new(Expr::Const(2.0)),
                    )),
                )),
                Box::new(expr.diff(var)),
            ),
            Expr::arcsin(expr) => Expr::Div(
                Box::new(expr.diff(var)),
                Box::new(Expr::Pow(
                    Box::new(Expr::Sub(
                        Box::new(Expr::Const(1.0)),
                        Box::new(Expr::Pow(expr.clone(), Box::new(Expr::Const(2.0)))),
                    )),
                    Box::new(Expr::Const(0.5)),
                )),
            ),
            Expr::arccos(expr) => Expr::Div(
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(expr.diff(var)),
                )),
                Box::new(Expr::Pow(
                    Box::new(Expr::Sub(
                        Box::new(Expr::Const(1.0)),
                        Box::new(Expr::Pow(expr.clone(), Box::new(Expr::Const(2.0)))),
                    )),
                    Box::new(Expr::Const(0.5)),
                )),
            ),
            Expr::arctg(expr) => Expr::Div(
                Box::new(expr.diff(var)),
                Box::new(Expr::Add(
                    Box::new(Expr::Const(1.0)),
                    Box::new(Expr::Pow(expr.clone(), Box::new(Expr::Const(2.0)))),
                )),
            ),
            Expr::arcctg(expr) => Expr::Div(
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(expr.diff(var)),
                )),
                Box::new(Expr::Add(
                    Box::new(Expr::Const(1.0)),
                    Box::new(Expr::Pow(expr.clone(), Box::new(Expr::Const(2.0)))),
                )),
            ),
        }
    } // end of diff

    /// NUMERICAL EVALUATION

    /// Evaluates the expression numerically for given variable values.
    ///
    /// # Arguments
    /// * `vars` - Variable names in order matching values array
    /// * `values` - Numerical values for each variable
    ///
    /// # Returns
    /// Numerical result of expression evaluation. Variables not present in `vars`
    /// evaluate to NaN so the failure surfaces at the caller instead of panicking.
    ///
    /// # Performance
    /// Use lambdify1D() for repeated evaluation, eval_expression() for one-time use
    pub fn eval_expression(&self, vars: Vec<&str>, values: &[f64]) -> f64 {
        match self {
            Expr::Var(name) => match vars.iter().position(|&x| x == name) {
                Some(index) => values[index],
                None => f64::NAN,
            },
            Expr::Const(val) => *val,
            Expr::Add(lhs, rhs) => {
                lhs.eval_expression(vars.clone(), values) + rhs.eval_expression(vars, values)
            }
            Expr::Sub(lhs, rhs) => {
                lhs.eval_expression(vars.clone(), values) - rhs.eval_expression(vars, values)
            }
            Expr::Mul(lhs, rhs) => {
                lhs.eval_expression(vars.clone(), values) * rhs.eval_expression(vars, values)
            }
            Expr::Div(lhs, rhs) => {
                lhs.eval_expression(vars.clone(), values) / rhs.eval_expression(vars, values)
            }
            Expr::Pow(base, exp) => {
                let base_fn = base.eval_expression(vars.clone(), values);
                let exp_fn = exp.eval_expression(vars, values);
                base_fn.powf(exp_fn)
            }
            Expr::Exp(expr) => expr.eval_expression(vars, values).exp(),
            Expr::Ln(expr) => expr.eval_expression(vars, values).ln(),
            Expr::sin(expr) => expr.eval_expression(vars, values).sin(),
            Expr::cos(expr) => expr.eval_expression(vars, values).cos(),
            Expr::tg(expr) => expr.eval_expression(vars, values).tan(),
            Expr::ctg(expr) => 1.0 / expr.eval_expression(vars, values).tan(),
            Expr::arcsin(expr) => expr.eval_expression(vars, values).asin(),
            Expr::arccos(expr) => expr.eval_expression(vars, values).acos(),
            Expr::arctg(expr) => expr.eval_expression(vars, values).atan(),
            Expr::arcctg(expr) => PI / 2.0 - expr.eval_expression(vars, values).atan(),
        }
    } // end of eval_expression

    /// Extracts all unique variable names from the symbolic expression.
    ///
    /// Recursively traverses the expression tree to collect all symbolic variables.
    /// Returns a sorted, deduplicated list of variable names.
    ///
    /// # Returns
    /// Vector of unique variable names in alphabetical order
    ///
    /// # Examples
    /// ```rust, ignore
    /// let expr = Expr::parse_expression("x^2 + y*z + x").unwrap();
    /// let vars = expr.all_arguments_are_variables();
    /// assert_eq!(vars, vec!["x", "y", "z"]);
    /// ```
    pub fn all_arguments_are_variables(&self) -> Vec<String> {
        let mut vars = Vec::new();

        match self {
            Expr::Var(name) => {
                vars.push(name.clone());
            }
            Expr::Const(_) => {}
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => {
                vars.extend(lhs.all_arguments_are_variables());
                vars.extend(rhs.all_arguments_are_variables());
            }
            Expr::Exp(expr) | Expr::Ln(expr) => {
                vars.extend(expr.all_arguments_are_variables());
            }
            Expr::sin(expr) | Expr::cos(expr) | Expr::tg(expr) | Expr::ctg(expr) => {
                vars.extend(expr.all_arguments_are_variables());
            }
            Expr::arcsin(expr) | Expr::arccos(expr) | Expr::arctg(expr) | Expr::arcctg(expr) => {
                vars.extend(expr.all_arguments_are_variables());
            }
        }

        vars.sort();
        vars.dedup();
        vars
    } // end of all_arguments_are_variables
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_diff_power() {
        // d/dx x^3 = 3x^2
        let x = Expr::Var("x".to_string());
        let expr = x.clone().pow(Expr::Const(3.0));
        let derivative = expr.diff("x");
        let value = derivative.eval_expression(vec!["x"], &[2.0]);
        assert_relative_eq!(value, 12.0, epsilon = 1e-10);
    }

    #[test]
    fn test_diff_product_rule() {
        // d/dx (x * sin(x)) = sin(x) + x*cos(x)
        let x = Expr::Var("x".to_string());
        let expr = x.clone() * Expr::sin(Box::new(x.clone()));
        let derivative = expr.diff("x");
        let x_val: f64 = 0.7;
        let expected = x_val.sin() + x_val * x_val.cos();
        let value = derivative.eval_expression(vec!["x"], &[x_val]);
        assert_relative_eq!(value, expected, epsilon = 1e-10);
    }

    #[test]
    fn test_diff_chain_rule_exp() {
        // d/dx exp(2x) = 2*exp(2x)
        let x = Expr::Var("x".to_string());
        let expr = (Expr::Const(2.0) * x.clone()).exp();
        let derivative = expr.diff("x");
        let x_val: f64 = 0.3;
        let expected = 2.0 * (2.0 * x_val).exp();
        let value = derivative.eval_expression(vec!["x"], &[x_val]);
        assert_relative_eq!(value, expected, epsilon = 1e-10);
    }

    #[test]
    fn test_eval_expression() {
        let expr = Expr::parse_expression("x^2 + 2*x + 1").unwrap();
        let value = expr.eval_expression(vec!["x"], &[3.0]);
        assert_relative_eq!(value, 16.0, epsilon = 1e-10);
    }

    #[test]
    fn test_eval_unknown_variable_is_nan() {
        let expr = Expr::Var("y".to_string());
        assert!(expr.eval_expression(vec!["x"], &[1.0]).is_nan());
    }

    #[test]
    fn test_all_arguments_are_variables() {
        let expr = Expr::parse_expression("x^2 + y*x + sin(z)").unwrap();
        let vars = expr.all_arguments_are_variables();
        assert_eq!(vars, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_constants_are_not_variables() {
        let expr = Expr::parse_expression("exp(2) + pi").unwrap();
        assert!(expr.all_arguments_are_variables().is_empty());
    }
}
