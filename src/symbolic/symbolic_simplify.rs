//! # Symbolic Expression Simplification Module
//!
//! Algebraic simplification for symbolic expressions: constant folding plus
//! elementary identities. The integrator produces antiderivatives with many
//! redundant factors (multiplications by one, additions of zero, nested
//! constants), and simplification is what makes the returned expression strings
//! readable.
//!
//! ## Simplification Strategy
//!
//! - `simplify_numbers()` - pure constant folding: subtrees without variables
//!   collapse to a single `Const`
//! - `simplify_()` - one bottom-up pass of algebraic identities
//! - `simplify()` - iterates `simplify_()` to a fixed point

use crate::symbolic::symbolic_engine::Expr;

impl Expr {
    /// SIMPLIFICATION

    /// Folds constant subexpressions into single constants.
    ///
    /// Operations on two constants are evaluated numerically; everything else
    /// is left untouched.
    pub fn simplify_numbers(&self) -> Expr {
        match self {
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => {
                let l = lhs.simplify_numbers();
                let r = rhs.simplify_numbers();
                match (&l, &r) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a + b),
                    _ => Expr::Add(Box::new(l), Box::new(r)),
                }
            }
            Expr::Sub(lhs, rhs) => {
                let l = lhs.simplify_numbers();
                let r = rhs.simplify_numbers();
                match (&l, &r) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a - b),
                    _ => Expr::Sub(Box::new(l), Box::new(r)),
                }
            }
            Expr::Mul(lhs, rhs) => {
                let l = lhs.simplify_numbers();
                let r = rhs.simplify_numbers();
                match (&l, &r) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b),
                    _ => Expr::Mul(Box::new(l), Box::new(r)),
                }
            }
            Expr::Div(lhs, rhs) => {
                let l = lhs.simplify_numbers();
                let r = rhs.simplify_numbers();
                match (&l, &r) {
                    (Expr::Const(a), Expr::Const(b)) if *b != 0.0 => Expr::Const(a / b),
                    _ => Expr::Div(Box::new(l), Box::new(r)),
                }
            }
            Expr::Pow(base, exp) => {
                let b = base.simplify_numbers();
                let e = exp.simplify_numbers();
                match (&b, &e) {
                    (Expr::Const(a), Expr::Const(n)) => Expr::Const(a.powf(*n)),
                    _ => Expr::Pow(Box::new(b), Box::new(e)),
                }
            }
            Expr::Exp(expr) => Expr::Exp(Box::new(expr.simplify_numbers())),
            Expr::Ln(expr) => Expr::Ln(Box::new(expr.simplify_numbers())),
            Expr::sin(expr) => Expr::sin(Box::new(expr.simplify_numbers())),
            Expr::cos(expr) => Expr::cos(Box::new(expr.simplify_numbers())),
            Expr::tg(expr) => Expr::tg(Box::new(expr.simplify_numbers())),
            Expr::ctg(expr) => Expr::ctg(Box::new(expr.simplify_numbers())),
            Expr::arcsin(expr) => Expr::arcsin(Box::new(expr.simplify_numbers())),
            Expr::arccos(expr) => Expr::arccos(Box::new(expr.simplify_numbers())),
            Expr::arctg(expr) => Expr::arctg(Box::new(expr.simplify_numbers())),
            Expr::arcctg(expr) => Expr::arcctg(Box::new(expr.simplify_numbers())),
        }
    } // end of simplify_numbers

    /// One bottom-up pass of algebraic identity rewriting.
    ///
    /// Handles neutral elements (x + 0, x * 1, x / 1), absorbing elements
    /// (x * 0, 0 / x), power laws and the special values of elementary
    /// functions at 0 and 1.
    pub fn simplify_(&self) -> Expr {
        match self {
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => {
                let l = lhs.simplify_();
                let r = rhs.simplify_();
                match (&l, &r) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a + b),
                    (Expr::Const(c), _) if *c == 0.0 => r,
                    (_, Expr::Const(c)) if *c == 0.0 => l,
                    _ => Expr::Add(Box::new(l), Box::new(r)),
                }
            }
            Expr::Sub(lhs, rhs) => {
                let l = lhs.simplify_();
                let r = rhs.simplify_();
                match (&l, &r) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a - b),
                    (_, Expr::Const(c)) if *c == 0.0 => l,
                    _ if l == r => Expr::Const(0.0),
                    _ => Expr::Sub(Box::new(l), Box::new(r)),
                }
            }
            Expr::Mul(lhs, rhs) => {
                let l = lhs.simplify_();
                let r = rhs.simplify_();
                match (&l, &r) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b),
                    (Expr::Const(c), _) if *c == 0.0 => Expr::Const(0.0),
                    (_, Expr::Const(c)) if *c == 0.0 => Expr::Const(0.0),
                    (Expr::Const(c), _) if *c == 1.0 => r,
                    (_, Expr::Const(c)) if *c == 1.0 => l,
                    // (c1 * e) * c2 -> (c1*c2) * e and symmetric forms
                    (Expr::Mul(a, b), Expr::Const(c2)) => {
                        if let Expr::Const(c1) = a.as_ref() {
                            Expr::Mul(Box::new(Expr::Const(c1 * c2)), b.clone())
                        } else if let Expr::Const(c1) = b.as_ref() {
                            Expr::Mul(Box::new(Expr::Const(c1 * c2)), a.clone())
                        } else {
                            Expr::Mul(Box::new(l.clone()), Box::new(r.clone()))
                        }
                    }
                    (Expr::Const(c2), Expr::Mul(a, b)) => {
                        if let Expr::Const(c1) = a.as_ref() {
                            Expr::Mul(Box::new(Expr::Const(c1 * c2)), b.clone())
                        } else if let Expr::Const(c1) = b.as_ref() {
                            Expr::Mul(Box::new(Expr::Const(c1 * c2)), a.clone())
                        } else {
                            Expr::Mul(Box::new(l.clone()), Box::new(r.clone()))
                        }
                    }
                    // x^a * x^b -> x^(a+b)
                    (Expr::Pow(b1, e1), Expr::Pow(b2, e2)) if b1 == b2 => Expr::Pow(
                        b1.clone(),
                        Box::new(Expr::Add(e1.clone(), e2.clone()).simplify_()),
                    ),
                    _ => Expr::Mul(Box::new(l), Box::new(r)),
                }
            }
            Expr::Div(lhs, rhs) => {
                let l = lhs.simplify_();
                let r = rhs.simplify_();
                match (&l, &r) {
                    (Expr::Const(a), Expr::Const(b)) if *b != 0.0 => Expr::Const(a / b),
                    (Expr::Const(c), _) if *c == 0.0 => Expr::Const(0.0),
                    (_, Expr::Const(c)) if *c == 1.0 => l,
                    _ if l == r => Expr::Const(1.0),
                    // x^a / x^b -> x^(a-b)
                    (Expr::Pow(b1, e1), Expr::Pow(b2, e2)) if b1 == b2 => Expr::Pow(
                        b1.clone(),
                        Box::new(Expr::Sub(e1.clone(), e2.clone()).simplify_()),
                    ),
                    _ => Expr::Div(Box::new(l), Box::new(r)),
                }
            }
            Expr::Pow(base, exp) => {
                let b = base.simplify_();
                let e = exp.simplify_();
                match (&b, &e) {
                    (Expr::Const(a), Expr::Const(n)) => Expr::Const(a.powf(*n)),
                    (_, Expr::Const(n)) if *n == 0.0 => Expr::Const(1.0),
                    (_, Expr::Const(n)) if *n == 1.0 => b,
                    (Expr::Const(c), _) if *c == 0.0 => Expr::Const(0.0),
                    (Expr::Const(c), _) if *c == 1.0 => Expr::Const(1.0),
                    // (x^a)^b -> x^(a*b)
                    (Expr::Pow(inner_base, inner_exp), _) => Expr::Pow(
                        inner_base.clone(),
                        Box::new(Expr::Mul(inner_exp.clone(), Box::new(e.clone())).simplify_()),
                    ),
                    _ => Expr::Pow(Box::new(b), Box::new(e)),
                }
            }
            Expr::Exp(expr) => {
                let inner = expr.simplify_();
                match &inner {
                    Expr::Const(c) if *c == 0.0 => Expr::Const(1.0),
                    _ => Expr::Exp(Box::new(inner)),
                }
            }
            Expr::Ln(expr) => {
                let inner = expr.simplify_();
                match &inner {
                    Expr::Const(c) if *c == 1.0 => Expr::Const(0.0),
                    _ => Expr::Ln(Box::new(inner)),
                }
            }
            Expr::sin(expr) => {
                let inner = expr.simplify_();
                match &inner {
                    Expr::Const(c) if *c == 0.0 => Expr::Const(0.0),
                    _ => Expr::sin(Box::new(inner)),
                }
            }
            Expr::cos(expr) => {
                let inner = expr.simplify_();
                match &inner {
                    Expr::Const(c) if *c == 0.0 => Expr::Const(1.0),
                    _ => Expr::cos(Box::new(inner)),
                }
            }
            Expr::tg(expr) => {
                let inner = expr.simplify_();
                match &inner {
                    Expr::Const(c) if *c == 0.0 => Expr::Const(0.0),
                    _ => Expr::tg(Box::new(inner)),
                }
            }
            Expr::ctg(expr) => Expr::ctg(Box::new(expr.simplify_())),
            Expr::arcsin(expr) => {
                let inner = expr.simplify_();
                match &inner {
                    Expr::Const(c) if *c == 0.0 => Expr::Const(0.0),
                    _ => Expr::arcsin(Box::new(inner)),
                }
            }
            Expr::arccos(expr) => {
                let inner = expr.simplify_();
                match &inner {
                    Expr::Const(c) if *c == 1.0 => Expr::Const(0.0),
                    _ => Expr::arccos(Box::new(inner)),
                }
            }
            Expr::arctg(expr) => {
                let inner = expr.simplify_();
                match &inner {
                    Expr::Const(c) if *c == 0.0 => Expr::Const(0.0),
                    _ => Expr::arctg(Box::new(inner)),
                }
            }
            Expr::arcctg(expr) => Expr::arcctg(Box::new(expr.simplify_())),
        }
    } // end of simplify_

    /// Simplifies the expression by iterating identity rewriting to a fixed point.
    ///
    /// The pass count is bounded so pathological trees cannot loop forever.
    pub fn simplify(&self) -> Expr {
        let mut current = self.simplify_numbers();
        for _ in 0..20 {
            let next = current.simplify_();
            if next == current {
                break;
            }
            current = next;
        }
        current
    } // end of simplify
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constant_folding() {
        let expr = Expr::parse_expression("2 + 3 * 4").unwrap();
        assert_eq!(expr.simplify(), Expr::Const(14.0));
    }

    #[test]
    fn test_neutral_elements() {
        let x = Expr::Var("x".to_string());
        let expr = (x.clone() + Expr::Const(0.0)) * Expr::Const(1.0);
        assert_eq!(expr.simplify(), x);
    }

    #[test]
    fn test_mul_by_zero() {
        let expr = Expr::parse_expression("x * 0 + sin(x) * 0").unwrap();
        assert_eq!(expr.simplify(), Expr::Const(0.0));
    }

    #[test]
    fn test_pow_identities() {
        let x = Expr::Var("x".to_string());
        assert_eq!(x.clone().pow(Expr::Const(1.0)).simplify(), x.clone());
        assert_eq!(x.clone().pow(Expr::Const(0.0)).simplify(), Expr::Const(1.0));
    }

    #[test]
    fn test_nested_constant_collection() {
        // (2 * x) * 3 -> 6 * x
        let x = Expr::Var("x".to_string());
        let expr = (Expr::Const(2.0) * x.clone()) * Expr::Const(3.0);
        assert_eq!(expr.simplify(), Expr::Const(6.0) * x);
    }

    #[test]
    fn test_pow_merge() {
        // x^2 * x^3 -> x^5
        let expr = Expr::parse_expression("x^2 * x^3").unwrap();
        assert_eq!(
            expr.simplify(),
            Expr::Var("x".to_string()).pow(Expr::Const(5.0))
        );
    }

    #[test]
    fn test_simplify_preserves_value() {
        let expr = Expr::parse_expression("(x + 0) * 1 + x^2 * x + exp(0)").unwrap();
        let simplified = expr.simplify();
        let x = 1.7;
        assert_relative_eq!(
            expr.eval_expression(vec!["x"], &[x]),
            simplified.eval_expression(vec!["x"], &[x]),
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_special_function_values() {
        assert_eq!(
            Expr::parse_expression("exp(0)").unwrap().simplify(),
            Expr::Const(1.0)
        );
        assert_eq!(
            Expr::parse_expression("ln(1)").unwrap().simplify(),
            Expr::Const(0.0)
        );
        assert_eq!(
            Expr::parse_expression("cos(0)").unwrap().simplify(),
            Expr::Const(1.0)
        );
    }
}
