//! # Symbolic Integration Module
//!
//! Analytical integration by rule matching over the expression tree. Indefinite
//! integration returns an antiderivative without the constant of integration;
//! definite integration evaluates the antiderivative at both bounds via the
//! fundamental theorem of calculus.
//!
//! Supported rules: linearity, constant factors, the power rule, exponentials
//! of linear arguments, logarithms, direct and inverse trigonometric functions,
//! products of powers with exponentials or logarithms (integration by parts)
//! and quotients of the form f'/f. Expressions outside the rule table return
//! `Err` so the caller can map the failure to its own error domain.

use crate::symbolic::symbolic_engine::Expr;

/// Largest exponent admitted by the x^n * e^(ax) by-parts expansion; the
/// expansion produces n + 1 terms, so unbounded n would let a tiny request
/// build an arbitrarily large expression.
const MAX_BY_PARTS_POWER: f64 = 64.0;

impl Expr {
    /// SYMBOLIC INTEGRATION

    /// Integrates the expression with respect to a variable.
    ///
    /// Returns the indefinite integral without the constant of integration.
    /// Expressions not containing the variable are treated as constants.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let f = Expr::parse_expression("x^2").unwrap();
    /// let F = f.integrate("x").unwrap(); // x^3 / 3
    /// ```
    pub fn integrate(&self, var: &str) -> Result<Expr, String> {
        match self {
            Expr::Const(c) => Ok(Expr::Const(*c) * Expr::Var(var.to_string())),
            Expr::Var(name) => {
                if name == var {
                    // x -> x^2 / 2
                    Ok(Expr::Var(var.to_string()).pow(Expr::Const(2.0)) / Expr::Const(2.0))
                } else {
                    Ok(self.clone() * Expr::Var(var.to_string()))
                }
            }
            Expr::Add(lhs, rhs) => Ok(lhs.integrate(var)? + rhs.integrate(var)?),
            Expr::Sub(lhs, rhs) => Ok(lhs.integrate(var)? - rhs.integrate(var)?),
            Expr::Mul(lhs, rhs) => self.integrate_multiplication(lhs, rhs, var),
            Expr::Div(lhs, rhs) => self.integrate_division(lhs, rhs, var),
            Expr::Pow(base, exp) => self.integrate_power(base, exp, var),
            Expr::Exp(inner) => self.integrate_exponential(inner, var),
            Expr::Ln(inner) => self.integrate_logarithm(inner, var),
            Expr::sin(inner) | Expr::cos(inner) | Expr::tg(inner) | Expr::ctg(inner) => {
                self.integrate_trigonometric(inner, var)
            }
            Expr::arcsin(inner)
            | Expr::arccos(inner)
            | Expr::arctg(inner)
            | Expr::arcctg(inner) => self.integrate_inverse_trigonometric(inner, var),
        }
    } // end of integrate

    /// Definite integral over [lower, upper] via the fundamental theorem of calculus.
    ///
    /// The result may be non-finite when the antiderivative is singular or
    /// undefined somewhere on the interval; callers must check.
    pub fn definite_integrate(&self, var: &str, lower: f64, upper: f64) -> Result<f64, String> {
        let antiderivative = self.integrate(var)?;
        let at_upper = antiderivative.eval_expression(vec![var], &[upper]);
        let at_lower = antiderivative.eval_expression(vec![var], &[lower]);
        Ok(at_upper - at_lower)
    } // end of definite_integrate

    /// INTEGRATION RULE HELPERS

    /// Products: constant factors, x^n * exp(a*x) and x^n * ln(x).
    fn integrate_multiplication(
        &self,
        lhs: &Expr,
        rhs: &Expr,
        var: &str,
    ) -> Result<Expr, String> {
        // constant factor out
        if !lhs.contains_variable(var) {
            return Ok(lhs.clone() * rhs.integrate(var)?);
        }
        if !rhs.contains_variable(var) {
            return Ok(rhs.clone() * lhs.integrate(var)?);
        }
        // x^n * exp(a*x), either order
        for (first, second) in [(lhs, rhs), (rhs, lhs)] {
            if let (Some(n), Expr::Exp(inner)) = (first.power_of_variable(var), second) {
                if let Some((a, b)) = inner.as_linear(var) {
                    if a != 0.0 && n >= 0.0 && n.fract() == 0.0 && n <= MAX_BY_PARTS_POWER {
                        let result = integrate_xn_times_exp_ax(n, a, var);
                        return if b == 0.0 {
                            Ok(result)
                        } else {
                            // e^(ax+b) = e^b * e^(ax)
                            Ok(Expr::Const(b.exp()) * result)
                        };
                    }
                }
            }
            // x^n * ln(x): x^(n+1) * (ln(x)/(n+1) - 1/(n+1)^2)
            if let (Some(n), Expr::Ln(inner)) = (first.power_of_variable(var), second) {
                if matches!(inner.as_ref(), Expr::Var(name) if name == var) && n != -1.0 {
                    let x = Expr::Var(var.to_string());
                    let n1 = n + 1.0;
                    return Ok(x.clone().pow(Expr::Const(n1))
                        * (Expr::Ln(x.boxed()) / Expr::Const(n1)
                            - Expr::Const(1.0) / Expr::Const(n1 * n1)));
                }
            }
        }
        if !self.contains_variable(var) {
            return Ok(self.clone() * Expr::Var(var.to_string()));
        }
        Err(format!("Cannot integrate expression: {}", self))
    }

    /// Quotients: constant denominators, ln(x)/x and the f'/f pattern.
    fn integrate_division(&self, lhs: &Expr, rhs: &Expr, var: &str) -> Result<Expr, String> {
        if !rhs.contains_variable(var) {
            return Ok(lhs.integrate(var)? / rhs.clone());
        }
        // ln(x)/x -> ln(x)^2 / 2
        if let Expr::Ln(inner) = lhs {
            if matches!(inner.as_ref(), Expr::Var(name) if name == var)
                && matches!(rhs, Expr::Var(name) if name == var)
            {
                return Ok(
                    Expr::Ln(Expr::Var(var.to_string()).boxed()).pow(Expr::Const(2.0))
                        / Expr::Const(2.0),
                );
            }
        }
        // f'(x)/f(x) -> ln(f(x)); covers 1/x since d/dx x = 1
        let denominator_derivative = rhs.diff(var).simplify();
        let numerator = lhs.simplify();
        if denominator_derivative.to_string() == numerator.to_string() {
            return Ok(Expr::Ln(rhs.clone().boxed()));
        }
        // c * f'(x) / f(x) -> c * ln(f(x))
        if let Expr::Mul(a, b) = &numerator {
            if let Expr::Const(c) = a.as_ref() {
                if denominator_derivative.to_string() == b.to_string() {
                    return Ok(Expr::Const(*c) * Expr::Ln(rhs.clone().boxed()));
                }
            }
            if let Expr::Const(c) = b.as_ref() {
                if denominator_derivative.to_string() == a.to_string() {
                    return Ok(Expr::Const(*c) * Expr::Ln(rhs.clone().boxed()));
                }
            }
        }
        // const / x^n; n = 1 gives c * ln(x)
        if let Some(n) = rhs.power_of_variable(var) {
            if !lhs.contains_variable(var) {
                let x = Expr::Var(var.to_string());
                if n == 1.0 {
                    return Ok(lhs.clone() * Expr::Ln(x.boxed()));
                }
                return Ok(lhs.clone() * x.pow(Expr::Const(1.0 - n)) / Expr::Const(1.0 - n));
            }
        }
        if !self.contains_variable(var) {
            return Ok(self.clone() * Expr::Var(var.to_string()));
        }
        Err(format!("Cannot integrate expression: {}", self))
    }

    /// Power rule x^n -> x^(n+1)/(n+1), the n = -1 exception and c^x.
    fn integrate_power(&self, base: &Expr, exp: &Expr, var: &str) -> Result<Expr, String> {
        match (base, exp) {
            (Expr::Var(name), Expr::Const(n)) if name == var => {
                if *n == -1.0 {
                    Ok(Expr::Ln(Expr::Var(var.to_string()).boxed()))
                } else {
                    Ok(Expr::Var(var.to_string()).pow(Expr::Const(n + 1.0))
                        / Expr::Const(n + 1.0))
                }
            }
            // c^x -> c^x / ln(c)
            (Expr::Const(c), Expr::Var(name)) if name == var && *c > 0.0 && *c != 1.0 => {
                Ok(self.clone() / Expr::Const(c.ln()))
            }
            _ => {
                if !self.contains_variable(var) {
                    Ok(self.clone() * Expr::Var(var.to_string()))
                } else {
                    Err(format!("Cannot integrate expression: {}", self))
                }
            }
        }
    }

    /// Exponentials of linear arguments: exp(a*x + b) -> exp(a*x + b) / a.
    fn integrate_exponential(&self, inner: &Expr, var: &str) -> Result<Expr, String> {
        if let Some((a, _b)) = inner.as_linear(var) {
            if a != 0.0 {
                return Ok(self.clone() / Expr::Const(a));
            }
            // constant argument
            return Ok(self.clone() * Expr::Var(var.to_string()));
        }
        Err(format!("Cannot integrate expression: {}", self))
    }

    /// Logarithm: ln(x) -> x*ln(x) - x.
    fn integrate_logarithm(&self, inner: &Expr, var: &str) -> Result<Expr, String> {
        match inner {
            Expr::Var(name) if name == var => {
                let x = Expr::Var(var.to_string());
                Ok(x.clone() * Expr::Ln(x.clone().boxed()) - x)
            }
            _ => {
                if !self.contains_variable(var) {
                    Ok(self.clone() * Expr::Var(var.to_string()))
                } else {
                    Err(format!("Cannot integrate expression: {}", self))
                }
            }
        }
    }

    /// Direct trigonometric functions with linear arguments.
    fn integrate_trigonometric(&self, inner: &Expr, var: &str) -> Result<Expr, String> {
        let Some((a, _b)) = inner.as_linear(var) else {
            return Err(format!("Cannot integrate expression: {}", self));
        };
        if a == 0.0 {
            return Ok(self.clone() * Expr::Var(var.to_string()));
        }
        let antiderivative = match self {
            // sin(ax+b) -> -cos(ax+b)/a
            Expr::sin(_) => -Expr::cos(inner.clone().boxed()),
            // cos(ax+b) -> sin(ax+b)/a
            Expr::cos(_) => Expr::sin(inner.clone().boxed()),
            // tg(ax+b) -> -ln(cos(ax+b))/a
            Expr::tg(_) => -Expr::Ln(Expr::cos(inner.clone().boxed()).boxed()),
            // ctg(ax+b) -> ln(sin(ax+b))/a
            Expr::ctg(_) => Expr::Ln(Expr::sin(inner.clone().boxed()).boxed()),
            _ => unreachable!(),
        };
        Ok(antiderivative / Expr::Const(a))
    }

    /// Inverse trigonometric functions of the bare variable, by parts.
    fn integrate_inverse_trigonometric(&self, inner: &Expr, var: &str) -> Result<Expr, String> {
        if !matches!(inner, Expr::Var(name) if name == var) {
            return if !self.contains_variable(var) {
                Ok(self.clone() * Expr::Var(var.to_string()))
            } else {
                Err(format!("Cannot integrate expression: {}", self))
            };
        }
        let x = Expr::Var(var.to_string());
        let sqrt_one_minus_x2 = (Expr::Const(1.0) - x.clone().pow(Expr::Const(2.0)))
            .pow(Expr::Const(0.5));
        let ln_one_plus_x2 =
            Expr::Ln((Expr::Const(1.0) + x.clone().pow(Expr::Const(2.0))).boxed());
        match self {
            // arcsin(x) -> x*arcsin(x) + sqrt(1 - x^2)
            Expr::arcsin(_) => Ok(x.clone() * self.clone() + sqrt_one_minus_x2),
            // arccos(x) -> x*arccos(x) - sqrt(1 - x^2)
            Expr::arccos(_) => Ok(x.clone() * self.clone() - sqrt_one_minus_x2),
            // arctg(x) -> x*arctg(x) - ln(1 + x^2)/2
            Expr::arctg(_) => Ok(x.clone() * self.clone() - ln_one_plus_x2 / Expr::Const(2.0)),
            // arcctg(x) -> x*arcctg(x) + ln(1 + x^2)/2
            Expr::arcctg(_) => Ok(x.clone() * self.clone() + ln_one_plus_x2 / Expr::Const(2.0)),
            _ => unreachable!(),
        }
    }

    /// PATTERN HELPERS

    /// Returns n if the expression is var^n (Var itself counts as n = 1).
    fn power_of_variable(&self, var: &str) -> Option<f64> {
        match self {
            Expr::Var(name) if name == var => Some(1.0),
            Expr::Pow(base, exp) => match (base.as_ref(), exp.as_ref()) {
                (Expr::Var(name), Expr::Const(n)) if name == var => Some(*n),
                _ => None,
            },
            _ => None,
        }
    }

    /// Returns (a, b) if the expression has the linear form a*var + b.
    fn as_linear(&self, var: &str) -> Option<(f64, f64)> {
        match self {
            Expr::Const(c) => Some((0.0, *c)),
            Expr::Var(name) if name == var => Some((1.0, 0.0)),
            Expr::Var(_) => None,
            Expr::Add(lhs, rhs) => {
                let (a1, b1) = lhs.as_linear(var)?;
                let (a2, b2) = rhs.as_linear(var)?;
                Some((a1 + a2, b1 + b2))
            }
            Expr::Sub(lhs, rhs) => {
                let (a1, b1) = lhs.as_linear(var)?;
                let (a2, b2) = rhs.as_linear(var)?;
                Some((a1 - a2, b1 - b2))
            }
            Expr::Mul(lhs, rhs) => match (lhs.as_ref(), rhs.as_ref()) {
                (Expr::Const(c), other) | (other, Expr::Const(c)) => {
                    let (a, b) = other.as_linear(var)?;
                    Some((c * a, c * b))
                }
                _ => None,
            },
            Expr::Div(lhs, rhs) => match rhs.as_ref() {
                Expr::Const(c) if *c != 0.0 => {
                    let (a, b) = lhs.as_linear(var)?;
                    Some((a / c, b / c))
                }
                _ => None,
            },
            _ => None,
        }
    }
}

/// Integration by parts for x^n * exp(a*x), expanded iteratively:
/// e^(ax) * sum of c_k * x^k with c_n = 1/a and c_(k-1) = -(k/a) * c_k.
fn integrate_xn_times_exp_ax(n: f64, a: f64, var: &str) -> Expr {
    let x = Expr::Var(var.to_string());
    let exp_ax = Expr::Exp((Expr::Const(a) * x.clone()).boxed());
    if n == 0.0 {
        return exp_ax / Expr::Const(a);
    }
    let mut coefficient = 1.0 / a;
    let mut polynomial = x.clone().pow(Expr::Const(n)) * Expr::Const(coefficient);
    let mut k = n;
    while k > 0.0 {
        coefficient = -coefficient * k / a;
        k -= 1.0;
        let term = if k == 0.0 {
            Expr::Const(coefficient)
        } else {
            x.clone().pow(Expr::Const(k)) * Expr::Const(coefficient)
        };
        polynomial = polynomial + term;
    }
    polynomial * exp_ax
}
