//! The integral service: the whole pipeline from raw expression string to
//! symbolic result, definite value, explanation steps and optional plot.
//!
//! `compute` is a pure function of the request: no shared state, no caching,
//! identical inputs produce byte-identical output strings.

use crate::Utils::plots::render_two_series_png;
use crate::api::dto::IntegralRequest;
use crate::api::errors::ApiError;
use crate::symbolic::parse_expr::normalize_input;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::split_outside_brackets;

/// Plot domain used when no bounds are given.
const DEFAULT_PLOT_DOMAIN: (f64, f64) = (-10.0, 10.0);
/// Number of sample points per curve.
const PLOT_SAMPLES: usize = 400;

/// Result of one integral computation, before HTTP serialization.
#[derive(Debug, Clone)]
pub struct IntegralOutcome {
    pub original_expression: String,
    pub integral_expression: String,
    pub definite_value: Option<f64>,
    pub plot_png: Option<Vec<u8>>,
    pub explanation: Vec<String>,
}

pub struct IntegralService;

impl IntegralService {
    /// Parses, integrates and (optionally) evaluates and plots one request.
    pub fn compute(request: &IntegralRequest) -> Result<IntegralOutcome, ApiError> {
        let raw = request.expression.trim();
        if raw.is_empty() {
            return Err(ApiError::ParseError(
                "field 'expression' is empty".to_string(),
            ));
        }
        let normalized = normalize_input(raw);
        let parsed = Expr::parse_expression(&normalized)
            .map_err(|e| ApiError::ParseError(format!("'{}': {}", raw, e)))?;

        let variables = parsed.all_arguments_are_variables();
        if variables.len() > 1 {
            return Err(ApiError::ParseError(format!(
                "expected one free variable, found {:?}",
                variables
            )));
        }
        let var = variables
            .first()
            .map(String::as_str)
            .unwrap_or("x")
            .to_string();

        let bounds = Self::check_bounds(request)?;

        // fold numeric subtrees first so forms like x^(-2) reach the power rule
        let antiderivative = parsed
            .simplify_numbers()
            .integrate(&var)
            .map_err(ApiError::IntegrationError)?
            .simplify();
        let integral_expression = antiderivative.to_string();

        let definite_value = match bounds {
            Some((lower, upper)) => {
                let at_upper = antiderivative.eval_expression(vec![var.as_str()], &[upper]);
                let at_lower = antiderivative.eval_expression(vec![var.as_str()], &[lower]);
                let value = at_upper - at_lower;
                if !value.is_finite() {
                    return Err(ApiError::IntegrationError(format!(
                        "definite integral of '{}' is not finite on [{}, {}]",
                        raw, lower, upper
                    )));
                }
                Some(value)
            }
            None => None,
        };

        let explanation = build_explanation(
            &normalized,
            &var,
            &integral_expression,
            bounds,
            definite_value,
        );

        let plot_png = if request.want_plot.unwrap_or(false) {
            let domain = bounds
                .map(|(lower, upper)| (lower.min(upper), lower.max(upper)))
                .unwrap_or(DEFAULT_PLOT_DOMAIN);
            Some(Self::render_plot(raw, &parsed, &antiderivative, domain)?)
        } else {
            None
        };

        Ok(IntegralOutcome {
            original_expression: raw.to_string(),
            integral_expression,
            definite_value,
            plot_png,
            explanation,
        })
    } // end of compute

    /// Bounds must come in pairs and be finite; reversed bounds are legal.
    fn check_bounds(request: &IntegralRequest) -> Result<Option<(f64, f64)>, ApiError> {
        match (request.lower_bound, request.upper_bound) {
            (None, None) => Ok(None),
            (Some(_), None) => Err(ApiError::InvalidBoundsError(
                "field 'upper_bound' is missing".to_string(),
            )),
            (None, Some(_)) => Err(ApiError::InvalidBoundsError(
                "field 'lower_bound' is missing".to_string(),
            )),
            (Some(lower), Some(upper)) => {
                if !lower.is_finite() {
                    return Err(ApiError::InvalidBoundsError(
                        "field 'lower_bound' is not finite".to_string(),
                    ));
                }
                if !upper.is_finite() {
                    return Err(ApiError::InvalidBoundsError(
                        "field 'upper_bound' is not finite".to_string(),
                    ));
                }
                Ok(Some((lower, upper)))
            }
        }
    }

    /// Samples both curves over the domain and renders them to PNG bytes.
    fn render_plot(
        caption: &str,
        original: &Expr,
        antiderivative: &Expr,
        (x_min, x_max): (f64, f64),
    ) -> Result<Vec<u8>, ApiError> {
        let f = original.lambdify1D();
        let big_f = antiderivative.lambdify1D();
        let step = (x_max - x_min) / (PLOT_SAMPLES - 1) as f64;
        let mut original_series = Vec::with_capacity(PLOT_SAMPLES);
        let mut integral_series = Vec::with_capacity(PLOT_SAMPLES);
        for i in 0..PLOT_SAMPLES {
            let x = x_min + step * i as f64;
            let y = f(x);
            if y.is_finite() {
                original_series.push((x, y));
            }
            let y_int = big_f(x);
            if y_int.is_finite() {
                integral_series.push((x, y_int));
            }
        }
        render_two_series_png(
            &format!("f(x) = {}", caption),
            &original_series,
            &integral_series,
        )
        .map_err(ApiError::PlotRenderError)
    }
}

/// Builds the step-by-step description of the computation: the problem
/// statement, one line per top-level term naming the rule applied, the
/// antiderivative (with the constant of integration in prose only) and,
/// for definite integrals, the evaluation step.
fn build_explanation(
    normalized: &str,
    var: &str,
    integral_expression: &str,
    bounds: Option<(f64, f64)>,
    definite_value: Option<f64>,
) -> Vec<String> {
    let mut steps = Vec::new();
    steps.push(format!("Integrate: \\int {} \\, d{}", normalized, var));

    let terms = split_outside_brackets(normalized, '+');
    if terms.len() > 1 {
        steps.push(format!(
            "Split the integral into {} terms by linearity",
            terms.len()
        ));
    }
    for term in &terms {
        let term = term.trim();
        if term.is_empty() {
            continue;
        }
        steps.push(classify_term(term, var));
    }

    steps.push(format!("Antiderivative: {} + C", integral_expression));
    if let (Some((lower, upper)), Some(value)) = (bounds, definite_value) {
        steps.push(format!(
            "Evaluate F({upper}) - F({lower}) = {value}"
        ));
    }
    steps
}

/// Names the integration rule a single term is resolved by.
fn classify_term(term: &str, var: &str) -> String {
    let has = |needle: &str| term.contains(needle);
    if has("sin") || has("cos") || has("tg") || has("tan") || has("ctg") || has("cot") {
        format!("Term '{term}': apply the trigonometric integration rules")
    } else if has("ln") || has("log") {
        format!("Term '{term}': integrate by parts")
    } else if has("exp") {
        format!("Term '{term}': exponential rule, \\int e^(a{var}) d{var} = e^(a{var})/a")
    } else if has("^") {
        format!(
            "Term '{term}': power rule, \\int {var}^n d{var} = {var}^(n+1)/(n+1)"
        )
    } else if term.contains(var) {
        format!("Term '{term}': linear term, \\int a*{var} d{var} = a*{var}^2/2")
    } else {
        format!("Term '{term}': constant, \\int c d{var} = c*{var}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn request(expression: &str) -> IntegralRequest {
        IntegralRequest {
            expression: expression.to_string(),
            lower_bound: None,
            upper_bound: None,
            want_plot: None,
        }
    }

    fn definite_request(expression: &str, lower: f64, upper: f64) -> IntegralRequest {
        IntegralRequest {
            expression: expression.to_string(),
            lower_bound: Some(lower),
            upper_bound: Some(upper),
            want_plot: None,
        }
    }

    #[test]
    fn test_identity_over_unit_interval() {
        let outcome = IntegralService::compute(&definite_request("x", 0.0, 1.0)).unwrap();
        assert_relative_eq!(outcome.definite_value.unwrap(), 0.5, epsilon = 1e-10);
    }

    #[test]
    fn test_python_style_power_input() {
        let outcome = IntegralService::compute(&request("x**2")).unwrap();
        // the result must be symbolically equivalent to x^3/3
        let reparsed = Expr::parse_expression(&outcome.integral_expression).unwrap();
        for x in [0.5, 1.0, 2.0, -1.5] {
            assert_relative_eq!(
                reparsed.eval_expression(vec!["x"], &[x]),
                x * x * x / 3.0,
                epsilon = 1e-10
            );
        }
    }

    #[test]
    fn test_integral_expression_reparses() {
        for input in ["sin(2*x)", "x*exp(x)", "ln(x)", "3*x^2 + 2*x - 5"] {
            let outcome = IntegralService::compute(&request(input)).unwrap();
            assert!(Expr::parse_expression(&outcome.integral_expression).is_ok());
        }
    }

    #[test]
    fn test_singular_interval_is_rejected() {
        let error = IntegralService::compute(&definite_request("1/x", -1.0, 1.0)).unwrap_err();
        assert!(matches!(error, ApiError::IntegrationError(_)));
    }

    #[test]
    fn test_swapped_bounds_negate() {
        let forward = IntegralService::compute(&definite_request("x^2 + 1", 0.0, 2.0)).unwrap();
        let backward = IntegralService::compute(&definite_request("x^2 + 1", 2.0, 0.0)).unwrap();
        assert_relative_eq!(
            forward.definite_value.unwrap(),
            -backward.definite_value.unwrap(),
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_empty_expression_is_parse_error() {
        let error = IntegralService::compute(&request("   ")).unwrap_err();
        assert!(matches!(error, ApiError::ParseError(_)));
        assert!(error.to_string().contains("expression"));
    }

    #[test]
    fn test_single_bound_is_invalid_bounds() {
        let mut req = request("x");
        req.lower_bound = Some(0.0);
        let error = IntegralService::compute(&req).unwrap_err();
        assert!(matches!(error, ApiError::InvalidBoundsError(_)));
        assert!(error.to_string().contains("upper_bound"));
    }

    #[test]
    fn test_two_variables_rejected() {
        let error = IntegralService::compute(&request("x + y")).unwrap_err();
        assert!(matches!(error, ApiError::ParseError(_)));
        assert!(error.to_string().contains("x"));
        assert!(error.to_string().contains("y"));
    }

    #[test]
    fn test_constant_expression_defaults_to_x() {
        let outcome = IntegralService::compute(&request("3")).unwrap();
        let reparsed = Expr::parse_expression(&outcome.integral_expression).unwrap();
        assert_relative_eq!(
            reparsed.eval_expression(vec!["x"], &[2.0]),
            6.0,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_determinism() {
        let first = IntegralService::compute(&request("x^2 + sin(x)")).unwrap();
        let second = IntegralService::compute(&request("x^2 + sin(x)")).unwrap();
        assert_eq!(first.integral_expression, second.integral_expression);
        assert_eq!(first.explanation, second.explanation);
    }

    #[test]
    fn test_no_plot_unless_requested() {
        let outcome = IntegralService::compute(&request("x")).unwrap();
        assert!(outcome.plot_png.is_none());
    }

    #[test]
    fn test_plot_is_png() {
        let mut req = definite_request("sin(x)", 0.0, 3.14);
        req.want_plot = Some(true);
        let outcome = IntegralService::compute(&req).unwrap();
        let png = outcome.plot_png.unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_malformed_input_fails_before_plotting() {
        let mut req = request("sin(x)*");
        req.want_plot = Some(true);
        let error = IntegralService::compute(&req).unwrap_err();
        assert!(matches!(error, ApiError::ParseError(_)));
    }

    #[test]
    fn test_explanation_mentions_constant_of_integration() {
        let outcome = IntegralService::compute(&request("x^2")).unwrap();
        assert!(outcome.explanation.iter().any(|step| step.contains("+ C")));
        assert!(
            outcome
                .explanation
                .iter()
                .any(|step| step.contains("power rule"))
        );
    }

    #[test]
    fn test_explanation_names_definite_step() {
        let outcome = IntegralService::compute(&definite_request("x", 0.0, 1.0)).unwrap();
        assert!(outcome.explanation.last().unwrap().contains("F(1)"));
    }
}
