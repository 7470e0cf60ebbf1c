use schemars::JsonSchema;
use serde::Deserialize;

use super::ToolContext;
use crate::types::Tool;

#[derive(Debug, Deserialize, JsonSchema, Default)]
#[schemars(description = "Evaluate a math expression and return a numeric result")]
pub struct Calc {
    #[schemars(description = "A valid math expression, e.g. (2+2)*3")]
    pub expression: String,
}

impl Tool for Calc {
    type Context = ToolContext;

    fn name(&self) -> &'static str {
        "calc"
    }

    fn apply(&self, _: Self::Context) -> String {
        solve(&self.expression)
    }
}

fn solve(expression: &str) -> String {
    format!("{:.2}", evaluate(&expression.replace(' ', "")))
}

// Deliberately naive: parenthesised groups reduce innermost-first, the rest
// is a single left-to-right scan with NO operator precedence, and anything
// that fails to parse as a number counts as zero. "2+2*3" is 12, not 8.
fn evaluate(expression: &str) -> f64 {
    let mut expr = expression.to_string();
    while let Some(start) = expr.rfind('(') {
        let Some(len) = expr[start..].find(')') else {
            break;
        };
        let end = start + len;
        let inner = evaluate(&expr[start + 1..end]);
        // The group's value is spliced back as its two-decimal rendering,
        // precision loss included.
        expr = format!("{}{:.2}{}", &expr[..start], inner, &expr[end + 1..]);
    }
    evaluate_flat(&expr)
}

fn evaluate_flat(expr: &str) -> f64 {
    let mut result = 0.0;
    let mut pending = None;
    let mut buffer = String::new();
    for ch in expr.chars() {
        match ch {
            // An operator with nothing buffered is the next number's sign.
            '+' | '-' | '*' | '/' if !buffer.is_empty() => {
                apply_operator(&mut result, pending, parse_number(&buffer));
                pending = Some(ch);
                buffer.clear();
            }
            _ => buffer.push(ch),
        }
    }
    apply_operator(&mut result, pending, parse_number(&buffer));
    result
}

fn apply_operator(result: &mut f64, operator: Option<char>, value: f64) {
    match operator {
        None => *result = value,
        Some('+') => *result += value,
        Some('-') => *result -= value,
        Some('*') => *result *= value,
        Some('/') => *result /= value,
        Some(_) => {}
    }
}

fn parse_number(token: &str) -> f64 {
    token.parse().unwrap_or(0.0)
}
