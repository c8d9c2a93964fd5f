use super::{float_slot, int_slot, text_slot};
use crate::kernel::dispatcher::HandlerError;
use crate::kernel::intent::ArgumentBundle;

/// Spoken operators, longest first so "to the power of" is not split up by "power".
const WORD_OPERATORS: &[(&str, &str)] = &[
    ("to the power of", "^"),
    ("multiplied by", "*"),
    ("divided by", "/"),
    ("power", "^"),
    ("minus", "-"),
    ("times", "*"),
    ("plus", "+"),
    ("over", "/"),
];

pub fn calculate(args: &ArgumentBundle) -> Result<String, HandlerError> {
    let expression = text_slot(args, "expression")?;
    let value = evaluate_expression(expression).ok_or_else(|| {
        HandlerError::Failed("I couldn't calculate that. Please try again.".to_string())
    })?;
    Ok(format!("The result is {}", format_number(value)))
}

pub fn factorial(args: &ArgumentBundle) -> Result<String, HandlerError> {
    let n = int_slot(args, "n")?;
    let result = checked_factorial(n)
        .ok_or_else(|| HandlerError::Failed("I couldn't calculate that factorial.".to_string()))?;
    Ok(format!("The factorial of {} is {}", n, result))
}

pub fn binary_convert(args: &ArgumentBundle) -> Result<String, HandlerError> {
    let n = int_slot(args, "n")?;
    Ok(format!("The binary representation of {} is {}", n, to_binary(n)))
}

pub fn trigonometry(args: &ArgumentBundle) -> Result<String, HandlerError> {
    let function = text_slot(args, "function")?;
    let angle = int_slot(args, "angle")?;
    let unit = args.get("unit").unwrap_or("radians");

    let radians = if unit == "degrees" {
        (angle as f64).to_radians()
    } else {
        angle as f64
    };

    let (name, value) = match function {
        "sin" => ("sine", radians.sin()),
        "cos" => ("cosine", radians.cos()),
        "tan" => ("tangent", radians.tan()),
        other => {
            return Err(HandlerError::InvalidArgument {
                slot: "function".to_string(),
                value: other.to_string(),
            })
        }
    };
    Ok(format!("The {} of {} {} is {:.4}", name, angle, unit, value))
}

pub fn logarithm(args: &ArgumentBundle) -> Result<String, HandlerError> {
    let n = float_slot(args, "n")?;
    if n <= 0.0 {
        return Err(HandlerError::Failed(
            "The logarithm is only defined for positive numbers.".to_string(),
        ));
    }
    match args.get("base") {
        Some(_) => {
            let base = float_slot(args, "base")?;
            if base <= 0.0 || base == 1.0 {
                return Err(HandlerError::InvalidArgument {
                    slot: "base".to_string(),
                    value: base.to_string(),
                });
            }
            Ok(format!("The logarithm of {} with base {} is {:.4}", n, base, n.log(base)))
        }
        None => Ok(format!("The logarithm (base 10) of {} is {:.4}", n, n.log10())),
    }
}

pub fn square_root(args: &ArgumentBundle) -> Result<String, HandlerError> {
    let n = float_slot(args, "n")?;
    if n < 0.0 {
        return Err(HandlerError::Failed(
            "I can't take the square root of a negative number.".to_string(),
        ));
    }
    Ok(format!("The square root of {} is {:.4}", n, n.sqrt()))
}

pub fn bit_shift(args: &ArgumentBundle) -> Result<String, HandlerError> {
    let direction = text_slot(args, "direction")?;
    let n = int_slot(args, "n")?;
    let positions = int_slot(args, "positions")?;
    let shift = u32::try_from(positions).ok().filter(|p| *p < 64).ok_or_else(|| {
        HandlerError::InvalidArgument {
            slot: "positions".to_string(),
            value: positions.to_string(),
        }
    })?;

    let (label, result) = match direction {
        "right" => ("right-shifted", n >> shift),
        "left" => (
            "left-shifted",
            n.checked_mul(1i64 << shift)
                .ok_or_else(|| HandlerError::Failed("That shift overflows.".to_string()))?,
        ),
        other => {
            return Err(HandlerError::InvalidArgument {
                slot: "direction".to_string(),
                value: other.to_string(),
            })
        }
    };
    Ok(format!("{} {} by {} is {}", n, label, shift, result))
}

pub fn to_binary(n: i64) -> String {
    if n < 0 {
        format!("-{:b}", n.unsigned_abs())
    } else {
        format!("{:b}", n)
    }
}

/// `None` for negative input or when the result does not fit in 128 bits.
pub fn checked_factorial(n: i64) -> Option<u128> {
    if n < 0 {
        return None;
    }
    (1..=n as u128).try_fold(1u128, |acc, k| acc.checked_mul(k))
}

/// Evaluates spoken arithmetic ("5 plus 3 times 2"). `None` when nothing
/// computable is left or the arithmetic is undefined.
pub fn evaluate_expression(spoken: &str) -> Option<f64> {
    let mut expression = spoken.to_lowercase().replace("**", "^");
    for (word, symbol) in WORD_OPERATORS {
        expression = expression.replace(word, symbol);
    }
    let tokens: Vec<char> = expression
        .chars()
        .filter(|c| c.is_ascii_digit() || "+-*/^().".contains(*c))
        .collect();
    if tokens.is_empty() {
        return None;
    }

    let mut parser = ExprParser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    if parser.pos != parser.tokens.len() || !value.is_finite() {
        return None;
    }
    Some(value)
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// expr   = term (('+' | '-') term)*
/// term   = unary (('*' | '/') unary)*
/// unary  = ('-' | '+') unary | power
/// power  = atom ('^' unary)?
/// atom   = number | '(' expr ')'
///
/// Nesting (signs, exponents, parentheses) is capped at `MAX_DEPTH`; deeper
/// input is rejected instead of recursing further.
struct ExprParser {
    tokens: Vec<char>,
    pos: usize,
    depth: usize,
}

const MAX_DEPTH: usize = 64;

impl ExprParser {
    fn peek(&self) -> Option<char> {
        self.tokens.get(self.pos).copied()
    }

    fn expr(&mut self) -> Option<f64> {
        let mut value = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                '+' => {
                    self.pos += 1;
                    value += self.term()?;
                }
                '-' => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Some(value)
    }

    fn term(&mut self) -> Option<f64> {
        let mut value = self.unary()?;
        while let Some(op) = self.peek() {
            match op {
                '*' => {
                    self.pos += 1;
                    value *= self.unary()?;
                }
                '/' => {
                    self.pos += 1;
                    let divisor = self.unary()?;
                    if divisor == 0.0 {
                        return None;
                    }
                    value /= divisor;
                }
                _ => break,
            }
        }
        Some(value)
    }

    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        if self.depth >= MAX_DEPTH {
            return None;
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    fn unary(&mut self) -> Option<f64> {
        self.nested(Self::signed)
    }

    fn signed(&mut self) -> Option<f64> {
        match self.peek()? {
            '-' => {
                self.pos += 1;
                Some(-self.unary()?)
            }
            '+' => {
                self.pos += 1;
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Option<f64> {
        let base = self.atom()?;
        if self.peek() == Some('^') {
            self.pos += 1;
            let exponent = self.unary()?;
            return Some(base.powf(exponent));
        }
        Some(base)
    }

    fn atom(&mut self) -> Option<f64> {
        if self.peek()? == '(' {
            self.pos += 1;
            let value = self.nested(Self::expr)?;
            if self.peek()? != ')' {
                return None;
            }
            self.pos += 1;
            return Some(value);
        }

        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '.') {
            self.pos += 1;
        }
        if start == self.pos {
            return None;
        }
        self.tokens[start..self.pos].iter().collect::<String>().parse().ok()
    }
}
