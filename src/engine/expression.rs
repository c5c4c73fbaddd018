//! Expression generation and evaluation
//!
//! An expression is always four operands joined by three operators. Evaluation
//! collapses every `*` into its left neighbour first, then folds the remaining
//! `+`/`-` left to right. That is standard precedence for this fixed shape
//! (no parentheses, no division, no unary minus) and nothing more general.

use std::fmt;

use rand::Rng;

/// Number of operands in every expression
pub const OPERAND_COUNT: usize = 4;

/// Number of operators in every expression
pub const OPERATOR_COUNT: usize = OPERAND_COUNT - 1;

/// Smallest operand value (inclusive)
pub const OPERAND_MIN: i64 = 1;

/// Largest operand value (inclusive)
pub const OPERAND_MAX: i64 = 50;

/// Binary operator placed between two operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
}

impl Operator {
    /// Every operator the generator can draw from
    pub const ALL: [Operator; 3] = [Operator::Add, Operator::Subtract, Operator::Multiply];

    /// Symbol used when rendering
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
        }
    }

    fn apply(self, lhs: i64, rhs: i64) -> i64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
            Operator::Multiply => lhs * rhs,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Immutable four-operand arithmetic expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expression {
    operands: [i64; OPERAND_COUNT],
    operators: [Operator; OPERATOR_COUNT],
}

impl Expression {
    /// Create an expression from explicit parts
    pub fn new(operands: [i64; OPERAND_COUNT], operators: [Operator; OPERATOR_COUNT]) -> Self {
        Self { operands, operators }
    }

    /// Draw a uniformly random expression
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut operands = [0; OPERAND_COUNT];
        for operand in operands.iter_mut() {
            *operand = rng.gen_range(OPERAND_MIN..=OPERAND_MAX);
        }

        let mut operators = [Operator::Add; OPERATOR_COUNT];
        for operator in operators.iter_mut() {
            *operator = Operator::ALL[rng.gen_range(0..Operator::ALL.len())];
        }

        Self { operands, operators }
    }

    pub fn operands(&self) -> &[i64; OPERAND_COUNT] {
        &self.operands
    }

    pub fn operators(&self) -> &[Operator; OPERATOR_COUNT] {
        &self.operators
    }

    /// Render as a compact string, e.g. `12+3*40-5`
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Compute the integer value
    pub fn evaluate(&self) -> i64 {
        evaluate(&self.operands, &self.operators)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.operands[0])?;
        for (operator, operand) in self.operators.iter().zip(&self.operands[1..]) {
            write!(f, "{}{}", operator, operand)?;
        }
        Ok(())
    }
}

/// Evaluate operands and operators with multiplication first
pub fn evaluate(
    operands: &[i64; OPERAND_COUNT],
    operators: &[Operator; OPERATOR_COUNT],
) -> i64 {
    // Pass 1: fold each `*` into the most recently reduced operand
    let mut reduced_operands: Vec<i64> = Vec::with_capacity(OPERAND_COUNT);
    let mut reduced_operators: Vec<Operator> = Vec::with_capacity(OPERATOR_COUNT);
    reduced_operands.push(operands[0]);

    for (&operator, &next) in operators.iter().zip(&operands[1..]) {
        if operator == Operator::Multiply {
            if let Some(last) = reduced_operands.last_mut() {
                *last = operator.apply(*last, next);
            }
            continue;
        }

        reduced_operators.push(operator);
        reduced_operands.push(next);
    }

    // Pass 2: additions and subtractions, left to right
    reduced_operators
        .iter()
        .zip(&reduced_operands[1..])
        .fold(reduced_operands[0], |acc, (&operator, &next)| {
            operator.apply(acc, next)
        })
}

/// Generate a random expression with the thread-local RNG.
///
/// Returns the rendered text together with its correct value.
pub fn generate() -> (String, i64) {
    generate_with(&mut rand::thread_rng())
}

/// Generate a random expression with a caller-supplied RNG
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> (String, i64) {
    let expression = Expression::random(rng);
    (expression.render(), expression.evaluate())
}
