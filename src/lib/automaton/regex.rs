use super::{dfa::DFA, error::InvalidExpression};

/// Evaluates a regular expression in postfix (Reverse Polish) notation into
/// a minimal DFA.
///
/// Letters and digits push a single-symbol machine. `.` pops two machines
/// and concatenates them, `+` pops two and takes their union, `*` pops one
/// and takes its Kleene star. The second operand of a binary operator is
/// popped first, since it was pushed last. Whitespace is skipped.
///
/// Evaluation is strict about the stack: an operator with too few operands,
/// a foreign character, an empty expression, or more than one machine left
/// at the end all abort with an [InvalidExpression].
pub fn build_from_postfix(expr: &str) -> Result<DFA<(), char>, InvalidExpression> {
    let mut stack: Vec<DFA<(), char>> = Vec::new();

    for (position, token) in expr.chars().enumerate() {
        match token {
            token if token.is_whitespace() => continue,
            token if token.is_ascii_alphanumeric() => {
                stack.push(DFA::<(), char>::literal(vec![token], &[token]));
            }
            '.' => {
                let (a, b) = pop_two(&mut stack, '.', position)?;
                stack.push(a.concat(&b));
            }
            '+' => {
                let (a, b) = pop_two(&mut stack, '+', position)?;
                stack.push(a.union(&b));
            }
            '*' => {
                let a = pop_one(&mut stack, '*', position)?;
                stack.push(a.star());
            }
            token => return Err(InvalidExpression::UnexpectedToken { token, position }),
        }
    }

    match stack.len() {
        0 => Err(InvalidExpression::Empty),
        1 => Ok(stack.pop().unwrap()),
        count => Err(InvalidExpression::LeftoverOperands { count }),
    }
}

fn pop_one(
    stack: &mut Vec<DFA<(), char>>,
    operator: char,
    position: usize,
) -> Result<DFA<(), char>, InvalidExpression> {
    stack.pop().ok_or(InvalidExpression::MissingOperands {
        operator,
        position,
        required: 1,
        available: 0,
    })
}

fn pop_two(
    stack: &mut Vec<DFA<(), char>>,
    operator: char,
    position: usize,
) -> Result<(DFA<(), char>, DFA<(), char>), InvalidExpression> {
    if stack.len() < 2 {
        return Err(InvalidExpression::MissingOperands {
            operator,
            position,
            required: 2,
            available: stack.len(),
        });
    }

    let b = stack.pop().unwrap();
    let a = stack.pop().unwrap();
    Ok((a, b))
}
