//! Shunting-yard expression builder with unary minus handling

use crate::ast::Expr;
use crate::error::EngineError;
use crate::parser::tokens::{Op, Token};

/// Operator kinds held on the pending stack
///
/// `Pow` carries priority 4 while an incoming `^` compares at 5, so a
/// new exponentiation never displaces one already on the stack and the
/// operator chains to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StackOp {
    LParen,
    Plus,
    Minus,
    Times,
    Divide,
    Unary,
    Pow,
}

impl StackOp {
    fn priority(self) -> u8 {
        match self {
            StackOp::LParen => 0,
            StackOp::Plus | StackOp::Minus => 1,
            StackOp::Times | StackOp::Divide => 2,
            StackOp::Unary => 3,
            StackOp::Pow => 4,
        }
    }
}

/// Priority of an operator token being considered for the stack
fn incoming_priority(op: Op) -> u8 {
    match op {
        Op::Plus | Op::Minus => 1,
        Op::Star | Op::Slash => 2,
        Op::Caret => 5,
        Op::LParen | Op::RParen => 0,
    }
}

/// Build an expression tree from a token sequence
///
/// A modified shunting yard over two stacks, one of pending operators
/// and one of partially built expressions. The whole input is bracketed
/// by a synthetic parenthesis pair so the algorithm terminates by
/// reducing the outer pair. `expect_operand` is true whenever the next
/// token must be an operand or a leading unary `-`.
pub(crate) fn build_expression(tokens: Vec<Token>) -> Result<Expr, EngineError> {
    if tokens.is_empty() {
        return Err(EngineError::EmptyInput);
    }

    let mut input = Vec::with_capacity(tokens.len() + 2);
    input.push(Token::Op(Op::LParen));
    input.extend(tokens);
    input.push(Token::Op(Op::RParen));

    let mut operators: Vec<StackOp> = Vec::new();
    let mut expressions: Vec<Expr> = Vec::new();
    let mut expect_operand = true;
    let last = input.len() - 1;

    for (index, token) in input.iter().enumerate() {
        match token {
            Token::Op(Op::LParen) => {
                if !expect_operand {
                    return Err(EngineError::UnexpectedOperand {
                        token: "(".to_string(),
                    });
                }
                operators.push(StackOp::LParen);
            }

            Token::Op(Op::RParen) => {
                if expect_operand {
                    return Err(EngineError::EmptyParentheses);
                }

                loop {
                    match operators.pop() {
                        Some(StackOp::LParen) => break,
                        Some(op) => reduce(op, &mut expressions)?,
                        None => return Err(EngineError::UnbalancedParenthesis),
                    }
                }

                if operators.is_empty() && index != last {
                    return Err(EngineError::UnbalancedParenthesis);
                }

                expect_operand = false;
            }

            Token::Op(op) => {
                if expect_operand {
                    if *op == Op::Minus {
                        operators.push(StackOp::Unary);
                    } else {
                        return Err(EngineError::InvalidUnaryOperator { op: op.symbol() });
                    }
                } else {
                    let incoming = incoming_priority(*op);
                    while let Some(top) = operators.last().copied() {
                        if top.priority() < incoming {
                            break;
                        }
                        operators.pop();
                        reduce(top, &mut expressions)?;
                    }

                    operators.push(match op {
                        Op::Plus => StackOp::Plus,
                        Op::Minus => StackOp::Minus,
                        Op::Star => StackOp::Times,
                        Op::Slash => StackOp::Divide,
                        Op::Caret => StackOp::Pow,
                        Op::LParen | Op::RParen => unreachable!("parentheses handled above"),
                    });
                }

                expect_operand = true;
            }

            Token::Number(value) => {
                if !expect_operand {
                    return Err(EngineError::UnexpectedOperand {
                        token: value.to_string(),
                    });
                }
                expressions.push(Expr::number(*value));
                expect_operand = false;
            }

            Token::Variable(letter) => {
                if !expect_operand {
                    return Err(EngineError::UnexpectedOperand {
                        token: letter.to_string(),
                    });
                }
                expressions.push(Expr::variable(*letter));
                expect_operand = false;
            }
        }
    }

    if !operators.is_empty() || expressions.len() != 1 {
        return Err(EngineError::UnbalancedParenthesis);
    }

    expressions.pop().ok_or(EngineError::UnbalancedParenthesis)
}

/// Pop operands for one stack operator and push the built node
fn reduce(op: StackOp, expressions: &mut Vec<Expr>) -> Result<(), EngineError> {
    if op == StackOp::Unary {
        let operand = expressions
            .pop()
            .ok_or(EngineError::MissingOperand { op: "-" })?;
        expressions.push(Expr::neg(operand));
        return Ok(());
    }

    let symbol = match op {
        StackOp::Plus => "+",
        StackOp::Minus => "-",
        StackOp::Times => "*",
        StackOp::Divide => "/",
        StackOp::Pow => "^",
        StackOp::Unary | StackOp::LParen => {
            return Err(EngineError::UnbalancedParenthesis);
        }
    };

    let rhs = expressions
        .pop()
        .ok_or(EngineError::MissingOperand { op: symbol })?;
    let lhs = expressions
        .pop()
        .ok_or(EngineError::MissingOperand { op: symbol })?;

    expressions.push(match op {
        StackOp::Plus => Expr::add(lhs, rhs),
        StackOp::Minus => Expr::sub(lhs, rhs),
        StackOp::Times => Expr::mul(lhs, rhs),
        StackOp::Divide => Expr::div(lhs, rhs),
        StackOp::Pow => Expr::pow(lhs, rhs),
        StackOp::Unary | StackOp::LParen => unreachable!("handled above"),
    });

    Ok(())
}
