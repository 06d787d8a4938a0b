//! Line classification
//!
//! Every 3AC line is classified exactly once into a [`TacLine`]. The rules
//! are tried in a fixed order and the first match wins:
//!
//! 1. declarations (`dataArray`, `dataChar`, `dataInt`, `dataFloat`)
//! 2. control flow (`if`, `goto`, `return`)
//! 3. function related (`param`, `call`)
//! 4. instructions whose first token is a temporary (`t0 = ...`)
//! 5. bare temporary assignments (`x = t3`)
//! 6. anything else is passed through unchanged
//!
//! Classification never fails. Lines that look like a known form but do
//! not have the expected shape fall through to the later rules.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Temporary names: `t` followed by digits
static TEMP_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^t\d+$").expect("valid regex"));

/// Array declarator: `name[count]`
static ARRAY_DECL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z_]\w*)\[(\d+)\]$").expect("valid regex"));

/// Whether `token` names a 3AC temporary
pub fn is_temp_name(token: &str) -> bool {
    TEMP_NAME.is_match(token)
}

/// A classified 3AC line
#[derive(Debug, Clone, PartialEq)]
pub enum TacLine {
    /// `name:`, kept verbatim
    Label(String),
    Declaration(Declaration),
    ControlFlow(ControlFlow),
    Call(CallInst),
    /// `dest = lhs op rhs`
    BinaryOp {
        dest: String,
        lhs: String,
        op: BinaryOperator,
        rhs: String,
    },
    /// `dest = value` where dest is a temporary
    SimpleAssign { dest: String, value: AssignValue },
    /// `dest = tN` where dest is not a temporary
    StoreTemp { dest: String, temp: String },
    /// Unrecognized instruction, emitted unchanged
    Generic(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Array { name: String, count: u32 },
    Char { name: String },
    Int { name: String },
    Float { name: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControlFlow {
    /// `if <cond> goto <target>`
    IfGoto { cond: String, target: String },
    Goto { target: String },
    Return,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CallInst {
    Param { value: String },
    Call { callee: String, arg_count: Option<u32> },
}

/// Right-hand side of a simple assignment, in matching priority order
#[derive(Debug, Clone, PartialEq)]
pub enum AssignValue {
    /// `++var`
    Increment(String),
    /// Integer literal or quoted character literal
    IntOrChar(String),
    Float(String),
    /// Another temporary
    Temp(String),
    Variable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Gt,
    Lt,
    Eq,
    Ne,
    /// Encoded as `^` in 3AC
    And,
    /// Encoded as `#` in 3AC
    Or,
    Mul,
    Div,
}

impl BinaryOperator {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "+" => Some(BinaryOperator::Add),
            "-" => Some(BinaryOperator::Sub),
            ">" => Some(BinaryOperator::Gt),
            "<" => Some(BinaryOperator::Lt),
            "==" => Some(BinaryOperator::Eq),
            "!=" => Some(BinaryOperator::Ne),
            "^" => Some(BinaryOperator::And),
            "#" => Some(BinaryOperator::Or),
            "*" => Some(BinaryOperator::Mul),
            "/" => Some(BinaryOperator::Div),
            _ => None,
        }
    }

    /// The operator as written in 3AC
    pub fn token(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Gt => ">",
            BinaryOperator::Lt => "<",
            BinaryOperator::Eq => "==",
            BinaryOperator::Ne => "!=",
            BinaryOperator::And => "^",
            BinaryOperator::Or => "#",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Classify one raw line. Blank lines and `#` comments yield `None`.
pub fn classify_line(raw: &str) -> Option<TacLine> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    if line.ends_with(':') {
        return Some(TacLine::Label(line.to_string()));
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();

    let classified = classify_declaration(&tokens)
        .or_else(|| classify_control_flow(&tokens))
        .or_else(|| classify_call(&tokens))
        .or_else(|| classify_temp_instruction(&tokens))
        .or_else(|| classify_store_temp(&tokens))
        .unwrap_or_else(|| TacLine::Generic(line.to_string()));

    Some(classified)
}

fn is_assign(token: &str) -> bool {
    token == "=" || token == ":="
}

fn classify_declaration(tokens: &[&str]) -> Option<TacLine> {
    if tokens.len() != 2 {
        return None;
    }

    let name = tokens[1].to_string();
    let decl = match tokens[0] {
        "dataArray" => {
            let caps = ARRAY_DECL.captures(tokens[1])?;
            let count = caps[2].parse().ok()?;
            Declaration::Array { name: caps[1].to_string(), count }
        }
        "dataChar" => Declaration::Char { name },
        "dataInt" => Declaration::Int { name },
        "dataFloat" => Declaration::Float { name },
        _ => return None,
    };

    Some(TacLine::Declaration(decl))
}

fn classify_control_flow(tokens: &[&str]) -> Option<TacLine> {
    let flow = match tokens[0] {
        // The usual shape is `if tN goto L`; longer conditions keep the
        // label as the token after the trailing `goto`
        "if" if tokens.len() >= 4 && tokens[tokens.len() - 2] == "goto" => ControlFlow::IfGoto {
            cond: tokens[1..tokens.len() - 2].join(" "),
            target: tokens[tokens.len() - 1].to_string(),
        },
        "goto" if tokens.len() == 2 => ControlFlow::Goto { target: tokens[1].to_string() },
        "return" => ControlFlow::Return,
        _ => return None,
    };

    Some(TacLine::ControlFlow(flow))
}

fn classify_call(tokens: &[&str]) -> Option<TacLine> {
    let call = match tokens[0] {
        "param" if tokens.len() == 2 => CallInst::Param { value: tokens[1].to_string() },
        "call" if tokens.len() >= 2 => {
            let rest = tokens[1..].join(" ");
            let (callee, count) = match rest.split_once(',') {
                Some((callee, count)) => (callee.trim(), count.trim().parse().ok()),
                None => (rest.trim(), None),
            };
            CallInst::Call { callee: callee.to_string(), arg_count: count }
        }
        _ => return None,
    };

    Some(TacLine::Call(call))
}

fn classify_temp_instruction(tokens: &[&str]) -> Option<TacLine> {
    if !is_temp_name(tokens[0]) || tokens.len() < 2 || !is_assign(tokens[1]) {
        return None;
    }

    match tokens.len() {
        3 => Some(TacLine::SimpleAssign {
            dest: tokens[0].to_string(),
            value: classify_value(tokens[2]),
        }),
        5 => {
            let op = BinaryOperator::from_token(tokens[3])?;
            Some(TacLine::BinaryOp {
                dest: tokens[0].to_string(),
                lhs: tokens[2].to_string(),
                op,
                rhs: tokens[4].to_string(),
            })
        }
        _ => None,
    }
}

fn classify_store_temp(tokens: &[&str]) -> Option<TacLine> {
    if tokens.len() == 3 && is_assign(tokens[1]) && is_temp_name(tokens[2]) {
        Some(TacLine::StoreTemp {
            dest: tokens[0].to_string(),
            temp: tokens[2].to_string(),
        })
    } else {
        None
    }
}

fn classify_value(token: &str) -> AssignValue {
    if let Some(var) = token.strip_prefix("++") {
        return AssignValue::Increment(var.to_string());
    }
    if token.starts_with('\'') || token.parse::<i32>().is_ok() {
        return AssignValue::IntOrChar(token.to_string());
    }
    if is_float_literal(token) {
        return AssignValue::Float(token.to_string());
    }
    if is_temp_name(token) {
        return AssignValue::Temp(token.to_string());
    }
    AssignValue::Variable(token.to_string())
}

/// `inf` and `NaN` parse as floats but are identifiers in 3AC
fn is_float_literal(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit()) && token.parse::<f32>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn classify(line: &str) -> TacLine {
        classify_line(line).expect("line should classify")
    }

    #[test]
    fn test_blank_and_comment_lines_are_dropped() {
        assert_eq!(classify_line(""), None);
        assert_eq!(classify_line("   \t "), None);
        assert_eq!(classify_line("# a comment"), None);
        assert_eq!(classify_line("   #indented comment"), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(classify("  L1:  "), TacLine::Label("L1:".to_string()));
        assert_eq!(classify("main:"), TacLine::Label("main:".to_string()));
    }

    #[test]
    fn test_declarations() {
        assert_eq!(
            classify("dataArray arr[10]"),
            TacLine::Declaration(Declaration::Array { name: "arr".to_string(), count: 10 })
        );
        assert_eq!(
            classify("dataChar c"),
            TacLine::Declaration(Declaration::Char { name: "c".to_string() })
        );
        assert_eq!(
            classify("dataInt x"),
            TacLine::Declaration(Declaration::Int { name: "x".to_string() })
        );
        assert_eq!(
            classify("dataFloat f"),
            TacLine::Declaration(Declaration::Float { name: "f".to_string() })
        );
    }

    #[test]
    fn test_malformed_array_passes_through() {
        assert_eq!(classify("dataArray arr[n]"), TacLine::Generic("dataArray arr[n]".to_string()));
        assert_eq!(classify("dataArray arr"), TacLine::Generic("dataArray arr".to_string()));
    }

    #[test]
    fn test_control_flow() {
        assert_eq!(
            classify("if t3 goto L2"),
            TacLine::ControlFlow(ControlFlow::IfGoto { cond: "t3".to_string(), target: "L2".to_string() })
        );
        assert_eq!(
            classify("if t0 > t1 goto L9"),
            TacLine::ControlFlow(ControlFlow::IfGoto { cond: "t0 > t1".to_string(), target: "L9".to_string() })
        );
        assert_eq!(
            classify("goto L0"),
            TacLine::ControlFlow(ControlFlow::Goto { target: "L0".to_string() })
        );
        assert_eq!(classify("return"), TacLine::ControlFlow(ControlFlow::Return));
        assert_eq!(classify("return t4"), TacLine::ControlFlow(ControlFlow::Return));
    }

    #[test]
    fn test_calls() {
        assert_eq!(classify("param t1"), TacLine::Call(CallInst::Param { value: "t1".to_string() }));
        assert_eq!(
            classify("call print, 1"),
            TacLine::Call(CallInst::Call { callee: "print".to_string(), arg_count: Some(1) })
        );
        assert_eq!(
            classify("call print,1"),
            TacLine::Call(CallInst::Call { callee: "print".to_string(), arg_count: Some(1) })
        );
        assert_eq!(
            classify("call foo"),
            TacLine::Call(CallInst::Call { callee: "foo".to_string(), arg_count: None })
        );
    }

    #[test]
    fn test_simple_assign_priority() {
        let value = |line: &str| match classify(line) {
            TacLine::SimpleAssign { value, .. } => value,
            other => panic!("expected simple assignment, got {other:?}"),
        };

        assert_eq!(value("t0 = ++i"), AssignValue::Increment("i".to_string()));
        assert_eq!(value("t0 = 5"), AssignValue::IntOrChar("5".to_string()));
        assert_eq!(value("t0 = -12"), AssignValue::IntOrChar("-12".to_string()));
        assert_eq!(value("t0 = 'a'"), AssignValue::IntOrChar("'a'".to_string()));
        assert_eq!(value("t0 = 2.5"), AssignValue::Float("2.5".to_string()));
        assert_eq!(value("t0 = t7"), AssignValue::Temp("t7".to_string()));
        assert_eq!(value("t0 = x"), AssignValue::Variable("x".to_string()));
        assert_eq!(value("t0 = inf"), AssignValue::Variable("inf".to_string()));
        assert_eq!(value("t0 := y"), AssignValue::Variable("y".to_string()));
    }

    #[test]
    fn test_binary_operations() {
        for (token, op) in [
            ("+", BinaryOperator::Add),
            ("-", BinaryOperator::Sub),
            (">", BinaryOperator::Gt),
            ("<", BinaryOperator::Lt),
            ("==", BinaryOperator::Eq),
            ("!=", BinaryOperator::Ne),
            ("^", BinaryOperator::And),
            ("#", BinaryOperator::Or),
            ("*", BinaryOperator::Mul),
            ("/", BinaryOperator::Div),
        ] {
            assert_eq!(
                classify(&format!("t2 = t0 {token} t1")),
                TacLine::BinaryOp {
                    dest: "t2".to_string(),
                    lhs: "t0".to_string(),
                    op,
                    rhs: "t1".to_string(),
                }
            );
            assert_eq!(op.token(), token);
        }
    }

    #[test]
    fn test_unknown_operator_passes_through() {
        assert_eq!(classify("t2 = t0 % t1"), TacLine::Generic("t2 = t0 % t1".to_string()));
    }

    #[test]
    fn test_store_temp() {
        assert_eq!(
            classify("x = t3"),
            TacLine::StoreTemp { dest: "x".to_string(), temp: "t3".to_string() }
        );
        // Only the three-token form counts
        assert_eq!(classify("x = t3 + t4"), TacLine::Generic("x = t3 + t4".to_string()));
    }

    #[test]
    fn test_temp_prefixed_identifiers_are_not_temporaries() {
        assert!(is_temp_name("t0"));
        assert!(is_temp_name("t12"));
        assert!(!is_temp_name("total"));
        assert!(!is_temp_name("t"));

        assert_eq!(
            classify("total = t2"),
            TacLine::StoreTemp { dest: "total".to_string(), temp: "t2".to_string() }
        );
    }

    #[test]
    fn test_fallback() {
        assert_eq!(classify("x = 5"), TacLine::Generic("x = 5".to_string()));
        assert_eq!(classify("nop"), TacLine::Generic("nop".to_string()));
        assert_eq!(classify("  t0 = t1 t2  "), TacLine::Generic("t0 = t1 t2".to_string()));
    }
}
