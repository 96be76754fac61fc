//! Line classification and parameter validation.
//!
//! Everything here is pure: classifying or validating a line never touches
//! interpreter state. The one exception to "classification is syntax only"
//! is left to the interpreter: a bare unknown word may still name a
//! defined method (`square` instead of `square()`).

use thiserror::Error;

use crate::command::{Control, ParamKind, Primitive, is_identifier, is_reserved};
use crate::error::ErrorKind;
use crate::expr;
use crate::types::{PenColor, Position};
use crate::variables::Variables;

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

/// Why a line failed to classify or validate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown command `{keyword}`")]
    UnknownCommand { keyword: String },
    #[error("`{command}` is missing parameters: expected {expected}, found {found}")]
    MissingParameters {
        command: Primitive,
        expected: usize,
        found: usize,
    },
    #[error("`{command}` takes {expected} parameters, found {found}")]
    TooManyParameters {
        command: Primitive,
        expected: usize,
        found: usize,
    },
    #[error("parameter {position} of `{command}` must be {expected}, found `{value}`")]
    WrongType {
        command: Primitive,
        position: usize,
        value: String,
        expected: ParamKind,
    },
    #[error("variable `{name}` is not defined")]
    UndefinedVariable { name: String },
    #[error("malformed `{keyword}`: {reason}")]
    Malformed { keyword: Control, reason: String },
    #[error("`{name}` is a reserved word and cannot be used as a name")]
    ReservedName { name: String },
}

impl ValidationError {
    /// The engine-level error category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownCommand { .. } => ErrorKind::UnknownCommand,
            Self::UndefinedVariable { .. } => ErrorKind::UndefinedVariable,
            Self::MissingParameters { .. }
            | Self::TooManyParameters { .. }
            | Self::WrongType { .. }
            | Self::Malformed { .. }
            | Self::ReservedName { .. } => ErrorKind::ArityOrTypeError,
        }
    }

    fn malformed(keyword: Control, reason: impl Into<String>) -> Self {
        Self::Malformed {
            keyword,
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

/// Coarse classification of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Primitive,
    Assignment,
    Conditional,
    Loop,
    MethodDef,
    MethodCall,
    Invalid,
}

/// Name and formal parameters parsed from a `method` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodHeader {
    pub name: String,
    pub params: Vec<String>,
}

/// A classified script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// A primitive with its raw (unsubstituted) arguments.
    Primitive {
        command: Primitive,
        args: Vec<String>,
    },
    /// `name = expr`.
    Assignment { name: String, expr: String },
    /// `if <condition>`; the condition text is evaluated at run time.
    If { condition: String },
    EndIf,
    /// `loop <count>`; the count expression is evaluated when the loop opens.
    Loop { count: String },
    EndLoop,
    MethodDef(MethodHeader),
    EndMethod,
    /// `name(args)`.
    MethodCall { name: String, args: Vec<String> },
    /// Could not be classified.
    Invalid(ValidationError),
}

impl Statement {
    #[must_use]
    pub const fn kind(&self) -> StatementKind {
        match self {
            Self::Primitive { .. } => StatementKind::Primitive,
            Self::Assignment { .. } => StatementKind::Assignment,
            Self::If { .. } | Self::EndIf => StatementKind::Conditional,
            Self::Loop { .. } | Self::EndLoop => StatementKind::Loop,
            Self::MethodDef(_) | Self::EndMethod => StatementKind::MethodDef,
            Self::MethodCall { .. } => StatementKind::MethodCall,
            Self::Invalid(_) => StatementKind::Invalid,
        }
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Split a line into its first word and the remaining text.
fn split_keyword(line: &str) -> (&str, &str) {
    let line = line.trim();
    line.split_once(char::is_whitespace)
        .map_or((line, ""), |(head, rest)| (head, rest.trim()))
}

/// The control keyword a line starts with, if any.
///
/// Used while buffering a block, where only block boundaries matter.
#[must_use]
pub fn control_keyword(line: &str) -> Option<Control> {
    Control::from_keyword(split_keyword(line).0)
}

/// `name = expr` with exactly one `=` and a letters-only name.
fn as_assignment(line: &str) -> Option<(&str, &str)> {
    let (lhs, rhs) = line.split_once('=')?;
    if rhs.contains('=') {
        return None;
    }
    let name = lhs.trim();
    is_identifier(name).then(|| (name, rhs.trim()))
}

/// `name(args)`, tolerating whitespace before the parenthesis.
fn as_call(line: &str) -> Option<(&str, Vec<String>)> {
    let inner = line.strip_suffix(')')?;
    let (name, args) = inner.split_once('(')?;
    let name = name.trim_end();
    if !is_identifier(name) || args.contains(['(', ')']) {
        return None;
    }
    Some((name, split_arguments(args)))
}

/// Split a call's argument text on commas and whitespace.
fn split_arguments(args: &str) -> Vec<String> {
    args.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|a| !a.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Parse the text after `method`: `name(a, b)`, `name a b` or `name`.
pub fn parse_method_header(rest: &str) -> Result<MethodHeader, ValidationError> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Err(ValidationError::malformed(
            Control::Method,
            "missing method name",
        ));
    }

    let (name, params) = if let Some((name, params)) = as_call(rest) {
        (name, params)
    } else if rest.contains(['(', ')']) {
        return Err(ValidationError::malformed(
            Control::Method,
            "unbalanced parentheses in parameter list",
        ));
    } else {
        let mut words = rest.split_whitespace();
        let name = words.next().unwrap_or_default();
        (name, words.map(str::to_owned).collect())
    };

    if !is_identifier(name) {
        return Err(ValidationError::malformed(
            Control::Method,
            format!("`{name}` is not a valid method name"),
        ));
    }
    for (i, param) in params.iter().enumerate() {
        if !is_identifier(param) {
            return Err(ValidationError::malformed(
                Control::Method,
                format!("`{param}` is not a valid parameter name"),
            ));
        }
        if params[..i].contains(param) {
            return Err(ValidationError::malformed(
                Control::Method,
                format!("parameter `{param}` is declared twice"),
            ));
        }
    }
    if let Some(reserved) = std::iter::once(name)
        .chain(params.iter().map(String::as_str))
        .find(|word| is_reserved(word))
    {
        return Err(ValidationError::ReservedName {
            name: reserved.to_owned(),
        });
    }

    Ok(MethodHeader {
        name: name.to_owned(),
        params,
    })
}

/// Classify a trimmed, non-empty line.
///
/// Order matters: the assignment pattern is tried first, so `x = ...` is
/// never mistaken for a command.
#[must_use]
pub fn classify(line: &str) -> Statement {
    let line = line.trim();

    if let Some((name, expr)) = as_assignment(line) {
        if is_reserved(name) {
            return Statement::Invalid(ValidationError::ReservedName {
                name: name.to_owned(),
            });
        }
        return Statement::Assignment {
            name: name.to_owned(),
            expr: expr.to_owned(),
        };
    }

    let (keyword, rest) = split_keyword(line);

    if let Some(control) = Control::from_keyword(keyword) {
        return classify_control(control, rest);
    }

    if let Some((name, args)) = as_call(line) {
        return Statement::MethodCall {
            name: name.to_owned(),
            args,
        };
    }

    if let Some(command) = Primitive::from_keyword(keyword) {
        return Statement::Primitive {
            command,
            args: rest.split_whitespace().map(str::to_owned).collect(),
        };
    }

    Statement::Invalid(ValidationError::UnknownCommand {
        keyword: keyword.to_owned(),
    })
}

fn classify_control(control: Control, rest: &str) -> Statement {
    let no_operands = |stmt: Statement| {
        if rest.is_empty() {
            stmt
        } else {
            Statement::Invalid(ValidationError::malformed(
                control,
                format!("unexpected `{rest}`"),
            ))
        }
    };

    match control {
        Control::If if rest.is_empty() => Statement::Invalid(ValidationError::malformed(
            control,
            "missing condition",
        )),
        Control::If => Statement::If {
            condition: rest.to_owned(),
        },
        Control::Loop if rest.is_empty() => Statement::Invalid(ValidationError::malformed(
            control,
            "missing iteration count",
        )),
        Control::Loop => Statement::Loop {
            count: rest.to_owned(),
        },
        Control::Method => match parse_method_header(rest) {
            Ok(header) => Statement::MethodDef(header),
            Err(err) => Statement::Invalid(err),
        },
        Control::EndIf => no_operands(Statement::EndIf),
        Control::EndLoop => no_operands(Statement::EndLoop),
        Control::EndMethod => no_operands(Statement::EndMethod),
    }
}

/// Whether `line` is an assignment whose right-hand side is a `+`/`-`
/// chain of two or more terms.
#[must_use]
pub fn is_arithmetic_assignment(line: &str) -> bool {
    as_assignment(line.trim()).is_some_and(|(_, expr)| expr::is_arithmetic(expr))
}

// ---------------------------------------------------------------------------
// Substitution
// ---------------------------------------------------------------------------

/// Token-by-token variable substitution over a whole line.
///
/// The leading keyword is kept as written; every later whitespace-separated
/// token that names an assigned variable becomes its decimal value. Tokens
/// are re-joined with single spaces.
#[must_use]
pub fn substitute_variables(line: &str, vars: &Variables) -> String {
    let mut tokens = line.split_whitespace();
    let Some(first) = tokens.next() else {
        return String::new();
    };
    std::iter::once(first.to_owned())
        .chain(tokens.map(|t| vars.substitute(t).into_owned()))
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A primitive with fully-resolved parameters, ready for dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    MoveTo(Position),
    DrawTo(Position),
    Clear,
    Reset,
    Rectangle { width: i32, height: i32 },
    Circle { radius: i32 },
    Triangle([Position; 3]),
    /// `None` for an unrecognized color, which is ignored.
    Pen(Option<PenColor>),
    /// `None` for an unrecognized switch, which is ignored.
    Fill(Option<bool>),
}

fn parse_integer(command: Primitive, position: usize, value: &str) -> Result<i32, ValidationError> {
    value.parse::<i32>().map_err(|_| {
        if is_identifier(value) && !is_reserved(value) {
            ValidationError::UndefinedVariable {
                name: value.to_owned(),
            }
        } else {
            ValidationError::WrongType {
                command,
                position,
                value: value.to_owned(),
                expected: ParamKind::Integer,
            }
        }
    })
}

fn check_arity(command: Primitive, found: usize) -> Result<(), ValidationError> {
    let expected = command.params().len();
    if found == expected || command.alternate_arity() == Some(found) {
        Ok(())
    } else if found < expected {
        Err(ValidationError::MissingParameters {
            command,
            expected,
            found,
        })
    } else {
        Err(ValidationError::TooManyParameters {
            command,
            expected,
            found,
        })
    }
}

/// Check arity and types of substituted arguments and resolve them.
pub fn validate_parameters(
    command: Primitive,
    args: &[String],
) -> Result<Invocation, ValidationError> {
    check_arity(command, args.len())?;

    let int = |i: usize| parse_integer(command, i + 1, &args[i]);

    let invocation = match command {
        Primitive::MoveTo => Invocation::MoveTo(Position::new(int(0)?, int(1)?)),
        Primitive::DrawTo => Invocation::DrawTo(Position::new(int(0)?, int(1)?)),
        Primitive::Clear => Invocation::Clear,
        Primitive::Reset => Invocation::Reset,
        Primitive::Rectangle => Invocation::Rectangle {
            width: int(0)?,
            height: int(1)?,
        },
        Primitive::Circle => Invocation::Circle { radius: int(0)? },
        Primitive::Triangle if args.len() == 4 => {
            let (width, height, x, y) = (int(0)?, int(1)?, int(2)?, int(3)?);
            Invocation::Triangle(derived_triangle(width, height, x, y))
        }
        Primitive::Triangle => Invocation::Triangle([
            Position::new(int(0)?, int(1)?),
            Position::new(int(2)?, int(3)?),
            Position::new(int(4)?, int(5)?),
        ]),
        Primitive::Pen => Invocation::Pen(PenColor::from_name(&args[0])),
        Primitive::Fill => Invocation::Fill(match args[0].to_ascii_lowercase().as_str() {
            "on" => Some(true),
            "off" => Some(false),
            _ => None,
        }),
    };
    Ok(invocation)
}

/// Vertices of `triangle w h x y`: a base of width `w` ending at `(x, y)`,
/// apex `h` above the base's midpoint.
#[must_use]
pub const fn derived_triangle(width: i32, height: i32, x: i32, y: i32) -> [Position; 3] {
    let left = x.saturating_sub(width);
    let top = y.saturating_sub(height);
    [
        Position::new(left, y),
        Position::new(x, y),
        Position::new(x.saturating_sub(width / 2), top),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[rstest]
    #[case("moveto 10 20", StatementKind::Primitive)]
    #[case("MoveTo 10 20", StatementKind::Primitive)]
    #[case("clear", StatementKind::Primitive)]
    #[case("x = 5", StatementKind::Assignment)]
    #[case("x = x + 5", StatementKind::Assignment)]
    #[case("x=y-1", StatementKind::Assignment)]
    #[case("if x > 5", StatementKind::Conditional)]
    #[case("if x == 5", StatementKind::Conditional)]
    #[case("endif", StatementKind::Conditional)]
    #[case("loop 3", StatementKind::Loop)]
    #[case("endloop", StatementKind::Loop)]
    #[case("method square(size)", StatementKind::MethodDef)]
    #[case("endmethod", StatementKind::MethodDef)]
    #[case("square(30)", StatementKind::MethodCall)]
    #[case("square (30, 40)", StatementKind::MethodCall)]
    #[case("invalidcommand 10 20", StatementKind::Invalid)]
    #[case("jump", StatementKind::Invalid)]
    #[case("loop", StatementKind::Invalid)]
    #[case("endif now", StatementKind::Invalid)]
    fn classification(#[case] line: &str, #[case] kind: StatementKind) {
        assert_eq!(classify(line).kind(), kind, "{line}");
    }

    #[test]
    fn assignment_takes_precedence_over_commands() {
        // `moveto` can't be a variable, but the line still isn't a primitive.
        assert!(matches!(
            classify("moveto = 5"),
            Statement::Invalid(ValidationError::ReservedName { .. })
        ));
        assert_eq!(
            classify("size = circle"),
            Statement::Assignment {
                name: "size".into(),
                expr: "circle".into(),
            }
        );
    }

    #[test]
    fn primitive_arguments_are_split() {
        assert_eq!(
            classify("triangle 20 30  40 50 60 70"),
            Statement::Primitive {
                command: Primitive::Triangle,
                args: strings(&["20", "30", "40", "50", "60", "70"]),
            }
        );
    }

    #[test]
    fn unknown_command_reports_keyword() {
        let Statement::Invalid(err) = classify("invalidcommand 10 20") else {
            panic!("expected invalid statement");
        };
        assert_eq!(err.kind(), ErrorKind::UnknownCommand);
        assert!(err.to_string().contains("invalidcommand"));
    }

    #[rstest]
    #[case("square(size)", "square", &["size"])]
    #[case("square(x, y)", "square", &["x", "y"])]
    #[case("square( x ,y )", "square", &["x", "y"])]
    #[case("square x y", "square", &["x", "y"])]
    #[case("square()", "square", &[])]
    #[case("square", "square", &[])]
    fn method_headers(#[case] rest: &str, #[case] name: &str, #[case] params: &[&str]) {
        assert_eq!(
            parse_method_header(rest),
            Ok(MethodHeader {
                name: name.into(),
                params: strings(params),
            })
        );
    }

    #[rstest]
    #[case("")]
    #[case("1abc")]
    #[case("square(x, 1)")]
    #[case("square(x, x)")]
    #[case("square(x")]
    #[case("circle(x)")]
    #[case("square(loop)")]
    fn bad_method_headers(#[case] rest: &str) {
        let err = parse_method_header(rest).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArityOrTypeError, "{rest}: {err}");
    }

    #[test]
    fn call_arguments() {
        assert_eq!(
            classify("drawbox(30,30)"),
            Statement::MethodCall {
                name: "drawbox".into(),
                args: strings(&["30", "30"]),
            }
        );
        assert_eq!(
            classify("drawbox()"),
            Statement::MethodCall {
                name: "drawbox".into(),
                args: Vec::new(),
            }
        );
    }

    #[test]
    fn control_keyword_lookup() {
        assert_eq!(control_keyword("EndMethod"), Some(Control::EndMethod));
        assert_eq!(control_keyword("loop 3"), Some(Control::Loop));
        assert_eq!(control_keyword("moveto 1 1"), None);
    }

    #[rstest]
    #[case("x = 1 + 2", true)]
    #[case("x = a - b", true)]
    #[case("x = 5", false)]
    #[case("x = y", false)]
    #[case("moveto 1 2", false)]
    #[case("if x == 1", false)]
    fn arithmetic_assignment(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_arithmetic_assignment(line), expected);
    }

    #[test]
    fn substitution_replaces_whole_tokens() {
        let mut vars = Variables::new();
        vars.set("x", 5);
        vars.set("pen", 9);
        assert_eq!(substitute_variables("moveto x 10", &vars), "moveto 5 10");
        assert_eq!(substitute_variables("moveto xx x", &vars), "moveto xx 5");
        assert_eq!(substitute_variables("pen red", &vars), "pen red");
        assert_eq!(substitute_variables("", &vars), "");
    }

    #[rstest]
    #[case("moveto", &["10", "20"], Invocation::MoveTo(Position::new(10, 20)))]
    #[case("drawto", &["-5", "7"], Invocation::DrawTo(Position::new(-5, 7)))]
    #[case("clear", &[], Invocation::Clear)]
    #[case("reset", &[], Invocation::Reset)]
    #[case("rectangle", &["50", "20"], Invocation::Rectangle { width: 50, height: 20 })]
    #[case("circle", &["30"], Invocation::Circle { radius: 30 })]
    #[case("pen", &["Green"], Invocation::Pen(Some(PenColor::Green)))]
    #[case("pen", &["purple"], Invocation::Pen(None))]
    #[case("fill", &["off"], Invocation::Fill(Some(false)))]
    #[case("fill", &["maybe"], Invocation::Fill(None))]
    fn valid_parameters(
        #[case] keyword: &str,
        #[case] args: &[&str],
        #[case] expected: Invocation,
    ) {
        let command = Primitive::from_keyword(keyword).unwrap();
        assert_eq!(validate_parameters(command, &strings(args)), Ok(expected));
    }

    #[test]
    fn triangle_forms() {
        assert_eq!(
            validate_parameters(
                Primitive::Triangle,
                &strings(&["20", "30", "40", "50", "60", "70"])
            ),
            Ok(Invocation::Triangle([
                Position::new(20, 30),
                Position::new(40, 50),
                Position::new(60, 70),
            ]))
        );
        assert_eq!(
            validate_parameters(Primitive::Triangle, &strings(&["20", "30", "40", "50"])),
            Ok(Invocation::Triangle([
                Position::new(20, 50),
                Position::new(40, 50),
                Position::new(30, 20),
            ]))
        );
    }

    #[test]
    fn missing_vs_wrong_type_vs_undefined() {
        assert!(matches!(
            validate_parameters(Primitive::MoveTo, &strings(&["10"])),
            Err(ValidationError::MissingParameters {
                expected: 2,
                found: 1,
                ..
            })
        ));
        assert!(matches!(
            validate_parameters(Primitive::Circle, &strings(&["1", "2"])),
            Err(ValidationError::TooManyParameters { .. })
        ));
        assert!(matches!(
            validate_parameters(Primitive::Rectangle, &strings(&["10", "2.5"])),
            Err(ValidationError::WrongType { position: 2, .. })
        ));
        let err = validate_parameters(Primitive::Rectangle, &strings(&["abc", "def"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UndefinedVariable);
        assert!(matches!(
            validate_parameters(Primitive::Triangle, &strings(&["1", "2", "3", "4", "5"])),
            Err(ValidationError::MissingParameters { expected: 6, .. })
        ));
    }
}
