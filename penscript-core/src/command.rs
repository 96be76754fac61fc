//! Keyword tables for `PenScript`.
//!
//! Two families of reserved words exist:
//! - **Primitives** draw or change pen state (`moveto`, `circle`, ...).
//! - **Control keywords** structure the script (`if`, `loop`, `method`, ...).
//!
//! Keywords are matched case-insensitively; variable and method names are
//! case-sensitive and may not collide with any keyword.

use std::fmt;

// ---------------------------------------------------------------------------
// Parameter kinds
// ---------------------------------------------------------------------------

/// The type constraint on one primitive parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// An integer literal, or a variable holding one.
    Integer,
    /// One of `red`, `green`, `blue`, `black`.
    Color,
    /// `on` or `off`.
    Switch,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "an integer"),
            Self::Color => write!(f, "a color name"),
            Self::Switch => write!(f, "`on` or `off`"),
        }
    }
}

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

/// A primitive drawing or pen-state command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    MoveTo,
    DrawTo,
    Clear,
    Reset,
    Rectangle,
    Circle,
    Triangle,
    Pen,
    Fill,
}

use ParamKind::{Color, Integer, Switch};

/// Keyword → primitive table.
pub const PRIMITIVES: &[(&str, Primitive)] = &[
    ("moveto", Primitive::MoveTo),
    ("drawto", Primitive::DrawTo),
    ("clear", Primitive::Clear),
    ("reset", Primitive::Reset),
    ("rectangle", Primitive::Rectangle),
    ("circle", Primitive::Circle),
    ("triangle", Primitive::Triangle),
    ("pen", Primitive::Pen),
    ("fill", Primitive::Fill),
];

impl Primitive {
    /// Look up a primitive by keyword, ignoring ASCII case.
    #[must_use]
    pub fn from_keyword(word: &str) -> Option<Self> {
        PRIMITIVES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(word))
            .map(|&(_, p)| p)
    }

    /// The canonical (lower-case) keyword.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        PRIMITIVES
            .iter()
            .find(|&&(_, p)| p == self)
            .map_or("", |&(name, _)| name)
    }

    /// Parameter signature of the canonical form.
    #[must_use]
    pub const fn params(self) -> &'static [ParamKind] {
        match self {
            Self::MoveTo | Self::DrawTo | Self::Rectangle => &[Integer, Integer],
            Self::Clear | Self::Reset => &[],
            Self::Circle => &[Integer],
            Self::Triangle => &[Integer, Integer, Integer, Integer, Integer, Integer],
            Self::Pen => &[Color],
            Self::Fill => &[Switch],
        }
    }

    /// Parameter count of an alternate input form, if the primitive has one.
    ///
    /// `triangle w h x y` derives its three vertices from a base width,
    /// a height, and the base's right corner.
    #[must_use]
    pub const fn alternate_arity(self) -> Option<usize> {
        match self {
            Self::Triangle => Some(4),
            _ => None,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

// ---------------------------------------------------------------------------
// Control keywords
// ---------------------------------------------------------------------------

/// A keyword that opens or closes a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    If,
    EndIf,
    Loop,
    EndLoop,
    Method,
    EndMethod,
}

/// Keyword → control table.
pub const CONTROLS: &[(&str, Control)] = &[
    ("if", Control::If),
    ("endif", Control::EndIf),
    ("loop", Control::Loop),
    ("endloop", Control::EndLoop),
    ("method", Control::Method),
    ("endmethod", Control::EndMethod),
];

impl Control {
    /// Look up a control keyword, ignoring ASCII case.
    #[must_use]
    pub fn from_keyword(word: &str) -> Option<Self> {
        CONTROLS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(word))
            .map(|&(_, c)| c)
    }

    #[must_use]
    pub fn keyword(self) -> &'static str {
        CONTROLS
            .iter()
            .find(|&&(_, c)| c == self)
            .map_or("", |&(name, _)| name)
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

// ---------------------------------------------------------------------------
// Names
// ---------------------------------------------------------------------------

/// Whether `word` is any reserved keyword.
#[must_use]
pub fn is_reserved(word: &str) -> bool {
    Primitive::from_keyword(word).is_some() || Control::from_keyword(word).is_some()
}

/// Whether `word` is a well-formed variable, method or parameter name:
/// non-empty, letters only.
#[must_use]
pub fn is_identifier(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_alphabetic)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
