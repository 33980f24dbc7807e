//! Synthesized attributes of the three-address translator.
//!
//! Each stack entry carries exactly one [`Attribute`] variant, determined by
//! the grammar symbol it annotates.

use crate::TacError;
use crate::ir::Instr;
use lrsdt::Token;
use smartstring::alias::String;

/// Result name plus the instructions that compute it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Code {
    pub place: String,
    pub instrs: Vec<Instr>,
}

impl Code {
    /// A value available without any instructions: a variable or a numeral.
    pub fn leaf(place: impl Into<String>) -> Self {
        Self {
            place: place.into(),
            instrs: Vec::new(),
        }
    }
}

/// A partially built array reference `name[i1][i2]...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayRef {
    pub name: String,
    /// Index result names, outermost first.
    pub indexes: Vec<String>,
    /// Instructions evaluating the indexes.
    pub instrs: Vec<Instr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseType {
    Int,
    Float,
}

impl BaseType {
    pub fn name(self) -> &'static str {
        match self {
            BaseType::Int => "int",
            BaseType::Float => "float",
        }
    }

    /// Element size in bytes.
    pub fn size(self) -> usize {
        match self {
            BaseType::Int => 8,
            BaseType::Float => 4,
        }
    }
}

/// A declared type: base type plus array extents in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclType {
    pub base: BaseType,
    pub extents: Vec<usize>,
}

#[derive(Debug, Clone, Default)]
pub enum Attribute {
    #[default]
    Empty,
    Token(Token),
    Code(Code),
    Array(ArrayRef),
    BaseType(BaseType),
    Extents(Vec<usize>),
    Type(DeclType),
}

impl Attribute {
    pub fn kind(&self) -> &'static str {
        match self {
            Attribute::Empty => "empty",
            Attribute::Token(_) => "token",
            Attribute::Code(_) => "code",
            Attribute::Array(_) => "array",
            Attribute::BaseType(_) => "base type",
            Attribute::Extents(_) => "extents",
            Attribute::Type(_) => "type",
        }
    }

    fn mismatch(&self, expected: &'static str) -> TacError {
        TacError::AttributeMismatch {
            expected,
            found: self.kind(),
        }
    }

    pub fn into_token(self) -> Result<Token, TacError> {
        match self {
            Attribute::Token(token) => Ok(token),
            other => Err(other.mismatch("token")),
        }
    }

    pub fn into_code(self) -> Result<Code, TacError> {
        match self {
            Attribute::Code(code) => Ok(code),
            other => Err(other.mismatch("code")),
        }
    }

    pub fn into_array(self) -> Result<ArrayRef, TacError> {
        match self {
            Attribute::Array(array) => Ok(array),
            other => Err(other.mismatch("array")),
        }
    }

    pub fn into_base_type(self) -> Result<BaseType, TacError> {
        match self {
            Attribute::BaseType(base) => Ok(base),
            other => Err(other.mismatch("base type")),
        }
    }

    pub fn into_extents(self) -> Result<Vec<usize>, TacError> {
        match self {
            Attribute::Extents(extents) => Ok(extents),
            other => Err(other.mismatch("extents")),
        }
    }

    pub fn into_type(self) -> Result<DeclType, TacError> {
        match self {
            Attribute::Type(ty) => Ok(ty),
            other => Err(other.mismatch("type")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_type_sizes() {
        assert_eq!(BaseType::Int.name(), "int");
        assert_eq!(BaseType::Int.size(), 8);
        assert_eq!(BaseType::Float.name(), "float");
        assert_eq!(BaseType::Float.size(), 4);
    }

    #[test]
    fn accessors_return_payload() {
        let code = Attribute::Code(Code::leaf("x")).into_code().unwrap();
        assert_eq!(code.place, "x");
        assert!(code.instrs.is_empty());
        let token = Attribute::Token(Token::new("id", "a")).into_token().unwrap();
        assert_eq!(token.literal, "a");
        assert_eq!(Attribute::Extents(vec![5, 4]).into_extents().unwrap(), [5, 4]);
    }

    #[test]
    fn accessors_report_mismatch() {
        let err = Attribute::Empty.into_code().unwrap_err();
        assert_eq!(
            err,
            TacError::AttributeMismatch {
                expected: "code",
                found: "empty"
            }
        );
        let err = Attribute::BaseType(BaseType::Int).into_array().unwrap_err();
        assert_eq!(err.to_string(), "attribute mismatch: expected array, found base type");
    }
}
