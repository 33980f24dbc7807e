//! # Three-address translation
//!
//! Semantic actions that turn programs of declarations and assignments into
//! linear three-address code:
//!
//! ```text
//! int[5][4] a;            t0 = i * 32
//! x = a[i][j];      =>    t1 = j * 8
//!                         t2 = t0 + t1
//!                         t3 = a [t2]
//!                         x = t3
//! ```
//!
//! Declarations fill a [`SymbolTable`] with one entry per name and per array
//! suffix (`a`, `a[]`, `a[][]`), each holding the byte size of that
//! sub-array. Array references are lowered to row-major byte offsets using
//! those sizes as strides.
//!
//! Rules are recognised by shape, not by table index, so any table over the
//! same productions works. A table rule with no matching shape is rejected
//! when the [`Compiler`] is built.

use crate::attr::{ArrayRef, Attribute, BaseType, Code, DeclType};
use crate::ir::{self, BinOp, Instr};
use crate::symtab::{SymTabError, SymbolEntry, SymbolTable};
use crate::{Options, TacError};
use lrsdt::SymbolPattern::{self, NonTerm, Term};
use lrsdt::{GrammarTable, LexRule, Lexer, Parser, ParserStats, Rule, Token, TokenClass, Translator};
use once_cell::sync::Lazy;
use smartstring::alias::String;

static LEXER: Lazy<Lexer> = Lazy::new(|| {
    Lexer::try_new(vec![
        LexRule::new(TokenClass::Keyword, "record|int|float"),
        LexRule::new(TokenClass::Number, "[0-9]+"),
        LexRule::new(TokenClass::Identifier, "[a-zA-Z0-9]+"),
        LexRule::new(TokenClass::Punct, r"\[|\]|=|;|\+|-|\*|/|\(|\)"),
        LexRule::new(TokenClass::Skip, r"\s+"),
    ])
    .unwrap()
});

/// Type registered for address arithmetic temporaries.
const SIZE_T: (&str, usize) = ("size_t", 64);
/// Type registered for arithmetic temporaries.
const INT_T: (&str, usize) = ("int", 8);

/// Production shapes understood by [`ThreeAddress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Production {
    Start,
    Program,
    EmptyProgram,
    AssignScalar,
    AssignArray,
    EmptyAssign,
    Binary(BinOp),
    Negate,
    Group,
    Ident,
    ArrayValue,
    Number,
    ArrayBase,
    ArrayIndex,
    Declare,
    NoDeclarations,
    Type,
    Basic(BaseType),
    Extent,
    NoExtents,
}

const CATALOGUE: &[(&str, &[SymbolPattern], Production)] = &[
    ("G'", &[NonTerm("G")], Production::Start),
    (
        "G",
        &[NonTerm("G"), NonTerm("Declarations"), NonTerm("Assign")],
        Production::Program,
    ),
    ("G", &[], Production::EmptyProgram),
    (
        "Assign",
        &[Term("id"), Term("="), NonTerm("Expr"), Term(";")],
        Production::AssignScalar,
    ),
    (
        "Assign",
        &[NonTerm("Array"), Term("="), NonTerm("Expr"), Term(";")],
        Production::AssignArray,
    ),
    ("Assign", &[], Production::EmptyAssign),
    (
        "Expr",
        &[NonTerm("Expr"), Term("*"), NonTerm("Expr")],
        Production::Binary(BinOp::Mul),
    ),
    (
        "Expr",
        &[NonTerm("Expr"), Term("/"), NonTerm("Expr")],
        Production::Binary(BinOp::Div),
    ),
    (
        "Expr",
        &[NonTerm("Expr"), Term("+"), NonTerm("Expr")],
        Production::Binary(BinOp::Add),
    ),
    (
        "Expr",
        &[NonTerm("Expr"), Term("-"), NonTerm("Expr")],
        Production::Binary(BinOp::Sub),
    ),
    ("Expr", &[Term("-"), NonTerm("Expr")], Production::Negate),
    (
        "Expr",
        &[Term("("), NonTerm("Expr"), Term(")")],
        Production::Group,
    ),
    ("Expr", &[Term("id")], Production::Ident),
    ("Expr", &[NonTerm("Array")], Production::ArrayValue),
    ("Expr", &[Term("num")], Production::Number),
    (
        "Array",
        &[Term("id"), Term("["), NonTerm("Expr"), Term("]")],
        Production::ArrayBase,
    ),
    (
        "Array",
        &[NonTerm("Array"), Term("["), NonTerm("Expr"), Term("]")],
        Production::ArrayIndex,
    ),
    (
        "Declarations",
        &[NonTerm("Type"), Term("id"), Term(";"), NonTerm("Declarations")],
        Production::Declare,
    ),
    ("Declarations", &[], Production::NoDeclarations),
    (
        "Type",
        &[NonTerm("BasicType"), NonTerm("IndexesOptional")],
        Production::Type,
    ),
    ("BasicType", &[Term("int")], Production::Basic(BaseType::Int)),
    ("BasicType", &[Term("float")], Production::Basic(BaseType::Float)),
    (
        "IndexesOptional",
        &[Term("["), Term("num"), Term("]"), NonTerm("IndexesOptional")],
        Production::Extent,
    ),
    ("IndexesOptional", &[], Production::NoExtents),
];

/// Per-analysis state: the symbol table and the temporary counter.
#[derive(Debug, Default)]
pub struct TacContext {
    pub symbols: SymbolTable,
    temps: usize,
}

impl TacContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates `t<N>` and registers it with the given type.
    fn new_temp(&mut self, (type_name, size): (&str, usize)) -> String {
        let name: String = format!("t{}", self.temps).into();
        self.temps += 1;
        self.symbols.insert(&name, SymbolEntry::new(type_name, size));
        name
    }

    /// Number of temporaries allocated so far.
    pub fn temps(&self) -> usize {
        self.temps
    }
}

/// The three-address semantic actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreeAddress {
    options: Options,
}

impl ThreeAddress {
    pub fn new(options: Options) -> Self {
        Self { options }
    }
}

fn arity<const N: usize>(children: Vec<Attribute>) -> [Attribute; N] {
    let Ok(children) = children.try_into() else {
        unreachable!("rule length is fixed by its production shape")
    };
    children
}

fn binary(dest: String, lhs: String, op: BinOp, rhs: String) -> Instr {
    Instr::Binary { dest, lhs, op, rhs }
}

/// Lowers `name[i1]..[ik]` to an indexed load.
///
/// Each index is scaled by the size of the sub-array it selects, found under
/// the name with one more `[]` suffix; the scaled offsets are summed left to
/// right and the sum indexes the base name.
fn address(ctx: &mut TacContext, array: ArrayRef) -> Result<Code, TacError> {
    let ArrayRef {
        name,
        indexes,
        mut instrs,
    } = array;
    let mut suffixed = name.clone();
    let mut offsets = Vec::with_capacity(indexes.len());
    for index in indexes {
        suffixed.push_str("[]");
        let stride = ctx.symbols.lookup(&suffixed)?.size;
        let offset = ctx.new_temp(SIZE_T);
        instrs.push(binary(offset.clone(), index, BinOp::Mul, stride.to_string().into()));
        offsets.push(offset);
    }

    let mut offsets = offsets.into_iter();
    let Some(mut sum) = offsets.next() else {
        unreachable!("array references carry at least one index")
    };
    for offset in offsets {
        let partial = ctx.new_temp(SIZE_T);
        instrs.push(binary(partial.clone(), sum, BinOp::Add, offset));
        sum = partial;
    }

    let element = ctx.symbols.lookup(&suffixed)?.clone();
    let dest = ctx.new_temp((element.type_name.as_str(), element.size));
    instrs.push(Instr::Load {
        dest: dest.clone(),
        base: name,
        offset: sum,
    });
    Ok(Code {
        place: dest,
        instrs,
    })
}

/// Registers `name` and every suffixed form of it, innermost first.
fn declare(ctx: &mut TacContext, ty: DeclType, name: &str) -> Result<(), TacError> {
    let DeclType { base, extents } = ty;
    let mut full = String::from(name);
    for _ in &extents {
        full.push_str("[]");
    }
    let mut size = base.size();
    ctx.symbols.insert(&full, SymbolEntry::new(base.name(), size));
    for &extent in extents.iter().rev() {
        size = size
            .checked_mul(extent)
            .ok_or_else(|| TacError::SizeOverflow {
                name: String::from(name),
            })?;
        full.truncate(full.len() - 2);
        ctx.symbols.insert(&full, SymbolEntry::new(base.name(), size));
    }
    Ok(())
}

impl Translator for ThreeAddress {
    type Production = Production;
    type Value = Attribute;
    type Context = TacContext;
    type Error = TacError;

    fn classify(&self, rule: &Rule) -> Option<Production> {
        CATALOGUE
            .iter()
            .find(|(lhs, rhs, _)| rule.matches(lhs, rhs))
            .map(|&(_, _, prod)| prod)
    }

    fn shift(&self, token: Token) -> Attribute {
        Attribute::Token(token)
    }

    fn reduce(
        &self,
        ctx: &mut TacContext,
        prod: Production,
        children: Vec<Attribute>,
    ) -> Result<Attribute, TacError> {
        match prod {
            Production::Start => {
                // G' -> G
                let [program] = arity::<1>(children);
                Ok(program)
            }
            Production::Program => {
                // G -> G Declarations Assign
                let [program, _, assign] = arity::<3>(children);
                let mut program = program.into_code()?;
                let assign = assign.into_code()?;
                program.instrs.extend(assign.instrs);
                program.place = assign.place;
                Ok(Attribute::Code(program))
            }
            Production::EmptyProgram | Production::EmptyAssign => {
                // G ->
                // Assign ->
                Ok(Attribute::Code(Code::default()))
            }
            Production::AssignScalar => {
                // Assign -> id = Expr ;
                let [id, _, expr, _] = arity::<4>(children);
                let dest = id.into_token()?.literal;
                let Code { place, mut instrs } = expr.into_code()?;
                instrs.push(Instr::Copy {
                    dest: dest.clone(),
                    src: place,
                });
                Ok(Attribute::Code(Code {
                    place: dest,
                    instrs,
                }))
            }
            Production::AssignArray => {
                // Assign -> Array = Expr ;
                let [array, _, expr, _] = arity::<4>(children);
                let array = array.into_array()?;
                let Code { place, mut instrs } = expr.into_code()?;
                let target = address(ctx, array)?;
                instrs.extend(target.instrs);
                instrs.push(Instr::Copy {
                    dest: target.place.clone(),
                    src: place,
                });
                Ok(Attribute::Code(Code {
                    place: target.place,
                    instrs,
                }))
            }
            Production::Binary(op) => {
                // Expr -> Expr op Expr
                let [lhs, _, rhs] = arity::<3>(children);
                let lhs = lhs.into_code()?;
                let rhs = rhs.into_code()?;
                let dest = ctx.new_temp(INT_T);
                let mut instrs = lhs.instrs;
                instrs.extend(rhs.instrs);
                instrs.push(binary(dest.clone(), lhs.place, op, rhs.place));
                Ok(Attribute::Code(Code {
                    place: dest,
                    instrs,
                }))
            }
            Production::Negate => {
                // Expr -> - Expr
                let [_, expr] = arity::<2>(children);
                let Code { place, mut instrs } = expr.into_code()?;
                let dest = ctx.new_temp(INT_T);
                instrs.push(binary(dest.clone(), "0".into(), BinOp::Sub, place));
                Ok(Attribute::Code(Code {
                    place: dest,
                    instrs,
                }))
            }
            Production::Group => {
                // Expr -> ( Expr )
                let [_, expr, _] = arity::<3>(children);
                Ok(Attribute::Code(expr.into_code()?))
            }
            Production::Ident => {
                // Expr -> id
                let [id] = arity::<1>(children);
                let name = id.into_token()?.literal;
                if self.options.checks_declarations() && !ctx.symbols.contains(&name) {
                    return Err(SymTabError::UndefinedSymbol { name }.into());
                }
                Ok(Attribute::Code(Code::leaf(name)))
            }
            Production::ArrayValue => {
                // Expr -> Array
                let [array] = arity::<1>(children);
                Ok(Attribute::Code(address(ctx, array.into_array()?)?))
            }
            Production::Number => {
                // Expr -> num
                let [num] = arity::<1>(children);
                Ok(Attribute::Code(Code::leaf(num.into_token()?.literal)))
            }
            Production::ArrayBase => {
                // Array -> id [ Expr ]
                let [id, _, expr, _] = arity::<4>(children);
                let name = id.into_token()?.literal;
                let Code { place, instrs } = expr.into_code()?;
                Ok(Attribute::Array(ArrayRef {
                    name,
                    indexes: vec![place],
                    instrs,
                }))
            }
            Production::ArrayIndex => {
                // Array -> Array [ Expr ]
                let [array, _, expr, _] = arity::<4>(children);
                let mut array = array.into_array()?;
                let Code { place, instrs } = expr.into_code()?;
                array.indexes.push(place);
                array.instrs.extend(instrs);
                Ok(Attribute::Array(array))
            }
            Production::Declare => {
                // Declarations -> Type id ; Declarations
                let [ty, id, _, _] = arity::<4>(children);
                let ty = ty.into_type()?;
                let name = id.into_token()?.literal;
                declare(ctx, ty, &name)?;
                Ok(Attribute::Empty)
            }
            Production::NoDeclarations => {
                // Declarations ->
                Ok(Attribute::Empty)
            }
            Production::Type => {
                // Type -> BasicType IndexesOptional
                let [base, extents] = arity::<2>(children);
                Ok(Attribute::Type(DeclType {
                    base: base.into_base_type()?,
                    extents: extents.into_extents()?,
                }))
            }
            Production::Basic(base) => {
                // BasicType -> int | float
                Ok(Attribute::BaseType(base))
            }
            Production::Extent => {
                // IndexesOptional -> [ num ] IndexesOptional
                let [_, num, _, rest] = arity::<4>(children);
                let text = num.into_token()?.literal;
                let extent: usize = text
                    .parse()
                    .map_err(|_| TacError::InvalidExtent { text: text.clone() })?;
                let mut extents = vec![extent];
                extents.extend(rest.into_extents()?);
                Ok(Attribute::Extents(extents))
            }
            Production::NoExtents => {
                // IndexesOptional ->
                Ok(Attribute::Extents(Vec::new()))
            }
        }
    }
}

/// Output of one translation.
#[derive(Debug, Clone)]
pub struct Translation {
    /// Rendered instructions, one per line.
    pub code: std::string::String,
    pub instrs: Vec<Instr>,
    /// Declarations and temporaries registered during the translation.
    pub symbols: SymbolTable,
    pub stats: ParserStats,
}

/// A loaded grammar table bound to the three-address actions.
///
/// Reusable across inputs; every call to [`Compiler::translate`] starts with
/// an empty symbol table and the temporary counter at zero.
///
/// ```rust
/// # use lrsdt_translate::{ARRAYS_GRAMMAR, Compiler, Options};
/// let compiler = Compiler::new(ARRAYS_GRAMMAR, Options::default()).unwrap();
/// let out = compiler.translate("int a; a = 1 + 1 * 2;").unwrap();
/// assert_eq!(out.code, "t0 = 1 * 2\nt1 = 1 + t0\na = t1\n");
/// assert_eq!(out.symbols.get("a").unwrap().size, 8);
/// ```
pub struct Compiler {
    parser: Parser<ThreeAddress>,
}

impl Compiler {
    pub fn new(grammar_src: &str, options: Options) -> Result<Self, TacError> {
        Self::from_table(GrammarTable::from_csv(grammar_src)?, options)
    }

    pub fn from_table(table: GrammarTable, options: Options) -> Result<Self, TacError> {
        let parser = Parser::try_new(table, ThreeAddress::new(options))?;
        Ok(Self { parser })
    }

    pub fn translate(&self, input: &str) -> Result<Translation, TacError> {
        let tokens = LEXER.tokenize(input)?;
        let mut ctx = TacContext::new();
        let (program, stats) = self.parser.parse_with_stats(tokens, &mut ctx)?;
        let instrs = program.into_code()?.instrs;
        log::debug!(
            "emitted {} instructions, {} temporaries, {} symbols",
            instrs.len(),
            ctx.temps(),
            ctx.symbols.len()
        );
        Ok(Translation {
            code: ir::render(&instrs),
            instrs,
            symbols: ctx.symbols,
            stats,
        })
    }
}
