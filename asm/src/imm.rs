use crate::{error::Error, symtab::SymbolTable};

/// An immediate operand before symbol resolution. Literals are fixed at
/// parse time; the symbolic forms wait for the completed symbol table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Imm {
    Literal(i32),
    Symbol(String),
    /// `%hi(label)`: upper 20 bits of the symbol address.
    Hi(String),
    /// `%lo(label)`: lower 12 bits of the symbol address.
    Lo(String),
}

impl Imm {
    /// Parse an immediate operand: `%hi(..)`/`%lo(..)`, `0x` hex, `0b`
    /// binary, signed decimal, or a bare symbol name.
    pub fn parse(s: &str) -> Result<Imm, Error> {
        let s = s.trim();
        if let Some(inner) = s.strip_prefix("%hi(").and_then(|r| r.strip_suffix(')')) {
            return Ok(Imm::Hi(inner.trim().to_string()));
        }
        if let Some(inner) = s.strip_prefix("%lo(").and_then(|r| r.strip_suffix(')')) {
            return Ok(Imm::Lo(inner.trim().to_string()));
        }
        if let Some(hex) = s.strip_prefix("0x") {
            return i64::from_str_radix(hex, 16)
                .map(|v| Imm::Literal(v as i32))
                .map_err(|_| Error::InvalidImmediate(s.to_string()));
        }
        if let Some(bin) = s.strip_prefix("0b") {
            return i64::from_str_radix(bin, 2)
                .map(|v| Imm::Literal(v as i32))
                .map_err(|_| Error::InvalidImmediate(s.to_string()));
        }
        if s.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+') {
            return s
                .parse::<i32>()
                .map(Imm::Literal)
                .map_err(|_| Error::InvalidImmediate(s.to_string()));
        }
        if is_ident(s) {
            return Ok(Imm::Symbol(s.to_string()));
        }
        Err(Error::InvalidImmediate(s.to_string()))
    }

    /// Resolve to an absolute value; symbols resolve to their address.
    pub fn resolve(&self, syms: &SymbolTable) -> Result<i32, Error> {
        match self {
            Imm::Literal(v) => Ok(*v),
            Imm::Symbol(name) => Ok(lookup(syms, name)? as i32),
            Imm::Hi(name) => Ok(((lookup(syms, name)? >> 12) & 0xfffff) as i32),
            Imm::Lo(name) => Ok((lookup(syms, name)? & 0xfff) as i32),
        }
    }

    /// Resolve as a branch/jump target: a symbol becomes the byte offset
    /// from `pc`, everything else is taken as-is.
    pub fn resolve_rel(&self, pc: u32, syms: &SymbolTable) -> Result<i32, Error> {
        match self {
            Imm::Symbol(name) => Ok(lookup(syms, name)?.wrapping_sub(pc) as i32),
            _ => self.resolve(syms),
        }
    }
}

fn lookup(syms: &SymbolTable, name: &str) -> Result<u32, Error> {
    syms.get(name)
        .ok_or_else(|| Error::UndefinedSymbol(name.to_string()))
}

fn is_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
