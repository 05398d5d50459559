use arch::{inst::Inst, reg::Reg};

use crate::{error::Error, imm::Imm, pseudo, symtab::Section};

// ----------------------------------------------------------------------------
// Statement

/// One classified source line. Inline `#` comments and surrounding
/// whitespace are stripped first; a line with nothing left classifies as
/// `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Section(Section),
    Label(String),
    /// `name: .word value`
    Word(String, i32),
    Code(Code),
}

impl Stmt {
    pub fn parse(raw: &str) -> Result<Option<Stmt>, Error> {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            return Ok(None);
        }

        match line {
            ".text" => return Ok(Some(Stmt::Section(Section::Text))),
            ".data" => return Ok(Some(Stmt::Section(Section::Data))),
            _ => {}
        }

        if let Some((name, rest)) = line.split_once(':') {
            let rest = rest.trim();
            // main:
            if rest.is_empty() {
                return Ok(Some(Stmt::Label(name.trim().to_string())));
            }
            // count: .word 10
            if let Some(value) = rest.strip_prefix(".word") {
                let value = value.trim();
                if value.is_empty() {
                    return Err(Error::MalformedOperand(line.to_string()));
                }
                let value = value
                    .parse::<i32>()
                    .map_err(|_| Error::InvalidImmediate(value.to_string()))?;
                return Ok(Some(Stmt::Word(name.trim().to_string(), value)));
            }
            // Anything else falls through to instruction parsing, which
            // reports the bogus mnemonic.
        }

        Ok(Some(Stmt::Code(Code::parse(line)?)))
    }
}

// ----------------------------------------------------------------------------
// Instruction (unresolved)

/// An instruction with registers resolved but immediates still symbolic.
/// Loads and stores carry `(offset, base)` from the `imm(base)` operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Code {
    ADD(Reg, Reg, Reg),
    SUB(Reg, Reg, Reg),
    SLL(Reg, Reg, Reg),
    SLT(Reg, Reg, Reg),
    SLTU(Reg, Reg, Reg),
    XOR(Reg, Reg, Reg),
    SRL(Reg, Reg, Reg),
    SRA(Reg, Reg, Reg),
    OR(Reg, Reg, Reg),
    AND(Reg, Reg, Reg),
    ADDI(Reg, Reg, Imm),
    SLTI(Reg, Reg, Imm),
    SLTIU(Reg, Reg, Imm),
    XORI(Reg, Reg, Imm),
    ORI(Reg, Reg, Imm),
    ANDI(Reg, Reg, Imm),
    SLLI(Reg, Reg, Imm),
    SRLI(Reg, Reg, Imm),
    SRAI(Reg, Reg, Imm),
    LB(Reg, Imm, Reg),
    LH(Reg, Imm, Reg),
    LW(Reg, Imm, Reg),
    LBU(Reg, Imm, Reg),
    LHU(Reg, Imm, Reg),
    JALR(Reg, Reg, Imm),
    SB(Reg, Imm, Reg),
    SH(Reg, Imm, Reg),
    SW(Reg, Imm, Reg),
    BEQ(Reg, Reg, Imm),
    BNE(Reg, Reg, Imm),
    BLT(Reg, Reg, Imm),
    BGE(Reg, Reg, Imm),
    BLTU(Reg, Reg, Imm),
    BGEU(Reg, Reg, Imm),
    LUI(Reg, Imm),
    AUIPC(Reg, Imm),
    JAL(Reg, Imm),
    ECALL(),
}

pub(crate) fn reg_arg(args: &[&str], i: usize, line: &str) -> Result<Reg, Error> {
    let arg = args
        .get(i)
        .ok_or_else(|| Error::MalformedOperand(line.to_string()))?;
    Reg::parse(arg).map_err(|_| Error::InvalidRegister(arg.to_string()))
}

pub(crate) fn imm_arg(args: &[&str], i: usize, line: &str) -> Result<Imm, Error> {
    let arg = args
        .get(i)
        .ok_or_else(|| Error::MalformedOperand(line.to_string()))?;
    Imm::parse(arg)
}

/// Split a memory operand `imm(base)` into its offset and base register.
fn mem_arg(args: &[&str], i: usize, line: &str) -> Result<(Imm, Reg), Error> {
    let arg = args
        .get(i)
        .ok_or_else(|| Error::MalformedOperand(line.to_string()))?;
    let inner = arg
        .strip_suffix(')')
        .and_then(|s| s.rsplit_once('('))
        .ok_or_else(|| Error::MalformedOperand(arg.to_string()))?;
    let (off, base) = inner;
    let base = Reg::parse(base.trim()).map_err(|_| Error::InvalidRegister(base.to_string()))?;
    Ok((Imm::parse(off)?, base))
}

impl Code {
    /// Parse `mnemonic op1, op2, ...`. Pseudo-mnemonics expand here, so the
    /// result is always a canonical instruction.
    pub fn parse(line: &str) -> Result<Code, Error> {
        let mut parts = line.splitn(2, char::is_whitespace);
        let op = parts.next().unwrap_or("").to_ascii_lowercase();
        let rest = parts.next().unwrap_or("").trim();
        let args: Vec<&str> = if rest.is_empty() {
            vec![]
        } else {
            rest.split(',').map(str::trim).collect()
        };

        macro_rules! reg {
            ($i:expr) => {
                reg_arg(&args, $i, line)?
            };
        }
        macro_rules! imm {
            ($i:expr) => {
                imm_arg(&args, $i, line)?
            };
        }

        match op.as_str() {
            "add" => Ok(Code::ADD(reg!(0), reg!(1), reg!(2))),
            "sub" => Ok(Code::SUB(reg!(0), reg!(1), reg!(2))),
            "sll" => Ok(Code::SLL(reg!(0), reg!(1), reg!(2))),
            "slt" => Ok(Code::SLT(reg!(0), reg!(1), reg!(2))),
            "sltu" => Ok(Code::SLTU(reg!(0), reg!(1), reg!(2))),
            "xor" => Ok(Code::XOR(reg!(0), reg!(1), reg!(2))),
            "srl" => Ok(Code::SRL(reg!(0), reg!(1), reg!(2))),
            "sra" => Ok(Code::SRA(reg!(0), reg!(1), reg!(2))),
            "or" => Ok(Code::OR(reg!(0), reg!(1), reg!(2))),
            "and" => Ok(Code::AND(reg!(0), reg!(1), reg!(2))),

            "addi" => Ok(Code::ADDI(reg!(0), reg!(1), imm!(2))),
            "slti" => Ok(Code::SLTI(reg!(0), reg!(1), imm!(2))),
            "sltiu" => Ok(Code::SLTIU(reg!(0), reg!(1), imm!(2))),
            "xori" => Ok(Code::XORI(reg!(0), reg!(1), imm!(2))),
            "ori" => Ok(Code::ORI(reg!(0), reg!(1), imm!(2))),
            "andi" => Ok(Code::ANDI(reg!(0), reg!(1), imm!(2))),
            "slli" => Ok(Code::SLLI(reg!(0), reg!(1), imm!(2))),
            "srli" => Ok(Code::SRLI(reg!(0), reg!(1), imm!(2))),
            "srai" => Ok(Code::SRAI(reg!(0), reg!(1), imm!(2))),

            "lb" | "lh" | "lw" | "lbu" | "lhu" => {
                let rd = reg!(0);
                let (off, base) = mem_arg(&args, 1, line)?;
                Ok(match op.as_str() {
                    "lb" => Code::LB(rd, off, base),
                    "lh" => Code::LH(rd, off, base),
                    "lw" => Code::LW(rd, off, base),
                    "lbu" => Code::LBU(rd, off, base),
                    _ => Code::LHU(rd, off, base),
                })
            }
            // jalr takes either `rd, imm(rs1)` or `rd, rs1, imm`.
            "jalr" => {
                let rd = reg!(0);
                if args.len() == 2 {
                    let (off, base) = mem_arg(&args, 1, line)?;
                    Ok(Code::JALR(rd, base, off))
                } else {
                    Ok(Code::JALR(rd, reg!(1), imm!(2)))
                }
            }
            "sb" | "sh" | "sw" => {
                let rs2 = reg!(0);
                let (off, base) = mem_arg(&args, 1, line)?;
                Ok(match op.as_str() {
                    "sb" => Code::SB(rs2, off, base),
                    "sh" => Code::SH(rs2, off, base),
                    _ => Code::SW(rs2, off, base),
                })
            }

            "beq" => Ok(Code::BEQ(reg!(0), reg!(1), imm!(2))),
            "bne" => Ok(Code::BNE(reg!(0), reg!(1), imm!(2))),
            "blt" => Ok(Code::BLT(reg!(0), reg!(1), imm!(2))),
            "bge" => Ok(Code::BGE(reg!(0), reg!(1), imm!(2))),
            "bltu" => Ok(Code::BLTU(reg!(0), reg!(1), imm!(2))),
            "bgeu" => Ok(Code::BGEU(reg!(0), reg!(1), imm!(2))),

            "lui" => Ok(Code::LUI(reg!(0), imm!(1))),
            "auipc" => Ok(Code::AUIPC(reg!(0), imm!(1))),
            "jal" => Ok(Code::JAL(reg!(0), imm!(1))),
            "ecall" => Ok(Code::ECALL()),

            _ => pseudo::expand(&op, &args, line),
        }
    }

    /// Resolve symbolic immediates against the completed symbol table and
    /// produce the encodable instruction. `pc` is the address this
    /// instruction will occupy; branch and jump targets become offsets
    /// relative to it.
    pub fn resolve(&self, pc: u32, syms: &crate::symtab::SymbolTable) -> Result<Inst, Error> {
        let branch = |target: &Imm| -> Result<i32, Error> {
            let off = target.resolve_rel(pc, syms)?;
            if off % 2 != 0 {
                return Err(Error::OddBranchOffset(off));
            }
            Ok(off)
        };

        match self {
            Code::ADD(rd, rs1, rs2) => Ok(Inst::ADD(*rd, *rs1, *rs2)),
            Code::SUB(rd, rs1, rs2) => Ok(Inst::SUB(*rd, *rs1, *rs2)),
            Code::SLL(rd, rs1, rs2) => Ok(Inst::SLL(*rd, *rs1, *rs2)),
            Code::SLT(rd, rs1, rs2) => Ok(Inst::SLT(*rd, *rs1, *rs2)),
            Code::SLTU(rd, rs1, rs2) => Ok(Inst::SLTU(*rd, *rs1, *rs2)),
            Code::XOR(rd, rs1, rs2) => Ok(Inst::XOR(*rd, *rs1, *rs2)),
            Code::SRL(rd, rs1, rs2) => Ok(Inst::SRL(*rd, *rs1, *rs2)),
            Code::SRA(rd, rs1, rs2) => Ok(Inst::SRA(*rd, *rs1, *rs2)),
            Code::OR(rd, rs1, rs2) => Ok(Inst::OR(*rd, *rs1, *rs2)),
            Code::AND(rd, rs1, rs2) => Ok(Inst::AND(*rd, *rs1, *rs2)),

            Code::ADDI(rd, rs1, imm) => Ok(Inst::ADDI(*rd, *rs1, imm.resolve(syms)?)),
            Code::SLTI(rd, rs1, imm) => Ok(Inst::SLTI(*rd, *rs1, imm.resolve(syms)?)),
            Code::SLTIU(rd, rs1, imm) => Ok(Inst::SLTIU(*rd, *rs1, imm.resolve(syms)?)),
            Code::XORI(rd, rs1, imm) => Ok(Inst::XORI(*rd, *rs1, imm.resolve(syms)?)),
            Code::ORI(rd, rs1, imm) => Ok(Inst::ORI(*rd, *rs1, imm.resolve(syms)?)),
            Code::ANDI(rd, rs1, imm) => Ok(Inst::ANDI(*rd, *rs1, imm.resolve(syms)?)),
            Code::SLLI(rd, rs1, imm) => Ok(Inst::SLLI(*rd, *rs1, imm.resolve(syms)?)),
            Code::SRLI(rd, rs1, imm) => Ok(Inst::SRLI(*rd, *rs1, imm.resolve(syms)?)),
            Code::SRAI(rd, rs1, imm) => Ok(Inst::SRAI(*rd, *rs1, imm.resolve(syms)?)),

            Code::LB(rd, off, base) => Ok(Inst::LB(*rd, *base, off.resolve(syms)?)),
            Code::LH(rd, off, base) => Ok(Inst::LH(*rd, *base, off.resolve(syms)?)),
            Code::LW(rd, off, base) => Ok(Inst::LW(*rd, *base, off.resolve(syms)?)),
            Code::LBU(rd, off, base) => Ok(Inst::LBU(*rd, *base, off.resolve(syms)?)),
            Code::LHU(rd, off, base) => Ok(Inst::LHU(*rd, *base, off.resolve(syms)?)),
            Code::JALR(rd, rs1, imm) => Ok(Inst::JALR(*rd, *rs1, imm.resolve(syms)?)),

            Code::SB(rs2, off, base) => Ok(Inst::SB(*rs2, *base, off.resolve(syms)?)),
            Code::SH(rs2, off, base) => Ok(Inst::SH(*rs2, *base, off.resolve(syms)?)),
            Code::SW(rs2, off, base) => Ok(Inst::SW(*rs2, *base, off.resolve(syms)?)),

            Code::BEQ(rs1, rs2, t) => Ok(Inst::BEQ(*rs1, *rs2, branch(t)?)),
            Code::BNE(rs1, rs2, t) => Ok(Inst::BNE(*rs1, *rs2, branch(t)?)),
            Code::BLT(rs1, rs2, t) => Ok(Inst::BLT(*rs1, *rs2, branch(t)?)),
            Code::BGE(rs1, rs2, t) => Ok(Inst::BGE(*rs1, *rs2, branch(t)?)),
            Code::BLTU(rs1, rs2, t) => Ok(Inst::BLTU(*rs1, *rs2, branch(t)?)),
            Code::BGEU(rs1, rs2, t) => Ok(Inst::BGEU(*rs1, *rs2, branch(t)?)),

            Code::LUI(rd, imm) => Ok(Inst::LUI(*rd, imm.resolve(syms)?)),
            Code::AUIPC(rd, imm) => Ok(Inst::AUIPC(*rd, imm.resolve(syms)?)),
            Code::JAL(rd, t) => Ok(Inst::JAL(*rd, branch(t)?)),
            Code::ECALL() => Ok(Inst::ECALL()),
        }
    }
}
