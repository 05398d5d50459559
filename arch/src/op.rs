use crate::reg::Reg;

// ----------------------------------------------------------------------------
// Major opcodes

pub struct OpCode;

impl OpCode {
    pub const R: u32 = 0b0110011;
    pub const I_ARITH: u32 = 0b0010011;
    pub const LOAD: u32 = 0b0000011;
    pub const JALR: u32 = 0b1100111;
    pub const STORE: u32 = 0b0100011;
    pub const BRANCH: u32 = 0b1100011;
    pub const LUI: u32 = 0b0110111;
    pub const AUIPC: u32 = 0b0010111;
    pub const JAL: u32 = 0b1101111;
    pub const SYSTEM: u32 = 0b1110011;
}

// ----------------------------------------------------------------------------
// Instruction formats

/// Format-level view of an instruction: which fields exist and where they
/// go in the 32-bit word. Immediates are two's-complement and truncated to
/// the field width when packed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// funct3, funct7, rd, rs1, rs2
    R(u32, u32, Reg, Reg, Reg),
    /// opcode, funct3, rd, rs1, imm[11:0]
    I(u32, u32, Reg, Reg, i32),
    /// funct3, rs2, rs1, imm[11:0] split over [31:25] and [11:7]
    S(u32, Reg, Reg, i32),
    /// funct3, rs1, rs2, imm[12:1] scrambled per the B layout
    B(u32, Reg, Reg, i32),
    /// opcode, rd, imm[19:0] placed at [31:12] (raw upper bits, not shifted)
    U(u32, Reg, i32),
    /// rd, imm[20:1] scrambled per the J layout
    J(Reg, i32),
    /// Exact constant word (ecall)
    Fixed(u32),
}

impl Op {
    pub fn to_word(&self) -> u32 {
        match *self {
            Op::R(f3, f7, rd, rs1, rs2) => {
                (f7 << 25)
                    | (rs2.idx() << 20)
                    | (rs1.idx() << 15)
                    | (f3 << 12)
                    | (rd.idx() << 7)
                    | OpCode::R
            }
            Op::I(opcode, f3, rd, rs1, imm) => {
                ((imm as u32 & 0xfff) << 20)
                    | (rs1.idx() << 15)
                    | (f3 << 12)
                    | (rd.idx() << 7)
                    | opcode
            }
            Op::S(f3, rs2, rs1, imm) => {
                let imm = imm as u32;
                ((imm >> 5 & 0x7f) << 25)
                    | (rs2.idx() << 20)
                    | (rs1.idx() << 15)
                    | (f3 << 12)
                    | ((imm & 0x1f) << 7)
                    | OpCode::STORE
            }
            Op::B(f3, rs1, rs2, imm) => {
                let imm = imm as u32 & 0x1ffe;
                ((imm >> 12 & 0x1) << 31)
                    | ((imm >> 5 & 0x3f) << 25)
                    | (rs2.idx() << 20)
                    | (rs1.idx() << 15)
                    | (f3 << 12)
                    | ((imm >> 1 & 0xf) << 8)
                    | ((imm >> 11 & 0x1) << 7)
                    | OpCode::BRANCH
            }
            Op::U(opcode, rd, imm) => ((imm as u32 & 0xfffff) << 12) | (rd.idx() << 7) | opcode,
            Op::J(rd, imm) => {
                let imm = imm as u32 & 0x1ffffe;
                ((imm >> 20 & 0x1) << 31)
                    | ((imm >> 1 & 0x3ff) << 21)
                    | ((imm >> 11 & 0x1) << 20)
                    | ((imm >> 12 & 0xff) << 12)
                    | (rd.idx() << 7)
                    | OpCode::JAL
            }
            Op::Fixed(word) => word,
        }
    }
}

// ----------------------------------------------------------------------------
// Field extraction

pub fn opcode(word: u32) -> u32 {
    word & 0x7f
}

pub fn rd(word: u32) -> u32 {
    word >> 7 & 0x1f
}

pub fn funct3(word: u32) -> u32 {
    word >> 12 & 0x7
}

pub fn rs1(word: u32) -> u32 {
    word >> 15 & 0x1f
}

pub fn rs2(word: u32) -> u32 {
    word >> 20 & 0x1f
}

pub fn funct7(word: u32) -> u32 {
    word >> 25 & 0x7f
}

/// Sign-extended I-type immediate.
pub fn imm_i(word: u32) -> i32 {
    (word as i32) >> 20
}

/// Sign-extended S-type immediate, reassembled from its two slices.
pub fn imm_s(word: u32) -> i32 {
    ((word as i32 >> 25) << 5) | (word >> 7 & 0x1f) as i32
}

/// Sign-extended B-type immediate (bit 0 always zero).
pub fn imm_b(word: u32) -> i32 {
    ((word as i32 >> 31) << 12)
        | ((word >> 25 & 0x3f) << 5) as i32
        | ((word >> 8 & 0xf) << 1) as i32
        | ((word >> 7 & 0x1) << 11) as i32
}

/// Raw 20-bit U-type immediate field.
pub fn imm_u(word: u32) -> u32 {
    word >> 12
}

/// Sign-extended J-type immediate (bit 0 always zero).
pub fn imm_j(word: u32) -> i32 {
    ((word as i32 >> 31) << 20)
        | ((word >> 12 & 0xff) << 12) as i32
        | ((word >> 20 & 0x1) << 11) as i32
        | ((word >> 21 & 0x3ff) << 1) as i32
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_fields {
        ($name:ident, $op:expr, $(($field:ident, $want:expr)),+ $(,)?) => {
            #[test]
            fn $name() {
                let word = $op.to_word();
                $(
                    assert_eq!($field(word), $want, "{} of {:08x}", stringify!($field), word);
                )+
            }
        };
    }

    test_fields!(
        r_fields,
        Op::R(0b101, 0b0100000, Reg::X1, Reg::X2, Reg::X3),
        (opcode, OpCode::R),
        (funct3, 0b101),
        (funct7, 0b0100000),
        (rd, 1),
        (rs1, 2),
        (rs2, 3),
    );

    test_fields!(
        i_fields,
        Op::I(OpCode::I_ARITH, 0b111, Reg::X10, Reg::X11, -2048),
        (opcode, OpCode::I_ARITH),
        (funct3, 0b111),
        (rd, 10),
        (rs1, 11),
        (imm_i, -2048),
    );

    test_fields!(
        s_fields,
        Op::S(0b010, Reg::X5, Reg::X2, -4),
        (opcode, OpCode::STORE),
        (funct3, 0b010),
        (rs2, 5),
        (rs1, 2),
        (imm_s, -4),
    );

    test_fields!(
        b_fields,
        Op::B(0b001, Reg::X6, Reg::X7, -4096),
        (opcode, OpCode::BRANCH),
        (funct3, 0b001),
        (rs1, 6),
        (rs2, 7),
        (imm_b, -4096),
    );

    test_fields!(
        u_fields,
        Op::U(OpCode::LUI, Reg::X31, 0xfffff),
        (opcode, OpCode::LUI),
        (rd, 31),
        (imm_u, 0xfffff),
    );

    test_fields!(
        j_fields,
        Op::J(Reg::X1, -2),
        (opcode, OpCode::JAL),
        (rd, 1),
        (imm_j, -2),
    );

    #[test]
    fn branch_imm_round_trip() {
        for imm in [-4096, -8, -2, 0, 2, 8, 2048, 4094] {
            let word = Op::B(0, Reg::X0, Reg::X0, imm).to_word();
            assert_eq!(imm_b(word), imm, "B imm {imm}");
        }
    }

    #[test]
    fn jump_imm_round_trip() {
        for imm in [-1048576, -2048, -2, 0, 2, 16, 4096, 1048574] {
            let word = Op::J(Reg::X0, imm).to_word();
            assert_eq!(imm_j(word), imm, "J imm {imm}");
        }
    }

    #[test]
    fn imm_truncates_to_field_width() {
        // Mirrors the reference: out-of-range immediates are masked, not
        // rejected.
        let word = Op::I(OpCode::I_ARITH, 0, Reg::X1, Reg::X0, 0x1234_5678).to_word();
        assert_eq!(word >> 20, 0x678);
    }
}
