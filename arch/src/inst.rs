use crate::{
    op::{Op, OpCode},
    reg::Reg,
};

/// One variant per base RV32I mnemonic, operands fully resolved. Branch and
/// jump immediates are already pc-relative byte offsets here; `%hi`/`%lo`
/// and symbol references were resolved by the assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inst {
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

    ADDI(Reg, Reg, i32),
    SLTI(Reg, Reg, i32),
    SLTIU(Reg, Reg, i32),
    XORI(Reg, Reg, i32),
    ORI(Reg, Reg, i32),
    ANDI(Reg, Reg, i32),
    SLLI(Reg, Reg, i32),
    SRLI(Reg, Reg, i32),
    SRAI(Reg, Reg, i32),

    LB(Reg, Reg, i32),
    LH(Reg, Reg, i32),
    LW(Reg, Reg, i32),
    LBU(Reg, Reg, i32),
    LHU(Reg, Reg, i32),
    JALR(Reg, Reg, i32),

    // rs2, rs1, offset
    SB(Reg, Reg, i32),
    SH(Reg, Reg, i32),
    SW(Reg, Reg, i32),

    BEQ(Reg, Reg, i32),
    BNE(Reg, Reg, i32),
    BLT(Reg, Reg, i32),
    BGE(Reg, Reg, i32),
    BLTU(Reg, Reg, i32),
    BGEU(Reg, Reg, i32),

    LUI(Reg, i32),
    AUIPC(Reg, i32),
    JAL(Reg, i32),
    ECALL(),
}

impl Inst {
    /// Select the instruction format and fixed funct fields. The mnemonic
    /// alone decides the format, never the operand shape.
    pub fn to_op(self) -> Op {
        match self {
            Inst::ADD(rd, rs1, rs2) => Op::R(0b000, 0b0000000, rd, rs1, rs2),
            Inst::SUB(rd, rs1, rs2) => Op::R(0b000, 0b0100000, rd, rs1, rs2),
            Inst::SLL(rd, rs1, rs2) => Op::R(0b001, 0b0000000, rd, rs1, rs2),
            Inst::SLT(rd, rs1, rs2) => Op::R(0b010, 0b0000000, rd, rs1, rs2),
            Inst::SLTU(rd, rs1, rs2) => Op::R(0b011, 0b0000000, rd, rs1, rs2),
            Inst::XOR(rd, rs1, rs2) => Op::R(0b100, 0b0000000, rd, rs1, rs2),
            Inst::SRL(rd, rs1, rs2) => Op::R(0b101, 0b0000000, rd, rs1, rs2),
            Inst::SRA(rd, rs1, rs2) => Op::R(0b101, 0b0100000, rd, rs1, rs2),
            Inst::OR(rd, rs1, rs2) => Op::R(0b110, 0b0000000, rd, rs1, rs2),
            Inst::AND(rd, rs1, rs2) => Op::R(0b111, 0b0000000, rd, rs1, rs2),

            Inst::ADDI(rd, rs1, imm) => Op::I(OpCode::I_ARITH, 0b000, rd, rs1, imm),
            Inst::SLTI(rd, rs1, imm) => Op::I(OpCode::I_ARITH, 0b010, rd, rs1, imm),
            Inst::SLTIU(rd, rs1, imm) => Op::I(OpCode::I_ARITH, 0b011, rd, rs1, imm),
            Inst::XORI(rd, rs1, imm) => Op::I(OpCode::I_ARITH, 0b100, rd, rs1, imm),
            Inst::ORI(rd, rs1, imm) => Op::I(OpCode::I_ARITH, 0b110, rd, rs1, imm),
            Inst::ANDI(rd, rs1, imm) => Op::I(OpCode::I_ARITH, 0b111, rd, rs1, imm),
            // Shifts carry a 5-bit shamt in imm[4:0]; srai sets funct7
            // 0100000 over imm[11:5].
            Inst::SLLI(rd, rs1, shamt) => Op::I(OpCode::I_ARITH, 0b001, rd, rs1, shamt & 0x1f),
            Inst::SRLI(rd, rs1, shamt) => Op::I(OpCode::I_ARITH, 0b101, rd, rs1, shamt & 0x1f),
            Inst::SRAI(rd, rs1, shamt) => {
                Op::I(OpCode::I_ARITH, 0b101, rd, rs1, (0b0100000 << 5) | (shamt & 0x1f))
            }

            Inst::LB(rd, rs1, imm) => Op::I(OpCode::LOAD, 0b000, rd, rs1, imm),
            Inst::LH(rd, rs1, imm) => Op::I(OpCode::LOAD, 0b001, rd, rs1, imm),
            Inst::LW(rd, rs1, imm) => Op::I(OpCode::LOAD, 0b010, rd, rs1, imm),
            Inst::LBU(rd, rs1, imm) => Op::I(OpCode::LOAD, 0b100, rd, rs1, imm),
            Inst::LHU(rd, rs1, imm) => Op::I(OpCode::LOAD, 0b101, rd, rs1, imm),
            Inst::JALR(rd, rs1, imm) => Op::I(OpCode::JALR, 0b000, rd, rs1, imm),

            Inst::SB(rs2, rs1, imm) => Op::S(0b000, rs2, rs1, imm),
            Inst::SH(rs2, rs1, imm) => Op::S(0b001, rs2, rs1, imm),
            Inst::SW(rs2, rs1, imm) => Op::S(0b010, rs2, rs1, imm),

            Inst::BEQ(rs1, rs2, imm) => Op::B(0b000, rs1, rs2, imm),
            Inst::BNE(rs1, rs2, imm) => Op::B(0b001, rs1, rs2, imm),
            Inst::BLT(rs1, rs2, imm) => Op::B(0b100, rs1, rs2, imm),
            Inst::BGE(rs1, rs2, imm) => Op::B(0b101, rs1, rs2, imm),
            Inst::BLTU(rs1, rs2, imm) => Op::B(0b110, rs1, rs2, imm),
            Inst::BGEU(rs1, rs2, imm) => Op::B(0b111, rs1, rs2, imm),

            Inst::LUI(rd, imm) => Op::U(OpCode::LUI, rd, imm),
            Inst::AUIPC(rd, imm) => Op::U(OpCode::AUIPC, rd, imm),
            Inst::JAL(rd, imm) => Op::J(rd, imm),
            Inst::ECALL() => Op::Fixed(0x0000_0073),
        }
    }
}
