use arch::reg::Reg;

use crate::{
    error::Error,
    imm::Imm,
    parser::{imm_arg, reg_arg, Code},
};

const ZERO: Reg = Reg::X0;
const RA: Reg = Reg::X1;

/// Expand a pseudo-mnemonic directly into its canonical instruction.
/// Each arm substitutes the supplied operands (plus any fixed registers the
/// template introduces, like `ra` in `ret`) into a `Code` value; nothing is
/// rendered to text and re-parsed. The operand count must match the
/// template exactly.
pub fn expand(op: &str, args: &[&str], line: &str) -> Result<Code, Error> {
    macro_rules! expect {
        ($n:expr) => {
            if args.len() != $n {
                return Err(Error::MalformedOperand(line.to_string()));
            }
        };
    }
    macro_rules! reg {
        ($i:expr) => {
            reg_arg(args, $i, line)?
        };
    }
    macro_rules! imm {
        ($i:expr) => {
            imm_arg(args, $i, line)?
        };
    }

    match op {
        // mv rd, rs -> addi rd, rs, 0
        "mv" => {
            expect!(2);
            Ok(Code::ADDI(reg!(0), reg!(1), Imm::Literal(0)))
        }
        // not rd, rs -> xori rd, rs, -1
        "not" => {
            expect!(2);
            Ok(Code::XORI(reg!(0), reg!(1), Imm::Literal(-1)))
        }
        // neg rd, rs -> sub rd, zero, rs
        "neg" => {
            expect!(2);
            Ok(Code::SUB(reg!(0), ZERO, reg!(1)))
        }
        // seqz rd, rs -> sltiu rd, rs, 1
        "seqz" => {
            expect!(2);
            Ok(Code::SLTIU(reg!(0), reg!(1), Imm::Literal(1)))
        }
        // snez rd, rs -> sltu rd, zero, rs
        "snez" => {
            expect!(2);
            Ok(Code::SLTU(reg!(0), ZERO, reg!(1)))
        }
        // sltz rd, rs -> slt rd, rs, zero
        "sltz" => {
            expect!(2);
            Ok(Code::SLT(reg!(0), reg!(1), ZERO))
        }
        // sgtz rd, rs -> slt rd, zero, rs
        "sgtz" => {
            expect!(2);
            Ok(Code::SLT(reg!(0), ZERO, reg!(1)))
        }
        // beqz rs, off -> beq rs, zero, off
        "beqz" => {
            expect!(2);
            Ok(Code::BEQ(reg!(0), ZERO, imm!(1)))
        }
        "bnez" => {
            expect!(2);
            Ok(Code::BNE(reg!(0), ZERO, imm!(1)))
        }
        // blez rs, off -> bge zero, rs, off
        "blez" => {
            expect!(2);
            Ok(Code::BGE(ZERO, reg!(0), imm!(1)))
        }
        "bgez" => {
            expect!(2);
            Ok(Code::BGE(reg!(0), ZERO, imm!(1)))
        }
        "bltz" => {
            expect!(2);
            Ok(Code::BLT(reg!(0), ZERO, imm!(1)))
        }
        "bgtz" => {
            expect!(2);
            Ok(Code::BLT(ZERO, reg!(0), imm!(1)))
        }
        // bgt a, b, off -> blt a, b, off; the templates substitute operands
        // positionally, keeping their order.
        "bgt" => {
            expect!(3);
            Ok(Code::BLT(reg!(0), reg!(1), imm!(2)))
        }
        "ble" => {
            expect!(3);
            Ok(Code::BGE(reg!(0), reg!(1), imm!(2)))
        }
        "bgtu" => {
            expect!(3);
            Ok(Code::BLTU(reg!(0), reg!(1), imm!(2)))
        }
        "bleu" => {
            expect!(3);
            Ok(Code::BGEU(reg!(0), reg!(1), imm!(2)))
        }
        // j off -> jal zero, off
        "j" => {
            expect!(1);
            Ok(Code::JAL(ZERO, imm!(0)))
        }
        // jr rs -> jalr zero, rs, 0
        "jr" => {
            expect!(1);
            Ok(Code::JALR(ZERO, reg!(0), Imm::Literal(0)))
        }
        // ret -> jalr zero, ra, 0
        "ret" => {
            expect!(0);
            Ok(Code::JALR(ZERO, RA, Imm::Literal(0)))
        }
        // call off -> jal ra, off
        "call" => {
            expect!(1);
            Ok(Code::JAL(RA, imm!(0)))
        }
        // nop -> addi zero, zero, 0
        "nop" => {
            expect!(0);
            Ok(Code::ADDI(ZERO, ZERO, Imm::Literal(0)))
        }
        // li rd, imm -> addi rd, zero, imm
        "li" => {
            expect!(2);
            Ok(Code::ADDI(reg!(0), ZERO, imm!(1)))
        }
        _ => Err(Error::UnsupportedInstruction(op.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_registers_in_templates() {
        assert_eq!(
            expand("ret", &[], "ret").unwrap(),
            Code::JALR(Reg::X0, Reg::X1, Imm::Literal(0))
        );
        assert_eq!(
            expand("nop", &[], "nop").unwrap(),
            Code::ADDI(Reg::X0, Reg::X0, Imm::Literal(0))
        );
        assert_eq!(
            expand("neg", &["a0", "a1"], "neg a0, a1").unwrap(),
            Code::SUB(Reg::X10, Reg::X0, Reg::X11)
        );
    }

    #[test]
    fn comparison_branches_keep_operand_order() {
        assert_eq!(
            expand("bgt", &["a0", "a1", "8"], "bgt a0, a1, 8").unwrap(),
            Code::parse("blt a0, a1, 8").unwrap()
        );
        assert_eq!(
            expand("ble", &["a0", "a1", "done"], "ble a0, a1, done").unwrap(),
            Code::BGE(Reg::X10, Reg::X11, Imm::Symbol("done".to_string()))
        );
        assert_eq!(
            expand("bleu", &["t0", "t1", "8"], "bleu t0, t1, 8").unwrap(),
            Code::BGEU(Reg::X5, Reg::X6, Imm::Literal(8))
        );
    }

    #[test]
    fn operand_count_mismatch() {
        assert!(matches!(
            expand("mv", &["a0"], "mv a0"),
            Err(Error::MalformedOperand(_))
        ));
        assert!(matches!(
            expand("ret", &["ra"], "ret ra"),
            Err(Error::MalformedOperand(_))
        ));
        assert!(matches!(
            expand("bgt", &["a0", "a1"], "bgt a0, a1"),
            Err(Error::MalformedOperand(_))
        ));
    }

    #[test]
    fn unknown_pseudo() {
        assert!(matches!(
            expand("frobnicate", &[], "frobnicate"),
            Err(Error::UnsupportedInstruction(_))
        ));
    }
}
