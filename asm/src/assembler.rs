use crate::{
    error::{Error, SourceError},
    parser::{Code, Stmt},
    symtab::{Section, SymbolTable, DATA_BASE},
};

/// One encoded instruction: its text-section address, the 32-bit word, and
/// the source line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub addr: u32,
    pub word: u32,
    pub source: String,
}

impl Record {
    /// 8-digit zero-padded hex address.
    pub fn addr_hex(&self) -> String {
        format!("{:08x}", self.addr)
    }

    /// 8-digit zero-padded hex word.
    pub fn word_hex(&self) -> String {
        format!("{:08x}", self.word)
    }

    /// 32-character MSB-first binary string.
    pub fn word_bin(&self) -> String {
        format!("{:032b}", self.word)
    }
}

/// Assemble one translation unit. All-or-nothing: the first error aborts
/// the run with no partial output.
///
/// Pass 1 classifies every line exactly once, advancing the text counter by
/// 4 per instruction (labels consume no address) and the data counter by 4
/// per `.word`, and binds every symbol. Pass 2 then encodes each
/// instruction against the completed table, so targets may reference labels
/// defined later in the file.
pub fn assemble<S: AsRef<str>>(lines: &[S]) -> Result<Vec<Record>, SourceError> {
    let mut syms = SymbolTable::new();
    // Lines before any directive belong to .text.
    let mut section = Section::Text;
    let mut text_addr: u32 = 0;
    let mut data_addr: u32 = DATA_BASE;
    let mut codes: Vec<(usize, String, u32, Code)> = Vec::new();

    for (idx, raw) in lines.iter().enumerate() {
        let raw = raw.as_ref();
        let located = |e: Error| SourceError::new(e, idx + 1, raw);

        let stmt = match Stmt::parse(raw).map_err(located)? {
            Some(stmt) => stmt,
            None => continue,
        };
        match stmt {
            Stmt::Section(next) => section = next,
            Stmt::Label(name) => {
                let addr = match section {
                    Section::Text => text_addr,
                    Section::Data => data_addr,
                };
                syms.insert(&name, addr).map_err(located)?;
            }
            Stmt::Word(name, _value) => {
                if section != Section::Data {
                    return Err(located(Error::MalformedSection(raw.trim().to_string())));
                }
                syms.insert(&name, data_addr).map_err(located)?;
                data_addr += 4;
            }
            Stmt::Code(code) => {
                if section != Section::Text {
                    return Err(located(Error::MalformedSection(raw.trim().to_string())));
                }
                codes.push((idx, raw.trim().to_string(), text_addr, code));
                text_addr += 4;
            }
        }
    }

    let mut records = Vec::with_capacity(codes.len());
    for (idx, source, addr, code) in codes {
        let inst = code
            .resolve(addr, &syms)
            .map_err(|e| SourceError::new(e, idx + 1, &source))?;
        records.push(Record {
            addr,
            word: inst.to_op().to_word(),
            source,
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(lines: &[&str]) -> Vec<u32> {
        assemble(lines).unwrap().iter().map(|r| r.word).collect()
    }

    #[test]
    fn two_instruction_program() {
        let records = assemble(&["addi x1, x0, 5", "add x2, x1, x1"]).unwrap();
        let tuples: Vec<(String, String, String, String)> = records
            .iter()
            .map(|r| (r.addr_hex(), r.word_hex(), r.word_bin(), r.source.clone()))
            .collect();
        assert_eq!(
            tuples,
            vec![
                (
                    "00000000".to_string(),
                    "00500093".to_string(),
                    "00000000010100000000000010010011".to_string(),
                    "addi x1, x0, 5".to_string()
                ),
                (
                    "00000004".to_string(),
                    "00108133".to_string(),
                    "00000000000100001000000100110011".to_string(),
                    "add x2, x1, x1".to_string()
                ),
            ]
        );
    }

    #[test]
    fn pseudo_matches_canonical_word() {
        assert_eq!(words(&["mv a0, a1"]), words(&["addi a0, a1, 0"]));
        assert_eq!(words(&["nop"]), words(&["addi zero, zero, 0"]));
        assert_eq!(words(&["ret"]), words(&["jalr zero, ra, 0"]));
    }

    #[test]
    fn ecall_fixed_word() {
        assert_eq!(words(&["ecall"]), vec![0x0000_0073]);
    }

    #[test]
    fn labels_consume_no_address() {
        let records = assemble(&[
            "start:",
            "  addi x1, x0, 1   # one",
            "",
            "# full-line comment",
            "next:",
            "  addi x2, x0, 2",
        ])
        .unwrap();
        assert_eq!(records[0].addr, 0);
        assert_eq!(records[1].addr, 4);
    }

    #[test]
    fn forward_reference() {
        let records = assemble(&["beq x1, x2, done", "nop", "done:", "nop"]).unwrap();
        // done = 8, branch at 0 -> offset +8.
        assert_eq!(records[0].word, 0x00208463);
    }

    #[test]
    fn backward_branch() {
        let records = assemble(&["loop:", "nop", "bne t0, zero, loop"]).unwrap();
        // loop = 0, branch at 4 -> offset -4.
        assert_eq!(records[1].word, 0xfe029ee3);
        assert_eq!(arch::op::imm_b(records[1].word), -4);
    }

    #[test]
    fn duplicate_label_anywhere_fails() {
        let err = assemble(&["x:", "nop", "x:", "nop"]).unwrap_err();
        assert!(matches!(err.error, Error::DuplicateLabel(ref n) if n == "x"));
        assert_eq!(err.line, 3);

        // Same name as text label and data symbol.
        let err = assemble(&[".data", "x: .word 1", ".text", "x:", "nop"]).unwrap_err();
        assert!(matches!(err.error, Error::DuplicateLabel(_)));
    }

    #[test]
    fn odd_branch_offset_fails() {
        let err = assemble(&["beq x1, x2, 7"]).unwrap_err();
        assert!(matches!(err.error, Error::OddBranchOffset(7)));
        let err = assemble(&["j 0x11"]).unwrap_err();
        assert!(matches!(err.error, Error::OddBranchOffset(0x11)));
    }

    #[test]
    fn data_symbols_and_relocation() {
        let records = assemble(&[
            ".data",
            "count: .word 10",
            "flag: .word -1",
            ".text",
            "lui x5, %hi(count)",
            "addi x5, x5, %lo(count)",
            "lw x6, %lo(flag)(x5)",
        ])
        .unwrap();
        // count = 0x10000000, flag = 0x10000004.
        assert_eq!(records[0].word, 0x100002b7);
        assert_eq!(records[1].word, 0x00028293);
        assert_eq!(arch::op::imm_i(records[2].word), 4);
        // Data declarations emit no records.
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].addr, 0);
    }

    #[test]
    fn section_violations() {
        let err = assemble(&[".data", "addi x1, x0, 1"]).unwrap_err();
        assert!(matches!(err.error, Error::MalformedSection(_)));
        assert_eq!(err.line, 2);

        let err = assemble(&["count: .word 1"]).unwrap_err();
        assert!(matches!(err.error, Error::MalformedSection(_)));
    }

    #[test]
    fn undefined_symbol_fails() {
        let err = assemble(&["jal x1, nowhere"]).unwrap_err();
        assert!(matches!(err.error, Error::UndefinedSymbol(ref n) if n == "nowhere"));
    }

    #[test]
    fn no_partial_output_on_late_error() {
        // The last line is bad; nothing is produced.
        assert!(assemble(&["nop", "nop", "mul x1, x2, x3"]).is_err());
    }

    #[test]
    fn idempotent() {
        let src = [
            ".data",
            "count: .word 10",
            ".text",
            "main:",
            "  li a0, 0",
            "loop:",
            "  addi a0, a0, 1",
            "  blt a0, a1, loop",
            "  lui t0, %hi(count)",
            "  lw t1, %lo(count)(t0)",
            "  ret",
        ];
        assert_eq!(assemble(&src).unwrap(), assemble(&src).unwrap());
    }
}
