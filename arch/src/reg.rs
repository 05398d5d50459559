use num_enum::{FromPrimitive, IntoPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// RV32I register file. Parses from both the raw `x0..x31` names and the
/// ABI aliases; `fp` is the frame-pointer alias of `s0` (x8).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Default,
    FromPrimitive,
    IntoPrimitive,
    EnumString,
    Display,
)]
#[repr(u8)]
#[strum(ascii_case_insensitive)]
pub enum Reg {
    #[default]
    #[strum(serialize = "x0", to_string = "zero")]
    X0,
    #[strum(serialize = "x1", to_string = "ra")]
    X1,
    #[strum(serialize = "x2", to_string = "sp")]
    X2,
    #[strum(serialize = "x3", to_string = "gp")]
    X3,
    #[strum(serialize = "x4", to_string = "tp")]
    X4,
    #[strum(serialize = "x5", to_string = "t0")]
    X5,
    #[strum(serialize = "x6", to_string = "t1")]
    X6,
    #[strum(serialize = "x7", to_string = "t2")]
    X7,
    #[strum(serialize = "x8", serialize = "fp", to_string = "s0")]
    X8,
    #[strum(serialize = "x9", to_string = "s1")]
    X9,
    #[strum(serialize = "x10", to_string = "a0")]
    X10,
    #[strum(serialize = "x11", to_string = "a1")]
    X11,
    #[strum(serialize = "x12", to_string = "a2")]
    X12,
    #[strum(serialize = "x13", to_string = "a3")]
    X13,
    #[strum(serialize = "x14", to_string = "a4")]
    X14,
    #[strum(serialize = "x15", to_string = "a5")]
    X15,
    #[strum(serialize = "x16", to_string = "a6")]
    X16,
    #[strum(serialize = "x17", to_string = "a7")]
    X17,
    #[strum(serialize = "x18", to_string = "s2")]
    X18,
    #[strum(serialize = "x19", to_string = "s3")]
    X19,
    #[strum(serialize = "x20", to_string = "s4")]
    X20,
    #[strum(serialize = "x21", to_string = "s5")]
    X21,
    #[strum(serialize = "x22", to_string = "s6")]
    X22,
    #[strum(serialize = "x23", to_string = "s7")]
    X23,
    #[strum(serialize = "x24", to_string = "s8")]
    X24,
    #[strum(serialize = "x25", to_string = "s9")]
    X25,
    #[strum(serialize = "x26", to_string = "s10")]
    X26,
    #[strum(serialize = "x27", to_string = "s11")]
    X27,
    #[strum(serialize = "x28", to_string = "t3")]
    X28,
    #[strum(serialize = "x29", to_string = "t4")]
    X29,
    #[strum(serialize = "x30", to_string = "t5")]
    X30,
    #[strum(serialize = "x31", to_string = "t6")]
    X31,
}

impl Reg {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.parse::<Self>() {
            Ok(r) => Ok(r),
            Err(_) => Err(format!("Unknown reg name: {s}")),
        }
    }

    /// 5-bit index used in the encoded word.
    pub fn idx(self) -> u32 {
        u32::from(u8::from(self))
    }
}
