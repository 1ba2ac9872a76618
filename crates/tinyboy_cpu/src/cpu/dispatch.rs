use lazy_static::lazy_static;

/// Instruction handler families, one per opcode pattern.
///
/// Operand selectors (register, pair, condition, ALU operation) are decoded
/// from the opcode byte by the handler itself, so one variant covers every
/// opcode of its family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handler {
    Nop,
    Stop,
    Halt,
    Di,
    Ei,
    Prefix,

    // 8-bit loads.
    LdRR,
    LdRHl,
    LdHlR,
    LdRImm8,
    LdHlImm8,
    LdIndirectA,
    LdAIndirect,
    LdhImm8A,
    LdhAImm8,
    LdhCA,
    LdhAC,
    LdImm16A,
    LdAImm16,

    // 16-bit loads.
    LdRrImm16,
    LdImm16Sp,
    LdSpHl,
    LdHlSpImm8,
    Push,
    Pop,

    // Increment / decrement.
    IncR,
    DecR,
    IncHl,
    DecHl,
    IncRr,
    DecRr,

    // Arithmetic and logic.
    AluR,
    AluHl,
    AluImm8,
    AddHlRr,
    AddSpImm8,
    RotateA,
    Daa,
    Cpl,
    Scf,
    Ccf,

    // Control flow.
    Jr,
    JrCond,
    Jp,
    JpCond,
    JpHl,
    Call,
    CallCond,
    Ret,
    RetCond,
    Reti,
    Rst,
}

lazy_static! {
    /// Opcode → handler family. Empty slots are undefined opcodes.
    pub(crate) static ref OPCODE_TABLE: [Option<Handler>; 256] = build_opcode_table();
}

/// O(1) dispatch of a primary opcode byte.
#[inline]
pub fn lookup(opcode: u8) -> Option<Handler> {
    OPCODE_TABLE[opcode as usize]
}

fn build_opcode_table() -> [Option<Handler>; 256] {
    use Handler::*;

    let mut table: [Option<Handler>; 256] = [None; 256];
    let mut set = |opcode: u8, handler: Handler| table[opcode as usize] = Some(handler);

    // Pair-indexed families: rr in bits 4–5.
    for rp in 0..4u8 {
        let base = rp << 4;
        set(base | 0x01, LdRrImm16);
        set(base | 0x02, LdIndirectA);
        set(base | 0x03, IncRr);
        set(base | 0x09, AddHlRr);
        set(base | 0x0A, LdAIndirect);
        set(base | 0x0B, DecRr);
        set(0xC1 | base, Pop);
        set(0xC5 | base, Push);
    }

    // Register-indexed families: r (or operation / vector) in bits 3–5.
    for r in 0..8u8 {
        let base = r << 3;
        set(base | 0x04, if r == 6 { IncHl } else { IncR });
        set(base | 0x05, if r == 6 { DecHl } else { DecR });
        set(base | 0x06, if r == 6 { LdHlImm8 } else { LdRImm8 });
        set(0xC6 | base, AluImm8);
        set(0xC7 | base, Rst);
    }

    // Condition-indexed families: cc in bits 3–4.
    for cc in 0..4u8 {
        let base = cc << 3;
        set(0x20 | base, JrCond);
        set(0xC0 | base, RetCond);
        set(0xC2 | base, JpCond);
        set(0xC4 | base, CallCond);
    }

    for opcode in 0x40..=0x7Fu8 {
        let dst = (opcode >> 3) & 0x07;
        let src = opcode & 0x07;
        let handler = match (dst, src) {
            (6, 6) => Halt,
            (_, 6) => LdRHl,
            (6, _) => LdHlR,
            _ => LdRR,
        };
        set(opcode, handler);
    }

    for opcode in 0x80..=0xBFu8 {
        set(opcode, if opcode & 0x07 == 6 { AluHl } else { AluR });
    }

    for opcode in [0x07, 0x0F, 0x17, 0x1F] {
        set(opcode, RotateA);
    }

    set(0x00, Nop);
    set(0x08, LdImm16Sp);
    set(0x10, Stop);
    set(0x18, Jr);
    set(0x27, Daa);
    set(0x2F, Cpl);
    set(0x37, Scf);
    set(0x3F, Ccf);
    set(0xC3, Jp);
    set(0xC9, Ret);
    set(0xCB, Prefix);
    set(0xCD, Call);
    set(0xD9, Reti);
    set(0xE0, LdhImm8A);
    set(0xE2, LdhCA);
    set(0xE8, AddSpImm8);
    set(0xE9, JpHl);
    set(0xEA, LdImm16A);
    set(0xF0, LdhAImm8);
    set(0xF2, LdhAC);
    set(0xF3, Di);
    set(0xF8, LdHlSpImm8);
    set(0xF9, LdSpHl);
    set(0xFA, LdAImm16);
    set(0xFB, Ei);

    table
}
