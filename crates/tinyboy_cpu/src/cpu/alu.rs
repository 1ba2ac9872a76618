//! Flag algebra for the SM83 ALU.
//!
//! Every function here is pure: it takes the operands (and the incoming
//! flags where an operation reads or preserves them) and returns the result
//! together with the complete new flag set. Handlers apply the output to the
//! register file themselves.

use super::Flags;

/// Result byte plus the full flag set produced by an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AluOutput {
    pub value: u8,
    pub flags: Flags,
}

/// 8-bit accumulator operations, in opcode order (bits 3–5 of 0x80–0xBF and
/// the `op A,d8` group).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

impl AluOp {
    #[inline]
    pub fn from_opcode(opcode: u8) -> Self {
        match (opcode >> 3) & 0x07 {
            0 => AluOp::Add,
            1 => AluOp::Adc,
            2 => AluOp::Sub,
            3 => AluOp::Sbc,
            4 => AluOp::And,
            5 => AluOp::Xor,
            6 => AluOp::Or,
            _ => AluOp::Cp,
        }
    }
}

/// CB-prefix rotate/shift operations, in opcode order (bits 3–5 of 0x00–0x3F).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShiftOp {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
}

impl ShiftOp {
    #[inline]
    pub fn from_opcode(opcode: u8) -> Self {
        match (opcode >> 3) & 0x07 {
            0 => ShiftOp::Rlc,
            1 => ShiftOp::Rrc,
            2 => ShiftOp::Rl,
            3 => ShiftOp::Rr,
            4 => ShiftOp::Sla,
            5 => ShiftOp::Sra,
            6 => ShiftOp::Swap,
            _ => ShiftOp::Srl,
        }
    }
}

#[inline]
fn make_flags(z: bool, n: bool, h: bool, c: bool) -> Flags {
    let mut flags = Flags::empty();
    flags.set(Flags::Z, z);
    flags.set(Flags::N, n);
    flags.set(Flags::H, h);
    flags.set(Flags::C, c);
    flags
}

/// Dispatch an accumulator operation. `carry` is the incoming C flag and is
/// only consumed by ADC and SBC. CP returns `a` unchanged.
pub fn alu8(op: AluOp, a: u8, value: u8, carry: bool) -> AluOutput {
    match op {
        AluOp::Add => add8(a, value, false),
        AluOp::Adc => add8(a, value, carry),
        AluOp::Sub => sub8(a, value, false),
        AluOp::Sbc => sub8(a, value, carry),
        AluOp::And => and8(a, value),
        AluOp::Xor => xor8(a, value),
        AluOp::Or => or8(a, value),
        AluOp::Cp => AluOutput {
            value: a,
            flags: sub8(a, value, false).flags,
        },
    }
}

/// ADD / ADC.
pub fn add8(a: u8, value: u8, carry_in: bool) -> AluOutput {
    let carry = carry_in as u8;
    let (partial, carry_lo) = a.overflowing_add(value);
    let (result, carry_hi) = partial.overflowing_add(carry);
    let half = (a & 0x0F) + (value & 0x0F) + carry > 0x0F;

    AluOutput {
        value: result,
        flags: make_flags(result == 0, false, half, carry_lo || carry_hi),
    }
}

/// SUB / SBC (and CP, which discards the value).
///
/// Borrows are detected with wrapping 8-bit arithmetic; H is set when the
/// minuend's low nibble is smaller than the subtrahend's plus carry-in.
pub fn sub8(a: u8, value: u8, carry_in: bool) -> AluOutput {
    let carry = carry_in as u8;
    let (partial, borrow_lo) = a.overflowing_sub(value);
    let (result, borrow_hi) = partial.overflowing_sub(carry);
    let half = (a & 0x0F) < (value & 0x0F) + carry;

    AluOutput {
        value: result,
        flags: make_flags(result == 0, true, half, borrow_lo || borrow_hi),
    }
}

#[inline]
pub fn and8(a: u8, value: u8) -> AluOutput {
    let result = a & value;
    AluOutput {
        value: result,
        flags: make_flags(result == 0, false, true, false),
    }
}

#[inline]
pub fn or8(a: u8, value: u8) -> AluOutput {
    let result = a | value;
    AluOutput {
        value: result,
        flags: make_flags(result == 0, false, false, false),
    }
}

#[inline]
pub fn xor8(a: u8, value: u8) -> AluOutput {
    let result = a ^ value;
    AluOutput {
        value: result,
        flags: make_flags(result == 0, false, false, false),
    }
}

/// 8-bit increment. C is carried over from `flags`.
#[inline]
pub fn inc8(value: u8, flags: Flags) -> AluOutput {
    let result = value.wrapping_add(1);
    AluOutput {
        value: result,
        flags: make_flags(
            result == 0,
            false,
            (value & 0x0F) == 0x0F,
            flags.contains(Flags::C),
        ),
    }
}

/// 8-bit decrement. C is carried over from `flags`.
#[inline]
pub fn dec8(value: u8, flags: Flags) -> AluOutput {
    let result = value.wrapping_sub(1);
    AluOutput {
        value: result,
        flags: make_flags(
            result == 0,
            true,
            (value & 0x0F) == 0,
            flags.contains(Flags::C),
        ),
    }
}

/// `ADD HL,rr`: Z preserved, N cleared, H/C from bits 11 and 15.
#[inline]
pub fn add16(hl: u16, value: u16, flags: Flags) -> (u16, Flags) {
    let (result, carry) = hl.overflowing_add(value);
    let half = (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF;
    (
        result,
        make_flags(flags.contains(Flags::Z), false, half, carry),
    )
}

/// `ADD SP,e` and `LD HL,SP+e`: Z and N cleared, H and C computed from the
/// unsigned low-byte addition.
#[inline]
pub fn add16_signed(base: u16, imm8: u8) -> (u16, Flags) {
    let offset = imm8 as i8 as i16 as u16;
    let half = (base & 0x000F) + (offset & 0x000F) > 0x000F;
    let carry = (base & 0x00FF) + (offset & 0x00FF) > 0x00FF;
    (base.wrapping_add(offset), make_flags(false, false, half, carry))
}

/// Decimal adjust after a BCD addition or subtraction. N is preserved.
pub fn daa(a: u8, flags: Flags) -> AluOutput {
    let subtract = flags.contains(Flags::N);
    let mut adjust: u8 = if flags.contains(Flags::C) { 0x60 } else { 0x00 };
    if flags.contains(Flags::H) {
        adjust |= 0x06;
    }

    let result = if subtract {
        a.wrapping_sub(adjust)
    } else {
        if (a & 0x0F) > 0x09 {
            adjust |= 0x06;
        }
        if a > 0x99 {
            adjust |= 0x60;
        }
        a.wrapping_add(adjust)
    };

    AluOutput {
        value: result,
        flags: make_flags(result == 0, subtract, false, adjust >= 0x60),
    }
}

/// `CPL`: N and H set, Z and C preserved.
#[inline]
pub fn cpl(a: u8, flags: Flags) -> AluOutput {
    AluOutput {
        value: !a,
        flags: (flags & (Flags::Z | Flags::C)) | Flags::N | Flags::H,
    }
}

#[inline]
pub fn scf(flags: Flags) -> Flags {
    (flags & Flags::Z) | Flags::C
}

#[inline]
pub fn ccf(flags: Flags) -> Flags {
    let mut next = flags & (Flags::Z | Flags::C);
    next.toggle(Flags::C);
    next
}

/// CB rotate/shift/swap. `carry` is the incoming C flag (used by RL/RR).
pub fn shift8(op: ShiftOp, value: u8, carry: bool) -> AluOutput {
    let (result, carry_out) = match op {
        ShiftOp::Rlc => (value.rotate_left(1), value & 0x80 != 0),
        ShiftOp::Rrc => (value.rotate_right(1), value & 0x01 != 0),
        ShiftOp::Rl => ((value << 1) | carry as u8, value & 0x80 != 0),
        ShiftOp::Rr => ((value >> 1) | ((carry as u8) << 7), value & 0x01 != 0),
        ShiftOp::Sla => (value << 1, value & 0x80 != 0),
        ShiftOp::Sra => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
        ShiftOp::Swap => (value.rotate_left(4), false),
        ShiftOp::Srl => (value >> 1, value & 0x01 != 0),
    };

    AluOutput {
        value: result,
        flags: make_flags(result == 0, false, false, carry_out),
    }
}

/// RLCA/RRCA/RLA/RRA: same as the CB rotate but Z is always cleared.
#[inline]
pub fn rotate_a(op: ShiftOp, a: u8, carry: bool) -> AluOutput {
    let out = shift8(op, a, carry);
    AluOutput {
        value: out.value,
        flags: out.flags.difference(Flags::Z),
    }
}

/// `BIT b,r`: Z = tested bit clear, N cleared, H set, C preserved.
#[inline]
pub fn bit(value: u8, bit: u8, flags: Flags) -> Flags {
    make_flags(
        value & (1 << bit) == 0,
        false,
        true,
        flags.contains(Flags::C),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn znhc(flags: Flags) -> (bool, bool, bool, bool) {
        (
            flags.contains(Flags::Z),
            flags.contains(Flags::N),
            flags.contains(Flags::H),
            flags.contains(Flags::C),
        )
    }

    #[test]
    fn add_boundary_table() {
        // (a, b, carry_in, result, Z, N, H, C)
        let cases = [
            (0x00, 0x00, false, 0x00, true, false, false, false),
            (0x0F, 0x01, false, 0x10, false, false, true, false),
            (0xFF, 0x01, false, 0x00, true, false, true, true),
            (0xF0, 0x10, false, 0x00, true, false, false, true),
            (0x0F, 0x00, true, 0x10, false, false, true, false),
            (0xFF, 0x00, true, 0x00, true, false, true, true),
            (0x10, 0x10, false, 0x20, false, false, false, false),
        ];

        for (a, b, carry, result, z, n, h, c) in cases {
            let out = add8(a, b, carry);
            assert_eq!(out.value, result, "{a:#04x} + {b:#04x} + {carry}");
            assert_eq!(znhc(out.flags), (z, n, h, c), "{a:#04x} + {b:#04x} + {carry}");
        }
    }

    #[test]
    fn sub_boundary_table() {
        // (a, b, carry_in, result, Z, N, H, C)
        let cases = [
            (0x00, 0x00, false, 0x00, true, true, false, false),
            (0x00, 0x01, false, 0xFF, false, true, true, true),
            (0x10, 0x01, false, 0x0F, false, true, true, false),
            (0x10, 0x10, false, 0x00, true, true, false, false),
            (0xFF, 0xFF, false, 0x00, true, true, false, false),
            (0x0F, 0x0F, true, 0xFF, false, true, true, true),
            (0x10, 0x0F, true, 0x00, true, true, true, false),
            (0x00, 0xFF, true, 0x00, true, true, true, true),
        ];

        for (a, b, carry, result, z, n, h, c) in cases {
            let out = sub8(a, b, carry);
            assert_eq!(out.value, result, "{a:#04x} - {b:#04x} - {carry}");
            assert_eq!(znhc(out.flags), (z, n, h, c), "{a:#04x} - {b:#04x} - {carry}");
        }
    }

    #[test]
    fn sub_half_carry_depends_only_on_low_nibbles() {
        for a in 0..=0xFFu16 {
            for b in 0..=0xFFu16 {
                for carry in [false, true] {
                    let (a, b) = (a as u8, b as u8);
                    let expected = (a & 0x0F) < (b & 0x0F) + carry as u8;
                    let out = sub8(a, b, carry);
                    assert_eq!(
                        out.flags.contains(Flags::H),
                        expected,
                        "{a:#04x} - {b:#04x} - {carry}"
                    );
                    let cp = alu8(AluOp::Cp, a, b, carry);
                    if !carry {
                        assert_eq!(cp.flags, out.flags);
                    }
                }
            }
        }
    }

    #[test]
    fn sub_carry_matches_wide_borrow() {
        for a in 0..=0xFFu16 {
            for b in 0..=0xFFu16 {
                for carry in [false, true] {
                    let borrow = a < b + carry as u16;
                    let out = sub8(a as u8, b as u8, carry);
                    assert_eq!(out.flags.contains(Flags::C), borrow);
                    assert_eq!(out.value, (a as u8).wrapping_sub(b as u8).wrapping_sub(carry as u8));
                }
            }
        }
    }

    #[test]
    fn compare_keeps_accumulator() {
        let out = alu8(AluOp::Cp, 0x3C, 0x3C, true);
        assert_eq!(out.value, 0x3C);
        assert_eq!(znhc(out.flags), (true, true, false, false));

        let out = alu8(AluOp::Cp, 0x3C, 0x40, false);
        assert_eq!(out.value, 0x3C);
        assert_eq!(znhc(out.flags), (false, true, false, true));
    }

    #[test]
    fn logical_ops_use_fixed_flag_rules() {
        let and = alu8(AluOp::And, 0xF0, 0x0F, true);
        assert_eq!(and.value, 0x00);
        assert_eq!(znhc(and.flags), (true, false, true, false));

        let and = alu8(AluOp::And, 0xFF, 0xFF, false);
        assert_eq!(and.value, 0xFF);
        assert_eq!(znhc(and.flags), (false, false, true, false));

        let xor = alu8(AluOp::Xor, 0xFF, 0xFF, true);
        assert_eq!(xor.value, 0x00);
        assert_eq!(znhc(xor.flags), (true, false, false, false));

        let xor = alu8(AluOp::Xor, 0x0F, 0x10, true);
        assert_eq!(xor.value, 0x1F);
        assert_eq!(znhc(xor.flags), (false, false, false, false));

        let or = alu8(AluOp::Or, 0x00, 0x00, true);
        assert_eq!(znhc(or.flags), (true, false, false, false));

        let or = alu8(AluOp::Or, 0x00, 0x10, true);
        assert_eq!(or.value, 0x10);
        assert_eq!(znhc(or.flags), (false, false, false, false));
    }

    #[test]
    fn inc_dec_nibble_boundaries_preserve_carry() {
        let out = inc8(0x0F, Flags::C);
        assert_eq!(out.value, 0x10);
        assert_eq!(znhc(out.flags), (false, false, true, true));

        let out = inc8(0xFF, Flags::empty());
        assert_eq!(out.value, 0x00);
        assert_eq!(znhc(out.flags), (true, false, true, false));

        let out = inc8(0x00, Flags::N);
        assert_eq!(znhc(out.flags), (false, false, false, false));

        let out = dec8(0x10, Flags::empty());
        assert_eq!(out.value, 0x0F);
        assert_eq!(znhc(out.flags), (false, true, true, false));

        let out = dec8(0x01, Flags::C);
        assert_eq!(out.value, 0x00);
        assert_eq!(znhc(out.flags), (true, true, false, true));

        let out = dec8(0x00, Flags::empty());
        assert_eq!(out.value, 0xFF);
        assert_eq!(znhc(out.flags), (false, true, true, false));
    }

    #[test]
    fn add16_preserves_zero_and_tracks_bit_11_and_15() {
        let (value, flags) = add16(0x0FFF, 0x0001, Flags::Z | Flags::N);
        assert_eq!(value, 0x1000);
        assert_eq!(znhc(flags), (true, false, true, false));

        let (value, flags) = add16(0xFFFF, 0x0001, Flags::empty());
        assert_eq!(value, 0x0000);
        assert_eq!(znhc(flags), (false, false, true, true));
    }

    #[test]
    fn add16_signed_uses_low_byte_carries() {
        let (value, flags) = add16_signed(0xFFF8, 0x08);
        assert_eq!(value, 0x0000);
        assert_eq!(znhc(flags), (false, false, true, true));

        let (value, flags) = add16_signed(0x0000, 0xFF);
        assert_eq!(value, 0xFFFF);
        assert_eq!(znhc(flags), (false, false, false, false));
    }

    #[test]
    fn daa_corrects_bcd_addition_and_subtraction() {
        // 0x45 + 0x38 = 0x7D -> 0x83
        let sum = add8(0x45, 0x38, false);
        let adjusted = daa(sum.value, sum.flags);
        assert_eq!(adjusted.value, 0x83);
        assert!(!adjusted.flags.contains(Flags::C));

        // 0x99 + 0x01 = 0x9A -> 0x00 with carry
        let sum = add8(0x99, 0x01, false);
        let adjusted = daa(sum.value, sum.flags);
        assert_eq!(adjusted.value, 0x00);
        assert_eq!(znhc(adjusted.flags), (true, false, false, true));

        // 0x42 - 0x05 = 0x3D -> 0x37
        let diff = sub8(0x42, 0x05, false);
        let adjusted = daa(diff.value, diff.flags);
        assert_eq!(adjusted.value, 0x37);
        assert!(adjusted.flags.contains(Flags::N));
    }

    #[test]
    fn cpl_scf_ccf_flag_rules() {
        let out = cpl(0x35, Flags::Z | Flags::C);
        assert_eq!(out.value, 0xCA);
        assert_eq!(out.flags, Flags::all());

        assert_eq!(scf(Flags::N | Flags::H), Flags::C);
        assert_eq!(ccf(Flags::Z | Flags::C | Flags::H), Flags::Z);
        assert_eq!(ccf(Flags::empty()), Flags::C);
    }

    #[test]
    fn shifts_and_rotates() {
        assert_eq!(shift8(ShiftOp::Rlc, 0x85, false).value, 0x0B);
        assert!(shift8(ShiftOp::Rlc, 0x85, false).flags.contains(Flags::C));
        assert_eq!(shift8(ShiftOp::Rr, 0x01, true).value, 0x80);
        assert_eq!(shift8(ShiftOp::Sra, 0x81, false).value, 0xC0);
        assert_eq!(shift8(ShiftOp::Srl, 0x01, false).flags, Flags::Z | Flags::C);
        assert_eq!(shift8(ShiftOp::Swap, 0xF1, true).value, 0x1F);
        assert_eq!(shift8(ShiftOp::Swap, 0xF1, true).flags, Flags::empty());

        let out = rotate_a(ShiftOp::Rl, 0x80, false);
        assert_eq!(out.value, 0x00);
        assert_eq!(out.flags, Flags::C);
    }

    #[test]
    fn bit_test_preserves_carry() {
        assert_eq!(bit(0x80, 7, Flags::C), Flags::H | Flags::C);
        assert_eq!(bit(0x00, 0, Flags::empty()), Flags::Z | Flags::H);
    }
}
