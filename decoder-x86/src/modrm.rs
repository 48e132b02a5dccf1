//! ModR/M and SIB decoding into addressing forms.

use crate::operand::{read_unsigned, sign_extend, Register, RegClass, Scale};
use crate::prefix::Prefixes;
use crate::Mode;

use decoder::{ErrorKind, Reader};

/// The addressing-form byte: mod (2 bits), reg (3 bits), rm (3 bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ModRm {
    byte: u8,
}

impl ModRm {
    pub(crate) fn from_byte(byte: u8) -> Self {
        Self { byte }
    }

    #[inline]
    pub(crate) fn mod_(&self) -> u8 {
        self.byte >> 6
    }

    #[inline]
    pub(crate) fn reg(&self) -> u8 {
        self.byte >> 3 & 0b111
    }

    #[inline]
    pub(crate) fn rm(&self) -> u8 {
        self.byte & 0b111
    }
}

/// A memory addressing form: any of base, scaled index and displacement may
/// be absent, but never all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MemForm {
    pub base: Option<Register>,
    pub index: Option<(Register, Scale)>,
    pub disp: Option<i64>,
}

/// Exactly one of register-direct or a memory form; never partially filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AddressingForm {
    /// The 4-bit (5 under EVEX) register number selected by rm.
    RegisterDirect(u8),
    Memory(MemForm),
}

/// Decode the addressing form for an already-read ModR/M byte, consuming
/// the SIB and displacement bytes it implies.
pub(crate) fn decode_form(
    reader: &mut Reader,
    modrm: ModRm,
    mode: Mode,
    addr_bits: u16,
    prefixes: &Prefixes,
) -> Result<AddressingForm, ErrorKind> {
    let (ext_b, ext_x) = extension_bits(prefixes);

    if modrm.mod_() == 0b11 {
        let mut num = modrm.rm() | ext_b;
        // EVEX reuses X to select vector registers 16..=31 in the rm field
        if prefixes.evex().is_some() {
            if let Some(vp) = prefixes.vector() {
                if vp.x() {
                    num |= 0b10000;
                }
            }
        }
        return Ok(AddressingForm::RegisterDirect(num));
    }

    match addr_bits {
        16 => form_16bit(reader, modrm),
        32 | 64 => form_sib_modes(reader, modrm, mode, addr_bits, ext_b, ext_x),
        _ => unreachable!("address size is 16, 32 or 64"),
    }
}

fn extension_bits(prefixes: &Prefixes) -> (u8, u8) {
    if let Some(rex) = prefixes.rex() {
        (if rex.b() { 8 } else { 0 }, if rex.x() { 8 } else { 0 })
    } else if let Some(vp) = prefixes.vector() {
        (if vp.b() { 8 } else { 0 }, if vp.x() { 8 } else { 0 })
    } else {
        (0, 0)
    }
}

/// The 16-bit addressing table: fixed base/index pairs, no SIB.
fn form_16bit(reader: &mut Reader, modrm: ModRm) -> Result<AddressingForm, ErrorKind> {
    let w = |num| Register::new(RegClass::W, num);
    // bx+si, bx+di, bp+si, bp+di, si, di, bp, bx
    let (base, index) = match modrm.rm() {
        0 => (Some(w(3)), Some(w(6))),
        1 => (Some(w(3)), Some(w(7))),
        2 => (Some(w(5)), Some(w(6))),
        3 => (Some(w(5)), Some(w(7))),
        4 => (Some(w(6)), None),
        5 => (Some(w(7)), None),
        6 => (Some(w(5)), None),
        7 => (Some(w(3)), None),
        _ => unreachable!("rm is three bits"),
    };

    let (base, disp) = match (modrm.mod_(), modrm.rm()) {
        // the reserved base-absent encoding: disp16 only
        (0b00, 6) => (None, Some(read_disp(reader, 2)?)),
        (0b00, _) => (base, None),
        (0b01, _) => (base, Some(read_disp(reader, 1)?)),
        (0b10, _) => (base, Some(read_disp(reader, 2)?)),
        _ => unreachable!("register-direct handled by the caller"),
    };

    Ok(AddressingForm::Memory(MemForm {
        base,
        index: index.map(|reg| (reg, Scale::X1)),
        disp,
    }))
}

fn form_sib_modes(
    reader: &mut Reader,
    modrm: ModRm,
    mode: Mode,
    addr_bits: u16,
    ext_b: u8,
    ext_x: u8,
) -> Result<AddressingForm, ErrorKind> {
    let class = if addr_bits == 64 { RegClass::Q } else { RegClass::D };

    if modrm.rm() == 0b100 {
        return read_sib(reader, modrm, class, ext_b, ext_x);
    }

    if modrm.rm() == 0b101 && modrm.mod_() == 0b00 {
        let disp = read_disp(reader, 4)?;
        // in 64-bit mode the base-absent encoding is rip-relative instead
        let base = (mode == Mode::Long).then_some(Register::RIP);
        return Ok(AddressingForm::Memory(MemForm {
            base,
            index: None,
            disp: Some(disp),
        }));
    }

    let base = Register::new(class, modrm.rm() | ext_b);
    let disp = match modrm.mod_() {
        0b00 => None,
        0b01 => Some(read_disp(reader, 1)?),
        0b10 => Some(read_disp(reader, 4)?),
        _ => unreachable!("register-direct handled by the caller"),
    };

    Ok(AddressingForm::Memory(MemForm {
        base: Some(base),
        index: None,
        disp,
    }))
}

fn read_sib(
    reader: &mut Reader,
    modrm: ModRm,
    class: RegClass,
    ext_b: u8,
    ext_x: u8,
) -> Result<AddressingForm, ErrorKind> {
    let sib = reader.next().ok_or(ErrorKind::ExhaustedInput)?;
    let scale = Scale::from_bits(sib >> 6);
    let index_bits = sib >> 3 & 0b111;
    let base_bits = sib & 0b111;

    // index 100 without an extension bit is the index-absent encoding
    let index = if index_bits == 0b100 && ext_x == 0 {
        None
    } else {
        Some((Register::new(class, index_bits | ext_x), scale))
    };

    let (base, disp) = if base_bits == 0b101 && modrm.mod_() == 0b00 {
        // the base-absent encoding carries a dword displacement
        (None, Some(read_disp(reader, 4)?))
    } else {
        let base = Some(Register::new(class, base_bits | ext_b));
        let disp = match modrm.mod_() {
            0b00 => None,
            0b01 => Some(read_disp(reader, 1)?),
            0b10 => Some(read_disp(reader, 4)?),
            _ => unreachable!("register-direct handled by the caller"),
        };
        (base, disp)
    };

    Ok(AddressingForm::Memory(MemForm { base, index, disp }))
}

fn read_disp(reader: &mut Reader, width: u8) -> Result<i64, ErrorKind> {
    let raw = read_unsigned(reader, width)?;
    Ok(sign_extend(raw, width))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefix;

    fn no_prefixes(mode: Mode) -> Prefixes {
        let mut reader = Reader::new(&[0x90]);
        prefix::scan(&mut reader, mode).unwrap()
    }

    /// Every (mod, rm) pair in every address-size table resolves to
    /// exactly one complete form: register-direct only under mod 11, and
    /// a memory form with at least one of base, index or displacement.
    #[test]
    fn every_mod_rm_pair_yields_a_complete_form() {
        let tables = [
            (Mode::Real, 16u16),
            (Mode::Protected, 32),
            (Mode::Long, 64),
        ];
        for (mode, addr_bits) in tables {
            let prefixes = no_prefixes(mode);
            for mod_ in 0..4u8 {
                for rm in 0..8u8 {
                    let modrm = ModRm::from_byte(mod_ << 6 | rm);
                    // enough trailing bytes for any SIB + displacement
                    let mut reader = Reader::new(&[0x00; 8]);
                    let form = decode_form(&mut reader, modrm, mode, addr_bits, &prefixes)
                        .unwrap_or_else(|err| {
                            panic!("mod {mod_} rm {rm} at {addr_bits} bits: {err:?}")
                        });
                    match form {
                        AddressingForm::RegisterDirect(_) => assert_eq!(mod_, 0b11),
                        AddressingForm::Memory(mem) => {
                            assert_ne!(mod_, 0b11);
                            assert!(
                                mem.base.is_some()
                                    || mem.index.is_some()
                                    || mem.disp.is_some(),
                                "mod {mod_} rm {rm} at {addr_bits} bits is empty"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn sib_base_absent_still_carries_displacement() {
        let prefixes = no_prefixes(Mode::Long);
        // mod 00, rm 100, sib base 101: dword displacement, no base
        let mut reader = Reader::new(&[0x25, 0x78, 0x56, 0x34, 0x12]);
        let modrm = ModRm::from_byte(0x04);
        let form = decode_form(&mut reader, modrm, Mode::Long, 64, &prefixes).unwrap();
        match form {
            AddressingForm::Memory(mem) => {
                assert_eq!(mem.base, None);
                assert_eq!(mem.index, None);
                assert_eq!(mem.disp, Some(0x12345678));
            }
            other => panic!("unexpected form: {other:?}"),
        }
    }
}
