//! Decoder for x86 and x86-64 machine code.
//!
//! Decoding walks the encoding front to back: the legacy prefix run (plus a
//! REX byte in 64-bit mode), opcode map selection including the `0f`
//! escapes and the VEX/EVEX prefixes, the ModR/M and SIB addressing bytes,
//! then displacement and immediate bytes, each operand resolved from the
//! opcode's declared descriptor templates. The same pipeline serves all
//! three decode modes; mode-dependent behaviour lives in the prefix scan,
//! the tables and the size resolver rather than in separate code paths.
//!
//! ```
//! use decoder::{Decodable, Decoded, Reader};
//! use x86::{Decoder, Mode};
//!
//! let mut reader = Reader::new(&[0x48, 0xc7, 0xc0, 0x05, 0x00, 0x00, 0x00]);
//! let inst = Decoder::new(Mode::Long).decode(&mut reader).unwrap();
//! assert_eq!(inst.to_string(), "mov rax, 0x5");
//! assert_eq!(inst.len(), 7);
//! ```

mod display;
mod modrm;
mod opcode;
mod operand;
mod prefix;
mod size;

#[cfg(test)]
mod tests;

pub use opcode::{Opcode, OpcodeMap};
pub use operand::{MemoryRef, Operand, RegClass, Register, Scale};
pub use prefix::{Evex, Prefixes, Rex, Segment, VectorLength, VectorPrefix, Vex};
pub use size::{OpSizeRule, Sizes};

use modrm::ModRm;
use opcode::Entry;
use operand::{Addressing, Desc, OperandCtx};

use decoder::{Decodable, Decoded, Error, ErrorKind, Reader, Streamable};

use std::hash::{Hash, Hasher};

/// Longest legal instruction, prefixes included.
pub const MAX_INSTRUCTION_BYTES: usize = 15;

/// Processor decode mode. Selects default sizes, which encodings exist
/// (REX, `movsxd` vs `arpl`) and which are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// 16-bit real mode.
    Real,
    /// 32-bit protected mode.
    Protected,
    /// 64-bit long mode.
    Long,
}

/// A reusable, stateless decoder for one [`Mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoder {
    mode: Mode,
}

impl Decoder {
    pub fn new(mode: Mode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(Mode::Long)
    }
}

/// One decoded instruction.
///
/// Equality and hashing cover what the instruction *is*, not how long its
/// encoding happened to be; alternate encodings of the same operation
/// (`89 d8` and `8b c3` both decode to `mov eax, ebx`) compare equal.
#[derive(Debug, Clone, Copy)]
pub struct Instruction {
    prefixes: Prefixes,
    opcode: Opcode,
    operands: [Operand; 4],
    operand_count: u8,
    sizes: Sizes,
    length: u8,
}

impl Instruction {
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn prefixes(&self) -> &Prefixes {
        &self.prefixes
    }

    /// The live operands, in Intel order.
    pub fn operands(&self) -> &[Operand] {
        &self.operands[..self.operand_count as usize]
    }

    /// The effective sizes this instruction decoded under.
    pub fn sizes(&self) -> &Sizes {
        &self.sizes
    }
}

impl PartialEq for Instruction {
    fn eq(&self, other: &Self) -> bool {
        self.opcode == other.opcode
            && self.prefixes == other.prefixes
            && self.operands == other.operands
            && self.operand_count == other.operand_count
            && self.sizes == other.sizes
    }
}

impl Eq for Instruction {}

impl Hash for Instruction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.opcode.hash(state);
        self.prefixes.hash(state);
        self.operands.hash(state);
        self.operand_count.hash(state);
        self.sizes.hash(state);
    }
}

impl Decoded for Instruction {
    fn len(&self) -> usize {
        self.length as usize
    }

    fn is_call(&self) -> bool {
        matches!(self.opcode, Opcode::CALL | Opcode::CALLF)
    }

    fn is_ret(&self) -> bool {
        matches!(
            self.opcode,
            Opcode::RETURN | Opcode::RETF | Opcode::IRET | Opcode::IRETD | Opcode::IRETQ
        )
    }

    fn is_jump(&self) -> bool {
        matches!(
            self.opcode,
            Opcode::JMP
                | Opcode::JMPF
                | Opcode::JO
                | Opcode::JNO
                | Opcode::JB
                | Opcode::JNB
                | Opcode::JZ
                | Opcode::JNZ
                | Opcode::JNA
                | Opcode::JA
                | Opcode::JS
                | Opcode::JNS
                | Opcode::JP
                | Opcode::JNP
                | Opcode::JL
                | Opcode::JGE
                | Opcode::JLE
                | Opcode::JG
                | Opcode::LOOP
                | Opcode::LOOPZ
                | Opcode::LOOPNZ
                | Opcode::JCXZ
                | Opcode::JECXZ
                | Opcode::JRCXZ
        )
    }
}

impl Decodable for Decoder {
    type Instruction = Instruction;

    fn decode(&self, reader: &mut Reader) -> Result<Instruction, Error> {
        reader.mark();
        let result = decode_inner(self.mode, reader);
        let size = reader.offset();
        match result {
            Ok(mut inst) => {
                if size > MAX_INSTRUCTION_BYTES {
                    return Err(Error::new(ErrorKind::TooLong, size));
                }
                inst.length = size as u8;
                Ok(inst)
            }
            Err(kind) => Err(Error::new(kind, size)),
        }
    }

    fn max_width(&self) -> usize {
        MAX_INSTRUCTION_BYTES
    }
}

/// In 64-bit mode `c4`/`c5`/`62` are always vector escapes. In the legacy
/// modes they collide with `les`/`lds`/`bound`, whose ModR/M can never have
/// mod = 11; a would-be payload byte with its top two bits set selects the
/// vector reading.
fn is_vector_escape(mode: Mode, reader: &Reader) -> bool {
    if mode == Mode::Long {
        return true;
    }
    matches!(reader.peek(), Some(byte) if byte >> 6 == 0b11)
}

fn next_byte(reader: &mut Reader) -> Result<u8, ErrorKind> {
    reader.next().ok_or(ErrorKind::ExhaustedInput)
}

fn decode_inner(mode: Mode, reader: &mut Reader) -> Result<Instruction, ErrorKind> {
    let mut prefixes = prefix::scan(reader, mode)?;
    let first = next_byte(reader)?;

    // select the opcode map, folding in a vector prefix if one is present
    let (entry_map, opcode_byte, mand) = match first {
        0xc5 if is_vector_escape(mode, reader) => {
            prefix::vector_excludes(&prefixes)?;
            let payload = next_byte(reader)?;
            let vex = prefix::two_byte_vex(payload);
            prefixes.set_vector(VectorPrefix::Vex(vex));
            let vp = prefixes.vector().expect("vector prefix was just set");
            (None, next_byte(reader)?, vp.pp())
        }
        0xc4 if is_vector_escape(mode, reader) => {
            prefix::vector_excludes(&prefixes)?;
            let byte2 = next_byte(reader)?;
            let byte3 = next_byte(reader)?;
            let vex = prefix::three_byte_vex(byte2, byte3)?;
            prefixes.set_vector(VectorPrefix::Vex(vex));
            let vp = prefixes.vector().expect("vector prefix was just set");
            (None, next_byte(reader)?, vp.pp())
        }
        0x62 if is_vector_escape(mode, reader) => {
            prefix::vector_excludes(&prefixes)?;
            let p0 = next_byte(reader)?;
            let p1 = next_byte(reader)?;
            let p2 = next_byte(reader)?;
            let evex = prefix::evex(p0, p1, p2)?;
            prefixes.set_vector(VectorPrefix::Evex(evex));
            let vp = prefixes.vector().expect("vector prefix was just set");
            (None, next_byte(reader)?, vp.pp())
        }
        0x0f => {
            let second = next_byte(reader)?;
            match second {
                0x38 => (Some(OpcodeMap::F38), next_byte(reader)?, prefixes.mandatory()),
                0x3a => (Some(OpcodeMap::F3A), next_byte(reader)?, prefixes.mandatory()),
                _ => (Some(OpcodeMap::F), second, prefixes.mandatory()),
            }
        }
        _ => (Some(OpcodeMap::Primary), first, prefixes.mandatory()),
    };

    let mut entry = match entry_map {
        Some(map) => opcode::lookup(map, opcode_byte, mand, mode),
        None => {
            let vp = prefixes.vector().expect("vector path always sets one");
            opcode::vex_entry(vp.map(), opcode_byte, mand, vp.length(), vp.w())
        }
    };

    // group opcodes fold ModR/M.reg into opcode identity; the byte is read
    // once and shared with addressing-form decode
    let mut modrm: Option<ModRm> = None;
    if let Entry::Group(group) = entry {
        let byte = ModRm::from_byte(next_byte(reader)?);
        modrm = Some(byte);
        entry = opcode::group_entry(group, byte, mand, &prefixes);
    }

    let def = match entry {
        Entry::Def(def) => def,
        Entry::Invalid => return Err(ErrorKind::InvalidOpcode),
        Entry::Group(_) => unreachable!("groups resolve to a def or invalid"),
    };

    let mut sizes = size::resolve(mode, &prefixes, def.rule)?;

    if modrm.is_none() && needs_modrm(def.operands) {
        modrm = Some(ModRm::from_byte(next_byte(reader)?));
    }

    let form = match modrm {
        Some(byte) if needs_form(def.operands) => Some(modrm::decode_form(
            reader,
            byte,
            mode,
            size::address_bits(mode, &prefixes),
            &prefixes,
        )?),
        _ => None,
    };

    let mut operands = [Operand::Nothing; 4];
    let mut operand_count = 0u8;
    {
        let mut ctx = OperandCtx {
            prefixes: &prefixes,
            modrm,
            form: form.as_ref(),
            sizes,
            reader,
        };
        for (slot, desc) in operands.iter_mut().zip(def.operands) {
            *slot = operand::materialize(&mut ctx, *desc)?;
            operand_count += 1;
        }
    }

    // the width of the instruction's memory access, if it makes one
    for operand in &operands[..operand_count as usize] {
        if let Operand::Memory(mem) = operand {
            sizes.memory = mem.size;
            break;
        }
    }

    Ok(Instruction {
        prefixes,
        opcode: fix_size_alias(def.opcode, &sizes),
        operands,
        operand_count,
        sizes,
        length: 0,
    })
}

fn needs_modrm(descs: &[Desc]) -> bool {
    descs.iter().any(|desc| {
        matches!(
            desc,
            Desc::M(
                Addressing::E
                    | Addressing::G
                    | Addressing::M
                    | Addressing::R
                    | Addressing::S
                    | Addressing::C
                    | Addressing::D
                    | Addressing::V
                    | Addressing::W
                    | Addressing::U
                    | Addressing::P
                    | Addressing::Q
                    | Addressing::N,
                _,
            )
        )
    })
}

/// Whether any operand reads through ModR/M's mod/rm half (and so may pull
/// in SIB and displacement bytes).
fn needs_form(descs: &[Desc]) -> bool {
    descs.iter().any(|desc| {
        matches!(
            desc,
            Desc::M(
                Addressing::E
                    | Addressing::M
                    | Addressing::R
                    | Addressing::W
                    | Addressing::U
                    | Addressing::Q
                    | Addressing::N,
                _,
            )
        )
    })
}

/// A handful of mnemonics change name, not behaviour shape, with the
/// effective size.
fn fix_size_alias(opcode: Opcode, sizes: &Sizes) -> Opcode {
    match opcode {
        Opcode::CBW => match sizes.operand {
            16 => Opcode::CBW,
            32 => Opcode::CWDE,
            _ => Opcode::CDQE,
        },
        Opcode::CWD => match sizes.operand {
            16 => Opcode::CWD,
            32 => Opcode::CDQ,
            _ => Opcode::CQO,
        },
        Opcode::IRET => match sizes.operand {
            16 => Opcode::IRET,
            32 => Opcode::IRETD,
            _ => Opcode::IRETQ,
        },
        Opcode::JRCXZ => match sizes.address {
            16 => Opcode::JCXZ,
            32 => Opcode::JECXZ,
            _ => Opcode::JRCXZ,
        },
        other => other,
    }
}

/// Linear sweep over a byte region. A failed decode yields the error, then
/// resumes one byte past where the failing instruction began.
pub struct Stream<'data> {
    bytes: &'data [u8],
    offset: usize,
    decoder: Decoder,
}

impl<'data> Stream<'data> {
    pub fn new(bytes: &'data [u8], decoder: Decoder) -> Self {
        Self {
            bytes,
            offset: 0,
            decoder,
        }
    }

    /// Offset of the next undecoded byte.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl Streamable for Stream<'_> {
    type Item = Instruction;
    type Error = Error;

    fn next(&mut self) -> Option<Result<Instruction, Error>> {
        if self.offset >= self.bytes.len() {
            return None;
        }
        let mut reader = Reader::new(&self.bytes[self.offset..]);
        match self.decoder.decode(&mut reader) {
            Ok(inst) => {
                self.offset += inst.len();
                Some(Ok(inst))
            }
            Err(err) => {
                self.offset += 1;
                Some(Err(err))
            }
        }
    }
}
