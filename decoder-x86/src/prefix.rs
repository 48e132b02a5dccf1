//! Legacy prefix scanning and REX/VEX/EVEX prefix resolution.

use crate::opcode::{Mand, OpcodeMap};
use crate::Mode;

use bitflags::bitflags;
use decoder::{ErrorKind, Reader};

bitflags! {
    /// Legacy prefix groups observed before the opcode.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PrefixFlags: u8 {
        const LOCK         = 1 << 0;
        const REPNZ        = 1 << 1;
        const REPZ         = 1 << 2;
        const OPERAND_SIZE = 1 << 3;
        const ADDRESS_SIZE = 1 << 4;
    }
}

/// Segment-override selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    Es,
    Cs,
    Ss,
    Ds,
    Fs,
    Gs,
}

impl Segment {
    pub fn label(&self) -> &'static str {
        match self {
            Segment::Es => "es",
            Segment::Cs => "cs",
            Segment::Ss => "ss",
            Segment::Ds => "ds",
            Segment::Fs => "fs",
            Segment::Gs => "gs",
        }
    }
}

/// A 64-bit-mode REX prefix: four independent extension bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rex {
    bits: u8,
}

impl Rex {
    pub(crate) fn from_byte(byte: u8) -> Self {
        Self { bits: byte & 0b1111 }
    }

    /// Forces a 64-bit operand size.
    #[inline]
    pub fn w(&self) -> bool {
        self.bits & 0b1000 != 0
    }

    /// Extends the ModR/M reg field.
    #[inline]
    pub fn r(&self) -> bool {
        self.bits & 0b0100 != 0
    }

    /// Extends the SIB index field.
    #[inline]
    pub fn x(&self) -> bool {
        self.bits & 0b0010 != 0
    }

    /// Extends ModR/M r/m, SIB base, or an opcode-embedded register.
    #[inline]
    pub fn b(&self) -> bool {
        self.bits & 0b0001 != 0
    }
}

/// Vector register length carried by a VEX/EVEX prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorLength {
    L128,
    L256,
    L512,
}

impl VectorLength {
    pub fn bits(&self) -> u16 {
        match self {
            VectorLength::L128 => 128,
            VectorLength::L256 => 256,
            VectorLength::L512 => 512,
        }
    }
}

/// Fields shared by VEX and EVEX: implied opcode map, implied mandatory
/// prefix, inverted second-source selector, vector length and the
/// REX-equivalent extension bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vex {
    pub(crate) map: OpcodeMap,
    pub(crate) pp: Mand,
    vvvv: u8,
    length: VectorLength,
    w: bool,
    r: bool,
    x: bool,
    b: bool,
}

/// EVEX adds an opmask register, zeroing-vs-merging, broadcast and the
/// high-16 register extension bits on top of the VEX fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Evex {
    pub(crate) vex: Vex,
    rp: bool,
    vp: bool,
    mask: u8,
    zeroing: bool,
    broadcast: bool,
}

impl Evex {
    /// The opmask register index; 0 means "no masking".
    pub fn mask_reg(&self) -> u8 {
        self.mask
    }

    /// Zero masked-out destination elements instead of merging.
    pub fn zeroing(&self) -> bool {
        self.zeroing
    }

    pub fn broadcast(&self) -> bool {
        self.broadcast
    }

    /// The EVEX `R'` bit, extending ModR/M reg to five bits.
    pub fn rp(&self) -> bool {
        self.rp
    }
}

/// Exactly one of {no vector prefix, VEX, EVEX} is active per instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorPrefix {
    Vex(Vex),
    Evex(Evex),
}

impl VectorPrefix {
    fn vex(&self) -> &Vex {
        match self {
            VectorPrefix::Vex(vex) => vex,
            VectorPrefix::Evex(evex) => &evex.vex,
        }
    }

    pub(crate) fn map(&self) -> OpcodeMap {
        self.vex().map
    }

    pub(crate) fn pp(&self) -> Mand {
        self.vex().pp
    }

    /// The second-source register selector, already un-inverted. Five bits
    /// under EVEX, four under VEX.
    pub fn vvvv(&self) -> u8 {
        match self {
            VectorPrefix::Vex(vex) => vex.vvvv,
            VectorPrefix::Evex(evex) => {
                if evex.vp {
                    evex.vex.vvvv | 0b10000
                } else {
                    evex.vex.vvvv
                }
            }
        }
    }

    pub fn length(&self) -> VectorLength {
        self.vex().length
    }

    pub fn w(&self) -> bool {
        self.vex().w
    }

    pub fn r(&self) -> bool {
        self.vex().r
    }

    pub fn x(&self) -> bool {
        self.vex().x
    }

    pub fn b(&self) -> bool {
        self.vex().b
    }
}

/// Every prefix observed before the opcode: the legacy flag set, the
/// effective segment override, and the REX or vector prefix if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Prefixes {
    flags: PrefixFlags,
    segment: Option<Segment>,
    rex: Option<Rex>,
    vector: Option<VectorPrefix>,
}

impl Prefixes {
    fn new() -> Self {
        Self {
            flags: PrefixFlags::empty(),
            segment: None,
            rex: None,
            vector: None,
        }
    }

    pub fn lock(&self) -> bool {
        self.flags.contains(PrefixFlags::LOCK)
    }

    pub fn repz(&self) -> bool {
        self.flags.contains(PrefixFlags::REPZ)
    }

    pub fn repnz(&self) -> bool {
        self.flags.contains(PrefixFlags::REPNZ)
    }

    pub fn operand_size(&self) -> bool {
        self.flags.contains(PrefixFlags::OPERAND_SIZE)
    }

    pub fn address_size(&self) -> bool {
        self.flags.contains(PrefixFlags::ADDRESS_SIZE)
    }

    /// The effective (last observed) segment override.
    pub fn segment(&self) -> Option<Segment> {
        self.segment
    }

    pub fn rex(&self) -> Option<Rex> {
        self.rex
    }

    pub fn vector(&self) -> Option<&VectorPrefix> {
        self.vector.as_ref()
    }

    pub fn vex(&self) -> Option<&Vex> {
        match &self.vector {
            Some(VectorPrefix::Vex(vex)) => Some(vex),
            _ => None,
        }
    }

    pub fn evex(&self) -> Option<&Evex> {
        match &self.vector {
            Some(VectorPrefix::Evex(evex)) => Some(evex),
            _ => None,
        }
    }

    pub(crate) fn set_vector(&mut self, vector: VectorPrefix) {
        self.vector = Some(vector);
    }

    /// The mandatory prefix implied by the legacy flag set, for opcode maps
    /// where a repeat or operand-size byte is part of the opcode identity.
    pub(crate) fn mandatory(&self) -> Mand {
        if self.repz() {
            Mand::F3
        } else if self.repnz() {
            Mand::F2
        } else if self.operand_size() {
            Mand::P66
        } else {
            Mand::None
        }
    }
}

/// Consume the legacy prefix run (and a 64-bit-mode REX byte), leaving the
/// reader at the first escape or opcode byte.
///
/// A REX byte must immediately precede the opcode: any further prefix byte
/// after one is an invalid-prefix failure. Only the last prefix of a group
/// is effective, but every observed byte still counts toward instruction
/// length. No maximum prefix count is enforced here; total length is
/// bounded at assembly.
pub(crate) fn scan(reader: &mut Reader, mode: Mode) -> Result<Prefixes, ErrorKind> {
    let mut prefixes = Prefixes::new();

    loop {
        let byte = reader.peek().ok_or(ErrorKind::ExhaustedInput)?;

        let rex_byte = mode == Mode::Long && (0x40..=0x4f).contains(&byte);
        let legacy = matches!(
            byte,
            0xf0 | 0xf2 | 0xf3 | 0x26 | 0x2e | 0x36 | 0x3e | 0x64 | 0x65 | 0x66 | 0x67
        );

        if !rex_byte && !legacy {
            return Ok(prefixes);
        }

        if prefixes.rex.is_some() {
            // REX already seen and another prefix byte follows it
            reader.next();
            return Err(ErrorKind::InvalidPrefixes);
        }

        reader.next();

        if rex_byte {
            prefixes.rex = Some(Rex::from_byte(byte));
            continue;
        }

        match byte {
            0xf0 => prefixes.flags.insert(PrefixFlags::LOCK),
            // last of the repeat group wins
            0xf2 => {
                prefixes.flags.remove(PrefixFlags::REPZ);
                prefixes.flags.insert(PrefixFlags::REPNZ);
            }
            0xf3 => {
                prefixes.flags.remove(PrefixFlags::REPNZ);
                prefixes.flags.insert(PrefixFlags::REPZ);
            }
            0x26 => prefixes.segment = Some(Segment::Es),
            0x2e => prefixes.segment = Some(Segment::Cs),
            0x36 => prefixes.segment = Some(Segment::Ss),
            0x3e => prefixes.segment = Some(Segment::Ds),
            0x64 => prefixes.segment = Some(Segment::Fs),
            0x65 => prefixes.segment = Some(Segment::Gs),
            0x66 => prefixes.flags.insert(PrefixFlags::OPERAND_SIZE),
            0x67 => prefixes.flags.insert(PrefixFlags::ADDRESS_SIZE),
            _ => unreachable!("matched the legacy prefix set above"),
        }
    }
}

/// VEX/EVEX excludes REX, LOCK and the 66/F2/F3 prefixes; segment and
/// address-size overrides remain legal.
pub(crate) fn vector_excludes(prefixes: &Prefixes) -> Result<(), ErrorKind> {
    if prefixes.rex.is_some() {
        return Err(ErrorKind::InvalidPrefixes);
    }
    if prefixes
        .flags
        .intersects(PrefixFlags::LOCK | PrefixFlags::REPZ | PrefixFlags::REPNZ | PrefixFlags::OPERAND_SIZE)
    {
        return Err(ErrorKind::InvalidPrefixes);
    }
    Ok(())
}

fn pp_to_mand(pp: u8) -> Mand {
    match pp & 0b11 {
        0b00 => Mand::None,
        0b01 => Mand::P66,
        0b10 => Mand::F3,
        _ => Mand::F2,
    }
}

/// Decode the payload byte of a `c5` two-byte VEX escape.
pub(crate) fn two_byte_vex(payload: u8) -> Vex {
    Vex {
        map: OpcodeMap::F,
        pp: pp_to_mand(payload),
        vvvv: (payload >> 3 & 0b1111) ^ 0b1111,
        length: if payload & 0b100 != 0 {
            VectorLength::L256
        } else {
            VectorLength::L128
        },
        w: false,
        r: payload & 0x80 == 0,
        x: false,
        b: false,
    }
}

/// Decode the two payload bytes of a `c4` three-byte VEX escape.
pub(crate) fn three_byte_vex(byte2: u8, byte3: u8) -> Result<Vex, ErrorKind> {
    let map = match byte2 & 0b11111 {
        0b00001 => OpcodeMap::F,
        0b00010 => OpcodeMap::F38,
        0b00011 => OpcodeMap::F3A,
        // reserved map selector
        _ => return Err(ErrorKind::InvalidOpcode),
    };

    Ok(Vex {
        map,
        pp: pp_to_mand(byte3),
        vvvv: (byte3 >> 3 & 0b1111) ^ 0b1111,
        length: if byte3 & 0b100 != 0 {
            VectorLength::L256
        } else {
            VectorLength::L128
        },
        w: byte3 & 0x80 != 0,
        r: byte2 & 0x80 == 0,
        x: byte2 & 0x40 == 0,
        b: byte2 & 0x20 == 0,
    })
}

/// Decode the three payload bytes of a `62` EVEX escape.
pub(crate) fn evex(p0: u8, p1: u8, p2: u8) -> Result<Evex, ErrorKind> {
    let map = match p0 & 0b11 {
        0b01 => OpcodeMap::F,
        0b10 => OpcodeMap::F38,
        0b11 => OpcodeMap::F3A,
        _ => return Err(ErrorKind::InvalidOpcode),
    };

    // p0[3:2] and p1[2] are fixed by the encoding
    if p0 & 0b1100 != 0 || p1 & 0b100 == 0 {
        return Err(ErrorKind::InvalidPrefixes);
    }

    let length = match p2 >> 5 & 0b11 {
        0b00 => VectorLength::L128,
        0b01 => VectorLength::L256,
        0b10 => VectorLength::L512,
        // L'L = 11 only encodes a rounding context, which is not a length
        _ => return Err(ErrorKind::InvalidOperand),
    };

    Ok(Evex {
        vex: Vex {
            map,
            pp: pp_to_mand(p1),
            vvvv: (p1 >> 3 & 0b1111) ^ 0b1111,
            length,
            w: p1 & 0x80 != 0,
            r: p0 & 0x80 == 0,
            x: p0 & 0x40 == 0,
            b: p0 & 0x20 == 0,
        },
        rp: p0 & 0x10 == 0,
        vp: p2 & 0b1000 == 0,
        mask: p2 & 0b111,
        zeroing: p2 & 0x80 != 0,
        broadcast: p2 & 0x10 != 0,
    })
}
