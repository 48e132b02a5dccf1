//! Operand descriptor templates and their resolution into concrete operands.
//!
//! A [`Desc`] describes a *family* of operands an opcode accepts ("general
//! register or memory, operand-sized"); an [`Operand`] is always concrete.
//! The two are deliberately separate types.

use crate::modrm::AddressingForm;
use crate::prefix::{Prefixes, Segment};
use crate::size::Sizes;

use decoder::{ErrorKind, Reader};

/// An x86 register: its number and the register file it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Register {
    num: u8,
    class: RegClass,
}

/// Register files. `B` is the legacy byte file (`ah`..`bh` for 4..=7), `RB`
/// the byte file as renamed by the mere presence of a REX prefix
/// (`spl`..`dil`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegClass {
    B,
    RB,
    W,
    D,
    Q,
    Seg,
    St,
    Mm,
    X,
    Y,
    Z,
    K,
    Cr,
    Dr,
    Rip,
    Eip,
}

impl Register {
    pub const fn new(class: RegClass, num: u8) -> Self {
        Self { num, class }
    }

    pub fn num(&self) -> u8 {
        self.num
    }

    pub fn class(&self) -> RegClass {
        self.class
    }

    /// The name used to render this register in an instruction.
    pub fn name(&self) -> &'static str {
        crate::display::register_label(self)
    }

    pub const AL: Register = Register::new(RegClass::B, 0);
    pub const CL: Register = Register::new(RegClass::B, 1);
    pub const AX: Register = Register::new(RegClass::W, 0);
    pub const DX: Register = Register::new(RegClass::W, 2);
    pub const ES: Register = Register::new(RegClass::Seg, 0);
    pub const CS: Register = Register::new(RegClass::Seg, 1);
    pub const SS: Register = Register::new(RegClass::Seg, 2);
    pub const DS: Register = Register::new(RegClass::Seg, 3);
    pub const FS: Register = Register::new(RegClass::Seg, 4);
    pub const GS: Register = Register::new(RegClass::Seg, 5);
    pub const ST0: Register = Register::new(RegClass::St, 0);
    pub const RIP: Register = Register::new(RegClass::Rip, 0);
    pub const EIP: Register = Register::new(RegClass::Eip, 0);
}

/// An index-register scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scale {
    X1,
    X2,
    X4,
    X8,
}

impl Scale {
    pub(crate) fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Scale::X1,
            0b01 => Scale::X2,
            0b10 => Scale::X4,
            _ => Scale::X8,
        }
    }

    pub fn factor(&self) -> u8 {
        match self {
            Scale::X1 => 1,
            Scale::X2 => 2,
            Scale::X4 => 4,
            Scale::X8 => 8,
        }
    }
}

/// A concrete memory reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryRef {
    /// Segment override observed in the prefix run, if any.
    pub segment: Option<Segment>,
    pub base: Option<Register>,
    pub index: Option<(Register, Scale)>,
    pub disp: Option<i64>,
    /// Access width in bytes; 0 when the instruction doesn't size the
    /// access (`lea`).
    pub size: u8,
}

/// A fully resolved operand. Always concrete, unlike [`Desc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    /// Filler for unused slots in an instruction's operand array; never
    /// part of the live operand slice.
    Nothing,
    Register(Register),
    Memory(MemoryRef),
    /// A direct far address: 16-bit segment selector plus offset.
    Direct {
        selector: u16,
        offset: u64,
        /// Offset width in bits.
        size: u8,
    },
    Immediate {
        value: i64,
        /// Width the value was read at, in bits.
        width: u8,
    },
}

/// Addressing methods, after the instruction-set manual's abbreviations.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Addressing {
    /// ModR/M r/m: general register or memory.
    E,
    /// ModR/M reg: general register.
    G,
    /// ModR/M r/m: memory only.
    M,
    /// ModR/M r/m: general register only.
    R,
    /// ModR/M reg: segment register.
    S,
    /// ModR/M reg: control register.
    C,
    /// ModR/M reg: debug register.
    D,
    /// ModR/M reg: vector register.
    V,
    /// ModR/M r/m: vector register or memory.
    W,
    /// ModR/M r/m: vector register only.
    U,
    /// ModR/M reg: mmx register.
    P,
    /// ModR/M r/m: mmx register or memory.
    Q,
    /// ModR/M r/m: mmx register only.
    N,
    /// VEX/EVEX vvvv: vector register.
    H,
    /// VEX vvvv: general register.
    B,
    /// Immediate.
    I,
    /// Relative branch offset.
    J,
    /// Direct offset (`moffs`), address-size wide.
    O,
    /// Direct far address: selector and offset follow the opcode.
    A,
    /// String source, memory at `ds:[rsi]`.
    X,
    /// String destination, memory at `es:[rdi]`.
    Y,
}

/// Operand size classes, after the instruction-set manual's abbreviations.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SizeCode {
    /// Byte.
    B,
    /// Word.
    W,
    /// Doubleword.
    D,
    /// Quadword.
    Q,
    /// Double quadword.
    Dq,
    /// Word, doubleword or quadword by effective operand size.
    V,
    /// Word or doubleword by effective operand size (capped at 32).
    Z,
    /// Doubleword or quadword by effective operand size.
    Y,
    /// Far pointer: 16-bit selector + operand-size offset.
    P,
    /// Vector-length sized.
    X,
    /// Ten-byte x87 extended precision.
    T,
    /// Unsized (`lea`).
    None,
}

/// Which extension bit widens a register-group code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Ext {
    None,
    RexB,
}

/// Register groups selectable by a 3-bit code plus an extension attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RegGroup {
    Byte,
    OpSize,
    X87,
}

/// An operand descriptor: the per-opcode *template* an operand is resolved
/// from. Kept distinct from [`Operand`] on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Desc {
    /// Generic (addressing-method, size-class) pair.
    M(Addressing, SizeCode),
    /// One fixed register.
    Reg(Register),
    /// Register-group selector: 3-bit code widened by `Ext`.
    Grp(RegGroup, u8, Ext),
    /// The implicit immediate 1.
    One,
}

pub(crate) struct OperandCtx<'a, 'data> {
    pub prefixes: &'a Prefixes,
    pub modrm: Option<crate::modrm::ModRm>,
    pub form: Option<&'a AddressingForm>,
    pub sizes: Sizes,
    pub reader: &'a mut Reader<'data>,
}

impl OperandCtx<'_, '_> {
    fn rex_b(&self) -> u8 {
        match self.prefixes.rex() {
            Some(rex) if rex.b() => 8,
            _ => match self.prefixes.vector() {
                Some(vp) if vp.b() => 8,
                _ => 0,
            },
        }
    }

    fn rex_r(&self) -> u8 {
        match self.prefixes.rex() {
            Some(rex) if rex.r() => 8,
            _ => match self.prefixes.vector() {
                Some(vp) if vp.r() => 8,
                _ => 0,
            },
        }
    }

    fn rex_present(&self) -> bool {
        self.prefixes.rex().is_some()
    }

    fn vector_bits(&self) -> u16 {
        self.prefixes
            .vector()
            .map(|vp| vp.length().bits())
            .unwrap_or(128)
    }

    fn modrm(&self) -> crate::modrm::ModRm {
        // operands needing modrm only appear in defs the driver read it for
        self.modrm.expect("operand requires a modrm byte")
    }
}

/// Resolve one descriptor into a concrete operand, in declared order.
///
/// Immediate bytes are consumed here, after displacement bytes, matching
/// the encoding order on the wire.
pub(crate) fn materialize(ctx: &mut OperandCtx, desc: Desc) -> Result<Operand, ErrorKind> {
    match desc {
        Desc::One => Ok(Operand::Immediate { value: 1, width: 8 }),
        Desc::Reg(reg) => Ok(Operand::Register(reg)),
        Desc::Grp(group, code, ext) => {
            let num = match ext {
                Ext::None => code,
                Ext::RexB => code | ctx.rex_b(),
            };
            let reg = match group {
                RegGroup::Byte => byte_reg(num, ctx.rex_present()),
                RegGroup::OpSize => gpr(num, ctx.sizes.operand, ctx.rex_present()),
                RegGroup::X87 => Register::new(RegClass::St, num & 0b111),
            };
            Ok(Operand::Register(reg))
        }
        Desc::M(method, size) => materialize_generic(ctx, method, size),
    }
}

fn materialize_generic(
    ctx: &mut OperandCtx,
    method: Addressing,
    size: SizeCode,
) -> Result<Operand, ErrorKind> {
    match method {
        Addressing::E => match ctx.form {
            Some(AddressingForm::RegisterDirect(num)) => {
                Ok(Operand::Register(sized_gpr(ctx, *num, size)))
            }
            Some(AddressingForm::Memory(mem)) => Ok(memory(ctx, mem, size)),
            None => Err(ErrorKind::InvalidOperand),
        },
        Addressing::M => match ctx.form {
            Some(AddressingForm::Memory(mem)) => Ok(memory(ctx, mem, size)),
            _ => Err(ErrorKind::InvalidOperand),
        },
        Addressing::R => match ctx.form {
            Some(AddressingForm::RegisterDirect(num)) => {
                Ok(Operand::Register(sized_gpr(ctx, *num, size)))
            }
            _ => Err(ErrorKind::InvalidOperand),
        },
        Addressing::G => {
            let num = ctx.modrm().reg() | ctx.rex_r();
            Ok(Operand::Register(sized_gpr(ctx, num, size)))
        }
        Addressing::S => {
            let num = ctx.modrm().reg();
            if num > 5 {
                return Err(ErrorKind::InvalidOperand);
            }
            Ok(Operand::Register(Register::new(RegClass::Seg, num)))
        }
        Addressing::C => {
            let num = ctx.modrm().reg() | ctx.rex_r();
            Ok(Operand::Register(Register::new(RegClass::Cr, num)))
        }
        Addressing::D => {
            let num = ctx.modrm().reg() | ctx.rex_r();
            Ok(Operand::Register(Register::new(RegClass::Dr, num)))
        }
        Addressing::V => {
            let mut num = ctx.modrm().reg() | ctx.rex_r();
            if let Some(evex) = ctx.prefixes.evex() {
                if evex.rp() {
                    num |= 0b10000;
                }
            }
            Ok(Operand::Register(vector_reg(num, ctx.vector_bits())))
        }
        Addressing::W => match ctx.form {
            Some(AddressingForm::RegisterDirect(num)) => {
                Ok(Operand::Register(vector_reg(*num, ctx.vector_bits())))
            }
            Some(AddressingForm::Memory(mem)) => Ok(memory(ctx, mem, size)),
            None => Err(ErrorKind::InvalidOperand),
        },
        Addressing::U => match ctx.form {
            Some(AddressingForm::RegisterDirect(num)) => {
                Ok(Operand::Register(vector_reg(*num, ctx.vector_bits())))
            }
            _ => Err(ErrorKind::InvalidOperand),
        },
        Addressing::P => {
            let num = ctx.modrm().reg() & 0b111;
            Ok(Operand::Register(Register::new(RegClass::Mm, num)))
        }
        Addressing::Q => match ctx.form {
            Some(AddressingForm::RegisterDirect(num)) => {
                Ok(Operand::Register(Register::new(RegClass::Mm, num & 0b111)))
            }
            Some(AddressingForm::Memory(mem)) => Ok(memory(ctx, mem, size)),
            None => Err(ErrorKind::InvalidOperand),
        },
        Addressing::N => match ctx.form {
            Some(AddressingForm::RegisterDirect(num)) => {
                Ok(Operand::Register(Register::new(RegClass::Mm, num & 0b111)))
            }
            _ => Err(ErrorKind::InvalidOperand),
        },
        Addressing::H => {
            let vp = ctx.prefixes.vector().ok_or(ErrorKind::InvalidOperand)?;
            Ok(Operand::Register(vector_reg(vp.vvvv(), ctx.vector_bits())))
        }
        Addressing::B => {
            let vp = ctx.prefixes.vector().ok_or(ErrorKind::InvalidOperand)?;
            Ok(Operand::Register(sized_gpr_num(
                ctx,
                vp.vvvv() & 0b1111,
                size,
            )))
        }
        Addressing::I => immediate(ctx, size, false),
        Addressing::J => immediate(ctx, size, true),
        Addressing::O => {
            let width = (ctx.sizes.address / 8) as u8;
            let offset = read_unsigned(ctx.reader, width)? as i64;
            Ok(Operand::Memory(MemoryRef {
                segment: ctx.prefixes.segment(),
                base: None,
                index: None,
                disp: Some(offset),
                size: mem_bytes(ctx, size),
            }))
        }
        Addressing::A => {
            // offset first, selector second on the wire
            let width = if ctx.sizes.operand == 16 { 2 } else { 4 };
            let offset = read_unsigned(ctx.reader, width)?;
            let selector = read_unsigned(ctx.reader, 2)? as u16;
            Ok(Operand::Direct {
                selector,
                offset,
                size: width * 8,
            })
        }
        Addressing::X => Ok(string_mem(ctx, size, 6, None)),
        Addressing::Y => Ok(string_mem(ctx, size, 7, Some(Segment::Es))),
    }
}

/// `ds:[rsi]` / `es:[rdi]`-style implicit string operands, sized by the
/// effective address size.
fn string_mem(ctx: &OperandCtx, size: SizeCode, num: u8, seg: Option<Segment>) -> Operand {
    let class = match ctx.sizes.address {
        16 => RegClass::W,
        32 => RegClass::D,
        64 => RegClass::Q,
        _ => unreachable!("address size is 16, 32 or 64"),
    };
    Operand::Memory(MemoryRef {
        segment: seg.or(ctx.prefixes.segment()),
        base: Some(Register::new(class, num)),
        index: None,
        disp: None,
        size: mem_bytes(ctx, size),
    })
}

fn memory(ctx: &OperandCtx, mem: &crate::modrm::MemForm, size: SizeCode) -> Operand {
    Operand::Memory(MemoryRef {
        segment: ctx.prefixes.segment(),
        base: mem.base,
        index: mem.index,
        disp: mem.disp,
        size: mem_bytes(ctx, size),
    })
}

fn immediate(ctx: &mut OperandCtx, size: SizeCode, relative: bool) -> Result<Operand, ErrorKind> {
    let width = match size {
        SizeCode::B => 1,
        SizeCode::W => 2,
        SizeCode::D => 4,
        SizeCode::Q => 8,
        SizeCode::V => (ctx.sizes.operand / 8) as u8,
        SizeCode::Z => {
            if ctx.sizes.operand == 16 {
                2
            } else {
                4
            }
        }
        _ => unreachable!("immediate size classes are b/w/d/q/v/z"),
    };
    let raw = read_unsigned(ctx.reader, width)?;

    // byte immediates in wider contexts and dword immediates under a 64-bit
    // operand size are sign-extended; relative offsets always are
    let extend = relative
        || (width as u16) * 8 < ctx.sizes.operand && matches!(size, SizeCode::B | SizeCode::Z);
    let value = if extend {
        sign_extend(raw, width)
    } else {
        raw as i64
    };

    Ok(Operand::Immediate {
        value,
        width: width * 8,
    })
}

pub(crate) fn sign_extend(raw: u64, width: u8) -> i64 {
    let shift = 64 - width as u32 * 8;
    ((raw << shift) as i64) >> shift
}

pub(crate) fn read_unsigned(reader: &mut Reader, width: u8) -> Result<u64, ErrorKind> {
    let mut buf = [0u8; 8];
    reader
        .next_n(&mut buf[..width as usize])
        .ok_or(ErrorKind::ExhaustedInput)?;
    Ok(u64::from_le_bytes(buf))
}

fn sized_gpr(ctx: &OperandCtx, num: u8, size: SizeCode) -> Register {
    sized_gpr_num(ctx, num, size)
}

fn sized_gpr_num(ctx: &OperandCtx, num: u8, size: SizeCode) -> Register {
    match size {
        SizeCode::B => byte_reg(num, ctx.rex_present()),
        SizeCode::W => Register::new(RegClass::W, num),
        SizeCode::D => Register::new(RegClass::D, num),
        SizeCode::Q => Register::new(RegClass::Q, num),
        SizeCode::Y => {
            if ctx.sizes.operand == 64 {
                Register::new(RegClass::Q, num)
            } else {
                Register::new(RegClass::D, num)
            }
        }
        // z-sized registers cap at 32 bits even under a 64-bit operand size
        SizeCode::Z => {
            if ctx.sizes.operand == 16 {
                Register::new(RegClass::W, num)
            } else {
                Register::new(RegClass::D, num)
            }
        }
        _ => gpr(num, ctx.sizes.operand, ctx.rex_present()),
    }
}

/// A general register sized by the effective operand size.
fn gpr(num: u8, operand_bits: u16, rex_present: bool) -> Register {
    match operand_bits {
        8 => byte_reg(num, rex_present),
        16 => Register::new(RegClass::W, num),
        32 => Register::new(RegClass::D, num),
        64 => Register::new(RegClass::Q, num),
        _ => unreachable!("operand size is 8, 16, 32 or 64"),
    }
}

/// Byte-register naming switches on REX *presence*: without it, 4..=7 are
/// `ah`..`bh`; with it they are `spl`..`dil` regardless of the bit values.
fn byte_reg(num: u8, rex_present: bool) -> Register {
    if rex_present {
        Register::new(RegClass::RB, num)
    } else {
        Register::new(RegClass::B, num & 0b111)
    }
}

fn vector_reg(num: u8, bits: u16) -> Register {
    let class = match bits {
        128 => RegClass::X,
        256 => RegClass::Y,
        512 => RegClass::Z,
        _ => unreachable!("vector length is 128, 256 or 512"),
    };
    Register::new(class, num)
}

/// Memory access width in bytes for a size class.
pub(crate) fn mem_bytes(ctx: &OperandCtx, size: SizeCode) -> u8 {
    match size {
        SizeCode::B => 1,
        SizeCode::W => 2,
        SizeCode::D => 4,
        SizeCode::Q => 8,
        SizeCode::Dq => 16,
        SizeCode::V => (ctx.sizes.operand / 8) as u8,
        SizeCode::Z => {
            if ctx.sizes.operand == 16 {
                2
            } else {
                4
            }
        }
        SizeCode::Y => {
            if ctx.sizes.operand == 64 {
                8
            } else {
                4
            }
        }
        SizeCode::P => (ctx.sizes.operand / 8) as u8 + 2,
        SizeCode::X => (ctx.vector_bits() / 8) as u8,
        SizeCode::T => 10,
        SizeCode::None => 0,
    }
}
