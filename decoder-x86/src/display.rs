//! Instruction and operand rendering.

use crate::opcode::Opcode;
use crate::operand::{MemoryRef, Operand, RegClass, Register};
use crate::Instruction;

use decoder::{encode_hex, ToTokens, TokenStream};
use tokenizing::{ColorScheme, Colors};

use std::fmt;

static BYTE: [&str; 8] = ["al", "cl", "dl", "bl", "ah", "ch", "dh", "bh"];
static BYTE_REX: [&str; 16] = [
    "al", "cl", "dl", "bl", "spl", "bpl", "sil", "dil", "r8b", "r9b", "r10b",
    "r11b", "r12b", "r13b", "r14b", "r15b",
];
static WORD: [&str; 16] = [
    "ax", "cx", "dx", "bx", "sp", "bp", "si", "di", "r8w", "r9w", "r10w",
    "r11w", "r12w", "r13w", "r14w", "r15w",
];
static DWORD: [&str; 16] = [
    "eax", "ecx", "edx", "ebx", "esp", "ebp", "esi", "edi", "r8d", "r9d",
    "r10d", "r11d", "r12d", "r13d", "r14d", "r15d",
];
static QWORD: [&str; 16] = [
    "rax", "rcx", "rdx", "rbx", "rsp", "rbp", "rsi", "rdi", "r8", "r9", "r10",
    "r11", "r12", "r13", "r14", "r15",
];
static SEGMENT: [&str; 8] = ["es", "cs", "ss", "ds", "fs", "gs", "", ""];
static X87: [&str; 8] = [
    "st(0)", "st(1)", "st(2)", "st(3)", "st(4)", "st(5)", "st(6)", "st(7)",
];
static MMX: [&str; 8] = ["mm0", "mm1", "mm2", "mm3", "mm4", "mm5", "mm6", "mm7"];
static KMASK: [&str; 8] = ["k0", "k1", "k2", "k3", "k4", "k5", "k6", "k7"];
static XMM: [&str; 32] = [
    "xmm0", "xmm1", "xmm2", "xmm3", "xmm4", "xmm5", "xmm6", "xmm7", "xmm8",
    "xmm9", "xmm10", "xmm11", "xmm12", "xmm13", "xmm14", "xmm15", "xmm16",
    "xmm17", "xmm18", "xmm19", "xmm20", "xmm21", "xmm22", "xmm23", "xmm24",
    "xmm25", "xmm26", "xmm27", "xmm28", "xmm29", "xmm30", "xmm31",
];
static YMM: [&str; 32] = [
    "ymm0", "ymm1", "ymm2", "ymm3", "ymm4", "ymm5", "ymm6", "ymm7", "ymm8",
    "ymm9", "ymm10", "ymm11", "ymm12", "ymm13", "ymm14", "ymm15", "ymm16",
    "ymm17", "ymm18", "ymm19", "ymm20", "ymm21", "ymm22", "ymm23", "ymm24",
    "ymm25", "ymm26", "ymm27", "ymm28", "ymm29", "ymm30", "ymm31",
];
static ZMM: [&str; 32] = [
    "zmm0", "zmm1", "zmm2", "zmm3", "zmm4", "zmm5", "zmm6", "zmm7", "zmm8",
    "zmm9", "zmm10", "zmm11", "zmm12", "zmm13", "zmm14", "zmm15", "zmm16",
    "zmm17", "zmm18", "zmm19", "zmm20", "zmm21", "zmm22", "zmm23", "zmm24",
    "zmm25", "zmm26", "zmm27", "zmm28", "zmm29", "zmm30", "zmm31",
];
static CONTROL: [&str; 16] = [
    "cr0", "cr1", "cr2", "cr3", "cr4", "cr5", "cr6", "cr7", "cr8", "cr9",
    "cr10", "cr11", "cr12", "cr13", "cr14", "cr15",
];
static DEBUG: [&str; 16] = [
    "dr0", "dr1", "dr2", "dr3", "dr4", "dr5", "dr6", "dr7", "dr8", "dr9",
    "dr10", "dr11", "dr12", "dr13", "dr14", "dr15",
];

pub(crate) fn register_label(reg: &Register) -> &'static str {
    let num = reg.num() as usize;
    match reg.class() {
        RegClass::B => BYTE[num & 7],
        RegClass::RB => BYTE_REX[num & 15],
        RegClass::W => WORD[num & 15],
        RegClass::D => DWORD[num & 15],
        RegClass::Q => QWORD[num & 15],
        RegClass::Seg => SEGMENT[num & 7],
        RegClass::St => X87[num & 7],
        RegClass::Mm => MMX[num & 7],
        RegClass::X => XMM[num & 31],
        RegClass::Y => YMM[num & 31],
        RegClass::Z => ZMM[num & 31],
        RegClass::K => KMASK[num & 7],
        RegClass::Cr => CONTROL[num & 15],
        RegClass::Dr => DEBUG[num & 15],
        RegClass::Rip => "rip",
        RegClass::Eip => "eip",
    }
}

/// Pointer-width keyword for a memory access of `bytes` bytes. Zero means
/// the instruction doesn't size the access and gets no keyword.
fn size_keyword(bytes: u8) -> Option<&'static str> {
    match bytes {
        1 => Some("byte"),
        2 => Some("word"),
        4 => Some("dword"),
        6 => Some("fword"),
        8 => Some("qword"),
        10 => Some("mword"),
        16 => Some("xmmword"),
        32 => Some("ymmword"),
        64 => Some("zmmword"),
        _ => None,
    }
}

/// Branch targets decode to immediates but render as `$`-relative offsets.
fn renders_relative(opcode: Opcode) -> bool {
    matches!(
        opcode,
        Opcode::CALL
            | Opcode::JMP
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

/// Opcodes whose `f2`/`f3` prefix is a repeat, not a mandatory-prefix
/// opcode selector; only these render it.
fn displays_rep(opcode: Opcode) -> bool {
    matches!(
        opcode,
        Opcode::MOVS
            | Opcode::CMPS
            | Opcode::STOS
            | Opcode::LODS
            | Opcode::SCAS
            | Opcode::INS
            | Opcode::OUTS
            | Opcode::NOP
    )
}

/// `f3` renders as `rep` on the store/load string ops and `repz` on the
/// compare ones (and on `f3 90`).
fn repz_label(opcode: Opcode) -> &'static str {
    match opcode {
        Opcode::MOVS | Opcode::STOS | Opcode::LODS | Opcode::INS | Opcode::OUTS => "rep ",
        _ => "repz ",
    }
}

fn push_hex(stream: &mut TokenStream, value: i64) {
    stream.push_owned(encode_hex(value), Colors::immediate());
}

fn tokenize_memory(stream: &mut TokenStream, mem: &MemoryRef) {
    if let Some(keyword) = size_keyword(mem.size) {
        stream.push(keyword, Colors::known());
        stream.push(" ptr ", Colors::known());
    }
    if let Some(segment) = mem.segment {
        stream.push(segment.label(), Colors::segment());
        stream.push(":", Colors::segment());
    }
    stream.push("[", Colors::brackets());
    let mut live = false;
    if let Some(base) = mem.base {
        stream.push(base.name(), Colors::register());
        live = true;
    }
    if let Some((index, scale)) = mem.index {
        if live {
            stream.push(" + ", Colors::expr());
        }
        stream.push(index.name(), Colors::register());
        if scale.factor() != 1 {
            stream.push(" * ", Colors::expr());
            stream.push_owned(scale.factor().to_string(), Colors::immediate());
        }
        live = true;
    }
    if let Some(disp) = mem.disp {
        if !live {
            // no base or index, the displacement is an absolute address
            push_hex(stream, disp);
        } else if disp < 0 {
            stream.push(" - ", Colors::expr());
            push_hex(stream, disp.wrapping_abs());
        } else {
            stream.push(" + ", Colors::expr());
            push_hex(stream, disp);
        }
    }
    stream.push("]", Colors::brackets());
}

fn tokenize_operand(stream: &mut TokenStream, opcode: Opcode, operand: &Operand) {
    match operand {
        Operand::Nothing => {}
        Operand::Register(reg) => stream.push(reg.name(), Colors::register()),
        Operand::Memory(mem) => tokenize_memory(stream, mem),
        Operand::Direct { selector, offset, .. } => {
            push_hex(stream, *selector as i64);
            stream.push(":", Colors::expr());
            push_hex(stream, *offset as i64);
        }
        Operand::Immediate { value, .. } => {
            if renders_relative(opcode) {
                if *value < 0 {
                    stream.push("$", Colors::expr());
                } else {
                    stream.push("$+", Colors::expr());
                }
                push_hex(stream, *value);
            } else {
                push_hex(stream, *value);
            }
        }
    }
}

impl ToTokens for Instruction {
    fn tokenize(&self, stream: &mut TokenStream) {
        if self.prefixes.lock() {
            stream.push("lock ", Colors::opcode());
        }
        if self.prefixes.repnz() && displays_rep(self.opcode) {
            stream.push("repnz ", Colors::opcode());
        } else if self.prefixes.repz() && displays_rep(self.opcode) {
            stream.push(repz_label(self.opcode), Colors::opcode());
        }
        stream.push(self.opcode.name(), Colors::opcode());

        let mask = self.prefixes.evex().map(|e| e.mask_reg()).unwrap_or(0);
        let zeroing = self.prefixes.evex().map(|e| e.zeroing()).unwrap_or(false);
        for (idx, operand) in self.operands().iter().enumerate() {
            if idx == 0 {
                stream.push(" ", Colors::spacing());
            } else {
                stream.push(", ", Colors::expr());
            }
            tokenize_operand(stream, self.opcode, operand);
            if idx == 0 {
                if mask != 0 {
                    stream.push(" {", Colors::brackets());
                    stream.push(KMASK[(mask & 7) as usize], Colors::register());
                    stream.push("}", Colors::brackets());
                }
                if zeroing {
                    stream.push("{z}", Colors::brackets());
                }
            }
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut stream = TokenStream::new();
        self.tokenize(&mut stream);
        f.write_str(&stream.to_string())
    }
}
