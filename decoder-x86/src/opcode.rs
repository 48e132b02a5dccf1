//! Opcode maps: symbolic opcodes, operand-descriptor templates and the
//! table lookup keyed by (map, byte, mandatory prefix, mode).
//!
//! Pure lookup data; opcode identity never depends on anything but the key
//! plus, for group opcodes, the ModR/M reg field.

use crate::operand::{Addressing, Desc, Ext, RegGroup, Register, SizeCode};
use crate::prefix::{Prefixes, VectorLength};
use crate::size::OpSizeRule;
use crate::Mode;

/// Which opcode table an instruction selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpcodeMap {
    /// The single-byte map.
    Primary,
    /// The two-byte `0f` map.
    F,
    /// The three-byte `0f 38` map.
    F38,
    /// The three-byte `0f 3a` map.
    F3A,
}

/// The mandatory prefix participating in opcode identity for the escape
/// maps: none, `66`, `f2` or `f3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mand {
    None,
    P66,
    F2,
    F3,
}

macro_rules! opcodes {
    ($($name:ident => $text:literal,)*) => {
        /// Every mnemonic the tables can produce, plus the sentinel
        /// [`Opcode::Invalid`].
        #[allow(non_camel_case_types, clippy::upper_case_acronyms)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Opcode {
            Invalid,
            $($name,)*
        }

        impl Opcode {
            /// The rendered mnemonic.
            pub fn name(&self) -> &'static str {
                match self {
                    Opcode::Invalid => "invalid",
                    $(Opcode::$name => $text,)*
                }
            }
        }
    };
}

opcodes! {
    // data transfer & arithmetic
    AAA => "aaa", AAD => "aad", AAM => "aam", AAS => "aas",
    ADC => "adc", ADD => "add", AND => "and", ARPL => "arpl",
    BOUND => "bound", BSF => "bsf", BSR => "bsr", BSWAP => "bswap",
    BT => "bt", BTC => "btc", BTR => "btr", BTS => "bts",
    CALL => "call", CALLF => "callf",
    CBW => "cbw", CWDE => "cwde", CDQE => "cdqe",
    CWD => "cwd", CDQ => "cdq", CQO => "cqo",
    CLC => "clc", CLD => "cld", CLI => "cli", CLTS => "clts",
    CMC => "cmc", CMP => "cmp", CMPS => "cmps", CMPXCHG => "cmpxchg",
    CMPXCHG8B => "cmpxchg8b", CMPXCHG16B => "cmpxchg16b",
    CPUID => "cpuid", DAA => "daa", DAS => "das",
    DEC => "dec", DIV => "div", ENTER => "enter", HLT => "hlt",
    IDIV => "idiv", IMUL => "imul", IN => "in", INC => "inc",
    INS => "ins", INT => "int", INT1 => "int1", INT3 => "int3",
    INTO => "into", INVD => "invd", INVLPG => "invlpg",
    IRET => "iret", IRETD => "iretd", IRETQ => "iretq",
    JO => "jo", JNO => "jno", JB => "jb", JNB => "jnb",
    JZ => "jz", JNZ => "jnz", JNA => "jna", JA => "ja",
    JS => "js", JNS => "jns", JP => "jp", JNP => "jnp",
    JL => "jl", JGE => "jge", JLE => "jle", JG => "jg",
    JCXZ => "jcxz", JECXZ => "jecxz", JRCXZ => "jrcxz",
    JMP => "jmp", JMPF => "jmpf",
    LAHF => "lahf", LAR => "lar", LDS => "lds", LES => "les",
    LEA => "lea", LEAVE => "leave", LFS => "lfs", LGS => "lgs",
    LLDT => "lldt", LMSW => "lmsw", LODS => "lods",
    LOOP => "loop", LOOPZ => "loopz", LOOPNZ => "loopnz",
    LSL => "lsl", LSS => "lss", LTR => "ltr",
    MOV => "mov", MOVS => "movs", MOVSX => "movsx", MOVSXD => "movsxd",
    MOVZX => "movzx", MUL => "mul", NEG => "neg", NOP => "nop",
    NOT => "not", OR => "or", OUT => "out", OUTS => "outs",
    POP => "pop", POPA => "popa", POPCNT => "popcnt", POPF => "popf",
    PUSH => "push", PUSHA => "pusha", PUSHF => "pushf",
    RCL => "rcl", RCR => "rcr", RDMSR => "rdmsr", RDPMC => "rdpmc",
    RDRAND => "rdrand", RDSEED => "rdseed", RDTSC => "rdtsc",
    RDTSCP => "rdtscp", RETURN => "ret", RETF => "retf",
    ROL => "rol", ROR => "ror", RSM => "rsm",
    SAHF => "sahf", SALC => "salc", SAR => "sar",
    SBB => "sbb", SCAS => "scas",
    SETO => "seto", SETNO => "setno", SETB => "setb", SETNB => "setnb",
    SETZ => "setz", SETNZ => "setnz", SETNA => "setna", SETA => "seta",
    SETS => "sets", SETNS => "setns", SETP => "setp", SETNP => "setnp",
    SETL => "setl", SETGE => "setge", SETLE => "setle", SETG => "setg",
    SGDT => "sgdt", SIDT => "sidt", LGDT => "lgdt", LIDT => "lidt",
    SHL => "shl", SHLD => "shld", SHR => "shr", SHRD => "shrd",
    SLDT => "sldt", SMSW => "smsw",
    STC => "stc", STD => "std", STI => "sti", STOS => "stos",
    STR => "str", SUB => "sub",
    SWAPGS => "swapgs", SYSCALL => "syscall", SYSENTER => "sysenter",
    SYSEXIT => "sysexit", SYSRET => "sysret",
    TEST => "test", TZCNT => "tzcnt", LZCNT => "lzcnt",
    UD0 => "ud0", UD1 => "ud1", UD2 => "ud2",
    VERR => "verr", VERW => "verw", WAIT => "wait", WBINVD => "wbinvd",
    WRMSR => "wrmsr", XADD => "xadd", XCHG => "xchg", XLAT => "xlat",
    XOR => "xor",
    CMOVO => "cmovo", CMOVNO => "cmovno", CMOVB => "cmovb", CMOVNB => "cmovnb",
    CMOVZ => "cmovz", CMOVNZ => "cmovnz", CMOVNA => "cmovna", CMOVA => "cmova",
    CMOVS => "cmovs", CMOVNS => "cmovns", CMOVP => "cmovp", CMOVNP => "cmovnp",
    CMOVL => "cmovl", CMOVGE => "cmovge", CMOVLE => "cmovle", CMOVG => "cmovg",
    MONITOR => "monitor", MWAIT => "mwait",
    VMCLEAR => "vmclear", VMXON => "vmxon", VMPTRLD => "vmptrld",
    VMPTRST => "vmptrst",
    FXSAVE => "fxsave", FXRSTOR => "fxrstor",
    LDMXCSR => "ldmxcsr", STMXCSR => "stmxcsr",
    XSAVE => "xsave", XRSTOR => "xrstor", XSAVEOPT => "xsaveopt",
    CLFLUSH => "clflush",
    LFENCE => "lfence", MFENCE => "mfence", SFENCE => "sfence",
    RDFSBASE => "rdfsbase", RDGSBASE => "rdgsbase",
    WRFSBASE => "wrfsbase", WRGSBASE => "wrgsbase",
    PREFETCHNTA => "prefetchnta", PREFETCHT0 => "prefetcht0",
    PREFETCHT1 => "prefetcht1", PREFETCHT2 => "prefetcht2",

    // x87
    F2XM1 => "f2xm1", FABS => "fabs", FADD => "fadd", FADDP => "faddp",
    FBLD => "fbld", FBSTP => "fbstp", FCHS => "fchs",
    FCMOVB => "fcmovb", FCMOVBE => "fcmovbe", FCMOVE => "fcmove",
    FCMOVNB => "fcmovnb", FCMOVNBE => "fcmovnbe", FCMOVNE => "fcmovne",
    FCMOVNU => "fcmovnu", FCMOVU => "fcmovu",
    FCOM => "fcom", FCOMI => "fcomi", FCOMIP => "fcomip",
    FCOMP => "fcomp", FCOMPP => "fcompp",
    FCOS => "fcos", FDECSTP => "fdecstp",
    FDIV => "fdiv", FDIVP => "fdivp", FDIVR => "fdivr", FDIVRP => "fdivrp",
    FFREE => "ffree",
    FIADD => "fiadd", FICOM => "ficom", FICOMP => "ficomp",
    FIDIV => "fidiv", FIDIVR => "fidivr",
    FILD => "fild", FIMUL => "fimul", FINCSTP => "fincstp",
    FIST => "fist", FISTP => "fistp", FISTTP => "fisttp",
    FISUB => "fisub", FISUBR => "fisubr",
    FLD => "fld", FLD1 => "fld1", FLDCW => "fldcw", FLDENV => "fldenv",
    FLDL2E => "fldl2e", FLDL2T => "fldl2t", FLDLG2 => "fldlg2",
    FLDLN2 => "fldln2", FLDPI => "fldpi", FLDZ => "fldz",
    FMUL => "fmul", FMULP => "fmulp",
    FNCLEX => "fnclex", FNINIT => "fninit", FNOP => "fnop",
    FNSAVE => "fnsave", FNSTCW => "fnstcw", FNSTENV => "fnstenv",
    FNSTSW => "fnstsw",
    FPATAN => "fpatan", FPREM => "fprem", FPREM1 => "fprem1",
    FPTAN => "fptan", FRNDINT => "frndint", FRSTOR => "frstor",
    FSCALE => "fscale", FSIN => "fsin", FSINCOS => "fsincos",
    FSQRT => "fsqrt", FST => "fst", FSTP => "fstp",
    FSUB => "fsub", FSUBP => "fsubp", FSUBR => "fsubr", FSUBRP => "fsubrp",
    FTST => "ftst",
    FUCOM => "fucom", FUCOMI => "fucomi", FUCOMIP => "fucomip",
    FUCOMP => "fucomp", FUCOMPP => "fucompp",
    FXAM => "fxam", FXCH => "fxch", FXTRACT => "fxtract",
    FYL2X => "fyl2x", FYL2XP1 => "fyl2xp1",

    // mmx/sse/sse2/sse3/ssse3/sse4
    ADDPS => "addps", ADDPD => "addpd", ADDSS => "addss", ADDSD => "addsd",
    ADDSUBPD => "addsubpd", ADDSUBPS => "addsubps",
    AESDEC => "aesdec", AESDECLAST => "aesdeclast",
    AESENC => "aesenc", AESENCLAST => "aesenclast",
    AESIMC => "aesimc", AESKEYGENASSIST => "aeskeygenassist",
    ANDNPS => "andnps", ANDNPD => "andnpd",
    ANDPS => "andps", ANDPD => "andpd",
    BLENDPS => "blendps", BLENDPD => "blendpd",
    BLENDVPS => "blendvps", BLENDVPD => "blendvpd",
    CMPPS => "cmpps", CMPPD => "cmppd", CMPSS => "cmpss", CMPSD => "cmpsd",
    COMISS => "comiss", COMISD => "comisd",
    CRC32 => "crc32",
    CVTDQ2PD => "cvtdq2pd", CVTDQ2PS => "cvtdq2ps",
    CVTPD2DQ => "cvtpd2dq", CVTPD2PI => "cvtpd2pi", CVTPD2PS => "cvtpd2ps",
    CVTPI2PD => "cvtpi2pd", CVTPI2PS => "cvtpi2ps",
    CVTPS2DQ => "cvtps2dq", CVTPS2PD => "cvtps2pd", CVTPS2PI => "cvtps2pi",
    CVTSD2SI => "cvtsd2si", CVTSD2SS => "cvtsd2ss",
    CVTSI2SD => "cvtsi2sd", CVTSI2SS => "cvtsi2ss",
    CVTSS2SD => "cvtss2sd", CVTSS2SI => "cvtss2si",
    CVTTPD2DQ => "cvttpd2dq", CVTTPD2PI => "cvttpd2pi",
    CVTTPS2DQ => "cvttps2dq", CVTTPS2PI => "cvttps2pi",
    CVTTSD2SI => "cvttsd2si", CVTTSS2SI => "cvttss2si",
    DIVPS => "divps", DIVPD => "divpd", DIVSS => "divss", DIVSD => "divsd",
    DPPS => "dpps", DPPD => "dppd",
    EMMS => "emms",
    EXTRACTPS => "extractps", INSERTPS => "insertps",
    LDDQU => "lddqu",
    MASKMOVQ => "maskmovq", MASKMOVDQU => "maskmovdqu",
    MAXPS => "maxps", MAXPD => "maxpd", MAXSS => "maxss", MAXSD => "maxsd",
    MINPS => "minps", MINPD => "minpd", MINSS => "minss", MINSD => "minsd",
    MOVAPS => "movaps", MOVAPD => "movapd",
    MOVD => "movd", MOVQ => "movq",
    MOVDDUP => "movddup", MOVDQA => "movdqa", MOVDQU => "movdqu",
    MOVHPS => "movhps", MOVHPD => "movhpd",
    MOVLPS => "movlps", MOVLPD => "movlpd",
    MOVMSKPS => "movmskps", MOVMSKPD => "movmskpd",
    MOVNTDQ => "movntdq", MOVNTDQA => "movntdqa", MOVNTI => "movnti",
    MOVNTPS => "movntps", MOVNTPD => "movntpd", MOVNTQ => "movntq",
    MOVSHDUP => "movshdup", MOVSLDUP => "movsldup",
    MOVSS => "movss", MOVSD_SSE => "movsd",
    MOVUPS => "movups", MOVUPD => "movupd",
    MPSADBW => "mpsadbw",
    MULPS => "mulps", MULPD => "mulpd", MULSS => "mulss", MULSD => "mulsd",
    ORPS => "orps", ORPD => "orpd",
    PABSB => "pabsb", PABSW => "pabsw", PABSD => "pabsd",
    PACKSSDW => "packssdw", PACKSSWB => "packsswb",
    PACKUSDW => "packusdw", PACKUSWB => "packuswb",
    PADDB => "paddb", PADDW => "paddw", PADDD => "paddd", PADDQ => "paddq",
    PADDSB => "paddsb", PADDSW => "paddsw",
    PADDUSB => "paddusb", PADDUSW => "paddusw",
    PALIGNR => "palignr", PAND => "pand", PANDN => "pandn",
    PAVGB => "pavgb", PAVGW => "pavgw",
    PBLENDVB => "pblendvb", PBLENDW => "pblendw",
    PCLMULQDQ => "pclmulqdq",
    PCMPEQB => "pcmpeqb", PCMPEQW => "pcmpeqw", PCMPEQD => "pcmpeqd",
    PCMPEQQ => "pcmpeqq",
    PCMPESTRI => "pcmpestri", PCMPESTRM => "pcmpestrm",
    PCMPGTB => "pcmpgtb", PCMPGTW => "pcmpgtw", PCMPGTD => "pcmpgtd",
    PCMPGTQ => "pcmpgtq",
    PCMPISTRI => "pcmpistri", PCMPISTRM => "pcmpistrm",
    PEXTRB => "pextrb", PEXTRW => "pextrw", PEXTRD => "pextrd",
    PHADDD => "phaddd", PHADDSW => "phaddsw", PHADDW => "phaddw",
    PHMINPOSUW => "phminposuw",
    PHSUBD => "phsubd", PHSUBSW => "phsubsw", PHSUBW => "phsubw",
    PINSRB => "pinsrb", PINSRD => "pinsrd", PINSRW => "pinsrw",
    PMADDUBSW => "pmaddubsw", PMADDWD => "pmaddwd",
    PMAXSB => "pmaxsb", PMAXSD => "pmaxsd", PMAXSW => "pmaxsw",
    PMAXUB => "pmaxub", PMAXUD => "pmaxud", PMAXUW => "pmaxuw",
    PMINSB => "pminsb", PMINSD => "pminsd", PMINSW => "pminsw",
    PMINUB => "pminub", PMINUD => "pminud", PMINUW => "pminuw",
    PMOVMSKB => "pmovmskb",
    PMOVSXBW => "pmovsxbw", PMOVSXBD => "pmovsxbd", PMOVSXBQ => "pmovsxbq",
    PMOVSXWD => "pmovsxwd", PMOVSXWQ => "pmovsxwq", PMOVSXDQ => "pmovsxdq",
    PMOVZXBW => "pmovzxbw", PMOVZXBD => "pmovzxbd", PMOVZXBQ => "pmovzxbq",
    PMOVZXWD => "pmovzxwd", PMOVZXWQ => "pmovzxwq", PMOVZXDQ => "pmovzxdq",
    PMULDQ => "pmuldq", PMULHRSW => "pmulhrsw",
    PMULHUW => "pmulhuw", PMULHW => "pmulhw",
    PMULLD => "pmulld", PMULLW => "pmullw", PMULUDQ => "pmuludq",
    POR => "por",
    PSADBW => "psadbw", PSHUFB => "pshufb", PSHUFD => "pshufd",
    PSHUFHW => "pshufhw", PSHUFLW => "pshuflw", PSHUFW => "pshufw",
    PSIGNB => "psignb", PSIGND => "psignd", PSIGNW => "psignw",
    PSLLD => "pslld", PSLLDQ => "pslldq", PSLLQ => "psllq", PSLLW => "psllw",
    PSRAD => "psrad", PSRAW => "psraw",
    PSRLD => "psrld", PSRLDQ => "psrldq", PSRLQ => "psrlq", PSRLW => "psrlw",
    PSUBB => "psubb", PSUBW => "psubw", PSUBD => "psubd", PSUBQ => "psubq",
    PSUBSB => "psubsb", PSUBSW => "psubsw",
    PSUBUSB => "psubusb", PSUBUSW => "psubusw",
    PTEST => "ptest",
    PUNPCKHBW => "punpckhbw", PUNPCKHDQ => "punpckhdq",
    PUNPCKHQDQ => "punpckhqdq", PUNPCKHWD => "punpckhwd",
    PUNPCKLBW => "punpcklbw", PUNPCKLDQ => "punpckldq",
    PUNPCKLQDQ => "punpcklqdq", PUNPCKLWD => "punpcklwd",
    PXOR => "pxor",
    RCPPS => "rcpps", RCPSS => "rcpss",
    ROUNDPS => "roundps", ROUNDPD => "roundpd",
    ROUNDSS => "roundss", ROUNDSD => "roundsd",
    RSQRTPS => "rsqrtps", RSQRTSS => "rsqrtss",
    SHUFPS => "shufps", SHUFPD => "shufpd",
    SQRTPS => "sqrtps", SQRTPD => "sqrtpd", SQRTSS => "sqrtss",
    SQRTSD => "sqrtsd",
    SUBPS => "subps", SUBPD => "subpd", SUBSS => "subss", SUBSD => "subsd",
    UCOMISS => "ucomiss", UCOMISD => "ucomisd",
    UNPCKHPS => "unpckhps", UNPCKHPD => "unpckhpd",
    UNPCKLPS => "unpcklps", UNPCKLPD => "unpcklpd",
    XORPS => "xorps", XORPD => "xorpd",

    // avx / bmi (vex-coded)
    VADDPS => "vaddps", VADDPD => "vaddpd", VADDSS => "vaddss",
    VADDSD => "vaddsd",
    VANDPS => "vandps", VANDPD => "vandpd",
    VAESDEC => "vaesdec", VAESDECLAST => "vaesdeclast",
    VAESENC => "vaesenc", VAESENCLAST => "vaesenclast",
    VAESIMC => "vaesimc", VAESKEYGENASSIST => "vaeskeygenassist",
    VANDNPS => "vandnps", VANDNPD => "vandnpd",
    VBLENDPS => "vblendps", VBLENDPD => "vblendpd",
    VBROADCASTF128 => "vbroadcastf128", VBROADCASTI128 => "vbroadcasti128",
    VBROADCASTSS => "vbroadcastss", VBROADCASTSD => "vbroadcastsd",
    VCMPPS => "vcmpps", VCMPPD => "vcmppd", VCMPSS => "vcmpss",
    VCMPSD => "vcmpsd",
    VCOMISS => "vcomiss", VCOMISD => "vcomisd",
    VCVTPS2PD => "vcvtps2pd", VCVTPD2PS => "vcvtpd2ps",
    VCVTSS2SD => "vcvtss2sd", VCVTSD2SS => "vcvtsd2ss",
    VDIVPS => "vdivps", VDIVPD => "vdivpd", VDIVSS => "vdivss",
    VDIVSD => "vdivsd",
    VEXTRACTF128 => "vextractf128", VINSERTF128 => "vinsertf128",
    VEXTRACTI128 => "vextracti128", VINSERTI128 => "vinserti128",
    VFMADD132PS => "vfmadd132ps", VFMADD132PD => "vfmadd132pd",
    VFMADD132SS => "vfmadd132ss", VFMADD132SD => "vfmadd132sd",
    VFMADD213PS => "vfmadd213ps", VFMADD213PD => "vfmadd213pd",
    VFMADD213SS => "vfmadd213ss", VFMADD213SD => "vfmadd213sd",
    VFMADD231PS => "vfmadd231ps", VFMADD231PD => "vfmadd231pd",
    VFMADD231SS => "vfmadd231ss", VFMADD231SD => "vfmadd231sd",
    VFMADDSUB132PS => "vfmaddsub132ps", VFMADDSUB132PD => "vfmaddsub132pd",
    VFMADDSUB213PS => "vfmaddsub213ps", VFMADDSUB213PD => "vfmaddsub213pd",
    VFMADDSUB231PS => "vfmaddsub231ps", VFMADDSUB231PD => "vfmaddsub231pd",
    VFMSUB132PS => "vfmsub132ps", VFMSUB132PD => "vfmsub132pd",
    VFMSUB132SS => "vfmsub132ss", VFMSUB132SD => "vfmsub132sd",
    VFMSUB213PS => "vfmsub213ps", VFMSUB213PD => "vfmsub213pd",
    VFMSUB213SS => "vfmsub213ss", VFMSUB213SD => "vfmsub213sd",
    VFMSUB231PS => "vfmsub231ps", VFMSUB231PD => "vfmsub231pd",
    VFMSUB231SS => "vfmsub231ss", VFMSUB231SD => "vfmsub231sd",
    VFMSUBADD132PS => "vfmsubadd132ps", VFMSUBADD132PD => "vfmsubadd132pd",
    VFMSUBADD213PS => "vfmsubadd213ps", VFMSUBADD213PD => "vfmsubadd213pd",
    VFMSUBADD231PS => "vfmsubadd231ps", VFMSUBADD231PD => "vfmsubadd231pd",
    VFNMADD132PS => "vfnmadd132ps", VFNMADD132PD => "vfnmadd132pd",
    VFNMADD132SS => "vfnmadd132ss", VFNMADD132SD => "vfnmadd132sd",
    VFNMADD213PS => "vfnmadd213ps", VFNMADD213PD => "vfnmadd213pd",
    VFNMADD213SS => "vfnmadd213ss", VFNMADD213SD => "vfnmadd213sd",
    VFNMADD231PS => "vfnmadd231ps", VFNMADD231PD => "vfnmadd231pd",
    VFNMADD231SS => "vfnmadd231ss", VFNMADD231SD => "vfnmadd231sd",
    VFNMSUB132PS => "vfnmsub132ps", VFNMSUB132PD => "vfnmsub132pd",
    VFNMSUB132SS => "vfnmsub132ss", VFNMSUB132SD => "vfnmsub132sd",
    VFNMSUB213PS => "vfnmsub213ps", VFNMSUB213PD => "vfnmsub213pd",
    VFNMSUB213SS => "vfnmsub213ss", VFNMSUB213SD => "vfnmsub213sd",
    VFNMSUB231PS => "vfnmsub231ps", VFNMSUB231PD => "vfnmsub231pd",
    VFNMSUB231SS => "vfnmsub231ss", VFNMSUB231SD => "vfnmsub231sd",
    VMASKMOVPS => "vmaskmovps", VMASKMOVPD => "vmaskmovpd",
    VMAXPS => "vmaxps", VMAXPD => "vmaxpd", VMAXSS => "vmaxss",
    VMAXSD => "vmaxsd",
    VMINPS => "vminps", VMINPD => "vminpd", VMINSS => "vminss",
    VMINSD => "vminsd",
    VMOVAPS => "vmovaps", VMOVAPD => "vmovapd",
    VMOVD => "vmovd", VMOVQ => "vmovq",
    VMOVDQA => "vmovdqa", VMOVDQU => "vmovdqu",
    VMOVSS => "vmovss", VMOVSD => "vmovsd",
    VMOVUPS => "vmovups", VMOVUPD => "vmovupd",
    VMULPS => "vmulps", VMULPD => "vmulpd", VMULSS => "vmulss",
    VMULSD => "vmulsd",
    VORPS => "vorps", VORPD => "vorpd",
    VPADDB => "vpaddb", VPADDW => "vpaddw", VPADDD => "vpaddd",
    VPADDQ => "vpaddq",
    VPALIGNR => "vpalignr", VPAND => "vpand", VPANDN => "vpandn",
    VPBLENDD => "vpblendd",
    VPBROADCASTB => "vpbroadcastb", VPBROADCASTW => "vpbroadcastw",
    VPBROADCASTD => "vpbroadcastd", VPBROADCASTQ => "vpbroadcastq",
    VPCLMULQDQ => "vpclmulqdq",
    VPCMPEQB => "vpcmpeqb", VPCMPEQW => "vpcmpeqw", VPCMPEQD => "vpcmpeqd",
    VPCMPEQQ => "vpcmpeqq", VPCMPGTQ => "vpcmpgtq",
    VPERM2F128 => "vperm2f128", VPERM2I128 => "vperm2i128",
    VPERMD => "vpermd", VPERMILPS => "vpermilps", VPERMILPD => "vpermilpd",
    VPERMPD => "vpermpd", VPERMPS => "vpermps", VPERMQ => "vpermq",
    VPMASKMOVD => "vpmaskmovd", VPMASKMOVQ => "vpmaskmovq",
    VPMULLW => "vpmullw", VPMULLD => "vpmulld", VPOR => "vpor",
    VPSHUFB => "vpshufb", VPSHUFD => "vpshufd",
    VPSHUFHW => "vpshufhw", VPSHUFLW => "vpshuflw",
    VPSLLVD => "vpsllvd", VPSLLVQ => "vpsllvq",
    VPSRAVD => "vpsravd", VPSRLVD => "vpsrlvd", VPSRLVQ => "vpsrlvq",
    VPSUBB => "vpsubb", VPSUBW => "vpsubw", VPSUBD => "vpsubd",
    VPSUBQ => "vpsubq",
    VPTEST => "vptest", VPXOR => "vpxor",
    VSHUFPS => "vshufps", VSHUFPD => "vshufpd",
    VSQRTPS => "vsqrtps", VSQRTPD => "vsqrtpd", VSQRTSS => "vsqrtss",
    VSQRTSD => "vsqrtsd",
    VSUBPS => "vsubps", VSUBPD => "vsubpd", VSUBSS => "vsubss",
    VSUBSD => "vsubsd",
    VTESTPS => "vtestps", VTESTPD => "vtestpd",
    VUCOMISS => "vucomiss", VUCOMISD => "vucomisd",
    VXORPS => "vxorps", VXORPD => "vxorpd",
    VZEROALL => "vzeroall", VZEROUPPER => "vzeroupper",
    ANDN => "andn", BEXTR => "bextr",
    BLSI => "blsi", BLSMSK => "blsmsk", BLSR => "blsr",
    BZHI => "bzhi", MULX => "mulx", PDEP => "pdep", PEXT => "pext",
    SARX => "sarx", SHLX => "shlx", SHRX => "shrx",
}

/// A direct table entry: opcode, its operand template list, and its
/// declared size-determination policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Def {
    pub opcode: Opcode,
    pub operands: &'static [Desc],
    pub rule: OpSizeRule,
}

/// ModR/M-reg-indexed secondary tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Group {
    G1 { byte: u8 },
    G1A,
    G2 { byte: u8 },
    G3 { byte: u8 },
    G4,
    G5,
    G6,
    G7,
    G8,
    G9,
    G11 { byte: u8 },
    G12,
    G13,
    G14,
    G15,
    G16,
    G17,
    X87 { byte: u8 },
}

/// The result of an opcode-map lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Entry {
    Def(Def),
    Group(Group),
    Invalid,
}

const fn op(opcode: Opcode, operands: &'static [Desc]) -> Entry {
    Entry::Def(Def {
        opcode,
        operands,
        rule: OpSizeRule::Default32,
    })
}

const fn op_r(opcode: Opcode, operands: &'static [Desc], rule: OpSizeRule) -> Entry {
    Entry::Def(Def {
        opcode,
        operands,
        rule,
    })
}

// operand descriptor shorthands
const EB: Desc = Desc::M(Addressing::E, SizeCode::B);
const EW: Desc = Desc::M(Addressing::E, SizeCode::W);
const EV: Desc = Desc::M(Addressing::E, SizeCode::V);
const EY: Desc = Desc::M(Addressing::E, SizeCode::Y);
const EZ: Desc = Desc::M(Addressing::E, SizeCode::Z);
const GB: Desc = Desc::M(Addressing::G, SizeCode::B);
const GW: Desc = Desc::M(Addressing::G, SizeCode::W);
const GV: Desc = Desc::M(Addressing::G, SizeCode::V);
const GY: Desc = Desc::M(Addressing::G, SizeCode::Y);
const GZ: Desc = Desc::M(Addressing::G, SizeCode::Z);
const RV: Desc = Desc::M(Addressing::R, SizeCode::V);
const RY: Desc = Desc::M(Addressing::R, SizeCode::Y);
const SW: Desc = Desc::M(Addressing::S, SizeCode::W);
const CV: Desc = Desc::M(Addressing::C, SizeCode::V);
const DV: Desc = Desc::M(Addressing::D, SizeCode::V);
const IB: Desc = Desc::M(Addressing::I, SizeCode::B);
const IW: Desc = Desc::M(Addressing::I, SizeCode::W);
const IV: Desc = Desc::M(Addressing::I, SizeCode::V);
const IZ: Desc = Desc::M(Addressing::I, SizeCode::Z);
const JB: Desc = Desc::M(Addressing::J, SizeCode::B);
const JZ: Desc = Desc::M(Addressing::J, SizeCode::Z);
const OB: Desc = Desc::M(Addressing::O, SizeCode::B);
const OV: Desc = Desc::M(Addressing::O, SizeCode::V);
const AP: Desc = Desc::M(Addressing::A, SizeCode::P);
const XB: Desc = Desc::M(Addressing::X, SizeCode::B);
const XV: Desc = Desc::M(Addressing::X, SizeCode::V);
const YB: Desc = Desc::M(Addressing::Y, SizeCode::B);
const YV: Desc = Desc::M(Addressing::Y, SizeCode::V);
const YZ: Desc = Desc::M(Addressing::Y, SizeCode::Z);
const XZ: Desc = Desc::M(Addressing::X, SizeCode::Z);
const MEM: Desc = Desc::M(Addressing::M, SizeCode::None);
const MB: Desc = Desc::M(Addressing::M, SizeCode::B);
const MW16: Desc = Desc::M(Addressing::M, SizeCode::W);
const MD32: Desc = Desc::M(Addressing::M, SizeCode::D);
const MQ64: Desc = Desc::M(Addressing::M, SizeCode::Q);
const MDQ: Desc = Desc::M(Addressing::M, SizeCode::Dq);
const MT80: Desc = Desc::M(Addressing::M, SizeCode::T);
const MP: Desc = Desc::M(Addressing::M, SizeCode::P);
const MV: Desc = Desc::M(Addressing::M, SizeCode::V);
const MX: Desc = Desc::M(Addressing::M, SizeCode::X);
const MY: Desc = Desc::M(Addressing::M, SizeCode::Y);
const VX: Desc = Desc::M(Addressing::V, SizeCode::X);
const VDQ: Desc = Desc::M(Addressing::V, SizeCode::Dq);
const WX: Desc = Desc::M(Addressing::W, SizeCode::X);
const WB: Desc = Desc::M(Addressing::W, SizeCode::B);
const WW: Desc = Desc::M(Addressing::W, SizeCode::W);
const WD: Desc = Desc::M(Addressing::W, SizeCode::D);
const WQ: Desc = Desc::M(Addressing::W, SizeCode::Q);
const WDQ: Desc = Desc::M(Addressing::W, SizeCode::Dq);
const UX: Desc = Desc::M(Addressing::U, SizeCode::X);
const UDQ: Desc = Desc::M(Addressing::U, SizeCode::Dq);
const PQ: Desc = Desc::M(Addressing::P, SizeCode::Q);
const QQ: Desc = Desc::M(Addressing::Q, SizeCode::Q);
const NQ: Desc = Desc::M(Addressing::N, SizeCode::Q);
const HX: Desc = Desc::M(Addressing::H, SizeCode::X);
const BY: Desc = Desc::M(Addressing::B, SizeCode::Y);
const ONE: Desc = Desc::One;

const R_AL: Desc = Desc::Reg(Register::AL);
const R_CL: Desc = Desc::Reg(Register::CL);
const R_AX: Desc = Desc::Reg(Register::AX);
const R_DX: Desc = Desc::Reg(Register::DX);
const R_ES: Desc = Desc::Reg(Register::ES);
const R_CS: Desc = Desc::Reg(Register::CS);
const R_SS: Desc = Desc::Reg(Register::SS);
const R_DS: Desc = Desc::Reg(Register::DS);
const R_FS: Desc = Desc::Reg(Register::FS);
const R_GS: Desc = Desc::Reg(Register::GS);
const R_ST0: Desc = Desc::Reg(Register::ST0);
/// The operand-sized accumulator.
const R_XAX: Desc = Desc::Grp(RegGroup::OpSize, 0, Ext::None);

// descriptor slices shared between table cells
const NONE: &[Desc] = &[];
const EB_GB: &[Desc] = &[EB, GB];
const EV_GV: &[Desc] = &[EV, GV];
const GB_EB: &[Desc] = &[GB, EB];
const GV_EV: &[Desc] = &[GV, EV];
const AL_IB: &[Desc] = &[R_AL, IB];
const XAX_IZ: &[Desc] = &[R_XAX, IZ];
const EB_IB: &[Desc] = &[EB, IB];
const EV_IB: &[Desc] = &[EV, IB];
const EV_IZ: &[Desc] = &[EV, IZ];
const EB_1: &[Desc] = &[EB, ONE];
const EV_1: &[Desc] = &[EV, ONE];
const EB_CL: &[Desc] = &[EB, R_CL];
const EV_CL: &[Desc] = &[EV, R_CL];
const EB_ONLY: &[Desc] = &[EB];
const EV_ONLY: &[Desc] = &[EV];
const EW_ONLY: &[Desc] = &[EW];
const EW_GW: &[Desc] = &[EW, GW];
const GV_EW: &[Desc] = &[GV, EW];
const GV_EB: &[Desc] = &[GV, EB];
const GV_EZ: &[Desc] = &[GV, EZ];
const GV_M: &[Desc] = &[GV, MEM];
const GZ_MP: &[Desc] = &[GZ, MP];
const GV_MP: &[Desc] = &[GV, MP];
const EV_SW: &[Desc] = &[EV, SW];
const SW_EW: &[Desc] = &[SW, EW];
const GV_EV_IZ: &[Desc] = &[GV, EV, IZ];
const GV_EV_IB: &[Desc] = &[GV, EV, IB];
const EV_GV_IB: &[Desc] = &[EV, GV, IB];
const EV_GV_CL: &[Desc] = &[EV, GV, R_CL];
const IB_ONLY: &[Desc] = &[IB];
const IW_ONLY: &[Desc] = &[IW];
const IZ_ONLY: &[Desc] = &[IZ];
const IW_IB: &[Desc] = &[IW, IB];
const JB_ONLY: &[Desc] = &[JB];
const JZ_ONLY: &[Desc] = &[JZ];
const AP_ONLY: &[Desc] = &[AP];
const AL_OB: &[Desc] = &[R_AL, OB];
const XAX_OV: &[Desc] = &[R_XAX, OV];
const OB_AL: &[Desc] = &[OB, R_AL];
const OV_XAX: &[Desc] = &[OV, R_XAX];
const YB_XB: &[Desc] = &[YB, XB];
const YV_XV: &[Desc] = &[YV, XV];
const XB_YB: &[Desc] = &[XB, YB];
const XV_YV: &[Desc] = &[XV, YV];
const YB_DX: &[Desc] = &[YB, R_DX];
const YZ_DX: &[Desc] = &[YZ, R_DX];
const DX_XB: &[Desc] = &[R_DX, XB];
const DX_XZ: &[Desc] = &[R_DX, XZ];
const YB_AL: &[Desc] = &[YB, R_AL];
const YV_XAX: &[Desc] = &[YV, R_XAX];
const AL_XB: &[Desc] = &[R_AL, XB];
const XAX_XV: &[Desc] = &[R_XAX, XV];
const AL_YB: &[Desc] = &[R_AL, YB];
const XAX_YV: &[Desc] = &[R_XAX, YV];
const AL_DX: &[Desc] = &[R_AL, R_DX];
const XAX_DX: &[Desc] = &[R_XAX, R_DX];
const DX_AL: &[Desc] = &[R_DX, R_AL];
const DX_XAX: &[Desc] = &[R_DX, R_XAX];
const XAX_IB: &[Desc] = &[R_XAX, IB];
const IB_AL: &[Desc] = &[IB, R_AL];
const IB_XAX: &[Desc] = &[IB, R_XAX];
const PUSH_ES: &[Desc] = &[R_ES];
const PUSH_CS: &[Desc] = &[R_CS];
const PUSH_SS: &[Desc] = &[R_SS];
const PUSH_DS: &[Desc] = &[R_DS];
const PUSH_FS: &[Desc] = &[R_FS];
const PUSH_GS: &[Desc] = &[R_GS];
const RV_CV: &[Desc] = &[RV, CV];
const RV_DV: &[Desc] = &[RV, DV];
const CV_RV: &[Desc] = &[CV, RV];
const DV_RV: &[Desc] = &[DV, RV];
const RV_ONLY: &[Desc] = &[RV];
const RY_ONLY: &[Desc] = &[RY];
const MB_ONLY: &[Desc] = &[MB];
const MW_ONLY: &[Desc] = &[MW16];
const MD_ONLY: &[Desc] = &[MD32];
const MQ_ONLY: &[Desc] = &[MQ64];
const MDQ_ONLY: &[Desc] = &[MDQ];
const MT_ONLY: &[Desc] = &[MT80];
const MEM_ONLY: &[Desc] = &[MEM];
const MP_ONLY: &[Desc] = &[MP];
const GV_EW_LAR: &[Desc] = &[GV, EW];
const GV_BOUND: &[Desc] = &[GV, MV];
const AX_ONLY: &[Desc] = &[R_AX];

// sse shapes
const VX_WX: &[Desc] = &[VX, WX];
const WX_VX: &[Desc] = &[WX, VX];
const VX_WD: &[Desc] = &[VX, WD];
const VX_WQ: &[Desc] = &[VX, WQ];
const WD_VX: &[Desc] = &[WD, VX];
const WQ_VX: &[Desc] = &[WQ, VX];
const VX_WX_IB: &[Desc] = &[VX, WX, IB];
const VX_EY: &[Desc] = &[VX, EY];
const VDQ_EY: &[Desc] = &[VDQ, EY];
const EY_VDQ: &[Desc] = &[EY, VDQ];
const VDQ_WQ: &[Desc] = &[VDQ, WQ];
const GY_UX: &[Desc] = &[GY, UX];
const GY_NQ: &[Desc] = &[GY, NQ];
const GY_WD: &[Desc] = &[GY, WD];
const GY_WQ: &[Desc] = &[GY, WQ];
const GY_EB: &[Desc] = &[GY, EB];
const GY_EV: &[Desc] = &[GY, EV];
const MY_GY: &[Desc] = &[MY, GY];
const MX_VX: &[Desc] = &[MX, VX];
const VX_MX: &[Desc] = &[VX, MX];
const MQ_VX: &[Desc] = &[MQ64, VX];
const MQ_PQ: &[Desc] = &[MQ64, PQ];
const PQ_QQ: &[Desc] = &[PQ, QQ];
const QQ_PQ: &[Desc] = &[QQ, PQ];
const PQ_QQ_IB: &[Desc] = &[PQ, QQ, IB];
const PQ_EY: &[Desc] = &[PQ, EY];
const EY_PQ: &[Desc] = &[EY, PQ];
const PQ_WX: &[Desc] = &[PQ, WX];
const VX_QQ: &[Desc] = &[VX, QQ];
const PQ_EW_IB: &[Desc] = &[PQ, EW, IB];
const VDQ_EW_IB: &[Desc] = &[VDQ, EW, IB];
const GY_NQ_IB: &[Desc] = &[GY, NQ, IB];
const GY_UDQ_IB: &[Desc] = &[GY, UDQ, IB];
const NQ_IB: &[Desc] = &[NQ, IB];
const UX_IB: &[Desc] = &[UX, IB];
const EB_VDQ_IB: &[Desc] = &[EB, VDQ, IB];
const EW_VDQ_IB: &[Desc] = &[EW, VDQ, IB];
const EY_VDQ_IB: &[Desc] = &[EY, VDQ, IB];
const ED_VDQ_IB: &[Desc] = &[Desc::M(Addressing::E, SizeCode::D), VDQ, IB];
const VDQ_EB_IB: &[Desc] = &[VDQ, EB, IB];
const VDQ_EY_IB: &[Desc] = &[VDQ, EY, IB];
const VX_WD_IB: &[Desc] = &[VX, WD, IB];
const VX_WQ_IB: &[Desc] = &[VX, WQ, IB];
const VDQ_WDQ_IB: &[Desc] = &[VDQ, WDQ, IB];
const PQ_NQ: &[Desc] = &[PQ, NQ];
const VX_UDQ: &[Desc] = &[VX, UDQ];

// vex shapes
const VX_HX_WX: &[Desc] = &[VX, HX, WX];
const VX_HX_WX_IB: &[Desc] = &[VX, HX, WX, IB];
const VX_HX_WD: &[Desc] = &[VX, HX, WD];
const VX_HX_WQ: &[Desc] = &[VX, HX, WQ];
const VX_HX_MX: &[Desc] = &[VX, HX, MX];
const MX_HX_VX: &[Desc] = &[MX, HX, VX];
const VX_WB: &[Desc] = &[VX, WB];
const VX_WW: &[Desc] = &[VX, WW];
const WX_VX_IB: &[Desc] = &[WX, VX, IB];
const GY_BY_EY: &[Desc] = &[GY, BY, EY];
const GY_EY_BY: &[Desc] = &[GY, EY, BY];
const BY_EY: &[Desc] = &[BY, EY];

macro_rules! per_reg {
    ($grp:expr, $ext:expr) => {
        [
            [Desc::Grp($grp, 0, $ext)],
            [Desc::Grp($grp, 1, $ext)],
            [Desc::Grp($grp, 2, $ext)],
            [Desc::Grp($grp, 3, $ext)],
            [Desc::Grp($grp, 4, $ext)],
            [Desc::Grp($grp, 5, $ext)],
            [Desc::Grp($grp, 6, $ext)],
            [Desc::Grp($grp, 7, $ext)],
        ]
    };
    ($grp:expr, $ext:expr, lead $lead:expr) => {
        [
            [$lead, Desc::Grp($grp, 0, $ext)],
            [$lead, Desc::Grp($grp, 1, $ext)],
            [$lead, Desc::Grp($grp, 2, $ext)],
            [$lead, Desc::Grp($grp, 3, $ext)],
            [$lead, Desc::Grp($grp, 4, $ext)],
            [$lead, Desc::Grp($grp, 5, $ext)],
            [$lead, Desc::Grp($grp, 6, $ext)],
            [$lead, Desc::Grp($grp, 7, $ext)],
        ]
    };
    ($grp:expr, $ext:expr, trail $trail:expr) => {
        [
            [Desc::Grp($grp, 0, $ext), $trail],
            [Desc::Grp($grp, 1, $ext), $trail],
            [Desc::Grp($grp, 2, $ext), $trail],
            [Desc::Grp($grp, 3, $ext), $trail],
            [Desc::Grp($grp, 4, $ext), $trail],
            [Desc::Grp($grp, 5, $ext), $trail],
            [Desc::Grp($grp, 6, $ext), $trail],
            [Desc::Grp($grp, 7, $ext), $trail],
        ]
    };
}

/// Operand-size register embedded in the low opcode bits, `REX.B` extended.
static ZV: [[Desc; 1]; 8] = per_reg!(RegGroup::OpSize, Ext::RexB);
/// `xchg`-with-accumulator forms, `91` through `97`.
static XAX_ZV: [[Desc; 2]; 8] = per_reg!(RegGroup::OpSize, Ext::RexB, lead R_XAX);
/// `b0` through `b7`, byte register plus immediate.
static ZB_IB: [[Desc; 2]; 8] = per_reg!(RegGroup::Byte, Ext::RexB, trail IB);
/// `b8` through `bf`, full-width register plus immediate.
static ZV_IV: [[Desc; 2]; 8] = per_reg!(RegGroup::OpSize, Ext::RexB, trail IV);

// x87 register-form operand shapes, indexed by ModR/M.rm
static ST0_ST: [[Desc; 2]; 8] = per_reg!(RegGroup::X87, Ext::None, lead R_ST0);
static ST_ST0: [[Desc; 2]; 8] = per_reg!(RegGroup::X87, Ext::None, trail R_ST0);
static ST: [[Desc; 1]; 8] = per_reg!(RegGroup::X87, Ext::None);

/// Condition-code opcode families, indexed by the low opcode nibble.
static JCC: [Opcode; 16] = [
    Opcode::JO, Opcode::JNO, Opcode::JB, Opcode::JNB,
    Opcode::JZ, Opcode::JNZ, Opcode::JNA, Opcode::JA,
    Opcode::JS, Opcode::JNS, Opcode::JP, Opcode::JNP,
    Opcode::JL, Opcode::JGE, Opcode::JLE, Opcode::JG,
];
static SETCC: [Opcode; 16] = [
    Opcode::SETO, Opcode::SETNO, Opcode::SETB, Opcode::SETNB,
    Opcode::SETZ, Opcode::SETNZ, Opcode::SETNA, Opcode::SETA,
    Opcode::SETS, Opcode::SETNS, Opcode::SETP, Opcode::SETNP,
    Opcode::SETL, Opcode::SETGE, Opcode::SETLE, Opcode::SETG,
];
static CMOVCC: [Opcode; 16] = [
    Opcode::CMOVO, Opcode::CMOVNO, Opcode::CMOVB, Opcode::CMOVNB,
    Opcode::CMOVZ, Opcode::CMOVNZ, Opcode::CMOVNA, Opcode::CMOVA,
    Opcode::CMOVS, Opcode::CMOVNS, Opcode::CMOVP, Opcode::CMOVNP,
    Opcode::CMOVL, Opcode::CMOVGE, Opcode::CMOVLE, Opcode::CMOVG,
];

/// Table lookup for the four legacy maps.
pub(crate) fn lookup(map: OpcodeMap, byte: u8, mand: Mand, mode: Mode) -> Entry {
    match map {
        OpcodeMap::Primary => one_byte(byte, mode),
        OpcodeMap::F => two_byte(byte, mand),
        OpcodeMap::F38 => three_byte_38(byte, mand),
        OpcodeMap::F3A => three_byte_3a(byte, mand),
    }
}

fn reg_slice(table: &'static [[Desc; 1]; 8], byte: u8) -> &'static [Desc] {
    &table[(byte & 7) as usize]
}

fn reg_pair_slice(table: &'static [[Desc; 2]; 8], byte: u8) -> &'static [Desc] {
    &table[(byte & 7) as usize]
}

/// The single-byte opcode map. Bytes that were consumed earlier in the
/// pipeline (prefixes, `0f`, recognized vector escapes) never reach this
/// table and resolve to [`Entry::Invalid`].
fn one_byte(byte: u8, mode: Mode) -> Entry {
    use OpSizeRule::{Default64, Force64, Never64, Only64};
    let long = mode == Mode::Long;
    match byte {
        0x00 => op(Opcode::ADD, EB_GB),
        0x01 => op(Opcode::ADD, EV_GV),
        0x02 => op(Opcode::ADD, GB_EB),
        0x03 => op(Opcode::ADD, GV_EV),
        0x04 => op(Opcode::ADD, AL_IB),
        0x05 => op(Opcode::ADD, XAX_IZ),
        0x06 => op_r(Opcode::PUSH, PUSH_ES, Never64),
        0x07 => op_r(Opcode::POP, PUSH_ES, Never64),
        0x08 => op(Opcode::OR, EB_GB),
        0x09 => op(Opcode::OR, EV_GV),
        0x0a => op(Opcode::OR, GB_EB),
        0x0b => op(Opcode::OR, GV_EV),
        0x0c => op(Opcode::OR, AL_IB),
        0x0d => op(Opcode::OR, XAX_IZ),
        0x0e => op_r(Opcode::PUSH, PUSH_CS, Never64),
        0x10 => op(Opcode::ADC, EB_GB),
        0x11 => op(Opcode::ADC, EV_GV),
        0x12 => op(Opcode::ADC, GB_EB),
        0x13 => op(Opcode::ADC, GV_EV),
        0x14 => op(Opcode::ADC, AL_IB),
        0x15 => op(Opcode::ADC, XAX_IZ),
        0x16 => op_r(Opcode::PUSH, PUSH_SS, Never64),
        0x17 => op_r(Opcode::POP, PUSH_SS, Never64),
        0x18 => op(Opcode::SBB, EB_GB),
        0x19 => op(Opcode::SBB, EV_GV),
        0x1a => op(Opcode::SBB, GB_EB),
        0x1b => op(Opcode::SBB, GV_EV),
        0x1c => op(Opcode::SBB, AL_IB),
        0x1d => op(Opcode::SBB, XAX_IZ),
        0x1e => op_r(Opcode::PUSH, PUSH_DS, Never64),
        0x1f => op_r(Opcode::POP, PUSH_DS, Never64),
        0x20 => op(Opcode::AND, EB_GB),
        0x21 => op(Opcode::AND, EV_GV),
        0x22 => op(Opcode::AND, GB_EB),
        0x23 => op(Opcode::AND, GV_EV),
        0x24 => op(Opcode::AND, AL_IB),
        0x25 => op(Opcode::AND, XAX_IZ),
        0x27 => op_r(Opcode::DAA, NONE, Never64),
        0x28 => op(Opcode::SUB, EB_GB),
        0x29 => op(Opcode::SUB, EV_GV),
        0x2a => op(Opcode::SUB, GB_EB),
        0x2b => op(Opcode::SUB, GV_EV),
        0x2c => op(Opcode::SUB, AL_IB),
        0x2d => op(Opcode::SUB, XAX_IZ),
        0x2f => op_r(Opcode::DAS, NONE, Never64),
        0x30 => op(Opcode::XOR, EB_GB),
        0x31 => op(Opcode::XOR, EV_GV),
        0x32 => op(Opcode::XOR, GB_EB),
        0x33 => op(Opcode::XOR, GV_EV),
        0x34 => op(Opcode::XOR, AL_IB),
        0x35 => op(Opcode::XOR, XAX_IZ),
        0x37 => op_r(Opcode::AAA, NONE, Never64),
        0x38 => op(Opcode::CMP, EB_GB),
        0x39 => op(Opcode::CMP, EV_GV),
        0x3a => op(Opcode::CMP, GB_EB),
        0x3b => op(Opcode::CMP, GV_EV),
        0x3c => op(Opcode::CMP, AL_IB),
        0x3d => op(Opcode::CMP, XAX_IZ),
        0x3f => op_r(Opcode::AAS, NONE, Never64),
        // 40 through 4f are REX prefixes in long mode and never reach here
        0x40..=0x47 => op(Opcode::INC, reg_slice(&ZV, byte)),
        0x48..=0x4f => op(Opcode::DEC, reg_slice(&ZV, byte)),
        0x50..=0x57 => op_r(Opcode::PUSH, reg_slice(&ZV, byte), Default64),
        0x58..=0x5f => op_r(Opcode::POP, reg_slice(&ZV, byte), Default64),
        0x60 => op_r(Opcode::PUSHA, NONE, Never64),
        0x61 => op_r(Opcode::POPA, NONE, Never64),
        0x62 => op_r(Opcode::BOUND, GV_BOUND, Never64),
        0x63 => {
            if long {
                op_r(Opcode::MOVSXD, GV_EZ, Only64)
            } else {
                op(Opcode::ARPL, EW_GW)
            }
        }
        0x68 => op_r(Opcode::PUSH, IZ_ONLY, Default64),
        0x69 => op(Opcode::IMUL, GV_EV_IZ),
        0x6a => op_r(Opcode::PUSH, IB_ONLY, Default64),
        0x6b => op(Opcode::IMUL, GV_EV_IB),
        0x6c => op(Opcode::INS, YB_DX),
        0x6d => op(Opcode::INS, YZ_DX),
        0x6e => op(Opcode::OUTS, DX_XB),
        0x6f => op(Opcode::OUTS, DX_XZ),
        0x70..=0x7f => op_r(JCC[(byte & 0xf) as usize], JB_ONLY, Force64),
        0x80 | 0x81 | 0x83 => Entry::Group(Group::G1 { byte }),
        0x82 => {
            if long {
                Entry::Invalid
            } else {
                Entry::Group(Group::G1 { byte })
            }
        }
        0x84 => op(Opcode::TEST, EB_GB),
        0x85 => op(Opcode::TEST, EV_GV),
        0x86 => op(Opcode::XCHG, EB_GB),
        0x87 => op(Opcode::XCHG, EV_GV),
        0x88 => op(Opcode::MOV, EB_GB),
        0x89 => op(Opcode::MOV, EV_GV),
        0x8a => op(Opcode::MOV, GB_EB),
        0x8b => op(Opcode::MOV, GV_EV),
        0x8c => op(Opcode::MOV, EV_SW),
        0x8d => op(Opcode::LEA, GV_M),
        0x8e => op(Opcode::MOV, SW_EW),
        0x8f => Entry::Group(Group::G1A),
        0x90 => op(Opcode::NOP, NONE),
        0x91..=0x97 => op(Opcode::XCHG, reg_pair_slice(&XAX_ZV, byte)),
        0x98 => op(Opcode::CBW, NONE),
        0x99 => op(Opcode::CWD, NONE),
        0x9a => op_r(Opcode::CALLF, AP_ONLY, Never64),
        0x9b => op(Opcode::WAIT, NONE),
        0x9c => op_r(Opcode::PUSHF, NONE, Default64),
        0x9d => op_r(Opcode::POPF, NONE, Default64),
        0x9e => op(Opcode::SAHF, NONE),
        0x9f => op(Opcode::LAHF, NONE),
        0xa0 => op(Opcode::MOV, AL_OB),
        0xa1 => op(Opcode::MOV, XAX_OV),
        0xa2 => op(Opcode::MOV, OB_AL),
        0xa3 => op(Opcode::MOV, OV_XAX),
        0xa4 => op(Opcode::MOVS, YB_XB),
        0xa5 => op(Opcode::MOVS, YV_XV),
        0xa6 => op(Opcode::CMPS, XB_YB),
        0xa7 => op(Opcode::CMPS, XV_YV),
        0xa8 => op(Opcode::TEST, AL_IB),
        0xa9 => op(Opcode::TEST, XAX_IZ),
        0xaa => op(Opcode::STOS, YB_AL),
        0xab => op(Opcode::STOS, YV_XAX),
        0xac => op(Opcode::LODS, AL_XB),
        0xad => op(Opcode::LODS, XAX_XV),
        0xae => op(Opcode::SCAS, AL_YB),
        0xaf => op(Opcode::SCAS, XAX_YV),
        0xb0..=0xb7 => op(Opcode::MOV, reg_pair_slice(&ZB_IB, byte)),
        0xb8..=0xbf => op(Opcode::MOV, reg_pair_slice(&ZV_IV, byte)),
        0xc0 | 0xc1 => Entry::Group(Group::G2 { byte }),
        0xc2 => op_r(Opcode::RETURN, IW_ONLY, Force64),
        0xc3 => op_r(Opcode::RETURN, NONE, Force64),
        // c4 and c5 only reach the table when they were not VEX escapes
        0xc4 => op_r(Opcode::LES, GZ_MP, Never64),
        0xc5 => op_r(Opcode::LDS, GZ_MP, Never64),
        0xc6 | 0xc7 => Entry::Group(Group::G11 { byte }),
        0xc8 => op_r(Opcode::ENTER, IW_IB, Default64),
        0xc9 => op_r(Opcode::LEAVE, NONE, Default64),
        0xca => op(Opcode::RETF, IW_ONLY),
        0xcb => op(Opcode::RETF, NONE),
        0xcc => op(Opcode::INT3, NONE),
        0xcd => op(Opcode::INT, IB_ONLY),
        0xce => op_r(Opcode::INTO, NONE, Never64),
        0xcf => op(Opcode::IRET, NONE),
        0xd0..=0xd3 => Entry::Group(Group::G2 { byte }),
        0xd4 => op_r(Opcode::AAM, IB_ONLY, Never64),
        0xd5 => op_r(Opcode::AAD, IB_ONLY, Never64),
        0xd6 => op_r(Opcode::SALC, NONE, Never64),
        0xd7 => op(Opcode::XLAT, NONE),
        0xd8..=0xdf => Entry::Group(Group::X87 { byte }),
        0xe0 => op_r(Opcode::LOOPNZ, JB_ONLY, Force64),
        0xe1 => op_r(Opcode::LOOPZ, JB_ONLY, Force64),
        0xe2 => op_r(Opcode::LOOP, JB_ONLY, Force64),
        0xe3 => op_r(Opcode::JRCXZ, JB_ONLY, Force64),
        0xe4 => op(Opcode::IN, AL_IB),
        0xe5 => op(Opcode::IN, XAX_IB),
        0xe6 => op(Opcode::OUT, IB_AL),
        0xe7 => op(Opcode::OUT, IB_XAX),
        0xe8 => op_r(Opcode::CALL, JZ_ONLY, Force64),
        0xe9 => op_r(Opcode::JMP, JZ_ONLY, Force64),
        0xea => op_r(Opcode::JMPF, AP_ONLY, Never64),
        0xeb => op_r(Opcode::JMP, JB_ONLY, Force64),
        0xec => op(Opcode::IN, AL_DX),
        0xed => op(Opcode::IN, XAX_DX),
        0xee => op(Opcode::OUT, DX_AL),
        0xef => op(Opcode::OUT, DX_XAX),
        0xf1 => op(Opcode::INT1, NONE),
        0xf4 => op(Opcode::HLT, NONE),
        0xf5 => op(Opcode::CMC, NONE),
        0xf6 | 0xf7 => Entry::Group(Group::G3 { byte }),
        0xf8 => op(Opcode::CLC, NONE),
        0xf9 => op(Opcode::STC, NONE),
        0xfa => op(Opcode::CLI, NONE),
        0xfb => op(Opcode::STI, NONE),
        0xfc => op(Opcode::CLD, NONE),
        0xfd => op(Opcode::STD, NONE),
        0xfe => Entry::Group(Group::G4),
        0xff => Entry::Group(Group::G5),
        _ => Entry::Invalid,
    }
}

/// Packed-single / packed-double pair selected by the mandatory prefix,
/// both with a `[V, W]` shape.
fn ps_pd(mand: Mand, ps: Opcode, pd: Opcode, shape: &'static [Desc]) -> Entry {
    match mand {
        Mand::None => op(ps, shape),
        Mand::P66 => op(pd, shape),
        _ => Entry::Invalid,
    }
}

/// The full four-way packed/scalar split common to SSE arithmetic.
fn ps_pd_ss_sd(mand: Mand, ps: Opcode, pd: Opcode, ss: Opcode, sd: Opcode) -> Entry {
    match mand {
        Mand::None => op(ps, VX_WX),
        Mand::P66 => op(pd, VX_WX),
        Mand::F3 => op(ss, VX_WD),
        Mand::F2 => op(sd, VX_WQ),
    }
}

/// MMX form without a prefix, XMM form under `66`.
fn mmx_xmm(mand: Mand, opcode: Opcode) -> Entry {
    match mand {
        Mand::None => op(opcode, PQ_QQ),
        Mand::P66 => op(opcode, VX_WX),
        _ => Entry::Invalid,
    }
}

fn xmm_only(mand: Mand, opcode: Opcode, shape: &'static [Desc]) -> Entry {
    match mand {
        Mand::P66 => op(opcode, shape),
        _ => Entry::Invalid,
    }
}

/// The two-byte `0f` map.
fn two_byte(byte: u8, mand: Mand) -> Entry {
    use OpSizeRule::{Default64, Force64, Only64};
    match byte {
        0x00 => Entry::Group(Group::G6),
        0x01 => Entry::Group(Group::G7),
        0x02 => op(Opcode::LAR, GV_EW_LAR),
        0x03 => op(Opcode::LSL, GV_EW_LAR),
        0x05 => op_r(Opcode::SYSCALL, NONE, Only64),
        0x06 => op(Opcode::CLTS, NONE),
        0x07 => op_r(Opcode::SYSRET, NONE, Only64),
        0x08 => op(Opcode::INVD, NONE),
        0x09 => op(Opcode::WBINVD, NONE),
        0x0b => op(Opcode::UD2, NONE),
        0x10 => match mand {
            Mand::None => op(Opcode::MOVUPS, VX_WX),
            Mand::P66 => op(Opcode::MOVUPD, VX_WX),
            Mand::F3 => op(Opcode::MOVSS, VX_WD),
            Mand::F2 => op(Opcode::MOVSD_SSE, VX_WQ),
        },
        0x11 => match mand {
            Mand::None => op(Opcode::MOVUPS, WX_VX),
            Mand::P66 => op(Opcode::MOVUPD, WX_VX),
            Mand::F3 => op(Opcode::MOVSS, WD_VX),
            Mand::F2 => op(Opcode::MOVSD_SSE, WQ_VX),
        },
        0x12 => match mand {
            Mand::None => op(Opcode::MOVLPS, VX_WQ),
            Mand::P66 => op(Opcode::MOVLPD, VX_WQ),
            Mand::F3 => op(Opcode::MOVSLDUP, VX_WX),
            Mand::F2 => op(Opcode::MOVDDUP, VX_WQ),
        },
        0x13 => ps_pd(mand, Opcode::MOVLPS, Opcode::MOVLPD, MQ_VX),
        0x14 => ps_pd(mand, Opcode::UNPCKLPS, Opcode::UNPCKLPD, VX_WX),
        0x15 => ps_pd(mand, Opcode::UNPCKHPS, Opcode::UNPCKHPD, VX_WX),
        0x16 => match mand {
            Mand::None => op(Opcode::MOVHPS, VX_WQ),
            Mand::P66 => op(Opcode::MOVHPD, VX_WQ),
            Mand::F3 => op(Opcode::MOVSHDUP, VX_WX),
            Mand::F2 => Entry::Invalid,
        },
        0x17 => ps_pd(mand, Opcode::MOVHPS, Opcode::MOVHPD, MQ_VX),
        0x18 => Entry::Group(Group::G16),
        // hint nops, including the canonical long-form 0f 1f nop
        0x19..=0x1f => op(Opcode::NOP, EV_ONLY),
        0x20 => op_r(Opcode::MOV, RV_CV, Force64),
        0x21 => op_r(Opcode::MOV, RV_DV, Force64),
        0x22 => op_r(Opcode::MOV, CV_RV, Force64),
        0x23 => op_r(Opcode::MOV, DV_RV, Force64),
        0x28 => ps_pd(mand, Opcode::MOVAPS, Opcode::MOVAPD, VX_WX),
        0x29 => ps_pd(mand, Opcode::MOVAPS, Opcode::MOVAPD, WX_VX),
        0x2a => match mand {
            Mand::None => op(Opcode::CVTPI2PS, VX_QQ),
            Mand::P66 => op(Opcode::CVTPI2PD, VX_QQ),
            Mand::F3 => op(Opcode::CVTSI2SS, VX_EY),
            Mand::F2 => op(Opcode::CVTSI2SD, VX_EY),
        },
        0x2b => ps_pd(mand, Opcode::MOVNTPS, Opcode::MOVNTPD, MX_VX),
        0x2c => match mand {
            Mand::None => op(Opcode::CVTTPS2PI, PQ_WX),
            Mand::P66 => op(Opcode::CVTTPD2PI, PQ_WX),
            Mand::F3 => op(Opcode::CVTTSS2SI, GY_WD),
            Mand::F2 => op(Opcode::CVTTSD2SI, GY_WQ),
        },
        0x2d => match mand {
            Mand::None => op(Opcode::CVTPS2PI, PQ_WX),
            Mand::P66 => op(Opcode::CVTPD2PI, PQ_WX),
            Mand::F3 => op(Opcode::CVTSS2SI, GY_WD),
            Mand::F2 => op(Opcode::CVTSD2SI, GY_WQ),
        },
        0x2e => match mand {
            Mand::None => op(Opcode::UCOMISS, VX_WD),
            Mand::P66 => op(Opcode::UCOMISD, VX_WQ),
            _ => Entry::Invalid,
        },
        0x2f => match mand {
            Mand::None => op(Opcode::COMISS, VX_WD),
            Mand::P66 => op(Opcode::COMISD, VX_WQ),
            _ => Entry::Invalid,
        },
        0x30 => op(Opcode::WRMSR, NONE),
        0x31 => op(Opcode::RDTSC, NONE),
        0x32 => op(Opcode::RDMSR, NONE),
        0x33 => op(Opcode::RDPMC, NONE),
        0x34 => op(Opcode::SYSENTER, NONE),
        0x35 => op(Opcode::SYSEXIT, NONE),
        0x40..=0x4f => op(CMOVCC[(byte & 0xf) as usize], GV_EV),
        0x50 => ps_pd(mand, Opcode::MOVMSKPS, Opcode::MOVMSKPD, GY_UX),
        0x51 => ps_pd_ss_sd(
            mand,
            Opcode::SQRTPS,
            Opcode::SQRTPD,
            Opcode::SQRTSS,
            Opcode::SQRTSD,
        ),
        0x52 => match mand {
            Mand::None => op(Opcode::RSQRTPS, VX_WX),
            Mand::F3 => op(Opcode::RSQRTSS, VX_WD),
            _ => Entry::Invalid,
        },
        0x53 => match mand {
            Mand::None => op(Opcode::RCPPS, VX_WX),
            Mand::F3 => op(Opcode::RCPSS, VX_WD),
            _ => Entry::Invalid,
        },
        0x54 => ps_pd(mand, Opcode::ANDPS, Opcode::ANDPD, VX_WX),
        0x55 => ps_pd(mand, Opcode::ANDNPS, Opcode::ANDNPD, VX_WX),
        0x56 => ps_pd(mand, Opcode::ORPS, Opcode::ORPD, VX_WX),
        0x57 => ps_pd(mand, Opcode::XORPS, Opcode::XORPD, VX_WX),
        0x58 => ps_pd_ss_sd(
            mand,
            Opcode::ADDPS,
            Opcode::ADDPD,
            Opcode::ADDSS,
            Opcode::ADDSD,
        ),
        0x59 => ps_pd_ss_sd(
            mand,
            Opcode::MULPS,
            Opcode::MULPD,
            Opcode::MULSS,
            Opcode::MULSD,
        ),
        0x5a => ps_pd_ss_sd(
            mand,
            Opcode::CVTPS2PD,
            Opcode::CVTPD2PS,
            Opcode::CVTSS2SD,
            Opcode::CVTSD2SS,
        ),
        0x5b => match mand {
            Mand::None => op(Opcode::CVTDQ2PS, VX_WX),
            Mand::P66 => op(Opcode::CVTPS2DQ, VX_WX),
            Mand::F3 => op(Opcode::CVTTPS2DQ, VX_WX),
            Mand::F2 => Entry::Invalid,
        },
        0x5c => ps_pd_ss_sd(
            mand,
            Opcode::SUBPS,
            Opcode::SUBPD,
            Opcode::SUBSS,
            Opcode::SUBSD,
        ),
        0x5d => ps_pd_ss_sd(
            mand,
            Opcode::MINPS,
            Opcode::MINPD,
            Opcode::MINSS,
            Opcode::MINSD,
        ),
        0x5e => ps_pd_ss_sd(
            mand,
            Opcode::DIVPS,
            Opcode::DIVPD,
            Opcode::DIVSS,
            Opcode::DIVSD,
        ),
        0x5f => ps_pd_ss_sd(
            mand,
            Opcode::MAXPS,
            Opcode::MAXPD,
            Opcode::MAXSS,
            Opcode::MAXSD,
        ),
        0x60 => mmx_xmm(mand, Opcode::PUNPCKLBW),
        0x61 => mmx_xmm(mand, Opcode::PUNPCKLWD),
        0x62 => mmx_xmm(mand, Opcode::PUNPCKLDQ),
        0x63 => mmx_xmm(mand, Opcode::PACKSSWB),
        0x64 => mmx_xmm(mand, Opcode::PCMPGTB),
        0x65 => mmx_xmm(mand, Opcode::PCMPGTW),
        0x66 => mmx_xmm(mand, Opcode::PCMPGTD),
        0x67 => mmx_xmm(mand, Opcode::PACKUSWB),
        0x68 => mmx_xmm(mand, Opcode::PUNPCKHBW),
        0x69 => mmx_xmm(mand, Opcode::PUNPCKHWD),
        0x6a => mmx_xmm(mand, Opcode::PUNPCKHDQ),
        0x6b => mmx_xmm(mand, Opcode::PACKSSDW),
        0x6c => xmm_only(mand, Opcode::PUNPCKLQDQ, VX_WX),
        0x6d => xmm_only(mand, Opcode::PUNPCKHQDQ, VX_WX),
        0x6e => match mand {
            Mand::None => op(Opcode::MOVD, PQ_EY),
            Mand::P66 => op(Opcode::MOVD, VDQ_EY),
            _ => Entry::Invalid,
        },
        0x6f => match mand {
            Mand::None => op(Opcode::MOVQ, PQ_QQ),
            Mand::P66 => op(Opcode::MOVDQA, VX_WX),
            Mand::F3 => op(Opcode::MOVDQU, VX_WX),
            Mand::F2 => Entry::Invalid,
        },
        0x70 => match mand {
            Mand::None => op(Opcode::PSHUFW, PQ_QQ_IB),
            Mand::P66 => op(Opcode::PSHUFD, VX_WX_IB),
            Mand::F3 => op(Opcode::PSHUFHW, VX_WX_IB),
            Mand::F2 => op(Opcode::PSHUFLW, VX_WX_IB),
        },
        0x71 => Entry::Group(Group::G12),
        0x72 => Entry::Group(Group::G13),
        0x73 => Entry::Group(Group::G14),
        0x74 => mmx_xmm(mand, Opcode::PCMPEQB),
        0x75 => mmx_xmm(mand, Opcode::PCMPEQW),
        0x76 => mmx_xmm(mand, Opcode::PCMPEQD),
        0x77 => match mand {
            Mand::None => op(Opcode::EMMS, NONE),
            _ => Entry::Invalid,
        },
        0x7e => match mand {
            Mand::None => op(Opcode::MOVD, EY_PQ),
            Mand::P66 => op(Opcode::MOVD, EY_VDQ),
            Mand::F3 => op(Opcode::MOVQ, VDQ_WQ),
            Mand::F2 => Entry::Invalid,
        },
        0x7f => match mand {
            Mand::None => op(Opcode::MOVQ, QQ_PQ),
            Mand::P66 => op(Opcode::MOVDQA, WX_VX),
            Mand::F3 => op(Opcode::MOVDQU, WX_VX),
            Mand::F2 => Entry::Invalid,
        },
        0x80..=0x8f => op_r(JCC[(byte & 0xf) as usize], JZ_ONLY, Force64),
        0x90..=0x9f => op(SETCC[(byte & 0xf) as usize], EB_ONLY),
        0xa0 => op_r(Opcode::PUSH, PUSH_FS, Default64),
        0xa1 => op_r(Opcode::POP, PUSH_FS, Default64),
        0xa2 => op(Opcode::CPUID, NONE),
        0xa3 => op(Opcode::BT, EV_GV),
        0xa4 => op(Opcode::SHLD, EV_GV_IB),
        0xa5 => op(Opcode::SHLD, EV_GV_CL),
        0xa8 => op_r(Opcode::PUSH, PUSH_GS, Default64),
        0xa9 => op_r(Opcode::POP, PUSH_GS, Default64),
        0xaa => op(Opcode::RSM, NONE),
        0xab => op(Opcode::BTS, EV_GV),
        0xac => op(Opcode::SHRD, EV_GV_IB),
        0xad => op(Opcode::SHRD, EV_GV_CL),
        0xae => Entry::Group(Group::G15),
        0xaf => op(Opcode::IMUL, GV_EV),
        0xb0 => op(Opcode::CMPXCHG, EB_GB),
        0xb1 => op(Opcode::CMPXCHG, EV_GV),
        0xb2 => op(Opcode::LSS, GV_MP),
        0xb3 => op(Opcode::BTR, EV_GV),
        0xb4 => op(Opcode::LFS, GV_MP),
        0xb5 => op(Opcode::LGS, GV_MP),
        0xb6 => op(Opcode::MOVZX, GV_EB),
        0xb7 => op(Opcode::MOVZX, GV_EW),
        0xb8 => match mand {
            Mand::F3 => op(Opcode::POPCNT, GV_EV),
            _ => Entry::Invalid,
        },
        0xb9 => op(Opcode::UD1, GV_EV),
        0xba => Entry::Group(Group::G8),
        0xbb => op(Opcode::BTC, EV_GV),
        0xbc => match mand {
            Mand::F3 => op(Opcode::TZCNT, GV_EV),
            _ => op(Opcode::BSF, GV_EV),
        },
        0xbd => match mand {
            Mand::F3 => op(Opcode::LZCNT, GV_EV),
            _ => op(Opcode::BSR, GV_EV),
        },
        0xbe => op(Opcode::MOVSX, GV_EB),
        0xbf => op(Opcode::MOVSX, GV_EW),
        0xc0 => op(Opcode::XADD, EB_GB),
        0xc1 => op(Opcode::XADD, EV_GV),
        0xc2 => match mand {
            Mand::None => op(Opcode::CMPPS, VX_WX_IB),
            Mand::P66 => op(Opcode::CMPPD, VX_WX_IB),
            Mand::F3 => op(Opcode::CMPSS, VX_WD_IB),
            Mand::F2 => op(Opcode::CMPSD, VX_WQ_IB),
        },
        0xc3 => op(Opcode::MOVNTI, MY_GY),
        0xc4 => match mand {
            Mand::None => op(Opcode::PINSRW, PQ_EW_IB),
            Mand::P66 => op(Opcode::PINSRW, VDQ_EW_IB),
            _ => Entry::Invalid,
        },
        0xc5 => match mand {
            Mand::None => op(Opcode::PEXTRW, GY_NQ_IB),
            Mand::P66 => op(Opcode::PEXTRW, GY_UDQ_IB),
            _ => Entry::Invalid,
        },
        0xc6 => ps_pd(mand, Opcode::SHUFPS, Opcode::SHUFPD, VX_WX_IB),
        0xc7 => Entry::Group(Group::G9),
        0xc8..=0xcf => op(Opcode::BSWAP, reg_slice(&ZV, byte)),
        0xd0 => match mand {
            Mand::P66 => op(Opcode::ADDSUBPD, VX_WX),
            Mand::F2 => op(Opcode::ADDSUBPS, VX_WX),
            _ => Entry::Invalid,
        },
        0xd1 => mmx_xmm(mand, Opcode::PSRLW),
        0xd2 => mmx_xmm(mand, Opcode::PSRLD),
        0xd3 => mmx_xmm(mand, Opcode::PSRLQ),
        0xd4 => mmx_xmm(mand, Opcode::PADDQ),
        0xd5 => mmx_xmm(mand, Opcode::PMULLW),
        0xd6 => xmm_only(mand, Opcode::MOVQ, WQ_VX),
        0xd7 => match mand {
            Mand::None => op(Opcode::PMOVMSKB, GY_NQ),
            Mand::P66 => op(Opcode::PMOVMSKB, GY_UX),
            _ => Entry::Invalid,
        },
        0xd8 => mmx_xmm(mand, Opcode::PSUBUSB),
        0xd9 => mmx_xmm(mand, Opcode::PSUBUSW),
        0xda => mmx_xmm(mand, Opcode::PMINUB),
        0xdb => mmx_xmm(mand, Opcode::PAND),
        0xdc => mmx_xmm(mand, Opcode::PADDUSB),
        0xdd => mmx_xmm(mand, Opcode::PADDUSW),
        0xde => mmx_xmm(mand, Opcode::PMAXUB),
        0xdf => mmx_xmm(mand, Opcode::PANDN),
        0xe0 => mmx_xmm(mand, Opcode::PAVGB),
        0xe1 => mmx_xmm(mand, Opcode::PSRAW),
        0xe2 => mmx_xmm(mand, Opcode::PSRAD),
        0xe3 => mmx_xmm(mand, Opcode::PAVGW),
        0xe4 => mmx_xmm(mand, Opcode::PMULHUW),
        0xe5 => mmx_xmm(mand, Opcode::PMULHW),
        0xe6 => match mand {
            Mand::P66 => op(Opcode::CVTTPD2DQ, VX_WX),
            Mand::F3 => op(Opcode::CVTDQ2PD, VX_WX),
            Mand::F2 => op(Opcode::CVTPD2DQ, VX_WX),
            Mand::None => Entry::Invalid,
        },
        0xe7 => match mand {
            Mand::None => op(Opcode::MOVNTQ, MQ_PQ),
            Mand::P66 => op(Opcode::MOVNTDQ, MX_VX),
            _ => Entry::Invalid,
        },
        0xe8 => mmx_xmm(mand, Opcode::PSUBSB),
        0xe9 => mmx_xmm(mand, Opcode::PSUBSW),
        0xea => mmx_xmm(mand, Opcode::PMINSW),
        0xeb => mmx_xmm(mand, Opcode::POR),
        0xec => mmx_xmm(mand, Opcode::PADDSB),
        0xed => mmx_xmm(mand, Opcode::PADDSW),
        0xee => mmx_xmm(mand, Opcode::PMAXSW),
        0xef => mmx_xmm(mand, Opcode::PXOR),
        0xf0 => match mand {
            Mand::F2 => op(Opcode::LDDQU, VX_MX),
            _ => Entry::Invalid,
        },
        0xf1 => mmx_xmm(mand, Opcode::PSLLW),
        0xf2 => mmx_xmm(mand, Opcode::PSLLD),
        0xf3 => mmx_xmm(mand, Opcode::PSLLQ),
        0xf4 => mmx_xmm(mand, Opcode::PMULUDQ),
        0xf5 => mmx_xmm(mand, Opcode::PMADDWD),
        0xf6 => mmx_xmm(mand, Opcode::PSADBW),
        0xf7 => match mand {
            Mand::None => op(Opcode::MASKMOVQ, PQ_NQ),
            Mand::P66 => op(Opcode::MASKMOVDQU, VX_UDQ),
            _ => Entry::Invalid,
        },
        0xf8 => mmx_xmm(mand, Opcode::PSUBB),
        0xf9 => mmx_xmm(mand, Opcode::PSUBW),
        0xfa => mmx_xmm(mand, Opcode::PSUBD),
        0xfb => mmx_xmm(mand, Opcode::PSUBQ),
        0xfc => mmx_xmm(mand, Opcode::PADDB),
        0xfd => mmx_xmm(mand, Opcode::PADDW),
        0xfe => mmx_xmm(mand, Opcode::PADDD),
        0xff => op(Opcode::UD0, GV_EV),
        _ => Entry::Invalid,
    }
}

/// The three-byte `0f 38` map.
fn three_byte_38(byte: u8, mand: Mand) -> Entry {
    match byte {
        0x00 => mmx_xmm(mand, Opcode::PSHUFB),
        0x01 => mmx_xmm(mand, Opcode::PHADDW),
        0x02 => mmx_xmm(mand, Opcode::PHADDD),
        0x03 => mmx_xmm(mand, Opcode::PHADDSW),
        0x04 => mmx_xmm(mand, Opcode::PMADDUBSW),
        0x05 => mmx_xmm(mand, Opcode::PHSUBW),
        0x06 => mmx_xmm(mand, Opcode::PHSUBD),
        0x07 => mmx_xmm(mand, Opcode::PHSUBSW),
        0x08 => mmx_xmm(mand, Opcode::PSIGNB),
        0x09 => mmx_xmm(mand, Opcode::PSIGNW),
        0x0a => mmx_xmm(mand, Opcode::PSIGND),
        0x0b => mmx_xmm(mand, Opcode::PMULHRSW),
        0x10 => xmm_only(mand, Opcode::PBLENDVB, VX_WX),
        0x14 => xmm_only(mand, Opcode::BLENDVPS, VX_WX),
        0x15 => xmm_only(mand, Opcode::BLENDVPD, VX_WX),
        0x17 => xmm_only(mand, Opcode::PTEST, VX_WX),
        0x1c => mmx_xmm(mand, Opcode::PABSB),
        0x1d => mmx_xmm(mand, Opcode::PABSW),
        0x1e => mmx_xmm(mand, Opcode::PABSD),
        0x20 => xmm_only(mand, Opcode::PMOVSXBW, VX_WQ),
        0x21 => xmm_only(mand, Opcode::PMOVSXBD, VX_WD),
        0x22 => xmm_only(mand, Opcode::PMOVSXBQ, VX_WD),
        0x23 => xmm_only(mand, Opcode::PMOVSXWD, VX_WQ),
        0x24 => xmm_only(mand, Opcode::PMOVSXWQ, VX_WD),
        0x25 => xmm_only(mand, Opcode::PMOVSXDQ, VX_WQ),
        0x28 => xmm_only(mand, Opcode::PMULDQ, VX_WX),
        0x29 => xmm_only(mand, Opcode::PCMPEQQ, VX_WX),
        0x2a => xmm_only(mand, Opcode::MOVNTDQA, VX_MX),
        0x2b => xmm_only(mand, Opcode::PACKUSDW, VX_WX),
        0x30 => xmm_only(mand, Opcode::PMOVZXBW, VX_WQ),
        0x31 => xmm_only(mand, Opcode::PMOVZXBD, VX_WD),
        0x32 => xmm_only(mand, Opcode::PMOVZXBQ, VX_WD),
        0x33 => xmm_only(mand, Opcode::PMOVZXWD, VX_WQ),
        0x34 => xmm_only(mand, Opcode::PMOVZXWQ, VX_WD),
        0x35 => xmm_only(mand, Opcode::PMOVZXDQ, VX_WQ),
        0x37 => xmm_only(mand, Opcode::PCMPGTQ, VX_WX),
        0x38 => xmm_only(mand, Opcode::PMINSB, VX_WX),
        0x39 => xmm_only(mand, Opcode::PMINSD, VX_WX),
        0x3a => xmm_only(mand, Opcode::PMINUW, VX_WX),
        0x3b => xmm_only(mand, Opcode::PMINUD, VX_WX),
        0x3c => xmm_only(mand, Opcode::PMAXSB, VX_WX),
        0x3d => xmm_only(mand, Opcode::PMAXSD, VX_WX),
        0x3e => xmm_only(mand, Opcode::PMAXUW, VX_WX),
        0x3f => xmm_only(mand, Opcode::PMAXUD, VX_WX),
        0x40 => xmm_only(mand, Opcode::PMULLD, VX_WX),
        0x41 => xmm_only(mand, Opcode::PHMINPOSUW, VX_WX),
        0xdb => xmm_only(mand, Opcode::AESIMC, VX_WX),
        0xdc => xmm_only(mand, Opcode::AESENC, VX_WX),
        0xdd => xmm_only(mand, Opcode::AESENCLAST, VX_WX),
        0xde => xmm_only(mand, Opcode::AESDEC, VX_WX),
        0xdf => xmm_only(mand, Opcode::AESDECLAST, VX_WX),
        0xf0 => match mand {
            Mand::F2 => op(Opcode::CRC32, GY_EB),
            _ => Entry::Invalid,
        },
        0xf1 => match mand {
            Mand::F2 => op(Opcode::CRC32, GY_EV),
            _ => Entry::Invalid,
        },
        _ => Entry::Invalid,
    }
}

/// The three-byte `0f 3a` map.
fn three_byte_3a(byte: u8, mand: Mand) -> Entry {
    match byte {
        0x08 => xmm_only(mand, Opcode::ROUNDPS, VX_WX_IB),
        0x09 => xmm_only(mand, Opcode::ROUNDPD, VX_WX_IB),
        0x0a => xmm_only(mand, Opcode::ROUNDSS, VX_WD_IB),
        0x0b => xmm_only(mand, Opcode::ROUNDSD, VX_WQ_IB),
        0x0c => xmm_only(mand, Opcode::BLENDPS, VX_WX_IB),
        0x0d => xmm_only(mand, Opcode::BLENDPD, VX_WX_IB),
        0x0e => xmm_only(mand, Opcode::PBLENDW, VX_WX_IB),
        0x0f => match mand {
            Mand::None => op(Opcode::PALIGNR, PQ_QQ_IB),
            Mand::P66 => op(Opcode::PALIGNR, VX_WX_IB),
            _ => Entry::Invalid,
        },
        0x14 => xmm_only(mand, Opcode::PEXTRB, EB_VDQ_IB),
        0x15 => xmm_only(mand, Opcode::PEXTRW, EW_VDQ_IB),
        0x16 => xmm_only(mand, Opcode::PEXTRD, EY_VDQ_IB),
        0x17 => xmm_only(mand, Opcode::EXTRACTPS, ED_VDQ_IB),
        0x20 => xmm_only(mand, Opcode::PINSRB, VDQ_EB_IB),
        0x21 => xmm_only(mand, Opcode::INSERTPS, VX_WD_IB),
        0x22 => xmm_only(mand, Opcode::PINSRD, VDQ_EY_IB),
        0x40 => xmm_only(mand, Opcode::DPPS, VX_WX_IB),
        0x41 => xmm_only(mand, Opcode::DPPD, VX_WX_IB),
        0x42 => xmm_only(mand, Opcode::MPSADBW, VX_WX_IB),
        0x44 => xmm_only(mand, Opcode::PCLMULQDQ, VX_WX_IB),
        0x60 => xmm_only(mand, Opcode::PCMPESTRM, VDQ_WDQ_IB),
        0x61 => xmm_only(mand, Opcode::PCMPESTRI, VDQ_WDQ_IB),
        0x62 => xmm_only(mand, Opcode::PCMPISTRM, VDQ_WDQ_IB),
        0x63 => xmm_only(mand, Opcode::PCMPISTRI, VDQ_WDQ_IB),
        0xdf => xmm_only(mand, Opcode::AESKEYGENASSIST, VX_WX_IB),
        _ => Entry::Invalid,
    }
}

/// Resolve a group opcode. `modrm` has already been read by the driver and
/// is shared with addressing-form decode.
pub(crate) fn group_entry(
    group: Group,
    modrm: crate::modrm::ModRm,
    mand: Mand,
    prefixes: &Prefixes,
) -> Entry {
    use OpSizeRule::{Default64, Force64, Only64};
    let reg = modrm.reg();
    let rm = modrm.rm();
    let direct = modrm.mod_() == 0b11;
    match group {
        Group::G1 { byte } => {
            let opcode = [
                Opcode::ADD,
                Opcode::OR,
                Opcode::ADC,
                Opcode::SBB,
                Opcode::AND,
                Opcode::SUB,
                Opcode::XOR,
                Opcode::CMP,
            ][reg as usize];
            match byte {
                0x80 | 0x82 => op(opcode, EB_IB),
                0x81 => op(opcode, EV_IZ),
                _ => op(opcode, EV_IB),
            }
        }
        Group::G1A => {
            if reg == 0 {
                op_r(Opcode::POP, EV_ONLY, Default64)
            } else {
                Entry::Invalid
            }
        }
        Group::G2 { byte } => {
            let opcode = [
                Opcode::ROL,
                Opcode::ROR,
                Opcode::RCL,
                Opcode::RCR,
                Opcode::SHL,
                Opcode::SHR,
                Opcode::SHL,
                Opcode::SAR,
            ][reg as usize];
            match byte {
                0xc0 => op(opcode, EB_IB),
                0xc1 => op(opcode, EV_IB),
                0xd0 => op(opcode, EB_1),
                0xd1 => op(opcode, EV_1),
                0xd2 => op(opcode, EB_CL),
                _ => op(opcode, EV_CL),
            }
        }
        Group::G3 { byte } => {
            let wide = byte == 0xf7;
            match reg {
                0 | 1 => {
                    if wide {
                        op(Opcode::TEST, EV_IZ)
                    } else {
                        op(Opcode::TEST, EB_IB)
                    }
                }
                _ => {
                    let opcode = [
                        Opcode::NOT,
                        Opcode::NEG,
                        Opcode::MUL,
                        Opcode::IMUL,
                        Opcode::DIV,
                        Opcode::IDIV,
                    ][(reg - 2) as usize];
                    if wide {
                        op(opcode, EV_ONLY)
                    } else {
                        op(opcode, EB_ONLY)
                    }
                }
            }
        }
        Group::G4 => match reg {
            0 => op(Opcode::INC, EB_ONLY),
            1 => op(Opcode::DEC, EB_ONLY),
            _ => Entry::Invalid,
        },
        Group::G5 => match reg {
            0 => op(Opcode::INC, EV_ONLY),
            1 => op(Opcode::DEC, EV_ONLY),
            2 => op_r(Opcode::CALL, EV_ONLY, Force64),
            3 => op(Opcode::CALLF, MP_ONLY),
            4 => op_r(Opcode::JMP, EV_ONLY, Force64),
            5 => op(Opcode::JMPF, MP_ONLY),
            6 => op_r(Opcode::PUSH, EV_ONLY, Default64),
            _ => Entry::Invalid,
        },
        Group::G6 => match reg {
            0 => op(Opcode::SLDT, EW_ONLY),
            1 => op(Opcode::STR, EW_ONLY),
            2 => op(Opcode::LLDT, EW_ONLY),
            3 => op(Opcode::LTR, EW_ONLY),
            4 => op(Opcode::VERR, EW_ONLY),
            5 => op(Opcode::VERW, EW_ONLY),
            _ => Entry::Invalid,
        },
        Group::G7 => {
            if direct {
                match (reg, rm) {
                    (1, 0) => op(Opcode::MONITOR, NONE),
                    (1, 1) => op(Opcode::MWAIT, NONE),
                    (4, _) => op(Opcode::SMSW, EV_ONLY),
                    (6, _) => op(Opcode::LMSW, EW_ONLY),
                    (7, 0) => op_r(Opcode::SWAPGS, NONE, Only64),
                    (7, 1) => op(Opcode::RDTSCP, NONE),
                    _ => Entry::Invalid,
                }
            } else {
                match reg {
                    0 => op(Opcode::SGDT, MEM_ONLY),
                    1 => op(Opcode::SIDT, MEM_ONLY),
                    2 => op(Opcode::LGDT, MEM_ONLY),
                    3 => op(Opcode::LIDT, MEM_ONLY),
                    4 => op(Opcode::SMSW, EV_ONLY),
                    6 => op(Opcode::LMSW, EW_ONLY),
                    7 => op(Opcode::INVLPG, MB_ONLY),
                    _ => Entry::Invalid,
                }
            }
        }
        Group::G8 => match reg {
            4 => op(Opcode::BT, EV_IB),
            5 => op(Opcode::BTS, EV_IB),
            6 => op(Opcode::BTR, EV_IB),
            7 => op(Opcode::BTC, EV_IB),
            _ => Entry::Invalid,
        },
        Group::G9 => {
            let wide = prefixes.rex().map(|r| r.w()).unwrap_or(false);
            if direct {
                match reg {
                    6 => op(Opcode::RDRAND, RV_ONLY),
                    7 => op(Opcode::RDSEED, RV_ONLY),
                    _ => Entry::Invalid,
                }
            } else {
                match (reg, mand) {
                    (1, Mand::None) => {
                        if wide {
                            op(Opcode::CMPXCHG16B, MDQ_ONLY)
                        } else {
                            op(Opcode::CMPXCHG8B, MQ_ONLY)
                        }
                    }
                    (6, Mand::None) => op(Opcode::VMPTRLD, MQ_ONLY),
                    (6, Mand::P66) => op(Opcode::VMCLEAR, MQ_ONLY),
                    (6, Mand::F3) => op(Opcode::VMXON, MQ_ONLY),
                    (7, Mand::None) => op(Opcode::VMPTRST, MQ_ONLY),
                    _ => Entry::Invalid,
                }
            }
        }
        Group::G11 { byte } => {
            if reg == 0 {
                if byte == 0xc6 {
                    op(Opcode::MOV, EB_IB)
                } else {
                    op(Opcode::MOV, EV_IZ)
                }
            } else {
                Entry::Invalid
            }
        }
        Group::G12 => shift_group(
            direct,
            mand,
            reg,
            [None, None, Some(Opcode::PSRLW), None, Some(Opcode::PSRAW), None, Some(Opcode::PSLLW), None],
        ),
        Group::G13 => shift_group(
            direct,
            mand,
            reg,
            [None, None, Some(Opcode::PSRLD), None, Some(Opcode::PSRAD), None, Some(Opcode::PSLLD), None],
        ),
        Group::G14 => {
            let dq = mand == Mand::P66;
            match reg {
                2 => shift_entry(direct, mand, Opcode::PSRLQ),
                3 if dq => shift_entry(direct, mand, Opcode::PSRLDQ),
                6 => shift_entry(direct, mand, Opcode::PSLLQ),
                7 if dq => shift_entry(direct, mand, Opcode::PSLLDQ),
                _ => Entry::Invalid,
            }
        }
        Group::G15 => {
            if direct {
                match (reg, mand) {
                    (0, Mand::F3) => op_r(Opcode::RDFSBASE, RY_ONLY, Only64),
                    (1, Mand::F3) => op_r(Opcode::RDGSBASE, RY_ONLY, Only64),
                    (2, Mand::F3) => op_r(Opcode::WRFSBASE, RY_ONLY, Only64),
                    (3, Mand::F3) => op_r(Opcode::WRGSBASE, RY_ONLY, Only64),
                    (5, Mand::None) => op(Opcode::LFENCE, NONE),
                    (6, Mand::None) => op(Opcode::MFENCE, NONE),
                    (7, Mand::None) => op(Opcode::SFENCE, NONE),
                    _ => Entry::Invalid,
                }
            } else {
                match reg {
                    0 => op(Opcode::FXSAVE, MEM_ONLY),
                    1 => op(Opcode::FXRSTOR, MEM_ONLY),
                    2 => op(Opcode::LDMXCSR, MD_ONLY),
                    3 => op(Opcode::STMXCSR, MD_ONLY),
                    4 => op(Opcode::XSAVE, MEM_ONLY),
                    5 => op(Opcode::XRSTOR, MEM_ONLY),
                    6 => op(Opcode::XSAVEOPT, MEM_ONLY),
                    7 => op(Opcode::CLFLUSH, MB_ONLY),
                    _ => Entry::Invalid,
                }
            }
        }
        Group::G16 => {
            if direct {
                op(Opcode::NOP, EV_ONLY)
            } else {
                match reg {
                    0 => op(Opcode::PREFETCHNTA, MB_ONLY),
                    1 => op(Opcode::PREFETCHT0, MB_ONLY),
                    2 => op(Opcode::PREFETCHT1, MB_ONLY),
                    3 => op(Opcode::PREFETCHT2, MB_ONLY),
                    _ => op(Opcode::NOP, EV_ONLY),
                }
            }
        }
        Group::G17 => match reg {
            1 => op(Opcode::BLSR, BY_EY),
            2 => op(Opcode::BLSMSK, BY_EY),
            3 => op(Opcode::BLSI, BY_EY),
            _ => Entry::Invalid,
        },
        Group::X87 { byte } => x87_entry(byte, modrm),
    }
}

/// Immediate shift sub-tables 12 and 13. Register-direct only, MMX without
/// a prefix and XMM under `66`.
fn shift_group(direct: bool, mand: Mand, reg: u8, table: [Option<Opcode>; 8]) -> Entry {
    match table[reg as usize] {
        Some(opcode) => shift_entry(direct, mand, opcode),
        None => Entry::Invalid,
    }
}

fn shift_entry(direct: bool, mand: Mand, opcode: Opcode) -> Entry {
    if !direct {
        return Entry::Invalid;
    }
    match mand {
        Mand::None => op(opcode, NQ_IB),
        Mand::P66 => op(opcode, UX_IB),
        _ => Entry::Invalid,
    }
}

/// The eight x87 escape bytes, `d8` through `df`. Memory forms index by
/// ModR/M.reg; register forms by (reg, rm).
fn x87_entry(byte: u8, modrm: crate::modrm::ModRm) -> Entry {
    let reg = modrm.reg();
    let rm = modrm.rm() as usize;
    if modrm.mod_() != 0b11 {
        return x87_mem(byte, reg);
    }
    match byte {
        0xd8 => {
            let opcode = [
                Opcode::FADD,
                Opcode::FMUL,
                Opcode::FCOM,
                Opcode::FCOMP,
                Opcode::FSUB,
                Opcode::FSUBR,
                Opcode::FDIV,
                Opcode::FDIVR,
            ][reg as usize];
            match reg {
                2 | 3 => op(opcode, &ST[rm]),
                _ => op(opcode, &ST0_ST[rm]),
            }
        }
        0xd9 => match (reg, rm) {
            (0, _) => op(Opcode::FLD, &ST[rm]),
            (1, _) => op(Opcode::FXCH, &ST[rm]),
            (2, 0) => op(Opcode::FNOP, NONE),
            (4, 0) => op(Opcode::FCHS, NONE),
            (4, 1) => op(Opcode::FABS, NONE),
            (4, 4) => op(Opcode::FTST, NONE),
            (4, 5) => op(Opcode::FXAM, NONE),
            (5, 0) => op(Opcode::FLD1, NONE),
            (5, 1) => op(Opcode::FLDL2T, NONE),
            (5, 2) => op(Opcode::FLDL2E, NONE),
            (5, 3) => op(Opcode::FLDPI, NONE),
            (5, 4) => op(Opcode::FLDLG2, NONE),
            (5, 5) => op(Opcode::FLDLN2, NONE),
            (5, 6) => op(Opcode::FLDZ, NONE),
            (6, 0) => op(Opcode::F2XM1, NONE),
            (6, 1) => op(Opcode::FYL2X, NONE),
            (6, 2) => op(Opcode::FPTAN, NONE),
            (6, 3) => op(Opcode::FPATAN, NONE),
            (6, 4) => op(Opcode::FXTRACT, NONE),
            (6, 5) => op(Opcode::FPREM1, NONE),
            (6, 6) => op(Opcode::FDECSTP, NONE),
            (6, 7) => op(Opcode::FINCSTP, NONE),
            (7, 0) => op(Opcode::FPREM, NONE),
            (7, 1) => op(Opcode::FYL2XP1, NONE),
            (7, 2) => op(Opcode::FSQRT, NONE),
            (7, 3) => op(Opcode::FSINCOS, NONE),
            (7, 4) => op(Opcode::FRNDINT, NONE),
            (7, 5) => op(Opcode::FSCALE, NONE),
            (7, 6) => op(Opcode::FSIN, NONE),
            (7, 7) => op(Opcode::FCOS, NONE),
            _ => Entry::Invalid,
        },
        0xda => match (reg, rm) {
            (0, _) => op(Opcode::FCMOVB, &ST0_ST[rm]),
            (1, _) => op(Opcode::FCMOVE, &ST0_ST[rm]),
            (2, _) => op(Opcode::FCMOVBE, &ST0_ST[rm]),
            (3, _) => op(Opcode::FCMOVU, &ST0_ST[rm]),
            (5, 1) => op(Opcode::FUCOMPP, NONE),
            _ => Entry::Invalid,
        },
        0xdb => match (reg, rm) {
            (0, _) => op(Opcode::FCMOVNB, &ST0_ST[rm]),
            (1, _) => op(Opcode::FCMOVNE, &ST0_ST[rm]),
            (2, _) => op(Opcode::FCMOVNBE, &ST0_ST[rm]),
            (3, _) => op(Opcode::FCMOVNU, &ST0_ST[rm]),
            (4, 2) => op(Opcode::FNCLEX, NONE),
            (4, 3) => op(Opcode::FNINIT, NONE),
            (5, _) => op(Opcode::FUCOMI, &ST0_ST[rm]),
            (6, _) => op(Opcode::FCOMI, &ST0_ST[rm]),
            _ => Entry::Invalid,
        },
        0xdc => match reg {
            0 => op(Opcode::FADD, &ST_ST0[rm]),
            1 => op(Opcode::FMUL, &ST_ST0[rm]),
            4 => op(Opcode::FSUBR, &ST_ST0[rm]),
            5 => op(Opcode::FSUB, &ST_ST0[rm]),
            6 => op(Opcode::FDIVR, &ST_ST0[rm]),
            7 => op(Opcode::FDIV, &ST_ST0[rm]),
            _ => Entry::Invalid,
        },
        0xdd => match reg {
            0 => op(Opcode::FFREE, &ST[rm]),
            2 => op(Opcode::FST, &ST[rm]),
            3 => op(Opcode::FSTP, &ST[rm]),
            4 => op(Opcode::FUCOM, &ST[rm]),
            5 => op(Opcode::FUCOMP, &ST[rm]),
            _ => Entry::Invalid,
        },
        0xde => match (reg, rm) {
            (0, _) => op(Opcode::FADDP, &ST_ST0[rm]),
            (1, _) => op(Opcode::FMULP, &ST_ST0[rm]),
            (3, 1) => op(Opcode::FCOMPP, NONE),
            (4, _) => op(Opcode::FSUBRP, &ST_ST0[rm]),
            (5, _) => op(Opcode::FSUBP, &ST_ST0[rm]),
            (6, _) => op(Opcode::FDIVRP, &ST_ST0[rm]),
            (7, _) => op(Opcode::FDIVP, &ST_ST0[rm]),
            _ => Entry::Invalid,
        },
        0xdf => match (reg, rm) {
            (4, 0) => op(Opcode::FNSTSW, AX_ONLY),
            (5, _) => op(Opcode::FUCOMIP, &ST0_ST[rm]),
            (6, _) => op(Opcode::FCOMIP, &ST0_ST[rm]),
            _ => Entry::Invalid,
        },
        _ => Entry::Invalid,
    }
}

fn x87_mem(byte: u8, reg: u8) -> Entry {
    let arith = |ops: [Opcode; 8], shape: &'static [Desc]| op(ops[reg as usize], shape);
    const FARITH: [Opcode; 8] = [
        Opcode::FADD,
        Opcode::FMUL,
        Opcode::FCOM,
        Opcode::FCOMP,
        Opcode::FSUB,
        Opcode::FSUBR,
        Opcode::FDIV,
        Opcode::FDIVR,
    ];
    const FIARITH: [Opcode; 8] = [
        Opcode::FIADD,
        Opcode::FIMUL,
        Opcode::FICOM,
        Opcode::FICOMP,
        Opcode::FISUB,
        Opcode::FISUBR,
        Opcode::FIDIV,
        Opcode::FIDIVR,
    ];
    match byte {
        0xd8 => arith(FARITH, MD_ONLY),
        0xd9 => match reg {
            0 => op(Opcode::FLD, MD_ONLY),
            2 => op(Opcode::FST, MD_ONLY),
            3 => op(Opcode::FSTP, MD_ONLY),
            4 => op(Opcode::FLDENV, MEM_ONLY),
            5 => op(Opcode::FLDCW, MW_ONLY),
            6 => op(Opcode::FNSTENV, MEM_ONLY),
            7 => op(Opcode::FNSTCW, MW_ONLY),
            _ => Entry::Invalid,
        },
        0xda => arith(FIARITH, MD_ONLY),
        0xdb => match reg {
            0 => op(Opcode::FILD, MD_ONLY),
            1 => op(Opcode::FISTTP, MD_ONLY),
            2 => op(Opcode::FIST, MD_ONLY),
            3 => op(Opcode::FISTP, MD_ONLY),
            5 => op(Opcode::FLD, MT_ONLY),
            7 => op(Opcode::FSTP, MT_ONLY),
            _ => Entry::Invalid,
        },
        0xdc => arith(FARITH, MQ_ONLY),
        0xdd => match reg {
            0 => op(Opcode::FLD, MQ_ONLY),
            1 => op(Opcode::FISTTP, MQ_ONLY),
            2 => op(Opcode::FST, MQ_ONLY),
            3 => op(Opcode::FSTP, MQ_ONLY),
            4 => op(Opcode::FRSTOR, MEM_ONLY),
            6 => op(Opcode::FNSAVE, MEM_ONLY),
            7 => op(Opcode::FNSTSW, MW_ONLY),
            _ => Entry::Invalid,
        },
        0xde => arith(FIARITH, MW_ONLY),
        0xdf => match reg {
            0 => op(Opcode::FILD, MW_ONLY),
            1 => op(Opcode::FISTTP, MW_ONLY),
            2 => op(Opcode::FIST, MW_ONLY),
            3 => op(Opcode::FISTP, MW_ONLY),
            4 => op(Opcode::FBLD, MT_ONLY),
            5 => op(Opcode::FILD, MQ_ONLY),
            6 => op(Opcode::FBSTP, MT_ONLY),
            7 => op(Opcode::FISTP, MQ_ONLY),
            _ => Entry::Invalid,
        },
        _ => Entry::Invalid,
    }
}

/// The VEX- and EVEX-coded maps. Opcode identity here folds in the
/// mandatory prefix from the vector prefix's `pp` field, and for a couple
/// of entries the vector length.
pub(crate) fn vex_entry(
    map: OpcodeMap,
    byte: u8,
    mand: Mand,
    length: VectorLength,
    w: bool,
) -> Entry {
    match map {
        OpcodeMap::F => vex_0f(byte, mand, length),
        OpcodeMap::F38 => vex_0f38(byte, mand, w),
        OpcodeMap::F3A => vex_0f3a(byte, mand, w),
        OpcodeMap::Primary => Entry::Invalid,
    }
}

/// `66`-prefixed entries whose opcode identity folds in the vector W bit.
fn xmm_only_w(mand: Mand, w: bool, w0: Opcode, w1: Opcode, shape: &'static [Desc]) -> Entry {
    match mand {
        Mand::P66 => op(if w { w1 } else { w0 }, shape),
        _ => Entry::Invalid,
    }
}

/// Scalar FMA entries: W picks between the `ss` and `sd` readings.
fn fma_scalar(mand: Mand, w: bool, ss: Opcode, sd: Opcode) -> Entry {
    match mand {
        Mand::P66 if w => op(sd, VX_HX_WQ),
        Mand::P66 => op(ss, VX_HX_WD),
        _ => Entry::Invalid,
    }
}

fn vex_ps_pd_ss_sd(
    mand: Mand,
    ps: Opcode,
    pd: Opcode,
    ss: Opcode,
    sd: Opcode,
) -> Entry {
    match mand {
        Mand::None => op(ps, VX_HX_WX),
        Mand::P66 => op(pd, VX_HX_WX),
        Mand::F3 => op(ss, VX_HX_WD),
        Mand::F2 => op(sd, VX_HX_WQ),
    }
}

fn vex_0f(byte: u8, mand: Mand, length: VectorLength) -> Entry {
    match byte {
        0x10 => match mand {
            Mand::None => op(Opcode::VMOVUPS, VX_WX),
            Mand::P66 => op(Opcode::VMOVUPD, VX_WX),
            Mand::F3 => op(Opcode::VMOVSS, VX_WD),
            Mand::F2 => op(Opcode::VMOVSD, VX_WQ),
        },
        0x11 => match mand {
            Mand::None => op(Opcode::VMOVUPS, WX_VX),
            Mand::P66 => op(Opcode::VMOVUPD, WX_VX),
            Mand::F3 => op(Opcode::VMOVSS, WD_VX),
            Mand::F2 => op(Opcode::VMOVSD, WQ_VX),
        },
        0x28 => ps_pd(mand, Opcode::VMOVAPS, Opcode::VMOVAPD, VX_WX),
        0x29 => ps_pd(mand, Opcode::VMOVAPS, Opcode::VMOVAPD, WX_VX),
        0x2e => match mand {
            Mand::None => op(Opcode::VUCOMISS, VX_WD),
            Mand::P66 => op(Opcode::VUCOMISD, VX_WQ),
            _ => Entry::Invalid,
        },
        0x2f => match mand {
            Mand::None => op(Opcode::VCOMISS, VX_WD),
            Mand::P66 => op(Opcode::VCOMISD, VX_WQ),
            _ => Entry::Invalid,
        },
        0x51 => match mand {
            Mand::None => op(Opcode::VSQRTPS, VX_WX),
            Mand::P66 => op(Opcode::VSQRTPD, VX_WX),
            Mand::F3 => op(Opcode::VSQRTSS, VX_HX_WD),
            Mand::F2 => op(Opcode::VSQRTSD, VX_HX_WQ),
        },
        0x54 => ps_pd(mand, Opcode::VANDPS, Opcode::VANDPD, VX_HX_WX),
        0x55 => ps_pd(mand, Opcode::VANDNPS, Opcode::VANDNPD, VX_HX_WX),
        0x56 => ps_pd(mand, Opcode::VORPS, Opcode::VORPD, VX_HX_WX),
        0x57 => ps_pd(mand, Opcode::VXORPS, Opcode::VXORPD, VX_HX_WX),
        0x58 => vex_ps_pd_ss_sd(
            mand,
            Opcode::VADDPS,
            Opcode::VADDPD,
            Opcode::VADDSS,
            Opcode::VADDSD,
        ),
        0x59 => vex_ps_pd_ss_sd(
            mand,
            Opcode::VMULPS,
            Opcode::VMULPD,
            Opcode::VMULSS,
            Opcode::VMULSD,
        ),
        0x5a => match mand {
            Mand::None => op(Opcode::VCVTPS2PD, VX_WX),
            Mand::P66 => op(Opcode::VCVTPD2PS, VX_WX),
            Mand::F3 => op(Opcode::VCVTSS2SD, VX_HX_WD),
            Mand::F2 => op(Opcode::VCVTSD2SS, VX_HX_WQ),
        },
        0x5c => vex_ps_pd_ss_sd(
            mand,
            Opcode::VSUBPS,
            Opcode::VSUBPD,
            Opcode::VSUBSS,
            Opcode::VSUBSD,
        ),
        0x5d => vex_ps_pd_ss_sd(
            mand,
            Opcode::VMINPS,
            Opcode::VMINPD,
            Opcode::VMINSS,
            Opcode::VMINSD,
        ),
        0x5e => vex_ps_pd_ss_sd(
            mand,
            Opcode::VDIVPS,
            Opcode::VDIVPD,
            Opcode::VDIVSS,
            Opcode::VDIVSD,
        ),
        0x5f => vex_ps_pd_ss_sd(
            mand,
            Opcode::VMAXPS,
            Opcode::VMAXPD,
            Opcode::VMAXSS,
            Opcode::VMAXSD,
        ),
        0x6e => xmm_only(mand, Opcode::VMOVD, VDQ_EY),
        0x6f => match mand {
            Mand::P66 => op(Opcode::VMOVDQA, VX_WX),
            Mand::F3 => op(Opcode::VMOVDQU, VX_WX),
            _ => Entry::Invalid,
        },
        0x70 => match mand {
            Mand::P66 => op(Opcode::VPSHUFD, VX_WX_IB),
            Mand::F3 => op(Opcode::VPSHUFHW, VX_WX_IB),
            Mand::F2 => op(Opcode::VPSHUFLW, VX_WX_IB),
            Mand::None => Entry::Invalid,
        },
        0x74 => xmm_only(mand, Opcode::VPCMPEQB, VX_HX_WX),
        0x75 => xmm_only(mand, Opcode::VPCMPEQW, VX_HX_WX),
        0x76 => xmm_only(mand, Opcode::VPCMPEQD, VX_HX_WX),
        0x77 => match (mand, length) {
            (Mand::None, VectorLength::L128) => op(Opcode::VZEROUPPER, NONE),
            (Mand::None, VectorLength::L256) => op(Opcode::VZEROALL, NONE),
            _ => Entry::Invalid,
        },
        0x7e => match mand {
            Mand::P66 => op(Opcode::VMOVD, EY_VDQ),
            Mand::F3 => op(Opcode::VMOVQ, VDQ_WQ),
            _ => Entry::Invalid,
        },
        0x7f => match mand {
            Mand::P66 => op(Opcode::VMOVDQA, WX_VX),
            Mand::F3 => op(Opcode::VMOVDQU, WX_VX),
            _ => Entry::Invalid,
        },
        0xc2 => match mand {
            Mand::None => op(Opcode::VCMPPS, VX_HX_WX_IB),
            Mand::P66 => op(Opcode::VCMPPD, VX_HX_WX_IB),
            Mand::F3 => op(Opcode::VCMPSS, VX_HX_WX_IB),
            Mand::F2 => op(Opcode::VCMPSD, VX_HX_WX_IB),
        },
        0xc6 => ps_pd(mand, Opcode::VSHUFPS, Opcode::VSHUFPD, VX_HX_WX_IB),
        0xd4 => xmm_only(mand, Opcode::VPADDQ, VX_HX_WX),
        0xd5 => xmm_only(mand, Opcode::VPMULLW, VX_HX_WX),
        0xdb => xmm_only(mand, Opcode::VPAND, VX_HX_WX),
        0xdf => xmm_only(mand, Opcode::VPANDN, VX_HX_WX),
        0xeb => xmm_only(mand, Opcode::VPOR, VX_HX_WX),
        0xef => xmm_only(mand, Opcode::VPXOR, VX_HX_WX),
        0xf8 => xmm_only(mand, Opcode::VPSUBB, VX_HX_WX),
        0xf9 => xmm_only(mand, Opcode::VPSUBW, VX_HX_WX),
        0xfa => xmm_only(mand, Opcode::VPSUBD, VX_HX_WX),
        0xfb => xmm_only(mand, Opcode::VPSUBQ, VX_HX_WX),
        0xfc => xmm_only(mand, Opcode::VPADDB, VX_HX_WX),
        0xfd => xmm_only(mand, Opcode::VPADDW, VX_HX_WX),
        0xfe => xmm_only(mand, Opcode::VPADDD, VX_HX_WX),
        _ => Entry::Invalid,
    }
}

fn vex_0f38(byte: u8, mand: Mand, w: bool) -> Entry {
    match byte {
        0x00 => xmm_only(mand, Opcode::VPSHUFB, VX_HX_WX),
        0x0c => xmm_only(mand, Opcode::VPERMILPS, VX_HX_WX),
        0x0d => xmm_only(mand, Opcode::VPERMILPD, VX_HX_WX),
        0x0e => xmm_only(mand, Opcode::VTESTPS, VX_WX),
        0x0f => xmm_only(mand, Opcode::VTESTPD, VX_WX),
        0x16 if !w => xmm_only(mand, Opcode::VPERMPS, VX_HX_WX),
        0x17 => xmm_only(mand, Opcode::VPTEST, VX_WX),
        0x18 => xmm_only(mand, Opcode::VBROADCASTSS, VX_WD),
        0x19 => xmm_only(mand, Opcode::VBROADCASTSD, VX_WQ),
        0x1a => xmm_only(mand, Opcode::VBROADCASTF128, VX_MX),
        0x29 => xmm_only(mand, Opcode::VPCMPEQQ, VX_HX_WX),
        0x2c => xmm_only(mand, Opcode::VMASKMOVPS, VX_HX_MX),
        0x2d => xmm_only(mand, Opcode::VMASKMOVPD, VX_HX_MX),
        0x2e => xmm_only(mand, Opcode::VMASKMOVPS, MX_HX_VX),
        0x2f => xmm_only(mand, Opcode::VMASKMOVPD, MX_HX_VX),
        0x36 if !w => xmm_only(mand, Opcode::VPERMD, VX_HX_WX),
        0x37 => xmm_only(mand, Opcode::VPCMPGTQ, VX_HX_WX),
        0x40 => xmm_only(mand, Opcode::VPMULLD, VX_HX_WX),
        0x45 => xmm_only_w(mand, w, Opcode::VPSRLVD, Opcode::VPSRLVQ, VX_HX_WX),
        0x46 if !w => xmm_only(mand, Opcode::VPSRAVD, VX_HX_WX),
        0x47 => xmm_only_w(mand, w, Opcode::VPSLLVD, Opcode::VPSLLVQ, VX_HX_WX),
        0x58 => xmm_only(mand, Opcode::VPBROADCASTD, VX_WD),
        0x59 => xmm_only(mand, Opcode::VPBROADCASTQ, VX_WQ),
        0x5a => xmm_only(mand, Opcode::VBROADCASTI128, VX_MX),
        0x78 => xmm_only(mand, Opcode::VPBROADCASTB, VX_WB),
        0x79 => xmm_only(mand, Opcode::VPBROADCASTW, VX_WW),
        0x8c => xmm_only_w(mand, w, Opcode::VPMASKMOVD, Opcode::VPMASKMOVQ, VX_HX_MX),
        0x8e => xmm_only_w(mand, w, Opcode::VPMASKMOVD, Opcode::VPMASKMOVQ, MX_HX_VX),
        0x96 => xmm_only_w(mand, w, Opcode::VFMADDSUB132PS, Opcode::VFMADDSUB132PD, VX_HX_WX),
        0x97 => xmm_only_w(mand, w, Opcode::VFMSUBADD132PS, Opcode::VFMSUBADD132PD, VX_HX_WX),
        0x98 => xmm_only_w(mand, w, Opcode::VFMADD132PS, Opcode::VFMADD132PD, VX_HX_WX),
        0x99 => fma_scalar(mand, w, Opcode::VFMADD132SS, Opcode::VFMADD132SD),
        0x9a => xmm_only_w(mand, w, Opcode::VFMSUB132PS, Opcode::VFMSUB132PD, VX_HX_WX),
        0x9b => fma_scalar(mand, w, Opcode::VFMSUB132SS, Opcode::VFMSUB132SD),
        0x9c => xmm_only_w(mand, w, Opcode::VFNMADD132PS, Opcode::VFNMADD132PD, VX_HX_WX),
        0x9d => fma_scalar(mand, w, Opcode::VFNMADD132SS, Opcode::VFNMADD132SD),
        0x9e => xmm_only_w(mand, w, Opcode::VFNMSUB132PS, Opcode::VFNMSUB132PD, VX_HX_WX),
        0x9f => fma_scalar(mand, w, Opcode::VFNMSUB132SS, Opcode::VFNMSUB132SD),
        0xa6 => xmm_only_w(mand, w, Opcode::VFMADDSUB213PS, Opcode::VFMADDSUB213PD, VX_HX_WX),
        0xa7 => xmm_only_w(mand, w, Opcode::VFMSUBADD213PS, Opcode::VFMSUBADD213PD, VX_HX_WX),
        0xa8 => xmm_only_w(mand, w, Opcode::VFMADD213PS, Opcode::VFMADD213PD, VX_HX_WX),
        0xa9 => fma_scalar(mand, w, Opcode::VFMADD213SS, Opcode::VFMADD213SD),
        0xaa => xmm_only_w(mand, w, Opcode::VFMSUB213PS, Opcode::VFMSUB213PD, VX_HX_WX),
        0xab => fma_scalar(mand, w, Opcode::VFMSUB213SS, Opcode::VFMSUB213SD),
        0xac => xmm_only_w(mand, w, Opcode::VFNMADD213PS, Opcode::VFNMADD213PD, VX_HX_WX),
        0xad => fma_scalar(mand, w, Opcode::VFNMADD213SS, Opcode::VFNMADD213SD),
        0xae => xmm_only_w(mand, w, Opcode::VFNMSUB213PS, Opcode::VFNMSUB213PD, VX_HX_WX),
        0xaf => fma_scalar(mand, w, Opcode::VFNMSUB213SS, Opcode::VFNMSUB213SD),
        0xb6 => xmm_only_w(mand, w, Opcode::VFMADDSUB231PS, Opcode::VFMADDSUB231PD, VX_HX_WX),
        0xb7 => xmm_only_w(mand, w, Opcode::VFMSUBADD231PS, Opcode::VFMSUBADD231PD, VX_HX_WX),
        0xb8 => xmm_only_w(mand, w, Opcode::VFMADD231PS, Opcode::VFMADD231PD, VX_HX_WX),
        0xb9 => fma_scalar(mand, w, Opcode::VFMADD231SS, Opcode::VFMADD231SD),
        0xba => xmm_only_w(mand, w, Opcode::VFMSUB231PS, Opcode::VFMSUB231PD, VX_HX_WX),
        0xbb => fma_scalar(mand, w, Opcode::VFMSUB231SS, Opcode::VFMSUB231SD),
        0xbc => xmm_only_w(mand, w, Opcode::VFNMADD231PS, Opcode::VFNMADD231PD, VX_HX_WX),
        0xbd => fma_scalar(mand, w, Opcode::VFNMADD231SS, Opcode::VFNMADD231SD),
        0xbe => xmm_only_w(mand, w, Opcode::VFNMSUB231PS, Opcode::VFNMSUB231PD, VX_HX_WX),
        0xbf => fma_scalar(mand, w, Opcode::VFNMSUB231SS, Opcode::VFNMSUB231SD),
        0xdb => xmm_only(mand, Opcode::VAESIMC, VX_WX),
        0xdc => xmm_only(mand, Opcode::VAESENC, VX_HX_WX),
        0xdd => xmm_only(mand, Opcode::VAESENCLAST, VX_HX_WX),
        0xde => xmm_only(mand, Opcode::VAESDEC, VX_HX_WX),
        0xdf => xmm_only(mand, Opcode::VAESDECLAST, VX_HX_WX),
        0xf2 => match mand {
            Mand::None => op(Opcode::ANDN, GY_BY_EY),
            _ => Entry::Invalid,
        },
        0xf3 => match mand {
            Mand::None => Entry::Group(Group::G17),
            _ => Entry::Invalid,
        },
        0xf5 => match mand {
            Mand::None => op(Opcode::BZHI, GY_EY_BY),
            Mand::F3 => op(Opcode::PEXT, GY_BY_EY),
            Mand::F2 => op(Opcode::PDEP, GY_BY_EY),
            Mand::P66 => Entry::Invalid,
        },
        0xf6 => match mand {
            Mand::F2 => op(Opcode::MULX, GY_BY_EY),
            _ => Entry::Invalid,
        },
        0xf7 => match mand {
            Mand::None => op(Opcode::BEXTR, GY_EY_BY),
            Mand::P66 => op(Opcode::SHLX, GY_EY_BY),
            Mand::F3 => op(Opcode::SARX, GY_EY_BY),
            Mand::F2 => op(Opcode::SHRX, GY_EY_BY),
        },
        _ => Entry::Invalid,
    }
}

fn vex_0f3a(byte: u8, mand: Mand, w: bool) -> Entry {
    match byte {
        0x00 if w => xmm_only(mand, Opcode::VPERMQ, VX_WX_IB),
        0x01 if w => xmm_only(mand, Opcode::VPERMPD, VX_WX_IB),
        0x02 if !w => xmm_only(mand, Opcode::VPBLENDD, VX_HX_WX_IB),
        0x04 => xmm_only(mand, Opcode::VPERMILPS, VX_WX_IB),
        0x05 => xmm_only(mand, Opcode::VPERMILPD, VX_WX_IB),
        0x06 => xmm_only(mand, Opcode::VPERM2F128, VX_HX_WX_IB),
        0x0c => xmm_only(mand, Opcode::VBLENDPS, VX_HX_WX_IB),
        0x0d => xmm_only(mand, Opcode::VBLENDPD, VX_HX_WX_IB),
        0x0f => xmm_only(mand, Opcode::VPALIGNR, VX_HX_WX_IB),
        0x18 => xmm_only(mand, Opcode::VINSERTF128, VX_HX_WX_IB),
        0x19 => xmm_only(mand, Opcode::VEXTRACTF128, WX_VX_IB),
        0x38 => xmm_only(mand, Opcode::VINSERTI128, VX_HX_WX_IB),
        0x39 => xmm_only(mand, Opcode::VEXTRACTI128, WX_VX_IB),
        0x44 => xmm_only(mand, Opcode::VPCLMULQDQ, VX_HX_WX_IB),
        0x46 => xmm_only(mand, Opcode::VPERM2I128, VX_HX_WX_IB),
        0xdf => xmm_only(mand, Opcode::VAESKEYGENASSIST, VX_WX_IB),
        _ => Entry::Invalid,
    }
}
