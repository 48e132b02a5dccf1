//! End-to-end decode tests across the three modes.

use crate::{Decoder, Instruction, Mode, Opcode, Operand, Stream};
use decoder::{Decodable, Decoded, ErrorKind, Reader, Streamable};

fn decode(mode: Mode, bytes: &[u8]) -> Instruction {
    let mut reader = Reader::new(bytes);
    Decoder::new(mode)
        .decode(&mut reader)
        .unwrap_or_else(|err| panic!("{bytes:02x?} failed to decode: {err:?}"))
}

fn decode_err(mode: Mode, bytes: &[u8]) -> decoder::Error {
    let mut reader = Reader::new(bytes);
    match Decoder::new(mode).decode(&mut reader) {
        Ok(inst) => panic!("{bytes:02x?} decoded to `{inst}` instead of failing"),
        Err(err) => err,
    }
}

#[track_caller]
fn test_display_mode(mode: Mode, bytes: &[u8], expected: &str) {
    let inst = decode(mode, bytes);
    assert_eq!(inst.to_string(), expected, "bytes: {bytes:02x?}");
    assert_eq!(inst.len(), bytes.len(), "length of `{expected}`");
}

#[track_caller]
fn test_display(bytes: &[u8], expected: &str) {
    test_display_mode(Mode::Long, bytes, expected);
}

#[test]
fn basics() {
    test_display(&[0x90], "nop");
    test_display(&[0xc3], "ret");
    test_display(&[0x0f, 0x05], "syscall");
    test_display(&[0x48, 0xc7, 0xc0, 0x05, 0x00, 0x00, 0x00], "mov rax, 0x5");
    test_display(&[0xf3, 0x90], "repz nop");
    test_display_mode(Mode::Protected, &[0xb8, 0x01, 0x00, 0x00, 0x00], "mov eax, 0x1");
}

#[test]
fn registers_and_rex() {
    test_display(&[0x55], "push rbp");
    test_display(&[0x41, 0x54], "push r12");
    test_display(&[0x89, 0xd8], "mov eax, ebx");
    test_display(&[0x48, 0x89, 0xe5], "mov rbp, rsp");
    test_display(&[0x0f, 0xb6, 0xc0], "movzx eax, al");
    // the presence of any REX renames the high byte registers
    test_display(&[0x88, 0xe0], "mov al, ah");
    test_display(&[0x40, 0x88, 0xe0], "mov al, spl");
    test_display_mode(Mode::Protected, &[0x40], "inc eax");
}

#[test]
fn memory_addressing() {
    test_display(&[0x8b, 0x45, 0xfc], "mov eax, dword ptr [rbp - 0x4]");
    test_display(
        &[0x48, 0x8d, 0x3d, 0x10, 0x00, 0x00, 0x00],
        "lea rdi, [rip + 0x10]",
    );
    test_display(
        &[0x8b, 0x04, 0x8d, 0x00, 0x01, 0x00, 0x00],
        "mov eax, dword ptr [rcx * 4 + 0x100]",
    );
    test_display(
        &[0x48, 0x8b, 0x44, 0xc8, 0x08],
        "mov rax, qword ptr [rax + rcx * 8 + 0x8]",
    );
    test_display(
        &[0x64, 0x48, 0x8b, 0x04, 0x25, 0x28, 0x00, 0x00, 0x00],
        "mov rax, qword ptr fs:[0x28]",
    );
    test_display(&[0x2e, 0x8b, 0x08], "mov ecx, dword ptr cs:[rax]");
    // the 67 override drops long mode to 32-bit addressing
    test_display(&[0x67, 0x8b, 0x00], "mov eax, dword ptr [eax]");
}

#[test]
fn memory_addressing_16bit() {
    test_display_mode(Mode::Real, &[0x8b, 0x02], "mov ax, word ptr [bp + si]");
    test_display_mode(Mode::Real, &[0x8b, 0x46, 0xfc], "mov ax, word ptr [bp - 0x4]");
    test_display_mode(Mode::Real, &[0x8b, 0x06, 0x34, 0x12], "mov ax, word ptr [0x1234]");
    test_display_mode(Mode::Real, &[0x8b, 0x07], "mov ax, word ptr [bx]");
}

#[test]
fn moffs_and_far_pointers() {
    test_display_mode(
        Mode::Protected,
        &[0xa1, 0x10, 0x20, 0x00, 0x00],
        "mov eax, dword ptr [0x2010]",
    );
    // in long mode the direct offset is 8 bytes wide
    test_display(
        &[0xa1, 0x10, 0x20, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        "mov eax, dword ptr [0x2010]",
    );
    test_display_mode(
        Mode::Protected,
        &[0x9a, 0x78, 0x56, 0x34, 0x12, 0x34, 0x12],
        "callf 0x1234:0x12345678",
    );
    test_display_mode(Mode::Real, &[0x9a, 0x34, 0x12, 0x00, 0x10], "callf 0x1000:0x1234");
}

#[test]
fn immediates() {
    test_display(&[0x6a, 0x10], "push 0x10");
    test_display(&[0x83, 0xc0, 0xf0], "add eax, -0x10");
    test_display(&[0xb8, 0xff, 0xff, 0xff, 0xff], "mov eax, 0xffffffff");
    test_display(&[0x66, 0xb8, 0x34, 0x12], "mov ax, 0x1234");
    test_display(
        &[0x48, 0xb8, 0x88, 0x77, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11],
        "mov rax, 0x1122334455667788",
    );
    // the one imm64 whose magnitude doesn't fit in an i64
    test_display(
        &[0x48, 0xb8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80],
        "mov rax, -0x8000000000000000",
    );
}

#[test]
fn relative_branches() {
    test_display(&[0xe8, 0x00, 0x00, 0x00, 0x00], "call $+0x0");
    test_display(&[0xeb, 0xfe], "jmp $-0x2");
    test_display(&[0x74, 0x10], "jz $+0x10");
    test_display(&[0x0f, 0x84, 0x00, 0x01, 0x00, 0x00], "jz $+0x100");
    test_display(&[0xe2, 0xfb], "loop $-0x5");
}

#[test]
fn rcx_zero_branch_names_by_address_size() {
    test_display(&[0xe3, 0x01], "jrcxz $+0x1");
    test_display(&[0x67, 0xe3, 0x01], "jecxz $+0x1");
    test_display_mode(Mode::Protected, &[0xe3, 0x01], "jecxz $+0x1");
    test_display_mode(Mode::Real, &[0xe3, 0x01], "jcxz $+0x1");
}

#[test]
fn size_alias_mnemonics() {
    test_display(&[0x98], "cwde");
    test_display(&[0x48, 0x98], "cdqe");
    test_display_mode(Mode::Real, &[0x98], "cbw");
    test_display(&[0x99], "cdq");
    test_display(&[0x48, 0x99], "cqo");
    test_display(&[0x66, 0x99], "cwd");
}

#[test]
fn groups() {
    test_display(&[0xc1, 0xe0, 0x04], "shl eax, 0x4");
    test_display(&[0xd1, 0xe8], "shr eax, 0x1");
    test_display(&[0xf7, 0xd8], "neg eax");
    test_display(&[0xf6, 0xc1, 0x01], "test cl, 0x1");
    test_display(&[0xfe, 0xc0], "inc al");
    test_display(&[0x8f, 0xc0], "pop rax");
    test_display(&[0x0f, 0xba, 0xe0, 0x04], "bt eax, 0x4");
    test_display(&[0xff, 0xd0], "call rax");
    test_display(&[0xff, 0x15, 0x10, 0x00, 0x00, 0x00], "call qword ptr [rip + 0x10]");
    test_display(&[0xff, 0x25, 0x10, 0x00, 0x00, 0x00], "jmp qword ptr [rip + 0x10]");
}

#[test]
fn group_nine_widens_under_rex() {
    test_display(&[0x0f, 0xc7, 0x0f], "cmpxchg8b qword ptr [rdi]");
    test_display(&[0x48, 0x0f, 0xc7, 0x0f], "cmpxchg16b xmmword ptr [rdi]");
    test_display(&[0x0f, 0xc7, 0xf0], "rdrand eax");
}

#[test]
fn system_groups() {
    test_display(&[0x0f, 0x01, 0xf8], "swapgs");
    assert_eq!(
        decode_err(Mode::Protected, &[0x0f, 0x01, 0xf8]).kind,
        ErrorKind::InvalidForMode
    );
    test_display(&[0x0f, 0xae, 0xe8], "lfence");
    test_display(&[0xf3, 0x0f, 0xae, 0xc0], "rdfsbase eax");
}

#[test]
fn string_ops() {
    test_display(&[0xaa], "stos byte ptr es:[rdi], al");
    test_display(&[0xa6], "cmps byte ptr [rsi], byte ptr es:[rdi]");
    test_display(&[0xf3, 0xa4], "rep movs byte ptr es:[rdi], byte ptr [rsi]");
    test_display(&[0xf2, 0xae], "repnz scas al, byte ptr es:[rdi]");
}

#[test]
fn lock_and_io() {
    test_display(&[0xf0, 0x01, 0x08], "lock add dword ptr [rax], ecx");
    test_display(&[0xe4, 0x60], "in al, 0x60");
    test_display(&[0xec], "in al, dx");
    test_display(&[0xee], "out dx, al");
}

#[test]
fn xchg_with_accumulator() {
    test_display(&[0x91], "xchg eax, ecx");
    test_display(&[0x48, 0x91], "xchg rax, rcx");
}

#[test]
fn movsxd_versus_arpl() {
    test_display(&[0x48, 0x63, 0xd0], "movsxd rdx, eax");
    test_display_mode(Mode::Protected, &[0x63, 0xd0], "arpl ax, dx");
}

#[test]
fn sse_mandatory_prefixes() {
    test_display(&[0x0f, 0x58, 0xc1], "addps xmm0, xmm1");
    test_display(&[0x66, 0x0f, 0x58, 0xc1], "addpd xmm0, xmm1");
    test_display(&[0xf3, 0x0f, 0x58, 0xc1], "addss xmm0, xmm1");
    test_display(&[0xf2, 0x0f, 0x58, 0xc1], "addsd xmm0, xmm1");
    test_display(
        &[0xf2, 0x0f, 0x10, 0x05, 0x10, 0x00, 0x00, 0x00],
        "movsd xmm0, qword ptr [rip + 0x10]",
    );
    test_display(&[0x66, 0x0f, 0x6f, 0xc1], "movdqa xmm0, xmm1");
    test_display(&[0x0f, 0xef, 0xc1], "pxor mm0, mm1");
    test_display(&[0x66, 0x0f, 0xef, 0xc1], "pxor xmm0, xmm1");
    test_display(&[0x66, 0x0f, 0x73, 0xd8, 0x04], "psrldq xmm0, 0x4");
}

#[test]
fn mandatory_prefix_is_not_a_repeat() {
    // f3/f2 consumed as an opcode selector must not render as rep
    test_display(&[0xf3, 0x0f, 0xb8, 0xc1], "popcnt eax, ecx");
    test_display(&[0xf3, 0x0f, 0xbc, 0xc1], "tzcnt eax, ecx");
    test_display(&[0xf2, 0x0f, 0x38, 0xf1, 0xc1], "crc32 eax, ecx");
}

#[test]
fn vex_two_and_three_byte() {
    test_display(&[0xc5, 0xf0, 0x58, 0xc2], "vaddps xmm0, xmm1, xmm2");
    test_display(&[0xc5, 0xf4, 0x58, 0xc2], "vaddps ymm0, ymm1, ymm2");
    test_display(
        &[0xc4, 0xe2, 0x79, 0x18, 0x05, 0x10, 0x00, 0x00, 0x00],
        "vbroadcastss xmm0, dword ptr [rip + 0x10]",
    );
    test_display(&[0xc5, 0xf8, 0x77], "vzeroupper");
    test_display(&[0xc5, 0xfc, 0x77], "vzeroall");
}

#[test]
fn bmi_through_vex() {
    test_display(&[0xc4, 0xe2, 0x70, 0xf2, 0xc3], "andn eax, ecx, ebx");
    test_display(&[0xc4, 0xe2, 0x61, 0xf7, 0xc2], "shlx eax, edx, ebx");
    // vex 0f38 f3 resolves through group 17
    test_display(&[0xc4, 0xe2, 0x70, 0xf3, 0xcb], "blsr ecx, ebx");
}

#[test]
fn fma_names_fold_in_the_w_bit() {
    test_display(&[0xc4, 0xe2, 0x75, 0xa8, 0xc2], "vfmadd213ps ymm0, ymm1, ymm2");
    test_display(&[0xc4, 0xe2, 0xf5, 0xa8, 0xc2], "vfmadd213pd ymm0, ymm1, ymm2");
    test_display(&[0xc4, 0xe2, 0x71, 0x99, 0xc2], "vfmadd132ss xmm0, xmm1, xmm2");
    test_display(&[0xc4, 0xe2, 0xf1, 0x99, 0xc2], "vfmadd132sd xmm0, xmm1, xmm2");
    test_display(&[0xc4, 0xe2, 0x75, 0xbe, 0xc2], "vfnmsub231ps ymm0, ymm1, ymm2");
    // the same rows serve the evex encodings
    test_display(&[0x62, 0xf2, 0xf5, 0x48, 0xa8, 0xc2], "vfmadd213pd zmm0, zmm1, zmm2");
}

#[test]
fn avx2_integer_forms() {
    test_display(&[0xc4, 0xe2, 0x75, 0x47, 0xc2], "vpsllvd ymm0, ymm1, ymm2");
    test_display(&[0xc4, 0xe2, 0xf5, 0x47, 0xc2], "vpsllvq ymm0, ymm1, ymm2");
    test_display(&[0xc4, 0xe2, 0x79, 0x78, 0xc1], "vpbroadcastb xmm0, xmm1");
    test_display(&[0xc4, 0xe2, 0x79, 0x78, 0x01], "vpbroadcastb xmm0, byte ptr [rcx]");
    test_display(&[0xc4, 0xe3, 0xfd, 0x00, 0xc1, 0x01], "vpermq ymm0, ymm1, 0x1");
    test_display(
        &[0xc4, 0xe3, 0x75, 0x46, 0xc2, 0x21],
        "vperm2i128 ymm0, ymm1, ymm2, 0x21",
    );

    // vpermq is only defined with the w bit set
    let err = decode_err(Mode::Long, &[0xc4, 0xe3, 0x7d, 0x00, 0xc1, 0x01]);
    assert_eq!(err.kind, ErrorKind::InvalidOpcode);
    assert_eq!(err.size(), 4);
}

#[test]
fn masked_moves_and_aes_through_vex() {
    test_display(
        &[0xc4, 0xe2, 0x75, 0x2c, 0x00],
        "vmaskmovps ymm0, ymm1, ymmword ptr [rax]",
    );
    test_display(
        &[0xc4, 0xe2, 0x75, 0x2e, 0x00],
        "vmaskmovps ymmword ptr [rax], ymm1, ymm0",
    );
    test_display(&[0xc4, 0xe2, 0x71, 0xdc, 0xc2], "vaesenc xmm0, xmm1, xmm2");
}

#[test]
fn vector_escape_disambiguation() {
    // in protected mode c5/62 are vector escapes only when the next byte
    // has its top two bits set
    test_display_mode(Mode::Protected, &[0xc5, 0xf0, 0x58, 0xc2], "vaddps xmm0, xmm1, xmm2");
    test_display_mode(Mode::Protected, &[0xc5, 0x18], "lds ebx, fword ptr [eax]");
    test_display_mode(Mode::Protected, &[0x62, 0x08], "bound ecx, dword ptr [eax]");
}

#[test]
fn evex_masks_and_length() {
    test_display(
        &[0x62, 0xf1, 0x74, 0x48, 0x58, 0xc2],
        "vaddps zmm0, zmm1, zmm2",
    );
    test_display(
        &[0x62, 0xf1, 0x74, 0x4f, 0x58, 0xc2],
        "vaddps zmm0 {k7}, zmm1, zmm2",
    );
    test_display(
        &[0x62, 0xf1, 0x74, 0xcf, 0x58, 0xc2],
        "vaddps zmm0 {k7}{z}, zmm1, zmm2",
    );
}

#[test]
fn x87() {
    test_display(&[0xd9, 0xc0], "fld st(0)");
    test_display(&[0xde, 0xc1], "faddp st(1), st(0)");
    test_display(&[0xd9, 0x45, 0xfc], "fld dword ptr [rbp - 0x4]");
    test_display(&[0xdd, 0x45, 0x08], "fld qword ptr [rbp + 0x8]");
    test_display(&[0xdb, 0x6d, 0x00], "fld mword ptr [rbp + 0x0]");
    test_display(&[0xdf, 0xe0], "fnstsw ax");
    test_display(&[0xd9, 0xe8], "fld1");
}

#[test]
fn rex_must_precede_the_opcode() {
    let err = decode_err(Mode::Long, &[0x48, 0x66, 0x90]);
    assert_eq!(err.kind, ErrorKind::InvalidPrefixes);
    assert_eq!(err.size(), 2);

    let err = decode_err(Mode::Long, &[0x48, 0xc5, 0xf0, 0x58, 0xc2]);
    assert_eq!(err.kind, ErrorKind::InvalidPrefixes);
}

#[test]
fn mode_validity() {
    assert_eq!(decode_err(Mode::Long, &[0x06]).kind, ErrorKind::InvalidForMode);
    test_display_mode(Mode::Protected, &[0x06], "push es");
    assert_eq!(
        decode_err(Mode::Protected, &[0x0f, 0x05]).kind,
        ErrorKind::InvalidForMode
    );
    // 82 is an alias group in legacy modes and nothing in long mode
    test_display_mode(Mode::Protected, &[0x82, 0xc0, 0x01], "add al, 0x1");
    assert_eq!(decode_err(Mode::Long, &[0x82]).kind, ErrorKind::InvalidOpcode);
}

#[test]
fn invalid_opcodes_report_consumed_bytes() {
    let err = decode_err(Mode::Long, &[0x0f, 0x04]);
    assert_eq!(err.kind, ErrorKind::InvalidOpcode);
    assert_eq!(err.size(), 2);
}

#[test]
fn truncated_input() {
    let err = decode_err(Mode::Long, &[]);
    assert_eq!(err.kind, ErrorKind::ExhaustedInput);
    assert_eq!(err.size(), 0);

    let err = decode_err(Mode::Long, &[0x48]);
    assert_eq!(err.kind, ErrorKind::ExhaustedInput);
    assert_eq!(err.size(), 1);

    let err = decode_err(Mode::Long, &[0x8b, 0x45]);
    assert_eq!(err.kind, ErrorKind::ExhaustedInput);
    assert_eq!(err.size(), 2);
}

#[test]
fn truncating_any_valid_encoding_fails() {
    let encodings: &[&[u8]] = &[
        &[0x48, 0xc7, 0xc0, 0x05, 0x00, 0x00, 0x00],
        &[0x8b, 0x04, 0x8d, 0x00, 0x01, 0x00, 0x00],
        &[0xc5, 0xf0, 0x58, 0xc2],
        &[0x62, 0xf1, 0x74, 0x48, 0x58, 0xc2],
        &[0xff, 0x15, 0x10, 0x00, 0x00, 0x00],
    ];
    for bytes in encodings {
        decode(Mode::Long, bytes);
        for cut in 0..bytes.len() {
            let err = decode_err(Mode::Long, &bytes[..cut]);
            assert_eq!(err.kind, ErrorKind::ExhaustedInput, "{bytes:02x?} cut at {cut}");
            assert!(err.size() <= cut);
        }
    }
}

#[test]
fn fifteen_byte_limit() {
    let mut bytes = vec![0x66; 14];
    bytes.push(0x90);
    let inst = decode(Mode::Long, &bytes);
    assert_eq!(inst.len(), 15);

    let mut bytes = vec![0x66; 15];
    bytes.push(0x90);
    let err = decode_err(Mode::Long, &bytes);
    assert_eq!(err.kind, ErrorKind::TooLong);
    assert_eq!(err.size(), 16);
}

#[test]
fn oversized_prefix_run_saturates_error_size() {
    // 300 prefix bytes and no opcode; the reported size tops out at 255
    let bytes = vec![0x66; 300];
    let err = decode_err(Mode::Long, &bytes);
    assert_eq!(err.kind, ErrorKind::ExhaustedInput);
    assert_eq!(err.size(), 255);
}

#[test]
fn equality_ignores_encoding_length() {
    let a = decode(Mode::Long, &[0x89, 0xd8]);
    let b = decode(Mode::Long, &[0x8b, 0xc3]);
    assert_eq!(a, b);

    // a repeated override collapses to the same prefix state
    let short = decode(Mode::Long, &[0x66, 0x90]);
    let long = decode(Mode::Long, &[0x66, 0x66, 0x90]);
    assert_eq!(short, long);
    assert_ne!(short.len(), long.len());
}

#[test]
fn decoding_is_deterministic() {
    let bytes = &[0x64, 0x48, 0x8b, 0x04, 0x25, 0x28, 0x00, 0x00, 0x00];
    assert_eq!(decode(Mode::Long, bytes), decode(Mode::Long, bytes));
}

#[test]
fn operand_introspection() {
    let inst = decode(Mode::Long, &[0x48, 0xc7, 0xc0, 0x05, 0x00, 0x00, 0x00]);
    assert_eq!(inst.opcode(), Opcode::MOV);
    assert_eq!(inst.sizes().operand, 64);
    assert!(inst.prefixes().rex().is_some_and(|rex| rex.w()));
    match inst.operands() {
        [Operand::Register(reg), Operand::Immediate { value: 5, width: 32 }] => {
            assert_eq!(reg.name(), "rax");
        }
        other => panic!("unexpected operands: {other:?}"),
    }

    let inst = decode(Mode::Long, &[0x8b, 0x45, 0xfc]);
    match inst.operands() {
        [Operand::Register(_), Operand::Memory(mem)] => {
            assert_eq!(mem.disp, Some(-4));
            assert_eq!(mem.size, 4);
        }
        other => panic!("unexpected operands: {other:?}"),
    }
    assert_eq!(inst.sizes().memory, 4);
}

#[test]
fn branch_predicates() {
    assert!(decode(Mode::Long, &[0xe8, 0x00, 0x00, 0x00, 0x00]).is_call());
    assert!(decode(Mode::Long, &[0xc3]).is_ret());
    assert!(decode(Mode::Long, &[0xeb, 0xfe]).is_jump());
    assert!(decode(Mode::Long, &[0x74, 0x10]).is_jump());
    assert!(!decode(Mode::Long, &[0x90]).is_jump());
}

#[test]
fn stream_skips_one_byte_on_error() {
    let bytes = &[0x90, 0xff, 0xff, 0xc3];
    let mut stream = Stream::new(bytes, Decoder::new(Mode::Long));

    let first = stream.next().unwrap().unwrap();
    assert_eq!(first.to_string(), "nop");
    assert_eq!(stream.offset(), 1);

    let err = stream.next().unwrap().unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidOpcode);
    assert_eq!(stream.offset(), 2);

    let third = stream.next().unwrap().unwrap();
    assert_eq!(third.to_string(), "inc ebx");
    assert_eq!(stream.offset(), 4);

    assert!(stream.next().is_none());
}
