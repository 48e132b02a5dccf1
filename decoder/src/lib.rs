//! Shared behaviour required between decoder crates.

use std::fmt::Debug;
use tokenizing::{Color, Token};

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Error {
    /// What kind of error happened in decoding an instruction.
    pub kind: ErrorKind,

    /// How many bytes in the stream did the invalid instruction consume.
    size: u8,
}

impl Error {
    pub fn new(kind: ErrorKind, size: usize) -> Self {
        // a degenerate prefix run can consume more bytes than fit in a u8
        Self {
            kind,
            size: size.min(u8::MAX as usize) as u8,
        }
    }

    pub fn size(&self) -> usize {
        self.size as usize
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ErrorKind {
    /// Opcode in instruction is impossible/unknown.
    ///
    /// Callers scanning foreign or obfuscated code may treat this as an
    /// opaque unknown instruction of [`Error::size`] bytes instead of
    /// giving up; operands are never guessed for it.
    InvalidOpcode,

    /// Operand in instruction is impossible/unknown.
    InvalidOperand,

    /// Prefix in instruction is impossible/unknown.
    InvalidPrefixes,

    /// Encoding isn't valid in the decode mode it was decoded under.
    InvalidForMode,

    /// There weren't any bytes left in the stream to decode.
    ExhaustedInput,

    /// Impossibly long instruction (x86/64 specific).
    TooLong,
}

pub trait ToTokens {
    fn tokenize(&self, stream: &mut TokenStream);
}

pub trait Decoded: ToTokens {
    fn len(&self) -> usize;
    fn is_call(&self) -> bool;
    fn is_ret(&self) -> bool;
    fn is_jump(&self) -> bool;

    fn tokens(&self) -> Vec<Token> {
        let mut stream = TokenStream::new();
        self.tokenize(&mut stream);
        stream.into_tokens()
    }
}

pub trait Decodable {
    type Instruction: Decoded;

    fn decode(&self, reader: &mut Reader) -> Result<Self::Instruction, Error>;
    fn max_width(&self) -> usize;
}

/// Linear sweep over a byte region, yielding instructions in order.
///
/// Recovery policy on a failed decode belongs to the implementation, not
/// the decoder; the conventional choice is skipping a single byte and
/// resuming.
pub trait Streamable {
    type Item: Decoded;
    type Error;

    fn next(&mut self) -> Option<Result<Self::Item, Self::Error>>;
}

#[derive(Debug)]
pub struct TokenStream {
    inner: Vec<Token>,
}

impl TokenStream {
    pub fn new() -> Self {
        Self {
            inner: Vec::with_capacity(25),
        }
    }

    pub fn push_token(&mut self, token: Token) {
        self.inner.push(token);
    }

    pub fn push(&mut self, text: &'static str, color: &'static Color) {
        self.push_token(Token::from_str(text, color));
    }

    pub fn push_owned(&mut self, text: String, color: &'static Color) {
        self.push_token(Token::from_string(text, color));
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.inner
    }
}

impl Default for TokenStream {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TokenStream {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for token in &self.inner {
            f.write_str(&token.text)?;
        }
        Ok(())
    }
}

/// Forward-only cursor over an immutable byte window.
///
/// Every byte an instruction is charged for passes through [`Reader::next`]
/// or [`Reader::next_n`], making [`Reader::offset`] the authoritative
/// consumed-length count.
pub struct Reader<'data> {
    data: &'data [u8],
    position: usize,
    mark: usize,
}

impl<'data> Reader<'data> {
    pub fn new(data: &'data [u8]) -> Self {
        Self {
            data,
            position: 0,
            mark: 0,
        }
    }

    #[inline]
    pub fn next(&mut self) -> Option<u8> {
        let byte = *self.data.get(self.position)?;
        self.position += 1;
        Some(byte)
    }

    /// Read `buf`-many bytes from this reader in bulk, returning `None`
    /// without consuming anything when fewer bytes remain.
    #[inline]
    pub fn next_n(&mut self, buf: &mut [u8]) -> Option<()> {
        let slice = self.data.get(self.position..self.position + buf.len())?;
        buf.copy_from_slice(slice);
        self.position += buf.len();
        Some(())
    }

    /// Look at the next byte without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.position).copied()
    }

    /// Mark the current position as where to measure `offset` against.
    #[inline]
    pub fn mark(&mut self) {
        self.mark = self.position;
    }

    /// The difference between the current `Reader` position and its last
    /// `mark`. When created, a `Reader`'s initial position is `mark`ed, so
    /// creating a `Reader` and immediately calling `offset()` must return 0.
    #[inline]
    pub fn offset(&self) -> usize {
        self.position - self.mark
    }

    /// The difference between the current `Reader` position and the start
    /// of the underlying window.
    #[inline]
    pub fn total_offset(&self) -> usize {
        self.position
    }
}

const HEX_NUGGET: [u8; 16] = *b"0123456789abcdef";

/// Encode 64-bit number with a leading '0x' and in lowercase.
pub fn encode_hex(imm: i64) -> String {
    let mut buffer = Vec::with_capacity(19);

    if imm.is_negative() {
        buffer.push(b'-');
    }

    // the magnitude of i64::MIN doesn't fit in an i64
    let mut imm = imm.unsigned_abs();

    buffer.push(b'0');
    buffer.push(b'x');

    if imm == 0 {
        buffer.push(b'0');
    } else {
        let digits = imm.ilog(16) as usize + 1;
        let start = buffer.len();
        buffer.resize(start + digits, 0);

        let mut idx = start + digits;
        while idx != start {
            idx -= 1;
            buffer[idx] = HEX_NUGGET[(imm & 0b1111) as usize];
            imm >>= 4;
        }
    }

    // only ascii hex digits end up in the buffer
    unsafe { String::from_utf8_unchecked(buffer) }
}

/// Encode bytes as 2 digit hex numbers separated by a space.
pub fn encode_hex_bytes(bytes: &[u8]) -> String {
    let mut buffer = Vec::with_capacity(bytes.len() * 3);

    for byte in bytes {
        buffer.push(HEX_NUGGET[(byte >> 4) as usize]);
        buffer.push(HEX_NUGGET[(byte & 0b1111) as usize]);
        buffer.push(b' ');
    }

    unsafe { String::from_utf8_unchecked(buffer) }
}

/// Truncates string past the max width with a '..'.
pub fn encode_hex_bytes_truncated(bytes: &[u8], max_width: usize) -> String {
    assert!(max_width > 2, "max width must be at least 2");

    // truncation has to occur
    if bytes.len() * 3 > max_width {
        let mut out = encode_hex_bytes(&bytes[..max_width / 3 - 1]);
        out.push_str("..  ");
        return out;
    }

    let mut out = encode_hex_bytes(bytes);
    for _ in 0..max_width.saturating_sub(bytes.len() * 3) {
        out.push(' ');
    }
    out
}

#[cfg(test)]
mod tests {
    #[test]
    fn error_size_saturates() {
        let err = super::Error::new(super::ErrorKind::ExhaustedInput, 300);
        assert_eq!(err.size(), 255);

        let err = super::Error::new(super::ErrorKind::TooLong, 16);
        assert_eq!(err.size(), 16);
    }

    #[test]
    fn encode_hex() {
        assert_eq!(super::encode_hex(0x123123), "0x123123");
        assert_eq!(super::encode_hex(-0x123123), "-0x123123");
        assert_eq!(super::encode_hex(-0x48848), "-0x48848");

        assert_eq!(super::encode_hex(0x0), "0x0");
        assert_eq!(super::encode_hex(-0x800000000000000), "-0x800000000000000");
        assert_eq!(super::encode_hex(0x7fffffffffffffff), "0x7fffffffffffffff");
        assert_eq!(super::encode_hex(i64::MIN), "-0x8000000000000000");
    }

    #[test]
    fn encode_hex_bytes() {
        assert_eq!(super::encode_hex_bytes(&[0x10, 0x12, 0x3]), "10 12 03 ");
        assert_eq!(super::encode_hex_bytes(&[0x10]), "10 ");
        assert_eq!(
            super::encode_hex_bytes(&[0xff, 0x1, 0x1, 0x1]),
            "ff 01 01 01 "
        );
    }

    #[test]
    fn encode_hex_bytes_truncated() {
        assert_eq!(
            super::encode_hex_bytes_truncated(&[0x10, 0x12, 0x3], 6),
            "10 ..  "
        );

        assert_eq!(
            super::encode_hex_bytes_truncated(&[0x10, 0x12, 0x3], 9),
            "10 12 03 "
        );

        assert_eq!(
            super::encode_hex_bytes_truncated(&[0x10, 0x12, 0x3], 10),
            "10 12 03  "
        );
    }

    #[test]
    fn reader_offsets() {
        let mut reader = super::Reader::new(&[1, 2, 3, 4, 5]);
        assert_eq!(reader.offset(), 0);
        assert_eq!(reader.next(), Some(1));
        assert_eq!(reader.peek(), Some(2));
        assert_eq!(reader.offset(), 1);

        reader.mark();
        assert_eq!(reader.offset(), 0);

        let mut buf = [0; 3];
        assert_eq!(reader.next_n(&mut buf), Some(()));
        assert_eq!(buf, [2, 3, 4]);
        assert_eq!(reader.offset(), 3);
        assert_eq!(reader.total_offset(), 4);

        let mut buf = [0; 2];
        assert_eq!(reader.next_n(&mut buf), None);
        assert_eq!(reader.next(), Some(5));
        assert_eq!(reader.next(), None);
    }
}
