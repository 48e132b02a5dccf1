//! Effective operand/address/memory size resolution.

use crate::prefix::Prefixes;
use crate::Mode;

use decoder::ErrorKind;

/// The size-determination policy an opcode declares in its table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpSizeRule {
    /// 64-bit mode defaults to a 32-bit operand unless REX.W or the
    /// operand-size override says otherwise.
    Default32,
    /// Defaults to 64 bits in 64-bit mode; the override still selects 16.
    Default64,
    /// Always 64 bits in 64-bit mode, overrides ignored.
    Force64,
    /// Not encodable outside 64-bit mode; sizes like `Default32`.
    Only64,
    /// Not encodable in 64-bit mode; sizes like `Default32` elsewhere.
    Never64,
}

/// The resolved size record carried by every instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sizes {
    /// Effective general operand size in bits.
    pub operand: u16,
    /// Effective address size in bits.
    pub address: u16,
    /// Effective memory-operand size in bytes; 0 when no memory operand.
    pub memory: u8,
    /// The policy that was in force.
    pub rule: OpSizeRule,
}

/// Address size needs no table input: mode plus the 67 override.
pub(crate) fn address_bits(mode: Mode, prefixes: &Prefixes) -> u16 {
    match (mode, prefixes.address_size()) {
        (Mode::Real, false) => 16,
        (Mode::Real, true) => 32,
        (Mode::Protected, false) => 32,
        (Mode::Protected, true) => 16,
        (Mode::Long, false) => 64,
        (Mode::Long, true) => 32,
    }
}

/// Combine mode, the legacy overrides, REX.W/VEX.W and the declared policy
/// into concrete sizes, failing when the policy forbids the mode.
pub(crate) fn resolve(
    mode: Mode,
    prefixes: &Prefixes,
    rule: OpSizeRule,
) -> Result<Sizes, ErrorKind> {
    match (rule, mode) {
        (OpSizeRule::Only64, Mode::Real | Mode::Protected) => {
            return Err(ErrorKind::InvalidForMode)
        }
        (OpSizeRule::Never64, Mode::Long) => return Err(ErrorKind::InvalidForMode),
        _ => {}
    }

    let wide = prefixes.rex().map(|rex| rex.w()).unwrap_or(false)
        || prefixes.vector().map(|vp| vp.w()).unwrap_or(false);
    let override_16 = prefixes.operand_size();

    let operand = match mode {
        Mode::Real => {
            if override_16 {
                32
            } else {
                16
            }
        }
        Mode::Protected => {
            if override_16 {
                16
            } else {
                32
            }
        }
        Mode::Long => match rule {
            OpSizeRule::Force64 => 64,
            OpSizeRule::Default64 => {
                if override_16 {
                    16
                } else {
                    64
                }
            }
            // Default32 and the mode-validity policies share the 32-bit
            // default; REX.W beats the 66 override
            _ => {
                if wide {
                    64
                } else if override_16 {
                    16
                } else {
                    32
                }
            }
        },
    };

    Ok(Sizes {
        operand,
        address: address_bits(mode, prefixes),
        memory: 0,
        rule,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefix;
    use decoder::Reader;

    fn prefixes(bytes: &[u8], mode: Mode) -> Prefixes {
        let mut reader = Reader::new(bytes);
        prefix::scan(&mut reader, mode).unwrap()
    }

    #[test]
    fn defaults_per_mode() {
        let none = prefixes(&[0x90], Mode::Long);
        assert_eq!(resolve(Mode::Long, &none, OpSizeRule::Default32).unwrap().operand, 32);
        assert_eq!(resolve(Mode::Long, &none, OpSizeRule::Default64).unwrap().operand, 64);
        assert_eq!(resolve(Mode::Long, &none, OpSizeRule::Force64).unwrap().operand, 64);
        assert_eq!(resolve(Mode::Protected, &none, OpSizeRule::Default32).unwrap().operand, 32);
        assert_eq!(resolve(Mode::Real, &none, OpSizeRule::Default32).unwrap().operand, 16);
    }

    #[test]
    fn override_interactions() {
        let with_66 = prefixes(&[0x66, 0x90], Mode::Long);
        assert_eq!(resolve(Mode::Long, &with_66, OpSizeRule::Default32).unwrap().operand, 16);
        // the 66 override still selects 16 under a 64-bit default
        assert_eq!(resolve(Mode::Long, &with_66, OpSizeRule::Default64).unwrap().operand, 16);
        // but forced-64 ignores it
        assert_eq!(resolve(Mode::Long, &with_66, OpSizeRule::Force64).unwrap().operand, 64);

        // REX.W beats the override
        let rex_w_66 = prefixes(&[0x66, 0x48, 0x90], Mode::Long);
        assert_eq!(resolve(Mode::Long, &rex_w_66, OpSizeRule::Default32).unwrap().operand, 64);
    }

    #[test]
    fn mode_validity() {
        let none = prefixes(&[0x90], Mode::Long);
        assert_eq!(
            resolve(Mode::Protected, &none, OpSizeRule::Only64),
            Err(ErrorKind::InvalidForMode)
        );
        assert_eq!(
            resolve(Mode::Long, &none, OpSizeRule::Never64),
            Err(ErrorKind::InvalidForMode)
        );
        assert!(resolve(Mode::Long, &none, OpSizeRule::Only64).is_ok());
        assert!(resolve(Mode::Real, &none, OpSizeRule::Never64).is_ok());
    }

    #[test]
    fn address_sizes() {
        let none = prefixes(&[0x90], Mode::Long);
        assert_eq!(address_bits(Mode::Long, &none), 64);
        assert_eq!(address_bits(Mode::Protected, &none), 32);
        assert_eq!(address_bits(Mode::Real, &none), 16);

        let with_67 = prefixes(&[0x67, 0x90], Mode::Long);
        assert_eq!(address_bits(Mode::Long, &with_67), 32);
        assert_eq!(address_bits(Mode::Protected, &with_67), 16);
        assert_eq!(address_bits(Mode::Real, &with_67), 32);
    }
}
