//! Register name resolution.
//!
//! Accepts both the numeric spellings (`$0`..`$31`) and the conventional
//! aliases (`$zero`, `$t0`, ...). Note that this machine follows the o32
//! habit of calling register 30 `$s8`.

/// Index of the hardwired zero register.
pub const ZERO: usize = 0;

/// Number of general-purpose registers.
pub const COUNT: usize = 32;

/// Resolves a register operand token to its canonical index.
///
/// Returns `None` for anything that is not a register: missing `$` sigil,
/// out-of-range numerics, unknown alias.
pub fn lookup(token: &str) -> Option<usize> {
    let name = token.strip_prefix('$')?;

    if !name.is_empty() && name.chars().all(|c| c.is_ascii_digit()) {
        let n: usize = name.parse().ok()?;
        return (n < COUNT).then_some(n);
    }

    let index = match name {
        "zero" => 0,
        "at" => 1,
        "v0" => 2,
        "v1" => 3,
        "a0" => 4,
        "a1" => 5,
        "a2" => 6,
        "a3" => 7,
        "t0" => 8,
        "t1" => 9,
        "t2" => 10,
        "t3" => 11,
        "t4" => 12,
        "t5" => 13,
        "t6" => 14,
        "t7" => 15,
        "s0" => 16,
        "s1" => 17,
        "s2" => 18,
        "s3" => 19,
        "s4" => 20,
        "s5" => 21,
        "s6" => 22,
        "s7" => 23,
        "t8" => 24,
        "t9" => 25,
        "k0" => 26,
        "k1" => 27,
        "gp" => 28,
        "sp" => 29,
        "s8" => 30,
        "ra" => 31,
        _ => return None,
    };
    Some(index)
}
