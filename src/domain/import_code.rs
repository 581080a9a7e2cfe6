use chrono::{DateTime, Utc};
use rand::Rng;

pub const IMPORT_CODE_PREFIX: &str = "IMP";
const RANDOM_SUFFIX_LEN: usize = 5;
const BASE36_DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Builds a code of the form `IMP-<base36 millis>-<5 random base36 chars>`.
///
/// Codes are only probably unique; callers must retry on a storage conflict.
pub fn generate_import_code<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> String {
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    let suffix: String = (0..RANDOM_SUFFIX_LEN)
        .map(|_| BASE36_DIGITS[rng.gen_range(0..BASE36_DIGITS.len())] as char)
        .collect();
    format!("{}-{}-{}", IMPORT_CODE_PREFIX, to_base36(millis), suffix)
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36_DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}
