use rand::Rng;

const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";

/// Alphabet used by [`generate_random_string`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Charset {
    Lower,
    Upper,
    Number,
    UpperNumber,
    LowerUpper,
    LowerNumber,
    #[default]
    LowerUpperNumber,
}

impl Charset {
    /// Map the numeric codes `1..=7`; anything else is the full alphabet.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Self::Lower,
            2 => Self::Upper,
            3 => Self::Number,
            4 => Self::UpperNumber,
            5 => Self::LowerUpper,
            6 => Self::LowerNumber,
            _ => Self::LowerUpperNumber,
        }
    }

    pub fn alphabet(self) -> String {
        match self {
            Self::Lower => LOWER.to_owned(),
            Self::Upper => UPPER.to_owned(),
            Self::Number => DIGITS.to_owned(),
            Self::UpperNumber => [UPPER, DIGITS].concat(),
            Self::LowerUpper => [LOWER, UPPER].concat(),
            Self::LowerNumber => [LOWER, DIGITS].concat(),
            Self::LowerUpperNumber => [LOWER, UPPER, DIGITS].concat(),
        }
    }
}

/// Random string of `length` characters drawn uniformly from `charset`.
pub fn generate_random_string(length: usize, charset: Charset) -> String {
    let alphabet = charset.alphabet().into_bytes();
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(alphabet[rng.gen_range(0..alphabet.len())]))
        .collect()
}
