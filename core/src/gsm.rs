//! GSM 03.38 default alphabet, as used by the card for text it receives from the terminal.

const ESCAPE: u8 = 0x1B;

/// Basic character set, indexed by septet. The escape slot never matches.
const DEFAULT_ALPHABET: [char; 128] = [
    '@', '£', '$', '¥', 'è', 'é', 'ù', 'ì', 'ò', 'Ç', '\n', 'Ø', 'ø', '\r', 'Å', 'å', //
    'Δ', '_', 'Φ', 'Γ', 'Λ', 'Ω', 'Π', 'Ψ', 'Σ', 'Θ', 'Ξ', '\u{FFFF}', 'Æ', 'æ', 'ß', 'É', //
    ' ', '!', '"', '#', '¤', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/', //
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', ';', '<', '=', '>', '?', //
    '¡', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', //
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'Ä', 'Ö', 'Ñ', 'Ü', '§', //
    '¿', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', //
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'ä', 'ö', 'ñ', 'ü', 'à', //
];

/// Extension table, reached through the escape septet.
const EXTENSION: [(char, u8); 10] = [
    ('\u{0C}', 0x0A),
    ('^', 0x14),
    ('{', 0x28),
    ('}', 0x29),
    ('\\', 0x2F),
    ('[', 0x3C),
    ('~', 0x3D),
    (']', 0x3E),
    ('|', 0x40),
    ('€', 0x65),
];

fn septet(c: char) -> Option<u8> {
    DEFAULT_ALPHABET
        .iter()
        .position(|&d| d == c)
        .map(|i| i as u8)
}

fn extension(c: char) -> Option<u8> {
    EXTENSION
        .iter()
        .find(|(e, _)| *e == c)
        .map(|(_, code)| *code)
}

/// Encodes the string one septet per octet (the unpacked "8-bit" form).
/// Extension characters take two octets; characters outside the alphabet become a space.
pub fn to_gsm_8bit(s: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(s.len());

    for c in s.chars() {
        match (septet(c), extension(c)) {
            (Some(code), _) => buf.push(code),
            (None, Some(code)) => {
                buf.push(ESCAPE);
                buf.push(code);
            }
            _ => buf.push(0x20),
        }
    }

    buf
}
