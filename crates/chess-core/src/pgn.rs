//! Lightweight regex extraction of SAN moves from PGN movetext.

use std::sync::OnceLock;

use regex::Regex;

// Tag pairs, brace comments, and parenthesized variations, in the order
// they are stripped
const STRIP_PATTERNS: [&str; 3] = [r"\[[^\]]*\]", r"\{[^}]*\}", r"\([^)]*\)"];

// A SAN token: optional piece letter and disambiguation, capture marker,
// destination square, promotion, check or mate suffix. Long castling
// before short so the alternation does not truncate it.
const SAN_PATTERN: &str = r"[KQRBN]?[a-h]?[1-8]?x?[a-h][1-8](?:=[QRBN])?[+#]?|O-O-O|O-O";

fn strip_patterns() -> &'static [Regex; 3] {
    static RES: OnceLock<[Regex; 3]> = OnceLock::new();
    RES.get_or_init(|| STRIP_PATTERNS.map(|p| Regex::new(p).unwrap()))
}

fn san_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SAN_PATTERN).unwrap())
}

/// Pull the mainline SAN moves out of a PGN text. Headers, comments, and
/// variations are dropped first so their contents cannot leak tokens into
/// the move list. Move numbers and result markers never match the SAN
/// pattern and fall away on their own.
pub fn extract_moves(pgn: &str) -> Vec<String> {
    let mut movetext = pgn.to_string();
    for re in strip_patterns() {
        movetext = re.replace_all(&movetext, "").into_owned();
    }

    san_token()
        .find_iter(&movetext)
        .map(|m| m.as_str().to_string())
        .collect()
}
