//! Text form (spec §4.4): the human-readable token rendering of a script, and its parser.

use crate::chunk::Chunk;
use crate::error::ParseError;
use crate::opcode::{self, OP_PUSHBYTES_MAX, OP_PUSHBYTES_MIN, OP_PUSHDATA1, OP_PUSHDATA2, OP_PUSHDATA4};
use crate::script::Script;
use crate::{Decodable, Encodable};

impl Script {
    /// Render this script's text form (spec §4.4 "Render"). Each chunk becomes either a single
    /// token (bare opcodes, rendered by canonical name if known, else `0x<hex>`) or a
    /// space-separated triple `<len> 0x<hex>` (direct pushes) / `<OP_PUSHDATAn> <len> 0x<hex>`
    /// (`OP_PUSHDATA1/2/4`). Tokens are joined with single spaces.
    pub fn render_text(&self) -> String {
        let mut tokens = Vec::new();
        for chunk in &self.chunks {
            match chunk {
                Chunk::Bare(opcode) => tokens.push(
                    opcode::name(*opcode)
                        .map(String::from)
                        .unwrap_or_else(|| format!("0x{:02x}", opcode)),
                ),
                Chunk::Push { opcode, payload } => {
                    if matches!(*opcode, OP_PUSHDATA1 | OP_PUSHDATA2 | OP_PUSHDATA4) {
                        tokens.push(opcode::name(*opcode).unwrap().to_string());
                    }
                    tokens.push(payload.len().to_string());
                    tokens.push(format!("0x{}", hex::encode(payload)));
                }
            }
        }
        tokens.join(" ")
    }

    /// Parse a script's text form (spec §4.4 "Parse"). If the entire input is hexadecimal it is
    /// treated as a byte script and routed through the byte-level parser (§4.2); otherwise the
    /// input is tokenized on spaces and each token resolved per the rules in §4.4.
    pub fn parse_text(input: &str) -> Result<Script, ParseError> {
        if is_pure_hex(input) {
            let raw = hex::decode(input).map_err(|_| ParseError::InvalidHex(input.to_string()))?;
            return Ok(Script::decode(&mut raw.as_slice())?);
        }

        let tokens: Vec<&str> = input.split_whitespace().collect();
        let mut chunks = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            let token = tokens[i];
            if let Some(opcode) = opcode::from_name(token) {
                if matches!(opcode, OP_PUSHDATA1 | OP_PUSHDATA2 | OP_PUSHDATA4) {
                    let (payload, consumed) = parse_length_and_payload(&tokens, i + 1)?;
                    chunks.push(Chunk::push(opcode, payload)?);
                    i += 1 + consumed;
                } else {
                    chunks.push(Chunk::Bare(opcode));
                    i += 1;
                }
            } else if let Ok(len) = token.parse::<u32>() {
                if !(OP_PUSHBYTES_MIN as u32..=OP_PUSHBYTES_MAX as u32).contains(&len) {
                    return Err(ParseError::UnknownOpcode(token.to_string()));
                }
                let payload_token = tokens
                    .get(i + 1)
                    .ok_or(ParseError::MissingPayload)?;
                let payload = decode_hex_token(payload_token)?;
                if payload.len() as u32 != len {
                    return Err(ParseError::LengthMismatch);
                }
                chunks.push(Chunk::push(len as u8, payload)?);
                i += 2;
            } else if let Some(hex) = token.strip_prefix("0x") {
                let opcode = u8::from_str_radix(hex, 16)
                    .map_err(|_| ParseError::UnknownOpcode(token.to_string()))?;
                chunks.push(Chunk::Bare(opcode));
                i += 1;
            } else {
                return Err(ParseError::UnknownOpcode(token.to_string()));
            }
        }
        Ok(Script::from_chunks(chunks))
    }
}

/// Parse the `<len> 0x<hex>` pair following an `OP_PUSHDATAn` token; returns the payload and the
/// number of tokens consumed (always 2: the length token and the payload token).
fn parse_length_and_payload(
    tokens: &[&str],
    start: usize,
) -> Result<(Vec<u8>, usize), ParseError> {
    let len_token = tokens.get(start).ok_or(ParseError::MissingLength)?;
    let len: usize = len_token
        .parse()
        .map_err(|_| ParseError::InvalidLength(len_token.to_string()))?;
    let payload_token = tokens.get(start + 1).ok_or(ParseError::MissingPayload)?;
    let payload = decode_hex_token(payload_token)?;
    if payload.len() != len {
        return Err(ParseError::LengthMismatch);
    }
    Ok((payload, 2))
}

fn decode_hex_token(token: &str) -> Result<Vec<u8>, ParseError> {
    let hex = token
        .strip_prefix("0x")
        .ok_or_else(|| ParseError::MissingHexPrefix(token.to_string()))?;
    hex::decode(hex).map_err(|_| ParseError::InvalidHex(token.to_string()))
}

/// True if `input` consists entirely of hex digits with even length (and is non-empty) — the
/// "pure hex" shortcut of spec §4.4.
fn is_pure_hex(input: &str) -> bool {
    !input.is_empty() && input.len() % 2 == 0 && input.bytes().all(|b| b.is_ascii_hexdigit())
}
