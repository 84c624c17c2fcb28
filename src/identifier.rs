//! Account identifiers: parsing raw strings into 20-byte addresses and
//! rendering the canonical (EIP-55 checksummed) form used as map keys.

use alloy_primitives::Address;

use crate::AllowlistError;

/// Size of an account address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Parses a raw account string into an [`Address`].
///
/// Surrounding whitespace is ignored, the `0x` prefix is optional and the hex
/// digits are case-insensitive. Mixed-case checksums are not enforced: the
/// input is normalized first, and [`canonical_string`] re-derives the checksum.
pub fn parse_identifier(input: &str) -> Result<Address, AllowlistError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.len() != ADDRESS_LEN * 2 {
        return Err(invalid(
            input,
            format!("expected {} hex digits, got {}", ADDRESS_LEN * 2, digits.len()),
        ));
    }
    let mut bytes = [0u8; ADDRESS_LEN];
    hex::decode_to_slice(digits, &mut bytes).map_err(|e| invalid(input, e.to_string()))?;
    Ok(Address::from(bytes))
}

/// Canonical string form of an address (EIP-55 checksum, `0x` prefixed).
pub fn canonical_string(address: &Address) -> String {
    address.to_checksum(None)
}

/// Parses and re-renders an identifier in one go.
pub fn normalize(input: &str) -> Result<String, AllowlistError> {
    parse_identifier(input).map(|address| canonical_string(&address))
}

fn invalid(input: &str, reason: String) -> AllowlistError {
    AllowlistError::InvalidIdentifier {
        input: input.to_string(),
        reason,
    }
}
