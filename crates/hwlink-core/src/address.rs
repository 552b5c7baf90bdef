//! Address parsing and EIP-55 checksum rendering.

use alloy_primitives::Address;

use crate::error::ProviderError;

/// Parse a provider-reported address and render it checksum-cased.
///
/// The session invariant is that an account is either checksum-cased or the
/// session is not considered connected, so every address that crosses into
/// connector state passes through here.
pub fn to_checksum_address(raw: &str) -> Result<String, ProviderError> {
    let address: Address = raw
        .trim()
        .parse()
        .map_err(|_| ProviderError::Malformed(format!("address {raw}")))?;
    Ok(address.to_checksum(None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksums_lowercase_input() {
        // EIP-55 reference vector
        let out = to_checksum_address("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
        assert_eq!(out, "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
    }

    #[test]
    fn checksums_uppercase_input() {
        let out = to_checksum_address("0xFB6916095CA1DF60BB79CE92CE3EA74C37C5D359").unwrap();
        assert_eq!(out, "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359");
    }

    #[test]
    fn checksummed_input_is_stable() {
        let canonical = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
        assert_eq!(to_checksum_address(canonical).unwrap(), canonical);
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(to_checksum_address("not-an-address").is_err());
        assert!(to_checksum_address("0x1234").is_err());
        assert!(to_checksum_address("").is_err());
    }
}
