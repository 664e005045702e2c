/// blake3 hex digest of the serialized payload.
pub fn digest(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

/// Compare a digest against the recorded checksum. Returns the actual digest on mismatch.
pub fn verify(bytes: &[u8], expected: &str) -> Result<(), String> {
    let actual = digest(bytes);
    if actual == expected {
        Ok(())
    } else {
        Err(actual)
    }
}
