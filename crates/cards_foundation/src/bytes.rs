//! Fallible byte buffer helpers.
//!
//! Every place that copies caller bytes into owned storage goes through
//! these so that running out of memory is reported as an [`Error`] instead
//! of aborting the process.

use crate::error::Result;

/// Returns an empty vector with room for at least `capacity` bytes.
///
/// # Errors
///
/// Returns an allocation error if the memory cannot be reserved.
pub fn try_with_capacity(capacity: usize) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    bytes.try_reserve_exact(capacity)?;
    Ok(bytes)
}

/// Copies `bytes` into freshly owned storage.
///
/// # Errors
///
/// Returns an allocation error if the memory cannot be reserved.
pub fn try_copy(bytes: &[u8]) -> Result<Box<[u8]>> {
    let mut owned = try_with_capacity(bytes.len())?;
    owned.extend_from_slice(bytes);
    Ok(owned.into_boxed_slice())
}

/// Appends `bytes` to `buffer`, reserving first.
///
/// # Errors
///
/// Returns an allocation error if the memory cannot be reserved.
pub fn try_extend(buffer: &mut Vec<u8>, bytes: &[u8]) -> Result<()> {
    buffer.try_reserve(bytes.len())?;
    buffer.extend_from_slice(bytes);
    Ok(())
}
