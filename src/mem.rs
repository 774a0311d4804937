//! Sizes the response body buffer from the memory actually available
//! on the host so a huge (or malicious) node response cannot OOM a
//! small system. Only works on Linux, everywhere else we fall back to
//! an effectively unlimited buffer, which is fine because the buffer
//! is not allocated up front.

use std::cmp::min;
use std::fs::read_to_string;

/// Parses the MemAvailable line of /proc/meminfo, value in kilobytes.
fn get_available_kb() -> Option<usize> {
    let meminfo = read_to_string("/proc/meminfo").ok()?;
    for line in meminfo.lines() {
        if let Some(rest) = line.strip_prefix("MemAvailable:") {
            return rest.split_whitespace().next()?.parse().ok();
        }
    }
    None
}

/// Response buffer limit in bytes, half of available system memory
/// when that can be determined.
pub fn get_buffer_size() -> usize {
    const DEFAULT_BUFFER: usize = usize::MAX;
    match get_available_kb() {
        Some(kb) => {
            trace!("meminfo reports {} kb available", kb);
            match kb.checked_mul(1000) {
                Some(bytes) => min(DEFAULT_BUFFER, bytes / 2),
                None => DEFAULT_BUFFER,
            }
        }
        None => DEFAULT_BUFFER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_size_is_nonzero() {
        assert!(get_buffer_size() > 0);
    }
}
