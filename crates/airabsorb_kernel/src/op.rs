//! Kernel Operation Tags
//!
//! The generated library selects behavior from a short ASCII tag packed into
//! a fixed 8-byte buffer plus a 1xN size descriptor. The original wrapper
//! copied arbitrary strings into that buffer with no length check; here the
//! tags are a closed enumeration and the fit is proven at compile time.

/// Capacity of the tag buffer the generated entry point expects
pub const TAG_CAPACITY: usize = 8;

/// Operations understood by the generated kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Configure the operating sample rate (precomputes filter coefficients)
    SetFs,
    /// Transform an impulse response
    Apply,
}

impl Operation {
    /// The ASCII tag the generated entry point dispatches on
    pub const fn tag(self) -> &'static str {
        match self {
            Operation::SetFs => "setfs",
            Operation::Apply => "apply",
        }
    }

    /// Pack the tag into the generated library's layout: a zero-padded
    /// 8-byte buffer and a `[1, len]` size descriptor.
    pub fn encode(self) -> ([u8; TAG_CAPACITY], [i32; 2]) {
        let tag = self.tag().as_bytes();
        let mut data = [0u8; TAG_CAPACITY];
        data[..tag.len()].copy_from_slice(tag);
        (data, [1, tag.len() as i32])
    }
}

// Every tag must fit the fixed buffer; a new variant that doesn't breaks the
// build here instead of overflowing at runtime.
const _: () = {
    assert!(Operation::SetFs.tag().len() <= TAG_CAPACITY);
    assert!(Operation::Apply.tag().len() <= TAG_CAPACITY);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags() {
        assert_eq!(Operation::SetFs.tag(), "setfs");
        assert_eq!(Operation::Apply.tag(), "apply");
    }

    #[test]
    fn test_encode_layout() {
        let (data, size) = Operation::SetFs.encode();
        assert_eq!(&data[..5], b"setfs");
        assert_eq!(&data[5..], &[0, 0, 0]);
        assert_eq!(size, [1, 5]);
    }

    #[test]
    fn test_encode_apply() {
        let (data, size) = Operation::Apply.encode();
        assert_eq!(&data[..5], b"apply");
        assert_eq!(size, [1, 5]);
    }
}
