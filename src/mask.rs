use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitOr, BitXor};

/// OpenCL C versions this crate knows how to encode, oldest first.
pub const KNOWN_VERSIONS: [u32; 5] = [100, 110, 120, 200, 300];

/// A set of OpenCL C versions, one bit per known version.
///
/// Used to say in which versions an option is a core or optional core
/// feature. The "and later" masks are derived from [`VersionMask::ALL`] so a
/// newly added version extends them automatically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionMask(u32);

impl VersionMask {
    pub const NONE: VersionMask = VersionMask(0);
    pub const CL_10: VersionMask = VersionMask(0x1);
    pub const CL_11: VersionMask = VersionMask(0x2);
    pub const CL_12: VersionMask = VersionMask(0x4);
    pub const CL_20: VersionMask = VersionMask(0x8);
    pub const CL_30: VersionMask = VersionMask(0x10);
    pub const ALL: VersionMask = VersionMask(0x1f);
    /// OpenCL C 1.1+
    pub const CL_11P: VersionMask = VersionMask(Self::ALL.0 ^ Self::CL_10.0);
    /// OpenCL C 1.2+
    pub const CL_12P: VersionMask = VersionMask(Self::ALL.0 ^ (Self::CL_10.0 | Self::CL_11.0));

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every bit of `other` is also set in `self`.
    pub const fn contains(self, other: VersionMask) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: VersionMask) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for VersionMask {
    type Output = VersionMask;
    fn bitor(self, rhs: Self) -> Self {
        VersionMask(self.0 | rhs.0)
    }
}

impl BitAnd for VersionMask {
    type Output = VersionMask;
    fn bitand(self, rhs: Self) -> Self {
        VersionMask(self.0 & rhs.0)
    }
}

impl BitXor for VersionMask {
    type Output = VersionMask;
    fn bitxor(self, rhs: Self) -> Self {
        VersionMask(self.0 ^ rhs.0)
    }
}
