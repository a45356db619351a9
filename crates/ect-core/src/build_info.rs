//! Build identity record.
//!
//! Packaging metadata only; nothing in the control pipeline reads it.
//! The version comes from the crate manifest, the build id from the
//! `ECT_BUILD_ID` environment variable at compile time (default `0`). A
//! build id that is not a decimal `u32` fails compilation.

use core::fmt;
use core::num::ParseIntError;

use serde::Serialize;

/// Product name.
pub const SDK_NAME: &str = "ECT-SDK";

/// Parse a decimal build or version number.
///
/// Rejects empty input, non-digits and values above `u32::MAX`.
pub const fn parse_build_number(digits: &str) -> Result<u32, ParseIntError> {
    u32::from_str_radix(digits, 10)
}

#[allow(clippy::panic, reason = "evaluated at compile time; a malformed id must fail the build")]
const fn decimal(digits: &str) -> u32 {
    match parse_build_number(digits) {
        Ok(value) => value,
        Err(_) => panic!("ECT_BUILD_ID and the package version must be decimal u32 values"),
    }
}

const BUILD_ID: u32 = match option_env!("ECT_BUILD_ID") {
    Some(id) => decimal(id),
    None => 0,
};

/// Identity of this build.
pub const IDENTITY: BuildIdentity = BuildIdentity {
    name: SDK_NAME,
    major: decimal(env!("CARGO_PKG_VERSION_MAJOR")),
    minor: decimal(env!("CARGO_PKG_VERSION_MINOR")),
    patch: decimal(env!("CARGO_PKG_VERSION_PATCH")),
    build_id: BUILD_ID,
};

/// Name, semantic version and build id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BuildIdentity {
    /// Product name
    pub name: &'static str,
    /// Major version
    pub major: u32,
    /// Minor version
    pub minor: u32,
    /// Patch version
    pub patch: u32,
    /// Build identifier, `0` when unset
    pub build_id: u32,
}

impl BuildIdentity {
    /// Pack the version as `major << 16 | minor << 8 | patch`.
    ///
    /// ```
    /// use ect_core::build_info::BuildIdentity;
    ///
    /// let id = BuildIdentity { name: "x", major: 1, minor: 2, patch: 3, build_id: 0 };
    /// assert_eq!(id.version_compact(), 0x010203);
    /// ```
    pub const fn version_compact(&self) -> u32 {
        (self.major << 16) | (self.minor << 8) | self.patch
    }
}

impl fmt::Display for BuildIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}.{}.{}", self.name, self.major, self.minor, self.patch)?;
        if self.build_id != 0 {
            write!(f, "+build.{}", self.build_id)?;
        }
        Ok(())
    }
}
