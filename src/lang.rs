use crate::errors::{OptionsError, Result};
use crate::mask::KNOWN_VERSIONS;
use serde::{Deserialize, Serialize};

/// The two language options the extension registry reads.
///
/// The version is validated on construction, so every `LangOptions` value
/// names a version the mask codec can encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLangOptions")]
pub struct LangOptions {
    opencl_version: u32,
    opencl_cplusplus: bool,
}

#[derive(Deserialize)]
struct RawLangOptions {
    #[serde(default = "default_version")]
    opencl_version: u32,
    #[serde(default)]
    opencl_cplusplus: bool,
}

fn default_version() -> u32 {
    100
}

impl TryFrom<RawLangOptions> for LangOptions {
    type Error = OptionsError;

    fn try_from(raw: RawLangOptions) -> Result<Self> {
        LangOptions::new(raw.opencl_version, raw.opencl_cplusplus)
    }
}

impl Default for LangOptions {
    fn default() -> Self {
        Self {
            opencl_version: default_version(),
            opencl_cplusplus: false,
        }
    }
}

impl LangOptions {
    /// In C++ mode the nominal version is never read, so only C mode
    /// requires a known version.
    pub fn new(opencl_version: u32, opencl_cplusplus: bool) -> Result<Self> {
        if !opencl_cplusplus && !KNOWN_VERSIONS.contains(&opencl_version) {
            return Err(OptionsError::UnknownVersion(opencl_version));
        }
        Ok(Self {
            opencl_version,
            opencl_cplusplus,
        })
    }

    /// C++ for OpenCL. The nominal version is kept but never consulted.
    pub fn cplusplus() -> Self {
        Self {
            opencl_version: 200,
            opencl_cplusplus: true,
        }
    }

    pub fn opencl_version(&self) -> u32 {
        self.opencl_version
    }

    pub fn is_cplusplus(&self) -> bool {
        self.opencl_cplusplus
    }

    /// Version used for every version-sensitive decision.
    /// In C++ mode all extensions work at least as in v2.0.
    pub fn effective_version(&self) -> u32 {
        if self.opencl_cplusplus {
            200
        } else {
            self.opencl_version
        }
    }

    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| OptionsError::Config(e.to_string()))
    }
}
