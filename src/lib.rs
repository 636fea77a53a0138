pub mod errors;
pub mod lang;
pub mod mask;
pub mod catalog;
pub mod options;
pub mod features;
pub mod snapshot;

pub use errors::{OptionsError, Result};
pub use features::FeatureMap;
pub use lang::LangOptions;
pub use mask::VersionMask;
pub use options::{OpenClOptions, OptionInfo};
pub use snapshot::{OptionsSnapshot, SnapshotEntry};

/// Convenience: the registry a translation unit starts with.
///
/// Seeds the built-in catalog, applies the target's `features` for `lang`,
/// then enables every supported core and optional core feature so that
/// queries keyed on `is_enabled` see them.
pub fn options_for(lang: &LangOptions, features: &FeatureMap) -> OpenClOptions {
    let mut opts = OpenClOptions::new();
    opts.add_support(features, lang);
    opts.enable_supported_core(lang);
    opts
}
