use crate::catalog::{self, CatalogEntry};
use crate::errors::{OptionsError, Result};
use crate::features::FeatureMap;
use crate::lang::LangOptions;
use crate::mask::VersionMask;
use itertools::Itertools;
use std::collections::HashMap;
use tracing::{debug, trace};

fn encode_version(version: u32) -> VersionMask {
    match version {
        100 => VersionMask::CL_10,
        110 => VersionMask::CL_11,
        120 => VersionMask::CL_12,
        200 => VersionMask::CL_20,
        300 => VersionMask::CL_30,
        other => unreachable!("unknown OpenCL version code {other}"),
    }
}

/// Is the effective OpenCL C version of `lang` contained in `mask`?
fn version_in_mask(lang: &LangOptions, mask: VersionMask) -> bool {
    mask.intersects(encode_version(lang.effective_version()))
}

/// Version metadata and state of a single extension or feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionInfo {
    /// Option starts to be available in this OpenCL C version.
    pub avail: u32,
    /// Versions in which the option is a core feature.
    pub core: VersionMask,
    /// Versions in which the option is an optional core feature.
    pub opt: VersionMask,
    pub(crate) supported: bool,
    pub(crate) enabled: bool,
}

impl Default for OptionInfo {
    fn default() -> Self {
        Self::new(100, VersionMask::NONE, VersionMask::NONE)
    }
}

impl From<&CatalogEntry> for OptionInfo {
    fn from(entry: &CatalogEntry) -> Self {
        Self::new(entry.avail, entry.core, entry.opt)
    }
}

impl OptionInfo {
    pub fn new(avail: u32, core: VersionMask, opt: VersionMask) -> Self {
        Self { avail, core, opt, supported: false, enabled: false }
    }

    pub fn supported(&self) -> bool {
        self.supported
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_core(&self) -> bool {
        !self.core.is_empty()
    }

    pub fn is_optional_core(&self) -> bool {
        !self.opt.is_empty()
    }

    pub fn is_available_in(&self, lang: &LangOptions) -> bool {
        lang.effective_version() >= self.avail
    }

    pub fn is_core_in(&self, lang: &LangOptions) -> bool {
        self.is_available_in(lang) && version_in_mask(lang, self.core)
    }

    pub fn is_optional_core_in(&self, lang: &LangOptions) -> bool {
        self.is_available_in(lang) && version_in_mask(lang, self.opt)
    }

    fn is_supported_in(&self, lang: &LangOptions) -> bool {
        let core = self.is_core_in(lang);
        let opt = self.is_optional_core_in(lang);
        self.supported
            && (core || opt || (self.enabled && self.is_available_in(lang) && !core && !opt))
    }
}

/// OpenCL extensions and (optional) core features known to one compilation.
///
/// Entries are seeded from the built-in catalog and never removed; only
/// their supported/enabled flags change. Clone to hand an independent copy
/// to a nested context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenClOptions {
    pub(crate) opt_map: HashMap<String, OptionInfo>,
}

impl Default for OpenClOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenClOptions {
    pub fn new() -> Self {
        Self::from_catalog(catalog::BUILTIN)
    }

    pub(crate) fn from_catalog(entries: &[CatalogEntry]) -> Self {
        let opt_map = entries
            .iter()
            .map(|e| (e.name.to_string(), OptionInfo::from(e)))
            .collect();
        Self { opt_map }
    }

    pub fn len(&self) -> usize {
        self.opt_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opt_map.is_empty()
    }

    /// All known names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.opt_map.keys().map(String::as_str).sorted().collect()
    }

    pub fn info(&self, ext: &str) -> Option<&OptionInfo> {
        self.opt_map.get(ext)
    }

    pub fn is_known(&self, ext: &str) -> bool {
        self.opt_map.contains_key(ext)
    }

    pub fn is_enabled(&self, ext: &str) -> bool {
        self.opt_map.get(ext).is_some_and(|i| i.enabled)
    }

    /// Is supported as either an extension or an (optional) core feature
    /// for the OpenCL C version of `lang`.
    pub fn is_supported(&self, ext: &str, lang: &LangOptions) -> bool {
        self.opt_map.get(ext).is_some_and(|i| i.is_supported_in(lang))
    }

    /// Supported core feature. False for a supported extension.
    pub fn is_supported_core(&self, ext: &str, lang: &LangOptions) -> bool {
        self.opt_map
            .get(ext)
            .is_some_and(|i| i.is_supported_in(lang) && i.is_core_in(lang))
    }

    /// Supported optional core feature. Core wins when both masks cover
    /// the version.
    pub fn is_supported_optional_core(&self, ext: &str, lang: &LangOptions) -> bool {
        self.opt_map.get(ext).is_some_and(|i| {
            i.is_supported_in(lang) && i.is_optional_core_in(lang) && !i.is_core_in(lang)
        })
    }

    pub fn is_supported_core_or_optional_core(&self, ext: &str, lang: &LangOptions) -> bool {
        self.is_supported_core(ext, lang) || self.is_supported_optional_core(ext, lang)
    }

    /// Supported extension. False for a supported (optional) core feature.
    pub fn is_supported_extension(&self, ext: &str, lang: &LangOptions) -> bool {
        self.opt_map.get(ext).is_some_and(|i| {
            i.is_supported_in(lang) && !i.is_core_in(lang) && !i.is_optional_core_in(lang)
        })
    }

    fn entry_mut(&mut self, ext: &str) -> Result<&mut OptionInfo> {
        self.opt_map
            .get_mut(ext)
            .ok_or_else(|| OptionsError::UnknownExtension(ext.to_string()))
    }

    /// Set the enabled flag. Unknown names are an error and change nothing.
    pub fn enable(&mut self, ext: &str, value: bool) -> Result<()> {
        self.entry_mut(ext)?.enabled = value;
        debug!(ext, value, "enable");
        Ok(())
    }

    /// Set the supported flag. `ext` is the bare name, without a `+`/`-`
    /// prefix. Unknown names are an error and change nothing.
    pub fn support(&mut self, ext: &str, value: bool) -> Result<()> {
        self.entry_mut(ext)?.supported = value;
        debug!(ext, value, "support");
        Ok(())
    }

    /// Apply target settings for the language version of `lang`.
    ///
    /// Names the registry does not know, and options not yet available in
    /// this version, are skipped. Options absent from `features` keep their
    /// current state.
    pub fn add_support(&mut self, features: &FeatureMap, lang: &LangOptions) {
        let mut applied = 0usize;
        for (name, value) in features.iter() {
            match self.opt_map.get_mut(name) {
                Some(info) if info.is_available_in(lang) => {
                    info.supported = value;
                    applied += 1;
                }
                Some(_) => trace!(name, "not available in this version, skipped"),
                None => trace!(name, "unknown feature, skipped"),
            }
        }
        debug!(applied, requested = features.len(), "add_support");
    }

    /// Clear every enabled flag. Supported flags are left alone.
    pub fn disable_all(&mut self) {
        for info in self.opt_map.values_mut() {
            info.enabled = false;
        }
        debug!(entries = self.opt_map.len(), "disable_all");
    }

    /// Enable every supported core and optional core feature of `lang`.
    pub fn enable_supported_core(&mut self, lang: &LangOptions) {
        let mut enabled = 0usize;
        for info in self.opt_map.values_mut() {
            if info.supported && (info.is_core_in(lang) || info.is_optional_core_in(lang)) {
                info.enabled = true;
                enabled += 1;
            }
        }
        debug!(enabled, "enable_supported_core");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::KNOWN_VERSIONS;
    use pretty_assertions::assert_eq;

    fn cl(v: u32) -> LangOptions {
        LangOptions::new(v, false).unwrap()
    }

    fn registry_with(name: &'static str, avail: u32, core: VersionMask, opt: VersionMask) -> OpenClOptions {
        OpenClOptions::from_catalog(&[CatalogEntry { name, avail, core, opt }])
    }

    #[test]
    fn encode_gives_distinct_single_bits() {
        let mut union = VersionMask::NONE;
        for v in KNOWN_VERSIONS {
            let bit = encode_version(v);
            assert_eq!(bit.bits().count_ones(), 1, "version {v}");
            assert!(!union.intersects(bit), "version {v} collides");
            union = union | bit;
        }
        assert_eq!(union, VersionMask::ALL);
    }

    #[test]
    #[should_panic(expected = "unknown OpenCL version code")]
    fn encode_rejects_unknown_version() {
        encode_version(150);
    }

    #[test]
    fn cplusplus_encodes_as_v20() {
        let lo = LangOptions::new(100, true).unwrap();
        assert!(version_in_mask(&lo, VersionMask::CL_20));
        assert!(!version_in_mask(&lo, VersionMask::CL_10));
    }

    #[test]
    fn record_defaults() {
        let info = OptionInfo::default();
        assert_eq!(info.avail, 100);
        assert!(!info.is_core());
        assert!(!info.is_optional_core());
        assert!(!info.supported());
        assert!(!info.enabled());
    }

    #[test]
    fn record_predicates() {
        let info = OptionInfo::new(110, VersionMask::CL_12P, VersionMask::NONE);
        assert!(info.is_core());
        assert!(!info.is_optional_core());

        assert!(!info.is_available_in(&cl(100)));
        assert!(info.is_available_in(&cl(110)));
        assert!(!info.is_core_in(&cl(110)));
        assert!(info.is_core_in(&cl(120)));
        assert!(info.is_core_in(&cl(300)));
    }

    #[test]
    fn core_in_requires_availability() {
        // Core bit set for 1.0 but only available from 1.2.
        let info = OptionInfo::new(120, VersionMask::ALL, VersionMask::ALL);
        assert!(!info.is_core_in(&cl(100)));
        assert!(!info.is_optional_core_in(&cl(110)));
        assert!(info.is_core_in(&cl(120)));
    }

    #[test]
    fn extension_becoming_core_at_v12() {
        let mut opts = registry_with("ext_x", 110, VersionMask::CL_12P, VersionMask::NONE);

        // 1.0: not available, nothing holds even when supported and enabled.
        opts.support("ext_x", true).unwrap();
        opts.enable("ext_x", true).unwrap();
        let v10 = cl(100);
        assert!(!opts.is_supported("ext_x", &v10));
        assert!(!opts.is_supported_core("ext_x", &v10));
        assert!(!opts.is_supported_extension("ext_x", &v10));

        // 1.1: an extension, supported only because it is enabled.
        let v11 = cl(110);
        assert!(opts.is_supported_extension("ext_x", &v11));
        assert!(!opts.is_supported_core("ext_x", &v11));
        opts.enable("ext_x", false).unwrap();
        assert!(!opts.is_supported("ext_x", &v11));

        // 1.2: core, enabled flag irrelevant.
        let v12 = cl(120);
        assert!(opts.is_supported_core("ext_x", &v12));
        assert!(opts.is_supported_core_or_optional_core("ext_x", &v12));
        assert!(!opts.is_supported_extension("ext_x", &v12));

        opts.support("ext_x", false).unwrap();
        assert!(!opts.is_supported_core("ext_x", &v12));
    }

    #[test]
    fn core_takes_precedence_over_optional_core() {
        let mut opts = registry_with("both", 100, VersionMask::CL_20, VersionMask::CL_12P);
        opts.support("both", true).unwrap();

        let v20 = cl(200);
        assert!(opts.is_supported_core("both", &v20));
        assert!(!opts.is_supported_optional_core("both", &v20));

        let v12 = cl(120);
        assert!(!opts.is_supported_core("both", &v12));
        assert!(opts.is_supported_optional_core("both", &v12));
        assert!(opts.is_supported_core_or_optional_core("both", &v12));
    }

    #[test]
    fn unknown_names() {
        let mut opts = OpenClOptions::new();
        let lo = cl(300);
        assert!(!opts.is_known("cl_nope"));
        assert!(!opts.is_enabled("cl_nope"));
        assert!(!opts.is_supported("cl_nope", &lo));
        assert!(!opts.is_supported_extension("cl_nope", &lo));

        let before = opts.clone();
        assert_eq!(
            opts.enable("cl_nope", true),
            Err(OptionsError::UnknownExtension("cl_nope".into()))
        );
        assert_eq!(
            opts.support("cl_nope", true),
            Err(OptionsError::UnknownExtension("cl_nope".into()))
        );
        assert_eq!(opts, before);
    }

    #[test]
    fn add_support_skips_unavailable_and_unknown() {
        let mut opts = OpenClOptions::new();
        let features: FeatureMap = [
            ("cl_khr_fp16", true),
            ("cl_khr_subgroups", true),
            ("cl_made_up", true),
        ]
        .into_iter()
        .collect();

        opts.add_support(&features, &cl(120));
        assert!(opts.info("cl_khr_fp16").unwrap().supported());
        // Only available from 2.0.
        assert!(!opts.info("cl_khr_subgroups").unwrap().supported());
        assert!(!opts.is_known("cl_made_up"));
    }

    #[test]
    fn add_support_in_cplusplus_uses_v20() {
        let features: FeatureMap = [("cl_khr_subgroups", true)].into_iter().collect();

        let mut plain = OpenClOptions::new();
        plain.add_support(&features, &cl(100));
        assert!(!plain.info("cl_khr_subgroups").unwrap().supported());

        let mut cpp = OpenClOptions::new();
        cpp.add_support(&features, &LangOptions::new(100, true).unwrap());
        assert!(cpp.info("cl_khr_subgroups").unwrap().supported());

        let off: FeatureMap = [("cl_khr_subgroups", false)].into_iter().collect();
        cpp.add_support(&off, &LangOptions::new(100, true).unwrap());
        assert!(!cpp.info("cl_khr_subgroups").unwrap().supported());
    }

    #[test]
    fn add_support_is_corrective_not_a_reset() {
        let mut opts = OpenClOptions::new();
        opts.support("cl_khr_fp64", true).unwrap();
        opts.support("cl_khr_fp16", true).unwrap();

        let features: FeatureMap = [("cl_khr_fp16", false)].into_iter().collect();
        opts.add_support(&features, &cl(120));

        assert!(!opts.info("cl_khr_fp16").unwrap().supported());
        assert!(opts.info("cl_khr_fp64").unwrap().supported());
    }

    #[test]
    fn enable_supported_core_leaves_extensions_alone() {
        let mut opts = OpenClOptions::new();
        for ext in ["cl_khr_fp64", "cl_khr_byte_addressable_store", "cl_khr_fp16"] {
            opts.support(ext, true).unwrap();
        }
        opts.enable_supported_core(&cl(120));

        assert!(opts.is_enabled("cl_khr_fp64"));
        assert!(opts.is_enabled("cl_khr_byte_addressable_store"));
        assert!(!opts.is_enabled("cl_khr_fp16"));
        // Core at 1.2 but never marked supported.
        assert!(!opts.is_enabled("cl_khr_global_int32_base_atomics"));
    }

    #[test]
    fn names_sorted() {
        let opts = OpenClOptions::new();
        let names = opts.names();
        assert_eq!(names.len(), catalog::BUILTIN.len());
        assert!(names.windows(2).all(|w| w[0] < w[1]));
    }
}
