use crate::mask::VersionMask;

/// Seed data for one known option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: &'static str,
    /// First OpenCL C version in which the option exists.
    pub avail: u32,
    pub core: VersionMask,
    pub opt: VersionMask,
}

const fn extension(name: &'static str, avail: u32) -> CatalogEntry {
    CatalogEntry { name, avail, core: VersionMask::NONE, opt: VersionMask::NONE }
}

const fn core_feature(name: &'static str, avail: u32, core: VersionMask) -> CatalogEntry {
    CatalogEntry { name, avail, core, opt: VersionMask::NONE }
}

const fn optional_core_feature(name: &'static str, avail: u32, opt: VersionMask) -> CatalogEntry {
    CatalogEntry { name, avail, core: VersionMask::NONE, opt }
}

/// Every extension and feature the compiler knows about.
pub const BUILTIN: &[CatalogEntry] = &[
    // OpenCL 1.0
    core_feature("cl_khr_byte_addressable_store", 100, VersionMask::CL_11P),
    core_feature("cl_khr_global_int32_base_atomics", 100, VersionMask::CL_11P),
    core_feature("cl_khr_global_int32_extended_atomics", 100, VersionMask::CL_11P),
    core_feature("cl_khr_local_int32_base_atomics", 100, VersionMask::CL_11P),
    core_feature("cl_khr_local_int32_extended_atomics", 100, VersionMask::CL_11P),
    optional_core_feature("cl_khr_fp64", 100, VersionMask::CL_12P),
    extension("cl_khr_fp16", 100),
    extension("cl_khr_int64_base_atomics", 100),
    extension("cl_khr_int64_extended_atomics", 100),
    core_feature("cl_khr_3d_image_writes", 100, VersionMask::CL_20),
    // EMBEDDED_PROFILE
    extension("cles_khr_int64", 110),
    // OpenCL 1.2
    extension("cl_khr_depth_images", 120),
    extension("cl_khr_gl_msaa_sharing", 120),
    // OpenCL 2.0
    extension("cl_khr_mipmap_image", 200),
    extension("cl_khr_mipmap_image_writes", 200),
    extension("cl_khr_srgb_image_writes", 200),
    extension("cl_khr_subgroups", 200),
    // Clang
    extension("cl_clang_storage_class_specifiers", 100),
    extension("__cl_clang_function_pointers", 100),
    extension("__cl_clang_variadic_functions", 100),
    // AMD
    extension("cl_amd_media_ops", 100),
    extension("cl_amd_media_ops2", 100),
    // ARM
    extension("cl_arm_integer_dot_product_int8", 120),
    extension("cl_arm_integer_dot_product_accumulate_int8", 120),
    extension("cl_arm_integer_dot_product_accumulate_int16", 120),
    extension("cl_arm_integer_dot_product_accumulate_saturate_int8", 120),
    // Intel
    extension("cl_intel_subgroups", 120),
    extension("cl_intel_subgroups_short", 120),
    extension("cl_intel_device_side_avc_motion_estimation", 120),
    // OpenCL C 3.0 optional features
    optional_core_feature("__opencl_c_pipes", 200, VersionMask::CL_30),
    optional_core_feature("__opencl_c_generic_address_space", 200, VersionMask::CL_30),
    optional_core_feature("__opencl_c_work_group_collective_functions", 200, VersionMask::CL_30),
    optional_core_feature("__opencl_c_atomic_order_acq_rel", 200, VersionMask::CL_30),
    optional_core_feature("__opencl_c_atomic_order_seq_cst", 200, VersionMask::CL_30),
    optional_core_feature("__opencl_c_atomic_scope_device", 200, VersionMask::CL_30),
    optional_core_feature("__opencl_c_atomic_scope_all_devices", 200, VersionMask::CL_30),
    optional_core_feature("__opencl_c_subgroups", 200, VersionMask::CL_30),
    optional_core_feature("__opencl_c_3d_image_writes", 200, VersionMask::CL_30),
    optional_core_feature("__opencl_c_device_enqueue", 200, VersionMask::CL_30),
    optional_core_feature("__opencl_c_read_write_images", 200, VersionMask::CL_30),
    optional_core_feature("__opencl_c_program_scope_global_variables", 200, VersionMask::CL_30),
    optional_core_feature("__opencl_c_fp64", 120, VersionMask::CL_30),
    optional_core_feature("__opencl_c_images", 100, VersionMask::CL_30),
];
