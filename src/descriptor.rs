//! Static property-descriptor tables driving the report.
//!
//! Each table lists `(key, label, kind)` triples in display order; that
//! declaration order is part of the output contract, so entries are never
//! sorted or reordered at runtime. Tables are partitioned by value kind only
//! so the composer can batch queries with a per-kind buffer capacity; the
//! merged per-entity order is fixed by [`device_tables`].

use crate::provider::{PropertyKey, keys};

/// How a raw query result is decoded and rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// NUL-terminated text, passed through unmodified.
    Text,
    /// Whitespace-separated token list, sorted and laid out one per line.
    TokenList,
    /// Unsigned integer with comma grouping every three digits.
    Scalar,
    /// `0x`-prefixed lowercase hexadecimal.
    Hex,
    /// Ordered named-bit decomposition with an `Unknown (0x…)` residue.
    Flags(&'static [FlagSpec]),
    /// Bounds-checked label lookup rendered as `label (value)`.
    Enum(&'static [&'static str]),
    /// Three-element numeric vector, comma separated.
    Triple,
}

/// One named bit in a [`ValueKind::Flags`] decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagSpec {
    pub bit: u64,
    pub label: &'static str,
}

/// One queryable attribute: provider key, display label, decoding kind.
#[derive(Debug, Clone, Copy)]
pub struct PropertyDescriptor {
    pub key: PropertyKey,
    pub label: &'static str,
    pub kind: ValueKind,
}

const fn prop(key: PropertyKey, label: &'static str, kind: ValueKind) -> PropertyDescriptor {
    PropertyDescriptor { key, label, kind }
}

/// Query buffer capacity for a value kind, in bytes.
///
/// Strings get a large fixed buffer; integer-valued kinds are read as one
/// 64-bit word; the work-item triple is three words. Replies whose natural
/// size exceeds this capacity are reported as truncated.
pub fn capacity(kind: ValueKind) -> usize {
    match kind {
        ValueKind::Text | ValueKind::TokenList => STRING_CAPACITY,
        ValueKind::Scalar | ValueKind::Hex | ValueKind::Flags(_) | ValueKind::Enum(_) => 8,
        ValueKind::Triple => 24,
    }
}

pub const STRING_CAPACITY: usize = 65536;

/// Label column width for platform lines.
pub const PLATFORM_LABEL_WIDTH: usize = 10;
/// Label column width for device lines.
pub const DEVICE_LABEL_WIDTH: usize = 30;

/// Label used for the optional pixel-format category.
pub const IMAGE_FORMATS_LABEL: &str = "IMAGE FORMATS";

pub static PLATFORM_PROPS: &[PropertyDescriptor] = &[
    prop(keys::PLATFORM_NAME, "name", ValueKind::Text),
    prop(keys::PLATFORM_VENDOR, "vendor", ValueKind::Text),
    prop(keys::PLATFORM_PROFILE, "profile", ValueKind::Text),
    prop(keys::PLATFORM_VERSION, "version", ValueKind::Text),
    prop(keys::PLATFORM_EXTENSIONS, "extensions", ValueKind::TokenList),
];

pub static DEVICE_STRING_PROPS: &[PropertyDescriptor] = &[
    prop(keys::DEVICE_NAME, "NAME", ValueKind::Text),
    prop(keys::DEVICE_VENDOR, "VENDOR", ValueKind::Text),
    prop(keys::DEVICE_PROFILE, "PROFILE", ValueKind::Text),
    prop(keys::DEVICE_VERSION, "VERSION", ValueKind::Text),
    prop(keys::DRIVER_VERSION, "DRIVER_VERSION", ValueKind::Text),
    prop(keys::DEVICE_EXTENSIONS, "EXTENSIONS", ValueKind::TokenList),
];

static DEVICE_TYPE_FLAGS: &[FlagSpec] = &[
    FlagSpec {
        bit: 1 << 0,
        label: "Default",
    },
    FlagSpec {
        bit: 1 << 1,
        label: "CPU",
    },
    FlagSpec {
        bit: 1 << 2,
        label: "GPU",
    },
    FlagSpec {
        bit: 1 << 3,
        label: "Accelerator",
    },
];

static EXECUTION_FLAGS: &[FlagSpec] = &[
    FlagSpec {
        bit: 1 << 0,
        label: "Kernel",
    },
    FlagSpec {
        bit: 1 << 1,
        label: "Native",
    },
];

static CACHE_TYPE_LABELS: &[&str] = &["None", "Read-Only", "Read-Write"];
static LOCAL_MEM_LABELS: &[&str] = &["???", "Local", "Global"];

/// Composite attributes (bitmasks and bounded enums) carrying their decode
/// tables inline; ordinary entries dispatched through their value kinds.
pub static DEVICE_COMPOSITE_PROPS: &[PropertyDescriptor] = &[
    prop(keys::DEVICE_TYPE, "TYPE", ValueKind::Flags(DEVICE_TYPE_FLAGS)),
    prop(
        keys::DEVICE_EXECUTION_CAPABILITIES,
        "EXECUTION_CAPABILITIES",
        ValueKind::Flags(EXECUTION_FLAGS),
    ),
    prop(
        keys::DEVICE_GLOBAL_MEM_CACHE_TYPE,
        "GLOBAL_MEM_CACHE_TYPE",
        ValueKind::Enum(CACHE_TYPE_LABELS),
    ),
    prop(
        keys::DEVICE_LOCAL_MEM_TYPE,
        "LOCAL_MEM_TYPE",
        ValueKind::Enum(LOCAL_MEM_LABELS),
    ),
];

pub static DEVICE_HEX_PROPS: &[PropertyDescriptor] = &[
    prop(keys::DEVICE_SINGLE_FP_CONFIG, "SINGLE_FP_CONFIG", ValueKind::Hex),
    prop(keys::DEVICE_QUEUE_PROPERTIES, "QUEUE_PROPERTIES", ValueKind::Hex),
];

pub static DEVICE_SCALAR_PROPS: &[PropertyDescriptor] = &[
    prop(keys::DEVICE_VENDOR_ID, "VENDOR_ID", ValueKind::Scalar),
    prop(keys::DEVICE_MAX_COMPUTE_UNITS, "MAX_COMPUTE_UNITS", ValueKind::Scalar),
    prop(
        keys::DEVICE_MAX_WORK_ITEM_DIMENSIONS,
        "MAX_WORK_ITEM_DIMENSIONS",
        ValueKind::Scalar,
    ),
    prop(keys::DEVICE_MAX_WORK_GROUP_SIZE, "MAX_WORK_GROUP_SIZE", ValueKind::Scalar),
    prop(
        keys::DEVICE_PREFERRED_VECTOR_WIDTH_CHAR,
        "PREFERRED_VECTOR_WIDTH_CHAR",
        ValueKind::Scalar,
    ),
    prop(
        keys::DEVICE_PREFERRED_VECTOR_WIDTH_SHORT,
        "PREFERRED_VECTOR_WIDTH_SHORT",
        ValueKind::Scalar,
    ),
    prop(
        keys::DEVICE_PREFERRED_VECTOR_WIDTH_INT,
        "PREFERRED_VECTOR_WIDTH_INT",
        ValueKind::Scalar,
    ),
    prop(
        keys::DEVICE_PREFERRED_VECTOR_WIDTH_LONG,
        "PREFERRED_VECTOR_WIDTH_LONG",
        ValueKind::Scalar,
    ),
    prop(
        keys::DEVICE_PREFERRED_VECTOR_WIDTH_FLOAT,
        "PREFERRED_VECTOR_WIDTH_FLOAT",
        ValueKind::Scalar,
    ),
    prop(
        keys::DEVICE_PREFERRED_VECTOR_WIDTH_DOUBLE,
        "PREFERRED_VECTOR_WIDTH_DOUBLE",
        ValueKind::Scalar,
    ),
    prop(keys::DEVICE_MAX_CLOCK_FREQUENCY, "MAX_CLOCK_FREQUENCY", ValueKind::Scalar),
    prop(keys::DEVICE_ADDRESS_BITS, "ADDRESS_BITS", ValueKind::Scalar),
    prop(keys::DEVICE_MAX_MEM_ALLOC_SIZE, "MAX_MEM_ALLOC_SIZE", ValueKind::Scalar),
    prop(keys::DEVICE_IMAGE_SUPPORT, "IMAGE_SUPPORT", ValueKind::Scalar),
    prop(keys::DEVICE_MAX_READ_IMAGE_ARGS, "MAX_READ_IMAGE_ARGS", ValueKind::Scalar),
    prop(keys::DEVICE_MAX_WRITE_IMAGE_ARGS, "MAX_WRITE_IMAGE_ARGS", ValueKind::Scalar),
    prop(keys::DEVICE_IMAGE2D_MAX_WIDTH, "IMAGE2D_MAX_WIDTH", ValueKind::Scalar),
    prop(keys::DEVICE_IMAGE2D_MAX_HEIGHT, "IMAGE2D_MAX_HEIGHT", ValueKind::Scalar),
    prop(keys::DEVICE_IMAGE3D_MAX_WIDTH, "IMAGE3D_MAX_WIDTH", ValueKind::Scalar),
    prop(keys::DEVICE_IMAGE3D_MAX_HEIGHT, "IMAGE3D_MAX_HEIGHT", ValueKind::Scalar),
    prop(keys::DEVICE_IMAGE3D_MAX_DEPTH, "IMAGE3D_MAX_DEPTH", ValueKind::Scalar),
    prop(keys::DEVICE_MAX_SAMPLERS, "MAX_SAMPLERS", ValueKind::Scalar),
    prop(keys::DEVICE_MAX_PARAMETER_SIZE, "MAX_PARAMETER_SIZE", ValueKind::Scalar),
    prop(keys::DEVICE_MEM_BASE_ADDR_ALIGN, "MEM_BASE_ADDR_ALIGN", ValueKind::Scalar),
    prop(
        keys::DEVICE_MIN_DATA_TYPE_ALIGN_SIZE,
        "MIN_DATA_TYPE_ALIGN_SIZE",
        ValueKind::Scalar,
    ),
    prop(
        keys::DEVICE_GLOBAL_MEM_CACHELINE_SIZE,
        "GLOBAL_MEM_CACHELINE_SIZE",
        ValueKind::Scalar,
    ),
    prop(keys::DEVICE_GLOBAL_MEM_CACHE_SIZE, "GLOBAL_MEM_CACHE_SIZE", ValueKind::Scalar),
    prop(keys::DEVICE_GLOBAL_MEM_SIZE, "GLOBAL_MEM_SIZE", ValueKind::Scalar),
    prop(
        keys::DEVICE_MAX_CONSTANT_BUFFER_SIZE,
        "MAX_CONSTANT_BUFFER_SIZE",
        ValueKind::Scalar,
    ),
    prop(keys::DEVICE_MAX_CONSTANT_ARGS, "MAX_CONSTANT_ARGS", ValueKind::Scalar),
    prop(keys::DEVICE_LOCAL_MEM_SIZE, "LOCAL_MEM_SIZE", ValueKind::Scalar),
    prop(
        keys::DEVICE_ERROR_CORRECTION_SUPPORT,
        "ERROR_CORRECTION_SUPPORT",
        ValueKind::Scalar,
    ),
    prop(
        keys::DEVICE_PROFILING_TIMER_RESOLUTION,
        "PROFILING_TIMER_RESOLUTION",
        ValueKind::Scalar,
    ),
    prop(keys::DEVICE_ENDIAN_LITTLE, "ENDIAN_LITTLE", ValueKind::Scalar),
    prop(keys::DEVICE_AVAILABLE, "AVAILABLE", ValueKind::Scalar),
    prop(keys::DEVICE_COMPILER_AVAILABLE, "COMPILER_AVAILABLE", ValueKind::Scalar),
];

pub static DEVICE_VECTOR_PROPS: &[PropertyDescriptor] = &[prop(
    keys::DEVICE_MAX_WORK_ITEM_SIZES,
    "MAX_WORK_ITEM_SIZES",
    ValueKind::Triple,
)];

/// Device tables in the merged output order the report contract fixes:
/// strings, composites, hex bitfields, scalars, then the work-item triple.
pub fn device_tables() -> [&'static [PropertyDescriptor]; 5] {
    [
        DEVICE_STRING_PROPS,
        DEVICE_COMPOSITE_PROPS,
        DEVICE_HEX_PROPS,
        DEVICE_SCALAR_PROPS,
        DEVICE_VECTOR_PROPS,
    ]
}

/// Sparse code→name table for image channel orders.
pub static CHANNEL_ORDERS: &[(u32, &str)] = &[
    (0x10B0, "CL_R"),
    (0x10B1, "CL_A"),
    (0x10B2, "CL_RG"),
    (0x10B3, "CL_RA"),
    (0x10B4, "CL_RGB"),
    (0x10B5, "CL_RGBA"),
    (0x10B6, "CL_BGRA"),
    (0x10B7, "CL_ARGB"),
    (0x10B8, "CL_INTENSITY"),
    (0x10B9, "CL_LUMINANCE"),
    (0x10BA, "CL_Rx"),
    (0x10BB, "CL_RGx"),
    (0x10BC, "CL_RGBx"),
    (0x10BD, "CL_DEPTH"),
    (0x10BE, "CL_DEPTH_STENCIL"),
];

/// Sparse code→name table for image channel data types.
pub static CHANNEL_TYPES: &[(u32, &str)] = &[
    (0x10D0, "CL_SNORM_INT8"),
    (0x10D1, "CL_SNORM_INT16"),
    (0x10D2, "CL_UNORM_INT8"),
    (0x10D3, "CL_UNORM_INT16"),
    (0x10D4, "CL_UNORM_SHORT_565"),
    (0x10D5, "CL_UNORM_SHORT_555"),
    (0x10D6, "CL_UNORM_INT_101010"),
    (0x10D7, "CL_SIGNED_INT8"),
    (0x10D8, "CL_SIGNED_INT16"),
    (0x10D9, "CL_SIGNED_INT32"),
    (0x10DA, "CL_UNSIGNED_INT8"),
    (0x10DB, "CL_UNSIGNED_INT16"),
    (0x10DC, "CL_UNSIGNED_INT32"),
    (0x10DD, "CL_HALF_FLOAT"),
    (0x10DE, "CL_FLOAT"),
    (0x10DF, "CL_UNORM_INT24"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn device_keys_are_unique_across_tables() {
        let mut seen = BTreeSet::new();
        for table in device_tables() {
            for descriptor in table {
                assert!(
                    seen.insert(descriptor.key),
                    "duplicate descriptor key 0x{:x} ({})",
                    descriptor.key,
                    descriptor.label
                );
            }
        }
    }

    #[test]
    fn string_tables_end_with_the_token_list() {
        assert_eq!(
            PLATFORM_PROPS.last().map(|d| d.kind),
            Some(ValueKind::TokenList)
        );
        assert_eq!(
            DEVICE_STRING_PROPS.last().map(|d| d.kind),
            Some(ValueKind::TokenList)
        );
    }
}
