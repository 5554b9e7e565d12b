//! Contract between the rendering engine and a capability provider.
//!
//! A provider exposes three operations: enumerate platforms, enumerate the
//! devices of a platform, and query one property of an entity by key into a
//! caller-supplied capacity. Handles stay opaque (associated types) so
//! backends can wrap raw runtime ids without leaking them into the engine.
//! Providers signal unsupported or failed queries through [`ProviderError`];
//! they never panic for a missing property.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

/// Key identifying one queryable property. Values follow the provider's
/// numbering; the constants in [`keys`] carry the standard assignments.
pub type PropertyKey = u32;

/// Raw outcome of one successful property query.
///
/// `bytes` holds what the provider actually wrote (never more than the
/// capacity passed to the query); `natural_size` is what the provider would
/// have needed, and may exceed the capacity. The composer compares the two to
/// detect truncation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryReply {
    pub bytes: Vec<u8>,
    pub natural_size: usize,
}

impl QueryReply {
    /// Reply whose natural size is exactly what was returned.
    pub fn complete(bytes: Vec<u8>) -> Self {
        let natural_size = bytes.len();
        Self {
            bytes,
            natural_size,
        }
    }
}

/// Status code reported by the provider for a failed call.
///
/// Codes are provider-specific; the known ones translate to short messages,
/// anything else renders as `unknown error {code}` so diagnostics stay
/// readable even for runtimes that extend the code space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderError(pub i32);

const ERROR_TABLE: &[(i32, &str)] = &[
    (0, "no error"),
    (-1, "device not found"),
    (-2, "device not available"),
    (-3, "compiler not available"),
    (-4, "mem object allocation failure"),
    (-5, "out of resources"),
    (-6, "out of host memory"),
    (-7, "profiling not available"),
    (-8, "memcopy overlaps"),
    (-9, "image format mismatch"),
    (-10, "image format not supported"),
    (-11, "build program failed"),
    (-12, "map failed"),
    (-30, "invalid value"),
    (-31, "invalid device type"),
];

impl ProviderError {
    /// Human-readable translation of the status code.
    pub fn message(&self) -> Cow<'static, str> {
        for (code, msg) in ERROR_TABLE {
            if *code == self.0 {
                return Cow::Borrowed(msg);
            }
        }
        Cow::Owned(format!("unknown error {}", self.0))
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl Error for ProviderError {}

/// One supported pixel format, as reported by the provider.
///
/// `repr(C)` matches the two-word layout runtimes fill in directly.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageFormat {
    pub channel_order: u32,
    pub channel_type: u32,
}

/// External capability runtime consumed by the engine.
///
/// Enumeration order is meaningful: the walker reports entities by their
/// zero-based position in the returned sequences, and a device belongs to the
/// platform whose `devices` call produced it for the duration of the report.
pub trait CapabilityProvider {
    type Platform;
    type Device;

    /// Enumerate every platform the runtime exposes. Failure here is fatal
    /// to the whole report.
    fn platforms(&self) -> Result<Vec<Self::Platform>, ProviderError>;

    /// Enumerate the devices of one platform. Failure abandons only that
    /// platform's device section.
    fn devices(&self, platform: &Self::Platform) -> Result<Vec<Self::Device>, ProviderError>;

    /// Query one platform property into at most `capacity` bytes.
    fn query_platform(
        &self,
        platform: &Self::Platform,
        key: PropertyKey,
        capacity: usize,
    ) -> Result<QueryReply, ProviderError>;

    /// Query one device property into at most `capacity` bytes.
    fn query_device(
        &self,
        device: &Self::Device,
        key: PropertyKey,
        capacity: usize,
    ) -> Result<QueryReply, ProviderError>;

    /// Enumerate the pixel formats a device supports for read-only 2D
    /// images. Any transient resource needed for the answer is the
    /// provider's to acquire and release within this call.
    fn image_formats(&self, device: &Self::Device) -> Result<Vec<ImageFormat>, ProviderError>;
}

/// Standard property-key assignments shared by the descriptor tables and the
/// OpenCL backend.
pub mod keys {
    use super::PropertyKey;

    pub const PLATFORM_PROFILE: PropertyKey = 0x0900;
    pub const PLATFORM_VERSION: PropertyKey = 0x0901;
    pub const PLATFORM_NAME: PropertyKey = 0x0902;
    pub const PLATFORM_VENDOR: PropertyKey = 0x0903;
    pub const PLATFORM_EXTENSIONS: PropertyKey = 0x0904;

    pub const DEVICE_TYPE: PropertyKey = 0x1000;
    pub const DEVICE_VENDOR_ID: PropertyKey = 0x1001;
    pub const DEVICE_MAX_COMPUTE_UNITS: PropertyKey = 0x1002;
    pub const DEVICE_MAX_WORK_ITEM_DIMENSIONS: PropertyKey = 0x1003;
    pub const DEVICE_MAX_WORK_GROUP_SIZE: PropertyKey = 0x1004;
    pub const DEVICE_MAX_WORK_ITEM_SIZES: PropertyKey = 0x1005;
    pub const DEVICE_PREFERRED_VECTOR_WIDTH_CHAR: PropertyKey = 0x1006;
    pub const DEVICE_PREFERRED_VECTOR_WIDTH_SHORT: PropertyKey = 0x1007;
    pub const DEVICE_PREFERRED_VECTOR_WIDTH_INT: PropertyKey = 0x1008;
    pub const DEVICE_PREFERRED_VECTOR_WIDTH_LONG: PropertyKey = 0x1009;
    pub const DEVICE_PREFERRED_VECTOR_WIDTH_FLOAT: PropertyKey = 0x100A;
    pub const DEVICE_PREFERRED_VECTOR_WIDTH_DOUBLE: PropertyKey = 0x100B;
    pub const DEVICE_MAX_CLOCK_FREQUENCY: PropertyKey = 0x100C;
    pub const DEVICE_ADDRESS_BITS: PropertyKey = 0x100D;
    pub const DEVICE_MAX_READ_IMAGE_ARGS: PropertyKey = 0x100E;
    pub const DEVICE_MAX_WRITE_IMAGE_ARGS: PropertyKey = 0x100F;
    pub const DEVICE_MAX_MEM_ALLOC_SIZE: PropertyKey = 0x1010;
    pub const DEVICE_IMAGE2D_MAX_WIDTH: PropertyKey = 0x1011;
    pub const DEVICE_IMAGE2D_MAX_HEIGHT: PropertyKey = 0x1012;
    pub const DEVICE_IMAGE3D_MAX_WIDTH: PropertyKey = 0x1013;
    pub const DEVICE_IMAGE3D_MAX_HEIGHT: PropertyKey = 0x1014;
    pub const DEVICE_IMAGE3D_MAX_DEPTH: PropertyKey = 0x1015;
    pub const DEVICE_IMAGE_SUPPORT: PropertyKey = 0x1016;
    pub const DEVICE_MAX_PARAMETER_SIZE: PropertyKey = 0x1017;
    pub const DEVICE_MAX_SAMPLERS: PropertyKey = 0x1018;
    pub const DEVICE_MEM_BASE_ADDR_ALIGN: PropertyKey = 0x1019;
    pub const DEVICE_MIN_DATA_TYPE_ALIGN_SIZE: PropertyKey = 0x101A;
    pub const DEVICE_SINGLE_FP_CONFIG: PropertyKey = 0x101B;
    pub const DEVICE_GLOBAL_MEM_CACHE_TYPE: PropertyKey = 0x101C;
    pub const DEVICE_GLOBAL_MEM_CACHELINE_SIZE: PropertyKey = 0x101D;
    pub const DEVICE_GLOBAL_MEM_CACHE_SIZE: PropertyKey = 0x101E;
    pub const DEVICE_GLOBAL_MEM_SIZE: PropertyKey = 0x101F;
    pub const DEVICE_MAX_CONSTANT_BUFFER_SIZE: PropertyKey = 0x1020;
    pub const DEVICE_MAX_CONSTANT_ARGS: PropertyKey = 0x1021;
    pub const DEVICE_LOCAL_MEM_TYPE: PropertyKey = 0x1022;
    pub const DEVICE_LOCAL_MEM_SIZE: PropertyKey = 0x1023;
    pub const DEVICE_ERROR_CORRECTION_SUPPORT: PropertyKey = 0x1024;
    pub const DEVICE_PROFILING_TIMER_RESOLUTION: PropertyKey = 0x1025;
    pub const DEVICE_ENDIAN_LITTLE: PropertyKey = 0x1026;
    pub const DEVICE_AVAILABLE: PropertyKey = 0x1027;
    pub const DEVICE_COMPILER_AVAILABLE: PropertyKey = 0x1028;
    pub const DEVICE_EXECUTION_CAPABILITIES: PropertyKey = 0x1029;
    pub const DEVICE_QUEUE_PROPERTIES: PropertyKey = 0x102A;
    pub const DEVICE_NAME: PropertyKey = 0x102B;
    pub const DEVICE_VENDOR: PropertyKey = 0x102C;
    pub const DRIVER_VERSION: PropertyKey = 0x102D;
    pub const DEVICE_PROFILE: PropertyKey = 0x102E;
    pub const DEVICE_VERSION: PropertyKey = 0x102F;
    pub const DEVICE_EXTENSIONS: PropertyKey = 0x1030;
}
