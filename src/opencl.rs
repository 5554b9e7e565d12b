//! OpenCL-backed capability provider.
//!
//! Thin call-through to the installed OpenCL runtime: enumerate platforms,
//! enumerate a platform's devices, query info by key. Every info query asks
//! the runtime for the natural size first and then fetches at most the
//! caller's capacity, so oversize properties stay observable as truncation
//! instead of surfacing as buffer errors. The image-format query needs a
//! context; it is created for exactly that call and released on every exit
//! path by a drop guard.

use crate::provider::{
    CapabilityProvider, ImageFormat, PropertyKey, ProviderError, QueryReply,
};
use libc::{c_char, c_void, size_t};
use std::ptr;

type ClInt = i32;
type ClUint = u32;
type ClBitfield = u64;
type ClPlatformId = *mut c_void;
type ClDeviceId = *mut c_void;
type ClContext = *mut c_void;

const SUCCESS: ClInt = 0;
const DEVICE_TYPE_ALL: ClBitfield = 0xFFFF_FFFF;
const MEM_READ_ONLY: ClBitfield = 1 << 2;
const MEM_OBJECT_IMAGE2D: ClUint = 0x10F1;

type ContextNotify =
    Option<unsafe extern "C" fn(*const c_char, *const c_void, size_t, *mut c_void)>;

#[link(name = "OpenCL")]
unsafe extern "C" {
    fn clGetPlatformIDs(
        num_entries: ClUint,
        platforms: *mut ClPlatformId,
        num_platforms: *mut ClUint,
    ) -> ClInt;
    fn clGetPlatformInfo(
        platform: ClPlatformId,
        param_name: ClUint,
        param_value_size: size_t,
        param_value: *mut c_void,
        param_value_size_ret: *mut size_t,
    ) -> ClInt;
    fn clGetDeviceIDs(
        platform: ClPlatformId,
        device_type: ClBitfield,
        num_entries: ClUint,
        devices: *mut ClDeviceId,
        num_devices: *mut ClUint,
    ) -> ClInt;
    fn clGetDeviceInfo(
        device: ClDeviceId,
        param_name: ClUint,
        param_value_size: size_t,
        param_value: *mut c_void,
        param_value_size_ret: *mut size_t,
    ) -> ClInt;
    fn clCreateContext(
        properties: *const isize,
        num_devices: ClUint,
        devices: *const ClDeviceId,
        pfn_notify: ContextNotify,
        user_data: *mut c_void,
        errcode_ret: *mut ClInt,
    ) -> ClContext;
    fn clGetSupportedImageFormats(
        context: ClContext,
        flags: ClBitfield,
        image_type: ClUint,
        num_entries: ClUint,
        image_formats: *mut ImageFormat,
        num_image_formats: *mut ClUint,
    ) -> ClInt;
    fn clReleaseContext(context: ClContext) -> ClInt;
}

fn status(code: ClInt) -> Result<(), ProviderError> {
    if code == SUCCESS {
        Ok(())
    } else {
        Err(ProviderError(code))
    }
}

/// Opaque platform id from the runtime, valid for one enumeration pass.
pub struct PlatformHandle(ClPlatformId);

/// Opaque device id from the runtime, tied to the platform that listed it.
pub struct DeviceHandle(ClDeviceId);

/// Releases a transient context when the enclosing query returns.
struct ContextGuard(ClContext);

impl Drop for ContextGuard {
    fn drop(&mut self) {
        // A failed release cannot be reported from here; the context is
        // gone either way once the query ends.
        unsafe {
            clReleaseContext(self.0);
        }
    }
}

/// Size-probe-then-fetch wrapper shared by the platform and device queries.
fn info_query<F>(fetch: F, capacity: usize) -> Result<QueryReply, ProviderError>
where
    F: Fn(size_t, *mut c_void, *mut size_t) -> ClInt,
{
    let mut natural: size_t = 0;
    status(fetch(0, ptr::null_mut(), &mut natural))?;
    let take = natural.min(capacity);
    let mut bytes = vec![0u8; take];
    if take > 0 {
        status(fetch(take, bytes.as_mut_ptr().cast(), ptr::null_mut()))?;
    }
    Ok(QueryReply {
        bytes,
        natural_size: natural,
    })
}

/// The installed OpenCL runtime as a [`CapabilityProvider`].
#[derive(Default)]
pub struct OpenClProvider;

impl CapabilityProvider for OpenClProvider {
    type Platform = PlatformHandle;
    type Device = DeviceHandle;

    fn platforms(&self) -> Result<Vec<PlatformHandle>, ProviderError> {
        let mut count: ClUint = 0;
        status(unsafe { clGetPlatformIDs(0, ptr::null_mut(), &mut count) })?;
        let mut ids: Vec<ClPlatformId> = vec![ptr::null_mut(); count as usize];
        if count > 0 {
            status(unsafe { clGetPlatformIDs(count, ids.as_mut_ptr(), ptr::null_mut()) })?;
        }
        Ok(ids.into_iter().map(PlatformHandle).collect())
    }

    fn devices(&self, platform: &PlatformHandle) -> Result<Vec<DeviceHandle>, ProviderError> {
        let mut count: ClUint = 0;
        status(unsafe {
            clGetDeviceIDs(platform.0, DEVICE_TYPE_ALL, 0, ptr::null_mut(), &mut count)
        })?;
        let mut ids: Vec<ClDeviceId> = vec![ptr::null_mut(); count as usize];
        if count > 0 {
            status(unsafe {
                clGetDeviceIDs(
                    platform.0,
                    DEVICE_TYPE_ALL,
                    count,
                    ids.as_mut_ptr(),
                    ptr::null_mut(),
                )
            })?;
        }
        Ok(ids.into_iter().map(DeviceHandle).collect())
    }

    fn query_platform(
        &self,
        platform: &PlatformHandle,
        key: PropertyKey,
        capacity: usize,
    ) -> Result<QueryReply, ProviderError> {
        info_query(
            |size, value, size_ret| unsafe {
                clGetPlatformInfo(platform.0, key, size, value, size_ret)
            },
            capacity,
        )
    }

    fn query_device(
        &self,
        device: &DeviceHandle,
        key: PropertyKey,
        capacity: usize,
    ) -> Result<QueryReply, ProviderError> {
        info_query(
            |size, value, size_ret| unsafe {
                clGetDeviceInfo(device.0, key, size, value, size_ret)
            },
            capacity,
        )
    }

    fn image_formats(&self, device: &DeviceHandle) -> Result<Vec<ImageFormat>, ProviderError> {
        let mut code: ClInt = SUCCESS;
        let raw = unsafe {
            clCreateContext(ptr::null(), 1, &device.0, None, ptr::null_mut(), &mut code)
        };
        status(code)?;
        let context = ContextGuard(raw);

        let mut count: ClUint = 0;
        status(unsafe {
            clGetSupportedImageFormats(
                context.0,
                MEM_READ_ONLY,
                MEM_OBJECT_IMAGE2D,
                0,
                ptr::null_mut(),
                &mut count,
            )
        })?;
        let mut formats = vec![
            ImageFormat {
                channel_order: 0,
                channel_type: 0,
            };
            count as usize
        ];
        if count > 0 {
            status(unsafe {
                clGetSupportedImageFormats(
                    context.0,
                    MEM_READ_ONLY,
                    MEM_OBJECT_IMAGE2D,
                    count,
                    formats.as_mut_ptr(),
                    ptr::null_mut(),
                )
            })?;
        }
        Ok(formats)
    }
}
