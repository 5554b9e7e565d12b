//! Hierarchy walker: platforms, then each platform's devices, single pass.
//!
//! Severity policy: a failure enumerating the platform list aborts the run
//! (the caller reports it and exits non-zero); a failure enumerating one
//! platform's devices abandons only that platform's device section and the
//! walk continues with the next platform. Anything below that is handled
//! inside the composer and never escalates here.

use crate::provider::CapabilityProvider;
use crate::report::{self, Sink};
use anyhow::{Context, Result};

/// Width of the section separators between sibling entities.
pub const SEPARATOR_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
    /// Enable the optional pixel-format category per device.
    pub image_formats: bool,
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

/// Walk the full hierarchy and compose the report into `sink`.
pub fn walk<P: CapabilityProvider>(
    provider: &P,
    options: WalkOptions,
    sink: &mut Sink<'_>,
) -> Result<()> {
    let platforms = provider
        .platforms()
        .context("Unable to enumerate the platforms")?;
    writeln!(
        sink.out,
        "Found {} platform{}.",
        platforms.len(),
        plural(platforms.len())
    )?;

    for (platform_index, platform) in platforms.iter().enumerate() {
        report::render_platform(sink, platform_index, &mut |key, capacity| {
            provider.query_platform(platform, key, capacity)
        })?;
        walk_devices(provider, options, sink, platform_index, platform)?;
        if platform_index + 1 < platforms.len() {
            writeln!(sink.out, "{}", "=".repeat(SEPARATOR_WIDTH))?;
        }
    }
    Ok(())
}

fn walk_devices<P: CapabilityProvider>(
    provider: &P,
    options: WalkOptions,
    sink: &mut Sink<'_>,
    platform_index: usize,
    platform: &P::Platform,
) -> Result<()> {
    let devices = match provider.devices(platform) {
        Ok(devices) => devices,
        Err(err) => {
            writeln!(
                sink.diag,
                "platform[{platform_index}]: Unable to enumerate the devices: {err}!"
            )?;
            return Ok(());
        }
    };
    writeln!(
        sink.out,
        "platform[{platform_index}]: Found {} device{}.",
        devices.len(),
        plural(devices.len())
    )?;

    for (device_index, device) in devices.iter().enumerate() {
        let fetch_formats = options
            .image_formats
            .then_some(|| provider.image_formats(device));
        report::render_device(
            sink,
            device_index,
            &mut |key, capacity| provider.query_device(device, key, capacity),
            fetch_formats,
        )?;
        if device_index + 1 < devices.len() {
            writeln!(sink.out, "{}", "-".repeat(SEPARATOR_WIDTH))?;
        }
    }
    Ok(())
}
