use capinfo::descriptor::{self, ValueKind};
use capinfo::provider::keys;
use capinfo::{CapabilityProvider, ImageFormat, PropertyKey, ProviderError, QueryReply};
use std::collections::BTreeMap;

/// Scripted reply for one property of one entity.
#[derive(Clone)]
pub enum Scripted {
    Reply { bytes: Vec<u8>, natural: usize },
    Fail(i32),
}

/// Per-entity property map. Unscripted keys fail with the provider's
/// invalid-value code, which is how a real runtime reports an unknown key.
#[derive(Clone, Default)]
pub struct PropertySet(BTreeMap<PropertyKey, Scripted>);

impl PropertySet {
    pub fn set_text(&mut self, key: PropertyKey, value: &str) {
        let mut bytes = value.as_bytes().to_vec();
        bytes.push(0);
        let natural = bytes.len();
        self.0.insert(key, Scripted::Reply { bytes, natural });
    }

    pub fn set_scalar(&mut self, key: PropertyKey, value: u64) {
        self.0.insert(
            key,
            Scripted::Reply {
                bytes: value.to_le_bytes().to_vec(),
                natural: 8,
            },
        );
    }

    pub fn set_triple(&mut self, key: PropertyKey, lanes: [u64; 3]) {
        let mut bytes = Vec::with_capacity(24);
        for lane in lanes {
            bytes.extend_from_slice(&lane.to_le_bytes());
        }
        self.0.insert(key, Scripted::Reply { bytes, natural: 24 });
    }

    /// Reply whose natural size exceeds what the bytes can hold; the engine
    /// must flag truncation and render what was returned.
    pub fn set_oversize(&mut self, key: PropertyKey, bytes: Vec<u8>, natural: usize) {
        self.0.insert(key, Scripted::Reply { bytes, natural });
    }

    pub fn set_failure(&mut self, key: PropertyKey, code: i32) {
        self.0.insert(key, Scripted::Fail(code));
    }

    fn query(&self, key: PropertyKey, capacity: usize) -> Result<QueryReply, ProviderError> {
        match self.0.get(&key) {
            None => Err(ProviderError(-30)),
            Some(Scripted::Fail(code)) => Err(ProviderError(*code)),
            Some(Scripted::Reply { bytes, natural }) => Ok(QueryReply {
                bytes: bytes[..bytes.len().min(capacity)].to_vec(),
                natural_size: *natural,
            }),
        }
    }
}

#[derive(Clone)]
pub struct ScriptedDevice {
    pub properties: PropertySet,
    pub image_formats: Result<Vec<ImageFormat>, ProviderError>,
}

#[derive(Clone)]
pub struct ScriptedPlatform {
    pub properties: PropertySet,
    pub devices: Result<Vec<ScriptedDevice>, ProviderError>,
}

/// In-memory provider with fully scripted behavior. Handles are indices
/// into the scripted structure.
pub struct ScriptedProvider {
    pub platforms: Result<Vec<ScriptedPlatform>, ProviderError>,
}

impl ScriptedProvider {
    fn platform(&self, index: usize) -> &ScriptedPlatform {
        &self.platforms.as_ref().expect("scripted platforms")[index]
    }

    fn device(&self, platform: usize, device: usize) -> &ScriptedDevice {
        &self.platform(platform).devices.as_ref().expect("scripted devices")[device]
    }
}

impl CapabilityProvider for ScriptedProvider {
    type Platform = usize;
    type Device = (usize, usize);

    fn platforms(&self) -> Result<Vec<usize>, ProviderError> {
        match &self.platforms {
            Ok(platforms) => Ok((0..platforms.len()).collect()),
            Err(err) => Err(*err),
        }
    }

    fn devices(&self, platform: &usize) -> Result<Vec<(usize, usize)>, ProviderError> {
        match &self.platform(*platform).devices {
            Ok(devices) => Ok((0..devices.len()).map(|idx| (*platform, idx)).collect()),
            Err(err) => Err(*err),
        }
    }

    fn query_platform(
        &self,
        platform: &usize,
        key: PropertyKey,
        capacity: usize,
    ) -> Result<QueryReply, ProviderError> {
        self.platform(*platform).properties.query(key, capacity)
    }

    fn query_device(
        &self,
        device: &(usize, usize),
        key: PropertyKey,
        capacity: usize,
    ) -> Result<QueryReply, ProviderError> {
        self.device(device.0, device.1).properties.query(key, capacity)
    }

    fn image_formats(
        &self,
        device: &(usize, usize),
    ) -> Result<Vec<ImageFormat>, ProviderError> {
        self.device(device.0, device.1).image_formats.clone()
    }
}

/// Platform properties with every descriptor scripted.
pub fn complete_platform_properties() -> PropertySet {
    let mut set = PropertySet::default();
    set.set_text(keys::PLATFORM_NAME, "Scripted Platform");
    set.set_text(keys::PLATFORM_VENDOR, "Fixture Vendor");
    set.set_text(keys::PLATFORM_PROFILE, "FULL_PROFILE");
    set.set_text(keys::PLATFORM_VERSION, "OpenCL 1.2 fixture");
    set.set_text(keys::PLATFORM_EXTENSIONS, "cl_khr_icd cl_khr_fp64");
    set
}

/// Device properties with every descriptor in every table scripted, derived
/// from the tables themselves so the fixture stays complete as they evolve.
pub fn complete_device_properties() -> PropertySet {
    let mut set = PropertySet::default();
    for table in descriptor::device_tables() {
        for prop in table {
            match prop.kind {
                ValueKind::Text => set.set_text(prop.key, "fixture value"),
                ValueKind::TokenList => {
                    set.set_text(prop.key, "cl_khr_fp64 cl_khr_byte_addressable_store")
                }
                ValueKind::Scalar => set.set_scalar(prop.key, 1024),
                ValueKind::Hex => set.set_scalar(prop.key, 0x3f),
                ValueKind::Flags(flags) => set.set_scalar(prop.key, flags[0].bit),
                ValueKind::Enum(_) => set.set_scalar(prop.key, 1),
                ValueKind::Triple => set.set_triple(prop.key, [1024, 512, 64]),
            }
        }
    }
    set
}

pub fn complete_device() -> ScriptedDevice {
    ScriptedDevice {
        properties: complete_device_properties(),
        image_formats: Ok(vec![
            ImageFormat {
                channel_order: 0x10B5,
                channel_type: 0x10D2,
            },
            ImageFormat {
                channel_order: 0x10B0,
                channel_type: 0x10DE,
            },
        ]),
    }
}

pub fn platform_with_devices(devices: Vec<ScriptedDevice>) -> ScriptedPlatform {
    ScriptedPlatform {
        properties: complete_platform_properties(),
        devices: Ok(devices),
    }
}
