//! Compute resources — machine images, disks, network interfaces, instances.

use indexmap::IndexMap;

use crate::core::error::BuildError;
use crate::core::resource::{validate_resource_name, Resource};
use crate::core::types::{Reference, ResourceKind, Value};

use super::network::Subnet;

/// Machine image descriptor.
#[derive(Debug, Clone)]
pub struct Ami {
    id: String,
    root_device: String,
}

impl Ami {
    pub fn new(id: impl Into<String>, root_device: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            root_device: root_device.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn root_device(&self) -> &str {
        &self.root_device
    }
}

/// Block device attachable to an instance.
#[derive(Debug, Clone)]
pub enum BlockDevice {
    /// Instance-store disk, exposed as `ephemeral<id>` on the backend.
    Ephemeral { device_name: String, id: u32 },
    /// Persistent volume, size in GiB.
    Ebs { device_name: String, size: u32 },
}

impl BlockDevice {
    pub fn ephemeral(device_name: impl Into<String>, id: u32) -> Self {
        Self::Ephemeral {
            device_name: device_name.into(),
            id,
        }
    }

    pub fn ebs(device_name: impl Into<String>, size: u32) -> Self {
        Self::Ebs {
            device_name: device_name.into(),
            size,
        }
    }

    /// Entry for the instance's `BlockDeviceMappings` list.
    pub fn properties(&self) -> IndexMap<String, Value> {
        match self {
            Self::Ephemeral { device_name, id } => IndexMap::from([
                (
                    "DeviceName".to_string(),
                    Value::String(device_name.clone()),
                ),
                (
                    "VirtualName".to_string(),
                    Value::String(format!("ephemeral{id}")),
                ),
            ]),
            Self::Ebs { device_name, size } => {
                let ebs = IndexMap::from([
                    ("VolumeSize".to_string(), Value::String(size.to_string())),
                    (
                        "VolumeType".to_string(),
                        Value::String("standard".to_string()),
                    ),
                ]);
                IndexMap::from([
                    (
                        "DeviceName".to_string(),
                        Value::String(device_name.clone()),
                    ),
                    ("Ebs".to_string(), Value::Map(ebs)),
                ])
            }
        }
    }
}

/// Network interface attachable to an instance.
///
/// The device index is assigned by the owning instance on attach unless set
/// explicitly; index 0 is the implicit default device.
#[derive(Debug, Clone)]
pub struct NetworkInterface {
    subnet: Reference,
    public_ip: bool,
    groups: Vec<Reference>,
    device_index: Option<u32>,
    description: Option<String>,
}

impl NetworkInterface {
    /// Interface attached to `subnet`, captured by reference.
    pub fn new(subnet: &Subnet) -> Self {
        Self {
            subnet: subnet.reference(),
            public_ip: false,
            groups: Vec::new(),
            device_index: None,
            description: None,
        }
    }

    /// Automatically associate a public IP address.
    pub fn with_public_ip(mut self, public_ip: bool) -> Self {
        self.public_ip = public_ip;
        self
    }

    /// Security groups for the interface; the backend assigns a default
    /// group when none are given.
    pub fn with_groups(mut self, groups: Vec<Reference>) -> Self {
        self.groups = groups;
        self
    }

    /// Pin the interface to an explicit device index.
    pub fn with_device_index(mut self, index: u32) -> Self {
        self.device_index = Some(index);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn device_index(&self) -> Option<u32> {
        self.device_index
    }

    /// Entry for the instance's `NetworkInterfaces` list.
    pub fn properties(&self) -> IndexMap<String, Value> {
        let mut result = IndexMap::from([
            (
                "AssociatePublicIpAddress".to_string(),
                Value::Bool(self.public_ip),
            ),
            ("SubnetId".to_string(), Value::Ref(self.subnet.clone())),
            ("DeleteOnTermination".to_string(), Value::Bool(true)),
        ]);
        if let Some(index) = self.device_index {
            result.insert("DeviceIndex".to_string(), Value::Int(i64::from(index)));
        }
        if !self.groups.is_empty() {
            result.insert(
                "GroupSet".to_string(),
                Value::List(self.groups.iter().cloned().map(Value::Ref).collect()),
            );
        }
        if let Some(ref description) = self.description {
            result.insert(
                "Description".to_string(),
                Value::String(description.clone()),
            );
        }
        result
    }
}

/// Device category accepted by [`Instance::attach`].
pub enum Device {
    Block(BlockDevice),
    Interface(NetworkInterface),
}

impl From<BlockDevice> for Device {
    fn from(device: BlockDevice) -> Self {
        Self::Block(device)
    }
}

impl From<NetworkInterface> for Device {
    fn from(interface: NetworkInterface) -> Self {
        Self::Interface(interface)
    }
}

/// A virtual machine instance.
#[derive(Debug)]
pub struct Instance {
    name: String,
    image: Ami,
    instance_type: String,
    block_devices: Vec<BlockDevice>,
    network_interfaces: IndexMap<u32, NetworkInterface>,
    instance_profile: Option<Reference>,
}

impl Instance {
    /// Create an instance booting `image`, defaulting to a `t2.micro`.
    pub fn new(name: impl Into<String>, image: Ami) -> Result<Self, BuildError> {
        let name = name.into();
        validate_resource_name(&name)?;
        Ok(Self {
            name,
            image,
            instance_type: "t2.micro".to_string(),
            block_devices: Vec::new(),
            network_interfaces: IndexMap::new(),
            instance_profile: None,
        })
    }

    pub fn with_instance_type(mut self, instance_type: impl Into<String>) -> Self {
        self.instance_type = instance_type.into();
        self
    }

    /// Override the root volume size with an explicit EBS device on the
    /// image's root device.
    pub fn with_root_disk_size(mut self, size: u32) -> Self {
        self.block_devices
            .push(BlockDevice::ebs(self.image.root_device(), size));
        self
    }

    /// Attach an IAM instance profile, wired by reference.
    pub fn set_instance_profile(&mut self, profile: Reference) -> &mut Self {
        self.instance_profile = Some(profile);
        self
    }

    /// `!GetAtt` for the instance's public IP.
    pub fn public_ip(&self) -> Reference {
        Reference::GetAtt {
            name: self.name.clone(),
            attribute: "PublicIp".to_string(),
        }
    }

    /// Attach a disk or a network interface.
    ///
    /// Interfaces without an explicit device index get the next index above
    /// the highest assigned one (0 stays reserved for the implicit default
    /// device). Indices are never reused.
    pub fn attach(&mut self, device: impl Into<Device>) -> Result<&mut Self, BuildError> {
        match device.into() {
            Device::Block(block) => self.block_devices.push(block),
            Device::Interface(mut interface) => {
                let index = match interface.device_index() {
                    Some(index) => {
                        if self.network_interfaces.contains_key(&index) {
                            return Err(BuildError::DuplicateDeviceIndex(index));
                        }
                        index
                    }
                    None => self.network_interfaces.keys().copied().max().unwrap_or(0) + 1,
                };
                interface.device_index = Some(index);
                self.network_interfaces.insert(index, interface);
            }
        }
        Ok(self)
    }
}

impl Resource for Instance {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Ec2Instance
    }

    fn properties(&self) -> IndexMap<String, Value> {
        let mut result = IndexMap::from([
            (
                "ImageId".to_string(),
                Value::String(self.image.id().to_string()),
            ),
            (
                "InstanceType".to_string(),
                Value::String(self.instance_type.clone()),
            ),
            (
                "BlockDeviceMappings".to_string(),
                Value::List(
                    self.block_devices
                        .iter()
                        .map(|device| Value::Map(device.properties()))
                        .collect(),
                ),
            ),
        ]);
        if let Some(ref profile) = self.instance_profile {
            result.insert("IamInstanceProfile".to_string(), Value::Ref(profile.clone()));
        }
        if !self.network_interfaces.is_empty() {
            result.insert(
                "NetworkInterfaces".to_string(),
                Value::List(
                    self.network_interfaces
                        .values()
                        .map(|interface| Value::Map(interface.properties()))
                        .collect(),
                ),
            );
        }
        result
    }
}
