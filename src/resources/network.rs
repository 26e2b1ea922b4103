//! VPC networking resources.

use indexmap::IndexMap;

use crate::core::error::BuildError;
use crate::core::resource::{validate_resource_name, Resource};
use crate::core::types::{Reference, ResourceKind, Value};

/// An isolated virtual network.
#[derive(Debug)]
pub struct Vpc {
    name: String,
    cidr_block: String,
}

impl Vpc {
    /// Create a VPC spanning `cidr_block`.
    pub fn new(
        name: impl Into<String>,
        cidr_block: impl Into<String>,
    ) -> Result<Self, BuildError> {
        let name = name.into();
        validate_resource_name(&name)?;
        Ok(Self {
            name,
            cidr_block: cidr_block.into(),
        })
    }

    /// `!GetAtt` for the VPC's realized CIDR block.
    pub fn cidr_block_attr(&self) -> Reference {
        Reference::GetAtt {
            name: self.name.clone(),
            attribute: "CidrBlock".to_string(),
        }
    }
}

impl Resource for Vpc {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Ec2Vpc
    }

    fn properties(&self) -> IndexMap<String, Value> {
        IndexMap::from([(
            "CidrBlock".to_string(),
            Value::String(self.cidr_block.clone()),
        )])
    }
}

/// A CIDR slice of a VPC.
#[derive(Debug)]
pub struct Subnet {
    name: String,
    vpc: Reference,
    cidr_block: String,
}

impl Subnet {
    /// Create a subnet inside `vpc` spanning `cidr_block`.
    pub fn new(
        name: impl Into<String>,
        vpc: &Vpc,
        cidr_block: impl Into<String>,
    ) -> Result<Self, BuildError> {
        let name = name.into();
        validate_resource_name(&name)?;
        Ok(Self {
            name,
            vpc: vpc.reference(),
            cidr_block: cidr_block.into(),
        })
    }
}

impl Resource for Subnet {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Ec2Subnet
    }

    fn properties(&self) -> IndexMap<String, Value> {
        IndexMap::from([
            (
                "CidrBlock".to_string(),
                Value::String(self.cidr_block.clone()),
            ),
            ("VpcId".to_string(), Value::Ref(self.vpc.clone())),
        ])
    }
}

/// An internet gateway.
#[derive(Debug)]
pub struct InternetGateway {
    name: String,
}

impl InternetGateway {
    pub fn new(name: impl Into<String>) -> Result<Self, BuildError> {
        let name = name.into();
        validate_resource_name(&name)?;
        Ok(Self { name })
    }
}

impl Resource for InternetGateway {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Ec2InternetGateway
    }

    fn properties(&self) -> IndexMap<String, Value> {
        IndexMap::new()
    }
}

/// Attachment binding an internet gateway to a VPC.
#[derive(Debug)]
pub struct VpcGatewayAttachment {
    name: String,
    vpc: Reference,
    gateway: Reference,
}

impl VpcGatewayAttachment {
    pub fn new(
        name: impl Into<String>,
        vpc: &Vpc,
        gateway: &InternetGateway,
    ) -> Result<Self, BuildError> {
        let name = name.into();
        validate_resource_name(&name)?;
        Ok(Self {
            name,
            vpc: vpc.reference(),
            gateway: gateway.reference(),
        })
    }
}

impl Resource for VpcGatewayAttachment {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Ec2VpcGatewayAttachment
    }

    fn properties(&self) -> IndexMap<String, Value> {
        IndexMap::from([
            ("VpcId".to_string(), Value::Ref(self.vpc.clone())),
            (
                "InternetGatewayId".to_string(),
                Value::Ref(self.gateway.clone()),
            ),
        ])
    }
}

/// A route table scoped to a VPC.
#[derive(Debug)]
pub struct RouteTable {
    name: String,
    vpc: Reference,
    tags: Option<IndexMap<String, String>>,
}

impl RouteTable {
    pub fn new(name: impl Into<String>, vpc: &Vpc) -> Result<Self, BuildError> {
        let name = name.into();
        validate_resource_name(&name)?;
        Ok(Self {
            name,
            vpc: vpc.reference(),
            tags: None,
        })
    }

    /// Attach key/value tags, serialized under `Tags`.
    pub fn with_tags(mut self, tags: IndexMap<String, String>) -> Self {
        self.tags = Some(tags);
        self
    }
}

impl Resource for RouteTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Ec2RouteTable
    }

    fn properties(&self) -> IndexMap<String, Value> {
        let mut result = IndexMap::from([("VpcId".to_string(), Value::Ref(self.vpc.clone()))]);
        if let Some(ref tags) = self.tags {
            let entries = tags
                .iter()
                .map(|(key, value)| (key.clone(), Value::String(value.clone())))
                .collect();
            result.insert("Tags".to_string(), Value::Map(entries));
        }
        result
    }
}

/// A route through a gateway.
///
/// The gateway attachment is recorded as a `DependsOn` edge by name only;
/// the backend must realize the attachment before the route is usable.
#[derive(Debug)]
pub struct Route {
    name: String,
    route_table: Reference,
    dest_cidr_block: String,
    gateway: Reference,
    depends: String,
}

impl Route {
    pub fn new(
        name: impl Into<String>,
        route_table: &RouteTable,
        dest_cidr_block: impl Into<String>,
        gateway: &InternetGateway,
        gateway_attach: &VpcGatewayAttachment,
    ) -> Result<Self, BuildError> {
        let name = name.into();
        validate_resource_name(&name)?;
        Ok(Self {
            name,
            route_table: route_table.reference(),
            dest_cidr_block: dest_cidr_block.into(),
            gateway: gateway.reference(),
            depends: gateway_attach.name().to_string(),
        })
    }
}

impl Resource for Route {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Ec2Route
    }

    fn depends(&self) -> Option<&str> {
        Some(&self.depends)
    }

    fn properties(&self) -> IndexMap<String, Value> {
        IndexMap::from([
            (
                "RouteTableId".to_string(),
                Value::Ref(self.route_table.clone()),
            ),
            (
                "DestinationCidrBlock".to_string(),
                Value::String(self.dest_cidr_block.clone()),
            ),
            ("GatewayId".to_string(), Value::Ref(self.gateway.clone())),
        ])
    }
}

/// Association binding a subnet to a route table.
#[derive(Debug)]
pub struct SubnetRouteTableAssociation {
    name: String,
    subnet: Reference,
    route_table: Reference,
}

impl SubnetRouteTableAssociation {
    pub fn new(
        name: impl Into<String>,
        subnet: &Subnet,
        route_table: &RouteTable,
    ) -> Result<Self, BuildError> {
        let name = name.into();
        validate_resource_name(&name)?;
        Ok(Self {
            name,
            subnet: subnet.reference(),
            route_table: route_table.reference(),
        })
    }
}

impl Resource for SubnetRouteTableAssociation {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Ec2SubnetRouteTableAssociation
    }

    fn properties(&self) -> IndexMap<String, Value> {
        IndexMap::from([
            ("SubnetId".to_string(), Value::Ref(self.subnet.clone())),
            (
                "RouteTableId".to_string(),
                Value::Ref(self.route_table.clone()),
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vpc_properties() {
        let vpc = Vpc::new("MainVPC", "10.0.0.0/16").unwrap();
        let properties = vpc.properties();
        assert_eq!(
            properties.get("CidrBlock").and_then(Value::as_str),
            Some("10.0.0.0/16")
        );
        assert_eq!(vpc.kind(), ResourceKind::Ec2Vpc);
    }

    #[test]
    fn test_vpc_cidr_block_attr() {
        let vpc = Vpc::new("MainVPC", "10.0.0.0/16").unwrap();
        assert_eq!(
            vpc.cidr_block_attr(),
            Reference::GetAtt {
                name: "MainVPC".to_string(),
                attribute: "CidrBlock".to_string()
            }
        );
    }

    #[test]
    fn test_vpc_rejects_bad_name() {
        assert!(Vpc::new("main-vpc", "10.0.0.0/16").is_err());
    }

    #[test]
    fn test_subnet_holds_vpc_by_reference() {
        let vpc = Vpc::new("Net", "10.0.0.0/16").unwrap();
        let subnet = Subnet::new("Public", &vpc, "10.0.1.0/24").unwrap();
        let properties = subnet.properties();
        assert_eq!(
            properties.get("VpcId"),
            Some(&Value::Ref(Reference::new("Net")))
        );
        assert_eq!(
            properties.get("CidrBlock").and_then(Value::as_str),
            Some("10.0.1.0/24")
        );
    }

    #[test]
    fn test_internet_gateway_has_no_properties() {
        let gateway = InternetGateway::new("Gw").unwrap();
        assert!(gateway.properties().is_empty());
        assert_eq!(gateway.kind(), ResourceKind::Ec2InternetGateway);
    }

    #[test]
    fn test_gateway_attachment_wires_both_ends() {
        let vpc = Vpc::new("Net", "10.0.0.0/16").unwrap();
        let gateway = InternetGateway::new("Gw").unwrap();
        let attachment = VpcGatewayAttachment::new("GwAttach", &vpc, &gateway).unwrap();
        let properties = attachment.properties();
        assert_eq!(
            properties.get("VpcId"),
            Some(&Value::Ref(Reference::new("Net")))
        );
        assert_eq!(
            properties.get("InternetGatewayId"),
            Some(&Value::Ref(Reference::new("Gw")))
        );
    }

    #[test]
    fn test_route_table_tags_optional() {
        let vpc = Vpc::new("Net", "10.0.0.0/16").unwrap();
        let bare = RouteTable::new("Routes", &vpc).unwrap();
        assert!(bare.properties().get("Tags").is_none());

        let tagged = RouteTable::new("Routes", &vpc)
            .unwrap()
            .with_tags(IndexMap::from([(
                "env".to_string(),
                "prod".to_string(),
            )]));
        let properties = tagged.properties();
        assert_eq!(
            properties.get("Tags").and_then(|t| t.get("env")).and_then(Value::as_str),
            Some("prod")
        );
    }

    #[test]
    fn test_route_depends_on_attachment_by_name() {
        let vpc = Vpc::new("Net", "10.0.0.0/16").unwrap();
        let gateway = InternetGateway::new("Gw").unwrap();
        let attachment = VpcGatewayAttachment::new("GwAttach", &vpc, &gateway).unwrap();
        let table = RouteTable::new("Routes", &vpc).unwrap();
        let route = Route::new("Default", &table, "0.0.0.0/0", &gateway, &attachment).unwrap();

        assert_eq!(route.depends(), Some("GwAttach"));
        let properties = route.properties();
        assert_eq!(
            properties.get("DestinationCidrBlock").and_then(Value::as_str),
            Some("0.0.0.0/0")
        );
        assert_eq!(
            properties.get("GatewayId"),
            Some(&Value::Ref(Reference::new("Gw")))
        );
    }

    #[test]
    fn test_association_properties() {
        let vpc = Vpc::new("Net", "10.0.0.0/16").unwrap();
        let subnet = Subnet::new("Public", &vpc, "10.0.1.0/24").unwrap();
        let table = RouteTable::new("Routes", &vpc).unwrap();
        let association =
            SubnetRouteTableAssociation::new("PublicRoutes", &subnet, &table).unwrap();
        let properties = association.properties();
        assert_eq!(
            properties.get("SubnetId"),
            Some(&Value::Ref(Reference::new("Public")))
        );
        assert_eq!(
            properties.get("RouteTableId"),
            Some(&Value::Ref(Reference::new("Routes")))
        );
    }
}
