//! Resource kind catalog, intrinsic references, and the template value tree.
//!
//! A kind pairs a symbolic name with the canonical backend type string and
//! the attribute set valid for `!GetAtt` references. References are pure
//! value objects: they name resources by string identity and are resolved
//! by the backend when it reads the rendered template, never by this crate.

use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;

use super::error::BuildError;

// ============================================================================
// Resource kinds
// ============================================================================

/// CloudFormation resource types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Ec2Instance,
    Ec2InternetGateway,
    Ec2Route,
    Ec2RouteTable,
    Ec2SecurityGroup,
    Ec2Subnet,
    Ec2SubnetRouteTableAssociation,
    Ec2Volume,
    Ec2Vpc,
    Ec2VpcGatewayAttachment,
    IamRole,
    IamPolicy,
    IamInstanceProfile,
    Route53RecordSet,
    S3Bucket,
    CodeCommitRepository,
}

impl ResourceKind {
    /// Canonical backend type string, emitted as the fragment's `Type`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ec2Instance => "AWS::EC2::Instance",
            Self::Ec2InternetGateway => "AWS::EC2::InternetGateway",
            Self::Ec2Route => "AWS::EC2::Route",
            Self::Ec2RouteTable => "AWS::EC2::RouteTable",
            Self::Ec2SecurityGroup => "AWS::EC2::SecurityGroup",
            Self::Ec2Subnet => "AWS::EC2::Subnet",
            Self::Ec2SubnetRouteTableAssociation => "AWS::EC2::SubnetRouteTableAssociation",
            Self::Ec2Volume => "AWS::EC2::Volume",
            Self::Ec2Vpc => "AWS::EC2::VPC",
            Self::Ec2VpcGatewayAttachment => "AWS::EC2::VPCGatewayAttachment",
            Self::IamRole => "AWS::IAM::Role",
            Self::IamPolicy => "AWS::IAM::Policy",
            Self::IamInstanceProfile => "AWS::IAM::InstanceProfile",
            Self::Route53RecordSet => "AWS::Route53::RecordSet",
            Self::S3Bucket => "AWS::S3::Bucket",
            Self::CodeCommitRepository => "AWS::CodeCommit::Repository",
        }
    }

    /// Symbolic name used in diagnostics and kind lookup.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ec2Instance => "ec2-instance",
            Self::Ec2InternetGateway => "ec2-internet-gateway",
            Self::Ec2Route => "ec2-route",
            Self::Ec2RouteTable => "ec2-route-table",
            Self::Ec2SecurityGroup => "ec2-security-group",
            Self::Ec2Subnet => "ec2-subnet",
            Self::Ec2SubnetRouteTableAssociation => "ec2-subnet-route-table-association",
            Self::Ec2Volume => "ec2-volume",
            Self::Ec2Vpc => "ec2-vpc",
            Self::Ec2VpcGatewayAttachment => "ec2-vpc-gateway-attachment",
            Self::IamRole => "iam-role",
            Self::IamPolicy => "iam-policy",
            Self::IamInstanceProfile => "iam-instance-profile",
            Self::Route53RecordSet => "route53-recordset",
            Self::S3Bucket => "s3-bucket",
            Self::CodeCommitRepository => "codecommit-repository",
        }
    }

    /// Attribute names valid for `!GetAtt` references on this kind.
    pub fn attributes(self) -> &'static [&'static str] {
        match self {
            Self::Ec2Instance => &[
                "AvailabilityZone",
                "PrivateDnsName",
                "PublicDnsName",
                "PrivateIp",
                "PublicIp",
            ],
            Self::Ec2Vpc => &[
                "CidrBlock",
                "CidrBlockAssociations",
                "DefaultNetworkAcl",
                "DefaultSecurityGroup",
                "Ipv6CidrBlocks",
            ],
            Self::CodeCommitRepository => &["Arn", "CloneUrlHttp", "CloneUrlSsh", "Name"],
            _ => &[],
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResourceKind {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ec2-instance" => Ok(Self::Ec2Instance),
            "ec2-internet-gateway" => Ok(Self::Ec2InternetGateway),
            "ec2-route" => Ok(Self::Ec2Route),
            "ec2-route-table" => Ok(Self::Ec2RouteTable),
            "ec2-security-group" => Ok(Self::Ec2SecurityGroup),
            "ec2-subnet" => Ok(Self::Ec2Subnet),
            "ec2-subnet-route-table-association" => Ok(Self::Ec2SubnetRouteTableAssociation),
            "ec2-volume" => Ok(Self::Ec2Volume),
            "ec2-vpc" => Ok(Self::Ec2Vpc),
            "ec2-vpc-gateway-attachment" => Ok(Self::Ec2VpcGatewayAttachment),
            "iam-role" => Ok(Self::IamRole),
            "iam-policy" => Ok(Self::IamPolicy),
            "iam-instance-profile" => Ok(Self::IamInstanceProfile),
            "route53-recordset" => Ok(Self::Route53RecordSet),
            "s3-bucket" => Ok(Self::S3Bucket),
            "codecommit-repository" => Ok(Self::CodeCommitRepository),
            other => Err(BuildError::InvalidKind(other.to_string())),
        }
    }
}

// ============================================================================
// Intrinsic references
// ============================================================================

/// A symbolic pointer into the template, resolved by the backend at apply
/// time.
///
/// References hold resource names, not resource objects: the link is a
/// string-keyed foreign key, never an ownership edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// `!Ref`: the realized identity of a named resource.
    Ref { name: String },
    /// `!GetAtt`: one attribute of a named resource. Built through
    /// [`Resource::attribute`](super::resource::Resource::attribute), which
    /// validates the attribute against the kind's declared set.
    GetAtt { name: String, attribute: String },
    /// `!Base64`: literal content the backend encodes at apply time.
    /// Carries no resource identity.
    Base64 { content: String },
}

impl Reference {
    /// Direct reference to a resource by logical name.
    pub fn new(name: impl Into<String>) -> Self {
        Self::Ref { name: name.into() }
    }

    /// Content to be base64-encoded by the backend.
    pub fn base64(content: impl Into<String>) -> Self {
        Self::Base64 {
            content: content.into(),
        }
    }
}

// ============================================================================
// Template values
// ============================================================================

/// A node in the exportable template tree.
///
/// Maps preserve insertion order so rendering is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    String(String),
    Int(i64),
    Bool(bool),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
    Ref(Reference),
}

impl Value {
    /// Look up a key when this value is a map.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Map(entries) => entries.get(key),
            _ => None,
        }
    }

    /// The string payload when this value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Reference> for Value {
    fn from(v: Reference) -> Self {
        Self::Ref(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::List(v)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(v: IndexMap<String, Value>) -> Self {
        Self::Map(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_backend_strings() {
        assert_eq!(ResourceKind::Ec2Instance.as_str(), "AWS::EC2::Instance");
        assert_eq!(ResourceKind::Ec2Vpc.as_str(), "AWS::EC2::VPC");
        assert_eq!(
            ResourceKind::CodeCommitRepository.as_str(),
            "AWS::CodeCommit::Repository"
        );
    }

    #[test]
    fn test_kind_display_is_symbolic_name() {
        assert_eq!(ResourceKind::Ec2Vpc.to_string(), "ec2-vpc");
        assert_eq!(
            ResourceKind::Ec2SubnetRouteTableAssociation.to_string(),
            "ec2-subnet-route-table-association"
        );
    }

    #[test]
    fn test_kind_parse_roundtrip() {
        let kinds = [
            ResourceKind::Ec2Instance,
            ResourceKind::Ec2Vpc,
            ResourceKind::IamRole,
            ResourceKind::S3Bucket,
            ResourceKind::CodeCommitRepository,
        ];
        for kind in kinds {
            assert_eq!(kind.name().parse::<ResourceKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_kind_parse_unknown() {
        let err = "quantum-teleporter".parse::<ResourceKind>().unwrap_err();
        assert_eq!(
            err,
            BuildError::InvalidKind("quantum-teleporter".to_string())
        );
    }

    #[test]
    fn test_kind_attributes() {
        assert!(ResourceKind::Ec2Instance.attributes().contains(&"PublicIp"));
        assert!(ResourceKind::Ec2Vpc.attributes().contains(&"CidrBlock"));
        assert!(ResourceKind::Ec2Subnet.attributes().is_empty());
    }

    #[test]
    fn test_reference_constructors() {
        assert_eq!(
            Reference::new("Server"),
            Reference::Ref {
                name: "Server".to_string()
            }
        );
        assert_eq!(
            Reference::base64("#!/bin/sh"),
            Reference::Base64 {
                content: "#!/bin/sh".to_string()
            }
        );
    }

    #[test]
    fn test_value_get_and_as_str() {
        let map = Value::Map(IndexMap::from([(
            "Key".to_string(),
            Value::from("payload"),
        )]));
        assert_eq!(map.get("Key").and_then(Value::as_str), Some("payload"));
        assert!(map.get("Missing").is_none());
        assert!(Value::Int(3).get("Key").is_none());
    }

    #[test]
    fn test_value_from_conversions() {
        assert_eq!(Value::from(7i64), Value::Int(7));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(
            Value::from(Reference::new("Net")),
            Value::Ref(Reference::new("Net"))
        );
    }
}
