//! Canonical configuration model shared by the Cisco and Huawei translators.
//!
//! - [`model`]: the vendor-neutral [`Config`] aggregate
//! - [`ifname`]: interface name splitting, type remapping and reindexing
//! - [`acl_id`]: ACL number translation between vendor numbering spaces
//! - [`codec`]: JSON form of the model

pub mod acl_id;
pub mod codec;
pub mod ifname;
pub mod model;

pub use codec::{from_json, read_json_file, to_json, write_json_file, CodecError};
pub use ifname::{
    parse_mappings, transform_name, IndexStyle, InterfaceMapping, MappingError, TransformOptions,
};
pub use model::{
    Acl, AclAction, AclKind, AclRule, Config, Interface, Nat, NatPolicy, OspfNetwork, Route,
    Service, Stp, Vlan,
};
