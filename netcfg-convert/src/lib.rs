//! Cisco and Huawei switch/router configuration translation.
//!
//! Configuration text is parsed into the vendor-neutral model from
//! `netcfg-core`, optionally run through an interface rename pass, and
//! regenerated in the target dialect. JSON can stand in for either end.
//!
//! # Architecture
//!
//! - [`parse`]: line-oriented Cisco and Huawei parsers
//! - [`generate`]: Cisco and Huawei text generators
//! - [`dialect`]: dialect selection tying parsers, generators and JSON together
//! - [`rename`]: batch interface renaming over a parsed configuration
//! - [`profile`]: TOML rename profiles
//! - [`conversion_summary`]: post-conversion counts
//! - [`inspect`]: outline view of a parsed configuration
//!
//! # Examples
//!
//! ```
//! use netcfg_convert::dialect::Dialect;
//!
//! let cfg = Dialect::Cisco.parse("interface Vlan10\n ip address 10.0.10.1 255.255.255.0\n")?;
//! let text = Dialect::Huawei.render(&cfg)?;
//! assert!(text.contains("interface Vlanif10"));
//! # Ok::<(), netcfg_core::CodecError>(())
//! ```

pub mod conversion_summary;
pub mod dialect;
pub mod generate;
pub mod inspect;
pub mod parse;
pub mod profile;
pub mod rename;
