//! Line-oriented parsers for the Cisco and Huawei dialects.
//!
//! Both parsers work the same way: every trimmed, non-comment line is
//! classified into a dialect statement by a pure function (first matching
//! rule wins), then applied to a [`ParseState`] holding the configuration
//! built so far and the single block currently open. Opening a block flushes
//! the previous one, `exit`/`quit` flushes the innermost one, and the end of
//! input flushes whatever is still open.
//!
//! Parsing never fails. Lines outside the modeled subset are reported as
//! [`LineOutcome::Unrecognized`] and skipped; garbled numbers fall back to
//! zero/unset; ACL rules that cannot be decomposed are kept verbatim.

pub mod cisco;
pub mod huawei;
mod tokens;

use netcfg_core::{Config, Interface, Vlan};

pub use cisco::{parse_cisco, CiscoParser};
pub use huawei::{parse_huawei, HuaweiParser};

/// What happened to one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// The line changed parser state or the configuration.
    Matched,
    /// Blank, comment, outside the modeled subset, or a field line with no
    /// block to apply to.
    Unrecognized,
}

/// The block a parser is currently inside.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum OpenBlock {
    #[default]
    None,
    Vlan(Vlan),
    Interface(Interface),
    Ospf {
        process_id: u32,
        area: Option<String>,
    },
    Acl(u32),
    /// A block of a kind that is not modeled (`router bgp`, `user-interface`...).
    /// Its child lines must not leak into the previous block.
    Foreign,
}

#[derive(Debug)]
pub(crate) struct ParseState {
    pub cfg: Config,
    pub open: OpenBlock,
}

impl ParseState {
    pub fn new(device_type: &str) -> Self {
        Self {
            cfg: Config::new(device_type),
            open: OpenBlock::None,
        }
    }

    /// Flush the current block and make `block` the open one.
    pub fn open(&mut self, block: OpenBlock) {
        self.flush();
        self.open = block;
    }

    /// Move the open entity into the configuration and leave no block open.
    pub fn flush(&mut self) {
        match std::mem::take(&mut self.open) {
            OpenBlock::Vlan(vlan) => self.cfg.upsert_vlan(vlan),
            OpenBlock::Interface(iface) => self.cfg.interfaces.push(iface),
            OpenBlock::None | OpenBlock::Ospf { .. } | OpenBlock::Acl(_) | OpenBlock::Foreign => {}
        }
    }

    /// Close the innermost open block. An OSPF area closes before its process.
    pub fn close_innermost(&mut self) -> LineOutcome {
        if let OpenBlock::Ospf {
            area: area @ Some(_),
            ..
        } = &mut self.open
        {
            *area = None;
            return LineOutcome::Matched;
        }
        if self.open == OpenBlock::None {
            return LineOutcome::Unrecognized;
        }
        self.flush();
        LineOutcome::Matched
    }

    pub fn vlan_mut(&mut self) -> Option<&mut Vlan> {
        match &mut self.open {
            OpenBlock::Vlan(vlan) => Some(vlan),
            _ => None,
        }
    }

    pub fn interface_mut(&mut self) -> Option<&mut Interface> {
        match &mut self.open {
            OpenBlock::Interface(iface) => Some(iface),
            _ => None,
        }
    }

    pub fn ospf_process(&self) -> Option<u32> {
        match &self.open {
            OpenBlock::Ospf { process_id, .. } => Some(*process_id),
            _ => None,
        }
    }

    pub fn acl_id(&self) -> Option<u32> {
        match &self.open {
            OpenBlock::Acl(id) => Some(*id),
            _ => None,
        }
    }

    pub fn finish(mut self) -> Config {
        self.flush();
        self.cfg
    }
}

/// Apply a field mutation when the block it belongs to is open.
pub(crate) fn apply_if<T>(target: Option<&mut T>, f: impl FnOnce(&mut T)) -> LineOutcome {
    match target {
        Some(target) => {
            f(target);
            LineOutcome::Matched
        }
        None => LineOutcome::Unrecognized,
    }
}
