//! IPv4 route table on top of the radix tree
//!
//! Each CIDR prefix is stored as the string of its leading network bits
//! (`"00001010"` for `10.0.0.0/8`), so longest-prefix routing is just a
//! longest match against the 32-bit string of the destination address.

use crate::error::{Error, Result};
use crate::trie::RadixTree;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// An IPv4 network prefix such as `10.0.0.0/8`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Prefix {
    addr: Ipv4Addr,
    len: u8,
}

impl Prefix {
    /// Create a prefix, clearing any host bits
    pub fn new(addr: Ipv4Addr, len: u8) -> Result<Self> {
        if len > 32 {
            return Err(Error::InvalidPrefix(format!("{addr}/{len}")));
        }
        let mask = u32::MAX.checked_shl(32 - u32::from(len)).unwrap_or(0);
        Ok(Prefix {
            addr: Ipv4Addr::from(u32::from(addr) & mask),
            len,
        })
    }

    /// Network address
    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }

    /// Prefix length in bits
    pub fn prefix_len(&self) -> u8 {
        self.len
    }

    /// Check if this is the default route (`0.0.0.0/0`)
    pub fn is_default(&self) -> bool {
        self.len == 0
    }

    /// The network bits as a string of `'0'` and `'1'`
    pub fn bits(&self) -> String {
        let mut bits = address_bits(self.addr);
        bits.truncate(usize::from(self.len));
        bits
    }

    /// Rebuild a prefix from its bit string
    fn from_bits(bits: &str) -> Option<Self> {
        if bits.len() > 32 {
            return None;
        }
        let mut value = 0u32;
        for (i, bit) in bits.chars().enumerate() {
            match bit {
                '0' => {}
                '1' => value |= 1 << (31 - i),
                _ => return None,
            }
        }
        // Length already validated
        let len = u8::try_from(bits.len()).ok()?;
        Some(Prefix {
            addr: Ipv4Addr::from(value),
            len,
        })
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.len)
    }
}

impl FromStr for Prefix {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (addr, len) = match s.split_once('/') {
            Some((addr, len)) => {
                let len = len
                    .parse::<u8>()
                    .map_err(|_| Error::InvalidPrefix(s.to_string()))?;
                (addr, len)
            }
            None => (s, 32),
        };
        Prefix::new(addr.parse()?, len)
    }
}

/// All 32 bits of an address as a string of `'0'` and `'1'`
pub fn address_bits(addr: Ipv4Addr) -> String {
    format!("{:032b}", u32::from(addr))
}

/// Longest-prefix-match routing table
#[derive(Clone, Debug)]
pub struct RouteTable<V> {
    routes: RadixTree<V>,
}

impl<V> RouteTable<V> {
    /// Create an empty table
    pub fn new() -> Self {
        RouteTable {
            routes: RadixTree::new(),
        }
    }

    /// Number of routes
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if the table has no routes
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Add or replace a route. Returns true if the prefix was new.
    pub fn insert(&mut self, prefix: Prefix, value: V) -> bool {
        self.routes.insert(&prefix.bits(), value)
    }

    /// Remove a route
    pub fn remove(&mut self, prefix: &Prefix) -> Option<V> {
        self.routes.remove(&prefix.bits())
    }

    /// Get the route for an exact prefix
    pub fn get(&self, prefix: &Prefix) -> Option<&V> {
        self.routes.get(&prefix.bits())
    }

    /// Find the most specific route covering `addr`
    pub fn lookup(&self, addr: Ipv4Addr) -> Option<(Prefix, &V)> {
        let (bits, value) = self.routes.longest_match(&address_bits(addr))?;
        Prefix::from_bits(bits).map(|prefix| (prefix, value))
    }

    /// All routes, ordered by their bit strings
    pub fn routes(&self) -> Vec<(Prefix, &V)> {
        self.routes
            .iter()
            .filter_map(|(bits, value)| Prefix::from_bits(bits).map(|p| (p, value)))
            .collect()
    }
}

impl<V> Default for RouteTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<(Prefix, V)> for RouteTable<V> {
    fn from_iter<I: IntoIterator<Item = (Prefix, V)>>(iter: I) -> Self {
        let mut table = RouteTable::new();
        for (prefix, value) in iter {
            table.insert(prefix, value);
        }
        table
    }
}
