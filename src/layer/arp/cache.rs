// Heads up! Before working on this file you should read, at least, the parts
// of RFC 826 that discuss the translation table and its merge flag.
use std::sync::Mutex;

use crate::layer::{Error, Result};
use crate::wire::arp::Hardware;
use crate::wire::{ethernet, ip};

/// A learned translation from a protocol address to a hardware address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    hardware: Hardware,
    state: State,
    protocol_addr: ip::v4::Address,
    hardware_addr: ethernet::Address,
}

/// The resolution state of a cache entry.
///
/// Entries learned from inbound frames are created `Resolved`; `Pending` is
/// reserved for a requester that wants to note an in-flight query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// A query for this address is outstanding.
    Pending,
    /// The hardware address is known.
    Resolved,
}

/// The translation cache, shared between receive and send paths.
///
/// An explicitly constructed service object: create one per stack instance
/// (or per test) rather than relying on process-global state. A single lock
/// guards the entries; every operation acquires and releases it
/// independently, so a merge followed by an insert is *not* atomic as a pair.
/// Two threads racing on the same address can therefore both miss the merge
/// and both insert. That duplicate is harmless for lookup, which returns the
/// first match, and is accepted rather than closed; see `insert`.
///
/// Entries are never evicted or expired. They live until [`clear`], so the
/// cache carries an explicit capacity bound instead of an eviction policy.
///
/// [`clear`]: #method.clear
#[derive(Debug)]
pub struct Cache {
    entries: Mutex<Vec<Entry>>,
    capacity: usize,
}

impl Entry {
    /// The hardware type this entry was learned for.
    pub fn hardware(&self) -> Hardware {
        self.hardware
    }

    /// The resolution state.
    pub fn state(&self) -> State {
        self.state
    }

    /// The protocol address this entry translates.
    pub fn protocol_addr(&self) -> ip::v4::Address {
        self.protocol_addr
    }

    /// The hardware address this entry translates to.
    pub fn hardware_addr(&self) -> ethernet::Address {
        self.hardware_addr
    }
}

impl Cache {
    /// The capacity used by [`new`].
    ///
    /// [`new`]: #method.new
    pub const DEFAULT_CAPACITY: usize = 1024;

    /// Create an empty cache with the default capacity bound.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create an empty cache holding at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Cache {
            entries: Mutex::new(Vec::new()),
            capacity,
        }
    }

    /// Look up the hardware address stored for `addr`.
    ///
    /// Scans in discovery order and returns a copy of the first resolved
    /// match, or `None` for an address never observed.
    pub fn lookup(&self, addr: ip::v4::Address) -> Option<ethernet::Address> {
        let entries = self.lock();
        entries
            .iter()
            .find(|entry| entry.state == State::Resolved && entry.protocol_addr == addr)
            .map(|entry| entry.hardware_addr)
    }

    /// Update the entry for `(hardware, addr)` in place, if one exists.
    ///
    /// Returns the RFC 826 merge flag: `true` when an entry was found and its
    /// hardware address overwritten, `false` when the address is new to the
    /// cache. Does not allocate.
    pub fn merge(
        &self,
        hardware: Hardware,
        addr: ip::v4::Address,
        hardware_addr: ethernet::Address,
    ) -> bool {
        let mut entries = self.lock();
        match entries
            .iter_mut()
            .find(|entry| entry.hardware == hardware && entry.protocol_addr == addr)
        {
            Some(entry) => {
                entry.hardware_addr = hardware_addr;
                true
            }
            None => false,
        }
    }

    /// Append a resolved entry at the tail.
    ///
    /// No duplicate check is made against existing entries: the caller is
    /// expected to have tried [`merge`] first, and a concurrent caller that
    /// also missed the merge will produce a duplicate entry. Fails only when
    /// the capacity bound is reached.
    ///
    /// [`merge`]: #method.merge
    pub fn insert(
        &self,
        hardware: Hardware,
        addr: ip::v4::Address,
        hardware_addr: ethernet::Address,
    ) -> Result<()> {
        let mut entries = self.lock();
        if entries.len() >= self.capacity {
            return Err(Error::Exhausted);
        }
        entries.push(Entry {
            hardware,
            state: State::Resolved,
            protocol_addr: addr,
            hardware_addr,
        });
        Ok(())
    }

    /// Drop every entry. A teardown operation.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// The number of entries currently stored, duplicates included.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Entry>> {
        // Every mutation completes before unlocking, so the entries behind a
        // poisoned lock are still consistent.
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const HADDR_A: ethernet::Address = ethernet::Address([0, 0, 0, 0, 0, 1]);
    const HADDR_B: ethernet::Address = ethernet::Address([0, 0, 0, 0, 0, 2]);
    const PADDR_1: ip::v4::Address = ip::v4::Address::new(10, 0, 0, 1);
    const PADDR_2: ip::v4::Address = ip::v4::Address::new(10, 0, 0, 2);

    #[test]
    fn miss_then_fill() {
        let cache = Cache::new();
        assert_eq!(cache.lookup(PADDR_1), None);

        assert!(!cache.merge(Hardware::Ethernet, PADDR_1, HADDR_A));
        cache.insert(Hardware::Ethernet, PADDR_1, HADDR_A).unwrap();

        assert_eq!(cache.lookup(PADDR_1), Some(HADDR_A));
        assert_eq!(cache.lookup(PADDR_2), None);
    }

    #[test]
    fn merge_updates_in_place() {
        let cache = Cache::new();
        cache.insert(Hardware::Ethernet, PADDR_1, HADDR_A).unwrap();

        assert!(cache.merge(Hardware::Ethernet, PADDR_1, HADDR_B));
        assert_eq!(cache.lookup(PADDR_1), Some(HADDR_B));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn merge_distinguishes_hardware() {
        let cache = Cache::new();
        cache.insert(Hardware::Ethernet, PADDR_1, HADDR_A).unwrap();

        assert!(!cache.merge(Hardware::Unknown(6), PADDR_1, HADDR_B));
    }

    #[test]
    fn insert_does_not_deduplicate() {
        // Two receive paths can race past the merge for the same address and
        // both insert; the first entry wins lookups.
        let cache = Cache::new();
        cache.insert(Hardware::Ethernet, PADDR_1, HADDR_A).unwrap();
        cache.insert(Hardware::Ethernet, PADDR_1, HADDR_B).unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.lookup(PADDR_1), Some(HADDR_A));
    }

    #[test]
    fn capacity_bound() {
        let cache = Cache::with_capacity(1);
        cache.insert(Hardware::Ethernet, PADDR_1, HADDR_A).unwrap();
        assert_eq!(
            cache.insert(Hardware::Ethernet, PADDR_2, HADDR_B),
            Err(Error::Exhausted)
        );

        // The bound limits entries, not addresses: merge still works.
        assert!(cache.merge(Hardware::Ethernet, PADDR_1, HADDR_B));
    }

    #[test]
    fn clear_drains() {
        let cache = Cache::new();
        cache.insert(Hardware::Ethernet, PADDR_1, HADDR_A).unwrap();
        cache.insert(Hardware::Ethernet, PADDR_2, HADDR_B).unwrap();

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.lookup(PADDR_1), None);
    }
}
