use core::fmt;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::bytes::pretty_bytes;
use super::error::AllocationError;
use super::observable::{Observable, SubscriptionId};

type Result<T> = std::result::Result<T, AllocationError>;

/// Register shared by every resource of one context.
pub type SharedRegister = Rc<RefCell<AllocationRegister>>;

/// Payload of a register change notification.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AllocationChange {
    pub total: u64,
    pub pretty: String,
}

/// Bookkeeping of GPU memory consumption per named resource.
///
/// Identifiers are handed out by the register itself
/// ([`register_unique_identifier`](Self::register_unique_identifier)) and must
/// exist before any allocation refers to them. The running total always equals
/// the sum of all entries.
#[derive(Debug, Default)]
pub struct AllocationRegister {
    bytes: HashMap<String, u64>,
    /// Registration order, for reports.
    order: Vec<String>,
    total: u64,
    changes: Observable<AllocationChange>,
}

impl AllocationRegister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedRegister {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Registers `requested`, or `"<requested>-N"` with the smallest free
    /// `N >= 2` if it is taken, and returns the registered name.
    pub fn register_unique_identifier(&mut self, requested: &str) -> String {
        let mut identifier = requested.to_string();
        let mut count = 2u64;
        while self.bytes.contains_key(&identifier) {
            identifier = format!("{requested}-{count}");
            count += 1;
        }

        self.bytes.insert(identifier.clone(), 0);
        self.order.push(identifier.clone());
        log::trace!("registered allocation identifier {identifier:?}");
        identifier
    }

    /// Removes an identifier. Bytes still tracked for it leave the total.
    pub fn release_identifier(&mut self, identifier: &str) -> Result<()> {
        let bytes = self
            .bytes
            .remove(identifier)
            .ok_or_else(|| unknown(identifier))?;
        self.order.retain(|id| id != identifier);

        log::trace!("released allocation identifier {identifier:?}");
        if bytes > 0 {
            self.total -= bytes;
            self.notify();
        }
        Ok(())
    }

    pub fn allocate(&mut self, identifier: &str, amount: u64) -> Result<()> {
        let entry = self.entry_mut(identifier)?;
        if amount == 0 {
            return Ok(());
        }

        let overflow = || AllocationError::Overflow {
            identifier: identifier.to_string(),
            amount,
        };
        let updated = entry.checked_add(amount).ok_or_else(overflow)?;
        let total = self.total.checked_add(amount).ok_or_else(overflow)?;

        *self.entry_mut(identifier)? = updated;
        self.total = total;
        log::trace!("{identifier}: +{amount} bytes");
        self.notify();
        Ok(())
    }

    pub fn deallocate(&mut self, identifier: &str, amount: u64) -> Result<()> {
        let entry = self.entry_mut(identifier)?;
        if amount > *entry {
            return Err(AllocationError::DeallocationExceedsTracked {
                identifier: identifier.to_string(),
                amount,
                tracked: *entry,
            });
        }
        if amount == 0 {
            return Ok(());
        }

        *entry -= amount;
        self.total -= amount;
        log::trace!("{identifier}: -{amount} bytes");
        self.notify();
        Ok(())
    }

    /// Replaces the tracked amount for `identifier` outright.
    ///
    /// The total changes by the difference in a single step, so observers see
    /// at most one notification.
    pub fn reallocate(&mut self, identifier: &str, amount: u64) -> Result<()> {
        let entry = self.entry_mut(identifier)?;
        let previous = *entry;
        if previous == amount {
            return Ok(());
        }

        let total = (self.total - previous).checked_add(amount).ok_or_else(|| {
            AllocationError::Overflow {
                identifier: identifier.to_string(),
                amount,
            }
        })?;

        *self.entry_mut(identifier)? = amount;
        self.total = total;
        log::trace!("{identifier}: {previous} -> {amount} bytes");
        self.notify();
        Ok(())
    }

    /// Bytes tracked for `identifier`, or the total when `None`.
    pub fn allocated(&self, identifier: Option<&str>) -> Result<u64> {
        match identifier {
            None => Ok(self.total),
            Some(id) => self.bytes.get(id).copied().ok_or_else(|| unknown(id)),
        }
    }

    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.bytes.contains_key(identifier)
    }

    /// Registered identifiers in registration order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Pretty-printed form of [`allocated`](Self::allocated).
    pub fn report_bytes(&self, identifier: Option<&str>) -> Result<String> {
        self.allocated(identifier).map(pretty_bytes)
    }

    /// `"<identifier>: <bytes>"` for every identifier, comma separated.
    pub fn report(&self) -> String {
        self.to_string()
    }

    /// Registers a change callback; it immediately receives the latest
    /// change, if any.
    ///
    /// Callbacks run synchronously inside the mutating call, while the
    /// [`SharedRegister`] is mutably borrowed. A callback must not borrow the
    /// shared register itself (`report()`, `total()`, ...): that panics with
    /// a `BorrowError`. Use the [`AllocationChange`] it is given instead.
    pub fn subscribe(&mut self, f: impl FnMut(&AllocationChange) + 'static) -> SubscriptionId {
        self.changes.subscribe(f)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.changes.unsubscribe(id)
    }

    fn entry_mut(&mut self, identifier: &str) -> Result<&mut u64> {
        self.bytes
            .get_mut(identifier)
            .ok_or_else(|| unknown(identifier))
    }

    fn notify(&mut self) {
        debug_assert_eq!(self.total, self.bytes.values().sum::<u64>());
        let change = AllocationChange {
            total: self.total,
            pretty: pretty_bytes(self.total),
        };
        self.changes.publish(change);
    }
}

impl fmt::Display for AllocationRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.order.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let bytes = self.bytes.get(id).copied().unwrap_or_default();
            write!(f, "{id}: {}", pretty_bytes(bytes))?;
        }
        Ok(())
    }
}

fn unknown(identifier: &str) -> AllocationError {
    AllocationError::UnknownIdentifier(identifier.to_string())
}
