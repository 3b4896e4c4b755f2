use crate::alloc::SharedRegister;

use super::error::LifecycleError;

type Result<T> = std::result::Result<T, LifecycleError>;

/// The creation/deletion half of a GPU-backed object.
///
/// Implementors only create and destroy the backing handle; [`Object`] owns
/// the state machine, identifier registration, and size accounting around
/// those two calls.
pub trait Resource {
    /// Backing handle (buffer, texture, ...).
    type Handle;
    /// Arguments needed to create the handle.
    type Args;

    /// Creates the backing handle. `None` means creation failed; the object
    /// still counts as initialized but is not valid.
    fn create(&mut self, identifier: &str, args: Self::Args) -> Option<Self::Handle>;

    fn destroy(&mut self, handle: Self::Handle);
}

enum State<H> {
    Uninitialized,
    Initialized {
        identifier: String,
        handle: Option<H>,
    },
}

/// Two-phase lifecycle wrapper: `Uninitialized -> Initialized -> Uninitialized`.
///
/// Every state-dependent operation of a wrapper is gated by
/// [`assert_initialized`](Self::assert_initialized). An object can be
/// initialized again after it was uninitialized.
pub struct Object<R: Resource> {
    resource: R,
    register: SharedRegister,
    name: String,
    state: State<R::Handle>,
}

impl<R: Resource> Object<R> {
    /// `name` is the requested allocation identifier; the register may
    /// suffix it to keep it unique.
    pub fn new(register: SharedRegister, name: impl Into<String>, resource: R) -> Self {
        Self {
            resource,
            register,
            name: name.into(),
            state: State::Uninitialized,
        }
    }

    /// Registers an identifier and creates the backing handle.
    ///
    /// Returns whether the object is valid (the handle could be created).
    pub fn initialize(&mut self, args: R::Args) -> Result<bool> {
        self.assert_uninitialized()?;

        let identifier = self
            .register
            .borrow_mut()
            .register_unique_identifier(&self.name);
        let handle = self.resource.create(&identifier, args);
        let valid = handle.is_some();
        if !valid {
            log::warn!("{identifier}: failed to create backing handle");
        }

        log::debug!("{identifier}: initialized (valid: {valid})");
        self.state = State::Initialized { identifier, handle };
        Ok(valid)
    }

    /// Drops the tracked size to zero, releases the identifier, and destroys
    /// the backing handle.
    ///
    /// If the register rejects the identifier, the object stays initialized
    /// and keeps its handle.
    pub fn uninitialize(&mut self) -> Result<()> {
        let identifier = self
            .identifier()
            .ok_or_else(|| LifecycleError::NotInitialized(self.name.clone()))?;

        {
            let mut register = self.register.borrow_mut();
            register.reallocate(identifier, 0)?;
            register.release_identifier(identifier)?;
        }

        if let Some(identifier) = self.discard() {
            log::debug!("{identifier}: uninitialized");
        }
        Ok(())
    }

    /// Leaves the initialized state without touching the register, destroying
    /// the handle if there is one.
    fn discard(&mut self) -> Option<String> {
        let State::Initialized { identifier, handle } =
            std::mem::replace(&mut self.state, State::Uninitialized)
        else {
            return None;
        };
        if let Some(handle) = handle {
            self.resource.destroy(handle);
        }
        Some(identifier)
    }

    #[inline]
    pub fn initialized(&self) -> bool {
        matches!(self.state, State::Initialized { .. })
    }

    /// Initialized and backed by a handle.
    #[inline]
    pub fn valid(&self) -> bool {
        matches!(self.state, State::Initialized { handle: Some(_), .. })
    }

    #[inline]
    pub fn assert_initialized(&self) -> Result<()> {
        match self.state {
            State::Initialized { .. } => Ok(()),
            State::Uninitialized => Err(LifecycleError::NotInitialized(self.name.clone())),
        }
    }

    #[inline]
    pub fn assert_uninitialized(&self) -> Result<()> {
        match &self.state {
            State::Uninitialized => Ok(()),
            State::Initialized { identifier, .. } => {
                Err(LifecycleError::AlreadyInitialized(identifier.clone()))
            }
        }
    }

    /// The register-assigned identifier, while initialized.
    pub fn identifier(&self) -> Option<&str> {
        match &self.state {
            State::Initialized { identifier, .. } => Some(identifier),
            State::Uninitialized => None,
        }
    }

    /// The requested (unsuffixed) identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> Result<Option<&R::Handle>> {
        match &self.state {
            State::Initialized { handle, .. } => Ok(handle.as_ref()),
            State::Uninitialized => Err(LifecycleError::NotInitialized(self.name.clone())),
        }
    }

    /// Swaps in a new backing handle, destroying the previous one.
    ///
    /// Used by wrappers that recreate their backing store on resize.
    pub fn replace_handle(&mut self, new: Option<R::Handle>) -> Result<()> {
        let State::Initialized { handle, .. } = &mut self.state else {
            return Err(LifecycleError::NotInitialized(self.name.clone()));
        };
        if let Some(old) = std::mem::replace(handle, new) {
            self.resource.destroy(old);
        }
        Ok(())
    }

    /// Sets the tracked size of the backing store.
    pub fn track(&self, bytes: u64) -> Result<()> {
        let identifier = self.identifier().ok_or_else(|| {
            LifecycleError::NotInitialized(self.name.clone())
        })?;
        self.register.borrow_mut().reallocate(identifier, bytes)?;
        Ok(())
    }

    /// Tracked size of the backing store.
    pub fn allocated(&self) -> Result<u64> {
        let identifier = self.identifier().ok_or_else(|| {
            LifecycleError::NotInitialized(self.name.clone())
        })?;
        Ok(self.register.borrow().allocated(Some(identifier))?)
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    pub fn resource_mut(&mut self) -> &mut R {
        &mut self.resource
    }

    pub fn register(&self) -> &SharedRegister {
        &self.register
    }
}

impl<R: Resource> Drop for Object<R> {
    fn drop(&mut self) {
        if let Some(identifier) = self.identifier() {
            log::warn!("{identifier}: dropped while initialized");
            if let Err(err) = self.uninitialize() {
                log::error!("{}: uninitialize on drop failed: {err}", self.name);
                self.discard();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::AllocationRegister;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Counts creations and destructions; creation fails when asked to.
    #[derive(Default)]
    struct Fake {
        next: u32,
        live: Rc<RefCell<Vec<u32>>>,
    }

    impl Resource for Fake {
        type Handle = u32;
        type Args = bool;

        fn create(&mut self, _identifier: &str, succeed: bool) -> Option<u32> {
            if !succeed {
                return None;
            }
            self.next += 1;
            self.live.borrow_mut().push(self.next);
            Some(self.next)
        }

        fn destroy(&mut self, handle: u32) {
            self.live.borrow_mut().retain(|&h| h != handle);
        }
    }

    fn object(register: &SharedRegister, name: &str) -> Object<Fake> {
        Object::new(Rc::clone(register), name, Fake::default())
    }

    #[test]
    fn initialize_registers_identifier_and_handle() {
        let reg = AllocationRegister::shared();
        let mut obj = object(&reg, "buffer");
        assert!(!obj.initialized());
        assert_eq!(obj.initialize(true), Ok(true));
        assert!(obj.initialized());
        assert!(obj.valid());
        assert_eq!(obj.identifier(), Some("buffer"));
        assert_eq!(obj.handle().unwrap(), Some(&1));
        assert!(reg.borrow().contains("buffer"));
    }

    #[test]
    fn double_initialize_fails() {
        let reg = AllocationRegister::shared();
        let mut obj = object(&reg, "buffer");
        obj.initialize(true).unwrap();
        assert_eq!(
            obj.initialize(true),
            Err(LifecycleError::AlreadyInitialized("buffer".into()))
        );
        assert_eq!(obj.handle().unwrap(), Some(&1));
    }

    #[test]
    fn uninitialize_without_initialize_fails() {
        let reg = AllocationRegister::shared();
        let mut obj = object(&reg, "buffer");
        assert_eq!(
            obj.uninitialize(),
            Err(LifecycleError::NotInitialized("buffer".into()))
        );
        assert!(obj.track(4).is_err());
        assert!(obj.handle().is_err());
    }

    #[test]
    fn failed_creation_is_initialized_but_invalid() {
        let reg = AllocationRegister::shared();
        let mut obj = object(&reg, "buffer");
        assert_eq!(obj.initialize(false), Ok(false));
        assert!(obj.initialized());
        assert!(!obj.valid());
        obj.uninitialize().unwrap();
    }

    #[test]
    fn uninitialize_resets_and_allows_reinitialize() {
        let reg = AllocationRegister::shared();
        let mut obj = object(&reg, "buffer");
        let live = Rc::clone(&obj.resource().live);

        obj.initialize(true).unwrap();
        obj.track(256).unwrap();
        assert_eq!(reg.borrow().total(), 256);

        obj.uninitialize().unwrap();
        assert!(!obj.initialized());
        assert!(!obj.valid());
        assert_eq!(obj.identifier(), None);
        assert_eq!(reg.borrow().total(), 0);
        assert!(!reg.borrow().contains("buffer"));
        assert!(live.borrow().is_empty());

        assert_eq!(obj.initialize(true), Ok(true));
        assert_eq!(obj.identifier(), Some("buffer"));
        assert_eq!(obj.allocated(), Ok(0));
    }

    #[test]
    fn uninitialize_with_released_identifier_keeps_state() {
        let reg = AllocationRegister::shared();
        let live;
        {
            let mut obj = object(&reg, "buf");
            live = Rc::clone(&obj.resource().live);
            obj.initialize(true).unwrap();
            reg.borrow_mut().release_identifier("buf").unwrap();

            assert!(matches!(
                obj.uninitialize(),
                Err(LifecycleError::Allocation(_))
            ));
            assert!(obj.initialized());
            assert_eq!(obj.identifier(), Some("buf"));
            assert_eq!(*live.borrow(), vec![1]);
        }
        // Drop still destroys the handle even though the register refuses.
        assert!(live.borrow().is_empty());
    }

    #[test]
    fn sibling_objects_get_distinct_identifiers() {
        let reg = AllocationRegister::shared();
        let mut a = object(&reg, "quad");
        let mut b = object(&reg, "quad");
        a.initialize(true).unwrap();
        b.initialize(true).unwrap();
        assert_eq!(a.identifier(), Some("quad"));
        assert_eq!(b.identifier(), Some("quad-2"));

        a.track(10).unwrap();
        b.track(20).unwrap();
        assert_eq!(reg.borrow().report(), "quad: 10B, quad-2: 20B");
    }

    #[test]
    fn replace_handle_destroys_previous() {
        let reg = AllocationRegister::shared();
        let mut obj = object(&reg, "tex");
        let live = Rc::clone(&obj.resource().live);
        obj.initialize(true).unwrap();

        let fresh = obj.resource_mut().create("tex", true);
        obj.replace_handle(fresh).unwrap();
        assert_eq!(*live.borrow(), vec![2]);
        assert_eq!(obj.handle().unwrap(), Some(&2));
    }

    #[test]
    fn drop_while_initialized_cleans_up() {
        let reg = AllocationRegister::shared();
        let live;
        {
            let mut obj = object(&reg, "scratch");
            live = Rc::clone(&obj.resource().live);
            obj.initialize(true).unwrap();
            obj.track(99).unwrap();
        }
        assert_eq!(reg.borrow().total(), 0);
        assert!(!reg.borrow().contains("scratch"));
        assert!(live.borrow().is_empty());
    }
}
