//! Typed views over resource bytes, chosen by a four byte signature.
//!
//! A [`WrapperRegistry`] maps a [`Signature`] to a constructor. Decoders register themselves by
//! implementing [`ResourceDecoder`]; anything without a registered decoder comes back as an
//! [`OpaqueWrapper`] holding the raw bytes.

use std::{any::Any, fmt};

use indexmap::IndexMap;
use tracing::{debug, instrument, trace};

use crate::error::Result;

/// Four byte tag used to pick a decoder
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Signature(pub [u8; 4]);

impl Signature {
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// The first four bytes of `data`, if there are that many
    pub fn from_leading(data: &[u8]) -> Option<Self> {
        let bytes = data.get(..4)?;
        let mut signature = [0; 4];
        signature.copy_from_slice(bytes);
        Some(Self(signature))
    }

    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl From<[u8; 4]> for Signature {
    fn from(value: [u8; 4]) -> Self {
        Self(value)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.escape_ascii())
    }
}

/// A decoded resource
pub trait ResourceWrapper: fmt::Debug + Any {
    /// Bytes the wrapper was built from
    fn raw(&self) -> &[u8];

    /// Serialize the wrapper back into resource bytes
    fn reserialize(&self) -> Result<Vec<u8>> {
        Ok(self.raw().to_vec())
    }

    fn as_any(&self) -> &dyn Any;
}

impl dyn ResourceWrapper {
    /// Whether the wrapper is a `T`
    pub fn is<T: ResourceWrapper>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Borrow the wrapper as a concrete `T`
    pub fn downcast_ref<T: ResourceWrapper>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// A wrapper that can be registered under a fixed signature
pub trait ResourceDecoder: ResourceWrapper + Sized {
    const SIGNATURE: Signature;

    /// Decode the full resource bytes, signature included
    fn parse(data: Vec<u8>) -> Result<Self>;
}

/// Resource bytes with no registered decoder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpaqueWrapper {
    data: Vec<u8>,
}

impl OpaqueWrapper {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl ResourceWrapper for OpaqueWrapper {
    fn raw(&self) -> &[u8] {
        &self.data
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Builds a wrapper from resource bytes
pub type WrapperConstructor = fn(Vec<u8>) -> Result<Box<dyn ResourceWrapper>>;

fn construct<T: ResourceDecoder>(data: Vec<u8>) -> Result<Box<dyn ResourceWrapper>> {
    Ok(Box::new(T::parse(data)?))
}

/// Signature to constructor table
///
/// ```
/// use s4_package::wrapper::{OpaqueWrapper, WrapperRegistry};
///
/// let registry = WrapperRegistry::new();
/// let wrapper = registry.create_from_bytes(b"RIFFdata".to_vec()).unwrap();
/// assert!(wrapper.is::<OpaqueWrapper>());
/// ```
#[derive(Debug, Clone, Default)]
pub struct WrapperRegistry {
    constructors: IndexMap<Signature, WrapperConstructor>,
}

impl WrapperRegistry {
    /// An empty registry; every resource decodes to [`OpaqueWrapper`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` under [`ResourceDecoder::SIGNATURE`]
    pub fn register<T: ResourceDecoder>(&mut self) -> &mut Self {
        self.register_with(T::SIGNATURE, construct::<T>)
    }

    /// Register a constructor, replacing any previous one for the same signature
    pub fn register_with(
        &mut self,
        signature: Signature,
        constructor: WrapperConstructor,
    ) -> &mut Self {
        if self.constructors.insert(signature, constructor).is_some() {
            debug!(%signature, "replaced wrapper constructor");
        }
        self
    }

    pub fn contains(&self, signature: &Signature) -> bool {
        self.constructors.contains_key(signature)
    }

    /// Registered signatures in registration order
    pub fn signatures(&self) -> impl Iterator<Item = &Signature> {
        self.constructors.keys()
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Build a wrapper for `data` using the constructor registered for `signature`
    #[instrument(skip(self, data), fields(size = data.len(), %signature), err)]
    pub fn create(&self, signature: Signature, data: Vec<u8>) -> Result<Box<dyn ResourceWrapper>> {
        match self.constructors.get(&signature) {
            Some(constructor) => constructor(data),
            None => {
                trace!("no decoder registered, keeping raw bytes");
                Ok(Box::new(OpaqueWrapper::new(data)))
            }
        }
    }

    /// Build a wrapper keyed on the first four bytes of `data`
    pub fn create_from_bytes(&self, data: Vec<u8>) -> Result<Box<dyn ResourceWrapper>> {
        match Signature::from_leading(&data) {
            Some(signature) => self.create(signature, data),
            None => Ok(Box::new(OpaqueWrapper::new(data))),
        }
    }
}

#[cfg(test)]
mod test {
    use std::any::Any;

    use pretty_assertions::assert_eq;

    use super::{
        OpaqueWrapper, ResourceDecoder, ResourceWrapper, Signature, WrapperRegistry,
    };
    use crate::error::{Error, Result};

    #[derive(Debug)]
    struct Tagged {
        data: Vec<u8>,
        value: u8,
    }

    impl ResourceWrapper for Tagged {
        fn raw(&self) -> &[u8] {
            &self.data
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    impl ResourceDecoder for Tagged {
        const SIGNATURE: Signature = Signature::new(*b"TAGD");

        fn parse(data: Vec<u8>) -> Result<Self> {
            let value = *data.get(4).ok_or_else(|| {
                Error::decode(
                    Self::SIGNATURE,
                    std::io::Error::from(std::io::ErrorKind::UnexpectedEof),
                )
            })?;
            Ok(Self { data, value })
        }
    }

    #[test]
    fn signature_display() {
        assert_eq!(Signature::new(*b"DXT5").to_string(), "DXT5");
        assert_eq!(Signature::new([0x44, 0, 0x0A, 0xFF]).to_string(), "D\\x00\\n\\xff");
    }

    #[test]
    fn unregistered_signature_is_opaque() -> Result<()> {
        let registry = WrapperRegistry::new();
        let wrapper = registry.create(Signature::new(*b"TAGD"), b"TAGD\x07".to_vec())?;
        assert!(wrapper.is::<OpaqueWrapper>());
        assert_eq!(wrapper.raw(), b"TAGD\x07");
        Ok(())
    }

    #[test]
    fn registered_signature_is_typed() -> Result<()> {
        let mut registry = WrapperRegistry::new();
        registry.register::<Tagged>();
        assert!(registry.contains(&Signature::new(*b"TAGD")));

        let wrapper = registry.create_from_bytes(b"TAGD\x07".to_vec())?;
        let tagged = wrapper.downcast_ref::<Tagged>().unwrap();
        assert_eq!(tagged.value, 7);
        assert_eq!(wrapper.reserialize()?, b"TAGD\x07");
        Ok(())
    }

    #[test]
    fn short_input_is_opaque() -> Result<()> {
        let mut registry = WrapperRegistry::new();
        registry.register::<Tagged>();
        let wrapper = registry.create_from_bytes(b"TAG".to_vec())?;
        assert!(wrapper.is::<OpaqueWrapper>());
        Ok(())
    }

    #[test]
    fn decoder_failure_carries_signature() {
        let mut registry = WrapperRegistry::new();
        registry.register::<Tagged>();
        let err = registry.create_from_bytes(b"TAGD".to_vec()).unwrap_err();
        assert!(matches!(err, Error::Decode { signature, .. } if signature == Tagged::SIGNATURE));
        assert_eq!(err.to_string(), "unable to decode TAGD resource");
    }
}
