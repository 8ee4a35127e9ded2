//! Plugs [`RleTexture`] into the package resource registry.

use std::any::Any;

use s4_package::{
    wrapper::{ResourceDecoder, ResourceWrapper, Signature},
    WrapperRegistry,
};

use crate::RleTexture;

impl ResourceWrapper for RleTexture {
    fn raw(&self) -> &[u8] {
        self.data()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ResourceDecoder for RleTexture {
    const SIGNATURE: Signature = Signature::new(*b"DXT5");

    fn parse(data: Vec<u8>) -> s4_package::error::Result<Self> {
        RleTexture::parse(data).map_err(|err| s4_package::error::Error::decode(Self::SIGNATURE, err))
    }
}

/// Add the texture decoder to `registry`
pub fn register(registry: &mut WrapperRegistry) -> &mut WrapperRegistry {
    registry.register::<RleTexture>()
}

/// A registry that knows every decoder in this crate
pub fn registry() -> WrapperRegistry {
    let mut registry = WrapperRegistry::new();
    register(&mut registry);
    registry
}
