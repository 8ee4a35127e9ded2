mod common;

use common::{lorem_package, PackageBuilder, Resource, LOREM, LOREM_KEY};
use pretty_assertions::assert_eq;
use s4_binary::WideUInt;
use s4_package::{
    error::{Error, FormatError, IntegrityError},
    wrapper::OpaqueWrapper,
    CompressionMethod, Package, ResourceKey, WrapperRegistry,
};
use std::borrow::Cow;
use tracing_test::traced_test;

#[traced_test]
#[test]
fn read_two_entry_package() -> Result<(), Error> {
    let data = lorem_package();
    let package = Package::new(&data)?;

    assert_eq!(package.header().major, 2);
    assert_eq!(package.header().minor, 1);
    assert_eq!(package.header().entry_count, 2);
    assert_eq!(package.len(), 2);

    let first = package.by_index(0)?;
    assert_eq!(first.key.resource_type, 0x0333406C);
    assert_eq!(first.key.instance, WideUInt::new(0, 31415926));
    assert!(logs_contain("read package index"));
    Ok(())
}

#[test]
fn lookup_returns_own_entry() -> Result<(), Error> {
    let data = lorem_package();
    let package = Package::new(&data)?;

    for entry in package.entries() {
        assert_eq!(package.get_resource_entry(&entry.key), Some(entry));
    }
    Ok(())
}

#[test]
fn raw_stream_borrows_source() -> Result<(), Error> {
    let data = lorem_package();
    let package = Package::new(&data)?;

    let stream = package.get_resource_stream(&LOREM_KEY)?;
    assert!(matches!(stream, Cow::Borrowed(_)));
    assert_eq!(&stream[..5], b"Lorem");
    assert_eq!(stream.as_ref(), LOREM);
    Ok(())
}

#[test]
fn zlib_stream_matches_mem_size() -> Result<(), Error> {
    let data = lorem_package();
    let package = Package::new(&data)?;

    let entry = package.by_index(1)?;
    assert_eq!(entry.compression, CompressionMethod::Zlib);
    assert!(entry.file_size < entry.mem_size);

    let stream = package.entry_stream(entry)?;
    assert_eq!(stream.len(), entry.mem_size as usize);
    assert_eq!(stream.as_ref(), LOREM.repeat(8).as_slice());
    Ok(())
}

#[test]
fn compacted_index() -> Result<(), Error> {
    let group = 0x8000_0000;
    let data = PackageBuilder::new()
        .flags(0b0011)
        .push(Resource::raw(
            ResourceKey::new(0x3453CF95, group, WideUInt::new(0, 1)),
            b"first",
        ))
        .push(Resource::zlib(
            ResourceKey::new(0x3453CF95, group, WideUInt::new(7, 2)),
            b"second second second",
        ))
        .build();
    let package = Package::new(&data)?;

    assert_eq!(package.index_flags(), 0b0011);
    assert_eq!(package.len(), 2);
    assert_eq!(
        package.by_index(1)?.key,
        ResourceKey::new(0x3453CF95, group, WideUInt::new(7, 2))
    );
    assert_eq!(
        package
            .get_resource_stream(&ResourceKey::new(0x3453CF95, group, WideUInt::new(0, 1)))?
            .as_ref(),
        b"first"
    );
    assert_eq!(
        package.entry_stream(package.by_index(1)?)?.as_ref(),
        b"second second second"
    );
    Ok(())
}

#[test]
fn short_header_fails_before_index() {
    let data = lorem_package();
    let err = Package::new(&data[..95]).unwrap_err();
    assert!(matches!(
        err,
        Error::Format(FormatError::InvalidHeaderSize {
            expected: 96,
            actual: 95
        })
    ));
}

#[test]
fn bad_magic() {
    let mut data = lorem_package();
    data[0] = b'X';
    assert!(matches!(
        Package::new(&data),
        Err(Error::Format(FormatError::InvalidMagic { .. }))
    ));
}

#[test]
fn truncated_index() {
    let mut data = lorem_package();
    data.truncate(data.len() - 2);
    assert!(matches!(Package::new(&data), Err(Error::BinaryError(_))));
}

#[test]
fn corrupted_zlib_header() -> Result<(), Error> {
    let mut data = lorem_package();
    let offset = Package::new(&data)?.by_index(1)?.chunk_offset as usize;
    data[offset + 1] = 0xDA;

    let package = Package::new(&data)?;
    let err = package.entry_stream(package.by_index(1)?).unwrap_err();
    assert!(matches!(
        err,
        Error::Integrity(IntegrityError::InvalidZlibHeader { ref found, .. }) if found == &[0x78, 0xDA]
    ));
    Ok(())
}

#[test]
fn mem_size_mismatch() -> Result<(), Error> {
    let data = PackageBuilder::new()
        .push(Resource {
            mem_size: Some(4),
            ..Resource::zlib(LOREM_KEY, b"Lorem")
        })
        .build();
    let package = Package::new(&data)?;

    assert!(matches!(
        package.get_resource_stream(&LOREM_KEY),
        Err(Error::Integrity(IntegrityError::SizeMismatch {
            expected: 4,
            actual: 5,
            ..
        }))
    ));
    Ok(())
}

#[test]
fn unknown_codec_is_returned_raw() -> Result<(), Error> {
    let data = PackageBuilder::new()
        .push(Resource {
            compression: CompressionMethod::Other(0xFFFF),
            ..Resource::raw(LOREM_KEY, b"\x01\x02\x03")
        })
        .build();
    let package = Package::new(&data)?;

    assert_eq!(
        package.get_resource_stream(&LOREM_KEY)?.as_ref(),
        &[0x01, 0x02, 0x03]
    );
    Ok(())
}

#[test]
fn chunk_outside_file() -> Result<(), Error> {
    let mut data = lorem_package();
    let index_position = Package::new(&data)?.header().index_position as usize;
    // chunk offset of the first entry: flags word, then type, group, instance hi/lo
    let offset_word = index_position + 4 + 4 * 4;
    data[offset_word..offset_word + 4].copy_from_slice(&0x00FF_FFFFu32.to_le_bytes());

    let package = Package::new(&data)?;
    assert!(matches!(
        package.get_resource_stream(&LOREM_KEY),
        Err(Error::Integrity(IntegrityError::ChunkOutOfBounds {
            offset: 0x00FF_FFFF,
            ..
        }))
    ));
    Ok(())
}

#[test]
fn missing_resource() -> Result<(), Error> {
    let data = lorem_package();
    let package = Package::new(&data)?;
    let key = ResourceKey::new(0x0333406C, 0, WideUInt::new(1, 31415926));

    assert_eq!(package.get_resource_entry(&key), None);
    assert!(matches!(
        package.get_resource_stream(&key),
        Err(Error::ResourceNotFound(k)) if k == key
    ));
    assert!(matches!(package.by_index(2), Err(Error::IndexOutOfRange(2))));
    Ok(())
}

#[test]
fn resource_without_decoder() -> Result<(), Error> {
    let data = lorem_package();
    let package = Package::new(&data)?;

    let wrapper = package.get_resource(&LOREM_KEY, &WrapperRegistry::new())?;
    let opaque = wrapper.downcast_ref::<OpaqueWrapper>().unwrap();
    assert_eq!(opaque.clone().into_inner(), LOREM);
    Ok(())
}

#[test]
fn total_decompressed_size() -> Result<(), Error> {
    let data = lorem_package();
    let package = Package::new(&data)?;
    assert_eq!(
        package.decompressed_size(),
        Some((LOREM.len() * 9) as u64)
    );
    Ok(())
}

#[test]
fn empty_package() -> Result<(), Error> {
    let data = PackageBuilder::new().build();
    let package = Package::new(&data)?;
    assert!(package.is_empty());
    assert_eq!(package.decompressed_size(), Some(0));
    Ok(())
}
