use pretty_assertions::assert_eq;
use s4_binary::{BinaryWriter, WideUInt};
use s4_package::{
    error::Error,
    types::HEADER_SIZE,
    wrapper::{OpaqueWrapper, ResourceWrapper},
    CompressionMethod, IndexEntry, Package, PackageHeader, ResourceKey,
};
use s4_rle::{dds::DDS_FILE_HEADER_SIZE, RleTexture};
use tracing_test::traced_test;

const TEXTURE_KEY: ResourceKey = ResourceKey::new(0x3453CF95, 0, WideUInt::new(0xA1B2C3D4, 0x1));
const TUNING_KEY: ResourceKey = ResourceKey::new(0x03B33DDF, 0, WideUInt::new(0, 0x2));

/// 8x4 texture with one opaque and one transparent block
fn rle2() -> Vec<u8> {
    let mut writer = BinaryWriter::new();
    writer.write_bytes(b"DXT5");
    writer.write_bytes(b"RLE2");
    writer.write_u16(8);
    writer.write_u16(4);
    writer.write_u16(1);
    writer.write_u16(0);
    for offset in [36, 40, 44, 48, 48] {
        writer.write_u32(offset);
    }
    // opaque block, then a transparent one
    writer.write_u16(0x0006);
    writer.write_u16(0x0004);
    writer.write_bytes(&[0x00, 0xF8, 0x00, 0x00]);
    writer.write_bytes(&[0x00, 0x00, 0x00, 0x00]);
    writer.into_bytes()
}

fn package(resources: &[(ResourceKey, Vec<u8>)]) -> Vec<u8> {
    let mut writer = BinaryWriter::new();
    writer.write_bytes(&[0; HEADER_SIZE]);

    let mut entries = Vec::new();
    for (key, data) in resources {
        entries.push(IndexEntry {
            key: *key,
            chunk_offset: writer.position() as u32,
            file_size: data.len() as u32,
            size_flag: true,
            mem_size: data.len() as u32,
            compression: CompressionMethod::None,
            committed: 1,
        });
        writer.write_bytes(data);
    }

    let index_position = writer.position();
    writer.write_u32(0);
    for entry in &entries {
        for word in entry.to_words() {
            writer.write_u32(word);
        }
    }
    let index_size = writer.position() - index_position;

    writer.seek(0).unwrap();
    PackageHeader {
        entry_count: entries.len() as i32,
        index_size: index_size as i32,
        index_position: index_position as i32,
        ..Default::default()
    }
    .write(&mut writer);
    writer.into_bytes()
}

#[traced_test]
#[test]
fn texture_through_registry() -> Result<(), Error> {
    let data = package(&[
        (TUNING_KEY, b"<?xml version=\"1.0\"?>".to_vec()),
        (TEXTURE_KEY, rle2()),
    ]);
    let package = Package::new(&data)?;
    let registry = s4_rle::registry();

    let tuning = package.get_resource(&TUNING_KEY, &registry)?;
    assert!(tuning.is::<OpaqueWrapper>());
    assert_eq!(tuning.reserialize()?, b"<?xml version=\"1.0\"?>");

    let wrapper = package.get_resource(&TEXTURE_KEY, &registry)?;
    let texture = wrapper.downcast_ref::<RleTexture>().unwrap();
    assert_eq!((texture.width(), texture.height()), (8, 4));
    assert_eq!(wrapper.raw(), rle2().as_slice());

    let dds = texture.to_dds().unwrap();
    assert_eq!(dds.len(), DDS_FILE_HEADER_SIZE + 2 * 16);

    let rgba = texture.to_rgba().unwrap();
    assert_eq!(&rgba[..4], &[255, 0, 0, 255]);
    assert_eq!(&rgba[16..20], &[255, 255, 255, 0]);
    assert!(logs_contain("read texture directory"));
    Ok(())
}

#[test]
fn corrupt_texture_reports_signature() -> Result<(), Error> {
    let mut texture = rle2();
    texture[14] = 0x01;
    let data = package(&[(TEXTURE_KEY, texture)]);
    let package = Package::new(&data)?;

    let err = package
        .get_resource(&TEXTURE_KEY, &s4_rle::registry())
        .unwrap_err();
    assert_eq!(err.to_string(), "unable to decode DXT5 resource");
    Ok(())
}
