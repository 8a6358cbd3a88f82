use std::fs;
use std::path::Path;

use uetex_dds::{mipmap_layout, DdsFile, DdsHeader, EncodeOptions, Error, Mipmap, TextureFormat};

/// Build a file whose payloads are filled with the level index.
fn synthetic(header: DdsHeader) -> DdsFile {
    let mipmaps = mipmap_layout(&header)
        .unwrap()
        .into_iter()
        .enumerate()
        .map(|(i, level)| Mipmap {
            data: vec![i as u8; level.byte_size],
            width: level.width,
            height: level.height,
        })
        .collect();
    DdsFile::new(header, mipmaps)
}

fn write_raw(dir: &Path, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn bc1_two_levels_survive_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bc1.dds");

    let header = DdsHeader::new(8, 8, 2, TextureFormat::Bc1);
    let top: Vec<u8> = (0..32).collect();
    let small: Vec<u8> = (100..108).collect();
    let file = DdsFile::new(
        header,
        vec![
            Mipmap {
                data: top.clone(),
                width: 8,
                height: 8,
            },
            Mipmap {
                data: small.clone(),
                width: 4,
                height: 4,
            },
        ],
    );
    file.save(&path).unwrap();
    assert_eq!(fs::metadata(&path).unwrap().len(), 128 + 32 + 8);

    let loaded = DdsFile::load(&path).unwrap();
    assert_eq!(loaded.header, header);
    assert_eq!(loaded.mipmaps.len(), 2);
    assert_eq!(loaded.mipmaps[0].data, top);
    assert_eq!(loaded.mipmaps[1].data, small);
}

#[test]
fn every_format_survives_save_and_load() {
    let dir = tempfile::tempdir().unwrap();

    for (i, format) in TextureFormat::ALL.into_iter().enumerate() {
        let path = dir.path().join(format!("format_{i}.dds"));
        let file = synthetic(DdsHeader::new(36, 20, 4, format));

        file.save(&path).unwrap();
        assert_eq!(DdsFile::load(&path).unwrap(), file, "{format}");
    }
}

#[test]
fn signature_does_not_affect_reading() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("signed.dds");

    let file = synthetic(DdsHeader::new(64, 64, 7, TextureFormat::Bc7));
    file.save_with(&path, &EncodeOptions::with_signature(*b"TEST"))
        .unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[68..72], b"TEST");
    assert_eq!(DdsFile::load(&path).unwrap(), file);
}

#[test]
fn truncated_and_padded_files_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = synthetic(DdsHeader::new(16, 16, 3, TextureFormat::Bc3))
        .to_bytes()
        .unwrap();

    let short = write_raw(dir.path(), "short.dds", &bytes[..bytes.len() - 1]);
    assert!(matches!(
        DdsFile::load(&short),
        Err(Error::UnexpectedEof { .. })
    ));

    let mut padded_bytes = bytes.clone();
    padded_bytes.push(0xFF);
    let padded = write_raw(dir.path(), "padded.dds", &padded_bytes);
    assert!(matches!(
        DdsFile::load(&padded),
        Err(Error::TrailingData(1))
    ));
}

#[test]
fn unsupported_dxgi_format_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut bytes = synthetic(DdsHeader::new(4, 4, 1, TextureFormat::FloatRgba))
        .to_bytes()
        .unwrap();
    bytes[128..132].copy_from_slice(&9999u32.to_le_bytes());

    let path = write_raw(dir.path(), "unknown.dds", &bytes);
    assert!(matches!(
        DdsFile::load(&path),
        Err(Error::UnsupportedFormat(_))
    ));
}

#[test]
fn non_power_of_two_chain_keeps_one_block_per_level() {
    let header = DdsHeader::new(5, 5, 4, TextureFormat::Bc4);
    let file = synthetic(header);
    let bytes = file.to_bytes().unwrap();

    // DX10 header, then 32 + 8 + 8 + 8 payload bytes
    assert_eq!(bytes.len(), 148 + 56);

    let parsed = DdsFile::parse(&bytes).unwrap();
    let dims: Vec<_> = parsed.mipmaps.iter().map(|m| (m.width, m.height)).collect();
    assert_eq!(dims, vec![(5, 5), (2, 2), (1, 1), (0, 0)]);
    assert_eq!(parsed.mipmaps[3].data, vec![3u8; 8]);
}
