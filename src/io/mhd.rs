// Copyright @yucwang 2026

use crate::math::constants::Float;
use crate::volumes::grid_volume::Volume;
use flate2::{Decompress, FlushDecompress, Status};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const INFLATE_CHUNK: usize = 1 << 16;

#[derive(Debug, Error)]
pub enum VolumeLoadError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("MHD: {0}")]
    Header(String),
    #[error("{0}")]
    Unsupported(String),
    #[error("could not read volume data: expected {expected} bytes, got {actual}")]
    ShortPayload { expected: usize, actual: usize },
    #[error("decompression failed: {0}")]
    Decompress(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementType {
    UChar,
    Short,
}

impl ElementType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "MET_UCHAR" => Some(ElementType::UChar),
            "MET_SHORT" => Some(ElementType::Short),
            _ => None,
        }
    }

    pub fn byte_width(self) -> usize {
        match self {
            ElementType::UChar => 1,
            ElementType::Short => 2,
        }
    }
}

/// Metadata read from an `.mhd` header.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MhdHeader {
    pub is_image: bool,
    pub binary: bool,
    pub compressed: bool,
    pub big_endian: bool,
    pub ndims: Option<i64>,
    pub dims: Option<(i64, i64, i64)>,
    pub element_type: Option<ElementType>,
    pub data_file: Option<String>,
}

impl MhdHeader {
    /// Parses `key = value` lines. Unknown keys are skipped, lines without
    /// `=` are reported and skipped, malformed numbers are errors.
    pub fn parse(text: &str) -> Result<Self, VolumeLoadError> {
        let mut header = MhdHeader::default();

        for (line_no, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let (key, value) = match line.split_once('=') {
                Some((k, v)) => (k.trim(), v.trim()),
                None => {
                    log::warn!("MHD: ignored garbage on line {}", line_no + 1);
                    continue;
                }
            };

            match key {
                "ObjectType" => header.is_image = value == "Image",
                "BinaryData" => header.binary = parse_bool(value),
                "CompressedData" => header.compressed = parse_bool(value),
                "BinaryDataByteOrderMSB" | "ElementByteOrderMSB" => header.big_endian = parse_bool(value),
                "NDims" => {
                    let n = parse_ints(value)
                        .filter(|v| v.len() == 1)
                        .ok_or_else(|| VolumeLoadError::Header("NDims should be a single integer".to_string()))?;
                    header.ndims = Some(n[0]);
                }
                "DimSize" => {
                    let d = parse_ints(value)
                        .filter(|v| v.len() == 3)
                        .ok_or_else(|| VolumeLoadError::Header("DimSize should be three integers".to_string()))?;
                    header.dims = Some((d[0], d[1], d[2]));
                }
                "ElementType" => {
                    let ty = ElementType::parse(value)
                        .ok_or_else(|| VolumeLoadError::Header(format!("ElementType '{}' unknown", value)))?;
                    header.element_type = Some(ty);
                }
                "ElementDataFile" => header.data_file = Some(value.to_string()),
                _ => log::debug!("MHD line {}: unused '{}' = '{}'", line_no + 1, key, value),
            }
        }

        Ok(header)
    }

    /// Checks the header describes something we can decode and returns the
    /// element type, the three dimensions and the payload file name.
    pub fn validate(&self) -> Result<(ElementType, (usize, usize, usize), &str), VolumeLoadError> {
        if !self.is_image {
            return Err(VolumeLoadError::Unsupported("Only support ObjectType = Image.".to_string()));
        }
        if !self.binary {
            return Err(VolumeLoadError::Unsupported("Only support binary data (BinaryData = True)".to_string()));
        }
        let element_type = self.element_type.ok_or_else(|| {
            VolumeLoadError::Unsupported("Element type of binary data is not recognized".to_string())
        })?;
        if self.ndims != Some(3) {
            return Err(VolumeLoadError::Unsupported("Only support 3D volumes".to_string()));
        }
        let (x, y, z) = match self.dims {
            Some((x, y, z)) if x > 0 && y > 0 && z > 0 => (x as usize, y as usize, z as usize),
            _ => {
                return Err(VolumeLoadError::Unsupported(
                    "Volume size is invalid (DimSize should be three positive integers)".to_string(),
                ))
            }
        };
        let data_file = self
            .data_file
            .as_deref()
            .filter(|f| !f.is_empty())
            .ok_or_else(|| VolumeLoadError::Unsupported("No ElementDataFile given".to_string()))?;
        Ok((element_type, (x, y, z), data_file))
    }
}

/// Loads an `.mhd` volume. Failures are logged and produce an empty volume,
/// so callers check `total_element_count()`.
pub fn load_mhd_volume<P: AsRef<Path>>(path: P) -> Volume {
    let path = path.as_ref();
    match read_mhd_volume(path) {
        Ok(volume) => volume,
        Err(e) => {
            log::error!("Error while loading MHD file \"{}\": {}", path.display(), e);
            Volume::empty()
        }
    }
}

pub fn read_mhd_volume<P: AsRef<Path>>(path: P) -> Result<Volume, VolumeLoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| VolumeLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let header = MhdHeader::parse(&text)?;
    let (element_type, (x, y, z), data_file) = header.validate()?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let data_path = base_dir.join(data_file);
    let payload = fs::read(&data_path).map_err(|source| VolumeLoadError::Io {
        path: data_path.clone(),
        source,
    })?;

    let count = x
        .checked_mul(y)
        .and_then(|v| v.checked_mul(z))
        .ok_or_else(|| VolumeLoadError::Unsupported("volume dimensions overflow".to_string()))?;
    let expected = count
        .checked_mul(element_type.byte_width())
        .ok_or_else(|| VolumeLoadError::Unsupported("volume byte size overflows".to_string()))?;

    let bytes = if header.compressed {
        inflate_exact(&payload, expected)?
    } else {
        if payload.len() < expected {
            return Err(VolumeLoadError::ShortPayload { expected, actual: payload.len() });
        }
        payload[..expected].to_vec()
    };

    let samples = decode_samples(&bytes, element_type, header.big_endian);
    let data = normalize(&samples);
    log::info!(
        "Loaded volume {} ({}x{}x{}, {:?}, {}).",
        path.display(), x, y, z, element_type,
        if header.compressed { "compressed" } else { "raw" }
    );
    Volume::from_data(x, y, z, data).map_err(VolumeLoadError::Unsupported)
}

/// Inflates a zlib stream into exactly `expected` bytes.
///
/// The output grows with what the stream actually delivers, so a header that
/// claims a huge volume cannot force a huge allocation up front. Some
/// producers never finish their streams properly, so running out of input
/// after every expected byte has been produced counts as success.
pub fn inflate_exact(compressed: &[u8], expected: usize) -> Result<Vec<u8>, VolumeLoadError> {
    let mut out: Vec<u8> = Vec::new();
    let mut inflater = Decompress::new(true);
    let mut status = Status::Ok;

    while out.len() < expected {
        let grow = (expected - out.len()).min(INFLATE_CHUNK);
        out.try_reserve_exact(grow)
            .map_err(|e| VolumeLoadError::Decompress(format!("cannot grow output buffer: {}", e)))?;
        let consumed = inflater.total_in() as usize;
        let before = out.len();
        status = inflater
            .decompress_vec(&compressed[consumed..], &mut out, FlushDecompress::None)
            .map_err(|e| VolumeLoadError::Decompress(e.to_string()))?;
        if status == Status::StreamEnd || out.len() == before {
            break;
        }
    }
    out.truncate(expected);

    let produced = out.len();
    match status {
        Status::StreamEnd if produced == expected => Ok(out),
        Status::Ok | Status::BufError if produced == expected => {
            log::debug!("zlib stream not terminated, but all {} bytes were delivered", expected);
            Ok(out)
        }
        _ => Err(VolumeLoadError::Decompress(format!(
            "stream ended after {} of {} bytes",
            produced, expected
        ))),
    }
}

pub fn decode_samples(bytes: &[u8], element_type: ElementType, big_endian: bool) -> Vec<Float> {
    match element_type {
        ElementType::UChar => bytes.iter().map(|&b| b as Float).collect(),
        ElementType::Short => bytes
            .chunks_exact(2)
            .map(|c| {
                let pair = [c[0], c[1]];
                let v = if big_endian { i16::from_be_bytes(pair) } else { i16::from_le_bytes(pair) };
                v as Float
            })
            .collect(),
    }
}

/// Maps samples linearly onto [0, 1]. A constant field maps to 0.5.
pub fn normalize(samples: &[Float]) -> Vec<Float> {
    let (min, max) = samples
        .iter()
        .fold((Float::INFINITY, Float::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let range = max - min;
    if !(range > 0.0) {
        return vec![0.5; samples.len()];
    }
    samples.iter().map(|&v| (v - min) / range).collect()
}

fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

fn parse_ints(value: &str) -> Option<Vec<i64>> {
    value
        .split_whitespace()
        .map(|s| s.parse::<i64>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::TempDir;

    const RAMP: [u8; 8] = [0, 32, 64, 96, 128, 160, 192, 255];

    fn write_volume(dir: &Path, name: &str, header: &str, payload: &[u8]) -> PathBuf {
        let header_path = dir.join(format!("{}.mhd", name));
        fs::write(&header_path, header).expect("write header");
        fs::write(dir.join(format!("{}.raw", name)), payload).expect("write payload");
        header_path
    }

    fn header(name: &str, dims: &str, ty: &str, compressed: bool) -> String {
        format!(
            "ObjectType = Image\nNDims = 3\nBinaryData = True\nBinaryDataByteOrderMSB = False\n\
             CompressedData = {}\nTransformMatrix = 1 0 0 0 1 0 0 0 1\nDimSize = {}\n\
             ElementType = {}\nElementDataFile = {}.raw\n",
            if compressed { "True" } else { "False" }, dims, ty, name
        )
    }

    fn zlib(bytes: &[u8]) -> Vec<u8> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(bytes).expect("compress");
        encoder.finish().expect("finish")
    }

    #[test]
    fn raw_uchar_normalizes_monotonic() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_volume(dir.path(), "ramp", &header("ramp", "2 2 2", "MET_UCHAR", false), &RAMP);

        let vol = read_mhd_volume(&path).expect("load");
        assert_eq!(vol.dims(), (2, 2, 2));
        assert_eq!(vol.total_element_count(), 8);
        let data = vol.data();
        assert_eq!(data[0], 0.0);
        assert_eq!(data[7], 1.0);
        assert!(data.windows(2).all(|w| w[0] < w[1]));
        assert!((data[4] - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn compressed_matches_raw() {
        let dir = TempDir::new().expect("temp dir");
        let raw = write_volume(dir.path(), "a", &header("a", "2 2 2", "MET_UCHAR", false), &RAMP);
        let packed = write_volume(dir.path(), "b", &header("b", "2 2 2", "MET_UCHAR", true), &zlib(&RAMP));

        let a = read_mhd_volume(&raw).expect("raw");
        let b = read_mhd_volume(&packed).expect("compressed");
        assert_eq!(a, b);
    }

    #[test]
    fn unterminated_stream_with_all_bytes_is_accepted() {
        let mut packed = zlib(&RAMP);
        // drop the adler32 trailer
        packed.truncate(packed.len() - 4);
        let out = inflate_exact(&packed, RAMP.len()).expect("inflate");
        assert_eq!(out, RAMP.to_vec());
    }

    #[test]
    fn truncated_stream_is_an_error() {
        let data: Vec<u8> = (0..4096u32).map(|v| (v * 7 % 251) as u8).collect();
        let packed = zlib(&data);
        let err = inflate_exact(&packed[..packed.len() / 2], data.len());
        assert!(matches!(err, Err(VolumeLoadError::Decompress(_))));
    }

    #[test]
    fn oversized_compressed_header_falls_back_to_empty() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_volume(
            dir.path(),
            "huge",
            &header("huge", "100000 100000 100000", "MET_UCHAR", true),
            &zlib(&RAMP),
        );
        assert!(matches!(read_mhd_volume(&path), Err(VolumeLoadError::Decompress(_))));
        assert!(load_mhd_volume(&path).is_empty());
    }

    #[test]
    fn byte_size_overflow_is_rejected() {
        let dir = TempDir::new().expect("temp dir");
        let dims = format!("{} 2 1", usize::MAX / 2);
        let path = write_volume(dir.path(), "wide", &header("wide", &dims, "MET_SHORT", true), &zlib(&RAMP));
        assert!(matches!(read_mhd_volume(&path), Err(VolumeLoadError::Unsupported(_))));
        assert!(load_mhd_volume(&path).is_empty());
    }

    #[test]
    fn short_samples_little_and_big_endian() {
        let values: [i16; 8] = [-100, 0, 100, 200, 300, 400, 500, 900];
        let le: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        let be: Vec<u8> = values.iter().flat_map(|v| v.to_be_bytes()).collect();

        let dir = TempDir::new().expect("temp dir");
        let a = write_volume(dir.path(), "le", &header("le", "2 2 2", "MET_SHORT", false), &le);
        let text = header("be", "2 2 2", "MET_SHORT", false).replace("ByteOrderMSB = False", "ByteOrderMSB = True");
        let b = write_volume(dir.path(), "be", &text, &be);

        let va = read_mhd_volume(&a).expect("le");
        let vb = read_mhd_volume(&b).expect("be");
        assert_eq!(va, vb);
        assert_eq!(va.data()[0], 0.0);
        assert_eq!(va.data()[7], 1.0);
        assert!((va.data()[1] - 0.1).abs() < 1e-6);
    }

    #[test]
    fn constant_field_maps_to_half() {
        assert_eq!(normalize(&[7.0, 7.0, 7.0]), vec![0.5, 0.5, 0.5]);
        assert!(normalize(&[]).is_empty());
    }

    #[test]
    fn header_errors() {
        assert!(matches!(MhdHeader::parse("NDims = three"), Err(VolumeLoadError::Header(_))));
        assert!(matches!(MhdHeader::parse("DimSize = 2 2"), Err(VolumeLoadError::Header(_))));
        assert!(matches!(MhdHeader::parse("ElementType = MET_FLOAT"), Err(VolumeLoadError::Header(_))));

        let garbage = MhdHeader::parse("hello\nObjectType = Image\nFoo = bar").expect("parse");
        assert!(garbage.is_image);

        let mesh = MhdHeader::parse(&header("m", "2 2 2", "MET_UCHAR", false).replace("Image", "Mesh")).unwrap();
        assert!(matches!(mesh.validate(), Err(VolumeLoadError::Unsupported(_))));

        let ascii = MhdHeader::parse(&header("m", "2 2 2", "MET_UCHAR", false).replace("BinaryData = True", "BinaryData = False")).unwrap();
        assert!(ascii.validate().is_err());

        let flat = MhdHeader::parse(&header("m", "2 2 2", "MET_UCHAR", false).replace("NDims = 3", "NDims = 2")).unwrap();
        assert!(flat.validate().is_err());

        let negative = MhdHeader::parse(&header("m", "2 -2 2", "MET_UCHAR", false)).unwrap();
        assert!(negative.validate().is_err());
    }

    #[test]
    fn load_failures_fall_back_to_empty() {
        let dir = TempDir::new().expect("temp dir");
        assert!(load_mhd_volume(dir.path().join("missing.mhd")).is_empty());

        let short = write_volume(dir.path(), "s", &header("s", "2 2 2", "MET_UCHAR", false), &RAMP[..5]);
        assert!(matches!(read_mhd_volume(&short), Err(VolumeLoadError::ShortPayload { .. })));
        assert_eq!(load_mhd_volume(&short).total_element_count(), 0);

        let no_payload = dir.path().join("np.mhd");
        fs::write(&no_payload, header("nothing", "2 2 2", "MET_UCHAR", false)).unwrap();
        assert!(matches!(read_mhd_volume(&no_payload), Err(VolumeLoadError::Io { .. })));
    }
}
