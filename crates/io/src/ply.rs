use boxcrop_core::PointCloud;
use std::fs;
use std::io::{self, BufWriter, Write as _};
use std::path::Path;

/// Output encoding for [`write_ply_as`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlyEncoding {
    Ascii,
    #[default]
    BinaryLittleEndian,
}

/// Property type as declared in the PLY header.
#[derive(Debug, Clone, Copy)]
enum PropType {
    Float,
    Double,
    Uchar,
}

impl PropType {
    fn parse(name: &str) -> io::Result<Self> {
        match name {
            "float" | "float32" => Ok(PropType::Float),
            "double" | "float64" => Ok(PropType::Double),
            "uchar" | "uint8" => Ok(PropType::Uchar),
            other => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                format!("unsupported property type: {}", other),
            )),
        }
    }

    fn byte_size(self) -> usize {
        match self {
            PropType::Float => 4,
            PropType::Double => 8,
            PropType::Uchar => 1,
        }
    }

    fn read_le(self, bytes: &[u8]) -> f32 {
        match self {
            PropType::Float => f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            PropType::Double => {
                let mut raw = [0u8; 8];
                raw.copy_from_slice(&bytes[..8]);
                f64::from_le_bytes(raw) as f32
            }
            PropType::Uchar => bytes[0] as f32,
        }
    }
}

struct PlyHeader {
    encoding: PlyEncoding,
    vertex_count: usize,
    property_names: Vec<String>,
    property_types: Vec<PropType>,
    header_end_offset: usize, // byte offset just after "end_header\n"
}

impl PlyHeader {
    fn column(&self, name: &str) -> Option<usize> {
        self.property_names.iter().position(|n| n == name)
    }

    fn byte_offset(&self, prop_idx: usize) -> usize {
        self.property_types[..prop_idx]
            .iter()
            .map(|t| t.byte_size())
            .sum()
    }
}

fn parse_ply_header(data: &[u8]) -> io::Result<PlyHeader> {
    let end_marker = b"end_header\n";
    let header_end = find_bytes(data, end_marker).ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidData, "missing end_header in PLY file")
    })?;
    let header_end_offset = header_end + end_marker.len();

    let header_text = std::str::from_utf8(&data[..header_end])
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "PLY header not valid UTF-8"))?;

    let mut encoding = None;
    let mut vertex_count: usize = 0;
    let mut property_names: Vec<String> = Vec::new();
    let mut property_types: Vec<PropType> = Vec::new();
    let mut in_vertex_element = false;
    let mut seen_ply_magic = false;

    for line in header_text.lines() {
        let line = line.trim();

        if !seen_ply_magic {
            if line == "ply" {
                seen_ply_magic = true;
                continue;
            }
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "file does not start with 'ply'",
            ));
        }

        if line.starts_with("format") {
            if line.contains("ascii") {
                encoding = Some(PlyEncoding::Ascii);
            } else if line.contains("binary_little_endian") {
                encoding = Some(PlyEncoding::BinaryLittleEndian);
            } else {
                return Err(io::Error::new(
                    io::ErrorKind::Unsupported,
                    format!("unsupported PLY format: {}", line),
                ));
            }
        } else if line.starts_with("element vertex") {
            in_vertex_element = true;
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 3 {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "invalid element vertex line",
                ));
            }
            vertex_count = parts[2].parse::<usize>().map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("invalid vertex count: {}", e),
                )
            })?;
        } else if line.starts_with("element") {
            in_vertex_element = false;
        } else if line.starts_with("property") && in_vertex_element {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() >= 3 {
                property_types.push(PropType::parse(parts[1])?);
                property_names.push(parts[2].to_string());
            }
        }
    }

    let encoding = encoding
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "PLY format line missing"))?;

    Ok(PlyHeader {
        encoding,
        vertex_count,
        property_names,
        property_types,
        header_end_offset,
    })
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Read the xyz columns of a PLY file (ascii or binary_little_endian).
/// Other vertex properties are skipped.
pub fn read_ply(path: impl AsRef<Path>) -> io::Result<PointCloud> {
    let data = fs::read(&path)?;
    let header = parse_ply_header(&data)?;

    let (idx_x, idx_y, idx_z) = match (header.column("x"), header.column("y"), header.column("z"))
    {
        (Some(ix), Some(iy), Some(iz)) => (ix, iy, iz),
        _ => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "PLY file missing required x, y, z properties",
            ));
        }
    };

    let vertex_count = header.vertex_count;
    // every vertex takes at least one body byte
    let body_len = data.len().saturating_sub(header.header_end_offset);
    let mut cloud = PointCloud::with_capacity(vertex_count.min(body_len));

    match header.encoding {
        PlyEncoding::Ascii => {
            let body = std::str::from_utf8(&data[header.header_end_offset..]).map_err(|_| {
                io::Error::new(io::ErrorKind::InvalidData, "PLY body not valid UTF-8")
            })?;
            for line in body.lines() {
                if cloud.len() >= vertex_count {
                    break;
                }
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let parts: Vec<&str> = line.split_whitespace().collect();
                if parts.len() < header.property_names.len() {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!(
                            "vertex line has {} fields, expected {}",
                            parts.len(),
                            header.property_names.len()
                        ),
                    ));
                }

                let parse_f32 = |idx: usize| -> io::Result<f32> {
                    parts[idx].parse::<f32>().map_err(|e| {
                        io::Error::new(
                            io::ErrorKind::InvalidData,
                            format!("failed to parse float: {}", e),
                        )
                    })
                };

                cloud.push([parse_f32(idx_x)?, parse_f32(idx_y)?, parse_f32(idx_z)?]);
            }

            if cloud.len() < vertex_count {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!(
                        "PLY ascii body has {} vertices, header declares {}",
                        cloud.len(),
                        vertex_count
                    ),
                ));
            }
        }
        PlyEncoding::BinaryLittleEndian => {
            let body = &data[header.header_end_offset..];
            let stride: usize = header.property_types.iter().map(|t| t.byte_size()).sum();
            let needed = vertex_count.checked_mul(stride).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("PLY vertex count {} overflows the body size", vertex_count),
                )
            })?;
            if body.len() < needed {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "PLY binary body too short: need {} bytes, got {}",
                        needed,
                        body.len()
                    ),
                ));
            }

            let offsets = [
                header.byte_offset(idx_x),
                header.byte_offset(idx_y),
                header.byte_offset(idx_z),
            ];
            let types = [
                header.property_types[idx_x],
                header.property_types[idx_y],
                header.property_types[idx_z],
            ];

            for row in body.chunks_exact(stride).take(vertex_count) {
                cloud.push([
                    types[0].read_le(&row[offsets[0]..]),
                    types[1].read_le(&row[offsets[1]..]),
                    types[2].read_le(&row[offsets[2]..]),
                ]);
            }
        }
    }

    Ok(cloud)
}

/// Write a PLY file in ASCII format. Only xyz is written.
pub fn write_ply(path: impl AsRef<Path>, cloud: &PointCloud) -> io::Result<()> {
    let mut out = String::new();

    out.push_str("ply\n");
    out.push_str("format ascii 1.0\n");
    out.push_str(&format!("element vertex {}\n", cloud.len()));
    out.push_str("property float x\n");
    out.push_str("property float y\n");
    out.push_str("property float z\n");
    out.push_str("end_header\n");

    for [x, y, z] in cloud.iter_points() {
        out.push_str(&format!("{} {} {}\n", x, y, z));
    }

    fs::write(path, out)
}

/// Write a PLY file in binary_little_endian format. Only xyz is written.
pub fn write_ply_binary(path: impl AsRef<Path>, cloud: &PointCloud) -> io::Result<()> {
    let file = fs::File::create(path)?;
    let mut w = BufWriter::new(file);

    w.write_all(b"ply\n")?;
    w.write_all(b"format binary_little_endian 1.0\n")?;
    writeln!(w, "element vertex {}", cloud.len())?;
    w.write_all(b"property float x\n")?;
    w.write_all(b"property float y\n")?;
    w.write_all(b"property float z\n")?;
    w.write_all(b"end_header\n")?;

    for p in cloud.iter_points() {
        for v in p {
            w.write_all(&v.to_le_bytes())?;
        }
    }

    w.flush()?;
    Ok(())
}

pub fn write_ply_as(
    path: impl AsRef<Path>,
    cloud: &PointCloud,
    encoding: PlyEncoding,
) -> io::Result<()> {
    match encoding {
        PlyEncoding::Ascii => write_ply(path, cloud),
        PlyEncoding::BinaryLittleEndian => write_ply_binary(path, cloud),
    }
}
