use std::fs::File;
use std::io::{BufWriter, Cursor, Read, Write};
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};
use memmap2::Mmap;
use ndarray::{ArrayD, IxDyn};
use tracing::debug;

use crate::axis::AxisLabel;
use crate::consts::{STACK_FILE_MAGIC, STACK_FILE_VERSION};
use crate::dataset::{AnyHyperstack, Hyperstack};
use crate::error::{HyperstackError, Result};
use crate::sample::{Sample, SampleType};

/// Header of a native stack file.
///
/// Layout (all little-endian): 8-byte magic, u16 version, u8 sample type,
/// u8 axis count, u32 composite channel count, then per axis a u16 label
/// length, the UTF-8 label, a u64 extent and an f64 calibration. Samples
/// follow immediately in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct StackHeader {
    pub sample_type: SampleType,
    pub axes: Vec<AxisLabel>,
    pub dims: Vec<usize>,
    pub calibration: Vec<f64>,
    pub composite_channel_count: usize,
}

impl StackHeader {
    pub fn of(stack: &AnyHyperstack) -> Self {
        Self {
            sample_type: stack.sample_type(),
            axes: stack.axes().to_vec(),
            dims: stack.dims().to_vec(),
            calibration: stack.calibration().to_vec(),
            composite_channel_count: stack.composite_channel_count(),
        }
    }

    pub fn sample_count(&self) -> Option<usize> {
        self.dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
    }

    /// Size of the sample block in bytes.
    pub fn data_byte_size(&self) -> Option<usize> {
        self.sample_count()?
            .checked_mul(self.sample_type.byte_size())
    }
}

/// Memory-mapped native stack file reader.
#[derive(Debug)]
pub struct StackReader {
    mmap: Mmap,
    data_offset: usize,
    data_end: usize,
    pub header: StackHeader,
}

impl StackReader {
    /// Open a stack file and parse its header.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };

        if mmap.len() < STACK_FILE_MAGIC.len() || &mmap[..STACK_FILE_MAGIC.len()] != STACK_FILE_MAGIC {
            return Err(HyperstackError::InvalidStackFile(
                "Missing HYPERSTK magic".into(),
            ));
        }

        let mut cursor = Cursor::new(&mmap[STACK_FILE_MAGIC.len()..]);
        let header = parse_header(&mut cursor).map_err(|e| match e {
            HyperstackError::Io(_) => {
                HyperstackError::InvalidStackFile("Header truncated".into())
            }
            other => other,
        })?;
        let data_offset = STACK_FILE_MAGIC.len() + cursor.position() as usize;

        let data_end = header
            .data_byte_size()
            .and_then(|size| data_offset.checked_add(size))
            .ok_or_else(|| HyperstackError::InvalidStackFile("Sample count overflows".into()))?;
        if mmap.len() < data_end {
            return Err(HyperstackError::InvalidStackFile(format!(
                "File truncated: expected at least {} bytes, got {}",
                data_end,
                mmap.len()
            )));
        }

        debug!(
            path = %path.display(),
            dims = ?header.dims,
            sample_type = %header.sample_type,
            "Opened stack file"
        );

        Ok(Self {
            mmap,
            data_offset,
            data_end,
            header,
        })
    }

    /// Raw little-endian sample bytes (zero-copy from mmap).
    pub fn data_raw(&self) -> &[u8] {
        &self.mmap[self.data_offset..self.data_end]
    }

    /// Decode the whole file into a hyperstack.
    pub fn read(&self) -> Result<AnyHyperstack> {
        let stack: AnyHyperstack = match self.header.sample_type {
            SampleType::U8 => self.decode::<u8>()?.into(),
            SampleType::U16 => self.decode::<u16>()?.into(),
            SampleType::F32 => self.decode::<f32>()?.into(),
            SampleType::F64 => self.decode::<f64>()?.into(),
        };
        Ok(stack)
    }

    fn decode<T: LeSample>(&self) -> Result<Hyperstack<T>> {
        let raw = self.data_raw();
        let mut samples = vec![T::default(); raw.len() / T::SAMPLE_TYPE.byte_size()];
        T::decode_le(raw, &mut samples);

        let data = ArrayD::from_shape_vec(IxDyn(&self.header.dims), samples)
            .map_err(|e| HyperstackError::InvalidStackFile(e.to_string()))?;
        let mut stack = Hyperstack::new(self.header.axes.clone(), data)
            .map_err(|e| HyperstackError::InvalidStackFile(e.to_string()))?;
        stack.set_calibration(self.header.calibration.clone())?;
        stack
            .set_composite_channel_count(self.header.composite_channel_count)
            .map_err(|e| HyperstackError::InvalidStackFile(e.to_string()))?;
        Ok(stack)
    }
}

/// Read a stack file in one call.
pub fn read_stack(path: &Path) -> Result<AnyHyperstack> {
    StackReader::open(path)?.read()
}

/// Write `stack` as a native stack file.
pub fn write_stack(stack: &AnyHyperstack, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_header(&mut writer, &StackHeader::of(stack))?;
    match stack {
        AnyHyperstack::U8(s) => write_samples(&mut writer, s)?,
        AnyHyperstack::U16(s) => write_samples(&mut writer, s)?,
        AnyHyperstack::F32(s) => write_samples(&mut writer, s)?,
        AnyHyperstack::F64(s) => write_samples(&mut writer, s)?,
    }
    writer.flush()?;
    debug!(path = %path.display(), dims = ?stack.dims(), "Wrote stack file");
    Ok(())
}

fn parse_header(cursor: &mut Cursor<&[u8]>) -> Result<StackHeader> {
    let version = cursor.read_u16::<LittleEndian>()?;
    if version != STACK_FILE_VERSION {
        return Err(HyperstackError::InvalidStackFile(format!(
            "Unsupported version {version}"
        )));
    }

    let tag = cursor.read_u8()?;
    let sample_type = SampleType::from_tag(tag)
        .ok_or_else(|| HyperstackError::UnsupportedSampleType(format!("tag {tag}")))?;
    let ndim = cursor.read_u8()? as usize;
    let composite_channel_count = cursor.read_u32::<LittleEndian>()? as usize;

    let mut axes = Vec::with_capacity(ndim);
    let mut dims = Vec::with_capacity(ndim);
    let mut calibration = Vec::with_capacity(ndim);
    for _ in 0..ndim {
        let len = cursor.read_u16::<LittleEndian>()? as usize;
        let mut label = vec![0u8; len];
        cursor.read_exact(&mut label)?;
        let label = String::from_utf8(label)
            .map_err(|_| HyperstackError::InvalidStackFile("Axis label is not UTF-8".into()))?;
        axes.push(AxisLabel::from(label));

        let extent = cursor.read_u64::<LittleEndian>()?;
        let extent = usize::try_from(extent)
            .map_err(|_| HyperstackError::InvalidStackFile(format!("Extent {extent} too large")))?;
        dims.push(extent);
        calibration.push(cursor.read_f64::<LittleEndian>()?);
    }

    Ok(StackHeader {
        sample_type,
        axes,
        dims,
        calibration,
        composite_channel_count,
    })
}

fn write_header(w: &mut impl Write, header: &StackHeader) -> Result<()> {
    if header.axes.len() > u8::MAX as usize {
        return Err(HyperstackError::InvalidShape(format!(
            "{} axes exceed the stack file limit",
            header.axes.len()
        )));
    }

    w.write_all(STACK_FILE_MAGIC)?;
    w.write_u16::<LittleEndian>(STACK_FILE_VERSION)?;
    w.write_u8(header.sample_type.tag())?;
    w.write_u8(header.axes.len() as u8)?;
    w.write_u32::<LittleEndian>(header.composite_channel_count as u32)?;

    for ((label, &extent), &cal) in header.axes.iter().zip(&header.dims).zip(&header.calibration) {
        let bytes = label.as_str().as_bytes();
        let len = u16::try_from(bytes.len()).map_err(|_| {
            HyperstackError::InvalidShape(format!("Axis label {label} too long"))
        })?;
        w.write_u16::<LittleEndian>(len)?;
        w.write_all(bytes)?;
        w.write_u64::<LittleEndian>(extent as u64)?;
        w.write_f64::<LittleEndian>(cal)?;
    }
    Ok(())
}

fn write_samples<T: LeSample>(w: &mut impl Write, stack: &Hyperstack<T>) -> Result<()> {
    // Logical iteration order is row-major regardless of memory layout.
    for &v in stack.data().iter() {
        v.write_le(w)?;
    }
    Ok(())
}

/// Little-endian encoding of a sample type.
trait LeSample: Sample {
    fn write_le(self, w: &mut impl Write) -> std::io::Result<()>;
    fn decode_le(raw: &[u8], dst: &mut [Self]);
}

impl LeSample for u8 {
    fn write_le(self, w: &mut impl Write) -> std::io::Result<()> {
        w.write_u8(self)
    }

    fn decode_le(raw: &[u8], dst: &mut [Self]) {
        dst.copy_from_slice(raw);
    }
}

impl LeSample for u16 {
    fn write_le(self, w: &mut impl Write) -> std::io::Result<()> {
        w.write_u16::<LittleEndian>(self)
    }

    fn decode_le(raw: &[u8], dst: &mut [Self]) {
        LittleEndian::read_u16_into(raw, dst);
    }
}

impl LeSample for f32 {
    fn write_le(self, w: &mut impl Write) -> std::io::Result<()> {
        w.write_f32::<LittleEndian>(self)
    }

    fn decode_le(raw: &[u8], dst: &mut [Self]) {
        LittleEndian::read_f32_into(raw, dst);
    }
}

impl LeSample for f64 {
    fn write_le(self, w: &mut impl Write) -> std::io::Result<()> {
        w.write_f64::<LittleEndian>(self)
    }

    fn decode_le(raw: &[u8], dst: &mut [Self]) {
        LittleEndian::read_f64_into(raw, dst);
    }
}
