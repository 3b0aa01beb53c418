use super::column::Column;
use super::error::CodecError;
use super::strategy::{Storage, Strategy};
use super::transforms::{
    delta_decode, delta_encode, recursive_index_decode, recursive_index_encode, run_length_decode,
    run_length_encode, scale_decode, scale_encode,
};

/// Size of the big-endian `(strategy, length, parameter)` header.
pub const HEADER_LEN: usize = 12;

/// Upper bound on the element count a header may declare. Counts come from
/// untrusted payloads and size the run-length expansion.
pub const MAX_ELEMENT_COUNT: usize = 1 << 27;

const I8_RANGE: (i32, i32) = (i8::MIN as i32, i8::MAX as i32);
const I16_RANGE: (i32, i32) = (i16::MIN as i32, i16::MAX as i32);

/// A framed encoded array: header fields plus the raw payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedArray {
    pub strategy: Strategy,
    pub length: usize,
    pub parameter: i32,
    pub payload: Vec<u8>,
}

impl EncodedArray {
    /// Splits a framed buffer into header fields and payload.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() < HEADER_LEN {
            return Err(CodecError::TruncatedHeader(bytes.len()));
        }
        let field = |i: usize| i32::from_be_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);
        let strategy = Strategy::from_code(field(0))?;
        let length = field(4);
        if length < 0 {
            return Err(CodecError::NegativeLength(length));
        }
        Ok(Self {
            strategy,
            length: length as usize,
            parameter: field(8),
            payload: bytes[HEADER_LEN..].to_vec(),
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.payload.len());
        out.extend_from_slice(&self.strategy.code().to_be_bytes());
        out.extend_from_slice(&(self.length as i32).to_be_bytes());
        out.extend_from_slice(&self.parameter.to_be_bytes());
        out.extend_from_slice(&self.payload);
        out
    }

    pub fn decode(&self) -> Result<Column, CodecError> {
        decode(
            &self.payload,
            self.strategy.code(),
            self.length,
            self.parameter,
        )
    }

    pub fn encode(column: &Column, strategy: Strategy, parameter: i32) -> Result<Self, CodecError> {
        Ok(Self {
            strategy,
            length: column.len(),
            parameter,
            payload: encode(column, strategy, parameter)?,
        })
    }
}

/// Decodes a framed buffer (header + payload) into a column.
pub fn decode_bytes(bytes: &[u8]) -> Result<Column, CodecError> {
    EncodedArray::from_bytes(bytes)?.decode()
}

/// Encodes a column and frames it with its header.
pub fn encode_bytes(column: &Column, strategy: Strategy, parameter: i32) -> Result<Vec<u8>, CodecError> {
    Ok(EncodedArray::encode(column, strategy, parameter)?.to_bytes())
}

/// Decodes a raw payload with the given strategy code.
///
/// The decoded column must hold exactly `element_count` values, and
/// `element_count` may not exceed [`MAX_ELEMENT_COUNT`].
pub fn decode(
    payload: &[u8],
    strategy_code: i32,
    element_count: usize,
    parameter: i32,
) -> Result<Column, CodecError> {
    let strategy = Strategy::from_code(strategy_code)?;
    check_scale(strategy, parameter)?;
    if element_count > MAX_ELEMENT_COUNT {
        return Err(CodecError::ElementCountTooLarge {
            count: element_count,
            limit: MAX_ELEMENT_COUNT,
        });
    }

    let column = match strategy {
        Strategy::Float32 => Column::Float(read_f32s(payload)?),
        Strategy::Int8 => Column::Int(read_ints(payload, Storage::I8)?),
        Strategy::Int16 => Column::Int(read_ints(payload, Storage::I16)?),
        Strategy::Int32 => Column::Int(read_ints(payload, Storage::I32)?),
        Strategy::FixedString => Column::Str(read_strings(payload, parameter)?),
        Strategy::RunLengthChar => {
            let codes = run_length_decode(&read_ints(payload, Storage::I32)?, element_count)?;
            Column::Char(codes.into_iter().map(code_to_char).collect::<Result<_, _>>()?)
        }
        Strategy::RunLength => {
            Column::Int(run_length_decode(&read_ints(payload, Storage::I32)?, element_count)?)
        }
        Strategy::RunLengthDelta => {
            let mut values = run_length_decode(&read_ints(payload, Storage::I32)?, element_count)?;
            delta_decode(&mut values)?;
            Column::Int(values)
        }
        Strategy::RunLengthScaled => {
            let values = run_length_decode(&read_ints(payload, Storage::I32)?, element_count)?;
            Column::Float(scale_decode(&values, parameter))
        }
        Strategy::DeltaRecursiveScaled16 => {
            let packed = read_ints(payload, Storage::I16)?;
            let mut values = recursive_index_decode(&packed, I16_RANGE.0, I16_RANGE.1)?;
            delta_decode(&mut values)?;
            Column::Float(scale_decode(&values, parameter))
        }
        Strategy::Scaled16 => {
            Column::Float(scale_decode(&read_ints(payload, Storage::I16)?, parameter))
        }
        Strategy::RecursiveScaled16 => {
            let packed = read_ints(payload, Storage::I16)?;
            let values = recursive_index_decode(&packed, I16_RANGE.0, I16_RANGE.1)?;
            Column::Float(scale_decode(&values, parameter))
        }
        Strategy::RecursiveScaled8 => {
            let packed = read_ints(payload, Storage::I8)?;
            let values = recursive_index_decode(&packed, I8_RANGE.0, I8_RANGE.1)?;
            Column::Float(scale_decode(&values, parameter))
        }
        Strategy::Recursive16 => {
            let packed = read_ints(payload, Storage::I16)?;
            Column::Int(recursive_index_decode(&packed, I16_RANGE.0, I16_RANGE.1)?)
        }
        Strategy::Recursive8 => {
            let packed = read_ints(payload, Storage::I8)?;
            Column::Int(recursive_index_decode(&packed, I8_RANGE.0, I8_RANGE.1)?)
        }
    };

    if column.len() != element_count {
        return Err(CodecError::LengthMismatch {
            expected: element_count,
            found: column.len(),
        });
    }
    Ok(column)
}

/// Encodes a column into a raw payload (no header).
pub fn encode(column: &Column, strategy: Strategy, parameter: i32) -> Result<Vec<u8>, CodecError> {
    if column.kind() != strategy.column_kind() {
        return Err(CodecError::ColumnTypeMismatch {
            strategy: strategy.code(),
            expected: strategy.column_kind(),
            found: column.kind(),
        });
    }
    check_scale(strategy, parameter)?;

    match (strategy, column) {
        (Strategy::Float32, Column::Float(values)) => Ok(write_f32s(values)),
        (Strategy::Int8, Column::Int(values)) => write_ints(values, Storage::I8),
        (Strategy::Int16, Column::Int(values)) => write_ints(values, Storage::I16),
        (Strategy::Int32, Column::Int(values)) => write_ints(values, Storage::I32),
        (Strategy::FixedString, Column::Str(values)) => write_strings(values, parameter),
        (Strategy::RunLengthChar, Column::Char(values)) => {
            let codes: Vec<i32> = values.iter().map(|c| c.map_or(0, |c| c as i32)).collect();
            write_ints(&run_length_encode(&codes), Storage::I32)
        }
        (Strategy::RunLength, Column::Int(values)) => {
            write_ints(&run_length_encode(values), Storage::I32)
        }
        (Strategy::RunLengthDelta, Column::Int(values)) => {
            write_ints(&run_length_encode(&delta_encode(values)?), Storage::I32)
        }
        (Strategy::RunLengthScaled, Column::Float(values)) => {
            write_ints(&run_length_encode(&scale_encode(values, parameter)?), Storage::I32)
        }
        (Strategy::DeltaRecursiveScaled16, Column::Float(values)) => {
            let deltas = delta_encode(&scale_encode(values, parameter)?)?;
            let packed = recursive_index_encode(&deltas, I16_RANGE.0, I16_RANGE.1);
            write_ints(&packed, Storage::I16)
        }
        (Strategy::Scaled16, Column::Float(values)) => {
            write_ints(&scale_encode(values, parameter)?, Storage::I16)
        }
        (Strategy::RecursiveScaled16, Column::Float(values)) => {
            let scaled = scale_encode(values, parameter)?;
            let packed = recursive_index_encode(&scaled, I16_RANGE.0, I16_RANGE.1);
            write_ints(&packed, Storage::I16)
        }
        (Strategy::RecursiveScaled8, Column::Float(values)) => {
            let scaled = scale_encode(values, parameter)?;
            let packed = recursive_index_encode(&scaled, I8_RANGE.0, I8_RANGE.1);
            write_ints(&packed, Storage::I8)
        }
        (Strategy::Recursive16, Column::Int(values)) => {
            let packed = recursive_index_encode(values, I16_RANGE.0, I16_RANGE.1);
            write_ints(&packed, Storage::I16)
        }
        (Strategy::Recursive8, Column::Int(values)) => {
            let packed = recursive_index_encode(values, I8_RANGE.0, I8_RANGE.1);
            write_ints(&packed, Storage::I8)
        }
        (strategy, column) => Err(CodecError::ColumnTypeMismatch {
            strategy: strategy.code(),
            expected: strategy.column_kind(),
            found: column.kind(),
        }),
    }
}

fn check_scale(strategy: Strategy, parameter: i32) -> Result<(), CodecError> {
    if strategy.is_scaled() && parameter <= 0 {
        return Err(CodecError::InvalidScale {
            strategy: strategy.code(),
            parameter,
        });
    }
    Ok(())
}

fn check_alignment(payload: &[u8], width: usize) -> Result<(), CodecError> {
    if payload.len() % width != 0 {
        return Err(CodecError::MisalignedPayload {
            len: payload.len(),
            width,
        });
    }
    Ok(())
}

fn read_ints(payload: &[u8], storage: Storage) -> Result<Vec<i32>, CodecError> {
    let width = storage.width();
    check_alignment(payload, width)?;
    Ok(payload
        .chunks_exact(width)
        .map(|c| match storage {
            Storage::I8 => c[0] as i8 as i32,
            Storage::I16 => i16::from_be_bytes([c[0], c[1]]) as i32,
            _ => i32::from_be_bytes([c[0], c[1], c[2], c[3]]),
        })
        .collect())
}

fn read_f32s(payload: &[u8]) -> Result<Vec<f32>, CodecError> {
    check_alignment(payload, 4)?;
    Ok(payload
        .chunks_exact(4)
        .map(|c| f32::from_be_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

fn read_strings(payload: &[u8], width: i32) -> Result<Vec<String>, CodecError> {
    if width <= 0 {
        return Err(CodecError::InvalidStringWidth(width));
    }
    let width = width as usize;
    check_alignment(payload, width)?;
    payload
        .chunks_exact(width)
        .map(|chunk| {
            let end = chunk.iter().position(|&b| b == 0).unwrap_or(chunk.len());
            String::from_utf8(chunk[..end].to_vec()).map_err(|_| CodecError::InvalidUtf8)
        })
        .collect()
}

fn code_to_char(code: i32) -> Result<Option<char>, CodecError> {
    if code == 0 {
        return Ok(None);
    }
    u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .map(Some)
        .ok_or(CodecError::InvalidChar(code))
}

fn write_ints(values: &[i32], storage: Storage) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::with_capacity(values.len() * storage.width());
    for &value in values {
        match storage {
            Storage::I8 => {
                let v = i8::try_from(value).map_err(|_| CodecError::ValueOutOfRange {
                    value: value as i64,
                    bits: 8,
                })?;
                out.extend_from_slice(&v.to_be_bytes());
            }
            Storage::I16 => {
                let v = i16::try_from(value).map_err(|_| CodecError::ValueOutOfRange {
                    value: value as i64,
                    bits: 16,
                })?;
                out.extend_from_slice(&v.to_be_bytes());
            }
            _ => out.extend_from_slice(&value.to_be_bytes()),
        }
    }
    Ok(out)
}

fn write_f32s(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

fn write_strings(values: &[String], width: i32) -> Result<Vec<u8>, CodecError> {
    if width <= 0 {
        return Err(CodecError::InvalidStringWidth(width));
    }
    let width = width as usize;
    let mut out = Vec::with_capacity(values.len() * width);
    for value in values {
        let bytes = value.as_bytes();
        if bytes.len() > width {
            return Err(CodecError::StringTooLong {
                value: value.clone(),
                width,
            });
        }
        out.extend_from_slice(bytes);
        out.resize(out.len() + width - bytes.len(), 0);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::codec::strategy::ColumnKind;

    fn framed(strategy: i32, length: i32, parameter: i32, payload: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&strategy.to_be_bytes());
        bytes.extend_from_slice(&length.to_be_bytes());
        bytes.extend_from_slice(&parameter.to_be_bytes());
        bytes.extend_from_slice(payload);
        bytes
    }

    fn i32_payload(values: &[i32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_be_bytes()).collect()
    }

    fn i16_payload(values: &[i16]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_be_bytes()).collect()
    }

    #[test]
    fn payload_ending_on_spill_chunk_is_rejected() {
        let payload = i16_payload(&[5, i16::MAX]);
        assert_eq!(
            decode(&payload, 14, 1, 0),
            Err(CodecError::DanglingRecursiveChunk)
        );
        assert_eq!(
            decode_bytes(&framed(10, 1, 1000, &payload)),
            Err(CodecError::DanglingRecursiveChunk)
        );
    }

    #[test]
    fn huge_declared_length_fails_before_expanding_runs() {
        let bytes = framed(7, i32::MAX, 0, &i32_payload(&[7, i32::MAX]));
        assert_eq!(
            decode_bytes(&bytes),
            Err(CodecError::ElementCountTooLarge {
                count: i32::MAX as usize,
                limit: MAX_ELEMENT_COUNT,
            })
        );
    }

    #[test]
    fn header_is_parsed_big_endian() {
        let bytes = framed(4, 2, 0, &i32_payload(&[1, -1]));
        let array = EncodedArray::from_bytes(&bytes).unwrap();
        assert_eq!(array.strategy, Strategy::Int32);
        assert_eq!(array.length, 2);
        assert_eq!(array.parameter, 0);
        assert_eq!(array.decode().unwrap(), Column::Int(vec![1, -1]));
        assert_eq!(array.to_bytes(), bytes);
    }

    #[test]
    fn short_header_is_rejected() {
        assert_eq!(
            EncodedArray::from_bytes(&[0, 0, 0, 4]),
            Err(CodecError::TruncatedHeader(4))
        );
    }

    #[test]
    fn negative_length_is_rejected() {
        let bytes = framed(4, -3, 0, &[]);
        assert_eq!(
            EncodedArray::from_bytes(&bytes),
            Err(CodecError::NegativeLength(-3))
        );
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        assert_eq!(decode(&[], 42, 0, 0), Err(CodecError::UnknownStrategy(42)));
        let bytes = framed(99, 0, 0, &[]);
        assert_eq!(decode_bytes(&bytes), Err(CodecError::UnknownStrategy(99)));
    }

    #[test]
    fn pass_through_float_is_big_endian() {
        let payload: Vec<u8> = [1.5f32, -2.25].iter().flat_map(|v| v.to_be_bytes()).collect();
        assert_eq!(
            decode(&payload, 1, 2, 0).unwrap(),
            Column::Float(vec![1.5, -2.25])
        );
    }

    #[test]
    fn misaligned_payload_is_rejected() {
        assert_eq!(
            decode(&[0, 0, 1], 4, 1, 0),
            Err(CodecError::MisalignedPayload { len: 3, width: 4 })
        );
    }

    #[test]
    fn declared_count_must_match_decoded_values() {
        assert_eq!(
            decode(&i32_payload(&[1, 2, 3]), 4, 2, 0),
            Err(CodecError::LengthMismatch {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn int8_and_int16_are_sign_extended() {
        assert_eq!(
            decode(&[0xFF, 0x02], 2, 2, 0).unwrap(),
            Column::Int(vec![-1, 2])
        );
        assert_eq!(
            decode(&i16_payload(&[-300, 7]), 3, 2, 0).unwrap(),
            Column::Int(vec![-300, 7])
        );
    }

    #[test]
    fn fixed_strings_trim_padding() {
        let payload = b"A\0\0\0ABCD".to_vec();
        assert_eq!(
            decode(&payload, 5, 2, 4).unwrap(),
            Column::Str(vec!["A".into(), "ABCD".into()])
        );
        assert_eq!(
            decode(&payload, 5, 2, 0),
            Err(CodecError::InvalidStringWidth(0))
        );
    }

    #[test]
    fn run_length_chars_map_zero_to_absent() {
        let payload = i32_payload(&[0, 2, 'A' as i32, 1]);
        assert_eq!(
            decode(&payload, 6, 3, 0).unwrap(),
            Column::Char(vec![None, None, Some('A')])
        );
    }

    #[test]
    fn run_length_delta_reconstructs_serials() {
        let payload = i32_payload(&[1, 4, 10, 1]);
        assert_eq!(
            decode(&payload, 8, 5, 0).unwrap(),
            Column::Int(vec![1, 2, 3, 4, 14])
        );
    }

    #[test]
    fn run_length_scaled_divides_after_expansion() {
        let payload = i32_payload(&[100, 3]);
        assert_eq!(
            decode(&payload, 9, 3, 100).unwrap(),
            Column::Float(vec![1.0, 1.0, 1.0])
        );
    }

    #[test]
    fn delta_recursive_scaled_coordinates() {
        // 50.0, 50.5, 10.0 at a factor of 1000 -> 50000, +500, -40500
        let payload = i16_payload(&[32767, 17233, 500, -32768, -7732]);
        let column = decode(&payload, 10, 3, 1000).unwrap();
        assert_eq!(column, Column::Float(vec![50.0, 50.5, 10.0]));
    }

    #[test]
    fn scaled_strategies_require_positive_parameter() {
        assert_eq!(
            decode(&i16_payload(&[1]), 11, 1, 0),
            Err(CodecError::InvalidScale {
                strategy: 11,
                parameter: 0
            })
        );
    }

    #[test]
    fn recursive_int8_reconstructs_large_values() {
        let payload: Vec<u8> = [127i8, 127, 6, -5].iter().map(|&v| v as u8).collect();
        assert_eq!(
            decode(&payload, 15, 2, 0).unwrap(),
            Column::Int(vec![260, -5])
        );
    }

    #[test]
    fn decode_is_deterministic() {
        let payload = i16_payload(&[32767, 17233, 500, -32768, -7732]);
        let first = decode(&payload, 10, 3, 1000).unwrap();
        let second = decode(&payload, 10, 3, 1000).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn encode_then_decode_preserves_each_column_kind() {
        let cases = [
            (Column::Float(vec![1.5, -0.25]), Strategy::Float32, 0),
            (Column::Int(vec![-128, 127]), Strategy::Int8, 0),
            (Column::Int(vec![70_000, -70_000]), Strategy::Int32, 0),
            (Column::Str(vec!["A".into(), "AB".into()]), Strategy::FixedString, 4),
            (Column::Char(vec![None, Some('B'), Some('B')]), Strategy::RunLengthChar, 0),
            (Column::Int(vec![5, 6, 7, 100]), Strategy::RunLengthDelta, 0),
            (Column::Float(vec![12.345, 99.999, -1000.5]), Strategy::DeltaRecursiveScaled16, 1000),
            (Column::Int(vec![40_000, -3]), Strategy::Recursive16, 0),
        ];
        for (column, strategy, parameter) in cases {
            let bytes = encode_bytes(&column, strategy, parameter).unwrap();
            let decoded = decode_bytes(&bytes).unwrap();
            match (&column, &decoded) {
                (Column::Float(a), Column::Float(b)) => {
                    assert_eq!(a.len(), b.len());
                    for (x, y) in a.iter().zip(b) {
                        assert!((x - y).abs() < 1e-3, "strategy {strategy}: {x} vs {y}");
                    }
                }
                _ => assert_eq!(column, decoded, "strategy {strategy}"),
            }
        }
    }

    #[test]
    fn encode_rejects_mismatched_column_kind() {
        assert_eq!(
            encode(&Column::Int(vec![1]), Strategy::Float32, 0),
            Err(CodecError::ColumnTypeMismatch {
                strategy: 1,
                expected: ColumnKind::Float,
                found: ColumnKind::Int,
            })
        );
    }

    #[test]
    fn encode_rejects_values_too_wide_for_storage() {
        assert_eq!(
            encode(&Column::Int(vec![200]), Strategy::Int8, 0),
            Err(CodecError::ValueOutOfRange {
                value: 200,
                bits: 8
            })
        );
    }

    #[test]
    fn encode_rejects_overlong_strings() {
        assert!(matches!(
            encode(&Column::Str(vec!["ABCDE".into()]), Strategy::FixedString, 4),
            Err(CodecError::StringTooLong { width: 4, .. })
        ));
    }

}
