//! Integer transforms shared by the encoding strategies.
//!
//! Every function here is pure; decoders validate their input and report
//! malformed data as a [`CodecError`] instead of panicking.

use super::error::CodecError;

/// Expands `(value, count)` pairs. `limit` caps the expanded length so a
/// corrupt count cannot trigger an unbounded allocation.
pub(crate) fn run_length_decode(values: &[i32], limit: usize) -> Result<Vec<i32>, CodecError> {
    if values.len() % 2 != 0 {
        return Err(CodecError::OddRunLength(values.len()));
    }

    let mut out = Vec::new();
    for pair in values.chunks_exact(2) {
        let (value, count) = (pair[0], pair[1]);
        if count < 0 {
            return Err(CodecError::NegativeRunCount(count));
        }
        let count = count as usize;
        if out.len() + count > limit {
            return Err(CodecError::LengthMismatch {
                expected: limit,
                found: out.len() + count,
            });
        }
        out.try_reserve(count)
            .map_err(|_| CodecError::AllocationFailed(out.len() + count))?;
        out.extend(std::iter::repeat_n(value, count));
    }
    Ok(out)
}

pub(crate) fn run_length_encode(values: &[i32]) -> Vec<i32> {
    let mut out = Vec::new();
    let mut iter = values.iter().copied();
    let Some(mut current) = iter.next() else {
        return out;
    };
    let mut count = 1;
    for value in iter {
        if value == current {
            count += 1;
        } else {
            out.push(current);
            out.push(count);
            current = value;
            count = 1;
        }
    }
    out.push(current);
    out.push(count);
    out
}

/// Replaces each difference with the running sum. The first value is absolute.
pub(crate) fn delta_decode(values: &mut [i32]) -> Result<(), CodecError> {
    for i in 1..values.len() {
        values[i] = values[i]
            .checked_add(values[i - 1])
            .ok_or(CodecError::Overflow("delta"))?;
    }
    Ok(())
}

pub(crate) fn delta_encode(values: &[i32]) -> Result<Vec<i32>, CodecError> {
    let mut out = Vec::with_capacity(values.len());
    let mut previous = 0i32;
    for (i, &value) in values.iter().enumerate() {
        if i == 0 {
            out.push(value);
        } else {
            out.push(
                value
                    .checked_sub(previous)
                    .ok_or(CodecError::Overflow("delta"))?,
            );
        }
        previous = value;
    }
    Ok(out)
}

/// Sums chunks equal to `min` or `max` into the following element. A payload
/// ending on such a chunk is truncated.
pub(crate) fn recursive_index_decode(
    values: &[i32],
    min: i32,
    max: i32,
) -> Result<Vec<i32>, CodecError> {
    let mut out = Vec::with_capacity(values.len());
    let mut carry = 0i32;
    let mut spilling = false;
    for &value in values {
        carry = carry
            .checked_add(value)
            .ok_or(CodecError::Overflow("recursive index"))?;
        spilling = value == max || value == min;
        if !spilling {
            out.push(carry);
            carry = 0;
        }
    }
    if spilling {
        return Err(CodecError::DanglingRecursiveChunk);
    }
    Ok(out)
}

pub(crate) fn recursive_index_encode(values: &[i32], min: i32, max: i32) -> Vec<i32> {
    let mut out = Vec::with_capacity(values.len());
    for &value in values {
        let mut rest = value;
        if rest >= 0 {
            while rest >= max {
                out.push(max);
                rest -= max;
            }
        } else {
            while rest <= min {
                out.push(min);
                rest -= min;
            }
        }
        out.push(rest);
    }
    out
}

pub(crate) fn scale_decode(values: &[i32], divisor: i32) -> Vec<f32> {
    let divisor = divisor as f32;
    values.iter().map(|&v| v as f32 / divisor).collect()
}

pub(crate) fn scale_encode(values: &[f32], factor: i32) -> Result<Vec<i32>, CodecError> {
    values
        .iter()
        .map(|&v| {
            let scaled = (v as f64 * factor as f64).round();
            if scaled.is_finite() && scaled >= i32::MIN as f64 && scaled <= i32::MAX as f64 {
                Ok(scaled as i32)
            } else {
                Err(CodecError::Overflow("integer scaling"))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_length_expands_pairs() {
        let decoded = run_length_decode(&[7, 3, -1, 1, 0, 2], 100).unwrap();
        assert_eq!(decoded, vec![7, 7, 7, -1, 0, 0]);
    }

    #[test]
    fn run_length_rejects_odd_payload() {
        assert_eq!(
            run_length_decode(&[1, 2, 3], 100),
            Err(CodecError::OddRunLength(3))
        );
    }

    #[test]
    fn run_length_rejects_negative_count() {
        assert_eq!(
            run_length_decode(&[1, -2], 100),
            Err(CodecError::NegativeRunCount(-2))
        );
    }

    #[test]
    fn run_length_stops_at_limit() {
        assert!(matches!(
            run_length_decode(&[1, 1_000_000_000], 10),
            Err(CodecError::LengthMismatch { expected: 10, .. })
        ));
    }

    #[test]
    fn run_length_encode_groups_identical_neighbours() {
        assert_eq!(run_length_encode(&[4, 4, 5, 4]), vec![4, 2, 5, 1, 4, 1]);
        assert!(run_length_encode(&[]).is_empty());
    }

    #[test]
    fn delta_decode_accumulates_from_absolute_first_value() {
        let mut values = vec![100, 1, 1, -2, 5];
        delta_decode(&mut values).unwrap();
        assert_eq!(values, vec![100, 101, 102, 100, 105]);
    }

    #[test]
    fn delta_decode_reports_overflow() {
        let mut values = vec![i32::MAX, 1];
        assert_eq!(
            delta_decode(&mut values),
            Err(CodecError::Overflow("delta"))
        );
    }

    #[test]
    fn delta_encode_inverts_decode() {
        let encoded = delta_encode(&[10, 12, 11, 11]).unwrap();
        assert_eq!(encoded, vec![10, 2, -1, 0]);
    }

    #[test]
    fn recursive_index_sums_spilled_chunks() {
        let decoded =
            recursive_index_decode(&[127, 41, 34, -128, -128, -3], -128, 127).unwrap();
        assert_eq!(decoded, vec![168, 34, -259]);
    }

    #[test]
    fn recursive_index_rejects_trailing_spill() {
        assert_eq!(
            recursive_index_decode(&[5, 127], -128, 127),
            Err(CodecError::DanglingRecursiveChunk)
        );
        assert_eq!(
            recursive_index_decode(&[-128], -128, 127),
            Err(CodecError::DanglingRecursiveChunk)
        );
        assert_eq!(recursive_index_decode(&[], -128, 127), Ok(vec![]));
    }

    #[test]
    fn recursive_index_encode_splits_outliers() {
        let encoded = recursive_index_encode(&[168, 34, -259, 127], -128, 127);
        assert_eq!(encoded, vec![127, 41, 34, -128, -128, -3, 127, 0]);
        let decoded = recursive_index_decode(&encoded, -128, 127).unwrap();
        assert_eq!(decoded, vec![168, 34, -259, 127]);
    }

    #[test]
    fn scaling_divides_by_factor() {
        let decoded = scale_decode(&[1234, -500, 0], 1000);
        assert_eq!(decoded, vec![1.234, -0.5, 0.0]);
    }

    #[test]
    fn scaling_rounds_to_nearest_integer() {
        assert_eq!(scale_encode(&[1.2344, 1.2346], 1000).unwrap(), vec![1234, 1235]);
    }

    #[test]
    fn scaling_rejects_values_beyond_i32() {
        assert_eq!(
            scale_encode(&[3.0e9], 1),
            Err(CodecError::Overflow("integer scaling"))
        );
        assert_eq!(
            scale_encode(&[f32::NAN], 10),
            Err(CodecError::Overflow("integer scaling"))
        );
    }
}
