//! Encoding of point sequences with the
//! [polyline algorithm](https://developers.google.com/maps/documentation/utilities/polylinealgorithm).
//!
//! Every coordinate is scaled by `1e5`, rounded and stored as the difference from the same
//! coordinate of the previous point. Differences are zig-zag encoded and written in 5-bit
//! chunks, least significant chunk first, each chunk shifted into the printable ASCII range.

use crate::coordinates::HasCoordinates;
use crate::error::GeoError;
use crate::point::GeoPoint;

const SCALE: f64 = 1e5;
const CHUNK_BITS: u32 = 5;
const CHUNK_MASK: u64 = 0x1f;
const CONTINUATION: u64 = 0x20;
const ASCII_OFFSET: u8 = 63;

/// Result of polyline encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedPolyline {
    points: String,
    num_points: usize,
}

impl EncodedPolyline {
    /// Encoded string.
    pub fn points(&self) -> &str {
        &self.points
    }

    /// Number of points that were encoded.
    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// Consumes the result returning the encoded string.
    pub fn into_string(self) -> String {
        self.points
    }
}

/// Stateless polyline encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolylineEncoder;

impl PolylineEncoder {
    /// Encodes the sequence of points. Empty sequence produces an empty string.
    pub fn encode<P: HasCoordinates>(points: impl IntoIterator<Item = P>) -> EncodedPolyline {
        let mut encoded = String::new();
        let mut num_points = 0;
        let mut prev_lat = 0;
        let mut prev_lng = 0;

        for point in points {
            let lat = scale(point.lat());
            let lng = scale(point.lng());

            encode_value(lat.wrapping_sub(prev_lat), &mut encoded);
            encode_value(lng.wrapping_sub(prev_lng), &mut encoded);

            prev_lat = lat;
            prev_lng = lng;
            num_points += 1;
        }

        log::trace!("Encoded {num_points} points into {} chars", encoded.len());

        EncodedPolyline {
            points: encoded,
            num_points,
        }
    }

    /// Decodes the polyline string back into points.
    ///
    /// Precision of the decoded points is limited to 5 decimal digits.
    pub fn decode(encoded: &str) -> Result<Vec<GeoPoint>, GeoError> {
        let mut bytes = encoded.bytes();
        let mut points = Vec::new();
        let mut lat = 0;
        let mut lng = 0;

        while let Some(d_lat) = decode_value(&mut bytes)? {
            let d_lng = decode_value(&mut bytes)?.ok_or_else(|| {
                GeoError::InvalidPolyline("latitude without longitude at the end".into())
            })?;

            lat = advance(lat, d_lat)?;
            lng = advance(lng, d_lng)?;
            points.push(GeoPoint::new(lat as f64 / SCALE, lng as f64 / SCALE));
        }

        Ok(points)
    }
}

fn advance(coordinate: i64, delta: i64) -> Result<i64, GeoError> {
    coordinate
        .checked_add(delta)
        .ok_or_else(|| GeoError::InvalidPolyline("coordinate overflow".into()))
}

fn scale(coordinate: f64) -> i64 {
    (coordinate * SCALE).round() as i64
}

fn encode_value(value: i64, out: &mut String) {
    let shifted = value.wrapping_shl(1);
    let zigzag = if value < 0 { !shifted } else { shifted };
    let mut rest = zigzag as u64;

    while rest >= CONTINUATION {
        out.push(chunk_char((CONTINUATION | (rest & CHUNK_MASK)) as u8));
        rest >>= CHUNK_BITS;
    }

    out.push(chunk_char(rest as u8));
}

fn chunk_char(chunk: u8) -> char {
    char::from(chunk + ASCII_OFFSET)
}

fn decode_value(bytes: &mut impl Iterator<Item = u8>) -> Result<Option<i64>, GeoError> {
    let mut result: u64 = 0;
    let mut shift = 0;

    let Some(mut byte) = bytes.next() else {
        return Ok(None);
    };

    loop {
        if !(ASCII_OFFSET..=ASCII_OFFSET + 0x3f).contains(&byte) {
            return Err(GeoError::InvalidPolyline(format!(
                "unexpected character {:?}",
                char::from(byte)
            )));
        }

        let chunk = u64::from(byte - ASCII_OFFSET);
        result |= (chunk & CHUNK_MASK) << shift;
        shift += CHUNK_BITS;

        if chunk & CONTINUATION == 0 {
            break;
        }

        if shift >= u64::BITS - CHUNK_BITS {
            return Err(GeoError::InvalidPolyline("value is too long".into()));
        }

        byte = bytes
            .next()
            .ok_or_else(|| GeoError::InvalidPolyline("unterminated value".into()))?;
    }

    let value = if result & 1 == 1 {
        !(result >> 1) as i64
    } else {
        (result >> 1) as i64
    };

    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    #[test]
    fn encode_two_points() {
        let encoded = PolylineEncoder::encode([(1.0, 2.0), (3.0, 4.0)]);
        assert_eq!(encoded.points(), "_ibE_seK_seK_seK");
        assert_eq!(encoded.num_points(), 2);
    }

    #[test]
    fn encode_reference_line() {
        let points = [
            GeoPoint::new(38.5, -120.2),
            GeoPoint::new(40.7, -120.95),
            GeoPoint::new(43.252, -126.453),
        ];
        let encoded = PolylineEncoder::encode(&points);
        assert_eq!(encoded.into_string(), "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
    }

    #[test]
    fn encode_negative_value() {
        let encoded = PolylineEncoder::encode([(-179.9832104, 0.0)]);
        assert_eq!(encoded.points(), "`~oia@?");
    }

    #[test]
    fn encode_out_of_range_coordinates() {
        let encoded = PolylineEncoder::encode([(1e300, 0.0), (-1e300, 0.0), (f64::NAN, 0.0)]);
        assert_eq!(encoded.num_points(), 3);
        assert!(encoded.points().bytes().all(|byte| (63..=126).contains(&byte)));
    }

    #[test]
    fn encode_empty() {
        let encoded = PolylineEncoder::encode(Vec::<GeoPoint>::new());
        assert_eq!(encoded, EncodedPolyline::default());
    }

    #[test]
    fn decode_reference_line() {
        let points = PolylineEncoder::decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
        let expected = [(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)];

        assert_eq!(points.len(), expected.len());
        for (point, (lat, lng)) in points.iter().zip(expected) {
            assert_abs_diff_eq!(point.lat(), lat, epsilon = 1e-9);
            assert_abs_diff_eq!(point.lng(), lng, epsilon = 1e-9);
        }
    }

    #[test]
    fn decode_malformed() {
        assert_matches!(
            PolylineEncoder::decode("_ibE"),
            Err(GeoError::InvalidPolyline(_))
        );
        assert_matches!(
            PolylineEncoder::decode("_ib"),
            Err(GeoError::InvalidPolyline(_))
        );
        assert_matches!(
            PolylineEncoder::decode("_ibE _seK"),
            Err(GeoError::InvalidPolyline(_))
        );
        assert_eq!(PolylineEncoder::decode("").unwrap(), vec![]);
    }
}
