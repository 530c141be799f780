use crate::entities::Coordinates;
use crate::error::{malformed_polyline_error, Error};

const PRECISION: f64 = 1e5;

/// Decodes an encoded polyline string into its coordinate sequence.
///
/// Coordinates are delta-encoded against the previous point, zigzag-mapped
/// and packed into 6-bit characters (code point minus 63, bit 0x20 marking a
/// continuation chunk). A truncated or otherwise unreadable input is an
/// error, never a partial sequence.
pub fn decode(encoded: &str) -> Result<Vec<Coordinates>, Error> {
    let bytes = encoded.as_bytes();

    let mut coordinates = Vec::new();
    let mut index = 0;
    let mut latitude: i64 = 0;
    let mut longitude: i64 = 0;

    while index < bytes.len() {
        latitude += decode_delta(bytes, &mut index)?;
        longitude += decode_delta(bytes, &mut index)?;

        coordinates.push(Coordinates {
            latitude: latitude as f64 / PRECISION,
            longitude: longitude as f64 / PRECISION,
        });
    }

    Ok(coordinates)
}

/// Encodes a coordinate sequence into the compact polyline representation.
pub fn encode(coordinates: &[Coordinates]) -> String {
    let mut encoded = String::new();
    let mut previous_latitude: i64 = 0;
    let mut previous_longitude: i64 = 0;

    for point in coordinates {
        let latitude = (point.latitude * PRECISION).round() as i64;
        let longitude = (point.longitude * PRECISION).round() as i64;

        encode_delta(latitude - previous_latitude, &mut encoded);
        encode_delta(longitude - previous_longitude, &mut encoded);

        previous_latitude = latitude;
        previous_longitude = longitude;
    }

    encoded
}

fn decode_delta(bytes: &[u8], index: &mut usize) -> Result<i64, Error> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let byte = *bytes
            .get(*index)
            .ok_or_else(|| malformed_polyline_error())?;

        if byte < 63 {
            return Err(malformed_polyline_error());
        }

        *index += 1;

        // a continuation run past 64 bits cannot be a valid delta
        if shift >= 64 {
            return Err(malformed_polyline_error());
        }

        let chunk = (byte - 63) as i64;
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk & 0x20 == 0 {
            break;
        }
    }

    // zigzag: odd values are negative
    if result & 1 == 1 {
        Ok(-((result >> 1) + 1))
    } else {
        Ok(result >> 1)
    }
}

fn encode_delta(delta: i64, encoded: &mut String) {
    let mut value = if delta < 0 { !(delta << 1) } else { delta << 1 } as u64;

    while value >= 0x20 {
        encoded.push((((value & 0x1f) | 0x20) as u8 + 63) as char);
        value >>= 5;
    }

    encoded.push((value as u8 + 63) as char);
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENCODED: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    fn reference_points() -> Vec<Coordinates> {
        vec![
            Coordinates {
                latitude: 38.5,
                longitude: -120.2,
            },
            Coordinates {
                latitude: 40.7,
                longitude: -120.95,
            },
            Coordinates {
                latitude: 43.252,
                longitude: -126.453,
            },
        ]
    }

    #[test]
    fn decodes_empty_input_to_empty_sequence() {
        assert_eq!(decode("").unwrap(), Vec::new());
    }

    #[test]
    fn decodes_reference_string() {
        assert_eq!(decode(ENCODED).unwrap(), reference_points());
    }

    #[test]
    fn encodes_reference_points() {
        assert_eq!(encode(&reference_points()), ENCODED);
    }

    #[test]
    fn round_trips_within_precision() {
        let points = vec![
            Coordinates {
                latitude: 0.0,
                longitude: 0.0,
            },
            Coordinates {
                latitude: -33.86746,
                longitude: 151.20709,
            },
            Coordinates {
                latitude: -33.8705,
                longitude: 151.19896,
            },
            Coordinates {
                latitude: 64.14363,
                longitude: -21.91742,
            },
        ];

        let decoded = decode(&encode(&points)).unwrap();

        assert_eq!(decoded.len(), points.len());
        for (decoded, original) in decoded.iter().zip(points.iter()) {
            assert!((decoded.latitude - original.latitude).abs() < 1e-5);
            assert!((decoded.longitude - original.longitude).abs() < 1e-5);
        }
    }

    #[test]
    fn rejects_truncated_continuation_sequence() {
        // the final chunk of the reference string is cut off mid-value
        let err = decode(&ENCODED[..ENCODED.len() - 2]).unwrap_err();

        assert_eq!(err.code, 102);
    }

    #[test]
    fn rejects_missing_longitude_delta() {
        // a single complete delta leaves the point without a longitude
        let err = decode("_p~iF").unwrap_err();

        assert_eq!(err.code, 102);
    }

    #[test]
    fn rejects_an_endless_continuation_run() {
        let err = decode(&"~".repeat(20)).unwrap_err();

        assert_eq!(err.code, 102);
    }

    #[test]
    fn rejects_characters_below_the_encoding_range() {
        let err = decode("_p~iF ~ps|U").unwrap_err();

        assert_eq!(err.code, 102);
    }
}
