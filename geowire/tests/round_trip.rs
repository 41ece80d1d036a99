use approx::assert_abs_diff_eq;
use assert_matches::assert_matches;
use geowire::{
    decode_wkb, decode_wkb_with, decode_wkt, encode_wkb, encode_wkt, ByteOrder, CodecError,
    Coordinate, DecodeOptions, Geometry, GeometryCollection, LineString, MultiLineString,
    MultiPoint, MultiPolygon, Polygon, Reference, Ring, SourceReference,
};

const DIMENSIONS: [(bool, bool); 4] = [(false, false), (true, false), (false, true), (true, true)];

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn coordinate(x: f64, y: f64, (has_z, has_m): (bool, bool)) -> Coordinate {
    Coordinate::new(x, y, Reference::Geographic)
        .with_zm(has_z.then_some(x + y + 0.5), has_m.then_some(x * 2.0 - 0.1))
}

fn square(origin: f64, size: f64, dimensions: (bool, bool)) -> Ring {
    Ring::try_from(vec![
        coordinate(origin, origin, dimensions),
        coordinate(origin, origin + size, dimensions),
        coordinate(origin + size, origin + size, dimensions),
        coordinate(origin + size, origin, dimensions),
        coordinate(origin, origin, dimensions),
    ])
    .unwrap()
}

fn samples(dimensions: (bool, bool)) -> Vec<Geometry> {
    let c = |x, y| coordinate(x, y, dimensions);
    let line = LineString::new(vec![c(0.0, 0.0), c(1.25, -3.5), c(179.9, 89.9)]);
    let polygon = Polygon::new(
        square(0.0, 10.0, dimensions),
        vec![square(2.0, 1.5, dimensions)],
    );

    let multi_point = MultiPoint::from(vec![c(-0.1, 0.2), c(12.0, 50.125)]);
    let multi_line = MultiLineString::from(vec![
        line.clone(),
        LineString::new(vec![c(5.0, 5.0), c(6.0, 7.0)]),
    ]);
    let multi_polygon = MultiPolygon::from(vec![
        polygon.clone(),
        Polygon::new(square(-20.0, 3.0, dimensions), vec![]),
    ]);

    let nested = GeometryCollection::from(vec![
        Geometry::from(c(3.0, 4.0)),
        Geometry::from(multi_point.clone()),
    ]);
    let collection = GeometryCollection::from(vec![
        Geometry::from(c(1.0, 2.0)),
        Geometry::from(line.clone()),
        Geometry::from(polygon.clone()),
        Geometry::from(nested),
    ]);

    vec![
        Geometry::from(c(1.0, 2.0)),
        line.into(),
        polygon.into(),
        multi_point.into(),
        multi_line.into(),
        multi_polygon.into(),
        collection.into(),
    ]
}

fn geographic_source() -> Option<SourceReference> {
    Some(Reference::Geographic.into())
}

#[test]
fn wkb_round_trip() {
    init_logger();
    for dimensions in DIMENSIONS {
        for geometry in samples(dimensions) {
            for byte_order in [ByteOrder::LittleEndian, ByteOrder::BigEndian] {
                let bytes = encode_wkb(&geometry, byte_order, None).unwrap();
                let decoded =
                    decode_wkb(&bytes, geographic_source(), Reference::Geographic).unwrap();
                assert_eq!(decoded, geometry, "{dimensions:?} {byte_order:?}");
            }

            // Embedded SRID instead of explicit source.
            let bytes = encode_wkb(
                &geometry,
                ByteOrder::LittleEndian,
                Some(Reference::Geographic),
            )
            .unwrap();
            let decoded = decode_wkb(&bytes, None, Reference::Geographic).unwrap();
            assert_eq!(decoded, geometry, "{dimensions:?}");
        }
    }
}

#[test]
fn wkt_round_trip() {
    init_logger();
    for dimensions in DIMENSIONS {
        for geometry in samples(dimensions) {
            let text = encode_wkt(&geometry, None).unwrap();
            let decoded = decode_wkt(&text, geographic_source(), Reference::Geographic).unwrap();
            assert_eq!(decoded, geometry, "{text}");

            let text = encode_wkt(&geometry, Some(Reference::Geographic)).unwrap();
            let decoded = decode_wkt(&text, None, Reference::Geographic).unwrap();
            assert_eq!(decoded, geometry, "{text}");
        }
    }
}

#[test]
fn unspecified_reference_round_trip() {
    let source = Some(SourceReference::Srid(0));
    for dimensions in DIMENSIONS {
        for geometry in samples(dimensions) {
            let geometry = geometry
                .try_map_coords(&mut |c: &Coordinate| {
                    Ok::<_, CodecError>(
                        Coordinate::new(c.x(), c.y(), Reference::Unspecified).with_zm(c.z(), c.m()),
                    )
                })
                .unwrap();

            let bytes = encode_wkb(&geometry, ByteOrder::LittleEndian, Some(Reference::Unspecified))
                .unwrap();
            assert_eq!(
                decode_wkb(&bytes, source, Reference::Unspecified).unwrap(),
                geometry
            );

            let text = encode_wkt(&geometry, Some(Reference::Unspecified)).unwrap();
            assert!(!text.starts_with("SRID"), "{text}");
            assert_eq!(
                decode_wkt(&text, source, Reference::Unspecified).unwrap(),
                geometry,
                "{text}"
            );
        }
    }
}

#[test]
fn empty_members_round_trip() {
    let geometries = vec![
        Geometry::from(LineString::new(vec![])),
        Geometry::from(Polygon::from_rings(vec![])),
        Geometry::from(MultiPoint::from(Vec::<Coordinate>::new())),
        Geometry::from(MultiLineString::from(vec![
            LineString::new(vec![]),
            LineString::new(vec![
                coordinate(1.0, 1.0, (false, false)),
                coordinate(2.0, 2.0, (false, false)),
            ]),
        ])),
        Geometry::from(MultiPolygon::from(vec![Polygon::from_rings(vec![])])),
        Geometry::from(GeometryCollection::from(vec![
            Geometry::from(LineString::new(vec![])),
            Geometry::from(GeometryCollection::from(Vec::<Geometry>::new())),
        ])),
    ];

    for geometry in geometries {
        let bytes = encode_wkb(&geometry, ByteOrder::LittleEndian, None).unwrap();
        assert_eq!(
            decode_wkb(&bytes, geographic_source(), Reference::Geographic).unwrap(),
            geometry
        );

        let text = encode_wkt(&geometry, None).unwrap();
        assert_eq!(
            decode_wkt(&text, geographic_source(), Reference::Geographic).unwrap(),
            geometry,
            "{text}"
        );
    }
}

#[test]
fn mixed_dimensions_round_trip_as_absent() {
    let line = LineString::new(vec![
        coordinate(0.0, 0.0, (true, true)),
        coordinate(1.0, 1.0, (false, false)),
    ]);
    let geometry = Geometry::from(line);

    let bytes = encode_wkb(&geometry, ByteOrder::LittleEndian, None).unwrap();
    assert_eq!(
        decode_wkb(&bytes, geographic_source(), Reference::Geographic).unwrap(),
        geometry
    );

    let text = encode_wkt(&geometry, None).unwrap();
    assert_eq!(
        decode_wkt(&text, geographic_source(), Reference::Geographic).unwrap(),
        geometry
    );
}

#[test]
fn reprojection_composes_with_explicit_transform() {
    for dimensions in DIMENSIONS {
        for geometry in samples(dimensions) {
            let bytes = encode_wkb(&geometry, ByteOrder::LittleEndian, None).unwrap();

            let projected =
                decode_wkb(&bytes, geographic_source(), Reference::Projected).unwrap();
            let geographic =
                decode_wkb(&bytes, geographic_source(), Reference::Geographic).unwrap();
            assert_eq!(
                projected,
                geographic.to_reference(Reference::Projected).unwrap()
            );

            let text = encode_wkt(&geometry, None).unwrap();
            let projected_text =
                decode_wkt(&text, geographic_source(), Reference::Projected).unwrap();
            assert_eq!(projected_text, projected);
        }
    }
}

#[test]
fn reprojected_coordinates() {
    let geometry =
        Geometry::from(Coordinate::new(90.0, 45.0, Reference::Geographic).with_z(12.0));
    let bytes = encode_wkb(&geometry, ByteOrder::BigEndian, None).unwrap();

    let decoded = decode_wkb(&bytes, geographic_source(), Reference::Projected).unwrap();
    let Geometry::Point(point) = decoded else {
        panic!("invalid geometry type");
    };
    assert_eq!(point.reference(), Reference::Projected);
    assert_abs_diff_eq!(point.x(), 10018754.171394622, epsilon = 1e-6);
    assert_abs_diff_eq!(point.y(), 5621521.486192066, epsilon = 1e-6);
    assert_eq!(point.z(), Some(12.0));

    // Back into degrees through the encoder.
    let text = encode_wkt(&Geometry::Point(point), Some(Reference::Geographic)).unwrap();
    let Geometry::Point(point) = decode_wkt(&text, None, Reference::Geographic).unwrap() else {
        panic!("invalid geometry type");
    };
    assert_abs_diff_eq!(point.x(), 90.0, epsilon = 1e-9);
    assert_abs_diff_eq!(point.y(), 45.0, epsilon = 1e-9);
}

#[test]
fn truncated_buffers_are_corrupted() {
    for dimensions in DIMENSIONS {
        for geometry in samples(dimensions) {
            for target in [None, Some(Reference::Geographic)] {
                let bytes = encode_wkb(&geometry, ByteOrder::LittleEndian, target).unwrap();
                for len in 0..bytes.len() {
                    assert_matches!(
                        decode_wkb(&bytes[..len], geographic_source(), Reference::Geographic),
                        Err(CodecError::DataCorrupted(_)),
                        "{} truncated at {len}",
                        geometry.geometry_type()
                    );
                }
            }
        }
    }
}

#[test]
fn tolerated_short_multipoint_keeps_complete_points() {
    let points = MultiPoint::from(vec![
        coordinate(0.0, 0.0, (false, false)),
        coordinate(1.0, 1.0, (false, false)),
        coordinate(2.0, 2.0, (false, false)),
    ]);
    let bytes = encode_wkb(&points.into(), ByteOrder::LittleEndian, None).unwrap();
    // Drop the last point.
    let short = &bytes[..bytes.len() - 21];

    let options = DecodeOptions::new()
        .with_source(Reference::Geographic)
        .with_tolerate_short_multipoint(true);
    let Geometry::MultiPoint(decoded) = decode_wkb_with(short, &options).unwrap() else {
        panic!("invalid geometry type");
    };
    assert_eq!(decoded.points().len(), 2);
}
