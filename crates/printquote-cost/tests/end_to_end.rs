//! Bytes in, priced order out.

use approx::assert_relative_eq;
use printquote_cost::{
    quote, DimensionInput, EstimateError, EstimateRequest, Field, FormValue, QuoteForm,
};
use printquote_math::{Point3, Triangle};
use printquote_mesh::{to_ascii_stl, to_binary_stl, MeshFormat, ParseError};

fn box_mesh(sx: f64, sy: f64, sz: f64) -> Vec<Triangle> {
    let p = |x: f64, y: f64, z: f64| Point3::new(x * sx, y * sy, z * sz);
    let v = [
        p(0.0, 0.0, 0.0),
        p(1.0, 0.0, 0.0),
        p(1.0, 1.0, 0.0),
        p(0.0, 1.0, 0.0),
        p(0.0, 0.0, 1.0),
        p(1.0, 0.0, 1.0),
        p(1.0, 1.0, 1.0),
        p(0.0, 1.0, 1.0),
    ];
    [
        [0, 2, 1], [0, 3, 2],
        [4, 5, 6], [4, 6, 7],
        [0, 1, 5], [0, 5, 4],
        [2, 3, 7], [2, 7, 6],
        [0, 4, 7], [0, 7, 3],
        [1, 2, 6], [1, 6, 5],
    ]
    .iter()
    .map(|f| Triangle::new(v[f[0]], v[f[1]], v[f[2]]))
    .collect()
}

fn request(width: f64, height: f64, thickness: f64, quantity: u32) -> EstimateRequest {
    EstimateRequest {
        infill_percent: Some(15.0),
        ..EstimateRequest::new(DimensionInput {
            width,
            height,
            thickness,
            quantity,
        })
    }
}

#[test]
fn test_box_mesh_at_native_size_matches_slab() {
    let bytes = to_binary_stl(&box_mesh(50.0, 50.0, 5.0));
    let req = request(50.0, 50.0, 5.0, 1);

    let with_mesh = quote(Some(bytes.as_slice()), &req).unwrap();
    let slab = quote(None, &req).unwrap();

    let mesh = with_mesh.mesh.as_ref().unwrap();
    assert_eq!(mesh.format, MeshFormat::Binary);
    assert_relative_eq!(mesh.volume_mm3, 12_500.0, epsilon = 1e-6);
    assert_relative_eq!(
        with_mesh.pricing.unit_price,
        slab.pricing.unit_price,
        epsilon = 1e-9
    );
    assert_relative_eq!(with_mesh.pricing.unit_price, 26.287375, epsilon = 1e-9);
    assert!(slab.mesh.is_none());
}

#[test]
fn test_binary_and_ascii_price_identically() {
    let tris = box_mesh(12.0, 8.0, 3.0);
    let req = request(24.0, 8.0, 3.0, 75);
    let bin = quote(Some(to_binary_stl(&tris).as_slice()), &req).unwrap();
    let txt = quote(Some(to_ascii_stl("tag", &tris).as_bytes()), &req).unwrap();

    assert_eq!(txt.mesh.as_ref().unwrap().format, MeshFormat::Ascii);
    assert_relative_eq!(
        bin.pricing.geometric_volume_mm3,
        24.0 * 8.0 * 3.0,
        epsilon = 1e-6
    );
    assert_relative_eq!(
        bin.pricing.total_cost,
        txt.pricing.total_cost,
        epsilon = 1e-9
    );
    assert_eq!(bin.pricing.discount_rate, 0.07);
}

#[test]
fn test_prefilled_dimensions_leave_volume_unchanged() {
    let bytes = to_ascii_stl("cube", &box_mesh(10.0, 10.0, 10.0));
    let summary = printquote_mesh::decode(bytes.as_bytes()).unwrap();
    let req = EstimateRequest::new(DimensionInput::from_summary(&summary, 1));

    let q = quote(Some(bytes.as_bytes()), &req).unwrap();
    let scale = q.pricing.scale.unwrap();
    assert_relative_eq!(scale.volumetric(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(q.pricing.geometric_volume_mm3, 1000.0, epsilon = 1e-9);
}

#[test]
fn test_decode_failure_is_reported() {
    let req = request(10.0, 10.0, 10.0, 1);
    assert_eq!(
        quote(Some(&[0u8; 20][..]), &req),
        Err(EstimateError::Parse(ParseError::TooSmall { len: 20 }))
    );
}

#[test]
fn test_flat_mesh_is_rejected() {
    // A single square: zero enclosed volume and zero Z extent.
    let o = Point3::origin();
    let tris = [
        Triangle::new(o, Point3::new(10.0, 0.0, 0.0), Point3::new(10.0, 10.0, 0.0)),
        Triangle::new(o, Point3::new(10.0, 10.0, 0.0), Point3::new(0.0, 10.0, 0.0)),
    ];
    let bytes = to_binary_stl(&tris);
    let req = request(10.0, 10.0, 2.0, 1);
    match quote(Some(bytes.as_slice()), &req) {
        Err(EstimateError::Validation(e)) => assert_eq!(e.field, Field::Volume),
        other => panic!("expected volume error, got {other:?}"),
    }
}

#[test]
fn test_form_to_quote() {
    let form = QuoteForm {
        width: Some(FormValue::from("50")),
        height: Some(FormValue::from("50")),
        thickness: Some(FormValue::from("5")),
        quantity: Some(FormValue::from("100")),
        infill: Some(FormValue::from("15")),
        material: Some("pla".into()),
        add_ons: vec!["chain".into()],
    };
    let q = quote(None, &form.parse().unwrap()).unwrap();
    assert_eq!(q.pricing.quantity, 100);
    assert_eq!(q.pricing.discount_rate, 0.10);
    assert_eq!(q.pricing.selected_add_ons, vec!["chain"]);
    let expected_unit = 20.0 / 100.0 + (6.287375 + 1.0) * 0.9;
    assert_relative_eq!(q.pricing.unit_price, expected_unit, epsilon = 1e-9);
}
