//! Views and data views sharing one buffer observe each other's writes.

use typedshim::{
    AnyTypedArray, ArrayBuffer, DataView, ElementKind, ErrorKind, Float32Array, Float64Array,
    Int32Array, Uint8Array, Uint16Array, ViewInit,
};

#[test]
fn int32_write_is_big_endian_through_byte_view() {
    let buf = ArrayBuffer::new(8).unwrap();
    let words = Int32Array::from_buffer(&buf, 0, None).unwrap();
    let bytes = Uint8Array::from_buffer(&buf, 0, None).unwrap();

    words.set(0, f64::from(0x0102_0304));
    assert_eq!(bytes.get(0), Some(1.0));
    assert_eq!(bytes.get(3), Some(4.0));

    bytes.set(7, 0xff as f64);
    assert_eq!(words.get(1), Some(255.0));
}

#[test]
fn float32_bytes_seen_through_data_view() {
    let buf = ArrayBuffer::new(4).unwrap();
    let floats = Float32Array::from_buffer(&buf, 0, None).unwrap();
    floats.set(0, 1.5);

    let dv = DataView::new(&buf, 0, None).unwrap();
    let bytes: Vec<u8> = (0..4).map(|i| dv.get_uint8(i, false).unwrap()).collect();
    assert_eq!(bytes, vec![0x3f, 0xc0, 0x00, 0x00]);
    assert_eq!(dv.get_uint32(0, false).unwrap(), 0x3fc0_0000);
}

#[test]
fn data_view_writes_reach_typed_views() {
    let buf = ArrayBuffer::new(16).unwrap();
    let dv = DataView::new(&buf, 0, None).unwrap();
    let doubles = Float64Array::from_buffer(&buf, 8, Some(1)).unwrap();

    dv.set_float64(8, -0.25, false).unwrap();
    assert_eq!(doubles.get(0), Some(-0.25));

    // A little-endian write is not what a big-endian view expects.
    dv.set_float64(8, -0.25, true).unwrap();
    assert_ne!(doubles.get(0), Some(-0.25));
}

#[test]
fn views_at_different_offsets_and_widths() {
    let buf = ArrayBuffer::new(8).unwrap();
    let shorts = Uint16Array::from_buffer(&buf, 2, Some(2)).unwrap();
    let bytes = Uint8Array::from_buffer(&buf, 0, None).unwrap();

    shorts.set_from_slice(&[0xabcd as f64, 0x1234 as f64], 0).unwrap();
    assert_eq!(bytes.to_vec(), vec![0.0, 0.0, 171.0, 205.0, 18.0, 52.0, 0.0, 0.0]);

    bytes.fill(0.0, 3, Some(5));
    assert_eq!(shorts.to_vec(), vec![0xab00 as f64, 0x0034 as f64]);
}

#[test]
fn subarray_shares_and_slice_copies() {
    let parent = Int32Array::from_values(&[10.0, 20.0, 30.0, 40.0]);
    let shared = parent.subarray(1, Some(3));
    let copied = parent.slice(1, Some(3));

    shared.set(0, -1.0);
    assert_eq!(parent.get(1), Some(-1.0));
    assert_eq!(copied.get(0), Some(20.0));

    parent.set(2, 99.0);
    assert_eq!(shared.get(1), Some(99.0));
    assert_eq!(copied.get(1), Some(30.0));
    assert!(shared.buffer().same_buffer(parent.buffer()));
    assert!(!copied.buffer().same_buffer(parent.buffer()));
}

#[test]
fn buffer_outlives_the_handle_that_created_it() {
    let view = {
        let buf = ArrayBuffer::new(4).unwrap();
        Uint8Array::from_buffer(&buf, 0, None).unwrap()
    };
    view.set(0, 1.0);
    assert_eq!(view.buffer().to_vec(), vec![1, 0, 0, 0]);
}

#[test]
fn construction_failures_are_range_errors() {
    let buf = ArrayBuffer::new(8).unwrap();
    let misaligned = Int32Array::from_buffer(&buf, 1, Some(1)).unwrap_err();
    assert_eq!(misaligned.kind(), ErrorKind::Range);
    let too_long = Int32Array::from_buffer(&buf, 4, Some(2)).unwrap_err();
    assert_eq!(too_long.kind(), ErrorKind::Range);

    let init = ViewInit::Buffer {
        buffer: buf.clone(),
        byte_offset: 0,
        length: Some(3),
    };
    let err = AnyTypedArray::construct(ElementKind::Float32, init).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
}

#[test]
fn mismatched_view_copy_is_type_error() {
    let bytes = Uint8Array::from_values(&[1.0, 2.0]);
    let err = Uint16Array::construct(ViewInit::View(bytes.into())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
}

#[test]
fn out_of_range_element_access_is_silent() {
    let view = Float32Array::new(2).unwrap();
    assert_eq!(view.get(2), None);
    view.set(2, 1.0);
    view.set(usize::MAX, 1.0);
    assert_eq!(view.buffer().to_vec(), vec![0; 8]);
}
