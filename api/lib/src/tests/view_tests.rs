// Copyright (c) the NCP contributors.
// Licensed under the MIT License.

use test_with_tracing::test;

use crate::ByteView;
use crate::OpaqueBytes;

#[test]
fn fresh_view_spans_everything() {
    let data = [1u8, 2, 3, 4];
    let view = ByteView::array(&data);
    assert_eq!(view.capacity(), 4);
    assert_eq!(view.position(), 0);
    assert_eq!(view.limit(), 4);
    assert_eq!(view.remaining(), 4);
    assert!(view.has_remaining());
}

#[test]
fn narrowing_position_and_limit() {
    let data = [0u8; 10];
    let mut view = ByteView::array(&data);
    view.set_position(3);
    view.set_limit(7);
    assert_eq!(view.remaining(), 4);
}

#[test]
fn lowering_the_limit_pulls_back_the_position() {
    let data = [0u8; 10];
    let mut view = ByteView::array(&data);
    view.set_position(8);
    view.set_limit(5);
    assert_eq!(view.position(), 5);
    assert_eq!(view.remaining(), 0);
}

#[test]
#[should_panic(expected = "exceeds limit")]
fn position_beyond_limit_panics() {
    let data = [0u8; 4];
    let mut view = ByteView::array(&data);
    view.set_position(5);
}

#[test]
#[should_panic(expected = "exceeds capacity")]
fn limit_beyond_capacity_panics() {
    let data = [0u8; 4];
    let mut view = ByteView::array(&data);
    view.set_limit(5);
}

#[test]
fn take_remaining_copies_the_visible_span() {
    let data = [10u8, 11, 12, 13, 14, 15];
    let mut view = ByteView::array(&data);
    view.set_position(2);
    view.set_limit(5);
    assert_eq!(view.take_remaining(), vec![12, 13, 14]);
    assert_eq!(view.position(), 5);
    assert_eq!(view.take_remaining(), Vec::<u8>::new());
}

#[test]
fn direct_view_reads_the_same_bytes() {
    let data = [10u8, 11, 12, 13, 14, 15];
    let mut view = unsafe { ByteView::direct(data.as_ptr(), data.len()) };
    view.set_position(1);
    assert_eq!(view.take_remaining(), vec![11, 12, 13, 14, 15]);
}

#[test]
fn opaque_view_copies_through_the_trait() {
    struct Repeating(u8, usize);

    impl OpaqueBytes for Repeating {
        fn len(&self) -> usize {
            self.1
        }

        fn copy_into(&self, _offset: usize, dst: &mut [u8]) {
            dst.fill(self.0);
        }
    }

    let bytes = Repeating(0x5a, 8);
    let mut view = ByteView::opaque(&bytes);
    view.set_limit(3);
    assert_eq!(view.take_remaining(), vec![0x5a; 3]);
    assert_eq!(view.position(), 3);
}
