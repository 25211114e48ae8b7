//! Runs without the libtest harness so nothing else allocates concurrently.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicUsize, Ordering};

use segbuf::SegmentedBuffer;

struct Counting;

static LIVE: AtomicUsize = AtomicUsize::new(0);
static ALLOCATIONS: AtomicUsize = AtomicUsize::new(0);

unsafe impl GlobalAlloc for Counting {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            LIVE.fetch_add(layout.size(), Ordering::SeqCst);
            ALLOCATIONS.fetch_add(1, Ordering::SeqCst);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        LIVE.fetch_sub(layout.size(), Ordering::SeqCst);
    }
}

#[global_allocator]
static GLOBAL: Counting = Counting;

fn live() -> usize { LIVE.load(Ordering::SeqCst) }

fn allocations() -> usize { ALLOCATIONS.load(Ordering::SeqCst) }

// Hit every log callsite once so lazy registration is not counted below.
fn warm_up() {
    let mut buffer = SegmentedBuffer::new();
    buffer.append(&[0u8; 5000]).unwrap();
    buffer.append(&[0u8; 10]).unwrap();
    buffer.clear();
    buffer.append(&[0u8; 6000]).unwrap();
    buffer.destroy();
}

fn new_buffer_allocates_nothing() {
    let before = allocations();
    let buffer = SegmentedBuffer::new();
    assert_eq!(allocations(), before);
    buffer.destroy();
}

fn destroy_releases_all_segments() {
    let payload = vec![7u8; 20_000];
    let baseline = live();

    let mut buffer = SegmentedBuffer::new();
    for chunk in payload.chunks(1500) {
        buffer.append(chunk).unwrap();
    }
    assert!(buffer.segment_count() > 1);
    assert!(live() >= baseline + buffer.allocated());

    buffer.destroy();
    assert_eq!(live(), baseline);
}

fn clear_then_append_reuses_storage() {
    let payload = vec![1u8; 9000];
    let mut buffer = SegmentedBuffer::new();
    buffer.append(&payload).unwrap();
    buffer.append(&payload[..100]).unwrap();

    buffer.clear();
    let before = allocations();
    buffer.append(&payload[..5000]).unwrap();
    buffer.append(&payload[..100]).unwrap();
    assert_eq!(allocations(), before);
    assert_eq!(buffer.len(), 5100);

    buffer.destroy();
}

fn main() {
    warm_up();
    new_buffer_allocates_nothing();
    destroy_releases_all_segments();
    clear_then_append_reuses_storage();
    println!("alloc_tracking: ok");
}
